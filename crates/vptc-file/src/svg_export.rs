//! SVG 预览导出
//!
//! 与屏幕预览使用同一套视图适配：包围盒加固定边距后等比缩放到视口，
//! 每个图层一个 `<g>`，描边颜色取自 ACI，虚线图案取自线型。

use crate::error::FileError;
use crate::export::write_atomically;
use std::path::Path;
use svg::node::element::{Circle as SvgCircle, Group, Line as SvgLine, Polyline as SvgPolyline};
use svg::Document;
use vptc_core::compose::GeometricModel;
use vptc_core::geometry::Geometry;
use vptc_core::properties::LineType;
use vptc_core::view::{ViewTransform, Viewport, PREVIEW_MARGIN};

/// 渲染到默认 600×600 视口
pub fn to_string(model: &GeometricModel) -> String {
    render(model, Viewport::default()).to_string()
}

/// 导出到SVG文件
pub fn export(model: &GeometricModel, path: &Path) -> Result<(), FileError> {
    write_atomically(path, to_string(model).as_bytes())?;
    tracing::info!("Saved SVG preview to {}", path.display());
    Ok(())
}

/// 生成 SVG 文档
pub fn render(model: &GeometricModel, viewport: Viewport) -> Document {
    let view = ViewTransform::fit(&model.bounding_box(), PREVIEW_MARGIN, viewport);

    let mut document = Document::new()
        .set("width", viewport.width)
        .set("height", viewport.height)
        .set("viewBox", (0.0, 0.0, viewport.width, viewport.height));

    for layer in model.layers() {
        let props = layer.properties();
        let mut group = Group::new()
            .set("id", layer.name())
            .set("fill", "none")
            .set("stroke", props.color.to_hex())
            .set("stroke-width", 1);
        if let Some(dasharray) = dasharray(props.line_type) {
            group = group.set("stroke-dasharray", dasharray);
        }

        for primitive in model.on_layer(layer) {
            group = match &primitive.geometry {
                Geometry::Circle(circle) => {
                    let c = view.to_screen(&circle.center);
                    group.add(
                        SvgCircle::new()
                            .set("cx", c.x)
                            .set("cy", c.y)
                            .set("r", view.scale_length(circle.radius)),
                    )
                }
                Geometry::Line(line) => {
                    let a = view.to_screen(&line.start);
                    let b = view.to_screen(&line.end);
                    group.add(
                        SvgLine::new()
                            .set("x1", a.x)
                            .set("y1", a.y)
                            .set("x2", b.x)
                            .set("y2", b.y),
                    )
                }
                Geometry::Polyline(polyline) => {
                    let points = polyline
                        .vertices
                        .iter()
                        .map(|p| {
                            let s = view.to_screen(p);
                            format!("{:.3},{:.3}", s.x, s.y)
                        })
                        .collect::<Vec<_>>()
                        .join(" ");
                    group.add(SvgPolyline::new().set("points", points))
                }
            };
        }

        document = document.add(group);
    }

    document
}

/// 线型对应的像素虚线图案
fn dasharray(line_type: LineType) -> Option<String> {
    let pattern = line_type.dash_pattern();
    if pattern.is_empty() {
        return None;
    }
    Some(
        pattern
            .iter()
            .map(|d| format!("{}", d.abs()))
            .collect::<Vec<_>>()
            .join(","),
    )
}
