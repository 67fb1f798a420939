//! DXF文件导出/导入
//!
//! 导出为 AutoCAD R2000 格式：
//! - 廓形 → LWPOLYLINE
//! - 所有圆 → CIRCLE
//! - 构造线 → 两点 LWPOLYLINE
//!
//! 每个实体都带图层名、颜色索引和线型名；LAYER 表与 LTYPE 表同步写入。

use crate::error::FileError;
use crate::export::write_atomically;
use std::fs::File;
use std::io::{BufReader, Cursor, Read, Write};
use std::path::Path;
use vptc_core::compose::{GeometricModel, Primitive};
use vptc_core::geometry::{Circle, Geometry, Line, Polyline};
use vptc_core::layer::Layer;
use vptc_core::math::Point2;
use vptc_core::properties::{Color, LineType, Properties};

/// 导出到DXF文件
///
/// 先在内存中完成序列化，再原子地写入目标路径；失败时不会留下文件。
pub fn export(model: &GeometricModel, path: &Path) -> Result<(), FileError> {
    let bytes = to_bytes(model)?;
    write_atomically(path, &bytes)?;

    tracing::info!(
        "Saved {} entities, {} layers to {}",
        model.len(),
        model.layers().len(),
        path.display()
    );

    Ok(())
}

/// 序列化为DXF文本
pub fn to_bytes(model: &GeometricModel) -> Result<Vec<u8>, FileError> {
    let mut buffer = Vec::new();
    write(model, &mut buffer)?;
    Ok(buffer)
}

/// 写入任意输出流
pub fn write<W: Write>(model: &GeometricModel, writer: &mut W) -> Result<(), FileError> {
    let drawing = to_drawing(model);
    drawing
        .save(writer)
        .map_err(|e| FileError::Dxf(e.to_string()))
}

/// 构建 DXF 图纸
pub fn to_drawing(model: &GeometricModel) -> dxf::Drawing {
    let mut drawing = dxf::Drawing::new();
    drawing.header.version = dxf::enums::AcadVersion::R2000;

    // 线型表：CONTINUOUS 由 dxf 库默认提供
    for line_type in [LineType::Dashed, LineType::Center] {
        if !drawing
            .line_types()
            .any(|lt| lt.name.eq_ignore_ascii_case(line_type.dxf_name()))
        {
            drawing.add_line_type(to_dxf_line_type(line_type));
        }
    }

    // 图层表
    for layer in model.layers() {
        let props = layer.properties();
        let mut dxf_layer = dxf::tables::Layer::default();
        dxf_layer.name = layer.name().to_string();
        dxf_layer.color = dxf::Color::from_index(props.color.index());
        dxf_layer.line_type_name = props.line_type.dxf_name().to_string();
        drawing.add_layer(dxf_layer);
    }

    // 实体
    for primitive in model.primitives() {
        drawing.add_entity(convert_to_dxf_entity(primitive));
    }

    drawing
}

fn to_dxf_line_type(line_type: LineType) -> dxf::tables::LineType {
    let mut dxf_line_type = dxf::tables::LineType::default();
    dxf_line_type.name = line_type.dxf_name().to_string();
    dxf_line_type.description = line_type.description().to_string();
    dxf_line_type.total_pattern_length = line_type.pattern_length();
    dxf_line_type.dash_dot_space_lengths = line_type.dash_pattern().to_vec();
    dxf_line_type
}

fn lw_vertex(point: &Point2) -> dxf::LwPolylineVertex {
    let mut vertex = dxf::LwPolylineVertex::default();
    vertex.x = point.x;
    vertex.y = point.y;
    vertex
}

/// 将图元转换为DXF实体
fn convert_to_dxf_entity(primitive: &Primitive) -> dxf::entities::Entity {
    let specific = match &primitive.geometry {
        Geometry::Circle(circle) => {
            let mut dxf_circle = dxf::entities::Circle::default();
            dxf_circle.center = dxf::Point::new(circle.center.x, circle.center.y, 0.0);
            dxf_circle.radius = circle.radius;
            dxf::entities::EntityType::Circle(dxf_circle)
        }

        Geometry::Polyline(polyline) => {
            let mut lwpoly = dxf::entities::LwPolyline::default();
            lwpoly.set_is_closed(polyline.closed);
            lwpoly.vertices = polyline.vertices.iter().map(lw_vertex).collect();
            dxf::entities::EntityType::LwPolyline(lwpoly)
        }

        // 构造线按两点多段线写出
        Geometry::Line(line) => {
            let mut lwpoly = dxf::entities::LwPolyline::default();
            lwpoly.vertices = vec![lw_vertex(&line.start), lw_vertex(&line.end)];
            dxf::entities::EntityType::LwPolyline(lwpoly)
        }
    };

    let mut dxf_entity = dxf::entities::Entity::new(specific);
    dxf_entity.common.layer = primitive.layer.name().to_string();
    dxf_entity.common.color = dxf::Color::from_index(primitive.properties.color.index());
    dxf_entity.common.line_type_name = primitive.properties.line_type.dxf_name().to_string();
    dxf_entity
}

/// 从DXF文件导入
pub fn import(path: &Path) -> Result<GeometricModel, FileError> {
    let file = File::open(path)?;
    let mut reader = BufReader::new(file);
    let model = read(&mut reader)?;

    tracing::info!("Loaded {} entities from {}", model.len(), path.display());

    Ok(model)
}

/// 从内存中的DXF文本导入
pub fn from_bytes(bytes: &[u8]) -> Result<GeometricModel, FileError> {
    read(&mut Cursor::new(bytes))
}

/// 从输入流读取
pub fn read<R: Read>(reader: &mut R) -> Result<GeometricModel, FileError> {
    let drawing = dxf::Drawing::load(reader).map_err(|e| FileError::Dxf(e.to_string()))?;
    Ok(from_drawing(&drawing))
}

/// 把 DXF 图纸转换回几何模型；不在已知图层上的实体会被跳过
pub fn from_drawing(drawing: &dxf::Drawing) -> GeometricModel {
    let mut primitives = Vec::new();

    for entity in drawing.entities() {
        let Some(layer) = Layer::from_name(&entity.common.layer) else {
            tracing::warn!(layer = %entity.common.layer, "skipping entity on unknown layer");
            continue;
        };

        let Some(geometry) = convert_dxf_entity(entity) else {
            tracing::warn!(layer = %layer, "skipping unsupported entity type");
            continue;
        };

        let defaults = layer.properties();
        let color = entity
            .common
            .color
            .index()
            .map(Color)
            .unwrap_or(defaults.color);
        let line_type =
            LineType::from_dxf_name(&entity.common.line_type_name).unwrap_or(defaults.line_type);

        primitives.push(Primitive {
            layer,
            properties: Properties::new(color, line_type),
            geometry,
        });
    }

    GeometricModel::from_primitives(primitives)
}

/// 将DXF实体转换为几何图元
fn convert_dxf_entity(entity: &dxf::entities::Entity) -> Option<Geometry> {
    let geometry = match &entity.specific {
        dxf::entities::EntityType::Circle(circle) => {
            let center = Point2::new(circle.center.x, circle.center.y);
            Geometry::Circle(Circle::new(center, circle.radius))
        }

        dxf::entities::EntityType::Line(line) => Geometry::Line(Line::new(
            Point2::new(line.p1.x, line.p1.y),
            Point2::new(line.p2.x, line.p2.y),
        )),

        // 两点开口多段线视为构造线
        dxf::entities::EntityType::LwPolyline(lwpoly)
            if lwpoly.vertices.len() == 2 && !lwpoly.is_closed() =>
        {
            let a = &lwpoly.vertices[0];
            let b = &lwpoly.vertices[1];
            Geometry::Line(Line::new(Point2::new(a.x, a.y), Point2::new(b.x, b.y)))
        }

        dxf::entities::EntityType::LwPolyline(lwpoly) => Geometry::Polyline(Polyline::new(
            lwpoly.vertices.iter().map(|v| Point2::new(v.x, v.y)).collect(),
            lwpoly.is_closed(),
        )),

        _ => return None,
    };

    Some(geometry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vptc_core::engine::compute;
    use vptc_core::params::PrimaryParameters;

    #[test]
    fn test_drawing_tables() {
        let model = compute(&PrimaryParameters::default()).unwrap().model;
        let drawing = to_drawing(&model);

        let layers: Vec<_> = drawing.layers().map(|l| l.name.clone()).collect();
        for name in ["BASE", "SEP", "ECC"] {
            assert!(layers.iter().any(|l| l == name), "missing layer {}", name);
        }

        for name in ["DASHED", "CENTER"] {
            assert_eq!(
                drawing.line_types().filter(|lt| lt.name == name).count(),
                1,
                "line type {} should be defined once",
                name
            );
        }

        assert_eq!(drawing.entities().count(), model.len());
    }

    #[test]
    fn test_entity_attributes() {
        let model = compute(&PrimaryParameters::default()).unwrap().model;
        let drawing = to_drawing(&model);

        for entity in drawing.entities() {
            let layer = Layer::from_name(&entity.common.layer).unwrap();
            let props = layer.properties();
            assert_eq!(entity.common.color.index(), Some(props.color.index()));
            assert_eq!(entity.common.line_type_name, props.line_type.dxf_name());
            assert!(matches!(
                entity.specific,
                dxf::entities::EntityType::Circle(_) | dxf::entities::EntityType::LwPolyline(_)
            ));
        }
    }

    #[test]
    fn test_only_present_layers_are_declared() {
        let params = PrimaryParameters {
            features: vptc_core::params::FeatureFlags {
                show_base_wheel: true,
                show_separator: false,
                show_eccentric: false,
            },
            ..PrimaryParameters::default()
        };
        let model = compute(&params).unwrap().model;
        let drawing = to_drawing(&model);

        assert!(drawing.layers().any(|l| l.name == "BASE"));
        assert!(!drawing.layers().any(|l| l.name == "SEP" || l.name == "ECC"));
    }
}
