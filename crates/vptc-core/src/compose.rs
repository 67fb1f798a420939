//! 几何模型组装
//!
//! 把廓形、派生参数和三个图元组开关组合成带图层标记的图元集合。
//! 三个图元组互不依赖，组装结果只取决于各自的开关。

use crate::geometry::{Circle, Geometry, Line, Polyline};
use crate::layer::Layer;
use crate::math::{BoundingBox2, Point2};
use crate::params::{DerivedParameters, FeatureFlags};
use crate::profile::ProfileCurve;
use crate::properties::Properties;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 隔离架构造线：y=0 处水平标记的半长（固定值，不随尺寸缩放）
pub const SEPARATOR_MARK_HALF_WIDTH: f64 = 6.0;
/// 隔离架构造线：y=e 处水平标记的半长（固定值，不随尺寸缩放）
pub const ECCENTRIC_MARK_HALF_WIDTH: f64 = 3.0;

/// 带图层与呈现属性的图元
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Primitive {
    pub layer: Layer,
    pub properties: Properties,
    pub geometry: Geometry,
}

impl Primitive {
    /// 使用图层默认属性创建图元
    pub fn on_layer(layer: Layer, geometry: Geometry) -> Self {
        Self {
            layer,
            properties: layer.properties(),
            geometry,
        }
    }
}

/// 几何模型：每次参数变化都整体重建
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeometricModel {
    primitives: Vec<Primitive>,
}

impl GeometricModel {
    /// 按开关组装模型
    pub fn compose(
        curve: &ProfileCurve,
        derived: &DerivedParameters,
        features: FeatureFlags,
    ) -> Self {
        let mut primitives = Vec::new();

        if features.show_base_wheel {
            primitives.extend(base_wheel_group(curve, derived));
        }
        if features.show_separator {
            primitives.extend(separator_group(derived));
        }
        if features.show_eccentric {
            primitives.extend(eccentric_group(derived));
        }

        tracing::debug!(primitives = primitives.len(), ?features, "composed geometric model");

        Self { primitives }
    }

    pub fn from_primitives(primitives: Vec<Primitive>) -> Self {
        Self { primitives }
    }

    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }

    /// 指定图层上的图元
    pub fn on_layer(&self, layer: Layer) -> impl Iterator<Item = &Primitive> + '_ {
        self.primitives.iter().filter(move |p| p.layer == layer)
    }

    /// 出现过的图层（有序、去重）
    pub fn layers(&self) -> Vec<Layer> {
        self.count_by_layer().into_keys().collect()
    }

    pub fn count_by_layer(&self) -> BTreeMap<Layer, usize> {
        let mut counts = BTreeMap::new();
        for p in &self.primitives {
            *counts.entry(p.layer).or_insert(0) += 1;
        }
        counts
    }

    /// 所有圆及其所在图层
    pub fn circles(&self) -> impl Iterator<Item = (Layer, &Circle)> + '_ {
        self.primitives
            .iter()
            .filter_map(|p| p.geometry.as_circle().map(|c| (p.layer, c)))
    }

    pub fn bounding_box(&self) -> BoundingBox2 {
        self.primitives
            .iter()
            .fold(BoundingBox2::empty(), |acc, p| acc.union(&p.geometry.bounding_box()))
    }
}

/// 刚轮：廓形多段线 + 外壁圆
fn base_wheel_group(curve: &ProfileCurve, derived: &DerivedParameters) -> [Primitive; 2] {
    // 点列首尾重合已构成闭合，多段线本身不再设闭合标志
    let profile = Polyline::from_points(curve.points().iter().copied(), false);
    let wall = Circle::new(Point2::origin(), derived.outer_diameter / 2.0);

    [
        Primitive::on_layer(Layer::Base, Geometry::Polyline(profile)),
        Primitive::on_layer(Layer::Base, Geometry::Circle(wall)),
    ]
}

/// 隔离架：内外两个同心圆 + 三条对齐用构造线
fn separator_group(derived: &DerivedParameters) -> [Primitive; 5] {
    let e = derived.eccentricity;
    let origin = Point2::origin();
    let segment = |x0: f64, y0: f64, x1: f64, y1: f64| {
        Primitive::on_layer(
            Layer::Separator,
            Geometry::Line(Line::new(Point2::new(x0, y0), Point2::new(x1, y1))),
        )
    };

    [
        Primitive::on_layer(
            Layer::Separator,
            Geometry::Circle(Circle::new(origin, derived.separator_outer_radius)),
        ),
        Primitive::on_layer(
            Layer::Separator,
            Geometry::Circle(Circle::new(origin, derived.separator_inner_radius)),
        ),
        segment(0.0, 0.0, 0.0, e),
        segment(-SEPARATOR_MARK_HALF_WIDTH, 0.0, SEPARATOR_MARK_HALF_WIDTH, 0.0),
        segment(-ECCENTRIC_MARK_HALF_WIDTH, e, ECCENTRIC_MARK_HALF_WIDTH, e),
    ]
}

/// 偏心轮：圆心 (0, e)、半径 rd
fn eccentric_group(derived: &DerivedParameters) -> [Primitive; 1] {
    let center = Point2::new(0.0, derived.eccentricity);
    [Primitive::on_layer(
        Layer::Eccentric,
        Geometry::Circle(Circle::new(center, derived.eccentric_radius)),
    )]
}
