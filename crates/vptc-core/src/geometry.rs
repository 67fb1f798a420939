//! 几何图元定义
//!
//! 廓形模型只用到三种图元：
//! - 线段 (Line)：构造线
//! - 圆 (Circle)：外壁、隔离架、偏心轮
//! - 多段线 (Polyline)：刚轮廓形

use crate::math::{BoundingBox2, Point2, EPSILON};
use serde::{Deserialize, Serialize};

/// 图元种类，对应预览端与导出端的记录类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PrimitiveKind {
    Polyline,
    Circle,
    Segment,
}

/// 几何类型枚举
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Geometry {
    Line(Line),
    Circle(Circle),
    Polyline(Polyline),
}

impl Geometry {
    /// 获取几何的包围盒
    pub fn bounding_box(&self) -> BoundingBox2 {
        match self {
            Geometry::Line(l) => l.bounding_box(),
            Geometry::Circle(c) => c.bounding_box(),
            Geometry::Polyline(pl) => pl.bounding_box(),
        }
    }

    /// 获取几何的类型名称
    pub fn type_name(&self) -> &'static str {
        match self {
            Geometry::Line(_) => "Line",
            Geometry::Circle(_) => "Circle",
            Geometry::Polyline(_) => "Polyline",
        }
    }

    pub fn kind(&self) -> PrimitiveKind {
        match self {
            Geometry::Line(_) => PrimitiveKind::Segment,
            Geometry::Circle(_) => PrimitiveKind::Circle,
            Geometry::Polyline(_) => PrimitiveKind::Polyline,
        }
    }

    pub fn as_circle(&self) -> Option<&Circle> {
        match self {
            Geometry::Circle(c) => Some(c),
            _ => None,
        }
    }
}

/// 线段
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub start: Point2,
    pub end: Point2,
}

impl Line {
    pub fn new(start: Point2, end: Point2) -> Self {
        Self { start, end }
    }

    /// 计算线段长度
    pub fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }

    pub fn bounding_box(&self) -> BoundingBox2 {
        BoundingBox2::from_points([self.start, self.end])
    }
}

/// 圆
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub center: Point2,
    pub radius: f64,
}

impl Circle {
    pub fn new(center: Point2, radius: f64) -> Self {
        Self { center, radius }
    }

    /// 从外接正方形的角点和边长创建圆
    ///
    /// 绘图表面常用 `(左上角, 宽, 高)` 描述椭圆；这里统一换算成圆心 + 半径。
    pub fn from_bounding_square(corner: Point2, size: f64) -> Self {
        let radius = size / 2.0;
        Self {
            center: Point2::new(corner.x + radius, corner.y + radius),
            radius,
        }
    }

    /// 外接正方形的最小角点
    pub fn bounding_corner(&self) -> Point2 {
        Point2::new(self.center.x - self.radius, self.center.y - self.radius)
    }

    pub fn bounding_box(&self) -> BoundingBox2 {
        BoundingBox2::new(
            self.bounding_corner(),
            Point2::new(self.center.x + self.radius, self.center.y + self.radius),
        )
    }
}

/// 多段线（仅直线段）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    pub vertices: Vec<Point2>,
    /// 是否闭合
    pub closed: bool,
}

impl Polyline {
    pub fn new(vertices: Vec<Point2>, closed: bool) -> Self {
        Self { vertices, closed }
    }

    pub fn from_points(points: impl IntoIterator<Item = Point2>, closed: bool) -> Self {
        Self {
            vertices: points.into_iter().collect(),
            closed,
        }
    }

    /// 顶点数量
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// 线段数量
    pub fn segment_count(&self) -> usize {
        if self.vertices.len() < 2 {
            return 0;
        }
        if self.closed {
            self.vertices.len()
        } else {
            self.vertices.len() - 1
        }
    }

    /// 计算总长度
    pub fn length(&self) -> f64 {
        (0..self.segment_count())
            .map(|i| {
                let a = self.vertices[i];
                let b = self.vertices[(i + 1) % self.vertices.len()];
                (b - a).norm()
            })
            .sum()
    }

    /// 首尾顶点是否重合
    pub fn ends_meet(&self, tolerance: f64) -> bool {
        match (self.vertices.first(), self.vertices.last()) {
            (Some(a), Some(b)) => (b - a).norm() <= tolerance.max(EPSILON),
            _ => false,
        }
    }

    pub fn bounding_box(&self) -> BoundingBox2 {
        BoundingBox2::from_points(self.vertices.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_length() {
        let line = Line::new(Point2::new(-6.0, 0.0), Point2::new(6.0, 0.0));
        assert!((line.length() - 12.0).abs() < EPSILON);
    }

    #[test]
    fn test_circle_from_bounding_square() {
        // 偏心轮在预览中以 (-rd, e-rd) 为角点、2rd 为边长描述
        let (rd, e) = (30.8, 1.2);
        let circle = Circle::from_bounding_square(Point2::new(-rd, e - rd), 2.0 * rd);

        assert!((circle.center.x).abs() < 1e-12);
        assert!((circle.center.y - e).abs() < 1e-12);
        assert!((circle.radius - rd).abs() < 1e-12);
        assert!((circle.bounding_corner() - Point2::new(-rd, e - rd)).norm() < 1e-12);
    }

    #[test]
    fn test_polyline_segments() {
        let pl = Polyline::from_points(
            [
                Point2::new(0.0, 0.0),
                Point2::new(10.0, 0.0),
                Point2::new(10.0, 10.0),
            ],
            false,
        );

        assert_eq!(pl.segment_count(), 2);
        assert!((pl.length() - 20.0).abs() < EPSILON);
        assert!(!pl.ends_meet(1e-9));
        assert_eq!(Geometry::Polyline(pl).kind(), PrimitiveKind::Polyline);
    }
}
