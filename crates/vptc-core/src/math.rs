//! 基础数学类型
//!
//! 基于 nalgebra 的二维点/向量别名与轴对齐包围盒。

use serde::{Deserialize, Serialize};

/// 二维点（毫米）
pub type Point2 = nalgebra::Point2<f64>;

/// 二维向量
pub type Vector2 = nalgebra::Vector2<f64>;

/// 几何比较的默认容差
pub const EPSILON: f64 = 1e-10;

/// 轴对齐包围盒
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox2 {
    pub min: Point2,
    pub max: Point2,
}

impl BoundingBox2 {
    pub fn new(min: Point2, max: Point2) -> Self {
        Self { min, max }
    }

    /// 空包围盒（min > max），与任何包围盒合并后等于对方
    pub fn empty() -> Self {
        Self {
            min: Point2::new(f64::INFINITY, f64::INFINITY),
            max: Point2::new(f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    pub fn from_points(points: impl IntoIterator<Item = Point2>) -> Self {
        let mut bbox = Self::empty();
        for p in points {
            bbox.expand_to_include(&p);
        }
        bbox
    }

    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y
    }

    pub fn expand_to_include(&mut self, point: &Point2) {
        self.min.x = self.min.x.min(point.x);
        self.min.y = self.min.y.min(point.y);
        self.max.x = self.max.x.max(point.x);
        self.max.y = self.max.y.max(point.y);
    }

    /// 合并两个包围盒
    pub fn union(&self, other: &BoundingBox2) -> BoundingBox2 {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        BoundingBox2::new(
            Point2::new(self.min.x.min(other.min.x), self.min.y.min(other.min.y)),
            Point2::new(self.max.x.max(other.max.x), self.max.y.max(other.max.y)),
        )
    }

    /// 向四周各扩展 `margin`
    pub fn expanded(&self, margin: f64) -> BoundingBox2 {
        BoundingBox2::new(
            Point2::new(self.min.x - margin, self.min.y - margin),
            Point2::new(self.max.x + margin, self.max.y + margin),
        )
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn center(&self) -> Point2 {
        Point2::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
        )
    }

    pub fn contains(&self, point: &Point2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }
}

impl Default for BoundingBox2 {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_union() {
        let a = BoundingBox2::empty();
        let b = BoundingBox2::from_points([Point2::new(-1.0, 2.0), Point2::new(3.0, -4.0)]);

        assert!(a.is_empty());
        assert_eq!(a.union(&b), b);
        assert_eq!(b.union(&a), b);
        assert!((b.width() - 4.0).abs() < EPSILON);
        assert!((b.height() - 6.0).abs() < EPSILON);
    }

    #[test]
    fn test_expanded() {
        let b = BoundingBox2::new(Point2::new(0.0, 0.0), Point2::new(2.0, 2.0)).expanded(10.0);
        assert!(b.contains(&Point2::new(-9.0, 11.0)));
        assert_eq!(b.center(), Point2::new(1.0, 1.0));
    }
}
