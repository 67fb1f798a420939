//! 预览视图适配
//!
//! 把模型包围盒（加固定边距）等比缩放到视口中，并翻转 y 轴得到屏幕坐标。

use crate::math::{BoundingBox2, Point2};

/// 预览时包围盒四周的固定边距（模型单位）
pub const PREVIEW_MARGIN: f64 = 10.0;

/// 视口尺寸（像素）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(600.0, 600.0)
    }
}

/// 模型坐标到屏幕坐标的变换
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    /// 统一缩放系数（像素/毫米）
    pub scale: f64,
    /// 对应视口中心的模型坐标
    pub center: Point2,
    pub viewport: Viewport,
}

impl ViewTransform {
    /// 把包围盒扩展 `margin` 后等比适配到视口；空包围盒按原点处单位缩放处理
    pub fn fit(bbox: &BoundingBox2, margin: f64, viewport: Viewport) -> Self {
        if bbox.is_empty() {
            return Self {
                scale: 1.0,
                center: Point2::origin(),
                viewport,
            };
        }

        let scene = bbox.expanded(margin);
        let (w, h) = (scene.width(), scene.height());
        let scale = match (w > 0.0, h > 0.0) {
            (true, true) => (viewport.width / w).min(viewport.height / h),
            (true, false) => viewport.width / w,
            (false, true) => viewport.height / h,
            (false, false) => 1.0,
        };

        Self {
            scale,
            center: scene.center(),
            viewport,
        }
    }

    /// 模型坐标 → 屏幕坐标（y 向下）
    pub fn to_screen(&self, point: &Point2) -> Point2 {
        Point2::new(
            self.viewport.width / 2.0 + (point.x - self.center.x) * self.scale,
            self.viewport.height / 2.0 - (point.y - self.center.y) * self.scale,
        )
    }

    pub fn scale_length(&self, length: f64) -> f64 {
        length * self.scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_fit_square() {
        let bbox = BoundingBox2::new(Point2::new(-40.5, -40.5), Point2::new(40.5, 40.5));
        let view = ViewTransform::fit(&bbox, PREVIEW_MARGIN, Viewport::default());

        assert_relative_eq!(view.scale, 600.0 / 101.0);
        let top_left = view.to_screen(&Point2::new(-50.5, 50.5));
        assert_relative_eq!(top_left.x, 0.0, epsilon = 1e-9);
        assert_relative_eq!(top_left.y, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_fit_preserves_aspect() {
        let bbox = BoundingBox2::new(Point2::new(0.0, 0.0), Point2::new(180.0, 80.0));
        let view = ViewTransform::fit(&bbox, 10.0, Viewport::new(400.0, 400.0));

        // 宽度受限：400 / 200
        assert_relative_eq!(view.scale, 2.0);
        let c = view.to_screen(&Point2::new(90.0, 40.0));
        assert_relative_eq!(c.x, 200.0);
        assert_relative_eq!(c.y, 200.0);
    }

    #[test]
    fn test_fit_empty() {
        let view = ViewTransform::fit(&BoundingBox2::empty(), PREVIEW_MARGIN, Viewport::default());
        assert_eq!(view.scale, 1.0);
        assert_eq!(view.to_screen(&Point2::origin()), Point2::new(300.0, 300.0));
    }
}
