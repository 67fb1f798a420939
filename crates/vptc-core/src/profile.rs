//! 刚轮摆线廓形生成
//!
//! 对 θ ∈ [0, 2π]（两端都包含）均匀采样，逐点计算：
//!
//! ```text
//! S  = sqrt((rsh + rd)² - (e·sin(zg·θ))²)
//! l  = e·cos(zg·θ) + S
//! Xi = atan2(e·zg·sin(zg·θ), S)
//! x  = l·sin(θ) + rsh·sin(θ + Xi)
//! y  = l·cos(θ) + rsh·cos(θ + Xi)
//! ```
//!
//! 因为首尾两个采样点都落在 θ=0 和 θ=2π 上，得到的点列天然闭合，
//! 不需要额外的"闭合路径"步骤。

use crate::error::CoreError;
use crate::math::{BoundingBox2, Point2};
use crate::params::{DerivedParameters, SAMPLE_COUNT_RANGE};
use std::f64::consts::TAU;

/// 刚轮廓形：有序、闭合的点列
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileCurve {
    points: Vec<Point2>,
}

impl ProfileCurve {
    /// 按派生参数生成 `sample_count` 个点
    pub fn generate(derived: &DerivedParameters, sample_count: usize) -> Result<Self, CoreError> {
        if !SAMPLE_COUNT_RANGE.contains(&sample_count) {
            return Err(CoreError::InvalidInput {
                field: "sample_count",
                value: sample_count as f64,
            });
        }

        let e = derived.eccentricity;
        let zg = f64::from(derived.lobe_count);
        let rsh = derived.ball_radius;
        let reach = rsh + derived.eccentric_radius;
        let reach_sq = reach * reach;

        let mut points = Vec::with_capacity(sample_count);
        for k in 0..sample_count {
            let theta = sample_angle(k, sample_count);
            let (sin_z, cos_z) = (zg * theta).sin_cos();

            let radicand = reach_sq - (e * sin_z) * (e * sin_z);
            if radicand < 0.0 {
                return Err(CoreError::Domain { theta, radicand });
            }
            let s = radicand.sqrt();
            let l = e * cos_z + s;
            let xi = (e * zg * sin_z).atan2(s);

            let (sin_t, cos_t) = theta.sin_cos();
            let (sin_tx, cos_tx) = (theta + xi).sin_cos();
            points.push(Point2::new(l * sin_t + rsh * sin_tx, l * cos_t + rsh * cos_tx));
        }

        tracing::trace!(
            samples = sample_count,
            lobes = derived.lobe_count,
            "generated trochoidal profile"
        );

        Ok(Self { points })
    }

    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&Point2> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&Point2> {
        self.points.last()
    }

    /// 首尾点在容差内重合
    pub fn is_closed(&self, tolerance: f64) -> bool {
        match (self.first(), self.last()) {
            (Some(a), Some(b)) => (b - a).norm() <= tolerance,
            _ => false,
        }
    }

    pub fn bounding_box(&self) -> BoundingBox2 {
        BoundingBox2::from_points(self.points.iter().copied())
    }
}

/// 第 k 个采样角；单点时取 0，末点精确等于 2π
fn sample_angle(k: usize, sample_count: usize) -> f64 {
    if sample_count < 2 {
        return 0.0;
    }
    k as f64 / (sample_count - 1) as f64 * TAU
}
