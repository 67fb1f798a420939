//! 计算入口
//!
//! 一次完整的计算流程：校验 → 派生参数 → 可行性 → 廓形 → 组装。
//! 不可行时直接返回，不生成任何廓形。

use crate::compose::GeometricModel;
use crate::error::CoreError;
use crate::params::{DerivedParameters, PrimaryParameters};
use crate::profile::ProfileCurve;
use std::fmt;

/// 一次成功计算的结果
#[derive(Debug, Clone, PartialEq)]
pub struct Computation {
    pub params: PrimaryParameters,
    pub derived: DerivedParameters,
    pub model: GeometricModel,
}

impl Computation {
    pub fn report(&self) -> DesignReport {
        DesignReport::new(&self.params, &self.derived)
    }
}

/// 执行一次完整计算
pub fn compute(params: &PrimaryParameters) -> Result<Computation, CoreError> {
    let derived = match DerivedParameters::compute(params) {
        Ok(derived) => derived,
        Err(err) => {
            tracing::warn!(ratio = params.ratio, outer_radius = params.outer_radius, "{}", err);
            return Err(err);
        }
    };

    let curve = ProfileCurve::generate(&derived, params.sample_count)?;
    let model = GeometricModel::compose(&curve, &derived, params.features);

    tracing::debug!(
        ratio = params.ratio,
        ball_diameter = params.ball_diameter,
        outer_radius = params.outer_radius,
        primitives = model.len(),
        "recomputed profile"
    );

    Ok(Computation {
        params: *params,
        derived,
        model,
    })
}

/// 面向用户的主要设计参数汇总
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DesignReport {
    pub ratio: u32,
    pub eccentricity: f64,
    pub eccentric_radius: f64,
    pub inner_radius: f64,
    pub ball_count: u32,
    pub separator_mean_radius: f64,
    pub separator_thickness: f64,
    pub outer_diameter: f64,
}

impl DesignReport {
    pub fn new(params: &PrimaryParameters, derived: &DerivedParameters) -> Self {
        Self {
            ratio: params.ratio,
            eccentricity: derived.eccentricity,
            eccentric_radius: derived.eccentric_radius,
            inner_radius: derived.inner_radius,
            ball_count: derived.ball_count,
            separator_mean_radius: derived.separator_mean_radius,
            separator_thickness: derived.separator_thickness,
            outer_diameter: derived.outer_diameter,
        }
    }
}

impl fmt::Display for DesignReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Ball wave reducer parameters:")?;
        writeln!(f, "  - Transmission ratio: {}", self.ratio)?;
        writeln!(f, "  - Eccentricity: {:.2} mm", self.eccentricity)?;
        writeln!(f, "  - Eccentric radius: {:.2} mm", self.eccentric_radius)?;
        writeln!(f, "  - Rigid wheel inner radius: {:.2} mm", self.inner_radius)?;
        writeln!(f, "  - Ball count: {}", self.ball_count)?;
        writeln!(f, "  - Separator pitch radius: {:.2} mm", self.separator_mean_radius)?;
        writeln!(f, "  - Separator thickness: {:.2} mm", self.separator_thickness)?;
        write!(f, "  - Outer diameter: {:.2} mm", self.outer_diameter)
    }
}
