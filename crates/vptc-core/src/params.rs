//! 设计参数
//!
//! 主参数由用户提供；派生参数全部由主参数按封闭公式算出，并在
//! 生成任何廓形之前做可行性校验。

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::ops::RangeInclusive;

/// 偏心距系数：e = 0.2 * dsh
const ECCENTRICITY_FACTOR: f64 = 0.2;
/// 隔离架厚度系数：hc = 2.2 * e
const SEPARATOR_THICKNESS_FACTOR: f64 = 2.2;
/// 可行性条件中的滚珠间隙系数
const BALL_CLEARANCE_FACTOR: f64 = 1.03;
/// 可行性条件中的径向余量系数
const RADIAL_ALLOWANCE_FACTOR: f64 = 0.4;

/// 廓形离散点数的允许范围
pub const SAMPLE_COUNT_RANGE: RangeInclusive<usize> = 1..=10_000;
/// 传动比的允许范围
pub const RATIO_RANGE: RangeInclusive<u32> = 1..=100;
/// 长度类参数（mm）的允许范围
pub const LENGTH_RANGE: RangeInclusive<f64> = 0.1..=1000.0;

/// 三个互相独立的图元组开关
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureFlags {
    pub show_base_wheel: bool,
    pub show_separator: bool,
    pub show_eccentric: bool,
}

impl FeatureFlags {
    pub const ALL: FeatureFlags = FeatureFlags {
        show_base_wheel: true,
        show_separator: true,
        show_eccentric: true,
    };

    pub const NONE: FeatureFlags = FeatureFlags {
        show_base_wheel: false,
        show_separator: false,
        show_eccentric: false,
    };
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self::ALL
    }
}

/// 主参数
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PrimaryParameters {
    /// 廓形离散点数
    pub sample_count: usize,
    /// 传动比 i
    pub ratio: u32,
    /// 滚珠直径 dsh
    pub ball_diameter: f64,
    /// 刚轮外半径 Rout
    pub outer_radius: f64,
    /// Rout 之外的壁厚
    pub wall_thickness: f64,
    pub features: FeatureFlags,
}

impl Default for PrimaryParameters {
    fn default() -> Self {
        Self {
            sample_count: 600,
            ratio: 17,
            ball_diameter: 6.0,
            outer_radius: 38.0,
            wall_thickness: 5.0,
            features: FeatureFlags::ALL,
        }
    }
}

impl PrimaryParameters {
    /// 检查所有数值都落在允许范围内（NaN 与无穷大一律拒绝）
    pub fn validate(&self) -> Result<(), CoreError> {
        if !SAMPLE_COUNT_RANGE.contains(&self.sample_count) {
            return Err(CoreError::InvalidInput {
                field: "sample_count",
                value: self.sample_count as f64,
            });
        }
        if !RATIO_RANGE.contains(&self.ratio) {
            return Err(CoreError::InvalidInput {
                field: "ratio",
                value: f64::from(self.ratio),
            });
        }
        for (field, value) in [
            ("ball_diameter", self.ball_diameter),
            ("outer_radius", self.outer_radius),
            ("wall_thickness", self.wall_thickness),
        ] {
            if !LENGTH_RANGE.contains(&value) {
                return Err(CoreError::InvalidInput { field, value });
            }
        }
        Ok(())
    }
}

/// 给定传动比与滚珠直径时允许的最小外半径（不含等号）
pub fn min_outer_radius(ratio: u32, ball_diameter: f64) -> f64 {
    let lobe_count = f64::from(ratio) + 1.0;
    (BALL_CLEARANCE_FACTOR * ball_diameter) / (PI / lobe_count).sin()
        + RADIAL_ALLOWANCE_FACTOR * ball_diameter
}

/// 可行性判定结果
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Feasibility {
    Feasible,
    Infeasible { min_outer_radius: f64 },
}

impl Feasibility {
    /// 每次重算都独立判定，不依赖上一次的结果
    pub fn evaluate(params: &PrimaryParameters) -> Feasibility {
        let min_outer_radius = min_outer_radius(params.ratio, params.ball_diameter);
        if params.outer_radius > min_outer_radius {
            Feasibility::Feasible
        } else {
            Feasibility::Infeasible { min_outer_radius }
        }
    }

    pub fn is_feasible(&self) -> bool {
        matches!(self, Feasibility::Feasible)
    }

    /// 面向用户的提示
    pub fn message(&self) -> String {
        match self {
            Feasibility::Feasible => "Parameters are valid.".to_string(),
            Feasibility::Infeasible { min_outer_radius } => format!(
                "Outer radius (Rout) must be greater than {:.2} mm.",
                min_outer_radius
            ),
        }
    }
}

/// 派生参数
///
/// 只能通过 [`DerivedParameters::compute`] 构造，因此任何实例都满足
/// `outer_radius > min_outer_radius`。
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DerivedParameters {
    /// 偏心距 e
    pub eccentricity: f64,
    /// 刚轮波数 zg = i + 1
    pub lobe_count: u32,
    /// 滚珠数 zsh = i
    pub ball_count: u32,
    /// 刚轮内半径 Rin
    pub inner_radius: f64,
    /// 滚珠半径 rsh
    pub ball_radius: f64,
    /// 偏心轮半径 rd
    pub eccentric_radius: f64,
    /// 隔离架厚度 hc
    pub separator_thickness: f64,
    /// 隔离架分度半径
    pub separator_mean_radius: f64,
    pub separator_outer_radius: f64,
    pub separator_inner_radius: f64,
    /// 外壁直径 D
    pub outer_diameter: f64,
    pub outer_radius: f64,
    pub min_outer_radius: f64,
    #[serde(skip)]
    _gate: (),
}

impl DerivedParameters {
    /// 校验输入、计算派生参数并做可行性校验
    pub fn compute(params: &PrimaryParameters) -> Result<Self, CoreError> {
        params.validate()?;

        if let Feasibility::Infeasible { min_outer_radius } = Feasibility::evaluate(params) {
            return Err(CoreError::Infeasible { min_outer_radius });
        }

        let lobe_count = params.ratio.checked_add(1).ok_or(CoreError::InvalidInput {
            field: "ratio",
            value: f64::from(params.ratio),
        })?;

        Ok(Self::derive(params, lobe_count))
    }

    fn derive(params: &PrimaryParameters, lobe_count: u32) -> Self {
        let dsh = params.ball_diameter;
        let e = ECCENTRICITY_FACTOR * dsh;
        let inner_radius = params.outer_radius - 2.0 * e;
        let ball_radius = dsh / 2.0;
        let eccentric_radius = inner_radius + e - dsh;
        let separator_thickness = SEPARATOR_THICKNESS_FACTOR * e;
        let separator_mean_radius = eccentric_radius + ball_radius;

        Self {
            eccentricity: e,
            lobe_count,
            ball_count: params.ratio,
            inner_radius,
            ball_radius,
            eccentric_radius,
            separator_thickness,
            separator_mean_radius,
            separator_outer_radius: separator_mean_radius + separator_thickness / 2.0,
            separator_inner_radius: separator_mean_radius - separator_thickness / 2.0,
            outer_diameter: 2.0 * params.outer_radius + params.wall_thickness,
            outer_radius: params.outer_radius,
            min_outer_radius: min_outer_radius(params.ratio, dsh),
            _gate: (),
        }
    }

    /// 跳过可行性校验，仅供测试构造越界设计
    #[cfg(test)]
    pub(crate) fn unchecked(params: &PrimaryParameters) -> Self {
        Self::derive(params, params.ratio + 1)
    }
}
