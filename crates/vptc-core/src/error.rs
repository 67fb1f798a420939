//! 计算错误定义

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Invalid input: {field} is out of range (got {value})")]
    InvalidInput { field: &'static str, value: f64 },

    #[error("Outer radius (Rout) must be greater than {min_outer_radius:.2} mm")]
    Infeasible { min_outer_radius: f64 },

    #[error("Domain error: negative radicand {radicand} at theta = {theta}")]
    Domain { theta: f64, radicand: f64 },
}

impl CoreError {
    /// 设计不可行时返回计算出的最小外半径
    pub fn min_outer_radius(&self) -> Option<f64> {
        match self {
            CoreError::Infeasible { min_outer_radius } => Some(*min_outer_radius),
            _ => None,
        }
    }
}
