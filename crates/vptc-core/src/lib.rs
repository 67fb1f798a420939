//! VPTC 核心引擎
//!
//! 根据少量机械设计参数计算滚珠波传动（ВПТК）刚轮的二维廓形，
//! 校验几何可行性，并把廓形与辅助圆、构造线组装成分层的几何模型。
//!
//! # 数据流
//!
//! ```text
//! PrimaryParameters ──► DerivedParameters ──► ProfileCurve ──► GeometricModel
//!                        (可行性校验)           (摆线廓形)        (分层图元)
//! ```
//!
//! 每一步都是纯函数：相同输入得到逐位相同的输出，不保留任何上次计算的状态。
//!
//! # 示例
//!
//! ```rust
//! use vptc_core::prelude::*;
//!
//! let params = PrimaryParameters::default();
//! let computation = compute(&params).expect("default design is feasible");
//!
//! println!("{}", computation.report());
//! assert!(!computation.model.is_empty());
//! ```

pub mod compose;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod layer;
pub mod math;
pub mod params;
pub mod profile;
pub mod properties;
pub mod recompute;
pub mod view;

pub use error::CoreError;

pub mod prelude {
    //! 常用类型的便捷导入
    pub use crate::compose::{GeometricModel, Primitive};
    pub use crate::engine::{compute, Computation, DesignReport};
    pub use crate::error::CoreError;
    pub use crate::geometry::{Circle, Geometry, Line, Polyline, PrimitiveKind};
    pub use crate::layer::Layer;
    pub use crate::math::{BoundingBox2, Point2, Vector2};
    pub use crate::params::{DerivedParameters, FeatureFlags, Feasibility, PrimaryParameters};
    pub use crate::profile::ProfileCurve;
    pub use crate::properties::{Color, LineType, Properties};
    pub use crate::recompute::{RecomputeOutcome, Recomputer};
    pub use crate::view::{ViewTransform, Viewport};
}
