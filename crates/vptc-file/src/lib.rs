//! VPTC 文件格式处理
//!
//! 支持：
//! - `.dxf` 导出/导入（R2000，分层、带颜色与线型）
//! - `.svg` 预览导出
//! - 主参数的 JSON 持久化

pub mod dxf_io;
pub mod dxf_raw;
pub mod error;
pub mod export;
pub mod settings;
pub mod svg_export;

pub use dxf_raw::{DxfPair, DxfRawParser, EntityCensus};
pub use error::FileError;
pub use export::{export_model, output_file_name, ExportFormat};
pub use settings::{Settings, SettingsStore};
