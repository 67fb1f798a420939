//! 导出格式与输出文件

use crate::error::FileError;
use crate::{dxf_io, svg_export};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use vptc_core::compose::GeometricModel;
use vptc_core::params::PrimaryParameters;

/// 导出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Dxf,
    Svg,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Dxf => "dxf",
            ExportFormat::Svg => "svg",
        }
    }

    /// 把模型编码成该格式的完整文件内容
    pub fn encode(&self, model: &GeometricModel) -> Result<Vec<u8>, FileError> {
        match self {
            ExportFormat::Dxf => dxf_io::to_bytes(model),
            ExportFormat::Svg => Ok(svg_export::to_string(model).into_bytes()),
        }
    }
}

/// `vptc_{i}_{dsh:.2}_{Rout:.2}.{ext}`
pub fn output_file_name(params: &PrimaryParameters, format: ExportFormat) -> String {
    format!(
        "vptc_{}_{:.2}_{:.2}.{}",
        params.ratio,
        params.ball_diameter,
        params.outer_radius,
        format.extension()
    )
}

/// 按命名规则把模型导出到 `dir`，返回写出的文件路径
pub fn export_model(
    model: &GeometricModel,
    params: &PrimaryParameters,
    dir: &Path,
    format: ExportFormat,
) -> Result<PathBuf, FileError> {
    let path = dir.join(output_file_name(params, format));
    let bytes = format.encode(model)?;
    write_atomically(&path, &bytes)?;

    tracing::info!(
        "Exported {} primitives to {} ({} bytes)",
        model.len(),
        path.display(),
        bytes.len()
    );

    Ok(path)
}

/// 先写临时文件再重命名；失败时目标文件不存在，临时文件被清理
pub(crate) fn write_atomically(path: &Path, bytes: &[u8]) -> Result<(), FileError> {
    let file_name = path
        .file_name()
        .ok_or_else(|| FileError::Export {
            path: path.to_path_buf(),
            reason: "path has no file name".to_string(),
        })?
        .to_string_lossy();
    let temp = path.with_file_name(format!(".{}.tmp", file_name));

    let result = File::create(&temp)
        .and_then(|mut file| {
            file.write_all(bytes)?;
            file.sync_all()
        })
        .and_then(|_| fs::rename(&temp, path));

    result.map_err(|e| {
        fs::remove_file(&temp).ok();
        FileError::Export {
            path: path.to_path_buf(),
            reason: e.to_string(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_file_name() {
        let params = PrimaryParameters::default();
        assert_eq!(output_file_name(&params, ExportFormat::Dxf), "vptc_17_6.00_38.00.dxf");

        let params = PrimaryParameters {
            ratio: 21,
            ball_diameter: 4.5,
            outer_radius: 52.126,
            ..PrimaryParameters::default()
        };
        assert_eq!(output_file_name(&params, ExportFormat::Svg), "vptc_21_4.50_52.13.svg");
    }

    #[test]
    fn test_write_atomically_failure_leaves_nothing() {
        let dir = std::env::temp_dir().join("vptc_missing_dir_for_export_test");
        std::fs::remove_dir_all(&dir).ok();
        let path = dir.join("out.dxf");

        let err = write_atomically(&path, b"0\nEOF\n").unwrap_err();
        assert!(matches!(err, FileError::Export { .. }));
        assert!(!path.exists());
    }

    #[test]
    fn test_write_atomically_replaces_target() {
        let path = std::env::temp_dir().join("vptc_atomic_write_test.txt");
        write_atomically(&path, b"first").unwrap();
        write_atomically(&path, b"second").unwrap();

        assert_eq!(std::fs::read(&path).unwrap(), b"second");
        assert!(!path.with_file_name(".vptc_atomic_write_test.txt.tmp").exists());

        std::fs::remove_file(&path).ok();
    }
}
