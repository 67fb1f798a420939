//! 主参数持久化
//!
//! 启动时加载一次，按值传入每次计算，只有在参数确实变化时才写回。
//! 文件缺失时使用默认值；文件中缺少的字段同样取默认值。

use crate::error::FileError;
use crate::export::write_atomically;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use vptc_core::params::{FeatureFlags, PrimaryParameters};

const SETTINGS_FILE: &str = "settings.json";

/// 持久化的主参数
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub sample_count: usize,
    pub ratio: u32,
    pub ball_diameter: f64,
    pub outer_radius: f64,
    pub wall_thickness: f64,
    pub show_base_wheel: bool,
    pub show_separator: bool,
    pub show_eccentric: bool,
}

impl Default for Settings {
    fn default() -> Self {
        PrimaryParameters::default().into()
    }
}

impl From<PrimaryParameters> for Settings {
    fn from(p: PrimaryParameters) -> Self {
        Self {
            sample_count: p.sample_count,
            ratio: p.ratio,
            ball_diameter: p.ball_diameter,
            outer_radius: p.outer_radius,
            wall_thickness: p.wall_thickness,
            show_base_wheel: p.features.show_base_wheel,
            show_separator: p.features.show_separator,
            show_eccentric: p.features.show_eccentric,
        }
    }
}

impl From<Settings> for PrimaryParameters {
    fn from(s: Settings) -> Self {
        Self {
            sample_count: s.sample_count,
            ratio: s.ratio,
            ball_diameter: s.ball_diameter,
            outer_radius: s.outer_radius,
            wall_thickness: s.wall_thickness,
            features: FeatureFlags {
                show_base_wheel: s.show_base_wheel,
                show_separator: s.show_separator,
                show_eccentric: s.show_eccentric,
            },
        }
    }
}

impl Settings {
    /// 平台配置目录下的默认路径
    pub fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "vptc", "vptc")
            .map(|dirs| dirs.config_dir().join(SETTINGS_FILE))
    }

    /// 从文件加载；文件不存在时返回默认值
    pub fn load(path: &Path) -> Result<Self, FileError> {
        match fs::read_to_string(path) {
            Ok(json) => {
                let settings = serde_json::from_str(&json)?;
                tracing::debug!("Loaded settings from {}", path.display());
                Ok(settings)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("No settings at {}, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// 保存到文件，必要时创建父目录
    pub fn save(&self, path: &Path) -> Result<(), FileError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        write_atomically(path, json.as_bytes())?;
        tracing::info!("Saved settings to {}", path.display());
        Ok(())
    }

    pub fn params(&self) -> PrimaryParameters {
        (*self).into()
    }
}

/// 绑定路径的参数存储
#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
    current: Settings,
}

impl SettingsStore {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, FileError> {
        let path = path.into();
        let current = Settings::load(&path)?;
        Ok(Self { path, current })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn current(&self) -> Settings {
        self.current
    }

    /// 参数变化时写回并返回 true；未变化时不触碰文件
    pub fn update(&mut self, settings: Settings) -> Result<bool, FileError> {
        if settings == self.current {
            return Ok(false);
        }
        settings.save(&self.path)?;
        self.current = settings;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join("vptc_settings_tests").join(name)
    }

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!(s.sample_count, 600);
        assert_eq!(s.ratio, 17);
        assert_eq!(s.ball_diameter, 6.0);
        assert_eq!(s.outer_radius, 38.0);
        assert_eq!(s.wall_thickness, 5.0);
        assert!(s.show_base_wheel && s.show_separator && s.show_eccentric);
        assert_eq!(s.params(), PrimaryParameters::default());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let path = temp_path("does_not_exist.json");
        fs::remove_file(&path).ok();
        assert_eq!(Settings::load(&path).unwrap(), Settings::default());
    }

    #[test]
    fn test_partial_file() {
        let settings: Settings =
            serde_json::from_str(r#"{ "ratio": 21, "show_separator": false }"#).unwrap();
        assert_eq!(settings.ratio, 21);
        assert!(!settings.show_separator);
        assert_eq!(settings.outer_radius, 38.0);
    }

    #[test]
    fn test_malformed_file() {
        let path = temp_path("malformed.json");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(Settings::load(&path), Err(FileError::Json(_))));
        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_store_writes_only_on_change() {
        let path = temp_path("store.json");
        fs::remove_file(&path).ok();

        let mut store = SettingsStore::open(&path).unwrap();
        assert!(!store.update(Settings::default()).unwrap());
        assert!(!path.exists());

        let changed = Settings {
            outer_radius: 45.0,
            ..Settings::default()
        };
        assert!(store.update(changed).unwrap());
        assert_eq!(Settings::load(&path).unwrap(), changed);

        let reopened = SettingsStore::open(&path).unwrap();
        assert_eq!(reopened.current().outer_radius, 45.0);

        fs::remove_file(&path).ok();
    }
}
