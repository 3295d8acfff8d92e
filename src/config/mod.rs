//! 配置系统
//!
//! TOML 配置文件加载，带默认值和校验。文件缺失时回退到默认配置，
//! 格式错误才视为失败。
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// 配置错误
#[derive(Error, Debug)]
pub enum ConfigError {
    /// 文件读取错误
    #[error("Config file error: {0}")]
    FileError(#[from] std::io::Error),
    /// 解析错误
    #[error("Config parse error: {0}")]
    ParseError(String),
    /// 校验错误
    #[error("Config validation error: {0}")]
    ValidationError(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// 查看器主配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewerConfig {
    /// 窗口配置
    #[serde(default)]
    pub window: WindowConfig,

    /// Bloom 后处理配置
    #[serde(default)]
    pub bloom: BloomConfig,

    /// 资源路径配置
    #[serde(default)]
    pub assets: AssetConfig,

    /// 音频配置
    #[serde(default)]
    pub audio: AudioConfig,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            bloom: BloomConfig::default(),
            assets: AssetConfig::default(),
            audio: AudioConfig::default(),
        }
    }
}

impl ViewerConfig {
    /// 从 TOML 文件加载配置
    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let content = fs::read_to_string(path).map_err(ConfigError::FileError)?;
        Self::from_toml_str(&content)
    }

    /// 从 TOML 字符串加载配置
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// 加载配置；文件不存在时回退到默认值
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        if path.exists() {
            let config = Self::from_toml_file(path)?;
            tracing::info!(target: "viewer", "Loaded config from {}", path.display());
            Ok(config)
        } else {
            tracing::info!(target: "viewer", "No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// 校验配置
    pub fn validate(&self) -> ConfigResult<()> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::ValidationError(
                "window dimensions must be positive".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.bloom.threshold) {
            return Err(ConfigError::ValidationError(format!(
                "bloom threshold {} outside [0, 1]",
                self.bloom.threshold
            )));
        }
        if self.bloom.strength < 0.0 || self.bloom.radius < 0.0 {
            return Err(ConfigError::ValidationError(
                "bloom strength and radius must be non-negative".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.audio.volume) {
            return Err(ConfigError::ValidationError(format!(
                "audio volume {} outside [0, 1]",
                self.audio.volume
            )));
        }
        Ok(())
    }
}

/// 窗口配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    /// 初始宽度（像素）
    pub width: u32,
    /// 初始高度（像素）
    pub height: u32,
    /// 窗口标题
    pub title: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            title: "Galaxy Viewer".to_string(),
        }
    }
}

/// Bloom 后处理配置
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BloomConfig {
    /// 辉光强度
    pub strength: f32,
    /// 模糊半径
    pub radius: f32,
    /// 亮度阈值
    pub threshold: f32,
}

impl Default for BloomConfig {
    fn default() -> Self {
        Self {
            strength: 0.5,
            radius: 0.4,
            threshold: 0.9,
        }
    }
}

/// 资源路径配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetConfig {
    /// 背景星空图路径
    pub background: String,
    /// 背景音乐路径
    pub music: String,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            background: "assets/stars.png".to_string(),
            music: "assets/stars.mp3".to_string(),
        }
    }
}

/// 音频配置
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AudioConfig {
    /// 背景音乐音量
    pub volume: f32,
    /// 是否启用背景音乐
    pub enabled: bool,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            volume: 0.5,
            enabled: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ViewerConfig::default();
        assert_eq!(config.window.width, 800);
        assert_eq!(config.window.height, 600);
        assert_eq!(config.bloom.strength, 0.5);
        assert_eq!(config.bloom.radius, 0.4);
        assert_eq!(config.bloom.threshold, 0.9);
        assert_eq!(config.audio.volume, 0.5);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_falls_back_to_defaults() {
        let config = ViewerConfig::from_toml_str(
            r#"
            [window]
            width = 1280
            height = 720
            title = "Nebula"
            "#,
        )
        .unwrap();
        assert_eq!(config.window.width, 1280);
        assert_eq!(config.bloom.threshold, 0.9);
        assert_eq!(config.assets.background, "assets/stars.png");
    }

    #[test]
    fn test_invalid_threshold_rejected() {
        let result = ViewerConfig::from_toml_str(
            r#"
            [bloom]
            strength = 0.5
            radius = 0.4
            threshold = 1.5
            "#,
        );
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_garbage_toml_rejected() {
        let result = ViewerConfig::from_toml_str("not toml at all [");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = ViewerConfig::load_or_default("definitely/not/here.toml").unwrap();
        assert_eq!(config.window.width, 800);
    }
}
