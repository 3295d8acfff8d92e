//! 统一错误处理模块
//!
//! 提供查看器范围内的统一错误类型定义。
//!
//! 整个系统只有两类真正可失败的操作：资源加载（背景图、音频）和
//! 渲染设备初始化。其余路径是固定范围随机数上的纯算术，不会失败。

use thiserror::Error;

/// 查看器顶层错误类型
#[derive(Error, Debug)]
pub enum ViewerError {
    #[error("Window creation failed: {0}")]
    Window(String),

    #[error("Event loop error: {0}")]
    EventLoop(String),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),

    #[error("Audio error: {0}")]
    Audio(#[from] AudioError),

    #[error("Config error: {0}")]
    Config(#[from] crate::config::ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// 渲染系统错误
#[derive(Error, Debug, Clone)]
pub enum RenderError {
    #[error("Failed to create surface: {0}")]
    SurfaceCreation(String),

    #[error("Failed to request adapter: no compatible GPU found")]
    NoAdapter,

    #[error("Failed to request device: {0}")]
    DeviceRequest(String),

    #[error("Surface error: {0}")]
    Surface(String),
}

/// 资源加载错误
#[derive(Error, Debug)]
pub enum AssetError {
    #[error("Asset not found: {path}")]
    NotFound { path: String },

    #[error("Failed to load asset: {path}, reason: {reason}")]
    LoadFailed { path: String, reason: String },

    #[error("Asset decode error: {0}")]
    Decode(String),
}

/// 音频系统错误
#[derive(Error, Debug)]
pub enum AudioError {
    #[error("Failed to initialize audio device")]
    DeviceInit,

    #[error("Failed to decode audio: {0}")]
    DecodeFailed(String),

    #[error("Playback error: {0}")]
    Playback(String),
}

/// 结果类型别名
pub type ViewerResult<T> = Result<T, ViewerError>;
pub type RenderResult<T> = Result<T, RenderError>;
pub type AssetResult<T> = Result<T, AssetError>;
pub type AudioResult<T> = Result<T, AudioError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion() {
        let asset_err = AssetError::NotFound {
            path: "stars.png".to_string(),
        };
        let viewer_err: ViewerError = asset_err.into();
        assert!(matches!(viewer_err, ViewerError::Asset(_)));
    }

    #[test]
    fn test_error_display() {
        let err = RenderError::NoAdapter;
        assert_eq!(
            err.to_string(),
            "Failed to request adapter: no compatible GPU found"
        );
    }
}
