//! 核心模块
//!
//! 包含查看器的核心功能：
//! - `engine` - 主入口和运行循环
//! - `clock` - 动画时钟
//! - `error` - 错误类型定义

pub mod clock;
pub mod engine;
pub mod error;

// 重新导出主要类型
pub use clock::FrameClock;
pub use engine::Engine;
pub use error::{
    AssetError, AssetResult, AudioError, AudioResult, RenderError, RenderResult, ViewerError,
    ViewerResult,
};
