//! 渲染系统
//!
//! - [`camera`]：绕原点的轨道相机，带惯性阻尼
//! - [`wgpu`]：表面/设备引导、点场实例化管线和背景绘制
//! - [`postprocess`]：Bloom 辉光链

pub mod camera;
pub mod postprocess;
pub mod wgpu;

pub use camera::OrbitCamera;
pub use postprocess::BloomPass;
pub use self::wgpu::{PointInstance, SceneRenderer};
