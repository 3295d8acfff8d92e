//! 粒子点场模块
//!
//! 两对相互独立的"生成器 + 更新器"：
//!
//! - 生成器在启动时运行一次，按形状策略采样出位置、大小、颜色三条
//!   索引对齐的扁平缓冲区
//! - 更新器每帧运行，根据策略推进旋转角、时间 uniform 或原地抖动
//!
//! 两者都不依赖渲染器，可以在无显示驱动的环境下直接测试。

pub mod color;
pub mod field;
pub mod update;

pub use color::{hsl_to_rgb, sample_color, sample_hue};
pub use field::{PointField, ShapePolicy};
pub use update::{
    wave_displacement, FieldAnimation, UpdatePolicy, CORE_ROTATION_DELTA, DISK_ROTATION_DELTA,
    JITTER_AMPLITUDE,
};
