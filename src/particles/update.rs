//! 动画更新策略
//!
//! 每帧根据动画时钟推进一个点场的可视状态。三种策略对应源场景在
//! 不同阶段用过的三种写法，收敛为一个可选择的枚举：
//!
//! - 刚体旋转：整场绕 z 轴按固定每帧增量旋转，从不触碰缓冲区
//! - 着色器波浪：把时间写进 uniform，位移在 GPU 顶点阶段计算
//! - 直接抖动：逐点原地改写 z 坐标，改写后标脏等待重传

use std::f32::consts::TAU;

use super::field::PointField;

/// 核心场每帧旋转增量（弧度）
pub const CORE_ROTATION_DELTA: f32 = 0.002;
/// 星环场每帧旋转增量（弧度）
pub const DISK_ROTATION_DELTA: f32 = 0.001;
/// 抖动幅度
pub const JITTER_AMPLITUDE: f32 = 0.001;

/// 单帧更新策略
#[derive(Clone, Debug, PartialEq)]
pub enum UpdatePolicy {
    /// 每帧把整场旋转角增加固定增量
    RigidRotation { delta: f32 },
    /// 每帧把当前时间写进着色器 uniform，位移只在读取时产生
    ShaderWave,
    /// 每帧对每个点的 z 坐标加 `sin(t + i) * amplitude`
    Jitter { amplitude: f32 },
}

/// 一个点场的动画状态：策略列表加累计旋转角和时间 uniform
pub struct FieldAnimation {
    policies: Vec<UpdatePolicy>,
    rotation: f32,
    time_uniform: f32,
}

impl FieldAnimation {
    pub fn new(policies: Vec<UpdatePolicy>) -> Self {
        Self {
            policies,
            rotation: 0.0,
            time_uniform: 0.0,
        }
    }

    /// 累计旋转角（弧度，模 2π）
    pub fn rotation(&self) -> f32 {
        self.rotation
    }

    /// 最近一次写入的时间 uniform 值
    pub fn time_uniform(&self) -> f32 {
        self.time_uniform
    }

    pub fn policies(&self) -> &[UpdatePolicy] {
        &self.policies
    }

    /// 推进一帧
    ///
    /// `elapsed` 是自动画开始以来的时间，由顶层时钟单调递增，
    /// 这里只读不复位。
    pub fn tick(&mut self, field: &mut PointField, elapsed: f32) {
        for policy in &self.policies {
            match *policy {
                UpdatePolicy::RigidRotation { delta } => {
                    self.rotation = (self.rotation + delta) % TAU;
                }
                UpdatePolicy::ShaderWave => {
                    self.time_uniform = elapsed;
                }
                UpdatePolicy::Jitter { amplitude } => {
                    field.jitter_z(elapsed, amplitude);
                }
            }
        }
    }
}

/// 星环波浪位移的 CPU 参考实现
///
/// GPU 顶点阶段使用同一公式；保留在这里把常量钉住。
/// `radius` 是点在环面内的半径，`angle` 是环面内方位角。
pub fn wave_displacement(radius: f32, angle: f32, time: f32) -> f32 {
    let wave = (radius * 2.0 - time * 5.0).sin() * 0.7 + 0.5;
    (angle * 3.0 + time * 2.0).sin() * wave * 0.3
}
