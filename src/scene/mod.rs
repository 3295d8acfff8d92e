//! 场景上下文
//!
//! 用一个显式的上下文结构收拢两个点场、它们的更新策略和动画状态，
//! 代替散落的全局可变量。`tick` 是唯一的每帧入口，由外部调度器
//! （真实窗口循环或测试）驱动，本身不依赖任何显示刷新机制。

use rand::Rng;

use crate::particles::{
    FieldAnimation, PointField, ShapePolicy, UpdatePolicy, CORE_ROTATION_DELTA,
    DISK_ROTATION_DELTA,
};

/// 核心场点数
pub const CORE_POINT_COUNT: usize = 10_000;
/// 星环场点数
pub const DISK_POINT_COUNT: usize = 10_000;

/// 整个可动画场景：核心球壳 + 星环圆环
pub struct Scene {
    pub core: PointField,
    pub disk: PointField,
    pub core_anim: FieldAnimation,
    pub disk_anim: FieldAnimation,
}

impl Scene {
    /// 按出厂参数生成场景
    ///
    /// 核心只做刚体旋转；星环同时做刚体旋转和着色器波浪。
    pub fn new<R: Rng>(rng: &mut R) -> Self {
        Self::with_counts(CORE_POINT_COUNT, DISK_POINT_COUNT, rng)
    }

    /// 指定点数生成，测试用小场景走这里
    pub fn with_counts<R: Rng>(core_count: usize, disk_count: usize, rng: &mut R) -> Self {
        let core = PointField::generate(core_count, &ShapePolicy::core(), rng);
        let disk = PointField::generate(disk_count, &ShapePolicy::disk(), rng);

        Self {
            core,
            disk,
            core_anim: FieldAnimation::new(vec![UpdatePolicy::RigidRotation {
                delta: CORE_ROTATION_DELTA,
            }]),
            disk_anim: FieldAnimation::new(vec![
                UpdatePolicy::RigidRotation {
                    delta: DISK_ROTATION_DELTA,
                },
                UpdatePolicy::ShaderWave,
            ]),
        }
    }

    /// 推进一帧
    ///
    /// `elapsed` 来自顶层动画时钟，单调递增。
    pub fn tick(&mut self, elapsed: f32) {
        self.core_anim.tick(&mut self.core, elapsed);
        self.disk_anim.tick(&mut self.disk, elapsed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::f32::consts::TAU;

    #[test]
    fn test_default_scene_shape() {
        let mut rng = StdRng::seed_from_u64(5);
        let scene = Scene::with_counts(64, 64, &mut rng);
        assert_eq!(scene.core.count(), 64);
        assert_eq!(scene.disk.count(), 64);
        assert_eq!(scene.core.positions.len(), 192);
        assert_eq!(scene.disk.colors.len(), 192);
    }

    #[test]
    fn test_tick_advances_both_rotations() {
        let mut rng = StdRng::seed_from_u64(6);
        let mut scene = Scene::with_counts(16, 16, &mut rng);

        for k in 1..=300 {
            scene.tick(k as f32 / 60.0);
        }

        let core_expected = (CORE_ROTATION_DELTA * 300.0) % TAU;
        let disk_expected = (DISK_ROTATION_DELTA * 300.0) % TAU;
        assert!((scene.core_anim.rotation() - core_expected).abs() < 1e-4);
        assert!((scene.disk_anim.rotation() - disk_expected).abs() < 1e-4);
        // 星环的时间 uniform 紧跟最后一帧的时钟
        assert!((scene.disk_anim.time_uniform() - 5.0).abs() < 1e-6);
        // 核心没有波浪策略，uniform 不动
        assert_eq!(scene.core_anim.time_uniform(), 0.0);
    }
}
