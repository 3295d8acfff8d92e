//! 点场生成器
//!
//! 按几何形状策略一次性采样 N 个点，连同每点大小和颜色写入三条
//! 索引对齐的扁平缓冲区。缓冲区在创建后不再扩缩，只有抖动更新
//! 策略会原地改写 z 坐标。

use rand::Rng;
use std::f32::consts::TAU;

use super::color::sample_color;

/// 点场形状策略
///
/// 决定采样分布所覆盖的三维体积。
#[derive(Clone, Debug, PartialEq)]
pub enum ShapePolicy {
    /// 球壳：方位角均匀、极角按表面测度均匀、半径在 `[min, max]` 内均匀
    SphereShell { min_radius: f32, max_radius: f32 },
    /// 扁平圆环：半径平方偏置向外缘，厚度平方集中于中面，上下对称
    FlattenedAnnulus {
        min_radius: f32,
        radial_range: f32,
        thickness: f32,
    },
}

impl ShapePolicy {
    /// 核心球壳的出厂参数
    pub fn core() -> Self {
        Self::SphereShell {
            min_radius: 2.5,
            max_radius: 3.0,
        }
    }

    /// 星环圆环的出厂参数
    pub fn disk() -> Self {
        Self::FlattenedAnnulus {
            min_radius: 2.8,
            radial_range: 6.0,
            thickness: 1.2,
        }
    }

    /// 采样一个点的坐标
    ///
    /// 随机数消耗顺序是生成结果的一部分：球壳依次取方位角、极角、
    /// 半径；圆环依次取角度、半径因子、厚度因子、符号。
    fn sample<R: Rng>(&self, rng: &mut R) -> [f32; 3] {
        match *self {
            Self::SphereShell {
                min_radius,
                max_radius,
            } => {
                let theta = TAU * rng.gen::<f32>();
                // acos(2u-1) 保证按球面面积均匀，而不是纬度均匀
                let phi = (2.0 * rng.gen::<f32>() - 1.0).acos();
                let radius = min_radius + rng.gen::<f32>() * (max_radius - min_radius);
                [
                    phi.sin() * theta.cos() * radius,
                    phi.sin() * theta.sin() * radius,
                    phi.cos() * radius,
                ]
            }
            Self::FlattenedAnnulus {
                min_radius,
                radial_range,
                thickness,
            } => {
                let angle = TAU * rng.gen::<f32>();
                let r_factor = rng.gen::<f32>().powi(2);
                let radius = min_radius + r_factor * radial_range;
                let t = rng.gen::<f32>().powi(2);
                let z_sign = if rng.gen::<f32>() < 0.5 { -1.0 } else { 1.0 };
                let height = z_sign * t * thickness;
                [angle.cos() * radius, angle.sin() * radius, height]
            }
        }
    }
}

/// 每点基础大小
const SIZE_BASE: f32 = 0.3;
/// 每点大小随机幅度
const SIZE_JITTER: f32 = 0.2;
/// 大小整体缩放
const SIZE_SCALE: f32 = 10.0;

/// 一个点场：三条索引对齐的扁平缓冲区
///
/// 不变量：`positions.len() == 3 * count`，`sizes.len() == count`，
/// `colors.len() == 3 * count`。索引 i 在三条缓冲区中描述同一个点。
pub struct PointField {
    count: usize,
    pub positions: Vec<f32>,
    pub sizes: Vec<f32>,
    pub colors: Vec<f32>,
    dirty: bool,
}

impl PointField {
    /// 按形状策略生成一个点场
    ///
    /// 每个点依次消耗：形状采样随机数、大小随机数、色相带随机数、
    /// 带内色相随机数。注入 `rng` 使测试可以替换固定序列。
    pub fn generate<R: Rng>(count: usize, shape: &ShapePolicy, rng: &mut R) -> Self {
        assert!(count > 0, "point field count must be positive");

        let mut positions = Vec::with_capacity(count * 3);
        let mut sizes = Vec::with_capacity(count);
        let mut colors = Vec::with_capacity(count * 3);

        for _ in 0..count {
            let pos = shape.sample(rng);
            positions.extend_from_slice(&pos);
            sizes.push((SIZE_BASE + rng.gen::<f32>() * SIZE_JITTER) * SIZE_SCALE);
            colors.extend_from_slice(&sample_color(rng));
        }

        Self {
            count,
            positions,
            sizes,
            colors,
            dirty: false,
        }
    }

    /// 点数，创建后固定
    pub fn count(&self) -> usize {
        self.count
    }

    /// 对每个点的 z 坐标做原地抖动：`z[i] += sin(t + i) * amplitude`
    ///
    /// 缓冲区形状不符时跳过本帧，不报错。
    pub fn jitter_z(&mut self, elapsed: f32, amplitude: f32) {
        if self.positions.len() != self.count * 3 {
            return;
        }
        for i in 0..self.count {
            self.positions[i * 3 + 2] += (elapsed + i as f32).sin() * amplitude;
        }
        self.dirty = true;
    }

    /// 取走脏标记；抖动改写过缓冲区后渲染端需要重新上传
    pub fn take_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_buffer_lengths() {
        let mut rng = StdRng::seed_from_u64(1);
        let field = PointField::generate(10_000, &ShapePolicy::core(), &mut rng);
        assert_eq!(field.count(), 10_000);
        assert_eq!(field.positions.len(), 30_000);
        assert_eq!(field.sizes.len(), 10_000);
        assert_eq!(field.colors.len(), 30_000);
    }

    #[test]
    #[should_panic(expected = "count must be positive")]
    fn test_zero_count_rejected() {
        let mut rng = StdRng::seed_from_u64(1);
        let _ = PointField::generate(0, &ShapePolicy::core(), &mut rng);
    }

    #[test]
    fn test_jitter_moves_only_z() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut field = PointField::generate(16, &ShapePolicy::core(), &mut rng);
        let before = field.positions.clone();
        let t = 1.5f32;

        field.jitter_z(t, 0.001);

        for i in 0..field.count() {
            assert_eq!(field.positions[i * 3], before[i * 3]);
            assert_eq!(field.positions[i * 3 + 1], before[i * 3 + 1]);
            let expected = before[i * 3 + 2] + (t + i as f32).sin() * 0.001;
            assert!((field.positions[i * 3 + 2] - expected).abs() < 1e-7);
        }
        assert!(field.take_dirty());
        assert!(!field.take_dirty());
    }

    #[test]
    fn test_jitter_skips_malformed_buffer() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut field = PointField::generate(8, &ShapePolicy::core(), &mut rng);
        field.positions.truncate(5);
        field.jitter_z(0.5, 0.001);
        assert_eq!(field.positions.len(), 5);
        assert!(!field.take_dirty());
    }

    proptest! {
        #[test]
        fn core_points_stay_in_shell(seed in any::<u64>()) {
            let mut rng = StdRng::seed_from_u64(seed);
            let field = PointField::generate(128, &ShapePolicy::core(), &mut rng);
            for i in 0..field.count() {
                let (x, y, z) = (
                    field.positions[i * 3],
                    field.positions[i * 3 + 1],
                    field.positions[i * 3 + 2],
                );
                let r = (x * x + y * y + z * z).sqrt();
                prop_assert!(r >= 2.5 - 1e-3 && r <= 3.0 + 1e-3, "radius {} out of shell", r);
            }
        }

        #[test]
        fn disk_points_stay_in_annulus(seed in any::<u64>()) {
            let mut rng = StdRng::seed_from_u64(seed);
            let field = PointField::generate(128, &ShapePolicy::disk(), &mut rng);
            for i in 0..field.count() {
                let (x, y, z) = (
                    field.positions[i * 3],
                    field.positions[i * 3 + 1],
                    field.positions[i * 3 + 2],
                );
                let r = (x * x + y * y).sqrt();
                prop_assert!(r >= 2.8 - 1e-3 && r <= 8.8 + 1e-3, "planar radius {} out of ring", r);
                prop_assert!(z.abs() <= 1.2 + 1e-6, "height {} above thickness", z);
            }
        }

        #[test]
        fn sizes_stay_in_range(seed in any::<u64>()) {
            let mut rng = StdRng::seed_from_u64(seed);
            let field = PointField::generate(128, &ShapePolicy::disk(), &mut rng);
            for &s in &field.sizes {
                prop_assert!(s >= 3.0 - 1e-4 && s <= 5.0 + 1e-4, "size {} out of range", s);
            }
        }
    }
}
