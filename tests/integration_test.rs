use galaxy_viewer::config::ViewerConfig;
use galaxy_viewer::particles::{
    hsl_to_rgb, FieldAnimation, PointField, ShapePolicy, UpdatePolicy, CORE_ROTATION_DELTA,
    DISK_ROTATION_DELTA,
};
use galaxy_viewer::render::OrbitCamera;
use galaxy_viewer::scene::Scene;
use rand::RngCore;
use std::f32::consts::TAU;

/// 按固定序列回放随机数的 RNG
///
/// `Rng::gen::<f32>()` 取 `next_u32() >> 8` 的 24 位尾数乘 2^-24，
/// 这里反向编码使每次抽取精确等于序列中的值（值需是 2^-24 的整数倍）。
struct SequenceRng {
    draws: Vec<f32>,
    next: usize,
}

impl SequenceRng {
    fn new(draws: &[f32]) -> Self {
        Self {
            draws: draws.to_vec(),
            next: 0,
        }
    }
}

impl RngCore for SequenceRng {
    fn next_u32(&mut self) -> u32 {
        let value = self.draws[self.next % self.draws.len()];
        self.next += 1;
        ((value * 16_777_216.0) as u32) << 8
    }

    fn next_u64(&mut self) -> u64 {
        self.next_u32() as u64
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        dest.fill(0);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

#[test]
fn test_sequence_rng_replays_exactly() {
    use rand::Rng;
    let mut rng = SequenceRng::new(&[0.0, 0.25, 0.5, 0.75]);
    assert_eq!(rng.gen::<f32>(), 0.0);
    assert_eq!(rng.gen::<f32>(), 0.25);
    assert_eq!(rng.gen::<f32>(), 0.5);
    assert_eq!(rng.gen::<f32>(), 0.75);
    assert_eq!(rng.gen::<f32>(), 0.0);
}

#[test]
fn test_core_generation_is_deterministic() {
    let draws = [0.0f32, 0.25, 0.5, 0.75];
    let mut rng = SequenceRng::new(&draws);
    let field = PointField::generate(4, &ShapePolicy::core(), &mut rng);

    // 每个点依次消耗 6 个随机数：方位角、极角、半径、大小、色相带、带内色相
    let mut cursor = 0usize;
    let mut draw = || {
        let v = draws[cursor % draws.len()];
        cursor += 1;
        v
    };

    for i in 0..4 {
        let theta = TAU * draw();
        let phi = (2.0 * draw() - 1.0f32).acos();
        let radius = 2.5 + draw() * 0.5;
        let expected = [
            phi.sin() * theta.cos() * radius,
            phi.sin() * theta.sin() * radius,
            phi.cos() * radius,
        ];
        for axis in 0..3 {
            assert!(
                (field.positions[i * 3 + axis] - expected[axis]).abs() < 1e-6,
                "point {} axis {}: {} != {}",
                i,
                axis,
                field.positions[i * 3 + axis],
                expected[axis]
            );
        }

        let expected_size = (0.3 + draw() * 0.2) * 10.0;
        assert!((field.sizes[i] - expected_size).abs() < 1e-6);

        let band = if draw() < 0.5 { 270.0 } else { 30.0 };
        let hue = (band + draw() * 30.0) / 360.0;
        let expected_color = hsl_to_rgb(hue, 1.0, 0.6);
        for channel in 0..3 {
            assert!((field.colors[i * 3 + channel] - expected_color[channel]).abs() < 1e-6);
        }
    }

    // 第一个点手工核对：theta=0、phi=acos(-0.5)、radius=2.75、
    // size=(0.3+0.75*0.2)*10、蓝紫带 hue=277.5°
    assert!((field.positions[0] - 2.381_570_2).abs() < 1e-4);
    assert!(field.positions[1].abs() < 1e-6);
    assert!((field.positions[2] - (-1.375)).abs() < 1e-5);
    assert!((field.sizes[0] - 4.5).abs() < 1e-6);
    assert!((field.colors[0] - 0.7).abs() < 1e-5);
    assert!((field.colors[1] - 0.2).abs() < 1e-5);
    assert!((field.colors[2] - 1.0).abs() < 1e-5);
}

#[test]
fn test_disk_generation_is_deterministic() {
    let draws = [0.0f32, 0.25, 0.5, 0.75];
    let mut rng = SequenceRng::new(&draws);
    let field = PointField::generate(2, &ShapePolicy::disk(), &mut rng);

    // 第一个点：angle=0、r=0.25²、t=0.5²、符号位 0.75 -> +1
    let radius = 2.8 + 0.25f32 * 0.25 * 6.0;
    assert!((field.positions[0] - radius).abs() < 1e-6);
    assert!(field.positions[1].abs() < 1e-6);
    assert!((field.positions[2] - 0.5f32 * 0.5 * 1.2).abs() < 1e-6);
    // size 从 0.0 抽取
    assert!((field.sizes[0] - 3.0).abs() < 1e-6);
}

#[test]
fn test_full_animation_loop() {
    let mut rng = rand::thread_rng();
    let mut scene = Scene::with_counts(32, 32, &mut rng);

    // 跑 600 帧，两个场各自按固定增量累计旋转
    for k in 1..=600 {
        scene.tick(k as f32 / 60.0);
    }
    assert!((scene.core_anim.rotation() - (CORE_ROTATION_DELTA * 600.0) % TAU).abs() < 1e-4);
    assert!((scene.disk_anim.rotation() - (DISK_ROTATION_DELTA * 600.0) % TAU).abs() < 1e-4);
    assert!((scene.disk_anim.time_uniform() - 10.0).abs() < 1e-5);
}

#[test]
fn test_jitter_variant_marks_field_dirty() {
    let mut rng = rand::thread_rng();
    let mut field = PointField::generate(64, &ShapePolicy::core(), &mut rng);
    let mut anim = FieldAnimation::new(vec![
        UpdatePolicy::RigidRotation {
            delta: CORE_ROTATION_DELTA,
        },
        UpdatePolicy::Jitter { amplitude: 0.001 },
    ]);

    anim.tick(&mut field, 0.5);
    assert!(field.take_dirty());
    assert!((anim.rotation() - CORE_ROTATION_DELTA).abs() < 1e-7);
}

#[test]
fn test_resize_updates_camera_aspect() {
    // 800x600 -> 1024x768
    let mut camera = OrbitCamera::new(800.0 / 600.0);
    camera.set_viewport(1024, 768);
    assert!((camera.aspect() - 1024.0 / 768.0).abs() < 1e-6);
}

#[test]
fn test_config_roundtrip() {
    let config = ViewerConfig::default();
    let toml = toml::to_string(&config).unwrap();
    let parsed = ViewerConfig::from_toml_str(&toml).unwrap();
    assert_eq!(parsed.window.width, config.window.width);
    assert_eq!(parsed.bloom.threshold, config.bloom.threshold);
    assert_eq!(parsed.assets.music, config.assets.music);
}
