//! 粒子颜色采样
//!
//! 所有粒子的颜色取自两个固定色相带之一：蓝紫带 `[270°, 300°)` 或
//! 暖橙带 `[30°, 60°)`，各占一半概率。饱和度固定 1.0、亮度固定 0.6，
//! 转换为 RGB 后写入颜色缓冲区。

use rand::Rng;

/// 蓝紫色相带起点（度）
pub const VIOLET_BAND_START: f32 = 270.0;
/// 暖橙色相带起点（度）
pub const ORANGE_BAND_START: f32 = 30.0;
/// 两个色相带的宽度（度）
pub const BAND_WIDTH: f32 = 30.0;
/// 固定饱和度
pub const SATURATION: f32 = 1.0;
/// 固定亮度
pub const LIGHTNESS: f32 = 0.6;

/// 采样一个色相，返回归一化到 `[0, 1)` 的值
///
/// 先以等概率选择色相带，再在带内均匀采样。两次随机数按此顺序消耗。
pub fn sample_hue<R: Rng>(rng: &mut R) -> f32 {
    let start = if rng.gen::<f32>() < 0.5 {
        VIOLET_BAND_START
    } else {
        ORANGE_BAND_START
    };
    (start + rng.gen::<f32>() * BAND_WIDTH) / 360.0
}

/// 采样一个粒子颜色，返回 RGB 三元组
pub fn sample_color<R: Rng>(rng: &mut R) -> [f32; 3] {
    let hue = sample_hue(rng);
    hsl_to_rgb(hue, SATURATION, LIGHTNESS)
}

/// HSL 转 RGB
///
/// `h` 归一化到 `[0, 1)`，`s`、`l` 在 `[0, 1]`。
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> [f32; 3] {
    let h = h.rem_euclid(1.0);
    if s == 0.0 {
        return [l, l, l];
    }

    let q = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;

    [
        hue_to_channel(p, q, h + 1.0 / 3.0),
        hue_to_channel(p, q, h),
        hue_to_channel(p, q, h - 1.0 / 3.0),
    ]
}

fn hue_to_channel(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * 6.0 * (2.0 / 3.0 - t)
    } else {
        p
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_hsl_primaries() {
        let red = hsl_to_rgb(0.0, 1.0, 0.5);
        assert!((red[0] - 1.0).abs() < 1e-6);
        assert!(red[1].abs() < 1e-6);
        assert!(red[2].abs() < 1e-6);

        let green = hsl_to_rgb(1.0 / 3.0, 1.0, 0.5);
        assert!((green[1] - 1.0).abs() < 1e-6);

        let gray = hsl_to_rgb(0.42, 0.0, 0.6);
        assert_eq!(gray, [0.6, 0.6, 0.6]);
    }

    #[test]
    fn test_hue_wraps() {
        let a = hsl_to_rgb(0.25, 1.0, 0.6);
        let b = hsl_to_rgb(1.25, 1.0, 0.6);
        assert_eq!(a, b);
    }

    #[test]
    fn test_sampled_hue_stays_in_bands() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let deg = sample_hue(&mut rng) * 360.0;
            let violet = (270.0..300.0).contains(&deg);
            let orange = (30.0..60.0).contains(&deg);
            assert!(violet || orange, "hue {} outside both bands", deg);
        }
    }

    #[test]
    fn test_sampled_color_is_bimodal() {
        // 带内 S=1.0、L=0.6 时两个色相带各有两个通道被钉死：
        // 蓝紫带 g=0.2、b=1.0，暖橙带 r=1.0、b=0.2。
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..1000 {
            let [r, g, b] = sample_color(&mut rng);
            let violet = (g - 0.2).abs() < 1e-5 && (b - 1.0).abs() < 1e-5;
            let orange = (r - 1.0).abs() < 1e-5 && (b - 0.2).abs() < 1e-5;
            assert!(violet || orange, "unexpected color {:?}", [r, g, b]);
        }
    }
}
