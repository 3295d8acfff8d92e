//! 资源加载
//!
//! 背景星空图在工作线程解码，结果（图像或错误）通过容量为 1 的
//! 通道一次性送回。主循环在动画开始前对这个结果设门：成功则安装
//! 背景纹理，失败则记日志后无背景继续。不重试。

use std::path::{Path, PathBuf};

use crossbeam_channel::Receiver;

use crate::core::error::{AssetError, AssetResult};

/// 解码完成的背景图，RGBA8 紧凑排列
pub struct BackgroundImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// 在工作线程上加载背景图
///
/// 返回的接收端只会收到一条消息。发送失败（接收端先行丢弃）时
/// 结果直接丢弃。
pub fn spawn_background_load(path: PathBuf) -> Receiver<AssetResult<BackgroundImage>> {
    let (tx, rx) = crossbeam_channel::bounded(1);
    std::thread::spawn(move || {
        let result = load_background(&path);
        if let Err(ref e) = result {
            tracing::warn!(target: "viewer", "Background load failed: {}", e);
        }
        let _ = tx.send(result);
    });
    rx
}

/// 同步解码一张背景图
pub fn load_background(path: &Path) -> AssetResult<BackgroundImage> {
    if !path.exists() {
        return Err(AssetError::NotFound {
            path: path.display().to_string(),
        });
    }
    let image = image::open(path).map_err(|e| AssetError::LoadFailed {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    let rgba = image.to_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(BackgroundImage {
        width,
        height,
        pixels: rgba.into_raw(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_reports_not_found() {
        let result = load_background(Path::new("no/such/stars.png"));
        assert!(matches!(result, Err(AssetError::NotFound { .. })));
    }

    #[test]
    fn test_spawned_load_is_single_shot() {
        let rx = spawn_background_load(PathBuf::from("no/such/stars.png"));
        let first = rx.recv().expect("worker always sends one result");
        assert!(first.is_err());
        // 通道只有一条消息，随后即断开
        assert!(rx.recv().is_err());
    }

    #[test]
    fn test_undecodable_file_reports_load_failed() {
        let dir = std::env::temp_dir().join("galaxy_viewer_asset_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("not_an_image.png");
        std::fs::write(&path, b"definitely not a png").unwrap();

        let result = load_background(&path);
        assert!(matches!(result, Err(AssetError::LoadFailed { .. })));

        let _ = std::fs::remove_file(&path);
    }
}
