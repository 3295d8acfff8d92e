//! 背景音乐
//!
//! rodio 输出流活在专门的驱动线程里，主循环通过通道发送命令。
//! 打不开输出设备或解码失败时记日志并放弃，音乐永远不响，
//! 画面照常。

use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink, Source};
use std::fs::File;
use std::io::BufReader;

/// 驱动线程接受的命令
#[derive(Clone)]
pub enum MusicCommand {
    Play {
        path: String,
        volume: f32,
        looped: bool,
    },
    Stop,
    SetVolume(f32),
}

/// 音乐驱动句柄
#[derive(Clone)]
pub struct MusicHandle {
    tx: crossbeam_channel::Sender<MusicCommand>,
}

impl MusicHandle {
    pub fn play(&self, path: &str, volume: f32, looped: bool) {
        let _ = self.tx.send(MusicCommand::Play {
            path: path.to_string(),
            volume,
            looped,
        });
    }

    pub fn stop(&self) {
        let _ = self.tx.send(MusicCommand::Stop);
    }

    pub fn set_volume(&self, volume: f32) {
        let _ = self.tx.send(MusicCommand::SetVolume(volume));
    }
}

struct MusicBackend {
    _stream: OutputStream,
    sink: Option<Sink>,
}

impl MusicBackend {
    fn new() -> Option<Self> {
        match OutputStreamBuilder::open_default_stream() {
            Ok(stream) => Some(Self {
                _stream: stream,
                sink: None,
            }),
            Err(e) => {
                tracing::warn!(target: "viewer", "Audio output unavailable: {}", e);
                None
            }
        }
    }

    fn play(&mut self, path: &str, volume: f32, looped: bool) {
        // 重复的 Play 命令不打断正在播放的曲目
        if self.sink.as_ref().map(|s| !s.empty()).unwrap_or(false) {
            return;
        }

        let file = match File::open(path) {
            Ok(f) => f,
            Err(e) => {
                tracing::warn!(target: "viewer", "Failed to open audio file {}: {}", path, e);
                return;
            }
        };
        let source = match Decoder::new(BufReader::new(file)) {
            Ok(s) => s,
            Err(e) => {
                tracing::warn!(target: "viewer", "Failed to decode audio {}: {}", path, e);
                return;
            }
        };

        let sink = Sink::connect_new(self._stream.mixer());
        sink.set_volume(volume);
        if looped {
            sink.append(source.repeat_infinite());
        } else {
            sink.append(source);
        }
        self.sink = Some(sink);
        tracing::info!(target: "viewer", "Background music started: {}", path);
    }

    fn stop(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
    }

    fn set_volume(&mut self, volume: f32) {
        if let Some(sink) = &self.sink {
            sink.set_volume(volume);
        }
    }
}

/// 启动音乐驱动线程
///
/// 输出设备不可用时线程直接退出，句柄上的命令会静默丢弃。
pub fn start_music_driver() -> MusicHandle {
    let (tx, rx) = crossbeam_channel::unbounded::<MusicCommand>();
    std::thread::spawn(move || {
        let Some(mut backend) = MusicBackend::new() else {
            return;
        };
        while let Ok(command) = rx.recv() {
            match command {
                MusicCommand::Play {
                    path,
                    volume,
                    looped,
                } => backend.play(&path, volume, looped),
                MusicCommand::Stop => backend.stop(),
                MusicCommand::SetVolume(volume) => backend.set_volume(volume),
            }
        }
    });
    MusicHandle { tx }
}
