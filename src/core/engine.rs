//! 查看器主入口
//!
//! 定义 Engine 结构和主运行循环：创建窗口与渲染器、生成场景、
//! 启动资源加载与音乐驱动，然后把每帧推进交给窗口事件循环。

use std::path::PathBuf;
use std::sync::Arc;

use winit::dpi::PhysicalSize;
use winit::event::{ElementState, Event, MouseButton, MouseScrollDelta, TouchPhase, WindowEvent};
use winit::event_loop::{EventLoop, EventLoopWindowTarget};
use winit::window::{Window, WindowBuilder};

use crate::assets;
use crate::audio::{self, MusicHandle};
use crate::config::ViewerConfig;
use crate::core::clock::FrameClock;
use crate::core::error::{ViewerError, ViewerResult};
use crate::render::{OrbitCamera, SceneRenderer};
use crate::scene::Scene;

/// 默认配置文件路径
const CONFIG_PATH: &str = "galaxy_viewer.toml";

/// 查看器主结构
///
/// `Engine::run` 负责初始化所有子系统并驱动主循环直到窗口关闭。
pub struct Engine;

impl Engine {
    /// 运行查看器主循环
    pub fn run() -> ViewerResult<()> {
        Self::initialize_logging();

        let config = ViewerConfig::load_or_default(CONFIG_PATH)?;

        let event_loop = EventLoop::new()
            .map_err(|e| ViewerError::EventLoop(format!("Failed to create event loop: {}", e)))?;
        let window = Arc::new(
            WindowBuilder::new()
                .with_title(&config.window.title)
                .with_inner_size(PhysicalSize::new(config.window.width, config.window.height))
                .build(&event_loop)
                .map_err(|e| ViewerError::Window(e.to_string()))?,
        );

        let mut rng = rand::thread_rng();
        let scene = Scene::new(&mut rng);
        let renderer =
            pollster::block_on(SceneRenderer::new(window.clone(), &scene, &config.bloom))?;

        let size = window.inner_size();
        let camera = OrbitCamera::new(size.width as f32 / size.height.max(1) as f32);

        // 背景图解码与音乐驱动都在各自线程上，主循环只看通道
        let background_rx =
            assets::spawn_background_load(PathBuf::from(&config.assets.background));
        let music = audio::start_music_driver();

        let mut app = App {
            window: window.clone(),
            scene,
            camera,
            renderer,
            music,
            config,
            clock: None,
            background_rx: Some(background_rx),
            interacted: false,
            dragging: false,
            last_cursor: None,
        };

        event_loop
            .run(move |event, elwt| match event {
                Event::WindowEvent { event, .. } => app.handle_window_event(&event, elwt),
                Event::AboutToWait => app.window.request_redraw(),
                _ => {}
            })
            .map_err(|e| ViewerError::EventLoop(format!("Event loop error: {}", e)))?;

        tracing::info!(target: "viewer", "Viewer shutting down");
        Ok(())
    }

    /// 初始化日志系统
    ///
    /// 日志级别通过 `RUST_LOG` 环境变量控制。
    fn initialize_logging() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
        tracing::info!(target: "viewer", "Viewer starting");
    }
}

/// 应用上下文：场景、相机、渲染器、时钟和交互状态集中在一处
struct App {
    window: Arc<Window>,
    scene: Scene,
    camera: OrbitCamera,
    renderer: SceneRenderer,
    music: MusicHandle,
    config: ViewerConfig,

    /// 资源门放行后才创建，动画时间从那一刻起算
    clock: Option<FrameClock>,
    /// 背景图加载结果的单次接收端；消费后置 None
    background_rx:
        Option<crossbeam_channel::Receiver<crate::core::error::AssetResult<assets::BackgroundImage>>>,

    /// 首次手势只消费一次
    interacted: bool,
    dragging: bool,
    last_cursor: Option<(f64, f64)>,
}

impl App {
    fn handle_window_event(&mut self, event: &WindowEvent, elwt: &EventLoopWindowTarget<()>) {
        match event {
            WindowEvent::CloseRequested => elwt.exit(),
            WindowEvent::Resized(size) => {
                self.camera.set_viewport(size.width, size.height);
                self.renderer.resize(size.width, size.height);
            }
            WindowEvent::CursorMoved { position, .. } => {
                if let Some((last_x, last_y)) = self.last_cursor {
                    if self.dragging {
                        let dx = (position.x - last_x) as f32;
                        let dy = (position.y - last_y) as f32;
                        self.camera.rotate(dx, dy);
                    }
                }
                self.last_cursor = Some((position.x, position.y));
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if *button == MouseButton::Left {
                    match state {
                        ElementState::Pressed => {
                            self.dragging = true;
                            self.first_gesture();
                        }
                        ElementState::Released => self.dragging = false,
                    }
                }
            }
            WindowEvent::Touch(touch) => {
                if touch.phase == TouchPhase::Started {
                    self.first_gesture();
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let dy = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(p) => p.y as f32 / 50.0,
                };
                self.camera.dolly(dy);
            }
            WindowEvent::RedrawRequested => self.frame(),
            _ => {}
        }
    }

    /// 首个指针按下或触摸手势解锁音乐播放，逻辑上只消费一次
    fn first_gesture(&mut self) {
        if self.interacted {
            return;
        }
        self.interacted = true;
        if self.config.audio.enabled {
            self.music
                .play(&self.config.assets.music, self.config.audio.volume, true);
        }
    }

    /// 每帧推进
    ///
    /// 背景图加载结果到达前不推进动画；成功安装背景，失败记日志后
    /// 无背景继续，两种情况都放行动画。
    fn frame(&mut self) {
        if let Some(rx) = &self.background_rx {
            match rx.try_recv() {
                Ok(Ok(image)) => {
                    tracing::info!(
                        target: "viewer",
                        "Background installed ({}x{})",
                        image.width,
                        image.height
                    );
                    self.renderer.set_background(&image);
                }
                Ok(Err(_)) => {
                    // 加载线程已记录具体原因
                    tracing::warn!(target: "viewer", "Starting without background image");
                }
                Err(crossbeam_channel::TryRecvError::Empty) => return,
                Err(crossbeam_channel::TryRecvError::Disconnected) => {
                    tracing::warn!(target: "viewer", "Background loader vanished");
                }
            }
            self.background_rx = None;
            self.clock = Some(FrameClock::new());
        }

        let Some(clock) = &self.clock else {
            return;
        };
        let elapsed = clock.elapsed_seconds();

        self.camera.update();
        self.scene.tick(elapsed);
        if let Err(e) = self.renderer.render(&mut self.scene, &self.camera) {
            tracing::warn!(target: "viewer", "Frame render failed: {}", e);
        }
    }
}
