//! 轨道相机
//!
//! 绕原点的球面轨道相机：指针拖拽改变偏航/俯仰，滚轮推拉距离，
//! 带惯性阻尼。矩阵在参数变化时重算并缓存。

use glam::{Mat4, Vec3};

/// 垂直视场角（度）
const FOV_Y_DEGREES: f32 = 75.0;
/// 近裁剪面
const NEAR: f32 = 0.1;
/// 远裁剪面
const FAR: f32 = 1000.0;
/// 初始相机距离
const DEFAULT_DISTANCE: f32 = 10.0;
/// 拖拽一个像素对应的弧度
const ROTATE_SPEED: f32 = 0.005;
/// 每帧速度衰减比例
const DAMPING: f32 = 0.05;
/// 距离下限
const MIN_DISTANCE: f32 = 2.0;
/// 距离上限
const MAX_DISTANCE: f32 = 60.0;
/// 俯仰角限幅，避免翻越极点
const MAX_PITCH: f32 = 1.5;

/// 带惯性阻尼的轨道相机
pub struct OrbitCamera {
    aspect: f32,
    yaw: f32,
    pitch: f32,
    distance: f32,
    yaw_velocity: f32,
    pitch_velocity: f32,
    target: Vec3,

    // 缓存矩阵
    view: Mat4,
    projection: Mat4,
    position: Vec3,
}

impl OrbitCamera {
    /// 创建相机，初始位于 (0, 0, 10) 望向原点
    pub fn new(aspect: f32) -> Self {
        let mut camera = Self {
            aspect,
            yaw: 0.0,
            pitch: 0.0,
            distance: DEFAULT_DISTANCE,
            yaw_velocity: 0.0,
            pitch_velocity: 0.0,
            target: Vec3::ZERO,
            view: Mat4::IDENTITY,
            projection: Mat4::IDENTITY,
            position: Vec3::ZERO,
        };
        camera.update_matrices();
        camera
    }

    /// 视口尺寸变化时更新纵横比
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if height == 0 {
            return;
        }
        self.aspect = width as f32 / height as f32;
        self.update_matrices();
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// 拖拽增量（像素）转为轨道角速度
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.yaw_velocity += dx * ROTATE_SPEED;
        self.pitch_velocity += dy * ROTATE_SPEED;
    }

    /// 滚轮推拉，正增量拉近
    pub fn dolly(&mut self, delta: f32) {
        self.distance = (self.distance * (1.0 - delta * 0.1)).clamp(MIN_DISTANCE, MAX_DISTANCE);
        self.update_matrices();
    }

    /// 每帧推进：应用角速度并做惯性衰减
    pub fn update(&mut self) {
        if self.yaw_velocity.abs() < 1e-6 && self.pitch_velocity.abs() < 1e-6 {
            return;
        }
        self.yaw += self.yaw_velocity;
        self.pitch = (self.pitch + self.pitch_velocity).clamp(-MAX_PITCH, MAX_PITCH);
        self.yaw_velocity *= 1.0 - DAMPING;
        self.pitch_velocity *= 1.0 - DAMPING;
        self.update_matrices();
    }

    pub fn view_matrix(&self) -> Mat4 {
        self.view
    }

    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection * self.view
    }

    fn update_matrices(&mut self) {
        let dir = Vec3::new(
            self.pitch.cos() * self.yaw.sin(),
            self.pitch.sin(),
            self.pitch.cos() * self.yaw.cos(),
        );
        self.position = self.target + dir * self.distance;
        self.view = Mat4::look_at_rh(self.position, self.target, Vec3::Y);
        self.projection =
            Mat4::perspective_rh(FOV_Y_DEGREES.to_radians(), self.aspect, NEAR, FAR);
    }
}
