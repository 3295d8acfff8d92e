use std::sync::Arc;
use wgpu::util::DeviceExt;
use winit::window::Window;

use crate::assets::BackgroundImage;
use crate::config::BloomConfig;
use crate::core::error::{RenderError, RenderResult};
use crate::particles::PointField;
use crate::render::camera::OrbitCamera;
use crate::render::postprocess::BloomPass;
use crate::scene::Scene;

/// 离屏场景目标格式，HDR 以便 bloom 提亮
const SCENE_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba16Float;

#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PointInstance {
    pub position: [f32; 3],
    pub size: f32,
    pub color: [f32; 3],
    pub _pad: f32,
}

#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct QuadVertex {
    pos: [f32; 2],
}

#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
struct FieldUniforms {
    view_proj: [[f32; 4]; 4],
    model: [[f32; 4]; 4],
    viewport: [f32; 2],
    time: f32,
    _pad: f32,
}

/// 单位四边形，实例化成公告牌粒子
const QUAD_VERTICES: [QuadVertex; 4] = [
    QuadVertex { pos: [-0.5, -0.5] },
    QuadVertex { pos: [0.5, -0.5] },
    QuadVertex { pos: [0.5, 0.5] },
    QuadVertex { pos: [-0.5, 0.5] },
];
const QUAD_INDICES: [u16; 6] = [0, 1, 2, 0, 2, 3];

/// 一个点场的 GPU 侧资源
struct FieldBatch {
    pipeline: wgpu::RenderPipeline,
    instance_buffer: wgpu::Buffer,
    instance_count: u32,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

pub struct SceneRenderer {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,

    scene_view: wgpu::TextureView,

    quad_vertex_buffer: wgpu::Buffer,
    quad_index_buffer: wgpu::Buffer,

    core: FieldBatch,
    disk: FieldBatch,

    background_pipeline: wgpu::RenderPipeline,
    background_bgl: wgpu::BindGroupLayout,
    background: Option<wgpu::BindGroup>,
    sampler: wgpu::Sampler,

    bloom: BloomPass,
}

impl SceneRenderer {
    pub async fn new(
        window: Arc<Window>,
        scene: &Scene,
        bloom_config: &BloomConfig,
    ) -> RenderResult<Self> {
        let size = window.inner_size();
        let instance = wgpu::Instance::default();
        let surface = instance
            .create_surface(window)
            .map_err(|e| RenderError::SurfaceCreation(e.to_string()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(RenderError::NoAdapter)?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| RenderError::DeviceRequest(e.to_string()))?;

        let caps = surface.get_capabilities(&adapter);
        let format = caps.formats[0];
        let present_mode = caps.present_modes[0];
        let alpha_mode = caps.alpha_modes[0];
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let scene_view = Self::create_scene_target(&device, config.width, config.height);

        let quad_vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Point Quad VB"),
            contents: bytemuck::cast_slice(&QUAD_VERTICES),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let quad_index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Point Quad IB"),
            contents: bytemuck::cast_slice(&QUAD_INDICES),
            usage: wgpu::BufferUsages::INDEX,
        });

        let field_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Field BGL"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let core = Self::create_field_batch(
            &device,
            &field_bgl,
            &scene.core,
            CORE_POINT_SHADER,
            "Core",
        );
        let disk = Self::create_field_batch(
            &device,
            &field_bgl,
            &scene.disk,
            DISK_POINT_SHADER,
            "Disk",
        );

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Background Sampler"),
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            ..Default::default()
        });

        let background_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Background BGL"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });
        let background_pipeline =
            Self::create_background_pipeline(&device, &background_bgl);

        let bloom = BloomPass::new(&device, config.width, config.height, format, bloom_config);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            scene_view,
            quad_vertex_buffer,
            quad_index_buffer,
            core,
            disk,
            background_pipeline,
            background_bgl,
            background: None,
            sampler,
            bloom,
        })
    }

    pub fn device(&self) -> &wgpu::Device {
        &self.device
    }

    pub fn config(&self) -> &wgpu::SurfaceConfiguration {
        &self.config
    }

    fn create_scene_target(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Scene HDR Target"),
            size: wgpu::Extent3d {
                width: width.max(1),
                height: height.max(1),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: SCENE_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });
        texture.create_view(&wgpu::TextureViewDescriptor::default())
    }

    fn build_instances(field: &PointField) -> Vec<PointInstance> {
        (0..field.count())
            .map(|i| PointInstance {
                position: [
                    field.positions[i * 3],
                    field.positions[i * 3 + 1],
                    field.positions[i * 3 + 2],
                ],
                size: field.sizes[i],
                color: [
                    field.colors[i * 3],
                    field.colors[i * 3 + 1],
                    field.colors[i * 3 + 2],
                ],
                _pad: 0.0,
            })
            .collect()
    }

    fn create_field_batch(
        device: &wgpu::Device,
        field_bgl: &wgpu::BindGroupLayout,
        field: &PointField,
        shader_src: &str,
        label: &str,
    ) -> FieldBatch {
        let instances = Self::build_instances(field);
        let instance_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Instance Buffer", label)),
            contents: bytemuck::cast_slice(&instances),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        });

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(&format!("{} Uniform Buffer", label)),
            size: std::mem::size_of::<FieldUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(&format!("{} BG", label)),
            layout: field_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(&format!("{} Shader", label)),
            source: wgpu::ShaderSource::Wgsl(shader_src.into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some(&format!("{} Pipeline Layout", label)),
            bind_group_layouts: &[field_bgl],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some(&format!("{} Pipeline", label)),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: "vs_point",
                buffers: &[
                    wgpu::VertexBufferLayout {
                        array_stride: std::mem::size_of::<QuadVertex>() as u64,
                        step_mode: wgpu::VertexStepMode::Vertex,
                        attributes: &wgpu::vertex_attr_array![0 => Float32x2],
                    },
                    wgpu::VertexBufferLayout {
                        array_stride: std::mem::size_of::<PointInstance>() as u64,
                        step_mode: wgpu::VertexStepMode::Instance,
                        attributes: &wgpu::vertex_attr_array![
                            1 => Float32x3,
                            2 => Float32,
                            3 => Float32x3,
                        ],
                    },
                ],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: "fs_point",
                targets: &[Some(wgpu::ColorTargetState {
                    format: SCENE_FORMAT,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                ..Default::default()
            },
            // 粒子半透明叠加，不写深度
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
        });

        FieldBatch {
            pipeline,
            instance_buffer,
            instance_count: field.count() as u32,
            uniform_buffer,
            bind_group,
        }
    }

    fn create_background_pipeline(
        device: &wgpu::Device,
        bgl: &wgpu::BindGroupLayout,
    ) -> wgpu::RenderPipeline {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Background Shader"),
            source: wgpu::ShaderSource::Wgsl(BACKGROUND_SHADER.into()),
        });
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Background Pipeline Layout"),
            bind_group_layouts: &[bgl],
            push_constant_ranges: &[],
        });
        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Background Pipeline"),
            layout: Some(&layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: "vs_fullscreen",
                buffers: &[],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: "fs_background",
                targets: &[Some(wgpu::ColorTargetState {
                    format: SCENE_FORMAT,
                    blend: None,
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
        })
    }

    /// 安装加载完成的背景星空图
    pub fn set_background(&mut self, image: &BackgroundImage) {
        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Background Texture"),
            size: wgpu::Extent3d {
                width: image.width,
                height: image.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        self.queue.write_texture(
            wgpu::ImageCopyTexture {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &image.pixels,
            wgpu::ImageDataLayout {
                offset: 0,
                bytes_per_row: Some(4 * image.width),
                rows_per_image: Some(image.height),
            },
            wgpu::Extent3d {
                width: image.width,
                height: image.height,
                depth_or_array_layers: 1,
            },
        );
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Background BG"),
            layout: &self.background_bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
            ],
        });
        self.background = Some(bind_group);
    }

    /// 视口尺寸变化：重配表面并重建离屏目标
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
        self.scene_view = Self::create_scene_target(&self.device, width, height);
        self.bloom.resize(&self.device, width, height);
    }

    /// 渲染一帧：背景 + 两个点场进离屏目标，随后 bloom 合成到表面
    pub fn render(&mut self, scene: &mut Scene, camera: &OrbitCamera) -> RenderResult<()> {
        // 抖动策略改写过缓冲区时重传实例数据
        if scene.core.take_dirty() {
            let instances = Self::build_instances(&scene.core);
            self.queue
                .write_buffer(&self.core.instance_buffer, 0, bytemuck::cast_slice(&instances));
        }
        if scene.disk.take_dirty() {
            let instances = Self::build_instances(&scene.disk);
            self.queue
                .write_buffer(&self.disk.instance_buffer, 0, bytemuck::cast_slice(&instances));
        }

        let view_proj = camera.view_projection_matrix().to_cols_array_2d();
        let viewport = [self.config.width as f32, self.config.height as f32];
        let core_uniforms = FieldUniforms {
            view_proj,
            model: glam::Mat4::from_rotation_z(scene.core_anim.rotation()).to_cols_array_2d(),
            viewport,
            time: scene.core_anim.time_uniform(),
            _pad: 0.0,
        };
        let disk_uniforms = FieldUniforms {
            view_proj,
            model: glam::Mat4::from_rotation_z(scene.disk_anim.rotation()).to_cols_array_2d(),
            viewport,
            time: scene.disk_anim.time_uniform(),
            _pad: 0.0,
        };
        self.queue
            .write_buffer(&self.core.uniform_buffer, 0, bytemuck::bytes_of(&core_uniforms));
        self.queue
            .write_buffer(&self.disk.uniform_buffer, 0, bytemuck::bytes_of(&disk_uniforms));

        let frame = match self.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost) | Err(wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.config);
                return Ok(());
            }
            Err(e) => return Err(RenderError::Surface(e.to_string())),
        };
        let frame_view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Frame Encoder"),
            });

        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &self.scene_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            if let Some(background) = &self.background {
                rpass.set_pipeline(&self.background_pipeline);
                rpass.set_bind_group(0, background, &[]);
                rpass.draw(0..3, 0..1);
            }

            for batch in [&self.core, &self.disk] {
                rpass.set_pipeline(&batch.pipeline);
                rpass.set_bind_group(0, &batch.bind_group, &[]);
                rpass.set_vertex_buffer(0, self.quad_vertex_buffer.slice(..));
                rpass.set_vertex_buffer(1, batch.instance_buffer.slice(..));
                rpass.set_index_buffer(self.quad_index_buffer.slice(..), wgpu::IndexFormat::Uint16);
                rpass.draw_indexed(0..QUAD_INDICES.len() as u32, 0, 0..batch.instance_count);
            }
        }

        self.bloom.render(
            &mut encoder,
            &self.device,
            &self.queue,
            &self.scene_view,
            &frame_view,
        );

        self.queue.submit(std::iter::once(encoder.finish()));
        frame.present();
        Ok(())
    }
}

/// 核心球壳的点着色器：圆形精灵，按模型空间 z 深度在白蓝之间过渡
const CORE_POINT_SHADER: &str = r#"
struct FieldUniforms {
    view_proj: mat4x4<f32>,
    model: mat4x4<f32>,
    viewport: vec2<f32>,
    time: f32,
    _pad: f32,
};
@group(0) @binding(0) var<uniform> u: FieldUniforms;

struct VsOut {
    @builtin(position) pos: vec4<f32>,
    @location(0) color: vec3<f32>,
    @location(1) corner: vec2<f32>,
    @location(2) model_z: f32,
};

@vertex
fn vs_point(
    @location(0) corner: vec2<f32>,
    @location(1) i_pos: vec3<f32>,
    @location(2) i_size: f32,
    @location(3) i_color: vec3<f32>,
) -> VsOut {
    var out: VsOut;
    var clip = u.view_proj * u.model * vec4<f32>(i_pos, 1.0);
    // 以像素为单位的公告牌扩张
    clip = vec4<f32>(clip.xy + corner * i_size / u.viewport * 2.0 * clip.w, clip.zw);
    out.pos = clip;
    out.color = i_color;
    out.corner = corner;
    out.model_z = i_pos.z;
    return out;
}

@fragment
fn fs_point(in: VsOut) -> @location(0) vec4<f32> {
    let dist = length(in.corner);
    if (dist > 0.5) {
        discard;
    }

    let blue = vec3<f32>(0.2, 0.2, 1.0);
    let white = vec3<f32>(1.0, 1.0, 1.0);

    let z_factor = smoothstep(0.0, 2.0, abs(in.model_z));
    let mixed = mix(white, blue, z_factor);

    let brightness = 1.6 + (1.0 - z_factor) * 0.3;
    return vec4<f32>(mixed * brightness, 1.0);
}
"#;

/// 星环的点着色器：顶点阶段按时间 uniform 做波浪位移，
/// 片元按到场景中心的距离在蓝白之间过渡
const DISK_POINT_SHADER: &str = r#"
struct FieldUniforms {
    view_proj: mat4x4<f32>,
    model: mat4x4<f32>,
    viewport: vec2<f32>,
    time: f32,
    _pad: f32,
};
@group(0) @binding(0) var<uniform> u: FieldUniforms;

struct VsOut {
    @builtin(position) pos: vec4<f32>,
    @location(0) color: vec3<f32>,
    @location(1) corner: vec2<f32>,
    @location(2) world_dist: f32,
};

@vertex
fn vs_point(
    @location(0) corner: vec2<f32>,
    @location(1) i_pos: vec3<f32>,
    @location(2) i_size: f32,
    @location(3) i_color: vec3<f32>,
) -> VsOut {
    var out: VsOut;
    let radius = length(i_pos.xy);
    let angle = atan2(i_pos.y, i_pos.x);

    // 与 CPU 参考实现 wave_displacement 相同的公式
    let wave = sin(radius * 2.0 - u.time * 5.0) * 0.7 + 0.5;
    let displacement = sin(angle * 3.0 + u.time * 2.0) * wave * 0.3;

    let pos = vec4<f32>(i_pos.xy, i_pos.z + displacement, 1.0);
    let world = (u.model * pos).xyz;
    var clip = u.view_proj * u.model * pos;
    clip = vec4<f32>(clip.xy + corner * i_size / u.viewport * 2.0 * clip.w, clip.zw);
    out.pos = clip;
    out.color = i_color;
    out.corner = corner;
    out.world_dist = length(world);
    return out;
}

@fragment
fn fs_point(in: VsOut) -> @location(0) vec4<f32> {
    let dist = length(in.corner);
    if (dist > 0.5) {
        discard;
    }

    let blue = vec3<f32>(0.2, 0.2, 1.0);
    let white = vec3<f32>(1.0, 1.0, 1.0);

    let center_factor = 1.0 - smoothstep(0.0, 6.0, in.world_dist);
    let mixed = mix(blue, white, center_factor);

    let brightness = 1.6 + center_factor * 0.3;
    return vec4<f32>(mixed * brightness, 1.0);
}
"#;

/// 背景星空：全屏三角形直接采样
const BACKGROUND_SHADER: &str = r#"
@group(0) @binding(0) var bg_texture: texture_2d<f32>;
@group(0) @binding(1) var bg_sampler: sampler;

struct VsOut {
    @builtin(position) pos: vec4<f32>,
    @location(0) uv: vec2<f32>,
};

@vertex
fn vs_fullscreen(@builtin(vertex_index) vertex_index: u32) -> VsOut {
    var out: VsOut;
    let x = f32((vertex_index << 1u) & 2u);
    let y = f32(vertex_index & 2u);
    out.pos = vec4<f32>(x * 2.0 - 1.0, y * 2.0 - 1.0, 0.0, 1.0);
    out.uv = vec2<f32>(x, 1.0 - y);
    return out;
}

@fragment
fn fs_background(in: VsOut) -> @location(0) vec4<f32> {
    return vec4<f32>(textureSample(bg_texture, bg_sampler, in.uv).rgb, 1.0);
}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instance_layout_is_gpu_aligned() {
        assert_eq!(std::mem::size_of::<PointInstance>(), 32);
        assert_eq!(std::mem::size_of::<FieldUniforms>() % 16, 0);
    }

    #[test]
    fn test_instances_mirror_field_buffers() {
        use crate::particles::{PointField, ShapePolicy};
        use rand::rngs::StdRng;
        use rand::SeedableRng;

        let mut rng = StdRng::seed_from_u64(9);
        let field = PointField::generate(8, &ShapePolicy::disk(), &mut rng);
        let instances = SceneRenderer::build_instances(&field);

        assert_eq!(instances.len(), 8);
        for (i, inst) in instances.iter().enumerate() {
            assert_eq!(inst.position[0], field.positions[i * 3]);
            assert_eq!(inst.position[2], field.positions[i * 3 + 2]);
            assert_eq!(inst.size, field.sizes[i]);
            assert_eq!(inst.color[1], field.colors[i * 3 + 1]);
        }
    }
}
