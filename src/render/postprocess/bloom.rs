//! Bloom（辉光）后处理效果
//!
//! 亮度提取 + 双向高斯模糊 + 与原场景叠加合成，三条管线各占一个
//! 全屏通道。粒子场景分辨率固定且目标只有两张中间纹理，不做
//! mip 降采样链。
//!
//! ## 通道流程
//! 1. 亮度提取：场景中高于阈值的区域写入 bright 纹理
//! 2. 水平模糊：bright -> temp
//! 3. 垂直模糊：temp -> bright
//! 4. 合成：场景 + bright * 强度，写入交换链表面

use crate::config::BloomConfig;

/// Bloom 通道 Uniform 数据
#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct BloomUniforms {
    /// 纹理尺寸 (width, height)
    pub texture_size: [f32; 2],
    /// 模糊方向 (1,0) 水平 或 (0,1) 垂直
    pub direction: [f32; 2],
    /// 亮度阈值
    pub threshold: f32,
    /// Bloom 强度
    pub intensity: f32,
    /// 模糊半径
    pub radius: f32,
    pub _pad: f32,
}

/// 中间纹理格式
const BLOOM_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba16Float;

/// Bloom 渲染通道
pub struct BloomPass {
    /// 亮度提取管线
    threshold_pipeline: wgpu::RenderPipeline,
    /// 模糊管线
    blur_pipeline: wgpu::RenderPipeline,
    /// 合成管线
    composite_pipeline: wgpu::RenderPipeline,

    /// 单输入通道绑定组布局（提取、模糊）
    single_bgl: wgpu::BindGroupLayout,
    /// 合成通道绑定组布局（场景 + 辉光双纹理）
    composite_bgl: wgpu::BindGroupLayout,

    /// 亮区纹理
    bright_view: wgpu::TextureView,
    /// 模糊中间纹理
    temp_view: wgpu::TextureView,

    sampler: wgpu::Sampler,

    /// 每个通道各一个 uniform 缓冲，帧内互不覆盖
    threshold_uniforms: wgpu::Buffer,
    blur_h_uniforms: wgpu::Buffer,
    blur_v_uniforms: wgpu::Buffer,
    composite_uniforms: wgpu::Buffer,

    settings: BloomConfig,
    width: u32,
    height: u32,
}

impl BloomPass {
    /// 创建 Bloom 通道
    ///
    /// `surface_format` 是合成目标（交换链表面）的格式。
    pub fn new(
        device: &wgpu::Device,
        width: u32,
        height: u32,
        surface_format: wgpu::TextureFormat,
        settings: &BloomConfig,
    ) -> Self {
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Bloom Sampler"),
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            ..Default::default()
        });

        let single_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Bloom Single BGL"),
            entries: &[
                texture_entry(0),
                sampler_entry(1),
                uniform_entry(2),
            ],
        });
        let composite_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Bloom Composite BGL"),
            entries: &[
                texture_entry(0),
                texture_entry(1),
                sampler_entry(2),
                uniform_entry(3),
            ],
        });

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Bloom Shader"),
            source: wgpu::ShaderSource::Wgsl(BLOOM_SHADER.into()),
        });

        let single_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Bloom Pipeline Layout"),
            bind_group_layouts: &[&single_bgl],
            push_constant_ranges: &[],
        });
        let composite_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Bloom Composite Layout"),
            bind_group_layouts: &[&composite_bgl],
            push_constant_ranges: &[],
        });

        let composite_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Bloom Composite Shader"),
            source: wgpu::ShaderSource::Wgsl(COMPOSITE_SHADER.into()),
        });

        let threshold_pipeline = create_pipeline(
            device,
            &single_layout,
            &shader,
            "fs_threshold",
            BLOOM_FORMAT,
        );
        let blur_pipeline =
            create_pipeline(device, &single_layout, &shader, "fs_blur", BLOOM_FORMAT);
        let composite_pipeline = create_pipeline(
            device,
            &composite_layout,
            &composite_shader,
            "fs_composite",
            surface_format,
        );

        let bright_view = create_target(device, width, height, "Bloom Bright");
        let temp_view = create_target(device, width, height, "Bloom Temp");

        let make_uniforms = |label: &str| {
            device.create_buffer(&wgpu::BufferDescriptor {
                label: Some(label),
                size: std::mem::size_of::<BloomUniforms>() as u64,
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            })
        };

        Self {
            threshold_pipeline,
            blur_pipeline,
            composite_pipeline,
            single_bgl,
            composite_bgl,
            bright_view,
            temp_view,
            sampler,
            threshold_uniforms: make_uniforms("Bloom Threshold UB"),
            blur_h_uniforms: make_uniforms("Bloom Blur H UB"),
            blur_v_uniforms: make_uniforms("Bloom Blur V UB"),
            composite_uniforms: make_uniforms("Bloom Composite UB"),
            settings: *settings,
            width,
            height,
        }
    }

    /// 当前目标尺寸
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// 调整大小：重建两张中间纹理
    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        if width == self.width && height == self.height {
            return;
        }
        self.width = width;
        self.height = height;
        self.bright_view = create_target(device, width, height, "Bloom Bright");
        self.temp_view = create_target(device, width, height, "Bloom Temp");
    }

    /// 执行 Bloom 链并把结果合成到 `target_view`
    pub fn render(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        scene_view: &wgpu::TextureView,
        target_view: &wgpu::TextureView,
    ) {
        let size = [self.width as f32, self.height as f32];
        let base = BloomUniforms {
            texture_size: size,
            direction: [0.0, 0.0],
            threshold: self.settings.threshold,
            intensity: self.settings.strength,
            radius: self.settings.radius,
            _pad: 0.0,
        };
        queue.write_buffer(&self.threshold_uniforms, 0, bytemuck::bytes_of(&base));
        queue.write_buffer(
            &self.blur_h_uniforms,
            0,
            bytemuck::bytes_of(&BloomUniforms {
                direction: [1.0, 0.0],
                ..base
            }),
        );
        queue.write_buffer(
            &self.blur_v_uniforms,
            0,
            bytemuck::bytes_of(&BloomUniforms {
                direction: [0.0, 1.0],
                ..base
            }),
        );
        queue.write_buffer(&self.composite_uniforms, 0, bytemuck::bytes_of(&base));

        // 1. 亮度提取：scene -> bright
        self.run_single_pass(
            encoder,
            device,
            &self.threshold_pipeline,
            scene_view,
            &self.bright_view,
            &self.threshold_uniforms,
            "Bloom Threshold Pass",
        );
        // 2. 水平模糊：bright -> temp
        self.run_single_pass(
            encoder,
            device,
            &self.blur_pipeline,
            &self.bright_view,
            &self.temp_view,
            &self.blur_h_uniforms,
            "Bloom Blur H Pass",
        );
        // 3. 垂直模糊：temp -> bright
        self.run_single_pass(
            encoder,
            device,
            &self.blur_pipeline,
            &self.temp_view,
            &self.bright_view,
            &self.blur_v_uniforms,
            "Bloom Blur V Pass",
        );

        // 4. 合成：scene + bright -> target
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Bloom Composite BG"),
            layout: &self.composite_bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(scene_view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&self.bright_view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: self.composite_uniforms.as_entire_binding(),
                },
            ],
        });
        let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Bloom Composite Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target_view,
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
        rpass.set_pipeline(&self.composite_pipeline);
        rpass.set_bind_group(0, &bind_group, &[]);
        rpass.draw(0..3, 0..1);
    }

    #[allow(clippy::too_many_arguments)]
    fn run_single_pass(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        device: &wgpu::Device,
        pipeline: &wgpu::RenderPipeline,
        input_view: &wgpu::TextureView,
        output_view: &wgpu::TextureView,
        uniforms: &wgpu::Buffer,
        label: &str,
    ) {
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout: &self.single_bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(input_view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&self.sampler),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: uniforms.as_entire_binding(),
                },
            ],
        });
        let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some(label),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: output_view,
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
        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, &bind_group, &[]);
        rpass.draw(0..3, 0..1);
    }
}

fn texture_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Texture {
            sample_type: wgpu::TextureSampleType::Float { filterable: true },
            view_dimension: wgpu::TextureViewDimension::D2,
            multisampled: false,
        },
        count: None,
    }
}

fn sampler_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
        count: None,
    }
}

fn uniform_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    }
}

fn create_target(
    device: &wgpu::Device,
    width: u32,
    height: u32,
    label: &str,
) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size: wgpu::Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: BLOOM_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
        view_formats: &[],
    });
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}

fn create_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    fs_entry: &str,
    format: wgpu::TextureFormat,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(&format!("Bloom {} Pipeline", fs_entry)),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: "vs_fullscreen",
            buffers: &[],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: fs_entry,
            targets: &[Some(wgpu::ColorTargetState {
                format,
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

/// Bloom 着色器
const BLOOM_SHADER: &str = r#"
struct BloomUniforms {
    texture_size: vec2<f32>,
    direction: vec2<f32>,
    threshold: f32,
    intensity: f32,
    radius: f32,
    _pad: f32,
};

@group(0) @binding(0) var input_texture: texture_2d<f32>;
@group(0) @binding(1) var input_sampler: sampler;
@group(0) @binding(2) var<uniform> uniforms: BloomUniforms;

struct VertexOutput {
    @builtin(position) position: vec4<f32>,
    @location(0) uv: vec2<f32>,
};

// 全屏三角形顶点着色器
@vertex
fn vs_fullscreen(@builtin(vertex_index) vertex_index: u32) -> VertexOutput {
    var out: VertexOutput;
    let x = f32((vertex_index << 1u) & 2u);
    let y = f32(vertex_index & 2u);
    out.position = vec4<f32>(x * 2.0 - 1.0, y * 2.0 - 1.0, 0.0, 1.0);
    out.uv = vec2<f32>(x, 1.0 - y);
    return out;
}

// 计算亮度
fn luminance(color: vec3<f32>) -> f32 {
    return dot(color, vec3<f32>(0.2126, 0.7152, 0.0722));
}

// 软阈值函数
fn soft_threshold(color: vec3<f32>, threshold: f32) -> vec3<f32> {
    let brightness = luminance(color);
    let soft = brightness - threshold + 0.1;
    let contribution = max(0.0, soft) / max(brightness, 0.0001);
    return color * contribution;
}

// 亮度提取片段着色器
@fragment
fn fs_threshold(in: VertexOutput) -> @location(0) vec4<f32> {
    let color = textureSample(input_texture, input_sampler, in.uv).rgb;
    let result = soft_threshold(color, uniforms.threshold);
    return vec4<f32>(result, 1.0);
}

// 高斯权重
fn gaussian_weight(offset: f32, sigma: f32) -> f32 {
    let sigma2 = sigma * sigma;
    return exp(-(offset * offset) / (2.0 * sigma2)) / (sqrt(2.0 * 3.14159265) * sigma);
}

// 9-tap 高斯模糊片段着色器
@fragment
fn fs_blur(in: VertexOutput) -> @location(0) vec4<f32> {
    let texel_size = 1.0 / uniforms.texture_size;
    let direction = uniforms.direction * texel_size;
    let sigma = uniforms.radius * 0.5 + 1.0;

    var color = vec3<f32>(0.0);
    var total_weight = 0.0;

    for (var i = -4; i <= 4; i++) {
        let offset = f32(i);
        let weight = gaussian_weight(offset, sigma);
        let sample_uv = in.uv + direction * offset;
        color += textureSample(input_texture, input_sampler, sample_uv).rgb * weight;
        total_weight += weight;
    }

    return vec4<f32>(color / total_weight, 1.0);
}
"#;

/// 合成着色器：场景 + 辉光
const COMPOSITE_SHADER: &str = r#"
struct BloomUniforms {
    texture_size: vec2<f32>,
    direction: vec2<f32>,
    threshold: f32,
    intensity: f32,
    radius: f32,
    _pad: f32,
};

@group(0) @binding(0) var scene_texture: texture_2d<f32>;
@group(0) @binding(1) var bloom_texture: texture_2d<f32>;
@group(0) @binding(2) var input_sampler: sampler;
@group(0) @binding(3) var<uniform> uniforms: BloomUniforms;

struct VertexOutput {
    @builtin(position) position: vec4<f32>,
    @location(0) uv: vec2<f32>,
};

@vertex
fn vs_fullscreen(@builtin(vertex_index) vertex_index: u32) -> VertexOutput {
    var out: VertexOutput;
    let x = f32((vertex_index << 1u) & 2u);
    let y = f32(vertex_index & 2u);
    out.position = vec4<f32>(x * 2.0 - 1.0, y * 2.0 - 1.0, 0.0, 1.0);
    out.uv = vec2<f32>(x, 1.0 - y);
    return out;
}

// 合成片段着色器
@fragment
fn fs_composite(in: VertexOutput) -> @location(0) vec4<f32> {
    let scene_color = textureSample(scene_texture, input_sampler, in.uv).rgb;
    let bloom_color = textureSample(bloom_texture, input_sampler, in.uv).rgb;
    let result = scene_color + bloom_color * uniforms.intensity;
    return vec4<f32>(result, 1.0);
}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniforms_are_gpu_aligned() {
        assert_eq!(std::mem::size_of::<BloomUniforms>(), 32);
    }
}
