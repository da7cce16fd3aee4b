use super::helpers::{self, HDR_FORMAT};
use super::targets::RenderTargets;
use folio_core::constants::{
    BLOOM_INTENSITY, BLOOM_RADIUS, BLOOM_THRESHOLD, NOISE_OPACITY, VIGNETTE_DARKNESS,
    VIGNETTE_OFFSET,
};

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct PostUniforms {
    resolution: [f32; 2],
    blur_dir: [f32; 2],
    time: f32,
    threshold: f32,
    intensity: f32,
    radius: f32,
    vignette_offset: f32,
    vignette_darkness: f32,
    noise_opacity: f32,
    _pad: f32,
}

impl PostUniforms {
    fn new(resolution: [f32; 2], blur_dir: [f32; 2], time: f32) -> Self {
        Self {
            resolution,
            blur_dir,
            time,
            threshold: BLOOM_THRESHOLD,
            intensity: BLOOM_INTENSITY,
            radius: BLOOM_RADIUS,
            vignette_offset: VIGNETTE_OFFSET,
            vignette_darkness: VIGNETTE_DARKNESS,
            noise_opacity: NOISE_OPACITY,
            _pad: 0.0,
        }
    }
}

struct BindGroups {
    hdr: wgpu::BindGroup,
    from_bloom_a: wgpu::BindGroup,
    from_bloom_b: wgpu::BindGroup,
    bloom_a_only: wgpu::BindGroup,
}

/// Bright pass, separable blur and composite.
///
/// Each pass reads its own uniform buffer: queue writes land before the
/// encoder runs, so one shared buffer would leave every pass with the last
/// value written.
pub(crate) struct PostResources {
    bgl0: wgpu::BindGroupLayout, // tex+sampler+uniform
    bgl1: wgpu::BindGroupLayout, // tex+sampler
    sampler: wgpu::Sampler,
    main_uniforms: wgpu::Buffer,
    blur_h_uniforms: wgpu::Buffer,
    blur_v_uniforms: wgpu::Buffer,
    bright_pipeline: wgpu::RenderPipeline,
    blur_pipeline: wgpu::RenderPipeline,
    composite_pipeline: wgpu::RenderPipeline,
    groups: BindGroups,
}

fn texture_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Texture {
            multisampled: false,
            view_dimension: wgpu::TextureViewDimension::D2,
            sample_type: wgpu::TextureSampleType::Float { filterable: true },
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

fn uniform_buffer(device: &wgpu::Device, label: &str) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(label),
        size: std::mem::size_of::<PostUniforms>() as u64,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

impl PostResources {
    pub(crate) fn new(
        device: &wgpu::Device,
        swap_format: wgpu::TextureFormat,
        targets: &RenderTargets,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("post_shader"),
            source: wgpu::ShaderSource::Wgsl(folio_core::POST_WGSL.into()),
        });
        let bgl0 = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("post_bgl0"),
            entries: &[
                texture_entry(0),
                sampler_entry(1),
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
        });
        let bgl1 = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("post_bgl1"),
            entries: &[texture_entry(0), sampler_entry(1)],
        });
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("linear_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });
        let main_uniforms = uniform_buffer(device, "post_uniforms_main");
        let blur_h_uniforms = uniform_buffer(device, "post_uniforms_blur_h");
        let blur_v_uniforms = uniform_buffer(device, "post_uniforms_blur_v");

        let pl_bright_blur = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pl_post_0"),
            bind_group_layouts: &[&bgl0],
            push_constant_ranges: &[],
        });
        let pl_composite = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("pl_post_comp"),
            bind_group_layouts: &[&bgl0, &bgl1],
            push_constant_ranges: &[],
        });
        let bright_pipeline = helpers::make_post_pipeline(
            device,
            &pl_bright_blur,
            &shader,
            "fs_bright",
            HDR_FORMAT,
            None,
        );
        let blur_pipeline = helpers::make_post_pipeline(
            device,
            &pl_bright_blur,
            &shader,
            "fs_blur",
            HDR_FORMAT,
            None,
        );
        let composite_pipeline = helpers::make_post_pipeline(
            device,
            &pl_composite,
            &shader,
            "fs_composite",
            swap_format,
            Some(wgpu::BlendState::REPLACE),
        );

        let groups = build_groups(
            device,
            &bgl0,
            &bgl1,
            &sampler,
            [&main_uniforms, &blur_h_uniforms, &blur_v_uniforms],
            targets,
        );
        Self {
            bgl0,
            bgl1,
            sampler,
            main_uniforms,
            blur_h_uniforms,
            blur_v_uniforms,
            bright_pipeline,
            blur_pipeline,
            composite_pipeline,
            groups,
        }
    }

    /// Bind groups reference target views; rebuild after the targets change.
    pub(crate) fn rebuild_bind_groups(&mut self, device: &wgpu::Device, targets: &RenderTargets) {
        self.groups = build_groups(
            device,
            &self.bgl0,
            &self.bgl1,
            &self.sampler,
            [&self.main_uniforms, &self.blur_h_uniforms, &self.blur_v_uniforms],
            targets,
        );
    }

    pub(crate) fn write_uniforms(&self, queue: &wgpu::Queue, width: u32, height: u32, time: f32) {
        let (bw, bh) = super::targets::bloom_size(width, height);
        let full = [width as f32, height as f32];
        let half = [bw as f32, bh as f32];
        let main = PostUniforms::new(full, [0.0, 0.0], time);
        let blur_h = PostUniforms::new(half, [1.0, 0.0], time);
        let blur_v = PostUniforms::new(half, [0.0, 1.0], time);
        queue.write_buffer(&self.main_uniforms, 0, bytemuck::bytes_of(&main));
        queue.write_buffer(&self.blur_h_uniforms, 0, bytemuck::bytes_of(&blur_h));
        queue.write_buffer(&self.blur_v_uniforms, 0, bytemuck::bytes_of(&blur_v));
    }

    /// HDR scene -> bloom_a (bright) -> bloom_b (blur h) -> bloom_a (blur v)
    /// -> swapchain (composite).
    pub(crate) fn encode(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        targets: &RenderTargets,
        output: &wgpu::TextureView,
    ) {
        let g = &self.groups;
        blit(encoder, "bright_pass", &targets.bloom_a_view, &self.bright_pipeline, &g.hdr, None);
        blit(encoder, "blur_h", &targets.bloom_b_view, &self.blur_pipeline, &g.from_bloom_a, None);
        blit(encoder, "blur_v", &targets.bloom_a_view, &self.blur_pipeline, &g.from_bloom_b, None);
        blit(
            encoder,
            "composite",
            output,
            &self.composite_pipeline,
            &g.hdr,
            Some(&g.bloom_a_only),
        );
    }
}

fn build_groups(
    device: &wgpu::Device,
    bgl0: &wgpu::BindGroupLayout,
    bgl1: &wgpu::BindGroupLayout,
    sampler: &wgpu::Sampler,
    [main, blur_h, blur_v]: [&wgpu::Buffer; 3],
    targets: &RenderTargets,
) -> BindGroups {
    let with_uniforms = |label: &str, view: &wgpu::TextureView, buf: &wgpu::Buffer| {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some(label),
            layout: bgl0,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: buf.as_entire_binding(),
                },
            ],
        })
    };
    let bloom_a_only = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("bg_bloom_a_only"),
        layout: bgl1,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&targets.bloom_a_view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
        ],
    });
    BindGroups {
        hdr: with_uniforms("bg_hdr", &targets.hdr_view, main),
        from_bloom_a: with_uniforms("bg_from_bloom_a", &targets.bloom_a_view, blur_h),
        from_bloom_b: with_uniforms("bg_from_bloom_b", &targets.bloom_b_view, blur_v),
        bloom_a_only,
    }
}

fn blit(
    encoder: &mut wgpu::CommandEncoder,
    label: &str,
    target: &wgpu::TextureView,
    pipeline: &wgpu::RenderPipeline,
    bg0: &wgpu::BindGroup,
    bg1: Option<&wgpu::BindGroup>,
) {
    let mut r = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some(label),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view: target,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                store: wgpu::StoreOp::Store,
            },
        })],
        depth_stencil_attachment: None,
        timestamp_writes: None,
        occlusion_query_set: None,
    });
    r.set_pipeline(pipeline);
    r.set_bind_group(0, bg0, &[]);
    if let Some(g1) = bg1 {
        r.set_bind_group(1, g1, &[]);
    }
    r.draw(0..3, 0..1);
}
