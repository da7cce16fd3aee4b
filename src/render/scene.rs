use super::helpers::{DEPTH_FORMAT, HDR_FORMAT};
use folio_core::constants::PODIUM_SEGMENTS;
use folio_core::geometry::{self, MeshData, Vertex};
use folio_core::lights::{LightKind, LightRig};
use folio_core::scene::{Instance, PrimitiveKind};
use glam::{Mat4, Vec3};
use std::ops::Range;
use wgpu::util::DeviceExt;

pub(crate) const MAX_LIGHTS: usize = 8;

const KINDS: [PrimitiveKind; 3] = [
    PrimitiveKind::Cuboid,
    PrimitiveKind::Cylinder,
    PrimitiveKind::Sphere,
];

#[repr(C)]
#[derive(Copy, Clone, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct LightPacked {
    position: [f32; 4],
    direction: [f32; 4],
    color: [f32; 4],
    params: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct SceneUniforms {
    view_proj: [[f32; 4]; 4],
    camera_pos: [f32; 4],
    ambient: [f32; 4],
    light_count: [u32; 4],
    lights: [LightPacked; MAX_LIGHTS],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct InstancePacked {
    model: [[f32; 4]; 4],
    color: [f32; 4],
    emissive: [f32; 4],
}

impl From<&Instance> for InstancePacked {
    fn from(i: &Instance) -> Self {
        Self {
            model: i.model.to_cols_array_2d(),
            color: i.color.to_array(),
            emissive: i.emissive.to_array(),
        }
    }
}

/// Ambient term and packed lights; built once, the rig does not move.
pub(crate) struct LightBlock {
    ambient: [f32; 4],
    count: u32,
    lights: [LightPacked; MAX_LIGHTS],
}

impl LightBlock {
    pub(crate) fn from_rig(rig: &LightRig) -> Self {
        let ambient = match folio_core::scene::parse_hex_color(&rig.ambient_color) {
            Ok([r, g, b]) => {
                let k = rig.ambient_intensity;
                [r * k, g * k, b * k, 1.0]
            }
            Err(e) => {
                log::warn!("[render] ambient colour: {}", e);
                [0.0; 4]
            }
        };
        let mut lights = [LightPacked::default(); MAX_LIGHTS];
        let mut count = 0;
        for light in rig.lights.iter().take(MAX_LIGHTS) {
            let [r, g, b] = match light.rgb() {
                Ok(rgb) => rgb,
                Err(e) => {
                    log::warn!("[render] skipping light: {}", e);
                    continue;
                }
            };
            let spot = matches!(light.kind, LightKind::Spot);
            let inner = light.angle * (1.0 - light.penumbra.clamp(0.0, 1.0));
            let dir = light.direction();
            let p = light.position;
            let k = light.intensity;
            lights[count] = LightPacked {
                position: [p.x, p.y, p.z, if spot { 1.0 } else { 0.0 }],
                direction: [dir.x, dir.y, dir.z, light.angle.cos()],
                color: [r * k, g * k, b * k, light.distance],
                params: [inner.cos(), 0.0, 0.0, 0.0],
            };
            count += 1;
        }
        Self {
            ambient,
            count: count as u32,
            lights,
        }
    }
}

struct GpuMesh {
    vertices: wgpu::Buffer,
    indices: wgpu::Buffer,
    index_count: u32,
}

impl GpuMesh {
    fn upload(device: &wgpu::Device, label: &str, mesh: &MeshData) -> Self {
        let vertices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&mesh.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let indices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(label),
            contents: bytemuck::cast_slice(&mesh.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self {
            vertices,
            indices,
            index_count: mesh.indices.len() as u32,
        }
    }
}

/// Instanced primitives into the HDR target with depth.
pub(crate) struct ScenePipeline {
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    meshes: [GpuMesh; 3],
    instance_buffer: wgpu::Buffer,
    instance_capacity: usize,
    // Per mesh family, in KINDS order.
    ranges: [Range<u32>; 3],
    lights: LightBlock,
    staging: Vec<InstancePacked>,
}

fn instance_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("scene_instances"),
        size: (capacity.max(1) * std::mem::size_of::<InstancePacked>()) as u64,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

impl ScenePipeline {
    pub(crate) fn new(device: &wgpu::Device, rig: &LightRig) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("scene_shader"),
            source: wgpu::ShaderSource::Wgsl(folio_core::SCENE_WGSL.into()),
        });
        let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("scene_bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("scene_pl"),
            bind_group_layouts: &[&bgl],
            push_constant_ranges: &[],
        });
        let vertex_attrs = wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];
        let instance_attrs = wgpu::vertex_attr_array![
            2 => Float32x4, 3 => Float32x4, 4 => Float32x4, 5 => Float32x4,
            6 => Float32x4, 7 => Float32x4
        ];
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("scene_pipeline"),
            layout: Some(&pl),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[
                    wgpu::VertexBufferLayout {
                        array_stride: std::mem::size_of::<Vertex>() as u64,
                        step_mode: wgpu::VertexStepMode::Vertex,
                        attributes: &vertex_attrs,
                    },
                    wgpu::VertexBufferLayout {
                        array_stride: std::mem::size_of::<InstancePacked>() as u64,
                        step_mode: wgpu::VertexStepMode::Instance,
                        attributes: &instance_attrs,
                    },
                ],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: HDR_FORMAT,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            cache: None,
            multiview: None,
        });
        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("scene_uniforms"),
            size: std::mem::size_of::<SceneUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("scene_bg"),
            layout: &bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });
        let meshes = [
            GpuMesh::upload(device, "mesh_cuboid", &geometry::unit_cuboid()),
            GpuMesh::upload(device, "mesh_cylinder", &geometry::unit_cylinder(PODIUM_SEGMENTS)),
            GpuMesh::upload(device, "mesh_sphere", &geometry::unit_sphere(24, 32)),
        ];
        let instance_capacity = 1024;
        Self {
            pipeline,
            uniform_buffer,
            bind_group,
            meshes,
            instance_buffer: instance_buffer(device, instance_capacity),
            instance_capacity,
            ranges: [0..0, 0..0, 0..0],
            lights: LightBlock::from_rig(rig),
            staging: Vec::with_capacity(instance_capacity),
        }
    }

    pub(crate) fn write_uniforms(&self, queue: &wgpu::Queue, view_proj: Mat4, camera_pos: Vec3) {
        let u = SceneUniforms {
            view_proj: view_proj.to_cols_array_2d(),
            camera_pos: camera_pos.extend(1.0).to_array(),
            ambient: self.lights.ambient,
            light_count: [self.lights.count, 0, 0, 0],
            lights: self.lights.lights,
        };
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&u));
    }

    /// Group instances by mesh family and upload, growing the buffer if needed.
    pub(crate) fn write_instances(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        groups: &[&[Instance]],
    ) {
        self.staging.clear();
        for (slot, kind) in KINDS.iter().enumerate() {
            let start = self.staging.len() as u32;
            for group in groups {
                self.staging
                    .extend(group.iter().filter(|i| i.kind == *kind).map(InstancePacked::from));
            }
            self.ranges[slot] = start..self.staging.len() as u32;
        }
        if self.staging.len() > self.instance_capacity {
            self.instance_capacity = self.staging.len().next_power_of_two();
            self.instance_buffer = instance_buffer(device, self.instance_capacity);
            log::info!("[render] instance buffer grown to {}", self.instance_capacity);
        }
        if !self.staging.is_empty() {
            queue.write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(&self.staging));
        }
    }

    pub(crate) fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.bind_group, &[]);
        pass.set_vertex_buffer(1, self.instance_buffer.slice(..));
        for (mesh, range) in self.meshes.iter().zip(self.ranges.iter()) {
            if range.is_empty() {
                continue;
            }
            pass.set_vertex_buffer(0, mesh.vertices.slice(..));
            pass.set_index_buffer(mesh.indices.slice(..), wgpu::IndexFormat::Uint16);
            pass.draw_indexed(0..mesh.index_count, 0, range.clone());
        }
    }
}
