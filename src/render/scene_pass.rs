use crate::animation::Particle;
use crate::constants::PARTICLE_SIZE;
use crate::mesh::{MeshVertex, SphereMesh};
use crate::starfield::{Star, Starfield};
use wgpu::util::DeviceExt;

const ONE_PLUS_ONE: wgpu::BlendComponent = wgpu::BlendComponent {
    src_factor: wgpu::BlendFactor::One,
    dst_factor: wgpu::BlendFactor::One,
    operation: wgpu::BlendOperation::Add,
};

/// Glowing sprites add light on top of whatever is already in the HDR target.
const ADDITIVE: wgpu::BlendState = wgpu::BlendState {
    color: ONE_PLUS_ONE,
    alpha: ONE_PLUS_ONE,
};

// Star sizes are in drei-style "factor" units; this maps them to world units
// at the shell's distance.
const STAR_WORLD_SCALE: f32 = 0.08;

const MESH_ATTRS: [wgpu::VertexAttribute; 2] =
    wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];
const BILLBOARD_ATTRS: [wgpu::VertexAttribute; 2] =
    wgpu::vertex_attr_array![0 => Float32x4, 1 => Float32x4];

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct SceneUniforms {
    pub(crate) view_proj: [[f32; 4]; 4],
    pub(crate) model: [[f32; 4]; 4],
    pub(crate) orb_color: [f32; 4],
    /// x: time, y: distort, z: distort phase, w: star twinkle speed
    pub(crate) params: [f32; 4],
    pub(crate) camera: [f32; 4],
}

/// One camera-facing quad; `extra.y` selects star (1) or particle (0).
#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct BillboardInstance {
    pub(crate) pos_size: [f32; 4],
    pub(crate) extra: [f32; 4],
}

impl BillboardInstance {
    pub(crate) fn particle(p: &Particle) -> Self {
        Self {
            pos_size: [p.position.x, p.position.y, p.position.z, PARTICLE_SIZE],
            extra: [p.rotation.x, 0.0, 0.0, 0.0],
        }
    }

    pub(crate) fn star(s: &Star) -> Self {
        Self {
            pos_size: [
                s.position.x,
                s.position.y,
                s.position.z,
                s.size * STAR_WORLD_SCALE,
            ],
            extra: [s.twinkle_phase, 1.0, 0.0, 0.0],
        }
    }
}

pub(crate) struct SceneResources {
    pub(crate) uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    orb_pipeline: wgpu::RenderPipeline,
    billboard_pipeline: wgpu::RenderPipeline,
    orb_vertices: wgpu::Buffer,
    orb_indices: wgpu::Buffer,
    index_count: u32,
    pub(crate) particle_buffer: wgpu::Buffer,
    particle_capacity: u32,
    pub(crate) particle_count: u32,
    star_buffer: Option<wgpu::Buffer>,
    star_count: u32,
}

fn billboard_buffer(device: &wgpu::Device, label: &str, capacity: u32) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some(label),
        size: (capacity.max(1) as u64) * std::mem::size_of::<BillboardInstance>() as u64,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

impl SceneResources {
    /// Grow the particle instance buffer to hold at least `count` particles.
    pub(crate) fn ensure_particle_capacity(&mut self, device: &wgpu::Device, count: u32) {
        if count > self.particle_capacity {
            self.particle_buffer = billboard_buffer(device, "particle_instances", count);
            self.particle_capacity = count;
        }
    }

    /// Upload the starfield once; it never changes afterwards.
    pub(crate) fn ensure_stars(&mut self, device: &wgpu::Device, stars: &Starfield) {
        if self.star_buffer.is_some() || stars.is_empty() {
            return;
        }
        let instances: Vec<BillboardInstance> =
            stars.stars.iter().map(BillboardInstance::star).collect();
        self.star_buffer = Some(
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("star_instances"),
                contents: bytemuck::cast_slice(&instances),
                usage: wgpu::BufferUsages::VERTEX,
            }),
        );
        self.star_count = instances.len() as u32;
    }
}

pub(crate) fn create_scene_resources(
    device: &wgpu::Device,
    hdr_format: wgpu::TextureFormat,
    mesh: &SphereMesh,
) -> SceneResources {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("scene_shader"),
        source: wgpu::ShaderSource::Wgsl(super::SCENE_WGSL.into()),
    });
    let bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("scene_bgl"),
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
    let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("scene_pl"),
        bind_group_layouts: &[&bgl],
        push_constant_ranges: &[],
    });

    let orb_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("orb_pipeline"),
        layout: Some(&pl),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_orb"),
            buffers: &[wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<MeshVertex>() as u64,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &MESH_ATTRS,
            }],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState {
            cull_mode: Some(wgpu::Face::Back),
            ..Default::default()
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_orb"),
            targets: &[Some(wgpu::ColorTargetState {
                format: hdr_format,
                blend: Some(wgpu::BlendState::REPLACE),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        cache: None,
        multiview: None,
    });

    let billboard_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("billboard_pipeline"),
        layout: Some(&pl),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_billboard"),
            buffers: &[wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<BillboardInstance>() as u64,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &BILLBOARD_ATTRS,
            }],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        primitive: wgpu::PrimitiveState::default(),
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_billboard"),
            targets: &[Some(wgpu::ColorTargetState {
                format: hdr_format,
                blend: Some(ADDITIVE),
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

    let orb_vertices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("orb_vertices"),
        contents: bytemuck::cast_slice(&mesh.vertices),
        usage: wgpu::BufferUsages::VERTEX,
    });
    let orb_indices = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("orb_indices"),
        contents: bytemuck::cast_slice(&mesh.indices),
        usage: wgpu::BufferUsages::INDEX,
    });

    let particle_capacity = crate::constants::PARTICLE_COUNT as u32;
    SceneResources {
        uniform_buffer,
        bind_group,
        orb_pipeline,
        billboard_pipeline,
        orb_vertices,
        orb_indices,
        index_count: mesh.indices.len() as u32,
        particle_buffer: billboard_buffer(device, "particle_instances", particle_capacity),
        particle_capacity,
        particle_count: 0,
        star_buffer: None,
        star_count: 0,
    }
}

/// Stars first, then the orb, then particles glowing on top.
pub(crate) fn draw(
    encoder: &mut wgpu::CommandEncoder,
    res: &SceneResources,
    target: &wgpu::TextureView,
    clear: wgpu::Color,
) {
    let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some("scene_pass"),
        color_attachments: &[Some(wgpu::RenderPassColorAttachment {
            view: target,
            resolve_target: None,
            ops: wgpu::Operations {
                load: wgpu::LoadOp::Clear(clear),
                store: wgpu::StoreOp::Store,
            },
        })],
        depth_stencil_attachment: None,
        timestamp_writes: None,
        occlusion_query_set: None,
    });
    rpass.set_bind_group(0, &res.bind_group, &[]);

    if let Some(stars) = &res.star_buffer {
        rpass.set_pipeline(&res.billboard_pipeline);
        rpass.set_vertex_buffer(0, stars.slice(..));
        rpass.draw(0..6, 0..res.star_count);
    }

    rpass.set_pipeline(&res.orb_pipeline);
    rpass.set_vertex_buffer(0, res.orb_vertices.slice(..));
    rpass.set_index_buffer(res.orb_indices.slice(..), wgpu::IndexFormat::Uint32);
    rpass.draw_indexed(0..res.index_count, 0, 0..1);

    if res.particle_count > 0 {
        rpass.set_pipeline(&res.billboard_pipeline);
        rpass.set_vertex_buffer(0, res.particle_buffer.slice(..));
        rpass.draw(0..6, 0..res.particle_count);
    }
}
