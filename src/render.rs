use crate::constants::{
    BLOOM_STRENGTH, BLOOM_THRESHOLD, ORB_RADIUS, ORB_RINGS, ORB_SEGMENTS, STAR_TWINKLE_SPEED,
};
use crate::material::parse_hex_color;
use crate::mesh::SphereMesh;
use crate::picking::view_proj;
use crate::scene::Scene;
use glam::{EulerRot, Mat4, Quat, Vec3};
use web_sys as web;

mod post;
mod scene_pass;
mod targets;
use scene_pass::{BillboardInstance, SceneResources, SceneUniforms};
use targets::RenderTargets;

pub static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");
pub static POST_WGSL: &str = include_str!("../shaders/post.wgsl");

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub(crate) struct PostUniforms {
    resolution: [f32; 2],
    time: f32,
    ambient: f32,
    blur_dir: [f32; 2],
    bloom_strength: f32,
    threshold: f32,
}

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    scene: SceneResources,
    // Post-processing resources
    targets: RenderTargets,
    linear_sampler: wgpu::Sampler,
    post: post::PostResources,
    post_groups: post::PostBindGroups,

    width: u32,
    height: u32,
    clear_color: wgpu::Color,
    camera_z: f32,
    last_elapsed: f32,
    // Integrated so a speed change does not jump the wobble phase
    distort_phase: f32,
    orb_color: [f32; 3],
}

/// sRGB hex colour to the linear space of the HDR target.
fn linear_rgb(srgb: [f32; 3]) -> [f32; 3] {
    srgb.map(|c| c.powf(2.2))
}

impl<'a> GpuState<'a> {
    pub async fn new(canvas: web::HtmlCanvasElement, camera_z: f32) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let hdr_format = targets::HDR_FORMAT;
        let targets = RenderTargets::new(&device, width, height);

        let mesh = SphereMesh::uv(ORB_RADIUS, ORB_SEGMENTS, ORB_RINGS);
        let scene = scene_pass::create_scene_resources(&device, hdr_format, &mesh);

        let post_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("post_shader"),
            source: wgpu::ShaderSource::Wgsl(POST_WGSL.into()),
        });
        let linear_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("linear_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });
        let post = post::create_post_resources(&device, &post_shader, hdr_format, format);
        let post_groups = post::create_bind_groups(&device, &post, &linear_sampler, &targets);
        log::info!("[gpu] ready {}x{} format={:?}", width, height, format);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            scene,
            targets,
            linear_sampler,
            post,
            post_groups,
            width,
            height,
            clear_color: wgpu::Color {
                r: 0.01,
                g: 0.01,
                b: 0.02,
                a: 1.0,
            },
            camera_z,
            last_elapsed: 0.0,
            distort_phase: 0.0,
            orb_color: [1.0, 1.0, 1.0],
        })
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);

            self.targets.recreate(&self.device, width, height);
            self.post_groups = post::create_bind_groups(
                &self.device,
                &self.post,
                &self.linear_sampler,
                &self.targets,
            );
        }
    }

    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    fn write_scene(&mut self, scene: &Scene) {
        let elapsed = scene.elapsed_sec();
        let material = scene.material();
        let dt = (elapsed - self.last_elapsed).max(0.0);
        self.last_elapsed = elapsed;
        self.distort_phase += dt * material.speed;
        if let Some(rgb) = parse_hex_color(&material.color) {
            self.orb_color = linear_rgb(rgb);
        }

        let orb = &scene.orb;
        let model = Mat4::from_scale_rotation_translation(
            orb.scale,
            Quat::from_euler(EulerRot::XYZ, orb.rotation.x, orb.rotation.y, orb.rotation.z),
            Vec3::ZERO,
        );
        let vp = view_proj(self.width as f32, self.height as f32, self.camera_z);
        let u = SceneUniforms {
            view_proj: vp.to_cols_array_2d(),
            model: model.to_cols_array_2d(),
            orb_color: [self.orb_color[0], self.orb_color[1], self.orb_color[2], 1.0],
            params: [
                elapsed,
                material.distort,
                self.distort_phase,
                STAR_TWINKLE_SPEED,
            ],
            camera: [0.0, 0.0, self.camera_z, 0.0],
        };
        self.queue
            .write_buffer(&self.scene.uniform_buffer, 0, bytemuck::bytes_of(&u));

        let particles: Vec<BillboardInstance> = scene
            .particles
            .particles
            .iter()
            .map(BillboardInstance::particle)
            .collect();
        self.scene
            .ensure_particle_capacity(&self.device, particles.len() as u32);
        self.scene.particle_count = particles.len() as u32;
        if !particles.is_empty() {
            self.queue.write_buffer(
                &self.scene.particle_buffer,
                0,
                bytemuck::cast_slice(&particles),
            );
        }
        self.scene.ensure_stars(&self.device, &scene.stars);
    }

    pub fn render(&mut self, scene: &Scene) -> Result<(), wgpu::SurfaceError> {
        self.write_scene(scene);
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });

        // Pass 1: stars, orb and particles into HDR
        scene_pass::draw(
            &mut encoder,
            &self.scene,
            &self.targets.hdr_view,
            self.clear_color,
        );

        let time = scene.elapsed_sec();
        let res = [self.width as f32 / 2.0, self.height as f32 / 2.0];
        let uniforms = |blur_dir: [f32; 2]| PostUniforms {
            resolution: res,
            time,
            ambient: 0.0,
            blur_dir,
            bloom_strength: BLOOM_STRENGTH,
            threshold: BLOOM_THRESHOLD,
        };

        // Each pass gets its own uniform slot; one shared buffer would only
        // hold the last write by the time the encoder is submitted.
        post::write_post_uniforms(&self.queue, &self.post, post::Slot::Bright, uniforms([0.0, 0.0]));
        post::write_post_uniforms(&self.queue, &self.post, post::Slot::BlurH, uniforms([1.0, 0.0]));
        post::write_post_uniforms(&self.queue, &self.post, post::Slot::BlurV, uniforms([0.0, 1.0]));
        post::write_post_uniforms(
            &self.queue,
            &self.post,
            post::Slot::Composite,
            uniforms([0.0, 0.0]),
        );

        // Pass 2: bright pass -> bloom_a
        post::blit(
            &mut encoder,
            "bright_pass",
            &self.targets.bloom_a_view,
            wgpu::Color::BLACK,
            &self.post.bright_pipeline,
            &self.post_groups.bright,
            None,
        );
        // Pass 3: blur horizontal bloom_a -> bloom_b
        post::blit(
            &mut encoder,
            "blur_h",
            &self.targets.bloom_b_view,
            wgpu::Color::BLACK,
            &self.post.blur_pipeline,
            &self.post_groups.blur_h,
            None,
        );
        // Pass 4: blur vertical bloom_b -> bloom_a
        post::blit(
            &mut encoder,
            "blur_v",
            &self.targets.bloom_a_view,
            wgpu::Color::BLACK,
            &self.post.blur_pipeline,
            &self.post_groups.blur_v,
            None,
        );
        // Pass 5: composite to swapchain
        post::blit(
            &mut encoder,
            "composite",
            &view,
            self.clear_color,
            &self.post.composite_pipeline,
            &self.post_groups.composite,
            Some(&self.post_groups.bloom_a_only),
        );

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}
