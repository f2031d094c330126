//! wgpu-backed `FrameSurface`.
//!
//! `copy` only queues a textured quad; `present` turns the queue into one
//! vertex/index upload and one render pass, in submission order, then
//! presents the swapchain image. The four drawables are decoded and uploaded
//! once in `new`, so a missing image is a setup failure rather than a blank
//! sprite later.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use rsbs_core::assets::AssetLayout;
use rsbs_core::entity::{Layer, Rect};
use rsbs_core::surface::FrameSurface;
use wgpu::util::DeviceExt;
use winit::window::Window;

use crate::camera::ScreenCamera;
use crate::gpu_context::GpuContext;
use crate::sprite_pipeline::SpritePipeline;
use crate::texture::Texture;
use crate::vertex::{quad_indices, quad_vertices, SpriteVertex};

struct GpuSpriteTexture {
    _texture: Texture,
    bind_group: wgpu::BindGroup,
}

pub struct SpriteRenderer {
    window: Arc<Window>,
    gpu: GpuContext,
    pipeline: SpritePipeline,
    camera_bind_group: wgpu::BindGroup,
    textures: HashMap<Layer, GpuSpriteTexture>,
    queued: Vec<(Layer, Rect)>,
    skipped_frames: u64,
}

impl SpriteRenderer {
    pub fn new(
        window: Arc<Window>,
        logical_size: (u32, u32),
        asset_layout: AssetLayout,
        asset_root: Option<&Path>,
    ) -> Result<Self, String> {
        let gpu = GpuContext::new(window.clone())?;
        let pipeline = SpritePipeline::new(&gpu.device, gpu.surface_format);

        let camera = ScreenCamera::new(logical_size.0, logical_size.1);
        let camera_buffer = gpu
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Camera Uniform Buffer"),
                contents: bytemuck::cast_slice(&[camera.build_uniform()]),
                usage: wgpu::BufferUsages::UNIFORM,
            });
        let camera_bind_group = pipeline.create_camera_bind_group(&gpu.device, &camera_buffer);

        let mut textures = HashMap::new();
        for (layer, path) in asset_layout.all_paths(asset_root) {
            let texture = Texture::from_path(&gpu.device, &gpu.queue, &path)?;
            let bind_group = pipeline.create_texture_bind_group(&gpu.device, &texture);
            log::info!(
                "Loaded {:?} from '{}' ({}x{})",
                layer,
                path.display(),
                texture.size.0,
                texture.size.1
            );
            textures.insert(
                layer,
                GpuSpriteTexture {
                    _texture: texture,
                    bind_group,
                },
            );
        }

        Ok(Self {
            window,
            gpu,
            pipeline,
            camera_bind_group,
            textures,
            queued: Vec::new(),
            skipped_frames: 0,
        })
    }

    pub fn window(&self) -> &Arc<Window> {
        &self.window
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.gpu.resize(width, height);
    }

    pub fn skipped_frames(&self) -> u64 {
        self.skipped_frames
    }

    fn build_mesh(draws: &[(Layer, Rect)]) -> (Vec<SpriteVertex>, Vec<u32>) {
        let mut vertices = Vec::with_capacity(draws.len() * 4);
        let mut indices = Vec::with_capacity(draws.len() * 6);
        for (_, rect) in draws {
            indices.extend_from_slice(&quad_indices(vertices.len() as u32));
            vertices.extend_from_slice(&quad_vertices(*rect));
        }
        (vertices, indices)
    }
}

impl FrameSurface for SpriteRenderer {
    fn copy(&mut self, layer: Layer, dst: Rect) {
        self.queued.push((layer, dst));
    }

    fn present(&mut self) {
        let draws = std::mem::take(&mut self.queued);
        if self.gpu.size.0 == 0 || self.gpu.size.1 == 0 {
            self.skipped_frames += 1;
            return;
        }
        let Some((output, view)) = self.gpu.begin_frame() else {
            self.skipped_frames += 1;
            return;
        };

        let (vertices, indices) = Self::build_mesh(&draws);
        let buffers = (!draws.is_empty()).then(|| {
            let vertex_buffer =
                self.gpu
                    .device
                    .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                        label: Some("Sprite Vertex Buffer"),
                        contents: bytemuck::cast_slice(&vertices),
                        usage: wgpu::BufferUsages::VERTEX,
                    });
            let index_buffer =
                self.gpu
                    .device
                    .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                        label: Some("Sprite Index Buffer"),
                        contents: bytemuck::cast_slice(&indices),
                        usage: wgpu::BufferUsages::INDEX,
                    });
            (vertex_buffer, index_buffer)
        });

        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Sprite Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        // Overwritten by the background quad.
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                ..Default::default()
            });

            if let Some((vertex_buffer, index_buffer)) = &buffers {
                render_pass.set_pipeline(&self.pipeline.render_pipeline);
                render_pass.set_bind_group(0, &self.camera_bind_group, &[]);
                render_pass.set_vertex_buffer(0, vertex_buffer.slice(..));
                render_pass.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint32);

                for (i, (layer, _)) in draws.iter().enumerate() {
                    let Some(texture) = self.textures.get(layer) else {
                        log::warn!("No texture loaded for {:?}, skipping draw", layer);
                        continue;
                    };
                    let start = (i * 6) as u32;
                    render_pass.set_bind_group(1, &texture.bind_group, &[]);
                    render_pass.draw_indexed(start..start + 6, 0, 0..1);
                }
            }
        }

        self.gpu.queue.submit(std::iter::once(encoder.finish()));
        self.window.pre_present_notify();
        output.present();
    }
}
