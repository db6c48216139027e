use crate::RenderError;
use crate::shaders::{self, FRAGMENT_ENTRY, VERTEX_ENTRY};
use crate::texture::MapTexture;
use bytemuck::{Pod, Zeroable};
use noddy_core::{DrawTarget, Material, PlaneGeometry, Projection, Scene};
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub(crate) struct Uniforms {
    view_proj: [[f32; 4]; 4],
    model: [[f32; 4]; 4],
    time: f32,
    _pad: [f32; 3],
}

impl Uniforms {
    pub(crate) fn from_scene(scene: &Scene, projection: &Projection) -> Self {
        let surface = scene.surface();
        Self {
            view_proj: projection.view_projection().to_cols_array_2d(),
            model: surface.model_matrix().to_cols_array_2d(),
            time: surface.material.time(),
            _pad: [0.0; 3],
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
struct Vertex {
    position: [f32; 3],
    uv: [f32; 2],
}

fn plane_mesh(geometry: &PlaneGeometry) -> (Vec<Vertex>, Vec<u16>) {
    let vertices = geometry
        .vertices()
        .iter()
        .map(|v| Vertex {
            position: v.position,
            uv: v.uv,
        })
        .collect();
    (vertices, geometry.indices().to_vec())
}

/// wgpu renderer for the logo plane.
pub struct LogoRenderer {
    pipeline: wgpu::RenderPipeline,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
    map_texture: MapTexture,
}

impl LogoRenderer {
    /// Build the pipeline for the material's shader set and upload the map
    /// texture it references.
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        surface_format: wgpu::TextureFormat,
        material: &Material,
        geometry: &PlaneGeometry,
    ) -> Result<Self, RenderError> {
        let map_texture = MapTexture::load(device, queue, material.uniforms().map_texture())?;
        Ok(Self::with_texture(
            device,
            surface_format,
            material,
            geometry,
            map_texture,
        ))
    }

    pub fn with_texture(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        material: &Material,
        geometry: &PlaneGeometry,
        map_texture: MapTexture,
    ) -> Self {
        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("uniform_buffer"),
            contents: bytemuck::bytes_of(&Uniforms::zeroed()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("logo_bind_group_layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("logo_bind_group"),
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniform_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&map_texture.view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::Sampler(&map_texture.sampler),
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("logo_pipeline_layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let shader_set = material.shader_set();
        let sources = shaders::shader_sources(shader_set);
        let vertex_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("logo_vertex_shader"),
            source: wgpu::ShaderSource::Wgsl(sources.vertex.into()),
        });
        let fragment_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("logo_fragment_shader"),
            source: wgpu::ShaderSource::Wgsl(sources.fragment.into()),
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("logo_pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &vertex_shader,
                entry_point: Some(VERTEX_ENTRY),
                compilation_options: Default::default(),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<Vertex>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &wgpu::vertex_attr_array![
                        0 => Float32x3,
                        1 => Float32x2,
                    ],
                }],
            },
            fragment: Some(wgpu::FragmentState {
                module: &fragment_shader,
                entry_point: Some(FRAGMENT_ENTRY),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                // The flipped projection and the half-turn rotation both
                // reverse winding; draw both faces.
                cull_mode: None,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: Default::default(),
            multiview: None,
            cache: None,
        });

        let (vertices, indices) = plane_mesh(geometry);
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("plane_vertex_buffer"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("plane_index_buffer"),
            contents: bytemuck::cast_slice(&indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        tracing::info!(
            shader_set = %shader_set,
            width = map_texture.dimensions.0,
            height = map_texture.dimensions.1,
            "logo pipeline created"
        );

        Self {
            pipeline,
            uniform_buffer,
            bind_group,
            vertex_buffer,
            index_buffer,
            index_count: indices.len() as u32,
            map_texture,
        }
    }

    /// Render one frame of the logo plane.
    pub fn render(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        view: &wgpu::TextureView,
        scene: &Scene,
        projection: &Projection,
    ) {
        queue.write_buffer(
            &self.uniform_buffer,
            0,
            bytemuck::bytes_of(&Uniforms::from_scene(scene, projection)),
        );

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("render_encoder"),
        });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("logo_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                ..Default::default()
            });

            pass.set_pipeline(&self.pipeline);
            pass.set_bind_group(0, &self.bind_group, &[]);
            pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
            pass.set_index_buffer(self.index_buffer.slice(..), wgpu::IndexFormat::Uint16);
            pass.draw_indexed(0..self.index_count, 0, 0..1);
        }

        queue.submit(std::iter::once(encoder.finish()));
    }
}

/// A frame's worth of GPU handles, usable as the driver's draw target.
pub struct SurfaceFrame<'a> {
    pub renderer: &'a LogoRenderer,
    pub device: &'a wgpu::Device,
    pub queue: &'a wgpu::Queue,
    pub view: &'a wgpu::TextureView,
}

impl DrawTarget for SurfaceFrame<'_> {
    fn draw(&mut self, scene: &Scene, projection: &Projection) {
        self.renderer
            .render(self.device, self.queue, self.view, scene, projection);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use noddy_core::{ShaderSetId, TextureBinding, compute_projection, create_surface};

    fn scene(time: f32) -> Scene {
        let mut material = Material::new(ShaderSetId::Nodd, TextureBinding::world_map("map.jpg"));
        material.set_time(time);
        Scene::with_surface(create_surface(material))
    }

    #[test]
    fn uniform_block_matches_wgsl_layout() {
        // Two mat4x4<f32> plus four f32 scalars.
        assert_eq!(std::mem::size_of::<Uniforms>(), 144);
    }

    #[test]
    fn uniforms_carry_time_and_matrices() {
        let projection = compute_projection(1920, 1080);
        let scene = scene(0.112);
        let uniforms = Uniforms::from_scene(&scene, &projection);
        assert_eq!(uniforms.time, 0.112);
        assert_eq!(
            uniforms.view_proj,
            projection.view_projection().to_cols_array_2d()
        );
        assert_eq!(
            uniforms.model,
            scene.surface().model_matrix().to_cols_array_2d()
        );
    }

    #[test]
    fn plane_mesh_keeps_geometry() {
        let geometry = PlaneGeometry::new(2.0, 2.0 / 3.0);
        let (vertices, indices) = plane_mesh(&geometry);
        assert_eq!(vertices.len(), 4);
        assert_eq!(indices, vec![0, 2, 1, 2, 3, 1]);
        assert_eq!(vertices[0].uv, [0.0, 0.0]);
        assert_eq!(std::mem::size_of::<Vertex>(), 20);
    }
}
