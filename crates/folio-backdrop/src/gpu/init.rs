use wgpu::util::DeviceExt;

use super::render::VariantPasses;
use super::shaders::{SHADER_GRADIENT, SHADER_LINES, SHADER_NODES};
use super::uniforms::Uniforms;
use crate::render::RenderSetup;
use crate::scene::cube_edges;
use crate::variant::Variant;

/// Create wgpu device and adapter
pub async fn create_device(
    instance: &wgpu::Instance,
    surface: &wgpu::Surface<'static>,
) -> Result<(wgpu::Device, wgpu::Queue, wgpu::Adapter), String> {
    let adapter = instance
        .request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::LowPower,
            compatible_surface: Some(surface),
            force_fallback_adapter: false,
        })
        .await
        .ok_or_else(|| "Failed to find suitable GPU adapter".to_string())?;

    let (device, queue) = adapter
        .request_device(
            &wgpu::DeviceDescriptor {
                label: Some("Backdrop Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_webgl2_defaults(),
                memory_hints: wgpu::MemoryHints::default(),
            },
            None,
        )
        .await
        .map_err(|e| format!("Failed to create device: {}", e))?;

    Ok((device, queue, adapter))
}

/// Configure the surface, preferring premultiplied alpha so the page shows through
pub fn configure_surface(
    surface: &wgpu::Surface<'static>,
    adapter: &wgpu::Adapter,
    device: &wgpu::Device,
    width: u32,
    height: u32,
) -> Result<wgpu::SurfaceConfiguration, String> {
    let caps = surface.get_capabilities(adapter);
    let format = caps
        .formats
        .iter()
        .find(|f| f.is_srgb())
        .or_else(|| caps.formats.first())
        .copied()
        .ok_or_else(|| "Surface reports no formats".to_string())?;
    let alpha_mode = caps
        .alpha_modes
        .iter()
        .find(|m| **m == wgpu::CompositeAlphaMode::PreMultiplied)
        .or_else(|| caps.alpha_modes.first())
        .copied()
        .unwrap_or(wgpu::CompositeAlphaMode::Auto);

    let config = wgpu::SurfaceConfiguration {
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        format,
        width: width.max(1),
        height: height.max(1),
        present_mode: wgpu::PresentMode::AutoVsync,
        alpha_mode,
        view_formats: vec![],
        desired_maximum_frame_latency: 2,
    };
    surface.configure(device, &config);

    Ok(config)
}

/// Create uniform buffer and bind group
pub fn create_uniform_resources(
    device: &wgpu::Device,
    uniforms: &Uniforms,
) -> (wgpu::Buffer, wgpu::BindGroupLayout, wgpu::BindGroup) {
    let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("Backdrop Uniform Buffer"),
        contents: bytemuck::cast_slice(&[*uniforms]),
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
    });

    let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("Backdrop Bind Group Layout"),
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

    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("Backdrop Bind Group"),
        layout: &bind_group_layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: uniform_buffer.as_entire_binding(),
        }],
    });

    (uniform_buffer, bind_group_layout, bind_group)
}

/// Geometry a pipeline consumes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PipelineKind {
    /// Fullscreen triangle from the vertex index, no buffers
    Fullscreen,
    /// `vec3` positions as a line list
    Lines,
    /// `vec4` per-instance nodes expanded to quads
    Nodes,
}

const LINE_ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];
const NODE_ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x4];

fn create_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    format: wgpu::TextureFormat,
    kind: PipelineKind,
    label: &str,
) -> wgpu::RenderPipeline {
    let line_layout = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &LINE_ATTRIBUTES,
    };
    let node_layout = wgpu::VertexBufferLayout {
        array_stride: std::mem::size_of::<[f32; 4]>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Instance,
        attributes: &NODE_ATTRIBUTES,
    };
    let (buffers, topology, blend) = match kind {
        PipelineKind::Fullscreen => (
            Vec::new(),
            wgpu::PrimitiveTopology::TriangleList,
            None,
        ),
        PipelineKind::Lines => (
            vec![line_layout],
            wgpu::PrimitiveTopology::LineList,
            Some(wgpu::BlendState::PREMULTIPLIED_ALPHA_BLENDING),
        ),
        PipelineKind::Nodes => (
            vec![node_layout],
            wgpu::PrimitiveTopology::TriangleList,
            Some(wgpu::BlendState::PREMULTIPLIED_ALPHA_BLENDING),
        ),
    };

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            buffers: &buffers,
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend,
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: wgpu::PipelineCompilationOptions::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode: None,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    })
}

fn create_shader(device: &wgpu::Device, label: &str, source: &str) -> wgpu::ShaderModule {
    device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(label),
        source: wgpu::ShaderSource::Wgsl(source.to_owned().into()),
    })
}

fn create_vertex_buffer<T: bytemuck::Pod>(
    device: &wgpu::Device,
    label: &str,
    data: &[T],
) -> wgpu::Buffer {
    device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some(label),
        contents: bytemuck::cast_slice(data),
        usage: wgpu::BufferUsages::VERTEX,
    })
}

/// Build the pipelines and buffers one variant draws with
///
/// Runs inside a validation error scope so a bad fetched shader surfaces
/// as an error instead of an uncaptured device error.
pub async fn create_passes(
    device: &wgpu::Device,
    bind_group_layout: &wgpu::BindGroupLayout,
    format: wgpu::TextureFormat,
    setup: &RenderSetup,
) -> Result<VariantPasses, String> {
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("Backdrop Pipeline Layout"),
        bind_group_layouts: &[bind_group_layout],
        push_constant_ranges: &[],
    });

    if setup.config.variant == Variant::Clouds && setup.shader.is_none() {
        return Err("Clouds variant needs a shader source".to_string());
    }

    let pipeline = |shader: &wgpu::ShaderModule, kind: PipelineKind, label: &str| {
        create_pipeline(device, &layout, shader, format, kind, label)
    };

    device.push_error_scope(wgpu::ErrorFilter::Validation);

    let passes = match setup.config.variant {
        Variant::Network => {
            let gradient = create_shader(device, "Gradient Shader", SHADER_GRADIENT);
            let lines = create_shader(device, "Lines Shader", SHADER_LINES);
            let nodes = create_shader(device, "Nodes Shader", SHADER_NODES);

            let line_vertices = setup.scene.line_vertices();
            let node_instances: Vec<[f32; 4]> = setup
                .scene
                .nodes
                .iter()
                .enumerate()
                .map(|(i, p)| [p.x, p.y, p.z, i as f32])
                .collect();

            VariantPasses::Network {
                gradient: pipeline(&gradient, PipelineKind::Fullscreen, "Gradient Pipeline"),
                lines: pipeline(&lines, PipelineKind::Lines, "Lines Pipeline"),
                nodes: pipeline(&nodes, PipelineKind::Nodes, "Nodes Pipeline"),
                line_count: line_vertices.len() as u32,
                line_buffer: (!line_vertices.is_empty())
                    .then(|| create_vertex_buffer(device, "Link Vertices", &line_vertices)),
                node_count: node_instances.len() as u32,
                node_buffer: (!node_instances.is_empty())
                    .then(|| create_vertex_buffer(device, "Node Instances", &node_instances)),
            }
        }
        Variant::Geometry => {
            let gradient = create_shader(device, "Gradient Shader", SHADER_GRADIENT);
            let lines = create_shader(device, "Lines Shader", SHADER_LINES);
            let edges = cube_edges();

            VariantPasses::Geometry {
                gradient: pipeline(&gradient, PipelineKind::Fullscreen, "Gradient Pipeline"),
                lines: pipeline(&lines, PipelineKind::Lines, "Cube Pipeline"),
                edge_count: edges.len() as u32,
                edge_buffer: create_vertex_buffer(device, "Cube Edges", &edges),
            }
        }
        Variant::Clouds => {
            let source = setup.shader.as_deref().unwrap_or_default();
            let clouds = create_shader(device, "Clouds Shader", source);

            VariantPasses::Clouds {
                clouds: pipeline(&clouds, PipelineKind::Fullscreen, "Clouds Pipeline"),
            }
        }
    };

    if let Some(err) = device.pop_error_scope().await {
        return Err(format!("Pipeline validation failed: {}", err));
    }

    Ok(passes)
}
