/// Pipelines and buffers for the mounted variant
pub enum VariantPasses {
    Network {
        gradient: wgpu::RenderPipeline,
        lines: wgpu::RenderPipeline,
        nodes: wgpu::RenderPipeline,
        line_buffer: Option<wgpu::Buffer>,
        line_count: u32,
        node_buffer: Option<wgpu::Buffer>,
        node_count: u32,
    },
    Clouds {
        clouds: wgpu::RenderPipeline,
    },
    Geometry {
        gradient: wgpu::RenderPipeline,
        lines: wgpu::RenderPipeline,
        edge_buffer: wgpu::Buffer,
        edge_count: u32,
    },
}

impl VariantPasses {
    /// Record every draw for one frame into a single pass
    pub fn record(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        bind_group: &wgpu::BindGroup,
        output_view: &wgpu::TextureView,
    ) {
        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Backdrop Render Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: output_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });
        render_pass.set_bind_group(0, bind_group, &[]);

        match self {
            VariantPasses::Network {
                gradient,
                lines,
                nodes,
                line_buffer,
                line_count,
                node_buffer,
                node_count,
            } => {
                render_pass.set_pipeline(gradient);
                render_pass.draw(0..3, 0..1);

                if let Some(buffer) = line_buffer {
                    render_pass.set_pipeline(lines);
                    render_pass.set_vertex_buffer(0, buffer.slice(..));
                    render_pass.draw(0..*line_count, 0..1);
                }
                if let Some(buffer) = node_buffer {
                    render_pass.set_pipeline(nodes);
                    render_pass.set_vertex_buffer(0, buffer.slice(..));
                    render_pass.draw(0..6, 0..*node_count);
                }
            }
            VariantPasses::Clouds { clouds } => {
                render_pass.set_pipeline(clouds);
                render_pass.draw(0..3, 0..1);
            }
            VariantPasses::Geometry {
                gradient,
                lines,
                edge_buffer,
                edge_count,
            } => {
                render_pass.set_pipeline(gradient);
                render_pass.draw(0..3, 0..1);
                render_pass.set_pipeline(lines);
                render_pass.set_vertex_buffer(0, edge_buffer.slice(..));
                render_pass.draw(0..*edge_count, 0..1);
            }
        }
    }

    /// Free vertex buffers
    pub fn destroy(&self) {
        match self {
            VariantPasses::Network {
                line_buffer,
                node_buffer,
                ..
            } => {
                for buffer in [line_buffer, node_buffer].into_iter().flatten() {
                    buffer.destroy();
                }
            }
            VariantPasses::Clouds { .. } => {}
            VariantPasses::Geometry { edge_buffer, .. } => edge_buffer.destroy(),
        }
    }
}
