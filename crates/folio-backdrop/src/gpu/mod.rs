//! wgpu renderer backend
//!
//! ## Passes
//!
//! - **Network**: gradient, then faint links (line list), then pulsing node billboards
//! - **Clouds**: the fetched fullscreen shader alone
//! - **Geometry**: gradient, then the cube's twelve edges
//!
//! ## Design
//!
//! - One uniform buffer and bind group per renderer, rewritten every frame
//! - Full-screen triangle for the fullscreen passes (no geometry needed)
//! - Fetched WGSL must declare the same `Uniforms` struct at group 0, binding 0

mod init;
mod render;
mod renderer;
mod shaders;
mod uniforms;

use folio_hal::{Host, HostError, LocalFuture};

use crate::render::{EffectRenderer, RenderBackend, RenderSetup};

pub use renderer::BackdropRenderer;
pub use uniforms::Uniforms;

/// Backend that renders into `<canvas>` surfaces with wgpu
#[derive(Clone, Copy, Debug, Default)]
pub struct GpuBackend;

impl<H> RenderBackend<H> for GpuBackend
where
    H: Host<Surface = web_sys::HtmlCanvasElement>,
{
    fn create(
        &self,
        surface: &web_sys::HtmlCanvasElement,
        setup: RenderSetup,
    ) -> LocalFuture<Result<Box<dyn EffectRenderer>, HostError>> {
        let canvas = surface.clone();
        Box::pin(async move {
            let renderer = BackdropRenderer::new(canvas, setup)
                .await
                .map_err(HostError::Renderer)?;
            log::info!("[backdrop] gpu renderer ready");
            Ok(Box::new(renderer) as Box<dyn EffectRenderer>)
        })
    }
}
