//! Renderer seam
//!
//! The controller owns lifecycle and timing; a [`RenderBackend`] turns a
//! surface into an [`EffectRenderer`] that only knows how to draw.

use folio_hal::{Host, HostError, LocalFuture, PixelSize};

use crate::config::EffectConfig;
use crate::frame::FrameState;
use crate::scene::Scene;

/// Inputs for creating a renderer
#[derive(Clone, Debug)]
pub struct RenderSetup {
    pub config: EffectConfig,
    /// Initial surface size in device pixels
    pub size: PixelSize,
    /// Node graph for the network variant, empty otherwise
    pub scene: Scene,
    /// Fetched WGSL for variants that load one
    pub shader: Option<String>,
}

/// A live renderer bound to one surface
pub trait EffectRenderer {
    /// Reconfigure for a new device-pixel size
    fn resize(&mut self, size: PixelSize);

    /// Draw one frame. An error skips the frame; the loop keeps running.
    fn draw(&mut self, frame: &FrameState) -> Result<(), HostError>;

    /// Free GPU resources. Called exactly once, before the surface detaches.
    fn release(&mut self);
}

/// Creates renderers for a host's surfaces
pub trait RenderBackend<H: Host> {
    fn create(
        &self,
        surface: &H::Surface,
        setup: RenderSetup,
    ) -> LocalFuture<Result<Box<dyn EffectRenderer>, HostError>>;
}
