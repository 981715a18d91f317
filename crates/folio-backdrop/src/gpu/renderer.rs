use folio_hal::{HostError, PixelSize};

use super::init::*;
use super::render::VariantPasses;
use super::uniforms::Uniforms;
use crate::config::Palette;
use crate::frame::FrameState;
use crate::render::{EffectRenderer, RenderSetup};

/// wgpu renderer drawing one variant into one canvas
pub struct BackdropRenderer {
    device: wgpu::Device,
    queue: wgpu::Queue,
    /// `None` once released
    surface: Option<wgpu::Surface<'static>>,
    surface_config: wgpu::SurfaceConfiguration,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    passes: VariantPasses,
    palette: Palette,
}

impl BackdropRenderer {
    /// Create a renderer for `canvas`
    pub async fn new(
        canvas: web_sys::HtmlCanvasElement,
        setup: RenderSetup,
    ) -> Result<Self, String> {
        let (instance, surface) = Self::create_surface(canvas)?;
        let (device, queue, adapter) = create_device(&instance, &surface).await?;
        let surface_config = configure_surface(
            &surface,
            &adapter,
            &device,
            setup.size.width,
            setup.size.height,
        )?;

        let palette = setup.config.palette.clone();
        let initial = Uniforms::initial(setup.size, setup.config.variant, &palette);
        let (uniform_buffer, bind_group_layout, bind_group) =
            create_uniform_resources(&device, &initial);
        let passes =
            create_passes(&device, &bind_group_layout, surface_config.format, &setup).await?;

        Ok(Self {
            device,
            queue,
            surface: Some(surface),
            surface_config,
            uniform_buffer,
            bind_group,
            passes,
            palette,
        })
    }

    /// Create the wgpu instance and surface from canvas
    #[cfg(target_arch = "wasm32")]
    fn create_surface(
        canvas: web_sys::HtmlCanvasElement,
    ) -> Result<(wgpu::Instance, wgpu::Surface<'static>), String> {
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas))
            .map_err(|e| format!("Failed to create surface: {}", e))?;

        Ok((instance, surface))
    }

    /// Create the wgpu instance and surface from canvas (non-WASM stub)
    #[cfg(not(target_arch = "wasm32"))]
    fn create_surface(
        _canvas: web_sys::HtmlCanvasElement,
    ) -> Result<(wgpu::Instance, wgpu::Surface<'static>), String> {
        Err("BackdropRenderer only supports WASM targets".to_string())
    }

    /// Get surface texture with error handling
    fn get_surface_texture(&self) -> Result<wgpu::SurfaceTexture, String> {
        let surface = self
            .surface
            .as_ref()
            .ok_or_else(|| "Renderer released".to_string())?;
        match surface.get_current_texture() {
            Ok(texture) => Ok(texture),
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                surface.configure(&self.device, &self.surface_config);
                Err("Surface reconfigured, skip frame".to_string())
            }
            Err(wgpu::SurfaceError::OutOfMemory) => Err("Out of GPU memory".to_string()),
            Err(wgpu::SurfaceError::Timeout) => Err("GPU timeout, skip frame".to_string()),
        }
    }
}

impl EffectRenderer for BackdropRenderer {
    fn resize(&mut self, size: PixelSize) {
        if size.is_empty() {
            return;
        }
        self.surface_config.width = size.width;
        self.surface_config.height = size.height;
        if let Some(surface) = &self.surface {
            surface.configure(&self.device, &self.surface_config);
        }
    }

    fn draw(&mut self, frame: &FrameState) -> Result<(), HostError> {
        let uniforms = Uniforms::from_frame(frame, &self.palette);
        let output = self.get_surface_texture().map_err(HostError::Renderer)?;

        self.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::cast_slice(&[uniforms]));

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Backdrop Encoder"),
            });

        self.passes.record(&mut encoder, &self.bind_group, &view);

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }

    fn release(&mut self) {
        if self.surface.take().is_none() {
            return;
        }
        self.passes.destroy();
        self.uniform_buffer.destroy();
        self.device.destroy();
    }
}
