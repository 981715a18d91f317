use folio_hal::PixelSize;

use crate::camera::{cube_view_proj, line_view_proj, node_view_proj};
use crate::config::{Palette, Rgb};
use crate::frame::FrameState;
use crate::variant::Variant;

/// Uniform data shared by every backdrop shader
/// NOTE: This struct must match WGSL alignment requirements!
/// Total struct size is 256 bytes.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Uniforms {
    pub time: f32,                      // offset 0
    pub opacity: f32,                   // offset 4
    pub resolution: [f32; 2],           // offset 8
    pub zoom: f32,                      // offset 16
    pub quantity: f32,                  // offset 20
    pub sun_offset: f32,                // offset 24
    pub pulse: f32,                     // offset 28
    pub palette: [[f32; 4]; 6],         // offset 32
    pub node_view_proj: [[f32; 4]; 4],  // offset 128
    pub line_view_proj: [[f32; 4]; 4],  // offset 192
}

fn rgba(color: Rgb, alpha: f32) -> [f32; 4] {
    [color.r, color.g, color.b, alpha]
}

/// Palette slots as each variant's shaders read them
fn palette_slots(variant: Variant, palette: &Palette) -> [[f32; 4]; 6] {
    match variant {
        Variant::Network => [
            rgba(palette.gradient_from, 1.0),
            rgba(palette.gradient_to, 1.0),
            rgba(palette.node, 1.0),
            rgba(palette.node_glow, 1.0),
            rgba(palette.line, palette.line_opacity),
            rgba(palette.sky, 1.0),
        ],
        Variant::Geometry => [
            rgba(palette.gradient_from, 1.0),
            rgba(palette.gradient_to, 1.0),
            rgba(palette.node, 1.0),
            rgba(palette.node_glow, 1.0),
            rgba(palette.line, 1.0),
            rgba(palette.sky, 1.0),
        ],
        Variant::Clouds => [
            rgba(palette.sky, 1.0),
            rgba(palette.cloud, 1.0),
            rgba(palette.cloud_shadow, 1.0),
            rgba(palette.sun, 1.0),
            rgba(palette.sun_glare, 1.0),
            rgba(palette.sunlight, 1.0),
        ],
    }
}

impl Uniforms {
    /// Uniforms before the first frame
    pub fn initial(size: PixelSize, variant: Variant, palette: &Palette) -> Self {
        Self {
            time: 0.0,
            opacity: 0.0,
            resolution: [size.width as f32, size.height as f32],
            zoom: 1.0,
            quantity: 1.0,
            sun_offset: 0.0,
            pulse: 0.0,
            palette: palette_slots(variant, palette),
            node_view_proj: glam::Mat4::IDENTITY.to_cols_array_2d(),
            line_view_proj: glam::Mat4::IDENTITY.to_cols_array_2d(),
        }
    }

    pub fn from_frame(frame: &FrameState, palette: &Palette) -> Self {
        let (nodes, lines) = match frame.variant {
            Variant::Network => (node_view_proj(frame), line_view_proj(frame)),
            Variant::Geometry => {
                let cube = cube_view_proj(frame);
                (cube, cube)
            }
            Variant::Clouds => (glam::Mat4::IDENTITY, glam::Mat4::IDENTITY),
        };
        Self {
            time: frame.time,
            opacity: frame.opacity,
            resolution: [frame.size.width as f32, frame.size.height as f32],
            zoom: frame.zoom,
            quantity: frame.quantity as f32,
            sun_offset: frame.motion.sun_offset,
            pulse: if frame.pulse { 1.0 } else { 0.0 },
            palette: palette_slots(frame.variant, palette),
            node_view_proj: nodes.to_cols_array_2d(),
            line_view_proj: lines.to_cols_array_2d(),
        }
    }
}
