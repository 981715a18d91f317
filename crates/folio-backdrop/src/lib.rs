//! Folio Background Effects
//!
//! Decorative animated backgrounds confined to a container behind the page.
//!
//! ## Variants
//!
//! - **Network**: seeded node graph with pulsing points and faint links
//! - **Clouds**: procedural cloud shader fetched at mount time, with a mirror
//! - **Geometry**: slowly spinning wireframe cube
//!
//! ## Design
//!
//! - Device tier detected from one capability probe, mapped to a fixed quality table
//! - [`BackdropController`] owns every mount; the browser is reached only via [`folio_hal::Host`]
//! - Rendering sits behind [`RenderBackend`]; the wgpu backend lives behind the `wasm` feature
//! - Motion is a pure function of animation time, advanced by `dt * effective speed`

mod camera;
mod config;
mod controller;
mod frame;
mod headless;
mod motion;
mod render;
mod scene;
mod settings;
mod tier;
mod variant;

#[cfg(feature = "wasm")]
mod gpu;

pub use camera::{cube_view_proj, line_view_proj, node_view_proj};
pub use config::{quality, EffectConfig, Palette, QualityProfile, Rgb, REDUCED_MOTION_SPEED};
pub use controller::{BackdropController, EffectHandle, REDUCED_MOTION_QUERY};
pub use frame::{fade_in, FrameState};
pub use headless::{HeadlessBackend, HeadlessStats};
pub use motion::{AnimationClock, MotionSample, MAX_FRAME_DT};
pub use render::{EffectRenderer, RenderBackend, RenderSetup};
pub use scene::{cube_edges, Scene};
pub use settings::{BackdropSettings, ConfigError, PaletteSettings};
pub use tier::{detect_tier, Tier};
pub use variant::{remember_variant, resolve_variant, Variant, VariantSource};

#[cfg(feature = "wasm")]
pub use gpu::{BackdropRenderer, GpuBackend, Uniforms};
