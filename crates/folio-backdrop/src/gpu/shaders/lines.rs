/// Line list shader shared by network links and cube edges
///
/// Colour and alpha come from palette slot 4.
pub const SHADER_LINES: &str = r#"
struct Uniforms {
    time: f32,
    opacity: f32,
    resolution: vec2<f32>,
    zoom: f32,
    quantity: f32,
    sun_offset: f32,
    pulse: f32,
    palette: array<vec4<f32>, 6>,
    node_view_proj: mat4x4<f32>,
    line_view_proj: mat4x4<f32>,
};

@group(0) @binding(0) var<uniform> uniforms: Uniforms;

@vertex
fn vs_main(@location(0) position: vec3<f32>) -> @builtin(position) vec4<f32> {
    return uniforms.line_view_proj * vec4<f32>(position, 1.0);
}

@fragment
fn fs_main() -> @location(0) vec4<f32> {
    let line = uniforms.palette[4];
    let a = line.a * uniforms.opacity;
    return vec4<f32>(line.rgb * a, a);
}
"#;
