/// Vertical two-stop gradient behind the network and geometry variants
pub const SHADER_GRADIENT: &str = r#"
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

struct VsOut {
    @builtin(position) position: vec4<f32>,
    @location(0) uv: vec2<f32>,
};

@group(0) @binding(0) var<uniform> uniforms: Uniforms;

@vertex
fn vs_main(@builtin(vertex_index) vertex_index: u32) -> VsOut {
    var out: VsOut;
    // Oversized triangle: (-1, -1), (3, -1), (-1, 3)
    let x = f32(i32(vertex_index & 1u) * 4 - 1);
    let y = f32(i32(vertex_index >> 1u) * 4 - 1);
    out.position = vec4<f32>(x, y, 0.0, 1.0);
    out.uv = vec2<f32>((x + 1.0) * 0.5, (1.0 - y) * 0.5);
    return out;
}

@fragment
fn fs_main(in: VsOut) -> @location(0) vec4<f32> {
    let top = uniforms.palette[0].rgb;
    let bottom = uniforms.palette[1].rgb;
    let color = mix(top, bottom, clamp(in.uv.y, 0.0, 1.0));
    let a = uniforms.opacity;
    return vec4<f32>(color * a, a);
}
"#;
