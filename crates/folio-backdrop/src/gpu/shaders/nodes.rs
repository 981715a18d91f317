/// Instanced billboards for network nodes
///
/// Each instance is `(x, y, z, index)`; the index drives the pulse phase.
pub const SHADER_NODES: &str = r#"
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
    @location(0) local: vec2<f32>,
};

@group(0) @binding(0) var<uniform> uniforms: Uniforms;

const NODE_RADIUS_PX: f32 = 6.0;

fn node_pulse(t: f32, i: f32) -> f32 {
    return 0.95 + 0.05 * sin(t * 0.5 + i * 0.11) + 0.03 * sin(t * 0.23 + i * 0.3);
}

@vertex
fn vs_main(
    @builtin(vertex_index) vertex_index: u32,
    @location(0) node: vec4<f32>,
) -> VsOut {
    var corners = array<vec2<f32>, 6>(
        vec2<f32>(-1.0, -1.0),
        vec2<f32>(1.0, -1.0),
        vec2<f32>(1.0, 1.0),
        vec2<f32>(-1.0, -1.0),
        vec2<f32>(1.0, 1.0),
        vec2<f32>(-1.0, 1.0),
    );
    let corner = corners[vertex_index];

    var scale = 1.0;
    if (uniforms.pulse > 0.5) {
        scale = node_pulse(uniforms.time, node.w);
    }

    let clip = uniforms.node_view_proj * vec4<f32>(node.xyz, 1.0);
    let offset = corner * NODE_RADIUS_PX * scale * 2.0 / uniforms.resolution * clip.w;

    var out: VsOut;
    out.position = vec4<f32>(clip.xy + offset, clip.z, clip.w);
    out.local = corner;
    return out;
}

@fragment
fn fs_main(in: VsOut) -> @location(0) vec4<f32> {
    let d = length(in.local);
    if (d > 1.0) {
        discard;
    }
    let core = 1.0 - smoothstep(0.0, 0.45, d);
    let glow = (1.0 - smoothstep(0.3, 1.0, d)) * 0.6;
    let color = uniforms.palette[2].rgb * core + uniforms.palette[3].rgb * glow;
    let a = max(core, glow) * uniforms.opacity;
    return vec4<f32>(color * uniforms.opacity, a);
}
"#;
