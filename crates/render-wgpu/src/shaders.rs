/// WGSL shader shared by the filled cube, the wireframe lines and the points.
///
/// Vertex inputs are `point` and `color`; the single `view` matrix maps
/// model space straight to clip space. Output color is unlit and
/// interpolated across each primitive.
///
/// wgpu rasterizes lines and points one pixel wide, so `vs_line` and
/// `vs_point` expand each instance into a screen-aligned quad of
/// `line_width` / `point_size` pixels.
pub const CUBE_SHADER: &str = r#"
struct Uniforms {
    view: mat4x4<f32>,
    viewport: vec2<f32>,
    point_size: f32,
    line_width: f32,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

struct VertexInput {
    @location(0) point: vec3<f32>,
    @location(1) color: vec3<f32>,
};

struct SegmentInput {
    @location(0) start_point: vec3<f32>,
    @location(1) start_color: vec3<f32>,
    @location(2) end_point: vec3<f32>,
    @location(3) end_color: vec3<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) color: vec4<f32>,
};

// x: 0 at the start of the quad, 1 at the end. y: -1 / +1 across.
fn quad_corner(index: u32) -> vec2<f32> {
    var corners = array<vec2<f32>, 6>(
        vec2<f32>(0.0, -1.0),
        vec2<f32>(1.0, -1.0),
        vec2<f32>(1.0, 1.0),
        vec2<f32>(0.0, -1.0),
        vec2<f32>(1.0, 1.0),
        vec2<f32>(0.0, 1.0),
    );
    return corners[index];
}

@vertex
fn vs_fill(vertex: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    out.clip_position = uniforms.view * vec4<f32>(vertex.point, 1.0);
    out.color = vec4<f32>(vertex.color, 1.0);
    return out;
}

@vertex
fn vs_point(@builtin(vertex_index) index: u32, vertex: VertexInput) -> VertexOutput {
    let clip = uniforms.view * vec4<f32>(vertex.point, 1.0);
    let corner = quad_corner(index);
    let offset = vec2<f32>(corner.x * 2.0 - 1.0, corner.y) * uniforms.point_size / uniforms.viewport;

    var out: VertexOutput;
    out.clip_position = vec4<f32>(clip.xy + offset * clip.w, clip.z, clip.w);
    out.color = vec4<f32>(vertex.color, 1.0);
    return out;
}

@vertex
fn vs_line(@builtin(vertex_index) index: u32, segment: SegmentInput) -> VertexOutput {
    let a = uniforms.view * vec4<f32>(segment.start_point, 1.0);
    let b = uniforms.view * vec4<f32>(segment.end_point, 1.0);

    // Direction in pixels so the width is uniform on non-square viewports.
    let delta = (b.xy / b.w - a.xy / a.w) * uniforms.viewport;
    let len = length(delta);
    var dir = vec2<f32>(1.0, 0.0);
    if len > 1e-6 {
        dir = delta / len;
    }
    let normal = vec2<f32>(-dir.y, dir.x);

    let corner = quad_corner(index);
    let clip = mix(a, b, corner.x);
    let offset = normal * corner.y * uniforms.line_width / uniforms.viewport;

    var out: VertexOutput;
    out.clip_position = vec4<f32>(clip.xy + offset * clip.w, clip.z, clip.w);
    out.color = vec4<f32>(mix(segment.start_color, segment.end_color, corner.x), 1.0);
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    return in.color;
}
"#;
