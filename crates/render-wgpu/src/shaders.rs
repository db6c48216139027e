use noddy_core::ShaderSetId;

/// Declarations shared by every shader set: the uniform block, the map
/// texture and its sampler, and the vertex/fragment interface.
pub const UNIFORM_INTERFACE: &str = r#"
struct Uniforms {
    view_proj: mat4x4<f32>,
    model: mat4x4<f32>,
    time: f32,
    _pad0: f32,
    _pad1: f32,
    _pad2: f32,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

@group(0) @binding(1)
var map_texture: texture_2d<f32>;

@group(0) @binding(2)
var map_sampler: sampler;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) uv: vec2<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) uv: vec2<f32>,
};
"#;

const NODD_VS: &str = r#"
@vertex
fn vs_main(vertex: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    out.clip_position = uniforms.view_proj * uniforms.model * vec4<f32>(vertex.position, 1.0);
    out.uv = vertex.uv;
    return out;
}
"#;

const NODD_FS: &str = r#"
@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    // Repeat addressing on U turns the offset into an endless eastward drift.
    let uv = vec2<f32>(in.uv.x + uniforms.time, in.uv.y);
    return textureSample(map_texture, map_sampler, uv);
}
"#;

const NODDY_VS: &str = r#"
@vertex
fn vs_main(vertex: VertexInput) -> VertexOutput {
    var position = vertex.position;
    position.y += 0.01 * sin(position.x * 6.2831853 + uniforms.time * 40.0);

    var out: VertexOutput;
    out.clip_position = uniforms.view_proj * uniforms.model * vec4<f32>(position, 1.0);
    out.uv = vertex.uv;
    return out;
}
"#;

const NODDY_FS: &str = r#"
@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let uv = vec2<f32>(in.uv.x - uniforms.time, in.uv.y);
    let color = textureSample(map_texture, map_sampler, uv);
    let shade = 0.75 + 0.25 * sin(in.uv.y * 3.14159265);
    return vec4<f32>(color.rgb * shade, color.a);
}
"#;

pub const VERTEX_ENTRY: &str = "vs_main";
pub const FRAGMENT_ENTRY: &str = "fs_main";

/// Complete WGSL sources for one shader set.
#[derive(Debug, Clone)]
pub struct ShaderSources {
    pub vertex: String,
    pub fragment: String,
}

/// Look up the vertex/fragment pair for a shader set, with the shared
/// uniform interface prepended to both stages.
pub fn shader_sources(id: ShaderSetId) -> ShaderSources {
    let (vertex, fragment) = match id {
        ShaderSetId::Nodd => (NODD_VS, NODD_FS),
        ShaderSetId::Noddy => (NODDY_VS, NODDY_FS),
    };
    ShaderSources {
        vertex: format!("{UNIFORM_INTERFACE}{vertex}"),
        fragment: format!("{UNIFORM_INTERFACE}{fragment}"),
    }
}
