use billard_scene::ShaderProgram;

/// Uniform block and vertex stage shared by the built-in programs. Custom
/// WGSL sources must declare the same block at group 0, binding 0.
const COMMON: &str = r#"
struct Uniforms {
    model: mat4x4<f32>,
    view: mat4x4<f32>,
    projection: mat4x4<f32>,
    view_pos: vec3<f32>,
    shininess: f32,
    light_position: vec3<f32>,
    refraction_index: f32,
    light_ambient: vec3<f32>,
    light_diffuse: vec3<f32>,
    light_specular: vec3<f32>,
    light_color: vec3<f32>,
    material_ambient: vec3<f32>,
    material_diffuse: vec3<f32>,
    material_specular: vec3<f32>,
};

@group(0) @binding(0)
var<uniform> u: Uniforms;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_pos: vec3<f32>,
    @location(1) world_normal: vec3<f32>,
};

@vertex
fn vs_main(vertex: VertexInput) -> VertexOutput {
    let world = u.model * vec4<f32>(vertex.position, 1.0);
    // model is translate * scale, so the normal matrix is the inverse scale
    let scale = vec3<f32>(
        length(u.model[0].xyz),
        length(u.model[1].xyz),
        length(u.model[2].xyz),
    );

    var out: VertexOutput;
    out.clip_position = u.projection * u.view * world;
    out.world_pos = world.xyz;
    out.world_normal = normalize(vertex.normal / scale);
    return out;
}

fn phong(in: VertexOutput) -> vec3<f32> {
    let n = normalize(in.world_normal);
    let light_dir = normalize(u.light_position - in.world_pos);
    let view_dir = normalize(u.view_pos - in.world_pos);

    let ambient = u.light_ambient * u.material_ambient;
    let diff = max(dot(n, light_dir), 0.0);
    let diffuse = u.light_diffuse * (diff * u.material_diffuse);
    let reflect_dir = reflect(-light_dir, n);
    let spec = pow(max(dot(view_dir, reflect_dir), 0.0), u.shininess);
    let specular = u.light_specular * (spec * u.material_specular);

    return (ambient + diffuse + specular) * u.light_color;
}
"#;

const PHONG_FRAGMENT: &str = r#"
@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    return vec4<f32>(phong(in), 1.0);
}
"#;

const REFLECTIVE_FRAGMENT: &str = r#"
fn environment(dir: vec3<f32>) -> vec3<f32> {
    let sky = vec3<f32>(0.76, 0.88, 1.0);
    let ground = vec3<f32>(0.18, 0.12, 0.08);
    return mix(ground, sky, clamp(dir.y * 0.5 + 0.5, 0.0, 1.0));
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let n = normalize(in.world_normal);
    let view_dir = normalize(in.world_pos - u.view_pos);
    let mirrored = environment(reflect(view_dir, n));
    let color = mix(phong(in), mirrored, clamp(u.refraction_index, 0.0, 1.0));
    return vec4<f32>(color, 1.0);
}
"#;

/// WGSL source of a built-in program.
pub fn builtin_source(program: ShaderProgram) -> String {
    let fragment = match program {
        ShaderProgram::Phong => PHONG_FRAGMENT,
        ShaderProgram::Reflective => REFLECTIVE_FRAGMENT,
    };
    format!("{COMMON}{fragment}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn programs_share_entry_points() {
        for program in [ShaderProgram::Phong, ShaderProgram::Reflective] {
            let src = builtin_source(program);
            assert!(src.contains("fn vs_main"));
            assert!(src.contains("fn fs_main"));
            assert!(src.contains("@group(0) @binding(0)"));
        }
    }

    #[test]
    fn only_reflective_reads_refraction_index() {
        assert!(!PHONG_FRAGMENT.contains("refraction_index"));
        assert!(REFLECTIVE_FRAGMENT.contains("u.refraction_index"));
    }
}
