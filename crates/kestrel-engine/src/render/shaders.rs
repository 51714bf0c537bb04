//! Built-in GLSL 330 sources for the two default pipelines.
//!
//! Callers with custom shading load their own files through
//! [`ShaderProgram::from_files`](super::ShaderProgram::from_files); these
//! constants cover the stock mesh and sprite paths.

/// Vertex stage for the static-mesh path.
///
/// Attributes: location 0 = vec3 position (tightly packed).
/// Uniforms: `u_MVP`.
pub const MESH_VERTEX_SRC: &str = r#"#version 330 core
layout (location = 0) in vec3 aPos;

uniform mat4 u_MVP;

out vec3 vPos;

void main() {
    vPos = aPos;
    gl_Position = u_MVP * vec4(aPos, 1.0);
}
"#;

/// Fragment stage for the static-mesh path.
///
/// Ambient plus diffuse over `u_ObjectColor`. The vertex layout carries no
/// normals, so the face normal is reconstructed from screen-space
/// derivatives of the interpolated position.
///
/// Uniforms: `u_ObjectColor`, `u_LightDir`.
pub const MESH_FRAGMENT_SRC: &str = r#"#version 330 core
in vec3 vPos;

uniform vec3 u_ObjectColor;
uniform vec3 u_LightDir;

out vec4 FragColor;

void main() {
    vec3 normal = normalize(cross(dFdx(vPos), dFdy(vPos)));
    float ambient = 0.25;
    float diffuse = max(dot(normal, normalize(u_LightDir)), 0.0) * 0.75;
    FragColor = vec4(u_ObjectColor * (ambient + diffuse), 1.0);
}
"#;

/// Vertex stage for the sprite path.
///
/// Attributes: location 0 = vec2 position, location 1 = vec2 UV, both over
/// the unit quad. Uniforms: `model`, `projection`.
pub const SPRITE_VERTEX_SRC: &str = r#"#version 330 core
layout (location = 0) in vec2 aPos;
layout (location = 1) in vec2 aTex;

uniform mat4 model;
uniform mat4 projection;

out vec2 vTex;

void main() {
    vTex = aTex;
    gl_Position = projection * model * vec4(aPos, 0.0, 1.0);
}
"#;

/// Fragment stage for the sprite path; sampler `image` reads unit 0.
pub const SPRITE_FRAGMENT_SRC: &str = r#"#version 330 core
in vec2 vTex;

uniform sampler2D image;

out vec4 FragColor;

void main() {
    FragColor = texture(image, vTex);
}
"#;
