//! Shader program compilation, linking and uniform access.

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::Path;
use std::rc::Rc;

use glam::{Mat4, Vec3};

use crate::device::{GraphicsApi, ProgramHandle, StageKind, UniformLocation};
use crate::error::{AssetError, RenderError};

/// A linked, executable GPU shader program.
///
/// Construction compiles the vertex stage, then the fragment stage, links
/// them, and releases the intermediate stage objects on every path, success
/// or failure. A `ShaderProgram` therefore either exists fully linked or
/// not at all; there is no partially-linked state to guard against.
///
/// The program handle is released exactly once when the value drops.
pub struct ShaderProgram {
    api: Rc<dyn GraphicsApi>,
    handle: ProgramHandle,
    /// Uniform locations by name. A cached `None` records a miss, so each
    /// unknown name warns once instead of once per frame.
    locations: RefCell<HashMap<String, Option<UniformLocation>>>,
}

impl std::fmt::Debug for ShaderProgram {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShaderProgram")
            .field("handle", &self.handle)
            .field("locations", &self.locations)
            .finish_non_exhaustive()
    }
}

impl ShaderProgram {
    /// Compiles and links a program from in-memory source text.
    pub fn from_sources(
        api: &Rc<dyn GraphicsApi>,
        vertex_src: &str,
        fragment_src: &str,
    ) -> Result<Self, RenderError> {
        let vertex = api.compile_stage(StageKind::Vertex, vertex_src)?;
        let fragment = match api.compile_stage(StageKind::Fragment, fragment_src) {
            Ok(stage) => stage,
            Err(err) => {
                api.delete_stage(vertex);
                return Err(err);
            }
        };

        let linked = api.link_program(vertex, fragment);
        // Stage objects are only inputs to the link; release them either way.
        api.delete_stage(vertex);
        api.delete_stage(fragment);
        let handle = linked?;

        Ok(Self {
            api: Rc::clone(api),
            handle,
            locations: RefCell::new(HashMap::new()),
        })
    }

    /// Reads both stage sources from disk, then compiles and links.
    pub fn from_files(
        api: &Rc<dyn GraphicsApi>,
        vertex_path: &Path,
        fragment_path: &Path,
    ) -> Result<Self, RenderError> {
        let vertex_src = read_source(vertex_path)?;
        let fragment_src = read_source(fragment_path)?;
        Self::from_sources(api, &vertex_src, &fragment_src)
    }

    /// Makes this program the current one for subsequent uniform stores and
    /// draws.
    pub fn bind(&self) {
        self.api.bind_program(Some(self.handle));
    }

    pub fn set_bool(&self, name: &str, value: bool) {
        self.set_int(name, i32::from(value));
    }

    pub fn set_int(&self, name: &str, value: i32) {
        if let Some(location) = self.location(name) {
            self.api.set_uniform_i32(location, value);
        }
    }

    pub fn set_float(&self, name: &str, value: f32) {
        if let Some(location) = self.location(name) {
            self.api.set_uniform_f32(location, value);
        }
    }

    pub fn set_vec3(&self, name: &str, value: Vec3) {
        if let Some(location) = self.location(name) {
            self.api.set_uniform_vec3(location, value.to_array());
        }
    }

    pub fn set_mat4(&self, name: &str, value: &Mat4) {
        if let Some(location) = self.location(name) {
            self.api.set_uniform_mat4(location, &value.to_cols_array());
        }
    }

    /// Resolves `name` through the cache. A miss is a degradable caller
    /// error: warn and make the store a no-op.
    fn location(&self, name: &str) -> Option<UniformLocation> {
        let mut locations = self.locations.borrow_mut();
        if let Some(cached) = locations.get(name) {
            return *cached;
        }
        let resolved = self.api.uniform_location(self.handle, name);
        if resolved.is_none() {
            log::warn!("uniform `{name}` not found in program; stores to it are ignored");
        }
        locations.insert(name.to_owned(), resolved);
        resolved
    }
}

impl Drop for ShaderProgram {
    fn drop(&mut self) {
        self.api.delete_program(self.handle);
    }
}

fn read_source(path: &Path) -> Result<String, RenderError> {
    std::fs::read_to_string(path)
        .map_err(|source| {
            AssetError::Io {
                path: path.to_path_buf(),
                source,
            }
            .into()
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::recording::{GpuCall, RecordingDevice};

    const VS: &str = "void main() {}";
    const FS: &str = "void main() {}";

    fn device_and_api() -> (Rc<RecordingDevice>, Rc<dyn GraphicsApi>) {
        let device = Rc::new(RecordingDevice::new());
        let api: Rc<dyn GraphicsApi> = device.clone();
        (device, api)
    }

    // ── construction protocol ─────────────────────────────────────────────

    #[test]
    fn construction_compiles_links_and_releases_stages_in_order() {
        let (device, api) = device_and_api();
        let program = ShaderProgram::from_sources(&api, VS, FS).expect("link");

        let calls = device.calls();
        assert!(matches!(
            calls[0],
            GpuCall::CompileStage {
                kind: StageKind::Vertex
            }
        ));
        assert!(matches!(
            calls[1],
            GpuCall::CompileStage {
                kind: StageKind::Fragment
            }
        ));
        assert!(matches!(calls[2], GpuCall::LinkProgram { .. }));
        assert!(matches!(calls[3], GpuCall::DeleteStage(_)));
        assert!(matches!(calls[4], GpuCall::DeleteStage(_)));
        assert_eq!(calls.len(), 5);

        drop(program);
        assert_eq!(
            device.count(|c| matches!(c, GpuCall::DeleteProgram(_))),
            1
        );
    }

    #[test]
    fn vertex_compile_failure_releases_nothing_else() {
        let (device, api) = device_and_api();
        device.fail_compile(StageKind::Vertex);

        let err = ShaderProgram::from_sources(&api, VS, FS).unwrap_err();
        assert!(matches!(
            err,
            RenderError::Compile {
                stage: StageKind::Vertex,
                ..
            }
        ));
        assert_eq!(device.count(|c| matches!(c, GpuCall::DeleteStage(_))), 0);
        assert_eq!(device.count(|c| matches!(c, GpuCall::LinkProgram { .. })), 0);
    }

    #[test]
    fn fragment_compile_failure_releases_the_vertex_stage() {
        let (device, api) = device_and_api();
        device.fail_compile(StageKind::Fragment);

        let err = ShaderProgram::from_sources(&api, VS, FS).unwrap_err();
        assert!(matches!(
            err,
            RenderError::Compile {
                stage: StageKind::Fragment,
                ..
            }
        ));
        assert_eq!(device.count(|c| matches!(c, GpuCall::DeleteStage(_))), 1);
        assert_eq!(device.count(|c| matches!(c, GpuCall::LinkProgram { .. })), 0);
    }

    #[test]
    fn link_failure_releases_both_stages() {
        let (device, api) = device_and_api();
        device.fail_link();

        let err = ShaderProgram::from_sources(&api, VS, FS).unwrap_err();
        assert!(matches!(err, RenderError::Link { .. }));
        assert_eq!(device.count(|c| matches!(c, GpuCall::DeleteStage(_))), 2);
        assert_eq!(device.count(|c| matches!(c, GpuCall::DeleteProgram(_))), 0);
    }

    #[test]
    fn from_files_surfaces_missing_sources_as_asset_errors() {
        let (_device, api) = device_and_api();
        let err = ShaderProgram::from_files(
            &api,
            Path::new("no/such/shader.vert"),
            Path::new("no/such/shader.frag"),
        )
        .unwrap_err();
        assert!(matches!(err, RenderError::Asset(AssetError::Io { .. })));
    }

    // ── uniforms ──────────────────────────────────────────────────────────

    #[test]
    fn known_uniform_routes_through_exactly_one_store() {
        let (device, api) = device_and_api();
        let program = ShaderProgram::from_sources(&api, VS, FS).expect("link");
        device.clear_calls();

        program.bind();
        program.set_mat4("u_MVP", &Mat4::IDENTITY);

        assert_eq!(
            device.count(|c| matches!(c, GpuCall::UniformLookup { hit: true, .. })),
            1
        );
        assert_eq!(
            device.count(|c| matches!(c, GpuCall::SetUniformMat4 { .. })),
            1
        );
    }

    #[test]
    fn unknown_uniform_is_a_no_op() {
        let (device, api) = device_and_api();
        device.mark_unknown_uniform("u_Missing");
        let program = ShaderProgram::from_sources(&api, VS, FS).expect("link");
        device.clear_calls();

        program.set_float("u_Missing", 1.0);
        program.set_float("u_Missing", 2.0);

        // The miss is cached: one lookup, zero stores, no fault.
        assert_eq!(
            device.count(|c| matches!(c, GpuCall::UniformLookup { .. })),
            1
        );
        assert_eq!(
            device.count(|c| matches!(c, GpuCall::SetUniformF32 { .. })),
            0
        );
    }

    #[test]
    fn repeated_stores_reuse_the_cached_location() {
        let (device, api) = device_and_api();
        let program = ShaderProgram::from_sources(&api, VS, FS).expect("link");
        device.clear_calls();

        program.set_int("image", 0);
        program.set_int("image", 0);
        program.set_bool("image", true);

        assert_eq!(
            device.count(|c| matches!(c, GpuCall::UniformLookup { .. })),
            1
        );
        assert_eq!(
            device.count(|c| matches!(c, GpuCall::SetUniformI32 { .. })),
            3
        );
    }
}
