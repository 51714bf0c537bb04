//! Indexed static-mesh drawing.

use std::rc::Rc;

use crate::device::{BufferHandle, BufferKind, GraphicsApi, VertexArrayHandle};
use crate::error::RenderError;
use crate::resources::MeshAsset;

use super::shader::ShaderProgram;

/// Draws one uploaded mesh with indexed triangles.
///
/// Upload is a separate, one-shot step: [`upload`](Self::upload) allocates
/// the GPU buffers for exactly one mesh, and [`render`](Self::render)
/// refuses to run before it. A renderer never re-uploads, so geometry can
/// not go silently stale; callers with changing meshes create a new
/// instance per mesh.
pub struct StaticMeshRenderer {
    api: Rc<dyn GraphicsApi>,
    vertex_array: Option<VertexArrayHandle>,
    vertex_buffer: Option<BufferHandle>,
    index_buffer: Option<BufferHandle>,
    index_count: i32,
}

impl StaticMeshRenderer {
    /// No GPU objects are allocated until [`upload`](Self::upload).
    pub fn new(api: &Rc<dyn GraphicsApi>) -> Self {
        Self {
            api: Rc::clone(api),
            vertex_array: None,
            vertex_buffer: None,
            index_buffer: None,
            index_count: 0,
        }
    }

    /// Uploads `mesh`'s positions and triangle indices.
    ///
    /// The vertex layout is attribute 0 = tightly packed 3xf32 position;
    /// texcoords and normals are not part of the current layout. Uploading
    /// twice, or uploading an empty mesh, is a usage error.
    pub fn upload(&mut self, mesh: &MeshAsset) -> Result<(), RenderError> {
        if self.vertex_array.is_some() {
            return Err(RenderError::Usage(
                "mesh already uploaded; create a new renderer for new geometry".into(),
            ));
        }
        if mesh.is_empty() {
            return Err(RenderError::Usage("cannot upload an empty mesh".into()));
        }

        let vertex_array = self.api.create_vertex_array()?;
        self.api.bind_vertex_array(Some(vertex_array));
        // create_buffer leaves each buffer bound, so the index binding and
        // the attribute pointer below are captured by the vertex array.
        let vertex_buffer = self
            .api
            .create_buffer(BufferKind::Vertex, bytemuck::cast_slice(&mesh.positions))?;
        let index_buffer = self
            .api
            .create_buffer(BufferKind::Index, bytemuck::cast_slice(&mesh.indices))?;
        self.api
            .vertex_attrib_f32(0, 3, 3 * std::mem::size_of::<f32>() as i32, 0);
        self.api.bind_vertex_array(None);
        self.api.bind_buffer(BufferKind::Vertex, None);

        self.vertex_array = Some(vertex_array);
        self.vertex_buffer = Some(vertex_buffer);
        self.index_buffer = Some(index_buffer);
        self.index_count = mesh.index_count() as i32;
        Ok(())
    }

    #[inline]
    pub fn is_uploaded(&self) -> bool {
        self.vertex_array.is_some()
    }

    /// Issues one indexed triangle draw over the uploaded mesh.
    ///
    /// The caller supplies the matrices through `program`'s uniforms before
    /// or after binding; this method only owns the draw protocol.
    pub fn render(&self, program: &ShaderProgram) -> Result<(), RenderError> {
        let Some(vertex_array) = self.vertex_array else {
            return Err(RenderError::Usage(
                "render called before upload".into(),
            ));
        };

        // Fixed-function state is context-global; another pass may have
        // changed it since the last frame.
        self.api.set_depth_test(true);
        self.api.set_face_culling(false);

        program.bind();
        self.api.bind_vertex_array(Some(vertex_array));
        self.api.draw_indexed_triangles(self.index_count);
        self.api.bind_vertex_array(None);
        Ok(())
    }
}

impl Drop for StaticMeshRenderer {
    fn drop(&mut self) {
        // Objects never allocated (upload not reached) have nothing to release.
        if let Some(vertex_array) = self.vertex_array.take() {
            self.api.delete_vertex_array(vertex_array);
        }
        if let Some(vertex_buffer) = self.vertex_buffer.take() {
            self.api.delete_buffer(vertex_buffer);
        }
        if let Some(index_buffer) = self.index_buffer.take() {
            self.api.delete_buffer(index_buffer);
        }
    }
}
