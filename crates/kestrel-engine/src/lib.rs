//! Kestrel engine crate.
//!
//! This crate owns the resource-backed rendering core used by higher layers:
//! shader programs, textures, mesh assets and the two draw-call
//! orchestrators (static meshes and layered 2-D sprites).
//!
//! Windowing, input and the per-frame orchestration loop live outside; the
//! embedding layer hands this crate a current OpenGL context (via its
//! entry-point resolver) and calls the renderers once per frame. Everything
//! here is single-threaded and must run on the thread owning the context.

pub mod device;
pub mod render;
pub mod resources;

pub mod coords;
pub mod error;
pub mod logging;
