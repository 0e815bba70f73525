//! Rendering of pipeline outcomes.
//!
//! # Submodules
//!
//! - [`html`]: the server-rendered SnapNews page
//! - [`json`]: response bodies for the `/api` routes
//!
//! Neither module performs I/O; the web handlers write what these produce.

pub mod html;
pub mod json;
