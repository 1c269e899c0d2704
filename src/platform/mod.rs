//! Platform abstraction layer
//!
//! The simulation itself is platform-free. Browser builds get a
//! `wasm-bindgen` handle that a JS renderer drives once per animation frame.

#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(target_arch = "wasm32")]
pub use web::WebLine;
