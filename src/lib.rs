//! digging-engine: feature-space mapping and graph expansion for track digging.
//!
//! This crate positions tracks in a synthetic 3D space derived from their audio
//! features, grows a graph of related tracks as the user digs deeper, and
//! resolves mood palettes for ambient theming. The [`bindings`] module exposes
//! the same operations to a JavaScript UI through `wasm-bindgen`.

use log::info;

#[cfg(target_arch = "wasm32")]
use getrandom as _;

pub mod bindings;
pub mod digging;

pub use digging::{
	AmbientThemeController, AudioFeatures, DiggingError, DiggingGraph, GraphSnapshot, LayoutConfig,
	MoodPalette, Point3, TrackNode, TrackRecord, map_to_position, resolve_palette,
};

/// Initialize logging and panic hooks for the WASM target.
#[cfg(target_arch = "wasm32")]
pub fn init_logging() {
	let _ = console_log::init_with_level(log::Level::Debug);
	console_error_panic_hook::set_once();
	info!("digging-engine: logging initialized");
}

/// Initialize `env_logger` (default filter `info`, overridable with `RUST_LOG`).
#[cfg(not(target_arch = "wasm32"))]
pub fn init_logging() {
	let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
		.try_init();
	info!("digging-engine: logging initialized");
}
