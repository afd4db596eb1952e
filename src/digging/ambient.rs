//! Ambient background theme driven by the hovered and playing tracks.
//!
//! Priority is hover, then playing, then the idle palette. Palettes are
//! resolved as soon as a slot changes; easing between them is left to the
//! renderer.

use serde::Serialize;

use super::theme::{Color, DEFAULT_PALETTE, MoodPalette, MoodSource, palette_for_track};

/// Final stop of the diagonal wash.
const BACKDROP_BASE: Color = Color::hex(0x0a0a0f);

/// One blurred radial blob of the backdrop.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BackdropBlob {
	/// Center, as fractions of the viewport.
	pub center: (f64, f64),
	/// Diameter as a fraction of the viewport's larger side.
	pub size: f64,
	/// CSS color at the center.
	pub inner: String,
	/// CSS color at the edge.
	pub outer: String,
}

/// Color layers for the ambient background.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AmbientBackdrop {
	/// Radial blobs, back to front.
	pub blobs: Vec<BackdropBlob>,
	/// Diagonal linear gradient stops, top-left to bottom-right.
	pub wash: [String; 3],
}

impl AmbientBackdrop {
	fn from_palette(palette: MoodPalette) -> Self {
		let blob = |center, size, color: Color| BackdropBlob {
			center,
			size,
			inner: color.with_alpha(0x80 as f64 / 255.0).to_css(),
			outer: color.with_alpha(0x40 as f64 / 255.0).to_css(),
		};
		Self {
			blobs: vec![
				blob((0.2, 0.3), 0.8, palette.primary),
				blob((0.7, 0.6), 0.6, palette.secondary),
				blob((0.5, 0.8), 0.5, palette.primary),
			],
			wash: [
				palette.primary.with_alpha(0x22 as f64 / 255.0).to_css(),
				palette.secondary.with_alpha(0x11 as f64 / 255.0).to_css(),
				BACKDROP_BASE.to_css(),
			],
		}
	}
}

/// Holds the hovered and playing slots for one session.
#[derive(Clone, Debug, Default)]
pub struct AmbientThemeController {
	hovered: Option<MoodPalette>,
	playing: Option<MoodPalette>,
}

impl AmbientThemeController {
	/// Controller with both slots empty.
	pub fn new() -> Self {
		Self::default()
	}

	/// Set or clear the hovered track.
	pub fn set_hovered(&mut self, track: Option<&dyn MoodSource>) {
		self.hovered = track.map(palette_for_track);
	}

	/// Set or clear the playing track.
	pub fn set_playing(&mut self, track: Option<&dyn MoodSource>) {
		self.playing = track.map(palette_for_track);
	}

	/// Palette of the hovered track, if any.
	pub fn hovered_palette(&self) -> Option<MoodPalette> {
		self.hovered
	}

	/// Palette of the playing track, if any.
	pub fn playing_palette(&self) -> Option<MoodPalette> {
		self.playing
	}

	/// Hovered, else playing, else the idle palette.
	pub fn active_palette(&self) -> MoodPalette {
		self.hovered.or(self.playing).unwrap_or(DEFAULT_PALETTE)
	}

	/// Color layers for the active palette.
	pub fn backdrop(&self) -> AmbientBackdrop {
		AmbientBackdrop::from_palette(self.active_palette())
	}
}
