//! Mood palettes for ambient theming.
//!
//! A palette is resolved from genre tags plus mood tags derived from audio
//! features, by substring matching against an ordered keyword table.

use log::debug;
use serde::{Serialize, Serializer};

use super::types::{AudioFeatures, TrackNode, TrackRecord};

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	/// Red.
	pub r: u8,
	/// Green.
	pub g: u8,
	/// Blue.
	pub b: u8,
	/// Alpha, 0..1.
	pub a: f64,
}

impl Color {
	/// Opaque color.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// Build an opaque color from a `0xRRGGBB` literal.
	pub const fn hex(value: u32) -> Self {
		Self::rgb((value >> 16) as u8, (value >> 8) as u8, value as u8)
	}

	/// Same color with alpha `a`.
	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// CSS color: hex when opaque, `rgba()` otherwise.
	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			self.to_css_rgb()
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}

	/// CSS hex color, ignoring alpha.
	pub fn to_css_rgb(self) -> String {
		format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
	}
}

/// Ordered `[primary, secondary]` color pair. Serializes as two hex strings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MoodPalette {
	/// Dominant color.
	pub primary: Color,
	/// Accent color.
	pub secondary: Color,
}

impl MoodPalette {
	/// Palette from two `0xRRGGBB` literals.
	pub const fn new(primary: u32, secondary: u32) -> Self {
		Self {
			primary: Color::hex(primary),
			secondary: Color::hex(secondary),
		}
	}

	/// `[primary, secondary]` as CSS hex strings.
	pub fn hex(&self) -> [String; 2] {
		[self.primary.to_css_rgb(), self.secondary.to_css_rgb()]
	}
}

impl Serialize for MoodPalette {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		self.hex().serialize(serializer)
	}
}

/// Idle palette (onyx / midnight).
pub const DEFAULT_PALETTE: MoodPalette = MoodPalette::new(0x0a0a0f, 0x1a1a2e);

const OXBLOOD_GOLD: MoodPalette = MoodPalette::new(0x4a0404, 0xd4af37);
const SLATE_AMETHYST: MoodPalette = MoodPalette::new(0x2c3e50, 0x8e44ad);
const FOREST_MINT: MoodPalette = MoodPalette::new(0x1b4332, 0xd8f3dc);
const BLACK_NAVY: MoodPalette = MoodPalette::new(0x000000, 0x14213d);

/// Keyword table. Order decides which key wins when a tag matches several.
pub const MOOD_PALETTES: &[(&str, MoodPalette)] = &[
	("energetic", OXBLOOD_GOLD),
	("epic", OXBLOOD_GOLD),
	("ethereal", SLATE_AMETHYST),
	("chill", SLATE_AMETHYST),
	("organic", FOREST_MINT),
	("happy", FOREST_MINT),
	("dark", BLACK_NAVY),
	("sad", BLACK_NAVY),
	("indie", SLATE_AMETHYST),
	("lo-fi", SLATE_AMETHYST),
	("ambient", SLATE_AMETHYST),
	("rock", OXBLOOD_GOLD),
	("metal", MoodPalette::new(0x4a0404, 0x000000)),
	("pop", FOREST_MINT),
	("jazz", MoodPalette::new(0x1b4332, 0x2c3e50)),
	("classical", MoodPalette::new(0x2c3e50, 0xd4af37)),
];

/// Anything carrying genre tags and audio features can drive the theme.
pub trait MoodSource {
	/// Genre tags, in provider order.
	fn genres(&self) -> &[String];
	/// Audio features, if known.
	fn audio_features(&self) -> Option<&AudioFeatures>;
}

impl MoodSource for TrackRecord {
	fn genres(&self) -> &[String] {
		&self.genres
	}

	fn audio_features(&self) -> Option<&AudioFeatures> {
		self.audio_features.as_ref()
	}
}

impl MoodSource for TrackNode {
	fn genres(&self) -> &[String] {
		&self.genres
	}

	fn audio_features(&self) -> Option<&AudioFeatures> {
		self.audio_features.as_ref()
	}
}

/// Mood tags implied by audio features. At most one group applies; the first
/// matching rule wins.
pub fn mood_tags_from_features(features: Option<&AudioFeatures>) -> &'static [&'static str] {
	let Some(f) = features else {
		return &[];
	};
	let (valence, energy) = (f.valence(), f.energy());

	if energy > 0.7 && f.loudness() > -8.0 {
		&["energetic", "epic"]
	} else if valence > 0.6 && energy < 0.4 {
		&["ethereal", "chill"]
	} else if f.acousticness() > 0.6 {
		&["organic", "happy"]
	} else if valence < 0.3 && energy < 0.4 {
		&["dark", "sad"]
	} else {
		&[]
	}
}

/// Palette of the first table key that any tag contains or is contained by.
///
/// Tags are compared lower-cased and untrimmed. An empty tag is contained in
/// every key, so it matches the first one.
pub fn palette_from_tags<S: AsRef<str>>(tags: &[S]) -> MoodPalette {
	let lower: Vec<String> = tags.iter().map(|t| t.as_ref().to_lowercase()).collect();
	if lower.is_empty() {
		return DEFAULT_PALETTE;
	}

	for (key, palette) in MOOD_PALETTES {
		if lower
			.iter()
			.any(|tag| tag.contains(key) || key.contains(tag.as_str()))
		{
			debug!("palette: matched '{}' from {:?}", key, lower);
			return *palette;
		}
	}
	DEFAULT_PALETTE
}

/// Resolve the palette for genre tags plus feature-derived mood tags.
/// Genre tags are considered before mood tags but the table order decides.
pub fn resolve_palette<S: AsRef<str>>(
	genre_tags: &[S],
	features: Option<&AudioFeatures>,
) -> MoodPalette {
	let mut tags: Vec<&str> = genre_tags.iter().map(AsRef::as_ref).collect();
	tags.extend_from_slice(mood_tags_from_features(features));
	palette_from_tags(tags.as_slice())
}

/// Palette for a track's genres and features.
pub fn palette_for_track<T: MoodSource + ?Sized>(track: &T) -> MoodPalette {
	resolve_palette(track.genres(), track.audio_features())
}

#[cfg(test)]
mod tests {
	use super::*;

	const NO_TAGS: &[&str] = &[];

	#[test]
	fn empty_input_returns_default() {
		assert_eq!(resolve_palette(NO_TAGS, None), DEFAULT_PALETTE);
		assert_eq!(DEFAULT_PALETTE.hex(), ["#0a0a0f", "#1a1a2e"]);
	}

	#[test]
	fn sad_tag_resolves_dark_palette() {
		assert_eq!(resolve_palette(&["sad"], None).hex(), ["#000000", "#14213d"]);
	}

	#[test]
	fn energetic_rule_wins_over_acoustic() {
		let f = AudioFeatures {
			energy: Some(0.9),
			loudness: Some(-5.0),
			valence: Some(0.5),
			acousticness: Some(0.9),
			..Default::default()
		};
		assert_eq!(mood_tags_from_features(Some(&f)), &["energetic", "epic"]);
		assert_eq!(resolve_palette(NO_TAGS, Some(&f)).hex(), ["#4a0404", "#d4af37"]);
	}

	#[test]
	fn feature_rules_in_order() {
		let calm_bright = AudioFeatures {
			valence: Some(0.8),
			energy: Some(0.2),
			..Default::default()
		};
		assert_eq!(mood_tags_from_features(Some(&calm_bright)), &["ethereal", "chill"]);

		let acoustic = AudioFeatures {
			acousticness: Some(0.7),
			..Default::default()
		};
		assert_eq!(mood_tags_from_features(Some(&acoustic)), &["organic", "happy"]);

		let gloomy = AudioFeatures {
			valence: Some(0.1),
			energy: Some(0.3),
			..Default::default()
		};
		assert_eq!(mood_tags_from_features(Some(&gloomy)), &["dark", "sad"]);

		assert!(mood_tags_from_features(Some(&AudioFeatures::default())).is_empty());
		assert!(mood_tags_from_features(None).is_empty());
	}

	#[test]
	fn substring_match_works_both_ways() {
		// "alternative rock" contains "rock"
		assert_eq!(palette_from_tags(&["Alternative Rock"]), OXBLOOD_GOLD);
		// "lo" is contained in "lo-fi"
		assert_eq!(palette_from_tags(&["lo"]), SLATE_AMETHYST);
	}

	#[test]
	fn table_order_breaks_ties() {
		// "indie rock" hits both "indie" and "rock"; "indie" is declared first.
		assert_eq!(palette_from_tags(&["indie rock"]), SLATE_AMETHYST);
		// genre tag "jazz" loses to the earlier "dark" key from features
		let gloomy = AudioFeatures {
			valence: Some(0.1),
			energy: Some(0.3),
			..Default::default()
		};
		assert_eq!(resolve_palette(&["jazz"], Some(&gloomy)), BLACK_NAVY);
	}

	#[test]
	fn unknown_tags_fall_back() {
		assert_eq!(palette_from_tags(&["polka"]), DEFAULT_PALETTE);
		assert_eq!(palette_from_tags(&["   "]), DEFAULT_PALETTE);
	}

	#[test]
	fn empty_tag_matches_first_key() {
		assert_eq!(resolve_palette(&[""], None).hex(), ["#4a0404", "#d4af37"]);
		// untrimmed, but the padded tag still contains the key
		assert_eq!(palette_from_tags(&[" jazz "]), MoodPalette::new(0x1b4332, 0x2c3e50));
	}

	#[test]
	fn palette_serializes_as_hex_pair() {
		let json = serde_json::to_string(&BLACK_NAVY).unwrap();
		assert_eq!(json, r##"["#000000","#14213d"]"##);
	}

	#[test]
	fn color_css_output() {
		let c = Color::hex(0x2c3e50);
		assert_eq!(c.to_css(), "#2c3e50");
		assert_eq!(c.with_alpha(0.5).to_css(), "rgba(44, 62, 80, 0.5)");
	}
}
