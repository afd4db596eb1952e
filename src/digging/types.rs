//! Track, node and edge data exchanged with the music services and the renderer.
//!
//! Upstream responses are treated as partial: every field the engine reads has
//! an explicit default, so a missing or malformed value never becomes an error.

use std::hash::{DefaultHasher, Hash, Hasher};
use std::ops::Add;

use serde::{Deserialize, Serialize};

/// Prefix used for ids synthesized from title and artist.
pub const SYNTHETIC_ID_PREFIX: &str = "track-";

const DEFAULT_TEMPO: f64 = 120.0;
const DEFAULT_UNIT: f64 = 0.5;
const DEFAULT_LOUDNESS: f64 = -10.0;

/// Audio descriptors of a track as reported by the provider.
///
/// Every field is optional. Accessors fall back to fixed defaults when a value
/// is absent or not a finite number.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioFeatures {
	/// Beats per minute, typically 60..200.
	pub tempo: Option<f64>,
	/// 0..1
	pub acousticness: Option<f64>,
	/// 0..1
	pub instrumentalness: Option<f64>,
	/// 0..1, musical positiveness.
	pub valence: Option<f64>,
	/// 0..1
	pub energy: Option<f64>,
	/// Decibels, typically -60..0.
	pub loudness: Option<f64>,
}

fn or_default(value: Option<f64>, default: f64) -> f64 {
	value.filter(|v| v.is_finite()).unwrap_or(default)
}

impl AudioFeatures {
	/// Tempo in BPM, default 120.
	pub fn tempo(&self) -> f64 {
		or_default(self.tempo, DEFAULT_TEMPO)
	}

	/// Acousticness, default 0.5.
	pub fn acousticness(&self) -> f64 {
		or_default(self.acousticness, DEFAULT_UNIT)
	}

	/// Instrumentalness, default 0.5.
	pub fn instrumentalness(&self) -> f64 {
		or_default(self.instrumentalness, DEFAULT_UNIT)
	}

	/// Valence, default 0.5.
	pub fn valence(&self) -> f64 {
		or_default(self.valence, DEFAULT_UNIT)
	}

	/// Energy, default 0.5.
	pub fn energy(&self) -> f64 {
		or_default(self.energy, DEFAULT_UNIT)
	}

	/// Loudness in dB, default -10.
	pub fn loudness(&self) -> f64 {
		or_default(self.loudness, DEFAULT_LOUDNESS)
	}
}

/// A position in scene space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point3 {
	/// Texture axis.
	pub x: f64,
	/// Tempo axis.
	pub y: f64,
	/// Mood axis.
	pub z: f64,
}

impl Point3 {
	/// The neutral point, used for tracks without features.
	pub const ORIGIN: Point3 = Point3 {
		x: 0.0,
		y: 0.0,
		z: 0.0,
	};

	/// Point from coordinates.
	pub const fn new(x: f64, y: f64, z: f64) -> Self {
		Self { x, y, z }
	}

	/// Clamp every coordinate to [-1, 1].
	pub fn clamp_unit(self) -> Self {
		Self {
			x: self.x.clamp(-1.0, 1.0),
			y: self.y.clamp(-1.0, 1.0),
			z: self.z.clamp(-1.0, 1.0),
		}
	}

	/// Multiply every coordinate by `factor`.
	pub fn scale(self, factor: f64) -> Self {
		Self {
			x: self.x * factor,
			y: self.y * factor,
			z: self.z * factor,
		}
	}
}

impl Add for Point3 {
	type Output = Point3;

	fn add(self, rhs: Point3) -> Point3 {
		Point3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
	}
}

/// A track as returned by the resolve / similar / related services.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TrackRecord {
	/// Provider id, preferred as node id.
	pub id: Option<String>,
	/// Track title.
	pub title: String,
	/// Artist name.
	pub artist: String,
	/// YouTube video id.
	pub video_id: Option<String>,
	/// Thumbnail URL.
	pub thumbnail: Option<String>,
	/// Artist image URL.
	pub artist_image: Option<String>,
	/// 30 second preview URL.
	pub preview_url: Option<String>,
	/// Spotify track id.
	pub spotify_id: Option<String>,
	/// Audio features, also accepted as `features`.
	#[serde(alias = "features")]
	pub audio_features: Option<AudioFeatures>,
	/// Genre tags.
	pub genres: Vec<String>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
	value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl TrackRecord {
	/// Stable node id: the explicit id, then the Spotify id, then the video id.
	/// Falls back to an id hashed from title and artist.
	pub fn node_id(&self) -> String {
		non_empty(&self.id)
			.or_else(|| non_empty(&self.spotify_id))
			.or_else(|| non_empty(&self.video_id))
			.map(str::to_string)
			.unwrap_or_else(|| self.synthetic_id())
	}

	fn synthetic_id(&self) -> String {
		let mut hasher = DefaultHasher::new();
		self.title.trim().to_lowercase().hash(&mut hasher);
		self.artist.trim().to_lowercase().hash(&mut hasher);
		format!("{SYNTHETIC_ID_PREFIX}{:016x}", hasher.finish())
	}

	/// Image to show for the node: artist image, thumbnail, then the
	/// YouTube still for the video id.
	pub fn artwork_url(&self) -> Option<String> {
		non_empty(&self.artist_image)
			.or_else(|| non_empty(&self.thumbnail))
			.map(str::to_string)
			.or_else(|| {
				non_empty(&self.video_id)
					.map(|vid| format!("https://img.youtube.com/vi/{vid}/mqdefault.jpg"))
			})
	}
}

/// Input to the cluster placer: an id and whatever features are known.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Candidate {
	/// Node id the candidate would get.
	pub id: String,
	/// Features, if known. Without them the candidate is jittered.
	pub features: Option<AudioFeatures>,
}

impl From<&TrackRecord> for Candidate {
	fn from(track: &TrackRecord) -> Self {
		Self {
			id: track.node_id(),
			features: track.audio_features,
		}
	}
}

/// A track placed in the digging graph.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackNode {
	/// Unique node id.
	pub id: String,
	/// Track title.
	pub title: String,
	/// Artist name.
	pub artist: String,
	/// Artwork URL.
	pub artist_image: Option<String>,
	/// Preview URL.
	pub preview_url: Option<String>,
	/// Spotify id, used as the expansion seed.
	pub spotify_id: Option<String>,
	/// YouTube video id.
	pub video_id: Option<String>,
	/// Genre tags.
	pub genres: Vec<String>,
	/// Audio features, if known.
	pub audio_features: Option<AudioFeatures>,
	/// Fixed at creation.
	pub position: Point3,
	/// `None` only for the root.
	pub parent_id: Option<String>,
}

impl TrackNode {
	pub(crate) fn from_record(
		id: String,
		track: &TrackRecord,
		position: Point3,
		parent_id: Option<String>,
	) -> Self {
		Self {
			id,
			title: track.title.clone(),
			artist: track.artist.clone(),
			artist_image: track.artwork_url(),
			preview_url: track.preview_url.clone(),
			spotify_id: non_empty(&track.spotify_id).map(str::to_string),
			video_id: non_empty(&track.video_id).map(str::to_string),
			genres: track.genres.clone(),
			audio_features: track.audio_features,
			position,
			parent_id,
		}
	}

	/// True for the node without a parent.
	pub fn is_root(&self) -> bool {
		self.parent_id.is_none()
	}
}

/// Snapshot of a parent→child link, positions copied at creation.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Edge {
	/// Parent node id.
	pub source: String,
	/// Child node id.
	pub target: String,
	/// Parent position.
	pub from: Point3,
	/// Child position.
	pub to: Point3,
}

/// Read-only copy of a graph handed to the renderer.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct GraphSnapshot {
	/// All nodes, root first.
	pub nodes: Vec<TrackNode>,
	/// All edges.
	pub edges: Vec<Edge>,
}
