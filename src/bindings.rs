//! `wasm-bindgen` exports for the JavaScript UI.
//!
//! Everything crosses the boundary as JSON strings so the UI can pass the
//! service responses straight through. Errors are thrown as JS strings.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use wasm_bindgen::prelude::*;

use crate::digging::{
	AmbientThemeController, AudioFeatures, DiggingGraph, LayoutConfig, MoodSource, Result,
	TrackRecord, map_to_position, parse_search_metadata, resolve_palette,
};

fn to_js(err: crate::DiggingError) -> JsValue {
	JsValue::from_str(&err.to_string())
}

/// `None`, an empty string and `"null"` all mean "absent".
fn parse_optional<T: DeserializeOwned>(json: Option<&str>) -> Result<Option<T>> {
	match json.map(str::trim) {
		None | Some("") => Ok(None),
		Some(s) => Ok(serde_json::from_str(s)?),
	}
}

/// Related-track services answer either with a bare list or `{ "tracks": [...] }`.
#[derive(Deserialize)]
#[serde(untagged)]
enum CandidatesPayload {
	List(Vec<TrackRecord>),
	Wrapped { tracks: Vec<TrackRecord> },
}

impl CandidatesPayload {
	fn into_tracks(self) -> Vec<TrackRecord> {
		match self {
			CandidatesPayload::List(tracks) | CandidatesPayload::Wrapped { tracks } => tracks,
		}
	}
}

fn map_to_position_inner(features_json: Option<&str>) -> Result<String> {
	let features: Option<AudioFeatures> = parse_optional(features_json)?;
	Ok(serde_json::to_string(&map_to_position(features.as_ref()))?)
}

fn resolve_palette_inner(tags_json: &str, features_json: Option<&str>) -> Result<String> {
	let tags: Vec<String> = parse_optional(Some(tags_json))?.unwrap_or_default();
	let features: Option<AudioFeatures> = parse_optional(features_json)?;
	Ok(serde_json::to_string(&resolve_palette(tags.as_slice(), features.as_ref()))?)
}

/// Feature-space point for a feature vector (JSON object or null).
#[wasm_bindgen(js_name = mapToPosition)]
pub fn map_to_position_json(features_json: Option<String>) -> std::result::Result<String, JsValue> {
	map_to_position_inner(features_json.as_deref()).map_err(to_js)
}

/// `[primary, secondary]` hex palette for genre tags and features.
#[wasm_bindgen(js_name = resolvePalette)]
pub fn resolve_palette_json(
	tags_json: &str,
	features_json: Option<String>,
) -> std::result::Result<String, JsValue> {
	resolve_palette_inner(tags_json, features_json.as_deref()).map_err(to_js)
}

/// Search query to `{ cleanQuery, filters }` JSON.
#[wasm_bindgen(js_name = parseSearchMetadata)]
pub fn parse_search_metadata_json(query: &str) -> std::result::Result<String, JsValue> {
	serde_json::to_string(&parse_search_metadata(query)).map_err(|e| to_js(e.into()))
}

/// One digging view: its graph plus the ambient theme.
#[wasm_bindgen]
pub struct DiggingSession {
	graph: DiggingGraph,
	ambient: AmbientThemeController,
}

impl DiggingSession {
	fn with_config_json(config_json: Option<&str>) -> Result<Self> {
		let config: LayoutConfig = parse_optional(config_json)?.unwrap_or_default();
		Ok(Self {
			graph: DiggingGraph::with_config(config)?,
			ambient: AmbientThemeController::new(),
		})
	}

	fn set_root_inner(&mut self, track_json: &str) -> Result<String> {
		let track: TrackRecord = serde_json::from_str(track_json)?;
		let root = self.graph.set_root(&track);
		Ok(serde_json::to_string(root)?)
	}

	fn expand_inner(&mut self, node_id: &str, candidates_json: &str) -> Result<String> {
		let tracks = parse_optional::<CandidatesPayload>(Some(candidates_json))?
			.map(CandidatesPayload::into_tracks)
			.unwrap_or_default();
		let outcome = self.graph.expand(node_id, &tracks)?;
		Ok(serde_json::to_string(&outcome)?)
	}

	fn snapshot_inner(&self) -> Result<String> {
		Ok(serde_json::to_string(&self.graph.snapshot())?)
	}

	fn set_hovered_inner(&mut self, track_json: Option<&str>) -> Result<()> {
		let track: Option<TrackRecord> = parse_optional(track_json)?;
		self.ambient.set_hovered(track.as_ref().map(|t| t as &dyn MoodSource));
		Ok(())
	}

	fn set_playing_inner(&mut self, track_json: Option<&str>) -> Result<()> {
		let track: Option<TrackRecord> = parse_optional(track_json)?;
		self.ambient.set_playing(track.as_ref().map(|t| t as &dyn MoodSource));
		Ok(())
	}

	fn active_palette_inner(&self) -> Result<String> {
		Ok(serde_json::to_string(&self.ambient.active_palette())?)
	}

	fn backdrop_inner(&self) -> Result<String> {
		Ok(serde_json::to_string(&self.ambient.backdrop())?)
	}
}

#[wasm_bindgen]
impl DiggingSession {
	/// Optional JSON `LayoutConfig`; missing fields keep their defaults.
	#[wasm_bindgen(constructor)]
	pub fn new(config_json: Option<String>) -> std::result::Result<DiggingSession, JsValue> {
		Self::with_config_json(config_json.as_deref()).map_err(to_js)
	}

	/// Start a new graph from a resolved track; returns the root node.
	#[wasm_bindgen(js_name = setRoot)]
	pub fn set_root(&mut self, track_json: &str) -> std::result::Result<String, JsValue> {
		self.set_root_inner(track_json).map_err(to_js)
	}

	/// Merge related tracks under `node_id`; returns the expand outcome.
	pub fn expand(
		&mut self,
		node_id: &str,
		candidates_json: &str,
	) -> std::result::Result<String, JsValue> {
		self.expand_inner(node_id, candidates_json).map_err(to_js)
	}

	/// Drop every node and edge.
	pub fn reset(&mut self) {
		self.graph.reset();
	}

	/// Current nodes and edges as JSON.
	pub fn snapshot(&self) -> std::result::Result<String, JsValue> {
		self.snapshot_inner().map_err(to_js)
	}

	/// Id to send to the similar-tracks service, if the node has a resolvable one.
	#[wasm_bindgen(js_name = expansionSeed)]
	pub fn expansion_seed(&self, node_id: &str) -> Option<String> {
		self.graph.expansion_seed(node_id).map(str::to_string)
	}

	/// Hovered track JSON, or null when the pointer leaves.
	#[wasm_bindgen(js_name = setHovered)]
	pub fn set_hovered(&mut self, track_json: Option<String>) -> std::result::Result<(), JsValue> {
		self.set_hovered_inner(track_json.as_deref()).map_err(to_js)
	}

	/// Playing track JSON, or null when playback stops.
	#[wasm_bindgen(js_name = setPlaying)]
	pub fn set_playing(&mut self, track_json: Option<String>) -> std::result::Result<(), JsValue> {
		self.set_playing_inner(track_json.as_deref()).map_err(to_js)
	}

	/// Active `[primary, secondary]` palette as JSON.
	#[wasm_bindgen(js_name = activePalette)]
	pub fn active_palette(&self) -> std::result::Result<String, JsValue> {
		self.active_palette_inner().map_err(to_js)
	}

	/// Backdrop layers for the active palette as JSON.
	pub fn backdrop(&self) -> std::result::Result<String, JsValue> {
		self.backdrop_inner().map_err(to_js)
	}
}
