//! Digging graph state.
//!
//! Holds the root track of a search and every track discovered by expanding
//! nodes below it. Positions and parents are fixed when a node is inserted;
//! the graph only grows until it is reset or re-rooted.
//!
//! Expansion merges are idempotent: a candidate whose id is already present
//! is skipped, so re-expanding a node (or racing two expansions that return
//! overlapping tracks) never duplicates nodes or edges.

use std::collections::HashMap;

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use super::error::{DiggingError, Result};
use super::features::map_to_position;
use super::placement::ClusterPlacer;
use super::scale::LayoutConfig;
use super::types::{Candidate, Edge, GraphSnapshot, SYNTHETIC_ID_PREFIX, TrackNode, TrackRecord};

/// Lifecycle of a graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GraphPhase {
	/// No root yet.
	Empty,
	/// A root and nothing else has happened.
	Rooted,
	/// Number of successful expand calls since the root was set.
	Expanded(usize),
}

/// What a single `expand` call did.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ExpandOutcome {
	/// Ids inserted, in placement order.
	pub added: Vec<String>,
	/// Ids already present in the graph.
	pub skipped: Vec<String>,
	/// Candidates past the per-expansion limit.
	pub dropped: usize,
}

/// Mutable graph of tracks owned by one UI session.
///
/// `R` is the randomness source for featureless candidates; tests pass a
/// seeded [`StdRng`].
pub struct DiggingGraph<R = StdRng> {
	placer: ClusterPlacer,
	nodes: Vec<TrackNode>,
	index: HashMap<String, usize>,
	edges: Vec<Edge>,
	expansions: usize,
	rng: R,
}

impl DiggingGraph<StdRng> {
	/// Empty graph with the default layout, seeded from entropy.
	pub fn new() -> Self {
		Self::from_parts(ClusterPlacer::default(), StdRng::from_entropy())
	}

	/// Empty graph with a custom layout. Rejects invalid configs.
	pub fn with_config(config: LayoutConfig) -> Result<Self> {
		Self::with_rng(config, StdRng::from_entropy())
	}
}

impl Default for DiggingGraph<StdRng> {
	fn default() -> Self {
		Self::new()
	}
}

impl<R: Rng> DiggingGraph<R> {
	/// Empty graph drawing jitter from `rng`. Rejects invalid configs.
	pub fn with_rng(config: LayoutConfig, rng: R) -> Result<Self> {
		Ok(Self::from_parts(ClusterPlacer::new(config)?, rng))
	}

	fn from_parts(placer: ClusterPlacer, rng: R) -> Self {
		Self {
			placer,
			nodes: Vec::new(),
			index: HashMap::new(),
			edges: Vec::new(),
			expansions: 0,
			rng,
		}
	}

	/// Layout used for child placement.
	pub fn config(&self) -> &LayoutConfig {
		self.placer.config()
	}

	/// Replace the whole graph with a single root placed at the track's
	/// feature point.
	pub fn set_root(&mut self, track: &TrackRecord) -> &TrackNode {
		self.clear();
		let id = track.node_id();
		let position = map_to_position(track.audio_features.as_ref());
		info!(
			"digging: new root '{}' ({} - {}) at ({:.3}, {:.3}, {:.3})",
			id, track.title, track.artist, position.x, position.y, position.z
		);
		self.insert(TrackNode::from_record(id, track, position, None));
		&self.nodes[0]
	}

	/// Add related tracks as children of `node_id`.
	///
	/// Fails without touching the graph when `node_id` is unknown. An empty
	/// candidate list succeeds and adds nothing.
	pub fn expand(&mut self, node_id: &str, candidates: &[TrackRecord]) -> Result<ExpandOutcome> {
		let Some(parent) = self.node(node_id) else {
			warn!("digging: cannot expand unknown node '{}'", node_id);
			return Err(DiggingError::NodeNotFound(node_id.to_string()));
		};
		let (parent_id, parent_pos) = (parent.id.clone(), parent.position);

		let limit = self.config().max_children;
		let batch = &candidates[..candidates.len().min(limit)];
		let placeable: Vec<Candidate> = batch.iter().map(Candidate::from).collect();
		let placed = self.placer.place(parent_pos, &placeable, &mut self.rng);

		let mut outcome = ExpandOutcome {
			dropped: candidates.len() - batch.len(),
			..Default::default()
		};
		for (child, track) in placed.into_iter().zip(batch) {
			if self.index.contains_key(&child.id) {
				debug!("digging: '{}' already in graph, skipping", child.id);
				outcome.skipped.push(child.id);
				continue;
			}
			self.edges.push(Edge {
				source: parent_id.clone(),
				target: child.id.clone(),
				from: parent_pos,
				to: child.position,
			});
			self.insert(TrackNode::from_record(
				child.id.clone(),
				track,
				child.position,
				Some(parent_id.clone()),
			));
			outcome.added.push(child.id);
		}

		self.expansions += 1;
		info!(
			"digging: expanded '{}': {} added, {} skipped, {} dropped",
			parent_id,
			outcome.added.len(),
			outcome.skipped.len(),
			outcome.dropped
		);
		Ok(outcome)
	}

	/// Back to an empty graph.
	pub fn reset(&mut self) {
		self.clear();
	}

	fn clear(&mut self) {
		self.nodes.clear();
		self.index.clear();
		self.edges.clear();
		self.expansions = 0;
	}

	fn insert(&mut self, node: TrackNode) {
		self.index.insert(node.id.clone(), self.nodes.len());
		self.nodes.push(node);
	}
}

impl<R> DiggingGraph<R> {
	/// Where the graph is in its lifecycle.
	pub fn phase(&self) -> GraphPhase {
		match (self.nodes.is_empty(), self.expansions) {
			(true, _) => GraphPhase::Empty,
			(false, 0) => GraphPhase::Rooted,
			(false, n) => GraphPhase::Expanded(n),
		}
	}

	/// Nodes in insertion order; the root comes first.
	pub fn nodes(&self) -> &[TrackNode] {
		&self.nodes
	}

	/// Edges in insertion order.
	pub fn edges(&self) -> &[Edge] {
		&self.edges
	}

	/// Node by id.
	pub fn node(&self, id: &str) -> Option<&TrackNode> {
		self.index.get(id).map(|&i| &self.nodes[i])
	}

	/// The root node, if any.
	pub fn root(&self) -> Option<&TrackNode> {
		self.nodes.first()
	}

	/// Direct children of `id`.
	pub fn children_of<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a TrackNode> + 'a {
		self.nodes
			.iter()
			.filter(move |n| n.parent_id.as_deref() == Some(id))
	}

	/// Number of nodes.
	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	/// True before a root is set.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// Id to ask the similar-tracks service about: the Spotify id if known,
	/// else the node id. Synthetic ids cannot be resolved upstream.
	pub fn expansion_seed(&self, node_id: &str) -> Option<&str> {
		let node = self.node(node_id)?;
		let seed = node.spotify_id.as_deref().unwrap_or(&node.id);
		(!seed.starts_with(SYNTHETIC_ID_PREFIX)).then_some(seed)
	}

	/// Owned copy of nodes and edges for the renderer.
	pub fn snapshot(&self) -> GraphSnapshot {
		GraphSnapshot {
			nodes: self.nodes.clone(),
			edges: self.edges.clone(),
		}
	}
}
