//! Track digging engine.
//!
//! Turns track metadata into positions and colors for a 3D "digging" view:
//! - Audio features map to a point in a normalized tempo/texture/mood cube
//! - Expanding a node fans its related tracks out around it, without duplicates
//! - Genre and mood tags resolve to a two-color ambient palette
//!
//! # Example
//!
//! ```
//! use digging_engine::digging::{DiggingGraph, TrackRecord};
//!
//! let mut graph = DiggingGraph::new();
//! let root = TrackRecord { id: Some("root".into()), title: "Teardrop".into(), ..Default::default() };
//! graph.set_root(&root);
//!
//! let related = vec![TrackRecord { id: Some("a".into()), ..Default::default() }];
//! let outcome = graph.expand("root", &related).unwrap();
//! assert_eq!(outcome.added, ["a"]);
//! assert_eq!(graph.edges().len(), 1);
//! ```

mod ambient;
mod error;
mod features;
mod placement;
mod query;
pub mod scale;
mod state;
pub mod theme;
mod types;

pub use ambient::{AmbientBackdrop, AmbientThemeController, BackdropBlob};
pub use error::{DiggingError, Result};
pub use features::map_to_position;
pub use placement::{ClusterPlacer, PlacedChild};
pub use query::{FeatureTargets, SearchMetadata, parse_search_metadata};
pub use scale::LayoutConfig;
pub use state::{DiggingGraph, ExpandOutcome, GraphPhase};
pub use theme::{DEFAULT_PALETTE, MoodPalette, MoodSource, palette_for_track, resolve_palette};
pub use types::{
	AudioFeatures, Candidate, Edge, GraphSnapshot, Point3, SYNTHETIC_ID_PREFIX, TrackNode,
	TrackRecord,
};
