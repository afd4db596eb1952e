//! Placement of sibling tracks around an expanded parent.
//!
//! Each child starts from its feature point scaled to the visual cube and
//! damped toward the parent, then is pushed outward on the x/z plane by an
//! angular offset so siblings fan out instead of overlapping:
//!
//! ```text
//! angle = (i / max_children) * 2π
//! child = parent + damped(feature) + (cos(angle), 0, sin(angle)) * cluster_offset
//! ```
//!
//! Candidates without features get a random jitter inside the cluster radius.
//! That is the only non-deterministic path; the RNG is supplied by the caller.

use std::f64::consts::TAU;

use rand::Rng;

use super::error::Result;
use super::features::map_to_position;
use super::scale::LayoutConfig;
use super::types::{AudioFeatures, Candidate, Point3};

/// A candidate with its computed scene position.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedChild {
	/// Node id of the candidate.
	pub id: String,
	/// Scene position.
	pub position: Point3,
}

/// Places sibling batches with a validated [`LayoutConfig`].
#[derive(Clone, Debug, Default)]
pub struct ClusterPlacer {
	config: LayoutConfig,
}

impl ClusterPlacer {
	/// Fails with `InvalidConfig` for a config that `validate` rejects.
	pub fn new(config: LayoutConfig) -> Result<Self> {
		config.validate()?;
		Ok(Self { config })
	}

	/// Layout in use.
	pub fn config(&self) -> &LayoutConfig {
		&self.config
	}

	/// Place up to `max_children` candidates around `parent`, in input order.
	/// Extra candidates are dropped.
	pub fn place<R: Rng + ?Sized>(
		&self,
		parent: Point3,
		candidates: &[Candidate],
		rng: &mut R,
	) -> Vec<PlacedChild> {
		candidates
			.iter()
			.take(self.config.max_children)
			.enumerate()
			.map(|(i, candidate)| PlacedChild {
				id: candidate.id.clone(),
				position: match &candidate.features {
					Some(features) => self.fan_position(parent, features, i),
					None => self.jitter_position(parent, &mut *rng),
				},
			})
			.collect()
	}

	fn fan_position(&self, parent: Point3, features: &AudioFeatures, i: usize) -> Point3 {
		let base = map_to_position(Some(features))
			.scale(self.config.half_extent())
			.scale(self.config.damping);
		let angle = (i as f64 / self.config.max_children as f64) * TAU;
		let radius = self.config.cluster_offset;
		parent + Point3::new(base.x + angle.cos() * radius, base.y, base.z + angle.sin() * radius)
	}

	fn jitter_position<R: Rng + ?Sized>(&self, parent: Point3, rng: &mut R) -> Point3 {
		let r = self.config.cluster_offset;
		parent
			+ Point3::new(
				rng.gen_range(-r..=r),
				rng.gen_range(-r..=r),
				rng.gen_range(-r..=r),
			)
	}
}
