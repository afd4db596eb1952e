//! Axis scales and layout tuning.
//!
//! # Spaces
//!
//! - **Feature space**: the normalized cube [-1, 1]³ produced by
//!   [`map_to_position`](super::features::map_to_position). Each axis carries
//!   one meaning (tempo, texture, mood).
//! - **Scene space**: where graph nodes live. Children are offset from their
//!   parent by a damped, cube-scaled feature point plus an angular fan, so
//!   scene coordinates are not bounded to the unit cube.

use serde::Deserialize;

use super::error::{DiggingError, Result};

/// Linear map from a domain interval onto a range interval, clamped so it
/// never extrapolates past the range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
	/// Input interval.
	pub domain: (f64, f64),
	/// Output interval.
	pub range: (f64, f64),
}

impl LinearScale {
	/// Scale mapping `domain` onto `range`.
	pub const fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
		Self { domain, range }
	}

	/// Map `value`, clamped to the range. A degenerate domain maps to the range start.
	pub fn apply(&self, value: f64) -> f64 {
		let (d0, d1) = self.domain;
		let (r0, r1) = self.range;
		if d0 == d1 {
			return r0;
		}
		let t = ((value - d0) / (d1 - d0)).clamp(0.0, 1.0);
		r0 + (r1 - r0) * t
	}
}

/// Tempo in BPM onto the vertical axis.
pub const TEMPO_SCALE: LinearScale = LinearScale::new((60.0, 200.0), (-1.0, 1.0));

/// Loudness in dB onto a 0..1 weight.
pub const LOUDNESS_SCALE: LinearScale = LinearScale::new((-60.0, 0.0), (0.0, 1.0));

/// Tuning for child placement around an expanded node.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
	/// Edge length of the visual cube. Feature points are scaled by half of it.
	pub cube_size: f64,
	/// Multiplier keeping children near their parent (0 < damping <= 1).
	pub damping: f64,
	/// Radius of the angular fan, also bounds the featureless jitter.
	pub cluster_offset: f64,
	/// Candidates processed per expansion. Also the number of fan slots.
	pub max_children: usize,
}

impl Default for LayoutConfig {
	fn default() -> Self {
		Self {
			cube_size: 6.0,
			damping: 0.3,
			cluster_offset: 0.8,
			max_children: 5,
		}
	}
}

impl LayoutConfig {
	/// Parse a (possibly partial) JSON config and validate it.
	pub fn from_json(json: &str) -> Result<Self> {
		let config: LayoutConfig = serde_json::from_str(json)?;
		config.validate()?;
		Ok(config)
	}

	/// Check every field is in its valid range.
	pub fn validate(&self) -> Result<()> {
		if !(self.cube_size.is_finite() && self.cube_size > 0.0) {
			return Err(DiggingError::InvalidConfig(format!(
				"cube_size must be positive, got {}",
				self.cube_size
			)));
		}
		if !(self.damping > 0.0 && self.damping <= 1.0) {
			return Err(DiggingError::InvalidConfig(format!(
				"damping must be in (0, 1], got {}",
				self.damping
			)));
		}
		if !(self.cluster_offset.is_finite() && self.cluster_offset >= 0.0) {
			return Err(DiggingError::InvalidConfig(format!(
				"cluster_offset must be non-negative, got {}",
				self.cluster_offset
			)));
		}
		if self.max_children == 0 {
			return Err(DiggingError::InvalidConfig(
				"max_children must be at least 1".to_string(),
			));
		}
		Ok(())
	}

	/// Half the cube edge; feature points are scaled by this.
	pub fn half_extent(&self) -> f64 {
		self.cube_size / 2.0
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn tempo_scale_clamps_outside_domain() {
		assert_eq!(TEMPO_SCALE.apply(60.0), -1.0);
		assert_eq!(TEMPO_SCALE.apply(200.0), 1.0);
		assert_eq!(TEMPO_SCALE.apply(130.0), 0.0);
		assert_eq!(TEMPO_SCALE.apply(10.0), -1.0);
		assert_eq!(TEMPO_SCALE.apply(400.0), 1.0);
	}

	#[test]
	fn loudness_scale_maps_to_unit_weight() {
		assert_eq!(LOUDNESS_SCALE.apply(-60.0), 0.0);
		assert_eq!(LOUDNESS_SCALE.apply(0.0), 1.0);
		assert_eq!(LOUDNESS_SCALE.apply(-30.0), 0.5);
		assert_eq!(LOUDNESS_SCALE.apply(6.0), 1.0);
	}

	#[test]
	fn degenerate_domain_returns_range_start() {
		let scale = LinearScale::new((1.0, 1.0), (0.0, 5.0));
		assert_eq!(scale.apply(3.0), 0.0);
	}

	#[test]
	fn partial_json_keeps_defaults() {
		let config = LayoutConfig::from_json(r#"{ "damping": 0.5 }"#).unwrap();
		assert_eq!(config.damping, 0.5);
		assert_eq!(config.cube_size, 6.0);
		assert_eq!(config.max_children, 5);
		assert_eq!(config.half_extent(), 3.0);
	}

	#[test]
	fn rejects_out_of_range_values() {
		assert!(matches!(
			LayoutConfig::from_json(r#"{ "damping": 0.0 }"#),
			Err(DiggingError::InvalidConfig(_))
		));
		assert!(matches!(
			LayoutConfig::from_json(r#"{ "max_children": 0 }"#),
			Err(DiggingError::InvalidConfig(_))
		));
		assert!(matches!(
			LayoutConfig::from_json(r#"{ "cluster_offset": -1 }"#),
			Err(DiggingError::InvalidConfig(_))
		));
		assert!(matches!(
			LayoutConfig::from_json("not json"),
			Err(DiggingError::Json(_))
		));
	}
}
