//! Audio features to a point in the normalized feature cube.
//!
//! - **Y (tempo)**: -1 slow, +1 fast.
//! - **X (texture)**: -1 organic (acoustic), +1 orchestral/electronic (instrumental).
//! - **Z (mood)**: +1 ethereal (bright and calm), -1 epic (energetic and loud).
//!
//! The axes stand in for an embedding: tracks with similar character land near
//! each other without any learned model.

use super::scale::{LOUDNESS_SCALE, TEMPO_SCALE};
use super::types::{AudioFeatures, Point3};

/// Map a feature vector into [-1, 1]³. Tracks without features sit at the origin.
///
/// Pure and deterministic: equal input gives bit-identical output.
pub fn map_to_position(features: Option<&AudioFeatures>) -> Point3 {
	let Some(f) = features else {
		return Point3::ORIGIN;
	};

	let y = TEMPO_SCALE.apply(f.tempo());
	let x = f.instrumentalness() - f.acousticness();

	let energy = f.energy();
	let ethereal = f.valence() * (1.0 - energy);
	let epic = energy * LOUDNESS_SCALE.apply(f.loudness());
	let z = ethereal - epic;

	Point3::new(x, y, z).clamp_unit()
}

#[cfg(test)]
mod tests {
	use proptest::prelude::*;

	use super::*;

	fn features(
		tempo: f64,
		acousticness: f64,
		instrumentalness: f64,
		valence: f64,
		energy: f64,
		loudness: f64,
	) -> AudioFeatures {
		AudioFeatures {
			tempo: Some(tempo),
			acousticness: Some(acousticness),
			instrumentalness: Some(instrumentalness),
			valence: Some(valence),
			energy: Some(energy),
			loudness: Some(loudness),
		}
	}

	#[test]
	fn absent_features_map_to_origin() {
		assert_eq!(map_to_position(None), Point3::ORIGIN);
	}

	#[test]
	fn tempo_bounds_map_to_vertical_extremes() {
		let slow = AudioFeatures {
			tempo: Some(60.0),
			..Default::default()
		};
		let fast = AudioFeatures {
			tempo: Some(200.0),
			..Default::default()
		};
		let slow_pos = map_to_position(Some(&slow));
		assert_eq!(slow_pos.y, -1.0);
		assert_eq!(slow_pos.x, 0.0);
		assert_eq!(map_to_position(Some(&fast)).y, 1.0);
	}

	#[test]
	fn default_vector_mood_balances_ethereal_and_epic() {
		// ethereal = 0.5 * 0.5, epic = 0.5 * (50 / 60)
		let pos = map_to_position(Some(&AudioFeatures::default()));
		let expected = 0.25 - 0.5 * (50.0 / 60.0);
		assert!((pos.z - expected).abs() < 1e-12);
		assert!((pos.y - (60.0 / 140.0 * 2.0 - 1.0)).abs() < 1e-12);
	}

	#[test]
	fn fast_orchestral_calm_track() {
		let pos = map_to_position(Some(&features(180.0, 0.1, 0.9, 0.8, 0.2, -20.0)));
		assert!(pos.y > 0.7);
		assert!((pos.x - 0.8).abs() < 1e-12);
		assert!(pos.z > 0.0);
	}

	#[test]
	fn loud_energetic_track_is_epic() {
		let pos = map_to_position(Some(&features(128.0, 0.0, 0.0, 0.2, 1.0, 0.0)));
		assert_eq!(pos.z, -1.0);
	}

	#[test]
	fn tempo_is_monotonic() {
		let mut last = f64::NEG_INFINITY;
		for bpm in (40..=220).step_by(10) {
			let f = AudioFeatures {
				tempo: Some(bpm as f64),
				..Default::default()
			};
			let y = map_to_position(Some(&f)).y;
			assert!(y >= last);
			last = y;
		}
	}

	proptest! {
		#[test]
		fn stays_inside_unit_cube(
			tempo in 0.0f64..400.0,
			acousticness in 0.0f64..=1.0,
			instrumentalness in 0.0f64..=1.0,
			valence in 0.0f64..=1.0,
			energy in 0.0f64..=1.0,
			loudness in -100.0f64..20.0,
		) {
			let f = features(tempo, acousticness, instrumentalness, valence, energy, loudness);
			let pos = map_to_position(Some(&f));
			for v in [pos.x, pos.y, pos.z] {
				prop_assert!((-1.0..=1.0).contains(&v));
			}
			prop_assert_eq!(pos, map_to_position(Some(&f)));
		}
	}
}
