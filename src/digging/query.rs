//! Metadata-aware search: mood and instrument words in a query become audio
//! feature targets (e.g. "sad piano" asks for low valence, high acousticness).

use serde::Serialize;

/// Feature targets implied by a query. Unset fields are unconstrained.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct FeatureTargets {
	/// Target valence.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub valence: Option<f64>,
	/// Target energy.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub energy: Option<f64>,
	/// Target acousticness.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub acousticness: Option<f64>,
	/// Target instrumentalness.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub instrumentalness: Option<f64>,
}

impl FeatureTargets {
	fn merge(&mut self, other: &FeatureTargets) {
		self.valence = other.valence.or(self.valence);
		self.energy = other.energy.or(self.energy);
		self.acousticness = other.acousticness.or(self.acousticness);
		self.instrumentalness = other.instrumentalness.or(self.instrumentalness);
	}

	/// True when no target is set.
	pub fn is_empty(&self) -> bool {
		*self == Self::default()
	}
}

const fn targets(
	valence: Option<f64>,
	energy: Option<f64>,
	acousticness: Option<f64>,
	instrumentalness: Option<f64>,
) -> FeatureTargets {
	FeatureTargets {
		valence,
		energy,
		acousticness,
		instrumentalness,
	}
}

const MOOD_KEYWORDS: &[(&str, FeatureTargets)] = &[
	("sad", targets(Some(0.2), None, None, None)),
	("happy", targets(Some(0.9), None, None, None)),
	("energetic", targets(None, Some(0.9), None, None)),
	("calm", targets(None, Some(0.2), None, None)),
	("ethereal", targets(Some(0.7), Some(0.3), None, None)),
	("epic", targets(None, Some(0.9), None, None)),
	("dark", targets(Some(0.2), Some(0.5), None, None)),
	("upbeat", targets(Some(0.8), Some(0.8), None, None)),
];

const INSTRUMENT_KEYWORDS: &[(&str, FeatureTargets)] = &[
	("piano", targets(None, None, Some(0.8), None)),
	("acoustic", targets(None, None, Some(0.9), None)),
	("electronic", targets(None, None, Some(0.1), Some(0.7))),
	("orchestral", targets(None, None, None, Some(0.9))),
	("vocal", targets(None, None, None, Some(0.1))),
];

/// Parsed search query.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchMetadata {
	/// The query, trimmed, as typed.
	pub clean_query: String,
	/// Feature targets found in the query.
	pub filters: FeatureTargets,
}

fn first_match<'a>(
	word: &str,
	table: &'a [(&str, FeatureTargets)],
) -> Option<&'a FeatureTargets> {
	table
		.iter()
		.find(|(key, _)| word.contains(key))
		.map(|(_, t)| t)
}

/// Scan each word for the first mood keyword and the first instrument
/// keyword it contains. Later words overwrite earlier targets.
pub fn parse_search_metadata(query: &str) -> SearchMetadata {
	let mut filters = FeatureTargets::default();
	for word in query.to_lowercase().split_whitespace() {
		if let Some(t) = first_match(word, MOOD_KEYWORDS) {
			filters.merge(t);
		}
		if let Some(t) = first_match(word, INSTRUMENT_KEYWORDS) {
			filters.merge(t);
		}
	}
	SearchMetadata {
		clean_query: query.trim().to_string(),
		filters,
	}
}
