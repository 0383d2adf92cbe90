use super::{Feature, FeatureStyle};

/// Receives the features of a [`FeatureLayer`](crate::FeatureLayer), usually a vector layer of
/// the host map.
pub trait FeatureSink: Send {
	/// Adds one feature.
	fn add_data(&mut self, feature: Feature, style: &FeatureStyle);

	/// Called once when the GeoPackage or its features could not be loaded.
	fn load_failed(&mut self, error: &anyhow::Error) {
		log::warn!("loading features failed: {error:#}");
	}
}

impl FeatureSink for Vec<Feature> {
	fn add_data(&mut self, feature: Feature, _style: &FeatureStyle) {
		self.push(feature);
	}
}
