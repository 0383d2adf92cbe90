//! GeoJSON features as handed to a map.
//!
//! The GeoPackage library emits features as JSON objects that may carry more than GeoJSON asks
//! for. A [`Feature`] keeps `geometry`, `id` and `properties` and drops everything else.

use crate::RawFeature;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The GeoJSON object type of a [`Feature`]. There is only one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum FeatureType {
	#[default]
	Feature,
}

/// A normalized GeoJSON feature.
///
/// ```
/// use gpkg_layers::Feature;
/// use serde_json::json;
///
/// let raw = json!({"id": 7, "geometry": null, "properties": {"a": 1}, "srs": "EPSG:4326"});
/// let feature = Feature::from_raw(raw.as_object().unwrap().clone());
/// assert_eq!(
/// 	feature.to_json(),
/// 	json!({"type": "Feature", "geometry": null, "id": 7, "properties": {"a": 1}})
/// );
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Feature {
	#[serde(rename = "type")]
	pub kind: FeatureType,
	/// `null` if the library emitted no geometry.
	#[serde(default)]
	pub geometry: Value,
	/// Absent ids stay absent.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub id: Option<Value>,
	#[serde(default)]
	pub properties: Value,
}

impl Feature {
	#[must_use]
	pub fn from_raw(mut raw: RawFeature) -> Feature {
		Feature {
			kind: FeatureType::Feature,
			geometry: raw.remove("geometry").unwrap_or(Value::Null),
			id: raw.remove("id"),
			properties: raw.remove("properties").unwrap_or(Value::Null),
		}
	}

	#[must_use]
	pub fn to_json(&self) -> Value {
		serde_json::json!(self)
	}
}
