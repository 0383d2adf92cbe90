use serde::{Deserialize, Serialize};

/// How a map should draw lines and polygon outlines.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct PathStyle {
	pub color: String,
	pub weight: f64,
	pub opacity: f64,
}

impl Default for PathStyle {
	fn default() -> Self {
		Self {
			color: String::from("#00F"),
			weight: 2.0,
			opacity: 1.0,
		}
	}
}

/// Point features are drawn as circle markers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct CircleMarkerStyle {
	pub radius: f64,
}

impl Default for CircleMarkerStyle {
	fn default() -> Self {
		Self { radius: 2.0 }
	}
}

/// Style passed along with every feature of a feature layer.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct FeatureStyle {
	pub path: PathStyle,
	pub point: CircleMarkerStyle,
}

#[cfg(test)]
mod tests {
	use super::*;
	use pretty_assertions::assert_eq;

	#[test]
	fn defaults() {
		let style = FeatureStyle::default();
		assert_eq!(style.path.color, "#00F");
		assert_eq!(style.path.weight, 2.0);
		assert_eq!(style.path.opacity, 1.0);
		assert_eq!(style.point.radius, 2.0);
	}

	#[test]
	fn partial_yaml_keeps_defaults() {
		let style: FeatureStyle = serde_yaml_ng::from_str("path:\n  color: '#c00'\npoint:\n  radius: 4\n").unwrap();
		assert_eq!(
			style,
			FeatureStyle {
				path: PathStyle {
					color: "#c00".to_string(),
					..PathStyle::default()
				},
				point: CircleMarkerStyle { radius: 4.0 },
			}
		);
		assert!(serde_yaml_ng::from_str::<FeatureStyle>("fill: true").is_err());
	}
}
