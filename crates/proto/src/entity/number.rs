use crate::{
	entity::{Component, DiscoveryDocument, EntityInfo, EntityInvalidity},
	payload::Payload,
};
use semval::{Validate, ValidationResult};
use serde::{Deserialize, Serialize};
use std::convert::identity;

/// An MQTT number.
///
/// See: <https://www.home-assistant.io/integrations/number.mqtt/>
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumberInfo {
	#[serde(flatten)]
	pub entity: EntityInfo,

	/// The minimum value of the number.
	///
	/// The default (used if `None`) is `1`.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub min: Option<f64>,

	/// The maximum value of the number.
	///
	/// The default (used if `None`) is `100`.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub max: Option<f64>,

	/// Step value. Smallest acceptable value is `0.001`. Defaults to `1.0`.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub step: Option<f64>,

	/// Control how the number should be displayed in the UI. Can be set to
	/// `box` or `slider` to force a display mode.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub mode: Option<String>,

	/// A special payload that resets the state to unknown when received on the
	/// state topic.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub payload_reset: Option<Payload>,

	/// Defines the unit of measurement, if any.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub unit_of_measurement: Option<String>,

	/// Flag that defines if the number works in optimistic mode.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub optimistic: Option<bool>,

	/// Defines if published messages should have the retain flag set.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub retain: Option<bool>,
}

impl NumberInfo {
	pub fn new(entity: EntityInfo) -> Self {
		NumberInfo {
			entity,
			..NumberInfo::default()
		}
	}

	/// The effective range, with Home Assistant's defaults filled in.
	pub fn range(&self) -> (f64, f64) {
		(self.min.unwrap_or(1.0), self.max.unwrap_or(100.0))
	}
}

impl Validate for NumberInfo {
	type Invalidity = EntityInvalidity;

	fn validate(&self) -> ValidationResult<Self::Invalidity> {
		let (min, max) = self.range();
		semval::context::Context::new()
			.validate_with(&self.entity, identity)
			.invalidate_if(min > max, EntityInvalidity::InvalidRange)
			.into()
	}
}

impl DiscoveryDocument for NumberInfo {
	const COMPONENT: Component = Component::Number;

	fn entity(&self) -> &EntityInfo {
		&self.entity
	}

	fn entity_mut(&mut self) -> &mut EntityInfo {
		&mut self.entity
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn inverted_range_is_invalid() {
		let mut info = NumberInfo::new(EntityInfo::new("volume"));
		info.min = Some(50.0);
		info.max = Some(0.0);

		let err: Vec<_> = info
			.validate()
			.expect_err("should be invalid")
			.into_iter()
			.collect();

		assert_eq!(&*err, &[EntityInvalidity::InvalidRange])
	}
}
