use crate::{
	entity::{Component, DiscoveryDocument, EntityInfo, EntityInvalidity},
	payload::Payload,
};
use semval::{Validate, ValidationResult};
use serde::{Deserialize, Serialize};
use std::convert::identity;

/// An MQTT binary sensor.
///
/// See: <https://www.home-assistant.io/integrations/binary_sensor.mqtt/>
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinarySensorInfo {
	#[serde(flatten)]
	pub entity: EntityInfo,

	/// For sensors that only send on state updates (like PIRs), this variable
	/// sets a delay in seconds after which the sensor's state will be updated
	/// back to off.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub off_delay: Option<u32>,

	/// Payload sent for the on state.
	///
	/// The default (used if `None`) is `on`.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub payload_on: Option<Payload>,

	/// Payload sent for the off state.
	///
	/// The default (used if `None`) is `off`.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub payload_off: Option<Payload>,
}

impl BinarySensorInfo {
	pub const DEFAULT_PAYLOAD_ON: &'static str = "on";
	pub const DEFAULT_PAYLOAD_OFF: &'static str = "off";

	pub fn new(entity: EntityInfo) -> Self {
		BinarySensorInfo {
			entity,
			..BinarySensorInfo::default()
		}
	}

	pub fn payload_on(&self) -> &str {
		self.payload_on
			.as_deref()
			.unwrap_or(Self::DEFAULT_PAYLOAD_ON)
	}

	pub fn payload_off(&self) -> &str {
		self.payload_off
			.as_deref()
			.unwrap_or(Self::DEFAULT_PAYLOAD_OFF)
	}
}

impl Validate for BinarySensorInfo {
	type Invalidity = EntityInvalidity;

	fn validate(&self) -> ValidationResult<Self::Invalidity> {
		semval::context::Context::new()
			.validate_with(&self.entity, identity)
			.into()
	}
}

impl DiscoveryDocument for BinarySensorInfo {
	const COMPONENT: Component = Component::BinarySensor;

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
	fn document_is_flat() {
		let mut info = BinarySensorInfo::new(EntityInfo::new("motion"));
		info.entity.device_class = Some("motion".into());
		info.off_delay = Some(30);

		let json = serde_json::to_value(&info).expect("serialize");
		assert_eq!(
			json,
			serde_json::json!({
				"name": "motion",
				"device_class": "motion",
				"off_delay": 30,
			})
		)
	}
}
