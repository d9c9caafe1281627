use crate::{
	entity::{Component, DiscoveryDocument, EntityInfo, EntityInvalidity},
	payload::Payload,
};
use semval::{Validate, ValidationResult};
use serde::{Deserialize, Serialize};
use std::convert::identity;

/// An MQTT button.
///
/// See: <https://www.home-assistant.io/integrations/button.mqtt/>
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct ButtonInfo {
	#[serde(flatten)]
	pub entity: EntityInfo,

	/// The payload to send to trigger the button.
	///
	/// The default (used if `None`) is `PRESS`.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub payload_press: Option<Payload>,

	/// Defines if published messages should have the retain flag set.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub retain: Option<bool>,
}

impl ButtonInfo {
	pub fn new(entity: EntityInfo) -> Self {
		ButtonInfo {
			entity,
			..ButtonInfo::default()
		}
	}
}

impl Validate for ButtonInfo {
	type Invalidity = EntityInvalidity;

	fn validate(&self) -> ValidationResult<Self::Invalidity> {
		semval::context::Context::new()
			.validate_with(&self.entity, identity)
			.into()
	}
}

impl DiscoveryDocument for ButtonInfo {
	const COMPONENT: Component = Component::Button;

	fn entity(&self) -> &EntityInfo {
		&self.entity
	}

	fn entity_mut(&mut self) -> &mut EntityInfo {
		&mut self.entity
	}
}
