use crate::{
	entity::{Component, DiscoveryDocument, EntityInfo, EntityInvalidity},
	payload::Payload,
};
use semval::{Validate, ValidationResult};
use serde::{Deserialize, Serialize};
use std::convert::identity;

/// An MQTT switch.
///
/// See: <https://www.home-assistant.io/integrations/switch.mqtt/>
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwitchInfo {
	#[serde(flatten)]
	pub entity: EntityInfo,

	/// Flag that defines if the switch works in optimistic mode.
	/// Defaults to `true` if no `state_topic` is defined, else `false`.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub optimistic: Option<bool>,

	/// The payload that represents the on state, used both when comparing to
	/// the value in the state topic and when sending as an on command to the
	/// command topic.
	///
	/// The default (used if `None`) is `ON`.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub payload_on: Option<Payload>,

	/// The payload that represents the off state.
	///
	/// The default (used if `None`) is `OFF`.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub payload_off: Option<Payload>,

	/// Defines if published messages should have the retain flag set.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub retain: Option<bool>,
}

impl SwitchInfo {
	pub const DEFAULT_PAYLOAD_ON: &'static str = "ON";
	pub const DEFAULT_PAYLOAD_OFF: &'static str = "OFF";

	pub fn new(entity: EntityInfo) -> Self {
		SwitchInfo {
			entity,
			..SwitchInfo::default()
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

impl Validate for SwitchInfo {
	type Invalidity = EntityInvalidity;

	fn validate(&self) -> ValidationResult<Self::Invalidity> {
		semval::context::Context::new()
			.validate_with(&self.entity, identity)
			.into()
	}
}

impl DiscoveryDocument for SwitchInfo {
	const COMPONENT: Component = Component::Switch;

	fn entity(&self) -> &EntityInfo {
		&self.entity
	}

	fn entity_mut(&mut self) -> &mut EntityInfo {
		&mut self.entity
	}
}
