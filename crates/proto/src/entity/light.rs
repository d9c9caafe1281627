use crate::{
	entity::{Component, DiscoveryDocument, EntityInfo, EntityInvalidity},
	payload::Payload,
};
use semval::{Validate, ValidationResult};
use serde::{Deserialize, Serialize};
use std::convert::identity;

/// An MQTT light using the JSON schema.
///
/// State and command payloads are JSON envelopes carrying `state` plus any of
/// `brightness`, `color_mode`/`color` and `effect`.
///
/// See: <https://www.home-assistant.io/integrations/light.mqtt/>
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightInfo {
	#[serde(flatten)]
	pub entity: EntityInfo,

	/// The schema of the state topic. This crate only speaks `json`.
	pub schema: String,

	/// Flag that defines if the light supports setting the brightness.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub brightness: Option<bool>,

	/// Flag that defines if the light supports color modes.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub color_mode: Option<bool>,

	/// List of supported color modes. Required if `color_mode` is set.
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub supported_color_modes: Vec<String>,

	/// Flag that defines if the light supports effects.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub effect: Option<bool>,

	/// List of supported effects. Required if `effect` is set.
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub effect_list: Vec<String>,

	/// The payload that represents the on state.
	///
	/// The default (used if `None`) is `ON`.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub payload_on: Option<Payload>,

	/// The payload that represents the off state.
	///
	/// The default (used if `None`) is `OFF`.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub payload_off: Option<Payload>,

	/// Flag that defines if the light works in optimistic mode.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub optimistic: Option<bool>,

	/// Defines if published messages should have the retain flag set.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub retain: Option<bool>,
}

impl LightInfo {
	pub const DEFAULT_PAYLOAD_ON: &'static str = "ON";
	pub const DEFAULT_PAYLOAD_OFF: &'static str = "OFF";

	pub fn new(entity: EntityInfo) -> Self {
		LightInfo {
			entity,
			schema: "json".into(),
			brightness: None,
			color_mode: None,
			supported_color_modes: Vec::new(),
			effect: None,
			effect_list: Vec::new(),
			payload_on: None,
			payload_off: None,
			optimistic: None,
			retain: None,
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

	pub fn supports_color(&self) -> bool {
		self.color_mode == Some(true)
	}

	pub fn supports_effects(&self) -> bool {
		self.effect == Some(true)
	}
}

impl Default for LightInfo {
	fn default() -> Self {
		Self::new(EntityInfo::default())
	}
}

impl Validate for LightInfo {
	type Invalidity = EntityInvalidity;

	fn validate(&self) -> ValidationResult<Self::Invalidity> {
		semval::context::Context::new()
			.validate_with(&self.entity, identity)
			.into()
	}
}

impl DiscoveryDocument for LightInfo {
	const COMPONENT: Component = Component::Light;

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
	fn schema_is_always_json() {
		let info = LightInfo::new(EntityInfo::new("bedroom"));
		let json = serde_json::to_value(&info).expect("serialize");

		assert_eq!(json["schema"], "json")
	}
}
