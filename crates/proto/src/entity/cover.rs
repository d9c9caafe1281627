use crate::{
	entity::{Component, DiscoveryDocument, EntityInfo, EntityInvalidity},
	payload::Payload,
};
use semval::{Validate, ValidationResult};
use serde::{Deserialize, Serialize};
use std::convert::identity;

/// An MQTT cover (blinds, a roller shutter or a garage door).
///
/// The state vocabulary has five tokens: `open`, `opening`, `closed`,
/// `closing` and `stopped`. The transitional tokens are caller-driven; the
/// document carries no timing.
///
/// See: <https://www.home-assistant.io/integrations/cover.mqtt/>
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverInfo {
	#[serde(flatten)]
	pub entity: EntityInfo,

	/// The command payload that opens the cover.
	///
	/// The default (used if `None`) is `OPEN`.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub payload_open: Option<Payload>,

	/// The command payload that closes the cover.
	///
	/// The default (used if `None`) is `CLOSE`.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub payload_close: Option<Payload>,

	/// The command payload that stops the cover.
	///
	/// The default (used if `None`) is `STOP`.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub payload_stop: Option<Payload>,

	/// Number which represents the fully closed position. Defaults to `0`.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub position_closed: Option<i32>,

	/// Number which represents the fully open position. Defaults to `100`.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub position_open: Option<i32>,

	/// The payload that represents the open state.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub state_open: Option<Payload>,

	/// The payload that represents the opening state.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub state_opening: Option<Payload>,

	/// The payload that represents the closed state.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub state_closed: Option<Payload>,

	/// The payload that represents the closing state.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub state_closing: Option<Payload>,

	/// The payload that represents the stopped state.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub state_stopped: Option<Payload>,

	/// Flag that defines if the cover works in optimistic mode.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub optimistic: Option<bool>,

	/// Defines if published messages should have the retain flag set.
	/// Defaults to `true`: a cover that loses its retained state would show
	/// up as unknown after every Home Assistant restart.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub retain: Option<bool>,
}

impl CoverInfo {
	pub fn new(entity: EntityInfo) -> Self {
		CoverInfo {
			entity,
			retain: Some(true),
			..CoverInfo::default()
		}
	}

	pub fn retain(&self) -> bool {
		self.retain.unwrap_or(true)
	}

	pub fn state_open(&self) -> &str {
		self.state_open.as_deref().unwrap_or("open")
	}

	pub fn state_opening(&self) -> &str {
		self.state_opening.as_deref().unwrap_or("opening")
	}

	pub fn state_closed(&self) -> &str {
		self.state_closed.as_deref().unwrap_or("closed")
	}

	pub fn state_closing(&self) -> &str {
		self.state_closing.as_deref().unwrap_or("closing")
	}

	pub fn state_stopped(&self) -> &str {
		self.state_stopped.as_deref().unwrap_or("stopped")
	}
}

impl Validate for CoverInfo {
	type Invalidity = EntityInvalidity;

	fn validate(&self) -> ValidationResult<Self::Invalidity> {
		semval::context::Context::new()
			.validate_with(&self.entity, identity)
			.into()
	}
}

impl DiscoveryDocument for CoverInfo {
	const COMPONENT: Component = Component::Cover;

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
	fn retains_state_by_default() {
		let info = CoverInfo::new(EntityInfo::new("garage"));
		assert!(info.retain());

		let json = serde_json::to_value(&info).expect("serialize");
		assert_eq!(json["retain"], true);
	}
}
