use crate::{client::Message, entity::Discoverable, error::StateError};
use ha_mqtt_discoverable_proto::ClimateInfo;
use serde::Serialize;

/// An HVAC entity. All state travels as one JSON envelope on the shared
/// state topic; the document's value templates tell Home Assistant which key
/// belongs to which attribute.
pub type Climate = Discoverable<ClimateInfo>;

#[derive(Debug, Clone, Default, Serialize)]
struct ClimateState<'a> {
	#[serde(skip_serializing_if = "Option::is_none")]
	mode: Option<&'a str>,
	#[serde(skip_serializing_if = "Option::is_none")]
	target_temperature: Option<f64>,
	#[serde(skip_serializing_if = "Option::is_none")]
	current_temperature: Option<f64>,
}

impl Discoverable<ClimateInfo> {
	pub fn set_mode(&self, mode: &str) -> Result<(), StateError> {
		if !self.document().supports_mode(mode) {
			return Err(StateError::InvalidOption(mode.to_owned()));
		}

		self.publish(ClimateState {
			mode: Some(mode),
			..ClimateState::default()
		})
	}

	pub fn set_target_temperature(&self, temperature: f64) -> Result<(), StateError> {
		if !self.document().in_range(temperature) {
			let (min, max) = (
				self.document().min_temp.unwrap_or(f64::NEG_INFINITY),
				self.document().max_temp.unwrap_or(f64::INFINITY),
			);
			return Err(StateError::OutOfRange {
				value: temperature,
				min,
				max,
			});
		}

		self.publish(ClimateState {
			target_temperature: Some(temperature),
			..ClimateState::default()
		})
	}

	/// Report the measured temperature. Unlike the target, measurements are
	/// not clamped to the set point range.
	pub fn set_current_temperature(&self, temperature: f64) -> Result<(), StateError> {
		self.publish(ClimateState {
			current_temperature: Some(temperature),
			..ClimateState::default()
		})
	}

	fn publish(&self, state: ClimateState<'_>) -> Result<(), StateError> {
		self.publish_json_state(&state, self.document().retain.unwrap_or(false))
	}

	/// Mode and temperature requests, arriving as JSON on the command topic
	/// (`{"mode": …}` or `{"target_temperature": …}`).
	pub fn commands(&self) -> flume::Receiver<Message> {
		self.command_receiver()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::entity::recv_publish;
	use assert_matches::assert_matches;
	use ha_mqtt_discoverable_proto::EntityInfo;

	fn thermostat() -> ClimateInfo {
		let mut info = ClimateInfo::new(
			EntityInfo::new("Thermostat").unique_id("thermostat"),
			["off", "heat"],
		);
		info.min_temp = Some(5.0);
		info.max_temp = Some(35.0);
		info
	}

	#[test]
	fn modes_must_be_declared() {
		let (climate, published, _commands) = Discoverable::detached(thermostat());

		assert_matches!(
			climate.set_mode("cool"),
			Err(StateError::InvalidOption(mode)) if mode == "cool"
		);
		assert!(published.try_recv().is_err());

		climate.set_mode("heat").unwrap();
		let (_, payload, _) = recv_publish(&published);
		let json: serde_json::Value = serde_json::from_slice(&payload).unwrap();
		assert_eq!(json["mode"], "heat");
	}

	#[test]
	fn target_temperature_is_range_checked() {
		let (climate, published, _commands) = Discoverable::detached(thermostat());

		assert_matches!(
			climate.set_target_temperature(40.0),
			Err(StateError::OutOfRange { .. })
		);
		assert!(published.try_recv().is_err());

		climate.set_target_temperature(21.5).unwrap();
		let (_, payload, _) = recv_publish(&published);
		let json: serde_json::Value = serde_json::from_slice(&payload).unwrap();
		assert_eq!(json["target_temperature"], 21.5);
	}

	#[test]
	fn measured_temperature_is_not_range_checked() {
		let (climate, published, _commands) = Discoverable::detached(thermostat());

		climate.set_current_temperature(-12.0).unwrap();

		let (_, payload, _) = recv_publish(&published);
		let json: serde_json::Value = serde_json::from_slice(&payload).unwrap();
		assert_eq!(json["current_temperature"], -12.0);
	}
}
