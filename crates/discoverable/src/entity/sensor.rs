use crate::{entity::Discoverable, error::StateError};
use ha_mqtt_discoverable_proto::SensorInfo;
use serde::Serialize;

/// A read-only sensor.
pub type Sensor = Discoverable<SensorInfo>;

#[derive(Serialize)]
struct SensorState<'a, T: Serialize> {
	state: &'a T,
	last_reset: &'a str,
}

impl Discoverable<SensorInfo> {
	/// Publish the sensor state as a plain string.
	pub fn set_state(&self, state: impl ToString) -> Result<(), StateError> {
		self.publish_state(state.to_string(), false)
	}

	/// Publish the state together with a `last_reset` timestamp, wrapped in a
	/// JSON envelope. Requires a `last_reset_value_template` in the document
	/// for Home Assistant to pick the timestamp up.
	pub fn set_state_with_last_reset(
		&self,
		state: &impl Serialize,
		last_reset: &str,
	) -> Result<(), StateError> {
		self.publish_json_state(&SensorState { state, last_reset }, false)
	}
}
