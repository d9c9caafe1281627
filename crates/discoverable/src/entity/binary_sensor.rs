use crate::{entity::Discoverable, error::StateError};
use ha_mqtt_discoverable_proto::BinarySensorInfo;

/// A binary sensor publishing its configured on/off payloads.
pub type BinarySensor = Discoverable<BinarySensorInfo>;

impl Discoverable<BinarySensorInfo> {
	pub fn on(&self) -> Result<(), StateError> {
		self.update_state(true)
	}

	pub fn off(&self) -> Result<(), StateError> {
		self.update_state(false)
	}

	pub fn update_state(&self, state: bool) -> Result<(), StateError> {
		let payload = if state {
			self.document().payload_on()
		} else {
			self.document().payload_off()
		}
		.to_owned();

		self.publish_state(payload, false)
	}
}
