use crate::{entity::Discoverable, error::StateError};
use ha_mqtt_discoverable_proto::DeviceTriggerInfo;

/// A device trigger. Triggers carry no state; firing one publishes a
/// non-retained event to the trigger topic.
pub type DeviceTrigger = Discoverable<DeviceTriggerInfo>;

impl Discoverable<DeviceTriggerInfo> {
	/// Fire the trigger. `payload` overrides the payload configured in the
	/// document; with neither, the event is empty.
	pub fn trigger(&self, payload: Option<&str>) -> Result<(), StateError> {
		let payload = payload
			.or_else(|| self.document().payload.as_deref())
			.unwrap_or_default()
			.to_owned();

		self.publish_state(payload, false)
	}
}
