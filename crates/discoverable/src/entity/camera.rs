use crate::{entity::Discoverable, error::StateError};
use ha_mqtt_discoverable_proto::CameraInfo;

/// A camera. The state is the MQTT topic the camera image is published on.
pub type Camera = Discoverable<CameraInfo>;

impl Discoverable<CameraInfo> {
	/// Point Home Assistant at the topic carrying the current camera image.
	pub fn set_topic(&self, image_topic: &str) -> Result<(), StateError> {
		if image_topic.is_empty() {
			return Err(StateError::EmptyValue("camera image topic"));
		}

		self.publish_state(
			image_topic.to_owned(),
			self.document().retain.unwrap_or(false),
		)
	}
}
