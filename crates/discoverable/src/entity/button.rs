use crate::{client::Message, entity::Discoverable};
use ha_mqtt_discoverable_proto::ButtonInfo;

/// A button. Buttons are stateless; the interesting part is the press
/// payloads Home Assistant sends to the command topic.
pub type Button = Discoverable<ButtonInfo>;

impl Discoverable<ButtonInfo> {
	/// Press events arriving on the command topic.
	pub fn commands(&self) -> flume::Receiver<Message> {
		self.command_receiver()
	}
}
