use crate::{client::Message, entity::Discoverable, error::StateError};
use ha_mqtt_discoverable_proto::SwitchInfo;

/// A switch. Home Assistant sends the configured on/off payloads to the
/// command topic; read them from [`commands`](Self::commands) and report the
/// resulting state back with [`on`](Self::on)/[`off`](Self::off).
pub type Switch = Discoverable<SwitchInfo>;

impl Discoverable<SwitchInfo> {
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

		self.publish_state(payload, self.document().retain.unwrap_or(false))
	}

	/// Commands arriving on the command topic.
	pub fn commands(&self) -> flume::Receiver<Message> {
		self.command_receiver()
	}
}
