use crate::{client::Message, entity::Discoverable, error::StateError};
use ha_mqtt_discoverable_proto::NumberInfo;

/// A number. Outbound values are checked against the configured range;
/// inbound command payloads are handed over untouched, so a device can decide
/// for itself what to do with an out-of-range request.
pub type Number = Discoverable<NumberInfo>;

impl Discoverable<NumberInfo> {
	pub fn set_value(&self, value: f64) -> Result<(), StateError> {
		let (min, max) = self.document().range();
		if value < min || value > max {
			return Err(StateError::OutOfRange { value, min, max });
		}

		self.publish_state(
			value.to_string(),
			self.document().retain.unwrap_or(false),
		)
	}

	/// Values Home Assistant asks the device to take, as sent to the command
	/// topic.
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

	fn volume() -> NumberInfo {
		let mut info = NumberInfo::new(EntityInfo::new("Volume").unique_id("volume"));
		info.min = Some(0.0);
		info.max = Some(100.0);
		info
	}

	#[test]
	fn rejects_out_of_range_values_without_publishing() {
		let (number, published, _commands) = Discoverable::detached(volume());

		let err = number.set_value(150.0);

		assert_matches!(
			err,
			Err(StateError::OutOfRange {
				value,
				min,
				max,
			}) if value == 150.0 && min == 0.0 && max == 100.0
		);
		assert!(published.try_recv().is_err());
	}

	#[test]
	fn publishes_values_inside_the_range() {
		let (number, published, _commands) = Discoverable::detached(volume());

		number.set_value(42.0).unwrap();

		let (topic, payload, _) = recv_publish(&published);
		assert_eq!(&*topic, "homeassistant/number/volume/state");
		assert_eq!(payload, b"42");
	}

	#[test]
	fn inbound_commands_are_not_range_checked() {
		let (number, _published, commands) = Discoverable::detached(volume());

		commands
			.send(crate::client::Message::new(
				"homeassistant/number/volume/set".into(),
				b"150".as_slice().into(),
				false,
			))
			.unwrap();

		assert_eq!(number.commands().recv().unwrap().payload(), b"150");
	}
}
