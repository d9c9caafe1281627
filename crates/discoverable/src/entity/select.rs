use crate::{client::Message, entity::Discoverable, error::StateError};
use ha_mqtt_discoverable_proto::SelectInfo;

/// A select.
pub type Select = Discoverable<SelectInfo>;

impl Discoverable<SelectInfo> {
	pub fn select_option(&self, option: &str) -> Result<(), StateError> {
		if !self.document().options.iter().any(|o| o == option) {
			return Err(StateError::InvalidOption(option.to_owned()));
		}

		self.publish_state(
			option.to_owned(),
			self.document().retain.unwrap_or(false),
		)
	}

	/// Options Home Assistant picks, as sent to the command topic.
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

	fn fan_speed() -> SelectInfo {
		SelectInfo::new(
			EntityInfo::new("Fan Speed").unique_id("fan_speed"),
			["low", "medium", "high"],
		)
	}

	#[test]
	fn publishes_a_known_option() {
		let (select, published, _commands) = Discoverable::detached(fan_speed());

		select.select_option("medium").unwrap();

		let (topic, payload, _) = recv_publish(&published);
		assert_eq!(&*topic, "homeassistant/select/fan_speed/state");
		assert_eq!(payload, b"medium");
	}

	#[test]
	fn rejects_an_unknown_option_without_publishing() {
		let (select, published, _commands) = Discoverable::detached(fan_speed());

		let err = select.select_option("turbo");

		assert_matches!(err, Err(StateError::InvalidOption(option)) if option == "turbo");
		assert!(published.try_recv().is_err());
	}
}
