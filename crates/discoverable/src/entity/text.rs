use crate::{client::Message, entity::Discoverable, error::StateError};
use ha_mqtt_discoverable_proto::TextInfo;

/// A text entity.
pub type Text = Discoverable<TextInfo>;

impl Discoverable<TextInfo> {
	pub fn set_text(&self, text: &str) -> Result<(), StateError> {
		let (min, max) = self.document().bounds();
		let len = text.chars().count();

		if len < min as usize || len > max as usize {
			return Err(StateError::TextLength {
				len,
				min: min as usize,
				max: max as usize,
			});
		}

		self.publish_state(
			text.to_owned(),
			self.document().retain.unwrap_or(false),
		)
	}

	/// Text Home Assistant asks the device to take, as sent to the command
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

	fn marquee() -> TextInfo {
		let mut info = TextInfo::new(EntityInfo::new("Marquee").unique_id("marquee"));
		info.min = Some(2);
		info.max = Some(5);
		info
	}

	#[test]
	fn publishes_text_within_bounds() {
		let (text, published, _commands) = Discoverable::detached(marquee());

		text.set_text("hello").unwrap();

		let (topic, payload, _) = recv_publish(&published);
		assert_eq!(&*topic, "homeassistant/text/marquee/state");
		assert_eq!(payload, b"hello");
	}

	#[test]
	fn rejects_text_outside_the_bounds() {
		let (text, published, _commands) = Discoverable::detached(marquee());

		assert_matches!(
			text.set_text("x"),
			Err(StateError::TextLength { len: 1, min: 2, max: 5 })
		);
		assert_matches!(
			text.set_text("toolong"),
			Err(StateError::TextLength { len: 7, .. })
		);
		assert!(published.try_recv().is_err());
	}

	#[test]
	fn bounds_count_characters_not_bytes() {
		let (text, published, _commands) = Discoverable::detached(marquee());

		// five characters, ten bytes
		text.set_text("äääää").unwrap();

		let (_, payload, _) = recv_publish(&published);
		assert_eq!(payload, "äääää".as_bytes());
	}
}
