use crate::{client::Message, entity::Discoverable, error::StateError};
use ha_mqtt_discoverable_proto::CoverInfo;

/// A cover. Any of the five state reports is legal at any time; in
/// particular a stop command can interrupt both an opening and a closing
/// cover, so `stopped` never requires a preceding transitional state.
pub type Cover = Discoverable<CoverInfo>;

impl Discoverable<CoverInfo> {
	pub fn open(&self) -> Result<(), StateError> {
		self.update_state(self.document().state_open().to_owned())
	}

	pub fn opening(&self) -> Result<(), StateError> {
		self.update_state(self.document().state_opening().to_owned())
	}

	pub fn closed(&self) -> Result<(), StateError> {
		self.update_state(self.document().state_closed().to_owned())
	}

	pub fn closing(&self) -> Result<(), StateError> {
		self.update_state(self.document().state_closing().to_owned())
	}

	pub fn stopped(&self) -> Result<(), StateError> {
		self.update_state(self.document().state_stopped().to_owned())
	}

	fn update_state(&self, state: String) -> Result<(), StateError> {
		self.publish_state(state, self.document().retain())
	}

	/// Open/close/stop commands arriving on the command topic.
	pub fn commands(&self) -> flume::Receiver<Message> {
		self.command_receiver()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::entity::recv_publish;
	use ha_mqtt_discoverable_proto::EntityInfo;

	fn garage_door() -> CoverInfo {
		CoverInfo::new(EntityInfo::new("Garage Door").unique_id("garage_door"))
	}

	#[test]
	fn speaks_the_five_state_vocabulary() {
		let (cover, published, _commands) = Discoverable::detached(garage_door());

		cover.opening().unwrap();
		cover.open().unwrap();
		cover.closing().unwrap();
		cover.closed().unwrap();
		cover.stopped().unwrap();

		let states: Vec<_> = (0..5).map(|_| recv_publish(&published).1).collect();
		let expected: Vec<Vec<u8>> = ["opening", "open", "closing", "closed", "stopped"]
			.iter()
			.map(|s| s.as_bytes().to_vec())
			.collect();
		assert_eq!(states, expected);
	}

	#[test]
	fn stop_interrupts_motion_in_either_direction() {
		let (cover, published, _commands) = Discoverable::detached(garage_door());

		cover.opening().unwrap();
		cover.stopped().unwrap();
		cover.closing().unwrap();
		cover.stopped().unwrap();

		let states: Vec<_> = (0..4).map(|_| recv_publish(&published).1).collect();
		let expected: Vec<Vec<u8>> = ["opening", "stopped", "closing", "stopped"]
			.iter()
			.map(|s| s.as_bytes().to_vec())
			.collect();
		assert_eq!(states, expected);
	}

	#[test]
	fn state_is_retained_by_default() {
		let (cover, published, _commands) = Discoverable::detached(garage_door());

		cover.open().unwrap();

		let (_, _, retained) = recv_publish(&published);
		assert!(retained);
	}
}
