use crate::{entity::Discoverable, error::StateError};
use ha_mqtt_discoverable_proto::ImageInfo;

/// An image entity publishing image URLs to its url topic.
pub type Image = Discoverable<ImageInfo>;

impl Discoverable<ImageInfo> {
	pub fn set_url(&self, url: &str) -> Result<(), StateError> {
		if url.is_empty() {
			return Err(StateError::EmptyValue("image url"));
		}

		self.publish_state(url.to_owned(), self.document().retain.unwrap_or(false))
	}
}
