use crate::{
	entity::{Component, DiscoveryDocument, EntityInfo, EntityInvalidity},
	topic::Topic,
	validation::ContextExt,
};
use semval::{Validate, ValidationResult};
use serde::{Deserialize, Serialize};
use std::convert::identity;

/// An MQTT image.
///
/// Home Assistant subscribes to `url_topic` for an image URL; the client
/// injects the derived state topic there when the field is left unset.
///
/// See: <https://www.home-assistant.io/integrations/image.mqtt/>
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageInfo {
	#[serde(flatten)]
	pub entity: EntityInfo,

	/// The MQTT topic to subscribe to receive an image URL.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub url_topic: Option<Topic>,

	/// Defines if published messages should have the retain flag set.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub retain: Option<bool>,
}

impl ImageInfo {
	pub fn new(entity: EntityInfo) -> Self {
		ImageInfo {
			entity,
			..ImageInfo::default()
		}
	}
}

impl Validate for ImageInfo {
	type Invalidity = EntityInvalidity;

	fn validate(&self) -> ValidationResult<Self::Invalidity> {
		semval::context::Context::new()
			.validate_with(&self.entity, identity)
			.validate_opt(self.url_topic.as_ref(), EntityInvalidity::Topic)
			.into()
	}
}

impl DiscoveryDocument for ImageInfo {
	const COMPONENT: Component = Component::Image;

	fn entity(&self) -> &EntityInfo {
		&self.entity
	}

	fn entity_mut(&mut self) -> &mut EntityInfo {
		&mut self.entity
	}

	fn attach_topics(&mut self, topics: crate::entity::TopicRefs) {
		if self.url_topic.is_none() {
			self.url_topic = Some(topics.state);
		}
		if self.entity.availability_topic.is_none() {
			self.entity.availability_topic = topics.availability;
		}
		if self.entity.json_attributes_topic.is_none() {
			self.entity.json_attributes_topic = Some(topics.attributes);
		}
	}
}
