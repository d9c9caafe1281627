use crate::{
	entity::{Component, DiscoveryDocument, EntityInfo, EntityInvalidity},
	topic::Topic,
	validation::ContextExt,
};
use semval::{Validate, ValidationResult};
use serde::{Deserialize, Serialize};
use std::convert::identity;

/// An MQTT camera.
///
/// Cameras have no `state_topic`; Home Assistant watches the `topic` key for
/// image data instead. The client injects the derived state topic there when
/// the field is left unset.
///
/// See: <https://www.home-assistant.io/integrations/camera.mqtt/>
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraInfo {
	#[serde(flatten)]
	pub entity: EntityInfo,

	/// The MQTT topic to subscribe to receive the camera image.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub topic: Option<Topic>,

	/// Defines if published messages should have the retain flag set.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub retain: Option<bool>,
}

impl CameraInfo {
	pub fn new(entity: EntityInfo) -> Self {
		CameraInfo {
			entity,
			..CameraInfo::default()
		}
	}
}

impl Validate for CameraInfo {
	type Invalidity = EntityInvalidity;

	fn validate(&self) -> ValidationResult<Self::Invalidity> {
		semval::context::Context::new()
			.validate_with(&self.entity, identity)
			.validate_opt(self.topic.as_ref(), EntityInvalidity::Topic)
			.into()
	}
}

impl DiscoveryDocument for CameraInfo {
	const COMPONENT: Component = Component::Camera;

	fn entity(&self) -> &EntityInfo {
		&self.entity
	}

	fn entity_mut(&mut self) -> &mut EntityInfo {
		&mut self.entity
	}

	fn attach_topics(&mut self, topics: crate::entity::TopicRefs) {
		if self.topic.is_none() {
			self.topic = Some(topics.state);
		}
		if self.entity.availability_topic.is_none() {
			self.entity.availability_topic = topics.availability;
		}
		if self.entity.json_attributes_topic.is_none() {
			self.entity.json_attributes_topic = Some(topics.attributes);
		}
	}
}
