use crate::{
	entity::{Component, DiscoveryDocument, EntityInfo, EntityInvalidity},
	payload::Payload,
	topic::Topic,
	validation::ContextExt,
};
use semval::{Validate, ValidationResult};
use serde::{Deserialize, Serialize};
use std::convert::identity;

/// An MQTT device trigger.
///
/// Device triggers are events, not stateful entities: the document carries a
/// `topic` key (injected by the client) instead of a `state_topic`, and a
/// device block is mandatory.
///
/// See: <https://www.home-assistant.io/integrations/device_trigger.mqtt/>
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeviceTriggerInfo {
	#[serde(flatten)]
	pub entity: EntityInfo,

	/// The type of automation. Must be `trigger`.
	pub automation_type: String,

	/// The type of the trigger, e.g. `button_short_press`.
	#[serde(rename = "type")]
	pub trigger_type: String,

	/// The subtype of the trigger, e.g. `button_1`.
	pub subtype: String,

	/// Optional payload to match against the payload sent over the topic.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub payload: Option<Payload>,

	/// The MQTT topic the trigger fires on. Injected by the client.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub topic: Option<Topic>,
}

impl DeviceTriggerInfo {
	pub fn new(
		entity: EntityInfo,
		trigger_type: impl Into<String>,
		subtype: impl Into<String>,
	) -> Self {
		DeviceTriggerInfo {
			entity,
			automation_type: "trigger".into(),
			trigger_type: trigger_type.into(),
			subtype: subtype.into(),
			payload: None,
			topic: None,
		}
	}
}

impl Validate for DeviceTriggerInfo {
	type Invalidity = EntityInvalidity;

	fn validate(&self) -> ValidationResult<Self::Invalidity> {
		semval::context::Context::new()
			.validate_with(&self.entity, identity)
			.invalidate_if(self.entity.device.is_none(), EntityInvalidity::DeviceRequired)
			.invalidate_if(
				self.trigger_type.is_empty() || self.subtype.is_empty(),
				EntityInvalidity::MissingTriggerType,
			)
			.validate_opt(self.payload.as_ref(), EntityInvalidity::Payload)
			.validate_opt(self.topic.as_ref(), EntityInvalidity::Topic)
			.into()
	}
}

impl DiscoveryDocument for DeviceTriggerInfo {
	const COMPONENT: Component = Component::DeviceTrigger;

	fn entity(&self) -> &EntityInfo {
		&self.entity
	}

	fn entity_mut(&mut self) -> &mut EntityInfo {
		&mut self.entity
	}

	// Triggers are fire-and-forget events; they carry no state, command,
	// availability, or attribute topics.
	fn attach_topics(&mut self, topics: crate::entity::TopicRefs) {
		if self.topic.is_none() {
			self.topic = Some(topics.state);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::device::Device;
	use std::sync::Arc;

	#[test]
	fn trigger_without_device_is_invalid() {
		let info = DeviceTriggerInfo::new(
			EntityInfo::new("remote").unique_id("remote_btn1"),
			"button_short_press",
			"button_1",
		);

		let err: Vec<_> = info
			.validate()
			.expect_err("should be invalid")
			.into_iter()
			.collect();

		assert_eq!(&*err, &[EntityInvalidity::DeviceRequired])
	}

	#[test]
	fn trigger_with_device_is_valid() {
		let device = Arc::new(Device::new("Remote", "remote-mk1"));
		let info = DeviceTriggerInfo::new(
			EntityInfo::new("remote").unique_id("remote_btn1").device(device),
			"button_short_press",
			"button_1",
		);

		assert!(info.validate().is_ok())
	}
}
