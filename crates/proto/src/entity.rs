use crate::{
	availability::{Availability, AvailabilityInvalidity, AvailabilityMode},
	device::{Device, DeviceInvalidity},
	icon::{Icon, IconInvalidity},
	name::{Name, NameInvalidity},
	payload::PayloadInvalidity,
	qos::MqttQoS,
	template::TemplateInvalidity,
	topic::{Topic, TopicInvalidity},
	unique_id::{UniqueId, UniqueIdInvalidity},
	validation::ContextExt,
};
use semval::{context::Context, Validate, ValidationResult};
use serde::{Deserialize, Serialize};
use std::{fmt, sync::Arc};

pub mod binary_sensor;
pub mod button;
pub mod camera;
pub mod climate;
pub mod cover;
pub mod device_trigger;
pub mod image;
pub mod light;
pub mod number;
pub mod select;
pub mod sensor;
pub mod switch;
pub mod text;

/// The MQTT integrations an entity document can target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Component {
	BinarySensor,
	Sensor,
	Switch,
	Button,
	Light,
	Cover,
	Number,
	Select,
	Text,
	Camera,
	Image,
	Climate,
	DeviceTrigger,
}

impl Component {
	/// The topic segment Home Assistant expects for this component.
	pub const fn as_str(self) -> &'static str {
		match self {
			Component::BinarySensor => "binary_sensor",
			Component::Sensor => "sensor",
			Component::Switch => "switch",
			Component::Button => "button",
			Component::Light => "light",
			Component::Cover => "cover",
			Component::Number => "number",
			Component::Select => "select",
			Component::Text => "text",
			Component::Camera => "camera",
			Component::Image => "image",
			Component::Climate => "climate",
			// Device triggers live under HA's device_automation platform.
			Component::DeviceTrigger => "device_automation",
		}
	}

	/// Whether entities of this component listen for commands issued by Home
	/// Assistant on a command topic.
	pub const fn accepts_commands(self) -> bool {
		matches!(
			self,
			Component::Switch
				| Component::Button
				| Component::Light
				| Component::Cover
				| Component::Number
				| Component::Select
				| Component::Text
				| Component::Climate
		)
	}
}

impl fmt::Display for Component {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// The configuration block shared by every entity kind.
///
/// Kind documents embed this through `#[serde(flatten)]`, so the resulting
/// JSON is the flat object Home Assistant expects. The topic references
/// (`state_topic`, `command_topic`, …) are left `None` by constructors; the
/// client crate fills them in from the derived topic layout before the
/// document is published.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityInfo {
	/// A list of MQTT topics subscribed to receive availability
	/// (online/offline) updates.
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub availability: Vec<Availability>,

	/// When `availability` is configured, this controls the conditions needed
	/// to set the entity to `available`.
	#[serde(default, skip_serializing_if = "AvailabilityMode::is_default")]
	pub availability_mode: AvailabilityMode,

	/// The MQTT topic subscribed to receive availability updates, when a
	/// single topic suffices.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub availability_topic: Option<Topic>,

	/// The device this entity is a part of.
	///
	/// Requires `unique_id` to be set. The same `Arc` is shared by every
	/// entity of the device, so all of them embed an identical device block.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub device: Option<Arc<Device>>,

	/// Sets the class of the device, changing the device state and icon that
	/// is displayed on the frontend.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub device_class: Option<String>,

	/// Flag which defines if the entity should be enabled when first added.
	/// Defaults to `true`.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub enabled_by_default: Option<bool>,

	/// Classification of a non-primary entity.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub entity_category: Option<String>,

	/// Number of seconds after which the entity's state expires if it is not
	/// updated. By default the state never expires.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub expire_after: Option<u32>,

	/// Sends update events even if the value hasn't changed. Useful for
	/// meaningful value graphs in history.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub force_update: Option<bool>,

	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub icon: Option<Icon>,

	/// The MQTT topic subscribed to receive a JSON dictionary payload to set
	/// as entity attributes.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub json_attributes_topic: Option<Topic>,

	/// The name of the entity inside Home Assistant.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub name: Option<Name>,

	/// Used instead of `name` for automatic generation of the `entity_id`.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub object_id: Option<String>,

	/// The maximum QoS level to be used when receiving and publishing
	/// messages.
	#[serde(default, skip_serializing_if = "MqttQoS::is_default")]
	pub qos: MqttQoS,

	/// The MQTT topic Home Assistant subscribes to for state updates.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub state_topic: Option<Topic>,

	/// The MQTT topic Home Assistant publishes commands to.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub command_topic: Option<Topic>,

	/// An ID that uniquely identifies this entity. Required to edit the entity
	/// from the UI and to attach it to a device.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub unique_id: Option<UniqueId>,
}

impl EntityInfo {
	pub fn new(name: impl Into<Name>) -> Self {
		EntityInfo {
			name: Some(name.into()),
			..EntityInfo::default()
		}
	}

	pub fn unique_id(mut self, unique_id: impl Into<UniqueId>) -> Self {
		self.unique_id = Some(unique_id.into());
		self
	}

	pub fn object_id(mut self, object_id: impl Into<String>) -> Self {
		self.object_id = Some(object_id.into());
		self
	}

	pub fn device(mut self, device: Arc<Device>) -> Self {
		self.device = Some(device);
		self
	}

	pub fn device_class(mut self, device_class: impl Into<String>) -> Self {
		self.device_class = Some(device_class.into());
		self
	}

	pub fn icon(mut self, icon: impl Into<Icon>) -> Self {
		self.icon = Some(icon.into());
		self
	}
}

/// Everything that can be wrong with an entity document, across all kinds.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum EntityInvalidity {
	/// Neither `unique_id` nor `name` is present, so no object id can be
	/// derived.
	MissingIdentity,
	/// `device` is set without `unique_id`; Home Assistant would not attach
	/// the entity to the device.
	DeviceRequiresUniqueId,
	/// The kind requires a device block (device triggers).
	DeviceRequired,
	Device(DeviceInvalidity),
	Availability(usize, AvailabilityInvalidity),
	Name(NameInvalidity),
	UniqueId(UniqueIdInvalidity),
	Icon(IconInvalidity),
	Topic(TopicInvalidity),
	Template(TemplateInvalidity),
	Payload(PayloadInvalidity),
	/// `min` exceeds `max` (numbers, text lengths, climate temperatures).
	InvalidRange,
	/// A select document without options is useless.
	EmptyOptions,
	/// A device trigger without a type or subtype.
	MissingTriggerType,
}

impl Validate for EntityInfo {
	type Invalidity = EntityInvalidity;

	fn validate(&self) -> ValidationResult<Self::Invalidity> {
		let mut context = Context::new()
			.invalidate_if(
				self.name.is_none() && self.unique_id.is_none(),
				EntityInvalidity::MissingIdentity,
			)
			.invalidate_if(
				self.device.is_some() && self.unique_id.is_none(),
				EntityInvalidity::DeviceRequiresUniqueId,
			)
			.validate_each(&self.availability, EntityInvalidity::Availability)
			.validate_opt(self.availability_topic.as_ref(), EntityInvalidity::Topic)
			.validate_opt(self.name.as_ref(), EntityInvalidity::Name)
			.validate_opt(self.unique_id.as_ref(), EntityInvalidity::UniqueId)
			.validate_opt(self.icon.as_ref(), EntityInvalidity::Icon)
			.validate_opt(self.json_attributes_topic.as_ref(), EntityInvalidity::Topic)
			.validate_opt(self.state_topic.as_ref(), EntityInvalidity::Topic)
			.validate_opt(self.command_topic.as_ref(), EntityInvalidity::Topic);

		if let Some(device) = &self.device {
			context = context.validate_with(device.as_ref(), EntityInvalidity::Device);
		}

		context.into()
	}
}

/// The derived topic references handed to a document before it is published.
#[derive(Debug, Clone)]
pub struct TopicRefs {
	pub state: Topic,
	pub command: Option<Topic>,
	pub availability: Option<Topic>,
	pub attributes: Topic,
}

/// A complete discovery document for one entity kind.
///
/// Implementors embed an [`EntityInfo`] and add their kind-specific keys; the
/// client crate uses this trait to derive topics, validate the document, and
/// inject the topic references before serializing.
pub trait DiscoveryDocument: Serialize + Validate<Invalidity = EntityInvalidity> {
	const COMPONENT: Component;

	fn entity(&self) -> &EntityInfo;

	fn entity_mut(&mut self) -> &mut EntityInfo;

	/// Record the derived topics in the document.
	///
	/// Only fills fields the caller left unset, so an explicitly configured
	/// topic wins over the derived layout. The default covers kinds that
	/// speak through the plain `state_topic`/`command_topic` pair; kinds with
	/// their own topic keys (camera, image, climate, device triggers)
	/// override this.
	fn attach_topics(&mut self, topics: TopicRefs) {
		let entity = self.entity_mut();
		if entity.state_topic.is_none() {
			entity.state_topic = Some(topics.state);
		}
		if entity.command_topic.is_none() {
			entity.command_topic = topics.command;
		}
		if entity.availability_topic.is_none() {
			entity.availability_topic = topics.availability;
		}
		if entity.json_attributes_topic.is_none() {
			entity.json_attributes_topic = Some(topics.attributes);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn entity_without_name_or_unique_id_is_invalid() {
		let err: Vec<_> = EntityInfo::default()
			.validate()
			.expect_err("should be invalid")
			.into_iter()
			.collect();

		assert_eq!(&*err, &[EntityInvalidity::MissingIdentity])
	}

	#[test]
	fn device_without_unique_id_is_invalid() {
		let device = Arc::new(Device::new("Garage", "garage-mk1"));
		let err: Vec<_> = EntityInfo::new("door").device(device)
			.validate()
			.expect_err("should be invalid")
			.into_iter()
			.collect();

		assert_eq!(&*err, &[EntityInvalidity::DeviceRequiresUniqueId])
	}

	#[test]
	fn device_with_unique_id_is_valid() {
		let device = Arc::new(Device::new("Garage", "garage-mk1"));
		let info = EntityInfo::new("door").unique_id("garage_door").device(device);

		assert!(info.validate().is_ok())
	}

	#[test]
	fn attach_topics_keeps_caller_supplied_topics() {
		let mut info = switch::SwitchInfo::new(EntityInfo::new("fan").unique_id("fan"));
		info.entity.availability_topic = Some(Topic::from("external/availability"));

		info.attach_topics(TopicRefs {
			state: Topic::from("derived/state"),
			command: Some(Topic::from("derived/set")),
			availability: None,
			attributes: Topic::from("derived/attributes"),
		});

		assert_eq!(
			info.entity.availability_topic.as_deref(),
			Some("external/availability")
		);
		assert_eq!(info.entity.state_topic.as_deref(), Some("derived/state"));
		assert_eq!(info.entity.command_topic.as_deref(), Some("derived/set"));
	}

	#[test]
	fn shared_device_blocks_serialize_identically() {
		let device = Arc::new(Device::new("Garage", "garage-mk1"));
		let motion = EntityInfo::new("motion")
			.unique_id("my_motion_sensor")
			.device(Arc::clone(&device));
		let door = EntityInfo::new("door")
			.unique_id("my_door_sensor")
			.device(Arc::clone(&device));

		let motion_json = serde_json::to_value(&motion).expect("serialize");
		let door_json = serde_json::to_value(&door).expect("serialize");

		assert_eq!(motion_json["device"], door_json["device"]);
		assert_ne!(motion_json["unique_id"], door_json["unique_id"]);
	}
}
