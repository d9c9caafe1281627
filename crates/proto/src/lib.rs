//! Data model for Home Assistant MQTT discovery documents.
//!
//! Every entity kind Home Assistant can discover over MQTT is described by a
//! JSON document published (retained) to its config topic. The types in this
//! crate serialize to exactly those documents: unset fields are omitted
//! rather than emitted as `null`, so Home Assistant's own defaults stay in
//! effect.
//!
//! See: <https://www.home-assistant.io/docs/mqtt/discovery/>

pub(crate) mod string_wrappers;

pub mod availability;
pub mod device;
pub mod entity;
pub mod icon;
pub mod name;
pub mod payload;
pub mod qos;
pub mod template;
pub mod topic;
pub mod unique_id;
pub mod validation;

pub use availability::{Availability, AvailabilityMode};
pub use device::{ConnectionInfo, Device};
pub use entity::{
	binary_sensor::BinarySensorInfo, button::ButtonInfo, camera::CameraInfo, climate::ClimateInfo,
	cover::CoverInfo, device_trigger::DeviceTriggerInfo, image::ImageInfo, light::LightInfo,
	number::NumberInfo, select::SelectInfo, sensor::SensorInfo, switch::SwitchInfo, text::TextInfo,
	Component, DiscoveryDocument, EntityInfo, EntityInvalidity, TopicRefs,
};
pub use icon::Icon;
pub use name::Name;
pub use payload::Payload;
pub use qos::MqttQoS;
pub use template::Template;
pub use topic::Topic;
pub use unique_id::UniqueId;
