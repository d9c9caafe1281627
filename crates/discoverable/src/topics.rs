use crate::error::ConfigurationError;
use ha_mqtt_discoverable_proto::{Component, Device, EntityInfo, Topic};
use slug::slugify;
use std::sync::Arc;

pub(crate) const ONLINE: &str = "online";
pub(crate) const OFFLINE: &str = "offline";

/// Derives the topic layout for entities under a discovery prefix.
///
/// Everything an entity publishes or subscribes to lives under its config
/// topic's parent:
///
/// ```text
/// <prefix>/<component>/[<device>/]<object_id>/config
/// <prefix>/<component>/[<device>/]<object_id>/state
/// <prefix>/<component>/[<device>/]<object_id>/set
/// <prefix>/<component>/[<device>/]<object_id>/availability
/// <prefix>/<component>/[<device>/]<object_id>/attributes
/// ```
#[derive(Debug, Clone)]
pub struct TopicsConfig {
	discovery_prefix: Arc<str>,
}

impl TopicsConfig {
	pub const DEFAULT_DISCOVERY_PREFIX: &'static str = "homeassistant";

	pub fn new(discovery_prefix: impl AsRef<str>) -> Self {
		TopicsConfig {
			discovery_prefix: discovery_prefix.as_ref().into(),
		}
	}

	pub(crate) fn entity(
		&self,
		component: Component,
		info: &EntityInfo,
	) -> Result<EntityTopics, ConfigurationError> {
		let object_id = object_id(info)?;
		let base = match info.device.as_deref().and_then(device_segment) {
			Some(device) => format!(
				"{}/{}/{}/{}",
				self.discovery_prefix, component, device, object_id
			),
			None => format!("{}/{}/{}", self.discovery_prefix, component, object_id),
		};

		Ok(EntityTopics { base: base.into() })
	}
}

impl Default for TopicsConfig {
	fn default() -> Self {
		TopicsConfig::new(Self::DEFAULT_DISCOVERY_PREFIX)
	}
}

/// The resolved topics of a single entity.
#[derive(Debug, Clone)]
pub struct EntityTopics {
	base: Arc<str>,
}

impl EntityTopics {
	pub fn config(&self) -> Topic {
		self.leaf("config")
	}

	pub fn state(&self) -> Topic {
		self.leaf("state")
	}

	pub fn command(&self) -> Topic {
		self.leaf("set")
	}

	pub fn availability(&self) -> Topic {
		self.leaf("availability")
	}

	pub fn attributes(&self) -> Topic {
		self.leaf("attributes")
	}

	/// The last segment of the entity's topic base.
	pub fn object_id(&self) -> &str {
		self.base.rsplit('/').next().unwrap_or(&self.base)
	}

	fn leaf(&self, leaf: &str) -> Topic {
		format!("{}/{}", self.base, leaf).into()
	}
}

/// The topic segment identifying the entity: an explicit `object_id` wins,
/// then the `unique_id`, then a slug of the display name.
fn object_id(info: &EntityInfo) -> Result<String, ConfigurationError> {
	if let Some(object_id) = &info.object_id {
		return Ok(segment(object_id));
	}

	if let Some(unique_id) = &info.unique_id {
		return Ok(segment(unique_id.as_str()));
	}

	if let Some(name) = &info.name {
		return Ok(slugify(name.as_str()));
	}

	Err(ConfigurationError::MissingObjectId)
}

fn device_segment(device: &Device) -> Option<String> {
	if let Some(name) = &device.name {
		return Some(slugify(name));
	}

	device.identifiers.first().map(|id| segment(id))
}

/// Ids that are already topic-safe pass through unchanged; anything else gets
/// slugged. Keeps underscores, which `slugify` would fold into dashes.
fn segment(id: &str) -> String {
	let safe = !id.is_empty()
		&& id
			.chars()
			.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');

	if safe {
		id.to_owned()
	} else {
		slugify(id)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use assert_matches::assert_matches;
	use ha_mqtt_discoverable_proto::Component;
	use std::sync::Arc;

	#[test]
	fn topics_from_unique_id() {
		let topics = TopicsConfig::default()
			.entity(
				Component::BinarySensor,
				&EntityInfo::new("My Motion Sensor").unique_id("my_motion_sensor"),
			)
			.unwrap();

		assert_eq!(
			topics.config().as_str(),
			"homeassistant/binary_sensor/my_motion_sensor/config"
		);
		assert_eq!(
			topics.state().as_str(),
			"homeassistant/binary_sensor/my_motion_sensor/state"
		);
		assert_eq!(
			topics.command().as_str(),
			"homeassistant/binary_sensor/my_motion_sensor/set"
		);
		assert_eq!(
			topics.availability().as_str(),
			"homeassistant/binary_sensor/my_motion_sensor/availability"
		);
	}

	#[test]
	fn topics_from_name_are_slugged() {
		let topics = TopicsConfig::default()
			.entity(Component::Sensor, &EntityInfo::new("Garage Door Sensor"))
			.unwrap();

		assert_eq!(
			topics.config().as_str(),
			"homeassistant/sensor/garage-door-sensor/config"
		);
	}

	#[test]
	fn device_adds_a_topic_segment() {
		let device = Arc::new(Device::new("Weather Station", "ws-1"));
		let topics = TopicsConfig::default()
			.entity(
				Component::Sensor,
				&EntityInfo::new("Outdoor Temperature")
					.unique_id("ws1_outdoor_temp")
					.device(device),
			)
			.unwrap();

		assert_eq!(
			topics.config().as_str(),
			"homeassistant/sensor/weather-station/ws1_outdoor_temp/config"
		);
	}

	#[test]
	fn explicit_object_id_wins() {
		let topics = TopicsConfig::new("custom")
			.entity(
				Component::Switch,
				&EntityInfo::new("Pump").unique_id("pump_1").object_id("pump"),
			)
			.unwrap();

		assert_eq!(topics.config().as_str(), "custom/switch/pump/config");
	}

	#[test]
	fn no_identity_is_an_error() {
		let err = TopicsConfig::default().entity(Component::Sensor, &EntityInfo::default());

		assert_matches!(err, Err(ConfigurationError::MissingObjectId));
	}

	#[test]
	fn same_input_same_topics() {
		let info = EntityInfo::new("Lamp").unique_id("lamp_1");
		let a = TopicsConfig::default()
			.entity(Component::Light, &info)
			.unwrap();
		let b = TopicsConfig::default()
			.entity(Component::Light, &info)
			.unwrap();

		assert_eq!(a.config(), b.config());
		assert_eq!(a.state(), b.state());
	}
}
