use crate::{
	entity::{Component, DiscoveryDocument, EntityInfo, EntityInvalidity},
	template::Template,
	topic::Topic,
	validation::ContextExt,
};
use semval::{Validate, ValidationResult};
use serde::{Deserialize, Serialize};
use std::convert::identity;

/// An MQTT climate (HVAC) entity.
///
/// Home Assistant wants per-attribute state and command topics for climate;
/// this document maps all of them onto the single shared state and command
/// topics with value/command templates, so state is one JSON envelope
/// (`{"mode": …, "target_temperature": …, "current_temperature": …}`) and
/// commands arrive as JSON on one topic. The client injects the topic and
/// template fields.
///
/// See: <https://www.home-assistant.io/integrations/climate.mqtt/>
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClimateInfo {
	#[serde(flatten)]
	pub entity: EntityInfo,

	/// A list of supported modes, e.g. `["off", "heat", "cool", "auto"]`.
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub modes: Vec<String>,

	/// Minimum set point available.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub min_temp: Option<f64>,

	/// Maximum set point available.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub max_temp: Option<f64>,

	/// Defines the temperature unit of the device, `C` or `F`.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub temperature_unit: Option<String>,

	/// The desired precision for this device.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub precision: Option<f64>,

	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub mode_state_topic: Option<Topic>,

	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub mode_state_template: Option<Template>,

	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub mode_command_topic: Option<Topic>,

	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub mode_command_template: Option<Template>,

	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub temperature_state_topic: Option<Topic>,

	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub temperature_state_template: Option<Template>,

	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub temperature_command_topic: Option<Topic>,

	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub temperature_command_template: Option<Template>,

	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub current_temperature_topic: Option<Topic>,

	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub current_temperature_template: Option<Template>,

	/// Flag that defines if the climate works in optimistic mode.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub optimistic: Option<bool>,

	/// Defines if published messages should have the retain flag set.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub retain: Option<bool>,
}

impl ClimateInfo {
	pub fn new(entity: EntityInfo, modes: impl IntoIterator<Item = impl Into<String>>) -> Self {
		ClimateInfo {
			entity,
			modes: modes.into_iter().map(Into::into).collect(),
			..ClimateInfo::default()
		}
	}

	pub fn supports_mode(&self, mode: &str) -> bool {
		self.modes.iter().any(|m| m == mode)
	}

	/// Whether `temperature` falls inside the configured set point range.
	/// Unset bounds do not constrain.
	pub fn in_range(&self, temperature: f64) -> bool {
		self.min_temp.is_none_or(|min| temperature >= min)
			&& self.max_temp.is_none_or(|max| temperature <= max)
	}
}

impl Validate for ClimateInfo {
	type Invalidity = EntityInvalidity;

	fn validate(&self) -> ValidationResult<Self::Invalidity> {
		let inverted = matches!((self.min_temp, self.max_temp), (Some(min), Some(max)) if min > max);
		semval::context::Context::new()
			.validate_with(&self.entity, identity)
			.validate_opt(self.mode_state_topic.as_ref(), EntityInvalidity::Topic)
			.validate_opt(self.temperature_state_topic.as_ref(), EntityInvalidity::Topic)
			.validate_opt(self.current_temperature_topic.as_ref(), EntityInvalidity::Topic)
			.invalidate_if(inverted, EntityInvalidity::InvalidRange)
			.into()
	}
}

impl DiscoveryDocument for ClimateInfo {
	const COMPONENT: Component = Component::Climate;

	fn entity(&self) -> &EntityInfo {
		&self.entity
	}

	fn entity_mut(&mut self) -> &mut EntityInfo {
		&mut self.entity
	}

	fn attach_topics(&mut self, topics: crate::entity::TopicRefs) {
		if self.mode_state_topic.is_none() {
			self.mode_state_topic = Some(topics.state.clone());
			self.mode_state_template = Some("{{ value_json.mode }}".into());
		}
		if self.temperature_state_topic.is_none() {
			self.temperature_state_topic = Some(topics.state.clone());
			self.temperature_state_template = Some("{{ value_json.target_temperature }}".into());
		}
		if self.current_temperature_topic.is_none() {
			self.current_temperature_topic = Some(topics.state);
			self.current_temperature_template = Some("{{ value_json.current_temperature }}".into());
		}

		if let Some(command) = topics.command {
			if self.mode_command_topic.is_none() {
				self.mode_command_topic = Some(command.clone());
				self.mode_command_template = Some(r#"{"mode": "{{ value }}"}"#.into());
			}
			if self.temperature_command_topic.is_none() {
				self.temperature_command_topic = Some(command);
				self.temperature_command_template =
					Some(r#"{"target_temperature": {{ value }}}"#.into());
			}
		}

		if self.entity.availability_topic.is_none() {
			self.entity.availability_topic = topics.availability;
		}
		if self.entity.json_attributes_topic.is_none() {
			self.entity.json_attributes_topic = Some(topics.attributes);
		}
	}
}
