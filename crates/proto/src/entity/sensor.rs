use crate::{
	entity::{Component, DiscoveryDocument, EntityInfo, EntityInvalidity},
	template::Template,
	validation::ContextExt,
};
use semval::{Validate, ValidationResult};
use serde::{Deserialize, Serialize};
use std::convert::identity;

/// An MQTT sensor.
///
/// See: <https://www.home-assistant.io/integrations/sensor.mqtt/>
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorInfo {
	#[serde(flatten)]
	pub entity: EntityInfo,

	/// Defines the units of measurement of the sensor, if any.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub unit_of_measurement: Option<String>,

	/// Defines the type of state. If not `None`, the sensor is assumed to be
	/// numerical and will be displayed as a line-chart in the frontend instead
	/// of as discrete values.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub state_class: Option<String>,

	/// Defines a template to extract the value. If the template throws an
	/// error, the current state will be used instead.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub value_template: Option<Template>,

	/// Defines a template to extract the `last_reset`. When set, the
	/// `state_class` option must be `total`.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub last_reset_value_template: Option<Template>,

	/// The number of decimals which should be used in the sensor's state after
	/// rounding.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub suggested_display_precision: Option<u8>,
}

impl SensorInfo {
	pub fn new(entity: EntityInfo) -> Self {
		SensorInfo {
			entity,
			..SensorInfo::default()
		}
	}
}

impl Validate for SensorInfo {
	type Invalidity = EntityInvalidity;

	fn validate(&self) -> ValidationResult<Self::Invalidity> {
		semval::context::Context::new()
			.validate_with(&self.entity, identity)
			.validate_opt(self.value_template.as_ref(), EntityInvalidity::Template)
			.validate_opt(self.last_reset_value_template.as_ref(), EntityInvalidity::Template)
			.into()
	}
}

impl DiscoveryDocument for SensorInfo {
	const COMPONENT: Component = Component::Sensor;

	fn entity(&self) -> &EntityInfo {
		&self.entity
	}

	fn entity_mut(&mut self) -> &mut EntityInfo {
		&mut self.entity
	}
}
