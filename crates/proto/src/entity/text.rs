use crate::{
	entity::{Component, DiscoveryDocument, EntityInfo, EntityInvalidity},
	template::Template,
	validation::ContextExt,
};
use semval::{Validate, ValidationResult};
use serde::{Deserialize, Serialize};
use std::convert::identity;

/// An MQTT text entity.
///
/// See: <https://www.home-assistant.io/integrations/text.mqtt/>
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextInfo {
	#[serde(flatten)]
	pub entity: EntityInfo,

	/// The minimum size of a text being set or received.
	///
	/// The default (used if `None`) is `0`.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub min: Option<u32>,

	/// The maximum size of a text being set or received. At most `255`.
	///
	/// The default (used if `None`) is `255`.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub max: Option<u32>,

	/// The mode of the text entity. Must be either `text` or `password`.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub mode: Option<String>,

	/// A valid regular expression the text being set or received must match.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub pattern: Option<Template>,

	/// Defines if published messages should have the retain flag set.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub retain: Option<bool>,
}

impl TextInfo {
	pub fn new(entity: EntityInfo) -> Self {
		TextInfo {
			entity,
			..TextInfo::default()
		}
	}

	/// The effective length bounds, with Home Assistant's defaults filled in.
	pub fn bounds(&self) -> (u32, u32) {
		(self.min.unwrap_or(0), self.max.unwrap_or(255))
	}
}

impl Validate for TextInfo {
	type Invalidity = EntityInvalidity;

	fn validate(&self) -> ValidationResult<Self::Invalidity> {
		let (min, max) = self.bounds();
		semval::context::Context::new()
			.validate_with(&self.entity, identity)
			.validate_opt(self.pattern.as_ref(), EntityInvalidity::Template)
			.invalidate_if(min > max || max > 255, EntityInvalidity::InvalidRange)
			.into()
	}
}

impl DiscoveryDocument for TextInfo {
	const COMPONENT: Component = Component::Text;

	fn entity(&self) -> &EntityInfo {
		&self.entity
	}

	fn entity_mut(&mut self) -> &mut EntityInfo {
		&mut self.entity
	}
}
