use crate::entity::{Component, DiscoveryDocument, EntityInfo, EntityInvalidity};
use semval::{Validate, ValidationResult};
use serde::{Deserialize, Serialize};
use std::convert::identity;

/// An MQTT select.
///
/// See: <https://www.home-assistant.io/integrations/select.mqtt/>
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectInfo {
	#[serde(flatten)]
	pub entity: EntityInfo,

	/// List of options that can be selected.
	pub options: Vec<String>,

	/// Flag that defines if the select works in optimistic mode.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub optimistic: Option<bool>,

	/// Defines if published messages should have the retain flag set.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub retain: Option<bool>,
}

impl SelectInfo {
	pub fn new(entity: EntityInfo, options: impl IntoIterator<Item = impl Into<String>>) -> Self {
		SelectInfo {
			entity,
			options: options.into_iter().map(Into::into).collect(),
			..SelectInfo::default()
		}
	}
}

impl Validate for SelectInfo {
	type Invalidity = EntityInvalidity;

	fn validate(&self) -> ValidationResult<Self::Invalidity> {
		semval::context::Context::new()
			.validate_with(&self.entity, identity)
			.invalidate_if(self.options.is_empty(), EntityInvalidity::EmptyOptions)
			.into()
	}
}

impl DiscoveryDocument for SelectInfo {
	const COMPONENT: Component = Component::Select;

	fn entity(&self) -> &EntityInfo {
		&self.entity
	}

	fn entity_mut(&mut self) -> &mut EntityInfo {
		&mut self.entity
	}
}
