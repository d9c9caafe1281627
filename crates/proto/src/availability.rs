use crate::{
	payload::{Payload, PayloadInvalidity},
	topic::{Topic, TopicInvalidity},
	validation::ContextExt,
};
use semval::{context::Context, Validate, ValidationResult};
use serde::{Deserialize, Serialize};

/// When availability is configured, this controls the conditions needed to set
/// the entity to available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AvailabilityMode {
	/// `payload_available` must be received on all configured availability
	/// topics before the entity is marked as online.
	#[serde(rename = "all")]
	All,

	/// `payload_available` must be received on at least one configured
	/// availability topic before the entity is marked as online.
	#[serde(rename = "any")]
	Any,

	/// The last `payload_available` or `payload_not_available` received on any
	/// configured availability topic controls the availability.
	///
	/// This is the default mode if not specified.
	#[serde(rename = "latest")]
	Latest,
}

impl AvailabilityMode {
	#[inline]
	pub const fn is_default(&self) -> bool {
		matches!(self, Self::Latest)
	}
}

impl Default for AvailabilityMode {
	#[inline]
	fn default() -> Self {
		Self::Latest
	}
}

/// An availability topic an entity subscribes Home Assistant to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Availability {
	/// An MQTT topic subscribed to receive availability (online/offline)
	/// updates.
	pub topic: Topic,

	/// The payload that represents the available state.
	///
	/// The default (used if `None`) is `online`.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub payload_available: Option<Payload>,

	/// The payload that represents the unavailable state.
	///
	/// The default (used if `None`) is `offline`.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub payload_not_available: Option<Payload>,
}

impl Availability {
	pub fn new(topic: impl Into<Topic>) -> Self {
		Self {
			topic: topic.into(),
			payload_available: None,
			payload_not_available: None,
		}
	}
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum AvailabilityInvalidity {
	Topic(TopicInvalidity),
	PayloadAvailable(PayloadInvalidity),
	PayloadNotAvailable(PayloadInvalidity),
}

impl Validate for Availability {
	type Invalidity = AvailabilityInvalidity;

	fn validate(&self) -> ValidationResult<Self::Invalidity> {
		Context::new()
			.validate_with(&self.topic, AvailabilityInvalidity::Topic)
			.validate_opt(
				self.payload_available.as_ref(),
				AvailabilityInvalidity::PayloadAvailable,
			)
			.validate_opt(
				self.payload_not_available.as_ref(),
				AvailabilityInvalidity::PayloadNotAvailable,
			)
			.into()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use nameof::{name_of, name_of_type};
	use serde_test::{assert_tokens, Token};

	#[test]
	fn no_payloads() {
		assert_tokens(
			&Availability::new("the/topic"),
			&[
				Token::Struct {
					name: name_of_type!(Availability),
					len: 1,
				},
				Token::Str(name_of!(topic in Availability)),
				Token::Str("the/topic"),
				Token::StructEnd,
			],
		)
	}

	#[test]
	fn invalid_topic_is_invalid() {
		let err: Vec<_> = Availability::new("")
			.validate()
			.expect_err("should be invalid")
			.into_iter()
			.collect();

		assert_eq!(&*err, &[AvailabilityInvalidity::Topic(TopicInvalidity::Empty)])
	}
}
