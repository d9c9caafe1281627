use semval::{context::Context, Validate, ValidationResult};

pub use crate::string_wrappers::Topic;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum TopicInvalidity {
	Empty,
	IllegalCharacter,
}

impl Validate for Topic {
	type Invalidity = TopicInvalidity;

	fn validate(&self) -> ValidationResult<Self::Invalidity> {
		Context::new()
			.invalidate_if(self.is_empty(), TopicInvalidity::Empty)
			.invalidate_if(
				self.contains(|c| matches!(c, '#' | '+')),
				TopicInvalidity::IllegalCharacter,
			)
			.into()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty_topic_is_invalid() {
		let err: Vec<_> = Topic::from("")
			.validate()
			.expect_err("should be invalid")
			.into_iter()
			.collect();

		assert_eq!(&*err, &[TopicInvalidity::Empty])
	}

	#[test]
	fn wildcard_in_topic_is_invalid() {
		for topic in ["foo/#/bar", "foo/+/bar"] {
			let err: Vec<_> = Topic::from(topic)
				.validate()
				.expect_err("should be invalid")
				.into_iter()
				.collect();

			assert_eq!(&*err, &[TopicInvalidity::IllegalCharacter])
		}
	}

	#[test]
	fn plain_topic_is_valid() {
		assert!(Topic::from("homeassistant/switch/fan/config")
			.validate()
			.is_ok())
	}
}
