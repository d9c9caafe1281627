use semval::{context::Context, Invalidity, Validate};

/// Validation helpers for the optional and repeated fields discovery
/// documents are full of.
pub trait ContextExt<V: Invalidity>: Sized {
	/// Validate `target` if present, mapping its invalidities into `V`.
	fn validate_opt<U, F>(self, target: Option<&impl Validate<Invalidity = U>>, map: F) -> Self
	where
		U: Invalidity,
		F: Fn(U) -> V;

	/// Validate every item, tagging each invalidity with the item's position.
	fn validate_each<'a, T, U, F>(self, items: impl IntoIterator<Item = &'a T>, map: F) -> Self
	where
		T: Validate<Invalidity = U> + 'a,
		U: Invalidity,
		F: Fn(usize, U) -> V;
}

impl<V: Invalidity> ContextExt<V> for Context<V> {
	fn validate_opt<U, F>(self, target: Option<&impl Validate<Invalidity = U>>, map: F) -> Self
	where
		U: Invalidity,
		F: Fn(U) -> V,
	{
		match target {
			Some(value) => self.validate_with(value, map),
			None => self,
		}
	}

	fn validate_each<'a, T, U, F>(self, items: impl IntoIterator<Item = &'a T>, map: F) -> Self
	where
		T: Validate<Invalidity = U> + 'a,
		U: Invalidity,
		F: Fn(usize, U) -> V,
	{
		let mut context = self;
		for (index, item) in items.into_iter().enumerate() {
			context = context.validate_with(item, |invalidity| map(index, invalidity));
		}

		context
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::topic::{Topic, TopicInvalidity};
	use semval::ValidationResult;

	#[derive(Copy, Clone, Debug, Eq, PartialEq)]
	enum ListInvalidity {
		Topic(usize, TopicInvalidity),
	}

	#[test]
	fn absent_targets_validate_clean() {
		let none: Option<Topic> = None;
		let result: ValidationResult<TopicInvalidity> =
			Context::new().validate_opt(none.as_ref(), |v| v).into();

		assert!(result.is_ok());
	}

	#[test]
	fn each_invalid_item_is_indexed() {
		let topics = [Topic::from("ok"), Topic::from(""), Topic::from("")];
		let result: ValidationResult<ListInvalidity> = Context::new()
			.validate_each(&topics, ListInvalidity::Topic)
			.into();
		let err: Vec<_> = result
			.expect_err("should be invalid")
			.into_iter()
			.collect();

		assert_eq!(
			&*err,
			&[
				ListInvalidity::Topic(1, TopicInvalidity::Empty),
				ListInvalidity::Topic(2, TopicInvalidity::Empty),
			]
		)
	}
}
