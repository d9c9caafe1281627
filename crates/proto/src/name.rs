use semval::{context::Context, Validate, ValidationResult};

pub use crate::string_wrappers::Name;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum NameInvalidity {
	Empty,
}

impl Validate for Name {
	type Invalidity = NameInvalidity;

	fn validate(&self) -> ValidationResult<Self::Invalidity> {
		Context::new()
			.invalidate_if(self.is_empty(), NameInvalidity::Empty)
			.into()
	}
}
