use semval::{context::Context, Validate, ValidationResult};

pub use crate::string_wrappers::Icon;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum IconInvalidity {
	Empty,
}

impl Validate for Icon {
	type Invalidity = IconInvalidity;

	fn validate(&self) -> ValidationResult<Self::Invalidity> {
		Context::new()
			.invalidate_if(self.is_empty(), IconInvalidity::Empty)
			.into()
	}
}
