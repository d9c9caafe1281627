use semval::{context::Context, Validate, ValidationResult};

pub use crate::string_wrappers::Template;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum TemplateInvalidity {
	Empty,
}

impl Validate for Template {
	type Invalidity = TemplateInvalidity;

	fn validate(&self) -> ValidationResult<Self::Invalidity> {
		Context::new()
			.invalidate_if(self.is_empty(), TemplateInvalidity::Empty)
			.into()
	}
}
