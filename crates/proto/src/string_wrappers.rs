/// Declares an owned typed-string newtype.
///
/// The wrappers keep distinct discovery document fields (topics, payloads,
/// names, …) from being swapped for one another while still serializing as
/// plain strings.
macro_rules! typed_str {
	($(#[$meta:meta])* $vis:vis $name:ident) => {
		$(#[$meta])*
		#[derive(Clone, Default, Eq, PartialEq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
		#[serde(transparent)]
		$vis struct $name(pub(crate) String);

		impl $name {
			#[inline]
			pub fn new(value: impl Into<String>) -> Self {
				Self(value.into())
			}

			#[inline]
			pub fn as_str(&self) -> &str {
				&self.0
			}

			#[inline]
			pub fn into_string(self) -> String {
				self.0
			}
		}

		impl From<&str> for $name {
			#[inline]
			fn from(value: &str) -> Self {
				Self(value.to_owned())
			}
		}

		impl From<String> for $name {
			#[inline]
			fn from(value: String) -> Self {
				Self(value)
			}
		}

		impl From<$name> for String {
			#[inline]
			fn from(value: $name) -> Self {
				value.0
			}
		}

		impl std::fmt::Debug for $name {
			#[inline]
			fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
				std::fmt::Debug::fmt(&self.0, f)
			}
		}

		impl std::fmt::Display for $name {
			#[inline]
			fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
				std::fmt::Display::fmt(&self.0, f)
			}
		}

		impl std::borrow::Borrow<str> for $name {
			#[inline]
			fn borrow(&self) -> &str {
				&self.0
			}
		}

		impl AsRef<str> for $name {
			#[inline]
			fn as_ref(&self) -> &str {
				&self.0
			}
		}

		impl std::ops::Deref for $name {
			type Target = str;

			#[inline]
			fn deref(&self) -> &Self::Target {
				&self.0
			}
		}
	};
}

typed_str! {
	/// The name of an entity or device.
	pub Name
}

typed_str! {
	/// An ID that uniquely identifies an entity.
	///
	/// If two entities have the same unique ID, Home Assistant will raise an
	/// exception.
	pub UniqueId
}

typed_str! {
	/// An MQTT topic.
	pub Topic
}

typed_str! {
	/// An MQTT message payload.
	pub Payload
}

typed_str! {
	/// A [Home Assistant template][template].
	///
	/// [template]: https://www.home-assistant.io/docs/configuration/templating/
	pub Template
}

typed_str! {
	/// [Icon][icon] for an entity.
	///
	/// [icon]: https://www.home-assistant.io/docs/configuration/customizing-devices/#icon
	pub Icon
}
