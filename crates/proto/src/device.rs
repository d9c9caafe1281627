use crate::{
	name::{Name, NameInvalidity},
	validation::ContextExt,
};
use semval::{context::Context, Validate, ValidationResult};
use serde::{
	de::{self, SeqAccess, Visitor},
	ser::SerializeTuple,
	Deserialize, Deserializer, Serialize, Serializer,
};
use std::fmt;

/// Information about the device an entity is a part of, tying it into the
/// Home Assistant device registry.
///
/// Only works through MQTT discovery and when `unique_id` is set on the
/// entity. At least one of `identifiers` or `connections` must be present to
/// identify the device. One `Device` value is shared (by `Arc`) between every
/// entity that belongs to the same physical device, so the embedded block is
/// re-emitted identically from each of their config documents.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
	/// A list of connections of the device to the outside world as a list of
	/// tuples `[connection_type, connection_identifier]`. For example the MAC
	/// address of a network interface: `"connections": [["mac", "02:5b:26:a8:dc:12"]]`.
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub connections: Vec<ConnectionInfo>,

	/// A list of IDs that uniquely identify the device. For example a serial
	/// number.
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub identifiers: Vec<String>,

	/// The manufacturer of the device.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub manufacturer: Option<String>,

	/// The model of the device.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub model: Option<String>,

	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub name: Option<Name>,

	/// Suggest an area if the device isn’t in one yet.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub suggested_area: Option<String>,

	/// The firmware version of the device.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub sw_version: Option<String>,

	/// The hardware version of the device.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub hw_version: Option<String>,

	/// Identifier of a device that routes messages between this device and
	/// Home Assistant. Examples of such devices are hubs, or parent devices of
	/// a sub-device. This is used to show device topology in Home Assistant.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub via_device: Option<String>,

	/// A link to the webpage that can manage the configuration of this device.
	/// Can be either an HTTP or HTTPS link.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub configuration_url: Option<String>,
}

impl Device {
	/// A device block identified by a single identifier.
	pub fn new(name: impl Into<Name>, identifier: impl Into<String>) -> Self {
		Device {
			name: Some(name.into()),
			identifiers: vec![identifier.into()],
			..Device::default()
		}
	}

	pub fn is_empty(&self) -> bool {
		self.connections.is_empty()
			&& self.identifiers.is_empty()
			&& self.manufacturer.is_none()
			&& self.model.is_none()
			&& self.name.is_none()
			&& self.suggested_area.is_none()
			&& self.sw_version.is_none()
			&& self.hw_version.is_none()
			&& self.via_device.is_none()
			&& self.configuration_url.is_none()
	}
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum DeviceInvalidity {
	/// Without at least one identifier or connection, Home Assistant has
	/// nothing to key the device registry entry on.
	MissingIdentifiers,
	Connection(usize, ConnectionInfoInvalidity),
	Name(NameInvalidity),
}

impl Validate for Device {
	type Invalidity = DeviceInvalidity;

	fn validate(&self) -> ValidationResult<Self::Invalidity> {
		Context::new()
			.invalidate_if(
				self.identifiers.is_empty() && self.connections.is_empty(),
				DeviceInvalidity::MissingIdentifiers,
			)
			.validate_each(&self.connections, DeviceInvalidity::Connection)
			.validate_opt(self.name.as_ref(), DeviceInvalidity::Name)
			.into()
	}
}

/// A single `[connection_type, connection_identifier]` pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionInfo {
	/// Connection type. For example `mac` for a mac-address.
	pub type_name: String,

	/// Connection value. For instance `02:5b:26:a8:dc:12` for a mac-address.
	pub value: String,
}

impl ConnectionInfo {
	pub fn new(type_name: impl Into<String>, value: impl Into<String>) -> Self {
		ConnectionInfo {
			type_name: type_name.into(),
			value: value.into(),
		}
	}

	/// A `mac` connection.
	pub fn mac(address: impl Into<String>) -> Self {
		Self::new("mac", address)
	}
}

// HA expects connections as two-element arrays, not objects.
impl Serialize for ConnectionInfo {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		let mut tuple = serializer.serialize_tuple(2)?;
		tuple.serialize_element(&self.type_name)?;
		tuple.serialize_element(&self.value)?;
		tuple.end()
	}
}

impl<'de> Deserialize<'de> for ConnectionInfo {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		struct ConnectionInfoVisitor;

		impl<'de> Visitor<'de> for ConnectionInfoVisitor {
			type Value = ConnectionInfo;

			fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
				formatter.write_str("a [connection_type, connection_identifier] pair")
			}

			fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
				let type_name = seq
					.next_element()?
					.ok_or_else(|| de::Error::invalid_length(0, &self))?;
				let value = seq
					.next_element()?
					.ok_or_else(|| de::Error::invalid_length(1, &self))?;
				Ok(ConnectionInfo { type_name, value })
			}
		}

		deserializer.deserialize_tuple(2, ConnectionInfoVisitor)
	}
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ConnectionInfoInvalidity {
	TypeNameEmpty,
	ValueEmpty,
}

impl Validate for ConnectionInfo {
	type Invalidity = ConnectionInfoInvalidity;

	fn validate(&self) -> ValidationResult<Self::Invalidity> {
		Context::new()
			.invalidate_if(
				self.type_name.is_empty(),
				ConnectionInfoInvalidity::TypeNameEmpty,
			)
			.invalidate_if(self.value.is_empty(), ConnectionInfoInvalidity::ValueEmpty)
			.into()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use nameof::{name_of, name_of_type};
	use serde_test::{assert_tokens, Token};

	#[test]
	fn connection_info_serde() {
		assert_tokens(
			&ConnectionInfo::mac("02:5b:26:a8:dc:12"),
			&[
				Token::Tuple { len: 2 },
				Token::Str("mac"),
				Token::Str("02:5b:26:a8:dc:12"),
				Token::TupleEnd,
			],
		)
	}

	#[test]
	fn device_without_identity_is_invalid() {
		let err: Vec<_> = Device {
			name: Some(Name::from("garage")),
			..Device::default()
		}
		.validate()
		.expect_err("should be invalid")
		.into_iter()
		.collect();

		assert_eq!(&*err, &[DeviceInvalidity::MissingIdentifiers])
	}

	#[test]
	fn device_with_connection_only_is_valid() {
		let device = Device {
			connections: vec![ConnectionInfo::mac("02:5b:26:a8:dc:12")],
			..Device::default()
		};

		assert!(device.validate().is_ok())
	}

	#[test]
	fn device_serde_omits_unset_keys() {
		assert_tokens(
			&Device::new("Garage", "garage-mk1"),
			&[
				Token::Struct {
					name: name_of_type!(Device),
					len: 2,
				},
				Token::Str(name_of!(identifiers in Device)),
				Token::Seq { len: Some(1) },
				Token::Str("garage-mk1"),
				Token::SeqEnd,
				Token::Str(name_of!(name in Device)),
				Token::Some,
				Token::Str("Garage"),
				Token::StructEnd,
			],
		)
	}
}
