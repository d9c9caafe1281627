use std::io;

use ha_mqtt_discoverable_proto::EntityInvalidity;
use semval::context::Context;

/// The entity definition cannot produce a discovery announcement.
#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
	#[error("entity has neither an object id, a unique id, nor a name to derive one from")]
	MissingObjectId,

	#[error("an entity attached to a device must carry a unique id")]
	DeviceRequiresUniqueId,

	#[error("entity definition is invalid: {0:?}")]
	Invalid(Vec<EntityInvalidity>),
}

impl ConfigurationError {
	pub(crate) fn from_context(context: Context<EntityInvalidity>) -> Self {
		let invalidities: Vec<EntityInvalidity> = context.into_iter().collect();

		if invalidities.contains(&EntityInvalidity::DeviceRequiresUniqueId) {
			ConfigurationError::DeviceRequiresUniqueId
		} else if invalidities.contains(&EntityInvalidity::MissingIdentity) {
			ConfigurationError::MissingObjectId
		} else {
			ConfigurationError::Invalid(invalidities)
		}
	}
}

/// Failed to establish the MQTT session.
#[derive(Debug, thiserror::Error)]
pub enum ConnectError {
	#[error("failed to create MQTT client")]
	CreateClient(#[source] paho_mqtt::Error),

	#[error("failed to resolve host {host}:{port}")]
	ResolveHost {
		host: String,
		port: u16,
		#[source]
		source: io::Error,
	},

	#[error("failed to connect to MQTT broker")]
	Connect(#[source] paho_mqtt::Error),

	#[error("failed to load TLS certificates")]
	Tls(#[source] paho_mqtt::Error),

	#[error("failed to spawn MQTT client thread")]
	SpawnThread(#[source] io::Error),

	#[error("failed to create async runtime for MQTT client thread")]
	CreateRuntime(#[source] io::Error),

	#[error("failed to find a directory for MQTT session persistence")]
	StateDir,
}

/// The shared client handle failed to carry out a request.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
	#[error("the MQTT client has shut down")]
	Closed,

	#[error("the broker rejected the subscription to '{topic}'")]
	Subscribe {
		topic: String,
		#[source]
		source: paho_mqtt::Error,
	},
}

/// A state update was rejected before anything reached the broker.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
	#[error("value {value} is outside the configured range {min}..={max}")]
	OutOfRange { value: f64, min: f64, max: f64 },

	#[error("text of {len} characters is outside the configured length {min}..={max}")]
	TextLength { len: usize, min: usize, max: usize },

	#[error("'{0}' is not one of the configured options")]
	InvalidOption(String),

	#[error("the entity does not declare support for {0}")]
	UnsupportedFeature(&'static str),

	#[error("{0} must not be empty")]
	EmptyValue(&'static str),

	#[error("this entity was created without manual availability tracking")]
	AvailabilityNotConfigured,

	#[error("failed to serialize payload")]
	Serialize(#[source] serde_json::Error),

	#[error(transparent)]
	Client(#[from] ClientError),
}

/// Anything that can go wrong while bringing an entity online.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error(transparent)]
	Configuration(#[from] ConfigurationError),

	#[error(transparent)]
	Connect(#[from] ConnectError),

	#[error(transparent)]
	Client(#[from] ClientError),

	#[error(transparent)]
	State(#[from] StateError),
}

#[cfg(test)]
mod tests {
	use super::*;
	use assert_matches::assert_matches;
	use ha_mqtt_discoverable_proto::EntityInfo;
	use semval::Validate;
	use std::sync::Arc;

	#[test]
	fn missing_identity_maps_to_missing_object_id() {
		let context = EntityInfo::default().validate().unwrap_err();

		assert_matches!(
			ConfigurationError::from_context(context),
			ConfigurationError::MissingObjectId
		);
	}

	#[test]
	fn device_without_unique_id_maps_to_its_own_variant() {
		let device = Arc::new(ha_mqtt_discoverable_proto::Device::new("Hub", "hub-1"));
		let context = EntityInfo::new("Lamp")
			.device(device)
			.validate()
			.unwrap_err();

		assert_matches!(
			ConfigurationError::from_context(context),
			ConfigurationError::DeviceRequiresUniqueId
		);
	}
}
