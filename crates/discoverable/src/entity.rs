mod binary_sensor;
mod button;
mod camera;
mod climate;
mod cover;
mod device_trigger;
mod image;
mod light;
mod number;
mod select;
mod sensor;
mod switch;
mod text;

pub use binary_sensor::BinarySensor;
pub use button::Button;
pub use camera::Camera;
pub use climate::Climate;
pub use cover::Cover;
pub use device_trigger::DeviceTrigger;
pub use image::Image;
pub use light::{Light, LightState};
pub use number::Number;
pub use select::Select;
pub use sensor::Sensor;
pub use switch::Switch;
pub use text::Text;

use crate::{
	availability::{availability_message, AvailabilityState, AvailabilityTracker},
	client::{HassMqttClient, Message},
	error::{ConfigurationError, Error, StateError},
	options::{Connection, Settings},
	topics::{EntityTopics, TopicsConfig, OFFLINE},
};
use ha_mqtt_discoverable_proto::{DiscoveryDocument, MqttQoS, TopicRefs};
use semval::Validate;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info};

/// An entity announced to Home Assistant through MQTT discovery.
///
/// Constructing one validates the document, derives the topic layout,
/// connects (or joins an existing connection), subscribes to the command
/// topic for kinds that take commands, and publishes the retained discovery
/// config. The per-kind state operations live on the type aliases
/// ([`Switch`], [`Sensor`], …).
pub struct Discoverable<T: DiscoveryDocument> {
	client: HassMqttClient,
	document: T,
	topics: EntityTopics,
	qos: MqttQoS,
	availability: Option<AvailabilityTracker>,
	commands: flume::Receiver<Message>,
	wrote_config: AtomicBool,
}

impl<T: DiscoveryDocument> Discoverable<T> {
	pub fn new(settings: Settings<T>) -> Result<Self, Error> {
		let Settings {
			connection,
			entity: mut document,
			discovery_prefix,
			manual_availability,
			defer_config,
			qos,
		} = settings;

		if let Err(context) = document.validate() {
			return Err(ConfigurationError::from_context(context).into());
		}

		let topics = TopicsConfig::new(&discovery_prefix).entity(T::COMPONENT, document.entity())?;

		let availability_topic = manual_availability.then(|| topics.availability());
		let command_topic = T::COMPONENT.accepts_commands().then(|| topics.command());

		document.attach_topics(TopicRefs {
			state: topics.state(),
			command: command_topic.clone(),
			availability: availability_topic.clone(),
			attributes: topics.attributes(),
		});

		let client = match connection {
			Connection::Options(options) => {
				let client_id = options.client_id(topics.object_id());
				// The will flips the retained availability back to offline if
				// the process dies without disconnecting.
				let will = availability_topic
					.as_ref()
					.map(|topic| availability_message(topic, OFFLINE));

				HassMqttClient::connect(options, client_id, will)?
			}
			Connection::Client(client) => client,
		};

		let commands = match &command_topic {
			Some(topic) => client.subscribe(topic, qos)?,
			// kinds without commands get a receiver that never yields
			None => flume::unbounded().1,
		};

		let availability =
			availability_topic.map(|topic| AvailabilityTracker::new(topic, client.clone()));

		let entity = Discoverable {
			client,
			document,
			topics,
			qos,
			availability,
			commands,
			wrote_config: AtomicBool::new(false),
		};

		if !defer_config {
			entity.write_config()?;
		}

		Ok(entity)
	}

	/// Announce (or re-announce) the entity by publishing its retained
	/// discovery config.
	pub fn write_config(&self) -> Result<(), StateError> {
		let payload = serde_json::to_vec(&self.document).map_err(StateError::Serialize)?;
		let topic = self.topics.config();

		info!(topic = %topic, "publishing discovery config");
		self.client.publish(&topic, payload, true, self.qos)?;
		self.wrote_config.store(true, Ordering::Relaxed);
		Ok(())
	}

	/// Remove the entity from Home Assistant by clearing the retained config.
	pub fn delete(&self) -> Result<(), StateError> {
		let topic = self.topics.config();

		info!(topic = %topic, "deleting discovery config");
		self.client.publish(&topic, Vec::new(), true, self.qos)?;
		self.wrote_config.store(false, Ordering::Relaxed);
		Ok(())
	}

	/// Publish a retained JSON dictionary to the attributes topic.
	pub fn set_attributes(&self, attributes: &impl Serialize) -> Result<(), StateError> {
		self.ensure_config()?;
		let payload = serde_json::to_vec(attributes).map_err(StateError::Serialize)?;
		self.client
			.publish(&self.topics.attributes(), payload, true, self.qos)?;
		Ok(())
	}

	/// Publish `online` or `offline` (retained) to the availability topic.
	///
	/// Only valid for entities created with
	/// [`manual_availability`](Settings::manual_availability).
	pub fn set_availability(&self, online: bool) -> Result<(), StateError> {
		let tracker = self
			.availability
			.as_ref()
			.ok_or(StateError::AvailabilityNotConfigured)?;

		self.ensure_config()?;
		tracker.set(online)?;
		Ok(())
	}

	/// The last availability state reported through
	/// [`set_availability`](Self::set_availability), if tracked.
	pub fn availability_state(&self) -> Option<AvailabilityState> {
		self.availability.as_ref().map(AvailabilityTracker::state)
	}

	pub fn document(&self) -> &T {
		&self.document
	}

	pub fn topics(&self) -> &EntityTopics {
		&self.topics
	}

	/// The underlying connection handle, for bringing further entities up on
	/// the same session.
	pub fn client(&self) -> &HassMqttClient {
		&self.client
	}

	pub(crate) fn publish_state(
		&self,
		payload: impl Into<Vec<u8>>,
		retained: bool,
	) -> Result<(), StateError> {
		self.ensure_config()?;
		let topic = self.topics.state();

		debug!(topic = %topic, "publishing state");
		self.client.publish(&topic, payload, retained, self.qos)?;
		Ok(())
	}

	pub(crate) fn publish_json_state(
		&self,
		state: &impl Serialize,
		retained: bool,
	) -> Result<(), StateError> {
		let payload = serde_json::to_vec(state).map_err(StateError::Serialize)?;
		self.publish_state(payload, retained)
	}

	pub(crate) fn command_receiver(&self) -> flume::Receiver<Message> {
		self.commands.clone()
	}

	/// Home Assistant ignores state on topics it has no config for, so make
	/// sure the announcement went out first.
	fn ensure_config(&self) -> Result<(), StateError> {
		if !self.wrote_config.load(Ordering::Relaxed) {
			self.write_config()?;
		}

		Ok(())
	}
}

#[cfg(test)]
pub(crate) use testing::recv_publish;

#[cfg(test)]
mod testing {
	use super::*;
	use crate::client::Command;
	use std::sync::Arc;

	impl<T: DiscoveryDocument> Discoverable<T> {
		/// Build an entity whose publishes land on the returned receiver and
		/// whose command topic is fed from the returned sender, with no broker
		/// session behind either.
		pub(crate) fn detached(
			mut document: T,
		) -> (Self, flume::Receiver<Command>, flume::Sender<Message>) {
			let (publish_sender, published) = flume::unbounded();
			let (command_sender, commands) = flume::unbounded();

			let topics = TopicsConfig::default()
				.entity(T::COMPONENT, document.entity())
				.expect("document has an identity");

			document.attach_topics(TopicRefs {
				state: topics.state(),
				command: T::COMPONENT.accepts_commands().then(|| topics.command()),
				availability: None,
				attributes: topics.attributes(),
			});

			let entity = Discoverable {
				client: HassMqttClient::from_sender(publish_sender),
				document,
				topics,
				qos: MqttQoS::AtLeastOnce,
				availability: None,
				commands,
				wrote_config: AtomicBool::new(true),
			};

			(entity, published, command_sender)
		}
	}

	pub(crate) fn recv_publish(receiver: &flume::Receiver<Command>) -> (Arc<str>, Vec<u8>, bool) {
		match receiver.try_recv() {
			Ok(Command::Publish {
				topic,
				payload,
				retained,
				..
			}) => (topic, payload, retained),
			Ok(_) => panic!("expected a publish"),
			Err(_) => panic!("nothing was published"),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use ha_mqtt_discoverable_proto::{EntityInfo, SwitchInfo};

	fn switch() -> SwitchInfo {
		SwitchInfo::new(EntityInfo::new("Bedroom Fan").unique_id("bedroom_fan"))
	}

	#[test]
	fn write_config_publishes_the_full_document() {
		let (entity, published, _commands) = Discoverable::detached(switch());

		entity.write_config().unwrap();

		let (topic, payload, retained) = recv_publish(&published);
		assert_eq!(&*topic, "homeassistant/switch/bedroom_fan/config");
		assert!(retained);

		let json: serde_json::Value = serde_json::from_slice(&payload).unwrap();
		assert_eq!(json["name"], "Bedroom Fan");
		assert_eq!(json["unique_id"], "bedroom_fan");
		assert_eq!(
			json["state_topic"],
			"homeassistant/switch/bedroom_fan/state"
		);
		assert_eq!(
			json["command_topic"],
			"homeassistant/switch/bedroom_fan/set"
		);
	}

	#[test]
	fn delete_clears_the_config_with_an_empty_payload() {
		let (entity, published, _commands) = Discoverable::detached(switch());

		entity.delete().unwrap();

		let (topic, payload, retained) = recv_publish(&published);
		assert_eq!(&*topic, "homeassistant/switch/bedroom_fan/config");
		assert!(retained);
		assert!(payload.is_empty());
	}

	#[test]
	fn state_updates_reannounce_after_delete() {
		let (entity, published, _commands) = Discoverable::detached(switch());

		entity.delete().unwrap();
		let _ = recv_publish(&published);

		entity.on().unwrap();

		let (topic, _, _) = recv_publish(&published);
		assert_eq!(&*topic, "homeassistant/switch/bedroom_fan/config");
		let (topic, payload, _) = recv_publish(&published);
		assert_eq!(&*topic, "homeassistant/switch/bedroom_fan/state");
		assert_eq!(payload, b"ON");
	}
}
