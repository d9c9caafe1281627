//! Announce MQTT entities to Home Assistant through its discovery protocol.
//!
//! Each entity kind is a thin façade over one retained discovery config plus
//! a handful of topics derived from it. Bringing an entity up publishes the
//! config; after that the per-kind methods publish state, and kinds that take
//! commands hand them out on a channel:
//!
//! ```no_run
//! use ha_mqtt_discoverable::{MqttOptions, Settings, Switch};
//! use ha_mqtt_discoverable::proto::{EntityInfo, SwitchInfo};
//!
//! # fn main() -> Result<(), ha_mqtt_discoverable::Error> {
//! let info = SwitchInfo::new(EntityInfo::new("Garage Door").unique_id("garage_door"));
//! let switch = Switch::new(Settings::new(MqttOptions::new("localhost"), info))?;
//!
//! for command in switch.commands().iter() {
//!     if command.payload_str() == switch.document().payload_on() {
//!         // drive the relay, then confirm
//!         switch.on()?;
//!     }
//! }
//! # Ok(())
//! # }
//! ```

mod availability;
mod client;
mod entity;
mod error;
mod options;
mod subscriptions;
mod topics;

pub use availability::AvailabilityState;
pub use client::{HassMqttClient, Message};
pub use entity::{
	BinarySensor, Button, Camera, Climate, Cover, DeviceTrigger, Discoverable, Image, Light,
	LightState, Number, Select, Sensor, Switch, Text,
};
pub use error::{ClientError, ConfigurationError, ConnectError, Error, StateError};
pub use options::{Connection, MqttOptions, Settings, TlsOptions};
pub use topics::{EntityTopics, TopicsConfig};

pub use ha_mqtt_discoverable_proto as proto;
