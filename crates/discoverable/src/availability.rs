use crate::{
	client::HassMqttClient,
	error::ClientError,
	topics::{OFFLINE, ONLINE},
};
use ha_mqtt_discoverable_proto::{MqttQoS, Topic};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::debug;

/// The last availability state an entity reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AvailabilityState {
	Online,
	Offline,
}

/// Manually tracked availability for one entity.
///
/// Entities start out offline. The broker holds a retained copy of the last
/// reported state, and the connection's will flips it back to `offline` if
/// the process dies without saying goodbye.
pub(crate) struct AvailabilityTracker {
	topic: Topic,
	client: HassMqttClient,
	online: AtomicBool,
}

impl AvailabilityTracker {
	pub(crate) fn new(topic: Topic, client: HassMqttClient) -> Self {
		AvailabilityTracker {
			topic,
			client,
			online: AtomicBool::new(false),
		}
	}

	pub(crate) fn set(&self, online: bool) -> Result<(), ClientError> {
		let payload = if online { ONLINE } else { OFFLINE };
		debug!(topic = %self.topic, payload, "publishing availability");

		self.client
			.publish(&self.topic, payload, true, MqttQoS::ExactlyOnce)?;
		self.online.store(online, Ordering::Relaxed);
		Ok(())
	}

	pub(crate) fn state(&self) -> AvailabilityState {
		if self.online.load(Ordering::Relaxed) {
			AvailabilityState::Online
		} else {
			AvailabilityState::Offline
		}
	}
}

/// A retained availability payload, also used as the connection's will.
pub(crate) fn availability_message(topic: &Topic, payload: &str) -> paho_mqtt::Message {
	paho_mqtt::MessageBuilder::new()
		.topic(topic.as_str())
		.payload(payload)
		.qos(MqttQoS::ExactlyOnce as i32)
		.retained(true)
		.finalize()
}

#[cfg(test)]
mod tests {
	use super::*;

	// Home Assistant matches these byte for byte.
	#[test]
	fn availability_payloads_are_exact() {
		let offline = availability_message(&"demo/availability".into(), OFFLINE);
		assert_eq!(offline.payload(), b"offline");
		assert!(offline.retained());

		let online = availability_message(&"demo/availability".into(), ONLINE);
		assert_eq!(online.payload(), b"online");
	}
}
