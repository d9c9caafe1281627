use crate::client::Message;
use ha_mqtt_discoverable_proto::MqttQoS;
use std::{collections::HashMap, sync::Arc};

struct Route {
	qos: MqttQoS,
	senders: Vec<flume::Sender<Message>>,
}

/// Routes messages arriving from the broker to entity command receivers.
///
/// Multiple entities can share one topic (and one broker subscription); a
/// receiver that has been dropped is pruned on the next message.
pub(crate) struct Subscriptions {
	routes: HashMap<Arc<str>, Route>,
}

impl Subscriptions {
	pub(crate) fn new() -> Self {
		Subscriptions {
			routes: HashMap::new(),
		}
	}

	pub(crate) fn contains(&self, topic: &str) -> bool {
		self.routes.contains_key(topic)
	}

	pub(crate) fn add(&mut self, topic: Arc<str>, qos: MqttQoS, sender: flume::Sender<Message>) {
		self.routes
			.entry(topic)
			.or_insert_with(|| Route {
				qos,
				senders: Vec::new(),
			})
			.senders
			.push(sender);
	}

	/// Fans `message` out to every receiver of its topic. Returns `true` when
	/// the topic has no live receivers left and the broker subscription can
	/// go.
	pub(crate) fn dispatch(&mut self, message: &Message) -> bool {
		let Some(route) = self.routes.get_mut(message.topic()) else {
			return false;
		};

		route
			.senders
			.retain(|sender| sender.send(message.clone()).is_ok());

		if route.senders.is_empty() {
			self.routes.remove(message.topic());
			true
		} else {
			false
		}
	}

	pub(crate) fn topics(&self) -> Vec<(Arc<str>, MqttQoS)> {
		self.routes
			.iter()
			.map(|(topic, route)| (topic.clone(), route.qos))
			.collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn message(topic: &str, payload: &str) -> Message {
		Message::new(topic.into(), payload.as_bytes().into(), false)
	}

	#[test]
	fn dispatches_to_all_receivers_of_a_topic() {
		let mut subscriptions = Subscriptions::new();
		let (tx_a, rx_a) = flume::unbounded();
		let (tx_b, rx_b) = flume::unbounded();

		subscriptions.add("light/set".into(), MqttQoS::AtLeastOnce, tx_a);
		subscriptions.add("light/set".into(), MqttQoS::AtLeastOnce, tx_b);

		let done = subscriptions.dispatch(&message("light/set", "ON"));

		assert!(!done);
		assert_eq!(rx_a.recv().unwrap().payload(), b"ON");
		assert_eq!(rx_b.recv().unwrap().payload(), b"ON");
	}

	#[test]
	fn unknown_topic_is_ignored() {
		let mut subscriptions = Subscriptions::new();
		assert!(!subscriptions.dispatch(&message("unknown", "x")));
	}

	#[test]
	fn dropped_receivers_are_pruned() {
		let mut subscriptions = Subscriptions::new();
		let (tx, rx) = flume::unbounded();

		subscriptions.add("switch/set".into(), MqttQoS::AtLeastOnce, tx);
		drop(rx);

		let done = subscriptions.dispatch(&message("switch/set", "OFF"));

		assert!(done);
		assert!(!subscriptions.contains("switch/set"));
	}
}
