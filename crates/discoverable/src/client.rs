mod inner;

use crate::error::{ClientError, ConnectError};
use crate::options::MqttOptions;
use ha_mqtt_discoverable_proto::{MqttQoS, Topic};
use std::{borrow::Cow, sync::Arc};

/// A message received from the broker, as delivered to command receivers.
#[derive(Debug, Clone)]
pub struct Message {
	topic: Arc<str>,
	payload: Arc<[u8]>,
	retained: bool,
}

impl Message {
	pub(crate) fn new(topic: Arc<str>, payload: Arc<[u8]>, retained: bool) -> Self {
		Message {
			topic,
			payload,
			retained,
		}
	}

	pub fn topic(&self) -> &str {
		&self.topic
	}

	pub fn payload(&self) -> &[u8] {
		&self.payload
	}

	/// The payload as text. Invalid UTF-8 gets replaced, which is good enough
	/// for the short fixed payloads Home Assistant sends on command topics.
	pub fn payload_str(&self) -> Cow<'_, str> {
		String::from_utf8_lossy(&self.payload)
	}

	pub fn retained(&self) -> bool {
		self.retained
	}
}

pub(crate) enum Command {
	Publish {
		topic: Arc<str>,
		payload: Vec<u8>,
		retained: bool,
		qos: MqttQoS,
	},
	Subscribe {
		topic: Arc<str>,
		qos: MqttQoS,
		sender: flume::Sender<Message>,
		result: flume::Sender<Result<(), ClientError>>,
	},
}

/// Cheap handle to a broker connection running on its own thread.
///
/// Every entity holds one; cloning shares the session. The handle dispatches
/// work over a channel and never blocks on the network, except for
/// [`subscribe`](Self::subscribe) which waits for the broker to acknowledge.
#[derive(Clone)]
pub struct HassMqttClient {
	sender: flume::Sender<Command>,
}

impl HassMqttClient {
	pub(crate) fn connect(
		options: MqttOptions,
		client_id: String,
		will: Option<paho_mqtt::Message>,
	) -> Result<Self, ConnectError> {
		let sender = inner::spawn(options, client_id, will)?;
		Ok(HassMqttClient { sender })
	}

	pub(crate) fn publish(
		&self,
		topic: &Topic,
		payload: impl Into<Vec<u8>>,
		retained: bool,
		qos: MqttQoS,
	) -> Result<(), ClientError> {
		self.sender
			.send(Command::Publish {
				topic: topic.as_str().into(),
				payload: payload.into(),
				retained,
				qos,
			})
			.map_err(|_| ClientError::Closed)
	}

	/// A handle whose commands land on the paired receiver instead of a
	/// broker session.
	#[cfg(test)]
	pub(crate) fn from_sender(sender: flume::Sender<Command>) -> Self {
		HassMqttClient { sender }
	}

	pub(crate) fn subscribe(
		&self,
		topic: &Topic,
		qos: MqttQoS,
	) -> Result<flume::Receiver<Message>, ClientError> {
		let (sender, receiver) = flume::unbounded();
		let (result, result_receiver) = flume::bounded(1);

		self.sender
			.send(Command::Subscribe {
				topic: topic.as_str().into(),
				qos,
				sender,
				result,
			})
			.map_err(|_| ClientError::Closed)?;

		match result_receiver.recv() {
			Ok(Ok(())) => Ok(receiver),
			Ok(Err(err)) => Err(err),
			Err(_) => Err(ClientError::Closed),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	/// The loop's shutdown condition is the command channel closing, so
	/// nothing owned by the loop itself (like the reconnect callback) may
	/// hold a command sender.
	#[test]
	fn dropping_every_handle_closes_the_command_channel() {
		let (sender, receiver) = flume::unbounded::<Command>();
		let (reconnect_sender, reconnect_receiver) = flume::unbounded::<()>();

		let client = HassMqttClient::from_sender(sender);
		let cloned = client.clone();

		drop(client);
		drop(cloned);

		assert!(matches!(
			receiver.recv(),
			Err(flume::RecvError::Disconnected)
		));

		// the reconnect side stays usable independently
		reconnect_sender.send(()).unwrap();
		assert!(reconnect_receiver.recv().is_ok());
	}
}
