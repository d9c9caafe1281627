use crate::{
	client::{Command, Message},
	error::{ClientError, ConnectError},
	options::MqttOptions,
	subscriptions::Subscriptions,
};
use futures::{Stream, StreamExt};
use ha_mqtt_discoverable_proto::MqttQoS;
use std::{sync::Arc, thread, time::Duration};
use tracing::{debug, instrument, warn};

pub(crate) struct InnerClient {
	client: paho_mqtt::AsyncClient,
	client_id: String,
	subscriptions: Subscriptions,
}

impl InnerClient {
	fn new(client: paho_mqtt::AsyncClient, client_id: String) -> Self {
		InnerClient {
			client,
			client_id,
			subscriptions: Subscriptions::new(),
		}
	}

	#[instrument(
		level = "debug",
		name = "InnerClient::run",
		skip_all,
		fields(client.id = %self.client_id),
	)]
	async fn run(
		mut self,
		receiver: flume::Receiver<Command>,
		reconnects: flume::Receiver<()>,
		stream: impl Stream<Item = Option<paho_mqtt::Message>> + Unpin,
	) {
		let mut receiver = receiver.into_stream().fuse();
		let mut reconnects = reconnects.into_stream().fuse();
		let mut stream = stream.fuse();

		loop {
			tokio::select! {
				cmd = receiver.next() => match cmd {
					Some(cmd) => self.handle_command(cmd).await,
					// all client handles dropped
					None => break,
				},
				reconnect = reconnects.next() => match reconnect {
					Some(()) => self.resubscribe().await,
					// the callback lives in our own client, so the sender
					// only drops on teardown
					None => break,
				},
				msg = stream.next() => match msg {
					Some(Some(msg)) => self.handle_message(msg).await,
					Some(None) => warn!("lost connection to MQTT broker, awaiting reconnect"),
					None => break,
				},
			}
		}

		debug!("shutting down MQTT client");
		let mut builder = paho_mqtt::DisconnectOptionsBuilder::new();
		builder.timeout(Duration::from_secs(10));
		builder.publish_will_message();
		let _ = self.client.disconnect(builder.finalize()).await;
	}

	async fn handle_command(&mut self, cmd: Command) {
		match cmd {
			Command::Publish {
				topic,
				payload,
				retained,
				qos,
			} => {
				let message = paho_mqtt::MessageBuilder::new()
					.topic(&*topic)
					.payload(payload)
					.qos(qos as i32)
					.retained(retained)
					.finalize();

				if let Err(err) = self.client.publish(message).await {
					warn!(topic = %topic, error = %err, "failed to publish message");
				}
			}

			Command::Subscribe {
				topic,
				qos,
				sender,
				result,
			} => {
				let _ = result.send(self.subscribe(topic, qos, sender).await);
			}
		}
	}

	async fn subscribe(
		&mut self,
		topic: Arc<str>,
		qos: MqttQoS,
		sender: flume::Sender<Message>,
	) -> Result<(), ClientError> {
		if !self.subscriptions.contains(&topic) {
			self.client
				.subscribe(&*topic, qos as i32)
				.await
				.map_err(|source| ClientError::Subscribe {
					topic: topic.to_string(),
					source,
				})?;
		}

		debug!(topic = %topic, "subscribed");
		self.subscriptions.add(topic, qos, sender);
		Ok(())
	}

	/// The broker forgets non-persistent subscriptions across reconnects, so
	/// re-issue all of them.
	async fn resubscribe(&mut self) {
		for (topic, qos) in self.subscriptions.topics() {
			if let Err(err) = self.client.subscribe(&*topic, qos as i32).await {
				warn!(topic = %topic, error = %err, "failed to resubscribe after reconnect");
			}
		}
	}

	async fn handle_message(&mut self, msg: paho_mqtt::Message) {
		let topic: Arc<str> = msg.topic().into();
		let message = Message::new(topic.clone(), msg.payload().into(), msg.retained());

		if self.subscriptions.dispatch(&message) {
			// last receiver is gone
			if let Err(err) = self.client.unsubscribe(&*topic).await {
				warn!(topic = %topic, error = %err, "failed to unsubscribe");
			}
		}
	}
}

pub(super) fn spawn(
	options: MqttOptions,
	client_id: String,
	will: Option<paho_mqtt::Message>,
) -> Result<flume::Sender<Command>, ConnectError> {
	let (result_sender, result_receiver) = flume::bounded(1);

	thread::Builder::new()
		.name(format!("mqtt-{client_id}"))
		.spawn(move || {
			let (sender, receiver) = flume::unbounded();

			let rt = match tokio::runtime::Builder::new_current_thread()
				.enable_io()
				.enable_time()
				.build()
				.map_err(ConnectError::CreateRuntime)
			{
				Ok(rt) => rt,
				Err(e) => {
					let _ = result_sender.send(Err(e));
					return;
				}
			};

			// The connected callback must not hold a `Command` sender: the
			// callback is owned by the client, which is owned by the loop, so
			// a command sender stored there would keep the command channel
			// open forever and the loop could never observe its handles
			// dropping. Reconnect signals get their own channel instead.
			let (reconnect_sender, reconnect_receiver) = flume::unbounded();

			rt.block_on(async move {
				let (client, stream) =
					match connect(&options, &client_id, will, reconnect_sender).await {
						Ok(connected) => connected,
						Err(e) => {
							let _ = result_sender.send(Err(e));
							return;
						}
					};

				let inner = InnerClient::new(client, client_id);
				let _ = result_sender.send(Ok(sender));
				inner.run(receiver, reconnect_receiver, stream).await;
			});
		})
		.map_err(ConnectError::SpawnThread)?;

	match result_receiver.recv() {
		Ok(Ok(sender)) => Ok(sender),
		Ok(Err(e)) => Err(e),
		Err(_) => Err(ConnectError::Connect(paho_mqtt::Error::General(
			"MQTT client thread exited before reporting a result",
		))),
	}
}

async fn connect(
	options: &MqttOptions,
	client_id: &str,
	will: Option<paho_mqtt::Message>,
	reconnect_sender: flume::Sender<()>,
) -> Result<
	(
		paho_mqtt::AsyncClient,
		impl Stream<Item = Option<paho_mqtt::Message>> + Unpin,
	),
	ConnectError,
> {
	let mut client = paho_mqtt::AsyncClient::new(options.as_create_options(client_id)?)
		.map_err(ConnectError::CreateClient)?;

	// The stream has to exist before connecting, or retained messages
	// delivered right after CONNACK would be dropped.
	let stream = client.get_stream(64);

	client.set_connected_callback(move |_| {
		let _ = reconnect_sender.send(());
	});

	let connect_options = options.as_connect_options(will).await?;
	client
		.connect(connect_options)
		.await
		.map_err(ConnectError::Connect)?;

	Ok((client, stream))
}
