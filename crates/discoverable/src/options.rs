use crate::{
	client::HassMqttClient,
	error::ConnectError,
	topics::TopicsConfig,
};
use dirs::{cache_dir, state_dir};
use ha_mqtt_discoverable_proto::MqttQoS;
use std::{
	path::{Path, PathBuf},
	time::Duration,
};
use tokio::net::lookup_host;

/// Where the paho client keeps its session state between runs.
#[derive(Clone, Debug)]
pub(crate) enum MqttPersistence {
	Default,
	Directory(PathBuf),
	File(PathBuf),
}

#[derive(Clone, Debug, Default)]
pub(crate) struct MqttAuthOptions {
	pub(crate) username: String,
	pub(crate) password: String,
}

/// Certificate paths for a TLS session. All of them are optional; an empty
/// set still negotiates TLS against the system trust store.
#[derive(Clone, Debug, Default)]
pub struct TlsOptions {
	pub(crate) ca_cert: Option<PathBuf>,
	pub(crate) client_cert: Option<PathBuf>,
	pub(crate) client_key: Option<PathBuf>,
}

impl TlsOptions {
	pub fn new() -> Self {
		TlsOptions::default()
	}

	pub fn ca_cert(mut self, path: impl Into<PathBuf>) -> Self {
		self.ca_cert = Some(path.into());
		self
	}

	pub fn client_cert(mut self, cert: impl Into<PathBuf>, key: impl Into<PathBuf>) -> Self {
		self.client_cert = Some(cert.into());
		self.client_key = Some(key.into());
		self
	}
}

/// Options for the connection to the MQTT broker.
#[derive(Clone)]
pub struct MqttOptions {
	pub(crate) host: String,
	pub(crate) port: u16,
	pub(crate) tls: Option<TlsOptions>,
	pub(crate) auth: Option<MqttAuthOptions>,
	pub(crate) client_name: Option<String>,
	pub(crate) persistence: MqttPersistence,
}

impl MqttOptions {
	pub fn new(host: impl Into<String>) -> Self {
		MqttOptions {
			host: host.into(),
			port: 1883,
			tls: None,
			auth: None,
			client_name: None,
			persistence: MqttPersistence::Default,
		}
	}

	pub fn new_tls(host: impl Into<String>) -> Self {
		MqttOptions {
			host: host.into(),
			port: 8883,
			tls: Some(TlsOptions::default()),
			auth: None,
			client_name: None,
			persistence: MqttPersistence::Default,
		}
	}

	pub fn port(mut self, port: u16) -> Self {
		self.port = port;
		self
	}

	pub fn tls(mut self, tls: TlsOptions) -> Self {
		self.tls = Some(tls);
		self
	}

	pub fn auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
		self.auth = Some(MqttAuthOptions {
			username: username.into(),
			password: password.into(),
		});
		self
	}

	/// The MQTT client id. Defaults to the object id of the entity that
	/// first opens the connection.
	pub fn client_name(mut self, client_name: impl Into<String>) -> Self {
		self.client_name = Some(client_name.into());
		self
	}

	pub fn persistence_dir(mut self, dir: impl Into<PathBuf>) -> Self {
		self.persistence = MqttPersistence::Directory(dir.into());
		self
	}

	pub fn persistence_file(mut self, file: impl Into<PathBuf>) -> Self {
		self.persistence = MqttPersistence::File(file.into());
		self
	}

	fn join_persistence_file(&self, dir: &Path, client_id: &str) -> PathBuf {
		dir.join(format!("{client_id}.mqtt"))
	}

	pub(crate) fn client_id(&self, fallback: &str) -> String {
		self.client_name.clone().unwrap_or_else(|| fallback.to_owned())
	}

	/// paho picks the transport from the URI scheme, so a TLS session has to
	/// be asked for here as well as through `ssl_options`.
	fn server_uri(&self, addr: impl std::fmt::Display) -> String {
		let scheme = if self.tls.is_some() { "ssl" } else { "tcp" };
		format!("{scheme}://{addr}")
	}

	pub(crate) fn as_create_options(
		&self,
		client_id: &str,
	) -> Result<paho_mqtt::CreateOptions, ConnectError> {
		let persistence_file = match &self.persistence {
			MqttPersistence::Default => state_dir()
				.or_else(cache_dir)
				.map(|dir| self.join_persistence_file(&dir, client_id))
				.ok_or(ConnectError::StateDir)?,
			MqttPersistence::File(f) => f.clone(),
			MqttPersistence::Directory(d) => self.join_persistence_file(d, client_id),
		};

		Ok(paho_mqtt::CreateOptionsBuilder::new()
			.client_id(client_id)
			.server_uri(self.server_uri(format_args!("{}:{}", self.host, self.port)))
			.send_while_disconnected(true)
			.persistence(persistence_file)
			.finalize())
	}

	pub(crate) async fn as_connect_options(
		&self,
		will: Option<paho_mqtt::Message>,
	) -> Result<paho_mqtt::ConnectOptions, ConnectError> {
		let mut builder = paho_mqtt::ConnectOptionsBuilder::new();

		let hosts = lookup_host((&*self.host, self.port))
			.await
			.map_err(|source| ConnectError::ResolveHost {
				host: self.host.clone(),
				port: self.port,
				source,
			})?
			.map(|addr| self.server_uri(addr))
			.collect::<Vec<_>>();

		builder
			.server_uris(&hosts)
			.automatic_reconnect(Duration::from_secs(5), Duration::from_secs(60 * 5));

		if let Some(will) = will {
			builder.will_message(will);
		}

		if let Some(tls) = &self.tls {
			builder.ssl_options(tls.as_ssl_options()?);
		}

		if let Some(auth) = &self.auth {
			builder.user_name(auth.username.clone());
			builder.password(auth.password.clone());
		}

		Ok(builder.finalize())
	}
}

impl TlsOptions {
	fn as_ssl_options(&self) -> Result<paho_mqtt::SslOptions, ConnectError> {
		let mut builder = paho_mqtt::SslOptionsBuilder::new();

		if let Some(ca_cert) = &self.ca_cert {
			builder.trust_store(ca_cert).map_err(ConnectError::Tls)?;
		}

		if let Some(client_cert) = &self.client_cert {
			builder.key_store(client_cert).map_err(ConnectError::Tls)?;
		}

		if let Some(client_key) = &self.client_key {
			builder.private_key(client_key).map_err(ConnectError::Tls)?;
		}

		Ok(builder.finalize())
	}
}

/// How an entity reaches the broker: open a fresh connection, or piggyback on
/// the session of an already connected entity.
#[derive(Clone)]
pub enum Connection {
	Options(MqttOptions),
	Client(HassMqttClient),
}

impl From<MqttOptions> for Connection {
	fn from(options: MqttOptions) -> Self {
		Connection::Options(options)
	}
}

impl From<HassMqttClient> for Connection {
	fn from(client: HassMqttClient) -> Self {
		Connection::Client(client)
	}
}

impl From<&HassMqttClient> for Connection {
	fn from(client: &HassMqttClient) -> Self {
		Connection::Client(client.clone())
	}
}

/// Everything needed to bring one entity online.
#[derive(Clone)]
pub struct Settings<T> {
	pub(crate) connection: Connection,
	pub(crate) entity: T,
	pub(crate) discovery_prefix: String,
	pub(crate) manual_availability: bool,
	pub(crate) defer_config: bool,
	pub(crate) qos: MqttQoS,
}

impl<T> Settings<T> {
	pub fn new(connection: impl Into<Connection>, entity: T) -> Self {
		Settings {
			connection: connection.into(),
			entity,
			discovery_prefix: TopicsConfig::DEFAULT_DISCOVERY_PREFIX.into(),
			manual_availability: false,
			defer_config: false,
			qos: MqttQoS::AtLeastOnce,
		}
	}

	pub fn discovery_prefix(mut self, discovery_prefix: impl Into<String>) -> Self {
		self.discovery_prefix = discovery_prefix.into();
		self
	}

	/// Track availability by hand. The entity gets an availability topic, the
	/// connection registers a retained `offline` will on it, and
	/// [`set_availability`](crate::Discoverable::set_availability) becomes
	/// usable.
	pub fn manual_availability(mut self, manual_availability: bool) -> Self {
		self.manual_availability = manual_availability;
		self
	}

	/// Don't announce the entity on construction; the first state update (or
	/// an explicit [`write_config`](crate::Discoverable::write_config)) will.
	pub fn defer_config(mut self, defer_config: bool) -> Self {
		self.defer_config = defer_config;
		self
	}

	pub fn qos(mut self, qos: MqttQoS) -> Self {
		self.qos = qos;
		self
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn plain_connections_use_tcp_uris() {
		let options = MqttOptions::new("broker.local");

		assert_eq!(options.server_uri("10.0.0.1:1883"), "tcp://10.0.0.1:1883");
	}

	#[test]
	fn tls_connections_use_ssl_uris() {
		let options = MqttOptions::new_tls("broker.local");
		assert_eq!(options.server_uri("10.0.0.1:8883"), "ssl://10.0.0.1:8883");

		let options = MqttOptions::new("broker.local").tls(TlsOptions::new());
		assert_eq!(options.server_uri("10.0.0.1:1883"), "ssl://10.0.0.1:1883");
	}
}
