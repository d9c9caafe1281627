use ha_mqtt_discoverable::{
	proto::{Device, EntityInfo, SwitchInfo},
	MqttOptions, Settings, Switch,
};
use std::{error::Error, sync::Arc};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn Error>> {
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::from_default_env())
		.init();

	let device = Arc::new(Device::new("Demo Relay Board", "demo-relay-1"));
	let info = SwitchInfo::new(
		EntityInfo::new("Demo Switch")
			.unique_id("demo_relay_1_switch")
			.device(device),
	);

	let settings = Settings::new(MqttOptions::new("localhost"), info).manual_availability(true);
	let switch = Switch::new(settings)?;
	switch.set_availability(true)?;

	info!("switch announced, waiting for commands");

	let mut on = false;
	for command in switch.commands().iter() {
		let payload = command.payload_str();
		info!(%payload, "received command");

		on = payload == switch.document().payload_on();
		switch.update_state(on)?;
	}

	switch.set_availability(false)?;
	Ok(())
}
