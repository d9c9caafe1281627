use crate::{client::Message, entity::Discoverable, error::StateError};
use ha_mqtt_discoverable_proto::LightInfo;
use serde::Serialize;

/// A JSON-schema light.
pub type Light = Discoverable<LightInfo>;

/// The JSON state envelope published to the light's state topic.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LightState {
	pub state: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub brightness: Option<u8>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub color_mode: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub color: Option<serde_json::Value>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub effect: Option<String>,
}

impl Discoverable<LightInfo> {
	pub fn on(&self) -> Result<(), StateError> {
		self.update_state(true)
	}

	pub fn off(&self) -> Result<(), StateError> {
		self.update_state(false)
	}

	pub fn update_state(&self, state: bool) -> Result<(), StateError> {
		let state = if state {
			self.document().payload_on()
		} else {
			self.document().payload_off()
		};

		self.publish(LightState {
			state: state.to_owned(),
			..LightState::default()
		})
	}

	/// Report a brightness level. Implies the on state.
	pub fn brightness(&self, brightness: u8) -> Result<(), StateError> {
		if self.document().brightness != Some(true) {
			return Err(StateError::UnsupportedFeature("brightness"));
		}

		self.publish(LightState {
			state: self.document().payload_on().to_owned(),
			brightness: Some(brightness),
			..LightState::default()
		})
	}

	/// Report a color in one of the declared color modes. Implies the on
	/// state. The shape of `color` depends on the mode, e.g.
	/// `{"r": 255, "g": 0, "b": 0}` for `rgb`.
	pub fn color(&self, color_mode: &str, color: serde_json::Value) -> Result<(), StateError> {
		if !self.document().supports_color() {
			return Err(StateError::UnsupportedFeature("color modes"));
		}

		if !self
			.document()
			.supported_color_modes
			.iter()
			.any(|mode| mode == color_mode)
		{
			return Err(StateError::InvalidOption(color_mode.to_owned()));
		}

		self.publish(LightState {
			state: self.document().payload_on().to_owned(),
			color_mode: Some(color_mode.to_owned()),
			color: Some(color),
			..LightState::default()
		})
	}

	/// Report a running effect. Implies the on state.
	pub fn effect(&self, effect: &str) -> Result<(), StateError> {
		if !self.document().supports_effects() {
			return Err(StateError::UnsupportedFeature("effects"));
		}

		if !self.document().effect_list.iter().any(|e| e == effect) {
			return Err(StateError::InvalidOption(effect.to_owned()));
		}

		self.publish(LightState {
			state: self.document().payload_on().to_owned(),
			effect: Some(effect.to_owned()),
			..LightState::default()
		})
	}

	fn publish(&self, state: LightState) -> Result<(), StateError> {
		self.publish_json_state(&state, self.document().retain.unwrap_or(false))
	}

	/// Commands arriving on the command topic, as JSON envelopes of the same
	/// shape as [`LightState`].
	pub fn commands(&self) -> flume::Receiver<Message> {
		self.command_receiver()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::entity::recv_publish;
	use assert_matches::assert_matches;
	use ha_mqtt_discoverable_proto::EntityInfo;

	fn plain_light() -> LightInfo {
		LightInfo::new(EntityInfo::new("Desk Lamp").unique_id("desk_lamp"))
	}

	#[test]
	fn brightness_requires_the_brightness_flag() {
		let (light, published, _commands) = Discoverable::detached(plain_light());

		assert_matches!(
			light.brightness(128),
			Err(StateError::UnsupportedFeature("brightness"))
		);
		assert!(published.try_recv().is_err());
	}

	#[test]
	fn brightness_implies_the_on_state() {
		let mut info = plain_light();
		info.brightness = Some(true);
		let (light, published, _commands) = Discoverable::detached(info);

		light.brightness(128).unwrap();

		let (_, payload, _) = recv_publish(&published);
		let json: serde_json::Value = serde_json::from_slice(&payload).unwrap();
		assert_eq!(json["state"], "ON");
		assert_eq!(json["brightness"], 128);
	}

	#[test]
	fn effects_must_be_declared_in_the_effect_list() {
		let mut info = plain_light();
		info.effect = Some(true);
		info.effect_list = vec!["rainbow".into()];
		let (light, published, _commands) = Discoverable::detached(info);

		assert_matches!(
			light.effect("strobe"),
			Err(StateError::InvalidOption(effect)) if effect == "strobe"
		);
		assert!(published.try_recv().is_err());

		light.effect("rainbow").unwrap();
		let (_, payload, _) = recv_publish(&published);
		let json: serde_json::Value = serde_json::from_slice(&payload).unwrap();
		assert_eq!(json["effect"], "rainbow");
	}
}
