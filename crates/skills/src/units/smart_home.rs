use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use valet_core::{Config, Error, Result};

use crate::{Skill, SkillContext, SkillResult};

/// Desired device state parsed from the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DeviceAction {
    On,
    Off,
    Toggle,
}

impl DeviceAction {
    fn parse(text: &str) -> Self {
        if text.contains("turn on") || text.contains("switch on") || text.contains("lights on") {
            DeviceAction::On
        } else if text.contains("turn off")
            || text.contains("switch off")
            || text.contains("lights off")
        {
            DeviceAction::Off
        } else {
            DeviceAction::Toggle
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct Device {
    id: String,
    name: String,
    #[serde(default)]
    on: bool,
}

/// Controls lights and plugs through an HTTP smart-home bridge.
///
/// The bridge exposes `GET /devices` returning `[{id, name, on}]` and
/// `POST /devices/{id}/state` accepting `{"on": bool}`. Device discovery on
/// the local network is the bridge's job, not ours.
pub struct SmartHomeSkill {
    bridge_url: Option<String>,
    api_token: Option<String>,
    client: reqwest::Client,
}

impl SmartHomeSkill {
    pub fn new(config: &Config) -> Self {
        Self {
            bridge_url: config.smart_home.bridge_url.clone(),
            api_token: config.smart_home.api_token.clone(),
            client: reqwest::Client::new(),
        }
    }

    fn authorize(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    async fn list_devices(&self, base: &str) -> Result<Vec<Device>> {
        let url = format!("{}/devices", base.trim_end_matches('/'));
        let resp = self
            .authorize(self.client.get(&url))
            .send()
            .await
            .map_err(|e| Error::Skill(format!("Bridge unreachable: {}", e)))?
            .error_for_status()
            .map_err(|e| Error::Skill(format!("Bridge error: {}", e)))?;

        resp.json::<Vec<Device>>()
            .await
            .map_err(|e| Error::Skill(format!("Bad bridge response: {}", e)))
    }

    async fn set_state(&self, base: &str, device_id: &str, on: bool) -> Result<()> {
        let url = format!("{}/devices/{}/state", base.trim_end_matches('/'), device_id);
        self.authorize(self.client.post(&url))
            .json(&serde_json::json!({ "on": on }))
            .send()
            .await
            .map_err(|e| Error::Skill(format!("Bridge unreachable: {}", e)))?
            .error_for_status()
            .map_err(|e| Error::Skill(format!("Bridge error: {}", e)))?;
        Ok(())
    }

    /// Pick the device whose name appears in the request, else the first.
    fn pick_target<'a>(devices: &'a [Device], input: &str) -> Option<&'a Device> {
        devices
            .iter()
            .find(|d| input.contains(&d.name.to_lowercase()))
            .or_else(|| devices.first())
    }
}

#[async_trait]
impl Skill for SmartHomeSkill {
    fn id(&self) -> &str {
        "smart_home"
    }

    fn display_name(&self) -> &str {
        "Smart Home"
    }

    fn description(&self) -> &str {
        "Controls lights and plugs through the configured smart-home bridge"
    }

    fn triggers(&self) -> Vec<String> {
        vec![
            "turn on".to_string(),
            "turn off".to_string(),
            "switch on".to_string(),
            "switch off".to_string(),
            "lights on".to_string(),
            "lights off".to_string(),
            "toggle the".to_string(),
            "dim the".to_string(),
        ]
    }

    async fn validate(&self, _ctx: &SkillContext) -> Result<()> {
        if self.bridge_url.is_none() {
            return Err(Error::Validation(
                "Smart-home bridge URL is not configured".to_string(),
            ));
        }
        Ok(())
    }

    async fn execute(&self, ctx: &SkillContext) -> Result<SkillResult> {
        let Some(base) = self.bridge_url.as_deref() else {
            return Ok(SkillResult::fail("Smart-home bridge URL is not configured"));
        };

        ctx.status("Looking for devices...");
        let devices = self.list_devices(base).await?;
        if devices.is_empty() {
            return Ok(SkillResult::fail("No devices found on the bridge"));
        }

        let input = ctx.user_input.to_lowercase();
        let action = DeviceAction::parse(&input);
        let Some(target) = Self::pick_target(&devices, &input) else {
            return Ok(SkillResult::fail("No target device found"));
        };

        let desired = match action {
            DeviceAction::On => true,
            DeviceAction::Off => false,
            DeviceAction::Toggle => !target.on,
        };

        debug!(device = %target.name, desired, "Setting device state");
        ctx.status(&format!(
            "{} {}...",
            if desired { "Turning on" } else { "Turning off" },
            target.name
        ));
        self.set_state(base, &target.id, desired).await?;

        let message = format!(
            "{} {}",
            if desired { "Turned on" } else { "Turned off" },
            target.name
        );
        Ok(SkillResult::ok(message).with_data(serde_json::json!({
            "device": target.name,
            "is_on": desired,
        })))
    }
}
