//! Push notification model.
//!
//! A `Notification` only holds what will be displayed on the device. It keeps
//! no per-send state, so the same instance can be sent any number of times and
//! to any number of recipients.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::external::FormParams;

pub const PARAM_MESSAGE: &str = "notification[message]";
pub const PARAM_TITLE: &str = "notification[title]";
pub const PARAM_RUN_COMMAND: &str = "notification[run_command]";
pub const PARAM_ACTION_LOC_KEY: &str = "notification[action_loc_key]";
pub const PARAM_MESSAGE_LEVEL: &str = "notification[message_level]";
pub const PARAM_SOUND: &str = "notification[sound]";
pub const PARAM_SILENT: &str = "notification[silent]";
pub const PARAM_USER_CREDENTIALS: &str = "user_credentials";

// ============================================================================
// Enums
// ============================================================================

/// Notification priority, sent as a small signed integer code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Urgency {
    Low,
    Moderate,
    #[default]
    Normal,
    High,
    Emergency,
}

impl Urgency {
    pub const ALL: [Urgency; 5] = [
        Urgency::Low,
        Urgency::Moderate,
        Urgency::Normal,
        Urgency::High,
        Urgency::Emergency,
    ];

    /// Value of the `notification[message_level]` parameter
    pub fn wire_value(&self) -> &'static str {
        match self {
            Urgency::Low => "-2",
            Urgency::Moderate => "-1",
            Urgency::Normal => "0",
            Urgency::High => "1",
            Urgency::Emergency => "2",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Urgency::Low => "low",
            Urgency::Moderate => "moderate",
            Urgency::Normal => "normal",
            Urgency::High => "high",
            Urgency::Emergency => "emergency",
        }
    }
}

impl fmt::Display for Urgency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Urgency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Urgency::Low),
            "moderate" => Ok(Urgency::Moderate),
            "normal" => Ok(Urgency::Normal),
            "high" => Ok(Urgency::High),
            "emergency" => Ok(Urgency::Emergency),
            _ => Err(format!(
                "Invalid urgency '{}'. Valid values are: low, moderate, normal, high, emergency",
                s
            )),
        }
    }
}

/// Alert sound played on the device, sent as a sound file name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sound {
    Sound1,
    Sound2,
    Sound3,
    Sound4,
    Sound5,
}

impl Sound {
    pub const ALL: [Sound; 5] = [
        Sound::Sound1,
        Sound::Sound2,
        Sound::Sound3,
        Sound::Sound4,
        Sound::Sound5,
    ];

    /// Value of the `notification[sound]` parameter
    pub fn filename(&self) -> &'static str {
        match self {
            Sound::Sound1 => "1.caf",
            Sound::Sound2 => "2.caf",
            Sound::Sound3 => "3.caf",
            Sound::Sound4 => "4.caf",
            Sound::Sound5 => "5.caf",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Sound::Sound1 => "sound1",
            Sound::Sound2 => "sound2",
            Sound::Sound3 => "sound3",
            Sound::Sound4 => "sound4",
            Sound::Sound5 => "sound5",
        }
    }
}

impl fmt::Display for Sound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Sound {
    type Err = String;

    /// Accepts `sound3`, `3` and `3.caf`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.to_lowercase();
        let number = lowered
            .strip_prefix("sound")
            .or_else(|| lowered.strip_suffix(".caf"))
            .unwrap_or(&lowered);

        match number {
            "1" => Ok(Sound::Sound1),
            "2" => Ok(Sound::Sound2),
            "3" => Ok(Sound::Sound3),
            "4" => Ok(Sound::Sound4),
            "5" => Ok(Sound::Sound5),
            _ => Err(format!(
                "Invalid sound '{}'. Valid values are: sound1 to sound5",
                s
            )),
        }
    }
}

// ============================================================================
// Notification
// ============================================================================

/// A push notification for the Push Notifications iOS application
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    title: String,
    message: String,
    #[serde(default)]
    action_label: Option<String>,
    #[serde(default)]
    action_url: Option<String>,
    #[serde(default)]
    urgency: Option<Urgency>,
    #[serde(default)]
    sound: Option<Sound>,
    #[serde(default)]
    silent: bool,
}

impl Notification {
    /// Creates a notification with a title and the message to display
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            action_label: None,
            action_url: None,
            urgency: None,
            sound: None,
            silent: false,
        }
    }

    /// Creates a notification that also carries an action label ("slide to ...")
    pub fn with_action_label(
        title: impl Into<String>,
        message: impl Into<String>,
        action_label: impl Into<String>,
    ) -> Self {
        let mut notification = Self::new(title, message);
        notification.set_action_label(action_label);
        notification
    }

    /// URL opened when the user views the notification.
    ///
    /// Regular http(s) URLs work, as do device URLs such as `tel://` numbers.
    pub fn set_action_url(&mut self, action_url: impl Into<String>) -> &mut Self {
        self.action_url = Some(action_url.into());
        self
    }

    /// Button label shown on receipt; a locked device shows "slide to <label>".
    pub fn set_action_label(&mut self, action_label: impl Into<String>) -> &mut Self {
        self.action_label = Some(action_label.into());
        self
    }

    pub fn set_urgency(&mut self, urgency: Urgency) -> &mut Self {
        self.urgency = Some(urgency);
        self
    }

    pub fn set_sound(&mut self, sound: Sound) -> &mut Self {
        self.sound = Some(sound);
        self
    }

    pub fn set_silent(&mut self, silent: bool) -> &mut Self {
        self.silent = silent;
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn action_label(&self) -> Option<&str> {
        self.action_label.as_deref()
    }

    pub fn action_url(&self) -> Option<&str> {
        self.action_url.as_deref()
    }

    pub fn urgency(&self) -> Option<Urgency> {
        self.urgency
    }

    pub fn sound(&self) -> Option<Sound> {
        self.sound
    }

    pub fn is_silent(&self) -> bool {
        self.silent
    }

    /// Builds the form parameters posted to the notifications endpoint.
    ///
    /// Unset or empty optional fields are left out entirely.
    pub fn form_params(&self, api_key: &str) -> FormParams {
        let mut params = FormParams::new();
        params.insert(PARAM_MESSAGE.to_string(), self.message.clone());
        params.insert(PARAM_TITLE.to_string(), self.title.clone());

        if let Some(url) = non_empty(&self.action_url) {
            params.insert(PARAM_RUN_COMMAND.to_string(), url.to_string());
        }
        if let Some(label) = non_empty(&self.action_label) {
            params.insert(PARAM_ACTION_LOC_KEY.to_string(), label.to_string());
        }
        if let Some(urgency) = self.urgency {
            params.insert(
                PARAM_MESSAGE_LEVEL.to_string(),
                urgency.wire_value().to_string(),
            );
        }
        if let Some(sound) = self.sound {
            params.insert(PARAM_SOUND.to_string(), sound.filename().to_string());
        }

        let silent = if self.silent { "1" } else { "0" };
        params.insert(PARAM_SILENT.to_string(), silent.to_string());
        params.insert(PARAM_USER_CREDENTIALS.to_string(), api_key.to_string());

        params
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
