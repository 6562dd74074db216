//! CLI argument parsing with clap
//!
//! This module defines the command-line interface structure using clap,
//! including all commands, arguments, and their documentation.

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::models::{Notification, Sound, Urgency};

/// Send push notifications through the Push Notifications API
#[derive(Parser, Debug)]
#[command(name = "appnotify")]
#[command(about = "Send push notifications through the Push Notifications API")]
#[command(long_about = "
appnotify sends notifications to the Push Notifications iOS application
through its public HTTP API. Recipients are addressed by API key, or by the
email address and password they registered with.

EXAMPLES:
    # Send a notification to one API key
    appnotify send --api-key KEY --title 'Important Notice' --message 'Please wash the dishes!'

    # Send with an action, urgency and sound
    appnotify send --api-key KEY --title Notice --message Hi \\
        --action-label view --action-url http://example.com --urgency high --sound 3

    # Resolve the API key from a login, then send
    APPNOTIFY_PASSWORD=secret appnotify send --email jane@example.com --title Hi --message There

    # Print the API key of a user
    appnotify resolve-key --email jane@example.com --password secret
")]
#[command(version = crate::clap_long_version())]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    ///
    /// TOML file with `[api]`, `[cache]` and `[logger]` sections.
    /// The file must exist.
    ///
    /// Example: --config /etc/appnotify/appnotify.toml
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Send a notification
    ///
    /// Examples:
    ///   appnotify send --api-key KEY --title T --message M
    ///   appnotify send --api-key K1,K2 --title T --message M   # several recipients
    ///   appnotify send --email E --password P --title T --message M
    Send(SendArgs),

    /// Resolve and print the API key of a user
    ResolveKey(CredentialArgs),
}

/// Arguments of `send`
#[derive(Args, Debug)]
pub struct SendArgs {
    /// Notification title
    #[arg(long)]
    pub title: String,

    /// Message to display
    #[arg(long)]
    pub message: String,

    /// Action label shown on receipt ("slide to <label>")
    #[arg(long, value_name = "LABEL")]
    pub action_label: Option<String>,

    /// URL opened when the notification is viewed (http(s), tel://, ...)
    #[arg(long, value_name = "URL")]
    pub action_url: Option<String>,

    /// Notification urgency
    #[arg(long, value_enum)]
    pub urgency: Option<UrgencyArg>,

    /// Alert sound
    #[arg(long, value_enum)]
    pub sound: Option<SoundArg>,

    /// Deliver without sound or alert
    #[arg(long)]
    pub silent: bool,

    /// Recipient API key; repeat or separate with commas for several recipients
    #[arg(long = "api-key", value_name = "KEY", env = "APPNOTIFY_API_KEY", value_delimiter = ',', hide_env_values = true)]
    pub api_keys: Vec<String>,

    /// Recipient email address, used when no API key is given
    #[arg(long, env = "APPNOTIFY_EMAIL", requires = "password")]
    pub email: Option<String>,

    /// Recipient password, used with --email
    #[arg(long, env = "APPNOTIFY_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

/// Email and password of a registered user
#[derive(Args, Debug)]
pub struct CredentialArgs {
    /// Email address registered with Push Notifications
    #[arg(long, env = "APPNOTIFY_EMAIL")]
    pub email: String,

    /// Password of the account
    #[arg(long, env = "APPNOTIFY_PASSWORD", hide_env_values = true)]
    pub password: String,
}

/// Who a `send` goes to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recipient {
    ApiKeys(Vec<String>),
    Credentials { email: String, password: String },
}

/// Urgency options
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum UrgencyArg {
    Low,
    Moderate,
    Normal,
    High,
    Emergency,
}

/// Sound options
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SoundArg {
    #[value(name = "1", alias = "sound1")]
    Sound1,
    #[value(name = "2", alias = "sound2")]
    Sound2,
    #[value(name = "3", alias = "sound3")]
    Sound3,
    #[value(name = "4", alias = "sound4")]
    Sound4,
    #[value(name = "5", alias = "sound5")]
    Sound5,
}

impl Cli {
    /// Log level forced by `--verbose` or `--quiet`
    pub fn log_level_override(&self) -> Option<&'static str> {
        if self.verbose {
            Some("debug")
        } else if self.quiet {
            Some("error")
        } else {
            None
        }
    }
}

impl SendArgs {
    /// Builds the notification described by the arguments
    pub fn to_notification(&self) -> Notification {
        let mut notification = Notification::new(&self.title, &self.message);
        if let Some(label) = &self.action_label {
            notification.set_action_label(label);
        }
        if let Some(url) = &self.action_url {
            notification.set_action_url(url);
        }
        if let Some(urgency) = self.urgency {
            notification.set_urgency(urgency.into());
        }
        if let Some(sound) = self.sound {
            notification.set_sound(sound.into());
        }
        notification.set_silent(self.silent);
        notification
    }

    /// API keys win over credentials when both are given
    pub fn recipient(&self) -> Result<Recipient, String> {
        let api_keys: Vec<String> = self
            .api_keys
            .iter()
            .map(|key| key.trim())
            .filter(|key| !key.is_empty())
            .map(str::to_string)
            .collect();

        if !api_keys.is_empty() {
            return Ok(Recipient::ApiKeys(api_keys));
        }

        match (&self.email, &self.password) {
            (Some(email), Some(password)) => Ok(Recipient::Credentials {
                email: email.clone(),
                password: password.clone(),
            }),
            _ => Err("No recipient given: pass --api-key, or --email and --password".to_string()),
        }
    }
}

impl From<UrgencyArg> for Urgency {
    fn from(arg: UrgencyArg) -> Self {
        match arg {
            UrgencyArg::Low => Urgency::Low,
            UrgencyArg::Moderate => Urgency::Moderate,
            UrgencyArg::Normal => Urgency::Normal,
            UrgencyArg::High => Urgency::High,
            UrgencyArg::Emergency => Urgency::Emergency,
        }
    }
}

impl From<SoundArg> for Sound {
    fn from(arg: SoundArg) -> Self {
        match arg {
            SoundArg::Sound1 => Sound::Sound1,
            SoundArg::Sound2 => Sound::Sound2,
            SoundArg::Sound3 => Sound::Sound3,
            SoundArg::Sound4 => Sound::Sound4,
            SoundArg::Sound5 => Sound::Sound5,
        }
    }
}
