//! Command executor for dispatching CLI commands
//!
//! This module provides the main entry point for executing CLI commands
//! after parsing and configuration loading.

use anyhow::bail;

use super::parser::{Cli, Commands, CredentialArgs, Recipient, SendArgs};
use crate::config::settings::Settings;
use crate::error::PushResult;
use crate::services::{NotificationId, PushClient, UNRESOLVED_NOTIFICATION_ID};

/// Execute a CLI command with the given settings
///
/// # Errors
/// Returns the first API error, or a summary error when some recipients of a
/// multi-recipient send failed
pub async fn execute_command(cli: &Cli, settings: Settings) -> anyhow::Result<()> {
    let client = PushClient::from_settings(&settings)?;

    match &cli.command {
        Commands::Send(args) => send(&client, args).await,
        Commands::ResolveKey(creds) => resolve_key(&client, creds).await,
    }
}

async fn send(client: &PushClient, args: &SendArgs) -> anyhow::Result<()> {
    let notification = args.to_notification();
    let recipient = args.recipient().map_err(anyhow::Error::msg)?;

    tracing::info!(title = %notification.title(), "Sending notification");

    match recipient {
        Recipient::Credentials { email, password } => {
            let id = client
                .send_with_credentials(&notification, &email, &password)
                .await?;
            report_sent(id);
        }
        Recipient::ApiKeys(api_keys) => {
            let results = client.send_to_many(&notification, &api_keys).await;
            report_results(results)?;
        }
    }

    Ok(())
}

/// Reports every per-recipient result, failing if any recipient failed
fn report_results(results: Vec<PushResult<NotificationId>>) -> anyhow::Result<()> {
    let total = results.len();
    let mut failed = 0;

    for (index, result) in results.into_iter().enumerate() {
        match result {
            Ok(id) => report_sent(id),
            Err(e) => {
                failed += 1;
                let error = format!("{:#}", anyhow::Error::new(e));
                tracing::error!(recipient = index + 1, error = %error, "Sending failed");
            }
        }
    }

    if failed > 0 {
        bail!("{} of {} notifications failed", failed, total);
    }
    Ok(())
}

fn report_sent(id: NotificationId) {
    if id == UNRESOLVED_NOTIFICATION_ID {
        println!("Sent notification, no ID returned");
    } else {
        println!("Sent notification with ID: {}", id);
    }
}

async fn resolve_key(client: &PushClient, creds: &CredentialArgs) -> anyhow::Result<()> {
    let api_key = client.resolve_api_key(&creds.email, &creds.password).await?;
    println!("{}", api_key);
    Ok(())
}
