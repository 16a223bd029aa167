//! Runs every gateway call once against the API selected by `CLICKATELL_API`
//! (`http` or `rest`) and prints the diagnostic summary after each call.

use std::io;
use std::time::Duration;

use clickatell::{ApiVariant, Credentials, GatewayClient, GatewayError};
use tracing_subscriber::EnvFilter;

fn required(name: &str) -> Result<String, io::Error> {
    std::env::var(name).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{name} environment variable is required"),
        )
    })
}

fn credentials(variant: ApiVariant) -> Result<Credentials, Box<dyn std::error::Error>> {
    let api_id = required("CLICKATELL_API_ID")?;
    let credentials = match variant {
        ApiVariant::LegacyQuery => Credentials::legacy(
            required("CLICKATELL_USER")?,
            required("CLICKATELL_PASSWORD")?,
            api_id,
        )?,
        ApiVariant::JsonRest => Credentials::rest(required("CLICKATELL_API_KEY")?, api_id)?,
    };
    Ok(credentials)
}

/// Pull the message id out of a send response.
///
/// HTTP API answers `ID: <id>`; REST API answers JSON with `"apiMessageId":"<id>"`.
fn message_id(variant: ApiVariant, response: &str) -> Option<String> {
    match variant {
        ApiVariant::LegacyQuery => response
            .trim()
            .strip_prefix("ID:")
            .map(|rest| rest.split_whitespace().next().unwrap_or_default().to_owned()),
        ApiVariant::JsonRest => {
            let (_, rest) = response.split_once("\"apiMessageId\":\"")?;
            rest.split_once('"').map(|(id, _)| id.to_owned())
        }
    }
}

fn report(client: &GatewayClient, title: &str, result: Result<String, GatewayError>) {
    println!("[{}: {title}]", client.api_variant());
    if let Err(err) = result {
        println!("call failed: {err}");
    }
    println!("{client}");
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();

    let variant: ApiVariant = std::env::var("CLICKATELL_API")
        .unwrap_or_else(|_| "rest".to_owned())
        .parse()?;
    let phone = required("CLICKATELL_PHONE")?;
    let text = std::env::var("CLICKATELL_MESSAGE")
        .unwrap_or_else(|_| "This is example SMS message text.".to_owned());

    let mut client = GatewayClient::builder(credentials(variant)?)
        .timeout(Duration::from_secs(5))
        .connect_timeout(Duration::from_secs(2))
        .build()?;

    let sent = client.send_message(&text, &[phone.as_str()]);
    let id = sent
        .as_deref()
        .ok()
        .and_then(|body| message_id(variant, body))
        .unwrap_or_default();
    report(&client, "Send SMS", sent);

    let result = client.get_balance();
    report(&client, "Get balance", result);

    let result = client.get_coverage(&phone);
    report(&client, "Get coverage", result);

    let result = client.get_status(&id);
    report(&client, "Get message status", result);

    let result = client.get_charge(&id);
    report(&client, "Get message charge", result);

    let result = client.stop_message(&id);
    report(&client, "Stop message", result);

    Ok(())
}
