use std::io;

use clickatell::GatewayClient;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let api_key = std::env::var("CLICKATELL_API_KEY").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "CLICKATELL_API_KEY environment variable is required",
        )
    })?;
    let api_id = std::env::var("CLICKATELL_API_ID").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "CLICKATELL_API_ID environment variable is required",
        )
    })?;
    let phone = std::env::var("CLICKATELL_PHONE").map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            "CLICKATELL_PHONE environment variable is required",
        )
    })?;
    let message = std::env::var("CLICKATELL_MESSAGE")
        .unwrap_or_else(|_| "Hello from the clickatell example.".to_owned());

    let mut client = GatewayClient::rest(api_key, api_id)?;
    let body = client.send_message(&message, &[phone])?;
    println!("{body}");

    Ok(())
}
