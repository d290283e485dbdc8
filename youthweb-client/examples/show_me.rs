// youthweb-client/examples/show_me.rs
// Log in with user credentials and print the authenticated user

use anyhow::Context;
use tracing_subscriber::EnvFilter;
use youthweb_client::{Client, ClientConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 {
        println!("Usage: {} <username> <token_secret>", args[0]);
        println!("  Set YOUTHWEB_API_URL to target another host.");
        return Ok(());
    }

    let client = Client::builder()
        .config(ClientConfig::from_env())
        .credentials(&args[1], &args[2])
        .build();

    client
        .auth()
        .get_bearer_token()
        .await
        .context("Failed to get bearer token")?;

    let me = client.users().show_me().await.context("Failed to load /me")?;
    tracing::info!(
        id = me.get_str("data.id").unwrap_or("?"),
        username = me.get_str("data.attributes.username").unwrap_or("?"),
        "Logged in"
    );
    println!("{}", serde_json::to_string_pretty(me.as_value())?);

    Ok(())
}
