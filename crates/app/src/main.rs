use client::{Client, Session};
use engine::Formatter;

mod error;
mod settings;
mod shell;

use crate::error::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let settings = settings::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "moneytrace={level},client={level},engine={level}",
            level = settings.level
        ))
        .with_writer(std::io::stderr)
        .init();

    let formatter = Formatter::new(settings.locale, settings.timezone()?);
    let client = Client::new(&settings.base_url, settings.timeout())?;
    tracing::info!(base_url = %client.base_url(), "starting session");

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut shell = shell::Shell::new(Session::with_locale(client, settings.locale), formatter);
    shell.run(stdin, std::io::stdout()).await?;

    tracing::info!("session closed");
    Ok(())
}
