mod events;

use std::sync::Arc;

use ferrosea_core::{ClientConfig, OpenSeaClient, ReqwestHttpClient};
use serde_json::Value;

use crate::cli::{Cli, Command};
use crate::error::CliError;

pub async fn run(cli: &Cli) -> Result<Value, CliError> {
    let client = OpenSeaClient::new(Arc::new(ReqwestHttpClient::new()), client_config(cli)?);

    let data = match &cli.command {
        Command::Events(args) => serde_json::to_value(events::run(args, client).await?)?,
    };

    Ok(data)
}

/// Environment configuration with command-line overrides applied.
fn client_config(cli: &Cli) -> Result<ClientConfig, CliError> {
    let mut config = ClientConfig::from_env()?;
    if let Some(base_url) = &cli.base_url {
        config = config.with_base_url(base_url.as_str())?;
    }
    if let Some(timeout_ms) = cli.timeout_ms {
        config = config.with_timeout_ms(timeout_ms)?;
    }
    Ok(config)
}
