//! `api` command: call a single cPanel API function

use crate::{
    CPanel, Settings,
    http::{Parameters, Response, ResponseData},
};
use anyhow::{Context, Result, bail};
use serde_json::Value;
use tracing::warn;

/// Arguments for the `api` command
#[derive(Debug, Clone)]
pub struct ApiArgs {
    pub module: String,
    pub function: String,
    /// `key=value` pairs
    pub parameters: Vec<String>,
}

/// Parse `key=value` arguments into request parameters
///
/// The value is everything after the first `=` and may be empty.
pub fn parse_parameters(arguments: &[String]) -> Result<Parameters> {
    let mut parameters = Parameters::new();
    for argument in arguments {
        let Some((key, value)) = argument.split_once('=') else {
            bail!("Invalid parameter '{}', expected key=value", argument);
        };
        if key.trim().is_empty() {
            bail!("Invalid parameter '{}', key must not be empty", argument);
        }
        parameters.insert(key.trim().to_string(), Value::String(value.to_string()));
    }
    Ok(parameters)
}

/// Printable form of a response: pretty JSON or the body text
pub fn render_response(response: &Response) -> Result<String> {
    match response.data() {
        ResponseData::Json(data) => {
            serde_json::to_string_pretty(data).context("Failed to serialize response")
        }
        ResponseData::Text(text) => Ok(text.to_string()),
        ResponseData::None => Ok(String::new()),
    }
}

/// Run the `api` command and return the text to print
pub async fn run_api(settings: &Settings, args: ApiArgs) -> Result<String> {
    let parameters = parse_parameters(&args.parameters)?;
    let mut cpanel = CPanel::from_settings(settings).context("Failed to set up cPanel client")?;

    let result = cpanel.api(&args.module, &args.function, parameters).await;
    if let Err(e) = cpanel.close().await {
        warn!("Failed to close cPanel client: {}", e);
    }

    let response = result?;
    let output = render_response(&response)?;
    if !response.is_valid() {
        bail!(
            "{}::{} returned an invalid {} response:\n{}",
            args.module,
            args.function,
            response.kind(),
            output
        );
    }

    Ok(output)
}
