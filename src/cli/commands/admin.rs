use clap::Args;
use serde_json::Value;

use crate::cli::{
    utils::{output_error, output_success},
    OutputFormat,
};

#[derive(Args)]
pub struct SetupAdminArgs {
    #[arg(long, default_value = "http://localhost:3000", help = "Base URL of the API server")]
    pub url: String,
}

pub async fn handle(args: SetupAdminArgs, output_format: OutputFormat) -> anyhow::Result<()> {
    let endpoint = format!("{}/api/admin/setup", args.url.trim_end_matches('/'));
    tracing::debug!("POST {}", endpoint);

    let response = reqwest::Client::new().post(&endpoint).send().await?;
    let status = response.status();
    let body: Value = response.json().await.unwrap_or(Value::Null);

    if status.is_success() {
        return output_success(&output_format, "Admin user created", Some(body));
    }

    let message = body
        .get("error")
        .and_then(Value::as_str)
        .unwrap_or("admin setup failed")
        .to_string();
    output_error(&output_format, &message, Some(status.as_u16()))?;
    anyhow::bail!("{} ({})", message, status)
}
