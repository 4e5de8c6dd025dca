use anyhow::Context;
use clap::Args;
use serde_json::json;

use crate::auth::{SessionKeys, UserType};
use crate::cli::{utils::output_success, OutputFormat};
use crate::config::AppConfig;

#[derive(Args)]
pub struct TokenArgs {
    #[arg(long, help = "Email carried as the token subject")]
    pub email: String,

    #[arg(long, help = "admin, serviceProvider or customer")]
    pub role: String,

    #[arg(long, default_value_t = 1, help = "Row id of the identity")]
    pub id: i32,

    #[arg(long, help = "Display name (defaults to the email)")]
    pub name: Option<String>,
}

pub fn handle(args: TokenArgs, output_format: OutputFormat) -> anyhow::Result<()> {
    let user_type: UserType = args.role.parse()?;
    let config = AppConfig::from_env();
    let keys = SessionKeys::new(&config.security).context("JWT_SECRET is not usable")?;

    let name = args.name.unwrap_or_else(|| args.email.clone());
    let claims = keys.claims(args.id, &args.email, &name, user_type);
    let token = keys.generate_jwt(&claims)?;

    match output_format {
        OutputFormat::Json => output_success(
            &output_format,
            "Token issued",
            Some(json!({
                "token": token,
                "userType": user_type,
                "expiresInHours": keys.expiry_hours(),
            })),
        ),
        OutputFormat::Text => {
            println!("{}", token);
            Ok(())
        }
    }
}
