use serde_json::{json, Map, Value};
use crate::cli::OutputFormat;

/// Output a success message in the appropriate format
pub fn output_success(
    output_format: &OutputFormat,
    message: &str,
    data: Option<Value>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = Map::new();
            response.insert("success".into(), json!(true));
            response.insert("message".into(), json!(message));

            match data {
                Some(Value::Object(fields)) => response.extend(fields),
                Some(other) => {
                    response.insert("data".into(), other);
                }
                None => {}
            }

            println!("{}", serde_json::to_string_pretty(&Value::Object(response))?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Output an error message in the appropriate format
pub fn output_error(
    output_format: &OutputFormat,
    message: &str,
    status: Option<u16>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": false,
                "error": message
            });

            if let Some(code) = status {
                response["status"] = json!(code);
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            eprintln!("Error: {}", message);
        }
    }
    Ok(())
}
