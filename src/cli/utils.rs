use serde_json::{json, Value};

use crate::cli::OutputFormat;
use crate::config::AppConfig;
use crate::database::Database;

/// Output a success message in the appropriate format
pub fn output_success(output_format: OutputFormat, message: &str, data: Option<Value>) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": true,
                "message": message
            });

            if let (Some(Value::Object(extra)), Value::Object(body)) = (data, &mut response) {
                body.extend(extra);
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Load configuration and open the pool for a one-shot command.
pub async fn connect() -> anyhow::Result<(AppConfig, Database)> {
    let config = AppConfig::from_env()?;
    let db = Database::connect(&config.database).await?;
    Ok((config, db))
}
