use serde_json::json;

use crate::auth::hash_password_scrypt;
use crate::cli::utils::output_success;
use crate::cli::OutputFormat;

pub fn handle(password: &str, output_format: OutputFormat) -> anyhow::Result<()> {
    if password.is_empty() {
        anyhow::bail!("Password must not be empty");
    }

    let hash = hash_password_scrypt(password);
    match output_format {
        OutputFormat::Text => {
            println!("{hash}");
            Ok(())
        }
        OutputFormat::Json => output_success(output_format, "Password hashed", Some(json!({ "hash": hash }))),
    }
}
