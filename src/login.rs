use anyhow::Result;

use crate::config::Config;

pub async fn login(api_url: Option<String>) -> Result<()> {
    let url = api_url.unwrap_or_else(|| "https://api.rolegate.sh".to_string());

    println!("Login to Rolegate");
    println!("API URL: {}", url);
    println!();
    println!("Please provide your API key:");

    let api_key = dialoguer::Input::<String>::new()
        .with_prompt("API Key")
        .interact_text()?;

    let mut config = Config::load()?;
    config.api_url = url.clone();
    config.api_key = Some(api_key);
    config.save()?;

    let logger = crate::audit::AuditLogger::new()?;
    logger.log(crate::audit::AuditAction::Login, None, None, true, None)?;

    println!("✓ Successfully logged in");
    println!("  API URL: {}", url);

    Ok(())
}
