use std::path::Path;

use tracing::warn;

use crate::errors::VigilError;
use super::types::VigilConfig;

pub async fn parse_config(path: &Path) -> Result<VigilConfig, VigilError> {
    if !path.exists() {
        return Err(VigilError::Config(format!(
            "Config file not found: {}",
            path.display()
        )));
    }

    let metadata = tokio::fs::metadata(path).await?;
    if metadata.len() > 1_048_576 {
        return Err(VigilError::Config("Config file exceeds 1MB limit".into()));
    }

    let content = tokio::fs::read_to_string(path).await?;
    let config: VigilConfig = serde_yaml::from_str(&content)?;

    validate(&config)?;

    Ok(config)
}

/// Semantic checks. Account credential problems are per-account (warned
/// here, the account is skipped at startup); only structural problems that
/// make the whole config unusable are errors.
fn validate(config: &VigilConfig) -> Result<(), VigilError> {
    if config.accounts.is_empty() {
        warn!("No accounts configured; only the web surface will be useful");
    }

    for (i, account) in config.accounts.iter().enumerate() {
        if let Err(reason) = account.validate() {
            warn!(account = i, %reason, "Account config incomplete, it will be skipped");
        }
    }

    if let Some(alert) = &config.alert_chat {
        if alert.trim().is_empty() {
            return Err(VigilError::Config(
                "alert_chat is set but empty; omit it to disable alerts".into(),
            ));
        }
    }

    if config
        .accounts
        .iter()
        .all(|a| a.validate().is_err())
        && !config.accounts.is_empty()
    {
        return Err(VigilError::Config(
            "No account in the config has complete credentials".into(),
        ));
    }

    Ok(())
}
