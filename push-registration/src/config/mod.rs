use hub_client::HubConfig;
use serde::{Deserialize, Serialize};

use crate::models::{PresentationOptions, TokenFormat};

/// Adapter configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub hub: HubConfig,
    pub adapter: AdapterConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdapterConfig {
    /// Trigger the authorization/registration flow during initialization
    pub auto_register: bool,
    /// OS presentation policy for foreground notifications
    pub presentation: PresentationOptions,
    /// Device-token rendering strategy
    pub token_format: TokenFormat,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            auto_register: true,
            presentation: PresentationOptions::NONE,
            token_format: TokenFormat::Hex,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        Ok(Config {
            hub: HubConfig::from_env()?,
            adapter: AdapterConfig {
                auto_register: std::env::var("PUSH_AUTO_REGISTER")
                    .unwrap_or_else(|_| "true".to_string())
                    .parse()?,
                presentation: PresentationOptions::NONE,
                token_format: match std::env::var("PUSH_TOKEN_FORMAT")
                    .unwrap_or_else(|_| "hex".to_string())
                    .as_str()
                {
                    "legacy-description" => TokenFormat::LegacyDescription,
                    _ => TokenFormat::Hex,
                },
            },
        })
    }
}
