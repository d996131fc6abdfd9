use crate::client::HubError;

/// Hub Configuration
#[derive(Debug, Clone)]
pub struct HubConfig {
    pub connection_string: String,
    pub hub_path: String,
}

impl HubConfig {
    /// Create new hub configuration
    pub fn new(connection_string: impl Into<String>, hub_path: impl Into<String>) -> Self {
        Self {
            connection_string: connection_string.into(),
            hub_path: hub_path.into(),
        }
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, HubError> {
        let connection_string = std::env::var("HUB_CONNECTION_STRING")
            .map_err(|_| HubError::Config("HUB_CONNECTION_STRING is not set".to_string()))?;
        let hub_path = std::env::var("HUB_PATH")
            .map_err(|_| HubError::Config("HUB_PATH is not set".to_string()))?;

        Ok(Self {
            connection_string,
            hub_path,
        })
    }

    /// Parse the listen connection string into its components
    pub fn parse(&self) -> Result<ConnectionString, HubError> {
        ConnectionString::parse(&self.connection_string)
    }
}

/// Parsed Azure-style connection string
///
/// Format: `Endpoint=sb://<ns>.servicebus.windows.net/;SharedAccessKeyName=<name>;SharedAccessKey=<key>`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionString {
    pub endpoint: String,
    pub key_name: String,
    pub key: String,
}

impl ConnectionString {
    pub fn parse(raw: &str) -> Result<Self, HubError> {
        let mut endpoint = None;
        let mut key_name = None;
        let mut key = None;

        for part in raw.split(';').filter(|p| !p.trim().is_empty()) {
            let Some((field, value)) = part.split_once('=') else {
                return Err(HubError::Config(format!(
                    "malformed connection string segment: {part}"
                )));
            };

            match field.trim() {
                "Endpoint" => endpoint = Some(value.trim().to_string()),
                "SharedAccessKeyName" => key_name = Some(value.trim().to_string()),
                "SharedAccessKey" => key = Some(value.to_string()),
                // Unknown fields are carried by some portals; ignore them.
                _ => {}
            }
        }

        let endpoint =
            endpoint.ok_or_else(|| HubError::Config("missing Endpoint".to_string()))?;
        let key_name =
            key_name.ok_or_else(|| HubError::Config("missing SharedAccessKeyName".to_string()))?;
        let key = key.ok_or_else(|| HubError::Config("missing SharedAccessKey".to_string()))?;

        if !endpoint.starts_with("sb://") && !endpoint.starts_with("https://") {
            return Err(HubError::Config(format!(
                "unsupported endpoint scheme: {endpoint}"
            )));
        }

        Ok(Self {
            endpoint,
            key_name,
            key,
        })
    }
}
