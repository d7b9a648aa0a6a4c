use crate::config::Config;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Node information served to clients at `/api/config`
#[derive(ToSchema, Deserialize, Serialize, Debug, PartialEq, Eq)]
pub struct NodeInfo {
    pub app_name: String,
    pub deployment: String,
    pub version: String,
    pub plate_default_height: i32,
    pub plate_default_length: i32,
}

impl From<&Config> for NodeInfo {
    fn from(config: &Config) -> Self {
        Self {
            app_name: config.app_name.clone(),
            deployment: config.deployment.clone(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            plate_default_height: config.plate_default_height,
            plate_default_length: config.plate_default_length,
        }
    }
}

#[derive(ToSchema, Deserialize, Serialize)]
pub struct HealthCheck {
    pub status: String,
}
