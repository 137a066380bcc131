use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_web_port")]
    pub web_port: u16,

    #[serde(default = "default_bind_address")]
    pub bind_address: String,
}

fn default_web_port() -> u16 {
    10902
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            web_port: default_web_port(),
            bind_address: default_bind_address(),
        }
    }
}
