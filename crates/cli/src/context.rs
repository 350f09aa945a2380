use crate::dev_server::DevServerConfig;
use crate::endpoints::ApiEndpoints;

/// Process-wide settings, built once in `main` and handed to every command.
///
/// Dev-server settings stay raw until `vx serve` asks for them, so a bad
/// `VX_DEV_PORT` cannot break unrelated commands.
#[derive(Debug, Clone)]
pub struct CliContext {
    pub version: &'static str,
    pub endpoints: ApiEndpoints,
    pub dev_host: Option<String>,
    pub dev_port: Option<String>,
}

impl CliContext {
    pub fn from_env() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION"),
            endpoints: ApiEndpoints::from_env(),
            dev_host: std::env::var("VX_DEV_HOST").ok(),
            dev_port: std::env::var("VX_DEV_PORT").ok(),
        }
    }

    pub fn dev_server_config(&self) -> anyhow::Result<DevServerConfig> {
        DevServerConfig::from_values(self.dev_host.as_deref(), self.dev_port.as_deref())
    }
}
