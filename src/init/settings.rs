use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::{
    env,
    net::{AddrParseError, IpAddr, SocketAddr},
};
use tracing::info;

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub address: String,
    pub port: u16,
    pub public_dir: String,
    pub log_filter: String,
}

impl Settings {
    /// Load settings from defaults, the config file, the environment and the command line,
    /// later sources taking precedence.
    ///
    /// The `PORT` environment variable overrides `TIMESTAMP_PORT` and the config file,
    /// and is itself overridden by `port`.
    pub fn new(
        config_file: Option<String>,
        address: Option<String>,
        port: Option<u16>,
        public_dir: Option<String>,
        log_filter: Option<String>,
    ) -> Result<Self, ConfigError> {
        Self::build(
            env::var("PORT").ok(),
            config_file,
            address,
            port,
            public_dir,
            log_filter,
        )
    }

    fn build(
        port_env: Option<String>,
        config_file: Option<String>,
        address: Option<String>,
        port: Option<u16>,
        public_dir: Option<String>,
        log_filter: Option<String>,
    ) -> Result<Self, ConfigError> {
        let config_file = config_file.unwrap_or_else(|| String::from("timestamp"));

        let builder = Config::builder()
            .set_default("address", "0.0.0.0")?
            .set_default("port", 3000)?
            .set_default("public_dir", "public")?
            .set_default("log_filter", "info")?
            .add_source(File::with_name(&config_file).required(false))
            .add_source(Environment::with_prefix("TIMESTAMP").try_parsing(true))
            .set_override_option("port", port_env)?
            .set_override_option("address", address)?
            .set_override_option("port", port)?
            .set_override_option("public_dir", public_dir)?
            .set_override_option("log_filter", log_filter)?;

        let config = builder.build()?;

        Ok(Settings {
            address: config.get("address")?,
            port: config.get("port")?,
            public_dir: config.get("public_dir")?,
            log_filter: config.get("log_filter")?,
        })
    }

    pub fn listen_address(&self) -> Result<SocketAddr, AddrParseError> {
        let ip: IpAddr = self.address.parse()?;
        Ok(SocketAddr::new(ip, self.port))
    }

    pub fn print(&self) {
        info!("Address: {}", self.address);
        info!("Port: {}", self.port);
        info!("Public Dir: {}", self.public_dir);
        info!("Log Filter: {}", self.log_filter);
    }
}
