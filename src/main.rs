//! secure-greeter
//!
//! Serves a single greeting on `GET /` and overwrites a fixed set of security
//! headers on every response.
//!
//! ```text
//!     Client Request
//!     ───────────────▶ TraceLayer ─▶ security headers ─▶ timeout ─▶ GET / handler
//!                                          │
//!     Client Response                      ▼
//!     ◀─────────────── TraceLayer ◀─ overwrite headers ◀─ greeting / 404 / 405
//! ```

use std::path::PathBuf;

use clap::Parser;

use secure_greeter::config::{read_config, AppConfig, Preset};
use secure_greeter::lifecycle;
use secure_greeter::observability::init_logging;
use secure_greeter::security::HeaderProfile;

#[derive(Parser)]
#[command(name = "secure-greeter")]
#[command(about = "Greeting server with hardened response headers", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Deployment preset for bind address and debug mode.
    #[arg(long, value_enum)]
    preset: Option<Preset>,

    /// Bind address, e.g. 127.0.0.1:5000.
    #[arg(short, long)]
    bind: Option<String>,

    /// Security header profile.
    #[arg(short, long, value_enum)]
    profile: Option<HeaderProfile>,

    /// Enable debug mode.
    #[arg(long)]
    debug: bool,
}

impl Cli {
    fn into_config(self) -> Result<AppConfig, Box<dyn std::error::Error>> {
        let mut config = match &self.config {
            Some(path) => read_config(path)?,
            None => AppConfig::default(),
        };

        if let Some(preset) = self.preset {
            preset.apply(&mut config.server);
        }
        if let Some(bind) = self.bind {
            config.server.bind_address = bind;
        }
        if let Some(profile) = self.profile {
            config.security.profile = profile;
        }
        if self.debug {
            config.server.debug = true;
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Cli::parse().into_config()?;

    init_logging(&config.observability, config.server.debug);

    tracing::info!("secure-greeter v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.server.bind_address,
        debug = config.server.debug,
        profile = ?config.security.profile,
        "Configuration loaded"
    );

    if let Err(e) = lifecycle::start(config).await {
        tracing::error!(error = %e, "Startup failed");
        return Err(e.into());
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
