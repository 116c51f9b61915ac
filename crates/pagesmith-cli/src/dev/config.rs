//! Preview server configuration.

use crate::cli::DevArgs;
use crate::commands::utils;
use crate::error::{CliError, Result};
use pagesmith_config::EffectiveConfig;
use std::net::{SocketAddr, TcpListener};

/// Dev command configuration: the resolved project plus server settings.
#[derive(Debug, Clone)]
pub struct DevConfig {
    pub project: EffectiveConfig,

    /// Server socket address (IP + port)
    pub addr: SocketAddr,

    /// Open browser automatically on start
    pub open: bool,
}

impl DevConfig {
    /// Create DevConfig from CLI arguments.
    ///
    /// # Errors
    ///
    /// Returns error if the project root is missing or no port in the
    /// requested range is free.
    pub fn from_args(args: &DevArgs) -> Result<Self> {
        let project = utils::load_config(&args.project)?;
        let addr = Self::find_available_port(args.port)?;

        Ok(Self {
            project,
            addr,
            open: args.open,
        })
    }

    /// Find an available port starting from the requested port.
    ///
    /// Tries the requested port first, then the next 10.
    fn find_available_port(requested_port: u16) -> Result<SocketAddr> {
        if requested_port < 1024 {
            crate::ui::warning(&format!(
                "Port {requested_port} is in privileged range, may require root access"
            ));
        }

        for offset in 0..=10 {
            let port = requested_port.saturating_add(offset);
            let addr = SocketAddr::from(([127, 0, 0, 1], port));
            if TcpListener::bind(addr).is_ok() {
                if offset > 0 {
                    crate::ui::warning(&format!(
                        "Port {requested_port} is busy, using port {port} instead"
                    ));
                }
                return Ok(addr);
            }
        }

        Err(CliError::InvalidArgument(format!(
            "ports {}-{} are all in use; pick another with --port",
            requested_port,
            requested_port.saturating_add(10)
        )))
    }

    pub fn server_url(&self) -> String {
        format!("http://{}", self.addr)
    }
}
