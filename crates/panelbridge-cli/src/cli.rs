//! CLI argument definitions using clap

use crate::error::{CliError, CliResult};
use crate::utils::{prompt, prompt_with_default, prompt_yes_no};
use clap::{Args, Parser, Subcommand};
use panelbridge_client::PanelConnection;

#[derive(Parser)]
#[command(
    name = "panelbridge",
    about = "CyberPanel provisioning connector - connection test and debug tools",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Test connectivity, credentials and endpoint availability
    Test {
        #[command(flatten)]
        connection: ConnectionArgs,
    },
    /// Run one verbose verifyConn call and dump the raw exchange
    Debug {
        #[command(flatten)]
        connection: ConnectionArgs,
    },
}

/// Server connection parameters. Anything omitted is prompted for
/// interactively, with the same defaults the panel ships with.
#[derive(Args, Debug, Clone)]
pub struct ConnectionArgs {
    /// Panel server IP or hostname
    #[arg(long)]
    pub host: Option<String>,

    /// Panel API port
    #[arg(long)]
    pub port: Option<u16>,

    /// Use HTTPS for API calls
    #[arg(long)]
    pub https: bool,

    /// Panel admin username
    #[arg(long)]
    pub admin_user: Option<String>,

    /// Panel admin password
    #[arg(long, env = "PANELBRIDGE_ADMIN_PASS", hide_env_values = true)]
    pub admin_pass: Option<String>,

    /// Verify the server TLS certificate (off by default; panel certs are
    /// usually self-signed)
    #[arg(long)]
    pub verify_certs: bool,
}

impl ConnectionArgs {
    /// Resolve the arguments into connection parameters, prompting for
    /// whatever was not supplied on the command line.
    pub fn resolve(self) -> CliResult<PanelConnection> {
        // Full interactive flow only when no host was given, so scripted
        // invocations stay non-interactive apart from the password.
        let interactive = self.host.is_none();

        let host = match self.host {
            Some(host) => host,
            None => {
                println!("Enter your CyberPanel server details:");
                prompt("Server IP or hostname: ")?
            }
        };
        if host.trim().is_empty() {
            return Err(CliError::InvalidArgument("server hostname is required".to_string()));
        }

        let port = match self.port {
            Some(port) => port,
            None if interactive => {
                let answer = prompt_with_default("Port", "8090")?;
                answer
                    .parse()
                    .map_err(|_| CliError::InvalidArgument(format!("invalid port '{}'", answer)))?
            }
            None => 8090,
        };

        let use_tls = if self.https {
            true
        } else if interactive {
            prompt_yes_no("Use HTTPS?")?
        } else {
            false
        };

        let admin_user = match self.admin_user {
            Some(user) => user,
            None if interactive => prompt_with_default("Admin username", "admin")?,
            None => "admin".to_string(),
        };

        let admin_pass = match self.admin_pass {
            Some(pass) => pass,
            None => prompt("Admin password: ")?,
        };

        Ok(PanelConnection::new(host.trim(), port, admin_user, admin_pass)
            .with_tls(use_tls)
            .with_verify_certs(self.verify_certs))
    }
}
