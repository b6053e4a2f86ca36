//! Command-line front end for the MultiFon API.
//!
//! Settings are taken from flags, then `MULTIFON_*` environment variables, then
//! the JSON file given with `--config`.

mod config;

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;
use multifon::{
    Api, Credentials, DEFAULT_TIMEOUT, LineCount, MultifonClient, NewPassword, Routing,
    StatusResponse,
};

use config::{Config, ConfigSource};

const OK: &str = "OK";

/// Query and change MultiFon account settings.
#[derive(Parser, Debug)]
#[command(name = "multifon")]
#[command(version, about, long_about = None)]
struct Cli {
    /// JSON config file (`-` reads it from stdin)
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Account login
    #[arg(short, long, env = "MULTIFON_LOGIN")]
    login: Option<String>,

    /// Account password
    #[arg(short, long, env = "MULTIFON_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    /// API deployment: multifon | emotion [default: multifon]
    #[arg(short, long, env = "MULTIFON_API")]
    api: Option<Api>,

    /// Request timeout in seconds [default: 32]
    #[arg(short, long, env = "MULTIFON_TIMEOUT", value_name = "SECONDS")]
    timeout: Option<u64>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the account balance
    Balance,

    /// Print the call routing mode, or set it
    Routing {
        /// GSM | SIP | SIP+GSM
        routing: Option<Routing>,
    },

    /// Print the subscription status
    Status,

    /// Print the subscriber number
    Profile,

    /// Print the number of parallel SIP lines, or set it
    Lines {
        /// 2 .. 20
        #[arg(value_parser = parse_lines)]
        lines: Option<LineCount>,
    },

    /// Change the account password (min 8, max 20, mixed case, digits)
    SetPassword {
        #[arg(env = "MULTIFON_NEW_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
}

#[derive(Debug, thiserror::Error)]
#[error("missing {setting}: pass --{flag}, set {env} or add it to the config file")]
struct MissingSetting {
    setting: &'static str,
    flag: &'static str,
    env: &'static str,
}

fn parse_lines(value: &str) -> Result<LineCount, String> {
    let n = value
        .trim()
        .parse::<i64>()
        .map_err(|err| format!("{value}: {err}"))?;
    LineCount::new(n).map_err(|err| err.to_string())
}

fn format_status(response: &StatusResponse) -> String {
    match &response.expires {
        Some(expires) => format!("{}:{expires}", response.status),
        None => response.status.to_string(),
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let source = cli.config.as_deref().map(ConfigSource::from_arg);
    let config = match &source {
        Some(source) => Config::load(source)?,
        None => Config::default(),
    };

    let login = cli
        .login
        .or_else(|| config.login.clone())
        .ok_or(MissingSetting {
            setting: "login",
            flag: "login",
            env: "MULTIFON_LOGIN",
        })?;
    let password = cli
        .password
        .or_else(|| config.password.clone())
        .ok_or(MissingSetting {
            setting: "password",
            flag: "password",
            env: "MULTIFON_PASSWORD",
        })?;
    let api = cli.api.or(config.api).unwrap_or_default();
    let timeout = cli
        .timeout
        .or(config.timeout)
        .map_or(DEFAULT_TIMEOUT, Duration::from_secs);

    tracing::debug!(%api, ?timeout, "building client");
    let mut client = MultifonClient::builder(Credentials::new(login, password)?)
        .api(api)
        .timeout(timeout)
        .user_agent(concat!("multifon/", env!("CARGO_PKG_VERSION")))
        .build()?;

    match cli.command {
        Command::Balance => println!("{}", client.get_balance().await?.balance),
        Command::Routing { routing: None } => {
            println!("{}", client.get_routing().await?.routing)
        }
        Command::Routing {
            routing: Some(routing),
        } => {
            client.set_routing(routing).await?;
            println!("{OK}");
        }
        Command::Status => println!("{}", format_status(&client.get_status().await?)),
        Command::Profile => println!("{}", client.get_profile().await?.msisdn),
        Command::Lines { lines: None } => println!("{}", client.get_lines().await?.lines),
        Command::Lines { lines: Some(lines) } => {
            client.set_lines(lines).await?;
            println!("{OK}");
        }
        Command::SetPassword { password } => {
            let new_password = password
                .or_else(|| config.new_password.clone())
                .ok_or(MissingSetting {
                    setting: "new password",
                    flag: "set-password <PASSWORD>",
                    env: "MULTIFON_NEW_PASSWORD",
                })?;
            let old_password = client.password().clone();
            client.set_password(NewPassword::new(new_password)?).await?;

            if let Some(ConfigSource::File(path)) = &source {
                config
                    .rotated(old_password.as_str(), client.password().as_str())
                    .save(path)?;
                tracing::info!(path = %path.display(), "config updated with new password");
            }
            println!("{OK}");
        }
    }

    Ok(())
}

/// `RUST_LOG` directives, or `warn` when unset or unparsable.
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new("warn"))
}

#[tokio::main]
async fn main() -> ExitCode {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(directives.as_deref()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
