//! Tool identity, global flags and per-invocation connection settings.

use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Duration;

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};

use crate::error::ConfigError;

pub const ACCESS_TOKEN_FLAG: &str = "access-token";
pub const BASE_URI_FLAG: &str = "base-uri";
pub const SCHEMA_FLAG: &str = "schema";
pub const VERBOSE_FLAG: &str = "verbose";

/// Bound on a single request round trip.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for building a CLI from an API description.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct CliConfig {
    /// Root command name (e.g. "ldcli")
    pub name: String,
    /// Root command about/description
    pub about: String,
    /// Base URI used when neither flag nor environment supplies one
    pub default_base_url: String,
    /// Prefix of the environment variables backing the global flags
    pub env_prefix: String,
    /// Request timeout handed to the transport
    pub timeout: Duration,
    pub user_agent: String,
}

impl CliConfig {
    pub fn new(
        name: impl Into<String>,
        about: impl Into<String>,
        default_base_url: impl Into<String>,
    ) -> Self {
        let name = name.into();
        Self {
            env_prefix: name.to_uppercase().replace('-', "_"),
            user_agent: format!("{name}/{}", env!("CARGO_PKG_VERSION")),
            name,
            about: about.into(),
            default_base_url: default_base_url.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the environment variable prefix (`"LD"` → `LD_ACCESS_TOKEN`).
    pub fn env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn env_var(&self, flag: &str) -> String {
        format!("{}_{}", self.env_prefix, flag.to_uppercase().replace('-', "_"))
    }

    /// Flags declared on the root command and visible on every subcommand.
    pub fn global_args(&self) -> Vec<Arg> {
        vec![
            Arg::new(ACCESS_TOKEN_FLAG)
                .long(ACCESS_TOKEN_FLAG)
                .env(self.env_var(ACCESS_TOKEN_FLAG))
                .hide_env_values(true)
                .global(true)
                .help("API access token sent in the Authorization header"),
            Arg::new(BASE_URI_FLAG)
                .long(BASE_URI_FLAG)
                .env(self.env_var(BASE_URI_FLAG))
                .default_value(self.default_base_url.clone())
                .global(true)
                .help("API base URI"),
        ]
    }

    /// Flags read before the command tree exists.
    ///
    /// They stay on the root command only: a value given after the resource
    /// name would arrive too late to pick the API description.
    pub fn startup_args(&self) -> Vec<Arg> {
        vec![
            Arg::new(SCHEMA_FLAG)
                .long(SCHEMA_FLAG)
                .env(self.env_var(SCHEMA_FLAG))
                .value_parser(value_parser!(PathBuf))
                .help("Path to the OpenAPI description (JSON or YAML)"),
            Arg::new(VERBOSE_FLAG)
                .long(VERBOSE_FLAG)
                .action(ArgAction::Count)
                .help("Increase log verbosity (repeatable)"),
        ]
    }

    /// Root command that only understands the root flags.
    ///
    /// Used to find the API description before the full tree can be built;
    /// everything from the first subcommand on is left for the full parse.
    fn bootstrap_command(&self) -> Command {
        let mut cmd = Command::new(self.name.clone())
            .disable_help_flag(true)
            .disable_version_flag(true)
            .allow_external_subcommands(true)
            .arg(Arg::new("help").short('h').long("help").action(ArgAction::SetTrue));
        for arg in self.global_args().into_iter().chain(self.startup_args()) {
            cmd = cmd.arg(arg);
        }
        cmd
    }
}

/// Settings needed before the command tree exists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StartupOptions {
    pub schema: Option<PathBuf>,
    pub verbose: u8,
}

impl StartupOptions {
    /// Parse the root flags out of a full command line.
    pub fn parse<I, T>(config: &CliConfig, args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = config.bootstrap_command().try_get_matches_from(args)?;
        Ok(Self {
            schema: matches.get_one::<PathBuf>(SCHEMA_FLAG).cloned(),
            verbose: matches.get_one::<u8>(VERBOSE_FLAG).copied().unwrap_or(0),
        })
    }

    pub fn schema(&self, config: &CliConfig) -> Result<&PathBuf, ConfigError> {
        self.schema.as_ref().ok_or_else(|| ConfigError::MissingSchema {
            env: config.env_var(SCHEMA_FLAG),
        })
    }
}

/// Connection settings for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct ApiConfig {
    pub base_uri: String,
    /// Opaque credential, sent verbatim as the Authorization header
    pub access_token: String,
    pub user_agent: String,
}

impl ApiConfig {
    pub fn new(base_uri: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            base_uri: base_uri.into(),
            access_token: access_token.into(),
            user_agent: format!("openapi-resources/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Resolve from the matches of the invoked (leaf) command.
    pub fn from_matches(config: &CliConfig, matches: &ArgMatches) -> Result<Self, ConfigError> {
        let access_token = matches
            .get_one::<String>(ACCESS_TOKEN_FLAG)
            .filter(|t| !t.is_empty())
            .cloned()
            .ok_or_else(|| ConfigError::MissingAccessToken {
                env: config.env_var(ACCESS_TOKEN_FLAG),
            })?;
        let base_uri = matches
            .get_one::<String>(BASE_URI_FLAG)
            .cloned()
            .unwrap_or_else(|| config.default_base_url.clone());

        Ok(Self {
            base_uri,
            access_token,
            user_agent: config.user_agent.clone(),
        })
    }
}
