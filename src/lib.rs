//! Build a resource-oriented CLI from an OpenAPI description.
//!
//! Loads the document into a schema model, binds every operation to a
//! command with typed flags, and dispatches one HTTP request per invocation.
//!
//! # Usage
//!
//! ```no_run
//! use openapi_resources::{
//!     build_commands, execute, render, schema, ApiConfig, CliConfig, CommandRegistry,
//!     Invocation, ReqwestTransport,
//! };
//!
//! let doc = schema::parse_document(r#"{"tags":[{"name":"Teams"}],"paths":{}}"#).unwrap();
//! let resources = schema::load(&doc).unwrap();
//! let registry = CommandRegistry::build(&resources).unwrap();
//!
//! let config = CliConfig::new("ldcli", "LaunchDarkly CLI", "https://app.launchdarkly.com")
//!     .env_prefix("LD");
//! let matches = build_commands(&config, &registry).get_matches();
//!
//! let (resource, resource_matches) = matches.subcommand().unwrap();
//! let (command, leaf) = resource_matches.subcommand().unwrap();
//! let node = registry.find(resource, command).unwrap();
//!
//! let api = ApiConfig::from_matches(&config, leaf).unwrap();
//! let transport = ReqwestTransport::new(config.timeout).unwrap();
//! let response = execute(&transport, node, &Invocation::from_matches(node, leaf), &api).unwrap();
//! println!("{}", render(&response).unwrap());
//! ```

pub mod builder;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod model;
pub mod naming;
pub mod render;
pub mod schema;
pub mod transport;

pub use builder::{bind, build_commands, CommandNode, CommandRegistry, FlagRole, FlagSpec};
pub use config::{ApiConfig, CliConfig, StartupOptions};
pub use dispatch::{build_request, execute, FlagValue, Invocation};
pub use error::{ApiError, BindingError, ConfigError, DispatchError, SchemaLoadError};
pub use model::{HttpMethod, OperationSpec, ParamLocation, ParamSpec, ParamType, ResourceSpec};
pub use render::render;
pub use transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport};

// Re-export dependencies for downstream crates
pub use clap;
