//! Invocation values → HTTP request → transport
//!
//! Request building is a pure function of the bound command, the values the
//! user supplied and the connection settings; only [`execute`] touches the
//! network, through an injected [`Transport`].

use std::collections::HashMap;

use clap::ArgMatches;
use serde_json::Value;
use tracing::debug;

use crate::builder::{CommandNode, FlagRole};
use crate::config::ApiConfig;
use crate::error::{ApiError, DispatchError};
use crate::model::{ParamSpec, ParamType};
use crate::schema::path_placeholders;
use crate::transport::{HttpRequest, HttpResponse, Transport};

pub const JSON_CONTENT_TYPE: &str = "application/json";
/// Appended to the content type of semantic patch requests.
pub const SEMANTIC_PATCH_SUFFIX: &str = "; domain-model=launchdarkly.semanticpatch";

/// A value supplied for one parameter flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlagValue {
    String(String),
    Int(i64),
    Bool(bool),
}

impl FlagValue {
    /// Wire form, or `None` when the value counts as unset
    /// (empty string, `false`).
    fn render(&self) -> Option<String> {
        match self {
            Self::String(s) if s.is_empty() => None,
            Self::String(s) => Some(s.clone()),
            Self::Int(i) => Some(i.to_string()),
            Self::Bool(true) => Some("true".to_string()),
            Self::Bool(false) => None,
        }
    }
}

impl From<&str> for FlagValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<i64> for FlagValue {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<bool> for FlagValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

/// Everything the user supplied for one command invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Invocation {
    /// Parameter values keyed by declared parameter name
    params: HashMap<String, FlagValue>,
    /// Raw `--data` input
    data: Option<String>,
    semantic_patch: bool,
}

impl Invocation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn param(mut self, name: impl Into<String>, value: impl Into<FlagValue>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    pub fn data(mut self, data: impl Into<String>) -> Self {
        self.data = Some(data.into());
        self
    }

    pub fn semantic_patch(mut self, enabled: bool) -> Self {
        self.semantic_patch = enabled;
        self
    }

    /// Read the current flag values of a parsed operation command.
    pub fn from_matches(node: &CommandNode, matches: &ArgMatches) -> Self {
        let mut invocation = Self::new();
        for flag in &node.flags {
            match &flag.role {
                FlagRole::Data => {
                    invocation.data = matches.get_one::<String>(&flag.long).cloned();
                }
                FlagRole::SemanticPatch => {
                    invocation.semantic_patch = matches.get_flag(&flag.long);
                }
                FlagRole::Param { name, .. } => {
                    let value = match flag.kind {
                        ParamType::String => matches
                            .get_one::<String>(&flag.long)
                            .map(|s| FlagValue::String(s.clone())),
                        ParamType::Int => matches.get_one::<i64>(&flag.long).map(|i| FlagValue::Int(*i)),
                        ParamType::Boolean => Some(FlagValue::Bool(matches.get_flag(&flag.long))),
                    };
                    if let Some(value) = value {
                        invocation.params.insert(name.clone(), value);
                    }
                }
            }
        }
        invocation
    }

    fn rendered(&self, param: &ParamSpec) -> Option<String> {
        self.params.get(&param.name).and_then(FlagValue::render)
    }
}

/// Build the request for one invocation without sending it.
pub fn build_request(
    node: &CommandNode,
    invocation: &Invocation,
    api: &ApiConfig,
) -> Result<HttpRequest, DispatchError> {
    let op = &node.operation;
    let body = build_body(node, invocation)?;
    let path = build_path(node, invocation)?;
    let query = build_query(node, invocation);

    let mut url = format!("{}{}", api.base_uri.trim_end_matches('/'), path);
    if !query.is_empty() {
        url.push('?');
        url.push_str(&query);
    }

    let mut content_type = JSON_CONTENT_TYPE.to_string();
    if op.supports_semantic_patch && invocation.semantic_patch {
        content_type.push_str(SEMANTIC_PATCH_SUFFIX);
    }

    let mut headers = vec![("Content-Type".to_string(), content_type)];
    if !api.access_token.is_empty() {
        headers.push(("Authorization".to_string(), api.access_token.clone()));
    }
    headers.push(("User-Agent".to_string(), api.user_agent.clone()));

    Ok(HttpRequest {
        method: op.http_method,
        url,
        headers,
        body,
    })
}

/// Build and send one request. No retry is attempted.
pub fn execute(
    transport: &dyn Transport,
    node: &CommandNode,
    invocation: &Invocation,
    api: &ApiConfig,
) -> Result<HttpResponse, DispatchError> {
    let request = build_request(node, invocation, api)?;
    debug!(
        operation_id = %node.operation.operation_id,
        method = %request.method,
        url = %request.url,
        "sending request"
    );
    let response = transport.send(&request).map_err(ApiError::Transport)?;
    debug!(status = response.status, bytes = response.body.len(), "received response");
    Ok(response)
}

/// Parse `--data` and re-serialize it; `None` when the operation has no body.
fn build_body(node: &CommandNode, invocation: &Invocation) -> Result<Option<Vec<u8>>, DispatchError> {
    if !node.operation.requires_body {
        return Ok(None);
    }
    let raw = invocation.data.as_deref().ok_or(DispatchError::BodyRequired)?;
    let value: Value = serde_json::from_str(raw).map_err(DispatchError::InvalidInput)?;
    let bytes = serde_json::to_vec(&value).map_err(DispatchError::InvalidInput)?;
    Ok(Some(bytes))
}

/// Substitute each `{name}` with the encoded value of the path parameter
/// of that name.
fn build_path(node: &CommandNode, invocation: &Invocation) -> Result<String, DispatchError> {
    let op = &node.operation;
    let mut path = op.path.clone();
    for param in op.path_params() {
        let value = invocation
            .rendered(param)
            .ok_or_else(|| DispatchError::MissingPathParam {
                name: param.name.clone(),
            })?;
        path = path.replace(&format!("{{{}}}", param.name), &urlencoding::encode(&value));
    }

    if !path_placeholders(&path).is_empty() {
        return Err(DispatchError::UnresolvedPlaceholder { path: op.path.clone() });
    }
    Ok(path)
}

fn build_query(node: &CommandNode, invocation: &Invocation) -> String {
    node.operation
        .query_params()
        .filter_map(|param| {
            invocation.rendered(param).map(|value| {
                format!(
                    "{}={}",
                    urlencoding::encode(&param.name),
                    urlencoding::encode(&value)
                )
            })
        })
        .collect::<Vec<_>>()
        .join("&")
}
