//! Schema model: resources, operations and parameters.
//!
//! Plain data produced by [`crate::schema::load`] and consumed by the binder.
//! Nothing here performs I/O.

use std::collections::BTreeMap;
use std::fmt;

/// HTTP methods an operation can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    /// Map a lower-case path-item key (`"get"`, `"post"`, ...) to a method.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "get" => Some(Self::Get),
            "post" => Some(Self::Post),
            "put" => Some(Self::Put),
            "patch" => Some(Self::Patch),
            "delete" => Some(Self::Delete),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }

    /// Whether requests with this method carry a JSON body.
    pub fn requires_body(self) -> bool {
        matches!(self, Self::Post | Self::Put | Self::Patch)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a parameter goes in the outgoing request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamLocation {
    Path,
    Query,
}

/// Flag value type derived from a parameter's schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    String,
    Int,
    Boolean,
}

/// A single operation parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct ParamSpec {
    /// Name as declared in the document (e.g. `"teamKey"`)
    pub name: String,
    pub location: ParamLocation,
    pub description: String,
    pub param_type: ParamType,
    /// Always true for path parameters
    pub required: bool,
}

impl ParamSpec {
    pub fn new(
        name: impl Into<String>,
        location: ParamLocation,
        param_type: ParamType,
        required: bool,
    ) -> Self {
        Self {
            name: name.into(),
            location,
            description: String::new(),
            param_type,
            required: required || location == ParamLocation::Path,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// One invokable API operation.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct OperationSpec {
    /// operationId from the document (e.g. `"getTeam"`)
    pub operation_id: String,
    pub short_summary: String,
    pub long_description: String,
    /// Kebab-case operation id (e.g. `"get-team"`)
    pub command_name: String,
    pub http_method: HttpMethod,
    /// URL path template (e.g. `"/teams/{teamKey}"`)
    pub path: String,
    pub requires_body: bool,
    pub supports_semantic_patch: bool,
    /// Parameters in declared order
    pub params: Vec<ParamSpec>,
}

impl OperationSpec {
    pub fn new(
        operation_id: impl Into<String>,
        http_method: HttpMethod,
        path: impl Into<String>,
    ) -> Self {
        let operation_id = operation_id.into();
        Self {
            command_name: crate::naming::kebab_case(&operation_id),
            operation_id,
            short_summary: String::new(),
            long_description: String::new(),
            http_method,
            path: path.into(),
            requires_body: http_method.requires_body(),
            supports_semantic_patch: false,
            params: Vec::new(),
        }
    }

    pub fn param(mut self, param: ParamSpec) -> Self {
        self.params.push(param);
        self
    }

    pub fn semantic_patch(mut self, supported: bool) -> Self {
        self.supports_semantic_patch = supported;
        self
    }

    pub fn path_params(&self) -> impl Iterator<Item = &ParamSpec> {
        self.params
            .iter()
            .filter(|p| p.location == ParamLocation::Path)
    }

    pub fn query_params(&self) -> impl Iterator<Item = &ParamSpec> {
        self.params
            .iter()
            .filter(|p| p.location == ParamLocation::Query)
    }
}

/// A named group of operations, built from a document tag.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct ResourceSpec {
    /// Tag name, lower-cased (e.g. `"access tokens"`)
    pub display_name: String,
    /// Command group name (e.g. `"access-tokens"`)
    pub kebab_name: String,
    pub description: String,
    /// Operations keyed by operation id
    pub operations: BTreeMap<String, OperationSpec>,
}

impl ResourceSpec {
    pub fn new(tag: &str, description: impl Into<String>) -> Self {
        Self {
            display_name: tag.to_lowercase(),
            kebab_name: crate::naming::normalize_group(tag),
            description: description.into(),
            operations: BTreeMap::new(),
        }
    }

    pub fn operation(mut self, op: OperationSpec) -> Self {
        self.operations.insert(op.operation_id.clone(), op);
        self
    }
}
