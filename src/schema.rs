//! API description → schema model
//!
//! Reads an OpenAPI document (JSON or YAML) and groups its operations under
//! the resources declared by its tags.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::SchemaLoadError;
use crate::model::{HttpMethod, OperationSpec, ParamLocation, ParamSpec, ParamType, ResourceSpec};
use crate::naming::normalize_group;

/// Path-item keys read as operations, in the order they are visited.
const METHOD_KEYS: [&str; 8] = [
    "get", "post", "put", "patch", "delete", "head", "options", "trace",
];

/// Markers in a tag name that flag a resource as not yet stable.
const EXPERIMENTAL_MARKERS: [&str; 2] = ["beta", "experimental"];

/// Media-type parameter announcing semantic patch support on a request body.
const SEMANTIC_PATCH_MEDIA_PARAM: &str = "domain-model=launchdarkly.semanticpatch";

/// Bound on chained `$ref`s, so a reference cycle fails instead of spinning.
const MAX_REF_DEPTH: usize = 32;

/// Read and load an API description from disk.
pub fn load_file(path: &Path) -> Result<Vec<ResourceSpec>, SchemaLoadError> {
    let raw = std::fs::read_to_string(path).map_err(|source| SchemaLoadError::Read {
        path: path.display().to_string(),
        source,
    })?;
    let doc = parse_document(&raw)?;
    load(&doc)
}

/// Parse a raw document. JSON is tried first, then YAML.
pub fn parse_document(raw: &str) -> Result<Value, SchemaLoadError> {
    if let Ok(doc) = serde_json::from_str(raw) {
        return Ok(doc);
    }
    serde_yaml::from_str(raw).map_err(SchemaLoadError::Parse)
}

/// Build the resource list from a parsed document.
///
/// Operations whose tag matches no declared resource are dropped with a
/// warning; every other inconsistency fails the whole load.
pub fn load(doc: &Value) -> Result<Vec<ResourceSpec>, SchemaLoadError> {
    let mut resources = collect_resources(doc)?;

    let paths = doc
        .get("paths")
        .and_then(Value::as_object)
        .ok_or_else(|| malformed("missing `paths` object"))?;

    let mut dropped = 0usize;
    let mut seen_ids: HashSet<&str> = HashSet::new();
    for (path, path_item) in paths {
        let path_item = resolve(doc, path_item)?;
        let path_level_params = path_item.get("parameters");

        for key in METHOD_KEYS {
            let Some(operation) = path_item.get(key) else {
                continue;
            };
            let Some(method) = HttpMethod::from_key(key) else {
                debug!(path = %path, method = key, "skipping unsupported method");
                continue;
            };

            let Some(operation_id) = operation.get("operationId").and_then(Value::as_str) else {
                warn!(path = %path, method = %method, "operation has no operationId, dropping it");
                dropped += 1;
                continue;
            };
            if !seen_ids.insert(operation_id) {
                return Err(malformed(format!("operationId `{operation_id}` is declared twice")));
            }

            let Some(tag) = first_tag(operation) else {
                warn!(operation_id, "operation has no tag, dropping it");
                dropped += 1;
                continue;
            };
            if is_experimental(tag) {
                debug!(operation_id, tag, "skipping experimental operation");
                continue;
            }
            let Some(resource) = resources.get_mut(&normalize_group(tag)) else {
                warn!(operation_id, tag, "matching resource not found for operation tag");
                dropped += 1;
                continue;
            };

            let op = build_operation(doc, path, method, operation_id, operation, path_level_params)?;
            resource.operations.insert(op.operation_id.clone(), op);
        }
    }

    let resources: Vec<ResourceSpec> = resources.into_values().collect();
    info!(
        resources = resources.len(),
        operations = resources.iter().map(|r| r.operations.len()).sum::<usize>(),
        dropped,
        "loaded API description"
    );
    Ok(resources)
}

/// One resource per non-experimental tag, keyed by normalized tag name.
fn collect_resources(doc: &Value) -> Result<BTreeMap<String, ResourceSpec>, SchemaLoadError> {
    let mut resources = BTreeMap::new();
    let tags = match doc.get("tags") {
        None => return Ok(resources),
        Some(Value::Array(tags)) => tags,
        Some(_) => return Err(malformed("`tags` must be an array")),
    };

    for tag in tags {
        let name = tag
            .get("name")
            .and_then(Value::as_str)
            .ok_or_else(|| malformed("tag without a name"))?;
        if is_experimental(name) {
            debug!(tag = name, "skipping experimental resource");
            continue;
        }
        let description = str_field(tag, "description");
        let resource = ResourceSpec::new(name, description);
        if resources.contains_key(&resource.kebab_name) {
            debug!(tag = name, "ignoring duplicate tag");
            continue;
        }
        resources.insert(resource.kebab_name.clone(), resource);
    }
    Ok(resources)
}

fn build_operation(
    doc: &Value,
    path: &str,
    method: HttpMethod,
    operation_id: &str,
    operation: &Value,
    path_level_params: Option<&Value>,
) -> Result<OperationSpec, SchemaLoadError> {
    let mut op = OperationSpec::new(operation_id, method, path);
    op.short_summary = str_field(operation, "summary");
    op.long_description = str_field(operation, "description");
    op.supports_semantic_patch =
        method == HttpMethod::Patch && accepts_semantic_patch(doc, operation)?;
    op.params = collect_params(doc, operation_id, path_level_params, operation.get("parameters"))?;

    check_placeholders(&op)?;
    Ok(op)
}

/// Merge path-level and operation-level parameters in declared order.
///
/// An operation-level parameter replaces the path-level one with the same
/// name and location in place. Header and cookie parameters are not bound.
fn collect_params(
    doc: &Value,
    operation_id: &str,
    path_level: Option<&Value>,
    operation_level: Option<&Value>,
) -> Result<Vec<ParamSpec>, SchemaLoadError> {
    let mut params: Vec<ParamSpec> = Vec::new();

    for source in [path_level, operation_level].into_iter().flatten() {
        let Some(list) = source.as_array() else {
            return Err(malformed(format!(
                "parameters of {operation_id} must be an array"
            )));
        };
        for raw in list {
            let Some(param) = parse_param(doc, operation_id, resolve(doc, raw)?)? else {
                continue;
            };
            match params
                .iter_mut()
                .find(|p| p.name == param.name && p.location == param.location)
            {
                Some(existing) => *existing = param,
                None => params.push(param),
            }
        }
    }

    Ok(params)
}

fn parse_param(
    doc: &Value,
    operation_id: &str,
    param: &Value,
) -> Result<Option<ParamSpec>, SchemaLoadError> {
    let name = param
        .get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| malformed(format!("parameter without a name in {operation_id}")))?;
    let location = match param.get("in").and_then(Value::as_str) {
        Some("path") => ParamLocation::Path,
        Some("query") => ParamLocation::Query,
        Some(other) => {
            debug!(operation_id, param = name, location = other, "skipping parameter");
            return Ok(None);
        }
        None => {
            return Err(malformed(format!(
                "parameter {name} of {operation_id} has no location"
            )))
        }
    };

    let unresolvable = || SchemaLoadError::UnresolvableParam {
        operation: operation_id.to_string(),
        param: name.to_string(),
    };
    let schema = match param.get("schema") {
        Some(schema) => resolve(doc, schema)?,
        None => return Err(unresolvable()),
    };
    let param_type = first_declared_type(schema)
        .and_then(param_type_from_name)
        .ok_or_else(unresolvable)?;

    let required = param.get("required").and_then(Value::as_bool).unwrap_or(false);
    Ok(Some(
        ParamSpec::new(name, location, param_type, required)
            .description(str_field(param, "description")),
    ))
}

/// The first type a schema declares.
///
/// `type` may be a single name or (OpenAPI 3.1) a list; with a list the
/// first entry wins and the rest are ignored, so `["integer", "null"]`
/// binds as an integer flag.
fn first_declared_type(schema: &Value) -> Option<&str> {
    match schema.get("type")? {
        Value::String(t) => Some(t.as_str()),
        Value::Array(types) => types.first()?.as_str(),
        _ => None,
    }
}

fn param_type_from_name(name: &str) -> Option<ParamType> {
    match name {
        "integer" => Some(ParamType::Int),
        "boolean" => Some(ParamType::Boolean),
        "string" | "number" | "array" | "object" | "null" => Some(ParamType::String),
        _ => None,
    }
}

/// Whether any request body media type announces semantic patch support.
fn accepts_semantic_patch(doc: &Value, operation: &Value) -> Result<bool, SchemaLoadError> {
    let Some(body) = operation.get("requestBody") else {
        return Ok(false);
    };
    let body = resolve(doc, body)?;
    Ok(body
        .get("content")
        .and_then(Value::as_object)
        .is_some_and(|content| {
            content.keys().any(|media| {
                media
                    .to_ascii_lowercase()
                    .replace(' ', "")
                    .contains(SEMANTIC_PATCH_MEDIA_PARAM)
            })
        }))
}

/// Every `{name}` in the path needs a path parameter of that name, and
/// every path parameter needs a placeholder.
fn check_placeholders(op: &OperationSpec) -> Result<(), SchemaLoadError> {
    let placeholders = path_placeholders(&op.path);
    let mismatch = |placeholder: &str| SchemaLoadError::PlaceholderMismatch {
        operation: op.operation_id.clone(),
        placeholder: placeholder.to_string(),
    };

    for placeholder in &placeholders {
        if !op.path_params().any(|p| p.name == *placeholder) {
            return Err(mismatch(placeholder));
        }
    }
    for param in op.path_params() {
        if !placeholders.contains(&param.name.as_str()) {
            return Err(mismatch(&param.name));
        }
    }
    Ok(())
}

/// Names of the `{name}` placeholders in a path template, left to right.
pub fn path_placeholders(path: &str) -> Vec<&str> {
    let mut names = Vec::new();
    let mut rest = path;
    while let Some(start) = rest.find('{') {
        let after = &rest[start + 1..];
        let Some(end) = after.find('}') else {
            break;
        };
        names.push(&after[..end]);
        rest = &after[end + 1..];
    }
    names
}

/// Follow local `$ref`s (`#/components/...`) until a concrete object is reached.
fn resolve<'a>(doc: &'a Value, value: &'a Value) -> Result<&'a Value, SchemaLoadError> {
    let mut current = value;
    for _ in 0..MAX_REF_DEPTH {
        let Some(reference) = current.get("$ref").and_then(Value::as_str) else {
            return Ok(current);
        };
        current = reference
            .strip_prefix('#')
            .and_then(|pointer| doc.pointer(pointer))
            .ok_or_else(|| SchemaLoadError::UnresolvedRef {
                reference: reference.to_string(),
            })?;
    }
    Err(SchemaLoadError::UnresolvedRef {
        reference: "reference chain too deep".to_string(),
    })
}

fn first_tag(operation: &Value) -> Option<&str> {
    operation
        .get("tags")
        .and_then(Value::as_array)
        .and_then(|tags| tags.first())
        .and_then(Value::as_str)
}

fn is_experimental(tag: &str) -> bool {
    let tag = tag.to_lowercase();
    EXPERIMENTAL_MARKERS.iter().any(|m| tag.contains(m))
}

fn str_field(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_string()
}

fn malformed(reason: impl Into<String>) -> SchemaLoadError {
    SchemaLoadError::Malformed {
        reason: reason.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tracing_test::traced_test;

    fn teams_doc() -> Value {
        json!({
            "openapi": "3.0.0",
            "tags": [
                { "name": "Teams", "description": "Manage teams" },
                { "name": "Access tokens", "description": "Tokens" },
                { "name": "Flag triggers (beta)", "description": "Not yet" }
            ],
            "paths": {
                "/teams/{teamKey}": {
                    "get": {
                        "operationId": "getTeam",
                        "summary": "Get team",
                        "description": "Fetch a team by key.",
                        "tags": ["Teams"],
                        "parameters": [
                            {
                                "name": "teamKey",
                                "in": "path",
                                "required": true,
                                "description": "The team key",
                                "schema": { "type": "string" }
                            },
                            {
                                "name": "expand",
                                "in": "query",
                                "schema": { "type": "string" }
                            }
                        ]
                    },
                    "patch": {
                        "operationId": "patchTeam",
                        "summary": "Update team",
                        "tags": ["Teams"],
                        "parameters": [
                            {
                                "name": "teamKey",
                                "in": "path",
                                "required": true,
                                "schema": { "type": "string" }
                            }
                        ],
                        "requestBody": {
                            "content": {
                                "application/json; domain-model=launchdarkly.semanticpatch": {
                                    "schema": { "type": "object" }
                                }
                            }
                        }
                    },
                    "delete": {
                        "operationId": "deleteTeam",
                        "tags": ["teams"],
                        "parameters": [
                            {
                                "name": "teamKey",
                                "in": "path",
                                "required": true,
                                "schema": { "type": "string" }
                            }
                        ]
                    }
                },
                "/teams": {
                    "post": {
                        "operationId": "postTeam",
                        "tags": ["Teams"]
                    },
                    "get": {
                        "operationId": "getTeams",
                        "tags": ["Teams"],
                        "parameters": [
                            { "name": "limit", "in": "query", "schema": { "type": "integer" } },
                            { "name": "X-Trace", "in": "header", "schema": { "type": "string" } }
                        ]
                    }
                },
                "/tokens/{id}": {
                    "put": {
                        "operationId": "putToken",
                        "tags": ["Access tokens"],
                        "parameters": [
                            { "name": "id", "in": "path", "required": true, "schema": { "type": "string" } }
                        ]
                    }
                },
                "/triggers": {
                    "get": {
                        "operationId": "getTriggers",
                        "tags": ["Flag triggers (beta)"]
                    }
                }
            }
        })
    }

    fn find<'a>(resources: &'a [ResourceSpec], name: &str) -> &'a ResourceSpec {
        resources.iter().find(|r| r.kebab_name == name).unwrap()
    }

    #[test]
    fn load_groups_operations_under_resources() {
        let resources = load(&teams_doc()).unwrap();
        let names: Vec<&str> = resources.iter().map(|r| r.kebab_name.as_str()).collect();
        assert_eq!(names, vec!["access-tokens", "teams"]);

        let teams = find(&resources, "teams");
        assert_eq!(teams.display_name, "teams");
        assert_eq!(teams.description, "Manage teams");
        let ids: Vec<&str> = teams.operations.keys().map(String::as_str).collect();
        assert_eq!(
            ids,
            vec!["deleteTeam", "getTeam", "getTeams", "patchTeam", "postTeam"]
        );

        let get_team = &teams.operations["getTeam"];
        assert_eq!(get_team.command_name, "get-team");
        assert_eq!(get_team.http_method, HttpMethod::Get);
        assert_eq!(get_team.path, "/teams/{teamKey}");
        assert_eq!(get_team.short_summary, "Get team");
        assert_eq!(get_team.long_description, "Fetch a team by key.");
        assert_eq!(get_team.params.len(), 2);
        assert_eq!(get_team.params[0].name, "teamKey");
        assert_eq!(get_team.params[0].location, ParamLocation::Path);
        assert_eq!(get_team.params[0].description, "The team key");
        assert_eq!(get_team.params[1].name, "expand");
        assert_eq!(get_team.params[1].location, ParamLocation::Query);
        assert!(!get_team.params[1].required);
    }

    #[test]
    fn load_skips_experimental_tags_and_their_operations() {
        let resources = load(&teams_doc()).unwrap();
        assert!(resources.iter().all(|r| !r.kebab_name.contains("triggers")));
        assert!(resources
            .iter()
            .all(|r| !r.operations.contains_key("getTriggers")));
    }

    #[test]
    fn load_matches_tags_case_insensitively() {
        let resources = load(&teams_doc()).unwrap();
        assert!(find(&resources, "teams").operations.contains_key("deleteTeam"));
    }

    #[test]
    fn requires_body_follows_method() {
        let resources = load(&teams_doc()).unwrap();
        for op in resources.iter().flat_map(|r| r.operations.values()) {
            let expected = matches!(
                op.http_method,
                HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch
            );
            assert_eq!(op.requires_body, expected, "{}", op.operation_id);
        }
    }

    #[test]
    fn placeholders_match_path_params_for_every_operation() {
        let resources = load(&teams_doc()).unwrap();
        for op in resources.iter().flat_map(|r| r.operations.values()) {
            assert_eq!(
                path_placeholders(&op.path).len(),
                op.path_params().count(),
                "{}",
                op.operation_id
            );
        }
    }

    #[test]
    fn load_derives_param_types_and_skips_header_params() {
        let resources = load(&teams_doc()).unwrap();
        let get_teams = &find(&resources, "teams").operations["getTeams"];
        assert_eq!(get_teams.params.len(), 1);
        assert_eq!(get_teams.params[0].param_type, ParamType::Int);
    }

    #[test]
    fn semantic_patch_detected_from_request_media_type() {
        let resources = load(&teams_doc()).unwrap();
        let teams = find(&resources, "teams");
        assert!(teams.operations["patchTeam"].supports_semantic_patch);
        assert!(!teams.operations["postTeam"].supports_semantic_patch);
    }

    #[test]
    #[traced_test]
    fn operation_with_unknown_tag_is_dropped_and_loading_continues() {
        let doc = json!({
            "tags": [{ "name": "Teams" }],
            "paths": {
                "/members": {
                    "get": { "operationId": "getMembers", "tags": ["Members"] }
                },
                "/teams": {
                    "get": { "operationId": "getTeams", "tags": ["Teams"] }
                }
            }
        });

        let resources = load(&doc).unwrap();
        assert_eq!(resources.len(), 1);
        assert_eq!(resources[0].operations.len(), 1);
        assert!(resources[0].operations.contains_key("getTeams"));
        assert!(logs_contain("matching resource not found"));
        assert!(logs_contain("getMembers"));
    }

    #[test]
    fn untagged_operation_is_dropped() {
        let doc = json!({
            "tags": [{ "name": "Teams" }],
            "paths": { "/health": { "get": { "operationId": "health" } } }
        });
        let resources = load(&doc).unwrap();
        assert!(resources[0].operations.is_empty());
    }

    #[test]
    fn multiple_declared_types_take_the_first() {
        let doc = json!({
            "tags": [{ "name": "Teams" }],
            "paths": {
                "/teams": {
                    "get": {
                        "operationId": "getTeams",
                        "tags": ["Teams"],
                        "parameters": [
                            { "name": "limit", "in": "query", "schema": { "type": ["integer", "string"] } },
                            { "name": "filter", "in": "query", "schema": { "type": ["null", "integer"] } }
                        ]
                    }
                }
            }
        });
        let resources = load(&doc).unwrap();
        let op = &resources[0].operations["getTeams"];
        assert_eq!(op.params[0].param_type, ParamType::Int);
        assert_eq!(op.params[1].param_type, ParamType::String);
    }

    #[test]
    fn param_without_schema_fails_naming_the_param() {
        let doc = json!({
            "tags": [{ "name": "Teams" }],
            "paths": {
                "/teams": {
                    "get": {
                        "operationId": "getTeams",
                        "tags": ["Teams"],
                        "parameters": [{ "name": "limit", "in": "query" }]
                    }
                }
            }
        });
        let err = load(&doc).unwrap_err();
        assert!(matches!(
            err,
            SchemaLoadError::UnresolvableParam { ref operation, ref param }
                if operation == "getTeams" && param == "limit"
        ));
    }

    #[test]
    fn param_with_untyped_schema_fails() {
        let doc = json!({
            "tags": [{ "name": "Teams" }],
            "paths": {
                "/teams": {
                    "get": {
                        "operationId": "getTeams",
                        "tags": ["Teams"],
                        "parameters": [
                            { "name": "sort", "in": "query", "schema": { "enum": ["asc", "desc"] } }
                        ]
                    }
                }
            }
        });
        assert!(matches!(
            load(&doc),
            Err(SchemaLoadError::UnresolvableParam { .. })
        ));
    }

    #[test]
    fn local_refs_are_resolved() {
        let doc = json!({
            "tags": [{ "name": "Teams" }],
            "components": {
                "parameters": {
                    "TeamKey": {
                        "name": "teamKey",
                        "in": "path",
                        "required": true,
                        "schema": { "$ref": "#/components/schemas/Key" }
                    }
                },
                "schemas": { "Key": { "type": "string" } }
            },
            "paths": {
                "/teams/{teamKey}": {
                    "get": {
                        "operationId": "getTeam",
                        "tags": ["Teams"],
                        "parameters": [{ "$ref": "#/components/parameters/TeamKey" }]
                    }
                }
            }
        });
        let resources = load(&doc).unwrap();
        let op = &resources[0].operations["getTeam"];
        assert_eq!(op.params[0].name, "teamKey");
        assert_eq!(op.params[0].param_type, ParamType::String);
    }

    #[test]
    fn dangling_ref_fails() {
        let doc = json!({
            "tags": [{ "name": "Teams" }],
            "paths": {
                "/teams": {
                    "get": {
                        "operationId": "getTeams",
                        "tags": ["Teams"],
                        "parameters": [{ "$ref": "#/components/parameters/Missing" }]
                    }
                }
            }
        });
        assert!(matches!(
            load(&doc),
            Err(SchemaLoadError::UnresolvedRef { .. })
        ));
    }

    #[test]
    fn path_level_params_merge_with_operation_override() {
        let doc = json!({
            "tags": [{ "name": "Teams" }],
            "paths": {
                "/teams/{teamKey}": {
                    "parameters": [
                        { "name": "teamKey", "in": "path", "required": true, "schema": { "type": "string" } },
                        { "name": "expand", "in": "query", "description": "path level", "schema": { "type": "string" } }
                    ],
                    "get": {
                        "operationId": "getTeam",
                        "tags": ["Teams"],
                        "parameters": [
                            { "name": "expand", "in": "query", "description": "operation level", "schema": { "type": "boolean" } }
                        ]
                    }
                }
            }
        });
        let resources = load(&doc).unwrap();
        let op = &resources[0].operations["getTeam"];
        assert_eq!(op.params.len(), 2);
        assert_eq!(op.params[0].name, "teamKey");
        assert_eq!(op.params[1].description, "operation level");
        assert_eq!(op.params[1].param_type, ParamType::Boolean);
    }

    #[test]
    fn placeholder_without_path_param_fails() {
        let doc = json!({
            "tags": [{ "name": "Teams" }],
            "paths": {
                "/teams/{teamKey}": {
                    "get": { "operationId": "getTeam", "tags": ["Teams"] }
                }
            }
        });
        assert!(matches!(
            load(&doc),
            Err(SchemaLoadError::PlaceholderMismatch { ref placeholder, .. }) if placeholder == "teamKey"
        ));
    }

    #[test]
    fn path_param_without_placeholder_fails() {
        let doc = json!({
            "tags": [{ "name": "Teams" }],
            "paths": {
                "/teams": {
                    "get": {
                        "operationId": "getTeams",
                        "tags": ["Teams"],
                        "parameters": [
                            { "name": "teamKey", "in": "path", "required": true, "schema": { "type": "string" } }
                        ]
                    }
                }
            }
        });
        assert!(matches!(
            load(&doc),
            Err(SchemaLoadError::PlaceholderMismatch { ref operation, ref placeholder })
                if operation == "getTeams" && placeholder == "teamKey"
        ));
    }

    #[test]
    fn repeated_operation_id_is_malformed() {
        let doc = json!({
            "tags": [{ "name": "Teams" }, { "name": "Members" }],
            "paths": {
                "/teams": { "get": { "operationId": "list", "tags": ["Teams"] } },
                "/members": { "get": { "operationId": "list", "tags": ["Members"] } }
            }
        });
        let err = load(&doc).unwrap_err();
        assert!(matches!(err, SchemaLoadError::Malformed { ref reason } if reason.contains("`list`")));
    }

    #[test]
    fn repeated_operation_id_within_one_resource_is_malformed() {
        let doc = json!({
            "tags": [{ "name": "Teams" }],
            "paths": {
                "/teams": {
                    "get": { "operationId": "teams", "tags": ["Teams"] },
                    "post": { "operationId": "teams", "tags": ["Teams"] }
                }
            }
        });
        assert!(matches!(load(&doc), Err(SchemaLoadError::Malformed { .. })));
    }

    #[test]
    fn missing_paths_is_malformed() {
        let err = load(&json!({ "tags": [] })).unwrap_err();
        assert!(matches!(err, SchemaLoadError::Malformed { .. }));
    }

    #[test]
    fn non_array_tags_is_malformed() {
        let err = load(&json!({ "tags": {}, "paths": {} })).unwrap_err();
        assert!(matches!(err, SchemaLoadError::Malformed { .. }));
    }

    #[test]
    fn parse_document_accepts_json_and_yaml() {
        let json_doc = parse_document(r#"{"paths": {}}"#).unwrap();
        assert!(json_doc["paths"].is_object());

        let yaml = "tags:\n  - name: Teams\npaths:\n  /teams:\n    get:\n      operationId: getTeams\n      tags: [Teams]\n";
        let resources = load(&parse_document(yaml).unwrap()).unwrap();
        assert!(resources[0].operations.contains_key("getTeams"));
    }

    #[test]
    fn parse_document_rejects_garbage() {
        assert!(matches!(
            parse_document("{ not: [valid"),
            Err(SchemaLoadError::Parse(_))
        ));
    }

    #[test]
    fn load_file_reports_missing_file() {
        let err = load_file(Path::new("/nonexistent/openapi.json")).unwrap_err();
        assert!(matches!(err, SchemaLoadError::Read { .. }));
    }

    #[test]
    fn path_placeholders_in_order() {
        assert_eq!(
            path_placeholders("/projects/{projectKey}/flags/{featureFlagKey}"),
            vec!["projectKey", "featureFlagKey"]
        );
        assert!(path_placeholders("/teams").is_empty());
    }
}
