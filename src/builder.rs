//! Schema model → command nodes → clap Command tree
//!
//! Each operation is bound once into a [`CommandNode`] describing its flags.
//! The nodes live in a [`CommandRegistry`] keyed by operation id, from which
//! the clap tree is rendered and against which parsed matches are resolved.

use std::collections::{BTreeMap, HashMap, HashSet};

use clap::{value_parser, Arg, ArgAction, Command};

use crate::config::{CliConfig, ACCESS_TOKEN_FLAG, BASE_URI_FLAG, SCHEMA_FLAG, VERBOSE_FLAG};
use crate::error::BindingError;
use crate::model::{OperationSpec, ParamLocation, ParamType, ResourceSpec};
use crate::naming::kebab_case;

/// Long name of the raw JSON body flag.
pub const DATA_FLAG: &str = "data";
/// Long name of the semantic patch toggle.
pub const SEMANTIC_PATCH_FLAG: &str = "semantic-patch";

/// Shorthands clap reserves on every subcommand.
const RESERVED_SHORTHANDS: [char; 1] = ['h'];
/// Long names owned by the root command.
const RESERVED_LONG_FLAGS: [&str; 5] = [
    "help",
    ACCESS_TOKEN_FLAG,
    BASE_URI_FLAG,
    SCHEMA_FLAG,
    VERBOSE_FLAG,
];
/// Subcommand names clap generates on every command with subcommands.
const RESERVED_COMMAND_NAMES: [&str; 1] = ["help"];

/// What a flag's value feeds into when the request is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlagRole {
    /// An operation parameter, by its declared name
    Param {
        name: String,
        location: ParamLocation,
    },
    /// Raw JSON request body
    Data,
    /// Alternate content type for semantic patch requests
    SemanticPatch,
}

/// One flag declared on an operation command.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct FlagSpec {
    pub long: String,
    pub short: Option<char>,
    pub kind: ParamType,
    pub required: bool,
    pub help: String,
    pub role: FlagRole,
}

impl FlagSpec {
    fn to_arg(&self) -> Arg {
        let arg = Arg::new(self.long.clone())
            .long(self.long.clone())
            .help(self.help.clone())
            .required(self.required);
        let arg = match self.short {
            Some(c) => arg.short(c),
            None => arg,
        };
        match self.kind {
            ParamType::String => arg.action(ArgAction::Set),
            ParamType::Int => arg.action(ArgAction::Set).value_parser(value_parser!(i64)),
            ParamType::Boolean => arg.action(ArgAction::SetTrue),
        }
    }
}

/// An operation bound to its command name and flags.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub struct CommandNode {
    /// Kebab name of the owning resource (the command group)
    pub resource: String,
    pub operation: OperationSpec,
    /// Flags in declaration order
    pub flags: Vec<FlagSpec>,
}

impl CommandNode {
    /// Render this node as a clap subcommand.
    pub fn command(&self) -> Command {
        let mut cmd = Command::new(self.operation.command_name.clone())
            .about(self.operation.short_summary.clone());
        if !self.operation.long_description.is_empty() {
            cmd = cmd.long_about(self.operation.long_description.clone());
        }
        for flag in &self.flags {
            cmd = cmd.arg(flag.to_arg());
        }
        cmd
    }

    pub fn flag(&self, role: &FlagRole) -> Option<&FlagSpec> {
        self.flags.iter().find(|f| &f.role == role)
    }
}

/// Derive the flags for one operation.
///
/// The body flag comes first (`--data`/`-d`), then the semantic patch toggle,
/// then one flag per parameter in declared order. A parameter's shorthand is
/// its first character, or its second when the first is taken; when both are
/// taken binding fails rather than silently shadowing a flag.
pub fn bind(resource: &str, op: &OperationSpec) -> Result<CommandNode, BindingError> {
    let mut flags: Vec<FlagSpec> = Vec::new();
    let mut long_names: HashSet<String> =
        RESERVED_LONG_FLAGS.iter().map(|s| s.to_string()).collect();
    let mut shorthands: HashSet<char> = RESERVED_SHORTHANDS.into_iter().collect();

    let command = format!("{resource} {}", op.command_name);

    if op.requires_body {
        shorthands.insert('d');
        push_flag(
            &mut flags,
            &mut long_names,
            &command,
            FlagSpec {
                long: DATA_FLAG.to_string(),
                short: Some('d'),
                kind: ParamType::String,
                required: true,
                help: "Input data in JSON".to_string(),
                role: FlagRole::Data,
            },
        )?;
    }

    if op.supports_semantic_patch {
        push_flag(
            &mut flags,
            &mut long_names,
            &command,
            FlagSpec {
                long: SEMANTIC_PATCH_FLAG.to_string(),
                short: None,
                kind: ParamType::Boolean,
                required: false,
                help: "Perform a semantic patch request".to_string(),
                role: FlagRole::SemanticPatch,
            },
        )?;
    }

    for param in &op.params {
        let long = kebab_case(&param.name);
        let Some(short) = pick_shorthand(&param.name, &mut shorthands) else {
            return Err(BindingError::ShorthandExhausted {
                command,
                flag: long,
            });
        };
        push_flag(
            &mut flags,
            &mut long_names,
            &command,
            FlagSpec {
                long,
                short: Some(short),
                kind: param.param_type,
                required: param.location == ParamLocation::Path,
                help: param.description.clone(),
                role: FlagRole::Param {
                    name: param.name.clone(),
                    location: param.location,
                },
            },
        )?;
    }

    Ok(CommandNode {
        resource: resource.to_string(),
        operation: op.clone(),
        flags,
    })
}

fn push_flag(
    flags: &mut Vec<FlagSpec>,
    long_names: &mut HashSet<String>,
    command: &str,
    flag: FlagSpec,
) -> Result<(), BindingError> {
    if !long_names.insert(flag.long.clone()) {
        return Err(BindingError::DuplicateFlag {
            command: command.to_string(),
            flag: flag.long,
        });
    }
    flags.push(flag);
    Ok(())
}

/// First free character among the first two of `name`.
fn pick_shorthand(name: &str, taken: &mut HashSet<char>) -> Option<char> {
    name.chars()
        .take(2)
        .filter(char::is_ascii_alphanumeric)
        .find(|&c| taken.insert(c))
}

/// Help text for a command group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupInfo {
    pub display_name: String,
    pub description: String,
}

/// All bound commands, keyed by operation id.
#[derive(Debug, Clone, Default)]
pub struct CommandRegistry {
    nodes: BTreeMap<String, CommandNode>,
    groups: BTreeMap<String, GroupInfo>,
    by_name: HashMap<(String, String), String>,
}

impl CommandRegistry {
    /// Bind every operation of every resource.
    pub fn build(resources: &[ResourceSpec]) -> Result<Self, BindingError> {
        let mut registry = Self::default();
        for resource in resources {
            if !resource.operations.is_empty() {
                check_command_name(&resource.kebab_name)?;
            }
            registry.groups.insert(
                resource.kebab_name.clone(),
                GroupInfo {
                    display_name: resource.display_name.clone(),
                    description: resource.description.clone(),
                },
            );
            for op in resource.operations.values() {
                check_command_name(&op.command_name)?;
                registry.insert(bind(&resource.kebab_name, op)?)?;
            }
        }
        Ok(registry)
    }

    fn insert(&mut self, node: CommandNode) -> Result<(), BindingError> {
        if self.nodes.contains_key(&node.operation.operation_id) {
            return Err(BindingError::DuplicateOperation {
                operation: node.operation.operation_id.clone(),
            });
        }
        let key = (node.resource.clone(), node.operation.command_name.clone());
        if self.by_name.contains_key(&key) {
            return Err(BindingError::DuplicateCommand {
                resource: key.0,
                command: key.1,
            });
        }
        self.by_name
            .insert(key, node.operation.operation_id.clone());
        self.nodes
            .insert(node.operation.operation_id.clone(), node);
        Ok(())
    }

    pub fn get(&self, operation_id: &str) -> Option<&CommandNode> {
        self.nodes.get(operation_id)
    }

    /// Resolve a parsed `<resource> <command>` pair.
    pub fn find(&self, resource: &str, command: &str) -> Option<&CommandNode> {
        self.by_name
            .get(&(resource.to_string(), command.to_string()))
            .and_then(|id| self.nodes.get(id))
    }

    pub fn nodes(&self) -> impl Iterator<Item = &CommandNode> {
        self.nodes.values()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

fn check_command_name(name: &str) -> Result<(), BindingError> {
    if RESERVED_COMMAND_NAMES.contains(&name) {
        return Err(BindingError::ReservedName {
            name: name.to_string(),
        });
    }
    Ok(())
}

/// Build the clap `Command` tree from a registry.
///
/// Structure: `<name> <resource> <operation> [--flags]`
pub fn build_commands(config: &CliConfig, registry: &CommandRegistry) -> Command {
    let mut root = Command::new(config.name.clone())
        .about(config.about.clone())
        .subcommand_required(true)
        .arg_required_else_help(true);
    for arg in config.global_args().into_iter().chain(config.startup_args()) {
        root = root.arg(arg);
    }

    for (name, info) in &registry.groups {
        let mut nodes = registry.nodes().filter(|n| n.resource == *name).peekable();
        if nodes.peek().is_none() {
            continue;
        }
        let about = if info.description.is_empty() {
            format!("Make requests (list, create, etc.) on {}", info.display_name)
        } else {
            info.description.clone()
        };
        let mut group = Command::new(name.clone())
            .about(about)
            .subcommand_required(true)
            .arg_required_else_help(true);
        for node in nodes {
            group = group.subcommand(node.command());
        }
        root = root.subcommand(group);
    }
    root
}
