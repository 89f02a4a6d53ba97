//! # Commands
//!
//! Each command is a function over a [`FlowStore`](crate::store::FlowStore)
//! that loads the session, applies one change to the
//! [`BindingStore`](crate::bindings::BindingStore) and saves it back. Commands
//! return a [`CmdResult`]: structured data for the caller to render plus
//! messages. Outcomes that are not failures, such as an ignored move, are
//! messages rather than errors.

use crate::config::LinkerConfig;
use crate::graph::NodeInfo;
use crate::model::{Binding, Group, NodeId};
use std::path::PathBuf;

pub mod bind;
pub mod config;
pub mod export;
pub mod graph;
pub mod groups;
pub mod helpers;
pub mod init;
pub mod list;
pub mod load;
pub mod meta;
pub mod nodes;
pub mod reorder;
pub mod unbind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// A group together with its member bindings, in member order.
#[derive(Debug, Clone)]
pub struct GroupListing {
    pub group: Group,
    pub members: Vec<Binding>,
}

/// One input of an imported node, with the binding that targets it, if any.
#[derive(Debug, Clone)]
pub struct InputListing {
    pub name: String,
    pub path: String,
    /// Wired to another node's output rather than holding a value.
    pub linked: bool,
    pub bound_by: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NodeListing {
    pub node_id: NodeId,
    pub class_type: String,
    pub inputs: Vec<InputListing>,
}

impl NodeListing {
    pub(crate) fn new(node_id: &str, info: &NodeInfo, bindings: &[Binding]) -> Self {
        let inputs = info
            .input_paths
            .iter()
            .map(|(name, path)| InputListing {
                name: name.clone(),
                path: path.clone(),
                linked: info.is_linked(name),
                bound_by: bindings
                    .iter()
                    .find(|b| &b.node_path == path)
                    .map(|b| b.id.clone()),
            })
            .collect();
        Self {
            node_id: node_id.to_string(),
            class_type: info.class_type.clone(),
            inputs,
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_bindings: Vec<Binding>,
    pub listed_bindings: Vec<Binding>,
    pub listed_groups: Vec<GroupListing>,
    pub listed_nodes: Vec<NodeListing>,
    /// Rendered document text, for commands that print one.
    pub document: Option<String>,
    pub output_path: Option<PathBuf>,
    pub config: Option<LinkerConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_message(mut self, message: CmdMessage) -> Self {
        self.messages.push(message);
        self
    }

    pub fn with_affected_bindings(mut self, bindings: Vec<Binding>) -> Self {
        self.affected_bindings = bindings;
        self
    }

    pub fn with_document(mut self, document: String) -> Self {
        self.document = Some(document);
        self
    }

    pub fn with_config(mut self, config: LinkerConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Whether any message reports an error.
    pub fn has_errors(&self) -> bool {
        self.messages
            .iter()
            .any(|m| m.level == MessageLevel::Error)
    }
}
