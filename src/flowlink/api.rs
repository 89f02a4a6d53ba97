//! # API Facade
//!
//! A thin facade over the command layer and the single entry point for every
//! flowlink operation, whatever the client.
//!
//! The facade parses loosely typed inputs (control type names, move
//! directions) into domain types and dispatches. It holds no business logic,
//! performs no terminal output and returns [`CmdResult`]s for the client to
//! render.
//!
//! `LinkerApi<S: FlowStore>` is generic over the session store:
//! `LinkerApi<FileStore>` in the binary, `LinkerApi<InMemoryStore>` in tests.

use crate::commands;
use crate::error::{LinkerError, Result};
use crate::model::{ControlType, Move};
use crate::store::FlowStore;
use std::path::PathBuf;

pub struct LinkerApi<S: FlowStore> {
    store: S,
}

impl<S: FlowStore> LinkerApi<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn init(&mut self) -> Result<CmdResult> {
        commands::init::run(&mut self.store)
    }

    pub fn import_graph(&mut self, workflow: &str) -> Result<CmdResult> {
        commands::graph::run(&mut self.store, workflow)
    }

    pub fn load_document(&mut self, text: &str) -> Result<CmdResult> {
        commands::load::run(&mut self.store, text)
    }

    pub fn nodes(&self) -> Result<CmdResult> {
        commands::nodes::run(&self.store)
    }

    pub fn list(&self) -> Result<CmdResult> {
        commands::list::run(&self.store)
    }

    pub fn bind(
        &mut self,
        node_path: &str,
        control_type: &str,
        label: Option<String>,
        fields: Fields,
    ) -> Result<CmdResult> {
        let request = BindRequest {
            node_path: node_path.to_string(),
            control_type: parse_control_type(control_type)?,
            label,
            fields,
        };
        commands::bind::add(&mut self.store, request)
    }

    pub fn edit(
        &mut self,
        id: &str,
        control_type: Option<&str>,
        node_path: Option<String>,
        label: Option<String>,
        fields: Fields,
    ) -> Result<CmdResult> {
        let request = EditRequest {
            control_type: control_type.map(parse_control_type).transpose()?,
            node_path,
            label,
            fields,
        };
        commands::bind::edit(&mut self.store, id, request)
    }

    pub fn unbind<I: AsRef<str>>(&mut self, ids: &[I]) -> Result<CmdResult> {
        let ids: Vec<String> = ids.iter().map(|id| id.as_ref().to_string()).collect();
        commands::unbind::run(&mut self.store, &ids)
    }

    pub fn move_binding(&mut self, id: &str, direction: &str) -> Result<CmdResult> {
        commands::reorder::run(&mut self.store, id, parse_move(direction)?)
    }

    pub fn group(&mut self, action: GroupAction) -> Result<CmdResult> {
        commands::groups::run(&mut self.store, action)
    }

    pub fn meta(&mut self, name: Option<String>, description: Option<String>) -> Result<CmdResult> {
        commands::meta::run(&mut self.store, name, description)
    }

    pub fn copy_flow(&mut self) -> Result<CmdResult> {
        commands::meta::copy(&mut self.store)
    }

    pub fn export(
        &self,
        lean: Option<bool>,
        compact: Option<bool>,
        out: Option<PathBuf>,
    ) -> Result<CmdResult> {
        let options = ExportOptions { lean, compact, out };
        commands::export::run(&self.store, options)
    }

    pub fn preview(&self, compact: Option<bool>) -> Result<CmdResult> {
        commands::export::preview(&self.store, compact)
    }

    pub fn config(&mut self, action: ConfigAction) -> Result<CmdResult> {
        commands::config::run(&mut self.store, action)
    }
}

pub fn parse_control_type(name: &str) -> Result<ControlType> {
    name.parse().map_err(LinkerError::Api)
}

pub fn parse_move(direction: &str) -> Result<Move> {
    direction.parse().map_err(LinkerError::Api)
}

pub type Fields = serde_json::Map<String, serde_json::Value>;

pub use crate::commands::bind::{BindRequest, EditRequest};
pub use crate::commands::config::ConfigAction;
pub use crate::commands::export::ExportOptions;
pub use crate::commands::groups::GroupAction;
pub use commands::{CmdMessage, CmdResult, GroupListing, InputListing, MessageLevel, NodeListing};
