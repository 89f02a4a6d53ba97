use crate::bindings::BindingStore;
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::FlowStore;

use super::helpers::{load_session, save_session};

/// Shows the flow metadata, updating name and description when given.
pub fn run<S: FlowStore>(
    store: &mut S,
    name: Option<String>,
    description: Option<String>,
) -> Result<CmdResult> {
    let mut session = load_session(store)?;
    let mut result = CmdResult::default();

    let changed = name.is_some() || description.is_some();
    if let Some(name) = name {
        session.set_flow_name(&name);
    }
    if let Some(description) = description {
        session.set_description(&description);
    }
    if changed {
        save_session(store, &mut session)?;
        result.add_message(CmdMessage::success("Updated flow metadata"));
    }
    describe(&session, &mut result);
    Ok(result)
}

/// Assigns a new flow id so the next save creates a separate flow.
pub fn copy<S: FlowStore>(store: &mut S) -> Result<CmdResult> {
    let mut session = load_session(store)?;
    let id = session.copy_flow();
    save_session(store, &mut session)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Copied flow as {}", id)));
    describe(&session, &mut result);
    Ok(result)
}

fn describe(session: &BindingStore, result: &mut CmdResult) {
    let meta = session.meta();
    let fields = [
        ("id", &meta.id),
        ("name", &meta.name),
        ("url", &meta.url),
        ("description", &meta.description),
    ];
    for (key, value) in fields {
        result.add_message(CmdMessage::info(format!(
            "{}: {}",
            key,
            value.as_deref().unwrap_or("-")
        )));
    }
}
