use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::Move;
use crate::store::FlowStore;

use super::helpers::{find_binding, load_session, save_session};

/// Moves an ungrouped binding. Grouped bindings are ordered with
/// `group order` instead.
pub fn run<S: FlowStore>(store: &mut S, id: &str, mv: Move) -> Result<CmdResult> {
    let mut session = load_session(store)?;
    let binding = find_binding(&session, id)?;
    let mut result = CmdResult::default();

    if let Some(group_id) = &binding.group_id {
        result.add_message(CmdMessage::info(format!(
            "{} is in group {}; use `flowlink group order` to move it",
            id, group_id
        )));
        return Ok(result);
    }

    if session.reorder(id, mv) {
        save_session(store, &mut session)?;
        result.add_message(CmdMessage::success(format!("Moved {} {}", id, mv)));
        result.listed_bindings = session.ungrouped().cloned().collect();
    } else {
        result.add_message(CmdMessage::info(format!("{} cannot move {}", id, mv)));
    }
    Ok(result)
}
