use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::FlowStore;

use super::helpers::{load_session, save_session};

pub fn run<S: FlowStore>(store: &mut S, ids: &[String]) -> Result<CmdResult> {
    let mut session = load_session(store)?;
    let mut result = CmdResult::default();

    for id in ids {
        match session.delete(id) {
            Some(binding) => {
                result.add_message(CmdMessage::success(format!(
                    "Unbound {} ({})",
                    binding.display_name(),
                    binding.node_path
                )));
                result.affected_bindings.push(binding);
            }
            None => result.add_message(CmdMessage::warning(format!("No binding with id {}", id))),
        }
    }

    if !result.affected_bindings.is_empty() {
        save_session(store, &mut session)?;
    }
    Ok(result)
}
