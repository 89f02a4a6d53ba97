use crate::commands::{CmdMessage, CmdResult, GroupListing};
use crate::error::Result;
use crate::store::FlowStore;

use super::helpers::load_session;

/// Ungrouped bindings in list order, then every group with its members.
pub fn run<S: FlowStore>(store: &S) -> Result<CmdResult> {
    let session = load_session(store)?;
    let mut result = CmdResult::default();

    result.listed_bindings = session.ungrouped().cloned().collect();
    result.listed_groups = session
        .groups()
        .iter()
        .map(|group| GroupListing {
            group: group.clone(),
            members: session.members(&group.id).into_iter().cloned().collect(),
        })
        .collect();

    if session.bindings().is_empty() && session.groups().is_empty() {
        result.add_message(CmdMessage::info("No bindings yet"));
    }
    Ok(result)
}
