use crate::commands::{CmdMessage, CmdResult, NodeListing};
use crate::error::Result;
use crate::store::FlowStore;

use super::helpers::load_session;

/// Lists the imported nodes and which of their inputs are bound.
pub fn run<S: FlowStore>(store: &S) -> Result<CmdResult> {
    let session = load_session(store)?;
    let mut result = CmdResult::default();
    if session.nodes().is_empty() {
        result.add_message(CmdMessage::info(
            "No graph imported. Run `flowlink graph <file>` first",
        ));
        return Ok(result);
    }
    result.listed_nodes = session
        .nodes()
        .iter()
        .map(|(id, info)| NodeListing::new(id, info, session.bindings()))
        .collect();
    Ok(result)
}
