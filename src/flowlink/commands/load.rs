use crate::bindings::BindingStore;
use crate::codec::{self, Document};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::FlowStore;

use super::helpers::write_session;

/// Replaces the session's bindings, groups and metadata with a document's.
/// The imported graph is kept. The document is stored even if it does not
/// validate; the problems are reported as warnings and block later saves
/// until they are fixed.
pub fn run<S: FlowStore>(store: &mut S, text: &str) -> Result<CmdResult> {
    let doc = Document::parse(text)?;
    if !store.is_initialized() {
        store.init()?;
    }

    let mut session = BindingStore::new();
    session.set_nodes(store.load_graph()?);
    codec::decode(&mut session, &doc);
    write_session(store, &mut session)?;

    let mut result = CmdResult::default();
    for group in session.groups() {
        if group.label.trim().is_empty() {
            result.add_message(CmdMessage::warning(format!(
                "Group {} has no label; name it with `flowlink group rename` before other changes",
                group.id
            )));
        }
    }
    if !session.nodes().is_empty() {
        for binding in session.bindings() {
            if !session.nodes().contains(&binding.node_id) {
                result.add_message(CmdMessage::warning(format!(
                    "{} targets node {}, which is not in the imported graph",
                    binding.id, binding.node_id
                )));
            }
        }
    }
    result.add_message(CmdMessage::success(format!(
        "Loaded {} bindings in {} groups",
        session.bindings().len(),
        session.groups().len()
    )));
    result.affected_bindings = session.bindings().to_vec();
    Ok(result)
}
