use crate::bindings::BindingStore;
use crate::commands::{CmdMessage, CmdResult, NodeListing};
use crate::error::Result;
use crate::graph::NodeMap;
use crate::store::FlowStore;

use super::helpers::save_session;

/// Imports a workflow and starts a fresh session over it. Existing bindings,
/// groups and metadata are discarded.
pub fn run<S: FlowStore>(store: &mut S, workflow: &str) -> Result<CmdResult> {
    let nodes = NodeMap::parse(workflow)?;
    if !store.is_initialized() {
        store.init()?;
    }

    let mut session = BindingStore::new();
    session.set_nodes(nodes.clone());
    save_session(store, &mut session)?;
    store.save_graph(&nodes)?;

    let mut result = CmdResult::default();
    result.listed_nodes = nodes
        .iter()
        .map(|(id, info)| NodeListing::new(id, info, &[]))
        .collect();
    let message = if nodes.is_empty() {
        CmdMessage::warning("Workflow contains no nodes")
    } else {
        CmdMessage::success(format!("Imported {} nodes", nodes.len()))
    };
    result.add_message(message);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::helpers::load_session;
    use crate::error::LinkerError;
    use crate::store::memory::fixtures::{sample_workflow, StoreFixture};
    use crate::store::memory::InMemoryStore;
    use serde_json::json;

    #[test]
    fn imports_nodes_and_initializes() {
        let mut store = InMemoryStore::new();
        let result = run(&mut store, &sample_workflow().to_string()).unwrap();
        assert_eq!(result.listed_nodes.len(), 4);
        assert_eq!(result.listed_nodes[0].class_type, "KSampler");
        assert!(store.is_initialized());
        assert_eq!(load_session(&store).unwrap().nodes().len(), 4);
    }

    #[test]
    fn import_resets_bindings() {
        let mut fixture = StoreFixture::new()
            .with_flow(json!({"name": "Old", "seeders": [{"id": "s", "nodePath": "3.inputs.seed"}]}));
        run(&mut fixture.store, &sample_workflow().to_string()).unwrap();

        let session = load_session(&fixture.store).unwrap();
        assert!(session.bindings().is_empty());
        assert_eq!(session.meta().name, None);
    }

    #[test]
    fn rejects_non_object_workflows() {
        let mut store = InMemoryStore::new();
        assert!(matches!(
            run(&mut store, "[]"),
            Err(LinkerError::InvalidGraph(_))
        ));
        assert!(!store.is_initialized());
    }
}
