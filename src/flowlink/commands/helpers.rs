use crate::bindings::BindingStore;
use crate::codec;
use crate::error::{LinkerError, Result};
use crate::layout::Layout;
use crate::model::Binding;
use crate::store::FlowStore;
use tracing::info;

pub fn require_session<S: FlowStore>(store: &S) -> Result<()> {
    if store.is_initialized() {
        Ok(())
    } else {
        Err(LinkerError::Store(
            "No session found. Run `flowlink init` or `flowlink graph <file>` first".to_string(),
        ))
    }
}

/// Rebuilds the binding store from the saved flow, layout and graph.
pub fn load_session<S: FlowStore>(store: &S) -> Result<BindingStore> {
    require_session(store)?;
    let mut session = BindingStore::new();
    if let Some(doc) = store.load_flow()? {
        codec::decode(&mut session, &doc);
        session.apply_layout(&store.load_layout()?);
    }
    session.set_nodes(store.load_graph()?);
    info!(
        bindings = session.bindings().len(),
        groups = session.groups().len(),
        "loaded session"
    );
    Ok(session)
}

/// Persists the session as a full document. Fails without writing anything
/// if the session does not validate.
pub fn save_session<S: FlowStore>(store: &mut S, session: &mut BindingStore) -> Result<()> {
    session.validate()?;
    write_session(store, session)
}

/// Writes the document and its layout without validating.
pub fn write_session<S: FlowStore>(store: &mut S, session: &mut BindingStore) -> Result<()> {
    // Encoding may rename colliding ids, so the layout is captured after it.
    let doc = codec::encode(session, false);
    store.save_flow(&doc)?;
    store.save_layout(&Layout::capture(session))
}

pub fn find_binding(session: &BindingStore, id: &str) -> Result<Binding> {
    session
        .binding(id)
        .cloned()
        .ok_or_else(|| LinkerError::Api(format!("No binding with id {}", id)))
}

/// Resolves a group by id, or by label when exactly one group carries it.
pub fn resolve_group(session: &BindingStore, key: &str) -> Result<String> {
    if let Some(group) = session.group(key) {
        return Ok(group.id.clone());
    }
    let mut matches = session.groups().iter().filter(|g| g.label == key);
    match (matches.next(), matches.next()) {
        (Some(group), None) => Ok(group.id.clone()),
        (Some(_), Some(_)) => Err(LinkerError::Api(format!(
            "Several groups are labelled {}; use the group id",
            key
        ))),
        (None, _) => Err(LinkerError::Api(format!("No group matching {}", key))),
    }
}
