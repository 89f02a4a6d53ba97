//! # Session Layout
//!
//! The flow document lists controls by type, so it cannot say that a seeder
//! sits above a prompt, or that a group shows its stepper before its prompt.
//! It also writes whole-node controls at the top level as `<nodeId>.inputs`,
//! dropping the input they were bound from.
//!
//! A [`Layout`] keeps those details next to the document (`layout.json`). It
//! is captured on every save and laid over the decoded document on load.
//! Entries for ids the document no longer has are ignored, and bindings the
//! layout does not know keep their decoded order after the known ones.

use crate::bindings::BindingStore;
use crate::model::node_id_from_path;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Layout {
    /// Binding ids in store order.
    pub order: Vec<String>,
    /// Member order per group id.
    pub members: IndexMap<String, Vec<String>>,
    /// Input paths of whole-node bindings, by binding id.
    pub node_paths: IndexMap<String, String>,
}

impl Layout {
    pub fn capture(store: &BindingStore) -> Self {
        Self {
            order: store.bindings().iter().map(|b| b.id.clone()).collect(),
            members: store
                .groups()
                .iter()
                .map(|g| (g.id.clone(), g.member_order.clone()))
                .collect(),
            node_paths: store
                .bindings()
                .iter()
                .filter(|b| b.control_type().binds_whole_node())
                .map(|b| (b.id.clone(), b.node_path.clone()))
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty() && self.members.is_empty() && self.node_paths.is_empty()
    }
}

fn rank(order: &[String], id: &str) -> usize {
    order.iter().position(|o| o == id).unwrap_or(usize::MAX)
}

impl BindingStore {
    /// Restores binding order, member order and whole-node input paths.
    pub fn apply_layout(&mut self, layout: &Layout) {
        if layout.is_empty() {
            return;
        }

        self.bindings.sort_by_key(|b| rank(&layout.order, &b.id));

        for group in &mut self.groups {
            if let Some(order) = layout.members.get(&group.id) {
                group.member_order.sort_by_key(|id| rank(order, id));
            }
        }

        for binding in &mut self.bindings {
            let Some(path) = layout.node_paths.get(&binding.id) else {
                continue;
            };
            if node_id_from_path(path) == Some(binding.node_id.as_str()) {
                binding.node_path = path.clone();
            } else {
                debug!(id = %binding.id, path = %path, "ignoring layout path for another node");
            }
        }
    }
}
