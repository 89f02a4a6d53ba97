//! # Binding Store
//!
//! [`BindingStore`] is the canonical in-memory state of one editing session:
//! the ordered list of bindings, the groups over them, the flow metadata and
//! the imported node map. It is a plain owned struct; every operation takes it
//! by reference and leaves it consistent before returning.
//!
//! ## Invariants
//!
//! - Binding and group ids are pairwise distinct across the whole store.
//! - `binding.group_id == Some(g)` iff the binding's id is in group `g`'s
//!   `member_order`. Only the group operations (see `groups.rs`) and
//!   [`BindingStore::delete`] touch either side.
//!
//! ## No-op Policy
//!
//! Operations naming an unknown id do nothing and report nothing beyond a
//! `false`/`None` return. Callers are expected to offer only actions valid for
//! the snapshot they display.
//!
//! ## Ordering
//!
//! There is one global binding order. Reordering works over the *ungrouped
//! view*: grouped bindings keep their slots and are skipped over, since their
//! presentation order is their group's `member_order`.

use crate::controls::ControlParams;
use crate::graph::NodeMap;
use crate::ids::{self, IdSource, RandomIds};
use crate::meta::FlowMeta;
use crate::model::{apply_move, node_id_from_path, Binding, Group, Move, NodeId};
use std::collections::HashSet;
use std::fmt;
use tracing::{debug, trace};

/// What a caller supplies to create a binding.
#[derive(Debug, Clone, PartialEq)]
pub struct BindingSpec {
    /// Pre-existing id (set when loading a document); allocated when `None`.
    pub id: Option<String>,
    pub node_id: NodeId,
    pub node_path: String,
    pub params: ControlParams,
}

impl BindingSpec {
    pub fn new(node_id: impl Into<NodeId>, node_path: impl Into<String>, params: ControlParams) -> Self {
        Self {
            id: None,
            node_id: node_id.into(),
            node_path: node_path.into(),
            params,
        }
    }

    /// Builds a spec whose node id is read from the path. `None` if the path
    /// does not start with a numeric node id.
    pub fn for_path(node_path: &str, params: ControlParams) -> Option<Self> {
        let node_id = node_id_from_path(node_path)?;
        Some(Self::new(node_id, node_path, params))
    }

    pub fn with_id(mut self, id: Option<String>) -> Self {
        self.id = id.filter(|id| !id.is_empty());
        self
    }
}

pub struct BindingStore {
    pub(crate) bindings: Vec<Binding>,
    pub(crate) groups: Vec<Group>,
    pub(crate) meta: FlowMeta,
    pub(crate) nodes: NodeMap,
    pub(crate) ids: Box<dyn IdSource>,
}

impl Default for BindingStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for BindingStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BindingStore")
            .field("bindings", &self.bindings)
            .field("groups", &self.groups)
            .field("meta", &self.meta)
            .field("nodes", &self.nodes.len())
            .finish()
    }
}

impl BindingStore {
    pub fn new() -> Self {
        Self::with_ids(RandomIds)
    }

    pub fn with_ids(ids: impl IdSource + 'static) -> Self {
        Self {
            bindings: Vec::new(),
            groups: Vec::new(),
            meta: FlowMeta::default(),
            nodes: NodeMap::new(),
            ids: Box::new(ids),
        }
    }

    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn binding(&self, id: &str) -> Option<&Binding> {
        self.bindings.iter().find(|b| b.id == id)
    }

    pub fn group(&self, id: &str) -> Option<&Group> {
        self.groups.iter().find(|g| g.id == id)
    }

    /// Bindings not in any group, in list order.
    pub fn ungrouped(&self) -> impl Iterator<Item = &Binding> {
        self.bindings.iter().filter(|b| !b.is_grouped())
    }

    pub fn meta(&self) -> &FlowMeta {
        &self.meta
    }

    pub fn nodes(&self) -> &NodeMap {
        &self.nodes
    }

    /// Attaches a freshly imported graph. Bindings are left alone; callers
    /// starting a new session call [`BindingStore::clear`] as well.
    pub fn set_nodes(&mut self, nodes: NodeMap) {
        self.nodes = nodes;
    }

    /// Every binding and group id currently in use.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.bindings
            .iter()
            .map(|b| b.id.as_str())
            .chain(self.groups.iter().map(|g| g.id.as_str()))
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.ids().any(|existing| existing == id)
    }

    fn taken_ids(&self) -> HashSet<String> {
        self.ids().map(str::to_string).collect()
    }

    /// Allocates `<prefix><suffix>` free across bindings and groups.
    pub fn allocate_id(&mut self, prefix: &str) -> String {
        let taken = self.taken_ids();
        let id = ids::allocate(self.ids.as_mut(), prefix, |c| taken.contains(c));
        debug!(id = %id, "allocated id");
        id
    }

    /// Keeps `candidate` unless a binding or group already holds it, in which
    /// case it is suffixed until free.
    pub(crate) fn fresh_id(&mut self, candidate: &str) -> String {
        let taken = self.taken_ids();
        ids::ensure_unique(self.ids.as_mut(), candidate, |c| taken.contains(c))
    }

    /// Keeps the id a binding already holds unless `in_scope` rejects it. A
    /// replacement is also kept clear of every id in the store.
    pub(crate) fn unique_id(&mut self, candidate: &str, in_scope: impl Fn(&str) -> bool) -> String {
        let taken = self.taken_ids();
        ids::ensure_unique(self.ids.as_mut(), candidate, |c| {
            in_scope(c) || (c != candidate && taken.contains(c))
        })
    }

    /// Drops all bindings, groups and metadata. The node map survives.
    pub fn clear(&mut self) {
        self.bindings.clear();
        self.groups.clear();
        self.meta = FlowMeta::default();
    }

    /// Appends a binding. A supplied id that is already in use is treated as a
    /// collision and suffixed; without one, an id is allocated from the
    /// control type name.
    pub fn add_binding(&mut self, spec: BindingSpec) -> &Binding {
        let id = match spec.id {
            Some(requested) if self.contains_id(&requested) => {
                let renamed = self.fresh_id(&requested);
                debug!(requested = %requested, id = %renamed, "binding id collided, reallocated");
                renamed
            }
            Some(requested) => requested,
            None => self.allocate_id(spec.params.control_type().as_str()),
        };

        let index = self.bindings.len();
        self.bindings.push(Binding {
            id,
            node_id: spec.node_id,
            node_path: spec.node_path,
            params: spec.params,
            group_id: None,
        });
        &self.bindings[index]
    }

    /// Overwrites the binding's path and params in place. The binding is found
    /// by node id and binding id; position, id and group membership are kept.
    pub fn replace_binding(
        &mut self,
        node_id: &str,
        id: &str,
        node_path: impl Into<String>,
        params: ControlParams,
    ) -> Option<&Binding> {
        let Some(binding) = self
            .bindings
            .iter_mut()
            .find(|b| b.node_id == node_id && b.id == id)
        else {
            trace!(id, node_id, "replace ignored: no such binding");
            return None;
        };
        binding.node_path = node_path.into();
        binding.params = params;
        Some(&*binding)
    }

    /// Moves an ungrouped binding among the other ungrouped bindings.
    /// Returns false for unknown or grouped ids and at the list boundaries.
    pub fn reorder(&mut self, id: &str, mv: Move) -> bool {
        let slots: Vec<usize> = self
            .bindings
            .iter()
            .enumerate()
            .filter(|(_, b)| !b.is_grouped())
            .map(|(i, _)| i)
            .collect();

        let Some(position) = slots.iter().position(|&i| self.bindings[i].id == id) else {
            trace!(id, "reorder ignored: not an ungrouped binding");
            return false;
        };

        let mut view = slots.clone();
        if !apply_move(&mut view, position, mv) {
            trace!(id, %mv, "reorder ignored: already at boundary");
            return false;
        }

        let reordered: Vec<Binding> = view.iter().map(|&i| self.bindings[i].clone()).collect();
        for (slot, binding) in slots.into_iter().zip(reordered) {
            self.bindings[slot] = binding;
        }
        true
    }

    /// Removes a binding, trimming it out of any group that lists it. The group
    /// itself survives, even when left empty.
    pub fn delete(&mut self, id: &str) -> Option<Binding> {
        let Some(index) = self.bindings.iter().position(|b| b.id == id) else {
            trace!(id, "delete ignored: no such binding");
            return None;
        };
        let removed = self.bindings.remove(index);
        self.detach_from_groups(id);
        Some(removed)
    }

    /// Renames the binding at `index`, following it into its group's member list.
    pub(crate) fn rename_at(&mut self, index: usize, to: &str) {
        let Some(binding) = self.bindings.get_mut(index) else {
            return;
        };
        let from = std::mem::replace(&mut binding.id, to.to_string());
        if let Some(group_id) = binding.group_id.clone() {
            if let Some(group) = self.groups.iter_mut().find(|g| g.id == group_id) {
                if let Some(member) = group.member_order.iter_mut().find(|m| **m == from) {
                    *member = to.to_string();
                }
            }
        }
        debug!(from = %from, to, "renamed binding");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::testing::ScriptedIds;
    use crate::ids::SeededIds;
    use crate::model::ControlType;

    fn seeder(path: &str) -> BindingSpec {
        BindingSpec::for_path(path, ControlParams::empty(ControlType::Seeder)).unwrap()
    }

    fn order(store: &BindingStore) -> Vec<&str> {
        store.bindings().iter().map(|b| b.id.as_str()).collect()
    }

    fn store_ab() -> BindingStore {
        let mut store = BindingStore::with_ids(SeededIds::new(1));
        store.add_binding(seeder("3.inputs.seed").with_id(Some("a".into())));
        store.add_binding(seeder("3.inputs.steps").with_id(Some("b".into())));
        store
    }

    #[test]
    fn add_allocates_id_from_control_type() {
        let mut store = BindingStore::with_ids(ScriptedIds::new(&["Ab3xZ9"]));
        let binding = store.add_binding(seeder("3.inputs.seed"));
        assert_eq!(binding.id, "seederAb3xZ9");
        assert_eq!(binding.node_id, "3");
        assert_eq!(binding.group_id, None);
    }

    #[test]
    fn add_keeps_supplied_id() {
        let store = store_ab();
        assert_eq!(order(&store), vec!["a", "b"]);
    }

    #[test]
    fn add_reallocates_colliding_supplied_id() {
        let mut store = BindingStore::with_ids(ScriptedIds::new(&["zzzzzz"]));
        store.add_binding(seeder("3.inputs.seed").with_id(Some("x".into())));
        let second = store.add_binding(seeder("4.inputs.seed").with_id(Some("x".into())));
        assert_eq!(second.id, "x_zzzzzz");
    }

    #[test]
    fn add_tolerates_duplicate_node_paths() {
        let mut store = BindingStore::with_ids(SeededIds::new(2));
        store.add_binding(seeder("3.inputs.seed"));
        store.add_binding(seeder("3.inputs.seed"));
        assert_eq!(store.bindings().len(), 2);
        assert_ne!(store.bindings()[0].id, store.bindings()[1].id);
    }

    #[test]
    fn ids_stay_unique_across_many_allocations() {
        let mut store = BindingStore::with_ids(SeededIds::new(99));
        for i in 0..200 {
            store.add_binding(seeder(&format!("{}.inputs.seed", i)));
            if i % 10 == 0 {
                store.create_group(format!("Group {}", i));
            }
        }
        let all: Vec<&str> = store.ids().collect();
        let unique: HashSet<&str> = all.iter().copied().collect();
        assert_eq!(all.len(), unique.len());
    }

    #[test]
    fn replace_preserves_position_and_group() {
        let mut store = store_ab();
        let group = store.create_group("Sampler").id.clone();
        store.add_member(&group, "a");

        let replaced = store
            .replace_binding(
                "3",
                "a",
                "3.inputs.cfg",
                ControlParams::with_defaults(ControlType::Stepper),
            )
            .unwrap();
        assert_eq!(replaced.control_type(), ControlType::Stepper);
        assert_eq!(replaced.group_id.as_deref(), Some(group.as_str()));
        assert_eq!(order(&store), vec!["a", "b"]);
        assert_eq!(store.bindings()[0].node_path, "3.inputs.cfg");
    }

    #[test]
    fn replace_requires_matching_node() {
        let mut store = store_ab();
        let params = ControlParams::empty(ControlType::Prompt);
        assert!(store.replace_binding("4", "a", "4.inputs.x", params).is_none());
        assert_eq!(store.binding("a").unwrap().control_type(), ControlType::Seeder);
    }

    #[test]
    fn reorder_to_top() {
        let mut store = store_ab();
        assert!(store.reorder("b", Move::ToTop));
        assert_eq!(order(&store), vec!["b", "a"]);
    }

    #[test]
    fn reorder_at_boundaries_is_noop() {
        let mut store = store_ab();
        assert!(!store.reorder("a", Move::Up));
        assert!(!store.reorder("b", Move::Down));
        assert!(!store.reorder("missing", Move::Up));
        assert_eq!(order(&store), vec!["a", "b"]);
    }

    #[test]
    fn reorder_skips_grouped_bindings() {
        let mut store = store_ab();
        store.add_binding(seeder("5.inputs.seed").with_id(Some("c".into())));
        let group = store.create_group("G").id.clone();
        store.add_member(&group, "b");

        assert!(store.reorder("c", Move::Up));
        assert_eq!(order(&store), vec!["c", "b", "a"]);
        assert!(!store.reorder("b", Move::ToTop));
        assert!(!store.reorder("c", Move::Up));
    }

    #[test]
    fn delete_trims_group_membership() {
        let mut store = store_ab();
        let group = store.create_group("G").id.clone();
        store.add_member(&group, "a");
        store.add_member(&group, "b");

        let removed = store.delete("a").unwrap();
        assert_eq!(removed.id, "a");
        assert_eq!(store.group(&group).unwrap().member_order, vec!["b"]);

        store.delete("b");
        assert!(store.group(&group).unwrap().member_order.is_empty());
        assert!(store.delete("b").is_none());
    }

    #[test]
    fn clear_keeps_nodes() {
        let mut store = store_ab();
        store.set_nodes(
            NodeMap::from_workflow(&serde_json::json!({"3": {"class_type": "KSampler"}})).unwrap(),
        );
        store.create_group("G");
        store.clear();
        assert!(store.bindings().is_empty());
        assert!(store.groups().is_empty());
        assert_eq!(store.nodes().len(), 1);
    }
}
