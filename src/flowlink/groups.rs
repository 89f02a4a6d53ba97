//! Group (multi-component) operations on [`BindingStore`].
//!
//! A binding belongs to at most one group. Membership is recorded on both
//! sides, `binding.group_id` and `group.member_order`, and every method here
//! updates both or neither.

use crate::bindings::BindingStore;
use crate::error::{LinkerError, Result};
use crate::ids::GROUP_PREFIX;
use crate::model::{apply_move, Binding, Group, Move};
use tracing::{debug, trace};

impl BindingStore {
    /// Creates an empty group with a fresh id.
    pub fn create_group(&mut self, label: impl Into<String>) -> &Group {
        let id = self.allocate_id(GROUP_PREFIX);
        let index = self.groups.len();
        self.groups.push(Group::new(id, label.into()));
        &self.groups[index]
    }

    /// Recreates a group read from a document, keeping its id unless taken.
    pub(crate) fn restore_group(&mut self, id: Option<&str>, label: impl Into<String>) -> String {
        let id = match id.filter(|id| !id.is_empty()) {
            Some(requested) => self.fresh_id(requested),
            None => self.allocate_id(GROUP_PREFIX),
        };
        self.groups.push(Group::new(id.clone(), label.into()));
        id
    }

    /// Adds an ungrouped binding to the end of a group. Returns false if
    /// either id is unknown or the binding is already in a group.
    pub fn add_member(&mut self, group_id: &str, binding_id: &str) -> bool {
        let Some(group_index) = self.groups.iter().position(|g| g.id == group_id) else {
            trace!(group_id, "add_member ignored: no such group");
            return false;
        };
        let Some(binding) = self.bindings.iter_mut().find(|b| b.id == binding_id) else {
            trace!(binding_id, "add_member ignored: no such binding");
            return false;
        };
        if let Some(current) = &binding.group_id {
            trace!(binding_id, current = %current, "add_member ignored: already grouped");
            return false;
        }

        binding.group_id = Some(group_id.to_string());
        self.groups[group_index]
            .member_order
            .push(binding_id.to_string());
        true
    }

    /// Takes a binding out of a group. The binding stays in the store.
    pub fn remove_member(&mut self, group_id: &str, binding_id: &str) -> bool {
        let Some(group) = self.groups.iter_mut().find(|g| g.id == group_id) else {
            return false;
        };
        let before = group.member_order.len();
        group.member_order.retain(|m| m != binding_id);
        if group.member_order.len() == before {
            trace!(group_id, binding_id, "remove_member ignored: not a member");
            return false;
        }
        if let Some(binding) = self.bindings.iter_mut().find(|b| b.id == binding_id) {
            binding.group_id = None;
        }
        true
    }

    /// Deletes a group, leaving its former members ungrouped.
    pub fn delete_group(&mut self, group_id: &str) -> Option<Group> {
        let index = self.groups.iter().position(|g| g.id == group_id)?;
        let group = self.groups.remove(index);
        for binding in self
            .bindings
            .iter_mut()
            .filter(|b| b.group_id.as_deref() == Some(group_id))
        {
            binding.group_id = None;
        }
        debug!(group_id, members = group.member_order.len(), "deleted group");
        Some(group)
    }

    /// Sets a group's label. Empty labels are accepted here and rejected by
    /// [`BindingStore::validate`].
    pub fn rename_group(&mut self, group_id: &str, label: impl Into<String>) -> bool {
        match self.groups.iter_mut().find(|g| g.id == group_id) {
            Some(group) => {
                group.label = label.into();
                true
            }
            None => false,
        }
    }

    pub fn move_group(&mut self, group_id: &str, mv: Move) -> bool {
        match self.groups.iter().position(|g| g.id == group_id) {
            Some(index) => apply_move(&mut self.groups, index, mv),
            None => false,
        }
    }

    pub fn reorder_member(&mut self, group_id: &str, binding_id: &str, mv: Move) -> bool {
        let Some(group) = self.groups.iter_mut().find(|g| g.id == group_id) else {
            return false;
        };
        match group.member_order.iter().position(|m| m == binding_id) {
            Some(index) => apply_move(&mut group.member_order, index, mv),
            None => false,
        }
    }

    /// Deletes a member binding from the store altogether.
    pub fn delete_member(&mut self, group_id: &str, binding_id: &str) -> Option<Binding> {
        let is_member = self.group(group_id).is_some_and(|g| g.contains(binding_id));
        if !is_member {
            trace!(group_id, binding_id, "delete_member ignored: not a member");
            return None;
        }
        self.delete(binding_id)
    }

    /// Members of a group in presentation order. Ids without a binding are
    /// skipped.
    pub fn members(&self, group_id: &str) -> Vec<&Binding> {
        self.group(group_id)
            .map(|group| {
                group
                    .member_order
                    .iter()
                    .filter_map(|id| self.binding(id))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Checks that the store can be persisted.
    pub fn validate(&self) -> Result<()> {
        match self.groups.iter().find(|g| g.label.trim().is_empty()) {
            Some(group) => Err(LinkerError::EmptyGroupLabel {
                group_id: group.id.clone(),
            }),
            None => Ok(()),
        }
    }

    pub(crate) fn detach_from_groups(&mut self, binding_id: &str) {
        for group in &mut self.groups {
            group.member_order.retain(|m| m != binding_id);
        }
    }
}
