use crate::bindings::BindingStore;
use crate::commands::{CmdMessage, CmdResult, GroupListing};
use crate::error::Result;
use crate::model::Move;
use crate::store::FlowStore;

use super::helpers::{load_session, resolve_group, save_session};

#[derive(Debug, Clone)]
pub enum GroupAction {
    Create { label: String, members: Vec<String> },
    Add { group: String, members: Vec<String> },
    /// Takes members out of the group; with `delete`, removes them entirely.
    Remove { group: String, members: Vec<String>, delete: bool },
    Delete { group: String },
    Rename { group: String, label: String },
    Move { group: String, mv: Move },
    Order { group: String, member: String, mv: Move },
}

pub fn run<S: FlowStore>(store: &mut S, action: GroupAction) -> Result<CmdResult> {
    let mut session = load_session(store)?;
    let mut result = CmdResult::default();

    let changed = match action {
        GroupAction::Create { label, members } => {
            let group_id = session.create_group(label.trim()).id.clone();
            result.add_message(CmdMessage::success(format!("Created group {}", group_id)));
            add_members(&mut session, &group_id, &members, &mut result);
            list_group(&session, &group_id, &mut result);
            true
        }
        GroupAction::Add { group, members } => {
            let group_id = resolve_group(&session, &group)?;
            let added = add_members(&mut session, &group_id, &members, &mut result);
            list_group(&session, &group_id, &mut result);
            added
        }
        GroupAction::Remove {
            group,
            members,
            delete,
        } => {
            let group_id = resolve_group(&session, &group)?;
            let mut changed = false;
            for member in &members {
                let done = if delete {
                    match session.delete_member(&group_id, member) {
                        Some(binding) => {
                            result.affected_bindings.push(binding);
                            true
                        }
                        None => false,
                    }
                } else {
                    session.remove_member(&group_id, member)
                };
                if done {
                    let verb = if delete { "Deleted" } else { "Removed" };
                    result.add_message(CmdMessage::success(format!("{} {}", verb, member)));
                    changed = true;
                } else {
                    result.add_message(CmdMessage::warning(format!(
                        "{} is not a member of {}",
                        member, group_id
                    )));
                }
            }
            list_group(&session, &group_id, &mut result);
            changed
        }
        GroupAction::Delete { group } => {
            let group_id = resolve_group(&session, &group)?;
            let removed = session.delete_group(&group_id);
            if let Some(group) = &removed {
                result.add_message(CmdMessage::success(format!(
                    "Deleted group {} ({} bindings ungrouped)",
                    group.label,
                    group.member_order.len()
                )));
            }
            removed.is_some()
        }
        GroupAction::Rename { group, label } => {
            let group_id = resolve_group(&session, &group)?;
            let renamed = session.rename_group(&group_id, label.trim());
            result.add_message(CmdMessage::success(format!("Renamed {}", group_id)));
            renamed
        }
        GroupAction::Move { group, mv } => {
            let group_id = resolve_group(&session, &group)?;
            let moved = session.move_group(&group_id, mv);
            report_move(&group_id, mv, moved, &mut result);
            moved
        }
        GroupAction::Order { group, member, mv } => {
            let group_id = resolve_group(&session, &group)?;
            let moved = session.reorder_member(&group_id, &member, mv);
            report_move(&member, mv, moved, &mut result);
            list_group(&session, &group_id, &mut result);
            moved
        }
    };

    if changed {
        save_session(store, &mut session)?;
    }
    Ok(result)
}

fn add_members(
    session: &mut BindingStore,
    group_id: &str,
    members: &[String],
    result: &mut CmdResult,
) -> bool {
    let mut added = false;
    for member in members {
        if session.add_member(group_id, member) {
            added = true;
            continue;
        }
        let reason = match session.binding(member).and_then(|b| b.group_id.as_deref()) {
            Some(current) => format!("{} is already in group {}", member, current),
            None if session.binding(member).is_some() => format!("{} was not added", member),
            None => format!("No binding with id {}", member),
        };
        result.add_message(CmdMessage::warning(reason));
    }
    added
}

fn list_group(session: &BindingStore, group_id: &str, result: &mut CmdResult) {
    if let Some(group) = session.group(group_id) {
        result.listed_groups.push(GroupListing {
            group: group.clone(),
            members: session.members(group_id).into_iter().cloned().collect(),
        });
    }
}

fn report_move(id: &str, mv: Move, moved: bool, result: &mut CmdResult) {
    let message = if moved {
        CmdMessage::success(format!("Moved {} {}", id, mv))
    } else {
        CmdMessage::info(format!("{} cannot move {}", id, mv))
    };
    result.add_message(message);
}
