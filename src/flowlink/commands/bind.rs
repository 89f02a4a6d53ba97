use crate::bindings::{BindingSpec, BindingStore};
use crate::commands::{CmdMessage, CmdResult};
use crate::controls::ControlParams;
use crate::error::Result;
use crate::model::{node_id_from_path, ControlType};
use crate::store::FlowStore;
use serde_json::{Map, Value};

use super::helpers::{find_binding, load_session, save_session};

/// A new control for one input.
#[derive(Debug, Clone)]
pub struct BindRequest {
    pub node_path: String,
    pub control_type: ControlType,
    pub label: Option<String>,
    /// Extra parameter fields, by their document names (`minValue`, `key`, ...).
    pub fields: Map<String, Value>,
}

/// Changes to an existing binding. Unset parts are kept.
#[derive(Debug, Clone, Default)]
pub struct EditRequest {
    pub control_type: Option<ControlType>,
    pub node_path: Option<String>,
    pub label: Option<String>,
    pub fields: Map<String, Value>,
}

pub fn add<S: FlowStore>(store: &mut S, request: BindRequest) -> Result<CmdResult> {
    let mut session = load_session(store)?;
    let mut result = CmdResult::default();

    let Some(node_id) = node_id_from_path(&request.node_path).map(str::to_string) else {
        result.add_message(CmdMessage::error(format!(
            "Invalid node path: {} (expected <nodeId>.inputs.<input>)",
            request.node_path
        )));
        return Ok(result);
    };

    let mut params = ControlParams::with_defaults(request.control_type);
    params.merge(&overrides(request.control_type, request.label, request.fields));
    let mut spec = BindingSpec::new(node_id, request.node_path, params);
    describe_target(&session, &mut spec, &mut result);

    let binding = session.add_binding(spec).clone();
    save_session(store, &mut session)?;

    result.add_message(CmdMessage::success(format!(
        "Bound {} as {} ({})",
        binding.node_path,
        binding.control_type(),
        binding.id
    )));
    Ok(result.with_affected_bindings(vec![binding]))
}

pub fn edit<S: FlowStore>(store: &mut S, id: &str, request: EditRequest) -> Result<CmdResult> {
    let mut session = load_session(store)?;
    let existing = find_binding(&session, id)?;
    let mut result = CmdResult::default();

    let node_path = request
        .node_path
        .unwrap_or_else(|| existing.node_path.clone());
    if node_id_from_path(&node_path) != Some(existing.node_id.as_str()) {
        result.add_message(CmdMessage::error(format!(
            "{} must stay on node {}; unbind it and bind {} instead",
            id, existing.node_id, node_path
        )));
        return Ok(result);
    }

    let ty = request.control_type.unwrap_or(existing.control_type());
    let mut params = existing.params.convert(ty);
    params.merge(&overrides(ty, request.label, request.fields));
    if let Some(node) = session.nodes().get(&existing.node_id) {
        let input = input_name(&node_path);
        params.enrich_dropdown(input, &node.class_type);
    }

    let updated = session
        .replace_binding(&existing.node_id, id, node_path, params)
        .cloned();
    save_session(store, &mut session)?;

    if let Some(binding) = updated {
        result.add_message(CmdMessage::success(format!(
            "Updated {} ({})",
            binding.display_name(),
            binding.control_type()
        )));
        result.affected_bindings.push(binding);
    }
    Ok(result)
}

/// Label and field overrides as one field map. Data components keep their
/// label under `name`.
fn overrides(ty: ControlType, label: Option<String>, fields: Map<String, Value>) -> Map<String, Value> {
    let mut out = Map::new();
    if let Some(label) = label {
        let key = if ty == ControlType::DataComponent {
            "name"
        } else {
            "label"
        };
        out.insert(key.to_string(), Value::String(label));
    }
    out.extend(fields);
    out
}

fn input_name(node_path: &str) -> &str {
    node_path.rsplit('.').next().unwrap_or(node_path)
}

/// Checks the target against the imported graph and fills in what the node
/// implies.
fn describe_target(session: &BindingStore, spec: &mut BindingSpec, result: &mut CmdResult) {
    let nodes = session.nodes();
    if let Some(bound) = session.bindings().iter().find(|b| b.node_path == spec.node_path) {
        result.add_message(CmdMessage::warning(format!(
            "{} is already bound by {}",
            spec.node_path, bound.id
        )));
    }
    if nodes.is_empty() {
        return;
    }
    match nodes.get(&spec.node_id) {
        Some(node) => {
            let whole_node = spec.params.control_type().binds_whole_node();
            if !whole_node && !nodes.has_input_path(&spec.node_path) {
                result.add_message(CmdMessage::warning(format!(
                    "Node {} ({}) has no input {}",
                    spec.node_id,
                    node.class_type,
                    input_name(&spec.node_path)
                )));
            }
            let input = input_name(&spec.node_path).to_string();
            spec.params.enrich_dropdown(&input, &node.class_type);
        }
        None => result.add_message(CmdMessage::warning(format!(
            "Node {} is not in the imported graph",
            spec.node_id
        ))),
    }
}
