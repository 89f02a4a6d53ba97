//! # Config Codec
//!
//! Converts a [`BindingStore`] to and from the configuration [`Document`] the
//! rendering runtime consumes:
//!
//! ```json
//! {
//!   "id": "k3x9a", "name": "Portrait", "url": "k3x9a-portrait", "description": "Flow linker",
//!   "prompts": [{ "id": "promptAb12Cd", "label": "Prompt", "nodePath": "6.inputs.text" }],
//!   "steppers": [],
//!   "groups": [
//!     { "id": "multiComponentQ1w2E3", "label": "Sampler",
//!       "steppers": [{ "id": "stepperZz9Yy8", "label": "CFG", "nodePath": "3.inputs.cfg" }] }
//!   ]
//! }
//! ```
//!
//! Encoding is total and re-derives the whole document on every call. Decoding
//! never fails on bad entries: anything it cannot turn into a binding is
//! logged at debug level and skipped.

use crate::bindings::{BindingSpec, BindingStore};
use crate::controls::ControlParams;
use crate::error::{LinkerError, Result};
use crate::meta::FlowMeta;
use crate::model::{Binding, ControlType};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;
use tracing::{debug, trace};

pub const META_KEYS: [&str; 4] = ["id", "name", "url", "description"];
pub const GROUPS_KEY: &str = "groups";
/// Older documents used this key for groups.
pub const LEGACY_GROUPS_KEY: &str = "multiComponents";

const PLACEHOLDER: &str = "linker";
const PLACEHOLDER_DESCRIPTION: &str = "Flow linker";
const PREVIEW_NAME: &str = "Flow linker";
const PREVIEW_DESCRIPTION: &str = "Link your workflows.";

/// Output formatting options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Format {
    /// Drop control arrays that are empty.
    pub lean: bool,
    /// Single-line JSON instead of two-space indentation.
    pub compact: bool,
}

impl Default for Format {
    fn default() -> Self {
        Self {
            lean: true,
            compact: false,
        }
    }
}

/// A configuration document, kept as an ordered JSON object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document(Map<String, Value>);

impl Document {
    pub fn parse(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(value)
    }

    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            _ => Err(LinkerError::InvalidDocument(
                "document must be a JSON object".into(),
            )),
        }
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }

    pub fn meta_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// Top-level (ungrouped) controls of one type.
    pub fn controls(&self, ty: ControlType) -> &[Value] {
        match self.0.get(&ty.plural()) {
            Some(Value::Array(items)) => items.as_slice(),
            _ => &[],
        }
    }

    /// Group entries, read from `groups` or the legacy key.
    pub fn groups(&self) -> &[Value] {
        [GROUPS_KEY, LEGACY_GROUPS_KEY]
            .iter()
            .find_map(|key| match self.0.get(*key) {
                Some(Value::Array(items)) => Some(items.as_slice()),
                _ => None,
            })
            .unwrap_or(&[])
    }

    pub fn to_json(&self, compact: bool) -> Result<String> {
        let text = if compact {
            serde_json::to_string(&self.0)?
        } else {
            serde_json::to_string_pretty(&self.0)?
        };
        Ok(text)
    }

    /// A copy stamped with the fixed identity the preview runtime loads.
    pub fn preview(&self) -> Document {
        let mut map = self.0.clone();
        map.insert("id".into(), PLACEHOLDER.into());
        map.insert("url".into(), PLACEHOLDER.into());
        map.insert("name".into(), PREVIEW_NAME.into());
        map.insert("description".into(), PREVIEW_DESCRIPTION.into());
        Document(map)
    }
}

/// The JSON object for one binding: `id`, its params, then `nodePath`.
pub fn project(binding: &Binding) -> Map<String, Value> {
    let mut out = Map::new();
    out.insert("id".into(), Value::String(binding.id.clone()));
    binding.params.write_fields(&mut out);
    out.insert("nodePath".into(), Value::String(binding.node_path.clone()));
    out
}

/// Like [`project`], for a control listed at the top level of the document.
/// Whole-node controls there point at the node's inputs (`<nodeId>.inputs`).
fn project_top_level(binding: &Binding) -> Map<String, Value> {
    let mut out = project(binding);
    if binding.control_type().binds_whole_node() {
        out.insert(
            "nodePath".into(),
            Value::String(format!("{}.inputs", binding.node_id)),
        );
    }
    out
}

/// Renders the store as a document.
///
/// Every id appears once in the document. A binding whose id was already
/// emitted, or is held by a group, is renamed, and the new id is written back
/// to the store so the next encode produces the same document.
pub fn encode(store: &mut BindingStore, lean: bool) -> Document {
    let mut doc = Map::new();
    let meta = store.meta();
    doc.insert("id".into(), meta_value(&meta.id, PLACEHOLDER));
    doc.insert("name".into(), meta_value(&meta.name, PLACEHOLDER));
    doc.insert("url".into(), meta_value(&meta.url, PLACEHOLDER));
    doc.insert(
        "description".into(),
        meta_value(&meta.description, PLACEHOLDER_DESCRIPTION),
    );

    let mut claimed: HashSet<String> = store.groups().iter().map(|g| g.id.clone()).collect();
    let mut arrays: IndexMap<ControlType, Vec<Value>> =
        ControlType::ALL.iter().map(|ty| (*ty, Vec::new())).collect();

    let ungrouped: Vec<usize> = store
        .bindings()
        .iter()
        .enumerate()
        .filter(|(_, b)| !b.is_grouped())
        .map(|(i, _)| i)
        .collect();
    for index in ungrouped {
        if let Some(binding) = claim(store, index, &mut claimed) {
            let ty = binding.control_type();
            arrays
                .entry(ty)
                .or_default()
                .push(Value::Object(project_top_level(binding)));
        }
    }

    for (ty, entries) in arrays {
        if lean && entries.is_empty() {
            continue;
        }
        doc.insert(ty.plural(), Value::Array(entries));
    }

    let groups = encode_groups(store, &mut claimed);
    if !groups.is_empty() {
        doc.insert(GROUPS_KEY.into(), Value::Array(groups));
    }

    Document(doc)
}

fn encode_groups(store: &mut BindingStore, claimed: &mut HashSet<String>) -> Vec<Value> {
    let group_ids: Vec<String> = store.groups().iter().map(|g| g.id.clone()).collect();
    let mut out = Vec::with_capacity(group_ids.len());

    for group_id in group_ids {
        let Some(group) = store.group(&group_id) else {
            continue;
        };
        let label = group.label.clone();
        let member_indexes: Vec<usize> = group
            .member_order
            .iter()
            .filter_map(|id| store.bindings().iter().position(|b| &b.id == id))
            .collect();

        let mut arrays: IndexMap<ControlType, Vec<Value>> = IndexMap::new();
        for index in member_indexes {
            if let Some(binding) = claim(store, index, claimed) {
                arrays
                    .entry(binding.control_type())
                    .or_default()
                    .push(Value::Object(project(binding)));
            }
        }

        let mut entry = Map::new();
        entry.insert("id".into(), Value::String(group_id));
        entry.insert("label".into(), Value::String(label));
        for ty in ControlType::ALL {
            if let Some(items) = arrays.shift_remove(&ty) {
                entry.insert(ty.plural(), Value::Array(items));
            }
        }
        out.push(Value::Object(entry));
    }
    out
}

/// Reserves the binding's id in `claimed`, renaming the binding when the id
/// is already claimed.
fn claim<'a>(
    store: &'a mut BindingStore,
    index: usize,
    claimed: &mut HashSet<String>,
) -> Option<&'a Binding> {
    let current = store.bindings().get(index)?.id.clone();
    let unique = store.unique_id(&current, |c| claimed.contains(c));
    if unique != current {
        store.rename_at(index, &unique);
    }
    claimed.insert(unique);
    store.bindings().get(index)
}

fn meta_value(value: &Option<String>, placeholder: &str) -> Value {
    let text = value
        .as_deref()
        .filter(|v| !v.is_empty())
        .unwrap_or(placeholder);
    Value::String(text.to_string())
}

/// Replaces the store's contents with the document's. The node map is kept.
pub fn decode(store: &mut BindingStore, doc: &Document) {
    store.clear();
    store.set_meta(decode_meta(doc));

    for (key, value) in doc.as_map() {
        if META_KEYS.contains(&key.as_str()) || key == GROUPS_KEY || key == LEGACY_GROUPS_KEY {
            continue;
        }
        let Some(ty) = ControlType::from_plural(key) else {
            trace!(key = %key, "ignoring unknown document key");
            continue;
        };
        let Value::Array(entries) = value else {
            debug!(key = %key, "skipping control list that is not an array");
            continue;
        };
        for entry in entries {
            decode_binding(store, ty, entry);
        }
    }

    for entry in doc.groups() {
        decode_group(store, entry);
    }
}

fn decode_meta(doc: &Document) -> FlowMeta {
    // Placeholders stand for "unset" only in a document written without an id.
    let unset = doc.meta_str("id").is_some_and(|id| id == PLACEHOLDER);
    let field = |key: &str, placeholder: &str| {
        doc.meta_str(key)
            .filter(|v| !v.is_empty() && !(unset && *v == placeholder))
            .map(str::to_string)
    };
    FlowMeta {
        id: field("id", PLACEHOLDER),
        name: field("name", PLACEHOLDER),
        url: field("url", PLACEHOLDER),
        description: field("description", PLACEHOLDER_DESCRIPTION),
    }
}

/// Adds one serialized control as an ungrouped binding and returns its
/// final id.
fn decode_binding(store: &mut BindingStore, ty: ControlType, entry: &Value) -> Option<String> {
    let Some(fields) = entry.as_object() else {
        debug!(control_type = %ty, "dropping control that is not an object");
        return None;
    };
    let Some(node_path) = fields.get("nodePath").and_then(Value::as_str) else {
        debug!(control_type = %ty, "dropping control without nodePath");
        return None;
    };
    let params = ControlParams::read_fields(ty, fields);
    let Some(spec) = BindingSpec::for_path(node_path, params) else {
        debug!(control_type = %ty, node_path, "dropping control with malformed nodePath");
        return None;
    };
    let id = fields
        .get("id")
        .and_then(Value::as_str)
        .map(str::to_string);
    Some(store.add_binding(spec.with_id(id)).id.clone())
}

fn decode_group(store: &mut BindingStore, entry: &Value) {
    let Some(fields) = entry.as_object() else {
        debug!("dropping group that is not an object");
        return;
    };

    let mut members = Vec::new();
    for (key, value) in fields {
        if key == "id" || key == "label" {
            continue;
        }
        let Some(ty) = ControlType::from_plural(key) else {
            trace!(key = %key, "ignoring unknown group key");
            continue;
        };
        let entries = match value {
            Value::Array(items) => items.iter().collect::<Vec<_>>(),
            Value::Object(_) => vec![value],
            _ => continue,
        };
        members.extend(
            entries
                .into_iter()
                .filter_map(|item| decode_binding(store, ty, item)),
        );
    }

    let label = fields
        .get("label")
        .and_then(Value::as_str)
        .unwrap_or_default();
    let group_id = store.restore_group(fields.get("id").and_then(Value::as_str), label);
    for member in members {
        store.add_member(&group_id, &member);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::testing::ScriptedIds;
    use crate::ids::SeededIds;
    use crate::model::Move;
    use serde_json::json;

    fn doc(value: Value) -> Document {
        Document::from_value(value).unwrap()
    }

    fn labelled(ty: ControlType, label: &str) -> ControlParams {
        let mut params = ControlParams::empty(ty);
        params.merge(json!({"label": label}).as_object().unwrap());
        params
    }

    fn add(store: &mut BindingStore, id: &str, path: &str, params: ControlParams) {
        let spec = BindingSpec::for_path(path, params)
            .unwrap()
            .with_id(Some(id.into()));
        store.add_binding(spec);
    }

    fn ids_of(value: &Value) -> Vec<&str> {
        value
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["id"].as_str().unwrap())
            .collect()
    }

    #[test]
    fn empty_store_encodes_placeholders_and_every_array() {
        let mut store = BindingStore::with_ids(SeededIds::new(1));
        let full = encode(&mut store, false);
        assert_eq!(full.meta_str("id"), Some("linker"));
        assert_eq!(full.meta_str("name"), Some("linker"));
        assert_eq!(full.meta_str("url"), Some("linker"));
        assert_eq!(full.meta_str("description"), Some("Flow linker"));
        for ty in ControlType::ALL {
            assert_eq!(full.as_map()[&ty.plural()], json!([]));
        }
        assert!(!full.as_map().contains_key("groups"));

        let lean = encode(&mut store, true);
        let keys: Vec<&str> = lean.as_map().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["id", "name", "url", "description"]);
    }

    #[test]
    fn reordered_bindings_encode_in_list_order() {
        let mut store = BindingStore::with_ids(SeededIds::new(1));
        add(&mut store, "a", "3.inputs.seed", ControlParams::empty(ControlType::Seeder));
        add(&mut store, "b", "3.inputs.steps", ControlParams::empty(ControlType::Seeder));
        store.reorder("b", Move::ToTop);

        let doc = encode(&mut store, true);
        assert_eq!(ids_of(&doc.as_map()["seeders"]), vec!["b", "a"]);
    }

    #[test]
    fn projection_puts_id_first_and_node_path_last() {
        let mut store = BindingStore::with_ids(SeededIds::new(1));
        add(&mut store, "s", "3.inputs.cfg", ControlParams::with_defaults(ControlType::Stepper));
        let doc = encode(&mut store, true);
        let entry = doc.as_map()["steppers"][0].as_object().unwrap();
        let keys: Vec<&str> = entry.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec!["id", "minValue", "maxValue", "step", "defValue", "precision", "scaleFactor", "nodePath"]
        );
    }

    #[test]
    fn dimension_selector_targets_whole_node() {
        let mut store = BindingStore::with_ids(SeededIds::new(1));
        add(
            &mut store,
            "d",
            "5.inputs.width",
            ControlParams::empty(ControlType::DimensionSelector),
        );
        let doc = encode(&mut store, true);
        assert_eq!(doc.as_map()["dimensionSelectors"][0]["nodePath"], "5.inputs");
        assert_eq!(store.binding("d").unwrap().node_path, "5.inputs.width");
    }

    #[test]
    fn grouped_dimension_selector_keeps_input_path() {
        let mut store = BindingStore::with_ids(SeededIds::new(1));
        add(
            &mut store,
            "d",
            "5.inputs.width",
            ControlParams::empty(ControlType::DimensionSelector),
        );
        let g = store.create_group("Size").id.clone();
        store.add_member(&g, "d");

        let doc = encode(&mut store, true);
        let group = &doc.as_map()["groups"][0];
        assert_eq!(group["dimensionSelectors"][0]["nodePath"], "5.inputs.width");
    }

    #[test]
    fn groups_are_emitted_with_members_in_order() {
        let mut store = BindingStore::with_ids(SeededIds::new(1));
        add(&mut store, "p", "6.inputs.text", labelled(ControlType::Prompt, "Prompt"));
        add(&mut store, "s1", "3.inputs.cfg", labelled(ControlType::Stepper, "CFG"));
        add(&mut store, "s2", "3.inputs.steps", labelled(ControlType::Stepper, "Steps"));
        let g = store.create_group("Sampler").id.clone();
        store.add_member(&g, "s2");
        store.add_member(&g, "s1");

        let doc = encode(&mut store, true);
        assert!(!doc.as_map().contains_key("steppers"));
        let group = &doc.as_map()["groups"][0];
        assert_eq!(group["id"], json!(g));
        assert_eq!(group["label"], "Sampler");
        assert_eq!(ids_of(&group["steppers"]), vec!["s2", "s1"]);
        assert_eq!(ids_of(&doc.as_map()["prompts"]), vec!["p"]);
    }

    #[test]
    fn decode_reads_stepper_scenario() {
        let mut store = BindingStore::with_ids(SeededIds::new(1));
        decode(
            &mut store,
            &doc(json!({"steppers": [{"id": "x", "nodePath": "7.inputs.cfg", "label": "CFG"}]})),
        );
        assert_eq!(store.bindings().len(), 1);
        let binding = &store.bindings()[0];
        assert_eq!(binding.id, "x");
        assert_eq!(binding.node_id, "7");
        assert_eq!(binding.control_type(), ControlType::Stepper);
        assert_eq!(binding.params.label(), Some("CFG"));
        assert!(!binding.is_grouped());
    }

    #[test]
    fn decode_drops_malformed_entries() {
        let mut store = BindingStore::with_ids(SeededIds::new(1));
        decode(
            &mut store,
            &doc(json!({
                "prompts": [
                    {"id": "bad", "nodePath": "abc.inputs.x"},
                    {"id": "missing"},
                    "not an object",
                    {"id": "ok", "nodePath": "2.inputs.text", "label": 7}
                ],
                "widgets": [{"id": "w", "nodePath": "1.inputs.x"}],
                "toggles": {"id": "t", "nodePath": "1.inputs.x"}
            })),
        );
        let ids: Vec<&str> = store.bindings().iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["ok"]);
    }

    #[test]
    fn decode_drops_wrong_typed_fields_individually() {
        let mut store = BindingStore::with_ids(SeededIds::new(1));
        decode(
            &mut store,
            &doc(json!({"steppers": [{
                "id": "s", "nodePath": "3.inputs.cfg", "label": "CFG",
                "minValue": [1], "maxValue": 20, "step": null
            }]})),
        );
        let doc = encode(&mut store, true);
        assert_eq!(
            doc.as_map()["steppers"][0],
            json!({"id": "s", "label": "CFG", "maxValue": 20, "nodePath": "3.inputs.cfg"})
        );
    }

    #[test]
    fn decode_accepts_legacy_groups_and_single_objects() {
        let mut store = BindingStore::with_ids(SeededIds::new(1));
        decode(
            &mut store,
            &doc(json!({
                "multiComponents": [{
                    "id": "mc1",
                    "label": "Size",
                    "dimensionSelectors": {"id": "d", "nodePath": "5.inputs"},
                    "steppers": [{"id": "s", "nodePath": "3.inputs.cfg"}]
                }]
            })),
        );
        let group = store.group("mc1").unwrap();
        assert_eq!(group.label, "Size");
        assert_eq!(group.member_order, vec!["d", "s"]);
        assert_eq!(store.binding("d").unwrap().group_id.as_deref(), Some("mc1"));
    }

    #[test]
    fn decode_resolves_colliding_ids() {
        let mut store = BindingStore::with_ids(ScriptedIds::new(&["r4nd0m"]));
        decode(
            &mut store,
            &doc(json!({
                "prompts": [{"id": "x", "nodePath": "1.inputs.a"}],
                "seeders": [{"id": "x", "nodePath": "1.inputs.b"}]
            })),
        );
        let ids: Vec<&str> = store.bindings().iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, vec!["x", "x_r4nd0m"]);
    }

    #[test]
    fn decoded_group_does_not_reuse_binding_id() {
        let mut store = BindingStore::with_ids(ScriptedIds::new(&["g7h8j9"]));
        decode(
            &mut store,
            &doc(json!({
                "seeders": [{"id": "x", "nodePath": "3.inputs.seed"}],
                "groups": [{
                    "id": "x",
                    "label": "G",
                    "prompts": [{"id": "p", "nodePath": "6.inputs.text"}]
                }]
            })),
        );
        assert!(store.binding("x").is_some());
        assert!(store.group("x").is_none());
        let group = store.group("x_g7h8j9").unwrap();
        assert_eq!(group.member_order, vec!["p"]);
        assert_eq!(store.binding("p").unwrap().group_id.as_deref(), Some("x_g7h8j9"));

        let encoded = encode(&mut store, true);
        let value = encoded.into_value();
        assert_eq!(value["seeders"][0]["id"], "x");
        assert_eq!(value["groups"][0]["id"], "x_g7h8j9");
        assert_eq!(value["groups"][0]["prompts"][0]["id"], "p");
    }

    #[test]
    fn encode_renames_binding_holding_a_group_id() {
        let mut store = BindingStore::with_ids(ScriptedIds::new(&["q1w2e3"]));
        let g = store.create_group("Sampler").id.clone();
        add(&mut store, "s", "3.inputs.seed", ControlParams::empty(ControlType::Seeder));
        store.rename_at(0, &g);

        let doc = encode(&mut store, true);
        let seeder_id = doc.as_map()["seeders"][0]["id"].as_str().unwrap().to_string();
        assert_ne!(seeder_id, g);
        assert_eq!(doc.as_map()["groups"][0]["id"], json!(g));
        assert_eq!(store.bindings()[0].id, seeder_id);
        assert_eq!(encode(&mut store, true), doc);
    }

    #[test]
    fn duplicate_ids_across_group_and_top_level_are_renamed() {
        let mut store = BindingStore::with_ids(ScriptedIds::new(&["g00001", "z9y8x7"]));
        add(&mut store, "a", "3.inputs.seed", ControlParams::empty(ControlType::Seeder));
        add(&mut store, "b", "3.inputs.cfg", ControlParams::empty(ControlType::Stepper));
        let g = store.create_group("Sampler").id.clone();
        store.add_member(&g, "b");
        store.rename_at(1, "a");

        let doc = encode(&mut store, true);
        let value = doc.into_value();
        assert_eq!(value["seeders"][0]["id"], "a");
        assert_eq!(value["groups"][0]["steppers"][0]["id"], "a_z9y8x7");
        assert_eq!(store.group(&g).unwrap().member_order, vec!["a_z9y8x7"]);
    }

    #[test]
    fn placeholder_metadata_decodes_as_unset() {
        let mut store = BindingStore::with_ids(SeededIds::new(1));
        let encoded = encode(&mut store, true);
        decode(&mut store, &encoded);
        assert_eq!(store.meta(), &FlowMeta::default());

        decode(
            &mut store,
            &doc(json!({"id": "k3x9a", "name": "Portrait", "url": "k3x9a-portrait", "description": "d"})),
        );
        assert_eq!(store.meta().url.as_deref(), Some("k3x9a-portrait"));
        assert_eq!(store.meta().description.as_deref(), Some("d"));
    }

    #[test]
    fn placeholder_values_are_real_when_flow_has_an_id() {
        let mut store = BindingStore::with_ids(SeededIds::new(1));
        decode(
            &mut store,
            &doc(json!({
                "id": "k3x9a", "name": "linker", "url": "k3x9a-linker", "description": "Flow linker"
            })),
        );
        assert_eq!(store.meta().name.as_deref(), Some("linker"));
        assert_eq!(store.meta().description.as_deref(), Some("Flow linker"));
    }

    #[test]
    fn round_trip_preserves_bindings_and_groups() {
        let mut store = BindingStore::with_ids(SeededIds::new(9));
        store.set_flow_name("Portrait");
        add(&mut store, "p", "6.inputs.text", labelled(ControlType::Prompt, "Prompt"));
        add(&mut store, "t", "3.inputs.denoise", ControlParams::with_defaults(ControlType::Toggle));
        add(&mut store, "s1", "3.inputs.cfg", ControlParams::with_defaults(ControlType::Stepper));
        add(&mut store, "s2", "3.inputs.steps", labelled(ControlType::Stepper, "Steps"));
        let g = store.create_group("Sampler").id.clone();
        store.add_member(&g, "s2");
        store.add_member(&g, "s1");
        store.create_group("Empty");

        let first = encode(&mut store, false);
        let mut restored = BindingStore::with_ids(SeededIds::new(10));
        decode(&mut restored, &first);

        assert_eq!(restored.meta(), store.meta());
        assert_eq!(restored.groups(), store.groups());
        for binding in store.bindings() {
            assert_eq!(restored.binding(&binding.id), Some(binding));
        }
        assert_eq!(encode(&mut restored, false), first);
    }

    #[test]
    fn preview_stamps_fixed_identity() {
        let original = doc(json!({"id": "k3x9a", "name": "Portrait", "prompts": []}));
        let preview = original.preview();
        assert_eq!(preview.meta_str("id"), Some("linker"));
        assert_eq!(preview.meta_str("url"), Some("linker"));
        assert_eq!(preview.meta_str("name"), Some("Flow linker"));
        assert_eq!(preview.meta_str("description"), Some("Link your workflows."));
        assert_eq!(preview.as_map()["prompts"], json!([]));
        assert_eq!(original.meta_str("id"), Some("k3x9a"));
    }

    #[test]
    fn compact_and_pretty_differ_only_in_whitespace() {
        let d = doc(json!({"id": "linker", "prompts": []}));
        assert_eq!(d.to_json(true).unwrap(), r#"{"id":"linker","prompts":[]}"#);
        assert!(d.to_json(false).unwrap().contains("\n  \"id\""));
        assert!(Document::parse("[1]").is_err());
    }
}
