use flowlink::bindings::BindingStore;
use flowlink::codec::{self, Document, LEGACY_GROUPS_KEY};
use flowlink::ids::SeededIds;
use flowlink::model::ControlType;
use serde_json::{json, Value};

fn document() -> Document {
    Document::from_value(json!({
        "id": "k3x9a",
        "name": "Portrait",
        "url": "k3x9a-portrait",
        "description": "Studio portraits",
        "prompts": [
            {"id": "prompt1", "label": "Prompt", "nodePath": "6.inputs.text"},
            {"id": "prompt2", "label": "Negative", "nodePath": "7.inputs.text"}
        ],
        "seeders": [
            {"id": "seeder1", "label": "Seed", "nodePath": "3.inputs.seed"}
        ],
        "groups": [
            {
                "id": "multiComponent1",
                "label": "Sampler",
                "steppers": [
                    {"id": "stepper1", "label": "Steps", "nodePath": "3.inputs.steps"},
                    {"id": "stepper2", "label": "CFG", "nodePath": "3.inputs.cfg"}
                ]
            }
        ]
    }))
    .unwrap()
}

fn reload(doc: &Document, lean: bool) -> Document {
    let mut store = BindingStore::with_ids(SeededIds::new(7));
    codec::decode(&mut store, doc);
    codec::encode(&mut store, lean)
}

#[test]
fn encoding_is_stable_across_reloads() {
    let first = reload(&document(), true);
    let second = reload(&first, true);
    assert_eq!(first, second);

    let full = reload(&document(), false);
    assert_eq!(reload(&full, false), full);
}

#[test]
fn ids_order_and_metadata_survive() {
    let doc = reload(&document(), true);

    let prompt_ids: Vec<&str> = doc
        .controls(ControlType::Prompt)
        .iter()
        .map(|p| p["id"].as_str().unwrap())
        .collect();
    assert_eq!(prompt_ids, vec!["prompt1", "prompt2"]);
    assert_eq!(doc.controls(ControlType::Seeder)[0]["nodePath"], "3.inputs.seed");
    assert!(doc.controls(ControlType::Stepper).is_empty());

    assert_eq!(doc.meta_str("url"), Some("k3x9a-portrait"));
    assert_eq!(doc.meta_str("description"), Some("Studio portraits"));

    let value = doc.into_value();
    let group = &value["groups"][0];
    assert_eq!(group["label"], "Sampler");
    assert_eq!(group["steppers"][0]["id"], "stepper1");
    assert_eq!(group["steppers"][1]["label"], "CFG");
}

#[test]
fn legacy_group_key_is_rewritten() {
    let mut value = document().into_value();
    let groups = value
        .as_object_mut()
        .unwrap()
        .remove("groups")
        .unwrap();
    value[LEGACY_GROUPS_KEY] = groups;

    let doc = reload(&Document::from_value(value).unwrap(), true);
    let value = doc.into_value();
    assert!(value.get(LEGACY_GROUPS_KEY).is_none());
    assert_eq!(value["groups"][0]["id"], "multiComponent1");
}

#[test]
fn store_state_matches_document() {
    let mut store = BindingStore::with_ids(SeededIds::new(7));
    codec::decode(&mut store, &document());

    assert_eq!(store.bindings().len(), 5);
    assert_eq!(store.ungrouped().count(), 3);
    let members: Vec<&str> = store
        .members("multiComponent1")
        .iter()
        .map(|b| b.id.as_str())
        .collect();
    assert_eq!(members, vec!["stepper1", "stepper2"]);
    assert_eq!(store.meta().name.as_deref(), Some("Portrait"));
    assert!(store.validate().is_ok());
}

#[test]
fn preview_replaces_identity_only() {
    let doc = reload(&document(), true).preview();
    assert_eq!(doc.meta_str("id"), Some("linker"));
    assert_eq!(doc.meta_str("name"), Some("Flow linker"));
    assert_eq!(doc.controls(ControlType::Prompt).len(), 2);
    let value: Value = serde_json::from_str(&doc.to_json(true).unwrap()).unwrap();
    assert_eq!(value["groups"][0]["steppers"][1]["id"], "stepper2");
}
