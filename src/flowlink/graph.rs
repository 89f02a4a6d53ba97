//! # Graph Import
//!
//! Normalizes an exported workflow (API format) into a [`NodeMap`]:
//!
//! ```json
//! {
//!   "3": { "class_type": "KSampler", "inputs": { "seed": 42, "model": ["4", 0] } },
//!   "4": { "class_type": "CheckpointLoaderSimple", "inputs": { "ckpt_name": "sd.safetensors" } }
//! }
//! ```
//!
//! Entries without a `class_type` are not nodes and are skipped. Node order
//! follows the source document.

use crate::error::{LinkerError, Result};
use crate::model::{input_path, NodeId};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeInfo {
    pub class_type: String,
    #[serde(default = "default_count")]
    pub count: u64,
    #[serde(default)]
    pub inputs: Map<String, Value>,
    /// Input name to `<nodeId>.inputs.<name>`.
    #[serde(default)]
    pub input_paths: IndexMap<String, String>,
}

fn default_count() -> u64 {
    1
}

impl NodeInfo {
    /// Inputs wired to another node's output (`["4", 0]`) rather than holding a value.
    pub fn is_linked(&self, input: &str) -> bool {
        matches!(self.inputs.get(input), Some(Value::Array(link)) if link.len() == 2)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeMap(IndexMap<NodeId, NodeInfo>);

impl NodeMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parse(text: &str) -> Result<Self> {
        let workflow: Value = serde_json::from_str(text)?;
        Self::from_workflow(&workflow)
    }

    pub fn from_workflow(workflow: &Value) -> Result<Self> {
        let nodes = workflow.as_object().ok_or_else(|| {
            LinkerError::InvalidGraph("workflow must be a JSON object keyed by node id".into())
        })?;

        let mut map = IndexMap::new();
        for (node_id, data) in nodes {
            let Some(class_type) = data
                .get("class_type")
                .and_then(Value::as_str)
                .filter(|c| !c.is_empty())
            else {
                continue;
            };

            let inputs = data
                .get("inputs")
                .and_then(Value::as_object)
                .cloned()
                .unwrap_or_default();
            let input_paths = inputs
                .keys()
                .map(|name| (name.clone(), input_path(node_id, name)))
                .collect();

            map.insert(
                node_id.clone(),
                NodeInfo {
                    class_type: class_type.to_string(),
                    count: data.get("count").and_then(Value::as_u64).unwrap_or(1),
                    inputs,
                    input_paths,
                },
            );
        }
        Ok(Self(map))
    }

    pub fn get(&self, node_id: &str) -> Option<&NodeInfo> {
        self.0.get(node_id)
    }

    pub fn contains(&self, node_id: &str) -> bool {
        self.0.contains_key(node_id)
    }

    /// Whether `node_path` names an input some node actually has.
    pub fn has_input_path(&self, node_path: &str) -> bool {
        self.0
            .values()
            .any(|node| node.input_paths.values().any(|p| p == node_path))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NodeId, &NodeInfo)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
