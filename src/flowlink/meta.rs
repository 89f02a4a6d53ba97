//! Flow metadata: the `id`, `name`, `url` and `description` a document carries.
//!
//! The url is derived, never typed: `<flow id>-<kebab name>`. Naming a flow
//! for the first time allocates its short flow id.

use crate::bindings::BindingStore;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

static NON_SLUG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9]+").expect("valid regex"));

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowMeta {
    pub id: Option<String>,
    pub name: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
}

/// `"My Flow!"` becomes `"my-flow"`.
pub fn kebab(name: &str) -> String {
    let lower = name.to_lowercase();
    NON_SLUG_RE
        .replace_all(&lower, "-")
        .trim_matches('-')
        .to_string()
}

fn flow_url(id: &str, name: &str) -> String {
    format!("{}-{}", id, kebab(name))
}

impl BindingStore {
    pub fn set_meta(&mut self, meta: FlowMeta) {
        self.meta = meta;
    }

    /// Names the flow. An empty name clears the id and url.
    pub fn set_flow_name(&mut self, name: &str) {
        let name = name.trim();
        if name.is_empty() {
            self.meta.name = None;
            self.meta.id = None;
            self.meta.url = None;
            return;
        }

        let id = match self.meta.id.clone() {
            Some(id) => id,
            None => {
                let id = self.ids.flow_id();
                debug!(flow_id = %id, "allocated flow id");
                id
            }
        };
        self.meta.url = Some(flow_url(&id, name));
        self.meta.id = Some(id);
        self.meta.name = Some(name.to_string());
    }

    pub fn set_description(&mut self, description: &str) {
        let description = description.trim();
        self.meta.description = (!description.is_empty()).then(|| description.to_string());
    }

    /// Gives the flow a fresh id so it saves as a new flow.
    pub fn copy_flow(&mut self) -> String {
        let id = loop {
            let id = self.ids.flow_id();
            if self.meta.id.as_deref() != Some(id.as_str()) {
                break id;
            }
        };
        self.meta.url = self.meta.name.as_deref().map(|name| flow_url(&id, name));
        self.meta.id = Some(id.clone());
        debug!(flow_id = %id, "copied flow");
        id
    }
}
