//! # Storage Layer
//!
//! A session is persisted between CLI invocations through the [`FlowStore`]
//! trait. Commands load the session into a [`BindingStore`](crate::bindings::BindingStore),
//! mutate it and save it back; they never touch the filesystem themselves.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: production storage in a session directory
//! - [`memory::InMemoryStore`]: no persistence, for tests
//!
//! ## Storage Format
//!
//! For `FileStore`:
//! ```text
//! .flowlink/
//! ├── flow.json      # Current bindings and groups, as a full (non-lean) document
//! ├── layout.json    # Order and input paths the document cannot express
//! ├── graph.json     # Node map of the imported workflow
//! └── config.json    # Export settings
//! ```
//!
//! The flow is stored as a document rather than a private format, so the
//! session file can be handed to the runtime as-is. `layout.json` is a
//! sidecar (see [`Layout`]); a session without one loads in document order.

use crate::codec::Document;
use crate::config::LinkerConfig;
use crate::error::Result;
use crate::graph::NodeMap;
use crate::layout::Layout;

pub mod fs;
pub mod memory;

pub trait FlowStore {
    /// Whether a session has been started in this store.
    fn is_initialized(&self) -> bool;

    /// Creates an empty session. Existing files are left untouched.
    fn init(&mut self) -> Result<()>;

    /// The saved flow, or `None` if nothing has been saved yet.
    fn load_flow(&self) -> Result<Option<Document>>;

    fn save_flow(&mut self, doc: &Document) -> Result<()>;

    /// The saved layout; empty if none was saved.
    fn load_layout(&self) -> Result<Layout>;

    fn save_layout(&mut self, layout: &Layout) -> Result<()>;

    /// The imported node map; empty if no graph was imported.
    fn load_graph(&self) -> Result<NodeMap>;

    fn save_graph(&mut self, nodes: &NodeMap) -> Result<()>;

    fn load_config(&self) -> Result<LinkerConfig>;

    fn save_config(&mut self, config: &LinkerConfig) -> Result<()>;
}
