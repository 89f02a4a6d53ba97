//! # Flowlink Architecture
//!
//! Flowlink binds inputs of an exported automation graph (numbered nodes with
//! named inputs) to UI controls, optionally groups several controls into one
//! multi-component, and writes the result as a configuration document that a
//! separate runtime renders as a simplified control panel over the graph.
//!
//! Like any client of the library, the `flowlink` binary is a thin layer on
//! top of it.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands, parses names into types       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - load session → mutate BindingStore → save session        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Core                                                       │
//! │  - bindings.rs / groups.rs / meta.rs: the BindingStore      │
//! │  - ids.rs: id allocation, controls.rs: parameter records    │
//! │  - codec.rs: BindingStore ⇄ Document, layout.rs: ordering   │
//! │  - graph.rs: workflow → NodeMap                             │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - FlowStore trait: FileStore (.flowlink/), InMemoryStore   │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! From `api.rs` inward nothing writes to stdout or stderr, and nothing exits
//! the process. Diagnostics go through `tracing`; the binary decides where
//! they end up.
//!
//! ## Sessions
//!
//! Every CLI invocation loads the session from its store, applies one change
//! and saves it back. The session is persisted as a full document plus a
//! [`layout::Layout`] for the ordering the document cannot carry. A change
//! that leaves the session failing
//! [`BindingStore::validate`](bindings::BindingStore::validate) is not
//! written. `load` is the exception: a loaded document is stored as it is
//! and the problems are reported, so they can be fixed in the session.
//!
//! ## Testing Strategy
//!
//! 1. **Core and commands**: unit tests beside the code, using
//!    [`store::memory::InMemoryStore`] and seeded ids.
//! 2. **API** (`api.rs`): dispatch and input parsing.
//! 3. **CLI** (`tests/`): the binary against a temporary session directory.

pub mod api;
pub mod bindings;
pub mod codec;
pub mod commands;
pub mod config;
pub mod controls;
pub mod error;
pub mod graph;
pub mod groups;
pub mod ids;
pub mod layout;
pub mod meta;
pub mod model;
pub mod store;
