use super::FlowStore;
use crate::codec::Document;
use crate::config::LinkerConfig;
use crate::error::{LinkerError, Result};
use crate::graph::NodeMap;
use crate::layout::Layout;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub const SESSION_DIR: &str = ".flowlink";
const FLOW_FILE: &str = "flow.json";
const GRAPH_FILE: &str = "graph.json";
const LAYOUT_FILE: &str = "layout.json";

pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// A store over `<base>/.flowlink`.
    pub fn new(base: impl AsRef<Path>) -> Self {
        Self {
            root: base.as_ref().join(SESSION_DIR),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root)?;
        }
        Ok(())
    }

    fn read(&self, name: &str) -> Result<Option<String>> {
        let path = self.root.join(name);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(fs::read_to_string(path)?))
    }

    fn write(&self, name: &str, content: &str) -> Result<()> {
        self.ensure_dir()?;
        fs::write(self.root.join(name), content)?;
        Ok(())
    }
}

impl FlowStore for FileStore {
    fn is_initialized(&self) -> bool {
        self.root.is_dir()
    }

    fn init(&mut self) -> Result<()> {
        self.ensure_dir()?;
        info!(root = %self.root.display(), "initialized session");
        Ok(())
    }

    fn load_flow(&self) -> Result<Option<Document>> {
        match self.read(FLOW_FILE)? {
            Some(text) => Document::parse(&text).map(Some).map_err(|e| {
                LinkerError::Store(format!("{} is corrupt: {}", FLOW_FILE, e))
            }),
            None => Ok(None),
        }
    }

    fn save_flow(&mut self, doc: &Document) -> Result<()> {
        self.write(FLOW_FILE, &doc.to_json(false)?)?;
        info!(root = %self.root.display(), "saved flow");
        Ok(())
    }

    fn load_layout(&self) -> Result<Layout> {
        match self.read(LAYOUT_FILE)? {
            Some(text) => Ok(serde_json::from_str(&text)?),
            None => Ok(Layout::default()),
        }
    }

    fn save_layout(&mut self, layout: &Layout) -> Result<()> {
        self.write(LAYOUT_FILE, &serde_json::to_string_pretty(layout)?)
    }

    fn load_graph(&self) -> Result<NodeMap> {
        match self.read(GRAPH_FILE)? {
            Some(text) => Ok(serde_json::from_str(&text)?),
            None => Ok(NodeMap::new()),
        }
    }

    fn save_graph(&mut self, nodes: &NodeMap) -> Result<()> {
        self.write(GRAPH_FILE, &serde_json::to_string_pretty(nodes)?)
    }

    fn load_config(&self) -> Result<LinkerConfig> {
        LinkerConfig::load(&self.root)
    }

    fn save_config(&mut self, config: &LinkerConfig) -> Result<()> {
        config.save(&self.root)
    }
}
