use super::FlowStore;
use crate::codec::Document;
use crate::config::LinkerConfig;
use crate::error::Result;
use crate::graph::NodeMap;
use crate::layout::Layout;

#[derive(Debug, Default)]
pub struct InMemoryStore {
    initialized: bool,
    flow: Option<Document>,
    layout: Layout,
    nodes: NodeMap,
    config: LinkerConfig,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FlowStore for InMemoryStore {
    fn is_initialized(&self) -> bool {
        self.initialized
    }

    fn init(&mut self) -> Result<()> {
        self.initialized = true;
        Ok(())
    }

    fn load_flow(&self) -> Result<Option<Document>> {
        Ok(self.flow.clone())
    }

    fn save_flow(&mut self, doc: &Document) -> Result<()> {
        self.initialized = true;
        self.flow = Some(doc.clone());
        Ok(())
    }

    fn load_layout(&self) -> Result<Layout> {
        Ok(self.layout.clone())
    }

    fn save_layout(&mut self, layout: &Layout) -> Result<()> {
        self.layout = layout.clone();
        Ok(())
    }

    fn load_graph(&self) -> Result<NodeMap> {
        Ok(self.nodes.clone())
    }

    fn save_graph(&mut self, nodes: &NodeMap) -> Result<()> {
        self.initialized = true;
        self.nodes = nodes.clone();
        Ok(())
    }

    fn load_config(&self) -> Result<LinkerConfig> {
        Ok(self.config.clone())
    }

    fn save_config(&mut self, config: &LinkerConfig) -> Result<()> {
        self.config = config.clone();
        Ok(())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use serde_json::{json, Value};

    /// A small text-to-image workflow: sampler, checkpoint, prompt, latent size.
    pub fn sample_workflow() -> Value {
        json!({
            "3": {
                "class_type": "KSampler",
                "inputs": {"seed": 42, "steps": 20, "cfg": 7.0, "sampler_name": "euler", "model": ["4", 0]}
            },
            "4": {
                "class_type": "CheckpointLoaderSimple",
                "inputs": {"ckpt_name": "sd_xl_base_1.0.safetensors"}
            },
            "5": {
                "class_type": "EmptyLatentImage",
                "inputs": {"width": 1024, "height": 1024, "batch_size": 1}
            },
            "6": {
                "class_type": "CLIPTextEncode",
                "inputs": {"text": "a portrait", "clip": ["4", 1]}
            }
        })
    }

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            let mut store = InMemoryStore::new();
            store.init().unwrap();
            Self { store }
        }

        pub fn with_graph(mut self) -> Self {
            let nodes = NodeMap::from_workflow(&sample_workflow()).unwrap();
            self.store.save_graph(&nodes).unwrap();
            self
        }

        pub fn with_flow(mut self, doc: Value) -> Self {
            let doc = Document::from_value(doc).unwrap();
            self.store.save_flow(&doc).unwrap();
            self
        }
    }
}
