use crate::codec::{self, Format};
use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::FlowStore;
use std::fs;
use std::path::PathBuf;

use super::helpers::load_session;

/// Per-invocation overrides of the configured export format.
#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    pub lean: Option<bool>,
    pub compact: Option<bool>,
    /// Write here instead of returning the text.
    pub out: Option<PathBuf>,
}

impl ExportOptions {
    fn format(&self, configured: Format) -> Format {
        Format {
            lean: self.lean.unwrap_or(configured.lean),
            compact: self.compact.unwrap_or(configured.compact),
        }
    }
}

pub fn run<S: FlowStore>(store: &S, options: ExportOptions) -> Result<CmdResult> {
    let mut session = load_session(store)?;
    session.validate()?;
    let format = options.format(store.load_config()?.format());

    let doc = codec::encode(&mut session, format.lean);
    let text = doc.to_json(format.compact)?;

    let mut result = CmdResult::default();
    match options.out {
        Some(path) => {
            fs::write(&path, format!("{}\n", text))?;
            result.add_message(CmdMessage::success(format!(
                "Exported {} bindings to {}",
                session.bindings().len(),
                path.display()
            )));
            result.output_path = Some(path);
        }
        None => result.document = Some(text),
    }
    Ok(result)
}

/// The document as the preview runtime receives it.
pub fn preview<S: FlowStore>(store: &S, compact: Option<bool>) -> Result<CmdResult> {
    let mut session = load_session(store)?;
    let config = store.load_config()?;
    let doc = codec::encode(&mut session, config.lean).preview();
    let text = doc.to_json(compact.unwrap_or(config.compact))?;
    Ok(CmdResult::default().with_document(text))
}
