use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::FlowStore;

pub fn run<S: FlowStore>(store: &mut S) -> Result<CmdResult> {
    if store.is_initialized() {
        return Ok(CmdResult::default().with_message(CmdMessage::info("Session already initialized")));
    }
    store.init()?;
    Ok(CmdResult::default().with_message(CmdMessage::success("Initialized flowlink session")))
}
