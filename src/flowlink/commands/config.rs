use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::FlowStore;

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

pub fn run<S: FlowStore>(store: &mut S, action: ConfigAction) -> Result<CmdResult> {
    match action {
        ConfigAction::ShowAll => {
            let config = store.load_config()?;
            Ok(CmdResult::default().with_config(config))
        }
        ConfigAction::ShowKey(key) => {
            let config = store.load_config()?;
            let message = match config.get(&key) {
                Some(value) => CmdMessage::info(value),
                None => CmdMessage::error(format!("Unknown config key: {}", key)),
            };
            Ok(CmdResult::default().with_message(message))
        }
        ConfigAction::Set(key, value) => {
            let mut config = store.load_config()?;
            if let Err(e) = config.set(&key, &value) {
                return Ok(CmdResult::default().with_message(CmdMessage::error(e)));
            }
            store.save_config(&config)?;
            let display = config.get(&key).unwrap_or(value);
            Ok(CmdResult::default()
                .with_message(CmdMessage::success(format!("{} set to {}", key, display)))
                .with_config(config))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::store::memory::InMemoryStore;

    #[test]
    fn shows_defaults() {
        let mut store = InMemoryStore::new();
        let result = run(&mut store, ConfigAction::ShowAll).unwrap();
        let config = result.config.unwrap();
        assert!(config.lean);
        assert!(!config.compact);
    }

    #[test]
    fn sets_and_reads_back() {
        let mut store = InMemoryStore::new();
        let result = run(&mut store, ConfigAction::Set("compact".into(), "true".into())).unwrap();
        assert_eq!(result.messages[0].content, "compact set to true");

        let result = run(&mut store, ConfigAction::ShowKey("compact".into())).unwrap();
        assert_eq!(result.messages[0].content, "true");
    }

    #[test]
    fn bad_keys_and_values_are_messages() {
        let mut store = InMemoryStore::new();
        let result = run(&mut store, ConfigAction::ShowKey("indent".into())).unwrap();
        assert_eq!(result.messages[0].level, MessageLevel::Error);

        let result = run(&mut store, ConfigAction::Set("lean".into(), "sometimes".into())).unwrap();
        assert_eq!(result.messages[0].level, MessageLevel::Error);
        assert!(store.load_config().unwrap().lean);
    }
}
