use super::print::{print_bindings, print_config, print_messages, print_nodes};
use super::setup::{Cli, Commands, GroupCommands};
use clap::Parser;
use flowlink::api::{parse_move, CmdResult, ConfigAction, Fields, GroupAction, LinkerApi};
use flowlink::error::{LinkerError, Result};
use flowlink::store::fs::FileStore;
use serde_json::Value;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

struct AppContext {
    api: LinkerApi<FileStore>,
}

/// Runs the CLI. Returns false when the command reported an error.
pub fn run() -> Result<bool> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let mut ctx = init_context(&cli);

    let result = match cli.command {
        Some(Commands::Init) => ctx.api.init()?,
        Some(Commands::Graph { file }) => handle_graph(&mut ctx, &file)?,
        Some(Commands::Load { file }) => ctx.api.load_document(&read_input(&file)?)?,
        Some(Commands::Nodes) => handle_nodes(&ctx)?,
        Some(Commands::List) | None => handle_list(&ctx)?,
        Some(Commands::Bind {
            node_path,
            control_type,
            label,
            fields,
        }) => {
            let fields = parse_fields(&fields)?;
            ctx.api.bind(&node_path, &control_type, label, fields)?
        }
        Some(Commands::Edit {
            id,
            control_type,
            path,
            label,
            fields,
        }) => {
            let fields = parse_fields(&fields)?;
            ctx.api
                .edit(&id, control_type.as_deref(), path, label, fields)?
        }
        Some(Commands::Unbind { ids }) => ctx.api.unbind(&ids)?,
        Some(Commands::Move { id, direction }) => ctx.api.move_binding(&id, &direction)?,
        Some(Commands::Group { action }) => handle_group(&mut ctx, action)?,
        Some(Commands::Meta { name, description }) => ctx.api.meta(name, description)?,
        Some(Commands::Copy) => ctx.api.copy_flow()?,
        Some(Commands::Export {
            out,
            lean,
            full,
            compact,
            pretty,
        }) => {
            let lean = flag_pair(lean, full);
            let compact = flag_pair(compact, pretty);
            handle_document(ctx.api.export(lean, compact, out)?)
        }
        Some(Commands::Preview { compact }) => {
            handle_document(ctx.api.preview(compact.then_some(true))?)
        }
        Some(Commands::Config { key, value }) => handle_config(&mut ctx, key, value)?,
    };

    print_messages(&result.messages);
    Ok(!result.has_errors())
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn init_context(cli: &Cli) -> AppContext {
    let base = cli.dir.clone().unwrap_or_else(|| {
        std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."))
    });
    AppContext {
        api: LinkerApi::new(FileStore::new(base)),
    }
}

fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        return Ok(buffer);
    }
    std::fs::read_to_string(path).map_err(|e| {
        LinkerError::Api(format!("Cannot read {}: {}", path.display(), e))
    })
}

fn handle_graph(ctx: &mut AppContext, file: &Path) -> Result<CmdResult> {
    let result = ctx.api.import_graph(&read_input(file)?)?;
    print_nodes(&result.listed_nodes);
    Ok(result)
}

fn handle_nodes(ctx: &AppContext) -> Result<CmdResult> {
    let result = ctx.api.nodes()?;
    print_nodes(&result.listed_nodes);
    Ok(result)
}

fn handle_list(ctx: &AppContext) -> Result<CmdResult> {
    let result = ctx.api.list()?;
    print_bindings(&result.listed_bindings, &result.listed_groups);
    Ok(result)
}

fn handle_group(ctx: &mut AppContext, action: GroupCommands) -> Result<CmdResult> {
    let action = match action {
        GroupCommands::Create { label, members } => GroupAction::Create { label, members },
        GroupCommands::Add { group, members } => GroupAction::Add { group, members },
        GroupCommands::Remove {
            group,
            members,
            delete,
        } => GroupAction::Remove {
            group,
            members,
            delete,
        },
        GroupCommands::Delete { group } => GroupAction::Delete { group },
        GroupCommands::Rename { group, label } => GroupAction::Rename { group, label },
        GroupCommands::Move { group, direction } => GroupAction::Move {
            group,
            mv: parse_move(&direction)?,
        },
        GroupCommands::Order {
            group,
            member,
            direction,
        } => GroupAction::Order {
            group,
            member,
            mv: parse_move(&direction)?,
        },
    };
    let result = ctx.api.group(action)?;
    print_bindings(&[], &result.listed_groups);
    Ok(result)
}

fn handle_document(result: CmdResult) -> CmdResult {
    if let Some(document) = &result.document {
        println!("{}", document);
    }
    result
}

fn handle_config(ctx: &mut AppContext, key: Option<String>, value: Option<String>) -> Result<CmdResult> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };
    let result = ctx.api.config(action)?;
    if let (Some(config), true) = (&result.config, result.messages.is_empty()) {
        print_config(config);
    }
    Ok(result)
}

/// `--flag` / `--no-flag` style pairs; neither means "use the config".
fn flag_pair(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

/// Parses `key=value` assignments. Values that are valid JSON keep their
/// type; anything else is taken as text.
fn parse_fields(assignments: &[String]) -> Result<Fields> {
    let mut fields = Fields::new();
    for assignment in assignments {
        let (key, raw) = assignment.split_once('=').ok_or_else(|| {
            LinkerError::Api(format!("Expected key=value, got {}", assignment))
        })?;
        let key = key.trim();
        if key.is_empty() {
            return Err(LinkerError::Api(format!("Missing key in {}", assignment)));
        }
        let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
        fields.insert(key.to_string(), value);
    }
    Ok(fields)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn field_values_keep_json_types() {
        let fields = parse_fields(&[
            "maxValue=30".to_string(),
            "defaultValue=false".to_string(),
            "url=KSampler".to_string(),
            "label=\"42\"".to_string(),
            "default=".to_string(),
        ])
        .unwrap();
        assert_eq!(fields["maxValue"], json!(30));
        assert_eq!(fields["defaultValue"], json!(false));
        assert_eq!(fields["url"], json!("KSampler"));
        assert_eq!(fields["label"], json!("42"));
        assert_eq!(fields["default"], json!(""));
    }

    #[test]
    fn malformed_assignments_are_rejected() {
        assert!(parse_fields(&["maxValue".to_string()]).is_err());
        assert!(parse_fields(&["=3".to_string()]).is_err());
    }

    #[test]
    fn flag_pairs_default_to_config() {
        assert_eq!(flag_pair(false, false), None);
        assert_eq!(flag_pair(true, false), Some(true));
        assert_eq!(flag_pair(false, true), Some(false));
    }
}
