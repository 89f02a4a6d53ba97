use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format: "0.3.2" for releases, "0.3.2@abc1234 2024-01-15 14:30" for dev builds
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(name = "flowlink", bin_name = "flowlink", version = get_version())]
#[command(about = "Bind workflow inputs to UI controls and export flow configs", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory holding the session (defaults to the current directory)
    #[arg(short, long, global = true, value_name = "DIR", help_heading = "Options")]
    pub dir: Option<PathBuf>,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count, help_heading = "Options")]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start an empty session
    #[command(display_order = 1)]
    Init,

    /// Import a workflow (API format) and start a fresh session over it
    #[command(display_order = 2)]
    Graph {
        /// Workflow JSON file, or - for stdin
        file: PathBuf,
    },

    /// Replace bindings and groups with those of a flow document
    #[command(display_order = 3)]
    Load {
        /// Flow document, or - for stdin
        file: PathBuf,
    },

    /// List imported nodes and their inputs
    #[command(display_order = 4)]
    Nodes,

    /// List bindings and groups
    #[command(alias = "ls", display_order = 10)]
    List,

    /// Bind a node input to a control
    #[command(display_order = 11)]
    Bind {
        /// Input path, e.g. 3.inputs.cfg
        node_path: String,

        /// Control type, e.g. stepper, prompt, dropdown
        control_type: String,

        /// Display label
        #[arg(short, long)]
        label: Option<String>,

        /// Control parameter as key=value (repeatable)
        #[arg(long = "set", value_name = "KEY=VALUE")]
        fields: Vec<String>,
    },

    /// Change a binding's control type, input or parameters
    #[command(display_order = 12)]
    Edit {
        id: String,

        /// New control type
        #[arg(short = 't', long = "type")]
        control_type: Option<String>,

        /// New input path on the same node
        #[arg(short, long)]
        path: Option<String>,

        #[arg(short, long)]
        label: Option<String>,

        /// Control parameter as key=value (repeatable)
        #[arg(long = "set", value_name = "KEY=VALUE")]
        fields: Vec<String>,
    },

    /// Remove bindings
    #[command(alias = "rm", display_order = 13)]
    Unbind {
        #[arg(required = true, num_args = 1..)]
        ids: Vec<String>,
    },

    /// Move an ungrouped binding: top, up, down or bottom
    #[command(name = "move", display_order = 14)]
    Move { id: String, direction: String },

    /// Manage groups (multi-components)
    #[command(display_order = 20)]
    Group {
        #[command(subcommand)]
        action: GroupCommands,
    },

    /// Show or set the flow name and description
    #[command(display_order = 30)]
    Meta {
        #[arg(short, long)]
        name: Option<String>,

        #[arg(short = 'D', long)]
        description: Option<String>,
    },

    /// Give the flow a new id so it saves as a separate flow
    #[command(display_order = 31)]
    Copy,

    /// Write the flow document
    #[command(display_order = 32)]
    Export {
        /// Output file (defaults to stdout)
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// Omit empty control arrays
        #[arg(long, conflicts_with = "full")]
        lean: bool,

        /// Keep empty control arrays
        #[arg(long)]
        full: bool,

        /// Single-line JSON
        #[arg(long, conflicts_with = "pretty")]
        compact: bool,

        /// Indented JSON
        #[arg(long)]
        pretty: bool,
    },

    /// Print the document as sent to the preview runtime
    #[command(display_order = 33)]
    Preview {
        #[arg(long)]
        compact: bool,
    },

    /// Get or set configuration
    #[command(display_order = 40)]
    Config {
        /// Configuration key (lean, compact)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum GroupCommands {
    /// Create a group, optionally with members
    Create {
        label: String,
        members: Vec<String>,
    },

    /// Add ungrouped bindings to a group
    Add {
        /// Group id or label
        group: String,
        #[arg(required = true, num_args = 1..)]
        members: Vec<String>,
    },

    /// Take bindings out of a group
    Remove {
        group: String,
        #[arg(required = true, num_args = 1..)]
        members: Vec<String>,

        /// Delete the bindings instead of ungrouping them
        #[arg(long)]
        delete: bool,
    },

    /// Delete a group; its members become ungrouped
    Delete { group: String },

    Rename { group: String, label: String },

    /// Move a group: top, up, down or bottom
    #[command(name = "move")]
    Move { group: String, direction: String },

    /// Move a member within its group: top, up, down or bottom
    Order {
        group: String,
        member: String,
        direction: String,
    },
}
