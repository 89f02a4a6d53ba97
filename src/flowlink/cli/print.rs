use colored::Colorize;
use flowlink::api::{CmdMessage, GroupListing, MessageLevel, NodeListing};
use flowlink::config::{LinkerConfig, CONFIG_KEYS};
use flowlink::model::Binding;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const ID_WIDTH: usize = 28;
const TYPE_WIDTH: usize = 14;

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub(super) fn print_bindings(bindings: &[Binding], groups: &[GroupListing]) {
    for binding in bindings {
        print_binding_line(binding, "  ");
    }

    for (i, listing) in groups.iter().enumerate() {
        if i > 0 || !bindings.is_empty() {
            println!();
        }
        println!(
            "  {} {}",
            listing.group.label.bold(),
            listing.group.id.dimmed()
        );
        if listing.members.is_empty() {
            println!("      {}", "(empty)".dimmed());
        }
        for member in &listing.members {
            print_binding_line(member, "    · ");
        }
    }
}

fn print_binding_line(binding: &Binding, prefix: &str) {
    let id = pad_to_width(&binding.id, ID_WIDTH);
    let ty = pad_to_width(binding.control_type().as_str(), TYPE_WIDTH);
    let fixed = prefix.width() + ID_WIDTH + TYPE_WIDTH + 2;
    let available = LINE_WIDTH.saturating_sub(fixed);

    let target = binding.node_path.as_str();
    let label = binding.display_name();
    let rest = if label == binding.id {
        target.to_string()
    } else {
        format!("{}  {}", label, target)
    };
    let rest = truncate_to_width(&rest, available);

    println!("{}{} {} {}", prefix, id.yellow(), ty.cyan(), rest);
}

pub(super) fn print_nodes(nodes: &[NodeListing]) {
    if nodes.is_empty() {
        println!("No nodes imported.");
        return;
    }

    for (i, node) in nodes.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("{} {}", node.node_id.yellow(), node.class_type.bold());
        for input in &node.inputs {
            let name = pad_to_width(&input.name, ID_WIDTH);
            let state = match (&input.bound_by, input.linked) {
                (Some(id), _) => id.green().to_string(),
                (None, true) => "linked".dimmed().to_string(),
                (None, false) => String::new(),
            };
            println!("    {} {}", name, state);
        }
    }
}

pub(super) fn print_config(config: &LinkerConfig) {
    for key in CONFIG_KEYS {
        let value = config.get(key).unwrap_or_default();
        println!("{} = {}", key, value);
    }
}

fn pad_to_width(s: &str, width: usize) -> String {
    let truncated = truncate_to_width(s, width);
    let padding = width.saturating_sub(truncated.width());
    format!("{}{}", truncated, " ".repeat(padding))
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}
