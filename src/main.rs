//! hledit - a terminal Markdown editor that highlights as you type

mod logging;

use std::env;
use std::path::PathBuf;
use std::process;

use highlighted_editor::buffer::Buffer;
use highlighted_editor::config::Config;
use highlighted_editor::display::TerminalHost;
use highlighted_editor::terminal::Terminal;
use highlighted_editor::{EditorBuilder, HostEvent, Result, TextBinding, TextHost};
use tracing::{info, warn};

/// Link schemes the editor refuses to hand to the default handler
const BLOCKED_SCHEMES: [&str; 3] = ["javascript:", "file:", "data:"];

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    // Handle --help and --version
    if args.len() > 1 {
        match args[1].as_str() {
            "--help" | "-h" => {
                print_usage();
                return Ok(());
            }
            "--version" | "-V" => {
                println!("hledit {}", env!("CARGO_PKG_VERSION"));
                return Ok(());
            }
            _ => {}
        }
    }

    let _log_guard = match logging::init() {
        Ok(guard) => Some(guard),
        Err(e) => {
            eprintln!("Warning: logging disabled: {}", e);
            None
        }
    };

    let config = Config::load();
    let rules = config.preset.rules(&config.theme)?;
    info!(preset = config.preset.name(), rules = rules.len(), "starting");

    let buffer = match args.get(1).filter(|arg| !arg.starts_with('-')) {
        Some(path) => Buffer::from_file(&PathBuf::from(path))?,
        None => Buffer::default(),
    };
    let binding = TextBinding::new(buffer.text());
    let host = TerminalHost::new(Terminal::new()?, buffer, config.tab_width);

    let mut editor = EditorBuilder::new(binding, rules)
        .base_font(config.theme.body_font)
        .on_editing_began(|| info!("editing began"))
        .on_commit(|| info!("editing ended"))
        .on_link_click(|target, _, _| {
            let target = target.to_ascii_lowercase();
            !BLOCKED_SCHEMES.iter().any(|scheme| target.starts_with(scheme))
        })
        .build(host)?;

    while let Some(event) = editor.host_mut().next_event()? {
        match event {
            HostEvent::LinkActivated { offset } => match editor.link_at(offset) {
                Some(link) => {
                    if !editor.activate_link(&link)? {
                        warn!(link = %link.target, "link blocked");
                        editor.host_mut().show_message(format!("Blocked: {}", link.target))?;
                    }
                }
                None => editor.host_mut().show_message("No link at point")?,
            },
            other => editor.handle_event(other)?,
        }
    }

    info!(modified = editor.host().buffer().is_modified(), len = editor.host().text().len(), "exiting");
    Ok(())
}

fn print_usage() {
    println!("hledit {} - terminal Markdown editor with live highlighting", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Usage: hledit [OPTIONS] [FILE]");
    println!();
    println!("Options:");
    println!("  -h, --help     Show this help message");
    println!("  -V, --version  Show version information");
    println!();
    println!("Key bindings:");
    println!("  C-f, Right     Move forward one character");
    println!("  C-b, Left      Move backward one character");
    println!("  C-n, Down      Move to next line");
    println!("  C-p, Up        Move to previous line");
    println!("  C-a, Home      Move to beginning of line");
    println!("  C-e, End       Move to end of line");
    println!("  C-d, Delete    Delete character under cursor");
    println!("  C-o            Open link under cursor");
    println!("  C-s            Save");
    println!("  C-q            Quit");
    println!();
    println!("Settings are read from ~/.hledit.toml");
}
