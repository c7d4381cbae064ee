// Sump: growable typed stack with a time-travel slot visualizer

use std::fs;
use std::io;
use std::path::Path;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use sump::runner::engine::Runner;
use sump::script::parse::Parser;
use sump::ui::App;

/// Snapshot memory limit (1 GB)
const SNAPSHOT_LIMIT: usize = 1024 * 1024 * 1024;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();
    let program_name = args.first().map(|s| s.as_str()).unwrap_or("sump");

    if args.len() < 2 {
        eprintln!("Error: No input file provided");
        eprintln!();
        eprintln!("Usage: {} <script.stack>", program_name);
        eprintln!();
        eprintln!("Try the bundled demo:");
        eprintln!("  {} demos/default.stack", program_name);
        std::process::exit(1);
    }

    let script_file = &args[1];

    if !Path::new(script_file).exists() {
        eprintln!("Error: File '{}' not found", script_file);
        eprintln!("Usage: {} <script.stack>", program_name);
        std::process::exit(1);
    }

    let source = fs::read_to_string(script_file)?;

    eprintln!("Parsing {}...", script_file);
    let script = match Parser::new(&source).and_then(|mut parser| parser.parse_script()) {
        Ok(script) => script,
        Err(e) => {
            eprintln!("Parser error: {}", e);
            std::process::exit(1);
        }
    };

    eprintln!("Parsed successfully. Found {} operations.", script.statements.len());

    let mut runner = Runner::new(script, SNAPSHOT_LIMIT);

    eprintln!("Executing script...");
    match runner.run() {
        Ok(()) => {
            eprintln!("Execution completed successfully.");
            eprintln!("Total snapshots: {}", runner.total_snapshots());
        }
        Err(e) => {
            eprintln!("Runtime error: {}", e);
            eprintln!("Entering TUI with partial history...");
        }
    }

    if let Err(e) = runner.rewind_to_start() {
        eprintln!("Warning: Failed to rewind to start: {}", e);
    }

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(runner, source);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {}", err);
    }

    Ok(())
}
