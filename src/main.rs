use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

use squeue_explorer::app::App;
use squeue_explorer::export::{export_table, ExportFormat};
use squeue_explorer::jobs::{JobQueue, Slurm, DEFAULT_FORMAT};
use squeue_explorer::surface::TerminalSurface;

/// Interactive terminal dashboard for Slurm job queues
#[derive(Parser, Debug)]
#[command(name = "sqe", version, about)]
struct Args {
    /// Job listing command
    #[arg(long, default_value = "squeue")]
    squeue: String,

    /// Job cancellation command
    #[arg(long, default_value = "scancel")]
    scancel: String,

    /// Output format passed to the listing command with `-o`
    #[arg(long, default_value = DEFAULT_FORMAT)]
    format: String,

    /// List every user's jobs instead of only your own
    #[arg(long)]
    all: bool,

    /// Write a debug log to this file
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Print the job list once in the given format and exit
    #[arg(long, value_enum, value_name = "FORMAT")]
    export: Option<ExportFormat>,

    /// Comma-separated header names to export (default: every column)
    #[arg(long, value_delimiter = ',', value_name = "NAMES", requires = "export")]
    columns: Vec<String>,
}

/// Initialize the terminal for TUI rendering.
/// Enables raw mode, enters alternate screen, and creates a Terminal instance.
fn init_terminal() -> io::Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend)
}

/// Restore the terminal to its original state.
/// Disables raw mode and leaves alternate screen.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn init_logging(path: Option<&PathBuf>) {
    let Some(path) = path else {
        return;
    };
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    match File::create(path) {
        Ok(file) => {
            let _ = WriteLogger::init(LevelFilter::Debug, log_config, file);
        }
        Err(e) => eprintln!("Warning: cannot open log file {}: {}", path.display(), e),
    }
}

fn main() -> io::Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_ref());

    let mut queue = Slurm {
        squeue: args.squeue,
        scancel: args.scancel,
        format: args.format,
        only_mine: !args.all,
    };
    log::info!("starting with {:?}", queue);

    if let Some(format) = args.export {
        let data = match queue.list_jobs() {
            Ok(data) => data,
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        };
        match export_table(&data, format, &args.columns) {
            Ok(text) => {
                io::stdout().write_all(text.as_bytes())?;
                return Ok(());
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
    }

    // Set up panic hook to restore terminal on crash
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let mut surface = TerminalSurface::new(init_terminal()?)?;
    let result = App::new().run(&mut surface, &mut queue);

    // Clear terminal before exit
    surface.terminal_mut().clear()?;
    restore_terminal(surface.terminal_mut())?;
    log::info!("shutting down");
    result
}
