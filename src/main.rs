//! Detective Quest
//!
//! Explore the mansion, collect the clues, and name the culprit.

use anyhow::Context;
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use detective_quest::game::console::ConsoleCollaborator;
use detective_quest::tui::App;
use detective_quest::{Case, CaseFile, Session};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::fs::File;
use std::io::{self, stdout};
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "detective-quest", version, about = "Explore the mansion, collect clues, accuse a suspect")]
struct Cli {
    /// JSON case file to play instead of the built-in mansion
    #[arg(long)]
    case: Option<PathBuf>,

    /// Play on plain stdin/stdout instead of the full-screen interface
    #[arg(long)]
    plain: bool,

    /// End exploration as soon as a room has no way onward
    #[arg(long)]
    leaf_stop: bool,

    /// Write logs to this file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_ref())?;

    let case_file = match &cli.case {
        Some(path) => CaseFile::load(path).with_context(|| format!("loading case file {}", path.display()))?,
        None => CaseFile::builtin().context("loading the built-in case")?,
    };
    let mut case = case_file.build().context("building the case")?;
    case.rules.leaf_stop = cli.leaf_stop;

    if cli.plain {
        play_plain(case)
    } else {
        play_tui(&case)
    }
}

fn init_logging(log_file: Option<&PathBuf>) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match log_file {
        Some(path) => {
            let file = File::create(path).with_context(|| format!("creating log file {}", path.display()))?;
            builder.with_ansi(false).with_writer(Mutex::new(file)).init();
        }
        None => builder.with_writer(io::stderr).init(),
    }
    Ok(())
}

fn play_plain(case: Case) -> anyhow::Result<()> {
    println!("=== {} ===", case.title);
    println!("\n=== Exploration begins ===\n");

    let session = Session::new(case);
    let stdin = io::stdin();
    let mut console = ConsoleCollaborator::new(stdin.lock(), stdout());
    session.run(&mut console)?;

    println!("\nEnd of the investigation.");
    Ok(())
}

fn play_tui(case: &Case) -> anyhow::Result<()> {
    let mut app = App::new(case)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    let result = (|| -> io::Result<()> {
        while app.running {
            terminal.draw(|frame| app.render(frame))?;
            if !app.handle_input()? {
                break;
            }
        }
        Ok(())
    })();

    // Cleanup
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    result?;

    if let Some(outcome) = &app.outcome {
        println!("\n╔════════════════════════════════════════════════════════╗");
        println!("  {}", outcome.verdict.headline(&outcome.accused));
        println!("╚════════════════════════════════════════════════════════╝\n");
    }

    Ok(())
}
