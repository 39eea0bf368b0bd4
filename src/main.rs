mod app;
mod calendar;
mod clock;
mod config;
mod domain;
mod error;
mod input;
mod logging;
mod persistence;
mod report;
mod scheduling;
mod store;
mod ticker;
mod timer;
mod ui;

use anyhow::{Context, Result};
use app::AppState;
use clap::{Parser, Subcommand};
use clock::SystemClock;
use config::Settings;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use domain::{item_details, ItemKind, ItemRef};
use persistence::{config_file, ensure_data_dir, init_local_data_dir, log_file, report_file, FileStore};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::path::{Path, PathBuf};
use store::Action;
use ticker::Ticker;
use timer::TimerState;

#[derive(Parser)]
#[command(name = "lifeos")]
#[command(about = "Plan projects on a calendar and track the time you actually spend", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize a local .lifeos directory in the current directory
    Init,
    /// Export every activity log as CSV
    Export {
        /// Output file path. Defaults to lifeos_activity_export_YYYY-MM-DD.csv in the data directory
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Generate a Markdown report of planned and actual time
    Report {
        /// First day (YYYY-MM-DD). Defaults to today.
        #[arg(short, long)]
        from: Option<String>,
        /// Last day (YYYY-MM-DD). Defaults to --from.
        #[arg(short, long)]
        to: Option<String>,
        /// Output file path. Defaults to report-<range>.md in the data directory
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Control the timer without opening the UI
    Timer {
        #[command(subcommand)]
        command: TimerCommand,
    },
}

#[derive(Subcommand)]
enum TimerCommand {
    /// Start timing a task or subtask
    Start {
        /// "task" or "subtask"
        kind: String,
        id: String,
    },
    Pause,
    Resume,
    /// Stop the timer and log the session
    Stop,
    /// Show what is being timed
    Status,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(Commands::Init) = cli.command {
        // Initialize local data directory
        let cwd = std::env::current_dir().context("Could not determine current directory")?;
        let data_dir = init_local_data_dir(&cwd)?;
        println!("Initialized data directory: {}", data_dir.display());
        println!();
        println!("lifeos will now use this local directory for its data.");
        println!("Run 'lifeos' to open the planner.");
        return Ok(());
    }

    let data_dir = ensure_data_dir()?;
    let settings = Settings::load(&config_file(&data_dir))?;
    logging::init(&log_file(&data_dir), &settings.log_filter)?;
    tracing::info!(dir = %data_dir.display(), "starting");

    let mut app = AppState::new(
        Box::new(FileStore::new(&data_dir)),
        Box::new(SystemClock),
        settings,
        Some(data_dir.clone()),
    );

    match cli.command {
        Some(Commands::Init) => Ok(()),
        Some(Commands::Export { output }) => export_activity(&mut app, output),
        Some(Commands::Report { from, to, output }) => write_report(&app, &data_dir, from, to, output),
        Some(Commands::Timer { command }) => run_timer_command(&mut app, command),
        None => run_tui(&mut app, &data_dir),
    }
}

fn parse_date(raw: &str) -> Result<chrono::NaiveDate> {
    chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|e| anyhow::anyhow!("Invalid date format. Use YYYY-MM-DD: {}", e))
}

fn export_activity(app: &mut AppState, output: Option<String>) -> Result<()> {
    match output {
        Some(path) => match report::to_csv(&app.data)? {
            Some(csv) => {
                persistence::atomic_write(&path, &csv)?;
                println!("Exported: {}", path);
            }
            None => println!("No activity to export"),
        },
        None => match app.export_csv()? {
            Some(path) => println!("Exported: {}", path.display()),
            None => println!("No activity to export"),
        },
    }
    Ok(())
}

fn write_report(
    app: &AppState,
    data_dir: &Path,
    from: Option<String>,
    to: Option<String>,
    output: Option<String>,
) -> Result<()> {
    let from = match from {
        Some(raw) => parse_date(&raw)?,
        None => app.today(),
    };
    let to = match to {
        Some(raw) => parse_date(&raw)?,
        None => from,
    };
    let output = output
        .map(PathBuf::from)
        .unwrap_or_else(|| report_file(data_dir, from, to));

    println!("Generating report for {} to {}...", from, to);
    let report_path = report::generate_report(&app.data, from, to, &output)?;
    println!("Report generated: {}", report_path.display());
    Ok(())
}

fn run_timer_command(app: &mut AppState, command: TimerCommand) -> Result<()> {
    let at = app.now();
    let action = match command {
        TimerCommand::Start { kind, id } => {
            let kind = ItemKind::parse(&kind)
                .with_context(|| format!("Unknown item kind '{}'. Use task or subtask", kind))?;
            let item = ItemRef::new(kind, id);
            if !app.data.contains_item(&item) {
                anyhow::bail!("No {} with id '{}'", kind.as_str(), item.id());
            }
            Action::StartTimer { item, at }
        }
        TimerCommand::Pause => Action::PauseTimer { at },
        TimerCommand::Resume => Action::ResumeTimer { at },
        TimerCommand::Stop => Action::StopTimer { end_time: at },
        TimerCommand::Status => {
            print_timer_status(app);
            return Ok(());
        }
    };

    let name = action.name();
    if app.dispatch(action) {
        app.save()?;
    } else {
        println!("Nothing to do: {} does not apply to the current timer", name);
    }
    print_timer_status(app);
    Ok(())
}

fn print_timer_status(app: &AppState) {
    let state = TimerState::of(app.data.active_timer.as_ref());
    let Some(item) = state.item() else {
        println!("No timer running");
        return;
    };
    let details = item_details(&app.data, item);
    let label = match state {
        TimerState::Paused { .. } => "Paused",
        _ => "Running",
    };
    println!(
        "{}: {} ({}) {}",
        label,
        details.title,
        details.project_name(),
        timer::format_elapsed(state.elapsed_ms(app.now()))
    );
}

fn run_tui(app: &mut AppState, data_dir: &Path) -> Result<()> {
    // Show which directory we're using
    eprintln!("Using data directory: {}", data_dir.display());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    // Save on exit
    if let Err(e) = app.save() {
        tracing::error!(error = %e, "final save failed");
        eprintln!("Error saving state: {}", e);
    }

    // Print any errors
    if let Err(err) = &result {
        tracing::error!(error = %err, "ui exited with error");
        eprintln!("Error: {}", err);
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut AppState) -> Result<()> {
    let mut ticker = Ticker::new(app.settings.tick_duration());
    let mut dirty = true;

    loop {
        // Redraw after input or once per tick so the timer advances
        if dirty || ticker.poll() {
            terminal.draw(|f| ui::render(f, app))?;
            dirty = false;
        }

        // Handle events with timeout for ticking
        if event::poll(ticker.timeout())? {
            match event::read()? {
                // Only process key press events (ignore key release)
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if input::handle_key(app, key)? {
                        return Ok(());
                    }
                }
                Event::Mouse(mouse) => input::handle_mouse(app, mouse),
                _ => {}
            }
            dirty = true;
        }

        // Autosave if needed
        if app.needs_save || app.meta_needs_save {
            app.save()?;
        }
    }
}
