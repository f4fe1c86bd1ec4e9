//! sectionlist: drag, swipe and collapse a markdown outline as a sectioned list.
#![allow(clippy::multiple_crate_versions)]

use clap::Parser;
use ratatui::crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use sectionlist::{app_state, config, formats, input, ui, SectionAdapter};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[allow(clippy::struct_excessive_bools)]
#[command(name = "sectionlist")]
#[command(about = "Drag, swipe and collapse a markdown outline", long_about = None)]
struct Args {
    /// Markdown file whose headings form the list
    #[arg(value_name = "PATH")]
    path: PathBuf,

    /// Load policy from this file instead of sectionlist.toml
    #[arg(long)]
    config: Option<PathBuf>,

    /// Show every heading as a bare node, without sections
    #[arg(long)]
    flat: bool,

    /// Allow dragging nodes
    #[arg(long)]
    movable_nodes: bool,

    /// Allow dragging sections
    #[arg(long)]
    movable_sections: bool,

    /// Allow nodes to be dragged into other sections
    #[arg(long)]
    cross_sections: bool,

    /// Allow swiping nodes
    #[arg(long)]
    swipeable_nodes: bool,

    /// Allow swiping sections
    #[arg(long)]
    swipeable_sections: bool,

    /// Return swiped items to their place after reporting them
    #[arg(long)]
    swipe_back: bool,

    /// Treat the right edge as the logical start
    #[arg(long)]
    rtl: bool,

    /// Distance a swipe must exceed to dismiss
    #[arg(long, default_value_t = 8.0)]
    threshold: f32,

    /// Log file (filter with RUST_LOG)
    #[arg(long, default_value = "sectionlist.log")]
    log: PathBuf,
}

fn main() -> io::Result<()> {
    let args = Args::parse();
    init_logging(&args)?;

    let mut cfg = match &args.config {
        Some(path) => config::Config::from_path(path).map_err(io::Error::other)?,
        None => config::Config::load(),
    };

    // Override config with command line args
    cfg.movable_nodes |= args.movable_nodes;
    cfg.movable_sections |= args.movable_sections;
    cfg.nodes_cross_sections |= args.cross_sections;
    cfg.swipeable_nodes |= args.swipeable_nodes;
    cfg.swipeable_sections |= args.swipeable_sections;
    cfg.swipe_back |= args.swipe_back;
    cfg.right_to_left |= args.rtl;

    let format = formats::markdown::MarkdownFormat;
    let headings = input::extract_headings(&args.path, &format).map_err(io::Error::other)?;
    if headings.is_empty() {
        eprintln!("No headings found in {}", args.path.display());
        return Ok(());
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .build()?;
    let mut adapter = SectionAdapter::new(cfg, runtime.handle().clone());
    let submitted = if args.flat {
        adapter.submit_nodes(headings)
    } else {
        input::outline(headings).and_then(|sections| adapter.submit_sections(sections))
    };
    submitted.map_err(io::Error::other)?;

    let mut state = app_state::AppState::new(adapter, args.threshold);
    run_tui(&mut state)
}

fn init_logging(args: &Args) -> io::Result<()> {
    let log_file = std::fs::File::create(&args.log)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(Mutex::new(log_file)).with_ansi(false))
        .init();
    Ok(())
}

fn run_tui(app: &mut app_state::AppState) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {e}");
    } else {
        let json = serde_json::to_string_pretty(&app.view.history).map_err(io::Error::other)?;
        println!("{json}");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut app_state::AppState,
) -> io::Result<()> {
    loop {
        app.sync();
        terminal.draw(|f| ui::draw(f, app))?;

        if !event::poll(Duration::from_millis(50))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let nudge = app.swipe_threshold / 2.0;
        let fling = app.swipe_threshold * 2.0;
        app.message = None;

        let outcome = match key.code {
            KeyCode::Char('q') => {
                if app.move_state != app_state::MoveState::None {
                    app.drop_move();
                }
                return Ok(());
            }
            KeyCode::Up if ctrl => {
                app.drag_up();
                Ok(())
            }
            KeyCode::Down if ctrl => {
                app.drag_down();
                Ok(())
            }
            KeyCode::Up => {
                app.cursor_up();
                Ok(())
            }
            KeyCode::Down => {
                app.cursor_down();
                Ok(())
            }
            KeyCode::Enter | KeyCode::Esc => {
                app.drop_move();
                Ok(())
            }
            KeyCode::Char(' ') => app.toggle_current(),
            KeyCode::Char('h') => app.swipe(-nudge),
            KeyCode::Char('l') => app.swipe(nudge),
            KeyCode::Char('H') => app.swipe(-fling),
            KeyCode::Char('L') => app.swipe(fling),
            _ => Ok(()),
        };
        if let Err(e) = outcome {
            app.message = Some(format!("Error: {e}"));
        }
    }
}
