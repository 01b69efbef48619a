use std::io::{self, stdout};
use std::time::{Duration, Instant};

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::prelude::*;

mod api;
mod app;
mod boot;
mod cli;
mod config;
mod content;
mod coordinator;
mod hero;
mod input;
mod models;
mod theme;
mod ui;
mod widgets;

use app::App;

fn main() -> anyhow::Result<()> {
    let cli = cli::parse_args()?;
    let (mut site_config, config_source) = config::load(cli.config_path.as_deref())?;
    if let Some(style) = cli.hero_style {
        site_config.hero_style = style;
    }
    if let Some(url) = cli.api_url {
        site_config.api_base_url = url;
    }
    if cli.debug {
        site_config.debug_logging = true;
    }

    // The terminal owns stdout, so diagnostics go to a file, and only
    // when asked for.
    let _log_guard = if site_config.debug_logging {
        Some(init_logging()?)
    } else {
        None
    };
    if let Some(path) = config_source {
        tracing::info!("loaded config from {}", path.display());
    }

    let (api, api_events) = api::spawn(site_config.api_base_url.clone());
    let content = content::default_content();

    // Setup terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    stdout().execute(EnableMouseCapture)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let size = terminal.size()?;
    let mut app = App::new(site_config, content, api, api_events, size.width, size.height);
    app.start(Instant::now());

    let result = run(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    stdout().execute(DisableMouseCapture)?;
    stdout().execute(LeaveAlternateScreen)?;

    result
}

fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> anyhow::Result<()> {
    loop {
        let now = Instant::now();
        app.tick(now);
        terminal.draw(|frame| ui::render(frame, app, now))?;

        if event::poll(Duration::from_millis(33))? {
            match event::read()? {
                Event::Key(key) => input::handle_key(app, key, Instant::now()),
                Event::Mouse(mouse) => input::handle_mouse(app, mouse, Instant::now()),
                Event::Resize(cols, rows) => app.viewport = (cols, rows),
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}

fn init_logging() -> anyhow::Result<tracing_appender::non_blocking::WorkerGuard> {
    let appender = tracing_appender::rolling::never(".", "blockhead-tui.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .ok();
    Ok(guard)
}
