//! Terminal UI for sikdan that shows a school's meals and nutrients for a chosen day.

mod app;
mod input;
mod logging;
mod ui;
mod view;

use std::{io, sync::Arc, time::Duration as StdDuration};

use anyhow::Result;
use crossterm::{
    event::{self, Event as CEvent},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use reqwest::Client;
use sikdan_core::service::SikdanService;
use sikdan_provider_neis as neis;
use tracing::info;

use crate::app::App;
use crate::input::Action;

#[tokio::main]
async fn main() -> Result<()> {
    let _log_guard = logging::init()?;

    // HTTP + service setup
    let client = Client::builder().user_agent("sikdan/0.1").build()?;
    let service = Arc::new(SikdanService::new(neis::plugin(client)));
    info!(school = %service.school().name, "starting");

    // App state
    let app = App::new(service);

    // Terminal init
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run event loop
    let res = run(&mut terminal, app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

async fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, mut app: App) -> Result<()> {
    // Show today's meals without waiting for input
    search(terminal, &mut app).await?;

    loop {
        terminal.draw(|frame| ui::draw(frame, &app))?;

        // Poll for input (non-blocking, small timeout to keep CPU low)
        if event::poll(StdDuration::from_millis(100))?
            && let CEvent::Key(key) = event::read()?
        {
            match input::handle_key_event(key, &mut app) {
                Action::Quit => break,
                Action::None => {}
                Action::Search => search(terminal, &mut app).await?,
            }
        }
    }

    Ok(())
}

/// Run one search to completion. Keys typed meanwhile wait in the terminal
/// queue, so searches never overlap.
async fn search(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    let Some(token) = app.begin_search() else {
        return Ok(());
    };
    terminal.draw(|frame| ui::draw(frame, app))?;

    let result = app.service.meals_for(&token).await;
    app.finish_search(result);

    Ok(())
}
