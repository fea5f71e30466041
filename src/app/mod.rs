//! TUI Application module

mod events;
mod state;
mod ui;

pub use state::AppState;

use anyhow::Result;
use crossterm::{
    event::{self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use std::io::stdout;
use std::time::{Duration, Instant};
use tokio::runtime::Runtime;

use crate::api::{PostingApi, XClient};
use crate::config::Config;
use crate::credentials::Credentials;

/// Run the composer TUI
pub fn run(rt: &Runtime, config: Config, credentials: Credentials) -> Result<()> {
    let client = XClient::new(credentials, &config.api_base, config.request_timeout())?;

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let mut state = AppState::new(config);

    // Main loop
    let result = run_app(&mut terminal, &mut state, &client, rt);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableBracketedPaste,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    // Save config on exit
    state.config.save()?;

    result
}

fn run_app<A: PostingApi>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    state: &mut AppState,
    api: &A,
    rt: &Runtime,
) -> Result<()> {
    loop {
        // Draw UI
        terminal.draw(|frame| ui::render(frame, state))?;

        // Send after the draw so "Sending..." is on screen while we block
        if let Some(text) = state.pending_submit.take() {
            let result = rt.block_on(api.create_post(&text));
            if let Err(e) = state.flow.finish(result, Instant::now()) {
                tracing::warn!("Submission failed: {}", e);
            }
            continue;
        }

        // Handle events
        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    events::handle_key(state, key);
                }
                Event::Paste(text) => events::handle_paste(state, &text),
                _ => {}
            }
        }

        // Deferred cleanup after feedback
        state.flow.poll(&mut state.draft, Instant::now());

        if state.should_quit {
            break;
        }
    }

    Ok(())
}
