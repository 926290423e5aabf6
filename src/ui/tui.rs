// src/ui/tui.rs
//! Terminal session: plays a file and drives the render loop until quit.

use std::{
    io::{self, Stdout},
    path::Path,
    time::{Duration, Instant},
};

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event as CEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use super::chart::{ChartSink, Theme};
use super::keybindings::{key_to_action, PlayerAction};
use crate::audio::{Capture, MusicPlayer};
use crate::config::ChirpvizConfig;
use crate::render::RenderLoop;

type TerminalSink = ChartSink<CrosstermBackend<Stdout>>;

/// Upper bound on how long input polling may block between frames.
const MAX_POLL: Duration = Duration::from_millis(100);

/// Play `file` and show the visualizer until the user quits.
pub fn run(file: &Path, config: &ChirpvizConfig) -> Result<()> {
    let theme = Theme::from_config(&config.theme)?;

    let mut player = MusicPlayer::new();
    // Surface a missing audio graph before touching the terminal
    let capture = Capture::create(&player, config.analysis).context("cannot analyse audio output")?;
    player.play(file)?;

    let result = with_terminal_restored(
        || {
            enable_raw_mode()?;
            let mut stdout = io::stdout();
            execute!(stdout, EnterAlternateScreen)?;
            let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
            terminal.clear()?;
            drive(&mut player, file, capture, ChartSink::new(terminal, theme))
        },
        || {
            let raw = disable_raw_mode();
            execute!(io::stdout(), LeaveAlternateScreen)?;
            Ok(raw?)
        },
    );

    player.stop();
    result
}

/// Run `session`, then `restore` whether or not the session failed.
/// A session error takes precedence over a restore error.
fn with_terminal_restored<T>(
    session: impl FnOnce() -> Result<T>,
    restore: impl FnOnce() -> Result<()>,
) -> Result<T> {
    let result = session();
    let restored = restore();
    let value = result?;
    restored?;
    Ok(value)
}

/// Event loop: waits for input until the next frame is due, then polls the render loop.
fn drive(player: &mut MusicPlayer, file: &Path, capture: Capture, sink: TerminalSink) -> Result<()> {
    let mut render_loop = RenderLoop::new(None);
    render_loop.start(capture, sink);
    tracing::info!("Visualizer running for {}", file.display());

    loop {
        let now = Instant::now();
        let timeout = render_loop
            .next_deadline()
            .map(|deadline| deadline.saturating_duration_since(now))
            .unwrap_or(MAX_POLL)
            .min(MAX_POLL);

        if event::poll(timeout)? {
            if let CEvent::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key_to_action(&key) {
                        PlayerAction::TogglePause => {
                            if player.is_paused() {
                                player.resume();
                            } else {
                                player.pause();
                            }
                        }
                        PlayerAction::Stop => player.stop(),
                        PlayerAction::Replay => player.play(file)?,
                        PlayerAction::TogglePanel(panel) => {
                            if let Some(sink) = render_loop.sink_mut() {
                                sink.toggle_panel(panel);
                            }
                        }
                        PlayerAction::Quit => break,
                        PlayerAction::None => {}
                    }
                }
            }
        }

        if let Some(sink) = render_loop.sink_mut() {
            sink.set_status(status_line(player, file));
        }
        render_loop.poll(Instant::now());
    }

    if let Some((_, mut sink)) = render_loop.stop() {
        sink.terminal_mut().show_cursor()?;
    }
    tracing::info!("Visualizer stopped after {} frames", render_loop.frames());
    Ok(())
}

fn status_line(player: &MusicPlayer, file: &Path) -> String {
    let state = match (player.is_playing(), player.is_paused()) {
        (true, true) => "⏸ Paused",
        (true, false) => "▶ Playing",
        (false, _) => "■ Stopped",
    };
    let name = file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| file.display().to_string());

    format!("{state}  {name}   [space] pause  [s] stop  [r] replay  [1/2] panels  [q] quit")
}
