// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Terminal event loop: draw, poll keys, refresh output on every tick.

use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::Terminal;
use trun_adapters::{Discovery, EditorAdapter, TestBackend};
use trun_core::Clock;
use trun_engine::Session;

use crate::keys::{self, Action, KeyContext};
use crate::view::{self, Screen};

/// Owns the terminal for the lifetime of the UI. Dropping it restores the
/// terminal even when the loop exits with an error.
pub struct Tui<B, D, E, C> {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    session: Session<B, D, E, C>,
    tick: Duration,
    last_tick: Instant,
}

impl<B, D, E, C> Tui<B, D, E, C>
where
    B: TestBackend,
    D: Discovery,
    E: EditorAdapter,
    C: Clock,
{
    /// Enter raw mode and the alternate screen.
    pub fn new(session: Session<B, D, E, C>, tick: Duration) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Ok(Self { terminal, session, tick, last_tick: Instant::now() })
    }

    /// Run until the user quits.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            let size = self.terminal.size()?;
            let area = Rect::new(0, 0, size.width, size.height);
            self.session.set_viewport_rows(view::output_rows(area));

            let screen = Screen::capture(&self.session);
            self.terminal.draw(|frame| view::render(frame, &screen))?;

            let timeout = self.tick.checked_sub(self.last_tick.elapsed()).unwrap_or(Duration::ZERO);
            if event::poll(timeout)? {
                if let Event::Key(key) = event::read()? {
                    let ctx = KeyContext {
                        focus: self.session.focus(),
                        filtering: self.session.is_filtering(),
                        searching: self.session.output().is_searching(),
                    };
                    match keys::map_key(key, ctx) {
                        Some(Action::Quit) => break,
                        Some(Action::Apply(intent)) => self.session.apply(intent),
                        None => {}
                    }
                }
            }

            if self.last_tick.elapsed() >= self.tick {
                self.session.refresh_output();
                self.last_tick = Instant::now();
            }
        }
        tracing::info!("quit requested");
        self.shutdown()
    }

    fn shutdown(&mut self) -> io::Result<()> {
        terminal::disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()
    }
}

impl<B, D, E, C> Drop for Tui<B, D, E, C> {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
    }
}
