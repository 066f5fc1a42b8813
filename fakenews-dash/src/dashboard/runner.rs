use anyhow::{Context, Result};
use crossterm::{
    cursor,
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{error, info};

use super::app::App;
use super::controller::{Completion, DashboardState};
use super::events::handle_key_event;
use super::ui;
use crate::backend::NewsBackend;
use crate::models::{DisplayMode, NewsSource};

pub struct DashboardOptions {
    pub source: NewsSource,
    pub dark: bool,
    pub tick_rate: Duration,
}

pub async fn run_dashboard(backend: Arc<dyn NewsBackend>, options: DashboardOptions) -> Result<()> {
    // Setup terminal
    enable_raw_mode().context("failed to enable raw mode")?;
    let restore = TerminalGuard::new(restore_terminal);
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
    let backend_term = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend_term)?;

    let initial = DashboardState {
        source: options.source,
        display_mode: if options.dark {
            DisplayMode::Dark
        } else {
            DisplayMode::Light
        },
        ..Default::default()
    };
    let (mut app, completions) = App::new(backend, initial);
    app.controller.mount();
    info!(source = options.source.as_str(), "dashboard started");

    let res = run_app(&mut terminal, app, completions, options.tick_rate).await;

    drop(terminal);
    drop(restore);

    if let Err(err) = &res {
        error!(error = %err, "dashboard loop failed");
    }
    res.context("dashboard terminated with an error")
}

/// Runs its restore step when dropped, including on early return and panic.
struct TerminalGuard<F: FnMut() -> io::Result<()>> {
    restore: F,
}

impl<F: FnMut() -> io::Result<()>> TerminalGuard<F> {
    fn new(restore: F) -> Self {
        Self { restore }
    }
}

impl<F: FnMut() -> io::Result<()>> Drop for TerminalGuard<F> {
    fn drop(&mut self) {
        if let Err(err) = (self.restore)() {
            error!(error = %err, "failed to restore terminal");
        }
    }
}

fn restore_terminal() -> io::Result<()> {
    first_error([
        disable_raw_mode(),
        execute!(io::stdout(), LeaveAlternateScreen, cursor::Show),
    ])
}

/// Every step has already run; report the first failure.
fn first_error<const N: usize>(results: [io::Result<()>; N]) -> io::Result<()> {
    results.into_iter().collect()
}

async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    mut completions: UnboundedReceiver<Completion>,
    tick_rate: Duration,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, &app))?;

        // The tick bounds how long a finished request waits before it is drawn.
        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    handle_key_event(key, &mut app);
                }
            }
        }

        while let Ok(completion) = completions.try_recv() {
            app.on_completion(completion);
        }

        if app.should_quit {
            info!("dashboard closed");
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn setup(fail_at: usize, restored: &Cell<u32>) -> io::Result<()> {
        let _guard = TerminalGuard::new(|| {
            restored.set(restored.get() + 1);
            Ok(())
        });
        for step in 0..3 {
            if step == fail_at {
                return Err(io::Error::new(io::ErrorKind::Other, "no tty"));
            }
        }
        Ok(())
    }

    #[test]
    fn test_guard_restores_on_early_return() {
        let restored = Cell::new(0);
        assert!(setup(1, &restored).is_err());
        assert_eq!(restored.get(), 1);

        assert!(setup(usize::MAX, &restored).is_ok());
        assert_eq!(restored.get(), 2);
    }

    #[test]
    fn test_guard_restores_on_panic() {
        let restored = Cell::new(0);
        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = TerminalGuard::new(|| {
                restored.set(restored.get() + 1);
                Ok(())
            });
            panic!("draw failed");
        }));
        assert!(outcome.is_err());
        assert_eq!(restored.get(), 1);
    }

    #[test]
    fn test_restore_reports_first_failure_after_all_steps() {
        let steps = Cell::new(0);
        let step = |fail: bool| {
            steps.set(steps.get() + 1);
            if fail {
                Err(io::Error::new(io::ErrorKind::Other, "raw mode"))
            } else {
                Ok(())
            }
        };
        let result = first_error([step(true), step(false)]);
        assert_eq!(steps.get(), 2);
        assert_eq!(result.unwrap_err().to_string(), "raw mode");
        assert!(first_error([Ok(()), Ok(())]).is_ok());
    }
}
