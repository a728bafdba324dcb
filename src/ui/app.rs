use std::io;
use std::path::Path;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use crate::refresh::{run_cycle, DashboardState, RefreshStatus};
use crate::scheduler::{RefreshScheduler, REFRESH_INTERVAL};

/// How long one loop pass waits for input before checking the scheduler
/// again. Keeps tick latency well under the refresh interval without
/// busy-looping.
const INPUT_POLL: Duration = Duration::from_millis(250);

/// Run the dashboard until the user quits.
pub fn run(db_path: &Path) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = event_loop(&mut terminal, db_path);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    result
}

/// Single-threaded cooperative loop: the input poll timeout doubles as the
/// scheduler's clock, so timer ticks and key handling are serialized and a
/// tick can never start while a cycle's render is still executing.
fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    db_path: &Path,
) -> io::Result<()> {
    let mut state = DashboardState::default();
    let mut scheduler = RefreshScheduler::new(REFRESH_INTERVAL);

    // Initial fill, same as pressing refresh right after startup.
    run_cycle(db_path, &mut state);

    loop {
        if scheduler.poll(Instant::now()) {
            run_cycle(db_path, &mut state);
        }

        terminal.draw(|frame| super::render(frame, &state, &scheduler))?;

        if !event::poll(INPUT_POLL)? {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Char('r') => run_cycle(db_path, &mut state),
                KeyCode::Char('a') => {
                    if scheduler.is_auto() {
                        scheduler.stop();
                        state.status = RefreshStatus::AutoStopped;
                        log::info!("auto-refresh stopped");
                    } else {
                        scheduler.start(Instant::now());
                        log::info!("auto-refresh started");
                    }
                }
                _ => {}
            }
        }
    }
}
