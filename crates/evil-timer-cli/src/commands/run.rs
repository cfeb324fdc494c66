use std::io;
use std::time::{Duration, Instant};

use clap::Args;
use crossterm::{
    cursor,
    event::{self, Event as TermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use evil_timer_core::{Config, Mode, Stopwatch, Tab};
use ratatui::{backend::CrosstermBackend, style::Color, Terminal};

use crate::ui;

#[derive(Args)]
pub struct RunArgs {
    /// Mode to start in (defaults to the configured mode)
    #[arg(long)]
    pub mode: Option<Mode>,
    /// Tab to open on (world-clock, alarms, stopwatch, timers)
    #[arg(long)]
    pub tab: Option<Tab>,
}

/// Everything the terminal shell renders from.
pub struct App {
    pub stopwatch: Stopwatch,
    pub tab: Tab,
    pub accent: Color,
    quit: bool,
}

impl App {
    pub fn new(stopwatch: Stopwatch, tab: Tab, accent: Color) -> Self {
        Self {
            stopwatch,
            tab,
            accent,
            quit: false,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.quit = true
            }
            KeyCode::Tab => self.tab = self.tab.next(),
            KeyCode::BackTab => self.tab = self.tab.prev(),
            _ => match self.tab {
                Tab::Stopwatch => self.handle_stopwatch_key(key.code),
                Tab::Timers => self.handle_mode_key(key.code),
                Tab::WorldClock | Tab::Alarms => {}
            },
        }
    }

    fn handle_stopwatch_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char(' ') | KeyCode::Enter => {
                self.stopwatch.toggle();
            }
            KeyCode::Char('r') => {
                self.stopwatch.reset();
            }
            _ => {}
        }
    }

    fn handle_mode_key(&mut self, code: KeyCode) {
        let mode = self.stopwatch.mode();
        let selected = match code {
            KeyCode::Left | KeyCode::Char('h') => Some(mode.prev()),
            KeyCode::Right | KeyCode::Char('l') => Some(mode.next()),
            KeyCode::Char(c @ '1'..='3') => {
                Mode::ALL.get((c as usize) - ('1' as usize)).copied()
            }
            _ => None,
        };
        if let Some(mode) = selected {
            self.stopwatch.set_mode(mode);
        }
    }
}

const ORANGE: Color = Color::Rgb(255, 149, 0);

/// Map a configured color name onto a terminal color.
fn parse_accent(name: &str) -> Color {
    if name.eq_ignore_ascii_case("orange") {
        return ORANGE;
    }
    name.parse::<Color>().unwrap_or_else(|_| {
        tracing::warn!(color = name, "unknown accent color, using orange");
        ORANGE
    })
}

pub fn run(args: RunArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    let mut settings = config.stopwatch_settings();
    if let Some(mode) = args.mode {
        settings.mode = mode;
    }
    let tab = args.tab.unwrap_or(config.ui.start_tab);
    let accent = parse_accent(&config.ui.accent_color);

    let mut app = App::new(Stopwatch::new(settings), tab, accent);
    let tick_rate = Duration::from_secs_f64(settings.tick_interval_secs);

    run_shell(&mut app, |app| run_in_terminal(app, tick_rate))?;
    Ok(())
}

/// Run `shell`, then tear the stopwatch down however it ended.
fn run_shell(app: &mut App, shell: impl FnOnce(&mut App) -> io::Result<()>) -> io::Result<()> {
    let res = shell(app);
    let abandoned = app.stopwatch.teardown();
    tracing::info!(abandoned, ok = res.is_ok(), "shell closed");
    res
}

/// Raw mode plus the alternate screen, restored on drop.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        // From here on, dropping the guard undoes raw mode.
        let guard = TerminalGuard;
        execute!(io::stdout(), EnterAlternateScreen)?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(e) = disable_raw_mode() {
            tracing::warn!(error = %e, "failed to leave raw mode");
        }
        if let Err(e) = execute!(io::stdout(), LeaveAlternateScreen, cursor::Show) {
            tracing::warn!(error = %e, "failed to restore the screen");
        }
    }
}

fn run_in_terminal(app: &mut App, tick_rate: Duration) -> io::Result<()> {
    let _guard = TerminalGuard::enter()?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    run_app(&mut terminal, app, tick_rate)
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    tick_rate: Duration,
) -> io::Result<()> {
    let mut last_tick = Instant::now();

    while !app.quit {
        terminal.draw(|f| ui::render(f, app))?;

        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            if let TermEvent::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }

        let elapsed = last_tick.elapsed();
        if elapsed >= tick_rate {
            for event in app.stopwatch.on_tick(elapsed.as_secs_f64()) {
                tracing::debug!(kind = event.kind(), "stopwatch event");
            }
            last_tick = Instant::now();
        }
    }

    Ok(())
}
