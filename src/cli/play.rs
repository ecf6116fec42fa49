//! Play command implementation - Interactive TUI game.

// The TUI uses intentional casts for display sizes
#![allow(
    clippy::needless_pass_by_value,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap
)]

use super::CliError;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use mazerun::game::{Direction, Game, GameConfig, Grid, Intent, Position, Snapshot, Status};
use mazerun::render::{glyph_at, health_bar, render_text, Glyph, Overlay, HEALTH_BAR_WIDTH};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction as LayoutDirection, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use std::collections::VecDeque;
use std::io::{stdout, Stdout};
use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

/// Keys buffered beyond this are dropped.
const MAX_PENDING_INTENTS: usize = 8;

/// How long the win/loss banner stays up.
const BANNER_DELAY: Duration = Duration::from_secs(2);

type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Execute the play command.
///
/// Once the terminal is restored the final frame is printed, so the outcome
/// stays visible in the shell. Returns the final status so the caller can
/// print a farewell.
///
/// # Errors
///
/// Returns an error if the maze is invalid or the TUI fails.
pub(crate) fn execute(
    maze: PathBuf,
    seed: Option<u64>,
    enemies: usize,
    speed: u64,
) -> Result<Status, CliError> {
    let grid = Grid::load(&maze)?;

    let seed = seed.unwrap_or_else(super::clock_seed);
    let config = GameConfig {
        enemy_count: enemies,
        tick_ms: speed,
        seed: Some(seed),
        ..GameConfig::default()
    };
    log::info!("playing {} with seed {seed}", maze.display());
    if let Ok(json) = serde_json::to_string(&config) {
        log::debug!("config: {json}");
    }

    let mut app = App::new(Game::from_config(grid, config)?);
    let status = run_tui(&mut app)?;
    print!("{}", render_text(app.game.state()));
    Ok(status)
}

/// App state for the TUI.
struct App {
    game: Game,
    snapshot: Snapshot,
    pending: VecDeque<Intent>,
    last_tick: Instant,
}

impl App {
    fn new(game: Game) -> Self {
        let snapshot = game.snapshot();
        Self {
            game,
            snapshot,
            pending: VecDeque::new(),
            last_tick: Instant::now(),
        }
    }

    fn queue(&mut self, intent: Intent) {
        if self.pending.len() < MAX_PENDING_INTENTS {
            self.pending.push_back(intent);
        }
    }

    const fn config(&self) -> &GameConfig {
        &self.game.state().config
    }

    fn time_until_tick(&self) -> Duration {
        Duration::from_millis(self.config().tick_ms).saturating_sub(self.last_tick.elapsed())
    }

    fn tick(&mut self) {
        let intent = self.pending.pop_front().unwrap_or_default();
        self.snapshot = self.game.tick(intent);
        self.last_tick = Instant::now();
    }
}

/// Map a key to an intent.
fn intent_for_key(code: KeyCode) -> Option<Intent> {
    let intent = match code {
        KeyCode::Up | KeyCode::Char('w' | 'W') => Intent::Move(Direction::Up),
        KeyCode::Down | KeyCode::Char('s' | 'S') => Intent::Move(Direction::Down),
        KeyCode::Left | KeyCode::Char('a' | 'A') => Intent::Move(Direction::Left),
        KeyCode::Right | KeyCode::Char('d' | 'D') => Intent::Move(Direction::Right),
        KeyCode::Char('r' | 'R') => Intent::RequestPath,
        KeyCode::Char('k' | 'K') => Intent::ToggleEnemyVisibility,
        KeyCode::Esc | KeyCode::Char('q' | 'Q') => Intent::Quit,
        _ => return None,
    };
    Some(intent)
}

fn run_tui(app: &mut App) -> Result<Status, CliError> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).map_err(|e| CliError::new(e.to_string()))?;

    let result = game_loop(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn game_loop(terminal: &mut Tui, app: &mut App) -> Result<Status, CliError> {
    loop {
        terminal
            .draw(|f| ui(f, app))
            .map_err(|e| CliError::new(e.to_string()))?;

        match app.snapshot.status {
            Status::Running => {}
            Status::Quit => return Ok(Status::Quit),
            status @ (Status::Won | Status::Lost) => {
                thread::sleep(BANNER_DELAY);
                return Ok(status);
            }
        }

        // Collect keys until the next tick is due
        let timeout = app.time_until_tick();
        if event::poll(timeout).map_err(|e| CliError::new(e.to_string()))? {
            if let Event::Key(key) = event::read().map_err(|e| CliError::new(e.to_string()))? {
                if key.kind == KeyEventKind::Press {
                    if let Some(intent) = intent_for_key(key.code) {
                        app.queue(intent);
                    }
                }
            }
        }

        if app.time_until_tick().is_zero() {
            app.tick();
        }
    }
}

fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(LayoutDirection::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(5),    // Maze
            Constraint::Length(3), // Health
            Constraint::Length(3), // Footer
        ])
        .split(f.area());

    render_header(f, chunks[0], app);
    render_maze(f, chunks[1], app);
    render_health(f, chunks[2], app);
    render_footer(f, chunks[3], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let snapshot = &app.snapshot;
    let (status, color) = match snapshot.status {
        Status::Running => ("RUNNING", Color::Cyan),
        Status::Won => ("YOU WIN!", Color::Green),
        Status::Lost => ("GAME OVER", Color::Red),
        Status::Quit => ("QUIT", Color::Gray),
    };

    let config = app.config();
    let title = format!(
        " Mazerun | Tick {} | {} | Seed {} | Speed: {}ms ",
        snapshot.tick,
        status,
        config.seed.unwrap_or_default(),
        config.tick_ms
    );

    let header = Paragraph::new(title)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(header, area);
}

fn render_maze(f: &mut Frame, area: Rect, app: &App) {
    let state = app.game.state();
    let grid = &state.grid;
    let overlay = Overlay {
        player: Some(app.snapshot.player),
        exit: Some(state.exit),
        enemies: &app.snapshot.enemies,
        route: app.snapshot.path.as_deref().unwrap_or(&[]),
    };

    // Show the part of the maze that fits
    let visible_width = usize::from(area.width).saturating_sub(2).min(usize::from(grid.width()));
    let visible_height = usize::from(area.height).saturating_sub(2).min(usize::from(grid.height()));

    let mut lines: Vec<Line> = Vec::with_capacity(visible_height);
    for y in 0..visible_height {
        let spans: Vec<Span> = (0..visible_width)
            .map(|x| {
                let glyph = glyph_at(grid, &overlay, Position::new(x as i32, y as i32));
                Span::styled(glyph.symbol().to_string(), glyph_style(glyph))
            })
            .collect();
        lines.push(Line::from(spans));
    }

    let title = match &app.snapshot.path {
        Some(path) if path.is_empty() => " Maze | no route found ".to_string(),
        Some(path) => format!(" Maze | route: {} moves ", path.len() - 1),
        None => " Maze ".to_string(),
    };

    let maze_widget = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(title));

    f.render_widget(maze_widget, area);
}

fn glyph_style(glyph: Glyph) -> Style {
    let style = Style::default();
    match glyph {
        Glyph::Wall => style.fg(Color::Gray),
        Glyph::Floor => style,
        Glyph::Route => style.fg(Color::Green),
        Glyph::Exit => style.fg(Color::Yellow).add_modifier(Modifier::BOLD),
        Glyph::Enemy => style.fg(Color::Red).add_modifier(Modifier::BOLD),
        Glyph::Player => style.fg(Color::Cyan).add_modifier(Modifier::BOLD),
    }
}

fn render_health(f: &mut Frame, area: Rect, app: &App) {
    let snapshot = &app.snapshot;
    let mut spans = vec![
        Span::styled(
            health_bar(HEALTH_BAR_WIDTH, snapshot.health_percent),
            Style::default().fg(Color::Red),
        ),
        Span::raw(format!(" {}%", snapshot.health_percent)),
    ];
    if snapshot.damage_taken > 0 {
        spans.push(Span::styled(
            format!("  -{} hit!", snapshot.damage_taken),
            Style::default().fg(Color::LightRed).add_modifier(Modifier::BOLD),
        ));
    }
    if !snapshot.enemies_visible {
        spans.push(Span::styled("  enemies hidden", Style::default().fg(Color::DarkGray)));
    }

    let health = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).title(" Health "));

    f.render_widget(health, area);
}

fn render_footer(f: &mut Frame, area: Rect, app: &App) {
    let controls = if app.snapshot.status.is_terminal() {
        " Game over - returning to the shell... "
    } else {
        " [Arrows/WASD] Move  [r] Route  [k] Hide/show enemies  [Esc/q] Quit "
    };

    let footer = Paragraph::new(controls)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(footer, area);
}
