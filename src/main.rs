use std::io;
use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};
use tracing::{error, info, warn};

use typewell::app::{App, AppScreen, SettingsField};
use typewell::config::{Config, Mode};
use typewell::event::{AppEvent, EventHandler, TICK_RATE};
use typewell::generator::{FixedSource, PassageSource, TextSource};
use typewell::logging;
use typewell::ui;
use typewell::ui::components::dashboard::Dashboard;
use typewell::ui::components::stats_bar::StatsBar;
use typewell::ui::components::typing_area::TypingArea;
use typewell::ui::layout::AppLayout;

#[derive(Parser)]
#[command(name = "typewell", version, about = "Terminal typing practice with live speed and accuracy")]
struct Cli {
    #[arg(short, long, value_enum, help = "Session mode")]
    mode: Option<Mode>,

    #[arg(short, long, help = "Number of words per session")]
    words: Option<usize>,

    #[arg(short, long, help = "Time limit in seconds for time mode")]
    time: Option<u64>,

    #[arg(short, long, help = "Match letter case when checking input")]
    case_sensitive: bool,

    #[arg(short, long, help = "Type this text instead of a random passage")]
    prompt: Option<String>,

    #[arg(long, help = "Print the last session result as JSON on exit")]
    summary: bool,
}

impl Cli {
    /// CLI flags override the stored config for this run.
    fn apply(&self, config: &mut Config) {
        if let Some(mode) = self.mode {
            config.change_mode(mode);
        }
        if let Some(words) = self.words {
            config.word_count = words;
        }
        if let Some(secs) = self.time {
            config.time_limit_secs = secs;
        }
        if self.case_sensitive {
            config.toggle_case_sensitive(Some(true));
        }
        config.normalize();
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let _log_guard = match logging::init_tracing(&logging::log_dir()) {
        Ok(guard) => Some(guard),
        Err(err) => {
            eprintln!("typewell: logging disabled: {err}");
            None
        }
    };

    let stored = Config::load().unwrap_or_else(|err| {
        warn!(%err, "could not load config, using defaults");
        Config::default()
    });
    let mut config = stored.clone();
    cli.apply(&mut config);

    let source: Box<dyn TextSource> = match cli.prompt.clone() {
        Some(prompt) => Box::new(FixedSource::new(prompt)),
        None => Box::new(PassageSource::from_entropy()),
    };
    let mut app = App::with_run_config(stored, config, source, Some(Config::config_path()))?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(TICK_RATE);

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        error!(?err, "event loop failed");
        eprintln!("Error: {err:?}");
    }

    if cli.summary {
        if let Some(ref result) = app.last_result {
            println!("{}", serde_json::to_string_pretty(result)?);
        }
    }
    info!("exiting");

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    let mut last_tick = Instant::now();
    loop {
        terminal.draw(|frame| render(frame, app))?;

        let event = events.next()?;

        // Ticks are skipped while keys stream in, so measure real time.
        let now = Instant::now();
        app.on_tick(now.duration_since(last_tick));
        last_tick = now;

        match event {
            AppEvent::Key(key) => app.handle_key(key),
            AppEvent::Tick | AppEvent::Resize(_, _) => {}
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    match app.screen {
        AppScreen::Typing => render_typing(frame, app),
        AppScreen::Result => render_result(frame, app),
        AppScreen::Settings => render_settings(frame, app),
    }
}

fn render_typing(frame: &mut ratatui::Frame, app: &App) {
    let layout = AppLayout::new(frame.area());
    let theme = &app.theme;

    frame.render_widget(StatsBar::new(&app.session, &app.config, theme), layout.header);
    frame.render_widget(TypingArea::new(app.session.state(), theme), layout.main);

    let footer = Paragraph::new(Line::from(Span::styled(
        " [ESC] End session  [Tab] New text  [Ctrl-C] Quit ",
        Style::default().fg(theme.text_pending),
    )));
    frame.render_widget(footer, layout.footer);
}

fn render_result(frame: &mut ratatui::Frame, app: &App) {
    if let Some(ref result) = app.last_result {
        let centered = ui::layout::centered_rect(60, 60, frame.area());
        frame.render_widget(Dashboard::new(result, &app.theme), centered);
    }
}

fn render_settings(frame: &mut ratatui::Frame, app: &App) {
    let theme = &app.theme;
    let centered = ui::layout::centered_rect(60, 70, frame.area());

    let block = Block::bordered()
        .title(" Settings ")
        .border_style(Style::default().fg(theme.accent));
    let inner = block.inner(centered);
    block.render(centered, frame.buffer_mut());

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(SettingsField::ALL.len() as u16 * 2),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(inner);

    let header = Paragraph::new(Line::from(Span::styled(
        "  Arrows to navigate, Enter/Right to change",
        Style::default().fg(theme.text_pending),
    )));
    header.render(layout[0], frame.buffer_mut());

    let field_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            SettingsField::ALL
                .iter()
                .map(|_| Constraint::Length(2))
                .collect::<Vec<_>>(),
        )
        .split(layout[1]);

    let selected = app.selected_field();
    for (i, field) in SettingsField::ALL.iter().enumerate() {
        let is_selected = *field == selected;
        let indicator = if is_selected { " > " } else { "   " };
        let label_style = if is_selected {
            Style::default().fg(theme.accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.fg)
        };

        let line = Line::from(vec![
            Span::styled(format!("{indicator}{:<16}", field.label()), label_style),
            Span::styled(
                format!("< {} >", app.settings_value(*field)),
                Style::default().fg(theme.text_pending),
            ),
        ]);
        Paragraph::new(line).render(field_layout[i], frame.buffer_mut());
    }

    let footer = Paragraph::new(Line::from(Span::styled(
        "  [ESC] Save & start",
        Style::default().fg(theme.accent),
    )));
    footer.render(layout[3], frame.buffer_mut());
}
