use anyhow::Result;
use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use rand::rngs::StdRng;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{io, sync::Arc, time::Duration};

use present_checker::{
    config::{CheckerKind, Settings},
    flow::{CheckEngine, FlowEvent, FlowState},
    follow::{self, FollowChecker, ManualFollowChecker},
    leaderboard::{FileStore, LeaderboardStore},
    models::PresentCheckError,
    reward::RewardGenerator,
    tui::{ui, App, AppMessage, Event, EventHandler},
};

type Engine = CheckEngine<StdRng>;

pub async fn run_tui(settings: Settings) -> Result<()> {
    // Silence logging to prevent screen corruption
    disable_logging_output();

    // The manual checker gets its confirmation through the UI instead of
    // a terminal prompt.
    let (checker, confirm) = match settings.checker.kind {
        CheckerKind::Manual => {
            let (checker, tx) = ManualFollowChecker::channel(settings.target.handle.clone());
            (Arc::new(checker) as Arc<dyn FollowChecker>, Some(tx))
        }
        _ => (follow::build_checker(&settings)?, None),
    };

    let store = LeaderboardStore::load(
        Box::new(FileStore::new(&settings.leaderboard.path)),
        settings.leaderboard.key.clone(),
    );
    let engine = Arc::new(Engine::new(
        checker,
        RewardGenerator::from_entropy(),
        store,
        settings.target.handle.clone(),
    ));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let mut app = App::new(
        settings.target.handle.clone(),
        settings.target.profile_url.clone(),
        engine.leaderboard().await,
        confirm,
    );
    let events = EventHandler::new(250);
    let reveal_delay = Duration::from_secs(settings.reveal.delay_seconds);

    let res = run_app(&mut terminal, &mut app, events, engine, reveal_delay).await;

    // Always restore terminal state, even if there was an error
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Application error: {}", err);
        return Err(err);
    }
    Ok(())
}

fn disable_logging_output() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

    let null_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::sink)
        .with_filter(tracing_subscriber::filter::LevelFilter::OFF);

    let _ = tracing_subscriber::registry().with(null_layer).try_init();
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    events: EventHandler,
    engine: Arc<Engine>,
    reveal_delay: Duration,
) -> Result<()> {
    loop {
        app.drain_messages();
        app.sync_reveal_timer(reveal_delay);

        terminal.draw(|frame| ui::draw(frame, app))?;

        if app.should_quit {
            return Ok(());
        }

        match events.next()? {
            Event::Key(key) => handle_key(app, &engine, key),
            Event::Resize(_, _) | Event::Tick => {}
        }
    }
}

fn handle_key(app: &mut App, engine: &Arc<Engine>, key: KeyEvent) {
    if key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q'))
    {
        app.quit();
        return;
    }

    if app.confirm_pending {
        match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => app.answer_confirm(true),
            KeyCode::Char('n') | KeyCode::Char('N') => app.answer_confirm(false),
            KeyCode::Esc => app.reset(),
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Enter => {
            if let Some(handle) = app.submit() {
                spawn_check(app, engine.clone(), handle);
            }
        }
        KeyCode::Esc => app.reset(),
        KeyCode::Char(' ') => {
            if matches!(app.flow, FlowState::Revealed { .. }) {
                app.apply(FlowEvent::RevealElapsed);
            }
        }
        KeyCode::Char(c) => app.push_char(c),
        KeyCode::Backspace => app.pop_char(),
        _ => {}
    }
}

fn spawn_check(app: &App, engine: Arc<Engine>, handle: String) {
    let tx = app.message_sender();
    tokio::spawn(async move {
        match engine.run_check(&handle).await {
            Ok(outcome) => {
                let _ = tx.send(AppMessage::Board(outcome.leaderboard.clone()));
                let _ = tx.send(AppMessage::Flow(FlowEvent::Granted {
                    result: outcome.result,
                }));
            }
            Err(PresentCheckError::NotFollowing { handle, .. }) => {
                let _ = tx.send(AppMessage::Flow(FlowEvent::Denied { handle }));
            }
            Err(e) => {
                let _ = tx.send(AppMessage::Flow(FlowEvent::Failed {
                    message: e.user_message(engine.target_handle()),
                    handle,
                }));
            }
        }
    });
}
