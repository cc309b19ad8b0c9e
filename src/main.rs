mod api;
mod config;
mod controller;
mod logging;
mod model;
mod offline;
mod view;

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tokio::sync::{watch, Mutex};

use api::{ItemCatalogue, Player, QueueControl};
use config::Config;
use controller::{AppController, Redraw, UpdateBridge};
use model::AppModel;
use offline::{OfflineLibrary, OfflinePlayback};
use view::AppView;

#[tokio::main]
async fn main() -> Result<()> {
    if let Err(e) = logging::init_logging() {
        eprintln!("Warning: failed to initialize logging: {e}");
    }

    tracing::info!("=== mellow starting ===");

    let config = Config::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "config unreadable, using defaults");
        Config::default()
    });

    let library = Arc::new(OfflineLibrary::with_sample_data());
    let playback = OfflinePlayback::new();

    let status_rx = playback.status_events();
    let queue_rx = playback.queue_events();
    let history_rx = playback.history_events();

    let model = Arc::new(Mutex::new(AppModel::new()));
    let status = model.lock().await.status.clone();

    let (redraw_tx, redraw_rx) = mpsc::unbounded_channel();
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let bridge = UpdateBridge::new(
        model.clone(),
        status,
        status_rx,
        queue_rx,
        history_rx,
        redraw_tx,
        shutdown_rx,
    )
    .spawn();

    let mouse_enabled = config.player.mouse_enabled;
    let controller = AppController::new(
        model.clone(),
        library as Arc<dyn ItemCatalogue>,
        playback.clone() as Arc<dyn QueueControl>,
        playback as Arc<dyn Player>,
        config.player,
    );

    tracing::info!("starting TUI");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    if mouse_enabled {
        execute!(io::stdout(), EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, model, controller, redraw_rx, mouse_enabled).await;

    // Restore terminal
    let _ = shutdown_tx.send(true);
    let _ = bridge.await;
    disable_raw_mode()?;
    if mouse_enabled {
        execute!(terminal.backend_mut(), DisableMouseCapture)?;
    }
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = ?err, "application error");
    }

    tracing::info!("mellow shutting down");
    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    model: Arc<Mutex<AppModel>>,
    controller: AppController,
    mut redraw_rx: UnboundedReceiver<Redraw>,
    mouse_enabled: bool,
) -> io::Result<()> {
    loop {
        // Fold all pending update notifications into this frame; a burst
        // of channel events becomes one draw.
        while redraw_rx.try_recv().is_ok() {}

        let should_quit = {
            let mut model_guard = model.lock().await;
            terminal.draw(|f| {
                AppView::render(f, &mut model_guard);
            })?;
            model_guard.should_quit()
        };
        if should_quit {
            break;
        }

        // Short poll keeps async updates flowing onto the screen.
        if event::poll(Duration::from_millis(50))? {
            match event::read()? {
                Event::Key(key) => controller.handle_key(key).await,
                Event::Mouse(mouse) if mouse_enabled => controller.handle_mouse(mouse).await,
                _ => {}
            }
        }
    }

    Ok(())
}
