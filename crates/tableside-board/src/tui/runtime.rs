/*
[INPUT]:  Signed-in session, API client, order feed, notifier outcomes, terminal input
[OUTPUT]: Ratatui board run loop
[POS]:    TUI runtime loop
[UPDATE]: When changing what the loop waits on or how commands are carried out
*/

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{Event as CrosstermEvent, KeyCode, KeyEventKind, KeyModifiers};
use tableside_adapter::{Order, OrderApi, OrderId, TablesideClient};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use super::app::{BoardApp, Command};
use super::events::{handle_key_event, handle_mouse_event};
use super::terminal::BoardTerminal;
use super::ui::draw_ui;
use crate::feed::OrderFeed;
use crate::logging::LogBufferHandle;
use crate::notifier::ApiNotifier;
use crate::session::{SessionContext, ToastLevel};

const UI_TICK_INTERVAL: Duration = Duration::from_millis(250);
const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(200);

/// Everything the board TUI needs from startup.
pub struct BoardTui {
    pub client: TablesideClient,
    pub session: SessionContext,
    pub poll_interval: Duration,
    pub activation_distance: f32,
    pub log_buffer: LogBufferHandle,
    pub shutdown: CancellationToken,
}

enum UiEvent {
    Input(CrosstermEvent),
}

type DetailsResult = (OrderId, std::result::Result<Order, String>);

pub async fn run_board_tui(ctx: BoardTui) -> Result<()> {
    let BoardTui {
        client,
        session,
        poll_interval,
        activation_distance,
        log_buffer,
        shutdown,
    } = ctx;

    let api: Arc<dyn OrderApi> = Arc::new(client.clone());
    let feed = OrderFeed::spawn(api.clone(), poll_interval);
    let mut feed_rx = feed.subscribe();
    let (notifier, mut outcomes) = ApiNotifier::new(api.clone());
    let (details_tx, mut details_rx) = mpsc::unbounded_channel::<DetailsResult>();

    let mut terminal = BoardTerminal::enter()?;
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let input_shutdown = CancellationToken::new();
    let input_shutdown_clone = input_shutdown.clone();

    tokio::task::spawn_blocking(move || {
        while !input_shutdown_clone.is_cancelled() {
            if crossterm::event::poll(INPUT_POLL_INTERVAL).unwrap_or(false) {
                if let Ok(event) = crossterm::event::read() {
                    let _ = event_tx.send(UiEvent::Input(event));
                }
            }
        }
    });

    let mut app = BoardApp::new(session, activation_distance, log_buffer);
    let mut tick = tokio::time::interval(UI_TICK_INTERVAL);
    let mut feed_closed = false;
    let mut should_quit = false;

    while !should_quit {
        tokio::select! {
            _ = shutdown.cancelled() => {
                info!("shutdown requested; leaving board");
                should_quit = true;
            }
            _ = tick.tick() => app.on_tick(Instant::now()),
            changed = feed_rx.changed(), if !feed_closed => {
                if changed.is_err() {
                    feed_closed = true;
                    app.status_message = String::from("order feed stopped");
                } else {
                    let state = feed_rx.borrow_and_update().clone();
                    app.apply_feed_state(&state);
                }
            }
            Some(outcome) = outcomes.recv() => {
                app.on_outcome(outcome);
                feed.refresh_now();
            }
            Some((order_id, loaded)) = details_rx.recv() => match loaded {
                Ok(order) => {
                    app.dialogs.update_details(order);
                }
                Err(err) => app.session.toasts_mut().push(
                    ToastLevel::Error,
                    format!("could not load order {order_id}: {err}"),
                ),
            },
            maybe_event = event_rx.recv() => {
                let command = match maybe_event {
                    Some(UiEvent::Input(CrosstermEvent::Key(key))) if key.kind == KeyEventKind::Press => {
                        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                            Command::Quit
                        } else {
                            handle_key_event(&mut app, key.code, &notifier)
                        }
                    }
                    Some(UiEvent::Input(CrosstermEvent::Mouse(mouse))) => {
                        handle_mouse_event(&mut app, mouse, &notifier)
                    }
                    Some(_) => Command::None,
                    None => Command::Quit,
                };

                match command {
                    Command::None => {}
                    Command::Quit => should_quit = true,
                    Command::Refresh => feed.refresh_now(),
                    Command::LoadDetails(order_id) => {
                        let api = api.clone();
                        let details_tx = details_tx.clone();
                        tokio::spawn(async move {
                            let loaded = api.fetch_order(&order_id).await.map_err(|err| err.to_string());
                            let _ = details_tx.send((order_id, loaded));
                        });
                    }
                    Command::SignOut => {
                        if let Err(err) = app.session.sign_out(&client).await {
                            warn!(error = %err, "remote sign-out failed; local session cleared");
                        }
                        should_quit = true;
                    }
                }
            }
        }

        terminal.draw(|frame| draw_ui(frame, &mut app))?;
    }

    input_shutdown.cancel();
    feed.shutdown().await;
    Ok(())
}
