/*
[INPUT]:  CLI arguments, YAML configuration file, OS shutdown signals
[OUTPUT]: Interactive order board, one-shot list/move commands, config bootstrap
[POS]:    Binary entry point
[UPDATE]: When changing CLI flags, startup flow, or shutdown handling
*/

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use tableside_adapter::{OrderId, TablesideClient};
use tableside_board::config::LoggingConfig;
use tableside_board::logging::{LOG_BUFFER_CAPACITY, LogBuffer, LogSink, init_tracing};
use tableside_board::tui::{BoardTui, run_board_tui};
use tableside_board::{Board, BoardConfig, DeferredNotifier, DragEnd, SessionContext};

#[derive(Parser, Debug)]
#[command(name = "tableside", version, about = "Order status board for restaurant staff")]
struct Cli {
    #[arg(long = "config", value_name = "PATH", global = true)]
    config_path: Option<PathBuf>,
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "info", global = true)]
    log_level: String,
    #[arg(long = "dry-run", global = true)]
    dry_run: bool,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Interactive kanban board (default)
    Board,
    /// Print the visible columns and exit
    List,
    /// Drop one order onto a column id or another order id
    Move {
        order_id: String,
        target: String,
    },
    /// Write a starter configuration file
    InitConfig {
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    let config_path = match args.config_path.clone() {
        Some(path) => path,
        None => BoardConfig::default_path().context("no config directory; pass --config")?,
    };
    let command = args.command.clone().unwrap_or(Commands::Board);

    if let Commands::InitConfig { force } = command {
        let _guard = init_tracing(&args.log_level, LogSink::Stderr, &LoggingConfig::default())?;
        BoardConfig::write_template(&config_path, force).context("write config template")?;
        info!(config_path = %config_path.display(), "configuration template written");
        println!("{}", config_path.display());
        return Ok(());
    }

    let config = BoardConfig::load(&config_path)
        .with_context(|| format!("load config {}", config_path.display()))?;

    let log_buffer = LogBuffer::handle(LOG_BUFFER_CAPACITY);
    let sink = match command {
        Commands::Board if !args.dry_run => LogSink::Buffer(log_buffer.clone()),
        _ => LogSink::Stderr,
    };
    let _guard = init_tracing(&args.log_level, sink, &config.logging)?;

    info!(
        config_path = %config_path.display(),
        base_url = %config.api.base_url,
        dry_run = args.dry_run,
        "starting tableside"
    );

    if args.dry_run {
        info!("dry-run requested; configuration validated");
        return Ok(());
    }

    let client = TablesideClient::with_config(config.client_config(), &config.api.base_url)
        .context("create api client")?;
    info!(base_url = %client.base_url(), "api client ready");
    let mut session = SessionContext::sign_in(&client, &config.auth).await?;

    match command {
        Commands::Board => {
            let shutdown = CancellationToken::new();
            setup_signal_handlers(shutdown.clone());
            run_board_tui(BoardTui {
                client,
                session,
                poll_interval: config.poll_interval(),
                activation_distance: config.board.activation_distance,
                log_buffer,
                shutdown,
            })
            .await
            .context("run board")?;
        }
        Commands::List => {
            let board = fetch_board(&client).await?;
            print_board(&board);
            session.end();
        }
        Commands::Move { order_id, target } => {
            let board = fetch_board(&client).await?;
            move_order(&client, &board, OrderId::new(order_id), target).await?;
            session.end();
        }
        Commands::InitConfig { .. } => {}
    }

    Ok(())
}

async fn fetch_board(client: &TablesideClient) -> Result<Board> {
    let list = client.list_orders(None).await.context("list orders")?;
    info!(count = list.orders.len(), "orders fetched");
    Ok(Board::new(list.orders))
}

fn print_board(board: &Board) {
    for column in board.visible_columns() {
        println!("{} ({})", column.status.label(), column.len());
        for order in column.orders {
            let table = order.table.as_deref().unwrap_or("take-away");
            println!(
                "  #{:<10} {:<10} {:>3} items {:>10}",
                order.id.as_str(),
                table,
                order.item_count,
                order.total.round_dp(2)
            );
        }
    }
}

/// Run one synthesized drop through the board and persist the result before returning.
async fn move_order(
    client: &TablesideClient,
    board: &Board,
    order_id: OrderId,
    target: String,
) -> Result<()> {
    let notifier = DeferredNotifier::new();
    let event = DragEnd::new(order_id.clone(), Some(target));
    if board.handle_drag_end(&event, &notifier).is_none() {
        println!("order {order_id}: no change");
        return Ok(());
    }

    for (id, status) in notifier.take() {
        let order = client
            .update_order_status(&id, status)
            .await
            .with_context(|| format!("update order {id} to {status}"))?;
        println!("order {} -> {}", order.id, order.status.label());
    }
    Ok(())
}

fn setup_signal_handlers(shutdown: CancellationToken) {
    let shutdown_clone = shutdown.clone();
    tokio::spawn(async move {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "failed to install SIGINT handler");
            return;
        }
        info!("received SIGINT");
        shutdown_clone.cancel();
    });

    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let shutdown_clone = shutdown.clone();
        tokio::spawn(async move {
            match signal(SignalKind::terminate()) {
                Ok(mut stream) => {
                    stream.recv().await;
                    info!("received SIGTERM");
                    shutdown_clone.cancel();
                }
                Err(err) => {
                    warn!(error = %err, "failed to install SIGTERM handler");
                }
            }
        });
    }
}
