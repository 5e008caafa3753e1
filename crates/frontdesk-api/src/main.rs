//! Frontdesk CLI and server entry point.
//!
//! Binary name: `frontdesk`
//!
//! Parses CLI arguments, initializes the database and services, then
//! either starts the HTTP/WebSocket server or runs a one-shot status
//! report.

mod http;
mod state;

use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use frontdesk_core::chat::repository::ChatRepository;
use frontdesk_infra::sqlite::chat::SqliteChatRepository;
use state::AppState;

#[derive(Parser)]
#[command(name = "frontdesk", version, about = "Marketing site backend: bookings, contact inquiries, live chat")]
struct Cli {
    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP and WebSocket server.
    Serve {
        /// Bind address
        #[arg(long, env = "FRONTDESK_HOST")]
        host: Option<String>,

        /// Bind port
        #[arg(long, env = "FRONTDESK_PORT")]
        port: Option<u16>,
    },
    /// Print stored record counts.
    Status,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,frontdesk=debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    // Initialize application state (config, DB, services)
    let state = AppState::init().await?;

    match cli.command {
        Commands::Serve { host, port } => {
            let host = host.unwrap_or_else(|| state.config.server.host.clone());
            let port = port.unwrap_or(state.config.server.port);

            let addr = format!("{host}:{port}");
            let listener = tokio::net::TcpListener::bind(&addr).await?;

            println!(
                "  {} Frontdesk listening on {}",
                console::style("⚡").bold(),
                console::style(format!("http://{addr}")).cyan()
            );
            println!("  {}", console::style("Press Ctrl+C to stop").dim());

            let router = http::router::build_router(state);

            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown_signal())
                .await?;

            println!("\n  Server stopped.");
        }

        Commands::Status => {
            let chat_repo = SqliteChatRepository::new(state.db_pool.clone());

            let appointments = state.booking_service.count().await?;
            let contacts = state.contact_service.count().await?;
            let sessions = chat_repo.count_sessions().await?;
            let messages = chat_repo.count_messages().await?;

            println!();
            println!("  {} Frontdesk status", console::style("📋").bold());
            println!();
            println!("  Data directory:  {}", state.data_dir.display());
            println!("  Appointments:    {}", console::style(appointments).cyan());
            println!("  Inquiries:       {}", console::style(contacts).cyan());
            println!("  Chat sessions:   {}", console::style(sessions).cyan());
            println!("  Chat messages:   {}", console::style(messages).cyan());
            println!();
        }
    }

    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
