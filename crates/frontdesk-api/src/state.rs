//! Application state wiring all services together.
//!
//! AppState holds the concrete service instances used by both CLI
//! commands and the HTTP/WebSocket handlers. Services are generic over
//! repository/notifier traits, but AppState pins them to the concrete
//! infra implementations.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use frontdesk_core::chat::relay::Relay;
use frontdesk_core::service::booking::BookingService;
use frontdesk_core::service::contact::ContactService;
use frontdesk_infra::config::load_config;
use frontdesk_infra::mailer::Mailer;
use frontdesk_infra::sqlite::appointment::SqliteAppointmentRepository;
use frontdesk_infra::sqlite::chat::SqliteChatRepository;
use frontdesk_infra::sqlite::contact::SqliteContactRepository;
use frontdesk_infra::sqlite::pool::{DatabasePool, default_data_dir};
use frontdesk_types::config::Config;

/// Concrete type aliases for the service generics pinned to infra
/// implementations.
pub type ConcreteBookingService = BookingService<SqliteAppointmentRepository, Mailer>;
pub type ConcreteContactService = ContactService<SqliteContactRepository, Mailer>;
pub type ConcreteRelay = Relay<SqliteChatRepository, Mailer>;

/// Shared application state holding all services.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub booking_service: Arc<ConcreteBookingService>,
    pub contact_service: Arc<ConcreteContactService>,
    pub relay: ConcreteRelay,
    pub data_dir: PathBuf,
    pub db_pool: DatabasePool,
}

impl AppState {
    /// Initialize the application state: load config, connect to the
    /// database, wire services.
    pub async fn init() -> anyhow::Result<Self> {
        let data_dir = PathBuf::from(default_data_dir());

        // Ensure data directory exists
        tokio::fs::create_dir_all(&data_dir).await?;

        let config = load_config(&data_dir).await;

        // Initialize database
        let db_url = format!(
            "sqlite://{}?mode=rwc",
            data_dir.join("frontdesk.db").display()
        );
        let db_pool = DatabasePool::new(&db_url).await?;

        // Outbound email. The services share one mailer; the relay owns
        // its own instance since it notifies from inside spawned workers.
        let mailer = Arc::new(Mailer::from_config(&config.mailer));

        let booking_service = BookingService::new(
            Arc::new(SqliteAppointmentRepository::new(db_pool.clone())),
            mailer.clone(),
            config.site.clone(),
            config.admin.alert_email.clone(),
        );

        let contact_service = ContactService::new(
            Arc::new(SqliteContactRepository::new(db_pool.clone())),
            mailer,
            config.site.clone(),
            config.admin.alert_email.clone(),
        );

        let relay = Relay::new(
            SqliteChatRepository::new(db_pool.clone()),
            Mailer::from_config(&config.mailer),
            config.site.clone(),
            config.admin.alert_email.clone(),
            Duration::from_millis(config.chat.reply_delay_ms),
        );

        Ok(Self {
            config,
            booking_service: Arc::new(booking_service),
            contact_service: Arc::new(contact_service),
            relay,
            data_dir,
            db_pool,
        })
    }
}
