use chrono::Local;
use travel_buddy::{
    config::{self, database},
    core::{KvStorage, TravelBuddy},
    errors::Result,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenvy::dotenv().ok();

    // 3. Load the application configuration
    let app_config = config::load_default_config()
        .inspect_err(|e| error!("Critical error loading application configuration: {e}"))?;
    info!(
        friends = app_config.friends.len(),
        currency = %app_config.default_currency,
        "Configuration loaded"
    );

    // 4. Initialize database
    let database_url = database::get_database_url();
    if let Some(path) = database_url
        .strip_prefix("sqlite://")
        .map(|rest| rest.split('?').next().unwrap_or(rest))
        .and_then(|file| std::path::Path::new(file).parent())
        .filter(|dir| !dir.as_os_str().is_empty())
    {
        std::fs::create_dir_all(path)?;
    }
    let db = database::create_connection(&database_url)
        .await
        .inspect_err(|e| error!("Failed to initialize database: {e}"))?;
    database::create_tables(&db).await?;
    let storage = KvStorage::new(db);

    // 5. Load every store and refresh trip statuses for today
    let mut app = TravelBuddy::load(&storage, &app_config)
        .await
        .inspect_err(|e| error!("Failed to load stored data: {e}"))?;

    let today = Local::now().date_naive();
    let archived = app.refresh(today).await?;

    let summary = app.summary(today);
    info!(
        %today,
        active_trips = summary.active_trips,
        upcoming_trips = summary.upcoming_trips,
        archived,
        current = summary
            .current_trip
            .as_ref()
            .map_or("none", |t| t.destination.as_str()),
        "Trips"
    );
    info!(
        count = summary.expense_count,
        total = summary.expense_total,
        by_currency = ?summary.expense_totals_by_currency,
        "Expenses"
    );
    info!(
        pending_todos = summary.pending_todos,
        emergency_contacts = summary.emergency_contacts,
        signed_in = summary.signed_in,
        "Ready"
    );

    Ok(())
}
