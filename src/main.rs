use std::sync::Arc;

use smartplan::appsettings::AppSettings;
use smartplan::notify::LogNotificationSink;
use smartplan::scheduling::NotificationScheduler;
use smartplan::storage::InMemoryReminderStorage;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    pretty_env_logger::init();

    let settings = AppSettings::new()?;
    let storage = Arc::new(InMemoryReminderStorage::new());
    let sink = Arc::new(LogNotificationSink);

    let user_id = std::env::var("SMARTPLAN_USER").unwrap_or_else(|_| "local".to_string());
    let running = NotificationScheduler::new(
        storage,
        sink,
        user_id.clone(),
        settings.scheduler.tick_interval(),
        settings.scheduler.refresh_interval(),
    )
    .spawn();
    log::info!("Reminder scheduler running for user {user_id}");

    tokio::signal::ctrl_c().await?;
    running.stop().await;

    Ok(())
}
