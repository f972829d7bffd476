use course_service::config::CourseConfig;
use course_service::observability::init_tracing;
use course_service::services::init_metrics;
use course_service::startup::Application;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Metrics recorder must be installed before any metrics are recorded
    init_metrics();

    init_tracing("info");

    let config = CourseConfig::load().map_err(|e| {
        tracing::error!("Failed to load configuration: {}", e);
        std::io::Error::other(format!("Configuration error: {}", e))
    })?;

    let app = Application::build(config).await.map_err(|e| {
        tracing::error!("Failed to build application: {}", e);
        std::io::Error::other(format!("Startup error: {}", e))
    })?;

    tracing::info!(port = app.port(), "course-service started");

    app.run_until_stopped().await
}
