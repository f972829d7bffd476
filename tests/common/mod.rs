//! Common test utilities for course-service integration tests.

use course_service::config::{CommonConfig, CourseConfig, MongoConfig};
use course_service::startup::Application;
use std::sync::Once;
use uuid::Uuid;

static INIT: Once = Once::new();

/// Initialize tracing for tests (only once).
pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter("info,course_service=debug")
            .with_test_writer()
            .try_init()
            .ok();
    });
}

pub struct TestApp {
    pub address: String,
    pub client: reqwest::Client,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }
}

/// Spawn the application against a uniquely-named test database and
/// return an HTTP client pointed at it.
pub async fn spawn_app() -> TestApp {
    init_tracing();

    let uri = std::env::var("TEST_MONGODB_URI")
        .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());

    // A fresh database per test keeps id assignment starting at 1.
    let database = format!("courses_test_{}", Uuid::new_v4().simple());

    let config = CourseConfig {
        common: CommonConfig { port: 0 },
        mongodb: MongoConfig { uri, database },
    };

    let app = Application::build(config)
        .await
        .expect("Failed to build application");

    let address = format!("http://127.0.0.1:{}", app.port());

    // The listener is already bound, so requests queue until serve runs.
    tokio::spawn(async move {
        app.run_until_stopped().await.ok();
    });

    TestApp {
        address,
        client: reqwest::Client::new(),
    }
}
