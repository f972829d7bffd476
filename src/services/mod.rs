pub mod database;
pub mod metrics;

pub use database::CourseDb;
pub use metrics::{get_metrics, init_metrics};
