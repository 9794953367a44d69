pub mod analysis_client;

pub use analysis_client::{AnalysisBackend, AnalysisClient, HealthStatus};
