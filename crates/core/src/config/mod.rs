pub mod app_config;
pub mod dispatcher;
pub mod observability;
pub mod staff;

pub use app_config::AppConfig;
pub use dispatcher::{DispatcherConfig, LoadLifecycle, TieBreak};
pub use observability::ObservabilityConfig;
pub use staff::StaffConfig;
