pub mod config;
pub mod errors;
pub mod logging;
pub mod models;
pub mod traits;

pub use crate::config::{
    AppConfig, DispatcherConfig, LoadLifecycle, ObservabilityConfig, StaffConfig, TieBreak,
};
pub use errors::*;
pub use models::{DispatchEvent, Payload, Speciality, StaffId, StaffLoad};
pub use traits::{Channel, SelectionStrategy, StaffCandidate};

/// 统一的Result类型
pub type DispatchResult<T> = std::result::Result<T, DispatchError>;
