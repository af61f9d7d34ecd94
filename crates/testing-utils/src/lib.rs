//! # Roster Testing Utils
//!
//! Shared testing utilities for the roster dispatcher workspace.
//!
//! - **Mock Channels**: `mockall` doubles for the `Channel` trait
//! - **Test Data Builders**: duty and order events bound to in-memory channels
//! - **Helpers**: simulated workers and condition polling
//!
//! ```rust
//! use roster_testing_utils::{OrderBuilder, StaffBuilder};
//! ```

pub mod builders;
pub mod helpers;
pub mod mocks;

pub use builders::*;
pub use helpers::*;
pub use mocks::*;
