//! Service layer - business logic orchestration
//!
//! Services coordinate domain logic and port interactions. Each service
//! focuses on a specific use case or feature area.

mod auth;
mod status;
mod transaction;

pub use auth::AuthService;
pub use status::{AccountSummary, StatusService, StatusSummary};
pub use transaction::TransactionService;
