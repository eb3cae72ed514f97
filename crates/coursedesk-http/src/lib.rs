//! coursedesk-http - HTTP session manager for the coursedesk backend.
//!
//! All backend calls go through a [`SessionManager`], which carries the
//! session cookie and recovers a single expired-credential failure per call
//! by refreshing with the stored credential pair.

mod account;
mod api;
mod catalog;
mod checkout;
mod config;
mod session;
mod store;

pub use api::{ApiCall, ApiClient, ApiResponse, RefreshPolicy};
pub use catalog::CoursePages;
pub use config::{ClientConfig, DEFAULT_USER_AGENT};
pub use session::{Attempt, SessionManager};
pub use store::MemoryCredentialStore;
