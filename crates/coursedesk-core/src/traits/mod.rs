//! Core traits for credential persistence and paged results.

mod pages;
mod store;

pub use pages::PageStream;
pub use store::CredentialStore;
