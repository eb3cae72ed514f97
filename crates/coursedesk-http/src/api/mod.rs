//! Backend API client.
//!
//! This module provides the HTTP transport and the endpoint table.

mod client;
pub(crate) mod endpoints;

pub use client::{ApiCall, ApiClient, ApiResponse, RefreshPolicy};
