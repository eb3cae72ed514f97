//! Account types.
//!
//! This module defines the bodies exchanged by the account endpoints and the
//! client-side validation applied to forms before they are sent.
//! The operations themselves live on the session manager.

mod forms;
mod types;

pub use forms::{MIN_PASSWORD_LEN, PasswordReset, ProfileUpdate, Registration};
pub use types::{Purchase, PurchaseItem, ServerMessage, UserProfile};
