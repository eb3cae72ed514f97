//! Validated value types.
//!
//! These types enforce their invariants at construction time, so a value
//! that reaches the network layer is already well-formed.

mod api_url;
mod email;
mod redirect;

pub use api_url::ApiUrl;
pub use email::Email;
pub use redirect::Redirect;
