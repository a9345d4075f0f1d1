//! Issue Tracker Hydration Handoff
//!
//! Carries data fetched during the server render into the browser runtime
//! so the first client render does not fetch it again.
//!
//! - [`HydrationScope`]: request-scoped, single-use slots
//!   (`store` once, `drain` once)
//! - [`EmbeddedGlobals`]: the `window.__INITIAL_DATA__` /
//!   `window.__USER_DATA__` wire format
//!
//! Every consumer must still work when a slot is empty: draining is an
//! optimisation, the fetch fallback is the contract.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod error;
mod globals;
mod scope;
mod slot;

pub use error::{HydrationError, Result};
pub use globals::{encode_slot, script_safe_json, EmbeddedGlobals, SCRIPT_ID};
pub use scope::HydrationScope;
pub use slot::HydrationSlot;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
