//! Issue Tracker UI
//!
//! Page controllers and the server that renders them.
//!
//! - [`pages`]: list, edit, add, report, filter, search and session
//!   controllers
//! - [`render`]: one server-side render, from route match to HTML with
//!   the hydration globals embedded
//! - [`server`]: warp routes (`/env.js` plus the catch-all page route)
//! - [`config`]: environment and command-line configuration
//! - [`toast`]: user notifications, also the error reporter for page
//!   fetches

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod config;
pub mod error;
pub mod logging;
pub mod pages;
pub mod render;
pub mod routes;
pub mod server;
pub mod template;
pub mod toast;
pub mod views;

pub use config::{ClientEnv, UiConfig};
pub use error::{ConfigError, Result, UiError};
pub use pages::{Navigate, PageContext};
pub use render::{Rendered, Renderer};
pub use routes::Route;
pub use toast::{Toast, ToastKind, ToastQueue};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
