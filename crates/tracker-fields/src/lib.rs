//! Controlled Field Synchronizers
//!
//! Every specialized input (text, date, integer) reconciles three views of
//! one value:
//!
//! - the **canonical** value the owning form stores (`Option<T>`)
//! - the **edit text** the user is typing
//! - the **display** text shown while the field is idle
//!
//! The owning form is told about a new value only when an edit is committed
//! (focus loss) and the text parses. Validity transitions are reported
//! separately so the form can block submission while a field is invalid.
//!
//! # Architecture
//!
//! ```text
//! on_focus ──► focused ──on_keystroke──► edit_text ──on_commit──► parse
//!                                                                  │
//!                        ValidityChanged(bool) ◄── transition? ────┤
//!                        Committed(Option<T>)  ◄── valid? ─────────┘
//! ```
//!
//! The state machine is plain data with pure transitions; whichever UI
//! layer hosts it forwards focus, keystroke and blur events and renders
//! [`FieldSync::rendered`].
//!
//! # Example
//!
//! ```rust
//! use tracker_fields::{FieldEvent, FieldSync, IntegerCodec};
//!
//! let mut effort = FieldSync::new(IntegerCodec, Some(3));
//! effort.on_focus();
//! effort.on_keystroke("15");
//! assert_eq!(effort.on_commit(), vec![FieldEvent::Committed(Some(15))]);
//! assert_eq!(effort.rendered(), "15");
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod codec;
pub mod form;
pub mod keyed;
pub mod sync;

pub use codec::{DateCodec, FieldCodec, IntegerCodec, TextCodec};
pub use form::FormValidity;
pub use keyed::KeyedField;
pub use sync::{FieldEvent, FieldSync};

/// Text input synchronizer
pub type TextField = FieldSync<TextCodec>;
/// Date input synchronizer
pub type DateField = FieldSync<DateCodec>;
/// Integer input synchronizer
pub type IntegerField = FieldSync<IntegerCodec>;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
