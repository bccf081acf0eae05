//! Core catalog logic for reelshelf.
//!
//! This crate defines the media record model, the position-addressed
//! [`Collection`] that mirrors itself into a durable key-value
//! [`Slot`](store::Slot), and the [`FormController`] that turns form input
//! into creates and in-place edits.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod collection;
pub mod error;
pub mod form;
pub mod model;
pub mod store;

pub use collection::{Collection, LoadStatus, COLLECTION_KEY};
pub use error::{Error, Result, ValidationError};
pub use form::{FormController, FormMode, Submission};
pub use model::{EntryId, EntryRef, Field, MediaKind, MediaRecord};
