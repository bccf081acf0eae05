pub mod entry_ref;
pub mod field;
pub mod ids;
pub mod record;

pub use entry_ref::EntryRef;
pub use field::Field;
pub use ids::EntryId;
pub use record::{stars, MediaKind, MediaRecord, MAX_RATING};
