//! Record storage seam.
//!
//! Storage engines are out of scope for this crate; [`RecordRepo`] is the
//! boundary an application implements over its own database.

mod error;
mod memory;
mod repos;

pub use error::{DbError, DbResult};
pub use memory::InMemoryRecordRepo;
pub use repos::RecordRepo;
