//! Record storage
//!
//! Handlers talk to `dyn Repository<T>`; the in-memory implementation is
//! the only backend and starts from the embedded demo data.

mod memory;
pub mod seed;
mod traits;

pub use memory::InMemoryRepository;
pub use traits::{Repository, StoreError};
