pub mod memory;
pub mod repository;

pub use memory::MemoryStore;
pub use repository::{EstimatorStore, StoreError};
