pub mod memory;

pub use memory::{InMemoryTranscriptionStore, InMemoryUserStore};
