// Adapters layer: concrete implementations of the storage ports.

pub mod memory;

pub use memory::InMemoryVoteStore;
