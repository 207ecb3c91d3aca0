// Adapters layer: concrete implementations of the session backend port.

pub mod memory;
pub mod rest;

pub use memory::InMemoryBackend;
pub use rest::RestBackend;
