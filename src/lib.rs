// Public API for integration tests and the server binary

pub mod api;
pub mod config;
pub mod error;
pub mod photo;
pub mod protocol;
pub mod reveal;
pub mod session;
pub mod state;
pub mod types;
pub mod ws;

// Re-export broadcast for testing
pub mod broadcast;
