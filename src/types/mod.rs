// Shared type definitions for the bookmark store.

pub mod bookmark;
pub mod errors;
pub mod settings;
