// Stateful managers.

pub mod bookmark_store;
