//! Quran bookmarks: a persistent store of bookmarked surahs and ayahs.
//!
//! The library exposes the store and its supporting layers for the RPC
//! binary and integration tests.

pub mod app;
pub mod database;
pub mod logging;
pub mod managers;
pub mod platform;
pub mod rpc_handler;
pub mod services;
pub mod storage;
pub mod types;
