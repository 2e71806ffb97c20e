/// State management module
///
/// This module handles all application state, including:
/// - Shared data structures (data.rs)
/// - The per-session snapshot store with save/reset (store.rs)
/// - The on-disk save file behind it (durable.rs)

pub mod data;
pub mod durable;
pub mod store;
