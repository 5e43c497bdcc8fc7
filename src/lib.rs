//! Scent - perfume storefront with a terminal UI
//!
//! The library holds the catalog pipeline, wishlist, cart and recently
//! viewed tracker, their persistence, and the TUI built on top of them.

pub mod app;
pub mod error;
pub mod logging;
pub mod models;
pub mod shop;
pub mod storage;
pub mod ui;
