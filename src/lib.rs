//! # Football Squad Bot
//!
//! A Telegram bot for organizing informal five-a-side football games.
//!
//! ## Features
//! - Admins create dated events with a player capacity
//! - Players join and leave via commands or inline buttons
//! - Overflow players queue on a reserve list with automatic promotion
//! - Random team splitting for the confirmed squad
//! - Persistent storage with SQLite

/// Bot command handlers and message processing
pub mod bot;
/// Configuration management and environment variables
pub mod config;
/// Database connection, models, and the registration store
pub mod database;
/// Utility functions for validation and formatting
pub mod utils;
