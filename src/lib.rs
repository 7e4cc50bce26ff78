//! kisan — a terminal client for the Kisan community feed.
//!
//! Sign in against a hosted identity service, browse a paginated post feed,
//! and read individual posts, with a locally persisted session marker and
//! language preference.

rust_i18n::i18n!("locales", fallback = "en");

pub mod app;
pub mod auth;
pub mod config;
pub mod feed;
pub mod i18n;
pub mod storage;
pub mod theme;
pub mod ui;
pub mod util;
