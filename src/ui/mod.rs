//! Terminal user interface.
//!
//! - `loop_runner` - Main event loop and terminal management
//! - `input` - Keyboard input handling per route
//! - `events` - Background task event processing
//! - `render` - Route rendering dispatch
//! - `login` / `register` - Auth form screens
//! - `listing` / `details` - Post feed screens
//! - `lang_modal` - Language selection overlay
//! - `status` - Status bar widget
//! - `helpers` - Shared layout utilities

mod details;
mod events;
mod helpers;
mod input;
mod lang_modal;
mod listing;
mod login;
mod loop_runner;
mod register;
mod render;
mod status;

pub use loop_runner::{run, Action};
