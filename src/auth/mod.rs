//! Remote identity service client and the locally persisted session.

mod client;
mod session;

pub use client::{AuthClient, AuthError, UserCredential};
pub use session::{SessionStore, SESSION_KEY};
