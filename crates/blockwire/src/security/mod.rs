pub mod auth;
pub mod encryption;

pub use auth::{Authenticator, OfflineAuthenticator, SessionServerAuthenticator};
pub use encryption::{Aes128Cfb8Dec, Aes128Cfb8Enc, Cfb8Closure, EncryptionState};
