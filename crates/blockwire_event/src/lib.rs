//! Publish/subscribe plumbing between the protocol core and whatever sits
//! on top of it (renderers, bots, CLIs).

pub mod eventbus;
pub mod events;

pub use eventbus::{EventBus, SubscriptionId};
pub use events::*;
