#![cfg_attr(not(feature = "std"), no_std)]

pub mod capture;
pub mod decode;
pub mod error;
pub mod frame;
pub mod mailbox;
pub mod timecode;
pub mod types;

// Re-exports
pub use capture::*;
pub use decode::*;
pub use error::*;
pub use frame::*;
pub use mailbox::*;
pub use timecode::*;
pub use types::*;
