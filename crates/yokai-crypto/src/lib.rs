#![doc = include_str!("../README.md")]

//! # Pinned heap data
//!
//! Keys are stored as `Pin<Box<GenericArray<u8, U32>>>`. `GenericArray` is equivalent to
//! `[u8; N]`, a Copy type placed on the stack; boxing and pinning keeps the compiler from making
//! stack copies when the owning struct is moved around.

mod error;
pub use error::CryptoError;
pub(crate) use error::Result;
mod keys;
pub use keys::{MasterKey, PreferenceKeys};
mod util;
mod xchacha20;
