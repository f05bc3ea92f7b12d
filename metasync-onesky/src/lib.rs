//! # metasync-onesky
//!
//! OneSky platform implementation of [`metasync_core::Connection`].

pub mod client;
pub mod error;
mod multipart;

pub use client::{AuthParams, OneSkyClient, DEFAULT_BASE_URL};
pub use error::OneSkyError;
