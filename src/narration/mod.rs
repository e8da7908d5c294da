//! Narration - flavor-text thoughts for the guardian
//!
//! The simulation only emits `NarrationRequested` events; everything here is
//! outside the step and may fail without affecting it.

pub mod client;
pub mod narrator;
pub mod prompt;

use std::future::Future;
use std::pin::Pin;

use crate::core::error::Result;

pub use client::{ApiFormat, LlmClient};
pub use narrator::Narrator;
pub use prompt::{FALLBACK_THOUGHT, INITIAL_THOUGHT};

pub type ThoughtFuture<'a> = Pin<Box<dyn Future<Output = Result<String>> + Send + 'a>>;

/// Anything that can turn a context line into a short thought
pub trait ThoughtGenerator: Send + Sync {
    fn generate<'a>(&'a self, context: &'a str) -> ThoughtFuture<'a>;
}
