//! Shared test utilities for the filedrop workspace.
//!
//! This crate provides standardised operator and store fixtures so the
//! engine's tests do not each hand-roll fake stdin/stdout plumbing. It is a
//! dev-dependency only, never published.
//!
//! # Modules
//!
//! - [`channel`]: scripted operator input and a captured prompt transcript
//! - [`store`]: [`TestStore`] with a managed root and external source files

pub mod channel;
pub mod store;

pub use channel::{LineCounter, ScriptedInput, Transcript};
pub use store::TestStore;
