//! Filesystem layer for filedrop
//!
//! Resolves logical names under a managed root and provides the plain
//! stat/open/create/copy/mkdir primitives the interactive engine builds on.

pub mod config;
pub mod error;
pub mod io;
pub mod path;

pub use config::ConfigStore;
pub use error::{Error, Result};
pub use path::ManagedRoot;
