//! Resolve-or-prompt engine
//!
//! A [`Session`] obtains inputs a program does not have yet by asking an
//! operator over a line-oriented channel:
//!
//! - **Answers**: [`Session::answer`] prompts once per label and caches the
//!   reply; [`Session::var`] additionally reads it as a typed value
//!   (see [`FromAnswer`]).
//! - **Files**: [`Session::resolve`] opens a file under the managed root,
//!   and when it is missing asks for a source path and imports a copy.
//! - **Directories**: [`Session::ensure_dir`] creates directory chains,
//!   retrying after the operator acknowledges a failure.
//!
//! ```no_run
//! use filedrop::{Session, SessionConfig};
//! use std::io::Read;
//!
//! let session = Session::new(SessionConfig::new().with_root("dump"));
//! let name: String = session.var("file name")?;
//! let mut content = String::new();
//! session.resolve(&name)?.read_to_string(&mut content)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod channel;
pub mod config;
pub mod error;
pub mod logging;
mod materializer;
pub mod parse;
mod resolver;
pub mod session;

pub use channel::{BufChannel, LineChannel, clean_path_answer};
pub use config::{RetryLimits, SessionConfig, Zone};
pub use error::{Error, Result};
pub use filedrop_fs::ManagedRoot;
pub use parse::{FromAnswer, Structured, TargetKind, parse_as, parse_time};
pub use session::Session;
