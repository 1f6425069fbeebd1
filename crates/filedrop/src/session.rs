//! The interactive session and its answer cache
//!
//! A [`Session`] owns one operator channel and one answer cache. Both are
//! created on first use, exactly once, even when several threads make that
//! first call together: the losers block until the winner has finished.
//! Prompts are serialized through the channel mutex; the cache has its own
//! mutex so cache hits never wait on a prompt in progress.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};

use filedrop_fs::ManagedRoot;

use crate::channel::{self, LineChannel, ask};
use crate::config::SessionConfig;
use crate::parse::FromAnswer;
use crate::Result;

type Opener = Box<dyn FnOnce() -> Box<dyn LineChannel> + Send>;

/// Resolves operator-supplied values and files.
pub struct Session {
    config: SessionConfig,
    root: ManagedRoot,
    opener: Mutex<Option<Opener>>,
    state: OnceLock<State>,
}

struct State {
    channel: Mutex<Box<dyn LineChannel>>,
    answers: Mutex<HashMap<String, String>>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("config", &self.config)
            .field("initialized", &self.state.get().is_some())
            .finish_non_exhaustive()
    }
}

impl Session {
    /// A session that talks to the operator over stdin/stdout.
    pub fn new(config: SessionConfig) -> Self {
        Self::with_opener(config, || Box::new(channel::stdio()))
    }

    /// A session that talks to the operator over `channel`.
    pub fn with_channel(config: SessionConfig, channel: impl LineChannel + 'static) -> Self {
        Self::with_opener(config, move || Box::new(channel))
    }

    /// A session whose channel is produced by `open` on first use.
    pub fn with_opener<F>(config: SessionConfig, open: F) -> Self
    where
        F: FnOnce() -> Box<dyn LineChannel> + Send + 'static,
    {
        let root = ManagedRoot::from(config.root.clone());
        Self {
            config,
            root,
            opener: Mutex::new(Some(Box::new(open))),
            state: OnceLock::new(),
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn root(&self) -> &ManagedRoot {
        &self.root
    }

    /// Where the logical file `name` lives in the managed store.
    pub fn managed_path(&self, name: impl AsRef<Path>) -> PathBuf {
        self.root.resolve(name)
    }

    /// The answer for `label`, prompting the operator only if none is cached.
    ///
    /// The prompt is `"{label}: "`; the reply line is stored under `label`
    /// exactly as typed, minus its line terminator.
    pub fn answer(&self, label: &str) -> Result<String> {
        self.lookup(label).map(|(answer, _)| answer)
    }

    /// Cached or fresh answer, plus whether this call prompted for it.
    fn lookup(&self, label: &str) -> Result<(String, bool)> {
        let state = self.state();
        if let Some(answer) = lock(&state.answers).get(label) {
            tracing::debug!(label, "Answer cache hit");
            return Ok((answer.clone(), false));
        }

        let mut channel = lock(&state.channel);
        // Another caller may have asked while we waited for the channel.
        if let Some(answer) = lock(&state.answers).get(label) {
            return Ok((answer.clone(), false));
        }

        tracing::debug!(label, "Answer cache miss, prompting");
        let answer = ask(&mut **channel, &format!("{label}: "))?;
        lock(&state.answers).insert(label.to_owned(), answer.clone());
        Ok((answer, true))
    }

    /// Drop the cached answer for `label` so the next lookup prompts again.
    pub fn forget(&self, label: &str) {
        if lock(&self.state().answers).remove(label).is_some() {
            tracing::debug!(label, "Forgot cached answer");
        }
    }

    /// The answer for `label`, read as `T`.
    ///
    /// A freshly prompted answer that does not parse is not kept, so asking
    /// again prompts the operator for a new one. An answer that was already
    /// cached stays cached even when it cannot be read as `T`.
    pub fn var<T: FromAnswer>(&self, label: &str) -> Result<T> {
        let (raw, prompted) = self.lookup(label)?;
        T::from_answer(&raw, self.config.time_zone).inspect_err(|_| {
            if prompted {
                self.forget(label);
            }
        })
    }

    /// Read `raw` as `T` using this session's time zone.
    pub fn parse_as<T: FromAnswer>(&self, raw: &str) -> Result<T> {
        T::from_answer(raw, self.config.time_zone)
    }

    /// Show `message` and block until the operator acknowledges with a line.
    pub fn alert(&self, message: &str) -> Result<()> {
        let mut channel = self.channel();
        ask(&mut **channel, message).map(drop)
    }

    pub(crate) fn channel(&self) -> MutexGuard<'_, Box<dyn LineChannel>> {
        lock(&self.state().channel)
    }

    fn state(&self) -> &State {
        self.state.get_or_init(|| {
            let open = lock(&self.opener).take();
            let channel: Box<dyn LineChannel> = match open {
                Some(open) => open(),
                None => Box::new(channel::stdio()),
            };
            tracing::debug!(root = %self.root, "Opened operator channel");
            State {
                channel: Mutex::new(channel),
                answers: Mutex::new(HashMap::new()),
            }
        })
    }
}

/// The guarded values stay consistent across a panic, so poisoning is ignored.
fn lock<T: ?Sized>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
