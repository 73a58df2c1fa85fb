//! Shared engine handle
//!
//! Lets several threads drive one engine while keeping the single-operation
//! sequencing: each call holds the lock for its whole duration, including a
//! pending flush it settles, so no operation ever interleaves with another.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::config::Config;
use crate::engine::{Engine, EngineStats, Hit, PutOutcome};
use crate::error::Result;
use crate::observer::{EngineObserver, StateSnapshot};
use crate::protocol::{Command, Response};
use crate::storage::{CompactionResult, SSTable};

/// Cloneable, thread-safe handle to an `Engine`
#[derive(Clone)]
pub struct SharedEngine {
    inner: Arc<Mutex<Engine>>,
}

impl SharedEngine {
    pub fn new(engine: Engine) -> Self {
        Self {
            inner: Arc::new(Mutex::new(engine)),
        }
    }

    /// Create an engine with `config` and `observer` and wrap it
    pub fn open(config: Config, observer: impl EngineObserver + 'static) -> Result<Self> {
        Ok(Self::new(Engine::with_observer(config, observer)?))
    }

    pub fn put(&self, key: &str, value: &str) -> Result<PutOutcome> {
        self.inner.lock().put(key, value)
    }

    pub fn get(&self, key: &str) -> Result<Option<String>> {
        self.inner.lock().get(key)
    }

    pub fn search(&self, key: &str) -> Result<Option<Hit>> {
        self.inner.lock().search(key)
    }

    pub fn flush(&self) -> Option<Arc<SSTable>> {
        self.inner.lock().flush()
    }

    pub fn settle(&self) -> Option<Arc<SSTable>> {
        self.inner.lock().settle()
    }

    pub fn compact(&self) -> Result<CompactionResult> {
        self.inner.lock().compact()
    }

    pub fn reset(&self) {
        self.inner.lock().reset()
    }

    pub fn execute(&self, command: Command) -> Result<Response> {
        self.inner.lock().execute(command)
    }

    pub fn stats(&self) -> EngineStats {
        self.inner.lock().stats()
    }

    pub fn snapshot(&self) -> StateSnapshot {
        self.inner.lock().snapshot()
    }

    /// Run `f` with exclusive access, for multi-step sequences that must not
    /// be interleaved with other callers
    pub fn with<R>(&self, f: impl FnOnce(&mut Engine) -> R) -> R {
        let mut engine = self.inner.lock();
        f(&mut *engine)
    }
}
