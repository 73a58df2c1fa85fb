//! Tensor store
//!
//! A thin typed layer over `Engine`: tensors go through the normal write
//! path (WAL, memtable, flush) and come back through the normal read path.

use std::sync::Arc;

use crate::config::Config;
use crate::engine::{Engine, PutOutcome};
use crate::error::Result;
use crate::storage::SSTable;

use super::{decode_value, encode_value, Tensor, TensorInfo};

/// Default memtable capacity for tensor workloads
pub const DEFAULT_TENSOR_MEMTABLE_MAX_ENTRIES: usize = 50_000;

/// Saves and loads tensors keyed by a numeric id
#[derive(Debug)]
pub struct TensorStore {
    engine: Engine,
}

impl TensorStore {
    /// Create a store over a fresh engine with the tensor memtable capacity
    pub fn new() -> Result<Self> {
        let config = Config::builder()
            .memtable_max_entries(DEFAULT_TENSOR_MEMTABLE_MAX_ENTRIES)
            .build();
        Self::with_config(config)
    }

    pub fn with_config(config: Config) -> Result<Self> {
        Ok(Self::from_engine(Engine::new(config)?))
    }

    /// Wrap an existing engine, e.g. one with an observer attached
    pub fn from_engine(engine: Engine) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn into_engine(self) -> Engine {
        self.engine
    }

    /// Save one tensor; the shape must match the value count
    pub fn save(&mut self, key: u64, info: &TensorInfo, values: &[f32]) -> Result<PutOutcome> {
        let encoded = encode_value(info, values)?;
        self.engine.put(&key.to_string(), &encoded)
    }

    /// Save tensors in order, stopping at the first rejected one
    pub fn save_batch(&mut self, batch: &[Tensor]) -> Result<()> {
        for tensor in batch {
            self.save(tensor.key, &tensor.info, &tensor.values)?;
        }
        Ok(())
    }

    /// Load a tensor; `Ok(None)` when the key is absent
    pub fn load(&mut self, key: u64) -> Result<Option<Tensor>> {
        match self.engine.get(&key.to_string())? {
            Some(value) => {
                let (info, values) = decode_value(&value)?;
                Ok(Some(Tensor::new(key, info, values)))
            }
            None => Ok(None),
        }
    }

    /// Load a tensor together with its first `limit` values
    pub fn load_preview(&mut self, key: u64, limit: usize) -> Result<Option<(Tensor, Vec<f32>)>> {
        Ok(self.load(key)?.map(|tensor| {
            let preview = tensor.values.iter().take(limit).copied().collect();
            (tensor, preview)
        }))
    }

    /// Flush buffered tensors into an SSTable
    pub fn flush(&mut self) -> Option<Arc<SSTable>> {
        self.engine.flush()
    }

    // =========================================================================
    // Scenarios
    // =========================================================================

    /// Save a camera frame and a latent block, flush, and read both back
    pub fn dry_run_scenario(&mut self) -> Result<Vec<Tensor>> {
        let script = vec![
            Tensor::new(101, TensorInfo::new("camera_frame", 32, 32), vec![0.25; 1024]),
            Tensor::new(202, TensorInfo::new("latent_block", 1, 256), vec![0.9; 256]),
        ];
        self.save_batch(&script)?;
        self.flush();

        let mut replay = Vec::with_capacity(script.len());
        for item in &script {
            if let Some(tensor) = self.load(item.key)? {
                replay.push(tensor);
            }
        }
        Ok(replay)
    }

    /// Run `epochs` steps of gradient descent on a 1x4 weight vector
    ///
    /// The weights after each epoch are saved under `1000 + epoch` and
    /// returned in epoch order; the store is flushed at the end.
    pub fn training_scenario(&mut self, epochs: u64) -> Result<Vec<Tensor>> {
        const LEARNING_RATE: f32 = 0.5;
        let info = TensorInfo::new("dense_weights", 1, 4);
        let gradient = [0.01f32, -0.03, 0.02, -0.04];
        let mut weights = vec![0.1f32, -0.2, 0.05, 0.3];

        let mut history = Vec::new();
        for epoch in 0..epochs {
            for (w, g) in weights.iter_mut().zip(gradient) {
                *w -= LEARNING_RATE * g;
            }
            let key = 1000 + epoch;
            self.save(key, &info, &weights)?;
            history.push(Tensor::new(key, info.clone(), weights.clone()));
        }

        self.flush();
        Ok(history)
    }
}
