//! Tensor Module
//!
//! Stores small float tensors (feature caches, sensor snapshots, model
//! weights) as ordinary engine values.
//!
//! ## Value Format
//! A tensor is encoded into a single string value:
//! ```text
//! <name>;<rows>;<cols>;<v0>,<v1>,...,<vN>
//! ```
//! Fields are split from the right, so the name may itself contain `;`.
//! Floats use Rust's shortest round-trip formatting, so decoding returns
//! exactly the values that were saved.
//!
//! ## Text Import Format
//! Two lines, as produced by external training scripts:
//! ```text
//! 42, layer1_weights, 2, 2
//! 0.5, 0.25, -1, 3.75
//! ```

mod store;

use std::fmt;

use crate::error::{EmbedError, Result};

pub use store::{TensorStore, DEFAULT_TENSOR_MEMTABLE_MAX_ENTRIES};

/// Number of values shown by previews and summaries
pub const DEFAULT_PREVIEW_LIMIT: usize = 8;

const FIELD_SEPARATOR: char = ';';
const VALUE_SEPARATOR: char = ',';

/// Name and shape of a tensor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TensorInfo {
    pub name: String,
    pub rows: u32,
    pub cols: u32,
}

impl TensorInfo {
    pub fn new(name: impl Into<String>, rows: u32, cols: u32) -> Self {
        Self {
            name: name.into(),
            rows,
            cols,
        }
    }

    /// Number of values a tensor of this shape holds, if it fits in `usize`
    pub fn element_count(&self) -> Option<usize> {
        (self.rows as usize).checked_mul(self.cols as usize)
    }
}

impl fmt::Display for TensorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}x{})", self.name, self.rows, self.cols)
    }
}

/// A tensor together with the key it is stored under
#[derive(Debug, Clone, PartialEq)]
pub struct Tensor {
    pub key: u64,
    pub info: TensorInfo,
    pub values: Vec<f32>,
}

impl Tensor {
    pub fn new(key: u64, info: TensorInfo, values: Vec<f32>) -> Self {
        Self { key, info, values }
    }

    /// One-line description, e.g. `w (1x4) -> 0.1, 0.2, ...`
    pub fn summary(&self, preview_limit: usize) -> String {
        summarize(&self.info, &self.values, preview_limit)
    }

    /// Parse the two-line text import format
    ///
    /// Blank value fields are skipped. The shape is not checked here; it is
    /// checked when the tensor is saved.
    pub fn parse_text(text: &str) -> Result<Self> {
        let mut lines = text.lines();
        let (header, values) = match (lines.next(), lines.next()) {
            (Some(h), Some(v)) => (h, v),
            _ => {
                return Err(EmbedError::InvalidInput(
                    "Tensor file must contain two lines (header + values).".to_string(),
                ))
            }
        };

        let parts: Vec<&str> = header.split(VALUE_SEPARATOR).map(str::trim).collect();
        if parts.len() < 4 {
            return Err(EmbedError::InvalidInput(
                "Header needs key,name,rows,cols.".to_string(),
            ));
        }

        let key = parse_number::<u64>(parts[0])?;
        let info = TensorInfo::new(parts[1], parse_number(parts[2])?, parse_number(parts[3])?);

        let values = values
            .split(VALUE_SEPARATOR)
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(parse_number::<f32>)
            .collect::<Result<Vec<f32>>>()?;

        Ok(Self::new(key, info, values))
    }
}

/// Describe a tensor by name, shape and its first `preview_limit` values
pub fn summarize(info: &TensorInfo, values: &[f32], preview_limit: usize) -> String {
    let shown = preview_limit.min(values.len());
    let mut out = format!("{} -> ", info);
    for (i, value) in values[..shown].iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        out.push_str(&value.to_string());
    }
    if values.len() > shown {
        out.push_str(", ...");
    }
    out
}

/// Encode a tensor into a single engine value
///
/// The name must be non-empty and carry no surrounding whitespace, and the
/// value count must match the shape.
pub fn encode_value(info: &TensorInfo, values: &[f32]) -> Result<String> {
    if info.name.trim().is_empty() || info.name.trim() != info.name {
        return Err(EmbedError::InvalidInput(format!(
            "Tensor name '{}' must be non-empty without surrounding whitespace.",
            info.name
        )));
    }
    match info.element_count() {
        Some(expected) if expected == values.len() => {}
        _ => {
            return Err(EmbedError::InvalidInput(format!(
                "Tensor {} expects {}x{} values, got {}.",
                info.name,
                info.rows,
                info.cols,
                values.len()
            )))
        }
    }

    let mut out = format!(
        "{}{sep}{}{sep}{}{sep}",
        info.name,
        info.rows,
        info.cols,
        sep = FIELD_SEPARATOR
    );
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            out.push(VALUE_SEPARATOR);
        }
        out.push_str(&value.to_string());
    }
    Ok(out)
}

/// Decode a value written by `encode_value`
pub fn decode_value(value: &str) -> Result<(TensorInfo, Vec<f32>)> {
    let mut fields = value.rsplitn(4, FIELD_SEPARATOR);
    let (values, cols, rows, name) = match (fields.next(), fields.next(), fields.next(), fields.next()) {
        (Some(v), Some(c), Some(r), Some(n)) => (v, c, r, n),
        _ => {
            return Err(EmbedError::Decode(format!(
                "not a tensor value: '{}'",
                value
            )))
        }
    };

    let info = TensorInfo::new(
        name,
        rows.parse()
            .map_err(|_| EmbedError::Decode(format!("bad row count '{}'", rows)))?,
        cols.parse()
            .map_err(|_| EmbedError::Decode(format!("bad column count '{}'", cols)))?,
    );

    let values = if values.is_empty() {
        Vec::new()
    } else {
        values
            .split(VALUE_SEPARATOR)
            .map(|v| {
                v.parse::<f32>()
                    .map_err(|_| EmbedError::Decode(format!("bad tensor value '{}'", v)))
            })
            .collect::<Result<Vec<f32>>>()?
    };

    if info.element_count() != Some(values.len()) {
        return Err(EmbedError::Decode(format!(
            "{} holds {} values",
            info,
            values.len()
        )));
    }

    Ok((info, values))
}

fn parse_number<T: std::str::FromStr>(field: &str) -> Result<T> {
    field
        .parse()
        .map_err(|_| EmbedError::InvalidInput(format!("Invalid numeric field: '{}'", field)))
}
