//! Deterministic cache keys for resize outputs.
//!
//! A key identifies one rendered artifact: the source file, its modification
//! time, and every resize input. Changing any of them (including touching
//! the source) yields a different key, which is the only invalidation
//! mechanism. There is nothing to purge; stale files are simply never
//! looked up again.
//!
//! ## Format
//!
//! ```text
//! {bucket}/{basename}-{hash}.{ext}
//!
//!   hash    16 lowercase hex digits (first 8 bytes of BLAKE3)
//!   bucket  last hex digit of hash, one of 16 subdirectories
//! ```
//!
//! Callers locate rendered files by this layout, bucket prefix included.
//!
//! ## Canonical input
//!
//! Fields are serialized in a fixed order and joined with NUL, which cannot
//! occur in file paths:
//!
//! ```text
//! identity ␀ mtime ␀ width|auto ␀ height|auto ␀ mode ␀ zoom ␀ x,y,w,h|none ␀ override
//! ```

use std::fmt;
use std::path::PathBuf;

use tracing::trace;

use crate::calculator::ResizeRequest;
use crate::focus::{ImportantPart, ZoomLevel};
use crate::mode::ResizeMode;

/// Field delimiter in the canonical input.
const DELIMITER: &str = "\0";

/// Marker for an unset target dimension.
const AUTO: &str = "auto";

/// Basename used when the identity has no file stem.
const FALLBACK_BASENAME: &str = "image";

/// Hex digits of the BLAKE3 digest kept in the key (8 bytes).
const HASH_HEX_LEN: usize = 16;

/// Everything that identifies one resize output.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CacheKeyInput<'a> {
    /// Source identity, usually its path relative to the storage root.
    pub identity: &'a str,
    /// Source modification time (any monotonic unit, e.g. Unix seconds).
    pub mtime: u64,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub mode: ResizeMode,
    pub zoom: ZoomLevel,
    pub important_part: Option<ImportantPart>,
    /// Caller-chosen output path, when the caller overrides the cache path.
    pub target_override: Option<&'a str>,
}

impl<'a> CacheKeyInput<'a> {
    /// Input for `request` applied to the source `identity` at `mtime`.
    pub fn from_request(
        request: &ResizeRequest,
        identity: &'a str,
        mtime: u64,
        target_override: Option<&'a str>,
    ) -> Self {
        Self {
            identity,
            mtime,
            width: request.width,
            height: request.height,
            mode: request.mode,
            zoom: request.zoom,
            important_part: request.important_part,
            target_override,
        }
    }

    /// Canonical serialization of every field.
    pub fn canonical(&self) -> String {
        let part = match &self.important_part {
            Some(p) => format!("{},{},{},{}", p.x(), p.y(), p.width(), p.height()),
            None => String::from("none"),
        };
        [
            self.identity.to_string(),
            self.mtime.to_string(),
            dimension(self.width),
            dimension(self.height),
            self.mode.as_str().to_string(),
            self.zoom.value().to_string(),
            part,
            self.target_override.unwrap_or("").to_string(),
        ]
        .join(DELIMITER)
    }

    /// Hash, bucket and name the output.
    pub fn key(&self) -> CacheKey {
        let canonical = self.canonical();
        let hash = blake3::hash(canonical.as_bytes()).to_hex()[..HASH_HEX_LEN].to_string();

        let (stem, own_extension) = split_name(self.identity);
        let basename = if stem.is_empty() { FALLBACK_BASENAME } else { stem }.to_string();
        let extension = self
            .target_override
            .and_then(|o| split_name(o).1)
            .or(own_extension);

        let key = CacheKey {
            bucket: bucket_of(&hash),
            basename,
            hash,
            extension,
        };
        trace!(input_len = canonical.len(), key = %key, "derived cache key");
        key
    }
}

fn dimension(dim: Option<u32>) -> String {
    match dim {
        Some(v) => v.to_string(),
        None => String::from(AUTO),
    }
}

/// Last hex digit of `hash`.
fn bucket_of(hash: &str) -> char {
    hash.chars().last().unwrap_or('0')
}

/// Split the last component of a `/` or `\` separated path into stem and
/// lowercased extension. Both separators are accepted on every platform.
fn split_name(path: &str) -> (&str, Option<String>) {
    let name = path.rsplit(['/', '\\']).next().unwrap_or(path);
    match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() && !ext.is_empty() => {
            (stem, Some(ext.to_ascii_lowercase()))
        }
        _ => (name, None),
    }
}

/// A derived cache key.
///
/// `Display` renders the relative path `{bucket}/{basename}-{hash}.{ext}`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CacheKey {
    /// Subdirectory: the hash's last hex digit.
    pub bucket: char,
    /// Source file stem.
    pub basename: String,
    /// 16 lowercase hex digits.
    pub hash: String,
    /// Output extension, lowercased. `None` when neither the override nor
    /// the identity has one.
    pub extension: Option<String>,
}

impl CacheKey {
    /// Key as a relative path.
    pub fn relative_path(&self) -> PathBuf {
        PathBuf::from(self.to_string())
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}-{}", self.bucket, self.basename, self.hash)?;
        if let Some(ext) = &self.extension {
            write!(f, ".{ext}")?;
        }
        Ok(())
    }
}

/// Derive the cache key string for a resize request.
///
/// Identical inputs always produce the same key, on every platform.
#[allow(clippy::too_many_arguments)]
pub fn key(
    original_identity: &str,
    mtime: u64,
    width: Option<u32>,
    height: Option<u32>,
    mode: ResizeMode,
    zoom: ZoomLevel,
    important_part: Option<ImportantPart>,
    target_override: Option<&str>,
) -> String {
    CacheKeyInput {
        identity: original_identity,
        mtime,
        width,
        height,
        mode,
        zoom,
        important_part,
        target_override,
    }
    .key()
    .to_string()
}

impl ResizeRequest {
    /// Cache key for this request applied to `identity` at `mtime`.
    pub fn cache_key(&self, identity: &str, mtime: u64, target_override: Option<&str>) -> CacheKey {
        CacheKeyInput::from_request(self, identity, mtime, target_override).key()
    }
}
