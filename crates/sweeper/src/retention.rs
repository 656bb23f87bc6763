//! Retention policy for timestamped drop folders.
//!
//! A drop folder is a directory whose base name starts with a 14-digit
//! `YYYYMMDDHHMMSS` token, optionally followed by `_<suffix>`. The policy
//! decides per folder whether it may be removed, applying a fixed rule chain
//! where the first matching rule wins:
//!
//! 1. any file present retains the folder,
//! 2. folders at most seven days old are retained,
//! 3. a company's only drop folder is retained regardless of age,
//! 4. a folder is deleted only if a sibling carries a strictly later
//!    timestamp; the most recent folder (and every folder tied with it) is
//!    retained.

use crate::error::Result;
use crate::service::{base_name, parent_of, DirectoryService, EntryKind};
use chrono::{DateTime, Duration, NaiveDateTime, Utc};

/// Folders younger than this many days are never deleted.
pub const RETENTION_DAYS: i64 = 7;

const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";
const TIMESTAMP_LEN: usize = 14;

/// A directory whose name encodes its creation instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimestampedFolder {
    pub path: String,
    pub name: String,
    /// The company folder one level up.
    pub parent: String,
    /// Parsed from the name; interpreted as UTC.
    pub timestamp: NaiveDateTime,
}

impl TimestampedFolder {
    /// Parses a service path whose base name matches the timestamp pattern.
    ///
    /// Returns `None` for anything else: short names, non-digit prefixes,
    /// impossible dates, or a fifteenth character that is not `_`. Such
    /// folders are excluded from the policy, not errors.
    pub fn parse(path: &str) -> Option<Self> {
        let name = base_name(path);
        let bytes = name.as_bytes();
        if bytes.len() < TIMESTAMP_LEN || !bytes[..TIMESTAMP_LEN].iter().all(|b| b.is_ascii_digit()) {
            return None;
        }

        let (digits, rest) = name.split_at(TIMESTAMP_LEN);
        if !rest.is_empty() && !rest.starts_with('_') {
            return None;
        }

        let timestamp = NaiveDateTime::parse_from_str(digits, TIMESTAMP_FORMAT).ok()?;
        Some(TimestampedFolder {
            path: path.to_string(),
            name: name.to_string(),
            parent: parent_of(path).to_string(),
            timestamp,
        })
    }
}

/// Outcome of evaluating one folder. Exactly one per folder per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Delete,
    RetainNonEmpty,
    RetainTooYoung,
    RetainOnlySibling,
    RetainNotOldest,
}

/// The four-rule policy, bound to one run's clock.
#[derive(Debug, Clone)]
pub struct RetentionPolicy {
    now: DateTime<Utc>,
    window: Duration,
}

impl RetentionPolicy {
    pub fn new(now: DateTime<Utc>) -> Self {
        RetentionPolicy {
            now,
            window: Duration::days(RETENTION_DAYS),
        }
    }

    /// Whether the folder is strictly older than the retention window.
    /// Exactly seven days old is not expired.
    pub fn expired(&self, folder: &TimestampedFolder) -> bool {
        self.now.naive_utc() - folder.timestamp > self.window
    }

    /// Applies the rule chain to one folder.
    ///
    /// `siblings` resolves the folder's same-level listing and is only
    /// invoked once rules 1 and 2 have not already retained, so young or
    /// non-empty folders never cost a remote lookup. The sibling set is
    /// expected to include the folder itself; names that fail to parse must
    /// already be excluded.
    pub fn evaluate<F>(
        &self,
        folder: &TimestampedFolder,
        file_count: usize,
        siblings: F,
    ) -> Result<Verdict>
    where
        F: FnOnce() -> Result<Vec<TimestampedFolder>>,
    {
        if file_count > 0 {
            return Ok(Verdict::RetainNonEmpty);
        }

        if !self.expired(folder) {
            return Ok(Verdict::RetainTooYoung);
        }

        let siblings = siblings()?;
        if siblings.len() <= 1 {
            return Ok(Verdict::RetainOnlySibling);
        }

        if siblings.iter().any(|s| s.timestamp > folder.timestamp) {
            Ok(Verdict::Delete)
        } else {
            Ok(Verdict::RetainNotOldest)
        }
    }
}

/// Lists the timestamped folders directly under `parent`.
///
/// Malformed names are dropped here, before both the only-sibling count and
/// the recency comparison.
pub fn timestamped_children<S: DirectoryService + ?Sized>(
    service: &mut S,
    parent: &str,
) -> Result<Vec<TimestampedFolder>> {
    let entries = service.list(parent)?;
    Ok(entries
        .into_iter()
        .filter(|entry| entry.kind == EntryKind::Dir)
        .filter_map(|entry| TimestampedFolder::parse(&crate::service::join(parent, &entry.name)))
        .collect())
}
