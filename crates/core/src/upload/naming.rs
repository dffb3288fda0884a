//! Collision-resistant object names.
//!
//! Format with a correlation id: `{correlation}-{namespace}-{nanos}-{random}.{ext}`.
//! Without one: `{random}-{nanos}.{ext}`. Every part is reduced to
//! `[A-Za-z0-9_-]` so a name is always a single path segment.

use chrono::Utc;
use uuid::Uuid;

use super::types::DestinationNamespace;

const RANDOM_LEN: usize = 12;

/// Generate a storage object name for a file.
#[must_use]
pub fn object_name(
    correlation_id: Option<&str>,
    namespace: &DestinationNamespace,
    file_name: &str,
) -> String {
    let nanos = Utc::now()
        .timestamp_nanos_opt()
        .unwrap_or_else(|| Utc::now().timestamp_micros().saturating_mul(1000));
    let random = random_suffix();

    let stem = match correlation_id.filter(|id| !id.is_empty()) {
        Some(id) => format!("{}-{}-{nanos}-{random}", slug(id), slug(namespace.as_str())),
        None => format!("{random}-{nanos}"),
    };

    match extension(file_name) {
        Some(ext) => format!("{stem}.{ext}"),
        None => stem,
    }
}

/// Lowercased extension of a file name, if it has a usable one.
#[must_use]
pub fn extension(file_name: &str) -> Option<String> {
    let (_, ext) = file_name.rsplit_once('.')?;
    if ext.is_empty() || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

fn slug(value: &str) -> String {
    value
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

fn random_suffix() -> String {
    let mut suffix = Uuid::new_v4().simple().to_string();
    suffix.truncate(RANDOM_LEN);
    suffix
}
