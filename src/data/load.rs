use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::info;

use super::model::EntityCollections;

/// Reads an entity snapshot exported by the data service.
///
/// Empty or partially populated snapshots are valid; only a missing file or
/// malformed JSON is an error.
pub fn load_collections(path: &Path) -> Result<EntityCollections> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read entity snapshot {}", path.display()))?;

    let collections: EntityCollections = serde_json::from_str(&raw)
        .with_context(|| format!("invalid entity snapshot JSON in {}", path.display()))?;

    info!(
        "loaded entity snapshot: {} notes, {} tasks, {} events",
        collections.notes.len(),
        collections.tasks.len(),
        collections.events.len()
    );

    Ok(collections)
}
