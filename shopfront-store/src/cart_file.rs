//! File-backed cart persistence.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shopfront_core::{CartLine, CartPersistence, CoreError};
use tracing::debug;

use crate::persistence::{default_cart_path, load_json_sync, save_json_sync};

/// Storage key for the cart; also the file stem.
pub const CART_STORAGE_KEY: &str = "cart-storage";

/// Current on-disk format version.
const FORMAT_VERSION: u32 = 1;

/// On-disk envelope.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredCart {
    version: u32,
    #[serde(default)]
    items: Vec<CartLine>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    saved_at: Option<DateTime<Utc>>,
}

/// Persists the cart as JSON under the data directory.
#[derive(Debug, Clone)]
pub struct FileCartPersistence {
    path: PathBuf,
}

impl FileCartPersistence {
    /// Persists to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Persists to `<data dir>/shopfront/cart-storage.json`.
    pub fn default_location() -> Self {
        Self::new(default_cart_path())
    }

    /// The backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CartPersistence for FileCartPersistence {
    fn load(&self) -> Result<Option<Vec<CartLine>>, CoreError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "No saved cart");
            return Ok(None);
        }
        let stored: StoredCart = load_json_sync(&self.path)?;
        if stored.version > FORMAT_VERSION {
            return Err(CoreError::InvalidData(format!(
                "cart file version {} is newer than supported version {FORMAT_VERSION}",
                stored.version
            )));
        }
        debug!(lines = stored.items.len(), "Loaded saved cart");
        Ok(Some(stored.items))
    }

    fn save(&self, lines: &[CartLine]) -> Result<(), CoreError> {
        let stored = StoredCart {
            version: FORMAT_VERSION,
            items: lines.to_vec(),
            saved_at: Some(Utc::now()),
        };
        save_json_sync(&self.path, &stored)?;
        Ok(())
    }
}
