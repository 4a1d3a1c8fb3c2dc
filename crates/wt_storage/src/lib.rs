use std::sync::Arc;

use wt_core::{ArticleStore, Error, Result};

pub mod backends;

pub use backends::*;

/// Build a store from its CLI/config name.
#[cfg_attr(not(feature = "sqlite"), allow(unused_variables))]
pub async fn create_store(kind: &str, db_path: Option<&str>) -> Result<Arc<dyn ArticleStore>> {
    match kind {
        "memory" => Ok(Arc::new(MemoryStore::new())),
        #[cfg(feature = "sqlite")]
        "sqlite" => {
            let path = std::path::PathBuf::from(db_path.unwrap_or("wikitree.db"));
            Ok(Arc::new(SqliteStore::new_with_path(&path).await?))
        }
        other => Err(Error::Storage(format!(
            "Unknown storage backend: {}",
            other
        ))),
    }
}
