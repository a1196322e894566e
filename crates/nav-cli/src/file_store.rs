//! [`ForestStore`] over a JSON file holding an array of root records

use async_trait::async_trait;
use nav_host::{ForestStore, StoreError};
use nav_model::NodeRecord;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

/// Forest kept in one JSON document
///
/// Records saved without an id get the next free `n{number}` id.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    write: Mutex<()>,
}

impl JsonFileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Result<Vec<NodeRecord>, StoreError> {
        let text = match tokio::fs::read_to_string(&self.path).await {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::Unavailable(format!("{}: {e}", self.path.display()))),
        };
        NodeRecord::parse_forest(&text)
            .map_err(|e| StoreError::Rejected(format!("{} is not a forest document: {e}", self.path.display())))
    }

    async fn save(&self, roots: &[NodeRecord]) -> Result<(), StoreError> {
        let text = serde_json::to_string_pretty(roots).map_err(|e| StoreError::Rejected(e.to_string()))?;
        tokio::fs::write(&self.path, text)
            .await
            .map_err(|e| StoreError::Unavailable(format!("{}: {e}", self.path.display())))?;
        tracing::debug!(path = %self.path.display(), roots = roots.len(), "forest file written");
        Ok(())
    }
}

fn highest_number(records: &[NodeRecord]) -> u64 {
    records
        .iter()
        .map(|r| {
            let own = r
                .id
                .as_deref()
                .and_then(|id| id.strip_prefix('n'))
                .and_then(|n| n.parse::<u64>().ok())
                .unwrap_or(0);
            own.max(highest_number(&r.items))
        })
        .max()
        .unwrap_or(0)
}

fn assign_ids(record: &mut NodeRecord, next: &mut u64) {
    if record.id.is_none() {
        *next += 1;
        record.id = Some(format!("n{next}"));
    }
    for item in &mut record.items {
        assign_ids(item, next);
    }
}

#[async_trait]
impl ForestStore for JsonFileStore {
    async fn fetch_forest(&self) -> Result<Vec<NodeRecord>, StoreError> {
        self.load().await
    }

    async fn persist_root(&self, root_id: &str, mut root: NodeRecord) -> Result<NodeRecord, StoreError> {
        let _guard = self.write.lock().await;
        let mut roots = self.load().await?;
        let mut next = highest_number(&roots).max(highest_number(std::slice::from_ref(&root)));
        assign_ids(&mut root, &mut next);
        let slot = roots
            .iter_mut()
            .find(|r| r.id.as_deref() == Some(root_id))
            .ok_or_else(|| StoreError::NotFound(root_id.to_owned()))?;
        *slot = root.clone();
        self.save(&roots).await?;
        Ok(root)
    }

    async fn create_root(&self, mut root: NodeRecord) -> Result<NodeRecord, StoreError> {
        let _guard = self.write.lock().await;
        let mut roots = self.load().await?;
        let mut next = highest_number(&roots).max(highest_number(std::slice::from_ref(&root)));
        assign_ids(&mut root, &mut next);
        roots.push(root.clone());
        self.save(&roots).await?;
        Ok(root)
    }

    async fn delete_root(&self, root_id: &str) -> Result<(), StoreError> {
        let _guard = self.write.lock().await;
        let mut roots = self.load().await?;
        let before = roots.len();
        roots.retain(|r| r.id.as_deref() != Some(root_id));
        if roots.len() == before {
            return Err(StoreError::NotFound(root_id.to_owned()));
        }
        self.save(&roots).await
    }
}
