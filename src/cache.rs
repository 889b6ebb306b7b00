//! 読み込み済みデータのキャッシュ
//!
//! データは `Arc<Dataset>` として保持し、再読み込み時は新しい `Arc` に
//! 丸ごと差し替える。読み手は古いか新しいかのどちらか一方だけを見る。

use crate::error::{LookupError, Result};
use crate::loader::DataSource;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};
use tester_lookup_common::{AssignmentRow, Dataset, TextResolution, WaveSpec};

struct CachedDataset {
    dataset: Arc<Dataset>,
    loaded_at: Instant,
}

pub struct DatasetCache {
    source: Box<dyn DataSource>,
    ttl: Duration,
    state: RwLock<Option<CachedDataset>>,
}

impl DatasetCache {
    pub fn new(source: Box<dyn DataSource>, ttl: Duration) -> Self {
        Self {
            source,
            ttl,
            state: RwLock::new(None),
        }
    }

    pub fn source(&self) -> &dyn DataSource {
        self.source.as_ref()
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// 読み込み済みのデータ（読み込みはしない）
    pub fn current(&self) -> Option<Arc<Dataset>> {
        let state = self.state.read().unwrap_or_else(|e| e.into_inner());
        state.as_ref().map(|c| Arc::clone(&c.dataset))
    }

    /// データを取得する（未読み込み・期限切れなら読み込む）
    ///
    /// 期限切れで再読み込みに失敗した場合は古いデータを返す。
    pub fn get(&self) -> Result<Arc<Dataset>> {
        let stale = {
            let state = self.state.read().unwrap_or_else(|e| e.into_inner());
            match state.as_ref() {
                Some(c) if c.loaded_at.elapsed() < self.ttl => return Ok(Arc::clone(&c.dataset)),
                Some(c) => Some(Arc::clone(&c.dataset)),
                None => None,
            }
        };

        match (self.refresh(), stale) {
            (Ok(dataset), _) => Ok(dataset),
            (Err(e), Some(old)) => {
                tracing::warn!(error = %e, "再読み込みに失敗したため前回のデータを使います");
                Ok(old)
            }
            (Err(e), None) => Err(e),
        }
    }

    /// 強制的に読み込み直して差し替える
    pub fn refresh(&self) -> Result<Arc<Dataset>> {
        let dataset = Arc::new(self.source.load()?);

        let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
        *state = Some(CachedDataset {
            dataset: Arc::clone(&dataset),
            loaded_at: Instant::now(),
        });

        tracing::info!(
            source = %self.source.path().display(),
            assignments = dataset.assignments.len(),
            "データを読み込みました"
        );
        Ok(dataset)
    }

    /// 割り当て検索（データが読めない場合は空）
    pub fn find_assignments(&self, query: &str, wave: &WaveSpec) -> Vec<AssignmentRow> {
        match self.get() {
            Ok(dataset) => dataset
                .find_assignments(query, wave)
                .into_iter()
                .cloned()
                .collect(),
            Err(e) => {
                tracing::warn!(error = %e, "{}", LookupError::SnapshotUnavailable);
                Vec::new()
            }
        }
    }

    /// テキスト解決（データが読めない場合は NotFound）
    pub fn resolve_text(&self, partner: &str, method: &str) -> TextResolution {
        match self.get() {
            Ok(dataset) => dataset.resolve_text(partner, method),
            Err(e) => {
                tracing::warn!(error = %e, "{}", LookupError::SnapshotUnavailable);
                TextResolution::NotFound
            }
        }
    }
}
