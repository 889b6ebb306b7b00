//! JSONエクスポートからの読み込み

use super::{ColumnMapping, DataSource, SourceReport};
use crate::error::{LookupError, Result};
use std::path::{Path, PathBuf};
use tester_lookup_common::{Column, Dataset};

pub struct JsonSource {
    path: PathBuf,
}

impl JsonSource {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }
}

impl DataSource for JsonSource {
    fn load(&self) -> Result<Dataset> {
        if !self.path.exists() {
            return Err(LookupError::FileNotFound(self.path.display().to_string()));
        }
        Ok(Dataset::from_file(&self.path)?)
    }

    fn inspect(&self) -> Result<SourceReport> {
        let dataset = self.load()?;

        // JSONはフィールド名が固定なので全列そろっている
        Ok(SourceReport {
            path: self.path.display().to_string(),
            sheets: vec!["assignments".into(), "texts".into()],
            selection_sheet: Some("assignments".into()),
            texts_sheet: Some("texts".into()),
            selection_header: Vec::new(),
            column_mapping: Column::ALL
                .iter()
                .map(|&column| ColumnMapping {
                    column,
                    header: Some(format!("{:?}", column)),
                })
                .collect(),
            assignment_rows: dataset.assignments.len(),
            text_rows: dataset.texts.rows().len(),
        })
    }

    fn path(&self) -> &Path {
        &self.path
    }
}
