//! 読み込み済みデータ一式
//!
//! 割り当て一覧とテキスト行列をまとめて保持する。JSON形式:
//!
//! ```json
//! {
//!   "assignments": [{ "tester": "Иванов А.", "wave": 1, "partner": "..." }],
//!   "texts": [["", "PartnerX"], ["", "call"], ["", "TextA"]]
//! }
//! ```

use crate::error::{Error, Result};
use crate::matcher::{explain_assignments, find_assignments, MatchDiagnostics};
use crate::resolver::{resolve_text, TextMatrix, TextResolution};
use crate::types::{AssignmentRow, AssignmentSnapshot};
use crate::wave::WaveSpec;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    pub assignments: AssignmentSnapshot,
    pub texts: TextMatrix,
}

#[derive(Deserialize)]
struct RawDataset {
    #[serde(default)]
    assignments: Vec<AssignmentRow>,
    #[serde(default)]
    texts: Vec<Vec<Value>>,
}

impl Dataset {
    pub fn new(assignments: AssignmentSnapshot, texts: TextMatrix) -> Self {
        Self { assignments, texts }
    }

    /// JSON文字列から読み込み
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: RawDataset = serde_json::from_str(json)?;

        let mut texts = Vec::with_capacity(raw.texts.len());
        for (r, row) in raw.texts.into_iter().enumerate() {
            let mut cells = Vec::with_capacity(row.len());
            for (c, cell) in row.into_iter().enumerate() {
                cells.push(json_cell_to_string(cell).ok_or_else(|| {
                    Error::InvalidDataset(format!("texts[{}][{}]: ожидается строка или число", r, c))
                })?);
            }
            texts.push(cells);
        }

        Ok(Self {
            assignments: AssignmentSnapshot::new(raw.assignments),
            texts: TextMatrix::new(texts),
        })
    }

    /// JSONファイルから読み込み
    pub fn from_file(path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn find_assignments(&self, query: &str, wave: &WaveSpec) -> Vec<&AssignmentRow> {
        find_assignments(query, &self.assignments, wave)
    }

    pub fn explain_assignments(&self, query: &str, wave: &WaveSpec) -> MatchDiagnostics {
        explain_assignments(query, &self.assignments, wave)
    }

    pub fn resolve_text(&self, partner: &str, method: &str) -> TextResolution {
        resolve_text(partner, method, &self.texts)
    }
}

fn json_cell_to_string(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Null => Some(String::new()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Array(_) | Value::Object(_) => None,
    }
}
