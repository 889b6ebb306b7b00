//! 指示テキスト解決モジュール
//!
//! シート「Тексты」の構造:
//! - 行0: Партнер
//! - 行1: Способ проверки
//! - 行2: テキスト本文
//!
//! 列0はラベル列で照合しない。最後の列の本文が共通テキスト。

use crate::normalize::NormalizedKey;
use serde::{Deserialize, Serialize};

const PARTNER_ROW: usize = 0;
const METHOD_ROW: usize = 1;
const TEXT_ROW: usize = 2;

/// 3行のキー行列
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TextMatrix {
    rows: Vec<Vec<String>>,
}

impl TextMatrix {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// 3行未満なら不正
    pub fn is_valid(&self) -> bool {
        self.rows.len() > TEXT_ROW
    }

    /// 照合対象の列数（ラベル列を除く）
    pub fn column_count(&self) -> usize {
        self.row(PARTNER_ROW).len().saturating_sub(1)
    }

    /// 共通テキスト（本文行の最後のセル）
    pub fn general_text(&self) -> Option<&str> {
        self.row(TEXT_ROW)
            .last()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
    }

    fn row(&self, index: usize) -> &[String] {
        self.rows.get(index).map(Vec::as_slice).unwrap_or(&[])
    }

    fn cell(&self, row: usize, column: usize) -> &str {
        self.row(row).get(column).map(String::as_str).unwrap_or("")
    }
}

/// テキスト解決の結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TextResolution {
    /// Партнер × Способ が一致した列
    Found { column: usize, text: String },
    /// 一致なし、共通テキストで代替
    Fallback { text: String },
    /// 一致なし、共通テキストもなし
    NotFound,
    /// 3行未満のシート
    InvalidStructure { rows: usize },
}

impl TextResolution {
    /// 表示するテキスト
    pub fn text(&self) -> Option<&str> {
        match self {
            TextResolution::Found { text, .. } | TextResolution::Fallback { text } => Some(text),
            TextResolution::NotFound | TextResolution::InvalidStructure { .. } => None,
        }
    }

    pub fn column(&self) -> Option<usize> {
        match self {
            TextResolution::Found { column, .. } => Some(*column),
            _ => None,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, TextResolution::Fallback { .. })
    }
}

/// ПартнерとСпособ проверкиから指示テキストを引く
///
/// 列1から順に走査し、最初に一致した列を採用する。
/// 一致した列の本文が空なら共通テキストに落とす。
pub fn resolve_text(partner: &str, method: &str, matrix: &TextMatrix) -> TextResolution {
    if !matrix.is_valid() {
        return TextResolution::InvalidStructure {
            rows: matrix.rows.len(),
        };
    }

    let partner = NormalizedKey::new(partner);
    let method = NormalizedKey::new(method);

    let matched = (1..matrix.row(PARTNER_ROW).len()).find(|&column| {
        NormalizedKey::new(matrix.cell(PARTNER_ROW, column)) == partner
            && NormalizedKey::new(matrix.cell(METHOD_ROW, column)) == method
    });

    if let Some(column) = matched {
        let text = matrix.cell(TEXT_ROW, column).trim();
        if !text.is_empty() {
            return TextResolution::Found {
                column,
                text: text.to_string(),
            };
        }
    }

    match matrix.general_text() {
        Some(text) => TextResolution::Fallback {
            text: text.to_string(),
        },
        None => TextResolution::NotFound,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(rows: &[&[&str]]) -> TextMatrix {
        TextMatrix::new(
            rows.iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        )
    }

    fn sample() -> TextMatrix {
        matrix(&[
            &["", "PartnerX", "PartnerY"],
            &["", "call", "visit"],
            &["", "TextA", "TextB"],
        ])
    }

    #[test]
    fn test_exact_match() {
        let resolved = resolve_text("PartnerX", "call", &sample());
        assert_eq!(resolved, TextResolution::Found { column: 1, text: "TextA".into() });
    }

    #[test]
    fn test_fallback_to_last_column() {
        let resolved = resolve_text("Unknown", "call", &sample());
        assert_eq!(resolved, TextResolution::Fallback { text: "TextB".into() });
        assert!(resolved.is_fallback());
        assert_eq!(resolved.text(), Some("TextB"));
    }

    #[test]
    fn test_normalized_keys() {
        let resolved = resolve_text(" partner x ", "CALL", &sample());
        assert_eq!(resolved.column(), Some(1));
    }

    #[test]
    fn test_two_rows_invalid() {
        let m = matrix(&[&["", "PartnerX"], &["", "call"]]);
        assert_eq!(resolve_text("PartnerX", "call", &m), TextResolution::InvalidStructure { rows: 2 });
        assert_eq!(resolve_text("", "", &TextMatrix::default()), TextResolution::InvalidStructure { rows: 0 });
    }

    #[test]
    fn test_not_found_without_text_row_cells() {
        let m = matrix(&[&["", "PartnerX"], &["", "call"], &[]]);
        assert_eq!(resolve_text("Other", "call", &m), TextResolution::NotFound);
    }

    #[test]
    fn test_match_independent_of_position() {
        let m = matrix(&[
            &["", "A", "B", "C", "D", "Общий"],
            &["", "call", "call", "visit", "call", ""],
            &["", "t1", "t2", "t3", "t4", "general"],
        ]);
        assert_eq!(resolve_text("C", "visit", &m).column(), Some(3));
        assert_eq!(resolve_text("D", "call", &m).column(), Some(4));
        assert_eq!(resolve_text("A", "call", &m).column(), Some(1));
    }

    #[test]
    fn test_first_match_wins() {
        let m = matrix(&[
            &["", "A", "A"],
            &["", "call", "call"],
            &["", "first", "second"],
        ]);
        assert_eq!(resolve_text("A", "call", &m), TextResolution::Found { column: 1, text: "first".into() });
    }

    #[test]
    fn test_label_column_never_matches() {
        let m = matrix(&[
            &["Партнер", "X"],
            &["Способ", "call"],
            &["Текст", "body"],
        ]);
        assert_eq!(resolve_text("Партнер", "Способ", &m), TextResolution::Fallback { text: "body".into() });
    }

    #[test]
    fn test_empty_matched_body_uses_general() {
        let m = matrix(&[
            &["", "A", "B"],
            &["", "call", "call"],
            &["", "", "general"],
        ]);
        assert_eq!(resolve_text("A", "call", &m), TextResolution::Fallback { text: "general".into() });
    }

    #[test]
    fn test_short_header_rows() {
        // 方法行が短い場合は空セル扱い
        let m = matrix(&[&["", "A", "B"], &["", "call"], &["", "t1", "t2"]]);
        assert_eq!(resolve_text("B", "", &m).column(), Some(2));
        assert_eq!(m.column_count(), 2);
    }
}
