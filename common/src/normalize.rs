//! 文字列正規化モジュール
//!
//! ФИО・партнер・способ проверки・列名・シート名の比較はすべてここを通す。
//! - 小文字化
//! - 空白（全種類）の除去
//! - `ё` → `е` の畳み込み

use serde::{Deserialize, Serialize};
use std::fmt;

/// 正規化済みの比較キー
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NormalizedKey(String);

impl NormalizedKey {
    pub fn new(text: &str) -> Self {
        Self(normalize(text))
    }

    /// 値がない場合は空キー
    pub fn from_opt(text: Option<&str>) -> Self {
        text.map(Self::new).unwrap_or_default()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// 部分一致（空キーは常に含まれる）
    pub fn contains(&self, other: &NormalizedKey) -> bool {
        self.0.contains(other.0.as_str())
    }
}

impl fmt::Display for NormalizedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for NormalizedKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// 比較用に文字列を正規化する
///
/// 小文字化を先に行うので `Ё` も `е` になる。
pub fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .map(|c| if c == 'ё' { 'е' } else { c })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_empty() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("  \t\n "), "");
        assert!(NormalizedKey::from_opt(None).is_empty());
    }

    #[test]
    fn test_normalize_strips_whitespace_and_case() {
        assert_eq!(normalize(" Иванов  А. "), "иванова.");
        assert_eq!(normalize("Partner\u{00A0}X"), "partnerx");
    }

    #[test]
    fn test_normalize_yo_folding() {
        let upper = normalize("Ё");
        assert_eq!(upper, normalize("Е"));
        assert_eq!(upper, normalize("ё"));
        assert_eq!(normalize("Партнёр"), normalize("ПАРТНЕР"));
    }

    #[test]
    fn test_normalize_idempotent() {
        for sample in ["Ёлкин Пётр", "  Wave 1 ", "Способ проверки ", "ABC def"] {
            let once = normalize(sample);
            assert_eq!(normalize(&once), once, "サンプル: {}", sample);
        }
    }

    #[test]
    fn test_key_contains() {
        let tester = NormalizedKey::new("Иванов А.");
        assert!(tester.contains(&NormalizedKey::new("ИВАНОВ")));
        assert!(tester.contains(&NormalizedKey::new("")));
        assert!(!NormalizedKey::new("").contains(&NormalizedKey::new("иванов")));
    }
}
