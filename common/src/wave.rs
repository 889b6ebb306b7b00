//! 「№ волны」列の解釈
//!
//! 同じ列に複数の表記が混在している:
//! - 数値 `1`
//! - 文字列 `"1"` / `"1.0"` / `"1,0"`
//! - ラベル `"Волна 1"` / `"Wave 1"`

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// セルの生の値
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WaveValue {
    Number(f64),
    Text(String),
    Flag(bool),
    #[default]
    Empty,
}

impl WaveValue {
    pub fn is_empty(&self) -> bool {
        match self {
            WaveValue::Empty => true,
            WaveValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }
}

impl fmt::Display for WaveValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WaveValue::Number(n) if n.fract() == 0.0 && n.is_finite() => write!(f, "{}", *n as i64),
            WaveValue::Number(n) => write!(f, "{}", n),
            WaveValue::Text(s) => f.write_str(s),
            WaveValue::Flag(b) => write!(f, "{}", b),
            WaveValue::Empty => Ok(()),
        }
    }
}

impl From<f64> for WaveValue {
    fn from(n: f64) -> Self {
        WaveValue::Number(n)
    }
}

impl From<i64> for WaveValue {
    fn from(n: i64) -> Self {
        WaveValue::Number(n as f64)
    }
}

impl From<&str> for WaveValue {
    fn from(s: &str) -> Self {
        WaveValue::Text(s.to_string())
    }
}

/// 対象ウェーブの指定
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaveSpec {
    pub number: u32,
}

impl Default for WaveSpec {
    fn default() -> Self {
        Self { number: 1 }
    }
}

impl WaveSpec {
    pub fn new(number: u32) -> Self {
        Self { number }
    }

    /// 生の値が対象ウェーブかどうか
    pub fn matches(&self, raw: &WaveValue) -> bool {
        match raw {
            WaveValue::Number(n) => *n == f64::from(self.number),
            WaveValue::Text(s) => self.matches_text(s),
            WaveValue::Flag(_) | WaveValue::Empty => false,
        }
    }

    fn matches_text(&self, raw: &str) -> bool {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return false;
        }

        let decimal = trimmed.replace(',', ".");
        let plain = self.number.to_string();
        if decimal == plain || decimal == format!("{}.0", plain) {
            return true;
        }

        self.matches_label(&trimmed.to_lowercase())
    }

    fn matches_label(&self, lowered: &str) -> bool {
        lazy_static::lazy_static! {
            static ref LABEL_RE: Regex = Regex::new(r"^(?:волна|wave)\s*(\d+)$").unwrap();
        }

        LABEL_RE
            .captures(lowered)
            .and_then(|caps| caps[1].parse::<u32>().ok())
            .map(|n| n == self.number)
            .unwrap_or(false)
    }
}

impl fmt::Display for WaveSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "волна {}", self.number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_wave_encodings() {
        let wave = WaveSpec::default();
        let accepted = [
            WaveValue::from(1_i64),
            WaveValue::from(1.0),
            WaveValue::from("1"),
            WaveValue::from("1.0"),
            WaveValue::from("1,0"),
            WaveValue::from(" 1 "),
            WaveValue::from("Wave 1"),
            WaveValue::from("Волна 1"),
            WaveValue::from("волна1"),
        ];
        for raw in &accepted {
            assert!(wave.matches(raw), "対象になるべき: {:?}", raw);
        }
    }

    #[test]
    fn test_other_values_rejected() {
        let wave = WaveSpec::default();
        let rejected = [
            WaveValue::from(2_i64),
            WaveValue::from(1.5),
            WaveValue::from("volume 1"),
            WaveValue::from(""),
            WaveValue::Empty,
            WaveValue::Flag(true),
            WaveValue::from("Волна 11"),
            WaveValue::from("2"),
            WaveValue::from("1.00"),
        ];
        for raw in &rejected {
            assert!(!wave.matches(raw), "対象外になるべき: {:?}", raw);
        }
    }

    #[test]
    fn test_other_target_number() {
        let wave = WaveSpec::new(2);
        assert!(wave.matches(&WaveValue::from(2_i64)));
        assert!(wave.matches(&WaveValue::from("2,0")));
        assert!(wave.matches(&WaveValue::from("WAVE 2")));
        assert!(!wave.matches(&WaveValue::from("1")));
    }

    #[test]
    fn test_wave_value_from_json() {
        let values: Vec<WaveValue> = serde_json::from_str(r#"[1, "1,0", null, true]"#).unwrap();
        assert_eq!(values[0], WaveValue::Number(1.0));
        assert_eq!(values[1], WaveValue::Text("1,0".into()));
        assert_eq!(values[2], WaveValue::Empty);
        assert_eq!(values[3], WaveValue::Flag(true));
    }

    #[test]
    fn test_wave_value_display() {
        assert_eq!(WaveValue::Number(1.0).to_string(), "1");
        assert_eq!(WaveValue::Number(1.5).to_string(), "1.5");
        assert_eq!(WaveValue::Empty.to_string(), "");
    }
}
