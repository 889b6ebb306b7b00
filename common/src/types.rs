//! 割り当てデータの型定義
//!
//! CLIとHTTP APIで共有される型:
//! - AssignmentRow: シート「Выборка」の1行
//! - AssignmentSnapshot: 読み込み済みの全行（読み取り専用）

use crate::normalize::NormalizedKey;
use crate::wave::WaveValue;
use serde::{Deserialize, Serialize};

/// 割り当て1件
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AssignmentRow {
    pub tester: String,           // Тестировщик
    pub wave: WaveValue,          // № волны
    pub partner: String,          // Партнер
    pub restaurant: String,       // Ресторан
    pub address: String,          // Адрес
    pub city: String,             // Город
    pub method: String,           // Способ проверки
    pub booking: String,          // Нужна бронь?
    #[serde(alias = "min_order")]
    pub min_order: String,        // Минимальный заказ на доставку
    pub website: String,          // Ссылка на сайт
    pub comment: String,          // Комментарий
}

impl AssignmentRow {
    /// 一覧表示用の1行表現
    pub fn display(&self) -> String {
        format!(
            "{} → {} → {} → {}",
            self.partner, self.restaurant, self.address, self.method
        )
    }

    pub fn tester_key(&self) -> NormalizedKey {
        NormalizedKey::new(&self.tester)
    }
}

/// 読み込み済みの割り当て一覧
///
/// 一度作ったら変更しない。再読み込み時は丸ごと差し替える。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssignmentSnapshot {
    rows: Vec<AssignmentRow>,
}

impl AssignmentSnapshot {
    pub fn new(rows: Vec<AssignmentRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[AssignmentRow] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AssignmentRow> {
        self.rows.iter()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl From<Vec<AssignmentRow>> for AssignmentSnapshot {
    fn from(rows: Vec<AssignmentRow>) -> Self {
        Self::new(rows)
    }
}

impl<'a> IntoIterator for &'a AssignmentSnapshot {
    type Item = &'a AssignmentRow;
    type IntoIter = std::slice::Iter<'a, AssignmentRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
