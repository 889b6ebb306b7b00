//! 列名エイリアス
//!
//! シートの見出しは版によって揺れるため、候補名を正規化して照合する。

use crate::normalize::normalize;
use serde::Serialize;

/// 割り当て行のフィールド
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Column {
    Tester,
    Wave,
    Partner,
    Restaurant,
    Address,
    City,
    Method,
    Booking,
    MinOrder,
    Website,
    Comment,
}

impl Column {
    pub const ALL: [Column; 11] = [
        Column::Tester,
        Column::Wave,
        Column::Partner,
        Column::Restaurant,
        Column::Address,
        Column::City,
        Column::Method,
        Column::Booking,
        Column::MinOrder,
        Column::Website,
        Column::Comment,
    ];

    /// 見出しの候補（優先順）
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Column::Tester => &["ФИО", "Тестировщик", "Тестирующий", "Фио"],
            Column::Wave => &["№ волны", "Номер волны", "Волна"],
            Column::Partner => &["Партнер", "Партнёр", "Partner"],
            Column::Restaurant => &["Ресторан", "Рестораны", "Название", "Название ресторана"],
            Column::Address => &["Адрес"],
            Column::City => &["Город"],
            Column::Method => &["Способ проверки", "Способ", "Проверка"],
            Column::Booking => &["Нужна бронь?", "Бронь"],
            Column::MinOrder => &["Минимальный заказ на доставку", "Мин. заказ"],
            Column::Website => &["Ссылка на сайт", "Сайт"],
            Column::Comment => &["Комментарий"],
        }
    }
}

/// 見出し行から見つかった列位置
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ColumnMap {
    positions: Vec<(Column, usize)>,
}

impl ColumnMap {
    /// 見出し行を解析する
    pub fn from_header<S: AsRef<str>>(header: &[S]) -> Self {
        let positions = Column::ALL
            .iter()
            .filter_map(|&column| find_column(header, column.aliases()).map(|idx| (column, idx)))
            .collect();
        Self { positions }
    }

    pub fn position(&self, column: Column) -> Option<usize> {
        self.positions
            .iter()
            .find(|(c, _)| *c == column)
            .map(|(_, idx)| *idx)
    }

    pub fn contains(&self, column: Column) -> bool {
        self.position(column).is_some()
    }

    /// 見つからなかった列
    pub fn missing(&self) -> Vec<Column> {
        Column::ALL
            .iter()
            .copied()
            .filter(|c| !self.contains(*c))
            .collect()
    }
}

/// 候補名のいずれかに一致する最初の見出し位置
///
/// 候補の優先順で探し、同じ候補に一致する見出しが複数あれば左の列を取る。
pub fn find_column<S: AsRef<str>>(header: &[S], aliases: &[&str]) -> Option<usize> {
    let normalized: Vec<String> = header.iter().map(|h| normalize(h.as_ref())).collect();

    aliases.iter().find_map(|alias| {
        let alias = normalize(alias);
        normalized
            .iter()
            .position(|h| !h.is_empty() && *h == alias)
    })
}
