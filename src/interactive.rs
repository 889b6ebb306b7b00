//! 対話モード
//!
//! ФИО入力 → 割り当て一覧から選択 → 指示テキスト表示 を繰り返す。

use crate::cache::DatasetCache;
use crate::error::{LookupError, Result};
use crate::lookup;
use crate::render::{format_assignment, format_instructions};
use dialoguer::{Input, Select};
use tester_lookup_common::{AssignmentRow, StatusSink, WaveSpec};

/// 一覧の末尾に置く「新しい検索」
const NEW_SEARCH_LABEL: &str = "← Новый поиск";

/// 入力の解釈
#[derive(Debug, PartialEq, Eq)]
pub enum PromptAction {
    Search(String),
    Quit,
}

pub fn parse_prompt(input: &str) -> PromptAction {
    match input.trim() {
        "q" | "Q" | "выход" => PromptAction::Quit,
        other => PromptAction::Search(other.to_string()),
    }
}

/// 対話ループ
pub fn run_interactive(cache: &DatasetCache, wave: &WaveSpec, status: &dyn StatusSink) -> Result<()> {
    println!("🔎 Поиск адресов ({})", wave);
    println!("---");
    println!("Введите ФИО, [q] — выход");
    println!("---\n");

    loop {
        let input: String = Input::new()
            .with_prompt("ФИО")
            .allow_empty(true)
            .interact_text()
            .map_err(|e| LookupError::Prompt(e.to_string()))?;

        let query = match parse_prompt(&input) {
            PromptAction::Quit => break,
            PromptAction::Search(q) => q,
        };

        let items = match lookup::search(cache, &query, wave, status) {
            Ok(items) => items,
            Err(LookupError::EmptyQuery) => continue,
            Err(e) => return Err(e),
        };

        if items.is_empty() {
            continue;
        }

        for (i, item) in items.iter().enumerate() {
            println!("{}\n", format_assignment(i, item));
        }

        while let Some(row) = pick_assignment(&items)? {
            let resolution = lookup::instructions(cache, row, status);
            println!("\n{}\n", format_instructions(query.trim(), row, &resolution));
        }
    }

    println!("Готово");
    Ok(())
}

/// 一覧から1件選ぶ（「新しい検索」なら None）
fn pick_assignment(items: &[AssignmentRow]) -> Result<Option<&AssignmentRow>> {
    let mut labels: Vec<String> = items.iter().map(AssignmentRow::display).collect();
    labels.push(NEW_SEARCH_LABEL.to_string());

    let selected = Select::new()
        .with_prompt("Выберите адрес")
        .items(&labels)
        .default(0)
        .interact_opt()
        .map_err(|e| LookupError::Prompt(e.to_string()))?;

    Ok(selected.and_then(|idx| items.get(idx)))
}
