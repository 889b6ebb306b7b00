//! 端末表示用の整形

use tester_lookup_common::{AssignmentRow, TextResolution};

/// 割り当て1件のカード表示
pub fn format_assignment(index: usize, row: &AssignmentRow) -> String {
    let mut lines = vec![
        format!("{}) {} [{}]", index + 1, row.partner, row.method),
        format!("   {}", row.restaurant),
        format!("   {}", row.address),
    ];

    let optional = [
        ("Город", &row.city),
        ("Бронь", &row.booking),
        ("Мин. заказ", &row.min_order),
        ("Сайт", &row.website),
        ("Комментарий", &row.comment),
    ];
    for (label, value) in optional {
        if !value.is_empty() {
            lines.push(format!("   {}: {}", label, value));
        }
    }

    lines.join("\n")
}

/// 指示テキストの表示
pub fn format_instructions(tester: &str, row: &AssignmentRow, resolution: &TextResolution) -> String {
    let body = match resolution {
        TextResolution::Found { text, .. } => text.clone(),
        TextResolution::Fallback { text } => format!("{}\n\n(общий текст)", text),
        TextResolution::NotFound => "Текст не найден".to_string(),
        TextResolution::InvalidStructure { .. } => "Неверная структура листа \"Тексты\"".to_string(),
    };

    format!(
        "Тестировщик: {}\n{}\n\n{}",
        tester,
        row.display(),
        body
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> AssignmentRow {
        AssignmentRow {
            partner: "PartnerX".into(),
            restaurant: "Пицца".into(),
            address: "ул. Ленина, 1".into(),
            method: "call".into(),
            city: "Казань".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_format_assignment_skips_empty_fields() {
        let text = format_assignment(0, &row());
        assert!(text.starts_with("1) PartnerX [call]"));
        assert!(text.contains("Город: Казань"));
        assert!(!text.contains("Бронь"));
    }

    #[test]
    fn test_format_instructions() {
        let resolution = TextResolution::Fallback { text: "Общие правила".into() };
        let text = format_instructions("Иванов", &row(), &resolution);
        assert!(text.contains("Тестировщик: Иванов"));
        assert!(text.contains("PartnerX → Пицца"));
        assert!(text.contains("(общий текст)"));
    }
}
