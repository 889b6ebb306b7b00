//! ワークブック（.xlsx/.xls/.ods）からの読み込み
//!
//! - シート「Выборка」: 1行目が見出し、以降が割り当て
//! - シート「Тексты」: 3行のキー行列（なければ空の行列）

use super::{find_sheet_name, ColumnMapping, DataSource, SourceReport};
use crate::error::{LookupError, Result};
use calamine::{open_workbook_auto, Data, Range, Reader, Sheets};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tester_lookup_common::{
    AssignmentRow, AssignmentSnapshot, Column, ColumnMap, Dataset, TextMatrix, WaveValue,
};

pub struct WorkbookSource {
    path: PathBuf,
    selection_sheet: String,
    texts_sheet: String,
}

impl WorkbookSource {
    pub fn new(path: &Path, selection_sheet: &str, texts_sheet: &str) -> Self {
        Self {
            path: path.to_path_buf(),
            selection_sheet: selection_sheet.to_string(),
            texts_sheet: texts_sheet.to_string(),
        }
    }

    fn open(&self) -> Result<Sheets<BufReader<File>>> {
        if !self.path.exists() {
            return Err(LookupError::FileNotFound(self.path.display().to_string()));
        }
        Ok(open_workbook_auto(&self.path)?)
    }

    fn read_selection(&self, workbook: &mut Sheets<BufReader<File>>, names: &[String]) -> Result<(String, Vec<Vec<Data>>)> {
        let sheet = find_sheet_name(names, &self.selection_sheet)
            .ok_or_else(|| LookupError::SheetNotFound(self.selection_sheet.clone()))?
            .to_string();
        let range = workbook.worksheet_range(&sheet)?;
        Ok((sheet, relative_grid(&range)))
    }

    fn read_texts(&self, workbook: &mut Sheets<BufReader<File>>, names: &[String]) -> Result<Option<(String, Vec<Vec<Data>>)>> {
        let Some(sheet) = find_sheet_name(names, &self.texts_sheet) else {
            return Ok(None);
        };
        let range = workbook.worksheet_range(sheet)?;
        Ok(Some((sheet.to_string(), absolute_grid(&range))))
    }
}

impl DataSource for WorkbookSource {
    fn load(&self) -> Result<Dataset> {
        let mut workbook = self.open()?;
        let names = workbook.sheet_names();

        let (sheet, selection) = self.read_selection(&mut workbook, &names)?;
        let assignments = parse_assignments(&selection, &sheet)?;

        let texts = match self.read_texts(&mut workbook, &names)? {
            Some((_, grid)) => parse_text_matrix(&grid),
            None => {
                tracing::warn!(sheet = %self.texts_sheet, "テキストシートがないため指示は表示されません");
                TextMatrix::default()
            }
        };

        tracing::debug!(
            path = %self.path.display(),
            assignments = assignments.len(),
            text_rows = texts.rows().len(),
            "ワークブック読み込み完了"
        );

        Ok(Dataset::new(assignments, texts))
    }

    fn inspect(&self) -> Result<SourceReport> {
        let mut workbook = self.open()?;
        let names = workbook.sheet_names();

        let mut report = SourceReport {
            path: self.path.display().to_string(),
            sheets: names.clone(),
            ..Default::default()
        };

        if let Some(sheet) = find_sheet_name(&names, &self.selection_sheet) {
            let sheet = sheet.to_string();
            let grid = relative_grid(&workbook.worksheet_range(&sheet)?);
            let header: Vec<String> = grid.first().map(|r| r.iter().map(cell_text).collect()).unwrap_or_default();
            let map = ColumnMap::from_header(&header);

            report.column_mapping = Column::ALL
                .iter()
                .map(|&column| ColumnMapping {
                    column,
                    header: map.position(column).map(|idx| header[idx].clone()),
                })
                .collect();
            report.assignment_rows = grid.iter().skip(1).filter(|r| !is_blank(r)).count();
            report.selection_header = header;
            report.selection_sheet = Some(sheet);
        }

        if let Some((sheet, grid)) = self.read_texts(&mut workbook, &names)? {
            report.text_rows = grid.len();
            report.texts_sheet = Some(sheet);
        }

        Ok(report)
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

/// 使用範囲のみ（見出し行が先頭に来る）
fn relative_grid(range: &Range<Data>) -> Vec<Vec<Data>> {
    range.rows().map(|r| r.to_vec()).collect()
}

/// A1起点の位置を保った表（空の先頭行・先頭列を補う）
fn absolute_grid(range: &Range<Data>) -> Vec<Vec<Data>> {
    let (row_offset, col_offset) = range.start().unwrap_or((0, 0));

    let mut grid: Vec<Vec<Data>> = vec![Vec::new(); row_offset as usize];
    for row in range.rows() {
        let mut cells = vec![Data::Empty; col_offset as usize];
        cells.extend(row.iter().cloned());
        grid.push(cells);
    }
    grid
}

/// 見出し行 + データ行から割り当て一覧を作る
pub fn parse_assignments(grid: &[Vec<Data>], sheet: &str) -> Result<AssignmentSnapshot> {
    let Some(header_row) = grid.first() else {
        return Ok(AssignmentSnapshot::default());
    };

    let header: Vec<String> = header_row.iter().map(cell_text).collect();
    let map = ColumnMap::from_header(&header);

    if !map.contains(Column::Tester) {
        return Err(LookupError::MissingColumn {
            sheet: sheet.to_string(),
            column: Column::Tester.aliases().join(" / "),
        });
    }

    let missing = map.missing();
    if !missing.is_empty() {
        tracing::debug!(?missing, "見出しにない列は空として扱います");
    }

    let rows = grid
        .iter()
        .skip(1)
        .filter(|r| !is_blank(r))
        .map(|cells| {
            let text = |column: Column| {
                map.position(column)
                    .and_then(|idx| cells.get(idx))
                    .map(cell_text)
                    .unwrap_or_default()
            };

            AssignmentRow {
                tester: text(Column::Tester),
                wave: map
                    .position(Column::Wave)
                    .and_then(|idx| cells.get(idx))
                    .map(wave_value)
                    .unwrap_or_default(),
                partner: text(Column::Partner),
                restaurant: text(Column::Restaurant),
                address: text(Column::Address),
                city: text(Column::City),
                method: text(Column::Method),
                booking: text(Column::Booking),
                min_order: text(Column::MinOrder),
                website: text(Column::Website),
                comment: text(Column::Comment),
            }
        })
        .collect::<Vec<_>>();

    Ok(AssignmentSnapshot::new(rows))
}

/// テキストシートを行列に変換
pub fn parse_text_matrix(grid: &[Vec<Data>]) -> TextMatrix {
    TextMatrix::new(
        grid.iter()
            .map(|row| row.iter().map(cell_text).collect())
            .collect(),
    )
}

fn is_blank(row: &[Data]) -> bool {
    row.iter().all(|c| cell_text(c).is_empty())
}

/// セルを表示用文字列に変換（整数値の小数は `.0` を落とす）
pub fn cell_text(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.trim().to_string(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) if f.fract() == 0.0 && f.is_finite() => format!("{}", *f as i64),
        Data::Float(f) => f.to_string(),
        Data::Bool(b) => b.to_string(),
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}

/// 「№ волны」セルは数値か文字列かを保ったまま渡す
pub fn wave_value(cell: &Data) -> WaveValue {
    match cell {
        Data::Int(i) => WaveValue::Number(*i as f64),
        Data::Float(f) => WaveValue::Number(*f),
        Data::String(s) => WaveValue::Text(s.clone()),
        Data::Bool(b) => WaveValue::Flag(*b),
        Data::Empty => WaveValue::Empty,
        other => WaveValue::Text(other.to_string()),
    }
}
