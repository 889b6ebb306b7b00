use thiserror::Error;

#[derive(Error, Debug)]
pub enum LookupError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("データファイルが見つかりません（候補: {0}）")]
    NoSourceFound(String),

    #[error("未対応のデータ形式: {0}")]
    UnsupportedSource(String),

    #[error("シート「{0}」が見つかりません")]
    SheetNotFound(String),

    #[error("シート「{sheet}」に列「{column}」がありません")]
    MissingColumn { sheet: String, column: String },

    #[error("Excel読み込みエラー: {0}")]
    Workbook(String),

    #[error("データを読み込めません（再読み込みしてください）")]
    SnapshotUnavailable,

    #[error("ФИО не указано")]
    EmptyQuery,

    #[error("入力エラー: {0}")]
    Prompt(String),

    #[error("データ形式エラー: {0}")]
    Dataset(#[from] tester_lookup_common::Error),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("サーバエラー: {0}")]
    Server(String),
}

impl From<calamine::Error> for LookupError {
    fn from(e: calamine::Error) -> Self {
        LookupError::Workbook(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, LookupError>;
