use crate::error::{LookupError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const SOURCE_ENV: &str = "TESTER_LOOKUP_SOURCE";
const PORT_ENV: &str = "PORT";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// データファイル（.xlsx/.xls/.ods/.json）
    pub source: Option<PathBuf>,
    pub selection_sheet: String,
    pub texts_sheet: String,
    pub target_wave: u32,
    pub cache_ttl_seconds: u64,
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: None,
            selection_sheet: "Выборка".into(),
            texts_sheet: "Тексты".into(),
            target_wave: 1,
            cache_ttl_seconds: 120,
            port: 8000,
        }
    }
}

impl Config {
    /// 実行時の設定（設定ファイル + 環境変数による上書き）
    ///
    /// 上書きはこのプロセスの中だけで、ファイルには書き戻さない。
    pub fn load() -> Result<Self> {
        let mut config = Self::load_file()?;
        config.apply_env();
        Ok(config)
    }

    /// 設定ファイルの内容のみ（なければデフォルト）
    pub fn load_file() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&config_path)?;
        Ok(serde_json::from_str(&content)?)
    }

    fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    /// ファイル上の設定だけを書き換えて保存する
    fn update_file(edit: impl FnOnce(&mut Self)) -> Result<()> {
        let mut stored = Self::load_file()?;
        edit(&mut stored);
        stored.save()
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| LookupError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("tester-lookup").join("config.json"))
    }

    fn apply_env(&mut self) {
        if let Ok(source) = std::env::var(SOURCE_ENV) {
            if !source.trim().is_empty() {
                self.source = Some(PathBuf::from(source));
            }
        }

        if let Ok(port) = std::env::var(PORT_ENV) {
            match port.parse() {
                Ok(p) => self.port = p,
                Err(_) => tracing::warn!(%port, "PORTが数値ではないため無視します"),
            }
        }
    }

    pub fn set_source(&mut self, source: PathBuf) -> Result<()> {
        self.source = Some(source.clone());
        Self::update_file(|stored| stored.source = Some(source))
    }

    pub fn set_target_wave(&mut self, wave: u32) -> Result<()> {
        if wave == 0 {
            return Err(LookupError::Config("волна は1以上で指定してください".into()));
        }
        self.target_wave = wave;
        Self::update_file(|stored| stored.target_wave = wave)
    }
}
