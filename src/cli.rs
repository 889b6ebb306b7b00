use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "tester-lookup")]
#[command(about = "Поиск адресов тестировщика и инструкций по проверке", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// データファイル（.xlsx/.xls/.ods/.json）
    #[arg(long, global = true)]
    pub source: Option<PathBuf>,

    /// 対象のволна（設定値を上書き）
    #[arg(short, long, global = true)]
    pub wave: Option<u32>,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// ФИОで割り当てを検索
    Find {
        /// ФИО（部分一致）
        #[arg(required = true)]
        name: String,

        /// JSONで出力
        #[arg(long)]
        json: bool,

        /// 照合の途中経過も表示
        #[arg(long)]
        debug: bool,
    },

    /// Партнер × Способ проверки の指示テキストを表示
    Text {
        #[arg(required = true)]
        partner: String,

        #[arg(required = true)]
        method: String,
    },

    /// 対話モード（ФИО入力 → 割り当て選択 → 指示表示）
    Interactive,

    /// HTTP APIを起動
    Serve {
        /// ポート（デフォルト: 設定値または PORT）
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// データファイルのシート構成と列の対応を表示
    Inspect,

    /// 設定を表示/編集
    Config {
        /// データファイルを設定
        #[arg(long)]
        set_source: Option<PathBuf>,

        /// 対象のволнаを設定
        #[arg(long)]
        set_wave: Option<u32>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}
