//! Error Types Module
//!
//! クレート全体で使用する構造化エラー型を定義するモジュール。
//! `thiserror`を使用して、エラーの自動変換とメッセージフォーマットを実現する。

use thiserror::Error;

/// xlsxscheduleクレート全体で使用するエラー型
///
/// 時刻表の抽出処理そのものは、シート単位・セル単位の不備をエラーとして扱いません
/// （`SheetStatus`への格下げ、またはレコードの省略で吸収します）。
/// このエラー型が表すのは、入力の読み込み・出力の書き込み・設定の検証、
/// そして抽出全体を中断させる想定外の失敗のみです。
///
/// # エラーの種類
///
/// - `Io`: I/O操作中に発生したエラー
/// - `Parse`: スプレッドシートの解析中に発生したエラー（calamine由来）
/// - `Write`: XLSX出力の生成中に発生したエラー（rust_xlsxwriter由来）
/// - `Json`: JSON出力の生成中に発生したエラー
/// - `Config`: 設定の検証に失敗したエラー
/// - `SecurityViolation`: 入力サイズなどの制限に違反したエラー
/// - `Processing`: シート処理中の失敗をラップした致命的エラー
///
/// # 使用例
///
/// ```rust,no_run
/// use xlsxschedule::{ExtractorBuilder, ScheduleError};
/// use std::fs::File;
///
/// fn run(path: &str) -> Result<(), ScheduleError> {
///     let extractor = ExtractorBuilder::new().build()?;
///     let file = File::open(path)?;  // Ioエラーが自動的に変換される
///     let bundle = extractor.extract_from_reader(file)?;
///     println!("{} departures", bundle.combined.len());
///     Ok(())
/// }
/// ```
#[derive(Error, Debug)]
pub enum ScheduleError {
    /// I/O操作中に発生したエラー
    ///
    /// `#[from]`属性により、`std::io::Error`から自動的に変換されます。
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// スプレッドシートの解析中に発生したエラー
    ///
    /// calamineクレートがワークブックを開く、またはシートを読み込む際に
    /// 発生したエラーです。ファイル形式が不正、破損したファイルなどが原因となります。
    #[error("Failed to parse spreadsheet: {0}")]
    Parse(#[from] calamine::Error),

    /// XLSX出力の生成中に発生したエラー
    #[error("Failed to write workbook: {0}")]
    Write(#[from] rust_xlsxwriter::XlsxError),

    /// JSON出力の生成中に発生したエラー
    #[error("Failed to serialize schedule: {0}")]
    Json(#[from] serde_json::Error),

    /// 設定の検証に失敗したエラー
    ///
    /// `ExtractorBuilder::build()`時、またはシート選択の解決時に発生します。
    ///
    /// # 例
    ///
    /// ```rust,no_run
    /// use xlsxschedule::{ExtractorBuilder, ScheduleError};
    ///
    /// let result = ExtractorBuilder::new()
    ///     .with_header_scan_rows(0)  // 無効な走査行数
    ///     .build();
    ///
    /// match result {
    ///     Err(ScheduleError::Config(msg)) => {
    ///         println!("設定エラー: {}", msg);
    ///     }
    ///     _ => {}
    /// }
    /// ```
    #[error("Configuration error: {0}")]
    Config(String),

    /// 入力制限に違反したエラー
    #[error("Security violation: {0}")]
    SecurityViolation(String),

    /// シート処理中に発生した想定外の失敗
    ///
    /// 抽出処理全体を中断し、部分的な結果は返しません。
    /// `source`には元の原因が保持されます。
    #[error("Failed to process schedule data in sheet '{sheet}': {source}")]
    Processing {
        /// 失敗したシート名
        sheet: String,
        /// 元のエラー
        #[source]
        source: Box<ScheduleError>,
    },
}

impl ScheduleError {
    /// シート処理中のエラーを`Processing`でラップする
    pub(crate) fn in_sheet(sheet: &str, source: ScheduleError) -> Self {
        ScheduleError::Processing {
            sheet: sheet.to_string(),
            source: Box::new(source),
        }
    }
}
