//! Public API Types
//!
//! 公開APIで使用する列挙型を定義するモジュール。

use serde::{Serialize, Serializer};
use std::fmt;

/// シート選択方式
///
/// 抽出対象のシートを選択する方法を指定します。
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SheetSelector {
    /// すべてのシートを処理（デフォルト）
    All,

    /// インデックス指定（0始まり）
    ///
    /// 例: `SheetSelector::Index(0)` は最初のシートを選択
    Index(usize),

    /// シート名指定
    ///
    /// 例: `SheetSelector::Name("Day 1".to_string())`
    Name(String),

    /// 複数のインデックス指定
    Indices(Vec<usize>),

    /// 複数のシート名指定
    Names(Vec<String>),
}

/// 出力フォーマット
///
/// `ScheduleBundle`を書き出す際の形式を指定します。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum OutputFormat {
    /// XLSX形式（デフォルト）
    ///
    /// "Hotel Departures"、"WCH Departures"、"Combined Schedule"の
    /// 3シートをこの順序で持つワークブックを出力します。
    Xlsx,

    /// JSON形式
    ///
    /// バンドル全体（3つのレコード列、シートレポート、総シート数）を出力します。
    Json,

    /// Markdown形式
    ///
    /// オペレーター確認用のプレビューテーブルを出力します。
    ///
    /// # 出力例
    ///
    /// ```markdown
    /// ## Hotel Departures (2 entries)
    ///
    /// | Time  | Location | License Plate | Driver   | Bus No |
    /// |-------|----------|---------------|----------|--------|
    /// | 07:00 | Hotel A  | SBA1234X      | John Tan | 101    |
    /// ```
    Markdown,
}

/// シートの処理結果
///
/// 抽出されたレコードとは独立に、シートごとの処理結果を表します。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SheetStatus {
    /// ヘッダーが見つかり、1件以上のレコードを抽出した
    Processed,

    /// 行数が不足しているためスキップした
    SkippedInsufficientData,

    /// 走査範囲内でヘッダー行が見つからなかった
    NoHeaderFound,

    /// ヘッダーは見つかったが、レコードが1件も得られなかった
    NoSchedulesFound,
}

impl SheetStatus {
    /// オペレーター向けの表示ラベル
    pub fn label(&self) -> &'static str {
        match self {
            SheetStatus::Processed => "Processed",
            SheetStatus::SkippedInsufficientData => "Skipped - insufficient data",
            SheetStatus::NoHeaderFound => "No header found",
            SheetStatus::NoSchedulesFound => "No schedules found",
        }
    }
}

impl fmt::Display for SheetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// シリアライズ時もラベルを使用する
impl Serialize for SheetStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// 統合スケジュール上での出発種別
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DepartureType {
    /// 停留所（ホテル）からの出発
    Stop,

    /// 目的地（WCH）からの出発
    Destination,
}

impl DepartureType {
    /// "Departure Type"列に書き出すラベル
    pub fn label(&self) -> &'static str {
        match self {
            DepartureType::Stop => "Hotel Departure",
            DepartureType::Destination => "WCH Departure",
        }
    }
}

impl fmt::Display for DepartureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// シリアライズ時もラベルを使用する
impl Serialize for DepartureType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}
