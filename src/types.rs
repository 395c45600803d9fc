//! Types Module
//!
//! クレート全体で使用する共通データ型を定義するモジュール。

use chrono::NaiveTime;
use serde::{Serialize, Serializer};

use crate::api::DepartureType;
use crate::report::SheetSummary;

/// セルの生の値
///
/// 外部のスプレッドシートリーダーがデコードした、書式適用前の値です。
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RawCell {
    /// 空セル
    #[default]
    Empty,

    /// 文字列
    Text(String),

    /// 数値（日付・時刻のシリアル値を含む）
    Number(f64),
}

impl RawCell {
    /// 値が空かどうかを判定
    pub fn is_empty(&self) -> bool {
        matches!(self, RawCell::Empty)
    }

    /// 値を文字列として取得（書式適用前）
    ///
    /// 数値は往復可能な最短の10進表記になります（例: `7.0` → `"7"`、`0.25` → `"0.25"`）。
    pub fn to_text(&self) -> String {
        match self {
            RawCell::Empty => String::new(),
            RawCell::Text(s) => s.clone(),
            RawCell::Number(n) => n.to_string(),
        }
    }

    /// 前後の空白を除去した文字列を取得
    pub fn trimmed_text(&self) -> String {
        match self {
            RawCell::Text(s) => s.trim().to_string(),
            other => other.to_text().trim().to_string(),
        }
    }
}

impl From<&str> for RawCell {
    fn from(value: &str) -> Self {
        if value.is_empty() {
            RawCell::Empty
        } else {
            RawCell::Text(value.to_string())
        }
    }
}

impl From<String> for RawCell {
    fn from(value: String) -> Self {
        if value.is_empty() {
            RawCell::Empty
        } else {
            RawCell::Text(value)
        }
    }
}

impl From<f64> for RawCell {
    fn from(value: f64) -> Self {
        RawCell::Number(value)
    }
}

impl From<i64> for RawCell {
    fn from(value: i64) -> Self {
        RawCell::Number(value as f64)
    }
}

/// デコード済みのシート
///
/// 行の並びと、各行のセル値の並びを保持します。行ごとの長さは揃っている必要はありません。
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Sheet {
    /// シート名
    pub name: String,

    /// 行データ（0始まり）
    pub rows: Vec<Vec<RawCell>>,
}

impl Sheet {
    /// シート名と行データからシートを生成
    ///
    /// # 使用例
    ///
    /// ```rust
    /// use xlsxschedule::Sheet;
    ///
    /// let sheet = Sheet::new(
    ///     "Day 1",
    ///     vec![vec!["Hotel A", "Arena"], vec!["7:00", "8:00"]],
    /// );
    /// assert_eq!(sheet.row_count(), 2);
    /// ```
    pub fn new<N, R, C>(name: N, rows: R) -> Self
    where
        N: Into<String>,
        R: IntoIterator,
        R::Item: IntoIterator<Item = C>,
        C: Into<RawCell>,
    {
        Self {
            name: name.into(),
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(Into::into).collect())
                .collect(),
        }
    }

    /// 行数
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// 指定位置のセルを取得（範囲外は`None`）
    pub fn cell(&self, row: usize, col: usize) -> Option<&RawCell> {
        self.rows.get(row).and_then(|cells| cells.get(col))
    }
}

/// デコード済みのワークブック
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Workbook {
    /// シート（ワークブック内の順序を保持）
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    /// シートの並びからワークブックを生成
    pub fn new(sheets: Vec<Sheet>) -> Self {
        Self { sheets }
    }

    /// すべてのシート名を取得
    pub fn sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|s| s.name.clone()).collect()
    }
}

/// ヘッダー行で検出した停留所列
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopColumn {
    /// ヘッダーに書かれたままのラベル（前後の空白のみ除去、正規化前）
    pub label: String,

    /// 列インデックス（0始まり）
    pub column_index: usize,
}

/// シートごとのヘッダー配置
///
/// シートごとに一度だけ計算され、そのシートの行処理が終わると破棄されます。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HeaderLayout {
    /// ヘッダー行のインデックス
    pub header_row: usize,

    /// 停留所列（列順）
    pub stop_columns: Vec<StopColumn>,

    /// 目的地列（高々1つ）
    pub destination_column: Option<usize>,

    /// バス番号列
    pub bus_number_column: Option<usize>,

    /// バス詳細（運転手・ナンバープレート）列
    pub bus_details_column: Option<usize>,
}

/// 出発レコード
///
/// フィールド名は出力シートの列名にそのまま対応します。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DepartureRecord {
    /// 出発時刻（24時間制、"HH:MM"として出力）
    #[serde(rename = "Time", serialize_with = "serialize_hhmm")]
    pub time: NaiveTime,

    /// 正規化済みの場所名
    #[serde(rename = "Location")]
    pub location: String,

    /// ナンバープレート
    #[serde(rename = "License Plate")]
    pub license_plate: String,

    /// 運転手名
    #[serde(rename = "Driver")]
    pub driver: String,

    /// バス番号
    #[serde(rename = "Bus No")]
    pub bus_number: String,

    /// 統合スケジュールでのみ付与される出発種別
    #[serde(rename = "Departure Type", skip_serializing_if = "Option::is_none")]
    pub departure_type: Option<DepartureType>,
}

impl DepartureRecord {
    /// "HH:MM"形式の時刻文字列
    pub fn time_text(&self) -> String {
        self.time.format("%H:%M").to_string()
    }

    /// 出発種別を付与したコピーを返す
    pub fn tagged(&self, departure_type: DepartureType) -> Self {
        Self {
            departure_type: Some(departure_type),
            ..self.clone()
        }
    }
}

fn serialize_hhmm<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&time.format("%H:%M"))
}

/// 抽出結果の一式
///
/// 呼び出し側が所有し、構築後は変更されません。
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ScheduleBundle {
    /// 停留所出発（運行日順）
    pub stop_departures: Vec<DepartureRecord>,

    /// 目的地出発（運行日順）
    pub destination_departures: Vec<DepartureRecord>,

    /// 統合スケジュール（種別付き、運行日順）
    pub combined: Vec<DepartureRecord>,

    /// シートごとのレポート
    pub sheet_summaries: Vec<SheetSummary>,

    /// ワークブック内の総シート数
    pub total_sheets: usize,
}
