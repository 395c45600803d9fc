//! Sheet Report Module
//!
//! シートごとの処理結果（`SheetSummary`）を組み立てるモジュール。

use serde::Serialize;

use crate::api::SheetStatus;
use crate::extract::SheetBatch;

/// シートごとの処理結果レポート
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SheetSummary {
    /// シート名
    pub sheet_name: String,

    /// 処理結果
    pub status: SheetStatus,

    /// 走査した行数（スキップ・ヘッダー未検出の場合は0）
    pub rows_scanned: usize,

    /// 停留所出発レコード数
    pub stop_departure_count: usize,

    /// 目的地出発レコード数
    pub destination_departure_count: usize,
}

impl SheetSummary {
    /// 行数不足でスキップしたシート
    pub fn skipped(sheet_name: &str) -> Self {
        Self::empty(sheet_name, SheetStatus::SkippedInsufficientData)
    }

    /// ヘッダー行が見つからなかったシート
    pub fn no_header(sheet_name: &str) -> Self {
        Self::empty(sheet_name, SheetStatus::NoHeaderFound)
    }

    /// 抽出を実行したシート
    ///
    /// レコードが1件以上あれば`Processed`、なければ`NoSchedulesFound`になります。
    pub fn from_batch(sheet_name: &str, rows_scanned: usize, batch: &SheetBatch) -> Self {
        let status = if batch.is_empty() {
            SheetStatus::NoSchedulesFound
        } else {
            SheetStatus::Processed
        };

        Self {
            sheet_name: sheet_name.to_string(),
            status,
            rows_scanned,
            stop_departure_count: batch.stop_departures.len(),
            destination_departure_count: batch.destination_departures.len(),
        }
    }

    fn empty(sheet_name: &str, status: SheetStatus) -> Self {
        Self {
            sheet_name: sheet_name.to_string(),
            status,
            rows_scanned: 0,
            stop_departure_count: 0,
            destination_departure_count: 0,
        }
    }
}
