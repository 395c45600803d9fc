//! Schedule Assembler Module
//!
//! シートごとの抽出結果を連結し、運行日順（05:00開始、翌04:59まで）に並べて
//! `ScheduleBundle`を組み立てるモジュール。

use chrono::{NaiveTime, Timelike};

use crate::api::DepartureType;
use crate::extract::{SheetBatch, DEFAULT_DAY_START_HOUR};
use crate::report::SheetSummary;
use crate::types::{DepartureRecord, ScheduleBundle};

/// 1シート分の処理結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetOutcome {
    /// シートのレポート
    pub summary: SheetSummary,

    /// 抽出されたレコード（スキップしたシートでは空）
    pub batch: SheetBatch,
}

/// 05:00からの経過分を返す
///
/// 05:00 → 0、04:59 → 1439。05:00〜翌04:59の1440分を0〜1439に一対一で対応させます。
///
/// # 使用例
///
/// ```rust
/// use chrono::NaiveTime;
/// use xlsxschedule::minutes_since_5am;
///
/// let at = |h, m| NaiveTime::from_hms_opt(h, m, 0).unwrap();
/// assert_eq!(minutes_since_5am(at(5, 0)), 0);
/// assert_eq!(minutes_since_5am(at(23, 30)), 1110);
/// assert_eq!(minutes_since_5am(at(4, 59)), 1439);
/// ```
pub fn minutes_since_5am(time: NaiveTime) -> u32 {
    minutes_since_day_start(time, DEFAULT_DAY_START_HOUR)
}

/// 指定した開始時刻からの経過分を返す
pub fn minutes_since_day_start(time: NaiveTime, day_start_hour: u32) -> u32 {
    let (hour, minute) = (time.hour(), time.minute());
    if hour >= day_start_hour {
        (hour - day_start_hour) * 60 + minute
    } else {
        (hour + 24 - day_start_hour) * 60 + minute
    }
}

/// レコードを運行日順（05:00開始）に並べる
///
/// 安定ソートのため、同じ時刻のレコードは元の順序を保ちます。
pub fn sort_by_operating_day(records: &mut [DepartureRecord]) {
    sort_from_day_start(records, DEFAULT_DAY_START_HOUR);
}

fn sort_from_day_start(records: &mut [DepartureRecord], day_start_hour: u32) {
    records.sort_by_key(|record| minutes_since_day_start(record.time, day_start_hour));
}

/// シートごとの処理結果から`ScheduleBundle`を組み立てる
///
/// 停留所出発と目的地出発はそれぞれ独立に並べ替えます。統合スケジュールは
/// 並べ替え済みの停留所出発（種別`Stop`）の後ろに目的地出発（種別`Destination`）を
/// 連結してから同じ順序で並べ替えるため、同時刻では停留所出発が先になります。
pub fn assemble(
    outcomes: Vec<SheetOutcome>,
    total_sheets: usize,
    day_start_hour: u32,
) -> ScheduleBundle {
    let mut sheet_summaries = Vec::with_capacity(outcomes.len());
    let mut stop_departures = Vec::new();
    let mut destination_departures = Vec::new();

    for SheetOutcome { summary, batch } in outcomes {
        sheet_summaries.push(summary);
        stop_departures.extend(batch.stop_departures);
        destination_departures.extend(batch.destination_departures);
    }

    sort_from_day_start(&mut stop_departures, day_start_hour);
    sort_from_day_start(&mut destination_departures, day_start_hour);

    let mut combined: Vec<DepartureRecord> = stop_departures
        .iter()
        .map(|record| record.tagged(DepartureType::Stop))
        .chain(
            destination_departures
                .iter()
                .map(|record| record.tagged(DepartureType::Destination)),
        )
        .collect();
    sort_from_day_start(&mut combined, day_start_hour);

    tracing::info!(
        total_sheets,
        stop_departures = stop_departures.len(),
        destination_departures = destination_departures.len(),
        combined = combined.len(),
        "assembled schedule"
    );

    ScheduleBundle {
        stop_departures,
        destination_departures,
        combined,
        sheet_summaries,
        total_sheets,
    }
}
