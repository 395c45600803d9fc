//! Row Extractor Module
//!
//! ヘッダー行より下の各行から出発レコードを組み立てるモジュール。
//!
//! 結合セルは値を先頭行にしか持たないため、バス番号・運転手・ナンバープレートが
//! 空の行は直前の行から値を補います（上方向の遡り探索と、シート内で持ち回る
//! `BusContext`の2段構え）。

use chrono::{NaiveTime, Timelike};

use crate::label::{clean_route_name, clean_stop_name, parse_driver_and_license};
use crate::time::parse_time;
use crate::types::{DepartureRecord, HeaderLayout, Sheet};

/// 遡り探索の既定行数
pub const DEFAULT_LOOKBACK_ROWS: usize = 20;

/// 運行日の既定開始時刻（時）
pub const DEFAULT_DAY_START_HOUR: u32 = 5;

/// 目的地レコードで停留所名が1つも残らなかった場合の場所名
const FALLBACK_ROUTE_NAME: &str = "Hotels";

/// シート内で持ち回るバス情報
///
/// シートの走査開始時に空で初期化され、行から空でない値が得られるたびに
/// そのフィールドだけが更新されます（消去されることはありません）。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BusContext {
    /// バス番号
    pub bus_number: String,

    /// 運転手名
    pub driver: String,

    /// ナンバープレート
    pub license_plate: String,
}

impl BusContext {
    fn is_complete(&self) -> bool {
        !self.bus_number.is_empty() && !self.driver.is_empty() && !self.license_plate.is_empty()
    }

    /// 空でないフィールドだけを取り込む
    fn absorb(&mut self, other: BusContext) {
        if !other.bus_number.is_empty() {
            self.bus_number = other.bus_number;
        }
        if !other.driver.is_empty() {
            self.driver = other.driver;
        }
        if !other.license_plate.is_empty() {
            self.license_plate = other.license_plate;
        }
    }

    /// 空のフィールドのみを補う
    fn fill_missing(&mut self, bus_number: Option<String>, details: Option<&str>) {
        if self.bus_number.is_empty() {
            if let Some(bus_number) = bus_number.filter(|s| !s.is_empty()) {
                self.bus_number = bus_number;
            }
        }

        if self.driver.is_empty() || self.license_plate.is_empty() {
            if let Some(details) = details.filter(|s| !s.is_empty()) {
                let parsed = parse_driver_and_license(details);
                if self.driver.is_empty() {
                    self.driver = parsed.driver;
                }
                if self.license_plate.is_empty() {
                    self.license_plate = parsed.license_plate;
                }
            }
        }
    }
}

/// 1シート分の抽出結果
///
/// シートごとに独立したバッチとして生成され、後段で連結されます。
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SheetBatch {
    /// 停留所出発レコード（行順）
    pub stop_departures: Vec<DepartureRecord>,

    /// 目的地出発レコード（行順）
    pub destination_departures: Vec<DepartureRecord>,
}

impl SheetBatch {
    /// レコードが1件もないかどうか
    pub fn is_empty(&self) -> bool {
        self.stop_departures.is_empty() && self.destination_departures.is_empty()
    }
}

/// 行抽出器
#[derive(Debug, Clone)]
pub struct RowExtractor<'a> {
    sheet: &'a Sheet,
    layout: &'a HeaderLayout,
    lookback_rows: usize,
    day_start_hour: u32,
}

impl<'a> RowExtractor<'a> {
    /// 既定の遡り行数・開始時刻で抽出器を生成
    pub fn new(sheet: &'a Sheet, layout: &'a HeaderLayout) -> Self {
        Self {
            sheet,
            layout,
            lookback_rows: DEFAULT_LOOKBACK_ROWS,
            day_start_hour: DEFAULT_DAY_START_HOUR,
        }
    }

    /// 遡り探索の行数を指定する
    pub fn with_lookback_rows(mut self, rows: usize) -> Self {
        self.lookback_rows = rows;
        self
    }

    /// 運行日の開始時刻（これより前の時刻は破棄）を指定する
    pub fn with_day_start_hour(mut self, hour: u32) -> Self {
        self.day_start_hour = hour;
        self
    }

    /// ヘッダー行より下のすべての行を処理する
    pub fn extract(&self) -> SheetBatch {
        let mut context = BusContext::default();
        let mut batch = SheetBatch::default();

        for row_idx in self.layout.header_row + 1..self.sheet.row_count() {
            self.extract_row(row_idx, &mut context, &mut batch);
        }

        batch
    }

    /// 1行を処理し、得られたレコードをバッチに追加する
    fn extract_row(&self, row_idx: usize, context: &mut BusContext, batch: &mut SheetBatch) {
        let stop_times: Vec<(&str, NaiveTime)> = self
            .layout
            .stop_columns
            .iter()
            .filter_map(|column| {
                self.time_at(row_idx, column.column_index)
                    .map(|time| (column.label.as_str(), time))
            })
            .collect();

        if stop_times.is_empty() {
            return;
        }

        let destination_time = self
            .layout
            .destination_column
            .and_then(|col| self.time_at(row_idx, col));

        let mut found = BusContext::default();
        found.fill_missing(self.bus_number_at(row_idx), self.details_at(row_idx).as_deref());
        if !found.is_complete() {
            self.look_back(row_idx, &mut found);
        }
        context.absorb(found);

        for (label, time) in &stop_times {
            let record = self.record(*time, clean_stop_name(label), context);
            tracing::debug!(
                sheet = %self.sheet.name,
                row = row_idx,
                time = %record.time_text(),
                location = %record.location,
                "stop departure"
            );
            batch.stop_departures.push(record);
        }

        if let Some(time) = destination_time {
            let route: Vec<String> = stop_times
                .iter()
                .map(|(label, _)| clean_route_name(label))
                .filter(|name| !name.is_empty())
                .collect();
            let location = if route.is_empty() {
                FALLBACK_ROUTE_NAME.to_string()
            } else {
                route.join(" & ")
            };

            let record = self.record(time, location, context);
            tracing::debug!(
                sheet = %self.sheet.name,
                row = row_idx,
                time = %record.time_text(),
                location = %record.location,
                "destination departure"
            );
            batch.destination_departures.push(record);
        }
    }

    /// 直前の行を遡り、空のフィールドを補う（結合セルの復元）
    ///
    /// ヘッダー行を越えては遡りません。
    fn look_back(&self, row_idx: usize, found: &mut BusContext) {
        let lower = row_idx
            .saturating_sub(self.lookback_rows)
            .max(self.layout.header_row + 1);

        for prev in (lower..row_idx).rev() {
            found.fill_missing(self.bus_number_at(prev), self.details_at(prev).as_deref());
            if found.is_complete() {
                tracing::debug!(
                    sheet = %self.sheet.name,
                    row = row_idx,
                    from_row = prev,
                    "recovered bus info from merged cells"
                );
                break;
            }
        }
    }

    /// 運行日の開始時刻以降であれば、指定セルの時刻を返す
    fn time_at(&self, row: usize, col: usize) -> Option<NaiveTime> {
        self.sheet
            .cell(row, col)
            .and_then(parse_time)
            .filter(|time| time.hour() >= self.day_start_hour)
    }

    fn bus_number_at(&self, row: usize) -> Option<String> {
        self.text_at(row, self.layout.bus_number_column?)
    }

    fn details_at(&self, row: usize) -> Option<String> {
        self.text_at(row, self.layout.bus_details_column?)
    }

    fn text_at(&self, row: usize, col: usize) -> Option<String> {
        self.sheet
            .cell(row, col)
            .map(|cell| cell.trimmed_text())
            .filter(|text| !text.is_empty())
    }

    fn record(&self, time: NaiveTime, location: String, context: &BusContext) -> DepartureRecord {
        DepartureRecord {
            time,
            location,
            license_plate: context.license_plate.clone(),
            driver: context.driver.clone(),
            bus_number: context.bus_number.clone(),
            departure_type: None,
        }
    }
}
