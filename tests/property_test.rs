//! Property Tests for xlsxschedule
//!
//! 時刻解析と運行日順の並べ替えについて、proptestで性質を検証します。

use chrono::{NaiveTime, Timelike};
use proptest::prelude::*;
use xlsxschedule::{
    minutes_since_5am, parse_time, parse_time_text, sort_by_operating_day, DepartureRecord,
    ExtractorBuilder, RawCell, Sheet, Workbook,
};

fn record(hour: u32, minute: u32, location: String) -> DepartureRecord {
    DepartureRecord {
        time: NaiveTime::from_hms_opt(hour, minute, 0).unwrap(),
        location,
        license_plate: String::new(),
        driver: String::new(),
        bus_number: String::new(),
        departure_type: None,
    }
}

proptest! {
    /// 0 < x < 1 の数値は round(x * 1440) 分（1日で折り返し）になる
    #[test]
    fn prop_day_fraction(value in 0.0001f64..0.9999) {
        let expected = ((value * 1440.0).round() as u32) % 1440;
        let time = parse_time(&RawCell::Number(value)).unwrap();
        prop_assert_eq!(time.hour() * 60 + time.minute(), expected);
    }

    /// "H:MM" / "HH.MM" 形式はそのままの時刻になる
    #[test]
    fn prop_separated_notation(hour in 0u32..24, minute in 0u32..60, period in any::<bool>()) {
        // "0.MM" は1日の割合として解釈されるため、ピリオド区切りは1時以降のみ
        let separator = if period && hour > 0 { "." } else { ":" };
        let text = format!("{}{}{:02}", hour, separator, minute);
        prop_assert_eq!(parse_time_text(&text), NaiveTime::from_hms_opt(hour, minute, 0));
    }

    /// 05:00起点の経過分は0〜1439に収まり、時刻と一対一に対応する
    #[test]
    fn prop_minutes_since_5am(hour in 0u32..24, minute in 0u32..60) {
        let time = NaiveTime::from_hms_opt(hour, minute, 0).unwrap();
        let minutes = minutes_since_5am(time);
        prop_assert!(minutes < 1440);
        prop_assert_eq!((minutes + 5 * 60) % 1440, hour * 60 + minute);
    }

    /// 並べ替えは経過分の昇順で、同じ時刻の順序を保つ
    #[test]
    fn prop_sort_is_ordered_and_stable(times in prop::collection::vec((0u32..24, 0u32..60), 0..40)) {
        let mut records: Vec<DepartureRecord> = times
            .iter()
            .enumerate()
            .map(|(idx, (hour, minute))| record(*hour, *minute, idx.to_string()))
            .collect();
        sort_by_operating_day(&mut records);

        for pair in records.windows(2) {
            let (a, b) = (minutes_since_5am(pair[0].time), minutes_since_5am(pair[1].time));
            prop_assert!(a <= b);
            if a == b {
                let (ia, ib): (usize, usize) = (
                    pair[0].location.parse().unwrap(),
                    pair[1].location.parse().unwrap(),
                );
                prop_assert!(ia < ib);
            }
        }
    }

    /// 抽出結果に5時より前の時刻は含まれない
    #[test]
    fn prop_no_departure_before_five(times in prop::collection::vec((0u32..24, 0u32..60, 0u32..24, 0u32..60), 1..20)) {
        let mut rows = vec![vec!["Hotel A".to_string(), "WCH".to_string()]];
        for (h1, m1, h2, m2) in &times {
            rows.push(vec![format!("{}:{:02}", h1, m1), format!("{}:{:02}", h2, m2)]);
        }
        let workbook = Workbook::new(vec![Sheet::new("Day 1", rows)]);
        let bundle = ExtractorBuilder::new().build().unwrap().extract(&workbook).unwrap();

        let expected_stops = times.iter().filter(|(h1, _, _, _)| *h1 >= 5).count();
        prop_assert_eq!(bundle.stop_departures.len(), expected_stops);
        prop_assert!(bundle.combined.iter().all(|record| record.time.hour() >= 5));
        prop_assert_eq!(
            bundle.combined.len(),
            bundle.stop_departures.len() + bundle.destination_departures.len()
        );
    }
}
