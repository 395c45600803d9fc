//! Output Formatters Implementation
//!
//! 各出力フォーマットの実装を提供するモジュール。

use super::table::MarkdownTable;
use crate::error::ScheduleError;
use crate::types::{DepartureRecord, ScheduleBundle};
use rust_xlsxwriter::{Format, Workbook};
use std::io::Write;

/// 停留所出発シート名
pub(crate) const STOP_SHEET_NAME: &str = "Hotel Departures";

/// 目的地出発シート名
pub(crate) const DESTINATION_SHEET_NAME: &str = "WCH Departures";

/// 統合スケジュールシート名
pub(crate) const COMBINED_SHEET_NAME: &str = "Combined Schedule";

/// 停留所出発・目的地出発シートの列
const RECORD_HEADERS: [&str; 5] = ["Time", "Location", "License Plate", "Driver", "Bus No"];

/// 統合スケジュールシートの列
const COMBINED_HEADERS: [&str; 6] = [
    "Time",
    "Location",
    "License Plate",
    "Driver",
    "Bus No",
    "Departure Type",
];

type OutputSheet<'a> = (&'static str, &'static [&'static str], &'a [DepartureRecord]);

/// 出力シートの定義（シート名、列、レコード）
fn output_sheets(bundle: &ScheduleBundle) -> [OutputSheet<'_>; 3] {
    [
        (STOP_SHEET_NAME, &RECORD_HEADERS[..], &bundle.stop_departures[..]),
        (
            DESTINATION_SHEET_NAME,
            &RECORD_HEADERS[..],
            &bundle.destination_departures[..],
        ),
        (COMBINED_SHEET_NAME, &COMBINED_HEADERS[..], &bundle.combined[..]),
    ]
}

/// レコードを列の順序でセル文字列に変換する
fn record_cells(record: &DepartureRecord, columns: usize) -> Vec<String> {
    let mut cells = vec![
        record.time_text(),
        record.location.clone(),
        record.license_plate.clone(),
        record.driver.clone(),
        record.bus_number.clone(),
    ];
    if columns > cells.len() {
        cells.push(
            record
                .departure_type
                .map(|departure_type| departure_type.label().to_string())
                .unwrap_or_default(),
        );
    }
    cells
}

/// XLSX形式のフォーマッター
///
/// 3シートを固定の順序・列で出力します。時刻は"HH:MM"文字列として書き込みます。
pub(crate) struct XlsxFormatter;

impl XlsxFormatter {
    pub fn render<W: Write>(
        &self,
        bundle: &ScheduleBundle,
        writer: &mut W,
    ) -> Result<(), ScheduleError> {
        let mut workbook = Workbook::new();
        let header_format = Format::new().set_bold();

        for (name, headers, records) in output_sheets(bundle) {
            let worksheet = workbook.add_worksheet();
            worksheet.set_name(name)?;

            for (col, header) in headers.iter().enumerate() {
                worksheet.write_string_with_format(0, col as u16, *header, &header_format)?;
            }

            for (idx, record) in records.iter().enumerate() {
                let row = idx as u32 + 1;
                for (col, value) in record_cells(record, headers.len()).into_iter().enumerate() {
                    // 空文字列のセルは書き込まない
                    if !value.is_empty() {
                        worksheet.write_string(row, col as u16, value)?;
                    }
                }
            }

            worksheet.set_column_width(1, 32)?;
            tracing::debug!(sheet = name, rows = records.len(), "wrote output sheet");
        }

        let buffer = workbook.save_to_buffer()?;
        writer.write_all(&buffer)?;
        writer.flush()?;

        Ok(())
    }
}

/// JSON形式のフォーマッター
///
/// バンドル全体を整形済みJSONとして出力します。
pub(crate) struct JsonFormatter;

impl JsonFormatter {
    pub fn render<W: Write>(
        &self,
        bundle: &ScheduleBundle,
        writer: &mut W,
    ) -> Result<(), ScheduleError> {
        serde_json::to_writer_pretty(&mut *writer, bundle)?;
        writeln!(writer)?;
        writer.flush()?;

        Ok(())
    }
}

/// Markdown形式のフォーマッター
///
/// シートレポートと3つのレコード列をプレビュー用のテーブルとして出力します。
pub(crate) struct MarkdownFormatter;

impl MarkdownFormatter {
    pub fn render<W: Write>(
        &self,
        bundle: &ScheduleBundle,
        writer: &mut W,
    ) -> Result<(), ScheduleError> {
        writeln!(writer, "# Schedule Extraction Report\n")?;
        writeln!(writer, "Total sheets: {}\n", bundle.total_sheets)?;

        // シートレポート
        writeln!(writer, "## Sheet Report\n")?;
        let mut report = MarkdownTable::new(&[
            "Sheet",
            "Status",
            "Rows",
            STOP_SHEET_NAME,
            DESTINATION_SHEET_NAME,
        ]);
        for summary in &bundle.sheet_summaries {
            report.push_row(vec![
                summary.sheet_name.clone(),
                summary.status.label().to_string(),
                summary.rows_scanned.to_string(),
                summary.stop_departure_count.to_string(),
                summary.destination_departure_count.to_string(),
            ]);
        }
        report.render(writer)?;

        for (name, headers, records) in output_sheets(bundle) {
            let mut table = MarkdownTable::new(headers);
            for record in records {
                table.push_row(record_cells(record, headers.len()));
            }

            writeln!(writer, "\n## {} ({} entries)\n", name, table.len())?;
            table.render(writer)?;
        }

        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{DepartureType, SheetStatus};
    use crate::report::SheetSummary;
    use calamine::{open_workbook_auto_from_rs, Data, Reader};
    use chrono::NaiveTime;
    use std::io::Cursor;

    fn record(hour: u32, location: &str, departure_type: Option<DepartureType>) -> DepartureRecord {
        DepartureRecord {
            time: NaiveTime::from_hms_opt(hour, 5, 0).unwrap(),
            location: location.to_string(),
            license_plate: "SBA1234X".to_string(),
            driver: "John Tan".to_string(),
            bus_number: "101".to_string(),
            departure_type,
        }
    }

    fn bundle() -> ScheduleBundle {
        ScheduleBundle {
            stop_departures: vec![record(7, "Hotel A", None)],
            destination_departures: vec![record(8, "Hotel A", None)],
            combined: vec![
                record(7, "Hotel A", Some(DepartureType::Stop)),
                record(8, "Hotel A", Some(DepartureType::Destination)),
            ],
            sheet_summaries: vec![SheetSummary {
                sheet_name: "Day 1".to_string(),
                status: SheetStatus::Processed,
                rows_scanned: 3,
                stop_departure_count: 1,
                destination_departure_count: 1,
            }],
            total_sheets: 1,
        }
    }

    #[test]
    fn test_xlsx_sheets_and_headers() {
        let mut output = Vec::new();
        XlsxFormatter.render(&bundle(), &mut output).unwrap();

        let mut workbook = open_workbook_auto_from_rs(Cursor::new(output)).unwrap();
        assert_eq!(
            workbook.sheet_names(),
            vec![STOP_SHEET_NAME, DESTINATION_SHEET_NAME, COMBINED_SHEET_NAME]
        );

        let range = workbook.worksheet_range(COMBINED_SHEET_NAME).unwrap();
        let header: Vec<String> = range.rows().next().unwrap().iter().map(|c| c.to_string()).collect();
        assert_eq!(header, COMBINED_HEADERS.to_vec());
        assert_eq!(
            range.get_value((2, 0)),
            Some(&Data::String("08:05".to_string()))
        );
        assert_eq!(
            range.get_value((2, 5)),
            Some(&Data::String("WCH Departure".to_string()))
        );
    }

    #[test]
    fn test_xlsx_empty_bundle_keeps_headers() {
        let mut output = Vec::new();
        XlsxFormatter
            .render(&ScheduleBundle::default(), &mut output)
            .unwrap();

        let mut workbook = open_workbook_auto_from_rs(Cursor::new(output)).unwrap();
        let range = workbook.worksheet_range(STOP_SHEET_NAME).unwrap();
        assert_eq!(range.height(), 1);
        assert_eq!(range.width(), RECORD_HEADERS.len());
    }

    #[test]
    fn test_json_field_names() {
        let mut output = Vec::new();
        JsonFormatter.render(&bundle(), &mut output).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
        assert_eq!(value["total_sheets"], 1);
        assert_eq!(value["stop_departures"][0]["Time"], "07:05");
        assert_eq!(value["stop_departures"][0]["Bus No"], "101");
        assert!(value["stop_departures"][0].get("Departure Type").is_none());
        assert_eq!(value["combined"][1]["Departure Type"], "WCH Departure");
        assert_eq!(value["sheet_summaries"][0]["status"], "Processed");
    }

    #[test]
    fn test_markdown_preview() {
        let mut output = Vec::new();
        MarkdownFormatter.render(&bundle(), &mut output).unwrap();
        let markdown = String::from_utf8(output).unwrap();

        assert!(markdown.contains("## Sheet Report"));
        assert!(markdown.contains("| Day 1 | Processed |"));
        assert!(markdown.contains("## Hotel Departures (1 entries)"));
        assert!(markdown.contains("## Combined Schedule (2 entries)"));
        assert!(markdown.contains("| Hotel Departure |"));
    }
}
