//! Workbook Loader
//!
//! calamineを使用してスプレッドシートを読み込み、書式適用前の生の値で
//! `Workbook`（シート → 行 → セル）を組み立てます。

use calamine::{open_workbook_auto_from_rs, Data, Range, Reader};
use std::io::{Cursor, Read, Seek};

use crate::api::SheetSelector;
use crate::error::ScheduleError;
use crate::security::SecurityConfig;
use crate::types::{RawCell, Sheet, Workbook};

/// ワークブックローダー
///
/// calamineのラッパーとして、xlsx/xlsm/xlsb/xls/odsを同じ形で読み込みます。
#[derive(Debug, Clone, Default)]
pub(crate) struct WorkbookLoader {
    security: SecurityConfig,
}

impl WorkbookLoader {
    /// ワークブック全体を読み込む
    ///
    /// # 引数
    ///
    /// * `reader` - スプレッドシートファイルを読み込むためのリーダー
    ///
    /// # 戻り値
    ///
    /// * `Ok(Workbook)` - すべてのシートの読み込みに成功した場合
    /// * `Err(ScheduleError)` - サイズ制限違反、または解析エラーの場合
    ///   （シートの読み込みに失敗した場合は`ScheduleError::Processing`）
    pub fn load<R: Read + Seek>(&self, mut reader: R) -> Result<Workbook, ScheduleError> {
        // ファイル全体をメモリに読み込む
        let mut buffer = Vec::new();
        let bytes_read = reader.read_to_end(&mut buffer)?;
        self.security.check_input_size(bytes_read)?;

        let mut sheets = open_workbook_auto_from_rs(Cursor::new(buffer))?;
        let sheet_names = sheets.sheet_names().to_vec();

        let mut workbook = Workbook::default();
        for name in sheet_names {
            let range = sheets
                .worksheet_range(&name)
                .map_err(|e| ScheduleError::in_sheet(&name, ScheduleError::Parse(e)))?;
            let rows = range_to_rows(&range);
            tracing::debug!(sheet = %name, rows = rows.len(), "loaded sheet");
            workbook.sheets.push(Sheet { name, rows });
        }

        Ok(workbook)
    }
}

/// calamineの範囲を行データに変換する
///
/// 行・列インデックスは使用範囲（最初の非空セル）からの相対位置になります。
/// 先頭の空行はシートの行数にもヘッダー走査範囲にも含まれません。
fn range_to_rows(range: &Range<Data>) -> Vec<Vec<RawCell>> {
    range
        .rows()
        .map(|row| row.iter().map(convert_cell).collect())
        .collect()
}

/// セル値を生の値に変換する（書式は適用しない）
fn convert_cell(cell: &Data) -> RawCell {
    match cell {
        Data::Int(i) => RawCell::Number(*i as f64),
        Data::Float(f) => RawCell::Number(*f),
        Data::String(s) => RawCell::from(s.as_str()),
        Data::Bool(b) => RawCell::Text(b.to_string()),
        // 日付・時刻はシリアル値のまま渡す
        Data::DateTime(dt) => RawCell::Number(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => RawCell::from(s.as_str()),
        _ => RawCell::Empty,
    }
}

/// シート選択方式に基づいて処理対象のシートを選択
///
/// # 戻り値
///
/// * `Ok(Vec<&Sheet>)` - 選択されたシート（指定順）
/// * `Err(ScheduleError::Config)` - シートが見つからない、またはインデックスが範囲外の場合
pub(crate) fn select_sheets<'a>(
    workbook: &'a Workbook,
    selector: &SheetSelector,
) -> Result<Vec<&'a Sheet>, ScheduleError> {
    let by_index = |index: usize| {
        workbook.sheets.get(index).ok_or_else(|| {
            ScheduleError::Config(format!(
                "Sheet index {} is out of range (total: {})",
                index,
                workbook.sheets.len()
            ))
        })
    };
    let by_name = |name: &str| {
        workbook
            .sheets
            .iter()
            .find(|sheet| sheet.name == name)
            .ok_or_else(|| ScheduleError::Config(format!("Sheet '{}' not found", name)))
    };

    match selector {
        SheetSelector::All => Ok(workbook.sheets.iter().collect()),
        SheetSelector::Index(index) => Ok(vec![by_index(*index)?]),
        SheetSelector::Name(name) => Ok(vec![by_name(name)?]),
        SheetSelector::Indices(indices) => indices.iter().map(|&index| by_index(index)).collect(),
        SheetSelector::Names(names) => names.iter().map(|name| by_name(name)).collect(),
    }
}
