//! Parser Module
//!
//! calamineを使用したスプレッドシート読み込みの実装。
//! 抽出処理はデコード済みの`Workbook`のみを扱い、ファイル形式には依存しません。

mod workbook;

pub(crate) use workbook::{select_sheets, WorkbookLoader};
