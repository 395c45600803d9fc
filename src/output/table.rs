//! Markdown Table
//!
//! 見出し行とデータ行からMarkdownテーブルを生成する。
//! 列幅は表示幅（全角文字は2）で揃え、vscode-markdown-tableと同じ整形を行います。

use crate::error::ScheduleError;
use std::io::Write;
use unicode_width::UnicodeWidthStr;

/// 最小列幅（区切り行の最小幅）
const MIN_COLUMN_WIDTH: usize = 3;

/// Markdownテーブル
#[derive(Debug, Clone, Default)]
pub(crate) struct MarkdownTable {
    /// 見出し行
    header: Vec<String>,

    /// データ行（見出しと同じ列数）
    rows: Vec<Vec<String>>,
}

impl MarkdownTable {
    /// 見出し行を指定してテーブルを生成
    pub fn new(header: &[&str]) -> Self {
        Self {
            header: header.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// データ行を追加する
    ///
    /// 列数が見出しと異なる場合は、空セルで補うか切り詰めます。
    pub fn push_row(&mut self, mut row: Vec<String>) {
        row.resize(self.header.len(), String::new());
        self.rows.push(row);
    }

    /// データ行の数
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// テーブルを出力する
    pub fn render<W: Write>(&self, writer: &mut W) -> Result<(), ScheduleError> {
        if self.header.is_empty() {
            return Ok(());
        }

        let col_widths = self.calculate_column_widths();

        self.write_row(writer, &self.header, &col_widths)?;
        writeln!(writer, "{}", generate_separator(&col_widths))?;
        for row in &self.rows {
            self.write_row(writer, row, &col_widths)?;
        }

        Ok(())
    }

    fn write_row<W: Write>(
        &self,
        writer: &mut W,
        row: &[String],
        col_widths: &[usize],
    ) -> Result<(), ScheduleError> {
        write!(writer, "|")?;
        for (content, &width) in row.iter().zip(col_widths) {
            let content = escape_cell(content);
            let content_width = content.width();
            write!(writer, " {}", content)?;
            // 残りのスペースを埋める（表示幅に基づく）
            if content_width < width {
                write!(writer, "{}", " ".repeat(width - content_width))?;
            }
            write!(writer, " |")?;
        }
        writeln!(writer)?;
        Ok(())
    }

    /// 列幅を計算（内部ヘルパー）
    ///
    /// 見出しとすべての行について、セル内容の表示幅の最大値を列ごとに返します。
    fn calculate_column_widths(&self) -> Vec<usize> {
        let mut widths = vec![MIN_COLUMN_WIDTH; self.header.len()];

        for row in std::iter::once(&self.header).chain(&self.rows) {
            for (col_idx, cell) in row.iter().enumerate() {
                widths[col_idx] = widths[col_idx].max(escape_cell(cell).width());
            }
        }

        widths
    }
}

/// ヘッダー区切り行を生成
///
/// セルの前後のスペース（各1文字）を含めた幅の "-" を "|" で連結します。
fn generate_separator(col_widths: &[usize]) -> String {
    let mut parts = vec!["|".to_string()];
    for &width in col_widths {
        parts.push("-".repeat(width + 2));
        parts.push("|".to_string());
    }
    parts.join("")
}

/// セル内容を1行に収める（改行は空白に、`|`はエスケープ）
fn escape_cell(content: &str) -> String {
    content
        .trim()
        .replace("\r\n", " ")
        .replace(['\n', '\r'], " ")
        .replace('|', "\\|")
}
