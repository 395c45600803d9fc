//! Output Format Module
//!
//! Strategy Patternによる出力フォーマットの抽象化を提供するモジュール。

mod formatters;
mod table;

use crate::api::OutputFormat;
use crate::error::ScheduleError;
use crate::types::ScheduleBundle;
use std::io::Write;

pub(crate) use formatters::*;

/// 出力フォーマッター（Strategy Pattern）
///
/// 各出力フォーマット（XLSX, JSON, Markdown）をenumとして表現します。
#[derive(Debug, Clone, Copy)]
pub(crate) enum OutputFormatter {
    Xlsx,
    Json,
    Markdown,
}

impl OutputFormatter {
    /// 出力フォーマットからフォーマッターを生成
    pub fn from_format(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Xlsx => OutputFormatter::Xlsx,
            OutputFormat::Json => OutputFormatter::Json,
            OutputFormat::Markdown => OutputFormatter::Markdown,
        }
    }

    /// 抽出結果を指定されたフォーマットで出力する
    ///
    /// # 引数
    ///
    /// * `bundle` - 出力する抽出結果
    /// * `writer` - 出力先のライター
    ///
    /// # 戻り値
    ///
    /// * `Ok(())` - 出力に成功した場合
    /// * `Err(ScheduleError)` - エラーが発生した場合
    pub fn render<W: Write>(
        &self,
        bundle: &ScheduleBundle,
        writer: &mut W,
    ) -> Result<(), ScheduleError> {
        match self {
            OutputFormatter::Xlsx => XlsxFormatter.render(bundle, writer),
            OutputFormatter::Json => JsonFormatter.render(bundle, writer),
            OutputFormatter::Markdown => MarkdownFormatter.render(bundle, writer),
        }
    }
}
