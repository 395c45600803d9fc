//! Builder Module
//!
//! Fluent Builder APIを提供し、`Extractor`インスタンスを段階的に構築する。

use crate::api::{OutputFormat, SheetSelector};
use crate::error::ScheduleError;
use crate::extract::{RowExtractor, DEFAULT_DAY_START_HOUR, DEFAULT_LOOKBACK_ROWS};
use crate::header::{ColumnRole, HeaderLocator, HeaderRules, DEFAULT_HEADER_SCAN_ROWS};
use crate::report::SheetSummary;
use crate::schedule::{assemble, SheetOutcome};
use crate::types::{ScheduleBundle, Sheet, Workbook};
use rayon::prelude::*;
use std::io::{Read, Seek, Write};

/// 処理可能とみなすシートの最小行数（既定値）
pub const DEFAULT_MIN_SHEET_ROWS: usize = 2;

/// 抽出処理の設定を保持する内部構造体
#[derive(Debug, Clone)]
pub(crate) struct ExtractionConfig {
    /// シート選択方式
    pub sheet_selector: SheetSelector,

    /// ヘッダー行を探すシート先頭の行数
    pub header_scan_rows: usize,

    /// バス情報の遡り探索行数
    pub lookback_rows: usize,

    /// これより行数が少ないシートはスキップ
    pub min_sheet_rows: usize,

    /// 運行日の開始時刻（時）
    pub day_start_hour: u32,

    /// 停留所列として追加で認識するキーワード
    pub extra_stop_keywords: Vec<String>,

    /// 目的地列として追加で認識するキーワード
    pub extra_destination_keywords: Vec<String>,

    /// 出力フォーマット
    pub output_format: OutputFormat,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            sheet_selector: SheetSelector::All,
            header_scan_rows: DEFAULT_HEADER_SCAN_ROWS,
            lookback_rows: DEFAULT_LOOKBACK_ROWS,
            min_sheet_rows: DEFAULT_MIN_SHEET_ROWS,
            day_start_hour: DEFAULT_DAY_START_HOUR,
            extra_stop_keywords: Vec::new(),
            extra_destination_keywords: Vec::new(),
            output_format: OutputFormat::Xlsx,
        }
    }
}

/// Fluent Builder APIを提供する構造体
///
/// `Extractor`インスタンスを段階的に構築するためのビルダーです。
/// すべての設定項目にデフォルト値が設定されており、必要な設定のみをオーバーライドできます。
///
/// # 使用例
///
/// ```rust,no_run
/// use xlsxschedule::{ExtractorBuilder, OutputFormat, SheetSelector};
///
/// # fn main() -> Result<(), xlsxschedule::ScheduleError> {
/// let extractor = ExtractorBuilder::new()
///     .with_sheet_selector(SheetSelector::Index(0))
///     .with_output_format(OutputFormat::Json)
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ExtractorBuilder {
    /// 内部設定（構築中）
    config: ExtractionConfig,
}

impl Default for ExtractorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtractorBuilder {
    /// デフォルト設定を持つビルダーインスタンスを生成する
    ///
    /// # デフォルト設定
    ///
    /// - シート選択: すべてのシート
    /// - ヘッダー走査行数: 10
    /// - 遡り探索行数: 20
    /// - 最小行数: 2
    /// - 運行日の開始時刻: 5時
    /// - 出力フォーマット: XLSX
    pub fn new() -> Self {
        Self {
            config: ExtractionConfig::default(),
        }
    }

    /// 抽出対象のシートを選択する
    ///
    /// # 使用例
    ///
    /// ```rust,no_run
    /// use xlsxschedule::{ExtractorBuilder, SheetSelector};
    ///
    /// // 単一シートを名前で指定
    /// let builder = ExtractorBuilder::new()
    ///     .with_sheet_selector(SheetSelector::Name("Day 1".to_string()));
    ///
    /// // 複数シートを指定
    /// let builder = ExtractorBuilder::new()
    ///     .with_sheet_selector(SheetSelector::Indices(vec![0, 2]));
    /// ```
    pub fn with_sheet_selector(mut self, selector: SheetSelector) -> Self {
        self.config.sheet_selector = selector;
        self
    }

    /// ヘッダー行を探すシート先頭の行数を指定する（1以上）
    pub fn with_header_scan_rows(mut self, rows: usize) -> Self {
        self.config.header_scan_rows = rows;
        self
    }

    /// バス情報の遡り探索行数を指定する
    ///
    /// `0`を指定すると遡り探索を行わず、シート内で持ち回る値のみで補完します。
    pub fn with_lookback_rows(mut self, rows: usize) -> Self {
        self.config.lookback_rows = rows;
        self
    }

    /// 処理対象とするシートの最小行数を指定する（1以上）
    pub fn with_min_sheet_rows(mut self, rows: usize) -> Self {
        self.config.min_sheet_rows = rows;
        self
    }

    /// 運行日の開始時刻（時）を指定する
    ///
    /// この時刻より前の出発は破棄され、並べ替えはこの時刻を起点に行われます。
    ///
    /// # 制約
    ///
    /// * `0..=23`でなければならない
    /// * 制約違反の場合、`build()`時に`ScheduleError::Config`を返す
    pub fn with_day_start_hour(mut self, hour: u32) -> Self {
        self.config.day_start_hour = hour;
        self
    }

    /// 停留所列として追加で認識するキーワードを指定する
    ///
    /// # 使用例
    ///
    /// ```rust,no_run
    /// use xlsxschedule::ExtractorBuilder;
    ///
    /// let builder = ExtractorBuilder::new()
    ///     .with_extra_stop_keywords(["marina", "raffles"]);
    /// ```
    pub fn with_extra_stop_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.extra_stop_keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    /// 目的地列として追加で認識するキーワードを指定する
    pub fn with_extra_destination_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.extra_destination_keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    /// 出力フォーマットを指定する
    ///
    /// # 使用例
    ///
    /// ```rust,no_run
    /// use xlsxschedule::{ExtractorBuilder, OutputFormat};
    ///
    /// let builder = ExtractorBuilder::new()
    ///     .with_output_format(OutputFormat::Markdown);
    /// ```
    pub fn with_output_format(mut self, format: OutputFormat) -> Self {
        self.config.output_format = format;
        self
    }

    /// 設定を検証し、`Extractor`インスタンスを生成する
    ///
    /// # 戻り値
    ///
    /// * `Ok(Extractor)`: 設定が有効な場合
    /// * `Err(ScheduleError::Config)`: 設定が無効な場合
    ///
    /// # 発生し得るエラー
    ///
    /// * ヘッダー走査行数が0
    /// * 最小行数が0
    /// * 運行日の開始時刻が23を超える
    /// * 追加キーワードに空文字列（空白のみを含む）がある
    pub fn build(self) -> Result<Extractor, ScheduleError> {
        let config = self.config;

        // 1. 数値設定の検証
        if config.header_scan_rows == 0 {
            return Err(ScheduleError::Config(
                "Header scan rows must be at least 1".to_string(),
            ));
        }

        if config.min_sheet_rows == 0 {
            return Err(ScheduleError::Config(
                "Minimum sheet rows must be at least 1".to_string(),
            ));
        }

        if config.day_start_hour > 23 {
            return Err(ScheduleError::Config(format!(
                "Invalid day start hour: {} (expected 0-23)",
                config.day_start_hour
            )));
        }

        // 2. 追加キーワードの検証
        let keywords = config
            .extra_stop_keywords
            .iter()
            .chain(&config.extra_destination_keywords);
        for keyword in keywords {
            if keyword.trim().is_empty() {
                return Err(ScheduleError::Config(
                    "Header keywords must not be blank".to_string(),
                ));
            }
        }

        // 3. ヘッダー判定規則の構築
        let mut rules = HeaderRules::default();
        rules.add_keywords(ColumnRole::Destination, &trimmed(&config.extra_destination_keywords));
        rules.add_keywords(ColumnRole::Stop, &trimmed(&config.extra_stop_keywords));
        let locator = HeaderLocator::new(rules, config.header_scan_rows);

        Ok(Extractor { config, locator })
    }
}

fn trimmed(keywords: &[String]) -> Vec<String> {
    keywords.iter().map(|k| k.trim().to_string()).collect()
}

/// 抽出処理のファサード
///
/// デコード済みのワークブック、またはスプレッドシートファイルから時刻表を抽出し、
/// 設定された形式で書き出すためのメインエントリーポイントです。
///
/// 1回の抽出は単一スレッドで、シートを順番に処理します。
/// 複数のワークブックを並列に処理する場合は`extract_batch`を使用してください。
///
/// # 使用例
///
/// ```rust,no_run
/// use xlsxschedule::ExtractorBuilder;
/// use std::fs::File;
///
/// # fn main() -> Result<(), xlsxschedule::ScheduleError> {
/// let extractor = ExtractorBuilder::new().build()?;
/// let input = File::open("timetable.xlsx")?;
/// let output = File::create("schedule.xlsx")?;
/// extractor.convert(input, output)?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Extractor {
    /// 抽出設定
    config: ExtractionConfig,

    /// ヘッダー探索器
    locator: HeaderLocator,
}

impl Extractor {
    /// デコード済みのワークブックから時刻表を抽出する
    ///
    /// 選択されたシートを順に処理し、シートごとのレポートと3つのレコード列を
    /// 持つ`ScheduleBundle`を返します。シート単位の不備（行数不足・ヘッダーなし・
    /// レコードなし）はレポートに記録され、エラーにはなりません。
    ///
    /// # 戻り値
    ///
    /// * `Ok(ScheduleBundle)` - 抽出結果
    /// * `Err(ScheduleError::Config)` - シート選択が解決できない場合
    ///
    /// # 使用例
    ///
    /// ```rust
    /// use xlsxschedule::{ExtractorBuilder, Sheet, Workbook};
    ///
    /// # fn main() -> Result<(), xlsxschedule::ScheduleError> {
    /// let sheet = Sheet::new("Day 1", vec![
    ///     vec!["Bus No", "Hotel A", "Hotel B"],
    ///     vec!["101", "7:00", "7:15"],
    /// ]);
    /// let extractor = ExtractorBuilder::new().build()?;
    /// let bundle = extractor.extract(&Workbook::new(vec![sheet]))?;
    /// assert_eq!(bundle.stop_departures.len(), 2);
    /// # Ok(())
    /// # }
    /// ```
    pub fn extract(&self, workbook: &Workbook) -> Result<ScheduleBundle, ScheduleError> {
        let sheets = crate::parser::select_sheets(workbook, &self.config.sheet_selector)?;
        tracing::info!(
            total_sheets = workbook.sheets.len(),
            selected = sheets.len(),
            "extracting schedule"
        );

        let outcomes: Vec<SheetOutcome> = sheets
            .into_iter()
            .map(|sheet| self.process_sheet(sheet))
            .collect();

        Ok(assemble(
            outcomes,
            workbook.sheets.len(),
            self.config.day_start_hour,
        ))
    }

    /// 1シートを処理する
    fn process_sheet(&self, sheet: &Sheet) -> SheetOutcome {
        let outcome = if sheet.row_count() < self.config.min_sheet_rows {
            SheetOutcome {
                summary: SheetSummary::skipped(&sheet.name),
                batch: Default::default(),
            }
        } else {
            match self.locator.locate(sheet) {
                None => SheetOutcome {
                    summary: SheetSummary::no_header(&sheet.name),
                    batch: Default::default(),
                },
                Some(layout) => {
                    let batch = RowExtractor::new(sheet, &layout)
                        .with_lookback_rows(self.config.lookback_rows)
                        .with_day_start_hour(self.config.day_start_hour)
                        .extract();
                    SheetOutcome {
                        summary: SheetSummary::from_batch(&sheet.name, sheet.row_count(), &batch),
                        batch,
                    }
                }
            }
        };

        let summary = &outcome.summary;
        tracing::info!(
            sheet = %summary.sheet_name,
            status = %summary.status,
            rows = summary.rows_scanned,
            stop_departures = summary.stop_departure_count,
            destination_departures = summary.destination_departure_count,
            "processed sheet"
        );
        outcome
    }

    /// スプレッドシートファイルを読み込んで時刻表を抽出する
    ///
    /// # 引数
    ///
    /// * `input` - スプレッドシートを読み込むためのリーダー（Read + Seekトレイトを実装）
    ///
    /// # 戻り値
    ///
    /// * `Ok(ScheduleBundle)` - 抽出結果
    /// * `Err(ScheduleError)` - 読み込み・解析に失敗した場合
    pub fn extract_from_reader<R: Read + Seek>(
        &self,
        input: R,
    ) -> Result<ScheduleBundle, ScheduleError> {
        let workbook = crate::parser::WorkbookLoader::default().load(input)?;
        self.extract(&workbook)
    }

    /// 抽出結果を設定された形式で書き出す
    ///
    /// # 引数
    ///
    /// * `bundle` - 書き出す抽出結果
    /// * `output` - 出力先のライター
    pub fn render<W: Write>(
        &self,
        bundle: &ScheduleBundle,
        mut output: W,
    ) -> Result<(), ScheduleError> {
        let formatter = crate::output::OutputFormatter::from_format(self.config.output_format);
        formatter.render(bundle, &mut output)
    }

    /// スプレッドシートファイルから時刻表を抽出し、設定された形式で書き出す
    ///
    /// # 使用例
    ///
    /// ## メモリバッファからの変換
    ///
    /// ```rust,no_run
    /// use xlsxschedule::ExtractorBuilder;
    /// use std::io::Cursor;
    ///
    /// # fn main() -> Result<(), xlsxschedule::ScheduleError> {
    /// let extractor = ExtractorBuilder::new().build()?;
    /// let xlsx_data: Vec<u8> = vec![]; // スプレッドシートのバイト列
    /// let mut schedule_xlsx = Vec::new();
    /// extractor.convert(Cursor::new(xlsx_data), &mut schedule_xlsx)?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn convert<R: Read + Seek, W: Write>(
        &self,
        input: R,
        output: W,
    ) -> Result<(), ScheduleError> {
        let bundle = self.extract_from_reader(input)?;
        self.render(&bundle, output)
    }

    /// スプレッドシートファイルから時刻表を抽出し、文字列として返す
    ///
    /// テキスト形式（JSON、Markdown）でのみ使用できます。
    ///
    /// # 戻り値
    ///
    /// * `Ok(String)` - 出力文字列
    /// * `Err(ScheduleError::Config)` - 出力フォーマットがXLSXの場合
    ///
    /// # 使用例
    ///
    /// ```rust,no_run
    /// use std::fs::File;
    /// use xlsxschedule::{ExtractorBuilder, OutputFormat};
    ///
    /// # fn main() -> Result<(), xlsxschedule::ScheduleError> {
    /// let extractor = ExtractorBuilder::new()
    ///     .with_output_format(OutputFormat::Markdown)
    ///     .build()?;
    /// let input = File::open("timetable.xlsx")?;
    /// println!("{}", extractor.convert_to_string(input)?);
    /// # Ok(())
    /// # }
    /// ```
    pub fn convert_to_string<R: Read + Seek>(&self, input: R) -> Result<String, ScheduleError> {
        if self.config.output_format == OutputFormat::Xlsx {
            return Err(ScheduleError::Config(
                "XLSX output cannot be converted to a string".to_string(),
            ));
        }

        let mut buffer = Vec::new();
        self.convert(input, &mut buffer)?;

        let result = String::from_utf8(buffer).map_err(|e| {
            ScheduleError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
        })?;

        Ok(result)
    }

    /// 複数のワークブックを並列に抽出する
    ///
    /// 各ワークブックの抽出は互いに独立しており、それぞれ単一スレッドで実行されます。
    /// 結果は入力と同じ順序で返されます。
    pub fn extract_batch(&self, workbooks: &[Workbook]) -> Vec<Result<ScheduleBundle, ScheduleError>> {
        workbooks
            .par_iter()
            .map(|workbook| self.extract(workbook))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::SheetStatus;

    fn timetable(name: &str) -> Sheet {
        Sheet::new(
            name,
            vec![
                vec!["Bus No", "Bus Details", "Hotel A (Pick up only)", "Hotel B", "WCH"],
                vec!["101", "John Tan\nSBA1234X", "7:00", "7:15", "8:00"],
                vec!["", "", "9:00", "9:15", "10:00"],
            ],
        )
    }

    #[test]
    fn test_extractor_builder_new() {
        let builder = ExtractorBuilder::new();
        assert_eq!(builder.config.sheet_selector, SheetSelector::All);
        assert_eq!(builder.config.header_scan_rows, 10);
        assert_eq!(builder.config.lookback_rows, 20);
        assert_eq!(builder.config.min_sheet_rows, 2);
        assert_eq!(builder.config.day_start_hour, 5);
        assert_eq!(builder.config.output_format, OutputFormat::Xlsx);
        assert!(builder.config.extra_stop_keywords.is_empty());
    }

    #[test]
    fn test_builder_method_chaining() {
        let builder = ExtractorBuilder::new()
            .with_sheet_selector(SheetSelector::Index(0))
            .with_header_scan_rows(5)
            .with_lookback_rows(0)
            .with_min_sheet_rows(3)
            .with_day_start_hour(4)
            .with_extra_stop_keywords(["marina"])
            .with_extra_destination_keywords(vec!["airport".to_string()])
            .with_output_format(OutputFormat::Json);

        assert!(matches!(
            builder.config.sheet_selector,
            SheetSelector::Index(0)
        ));
        assert_eq!(builder.config.header_scan_rows, 5);
        assert_eq!(builder.config.lookback_rows, 0);
        assert_eq!(builder.config.min_sheet_rows, 3);
        assert_eq!(builder.config.day_start_hour, 4);
        assert_eq!(builder.config.extra_stop_keywords, vec!["marina"]);
        assert_eq!(builder.config.extra_destination_keywords, vec!["airport"]);
        assert_eq!(builder.config.output_format, OutputFormat::Json);
    }

    #[test]
    fn test_build_success() {
        assert!(ExtractorBuilder::new().build().is_ok());
    }

    #[test]
    fn test_build_with_zero_scan_rows() {
        match ExtractorBuilder::new().with_header_scan_rows(0).build() {
            Err(ScheduleError::Config(msg)) => assert!(msg.contains("Header scan rows")),
            _ => panic!("Expected Config error"),
        }
    }

    #[test]
    fn test_build_with_zero_min_rows() {
        match ExtractorBuilder::new().with_min_sheet_rows(0).build() {
            Err(ScheduleError::Config(msg)) => assert!(msg.contains("Minimum sheet rows")),
            _ => panic!("Expected Config error"),
        }
    }

    #[test]
    fn test_build_with_invalid_day_start_hour() {
        match ExtractorBuilder::new().with_day_start_hour(24).build() {
            Err(ScheduleError::Config(msg)) => assert!(msg.contains("day start hour")),
            _ => panic!("Expected Config error"),
        }
        assert!(ExtractorBuilder::new().with_day_start_hour(23).build().is_ok());
    }

    #[test]
    fn test_build_with_blank_keyword() {
        match ExtractorBuilder::new()
            .with_extra_stop_keywords(["marina", "  "])
            .build()
        {
            Err(ScheduleError::Config(msg)) => assert!(msg.contains("must not be blank")),
            _ => panic!("Expected Config error"),
        }
    }

    #[test]
    fn test_extract_workbook() {
        let extractor = ExtractorBuilder::new().build().unwrap();
        let bundle = extractor
            .extract(&Workbook::new(vec![timetable("Day 1")]))
            .unwrap();

        assert_eq!(bundle.total_sheets, 1);
        assert_eq!(bundle.stop_departures.len(), 4);
        assert_eq!(bundle.destination_departures.len(), 2);
        assert_eq!(bundle.combined.len(), 6);

        let first = &bundle.stop_departures[0];
        assert_eq!(first.time_text(), "07:00");
        assert_eq!(first.location, "Hotel A");
        assert_eq!(first.driver, "John Tan");
        assert_eq!(first.license_plate, "SBA1234X");
        assert_eq!(first.bus_number, "101");

        // 2行目は持ち回りのバス情報を引き継ぐ
        let later = &bundle.stop_departures[2];
        assert_eq!(later.time_text(), "09:00");
        assert_eq!(later.bus_number, "101");

        assert_eq!(bundle.destination_departures[0].location, "Hotel A & Hotel B");
        assert_eq!(bundle.sheet_summaries[0].status, SheetStatus::Processed);
        assert_eq!(bundle.sheet_summaries[0].rows_scanned, 3);
    }

    #[test]
    fn test_extract_sheet_statuses() {
        let workbook = Workbook::new(vec![
            Sheet::new("Tiny", vec![vec!["Hotel A"]]),
            Sheet::new("Notes", vec![vec!["remarks"], vec!["nothing here"]]),
            Sheet::new(
                "Empty Day",
                vec![vec!["Hotel A", "Hotel B"], vec!["", ""]],
            ),
            timetable("Day 1"),
        ]);
        let extractor = ExtractorBuilder::new().build().unwrap();
        let bundle = extractor.extract(&workbook).unwrap();

        let statuses: Vec<SheetStatus> = bundle
            .sheet_summaries
            .iter()
            .map(|summary| summary.status)
            .collect();
        assert_eq!(
            statuses,
            vec![
                SheetStatus::SkippedInsufficientData,
                SheetStatus::NoHeaderFound,
                SheetStatus::NoSchedulesFound,
                SheetStatus::Processed,
            ]
        );
        assert_eq!(bundle.sheet_summaries[0].rows_scanned, 0);
        assert_eq!(bundle.sheet_summaries[1].rows_scanned, 0);
        assert_eq!(bundle.sheet_summaries[2].rows_scanned, 2);
        assert_eq!(bundle.stop_departures.len(), 4);
    }

    #[test]
    fn test_extract_with_sheet_selector() {
        let workbook = Workbook::new(vec![timetable("Day 1"), timetable("Day 2")]);
        let extractor = ExtractorBuilder::new()
            .with_sheet_selector(SheetSelector::Name("Day 2".to_string()))
            .build()
            .unwrap();
        let bundle = extractor.extract(&workbook).unwrap();

        assert_eq!(bundle.total_sheets, 2);
        assert_eq!(bundle.sheet_summaries.len(), 1);
        assert_eq!(bundle.sheet_summaries[0].sheet_name, "Day 2");
        assert_eq!(bundle.stop_departures.len(), 4);

        let extractor = ExtractorBuilder::new()
            .with_sheet_selector(SheetSelector::Name("Day 9".to_string()))
            .build()
            .unwrap();
        assert!(matches!(
            extractor.extract(&workbook),
            Err(ScheduleError::Config(_))
        ));
    }

    #[test]
    fn test_extract_with_extra_keywords() {
        let sheet = Sheet::new(
            "Day 1",
            vec![
                vec!["Bus No", "Marina Bay", "Raffles Place"],
                vec!["7", "7:00", "7:30"],
            ],
        );
        let workbook = Workbook::new(vec![sheet]);

        let default = ExtractorBuilder::new().build().unwrap();
        let bundle = default.extract(&workbook).unwrap();
        assert_eq!(bundle.sheet_summaries[0].status, SheetStatus::NoHeaderFound);

        let custom = ExtractorBuilder::new()
            .with_extra_stop_keywords(["Marina", "raffles"])
            .build()
            .unwrap();
        let bundle = custom.extract(&workbook).unwrap();
        assert_eq!(bundle.sheet_summaries[0].status, SheetStatus::Processed);
        assert_eq!(bundle.stop_departures.len(), 2);
    }

    #[test]
    fn test_extract_is_idempotent() {
        let workbook = Workbook::new(vec![timetable("Day 1"), timetable("Day 2")]);
        let extractor = ExtractorBuilder::new().build().unwrap();
        assert_eq!(
            extractor.extract(&workbook).unwrap(),
            extractor.extract(&workbook).unwrap()
        );
    }

    #[test]
    fn test_extract_batch_preserves_order() {
        let workbooks = vec![
            Workbook::new(vec![timetable("Day 1")]),
            Workbook::new(vec![]),
            Workbook::new(vec![timetable("Day 1"), timetable("Day 2")]),
        ];
        let extractor = ExtractorBuilder::new().build().unwrap();
        let results = extractor.extract_batch(&workbooks);

        assert_eq!(results.len(), 3);
        let counts: Vec<usize> = results
            .into_iter()
            .map(|result| result.unwrap().stop_departures.len())
            .collect();
        assert_eq!(counts, vec![4, 0, 8]);
    }

    #[test]
    fn test_convert_to_string_rejects_xlsx() {
        let extractor = ExtractorBuilder::new().build().unwrap();
        match extractor.convert_to_string(std::io::Cursor::new(Vec::<u8>::new())) {
            Err(ScheduleError::Config(msg)) => assert!(msg.contains("XLSX")),
            _ => panic!("Expected Config error"),
        }
    }

    #[test]
    fn test_convert_to_string_with_invalid_input() {
        let extractor = ExtractorBuilder::new()
            .with_output_format(OutputFormat::Json)
            .build()
            .unwrap();
        let result = extractor.convert_to_string(std::io::Cursor::new(vec![0u8; 16]));
        assert!(result.is_err());
    }
}
