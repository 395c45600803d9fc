//! Header Locator Module
//!
//! シート先頭の数行を走査し、時刻表のヘッダー行と各列の役割を推定するモジュール。
//!
//! 列の役割判定はキーワード表（`ColumnRule`の並び）で行います。
//! 各セルについて規則を先頭から評価し、最初に一致した規則の役割を採用します。

use crate::types::{HeaderLayout, Sheet, StopColumn};

/// ヘッダー走査の既定行数
pub const DEFAULT_HEADER_SCAN_ROWS: usize = 10;

/// ヘッダーセルが表す列の役割
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnRole {
    /// 目的地（WCH）の時刻列
    Destination,

    /// 停留所（ホテル）の時刻列
    Stop,

    /// バス番号列
    BusNumber,

    /// バス詳細（運転手・ナンバープレート）列
    BusDetails,
}

/// 列の役割判定規則
///
/// `patterns`のいずれか1つについて、そのすべてのキーワードが
/// セル文字列（小文字化済み）に部分一致すれば規則に一致します。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRule {
    /// 一致した場合に割り当てる役割
    pub role: ColumnRole,

    /// キーワードの組（組の中はAND、組同士はOR）
    pub patterns: Vec<Vec<String>>,
}

impl ColumnRule {
    /// 空の規則を生成
    pub fn new(role: ColumnRole) -> Self {
        Self {
            role,
            patterns: Vec::new(),
        }
    }

    /// 単独で一致するキーワードを追加
    pub fn keyword(self, keyword: &str) -> Self {
        self.all_of(&[keyword])
    }

    /// 単独で一致するキーワードをまとめて追加
    pub fn keywords(self, keywords: &[&str]) -> Self {
        keywords.iter().fold(self, |rule, kw| rule.keyword(kw))
    }

    /// すべてが含まれる場合に一致するキーワードの組を追加
    pub fn all_of(mut self, keywords: &[&str]) -> Self {
        self.patterns
            .push(keywords.iter().map(|kw| kw.to_lowercase()).collect());
        self
    }

    /// 小文字化済みのセル文字列が規則に一致するかを判定
    pub fn matches(&self, lowered: &str) -> bool {
        self.patterns
            .iter()
            .any(|group| !group.is_empty() && group.iter().all(|kw| lowered.contains(kw.as_str())))
    }
}

/// ヘッダー判定規則の一式
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderRules {
    /// 役割判定規則（評価順）
    pub rules: Vec<ColumnRule>,

    /// 行内のどこかに含まれていればヘッダーらしさを補強する語句
    pub generic_phrases: Vec<String>,
}

impl Default for HeaderRules {
    fn default() -> Self {
        Self {
            rules: vec![
                ColumnRule::new(ColumnRole::Destination).keywords(&[
                    "wch",
                    "arena",
                    "sentosa",
                    "beach",
                    "palawan",
                    "destination",
                ]),
                ColumnRule::new(ColumnRole::Stop).keywords(&[
                    "hotel",
                    "amara",
                    "mercure",
                    "holiday",
                    "katong",
                    "singapore",
                    "ibis",
                    "bencoolen",
                    "orchard",
                    "copthorne",
                    "furama",
                    "aloft",
                    "dorsett",
                    "michael",
                ]),
                ColumnRule::new(ColumnRole::BusNumber)
                    .all_of(&["bus", "no"])
                    .keyword("bus number"),
                ColumnRule::new(ColumnRole::BusDetails)
                    .all_of(&["bus", "detail"])
                    .keywords(&["driver", "license", "plate"]),
            ],
            generic_phrases: vec![
                "departure time".to_string(),
                "pickup".to_string(),
                "drop".to_string(),
            ],
        }
    }
}

impl HeaderRules {
    /// セル文字列の役割を判定する
    ///
    /// 大文字小文字は区別しません。どの規則にも一致しない場合は`None`を返します。
    pub fn classify(&self, cell: &str) -> Option<ColumnRole> {
        let lowered = cell.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.matches(&lowered))
            .map(|rule| rule.role)
    }

    /// 指定した役割の規則に単独キーワードを追加する
    ///
    /// 役割の規則が存在しない場合は末尾に新しい規則を追加します。
    pub fn add_keywords(&mut self, role: ColumnRole, keywords: &[String]) {
        if keywords.is_empty() {
            return;
        }
        let position = match self.rules.iter().position(|rule| rule.role == role) {
            Some(position) => position,
            None => {
                self.rules.push(ColumnRule::new(role));
                self.rules.len() - 1
            }
        };
        let rule = &mut self.rules[position];
        for keyword in keywords {
            rule.patterns.push(vec![keyword.to_lowercase()]);
        }
    }

    fn has_generic_phrase(&self, lowered: &str) -> bool {
        self.generic_phrases
            .iter()
            .any(|phrase| lowered.contains(phrase.as_str()))
    }
}

/// ヘッダー行の探索器
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderLocator {
    rules: HeaderRules,
    scan_rows: usize,
}

impl Default for HeaderLocator {
    fn default() -> Self {
        Self::new(HeaderRules::default(), DEFAULT_HEADER_SCAN_ROWS)
    }
}

impl HeaderLocator {
    /// 判定規則と走査行数を指定して生成
    pub fn new(rules: HeaderRules, scan_rows: usize) -> Self {
        Self { rules, scan_rows }
    }

    /// シート先頭の走査範囲からヘッダー行を探す
    ///
    /// 次のいずれかを満たす最初の行をヘッダーとして採用し、走査を終了します。
    ///
    /// * 目的地列があり、停留所列が1つ以上
    /// * 目的地列がなく、停留所列が2つ以上
    /// * 停留所列が1つ以上あり、行内に汎用語句（"departure time"など）を含む
    ///
    /// # 戻り値
    ///
    /// * `Some(HeaderLayout)` - ヘッダー行が見つかった場合
    /// * `None` - 走査範囲内に条件を満たす行がない場合
    pub fn locate(&self, sheet: &Sheet) -> Option<HeaderLayout> {
        sheet
            .rows
            .iter()
            .take(self.scan_rows)
            .enumerate()
            .find_map(|(row_idx, row)| {
                let cells: Vec<String> = row.iter().map(|cell| cell.to_text()).collect();
                let layout = self.classify_row(row_idx, &cells);
                let has_generic = cells
                    .iter()
                    .any(|cell| self.rules.has_generic_phrase(&cell.to_lowercase()));

                let stops = layout.stop_columns.len();
                let qualifies = (layout.destination_column.is_some() && stops >= 1)
                    || (layout.destination_column.is_none() && stops >= 2)
                    || (stops >= 1 && has_generic);

                tracing::trace!(
                    sheet = %sheet.name,
                    row = row_idx,
                    stops,
                    destination = ?layout.destination_column,
                    has_generic,
                    qualifies,
                    "checked header candidate"
                );

                qualifies.then_some(layout)
            })
    }

    /// 1行分のセルを分類してレイアウトを組み立てる
    ///
    /// 同じ行に目的地セルが複数ある場合は、後のセルで置き換えます。
    fn classify_row(&self, row_idx: usize, cells: &[String]) -> HeaderLayout {
        let mut layout = HeaderLayout {
            header_row: row_idx,
            ..HeaderLayout::default()
        };

        for (col_idx, cell) in cells.iter().enumerate() {
            match self.rules.classify(cell) {
                Some(ColumnRole::Destination) => layout.destination_column = Some(col_idx),
                Some(ColumnRole::Stop) => layout.stop_columns.push(StopColumn {
                    label: cell.trim().to_string(),
                    column_index: col_idx,
                }),
                Some(ColumnRole::BusNumber) => layout.bus_number_column = Some(col_idx),
                Some(ColumnRole::BusDetails) => layout.bus_details_column = Some(col_idx),
                None => {}
            }
        }

        layout
    }
}

/// 既定の規則でシートのヘッダー行を探す
///
/// # 使用例
///
/// ```rust
/// use xlsxschedule::{locate_header, Sheet};
///
/// let sheet = Sheet::new(
///     "Day 1",
///     vec![
///         vec!["Shuttle Plan", "", "", "", ""],
///         vec!["Hotel A", "Hotel B", "Arena", "Bus No", "Bus Details"],
///         vec!["7:00", "07:15", "0.3333", "101", "John Tan\nSBA1234X"],
///     ],
/// );
///
/// let layout = locate_header(&sheet).unwrap();
/// assert_eq!(layout.header_row, 1);
/// assert_eq!(layout.stop_columns.len(), 2);
/// assert_eq!(layout.destination_column, Some(2));
/// assert_eq!(layout.bus_number_column, Some(3));
/// assert_eq!(layout.bus_details_column, Some(4));
/// ```
pub fn locate_header(sheet: &Sheet) -> Option<HeaderLayout> {
    HeaderLocator::default().locate(sheet)
}
