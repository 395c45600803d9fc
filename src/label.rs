//! Label Normalizer Module
//!
//! 停留所名の注記除去と、バス詳細欄の自由記述から運転手名・ナンバープレートを
//! 取り出す処理を提供するモジュール。

use regex::Regex;
use std::sync::LazyLock;

/// 乗車のみ・降車のみを示すマーカー文字
const BOARDING_MARKER: &str = "上人";
const ALIGHTING_MARKER: &str = "下人";

static PICKUP_NOTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\(pick.*?only\)").expect("Hardcode regex pattern"));
static DROP_NOTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\(drop.*?only\)").expect("Hardcode regex pattern"));
static ANY_PARENTHETICAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(.*?\)").expect("Hardcode regex pattern"));

/// ナンバープレート（英大文字1〜3文字 + 数字 + 任意の英大文字1文字）
static PLATE_IN_TEXT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Z]{1,3}[0-9]+[A-Z]?").expect("Hardcode regex pattern"));
static PLATE_EXACT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{1,3}[0-9]+[A-Z]?$").expect("Hardcode regex pattern"));

/// バス詳細欄から取り出した運転手情報
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DriverDetails {
    /// 運転手名（見つからない場合は空文字列）
    pub driver: String,

    /// ナンバープレート（見つからない場合は空文字列）
    pub license_plate: String,
}

impl DriverDetails {
    fn is_complete(&self) -> bool {
        !self.driver.is_empty() && !self.license_plate.is_empty()
    }
}

/// 停留所名から乗降注記を除去する
///
/// "(Pickup Only)"・"(Pick ... Only)"・"(Drop ... Only)"（大文字小文字を区別しない）と、
/// 乗車・降車マーカー文字を取り除き、前後の空白を除去します。
///
/// # 使用例
///
/// ```rust
/// use xlsxschedule::clean_stop_name;
///
/// assert_eq!(clean_stop_name("Hotel A (Pickup Only)"), "Hotel A");
/// assert_eq!(clean_stop_name("上人 Hotel B"), "Hotel B");
/// ```
pub fn clean_stop_name(text: &str) -> String {
    let text = PICKUP_NOTE.replace_all(text, "");
    let text = strip_markers(&text);
    DROP_NOTE.replace_all(&text, "").trim().to_string()
}

/// 経路表記用に停留所名を正規化する
///
/// 目的地レコードの場所名を組み立てる際に使用します。
/// 乗降注記に限らず、すべての括弧書きとマーカー文字を取り除きます。
pub fn clean_route_name(text: &str) -> String {
    let text = ANY_PARENTHETICAL.replace_all(text, "");
    strip_markers(&text).trim().to_string()
}

fn strip_markers(text: &str) -> String {
    text.replace(BOARDING_MARKER, "").replace(ALIGHTING_MARKER, "")
}

/// バス詳細欄の自由記述から運転手名とナンバープレートを取り出す
///
/// 記述は改行区切りと空白区切りが混在するため、2つの戦略を順に適用します。
///
/// 1. 改行で分割して2行以上になる場合、1行目を運転手名とし、
///    2行目以降で最初にプレート形式を含む行からプレートを取ります。
/// 2. 1の結果が不完全な場合、空白で分割します。プレート形式に完全一致する
///    最初のトークンをプレートとし、プレート形式を含まない残りのトークンを
///    順に連結して運転手名とします。
///
/// 各フィールドは独立に「最初に得られた空でない値」を採用し、戦略1が戦略2に優先します。
///
/// # 使用例
///
/// ```rust
/// use xlsxschedule::parse_driver_and_license;
///
/// let details = parse_driver_and_license("John Tan\nSBA1234X");
/// assert_eq!(details.driver, "John Tan");
/// assert_eq!(details.license_plate, "SBA1234X");
///
/// let details = parse_driver_and_license("SBA1234X John Tan");
/// assert_eq!(details.driver, "John Tan");
/// assert_eq!(details.license_plate, "SBA1234X");
/// ```
pub fn parse_driver_and_license(text: &str) -> DriverDetails {
    let text = text.trim();
    let mut details = DriverDetails::default();

    let lines: Vec<&str> = text
        .split(['\n', '\r'])
        .filter(|line| !line.is_empty())
        .collect();
    if lines.len() > 1 {
        details.driver = lines[0].trim().to_string();
        if let Some(plate) = lines[1..]
            .iter()
            .find_map(|line| PLATE_IN_TEXT.find(line))
        {
            details.license_plate = plate.as_str().to_string();
        }
    }

    if !details.is_complete() {
        let mut driver_parts = Vec::new();
        let mut plate = String::new();

        for token in text.split_whitespace() {
            if plate.is_empty() && PLATE_EXACT.is_match(token) {
                plate = token.to_string();
            } else if !PLATE_IN_TEXT.is_match(token) {
                driver_parts.push(token);
            }
        }

        if details.license_plate.is_empty() {
            details.license_plate = plate;
        }
        if details.driver.is_empty() && !driver_parts.is_empty() {
            details.driver = driver_parts.join(" ");
        }
    }

    details
}
