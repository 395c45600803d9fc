//! Time Parser Module
//!
//! セルの生の値を時刻（時・分）に変換するモジュール。
//!
//! 手書きの時刻表では同じ時刻が複数の書き方で現れるため、
//! 形式ごとの解析戦略を固定の優先順で試し、最初に一致したものを採用します。
//! 優先順そのものが曖昧さの解消規則になっているため、順序を入れ替えてはいけません。
//!
//! | 優先順 | 戦略 | 例 |
//! | --- | --- | --- |
//! | 1 | 1日の割合（Excelの時刻シリアル値） | `0.25` → 06:00 |
//! | 2 | 時のみの数字（5〜23） | `6` → 06:00 |
//! | 3 | コロン・ピリオド区切り | `7:00`, `07.00` → 07:00 |
//! | 4 | 区切りなし3〜4桁（600〜2359） | `700` → 07:00 |

use chrono::NaiveTime;
use regex::Regex;
use std::sync::LazyLock;

use crate::types::RawCell;

const MINUTES_PER_DAY: u32 = 24 * 60;

static SEPARATED_TIME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]{1,2})[:.]([0-9]{2})$").expect("Hardcode regex pattern"));

/// 解析戦略
///
/// 一致した場合は正規化前の`(時, 分)`を返し、一致しない場合は`None`を返します。
type TimeStrategy = fn(&str) -> Option<(u32, u32)>;

/// 優先順に並べた解析戦略の一覧
const STRATEGIES: [(&str, TimeStrategy); 4] = [
    ("day_fraction", parse_day_fraction),
    ("bare_hour", parse_bare_hour),
    ("separated", parse_separated),
    ("compact_hhmm", parse_compact_hhmm),
];

/// セルの値を時刻に変換する
///
/// # 引数
///
/// * `raw` - セルの生の値
///
/// # 戻り値
///
/// * `Some(NaiveTime)` - いずれかの戦略に一致した場合（秒は常に0）
/// * `None` - 空セル、またはどの戦略にも一致しない場合
///
/// # 使用例
///
/// ```rust
/// use chrono::NaiveTime;
/// use xlsxschedule::{parse_time, RawCell};
///
/// let expected = NaiveTime::from_hms_opt(6, 0, 0);
/// assert_eq!(parse_time(&RawCell::Number(0.25)), expected);
/// assert_eq!(parse_time(&RawCell::from("6")), expected);
/// assert_eq!(parse_time(&RawCell::from("abc")), None);
/// ```
pub fn parse_time(raw: &RawCell) -> Option<NaiveTime> {
    parse_time_text(&raw.trimmed_text())
}

/// 文字列を時刻に変換する
///
/// `parse_time`の文字列版です。前後の空白は無視されます。
pub fn parse_time_text(text: &str) -> Option<NaiveTime> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    let (name, (hour, minute)) = STRATEGIES
        .iter()
        .find_map(|(name, strategy)| strategy(text).map(|hm| (*name, hm)))?;

    tracing::trace!(input = text, strategy = name, hour, minute, "parsed time");
    normalize(hour, minute)
}

/// 1日の割合として解釈する（0 < 値 < 1）
fn parse_day_fraction(text: &str) -> Option<(u32, u32)> {
    let value: f64 = text.parse().ok()?;
    if !(value > 0.0 && value < 1.0) {
        return None;
    }

    let total_minutes = (value * MINUTES_PER_DAY as f64).round() as u32;
    Some((total_minutes / 60, total_minutes % 60))
}

/// 時のみの数字として解釈する（1桁は5〜9、2桁は10〜23）
fn parse_bare_hour(text: &str) -> Option<(u32, u32)> {
    if !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let hour: u32 = text.parse().ok()?;
    let accepted = match text.len() {
        1 => (5..=9).contains(&hour),
        2 => (10..=23).contains(&hour),
        _ => false,
    };
    accepted.then_some((hour, 0))
}

/// コロンまたはピリオド区切りとして解釈する
///
/// この段階では範囲の検証を行いません。
fn parse_separated(text: &str) -> Option<(u32, u32)> {
    let caps = SEPARATED_TIME.captures(text)?;
    let hour = caps.get(1)?.as_str().parse().ok()?;
    let minute = caps.get(2)?.as_str().parse().ok()?;
    Some((hour, minute))
}

/// 区切りなしの3〜4桁（HHMM）として解釈する
fn parse_compact_hhmm(text: &str) -> Option<(u32, u32)> {
    if !(3..=4).contains(&text.len()) || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let value: u32 = text.parse().ok()?;
    if !(600..=2359).contains(&value) || value % 100 >= 60 {
        return None;
    }
    Some((value / 100, value % 100))
}

/// 範囲外の時・分を1日の範囲に折り返す（"7:75" → 08:15、"24:00" → 00:00）
fn normalize(hour: u32, minute: u32) -> Option<NaiveTime> {
    let total = (hour * 60 + minute) % MINUTES_PER_DAY;
    NaiveTime::from_hms_opt(total / 60, total % 60, 0)
}
