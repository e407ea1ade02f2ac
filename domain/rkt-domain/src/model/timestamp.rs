use chrono::{NaiveDate, NaiveDateTime, TimeZone};
use std::fmt;

/// FILETIMEの1秒あたりティック数（100ns単位）
pub const TICKS_PER_SECOND: u64 = 10_000_000;

/// 1601-01-01 から 1970-01-01 までの秒数
pub const EPOCH_DIFFERENCE_SECONDS: i64 = 11_644_473_600;

/// 表示形式（例: 31/12/2023, 23:59:59）
pub const DISPLAY_FORMAT: &str = "%d/%m/%Y, %H:%M:%S";

/// FILETIMEティックをUnix秒へ変換する（秒未満は切り捨て）。
pub fn ticks_to_unix_seconds(ticks: u64) -> i64 {
    (ticks / TICKS_PER_SECOND) as i64 - EPOCH_DIFFERENCE_SECONDS
}

/// Unix秒を指定タイムゾーンの壁時計時刻に変換する。範囲外なら None。
pub fn local_in<Tz: TimeZone>(unix_seconds: i64, tz: &Tz) -> Option<NaiveDateTime> {
    tz.timestamp_opt(unix_seconds, 0)
        .single()
        .map(|dt| dt.naive_local())
}

/// キーの最終書き込み時刻。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LastWriteTime {
    ticks: u64,
    local: NaiveDateTime,
}

impl LastWriteTime {
    /// ティック値と変換済みのローカル時刻から構築する。
    pub fn new(ticks: u64, local: NaiveDateTime) -> Self {
        Self { ticks, local }
    }

    /// ティック値をタイムゾーン `tz` で変換する。
    pub fn from_ticks_in<Tz: TimeZone>(ticks: u64, tz: &Tz) -> Option<Self> {
        let local = local_in(ticks_to_unix_seconds(ticks), tz)?;
        Some(Self::new(ticks, local))
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn unix_seconds(&self) -> i64 {
        ticks_to_unix_seconds(self.ticks)
    }

    pub fn local(&self) -> NaiveDateTime {
        self.local
    }

    /// 日付フィルタの比較に使うローカル日付
    pub fn local_date(&self) -> NaiveDate {
        self.local.date()
    }

    pub fn formatted(&self) -> String {
        self.local.format(DISPLAY_FORMAT).to_string()
    }
}

impl fmt::Display for LastWriteTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.local.format(DISPLAY_FORMAT))
    }
}
