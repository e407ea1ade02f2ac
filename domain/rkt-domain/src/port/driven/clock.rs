//! 時刻ポート

use chrono::{NaiveDate, NaiveDateTime};

/// ホストの時計とローカルタイムゾーン
pub trait Clock {
    /// ローカルタイムゾーンでの今日の日付
    fn today(&self) -> NaiveDate;

    /// Unix秒をローカルの壁時計時刻へ変換（表現できなければ None）
    fn to_local(&self, unix_seconds: i64) -> Option<NaiveDateTime>;
}
