//! 時刻アダプター（ホストのローカルタイムゾーン）
use chrono::{FixedOffset, Local, NaiveDate, NaiveDateTime, Offset, Utc};
use rkt_domain::model::local_in;
use rkt_domain::port::driven::Clock;

#[derive(Debug, Default, Clone, Copy)]
pub struct ClockAdapter;

impl ClockAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl Clock for ClockAdapter {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    fn to_local(&self, unix_seconds: i64) -> Option<NaiveDateTime> {
        local_in(unix_seconds, &Local)
    }
}

/// 固定オフセットの時計。再現性が必要な出力（`--utc` など）用。
#[derive(Debug, Clone, Copy)]
pub struct FixedOffsetClock {
    offset: FixedOffset,
}

impl FixedOffsetClock {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    pub fn utc() -> Self {
        Self::new(Utc.fix())
    }
}

impl Clock for FixedOffsetClock {
    fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.offset).date_naive()
    }

    fn to_local(&self, unix_seconds: i64) -> Option<NaiveDateTime> {
        local_in(unix_seconds, &self.offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utc_clock_maps_epoch() {
        let clock = FixedOffsetClock::utc();
        let epoch = clock.to_local(0).unwrap();
        assert_eq!(epoch.format("%d/%m/%Y, %H:%M:%S").to_string(), "01/01/1970, 00:00:00");
    }

    #[test]
    fn offset_clock_shifts_wall_time() {
        let clock = FixedOffsetClock::new(FixedOffset::east_opt(2 * 3600).unwrap());
        let t = clock.to_local(0).unwrap();
        assert_eq!(t.format("%H:%M").to_string(), "02:00");
    }

    #[test]
    fn local_clock_round_trips_now() {
        let clock = ClockAdapter::new();
        let now = Local::now();
        let local = clock.to_local(now.timestamp()).unwrap();
        assert_eq!(local.date(), now.date_naive());
        assert!(clock.today() >= local.date());
    }
}
