use super::QueryOutcome;
use crate::FilterError;
use chrono::{Days, NaiveDate};

/// 最終書き込み日の包含範囲 [start, end]。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateFilterWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateFilterWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, FilterError> {
        if start > end {
            return Err(FilterError::InvertedRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// 今日を終端とする直近 `days` 日間
    pub fn last_days(today: NaiveDate, days: u32) -> Self {
        let start = today
            .checked_sub_days(Days::new(u64::from(days)))
            .unwrap_or(NaiveDate::MIN);
        Self { start, end: today }
    }

    /// 片側だけ指定された範囲を補完する。開始のみなら終端は今日、終端のみなら下限なし。
    pub fn from_bounds(
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        today: NaiveDate,
    ) -> Result<Option<Self>, FilterError> {
        match (start, end) {
            (None, None) => Ok(None),
            (Some(start), None) => Self::new(start, today).map(Some),
            (None, Some(end)) => Self::new(NaiveDate::MIN, end).map(Some),
            (Some(start), Some(end)) => Self::new(start, end).map(Some),
        }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// 成功結果は日付で判定し、エラー結果は常に通す。
    pub fn admits(&self, outcome: &QueryOutcome) -> bool {
        match outcome.last_write() {
            Some(time) => self.contains(time.local_date()),
            None => true,
        }
    }
}

/// フィルタ窓を適用する。窓がなければ全件を返す。順序と番号は保持される。
pub fn apply_date_filter(
    outcomes: Vec<QueryOutcome>,
    window: Option<&DateFilterWindow>,
) -> Vec<QueryOutcome> {
    match window {
        Some(window) => outcomes.into_iter().filter(|o| window.admits(o)).collect(),
        None => outcomes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{LastWriteTime, QueryStatus};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn success_on(index: usize, day: NaiveDate) -> QueryOutcome {
        let local = day.and_hms_opt(23, 59, 59).unwrap();
        QueryOutcome::new(
            index,
            format!(r"HKCU\Key{index}"),
            QueryStatus::Success(LastWriteTime::new(0, local)),
        )
    }

    #[test]
    fn rejects_inverted_range() {
        let err = DateFilterWindow::new(date(2024, 2, 1), date(2024, 1, 1)).unwrap_err();
        assert_eq!(
            err,
            FilterError::InvertedRange {
                start: date(2024, 2, 1),
                end: date(2024, 1, 1)
            }
        );
        assert!(DateFilterWindow::new(date(2024, 1, 1), date(2024, 1, 1)).is_ok());
    }

    #[test]
    fn bounds_are_inclusive() {
        let window = DateFilterWindow::new(date(2024, 1, 1), date(2024, 1, 31)).unwrap();
        assert!(window.contains(date(2024, 1, 1)));
        assert!(window.contains(date(2024, 1, 31)));
        assert!(!window.contains(date(2023, 12, 31)));
        assert!(!window.contains(date(2024, 2, 1)));
    }

    #[test]
    fn errors_survive_filtering_and_indices_are_kept() {
        let window = DateFilterWindow::new(date(2024, 1, 1), date(2024, 1, 31)).unwrap();
        let outcomes = vec![
            success_on(1, date(2023, 12, 31)),
            QueryOutcome::new(2, r"HKCU\Missing", QueryStatus::Error("Registry key not found.".into())),
            success_on(3, date(2024, 1, 15)),
        ];
        let kept = apply_date_filter(outcomes, Some(&window));
        let indices: Vec<usize> = kept.iter().map(|o| o.index).collect();
        assert_eq!(indices, vec![2, 3]);
        assert!(!kept[0].is_success());
    }

    #[test]
    fn no_window_keeps_everything() {
        let outcomes = vec![success_on(1, date(1999, 1, 1)), success_on(2, date(2030, 1, 1))];
        assert_eq!(apply_date_filter(outcomes.clone(), None), outcomes);
    }

    #[test]
    fn last_days_ends_today() {
        let window = DateFilterWindow::last_days(date(2024, 3, 8), 7);
        assert_eq!(window.start(), date(2024, 3, 1));
        assert_eq!(window.end(), date(2024, 3, 8));
    }

    #[test]
    fn half_open_bounds_are_completed() {
        let today = date(2024, 6, 1);
        assert_eq!(DateFilterWindow::from_bounds(None, None, today).unwrap(), None);

        let from_only = DateFilterWindow::from_bounds(Some(date(2024, 5, 1)), None, today)
            .unwrap()
            .unwrap();
        assert_eq!(from_only.end(), today);

        let to_only = DateFilterWindow::from_bounds(None, Some(date(2024, 5, 1)), today)
            .unwrap()
            .unwrap();
        assert!(to_only.contains(date(1601, 1, 1)));
        assert!(!to_only.contains(date(2024, 5, 2)));

        assert!(DateFilterWindow::from_bounds(Some(date(2024, 7, 1)), None, today).is_err());
    }
}
