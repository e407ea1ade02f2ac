//! rkt-app: アプリケーション層のファサード。
//! パス解決・問い合わせ・日付フィルタを組み合わせて、キー一覧の一括チェックを実装する。

use chrono::NaiveDate;
use rkt_domain::FilterError;
use rkt_domain::model::{
    DateFilterWindow, DefaultFilter, QueryOutcome, QueryStatus, apply_date_filter,
};
use rkt_domain::port::driven::{Clock, RegistryReader};

pub mod enumerate;
pub mod input;
pub mod query;

pub use enumerate::{list_children_of, list_immediate_children, list_subkeys};
pub use input::{PathSource, collect_paths, parse_pasted_paths};
pub use query::{query_last_modified, query_path};

/// 呼び出し側が指定する日付フィルタ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilterSelection {
    /// 設定ファイルの既定フィルタに従う
    #[default]
    ConfiguredDefault,
    /// フィルタなし（既定を無視）
    Disabled,
    /// 直近N日間
    LastDays(u32),
    /// 明示範囲（片側のみも可）
    Range {
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    },
}

/// 一括チェックの結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchReport {
    /// フィルタ適用後の結果（入力順、番号は入力時のまま）
    pub outcomes: Vec<QueryOutcome>,
    /// 問い合わせたパス数
    pub queried: usize,
    /// 失敗件数
    pub failed: usize,
    /// 日付フィルタで除外された成功件数
    pub excluded_by_filter: usize,
}

#[derive(Debug, Default)]
pub struct AppService;

impl AppService {
    pub fn new() -> Self {
        Self
    }

    /// 指定と既定から実際のフィルタ窓を決める。
    pub fn select_window(
        &self,
        selection: FilterSelection,
        configured: DefaultFilter,
        clock: &(impl Clock + ?Sized),
    ) -> Result<Option<DateFilterWindow>, FilterError> {
        let today = clock.today();
        match selection {
            FilterSelection::ConfiguredDefault => configured.window(today),
            FilterSelection::Disabled => Ok(None),
            FilterSelection::LastDays(days) => Ok(Some(DateFilterWindow::last_days(today, days))),
            FilterSelection::Range { from, to } => DateFilterWindow::from_bounds(from, to, today),
        }
    }

    /// 各パスを順に1回ずつ問い合わせる。1件の失敗で中断しない。
    /// 戻り値の長さは入力と同じで、番号は1始まり。
    pub fn run_batch(
        &self,
        paths: &[String],
        reader: &(impl RegistryReader + ?Sized),
        clock: &(impl Clock + ?Sized),
    ) -> Vec<QueryOutcome> {
        paths
            .iter()
            .enumerate()
            .map(|(i, raw)| {
                let path = raw.trim();
                let result = query_path(path, reader, clock);
                match &result {
                    Ok(time) => tracing::debug!(index = i + 1, path, modified = %time, "queried"),
                    Err(err) => tracing::debug!(index = i + 1, path, error = %err, "query failed"),
                }
                QueryOutcome::new(i + 1, path, QueryStatus::from(result))
            })
            .collect()
    }

    /// 一括チェックして日付フィルタを適用する。エラー結果はフィルタで落ちない。
    pub fn check(
        &self,
        paths: &[String],
        window: Option<&DateFilterWindow>,
        reader: &(impl RegistryReader + ?Sized),
        clock: &(impl Clock + ?Sized),
    ) -> BatchReport {
        let outcomes = self.run_batch(paths, reader, clock);
        let queried = outcomes.len();
        let failed = outcomes.iter().filter(|o| !o.is_success()).count();
        let outcomes = apply_date_filter(outcomes, window);
        let excluded_by_filter = queried - outcomes.len();
        tracing::info!(queried, failed, excluded_by_filter, "batch finished");
        BatchReport {
            outcomes,
            queried,
            failed,
            excluded_by_filter,
        }
    }

    /// 供給元からパスを集めて一括チェックする。
    pub fn check_source(
        &self,
        source: &PathSource,
        window: Option<&DateFilterWindow>,
        reader: &(impl RegistryReader + ?Sized),
        clock: &(impl Clock + ?Sized),
    ) -> BatchReport {
        let paths = collect_paths(source, reader);
        self.check(&paths, window, reader, clock)
    }
}
