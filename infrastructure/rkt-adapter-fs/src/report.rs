//! 結果レポートの整形（タブ区切り表/JSON）

use rkt_domain::model::{QueryOutcome, QueryStatus};
use serde::Serialize;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    /// タブ区切り＋列幅揃え
    #[default]
    Table,
    Json,
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "table" | "tsv" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown report format '{other}' (expected table or json)")),
        }
    }
}

pub fn render_report(outcomes: &[QueryOutcome], format: ReportFormat) -> Result<String, String> {
    match format {
        ReportFormat::Table => Ok(render_table(outcomes)),
        ReportFormat::Json => render_json(outcomes),
    }
}

/// `番号\tパス\t最終更新` の行を、各列を最大幅まで左寄せで揃えて出力する。
/// 最終列は詰め物をしない。
pub fn render_table(outcomes: &[QueryOutcome]) -> String {
    let rows: Vec<[String; 3]> = outcomes
        .iter()
        .map(|o| {
            [
                o.index.to_string(),
                o.original_path.clone(),
                o.status.display_value(),
            ]
        })
        .collect();

    let index_width = column_width(&rows, 0);
    let path_width = column_width(&rows, 1);

    let mut out = String::new();
    for [index, path, value] in &rows {
        out.push_str(&format!(
            "{:<index_width$}\t{:<path_width$}\t{}\n",
            index, path, value
        ));
    }
    out
}

fn column_width(rows: &[[String; 3]], column: usize) -> usize {
    rows.iter()
        .map(|row| row[column].chars().count())
        .max()
        .unwrap_or(0)
}

#[derive(Serialize)]
struct ReportRow<'a> {
    index: usize,
    path: &'a str,
    status: &'static str,
    value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    unix_seconds: Option<i64>,
}

impl<'a> From<&'a QueryOutcome> for ReportRow<'a> {
    fn from(outcome: &'a QueryOutcome) -> Self {
        let (status, unix_seconds) = match &outcome.status {
            QueryStatus::Success(time) => ("success", Some(time.unix_seconds())),
            QueryStatus::Error(_) => ("error", None),
        };
        ReportRow {
            index: outcome.index,
            path: &outcome.original_path,
            status,
            value: outcome.status.display_value(),
            unix_seconds,
        }
    }
}

pub fn render_json(outcomes: &[QueryOutcome]) -> Result<String, String> {
    let rows: Vec<ReportRow<'_>> = outcomes.iter().map(ReportRow::from).collect();
    serde_json::to_string_pretty(&rows).map_err(|e| format!("serialize report: {e}"))
}
