use super::LastWriteTime;
use crate::QueryError;

/// 1件分の問い合わせ状態
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryStatus {
    Success(LastWriteTime),
    /// 表示用に変換済みのエラーメッセージ
    Error(String),
}

impl QueryStatus {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// 表示列の文字列（時刻またはエラーメッセージ）
    pub fn display_value(&self) -> String {
        match self {
            Self::Success(time) => time.formatted(),
            Self::Error(message) => message.clone(),
        }
    }
}

impl From<Result<LastWriteTime, QueryError>> for QueryStatus {
    fn from(result: Result<LastWriteTime, QueryError>) -> Self {
        match result {
            Ok(time) => Self::Success(time),
            Err(err) => Self::Error(err.to_string()),
        }
    }
}

/// 入力パス1件に対する結果。`index` は入力順の1始まり番号で、フィルタ後も変わらない。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryOutcome {
    pub index: usize,
    pub original_path: String,
    pub status: QueryStatus,
}

impl QueryOutcome {
    pub fn new(index: usize, original_path: impl Into<String>, status: QueryStatus) -> Self {
        Self {
            index,
            original_path: original_path.into(),
            status,
        }
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    pub fn last_write(&self) -> Option<&LastWriteTime> {
        match &self.status {
            QueryStatus::Success(time) => Some(time),
            QueryStatus::Error(_) => None,
        }
    }
}
