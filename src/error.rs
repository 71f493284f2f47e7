//! svx-dem ライブラリのエラー型

use thiserror::Error;

/// ASCII DEMの読み込み・座標計算で発生するエラー
#[derive(Error, Debug)]
pub enum SvxDemError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// ヘッダ行に ": " 区切りがない
    #[error("Malformed header line {line}: missing ': ' separator in {content:?}")]
    MissingSeparator { line: usize, content: String },

    #[error("Invalid value for header field '{field}': {value:?}")]
    InvalidHeaderValue { field: &'static str, value: String },

    /// ヘッダ6行を読み終える前にEOF
    #[error("Unexpected end of input while reading header field '{field}'")]
    UnexpectedEof { field: &'static str },

    #[error("Header field '{field}' must be greater than zero")]
    ZeroDimension { field: &'static str },

    /// 行・列数がヘッダと一致しない
    #[error("Malformed grid at row {row}, col {col}: {reason}")]
    MalformedGrid {
        row: usize,
        col: usize,
        reason: String,
    },

    #[error("Invalid elevation at row {row}, col {col}: {token:?}")]
    InvalidElevation { row: usize, col: usize, token: String },
}

pub type Result<T> = std::result::Result<T, SvxDemError>;
