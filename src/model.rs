use crate::error::{Result, SvxDemError};

/// GRASS `r.out.ascii` のヘッダ情報
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DemHeader {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
    pub rows: usize,
    pub cols: usize,
}

/// ヘッダとセル行（未加工）を保持するDEM
#[derive(Debug, Clone, PartialEq)]
pub struct AsciiDem {
    pub header: DemHeader,
    /// ヘッダ以降の行をそのまま保持する。トークン分割は参照時に行う
    pub cells: Vec<String>,
}

impl AsciiDem {
    pub fn shape(&self) -> (usize, usize) {
        (self.header.rows, self.header.cols)
    }

    /// `row` 行目をトークン分割して返す（行が無い場合も参照時にエラー）
    pub fn row(&self, row: usize) -> GridRow<'_> {
        GridRow {
            row,
            tokens: self
                .cells
                .get(row)
                .map(|line| line.split_whitespace().collect()),
            available_rows: self.cells.len(),
        }
    }

    /// `row` 行目の `col` 番目の値を標高として返す
    pub fn elevation(&self, row: usize, col: usize) -> Result<f64> {
        self.row(row).elevation(col)
    }
}

/// 1行分のセル値（分割済み）
#[derive(Debug, Clone)]
pub struct GridRow<'a> {
    row: usize,
    tokens: Option<Vec<&'a str>>,
    available_rows: usize,
}

impl GridRow<'_> {
    pub fn elevation(&self, col: usize) -> Result<f64> {
        let row = self.row;
        let tokens = self.tokens.as_ref().ok_or_else(|| SvxDemError::MalformedGrid {
            row,
            col,
            reason: format!("grid has only {} data rows", self.available_rows),
        })?;

        let token = tokens.get(col).ok_or_else(|| SvxDemError::MalformedGrid {
            row,
            col,
            reason: format!("row has only {} values", tokens.len()),
        })?;

        token
            .parse::<f64>()
            .map_err(|_| SvxDemError::InvalidElevation {
                row,
                col,
                token: token.to_string(),
            })
    }
}

/// 固定測点（`*fix`）1点分
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Station {
    pub row: usize,
    pub col: usize,
    pub easting: f64,
    pub northing: f64,
    pub elevation: f64,
}

impl Station {
    pub fn name(&self) -> String {
        station_name(self.row, self.col)
    }
}

/// 測点名 `N<row>E<col>`
pub fn station_name(row: usize, col: usize) -> String {
    format!("N{}E{}", row, col)
}

/// 出力パスの最初の `.` より前をブロック名とする
pub fn block_name(output_path: &str) -> &str {
    output_path.split('.').next().unwrap_or(output_path)
}
