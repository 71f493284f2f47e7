use crate::error::{Result, SvxDemError};
use crate::model::{AsciiDem, DemHeader, GridRow, Station};

/// セル間隔（南北・東西）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSpacing {
    pub ns: f64,
    pub ew: f64,
}

impl GridSpacing {
    pub fn from_header(header: &DemHeader) -> Result<Self> {
        if header.rows == 0 {
            return Err(SvxDemError::ZeroDimension { field: "rows" });
        }
        if header.cols == 0 {
            return Err(SvxDemError::ZeroDimension { field: "cols" });
        }

        Ok(Self {
            ns: (header.north - header.south) / header.rows as f64,
            ew: (header.east - header.west) / header.cols as f64,
        })
    }
}

/// 行優先で測点を生成するイテレータ
///
/// 北座標は行の開始時の値（行ごとに `ns` を減算）、東座標は各列で
/// 使用前に `ew` を加算するため、列 `c` の東座標は `west + (c+1)*ew` になる。
/// 既存の出力との互換のため、この非対称はそのまま維持する。
pub struct Stations<'a> {
    dem: &'a AsciiDem,
    spacing: GridSpacing,
    row: usize,
    col: usize,
    northing: f64,
    easting: f64,
    /// 現在の行（行に入った時点で一度だけ分割）
    current: Option<GridRow<'a>>,
    done: bool,
}

pub fn stations(dem: &AsciiDem, spacing: GridSpacing) -> Stations<'_> {
    Stations {
        dem,
        spacing,
        row: 0,
        col: 0,
        northing: dem.header.north,
        easting: dem.header.west,
        current: None,
        done: false,
    }
}

impl Iterator for Stations<'_> {
    type Item = Result<Station>;

    fn next(&mut self) -> Option<Self::Item> {
        let (rows, cols) = self.dem.shape();
        if self.done || self.row >= rows || cols == 0 {
            return None;
        }

        let (row, col) = (self.row, self.col);
        self.easting += self.spacing.ew;

        let dem = self.dem;
        let grid_row = self.current.get_or_insert_with(|| dem.row(row));

        let station = match grid_row.elevation(col) {
            Ok(elevation) => Station {
                row,
                col,
                easting: self.easting,
                northing: self.northing,
                elevation,
            },
            Err(e) => {
                self.done = true;
                return Some(Err(e));
            }
        };

        self.col += 1;
        if self.col == cols {
            self.col = 0;
            self.row += 1;
            self.northing -= self.spacing.ns;
            self.easting = self.dem.header.west;
            self.current = None;
        }

        Some(Ok(station))
    }
}
