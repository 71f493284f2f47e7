//! GRASS `r.out.ascii` 形式のパーサ
//!
//! 先頭6行が `north: `, `south: `, `east: `, `west: `, `rows: `, `cols: ` の
//! 固定順ヘッダ、以降が行優先のセル値。

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

use tracing::{debug, warn};

use crate::error::{Result, SvxDemError};
use crate::model::{AsciiDem, DemHeader};

const SEPARATOR: &str = ": ";

pub fn parse_ascii_dem_file(path: &Path) -> Result<AsciiDem> {
    let file = File::open(path)?;
    parse_ascii_dem(BufReader::new(file))
}

pub fn parse_ascii_dem<R: BufRead>(reader: R) -> Result<AsciiDem> {
    let mut lines = reader.lines();
    let mut header = HeaderReader {
        lines: &mut lines,
        line_no: 0,
    };

    let north = header.next_value("north")?;
    let south = header.next_value("south")?;
    let east = header.next_value("east")?;
    let west = header.next_value("west")?;
    let rows = header.next_value("rows")?;
    let cols = header.next_value("cols")?;

    // 残りはセル行としてそのまま保持
    let cells = lines.collect::<std::io::Result<Vec<_>>>()?;

    debug!(
        "Parsed header: {}x{}, {} data lines",
        rows,
        cols,
        cells.len()
    );

    Ok(AsciiDem {
        header: DemHeader {
            north,
            south,
            east,
            west,
            rows,
            cols,
        },
        cells,
    })
}

struct HeaderReader<'a, I> {
    lines: &'a mut I,
    line_no: usize,
}

impl<I> HeaderReader<'_, I>
where
    I: Iterator<Item = std::io::Result<String>>,
{
    fn next_value<T: FromStr>(&mut self, field: &'static str) -> Result<T> {
        let line = self
            .lines
            .next()
            .ok_or(SvxDemError::UnexpectedEof { field })??;
        self.line_no += 1;

        let mut parts = line.split(SEPARATOR);
        let label = parts.next().unwrap_or_default();
        let value = parts.next().ok_or_else(|| SvxDemError::MissingSeparator {
            line: self.line_no,
            content: line.clone(),
        })?;

        // ラベルは位置で決まるため不一致は警告のみ
        if label.trim() != field {
            warn!(
                "Header line {} has label '{}', expected '{}'",
                self.line_no,
                label.trim(),
                field
            );
        }

        value
            .trim()
            .parse::<T>()
            .map_err(|_| SvxDemError::InvalidHeaderValue {
                field,
                value: value.trim().to_string(),
            })
    }
}
