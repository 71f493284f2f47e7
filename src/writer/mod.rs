use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::geometry::{stations, GridSpacing};
use crate::model::{station_name, AsciiDem};

/// 出力ファイル先頭の固定コメント
pub const SVX_HEADER: &str = "\
;********************   SURVEX-DEM   ********************
;Survex terrain data created by SURVEX-DEM (svxdem.py)
;based on a DEM exported from GRASS-GIS as an ASCII file

;SURVEX-DEM (c) 2009-2019, Carlos H. Grohmann. IEE-USP - Brazil
;https://github.com/CarlosGrohmann
;This program is licensed under LGPL 2.0 or later



;Surface data for Survex
";

#[derive(Debug, Clone, Default)]
pub struct SvxConfig {
    /// `*begin` / `*end` のブロック名
    pub block_name: String,
    /// `*cs` に渡す座標系ラベル（例: UTM22S）
    pub projection: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteSummary {
    pub stations: usize,
    /// 行方向・列方向の測点リスト数
    pub shot_lists: usize,
}

#[derive(Default)]
pub struct SvxWriter {}

impl SvxWriter {
    pub fn new() -> Self {
        Self {}
    }

    pub fn write(
        &self,
        dem: &AsciiDem,
        output_path: &Path,
        config: &SvxConfig,
    ) -> Result<WriteSummary> {
        let file = File::create(output_path)
            .with_context(|| format!("Failed to create output file: {:?}", output_path))?;
        let mut out = BufWriter::new(file);

        let summary = self.write_to(dem, &mut out, config)?;
        out.flush().context("Failed to flush output file")?;

        Ok(summary)
    }

    pub fn write_to<W: Write>(
        &self,
        dem: &AsciiDem,
        out: &mut W,
        config: &SvxConfig,
    ) -> Result<WriteSummary> {
        let spacing = GridSpacing::from_header(&dem.header)?;
        let (rows, cols) = dem.shape();

        tracing::info!(
            "Writing Survex block '{}': {} x {} stations",
            config.block_name,
            rows,
            cols
        );

        out.write_all(SVX_HEADER.as_bytes())?;
        writeln!(out)?;

        // 座標系の宣言（*begin の直前）
        if let Some(proj) = &config.projection {
            writeln!(out, "*cs {}", proj)?;
            writeln!(out, "*cs out {}", proj)?;
        }

        writeln!(out, "*begin {}", config.block_name)?;

        // 固定測点
        let mut count = 0;
        for station in stations(dem, spacing) {
            let station = station.context("Failed to build station from grid")?;
            writeln!(
                out,
                "*fix {} {:06.1} {:07.1} {:05.2}",
                station.name(),
                station.easting,
                station.northing,
                station.elevation
            )?;
            count += 1;
        }

        // nosurvey 測線（行方向・列方向の両方）
        writeln!(out)?;
        writeln!(out, "*data nosurvey station")?;
        writeln!(out, "*flags surface")?;

        writeln!(out, ";by row (row/col)")?;
        for row in 0..rows {
            for col in 0..cols {
                writeln!(out, "{}", station_name(row, col))?;
            }
            writeln!(out)?;
        }

        writeln!(out, ";by col (col/row)")?;
        for col in 0..cols {
            for row in 0..rows {
                writeln!(out, "{}", station_name(row, col))?;
            }
            writeln!(out)?;
        }

        writeln!(out, "*end {}", config.block_name)?;

        tracing::debug!("Wrote {} fixed stations", count);

        Ok(WriteSummary {
            stations: count,
            shot_lists: rows + cols,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DemHeader;
    use std::collections::HashSet;
    use tempfile::TempDir;

    fn create_test_dem() -> AsciiDem {
        AsciiDem {
            header: DemHeader {
                north: 100.0,
                south: 0.0,
                east: 50.0,
                west: 0.0,
                rows: 2,
                cols: 2,
            },
            cells: vec!["1 2".to_string(), "3 4".to_string()],
        }
    }

    fn render(dem: &AsciiDem, config: &SvxConfig) -> String {
        let mut buf = Vec::new();
        SvxWriter::new().write_to(dem, &mut buf, config).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn config(proj: Option<&str>) -> SvxConfig {
        SvxConfig {
            block_name: "topo".to_string(),
            projection: proj.map(str::to_string),
        }
    }

    #[test]
    fn test_write_full_document() {
        let output = render(&create_test_dem(), &config(None));

        let expected_body = "\
*begin topo
*fix N0E0 0025.0 00100.0 01.00
*fix N0E1 0050.0 00100.0 02.00
*fix N1E0 0025.0 00050.0 03.00
*fix N1E1 0050.0 00050.0 04.00

*data nosurvey station
*flags surface
;by row (row/col)
N0E0
N0E1

N1E0
N1E1

;by col (col/row)
N0E0
N1E0

N0E1
N1E1

*end topo
";
        assert!(output.starts_with(SVX_HEADER));
        assert_eq!(&output[SVX_HEADER.len()..], format!("\n{}", expected_body));
        assert!(!output.contains("*cs"));
    }

    #[test]
    fn test_negative_values_keep_sign_before_padding() {
        let dem = AsciiDem {
            header: DemHeader {
                north: -10.0,
                south: -20.0,
                east: 0.0,
                west: -10.0,
                rows: 1,
                cols: 2,
            },
            cells: vec!["-3.5 12".to_string()],
        };
        let output = render(&dem, &config(None));

        assert!(output.contains("*fix N0E0 -005.0 -0010.0 -3.50\n"));
        assert!(output.contains("*fix N0E1 0000.0 -0010.0 12.00\n"));
    }

    #[test]
    fn test_projection_lines_precede_begin() {
        let output = render(&create_test_dem(), &config(Some("UTM22S")));
        let lines: Vec<&str> = output.lines().collect();

        let begin = lines.iter().position(|l| *l == "*begin topo").unwrap();
        assert_eq!(lines[begin - 2], "*cs UTM22S");
        assert_eq!(lines[begin - 1], "*cs out UTM22S");
    }

    #[test]
    fn test_row_and_column_listings_match() {
        let dem = AsciiDem {
            header: DemHeader {
                north: 30.0,
                south: 0.0,
                east: 40.0,
                west: 0.0,
                rows: 3,
                cols: 4,
            },
            cells: vec![
                "1 2 3 4".to_string(),
                "5 6 7 8".to_string(),
                "9 10 11 12".to_string(),
            ],
        };
        let output = render(&dem, &config(None));

        let by_row_start = output.find(";by row").unwrap();
        let by_col_start = output.find(";by col").unwrap();
        let end = output.find("*end").unwrap();

        let collect = |s: &str| -> Vec<String> {
            s.lines()
                .skip(1)
                .filter(|l| !l.is_empty())
                .map(str::to_string)
                .collect()
        };
        let by_row = collect(&output[by_row_start..by_col_start]);
        let by_col = collect(&output[by_col_start..end]);

        assert_eq!(by_row.len(), 12);
        assert_eq!(by_col.len(), 12);
        assert_eq!(by_row[1], "N0E1");
        assert_eq!(by_col[1], "N1E0");

        let expected: HashSet<String> = (0..3)
            .flat_map(|r| (0..4).map(move |c| station_name(r, c)))
            .collect();
        assert_eq!(by_row.into_iter().collect::<HashSet<_>>(), expected);
        assert_eq!(by_col.into_iter().collect::<HashSet<_>>(), expected);
    }

    #[test]
    fn test_write_file() {
        let temp_dir = TempDir::new().unwrap();
        let output_path = temp_dir.path().join("topo.svx");

        let summary = SvxWriter::new()
            .write(&create_test_dem(), &output_path, &config(Some("UTM22S")))
            .unwrap();

        assert_eq!(
            summary,
            WriteSummary {
                stations: 4,
                shot_lists: 4
            }
        );

        let content = std::fs::read_to_string(&output_path).unwrap();
        assert!(content.contains("*fix N1E1 0050.0 00050.0 04.00"));
        assert!(content.ends_with("*end topo\n"));
    }

    #[test]
    fn test_malformed_grid_fails() {
        let mut dem = create_test_dem();
        dem.cells[1] = "3".to_string();

        let mut buf = Vec::new();
        let err = SvxWriter::new()
            .write_to(&dem, &mut buf, &config(None))
            .unwrap_err();
        assert!(format!("{:#}", err).contains("Malformed grid"));
    }
}
