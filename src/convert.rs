//! 入力ASCII DEMから .svx ファイルまでの変換処理

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::geometry::GridSpacing;
use crate::model::{block_name, DemHeader};
use crate::parser::parse_ascii_dem_file;
use crate::writer::{SvxConfig, SvxWriter};

/// 変換の設定（CLI引数から組み立てる）
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    pub input: PathBuf,
    /// 未指定の場合は入力ファイル名から `.svx` を生成
    pub output: Option<PathBuf>,
    pub projection: Option<String>,
}

impl ConvertOptions {
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| default_output_path(&self.input))
    }
}

#[derive(Debug, Clone)]
pub struct ConvertReport {
    pub output: PathBuf,
    pub block_name: String,
    pub header: DemHeader,
    pub spacing: GridSpacing,
    pub stations: usize,
}

/// `topo.ascii` -> `topo.svx`
pub fn default_output_path(input: &Path) -> PathBuf {
    let input = input.to_string_lossy();
    PathBuf::from(format!("{}.svx", block_name(&input)))
}

pub fn convert(options: &ConvertOptions) -> Result<ConvertReport> {
    let output = options.output_path();
    let block = block_name(&output.to_string_lossy()).to_string();

    info!("Reading ASCII DEM: {:?}", options.input);
    let dem = parse_ascii_dem_file(&options.input)
        .with_context(|| format!("Failed to parse ASCII DEM: {:?}", options.input))?;

    let spacing = GridSpacing::from_header(&dem.header)
        .with_context(|| format!("Invalid grid dimensions in {:?}", options.input))?;

    let header = dem.header;
    info!("Dataset limits:");
    info!("  north: {:07.3}", header.north);
    info!("  south: {:07.3}", header.south);
    info!("  east: {:06.3}", header.east);
    info!("  west: {:06.3}", header.west);
    info!("  rows: {}", header.rows);
    info!("  cols: {}", header.cols);
    info!("grid_ns: {:03.2}", spacing.ns);
    info!("grid_ew: {:03.2}", spacing.ew);

    let config = SvxConfig {
        block_name: block.clone(),
        projection: options.projection.clone(),
    };

    let summary = SvxWriter::new()
        .write(&dem, &output, &config)
        .with_context(|| format!("Failed to write Survex file: {:?}", output))?;

    info!(
        "Written Survex file: {:?} ({} stations, {} nosurvey lists)",
        output, summary.stations, summary.shot_lists
    );

    Ok(ConvertReport {
        output,
        block_name: block,
        header,
        spacing,
        stations: summary.stations,
    })
}
