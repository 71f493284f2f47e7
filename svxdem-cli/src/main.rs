use anyhow::Result;
use clap::{CommandFactory, Parser};
use std::path::PathBuf;
use std::process;
use svx_dem::{convert, ConvertOptions};
use tracing::info;

const USAGE: &str = "\
------------------------------------------------------------------
svxdem (SURVEX-DEM) creates svx files from raster DEMs exported
from GRASS-GIS as ASCII files

like this:
r.out.ascii input=topo output=topo.ascii

Usage: svxdem -i infile -o outfile -p UTM22S
------------------------------------------------------------------";

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// 入力ASCII DEMファイル（GRASS r.out.ascii）
    #[arg(short, long, value_name = "FILE")]
    indem: Option<PathBuf>,

    /// 出力 .svx ファイル（デフォルト: 入力ファイル名 + .svx）
    #[arg(short, long, value_name = "FILE")]
    outdem: Option<PathBuf>,

    /// 座標系ラベル（例: UTM22S）。*cs 行にそのまま出力
    #[arg(short, long, value_name = "LABEL")]
    proj: Option<String>,
}

impl Args {
    fn into_options(self) -> Option<ConvertOptions> {
        Some(ConvertOptions {
            input: self.indem?,
            output: self.outdem,
            projection: self.proj,
        })
    }
}

fn main() -> Result<()> {
    // ログの初期化
    tracing_subscriber::fmt::init();

    // CLI引数の解析
    let args = Args::parse();

    // 入力未指定の場合は使い方を表示して終了
    let Some(options) = args.into_options() else {
        usage();
    };

    // 処理開始時間を記録
    let start_time = std::time::Instant::now();

    info!("< svxdem {} >", env!("CARGO_PKG_VERSION"));

    let report = convert(&options)?;
    info!(
        "Converted {} stations into block '{}'",
        report.stations, report.block_name
    );

    // 処理時間を表示
    let elapsed = start_time.elapsed();
    info!("Total processing time: {:?}", elapsed);

    Ok(())
}

fn usage() -> ! {
    println!("{}", USAGE);
    println!();
    println!("{}", Args::command().render_help());
    process::exit(1);
}
