//! VPTC 命令行程序
//!
//! - `generate`：计算廓形并导出 DXF（可选 SVG 预览）
//! - `check`：只做可行性校验并打印设计参数
//! - `inspect`：统计 DXF 文件中各图层的实体
//! - `settings`：显示当前保存的参数

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use vptc_core::engine::{compute, Computation};
use vptc_core::params::Feasibility;
use vptc_core::CoreError;
use vptc_file::dxf_raw::count_by_layer;
use vptc_file::{export_model, DxfRawParser, ExportFormat, Settings, SettingsStore};

/// Ball wave reducer profile generator
#[derive(Parser)]
#[command(name = "vptc")]
#[command(version)]
#[command(about = "Generate the rigid-wheel profile of a ball wave reducer and export it to DXF")]
struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Settings file (defaults to the platform config directory)
    #[arg(long, global = true)]
    settings: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the profile and write vptc_{i}_{dsh}_{Rout}.dxf
    Generate {
        #[command(flatten)]
        params: ParamArgs,

        /// Output directory
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,

        /// Also write an SVG preview next to the DXF
        #[arg(long)]
        svg: bool,

        /// Do not write changed parameters back to the settings file
        #[arg(long)]
        no_save: bool,
    },
    /// Check feasibility and print the derived parameters
    Check {
        #[command(flatten)]
        params: ParamArgs,
    },
    /// Count entities per layer in a DXF file
    Inspect {
        /// DXF file to inspect
        file: PathBuf,
    },
    /// Print the effective settings
    Settings,
}

/// 覆盖已保存参数的命令行选项
#[derive(Args, Debug)]
struct ParamArgs {
    /// Number of points on the profile curve
    #[arg(long)]
    samples: Option<usize>,

    /// Transmission ratio (i)
    #[arg(short = 'i', long)]
    ratio: Option<u32>,

    /// Ball diameter (dsh), mm
    #[arg(long)]
    ball_diameter: Option<f64>,

    /// Outer radius of the rigid wheel bore (Rout), mm
    #[arg(long)]
    outer_radius: Option<f64>,

    /// Wall thickness beyond Rout, mm
    #[arg(long)]
    wall_thickness: Option<f64>,

    /// Include the rigid wheel profile and outer wall
    #[arg(long)]
    base_wheel: Option<bool>,

    /// Include the separator circles and construction marks
    #[arg(long)]
    separator: Option<bool>,

    /// Include the eccentric circle
    #[arg(long)]
    eccentric: Option<bool>,
}

impl ParamArgs {
    fn apply(&self, mut settings: Settings) -> Settings {
        if let Some(v) = self.samples {
            settings.sample_count = v;
        }
        if let Some(v) = self.ratio {
            settings.ratio = v;
        }
        if let Some(v) = self.ball_diameter {
            settings.ball_diameter = v;
        }
        if let Some(v) = self.outer_radius {
            settings.outer_radius = v;
        }
        if let Some(v) = self.wall_thickness {
            settings.wall_thickness = v;
        }
        if let Some(v) = self.base_wheel {
            settings.show_base_wheel = v;
        }
        if let Some(v) = self.separator {
            settings.show_separator = v;
        }
        if let Some(v) = self.eccentric {
            settings.show_eccentric = v;
        }
        settings
    }
}

fn settings_path(cli_path: Option<PathBuf>) -> Result<PathBuf> {
    cli_path
        .or_else(Settings::default_path)
        .context("Could not determine a settings directory; pass --settings")
}

/// 计算；不可行时给出带阈值的提示
fn run_engine(settings: &Settings) -> Result<Computation> {
    let params = settings.params();
    match compute(&params) {
        Ok(computation) => Ok(computation),
        Err(CoreError::Infeasible { .. }) => {
            anyhow::bail!("{}", Feasibility::evaluate(&params).message())
        }
        Err(e) => Err(e.into()),
    }
}

fn generate(
    store: &mut SettingsStore,
    args: &ParamArgs,
    out_dir: &Path,
    svg: bool,
    no_save: bool,
) -> Result<()> {
    let settings = args.apply(store.current());
    let computation = run_engine(&settings)?;

    let dxf_path = export_model(
        &computation.model,
        &computation.params,
        out_dir,
        ExportFormat::Dxf,
    )
    .context("DXF export failed")?;
    println!("Profile saved to: {}", dxf_path.display());

    if svg {
        let svg_path = export_model(
            &computation.model,
            &computation.params,
            out_dir,
            ExportFormat::Svg,
        )
        .context("SVG export failed")?;
        println!("Preview saved to: {}", svg_path.display());
    }

    println!("{}", computation.report());

    if !no_save && store.update(settings)? {
        info!("Settings updated at {}", store.path().display());
    }

    Ok(())
}

fn check(store: &SettingsStore, args: &ParamArgs) -> Result<()> {
    let settings = args.apply(store.current());
    let computation = run_engine(&settings)?;
    println!("{}", Feasibility::Feasible.message());
    println!("{}", computation.report());
    Ok(())
}

fn inspect(file: &Path) -> Result<()> {
    let mut parser = DxfRawParser::load(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let census = parser.entity_census()?;

    for ((kind, layer), count) in &census {
        println!("{:<8} {:<12} {}", layer, kind, count);
    }
    for (layer, count) in count_by_layer(&census) {
        println!("{:<8} total        {}", layer, count);
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    // 初始化日志
    tracing::subscriber::set_global_default(
        FmtSubscriber::builder().with_max_level(level).finish()
    )?;

    match cli.command {
        Commands::Generate { params, out_dir, svg, no_save } => {
            let mut store = SettingsStore::open(settings_path(cli.settings)?)?;
            generate(&mut store, &params, &out_dir, svg, no_save)
        }
        Commands::Check { params } => {
            let store = SettingsStore::open(settings_path(cli.settings)?)?;
            check(&store, &params)
        }
        Commands::Inspect { file } => inspect(&file),
        Commands::Settings => {
            let store = SettingsStore::open(settings_path(cli.settings)?)?;
            println!("# {}", store.path().display());
            println!("{}", serde_json::to_string_pretty(&store.current())?);
            Ok(())
        }
    }
}
