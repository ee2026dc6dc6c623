// ==========================================
// 零售空间交互模型 - 命令行入口
// ==========================================
// 用法:
//   retail-sim run --profile profile.json [--out results]
//   retail-sim new-store --profile profile.json --name N --brand B \
//       --easting E --northing N --floorspace F
// ==========================================

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use retail_sim::config::{ProfileLoader, RunProfile};
use retail_sim::domain::{Location, Store};
use retail_sim::engine::ModelOrchestrator;
use retail_sim::importer::NetworkImporter;
use retail_sim::{export, logging};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "retail-sim", version, about = "Retail spatial interaction model")]
struct Args {
    /// 输出 JSON 格式日志
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 计算流量矩阵与市场汇总
    Run {
        /// 运行方案 (JSON)
        #[arg(short, long)]
        profile: PathBuf,

        /// 输出目录 (覆盖方案中的 output_dir)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// 评估新开门店
    NewStore {
        #[arg(short, long)]
        profile: PathBuf,

        #[arg(long)]
        name: String,

        #[arg(long)]
        brand: String,

        #[arg(long)]
        easting: f64,

        #[arg(long)]
        northing: f64,

        /// 营业面积 (平方英尺)
        #[arg(long)]
        floorspace: f64,

        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

fn load(profile_path: &Path) -> Result<(RunProfile, retail_sim::ImportedNetwork)> {
    let profile = ProfileLoader::load(profile_path)
        .with_context(|| format!("无法加载运行方案: {}", profile_path.display()))?;
    let imported = NetworkImporter::new()
        .import(&profile.inputs)
        .context("输入数据导入失败")?;
    Ok((profile, imported))
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.json_logs);

    tracing::info!("{} v{}", retail_sim::APP_NAME, retail_sim::VERSION);

    match args.command {
        Command::Run { profile, out } => {
            let (profile, imported) = load(&profile)?;
            let orchestrator = ModelOrchestrator::new(profile.model.clone());
            let run = orchestrator.run(&imported.network)?;

            println!("run_id={}", run.run_id);
            println!("{:<24} {:>14} {:>10}", "brand", "revenue", "share");
            for brand in &run.summary.brands {
                println!(
                    "{:<24} {:>14.2} {:>9.2}%",
                    brand.brand,
                    brand.revenue,
                    brand.market_share * 100.0
                );
            }

            if let Some(dir) = out.or(profile.output_dir) {
                let written = export::export_all(&dir, &run.flows, &run.summary)?;
                for path in written {
                    println!("wrote {}", path.display());
                }
            }
        }

        Command::NewStore {
            profile,
            name,
            brand,
            easting,
            northing,
            floorspace,
            out,
        } => {
            let (profile, imported) = load(&profile)?;
            let orchestrator = ModelOrchestrator::new(profile.model.clone());
            let candidate = Store::new(name, brand, Location::new(easting, northing), floorspace);

            let outcome = orchestrator
                .scenario()
                .evaluate_new_store(&imported.network, candidate)?;
            let impact = &outcome.impact;

            println!("store:               {}", impact.store_id);
            println!("weekly revenue:      {:.2}", impact.store_revenue);
            match impact.trading_intensity {
                Some(t) => println!("trading intensity:   {:.4} per sq.ft", t),
                None => println!("trading intensity:   n/a"),
            }
            println!("brand revenue:       {:.2} -> {:.2}", impact.brand_revenue_before, impact.brand_revenue_after);
            println!("cannibalization:     {:.2}", impact.cannibalization);
            for b in &impact.brand_impacts {
                println!("  {:<22} {:>+14.2}", b.brand, b.delta);
            }

            if let Some(dir) = out.or(profile.output_dir) {
                let summary = retail_sim::AggregationEngine::new()
                    .summarize(&outcome.with_store, &outcome.network);
                export::export_all(&dir, &outcome.with_store, &summary)?;
                println!("wrote results to {}", dir.display());
            }
        }
    }

    Ok(())
}
