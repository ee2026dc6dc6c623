// ==========================================
// 零售空间交互模型 - 结果导出
// ==========================================
// 输出 (CSV):
//   flows.csv          行: Brand_Name / 各需求区 / Store_Revenue, 列: 门店
//   store_revenue.csv  门店营业额与坪效
//   brand_share.csv    品牌营业额与市场份额
// ==========================================

use crate::domain::flow::FlowMatrix;
use crate::engine::aggregation::MarketSummary;
use csv::Writer;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

pub const FLOWS_FILE: &str = "flows.csv";
pub const STORE_REVENUE_FILE: &str = "store_revenue.csv";
pub const BRAND_SHARE_FILE: &str = "brand_share.csv";

/// 导出错误类型
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("输出目录创建失败 ({path}): {message}")]
    CreateDirError { path: String, message: String },

    #[error("CSV 写入失败: {0}")]
    CsvWriteError(#[from] csv::Error),

    #[error("文件写入失败: {0}")]
    IoError(#[from] std::io::Error),
}

pub type ExportResult<T> = Result<T, ExportError>;

// ==========================================
// 写入器 (任意 io::Write)
// ==========================================

/// 流量矩阵 (首行品牌名,末行门店营业额)
pub fn write_flow_matrix<W: Write>(matrix: &FlowMatrix, out: W) -> ExportResult<()> {
    let mut writer = Writer::from_writer(out);

    let mut header = vec!["OA11CD".to_string()];
    header.extend(matrix.store_ids.iter().cloned());
    header.push("Spend".to_string());
    writer.write_record(&header)?;

    let mut brand_row = vec!["Brand_Name".to_string()];
    brand_row.extend(matrix.store_brands.iter().cloned());
    brand_row.push(String::new());
    writer.write_record(&brand_row)?;

    for row in &matrix.rows {
        let mut record = vec![row.zone_code.clone()];
        record.extend(row.flows.iter().map(|f| f.to_string()));
        record.push(row.expenditure.to_string());
        writer.write_record(&record)?;
    }

    let mut revenue_row = vec!["Store_Revenue".to_string()];
    revenue_row.extend(matrix.store_revenues().iter().map(|r| r.to_string()));
    revenue_row.push(matrix.total_revenue().to_string());
    writer.write_record(&revenue_row)?;

    writer.flush()?;
    Ok(())
}

pub fn write_store_revenue<W: Write>(summary: &MarketSummary, out: W) -> ExportResult<()> {
    let mut writer = Writer::from_writer(out);
    writer.write_record(["store_id", "brand", "floorspace", "revenue", "trading_intensity"])?;
    for store in &summary.stores {
        writer.write_record([
            store.store_id.clone(),
            store.brand.clone(),
            store.floorspace_sqft.to_string(),
            store.revenue.to_string(),
            store
                .trading_intensity
                .map(|t| t.to_string())
                .unwrap_or_default(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_brand_share<W: Write>(summary: &MarketSummary, out: W) -> ExportResult<()> {
    let mut writer = Writer::from_writer(out);
    writer.write_record([
        "brand",
        "store_count",
        "revenue",
        "market_share",
        "observed_share",
        "share_error",
    ])?;
    for brand in &summary.brands {
        writer.write_record([
            brand.brand.clone(),
            brand.store_count.to_string(),
            brand.revenue.to_string(),
            brand.market_share.to_string(),
            brand.observed_share.map(|s| s.to_string()).unwrap_or_default(),
            brand.share_error.map(|s| s.to_string()).unwrap_or_default(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

// ==========================================
// 目录导出
// ==========================================

/// 写出全部结果文件,返回写出的路径
pub fn export_all(
    dir: &Path,
    matrix: &FlowMatrix,
    summary: &MarketSummary,
) -> ExportResult<Vec<PathBuf>> {
    fs::create_dir_all(dir).map_err(|e| ExportError::CreateDirError {
        path: dir.display().to_string(),
        message: e.to_string(),
    })?;

    let flows = dir.join(FLOWS_FILE);
    write_flow_matrix(matrix, fs::File::create(&flows)?)?;

    let stores = dir.join(STORE_REVENUE_FILE);
    write_store_revenue(summary, fs::File::create(&stores)?)?;

    let brands = dir.join(BRAND_SHARE_FILE);
    write_brand_share(summary, fs::File::create(&brands)?)?;

    info!(dir = %dir.display(), "结果导出完成");
    Ok(vec![flows, stores, brands])
}
