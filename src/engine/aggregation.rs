// ==========================================
// 零售空间交互模型 - 汇总引擎
// ==========================================
// 输入: 流量矩阵 + 零售网络
// 输出: 门店营业额、品牌营业额与市场份额
// 红线: 纯归约,无隐藏状态
// ==========================================

use crate::domain::flow::FlowMatrix;
use crate::domain::network::RetailNetwork;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 门店营业额
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreRevenue {
    pub store_id: String,
    pub brand: String,
    pub floorspace_sqft: f64,
    pub revenue: f64,
    pub trading_intensity: Option<f64>, // 营业额 / 面积
}

/// 品牌营业额与份额
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandShare {
    pub brand: String,
    pub store_count: usize,
    pub revenue: f64,
    pub market_share: f64,
    pub observed_share: Option<f64>,
    pub share_error: Option<f64>, // 预测份额 - 实测份额
}

/// 市场汇总
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSummary {
    pub stores: Vec<StoreRevenue>,
    pub brands: Vec<BrandShare>,
    pub total_revenue: f64,
    pub total_expenditure: f64,
}

impl MarketSummary {
    pub fn brand(&self, name: &str) -> Option<&BrandShare> {
        self.brands.iter().find(|b| b.brand == name)
    }

    pub fn store(&self, store_id: &str) -> Option<&StoreRevenue> {
        self.stores.iter().find(|s| s.store_id == store_id)
    }

    /// 按营业额降序的前 n 家门店
    pub fn top_stores(&self, n: usize) -> Vec<&StoreRevenue> {
        let mut sorted: Vec<&StoreRevenue> = self.stores.iter().collect();
        sorted.sort_by(|a, b| b.revenue.total_cmp(&a.revenue));
        sorted.truncate(n);
        sorted
    }

    /// 校准偏差: 有实测份额的品牌的平均绝对误差
    pub fn mean_absolute_share_error(&self) -> Option<f64> {
        let errors: Vec<f64> = self
            .brands
            .iter()
            .filter_map(|b| b.share_error.map(f64::abs))
            .collect();
        if errors.is_empty() {
            None
        } else {
            Some(errors.iter().sum::<f64>() / errors.len() as f64)
        }
    }
}

// ==========================================
// AggregationEngine
// ==========================================
pub struct AggregationEngine;

impl AggregationEngine {
    pub fn new() -> Self {
        Self
    }

    /// 品牌营业额 = 旗下门店列和之和
    pub fn brand_revenue(&self, matrix: &FlowMatrix, brand: &str) -> f64 {
        matrix
            .store_revenues()
            .iter()
            .zip(&matrix.store_brands)
            .filter(|(_, b)| b.as_str() == brand)
            .map(|(revenue, _)| revenue)
            .sum()
    }

    /// 生成市场汇总
    ///
    /// 品牌顺序与网络一致,无门店的品牌营业额为 0;
    /// 总营业额为 0 时全部份额记为 0
    pub fn summarize(&self, matrix: &FlowMatrix, network: &RetailNetwork) -> MarketSummary {
        let revenues = matrix.store_revenues();

        let stores: Vec<StoreRevenue> = matrix
            .store_ids
            .iter()
            .zip(&matrix.store_brands)
            .zip(&revenues)
            .map(|((store_id, brand), &revenue)| {
                let store = network.store(store_id);
                StoreRevenue {
                    store_id: store_id.clone(),
                    brand: brand.clone(),
                    floorspace_sqft: store.map(|s| s.floorspace_sqft).unwrap_or(0.0),
                    revenue,
                    trading_intensity: store.and_then(|s| s.trading_intensity(revenue)),
                }
            })
            .collect();

        let total_revenue: f64 = revenues.iter().sum();

        let mut by_brand: HashMap<&str, (usize, f64)> = HashMap::new();
        for store in &stores {
            let entry = by_brand.entry(store.brand.as_str()).or_insert((0, 0.0));
            entry.0 += 1;
            entry.1 += store.revenue;
        }

        let brands = network
            .brands()
            .iter()
            .map(|brand| {
                let (store_count, revenue) =
                    by_brand.get(brand.name.as_str()).copied().unwrap_or((0, 0.0));
                let market_share = if total_revenue > 0.0 {
                    revenue / total_revenue
                } else {
                    0.0
                };
                BrandShare {
                    brand: brand.name.clone(),
                    store_count,
                    revenue,
                    market_share,
                    observed_share: brand.observed_share,
                    share_error: brand.observed_share.map(|obs| market_share - obs),
                }
            })
            .collect();

        MarketSummary {
            stores,
            brands,
            total_revenue,
            total_expenditure: network.total_expenditure(),
        }
    }
}

impl Default for AggregationEngine {
    fn default() -> Self {
        Self::new()
    }
}
