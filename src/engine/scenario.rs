// ==========================================
// 零售空间交互模型 - 新店情景评估
// ==========================================
// 流程:
//   1. 基线流量矩阵
//   2. 加入候选门店后重算
//   3. 候选门店营业额 / 坪效 / 同品牌分流 / 各品牌营业额变化
// ==========================================
// 同品牌分流 (cannibalization):
//   品牌原营业额 + 新店营业额 - 品牌新营业额
// ==========================================

use crate::domain::error::ModelResult;
use crate::domain::flow::FlowMatrix;
use crate::domain::network::RetailNetwork;
use crate::domain::store::Store;
use crate::engine::aggregation::AggregationEngine;
use crate::engine::allocation::GravityModel;
use serde::{Deserialize, Serialize};
use tracing::info;

/// 品牌营业额变化
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandImpact {
    pub brand: String,
    pub revenue_before: f64,
    pub revenue_after: f64,
    pub delta: f64,
}

/// 新店评估结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreImpact {
    pub store_id: String,
    pub brand: String,
    pub store_revenue: f64,
    pub trading_intensity: Option<f64>,
    pub brand_revenue_before: f64,
    pub brand_revenue_after: f64,
    pub cannibalization: f64,
    pub brand_impacts: Vec<BrandImpact>,
    pub catchment: Vec<(String, f64)>, // (需求区, 流入新店的消费),降序
}

impl StoreImpact {
    /// 新店营业额中来自竞争品牌的部分
    pub fn captured_from_competitors(&self) -> f64 {
        self.store_revenue - self.cannibalization
    }
}

/// 情景评估输出 (含前后矩阵,供导出)
#[derive(Debug, Clone)]
pub struct ScenarioOutcome {
    pub impact: StoreImpact,
    pub baseline: FlowMatrix,
    pub with_store: FlowMatrix,
    pub network: RetailNetwork,
}

// ==========================================
// ScenarioEngine
// ==========================================
pub struct ScenarioEngine<'a> {
    model: &'a GravityModel,
    aggregator: AggregationEngine,
}

impl<'a> ScenarioEngine<'a> {
    pub fn new(model: &'a GravityModel) -> Self {
        Self {
            model,
            aggregator: AggregationEngine::new(),
        }
    }

    /// 评估候选门店
    ///
    /// # 错误
    /// - 候选门店品牌不存在 / 门店名重复 → 引用完整性错误
    /// - 重算过程中的分配错误原样返回
    pub fn evaluate_new_store(
        &self,
        network: &RetailNetwork,
        candidate: Store,
    ) -> ModelResult<ScenarioOutcome> {
        let baseline = self.model.compute_flows(network)?;
        self.evaluate_against(network, &baseline, candidate)
    }

    /// 以已有基线矩阵评估候选门店 (多次尝试时避免重复计算基线)
    pub fn evaluate_against(
        &self,
        network: &RetailNetwork,
        baseline: &FlowMatrix,
        candidate: Store,
    ) -> ModelResult<ScenarioOutcome> {
        let store_id = candidate.store_id.clone();
        let brand = candidate.brand.clone();

        let extended = network.with_store(candidate)?;
        let with_store = self.model.compute_flows(&extended)?;

        let store_revenue = with_store.store_revenue(&store_id).unwrap_or(0.0);
        let trading_intensity = extended
            .store(&store_id)
            .and_then(|s| s.trading_intensity(store_revenue));

        let brand_revenue_before = self.aggregator.brand_revenue(baseline, &brand);
        let brand_revenue_after = self.aggregator.brand_revenue(&with_store, &brand);
        let cannibalization = brand_revenue_before + store_revenue - brand_revenue_after;

        let brand_impacts = extended
            .brands()
            .iter()
            .map(|b| {
                let revenue_before = self.aggregator.brand_revenue(baseline, &b.name);
                let revenue_after = self.aggregator.brand_revenue(&with_store, &b.name);
                BrandImpact {
                    brand: b.name.clone(),
                    revenue_before,
                    revenue_after,
                    delta: revenue_after - revenue_before,
                }
            })
            .collect();

        let catchment = with_store.catchment(&store_id).unwrap_or_default();

        info!(
            store_id = %store_id,
            brand = %brand,
            store_revenue,
            cannibalization,
            "新店情景评估完成"
        );

        Ok(ScenarioOutcome {
            impact: StoreImpact {
                store_id,
                brand,
                store_revenue,
                trading_intensity,
                brand_revenue_before,
                brand_revenue_after,
                cannibalization,
                brand_impacts,
                catchment,
            },
            baseline: baseline.clone(),
            with_store,
            network: extended,
        })
    }
}
