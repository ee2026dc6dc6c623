// ==========================================
// 零售空间交互模型 - 重力模型分配引擎
// ==========================================
// 模型: 生产约束型 (production constrained) 空间交互模型
//   A_i      = 1 / Σ_j score(i, j)
//   P(i, j)  = A_i · score(i, j)
//   flow(i,j) = P(i, j) · O_i
// 红线: Σ_j flow(i, j) = O_i,得分全为 0 时拒绝分配
// ==========================================

use crate::config::SimConfig;
use crate::domain::error::{ModelError, ModelResult};
use crate::domain::flow::{FlowMatrix, ZoneAllocation};
use crate::domain::network::RetailNetwork;
use crate::domain::zone::DemandZone;
use crate::engine::attractiveness::{AttractivenessEngine, StoreScore};
use tracing::{debug, instrument};

// ==========================================
// GravityModel
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct GravityModel {
    scorer: AttractivenessEngine,
}

impl GravityModel {
    pub fn new(config: SimConfig) -> Self {
        Self {
            scorer: AttractivenessEngine::new(config),
        }
    }

    pub fn scorer(&self) -> &AttractivenessEngine {
        &self.scorer
    }

    /// 由得分计算选择概率
    ///
    /// # 返回
    /// - Ok((A_i, 概率列表))
    /// - Err(NoViableDestination): 得分和为 0 (无门店或面积全为 0)
    /// - Err(NonFiniteScore): 单项得分有限但求和溢出
    pub fn probabilities(
        zone_code: &str,
        scores: &[StoreScore],
    ) -> ModelResult<(f64, Vec<f64>)> {
        let mut total = 0.0_f64;
        for s in scores {
            total += s.score;
            if !total.is_finite() {
                return Err(ModelError::NonFiniteScore {
                    zone_code: zone_code.to_string(),
                    store_id: s.store_id.clone(),
                    score: total,
                });
            }
        }
        if total <= 0.0 {
            return Err(ModelError::NoViableDestination {
                zone_code: zone_code.to_string(),
            });
        }

        let balancing_factor = 1.0 / total;
        let probabilities = scores
            .iter()
            .map(|s| s.score * balancing_factor)
            .collect();
        Ok((balancing_factor, probabilities))
    }

    /// 单个需求区的消费分配
    pub fn allocate_zone(
        &self,
        zone: &DemandZone,
        network: &RetailNetwork,
    ) -> ModelResult<ZoneAllocation> {
        let scores = self.scorer.score_zone(zone, network)?;
        let (balancing_factor, probabilities) = Self::probabilities(&zone.zone_code, &scores)?;
        let flows = probabilities
            .iter()
            .map(|p| p * zone.expenditure)
            .collect();

        Ok(ZoneAllocation {
            zone_code: zone.zone_code.clone(),
            expenditure: zone.expenditure,
            balancing_factor,
            probabilities,
            flows,
        })
    }

    /// 计算全部需求区的流量矩阵
    ///
    /// 任一需求区分配失败即整体失败 (不返回部分结果)
    #[instrument(skip_all, fields(zones = network.zones().len(), stores = network.stores().len()))]
    pub fn compute_flows(&self, network: &RetailNetwork) -> ModelResult<FlowMatrix> {
        let rows = network
            .zones()
            .iter()
            .map(|zone| self.allocate_zone(zone, network))
            .collect::<ModelResult<Vec<_>>>()?;

        debug!(rows = rows.len(), "流量矩阵计算完成");

        Ok(FlowMatrix {
            store_ids: network.stores().iter().map(|s| s.store_id.clone()).collect(),
            store_brands: network.stores().iter().map(|s| s.brand.clone()).collect(),
            rows,
        })
    }
}
