// ==========================================
// 零售空间交互模型 - 模型运行编排器
// ==========================================
// 职责: 串联 分配 → 汇总 → 守恒校验,生成一次运行记录
// ==========================================

use crate::config::SimConfig;
use crate::domain::error::{ModelError, ModelResult};
use crate::domain::flow::FlowMatrix;
use crate::domain::network::RetailNetwork;
use crate::engine::aggregation::{AggregationEngine, MarketSummary};
use crate::engine::allocation::GravityModel;
use crate::engine::scenario::ScenarioEngine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

/// 一次模型运行的结果
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelRun {
    pub run_id: String,
    pub computed_at: DateTime<Utc>,
    pub config: SimConfig,
    pub flows: FlowMatrix,
    pub summary: MarketSummary,
}

// ==========================================
// ModelOrchestrator
// ==========================================
pub struct ModelOrchestrator {
    config: SimConfig,
    model: GravityModel,
    aggregator: AggregationEngine,
}

impl ModelOrchestrator {
    pub fn new(config: SimConfig) -> Self {
        Self {
            model: GravityModel::new(config.clone()),
            aggregator: AggregationEngine::new(),
            config,
        }
    }

    pub fn model(&self) -> &GravityModel {
        &self.model
    }

    pub fn scenario(&self) -> ScenarioEngine<'_> {
        ScenarioEngine::new(&self.model)
    }

    /// 执行一次完整运行
    pub fn run(&self, network: &RetailNetwork) -> ModelResult<ModelRun> {
        let run_id = Uuid::new_v4().to_string();
        info!(
            run_id = %run_id,
            zones = network.zones().len(),
            stores = network.stores().len(),
            decay = %self.config.decay,
            "开始模型运行"
        );

        let flows = self.model.compute_flows(network)?;
        let summary = self.aggregator.summarize(&flows, network);
        self.check_conservation(&summary)?;

        if let Some(mae) = summary.mean_absolute_share_error() {
            info!(run_id = %run_id, mae, "品牌份额校准偏差");
        }
        info!(
            run_id = %run_id,
            total_revenue = summary.total_revenue,
            "模型运行完成"
        );

        Ok(ModelRun {
            run_id,
            computed_at: Utc::now(),
            config: self.config.clone(),
            flows,
            summary,
        })
    }

    /// 守恒校验: 总营业额 = 总消费 (相对容差)
    fn check_conservation(&self, summary: &MarketSummary) -> ModelResult<()> {
        let diff = (summary.total_revenue - summary.total_expenditure).abs();
        let scale = summary.total_expenditure.abs().max(1.0);
        if diff > self.config.tolerance * scale {
            warn!(
                total_revenue = summary.total_revenue,
                total_expenditure = summary.total_expenditure,
                "消费守恒校验失败"
            );
            return Err(ModelError::ConservationViolated {
                total_revenue: summary.total_revenue,
                total_expenditure: summary.total_expenditure,
            });
        }
        Ok(())
    }
}

impl Default for ModelOrchestrator {
    fn default() -> Self {
        Self::new(SimConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::store::{Brand, Store};
    use crate::domain::types::Location;
    use crate::domain::zone::{DemandZone, OutputAreaClassification};

    #[test]
    fn test_run_conserves_spend() {
        let network = RetailNetwork::new(
            vec![Brand::new("A", 1.0)],
            vec![OutputAreaClassification::new("1", 0.2)],
            vec![
                DemandZone::new("Z1", Location::new(0.0, 0.0), 120.0, "1"),
                DemandZone::new("Z2", Location::new(900.0, 900.0), 80.0, "1"),
            ],
            vec![Store::new("S1", "A", Location::new(100.0, 100.0), 500.0)],
        )
        .unwrap();

        let run = ModelOrchestrator::default().run(&network).unwrap();
        assert!((run.summary.total_revenue - 200.0).abs() < 1e-9);
        assert!(!run.run_id.is_empty());
        assert_eq!(run.flows.zone_count(), 2);
    }

    #[test]
    fn test_conservation_mismatch_is_rejected() {
        let summary = MarketSummary {
            stores: vec![],
            brands: vec![],
            total_revenue: 0.0,
            total_expenditure: 100.0,
        };
        let err = ModelOrchestrator::default()
            .check_conservation(&summary)
            .unwrap_err();
        assert_eq!(
            err,
            ModelError::ConservationViolated {
                total_revenue: 0.0,
                total_expenditure: 100.0,
            }
        );
    }

    #[test]
    fn test_conservation_within_relative_tolerance() {
        let summary = MarketSummary {
            stores: vec![],
            brands: vec![],
            total_revenue: 1e6 + 1e-5,
            total_expenditure: 1e6,
        };
        assert!(ModelOrchestrator::default().check_conservation(&summary).is_ok());
    }

    #[test]
    fn test_run_rejects_overflowing_scores() {
        let network = RetailNetwork::new(
            vec![Brand::new("A", 1.0)],
            vec![OutputAreaClassification::new("1", 0.2)],
            vec![DemandZone::new("Z1", Location::new(0.0, 0.0), 100.0, "1")],
            vec![
                Store::new("S1", "A", Location::new(0.0, 0.0), 1e308),
                Store::new("S2", "A", Location::new(0.0, 0.0), 1e308),
            ],
        )
        .unwrap();

        let err = ModelOrchestrator::default().run(&network).unwrap_err();
        assert!(matches!(err, ModelError::NonFiniteScore { .. }));
    }
}
