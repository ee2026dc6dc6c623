// ==========================================
// 零售空间交互模型 - 吸引力/距离计算引擎
// ==========================================
// 输入: 一个需求区 + 全部门店
// 输出: 每家门店的得分 = 吸引力 × 距离衰减
// 红线: 无状态引擎,所有方法都是纯函数
// ==========================================

use crate::config::SimConfig;
use crate::domain::error::{ModelError, ModelResult};
use crate::domain::network::RetailNetwork;
use crate::domain::store::{Brand, Store};
use crate::domain::types::DecayFunction;
use crate::domain::zone::DemandZone;
use serde::{Deserialize, Serialize};

/// 单个 (需求区, 门店) 的得分明细
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreScore {
    pub store_id: String,
    pub distance_km: f64,
    pub attractiveness: f64,
    pub decay: f64,
    pub score: f64,
}

// ==========================================
// AttractivenessEngine
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct AttractivenessEngine {
    config: SimConfig,
}

impl AttractivenessEngine {
    pub fn new(config: SimConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// 需求区质心到门店的距离 (公里)
    pub fn distance_km(&self, zone: &DemandZone, store: &Store) -> f64 {
        zone.centroid.distance_to(&store.location) / self.config.distance_unit_m
    }

    /// 门店吸引力 = 面积 ^ alpha
    ///
    /// 面积 <= 0 时吸引力为 0 (包括 alpha = 0 的情况)
    pub fn attractiveness(&self, store: &Store, brand: &Brand) -> f64 {
        if store.floorspace_sqft <= 0.0 {
            return 0.0;
        }
        store.floorspace_sqft.powf(brand.alpha)
    }

    /// 距离衰减
    pub fn decay(&self, distance_km: f64, beta: f64) -> f64 {
        match self.config.decay {
            DecayFunction::Exponential => (-beta * distance_km).exp(),
            DecayFunction::Power => distance_km.max(self.config.min_distance_km).powf(-beta),
        }
    }

    /// 计算需求区对全部门店的得分 (门店顺序与网络一致)
    pub fn score_zone(
        &self,
        zone: &DemandZone,
        network: &RetailNetwork,
    ) -> ModelResult<Vec<StoreScore>> {
        let beta = network.classification_of(zone)?.beta;

        network
            .stores()
            .iter()
            .map(|store| {
                let brand = network.brand_of(store)?;
                let distance_km = self.distance_km(zone, store);
                let attractiveness = self.attractiveness(store, brand);
                let decay = self.decay(distance_km, beta);
                let score = attractiveness * decay;

                if !score.is_finite() {
                    return Err(ModelError::NonFiniteScore {
                        zone_code: zone.zone_code.clone(),
                        store_id: store.store_id.clone(),
                        score,
                    });
                }

                Ok(StoreScore {
                    store_id: store.store_id.clone(),
                    distance_km,
                    attractiveness,
                    decay,
                    score,
                })
            })
            .collect()
    }
}
