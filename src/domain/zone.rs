// ==========================================
// 零售空间交互模型 - 需求区领域模型
// ==========================================
// 职责: 需求侧实体 (DemandZone / OutputAreaClassification)
// ==========================================

use crate::domain::types::Location;
use serde::{Deserialize, Serialize};

// ==========================================
// DemandZone - 需求区 (Output Area)
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemandZone {
    pub zone_code: String,      // OA11CD
    pub centroid: Location,     // 区域质心
    pub expenditure: f64,       // 每周可支配消费额
    pub class_code: String,     // OAC 分类代码 (外键 → OutputAreaClassification)
}

impl DemandZone {
    pub fn new(
        zone_code: impl Into<String>,
        centroid: Location,
        expenditure: f64,
        class_code: impl Into<String>,
    ) -> Self {
        Self {
            zone_code: zone_code.into(),
            centroid,
            expenditure,
            class_code: class_code.into(),
        }
    }
}

// ==========================================
// OutputAreaClassification - 人口分类
// ==========================================
// beta: 距离阻抗参数,越大出行意愿越弱
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputAreaClassification {
    pub class_code: String,
    pub name: Option<String>,
    pub avg_distance_km: Option<f64>,  // 该类人群平均出行距离
    pub beta: f64,
}

impl OutputAreaClassification {
    pub fn new(class_code: impl Into<String>, beta: f64) -> Self {
        Self {
            class_code: class_code.into(),
            name: None,
            avg_distance_km: None,
            beta,
        }
    }

    /// 仅给出平均出行距离时,按指数衰减的极大似然估计取 beta = 1 / 平均距离
    ///
    /// 平均距离非正时返回 None
    pub fn from_avg_distance(class_code: impl Into<String>, avg_distance_km: f64) -> Option<Self> {
        if avg_distance_km.is_finite() && avg_distance_km > 0.0 {
            Some(Self {
                class_code: class_code.into(),
                name: None,
                avg_distance_km: Some(avg_distance_km),
                beta: 1.0 / avg_distance_km,
            })
        } else {
            None
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_beta_from_avg_distance() {
        let class = OutputAreaClassification::from_avg_distance("1", 4.0).unwrap();
        assert!((class.beta - 0.25).abs() < 1e-12);
        assert_eq!(class.avg_distance_km, Some(4.0));

        assert!(OutputAreaClassification::from_avg_distance("2", 0.0).is_none());
        assert!(OutputAreaClassification::from_avg_distance("3", f64::NAN).is_none());
    }
}
