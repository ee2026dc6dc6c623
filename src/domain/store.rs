// ==========================================
// 零售空间交互模型 - 门店与品牌领域模型
// ==========================================
// 职责: 供给侧实体 (Store / Brand)
// 红线: 加载后不可变,运行期间只读
// ==========================================

use crate::domain::types::Location;
use serde::{Deserialize, Serialize};

// ==========================================
// Store - 门店
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Store {
    pub store_id: String,       // 门店名 (唯一)
    pub brand: String,          // 所属品牌名 (外键 → Brand)
    pub location: Location,     // 门店坐标
    pub floorspace_sqft: f64,   // 营业面积 (平方英尺)
}

impl Store {
    pub fn new(
        store_id: impl Into<String>,
        brand: impl Into<String>,
        location: Location,
        floorspace_sqft: f64,
    ) -> Self {
        Self {
            store_id: store_id.into(),
            brand: brand.into(),
            location,
            floorspace_sqft,
        }
    }

    /// 坪效: 营业额 / 面积
    ///
    /// 面积为 0 时无意义,返回 None
    pub fn trading_intensity(&self, revenue: f64) -> Option<f64> {
        if self.floorspace_sqft > 0.0 {
            Some(revenue / self.floorspace_sqft)
        } else {
            None
        }
    }
}

// ==========================================
// Brand - 品牌
// ==========================================
// 门店通过 brand 名称反向引用,品牌不持有门店
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brand {
    pub name: String,
    pub alpha: f64,                   // 相对吸引力指数 (作用于面积)
    pub observed_share: Option<f64>,  // 实测市场份额 (校准用,可选)
}

impl Brand {
    pub fn new(name: impl Into<String>, alpha: f64) -> Self {
        Self {
            name: name.into(),
            alpha,
            observed_share: None,
        }
    }

    pub fn with_observed_share(mut self, share: f64) -> Self {
        self.observed_share = Some(share);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trading_intensity() {
        let store = Store::new("S1", "Tesco", Location::new(0.0, 0.0), 2000.0);
        assert_eq!(store.trading_intensity(10000.0), Some(5.0));

        let empty = Store::new("S2", "Tesco", Location::new(0.0, 0.0), 0.0);
        assert_eq!(empty.trading_intensity(10000.0), None);
    }
}
