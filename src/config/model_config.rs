// ==========================================
// 零售空间交互模型 - 模型参数配置
// ==========================================
// 职责: 距离衰减函数、距离单位、容差等常量
// ==========================================

use crate::config::ConfigError;
use crate::domain::types::DecayFunction;
use serde::{Deserialize, Serialize};

/// 环境变量: 覆盖距离衰减函数 (EXPONENTIAL / POWER)
pub const ENV_DECAY: &str = "RETAIL_SIM_DECAY";

/// 模型参数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// 距离衰减函数
    pub decay: DecayFunction,

    /// 坐标单位换算为公里的除数 (坐标为米时取 1000)
    pub distance_unit_m: f64,

    /// 幂函数衰减的最小距离 (公里),避免 d = 0 时得分无穷大
    pub min_distance_km: f64,

    /// 守恒校验容差 (相对误差)
    pub tolerance: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            decay: DecayFunction::Exponential,
            distance_unit_m: 1000.0,
            min_distance_km: 0.1,
            tolerance: 1e-9,
        }
    }
}

impl SimConfig {
    pub fn with_decay(mut self, decay: DecayFunction) -> Self {
        self.decay = decay;
        self
    }

    /// 校验参数取值范围
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.distance_unit_m.is_finite() && self.distance_unit_m > 0.0) {
            return Err(ConfigError::InvalidValue {
                key: "distance_unit_m".to_string(),
                value: self.distance_unit_m.to_string(),
                message: "必须为正数".to_string(),
            });
        }
        if !(self.min_distance_km.is_finite() && self.min_distance_km > 0.0) {
            return Err(ConfigError::InvalidValue {
                key: "min_distance_km".to_string(),
                value: self.min_distance_km.to_string(),
                message: "必须为正数".to_string(),
            });
        }
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(ConfigError::InvalidValue {
                key: "tolerance".to_string(),
                value: self.tolerance.to_string(),
                message: "必须为正数".to_string(),
            });
        }
        Ok(())
    }

    /// 应用环境变量覆写
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(raw) = std::env::var(ENV_DECAY) {
            self.decay = raw.parse().map_err(|message| ConfigError::InvalidValue {
                key: ENV_DECAY.to_string(),
                value: raw.clone(),
                message,
            })?;
        }
        Ok(())
    }
}
