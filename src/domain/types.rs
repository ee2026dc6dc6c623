// ==========================================
// 零售空间交互模型 - 领域类型定义
// ==========================================
// 职责: 坐标、距离衰减函数等值对象
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// 平面坐标 (British National Grid, 单位: 米)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub easting: f64,
    pub northing: f64,
}

impl Location {
    pub fn new(easting: f64, northing: f64) -> Self {
        Self { easting, northing }
    }

    /// 欧氏距离（与坐标同单位，即米）
    pub fn distance_to(&self, other: &Location) -> f64 {
        let de = self.easting - other.easting;
        let dn = self.northing - other.northing;
        de.hypot(dn)
    }

    pub fn is_finite(&self) -> bool {
        self.easting.is_finite() && self.northing.is_finite()
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.1}, {:.1})", self.easting, self.northing)
    }
}

// ==========================================
// 距离衰减函数 (Distance Decay)
// ==========================================
// 序列化格式: SCREAMING_SNAKE_CASE (与配置文件一致)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DecayFunction {
    /// exp(-beta * d)
    #[default]
    Exponential,
    /// d^(-beta)
    Power,
}

impl fmt::Display for DecayFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecayFunction::Exponential => write!(f, "EXPONENTIAL"),
            DecayFunction::Power => write!(f, "POWER"),
        }
    }
}

impl FromStr for DecayFunction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "EXPONENTIAL" | "EXP" => Ok(DecayFunction::Exponential),
            "POWER" | "POW" => Ok(DecayFunction::Power),
            other => Err(format!("未知的距离衰减函数: {}", other)),
        }
    }
}
