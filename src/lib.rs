// ==========================================
// 零售空间交互模型 (Retail SIM) - 核心库
// ==========================================
// 模型: 生产约束型重力模型
// 输入: 品牌 / 人口分类 / 需求区 / 门店 四张表
// 输出: 需求区 → 门店 消费流,门店营业额,品牌市场份额
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 模型计算
pub mod engine;

// 导入层 - 外部数据
pub mod importer;

// 配置层 - 模型参数与运行方案
pub mod config;

// 导出层 - 结果文件
pub mod export;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域实体
pub use domain::{
    Brand, DecayFunction, DemandZone, FlowMatrix, Location, ModelError, ModelResult,
    OutputAreaClassification, RetailNetwork, Store, ZoneAllocation,
};

// 引擎
pub use engine::{
    AggregationEngine, AttractivenessEngine, GravityModel, MarketSummary, ModelOrchestrator,
    ModelRun, ScenarioEngine, StoreImpact,
};

// 导入
pub use importer::{ImportError, ImportedNetwork, NetworkImporter};

// 配置
pub use config::{ProfileLoader, RunProfile, SimConfig};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "零售空间交互模型";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
