// ==========================================
// 零售空间交互模型 - 引擎层
// ==========================================
// 职责: 吸引力/距离计算、重力模型分配、汇总、情景评估
// 红线: 引擎无状态,不读写文件
// ==========================================

pub mod aggregation;
pub mod allocation;
pub mod attractiveness;
pub mod orchestrator;
pub mod scenario;

// 重导出核心引擎
pub use aggregation::{AggregationEngine, BrandShare, MarketSummary, StoreRevenue};
pub use allocation::GravityModel;
pub use attractiveness::{AttractivenessEngine, StoreScore};
pub use orchestrator::{ModelOrchestrator, ModelRun};
pub use scenario::{BrandImpact, ScenarioEngine, ScenarioOutcome, StoreImpact};
