// ==========================================
// 零售空间交互模型 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型、错误
// 红线: 不含文件读取逻辑,不含模型计算逻辑
// ==========================================

pub mod error;
pub mod flow;
pub mod network;
pub mod store;
pub mod types;
pub mod zone;

// 重导出核心类型
pub use error::{ModelError, ModelResult};
pub use flow::{FlowMatrix, ZoneAllocation};
pub use network::RetailNetwork;
pub use store::{Brand, Store};
pub use types::{DecayFunction, Location};
pub use zone::{DemandZone, OutputAreaClassification};
