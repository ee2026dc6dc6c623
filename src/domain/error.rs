// ==========================================
// 零售空间交互模型 - 模型错误类型
// ==========================================
// 工具: thiserror 派生宏
// 策略: 快速失败,错误信息指明出错记录
// ==========================================

use thiserror::Error;

/// 模型层错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    // ===== 引用完整性错误 =====
    #[error("门店 {store_id} 引用了不存在的品牌: {brand}")]
    UnknownBrand { store_id: String, brand: String },

    #[error("需求区 {zone_code} 引用了不存在的分类代码: {class_code}")]
    UnknownClassification { zone_code: String, class_code: String },

    #[error("{entity} 主键重复: {id}")]
    DuplicateId { entity: String, id: String },

    #[error("门店不存在: {0}")]
    UnknownStore(String),

    // ===== 参数错误 =====
    #[error("参数非法 ({entity} {id}, 字段 {field}): {value}")]
    InvalidParameter {
        entity: String,
        id: String,
        field: String,
        value: f64,
    },

    // ===== 分配退化错误 =====
    #[error("需求区 {zone_code} 无可分配门店: 所有门店得分为 0")]
    NoViableDestination { zone_code: String },

    #[error("需求区 {zone_code} 对门店 {store_id} 的得分非有限值: {score}")]
    NonFiniteScore {
        zone_code: String,
        store_id: String,
        score: f64,
    },

    // ===== 守恒校验 =====
    #[error("消费守恒校验失败: 总营业额 {total_revenue:.4} ≠ 总消费 {total_expenditure:.4}")]
    ConservationViolated {
        total_revenue: f64,
        total_expenditure: f64,
    },
}

impl ModelError {
    /// 是否属于引用完整性类错误
    pub fn is_integrity_error(&self) -> bool {
        matches!(
            self,
            ModelError::UnknownBrand { .. }
                | ModelError::UnknownClassification { .. }
                | ModelError::DuplicateId { .. }
                | ModelError::UnknownStore(_)
        )
    }
}

/// Result 类型别名
pub type ModelResult<T> = Result<T, ModelError>;
