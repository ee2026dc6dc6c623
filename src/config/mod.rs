// ==========================================
// 零售空间交互模型 - 配置层
// ==========================================
// 职责: 模型参数、运行方案加载
// 存储: JSON 文件 + 环境变量覆写
// ==========================================

pub mod model_config;
pub mod profile;

use thiserror::Error;

// 重导出
pub use model_config::{SimConfig, ENV_DECAY};
pub use profile::{InputPaths, ProfileLoader, RunProfile};

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败 ({path}): {message}")]
    ReadError { path: String, message: String },

    #[error("配置文件解析失败: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("配置值格式错误 (key: {key}, value: {value}): {message}")]
    InvalidValue {
        key: String,
        value: String,
        message: String,
    },
}
