// ==========================================
// 零售空间交互模型 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 策略: 快速失败,错误信息包含表名/行号/字段
// ==========================================

use crate::domain::error::ModelError;
use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件格式不支持: {0}（仅支持 .xlsx/.xls/.csv）")]
    UnsupportedFormat(String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    #[error("Excel 解析失败: {0}")]
    ExcelParseError(String),

    #[error("CSV 解析失败: {0}")]
    CsvParseError(String),

    // ===== 数据映射错误 =====
    #[error("{table} 表缺少必填列: {column}")]
    MissingColumn { table: String, column: String },

    #[error("{table} 表必填字段为空 (行 {row}, 字段 {field})")]
    MissingField {
        table: String,
        row: usize,
        field: String,
    },

    #[error("类型转换失败 ({table} 表, 行 {row}, 字段 {field}): {message}")]
    TypeConversionError {
        table: String,
        row: usize,
        field: String,
        message: String,
    },

    // ===== 数据质量错误 =====
    #[error("数值范围错误 ({table} 表, 行 {row}, 字段 {field}): 值 {value} {message}")]
    ValueRangeError {
        table: String,
        row: usize,
        field: String,
        value: f64,
        message: String,
    },

    #[error("主键重复 ({table} 表, 行 {row}): {key}")]
    DuplicateKey {
        table: String,
        row: usize,
        key: String,
    },

    #[error("{0} 表无数据行")]
    EmptyTable(String),

    // ===== 引用完整性错误 =====
    #[error(transparent)]
    Integrity(#[from] ModelError),
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

// 实现 From<calamine::Error>
impl From<calamine::Error> for ImportError {
    fn from(err: calamine::Error) -> Self {
        ImportError::ExcelParseError(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
