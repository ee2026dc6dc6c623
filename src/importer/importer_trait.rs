// ==========================================
// 零售空间交互模型 - 导入接口
// ==========================================
// 职责: 定义导入管道各阶段接口（不包含实现）
// ==========================================

use crate::importer::error::ImportResult;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

// ==========================================
// 输入表
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InputTable {
    Brands,
    Classifications,
    Zones,
    Stores,
}

impl fmt::Display for InputTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputTable::Brands => write!(f, "brands"),
            InputTable::Classifications => write!(f, "classifications"),
            InputTable::Zones => write!(f, "zones"),
            InputTable::Stores => write!(f, "stores"),
        }
    }
}

// ==========================================
// 原始行记录
// ==========================================
// row_number: 文件中的行号 (表头为第 1 行)
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    pub row_number: usize,
    pub fields: HashMap<String, String>,
}

/// 映射后的记录 (保留行号供 DQ 报错)
#[derive(Debug, Clone, PartialEq)]
pub struct Mapped<T> {
    pub row_number: usize,
    pub record: T,
}

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 文件解析接口（阶段 0）
// 实现者: CsvParser, ExcelParser
pub trait FileParser: Send + Sync {
    /// 解析文件为原始行记录
    ///
    /// # 返回
    /// - Ok(Vec<RawRecord>): 行记录列表 (已跳过全空行)
    /// - Err: 文件读取错误、格式错误
    fn parse_to_raw_records(&self, file_path: &Path) -> ImportResult<Vec<RawRecord>>;
}

// ==========================================
// RecordMapper Trait
// ==========================================
// 用途: 字段映射接口（阶段 1）
// 实现者: FieldMapper
pub trait RecordMapper<T>: Send + Sync {
    /// 将原始行记录映射为领域实体
    ///
    /// # 错误
    /// - MissingField: 必填字段为空
    /// - TypeConversionError: 数值字段无法解析
    fn map_record(&self, record: &RawRecord) -> ImportResult<T>;

    fn map_all(&self, records: &[RawRecord]) -> ImportResult<Vec<Mapped<T>>> {
        records
            .iter()
            .map(|r| {
                Ok(Mapped {
                    row_number: r.row_number,
                    record: self.map_record(r)?,
                })
            })
            .collect()
    }
}
