// ==========================================
// 零售空间交互模型 - 导入层
// ==========================================
// 职责: 外部表格数据 → RetailNetwork
// 支持: CSV, Excel
// ==========================================

pub mod dq_validator;
pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod importer_trait;
pub mod network_importer;

// 重导出核心类型
pub use dq_validator::{DqValidator, DqWarning};
pub use error::{ImportError, ImportResult};
pub use field_mapper::FieldMapper;
pub use file_parser::{CsvParser, ExcelParser, UniversalFileParser};
pub use importer_trait::{FileParser, InputTable, Mapped, RawRecord, RecordMapper};
pub use network_importer::{ImportReport, ImportedNetwork, NetworkImporter, RawTables};
