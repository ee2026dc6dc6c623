// ==========================================
// 零售空间交互模型 - 零售网络导入器
// ==========================================
// 导入流程（4 个阶段）:
// 0. 文件读取与解析 (CSV / Excel)
// 1. 表头校验 + 字段映射与类型转换
// 2. DQ 校验 (主键唯一、数值范围)
// 3. 组装 RetailNetwork (引用完整性校验)
// ==========================================

use crate::config::InputPaths;
use crate::domain::network::RetailNetwork;
use crate::domain::store::{Brand, Store};
use crate::domain::zone::{DemandZone, OutputAreaClassification};
use crate::importer::dq_validator::{DqValidator, DqWarning};
use crate::importer::error::ImportResult;
use crate::importer::field_mapper::FieldMapper;
use crate::importer::file_parser::UniversalFileParser;
use crate::importer::importer_trait::{FileParser, InputTable, Mapped, RawRecord, RecordMapper};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};
use uuid::Uuid;

/// 四张表的原始行记录
#[derive(Debug, Clone, Default)]
pub struct RawTables {
    pub brands: Vec<RawRecord>,
    pub classifications: Vec<RawRecord>,
    pub zones: Vec<RawRecord>,
    pub stores: Vec<RawRecord>,
}

/// 导入报告
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportReport {
    pub batch_id: String,
    pub imported_at: DateTime<Utc>,
    pub brand_count: usize,
    pub classification_count: usize,
    pub zone_count: usize,
    pub store_count: usize,
    pub total_expenditure: f64,
    pub warnings: Vec<DqWarning>,
}

/// 导入结果
#[derive(Debug, Clone)]
pub struct ImportedNetwork {
    pub network: RetailNetwork,
    pub report: ImportReport,
}

// ==========================================
// NetworkImporter
// ==========================================
pub struct NetworkImporter<P: FileParser = UniversalFileParser> {
    parser: P,
    mapper: FieldMapper,
    validator: DqValidator,
}

impl NetworkImporter<UniversalFileParser> {
    pub fn new() -> Self {
        Self::with_parser(UniversalFileParser)
    }
}

impl Default for NetworkImporter<UniversalFileParser> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: FileParser> NetworkImporter<P> {
    pub fn with_parser(parser: P) -> Self {
        Self {
            parser,
            mapper: FieldMapper::new(),
            validator: DqValidator::default(),
        }
    }

    pub fn with_validator(mut self, validator: DqValidator) -> Self {
        self.validator = validator;
        self
    }

    /// 从文件导入
    pub fn import(&self, paths: &InputPaths) -> ImportResult<ImportedNetwork> {
        let tables = RawTables {
            brands: self.parse(InputTable::Brands, &paths.brands)?,
            classifications: self.parse(InputTable::Classifications, &paths.classifications)?,
            zones: self.parse(InputTable::Zones, &paths.zones)?,
            stores: self.parse(InputTable::Stores, &paths.stores)?,
        };
        self.import_records(tables)
    }

    fn parse(&self, table: InputTable, path: &Path) -> ImportResult<Vec<RawRecord>> {
        let records = self.parser.parse_to_raw_records(path)?;
        debug!(table = %table, path = %path.display(), rows = records.len(), "文件解析完成");
        Ok(records)
    }

    /// 从已解析的行记录导入
    pub fn import_records(&self, tables: RawTables) -> ImportResult<ImportedNetwork> {
        let batch_id = Uuid::new_v4().to_string();

        // 阶段 1: 表头校验 + 字段映射
        self.mapper.check_columns(InputTable::Brands, &tables.brands)?;
        self.mapper.check_columns(InputTable::Classifications, &tables.classifications)?;
        self.mapper.check_columns(InputTable::Zones, &tables.zones)?;
        self.mapper.check_columns(InputTable::Stores, &tables.stores)?;

        let brands: Vec<Mapped<Brand>> =
            RecordMapper::<Brand>::map_all(&self.mapper, &tables.brands)?;
        let classifications: Vec<Mapped<OutputAreaClassification>> =
            RecordMapper::<OutputAreaClassification>::map_all(&self.mapper, &tables.classifications)?;
        let zones: Vec<Mapped<DemandZone>> =
            RecordMapper::<DemandZone>::map_all(&self.mapper, &tables.zones)?;
        let stores: Vec<Mapped<Store>> =
            RecordMapper::<Store>::map_all(&self.mapper, &tables.stores)?;

        // 阶段 2: DQ 校验
        let mut warnings = Vec::new();
        warnings.extend(self.validator.validate_brands(&brands)?);
        warnings.extend(self.validator.validate_classifications(&classifications)?);
        warnings.extend(self.validator.validate_zones(&zones)?);
        warnings.extend(self.validator.validate_stores(&stores)?);

        // 阶段 3: 组装网络 (引用完整性)
        let network = RetailNetwork::new(
            unwrap_mapped(brands),
            unwrap_mapped(classifications),
            unwrap_mapped(zones),
            unwrap_mapped(stores),
        )?;

        let report = ImportReport {
            batch_id,
            imported_at: Utc::now(),
            brand_count: network.brands().len(),
            classification_count: network.classifications().len(),
            zone_count: network.zones().len(),
            store_count: network.stores().len(),
            total_expenditure: network.total_expenditure(),
            warnings,
        };

        info!(
            batch_id = %report.batch_id,
            brands = report.brand_count,
            classifications = report.classification_count,
            zones = report.zone_count,
            stores = report.store_count,
            warnings = report.warnings.len(),
            "零售网络导入完成"
        );

        Ok(ImportedNetwork { network, report })
    }
}

fn unwrap_mapped<T>(rows: Vec<Mapped<T>>) -> Vec<T> {
    rows.into_iter().map(|m| m.record).collect()
}
