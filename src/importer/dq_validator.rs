// ==========================================
// 零售空间交互模型 - 数据质量校验器实现
// ==========================================
// 阶段 2: 主键唯一、数值范围校验
// 策略: ERROR 级别快速失败; WARNING 级别收集后写入导入报告
// ==========================================

use crate::domain::store::{Brand, Store};
use crate::domain::zone::{DemandZone, OutputAreaClassification};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::importer_trait::{InputTable, Mapped};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::warn;

/// DQ 警告 (不阻断导入)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DqWarning {
    pub table: InputTable,
    pub row_number: Option<usize>,
    pub field: String,
    pub message: String,
}

pub struct DqValidator {
    share_tolerance: f64, // 实测份额之和偏离 1 的容忍度
}

impl DqValidator {
    pub fn new(share_tolerance: f64) -> Self {
        Self { share_tolerance }
    }

    // ==========================================
    // 通用规则
    // ==========================================

    /// 主键唯一 (同表内)
    fn check_unique<'a, T>(
        &self,
        table: InputTable,
        rows: &'a [Mapped<T>],
        key: impl Fn(&'a T) -> &'a str,
    ) -> ImportResult<()> {
        let mut seen = HashSet::new();
        for row in rows {
            let id = key(&row.record);
            if !seen.insert(id) {
                return Err(ImportError::DuplicateKey {
                    table: table.to_string(),
                    row: row.row_number,
                    key: id.to_string(),
                });
            }
        }
        Ok(())
    }

    /// 非负有限值
    fn check_non_negative(
        &self,
        table: InputTable,
        row: usize,
        field: &str,
        value: f64,
    ) -> ImportResult<()> {
        if !value.is_finite() {
            return Err(ImportError::ValueRangeError {
                table: table.to_string(),
                row,
                field: field.to_string(),
                value,
                message: "不是有限数值".to_string(),
            });
        }
        if value < 0.0 {
            return Err(ImportError::ValueRangeError {
                table: table.to_string(),
                row,
                field: field.to_string(),
                value,
                message: "不能为负数".to_string(),
            });
        }
        Ok(())
    }

    fn check_finite(&self, table: InputTable, row: usize, field: &str, value: f64) -> ImportResult<()> {
        if value.is_finite() {
            Ok(())
        } else {
            Err(ImportError::ValueRangeError {
                table: table.to_string(),
                row,
                field: field.to_string(),
                value,
                message: "不是有限数值".to_string(),
            })
        }
    }

    fn warn(&self, warnings: &mut Vec<DqWarning>, warning: DqWarning) {
        warn!(
            table = %warning.table,
            row = ?warning.row_number,
            field = %warning.field,
            "{}",
            warning.message
        );
        warnings.push(warning);
    }

    // ==========================================
    // 各表规则
    // ==========================================

    pub fn validate_brands(&self, rows: &[Mapped<Brand>]) -> ImportResult<Vec<DqWarning>> {
        let table = InputTable::Brands;
        self.check_unique(table, rows, |b| b.name.as_str())?;

        let mut warnings = Vec::new();
        for row in rows {
            self.check_non_negative(table, row.row_number, "alpha", row.record.alpha)?;
            if let Some(share) = row.record.observed_share {
                if !(0.0..=1.0).contains(&share) {
                    return Err(ImportError::ValueRangeError {
                        table: table.to_string(),
                        row: row.row_number,
                        field: "obs_shares".to_string(),
                        value: share,
                        message: "超出范围 [0, 1]".to_string(),
                    });
                }
            }
        }

        // 实测份额: 全部给出时之和应为 1
        let shares: Vec<f64> = rows.iter().filter_map(|r| r.record.observed_share).collect();
        if !shares.is_empty() && shares.len() == rows.len() {
            let total: f64 = shares.iter().sum();
            if (total - 1.0).abs() > self.share_tolerance {
                self.warn(
                    &mut warnings,
                    DqWarning {
                        table,
                        row_number: None,
                        field: "obs_shares".to_string(),
                        message: format!("实测份额之和为 {:.4},偏离 1", total),
                    },
                );
            }
        }

        Ok(warnings)
    }

    pub fn validate_classifications(
        &self,
        rows: &[Mapped<OutputAreaClassification>],
    ) -> ImportResult<Vec<DqWarning>> {
        let table = InputTable::Classifications;
        self.check_unique(table, rows, |c| c.class_code.as_str())?;
        for row in rows {
            self.check_non_negative(table, row.row_number, "beta", row.record.beta)?;
        }
        Ok(Vec::new())
    }

    pub fn validate_zones(&self, rows: &[Mapped<DemandZone>]) -> ImportResult<Vec<DqWarning>> {
        let table = InputTable::Zones;
        self.check_unique(table, rows, |z| z.zone_code.as_str())?;

        let mut warnings = Vec::new();
        for row in rows {
            let zone = &row.record;
            self.check_non_negative(table, row.row_number, "expenditure", zone.expenditure)?;
            self.check_finite(table, row.row_number, "c_easting", zone.centroid.easting)?;
            self.check_finite(table, row.row_number, "c_northing", zone.centroid.northing)?;
            if zone.expenditure == 0.0 {
                self.warn(
                    &mut warnings,
                    DqWarning {
                        table,
                        row_number: Some(row.row_number),
                        field: "expenditure".to_string(),
                        message: format!("需求区 {} 消费额为 0", zone.zone_code),
                    },
                );
            }
        }
        Ok(warnings)
    }

    pub fn validate_stores(&self, rows: &[Mapped<Store>]) -> ImportResult<Vec<DqWarning>> {
        let table = InputTable::Stores;
        self.check_unique(table, rows, |s| s.store_id.as_str())?;

        let mut warnings = Vec::new();
        for row in rows {
            let store = &row.record;
            self.check_non_negative(table, row.row_number, "footage", store.floorspace_sqft)?;
            self.check_finite(table, row.row_number, "easting", store.location.easting)?;
            self.check_finite(table, row.row_number, "northing", store.location.northing)?;
            if store.floorspace_sqft == 0.0 {
                self.warn(
                    &mut warnings,
                    DqWarning {
                        table,
                        row_number: Some(row.row_number),
                        field: "footage".to_string(),
                        message: format!("门店 {} 面积为 0,不参与分配", store.store_id),
                    },
                );
            }
        }
        Ok(warnings)
    }
}

impl Default for DqValidator {
    fn default() -> Self {
        Self::new(0.01)
    }
}
