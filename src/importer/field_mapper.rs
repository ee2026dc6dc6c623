// ==========================================
// 零售空间交互模型 - 字段映射器实现
// ==========================================
// 阶段 1: 源字段 → 领域实体 + 类型转换
// 列名支持别名 (兼容原始课程数据的列名)
// ==========================================

use crate::domain::store::{Brand, Store};
use crate::domain::types::Location;
use crate::domain::zone::{DemandZone, OutputAreaClassification};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::importer_trait::{InputTable, RawRecord, RecordMapper};

pub struct FieldMapper;

impl FieldMapper {
    pub fn new() -> Self {
        Self
    }

    /// 标准列名 → 可接受的别名
    fn aliases(key: &str) -> &'static [&'static str] {
        match key {
            "brand_name" => &["name", "brand"],
            "alpha" => &["alpha"],
            "observed_share" => &["obs_shares", "observed_share"],
            "class_code" => &["class_no", "oac", "code"],
            "class_name" => &["name"],
            "beta" => &["beta"],
            "avg_distance_km" => &["avg_distance_km", "avg_distance"],
            "zone_code" => &["OA11CD", "zone_code"],
            "expenditure" => &["expenditure", "spend"],
            "zone_class" => &["oac", "class_code"],
            "zone_easting" => &["c_easting", "easting"],
            "zone_northing" => &["c_northing", "northing"],
            "store_id" => &["name", "store_id"],
            "store_brand" => &["brand"],
            "easting" => &["easting"],
            "northing" => &["northing"],
            "floorspace" => &["footage", "floorspace"],
            _ => &[],
        }
    }

    /// 报错时使用的列名 (首选别名)
    fn column_name(key: &str) -> String {
        Self::aliases(key).first().copied().unwrap_or(key).to_string()
    }

    /// 校验表头包含必填列 (任一别名即可)
    pub fn check_columns(&self, table: InputTable, records: &[RawRecord]) -> ImportResult<()> {
        let required: &[&str] = match table {
            InputTable::Brands => &["brand_name"],
            InputTable::Classifications => &["class_code"],
            InputTable::Zones => &["zone_code", "expenditure", "zone_class", "zone_easting", "zone_northing"],
            InputTable::Stores => &["store_id", "store_brand", "easting", "northing", "floorspace"],
        };

        if records.is_empty() {
            return Err(ImportError::EmptyTable(table.to_string()));
        }

        for key in required {
            let present = records
                .iter()
                .any(|r| Self::aliases(key).iter().any(|a| r.fields.contains_key(*a)));
            if !present {
                return Err(ImportError::MissingColumn {
                    table: table.to_string(),
                    column: Self::column_name(key),
                });
            }
        }
        Ok(())
    }

    /// 提取字符串字段 (按别名顺序,空值视为缺失)
    fn get_string(&self, record: &RawRecord, key: &str) -> Option<String> {
        Self::aliases(key).iter().find_map(|alias| {
            record
                .fields
                .get(*alias)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        })
    }

    fn require_string(&self, table: InputTable, record: &RawRecord, key: &str) -> ImportResult<String> {
        self.get_string(record, key)
            .ok_or_else(|| ImportError::MissingField {
                table: table.to_string(),
                row: record.row_number,
                field: Self::column_name(key),
            })
    }

    /// 解析浮点数 (允许千分位逗号,如 "12,000"; "1,5" 视为非法)
    fn parse_f64(&self, table: InputTable, record: &RawRecord, key: &str) -> ImportResult<Option<f64>> {
        match self.get_string(record, key) {
            None => Ok(None),
            Some(value) => strip_thousands(&value)
                .and_then(|v| v.parse::<f64>().ok())
                .map(Some)
                .ok_or_else(|| ImportError::TypeConversionError {
                    table: table.to_string(),
                    row: record.row_number,
                    field: Self::column_name(key),
                    message: format!("无法解析为浮点数: {}", value),
                }),
        }
    }

    fn require_f64(&self, table: InputTable, record: &RawRecord, key: &str) -> ImportResult<f64> {
        self.parse_f64(table, record, key)?
            .ok_or_else(|| ImportError::MissingField {
                table: table.to_string(),
                row: record.row_number,
                field: Self::column_name(key),
            })
    }
}

/// 去除千分位逗号; 逗号不符合 "1,234,567.89" 分组格式时返回 None
fn strip_thousands(value: &str) -> Option<String> {
    if !value.contains(',') {
        return Some(value.to_string());
    }

    let unsigned = value.strip_prefix(['-', '+']).unwrap_or(value);
    let integer = unsigned.split_once('.').map_or(unsigned, |(int, _)| int);

    let mut groups = integer.split(',');
    let head = groups.next().unwrap_or("");
    let all_digits = |g: &str| g.bytes().all(|b| b.is_ascii_digit());
    let head_ok = (1..=3).contains(&head.len()) && all_digits(head);
    let tail_ok = groups.all(|g| g.len() == 3 && all_digits(g));
    let fraction_ok = !unsigned
        .split_once('.')
        .is_some_and(|(_, frac)| frac.contains(','));

    if head_ok && tail_ok && fraction_ok {
        Some(value.replace(',', ""))
    } else {
        None
    }
}

impl Default for FieldMapper {
    fn default() -> Self {
        Self::new()
    }
}

// ==========================================
// brands: name, alpha, obs_shares
// ==========================================
impl RecordMapper<Brand> for FieldMapper {
    fn map_record(&self, record: &RawRecord) -> ImportResult<Brand> {
        let table = InputTable::Brands;
        Ok(Brand {
            name: self.require_string(table, record, "brand_name")?,
            alpha: self.parse_f64(table, record, "alpha")?.unwrap_or(1.0),
            observed_share: self.parse_f64(table, record, "observed_share")?,
        })
    }
}

// ==========================================
// classifications: class_no, name, beta | avg_distance_km
// ==========================================
impl RecordMapper<OutputAreaClassification> for FieldMapper {
    fn map_record(&self, record: &RawRecord) -> ImportResult<OutputAreaClassification> {
        let table = InputTable::Classifications;
        let class_code = self.require_string(table, record, "class_code")?;
        let name = self.get_string(record, "class_name");
        let avg_distance_km = self.parse_f64(table, record, "avg_distance_km")?;

        let beta = match (self.parse_f64(table, record, "beta")?, avg_distance_km) {
            (Some(beta), _) => beta,
            (None, Some(avg)) => {
                OutputAreaClassification::from_avg_distance(class_code.clone(), avg)
                    .map(|c| c.beta)
                    .ok_or_else(|| ImportError::ValueRangeError {
                        table: table.to_string(),
                        row: record.row_number,
                        field: "avg_distance_km".to_string(),
                        value: avg,
                        message: "平均出行距离必须为正数".to_string(),
                    })?
            }
            (None, None) => {
                return Err(ImportError::MissingField {
                    table: table.to_string(),
                    row: record.row_number,
                    field: "beta".to_string(),
                })
            }
        };

        Ok(OutputAreaClassification {
            class_code,
            name,
            avg_distance_km,
            beta,
        })
    }
}

// ==========================================
// zones: OA11CD, expenditure, oac, c_easting, c_northing
// ==========================================
impl RecordMapper<DemandZone> for FieldMapper {
    fn map_record(&self, record: &RawRecord) -> ImportResult<DemandZone> {
        let table = InputTable::Zones;
        Ok(DemandZone {
            zone_code: self.require_string(table, record, "zone_code")?,
            expenditure: self.require_f64(table, record, "expenditure")?,
            class_code: self.require_string(table, record, "zone_class")?,
            centroid: Location::new(
                self.require_f64(table, record, "zone_easting")?,
                self.require_f64(table, record, "zone_northing")?,
            ),
        })
    }
}

// ==========================================
// stores: name, brand, easting, northing, footage
// ==========================================
impl RecordMapper<Store> for FieldMapper {
    fn map_record(&self, record: &RawRecord) -> ImportResult<Store> {
        let table = InputTable::Stores;
        Ok(Store {
            store_id: self.require_string(table, record, "store_id")?,
            brand: self.require_string(table, record, "store_brand")?,
            location: Location::new(
                self.require_f64(table, record, "easting")?,
                self.require_f64(table, record, "northing")?,
            ),
            floorspace_sqft: self.require_f64(table, record, "floorspace")?,
        })
    }
}
