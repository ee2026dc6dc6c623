// ==========================================
// 零售空间交互模型 - 零售网络 (索引化实体集合)
// ==========================================
// 职责: 持有全部实体,建立主键索引,校验引用完整性
// 红线: 构造成功即保证所有外键可解析
// ==========================================

use crate::domain::error::{ModelError, ModelResult};
use crate::domain::store::{Brand, Store};
use crate::domain::types::Location;
use crate::domain::zone::{DemandZone, OutputAreaClassification};
use std::collections::{HashMap, HashSet};
use tracing::debug;

// ==========================================
// RetailNetwork
// ==========================================
// 门店/需求区保持输入顺序 (流量矩阵的行列顺序)
#[derive(Debug, Clone)]
pub struct RetailNetwork {
    brands: Vec<Brand>,
    classifications: Vec<OutputAreaClassification>,
    zones: Vec<DemandZone>,
    stores: Vec<Store>,

    brand_index: HashMap<String, usize>,
    class_index: HashMap<String, usize>,
    store_index: HashMap<String, usize>,
}

impl RetailNetwork {
    /// 构造并校验
    ///
    /// # 校验
    /// - 各表主键唯一
    /// - 品牌 alpha、分类 beta 为非负有限值
    /// - 门店面积、需求区消费额为非负有限值,坐标有限
    /// - 门店品牌、需求区分类可解析
    pub fn new(
        brands: Vec<Brand>,
        classifications: Vec<OutputAreaClassification>,
        zones: Vec<DemandZone>,
        stores: Vec<Store>,
    ) -> ModelResult<Self> {
        let brand_index = build_index("Brand", brands.iter().map(|b| b.name.as_str()))?;
        let class_index = build_index(
            "OutputAreaClassification",
            classifications.iter().map(|c| c.class_code.as_str()),
        )?;
        let store_index = build_index("Store", stores.iter().map(|s| s.store_id.as_str()))?;
        build_index("DemandZone", zones.iter().map(|z| z.zone_code.as_str()))?;

        for brand in &brands {
            check_non_negative("Brand", &brand.name, "alpha", brand.alpha)?;
        }
        for class in &classifications {
            check_non_negative("OutputAreaClassification", &class.class_code, "beta", class.beta)?;
        }

        for store in &stores {
            check_non_negative("Store", &store.store_id, "floorspace", store.floorspace_sqft)?;
            check_location("Store", &store.store_id, &store.location)?;
            if !brand_index.contains_key(&store.brand) {
                return Err(ModelError::UnknownBrand {
                    store_id: store.store_id.clone(),
                    brand: store.brand.clone(),
                });
            }
        }

        for zone in &zones {
            check_non_negative("DemandZone", &zone.zone_code, "expenditure", zone.expenditure)?;
            check_location("DemandZone", &zone.zone_code, &zone.centroid)?;
            if !class_index.contains_key(&zone.class_code) {
                return Err(ModelError::UnknownClassification {
                    zone_code: zone.zone_code.clone(),
                    class_code: zone.class_code.clone(),
                });
            }
        }

        debug!(
            brands = brands.len(),
            classifications = classifications.len(),
            zones = zones.len(),
            stores = stores.len(),
            "零售网络校验通过"
        );

        Ok(Self {
            brands,
            classifications,
            zones,
            stores,
            brand_index,
            class_index,
            store_index,
        })
    }

    // ==========================================
    // 查询
    // ==========================================

    pub fn brands(&self) -> &[Brand] {
        &self.brands
    }

    pub fn classifications(&self) -> &[OutputAreaClassification] {
        &self.classifications
    }

    pub fn zones(&self) -> &[DemandZone] {
        &self.zones
    }

    pub fn stores(&self) -> &[Store] {
        &self.stores
    }

    pub fn brand(&self, name: &str) -> Option<&Brand> {
        self.brand_index.get(name).map(|&i| &self.brands[i])
    }

    pub fn classification(&self, class_code: &str) -> Option<&OutputAreaClassification> {
        self.class_index.get(class_code).map(|&i| &self.classifications[i])
    }

    pub fn store(&self, store_id: &str) -> Option<&Store> {
        self.store_index.get(store_id).map(|&i| &self.stores[i])
    }

    /// 门店在矩阵中的列号
    pub fn store_position(&self, store_id: &str) -> Option<usize> {
        self.store_index.get(store_id).copied()
    }

    /// 门店所属品牌 (构造时已校验,必然存在)
    pub fn brand_of(&self, store: &Store) -> ModelResult<&Brand> {
        self.brand(&store.brand).ok_or_else(|| ModelError::UnknownBrand {
            store_id: store.store_id.clone(),
            brand: store.brand.clone(),
        })
    }

    /// 需求区所属分类 (构造时已校验,必然存在)
    pub fn classification_of(&self, zone: &DemandZone) -> ModelResult<&OutputAreaClassification> {
        self.classification(&zone.class_code)
            .ok_or_else(|| ModelError::UnknownClassification {
                zone_code: zone.zone_code.clone(),
                class_code: zone.class_code.clone(),
            })
    }

    /// 品牌旗下门店
    pub fn stores_of_brand<'a>(&'a self, brand: &'a str) -> impl Iterator<Item = &'a Store> + 'a {
        self.stores.iter().filter(move |s| s.brand == brand)
    }

    pub fn total_expenditure(&self) -> f64 {
        self.zones.iter().map(|z| z.expenditure).sum()
    }

    /// 增加一家门店,返回新网络 (原网络不变)
    pub fn with_store(&self, store: Store) -> ModelResult<Self> {
        let mut stores = self.stores.clone();
        stores.push(store);
        Self::new(
            self.brands.clone(),
            self.classifications.clone(),
            self.zones.clone(),
            stores,
        )
    }
}

// ==========================================
// 校验辅助函数
// ==========================================

fn build_index<'a>(
    entity: &str,
    ids: impl Iterator<Item = &'a str>,
) -> ModelResult<HashMap<String, usize>> {
    let mut index = HashMap::new();
    let mut seen = HashSet::new();
    for (i, id) in ids.enumerate() {
        if !seen.insert(id) {
            return Err(ModelError::DuplicateId {
                entity: entity.to_string(),
                id: id.to_string(),
            });
        }
        index.insert(id.to_string(), i);
    }
    Ok(index)
}

fn check_non_negative(entity: &str, id: &str, field: &str, value: f64) -> ModelResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ModelError::InvalidParameter {
            entity: entity.to_string(),
            id: id.to_string(),
            field: field.to_string(),
            value,
        })
    }
}

fn check_location(entity: &str, id: &str, location: &Location) -> ModelResult<()> {
    if location.is_finite() {
        return Ok(());
    }
    let (field, value) = if location.easting.is_finite() {
        ("northing", location.northing)
    } else {
        ("easting", location.easting)
    };
    Err(ModelError::InvalidParameter {
        entity: entity.to_string(),
        id: id.to_string(),
        field: field.to_string(),
        value,
    })
}
