// ==========================================
// 零售空间交互模型 - 流量矩阵
// ==========================================
// 行: 需求区 (输入顺序)
// 列: 门店 (输入顺序)
// 值: 需求区 → 门店 每周消费流
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// ZoneAllocation - 单个需求区的分配结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneAllocation {
    pub zone_code: String,
    pub expenditure: f64,
    pub balancing_factor: f64,   // A_i = 1 / Σ score
    pub probabilities: Vec<f64>, // 与门店列一一对应
    pub flows: Vec<f64>,         // probability * expenditure
}

impl ZoneAllocation {
    pub fn allocated_total(&self) -> f64 {
        self.flows.iter().sum()
    }
}

// ==========================================
// FlowMatrix
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowMatrix {
    pub store_ids: Vec<String>,
    pub store_brands: Vec<String>,
    pub rows: Vec<ZoneAllocation>,
}

impl FlowMatrix {
    pub fn store_count(&self) -> usize {
        self.store_ids.len()
    }

    pub fn zone_count(&self) -> usize {
        self.rows.len()
    }

    pub fn store_column(&self, store_id: &str) -> Option<usize> {
        self.store_ids.iter().position(|id| id == store_id)
    }

    pub fn zone_row(&self, zone_code: &str) -> Option<&ZoneAllocation> {
        self.rows.iter().find(|r| r.zone_code == zone_code)
    }

    /// 单元格: 需求区 → 门店
    pub fn flow(&self, zone_code: &str, store_id: &str) -> Option<f64> {
        let col = self.store_column(store_id)?;
        self.zone_row(zone_code).map(|r| r.flows[col])
    }

    /// 门店营业额 (列和)
    pub fn store_revenue(&self, store_id: &str) -> Option<f64> {
        let col = self.store_column(store_id)?;
        Some(self.rows.iter().map(|r| r.flows[col]).sum())
    }

    /// 全部门店营业额,按列顺序
    pub fn store_revenues(&self) -> Vec<f64> {
        let mut totals = vec![0.0; self.store_count()];
        for row in &self.rows {
            for (total, flow) in totals.iter_mut().zip(&row.flows) {
                *total += flow;
            }
        }
        totals
    }

    pub fn total_revenue(&self) -> f64 {
        self.rows.iter().map(|r| r.allocated_total()).sum()
    }

    /// 某门店的客源分布 (需求区, 流量),按流量降序
    pub fn catchment(&self, store_id: &str) -> Option<Vec<(String, f64)>> {
        let col = self.store_column(store_id)?;
        let mut entries: Vec<(String, f64)> = self
            .rows
            .iter()
            .map(|r| (r.zone_code.clone(), r.flows[col]))
            .collect();
        entries.sort_by(|a, b| b.1.total_cmp(&a.1));
        Some(entries)
    }
}
