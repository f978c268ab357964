// ==========================================
// 临床试验DSS - 中心遴选数据导入
// ==========================================
// 职责: 三张遴选输入表的CSV解析与字段映射
// 输入: sites_and_investigators / historical_performance / patient_density
// 红线: 只负责解析与映射,不做业务过滤
// ==========================================

use crate::domain::site::{AccessRecord, PerformanceRecord, Site};
use crate::domain::types::SiteType;
use crate::importer::read_csv;
use serde::Deserialize;
use std::path::Path;
use tracing::info;

// ==========================================
// 原始行结构 (与CSV表头一一对应)
// ==========================================

/// sites_and_investigators.csv 原始行
///
/// therapeutic_areas 列为分号分隔的标签串,映射时拆分
#[derive(Debug, Deserialize)]
struct SiteRow {
    site_id: String,
    site_name: String,
    city: String,
    state: String,
    site_type: SiteType,
    therapeutic_areas: String,
    pi_name: String,
    pi_experience_years: i32,
    beds: i32,
}

// ==========================================
// 装载入口
// ==========================================

/// 装载中心主数据表
///
/// # 字段映射
/// - therapeutic_areas: "Oncology; Cardiology" → ["Oncology", "Cardiology"]
pub fn load_sites(path: impl AsRef<Path>) -> crate::importer::error::ImportResult<Vec<Site>> {
    let rows: Vec<SiteRow> = read_csv(path.as_ref())?;
    let sites = rows
        .into_iter()
        .map(|row| Site {
            site_id: row.site_id,
            site_name: row.site_name,
            city: row.city,
            state: row.state,
            site_type: row.site_type,
            therapeutic_areas: row
                .therapeutic_areas
                .split(';')
                .map(|area| area.trim().to_string())
                .filter(|area| !area.is_empty())
                .collect(),
            pi_name: row.pi_name,
            pi_experience_years: row.pi_experience_years,
            beds: row.beds,
        })
        .collect::<Vec<_>>();
    info!(count = sites.len(), "中心主数据装载完成");
    Ok(sites)
}

/// 装载历史绩效表 (列名与实体字段一致,直接反序列化)
pub fn load_performance(
    path: impl AsRef<Path>,
) -> crate::importer::error::ImportResult<Vec<PerformanceRecord>> {
    let records: Vec<PerformanceRecord> = read_csv(path.as_ref())?;
    info!(count = records.len(), "历史绩效数据装载完成");
    Ok(records)
}

/// 装载患者可及性表 (多余列如 accessibility_index 自动忽略)
pub fn load_access(
    path: impl AsRef<Path>,
) -> crate::importer::error::ImportResult<Vec<AccessRecord>> {
    let records: Vec<AccessRecord> = read_csv(path.as_ref())?;
    info!(count = records.len(), "患者可及性数据装载完成");
    Ok(records)
}
