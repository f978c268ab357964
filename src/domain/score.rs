// ==========================================
// 临床试验DSS - 评分结果对象
// ==========================================
// 职责: 定义中心综合评分与遴选报告
// 红线: 派生值对象,不反向引用源记录
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// SiteScore - 单中心综合评分
// ==========================================
/// 单中心综合评分
///
/// composite = 0.40*performance + 0.30*access + 0.20*quality + 0.10*logistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteScore {
    pub site_id: String,
    pub site_name: String,
    pub city: String,
    pub state: String,

    /// 综合评分 (权重加权)
    pub composite_score: f64,
    /// 绩效子分 (权重 0.40)
    pub performance_score: f64,
    /// 可及性子分 (权重 0.30)
    pub access_score: f64,
    /// 数据质量子分 (权重 0.20)
    pub data_quality_score: f64,
    /// 运营子分 (权重 0.10)
    pub logistics_score: f64,

    // 关键展示指标 (报表用,避免二次关联)
    pub enrollment_rate: f64,
    pub eligible_patients: i32,
    pub competing_trials: i32,
}

// ==========================================
// SiteAnalysisReport - 遴选报告
// ==========================================
/// 中心遴选报告
///
/// `ranked` 为按综合评分降序的全量稳定排序;
/// top-N 视图通过 [`SiteAnalysisReport::top`] 截取前缀,无需重新计算
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteAnalysisReport {
    /// 分析批次ID
    pub analysis_id: String,
    /// 参与关联的中心总数
    pub total_sites_analyzed: usize,
    /// 被质量阈值过滤掉的中心数
    pub excluded_by_quality: usize,
    /// 通过过滤并参与排名的中心数
    pub qualified_count: usize,
    /// 全量排名 (降序,稳定排序)
    pub ranked: Vec<SiteScore>,
    pub generated_at: DateTime<Utc>,
}

impl SiteAnalysisReport {
    /// 截取排名前 n 的中心视图
    pub fn top(&self, n: usize) -> &[SiteScore] {
        &self.ranked[..n.min(self.ranked.len())]
    }
}
