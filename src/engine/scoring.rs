// ==========================================
// 临床试验DSS - 中心遴选评分引擎
// ==========================================
// 职责: 三表关联 + 质量过滤 + 综合评分 + 稳定排名
// 输入: 中心主数据 + 历史绩效 + 患者可及性
// 输出: SiteAnalysisReport (全量排名 + top-N 视图)
// 红线: 无副作用,不缓存评分,每次运行从输入重算
// ==========================================

use crate::config::ScoringConfig;
use crate::domain::score::{SiteAnalysisReport, SiteScore};
use crate::domain::site::{AccessRecord, PerformanceRecord, Site};
use crate::engine::error::{EngineError, EngineResult};
use chrono::Utc;
use std::collections::HashMap;
use tracing::{debug, info};
use uuid::Uuid;

// ==========================================
// SiteScoringEngine - 遴选评分引擎
// ==========================================
pub struct SiteScoringEngine {
    // 无状态引擎,不需要注入依赖
}

impl SiteScoringEngine {
    /// 构造函数
    pub fn new() -> Self {
        Self {}
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 评分并排名全部中心
    ///
    /// # 流程
    /// 1. 输入表空检查 (整表缺失直接报错)
    /// 2. 按 site_id 内连接三表 (缺任一表记录的中心静默剔除)
    /// 3. 数据质量过滤 (低于阈值剔除,计数可报告)
    /// 4. 逐中心计算子分与综合评分
    /// 5. 按综合评分降序稳定排序 (同分保持输入顺序)
    ///
    /// # 参数
    /// - `sites`: 中心主数据 (排名的稳定顺序基准)
    /// - `performance`: 历史绩效记录
    /// - `access`: 患者可及性记录
    /// - `config`: 评分参数
    ///
    /// # 返回
    /// SiteAnalysisReport,含全量排名; top-N 通过 `report.top(n)` 截取
    pub fn rank(
        &self,
        sites: &[Site],
        performance: &[PerformanceRecord],
        access: &[AccessRecord],
        config: &ScoringConfig,
    ) -> EngineResult<SiteAnalysisReport> {
        // === 步骤 1: 输入表空检查 ===
        Self::ensure_non_empty("sites_and_investigators", sites.len())?;
        Self::ensure_non_empty("historical_performance", performance.len())?;
        Self::ensure_non_empty("patient_density", access.len())?;

        // === 步骤 2: 按 site_id 建立关联索引 ===
        let perf_by_id: HashMap<&str, &PerformanceRecord> =
            performance.iter().map(|p| (p.site_id.as_str(), p)).collect();
        let access_by_id: HashMap<&str, &AccessRecord> =
            access.iter().map(|a| (a.site_id.as_str(), a)).collect();

        // === 步骤 3+4: 关联 + 质量过滤 + 评分 ===
        let mut scored = Vec::new();
        let mut joined_count = 0usize;
        let mut excluded_by_quality = 0usize;

        for site in sites {
            // 三表内连接: 任一表缺该中心则跳过 (关联语义,不是校验语义)
            let (perf, acc) = match (
                perf_by_id.get(site.site_id.as_str()),
                access_by_id.get(site.site_id.as_str()),
            ) {
                (Some(p), Some(a)) => (*p, *a),
                _ => {
                    debug!(site_id = %site.site_id, "中心缺少绩效或可及性记录,跳过");
                    continue;
                }
            };
            joined_count += 1;

            // 质量过滤
            if perf.data_quality_score < config.quality_threshold {
                excluded_by_quality += 1;
                continue;
            }

            scored.push(self.score_site(site, perf, acc, config));
        }

        // === 步骤 5: 过滤清空检查 ===
        if scored.is_empty() {
            return Err(EngineError::EmptyResult {
                total: joined_count,
                excluded: excluded_by_quality,
                reason: format!("无中心通过数据质量阈值 {}", config.quality_threshold),
            });
        }

        // === 步骤 6: 稳定降序排序 (同分保持输入顺序) ===
        scored.sort_by(|a, b| b.composite_score.total_cmp(&a.composite_score));

        info!(
            joined = joined_count,
            excluded = excluded_by_quality,
            qualified = scored.len(),
            "中心遴选评分完成"
        );

        Ok(SiteAnalysisReport {
            analysis_id: Uuid::new_v4().to_string(),
            total_sites_analyzed: joined_count,
            excluded_by_quality,
            qualified_count: scored.len(),
            ranked: scored,
            generated_at: Utc::now(),
        })
    }

    // ==========================================
    // 评分计算
    // ==========================================

    /// 计算单中心的子分与综合评分
    ///
    /// # 公式
    /// - performance = 0.6*入组率 + 0.4*(1-筛败率)
    /// - access      = 0.6*密度项 + 0.4*(1-min(竞争数/饱和数,1))
    /// - logistics   = 0.6*(1-min(首例天数/饱和天数,1)) + 0.4*(1-min(偏离数/饱和数,1))
    /// - composite   = w_p*performance + w_a*access + w_q*质量分 + w_l*logistics
    ///
    /// 密度项默认不封顶(见配置说明),高密度中心的 access 子分可超过1.0
    fn score_site(
        &self,
        site: &Site,
        perf: &PerformanceRecord,
        acc: &AccessRecord,
        config: &ScoringConfig,
    ) -> SiteScore {
        let performance_score = clamp01(
            0.6 * perf.avg_enrollment_rate + 0.4 * (1.0 - perf.avg_screen_fail_rate),
        );

        let mut density_term = f64::from(acc.eligible_patients_30mi) / config.patient_density_scale;
        if config.clamp_patient_density {
            density_term = density_term.min(1.0);
        }
        let competition_term = 1.0
            - (f64::from(acc.competing_trials_same_indication)
                / config.competing_trials_saturation)
                .min(1.0);
        let access_score = 0.6 * density_term + 0.4 * competition_term;

        let data_quality_score = clamp01(perf.data_quality_score);

        let logistics_score = clamp01(
            0.6 * (1.0
                - (f64::from(perf.avg_days_to_first_patient)
                    / config.days_to_first_patient_saturation)
                    .min(1.0))
                + 0.4 * (1.0
                    - (perf.protocol_deviations_per_trial / config.protocol_deviation_saturation)
                        .min(1.0)),
        );

        let composite_score = config.weight_performance * performance_score
            + config.weight_access * access_score
            + config.weight_quality * data_quality_score
            + config.weight_logistics * logistics_score;

        SiteScore {
            site_id: site.site_id.clone(),
            site_name: site.site_name.clone(),
            city: site.city.clone(),
            state: site.state.clone(),
            composite_score,
            performance_score,
            access_score,
            data_quality_score,
            logistics_score,
            enrollment_rate: perf.avg_enrollment_rate,
            eligible_patients: acc.eligible_patients_30mi,
            competing_trials: acc.competing_trials_same_indication,
        }
    }

    /// 整表空检查
    fn ensure_non_empty(table: &str, len: usize) -> EngineResult<()> {
        if len == 0 {
            return Err(EngineError::DataJoin {
                table: table.to_string(),
                reason: "输入表为空".to_string(),
            });
        }
        Ok(())
    }
}

/// 截断到 [0,1]
fn clamp01(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

// ==========================================
// Default trait 实现
// ==========================================
impl Default for SiteScoringEngine {
    fn default() -> Self {
        Self::new()
    }
}

// ==========================================
// 测试模块
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::SiteType;

    // ==========================================
    // 测试辅助函数
    // ==========================================

    /// 创建测试用的中心主数据
    fn create_test_site(site_id: &str) -> Site {
        Site {
            site_id: site_id.to_string(),
            site_name: format!("{site_id} Medical Center"),
            city: "Omaha".to_string(),
            state: "NE".to_string(),
            site_type: SiteType::Community,
            therapeutic_areas: vec!["Oncology".to_string()],
            pi_name: "Dr. Mary Davis".to_string(),
            pi_experience_years: 12,
            beds: 120,
        }
    }

    /// 创建测试用的绩效记录
    fn create_test_performance(site_id: &str, quality: f64) -> PerformanceRecord {
        PerformanceRecord {
            site_id: site_id.to_string(),
            trials_completed: 8,
            avg_enrollment_rate: 0.80,
            avg_screen_fail_rate: 0.20,
            avg_dropout_rate: 0.10,
            data_quality_score: quality,
            avg_days_to_first_patient: 45,
            protocol_deviations_per_trial: 2.0,
        }
    }

    /// 创建测试用的可及性记录
    fn create_test_access(site_id: &str, patients: i32, competing: i32) -> AccessRecord {
        AccessRecord {
            site_id: site_id.to_string(),
            eligible_patients_30mi: patients,
            competing_trials_same_indication: competing,
            median_household_income: 62_000,
            travel_burden_score: 0.85,
        }
    }

    #[test]
    fn test_composite_formula() {
        let engine = SiteScoringEngine::new();
        let config = ScoringConfig::default();
        let report = engine
            .rank(
                &[create_test_site("S1")],
                &[create_test_performance("S1", 0.90)],
                &[create_test_access("S1", 500, 5)],
                &config,
            )
            .unwrap();

        let score = &report.ranked[0];
        // performance = 0.6*0.80 + 0.4*0.80 = 0.80
        assert!((score.performance_score - 0.80).abs() < 1e-9);
        // access = 0.6*0.5 + 0.4*0.5 = 0.50
        assert!((score.access_score - 0.50).abs() < 1e-9);
        // logistics = 0.6*(1-0.5) + 0.4*(1-0.2) = 0.62
        assert!((score.logistics_score - 0.62).abs() < 1e-9);
        // composite = 0.4*0.8 + 0.3*0.5 + 0.2*0.9 + 0.1*0.62 = 0.712
        assert!((score.composite_score - 0.712).abs() < 1e-9);
    }

    #[test]
    fn test_recompute_is_bit_identical() {
        let engine = SiteScoringEngine::new();
        let config = ScoringConfig::default();
        let sites = vec![create_test_site("S1"), create_test_site("S2")];
        let perf = vec![
            create_test_performance("S1", 0.90),
            create_test_performance("S2", 0.70),
        ];
        let access = vec![
            create_test_access("S1", 500, 5),
            create_test_access("S2", 320, 2),
        ];

        let a = engine.rank(&sites, &perf, &access, &config).unwrap();
        let b = engine.rank(&sites, &perf, &access, &config).unwrap();
        for (x, y) in a.ranked.iter().zip(b.ranked.iter()) {
            assert_eq!(x.site_id, y.site_id);
            assert_eq!(x.composite_score.to_bits(), y.composite_score.to_bits());
        }
    }

    #[test]
    fn test_ranking_is_descending_and_stable() {
        let engine = SiteScoringEngine::new();
        let config = ScoringConfig::default();
        // S2/S3 输入完全一致 => 同分,稳定排序应保持 S2 在前
        let sites = vec![
            create_test_site("S1"),
            create_test_site("S2"),
            create_test_site("S3"),
        ];
        let perf = vec![
            create_test_performance("S1", 0.70),
            create_test_performance("S2", 0.95),
            create_test_performance("S3", 0.95),
        ];
        let access = vec![
            create_test_access("S1", 100, 9),
            create_test_access("S2", 400, 3),
            create_test_access("S3", 400, 3),
        ];

        let report = engine.rank(&sites, &perf, &access, &config).unwrap();
        for pair in report.ranked.windows(2) {
            assert!(pair[0].composite_score >= pair[1].composite_score);
        }
        assert_eq!(report.ranked[0].site_id, "S2");
        assert_eq!(report.ranked[1].site_id, "S3");
        // top-N 是全量排序的前缀
        assert_eq!(report.top(2)[0].site_id, report.ranked[0].site_id);
        assert_eq!(report.top(10).len(), 3);
    }

    #[test]
    fn test_quality_filter_and_counts() {
        let engine = SiteScoringEngine::new();
        let config = ScoringConfig::default();
        let sites = vec![create_test_site("S1"), create_test_site("S2")];
        let perf = vec![
            create_test_performance("S1", 0.60), // 低于阈值 0.65
            create_test_performance("S2", 0.80),
        ];
        let access = vec![
            create_test_access("S1", 400, 3),
            create_test_access("S2", 400, 3),
        ];

        let report = engine.rank(&sites, &perf, &access, &config).unwrap();
        assert_eq!(report.total_sites_analyzed, 2);
        assert_eq!(report.excluded_by_quality, 1);
        assert_eq!(report.qualified_count, 1);
        assert_eq!(report.ranked[0].site_id, "S2");
    }

    #[test]
    fn test_missing_join_record_silently_excluded() {
        let engine = SiteScoringEngine::new();
        let config = ScoringConfig::default();
        let sites = vec![create_test_site("S1"), create_test_site("S2")];
        // S2 无可及性记录 => 静默剔除,不报错
        let perf = vec![
            create_test_performance("S1", 0.90),
            create_test_performance("S2", 0.90),
        ];
        let access = vec![create_test_access("S1", 400, 3)];

        let report = engine.rank(&sites, &perf, &access, &config).unwrap();
        assert_eq!(report.total_sites_analyzed, 1);
        assert_eq!(report.ranked.len(), 1);
        assert_eq!(report.ranked[0].site_id, "S1");
    }

    #[test]
    fn test_empty_table_is_join_error() {
        let engine = SiteScoringEngine::new();
        let config = ScoringConfig::default();
        let err = engine
            .rank(
                &[],
                &[create_test_performance("S1", 0.90)],
                &[create_test_access("S1", 400, 3)],
                &config,
            )
            .unwrap_err();
        assert!(matches!(err, EngineError::DataJoin { .. }));
    }

    #[test]
    fn test_all_filtered_is_empty_result_error() {
        let engine = SiteScoringEngine::new();
        let config = ScoringConfig::default();
        let err = engine
            .rank(
                &[create_test_site("S1")],
                &[create_test_performance("S1", 0.50)],
                &[create_test_access("S1", 400, 3)],
                &config,
            )
            .unwrap_err();
        match err {
            EngineError::EmptyResult { total, excluded, .. } => {
                assert_eq!(total, 1);
                assert_eq!(excluded, 1);
            }
            other => panic!("expected EmptyResult, got {other:?}"),
        }
    }

    #[test]
    fn test_unclamped_density_can_exceed_one() {
        let engine = SiteScoringEngine::new();
        let mut config = ScoringConfig::default();
        // 2000名合格患者 => 密度项 2.0,access 子分超过1.0
        let report = engine
            .rank(
                &[create_test_site("S1")],
                &[create_test_performance("S1", 0.90)],
                &[create_test_access("S1", 2000, 0)],
                &config,
            )
            .unwrap();
        assert!(report.ranked[0].access_score > 1.0);

        // 开启封顶后回到 [0,1]
        config.clamp_patient_density = true;
        let clamped = engine
            .rank(
                &[create_test_site("S1")],
                &[create_test_performance("S1", 0.90)],
                &[create_test_access("S1", 2000, 0)],
                &config,
            )
            .unwrap();
        assert!(clamped.ranked[0].access_score <= 1.0 + 1e-9);
    }
}
