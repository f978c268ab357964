// ==========================================
// 临床试验DSS - 入组聚合引擎
// ==========================================
// 职责: 周度事件日志 → 各中心汇总 + 停滞检测
// 输入: 周度入组事件日志 (按周号升序)
// 输出: EnrollmentSnapshot (汇总 + 停滞中心列表)
// 红线: 汇总每次从日志整体重算,不做增量维护
// ==========================================

use crate::config::MonitoringConfig;
use crate::domain::enrollment::{EnrollmentSnapshot, SiteEnrollmentSummary, WeeklyEnrollmentEvent};
use crate::engine::error::{EngineError, EngineResult};
use std::collections::HashMap;
use tracing::info;

// ==========================================
// EnrollmentAggregator - 入组聚合引擎
// ==========================================
pub struct EnrollmentAggregator {
    // 无状态引擎,不需要注入依赖
}

impl EnrollmentAggregator {
    /// 构造函数
    pub fn new() -> Self {
        Self {}
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 聚合事件日志
    ///
    /// # 口径
    /// - weeks_active = 该中心出现过的最大周号 (周1与周9各一条 => 9)
    /// - 停滞观察窗 = 全局最大周号回溯 N 周 (相对整个数据集,不是各中心自身)
    /// - 停滞判定 = 观察窗内有记录且入组合计为 0;
    ///   观察窗内完全无记录的中心不判停滞 (其历史已滑出窗口)
    /// - 数据不足 N 周时观察窗覆盖现有全部周号,不报错
    ///
    /// # 参数
    /// - `events`: 周度入组事件日志
    /// - `config`: 监测参数 (观察窗宽度)
    ///
    /// # 返回
    /// EnrollmentSnapshot; `summaries` 保持中心首次出现顺序
    pub fn aggregate(
        &self,
        events: &[WeeklyEnrollmentEvent],
        config: &MonitoringConfig,
    ) -> EngineResult<EnrollmentSnapshot> {
        // === 步骤 1: 空日志检查 ===
        if events.is_empty() {
            return Err(EngineError::DataJoin {
                table: "weekly_enrollment_feed".to_string(),
                reason: "事件日志为空".to_string(),
            });
        }

        // === 步骤 2: 确定观察窗 ===
        let latest_week = events.iter().map(|e| e.week).max().unwrap_or(0);
        // 窗口 = (latest_week - N, latest_week],不足 N 周时覆盖全部周号
        let window_floor = latest_week.saturating_sub(config.flatline_window_weeks);

        // === 步骤 3: 按中心首次出现顺序聚合 ===
        let mut index_by_site: HashMap<&str, usize> = HashMap::new();
        let mut summaries: Vec<SiteEnrollmentSummary> = Vec::new();
        let mut in_window: Vec<bool> = Vec::new();

        for event in events {
            let idx = match index_by_site.get(event.site_id.as_str()) {
                Some(&idx) => idx,
                None => {
                    index_by_site.insert(event.site_id.as_str(), summaries.len());
                    summaries.push(SiteEnrollmentSummary {
                        site_id: event.site_id.clone(),
                        total_screened: 0,
                        total_enrolled: 0,
                        weeks_active: 0,
                        recent_enrolled: 0,
                    });
                    in_window.push(false);
                    summaries.len() - 1
                }
            };

            let summary = &mut summaries[idx];
            summary.total_screened += event.patients_screened;
            summary.total_enrolled += event.patients_enrolled;
            summary.weeks_active = summary.weeks_active.max(event.week);
            if event.week > window_floor {
                summary.recent_enrolled += event.patients_enrolled;
                in_window[idx] = true;
            }
        }

        // === 步骤 4: 停滞中心判定 ===
        let flatlined_sites: Vec<String> = summaries
            .iter()
            .zip(in_window.iter())
            .filter(|(s, &seen)| seen && s.recent_enrolled == 0)
            .map(|(s, _)| s.site_id.clone())
            .collect();

        info!(
            sites = summaries.len(),
            latest_week,
            flatlined = flatlined_sites.len(),
            "入组聚合完成"
        );

        Ok(EnrollmentSnapshot {
            latest_week,
            summaries,
            flatlined_sites,
        })
    }
}

// ==========================================
// Default trait 实现
// ==========================================
impl Default for EnrollmentAggregator {
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
    use chrono::NaiveDate;

    /// 创建测试用的周度事件
    fn create_test_event(site_id: &str, week: u32, screened: u32, enrolled: u32) -> WeeklyEnrollmentEvent {
        WeeklyEnrollmentEvent {
            week,
            week_ending_date: NaiveDate::from_ymd_opt(2024, 7, 1)
                .unwrap()
                .checked_add_days(chrono::Days::new(u64::from(week - 1) * 7))
                .unwrap(),
            site_id: site_id.to_string(),
            patients_screened: screened,
            patients_enrolled: enrolled,
            screen_fail_reasons: "Eligibility criteria not met".to_string(),
        }
    }

    #[test]
    fn test_totals_match_event_log() {
        let aggregator = EnrollmentAggregator::new();
        let config = MonitoringConfig::default();
        let events = vec![
            create_test_event("S1", 1, 5, 3),
            create_test_event("S2", 1, 4, 2),
            create_test_event("S1", 2, 6, 4),
            create_test_event("S2", 2, 3, 1),
        ];

        let snapshot = aggregator.aggregate(&events, &config).unwrap();
        let event_total: u32 = events.iter().map(|e| e.patients_enrolled).sum();
        assert_eq!(snapshot.total_enrolled(), event_total);
        assert_eq!(snapshot.total_screened(), 18);
        // 首次出现顺序保持
        assert_eq!(snapshot.summaries[0].site_id, "S1");
        assert_eq!(snapshot.summaries[1].site_id, "S2");
    }

    #[test]
    fn test_weeks_active_is_max_week_not_count() {
        let aggregator = EnrollmentAggregator::new();
        let config = MonitoringConfig::default();
        // 仅周1与周9有记录 => weeks_active = 9
        let events = vec![
            create_test_event("S1", 1, 3, 2),
            create_test_event("S1", 9, 4, 3),
        ];

        let snapshot = aggregator.aggregate(&events, &config).unwrap();
        assert_eq!(snapshot.summaries[0].weeks_active, 9);
        assert_eq!(snapshot.latest_week, 9);
    }

    #[test]
    fn test_flatline_scenario_site_a_only() {
        let aggregator = EnrollmentAggregator::new();
        let config = MonitoringConfig::default();
        // 13周数据: Site-A 周11~13入组为0,Site-B 每周入组5
        let mut events = Vec::new();
        for week in 1..=13 {
            let a_enrolled = if week >= 11 { 0 } else { 2 };
            events.push(create_test_event("Site-A", week, 3, a_enrolled));
            events.push(create_test_event("Site-B", week, 6, 5));
        }

        let snapshot = aggregator.aggregate(&events, &config).unwrap();
        assert_eq!(snapshot.flatlined_sites, vec!["Site-A".to_string()]);
    }

    #[test]
    fn test_short_history_does_not_error_or_false_flag() {
        let aggregator = EnrollmentAggregator::new();
        let config = MonitoringConfig::default();
        // 仅2周历史: 慢启动但确有入组 => 不判停滞
        let events = vec![
            create_test_event("S1", 1, 2, 1),
            create_test_event("S1", 2, 2, 0),
        ];
        let snapshot = aggregator.aggregate(&events, &config).unwrap();
        assert!(snapshot.flatlined_sites.is_empty());

        // 仅2周历史且入组确实为0 => 判停滞
        let zero_events = vec![
            create_test_event("S2", 1, 2, 0),
            create_test_event("S2", 2, 1, 0),
        ];
        let snapshot = aggregator.aggregate(&zero_events, &config).unwrap();
        assert_eq!(snapshot.flatlined_sites, vec!["S2".to_string()]);
    }

    #[test]
    fn test_silent_site_outside_window_not_flagged() {
        let aggregator = EnrollmentAggregator::new();
        let config = MonitoringConfig::default();
        // S1 早期停报,观察窗(周11~13)内无任何记录 => 不判停滞
        let mut events = vec![
            create_test_event("S1", 1, 3, 2),
            create_test_event("S1", 2, 3, 2),
        ];
        for week in 1..=13 {
            events.push(create_test_event("S2", week, 4, 3));
        }

        let snapshot = aggregator.aggregate(&events, &config).unwrap();
        assert!(snapshot.flatlined_sites.is_empty());
    }

    #[test]
    fn test_empty_log_is_join_error() {
        let aggregator = EnrollmentAggregator::new();
        let config = MonitoringConfig::default();
        let err = aggregator.aggregate(&[], &config).unwrap_err();
        assert!(matches!(err, EngineError::DataJoin { .. }));
    }
}
