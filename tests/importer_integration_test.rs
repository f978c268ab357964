// ==========================================
// 导入层集成测试: CSV → 类型化记录集合
// ==========================================
// 测试目标: 四张输入表的解析、字段映射与报错口径
// 工具: tempfile 临时目录
// ==========================================

use chrono::NaiveDate;
use clinical_trial_dss::config::EngineConfig;
use clinical_trial_dss::domain::types::SiteType;
use clinical_trial_dss::engine::{MonitoringPipeline, SiteScoringEngine};
use clinical_trial_dss::importer::{self, ImportError};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::fs;
use std::path::Path;

// ==========================================
// 测试辅助函数
// ==========================================

/// 在临时目录写出四张最小可用的CSV
fn write_fixture_csvs(dir: &Path) {
    fs::write(
        dir.join("sites_and_investigators.csv"),
        "site_id,site_name,city,state,site_type,therapeutic_areas,pi_name,pi_experience_years,beds\n\
         Site-047,Nebraska Regional Cancer Center,Omaha,NE,community,Oncology; Endocrinology,Dr. Mary Davis,12,120\n\
         Site-022,Boston Medical Center,Boston,MA,academic,Oncology,Dr. James Smith,20,450\n",
    )
    .unwrap();

    fs::write(
        dir.join("historical_performance.csv"),
        "site_id,trials_completed,avg_enrollment_rate,avg_screen_fail_rate,avg_dropout_rate,data_quality_score,avg_days_to_first_patient,protocol_deviations_per_trial\n\
         Site-047,8,0.95,0.12,0.05,0.98,22,0.12\n\
         Site-022,12,0.78,0.28,0.15,0.75,45,0.67\n",
    )
    .unwrap();

    // 含多余列 accessibility_index,导入时应自动忽略
    fs::write(
        dir.join("patient_density.csv"),
        "site_id,eligible_patients_30mi,competing_trials_same_indication,median_household_income,travel_burden_score,accessibility_index\n\
         Site-047,380,0,62000,0.92,0.736\n\
         Site-022,720,8,85000,0.65,0.498\n",
    )
    .unwrap();

    let mut feed = String::from(
        "week,week_ending_date,site_id,patients_screened,patients_enrolled,screen_fail_reasons\n",
    );
    for week in 1..=13u32 {
        let date = NaiveDate::from_ymd_opt(2024, 7, 1)
            .unwrap()
            .checked_add_days(chrono::Days::new(u64::from(week - 1) * 7))
            .unwrap();
        feed.push_str(&format!("{week},{date},Site-047,6,5,Eligibility criteria not met\n"));
        let trap = if week < 4 { 2 } else { 0 };
        feed.push_str(&format!("{week},{date},Site-022,1,{trap},Withdrew consent\n"));
    }
    fs::write(dir.join("weekly_enrollment_feed.csv"), feed).unwrap();
}

// ==========================================
// 测试用例 1: 全量装载与字段映射
// ==========================================
#[test]
fn test_load_dataset_maps_all_tables() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture_csvs(dir.path());

    let dataset = importer::load_dataset(dir.path()).unwrap();

    assert_eq!(dataset.sites.len(), 2);
    assert_eq!(dataset.performance.len(), 2);
    assert_eq!(dataset.access.len(), 2);
    assert_eq!(dataset.events.len(), 26);

    let gem = &dataset.sites[0];
    assert_eq!(gem.site_id, "Site-047");
    assert_eq!(gem.site_type, SiteType::Community);
    // 分号分隔的治疗领域拆分为标签列表
    assert_eq!(
        gem.therapeutic_areas,
        vec!["Oncology".to_string(), "Endocrinology".to_string()]
    );

    assert!((dataset.performance[0].data_quality_score - 0.98).abs() < 1e-9);
    assert_eq!(dataset.access[1].competing_trials_same_indication, 8);

    let first_event = &dataset.events[0];
    assert_eq!(first_event.week, 1);
    assert_eq!(
        first_event.week_ending_date,
        NaiveDate::from_ymd_opt(2024, 7, 1).unwrap()
    );
}

// ==========================================
// 测试用例 2: 装载结果可直接驱动引擎
// ==========================================
#[test]
fn test_loaded_dataset_drives_both_phases() {
    let dir = tempfile::tempdir().unwrap();
    write_fixture_csvs(dir.path());
    let dataset = importer::load_dataset(dir.path()).unwrap();
    let config = EngineConfig::default();

    let analysis = SiteScoringEngine::new()
        .rank(
            &dataset.sites,
            &dataset.performance,
            &dataset.access,
            &config.scoring,
        )
        .unwrap();
    assert_eq!(analysis.qualified_count, 2);
    assert_eq!(analysis.ranked[0].site_id, "Site-047");

    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let monitoring = MonitoringPipeline::new()
        .run(&dataset.events, &config, &mut rng)
        .unwrap();
    assert_eq!(monitoring.snapshot.flatlined_sites, vec!["Site-022".to_string()]);
}

// ==========================================
// 测试用例 3: 文件缺失报 Io 错误
// ==========================================
#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = importer::load_sites(dir.path().join("sites_and_investigators.csv")).unwrap_err();
    assert!(matches!(err, ImportError::Io { .. }));
}

// ==========================================
// 测试用例 4: 缺列报解析错误,不静默兜底
// ==========================================
#[test]
fn test_missing_column_is_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    // 缺少 data_quality_score 等必需列
    fs::write(
        dir.path().join("historical_performance.csv"),
        "site_id,avg_enrollment_rate\nSite-047,0.95\n",
    )
    .unwrap();

    let err = importer::load_performance(dir.path().join("historical_performance.csv"))
        .unwrap_err();
    assert!(matches!(err, ImportError::Parse { row: 1, .. }));
}

// ==========================================
// 测试用例 5: 非法枚举值带行号报错
// ==========================================
#[test]
fn test_invalid_site_type_reports_row() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("sites_and_investigators.csv"),
        "site_id,site_name,city,state,site_type,therapeutic_areas,pi_name,pi_experience_years,beds\n\
         Site-001,Alpha,Omaha,NE,community,Oncology,Dr. A,10,100\n\
         Site-002,Beta,Boston,MA,government,Oncology,Dr. B,10,100\n",
    )
    .unwrap();

    let err = importer::load_sites(dir.path().join("sites_and_investigators.csv")).unwrap_err();
    match err {
        ImportError::Parse { row, .. } => assert_eq!(row, 2),
        other => panic!("expected Parse, got {other:?}"),
    }
}
