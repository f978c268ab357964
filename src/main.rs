// ==========================================
// 临床试验中心遴选与入组监测 - 主入口
// ==========================================
// 用法: clinical-trial-dss <数据目录> [配置文件.json]
// 流程: 装载四张CSV → 阶段一遴选排名 → 阶段二监测流水线
//       → 对停滞中心给出示例干预评估 → 输出JSON报告
// ==========================================

use anyhow::Context;
use clinical_trial_dss::config::EngineConfig;
use clinical_trial_dss::engine::{MonitoringPipeline, RoiEstimator, SiteScoringEngine};
use clinical_trial_dss::importer;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn main() -> anyhow::Result<()> {
    // 初始化日志系统
    clinical_trial_dss::logging::init();

    tracing::info!("==================================================");
    tracing::info!("{}", clinical_trial_dss::APP_NAME);
    tracing::info!("系统版本: {}", clinical_trial_dss::VERSION);
    tracing::info!("==================================================");

    // === 参数解析 ===
    let mut args = std::env::args().skip(1);
    let data_dir = args.next().unwrap_or_else(|| "data".to_string());
    let config = match args.next() {
        Some(path) => EngineConfig::load_from_file(&path)?,
        None => EngineConfig::default(),
    };
    tracing::info!("数据目录: {}", data_dir);

    // === 装载输入数据 ===
    let dataset = importer::load_dataset(&data_dir).context("装载输入数据失败")?;

    // === 阶段一: 中心遴选评分 ===
    let scoring_engine = SiteScoringEngine::new();
    let analysis = scoring_engine.rank(
        &dataset.sites,
        &dataset.performance,
        &dataset.access,
        &config.scoring,
    )?;
    tracing::info!(
        "遴选完成: {}个合格中心 (共关联{}个)",
        analysis.qualified_count,
        analysis.total_sites_analyzed
    );

    println!("=== 中心遴选排名 (Top 10) ===");
    println!("{}", serde_json::to_string_pretty(&analysis.top(10))?);

    // === 阶段二: 监测流水线 ===
    let mut rng = ChaCha8Rng::from_entropy();
    let pipeline = MonitoringPipeline::new();
    let monitoring = pipeline.run(&dataset.events, &config, &mut rng)?;

    println!("=== 试验监测报告 ===");
    println!("{}", serde_json::to_string_pretty(&monitoring)?);

    // === 示例干预评估: 对首个停滞中心追加预算 ===
    if let Some(site_id) = monitoring.snapshot.flatlined_sites.first() {
        let estimator = RoiEstimator::new();
        let request = estimator.parse_request(site_id, "add_budget", 50_000)?;
        let estimate = estimator.estimate(&request, &config.roi, &mut rng)?;

        println!("=== 干预评估 ({site_id}) ===");
        println!("{}", serde_json::to_string_pretty(&estimate)?);
    }

    Ok(())
}
