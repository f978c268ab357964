// ==========================================
// 临床试验DSS - 数据导入层
// ==========================================
// 职责: 四张CSV输入表 → 类型化的内存记录集合
// 红线: 引擎层不感知文件格式,只接受类型化集合
// ==========================================

pub mod enrollment_feed;
pub mod error;
pub mod site_data;

pub use enrollment_feed::load_enrollment_feed;
pub use error::{ImportError, ImportResult};
pub use site_data::{load_access, load_performance, load_sites};

use crate::domain::enrollment::WeeklyEnrollmentEvent;
use crate::domain::site::{AccessRecord, PerformanceRecord, Site};
use serde::de::DeserializeOwned;
use std::path::Path;

// ==========================================
// TrialDataSet - 全量输入数据集
// ==========================================
/// 一次试验分析所需的全部输入表
#[derive(Debug)]
pub struct TrialDataSet {
    pub sites: Vec<Site>,
    pub performance: Vec<PerformanceRecord>,
    pub access: Vec<AccessRecord>,
    pub events: Vec<WeeklyEnrollmentEvent>,
}

/// 从数据目录装载四张输入表
///
/// # 目录约定
/// - sites_and_investigators.csv
/// - historical_performance.csv
/// - patient_density.csv
/// - weekly_enrollment_feed.csv
pub fn load_dataset(data_dir: impl AsRef<Path>) -> ImportResult<TrialDataSet> {
    let dir = data_dir.as_ref();
    Ok(TrialDataSet {
        sites: load_sites(dir.join("sites_and_investigators.csv"))?,
        performance: load_performance(dir.join("historical_performance.csv"))?,
        access: load_access(dir.join("patient_density.csv"))?,
        events: load_enrollment_feed(dir.join("weekly_enrollment_feed.csv"))?,
    })
}

// ==========================================
// CSV 解析辅助
// ==========================================

/// 读取带表头CSV并逐行反序列化
///
/// 任何一行解析失败即整体报错 (带记录序号),不输出部分结果
pub(crate) fn read_csv<T: DeserializeOwned>(path: &Path) -> ImportResult<Vec<T>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| match e.into_kind() {
            csv::ErrorKind::Io(io) => ImportError::Io {
                path: path.to_path_buf(),
                source: io,
            },
            other => ImportError::Malformed {
                path: path.to_path_buf(),
                message: format!("{other:?}"),
            },
        })?;

    let mut records = Vec::new();
    for (idx, result) in reader.deserialize::<T>().enumerate() {
        let record = result.map_err(|source| ImportError::Parse {
            path: path.to_path_buf(),
            row: idx + 1,
            source,
        })?;
        records.push(record);
    }
    Ok(records)
}
