use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::competitions::entities::Competition;

/// 排行榜条目
///
/// 仅有已完成评分提交的参赛者参与排名，其余 rank 为空。
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/report.ts")]
pub struct LeaderboardEntry {
    pub rank: Option<i64>,
    pub participant_id: i64,
    pub name: String,
    pub email: Option<String>,
    pub student_id: Option<String>,
    pub average_score: Option<f64>,
    pub submission_count: i64,
    pub graded_count: i64,
}

/// 总体统计
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/report.ts")]
pub struct OverallStatistics {
    pub total_submissions: i64,
    pub mean_score: f64,
    pub median_score: f64,
    pub std_dev: f64,
    pub min_score: f64,
    pub max_score: f64,
}

/// 按赛题统计
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/report.ts")]
pub struct AssignmentStatistics {
    pub assignment_id: i64,
    pub assignment_name: String,
    pub submission_count: i64,
    pub avg_score: Option<f64>,
    pub min_score: Option<f64>,
    pub max_score: Option<f64>,
}

/// 优秀参赛者
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/report.ts")]
pub struct TopPerformer {
    pub name: String,
    pub avg_score: f64,
    pub submission_count: i64,
}

/// 分数段分布（0-20 / 21-40 / 41-60 / 61-80 / 81-100）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/report.ts")]
pub struct ScoreDistribution {
    #[serde(rename = "0-20")]
    pub bin_0_20: i64,
    #[serde(rename = "21-40")]
    pub bin_21_40: i64,
    #[serde(rename = "41-60")]
    pub bin_41_60: i64,
    #[serde(rename = "61-80")]
    pub bin_61_80: i64,
    #[serde(rename = "81-100")]
    pub bin_81_100: i64,
}

/// 竞赛分析报告
#[derive(Debug, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/report.ts")]
pub struct CompetitionReportResponse {
    pub competition: Competition,
    pub overall_statistics: Option<OverallStatistics>,
    pub assignment_statistics: Vec<AssignmentStatistics>,
    pub top_performers: Vec<TopPerformer>,
    pub score_distribution: ScoreDistribution,
    pub generated_at: chrono::DateTime<chrono::Utc>,
}
