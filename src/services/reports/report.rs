//! 竞赛分析报告服务
//!
//! 总体统计、按赛题统计、优秀参赛者与分数段分布。聚合在服务层完成，
//! 结果走缓存（批次结束与新提交入库时失效）。

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::HashMap;
use tracing::debug;

use super::ReportService;
use super::stats::{mean, median, round2, std_dev};
use crate::cache::{CacheResult, report_cache_key};
use crate::models::reports::responses::{
    AssignmentStatistics, CompetitionReportResponse, OverallStatistics, ScoreDistribution,
    TopPerformer,
};
use crate::models::{ApiResponse, ErrorCode};

/// 生成竞赛分析报告
/// GET /competitions/{competition_id}/report
pub async fn get_report(
    service: &ReportService,
    request: &HttpRequest,
    competition_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let cache = service.get_cache(request);

    let competition = match storage.get_competition_by_id(competition_id).await {
        Ok(Some(c)) => c,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::CompetitionNotFound,
                "竞赛不存在",
            )));
        }
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询竞赛失败: {e}"),
                )),
            );
        }
    };

    // 缓存命中直接返回
    let cache_key = report_cache_key(competition_id);
    if let CacheResult::Found(cached) = cache.get_raw(&cache_key).await {
        if let Ok(report) = serde_json::from_str::<CompetitionReportResponse>(&cached) {
            debug!(competition_id, "Report served from cache");
            return Ok(HttpResponse::Ok().json(ApiResponse::success(report, "查询成功")));
        }
    }

    let completed = match storage.list_completed_submissions(competition_id).await {
        Ok(submissions) => submissions,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询已评分提交失败: {e}"),
                )),
            );
        }
    };

    let assignments = match storage.list_assignments(competition_id).await {
        Ok(a) => a,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询赛题失败: {e}"),
                )),
            );
        }
    };

    let participants = match storage.list_participants(competition_id).await {
        Ok(p) => p,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询参赛者失败: {e}"),
                )),
            );
        }
    };

    let scores: Vec<f64> = completed.iter().filter_map(|s| s.score).collect();

    // 总体统计（没有已评分提交时为空）
    let overall_statistics = if scores.is_empty() {
        None
    } else {
        Some(OverallStatistics {
            total_submissions: completed.len() as i64,
            mean_score: round2(mean(&scores)),
            median_score: round2(median(&scores)),
            std_dev: round2(std_dev(&scores)),
            min_score: round2(scores.iter().cloned().fold(f64::INFINITY, f64::min)),
            max_score: round2(scores.iter().cloned().fold(f64::NEG_INFINITY, f64::max)),
        })
    };

    // 按赛题统计（包含尚无已评分提交的赛题）
    let mut per_assignment: HashMap<i64, Vec<f64>> = HashMap::new();
    for submission in &completed {
        if let Some(score) = submission.score {
            per_assignment
                .entry(submission.assignment_id)
                .or_default()
                .push(score);
        }
    }

    let assignment_statistics: Vec<AssignmentStatistics> = assignments
        .into_iter()
        .map(|a| {
            let scores = per_assignment.get(&a.id).cloned().unwrap_or_default();
            AssignmentStatistics {
                assignment_id: a.id,
                assignment_name: a.name,
                submission_count: scores.len() as i64,
                avg_score: (!scores.is_empty()).then(|| round2(mean(&scores))),
                min_score: (!scores.is_empty())
                    .then(|| round2(scores.iter().cloned().fold(f64::INFINITY, f64::min))),
                max_score: (!scores.is_empty())
                    .then(|| round2(scores.iter().cloned().fold(f64::NEG_INFINITY, f64::max))),
            }
        })
        .collect();

    // 优秀参赛者（按已评分提交均分取前 10）
    let participant_names: HashMap<i64, String> =
        participants.into_iter().map(|p| (p.id, p.name)).collect();

    let mut per_participant: HashMap<i64, Vec<f64>> = HashMap::new();
    for submission in &completed {
        if let Some(score) = submission.score {
            per_participant
                .entry(submission.participant_id)
                .or_default()
                .push(score);
        }
    }

    let mut top_performers: Vec<TopPerformer> = per_participant
        .into_iter()
        .map(|(participant_id, scores)| TopPerformer {
            name: participant_names
                .get(&participant_id)
                .cloned()
                .unwrap_or_else(|| "알 수 없는 참가자".to_string()),
            avg_score: round2(mean(&scores)),
            submission_count: scores.len() as i64,
        })
        .collect();
    top_performers.sort_by(|a, b| b.avg_score.total_cmp(&a.avg_score));
    top_performers.truncate(10);

    // 分数段分布
    let score_distribution = bin_scores(&scores);

    let report = CompetitionReportResponse {
        competition,
        overall_statistics,
        assignment_statistics,
        top_performers,
        score_distribution,
        generated_at: chrono::Utc::now(),
    };

    // 写入缓存
    if let Ok(serialized) = serde_json::to_string(&report) {
        cache.insert_raw(cache_key, serialized, 0).await;
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(report, "查询成功")))
}

/// 分数分箱：0-20 / 21-40 / 41-60 / 61-80 / 81-100，上界闭区间
fn bin_scores(scores: &[f64]) -> ScoreDistribution {
    let mut bins = ScoreDistribution::default();
    for &score in scores {
        if score <= 20.0 {
            bins.bin_0_20 += 1;
        } else if score <= 40.0 {
            bins.bin_21_40 += 1;
        } else if score <= 60.0 {
            bins.bin_41_60 += 1;
        } else if score <= 80.0 {
            bins.bin_61_80 += 1;
        } else {
            bins.bin_81_100 += 1;
        }
    }
    bins
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bin_scores_boundaries() {
        let bins = bin_scores(&[0.0, 20.0, 20.5, 40.0, 60.0, 80.0, 80.01, 100.0]);

        assert_eq!(bins.bin_0_20, 2);
        assert_eq!(bins.bin_21_40, 2);
        assert_eq!(bins.bin_41_60, 1);
        assert_eq!(bins.bin_61_80, 1);
        assert_eq!(bins.bin_81_100, 2);
    }

    #[test]
    fn test_bin_scores_empty() {
        assert_eq!(bin_scores(&[]), ScoreDistribution::default());
    }
}
