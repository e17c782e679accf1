//! 竞赛排行榜服务
//!
//! 聚合结果走缓存（批次结束与新提交入库时失效），计算在服务层完成。

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::collections::HashMap;
use tracing::debug;

use super::ReportService;
use super::stats::{mean, round2};
use crate::cache::{CacheResult, leaderboard_cache_key};
use crate::models::reports::responses::LeaderboardEntry;
use crate::models::submissions::entities::SubmissionStatus;
use crate::models::submissions::requests::SubmissionListQuery;
use crate::models::{ApiResponse, ErrorCode};

/// 获取竞赛排行榜
/// GET /competitions/{competition_id}/leaderboard
pub async fn get_leaderboard(
    service: &ReportService,
    request: &HttpRequest,
    competition_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);
    let cache = service.get_cache(request);

    // 验证竞赛存在
    match storage.get_competition_by_id(competition_id).await {
        Ok(Some(_)) => {}
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
    }

    // 缓存命中直接返回
    let cache_key = leaderboard_cache_key(competition_id);
    if let CacheResult::Found(cached) = cache.get_raw(&cache_key).await {
        if let Ok(entries) = serde_json::from_str::<Vec<LeaderboardEntry>>(&cached) {
            debug!(competition_id, "Leaderboard served from cache");
            return Ok(HttpResponse::Ok().json(ApiResponse::success(entries, "查询成功")));
        }
    }

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

    // 全量提交（各状态），按参赛者聚合
    let submissions_query = SubmissionListQuery {
        page: Some(1),
        size: Some(10000),
        assignment_id: None,
        participant_id: None,
        status: None,
    };
    let submissions = match storage
        .list_submissions_with_pagination(competition_id, submissions_query)
        .await
    {
        Ok(resp) => resp.items,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询提交失败: {e}"),
                )),
            );
        }
    };

    // participant_id -> (全部提交数, 已评分分数列表)
    let mut per_participant: HashMap<i64, (i64, Vec<f64>)> = HashMap::new();
    for submission in &submissions {
        let entry = per_participant
            .entry(submission.participant_id)
            .or_default();
        entry.0 += 1;
        if submission.status == SubmissionStatus::COMPLETED {
            if let Some(score) = submission.score {
                entry.1.push(score);
            }
        }
    }

    let mut entries: Vec<LeaderboardEntry> = participants
        .into_iter()
        .map(|p| {
            let (submission_count, scores) =
                per_participant.get(&p.id).cloned().unwrap_or((0, vec![]));
            let average_score = if scores.is_empty() {
                None
            } else {
                Some(round2(mean(&scores)))
            };
            LeaderboardEntry {
                rank: None,
                participant_id: p.id,
                name: p.name,
                email: p.email,
                student_id: p.student_id,
                average_score,
                submission_count,
                graded_count: scores.len() as i64,
            }
        })
        .collect();

    // 平均分倒序，未评分者排在最后且不占名次
    entries.sort_by(|a, b| match (a.average_score, b.average_score) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });

    let mut rank = 1;
    for entry in entries.iter_mut() {
        if entry.average_score.is_some() {
            entry.rank = Some(rank);
            rank += 1;
        }
    }

    // 写入缓存
    if let Ok(serialized) = serde_json::to_string(&entries) {
        cache.insert_raw(cache_key, serialized, 0).await;
    }

    Ok(HttpResponse::Ok().json(ApiResponse::success(entries, "查询成功")))
}
