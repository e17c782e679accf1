//! 评分启动服务
//!
//! 启动契约：没有 pending 提交时是无副作用的空操作，返回数量 0；
//! 否则批次交给后台任务执行，调用方立即收到本轮入队数量的确认，
//! 之后的进度只能通过状态统计接口轮询。

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::GradingService;
use crate::config::AppConfig;
use crate::grading::{BatchOrchestrator, PromptEvaluator, SubmissionGrader};
use crate::models::grading::responses::StartGradingResponse;
use crate::models::{ApiResponse, ErrorCode};

/// 启动批次评分
/// POST /competitions/{competition_id}/grading
pub async fn start_grading(
    service: &GradingService,
    request: &HttpRequest,
    competition_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

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

    // 统计 pending 数量
    let counts = match storage.count_submissions_by_status(competition_id).await {
        Ok(counts) => counts,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("统计提交状态失败: {e}"),
                )),
            );
        }
    };

    if counts.pending == 0 {
        return Ok(HttpResponse::Ok().json(ApiResponse::success(
            StartGradingResponse { enqueued: 0 },
            "没有待评分的提交",
        )));
    }

    // 组装评分流水线并交给后台任务，不等待批次完成
    let config = AppConfig::get();
    let evaluator = PromptEvaluator::new(
        service.get_oracle(request),
        config.grading.execution_temperature,
        config.grading.evaluation_temperature,
    );
    let grader = SubmissionGrader::new(evaluator, config.grading.run_count);
    let orchestrator =
        BatchOrchestrator::new(storage, service.get_cache(request), grader);

    tokio::spawn(async move {
        orchestrator.run_batch(competition_id).await;
    });

    info!(
        competition_id,
        enqueued = counts.pending,
        "Grading batch dispatched"
    );

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        StartGradingResponse {
            enqueued: counts.pending,
        },
        format!("已启动 {} 份提交的评分", counts.pending),
    )))
}
