use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CompetitionService;
use crate::models::competitions::responses::CompetitionDetailResponse;
use crate::models::submissions::requests::SubmissionListQuery;
use crate::models::{ApiResponse, ErrorCode};

/// 获取竞赛详情
/// GET /competitions/{id}
pub async fn get_competition(
    service: &CompetitionService,
    request: &HttpRequest,
    competition_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

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

    // 详情页取全部提交，沿用分页查询通道
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

    let response = CompetitionDetailResponse {
        competition,
        assignments,
        participants,
        submissions,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "查询成功")))
}
