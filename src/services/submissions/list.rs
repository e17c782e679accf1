use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::SubmissionService;
use crate::models::submissions::requests::SubmissionListQuery;
use crate::models::{ApiResponse, ErrorCode};

/// 列出提交（分页，支持按赛题/参赛者/状态筛选）
/// GET /competitions/{competition_id}/submissions
pub async fn list_submissions(
    service: &SubmissionService,
    request: &HttpRequest,
    competition_id: i64,
    query: SubmissionListQuery,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage
        .list_submissions_with_pagination(competition_id, query)
        .await
    {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response, "查询成功"))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询提交列表失败: {e}"),
            )),
        ),
    }
}
