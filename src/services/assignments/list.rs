use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssignmentService;
use crate::models::{ApiResponse, ErrorCode};

/// 列出竞赛下的全部赛题
/// GET /competitions/{competition_id}/assignments
pub async fn list_assignments(
    service: &AssignmentService,
    request: &HttpRequest,
    competition_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_assignments(competition_id).await {
        Ok(assignments) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(assignments, "查询成功")))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询赛题列表失败: {e}"),
            )),
        ),
    }
}
