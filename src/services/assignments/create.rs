use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::AssignmentService;
use crate::models::assignments::requests::CreateAssignmentRequest;
use crate::models::{ApiResponse, ErrorCode};

/// 创建赛题
/// POST /competitions/{competition_id}/assignments
pub async fn create_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    competition_id: i64,
    req: CreateAssignmentRequest,
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

    if req.name.trim().is_empty() || req.prompt.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "赛题名称与任务描述不能为空",
        )));
    }

    match storage.create_assignment(competition_id, req).await {
        Ok(assignment) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(assignment, "赛题创建成功")))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("创建赛题失败: {e}"),
            )),
        ),
    }
}
