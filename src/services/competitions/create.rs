use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CompetitionService;
use crate::models::competitions::requests::CreateCompetitionRequest;
use crate::models::{ApiResponse, ErrorCode};

/// 创建竞赛
/// POST /competitions
pub async fn create_competition(
    service: &CompetitionService,
    request: &HttpRequest,
    req: CreateCompetitionRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    if req.name.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "竞赛名称不能为空",
        )));
    }

    match storage.create_competition(req).await {
        Ok(competition) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(competition, "竞赛创建成功")))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("创建竞赛失败: {e}"),
            )),
        ),
    }
}
