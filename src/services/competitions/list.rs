use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::CompetitionService;
use crate::models::{ApiResponse, ErrorCode};

/// 列出全部竞赛
/// GET /competitions
pub async fn list_competitions(
    service: &CompetitionService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_competitions().await {
        Ok(competitions) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(competitions, "查询成功")))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询竞赛列表失败: {e}"),
            )),
        ),
    }
}
