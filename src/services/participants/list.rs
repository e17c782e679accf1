use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::ParticipantService;
use crate::models::{ApiResponse, ErrorCode};

/// 列出竞赛下的全部参赛者
/// GET /competitions/{competition_id}/participants
pub async fn list_participants(
    service: &ParticipantService,
    request: &HttpRequest,
    competition_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_participants(competition_id).await {
        Ok(participants) => {
            Ok(HttpResponse::Ok().json(ApiResponse::success(participants, "查询成功")))
        }
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("查询参赛者列表失败: {e}"),
            )),
        ),
    }
}
