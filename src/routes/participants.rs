use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::services::ParticipantService;

// 懒加载的全局 ParticipantService 实例
static PARTICIPANT_SERVICE: Lazy<ParticipantService> = Lazy::new(ParticipantService::new_lazy);

// 导入参赛者名单（CSV/XLSX）
pub async fn import_participants(
    req: HttpRequest,
    path: web::Path<i64>, // competition_id
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    PARTICIPANT_SERVICE
        .import_participants(&req, path.into_inner(), payload)
        .await
}

// 列出参赛者
pub async fn list_participants(
    req: HttpRequest,
    path: web::Path<i64>, // competition_id
) -> ActixResult<HttpResponse> {
    PARTICIPANT_SERVICE
        .list_participants(&req, path.into_inner())
        .await
}

// 配置路由
pub fn configure_participants_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/competitions/{competition_id}/participants")
            .route("", web::get().to(list_participants))
            .route("/import", web::post().to(import_participants)),
    );
}
