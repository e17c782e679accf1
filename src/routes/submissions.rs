use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::models::submissions::requests::SubmissionListQuery;
use crate::services::SubmissionService;

// 懒加载的全局 SubmissionService 实例
static SUBMISSION_SERVICE: Lazy<SubmissionService> = Lazy::new(SubmissionService::new_lazy);

// 批量上传提交文件（multipart，多个 .txt）
pub async fn upload_submissions(
    req: HttpRequest,
    path: web::Path<i64>, // competition_id
    payload: Multipart,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .upload_submissions(&req, path.into_inner(), payload)
        .await
}

// 列出提交
pub async fn list_submissions(
    req: HttpRequest,
    path: web::Path<i64>, // competition_id
    query: web::Query<SubmissionListQuery>,
) -> ActixResult<HttpResponse> {
    SUBMISSION_SERVICE
        .list_submissions(&req, path.into_inner(), query.into_inner())
        .await
}

// 配置路由
pub fn configure_submissions_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/competitions/{competition_id}/submissions")
            .route("", web::get().to(list_submissions))
            .route("/upload", web::post().to(upload_submissions)),
    );
}
