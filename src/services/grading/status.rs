use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};

use super::GradingService;
use crate::models::{ApiResponse, ErrorCode};

/// 查询评分进度
/// GET /competitions/{competition_id}/grading/status
///
/// 永远直查存储，不走缓存：并发轮询必须看到实时状态。
pub async fn get_grading_status(
    service: &GradingService,
    request: &HttpRequest,
    competition_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.count_submissions_by_status(competition_id).await {
        Ok(counts) => Ok(HttpResponse::Ok().json(ApiResponse::success(counts, "查询成功"))),
        Err(e) => Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("统计提交状态失败: {e}"),
            )),
        ),
    }
}
