//! 提交文件批量上传服务
//!
//! 一次 multipart 请求携带多个 .txt 提示词文件，文件名约定为
//! `{参赛者姓名}_{赛题名称}.txt`（赛题名称可含下划线）。匹配成功的文件
//! 以 pending 状态入库等待评分，匹配失败的文件逐个报告原因后跳过。

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use futures_util::StreamExt;
use std::collections::HashMap;
use tracing::{error, info};

use super::SubmissionService;
use crate::cache::{leaderboard_cache_key, report_cache_key};
use crate::models::submissions::responses::SubmissionUploadResponse;
use crate::models::{ApiResponse, ErrorCode};

/// 上传的单个文件
struct UploadedFile {
    file_name: String,
    content: Vec<u8>,
}

/// 批量上传提交
/// POST /competitions/{competition_id}/submissions/upload
pub async fn upload_submissions(
    service: &SubmissionService,
    request: &HttpRequest,
    competition_id: i64,
    mut payload: Multipart,
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

    // 读取全部上传文件
    let files = match read_files_from_multipart(&mut payload).await {
        Ok(files) => files,
        Err(e) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::FileUploadFailed,
                format!("文件读取失败: {e}"),
            )));
        }
    };

    if files.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::FileUploadFailed,
            "未找到上传文件",
        )));
    }

    // 构建姓名/赛题名称索引
    let participants = match storage.list_participants(competition_id).await {
        Ok(list) => list,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询参赛者失败: {e}"),
                )),
            );
        }
    };
    let participant_map: HashMap<String, i64> = participants
        .into_iter()
        .map(|p| (p.name, p.id))
        .collect();

    let assignments = match storage.list_assignments(competition_id).await {
        Ok(list) => list,
        Err(e) => {
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询赛题失败: {e}"),
                )),
            );
        }
    };
    let assignment_map: HashMap<String, i64> =
        assignments.into_iter().map(|a| (a.name, a.id)).collect();

    let mut uploaded = 0;
    let mut skipped: Vec<String> = Vec::new();

    for file in files {
        let Some(base_name) = file.file_name.strip_suffix(".txt") else {
            skipped.push(format!("{} (仅支持 .txt 文件)", file.file_name));
            continue;
        };

        // 文件名约定：{参赛者}_{赛题}，赛题名称可含下划线
        let Some((participant_name, assignment_name)) = base_name.split_once('_') else {
            skipped.push(format!("{} (文件名格式应为 참가자_과제.txt)", file.file_name));
            continue;
        };

        let participant_id = participant_map.get(participant_name);
        let assignment_id = assignment_map.get(assignment_name);

        let (Some(&participant_id), Some(&assignment_id)) = (participant_id, assignment_id) else {
            skipped.push(format!(
                "{}_{} (participant: {}, assignment: {})",
                participant_name,
                assignment_name,
                participant_map.contains_key(participant_name),
                assignment_map.contains_key(assignment_name)
            ));
            continue;
        };

        let prompt_text = match String::from_utf8(file.content) {
            Ok(text) => text,
            Err(_) => {
                skipped.push(format!("{} (不是有效的 UTF-8 文本)", file.file_name));
                continue;
            }
        };

        match storage
            .create_submission(competition_id, participant_id, assignment_id, prompt_text)
            .await
        {
            Ok(_) => uploaded += 1,
            Err(e) => {
                error!("创建提交失败: {}", e);
                skipped.push(format!("{} (创建失败: {e})", file.file_name));
            }
        }
    }

    // 新提交会改变聚合口径，失效排行榜与报告缓存
    if uploaded > 0 {
        let cache = service.get_cache(request);
        cache.remove(&leaderboard_cache_key(competition_id)).await;
        cache.remove(&report_cache_key(competition_id)).await;
    }

    info!(
        competition_id,
        uploaded,
        skipped = skipped.len(),
        "Submission upload finished"
    );

    let response = SubmissionUploadResponse { uploaded, skipped };
    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "上传完成")))
}

async fn read_files_from_multipart(payload: &mut Multipart) -> Result<Vec<UploadedFile>, String> {
    let mut files = Vec::new();

    while let Some(item) = payload.next().await {
        let mut field = item.map_err(|e| format!("读取字段失败: {e}"))?;

        let file_name = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .map(|n| n.to_string());

        let Some(file_name) = file_name else {
            continue; // 非文件字段
        };

        let mut content = Vec::new();
        while let Some(chunk) = field.next().await {
            let data = chunk.map_err(|e| format!("读取数据失败: {e}"))?;
            content.extend_from_slice(&data);
        }

        files.push(UploadedFile { file_name, content });
    }

    Ok(files)
}
