//! 参赛者导入服务
//!
//! 支持 CSV 与 XLSX 两种名单格式，列名兼容韩文表头（이름/이메일/학번）。
//! 逐行校验，非法行与重名行以行号报告，不中断其余行的导入。

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use calamine::{Reader, Xlsx};
use futures_util::StreamExt;
use std::collections::HashSet;
use std::io::Cursor;
use tracing::error;

use super::ParticipantService;
use crate::config::AppConfig;
use crate::models::participants::entities::NewParticipant;
use crate::models::participants::responses::{ImportRowError, ParticipantImportResponse};
use crate::models::{ApiResponse, ErrorCode};
use crate::utils::validate::{validate_email, validate_participant_name};

/// 导入解析错误
#[derive(Debug)]
enum ImportParseError {
    MissingColumn(String),
    ParseFailed(String),
    EmptyFile,
}

impl ImportParseError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::MissingColumn(_) => ErrorCode::ImportFileMissingColumn,
            Self::ParseFailed(_) => ErrorCode::ImportFileParseFailed,
            Self::EmptyFile => ErrorCode::ImportFileDataInvalid,
        }
    }

    fn message(&self) -> String {
        match self {
            Self::MissingColumn(col) => format!("缺少必需列: {col}"),
            Self::ParseFailed(msg) => msg.clone(),
            Self::EmptyFile => "文件中没有数据".to_string(),
        }
    }
}

/// 导入行数据
#[derive(Debug, Clone)]
struct ImportRow {
    row_num: usize,
    name: String,
    email: Option<String>,
    student_id: Option<String>,
}

/// 导入参赛者
pub async fn import_participants(
    service: &ParticipantService,
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

    // 读取文件内容
    let (file_bytes, file_name) = match read_file_from_multipart(&mut payload).await {
        Ok(result) => result,
        Err(e) => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::FileUploadFailed,
                format!("文件读取失败: {e}"),
            )));
        }
    };

    if file_bytes.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::FileUploadFailed,
            "文件内容为空",
        )));
    }

    // 根据文件扩展名解析
    let rows = if file_name.ends_with(".xlsx") {
        match parse_xlsx(&file_bytes) {
            Ok(rows) => rows,
            Err(e) => {
                return Ok(HttpResponse::BadRequest()
                    .json(ApiResponse::error_empty(e.error_code(), e.message())));
            }
        }
    } else {
        match parse_csv(&file_bytes) {
            Ok(rows) => rows,
            Err(e) => {
                return Ok(HttpResponse::BadRequest()
                    .json(ApiResponse::error_empty(e.error_code(), e.message())));
            }
        }
    };

    if rows.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ImportFileDataInvalid,
            "文件中没有数据行",
        )));
    }

    let max_rows = AppConfig::get().upload.max_rows;
    if rows.len() > max_rows {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::ImportFileDataInvalid,
            format!("单次导入最多支持 {max_rows} 行"),
        )));
    }

    // 验证并过滤数据
    let mut errors: Vec<ImportRowError> = Vec::new();
    let mut valid_rows: Vec<ImportRow> = Vec::new();

    for row in &rows {
        let mut row_errors = validate_row(row);
        if row_errors.is_empty() {
            valid_rows.push(row.clone());
        } else {
            errors.append(&mut row_errors);
        }
    }

    // 与已有参赛者及文件内重复行做姓名冲突检查
    let existing_names: HashSet<String> = match storage.list_participants(competition_id).await {
        Ok(participants) => participants.into_iter().map(|p| p.name).collect(),
        Err(e) => {
            error!("查询现有参赛者失败: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("查询现有参赛者失败: {e}"),
                )),
            );
        }
    };

    let mut skipped = 0;
    let mut seen_names: HashSet<String> = HashSet::new();
    let mut to_create: Vec<NewParticipant> = Vec::new();

    for row in valid_rows {
        if existing_names.contains(&row.name) {
            skipped += 1;
            errors.push(ImportRowError {
                row: row.row_num,
                field: "name".to_string(),
                message: "参赛者已存在".to_string(),
            });
        } else if !seen_names.insert(row.name.clone()) {
            skipped += 1;
            errors.push(ImportRowError {
                row: row.row_num,
                field: "name".to_string(),
                message: "文件内姓名重复".to_string(),
            });
        } else {
            to_create.push(NewParticipant {
                name: row.name,
                email: row.email,
                student_id: row.student_id,
            });
        }
    }

    // 批量创建参赛者
    let mut success = 0;
    let mut failed = 0;

    if !to_create.is_empty() {
        let count = to_create.len();
        match storage.create_participants(competition_id, to_create).await {
            Ok(created) => success = created,
            Err(e) => {
                failed = count;
                error!("批量创建参赛者失败: {}", e);
                errors.push(ImportRowError {
                    row: 0,
                    field: "".to_string(),
                    message: format!("创建失败: {e}"),
                });
            }
        }
    }

    let response = ParticipantImportResponse {
        total: rows.len(),
        success,
        skipped,
        failed,
        errors,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "导入完成")))
}

async fn read_file_from_multipart(payload: &mut Multipart) -> Result<(Vec<u8>, String), String> {
    let mut file_bytes = Vec::new();
    let mut file_name = String::new();

    while let Some(item) = payload.next().await {
        let mut field = item.map_err(|e| format!("读取字段失败: {e}"))?;

        if field.name().map(|n| n == "file").unwrap_or(false) {
            // 获取文件名
            if let Some(content_disposition) = field.content_disposition() {
                file_name = content_disposition
                    .get_filename()
                    .unwrap_or("upload.csv")
                    .to_string();
            }

            // 读取内容
            while let Some(chunk) = field.next().await {
                let data = chunk.map_err(|e| format!("读取数据失败: {e}"))?;
                file_bytes.extend_from_slice(&data);
            }
        }
    }

    if file_bytes.is_empty() {
        return Err("未找到文件字段".to_string());
    }

    Ok((file_bytes, file_name))
}

/// 列名映射：同时兼容英文与韩文表头
fn column_index(header_map: &std::collections::HashMap<String, usize>, names: &[&str]) -> Option<usize> {
    names.iter().find_map(|n| header_map.get(*n).copied())
}

fn parse_csv(data: &[u8]) -> Result<Vec<ImportRow>, ImportParseError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(Cursor::new(data));

    // 检查表头
    let headers = rdr
        .headers()
        .map_err(|e| ImportParseError::ParseFailed(format!("读取表头失败: {e}")))?;
    let header_map: std::collections::HashMap<_, _> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| (h.trim().to_lowercase(), i))
        .collect();

    // 必需列：姓名；可选列：邮箱、学号
    let name_idx = column_index(&header_map, &["name", "이름"])
        .ok_or_else(|| ImportParseError::MissingColumn("name".to_string()))?;
    let email_idx = column_index(&header_map, &["email", "이메일"]);
    let student_id_idx = column_index(&header_map, &["student_id", "학번"]);

    let mut rows = Vec::new();

    for (row_num, result) in rdr.records().enumerate() {
        let record = result.map_err(|e| {
            ImportParseError::ParseFailed(format!("第 {} 行解析失败: {e}", row_num + 2))
        })?;

        let name = record.get(name_idx).unwrap_or("").trim().to_string();
        let email = email_idx
            .and_then(|i| record.get(i))
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());
        let student_id = student_id_idx
            .and_then(|i| record.get(i))
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty());

        rows.push(ImportRow {
            row_num: row_num + 2, // 1-based, skip header
            name,
            email,
            student_id,
        });
    }

    Ok(rows)
}

fn parse_xlsx(data: &[u8]) -> Result<Vec<ImportRow>, ImportParseError> {
    let cursor = Cursor::new(data);
    let mut workbook: Xlsx<_> = Xlsx::new(cursor)
        .map_err(|e| ImportParseError::ParseFailed(format!("打开 XLSX 失败: {e}")))?;

    // 获取第一个工作表
    let sheet_names = workbook.sheet_names().to_vec();
    let sheet_name = sheet_names
        .first()
        .ok_or_else(|| ImportParseError::ParseFailed("工作簿中没有工作表".to_string()))?;

    let range = workbook
        .worksheet_range(sheet_name)
        .map_err(|e| ImportParseError::ParseFailed(format!("读取工作表失败: {e}")))?;

    let mut rows_iter = range.rows();

    // 读取表头
    let header_row = rows_iter.next().ok_or(ImportParseError::EmptyFile)?;
    let header_map: std::collections::HashMap<_, _> = header_row
        .iter()
        .enumerate()
        .map(|(i, cell)| (cell.to_string().trim().to_lowercase(), i))
        .collect();

    let name_idx = column_index(&header_map, &["name", "이름"])
        .ok_or_else(|| ImportParseError::MissingColumn("name".to_string()))?;
    let email_idx = column_index(&header_map, &["email", "이메일"]);
    let student_id_idx = column_index(&header_map, &["student_id", "학번"]);

    let mut rows = Vec::new();

    for (row_num, row) in rows_iter.enumerate() {
        let get_cell = |idx: usize| -> String {
            row.get(idx)
                .map(|c| c.to_string().trim().to_string())
                .unwrap_or_default()
        };

        let name = get_cell(name_idx);
        let email = email_idx.map(get_cell).filter(|s| !s.is_empty());
        let student_id = student_id_idx.map(get_cell).filter(|s| !s.is_empty());

        rows.push(ImportRow {
            row_num: row_num + 2, // 1-based, skip header
            name,
            email,
            student_id,
        });
    }

    Ok(rows)
}

fn validate_row(row: &ImportRow) -> Vec<ImportRowError> {
    let mut errors = Vec::new();

    // 验证姓名
    if let Err(msg) = validate_participant_name(&row.name) {
        errors.push(ImportRowError {
            row: row.row_num,
            field: "name".to_string(),
            message: msg.to_string(),
        });
    }

    // 验证邮箱（可选字段，填了才校验）
    if let Some(email) = &row.email {
        if let Err(msg) = validate_email(email) {
            errors.push(ImportRowError {
                row: row.row_num,
                field: "email".to_string(),
                message: msg.to_string(),
            });
        }
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_csv_with_english_headers() {
        let data = b"name,email,student_id\nAlice,alice@example.com,20250001\nBob,,\n";
        let rows = parse_csv(data).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].name, "Alice");
        assert_eq!(rows[0].email.as_deref(), Some("alice@example.com"));
        assert_eq!(rows[0].student_id.as_deref(), Some("20250001"));
        assert_eq!(rows[1].name, "Bob");
        assert_eq!(rows[1].email, None);
        // 行号从 2 起算（表头占第 1 行）
        assert_eq!(rows[0].row_num, 2);
    }

    #[test]
    fn test_parse_csv_with_korean_headers() {
        let data = "이름,이메일,학번\n홍길동,hong@example.com,20250002\n".as_bytes();
        let rows = parse_csv(data).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "홍길동");
        assert_eq!(rows[0].student_id.as_deref(), Some("20250002"));
    }

    #[test]
    fn test_parse_csv_missing_name_column() {
        let data = b"email,student_id\nalice@example.com,20250001\n";
        let err = parse_csv(data).unwrap_err();

        assert!(matches!(err, ImportParseError::MissingColumn(_)));
    }

    #[test]
    fn test_validate_row_reports_bad_email() {
        let row = ImportRow {
            row_num: 3,
            name: "Alice".to_string(),
            email: Some("not-an-email".to_string()),
            student_id: None,
        };

        let errors = validate_row(&row);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].row, 3);
        assert_eq!(errors[0].field, "email");
    }
}
