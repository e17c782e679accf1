use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}$").expect("Invalid email regex")
});

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    // 邮箱格式校验：必须包含 @ 和 .
    if !EMAIL_RE.is_match(email) {
        return Err("Email format is invalid");
    }
    Ok(())
}

/// 参赛者姓名校验（导入与提交文件名匹配都依赖姓名非空）
pub fn validate_participant_name(name: &str) -> Result<(), &'static str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err("Participant name must not be empty");
    }
    if trimmed.chars().count() > 64 {
        return Err("Participant name must be at most 64 characters");
    }
    // 文件名匹配以下划线切分，姓名里不允许出现
    if trimmed.contains('_') {
        return Err("Participant name must not contain underscores");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_email() {
        assert!(validate_email("user@example.com").is_ok());
        assert!(validate_email("홍길동@example.co.kr").is_err());
        assert!(validate_email("not-an-email").is_err());
        assert!(validate_email("user@localhost").is_err());
    }

    #[test]
    fn test_validate_participant_name() {
        assert!(validate_participant_name("홍길동").is_ok());
        assert!(validate_participant_name("  ").is_err());
        assert!(validate_participant_name("kim_cs").is_err());
    }
}
