//! Application Error - Unified error type for the application
//!
//! Defines [`AppError`] struct and [`AppResult<T>`] type alias.

use std::borrow::Cow;
use std::error::Error;
use std::fmt;

use super::code::Code;
use super::kind::ErrorKind;

/// アプリケーション統一エラー型
///
/// プロジェクト全体で使用する標準エラー型です。
/// レスポンスでは `code` と固定メッセージのみを返し、
/// `detail` は診断用としてログにのみ残します。
///
/// ## Fields
/// * `kind` - エラーの層（HTTP ステータスコードにマッピング）
/// * `code` - レスポンスコード
/// * `detail` - 診断用の補足（オプション、レスポンスには含めない）
///
/// ## Examples
/// ```rust
/// use kernel::error::{app_error::AppError, code::Code, kind::ErrorKind};
///
/// let err = AppError::new(ErrorKind::BusinessRule, Code::NotExistArticle);
/// assert_eq!(err.status_code(), 200);
///
/// let err = AppError::new(ErrorKind::Internal, Code::GetArticleFail)
///     .with_detail("connection reset");
/// assert_eq!(err.status_code(), 500);
/// ```
#[derive(Debug)]
pub struct AppError {
    /// エラー種別
    kind: ErrorKind,
    /// レスポンスコード
    code: Code,
    /// 診断用の補足
    detail: Option<Cow<'static, str>>,
}

/// アプリケーション結果型エイリアス
///
/// `Result<T, AppError>` の省略形です。
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// 新しいエラーを作成
    #[inline]
    pub fn new(kind: ErrorKind, code: Code) -> Self {
        Self {
            kind,
            code,
            detail: None,
        }
    }

    /// 診断用の補足を設定
    #[inline]
    pub fn with_detail(mut self, detail: impl Into<Cow<'static, str>>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// エラー種別を取得
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// レスポンスコードを取得
    #[inline]
    pub fn code(&self) -> Code {
        self.code
    }

    /// HTTP ステータスコードを取得
    #[inline]
    pub fn status_code(&self) -> u16 {
        self.kind.status_code()
    }

    /// レスポンス用メッセージを取得
    #[inline]
    pub fn message(&self) -> &'static str {
        self.code.msg()
    }

    /// 診断用の補足を取得
    #[inline]
    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.kind, self.code)?;
        if let Some(detail) = &self.detail {
            write!(f, ": {}", detail)?;
        }
        Ok(())
    }
}

impl Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_error() {
        let err = AppError::new(ErrorKind::BusinessRule, Code::NotExistTag);
        assert_eq!(err.kind(), ErrorKind::BusinessRule);
        assert_eq!(err.code(), Code::NotExistTag);
        assert_eq!(err.status_code(), 200);
        assert_eq!(err.message(), "tag does not exist");
        assert!(err.detail().is_none());
    }

    #[test]
    fn test_with_detail() {
        let err = AppError::new(ErrorKind::Internal, Code::GetTagsFail).with_detail("pool closed");
        assert_eq!(err.detail(), Some("pool closed"));
        assert_eq!(err.status_code(), 500);
    }

    #[test]
    fn test_display() {
        let err = AppError::new(ErrorKind::BusinessRule, Code::NotExistArticle);
        assert_eq!(
            err.to_string(),
            "[Business Rule] article does not exist (10011)"
        );

        let err = AppError::new(ErrorKind::Internal, Code::Error).with_detail("pool closed");
        assert!(err.to_string().ends_with(": pool closed"));
    }
}
