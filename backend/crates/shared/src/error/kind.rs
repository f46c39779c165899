//! Error Kind - Classification of errors
//!
//! Defines the [`ErrorKind`] enum that maps an error tier to an HTTP status.

use serde::Serialize;

/// エラー種別の列挙体
///
/// エラーを発生した層で分類し、HTTP ステータスコードへ対応付けます。
/// 業務ルール違反（未存在など）は想定内の結果であり、
/// ステータス 200 のままレスポンスボディの `code` で区別します。
///
/// ## Examples
/// ```rust
/// use kernel::error::kind::ErrorKind;
///
/// let kind = ErrorKind::InvalidParams;
/// assert_eq!(kind.status_code(), 400);
/// assert_eq!(kind.as_str(), "Invalid Params");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[non_exhaustive]
pub enum ErrorKind {
    /// 400 - 入力検証エラー（ストレージには到達しない）
    InvalidParams,
    /// 401 - 認証エラー（トークン欠落・不正・期限切れ、資格情報不一致）
    Unauthorized,
    /// 200 - 業務ルール違反（未存在、重複など想定内の結果）
    BusinessRule,
    /// 500 - ストレージ・基盤エラー
    Internal,
}

impl ErrorKind {
    /// HTTP ステータスコードを取得
    ///
    /// ## Examples
    /// ```rust
    /// use kernel::error::kind::ErrorKind;
    /// assert_eq!(ErrorKind::BusinessRule.status_code(), 200);
    /// assert_eq!(ErrorKind::Internal.status_code(), 500);
    /// ```
    #[inline]
    pub const fn status_code(&self) -> u16 {
        match self {
            ErrorKind::InvalidParams => 400,
            ErrorKind::Unauthorized => 401,
            ErrorKind::BusinessRule => 200,
            ErrorKind::Internal => 500,
        }
    }

    /// ログ向けの文字列表現を取得
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidParams => "Invalid Params",
            ErrorKind::Unauthorized => "Unauthorized",
            ErrorKind::BusinessRule => "Business Rule",
            ErrorKind::Internal => "Internal Error",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
