//! Response Code - Application-level result codes
//!
//! Every response carries one [`Code`] in the envelope's `code` field.
//! The HTTP status is secondary; clients branch on this value.

use serde::{Serialize, Serializer};

/// レスポンスコード
///
/// 各コードは固定のメッセージを持ちます。
/// 数値は既存クライアントとの互換性のため変更しないこと。
///
/// ## Examples
/// ```rust
/// use kernel::error::code::Code;
///
/// assert_eq!(Code::NotExistArticle.as_i32(), 10011);
/// assert_eq!(Code::Success.msg(), "ok");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Code {
    Success,
    Error,
    InvalidParams,

    ExistTag,
    ExistTagFail,
    NotExistTag,
    GetTagsFail,
    CountTagFail,
    AddTagFail,
    EditTagFail,
    DeleteTagFail,
    GetTagFail,

    NotExistArticle,
    CheckExistArticleFail,
    AddArticleFail,
    DeleteArticleFail,
    EditArticleFail,
    CountArticleFail,
    GetArticlesFail,
    GetArticleFail,

    AuthCheckTokenFail,
    AuthCheckTokenTimeout,
    AuthToken,
    Auth,

    UploadSaveImageFail,
    UploadCheckImageFail,
    UploadCheckImageFormat,
}

impl Code {
    /// 数値コードを取得
    pub const fn as_i32(&self) -> i32 {
        match self {
            Code::Success => 200,
            Code::Error => 500,
            Code::InvalidParams => 400,

            Code::ExistTag => 10001,
            Code::ExistTagFail => 10002,
            Code::NotExistTag => 10003,
            Code::GetTagsFail => 10004,
            Code::CountTagFail => 10005,
            Code::AddTagFail => 10006,
            Code::EditTagFail => 10007,
            Code::DeleteTagFail => 10008,
            Code::GetTagFail => 10020,

            Code::NotExistArticle => 10011,
            Code::CheckExistArticleFail => 10012,
            Code::AddArticleFail => 10013,
            Code::DeleteArticleFail => 10014,
            Code::EditArticleFail => 10015,
            Code::CountArticleFail => 10016,
            Code::GetArticlesFail => 10017,
            Code::GetArticleFail => 10018,

            Code::AuthCheckTokenFail => 20001,
            Code::AuthCheckTokenTimeout => 20002,
            Code::AuthToken => 20003,
            Code::Auth => 20004,

            Code::UploadSaveImageFail => 30001,
            Code::UploadCheckImageFail => 30002,
            Code::UploadCheckImageFormat => 30003,
        }
    }

    /// 固定メッセージを取得
    pub const fn msg(&self) -> &'static str {
        match self {
            Code::Success => "ok",
            Code::Error => "fail",
            Code::InvalidParams => "invalid request parameters",

            Code::ExistTag => "tag name already exists",
            Code::ExistTagFail => "failed to check tag existence",
            Code::NotExistTag => "tag does not exist",
            Code::GetTagsFail => "failed to list tags",
            Code::CountTagFail => "failed to count tags",
            Code::AddTagFail => "failed to add tag",
            Code::EditTagFail => "failed to edit tag",
            Code::DeleteTagFail => "failed to delete tag",
            Code::GetTagFail => "failed to get tag",

            Code::NotExistArticle => "article does not exist",
            Code::CheckExistArticleFail => "failed to check article existence",
            Code::AddArticleFail => "failed to add article",
            Code::DeleteArticleFail => "failed to delete article",
            Code::EditArticleFail => "failed to edit article",
            Code::CountArticleFail => "failed to count articles",
            Code::GetArticlesFail => "failed to list articles",
            Code::GetArticleFail => "failed to get article",

            Code::AuthCheckTokenFail => "token verification failed",
            Code::AuthCheckTokenTimeout => "token has expired",
            Code::AuthToken => "failed to generate token",
            Code::Auth => "invalid username or password",

            Code::UploadSaveImageFail => "failed to save image",
            Code::UploadCheckImageFail => "failed to check image",
            Code::UploadCheckImageFormat => "invalid image format or size",
        }
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.msg(), self.as_i32())
    }
}

impl Serialize for Code {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i32(self.as_i32())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    const ALL: &[Code] = &[
        Code::Success,
        Code::Error,
        Code::InvalidParams,
        Code::ExistTag,
        Code::ExistTagFail,
        Code::NotExistTag,
        Code::GetTagsFail,
        Code::CountTagFail,
        Code::AddTagFail,
        Code::EditTagFail,
        Code::DeleteTagFail,
        Code::GetTagFail,
        Code::NotExistArticle,
        Code::CheckExistArticleFail,
        Code::AddArticleFail,
        Code::DeleteArticleFail,
        Code::EditArticleFail,
        Code::CountArticleFail,
        Code::GetArticlesFail,
        Code::GetArticleFail,
        Code::AuthCheckTokenFail,
        Code::AuthCheckTokenTimeout,
        Code::AuthToken,
        Code::Auth,
        Code::UploadSaveImageFail,
        Code::UploadCheckImageFail,
        Code::UploadCheckImageFormat,
    ];

    #[test]
    fn test_codes_are_distinct() {
        let values: HashSet<i32> = ALL.iter().map(Code::as_i32).collect();
        assert_eq!(values.len(), ALL.len());
    }

    #[test]
    fn test_messages_are_non_empty() {
        assert!(ALL.iter().all(|c| !c.msg().is_empty()));
    }

    #[test]
    fn test_serializes_as_integer() {
        let json = serde_json::to_string(&Code::AuthCheckTokenTimeout).unwrap();
        assert_eq!(json, "20002");
    }
}
