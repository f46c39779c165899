//! API DTOs (Data Transfer Objects)
//!
//! Request forms carry their validation rules. Integer query parameters
//! arrive as strings so that an empty value means "not given".

use kernel::id::{ArticleId, TagId};
use platform::validation::{Constraint::*, Rule, Validate, Value, Violations};
use serde::{Deserialize, Serialize};

use crate::application::UploadImageOutput;
use crate::domain::entities::{
    ArticleFilter, ArticlePatch, NewArticle, NewTag, TagFilter, TagPatch,
};

/// Parse an optional integer query parameter; blank means absent
pub fn parse_int(field: &'static str, raw: Option<&str>) -> Result<Option<i64>, Violations> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s
            .parse()
            .map(Some)
            .map_err(|_| Violations::single(field, "must be an integer")),
    }
}

/// `{id}` path segment
#[derive(Debug, Clone, Copy)]
pub struct IdParam {
    pub id: i64,
}

impl Validate for IdParam {
    const RULES: &'static [Rule] = &[Rule::new("id", &[Required, Min(1)])];

    fn value(&self, field: &str) -> Value<'_> {
        match field {
            "id" => Value::Int(self.id),
            _ => Value::Missing,
        }
    }
}

/// Response for create endpoints
#[derive(Debug, Clone, Serialize)]
pub struct CreatedResponse {
    pub id: i64,
}

// ============================================================================
// Tags
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TagListQuery {
    pub name: Option<String>,
    pub state: Option<String>,
    pub page: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct TagListParams {
    pub name: Option<String>,
    pub state: Option<i64>,
    pub page: Option<i64>,
}

impl TagListQuery {
    pub fn parse(self) -> Result<TagListParams, Violations> {
        let params = TagListParams {
            name: self.name.filter(|n| !n.is_empty()),
            state: parse_int("state", self.state.as_deref())?,
            page: parse_int("page", self.page.as_deref())?,
        };
        params.validate()?;
        Ok(params)
    }
}

impl Validate for TagListParams {
    const RULES: &'static [Rule] = &[
        Rule::new("name", &[MaxSize(100)]),
        Rule::new("state", &[Range(0, 1)]),
    ];

    fn value(&self, field: &str) -> Value<'_> {
        match field {
            "name" => (&self.name).into(),
            "state" => self.state.into(),
            _ => Value::Missing,
        }
    }
}

impl TagListParams {
    pub fn filter(&self) -> TagFilter {
        TagFilter {
            name: self.name.clone(),
            state: self.state,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddTagForm {
    pub name: Option<String>,
    pub created_by: Option<String>,
    pub state: Option<i64>,
}

impl Validate for AddTagForm {
    const RULES: &'static [Rule] = &[
        Rule::new("name", &[Required, MaxSize(100)]),
        Rule::new("created_by", &[Required, MaxSize(100)]),
        Rule::new("state", &[Range(0, 1)]),
    ];

    fn value(&self, field: &str) -> Value<'_> {
        match field {
            "name" => (&self.name).into(),
            "created_by" => (&self.created_by).into(),
            "state" => self.state.into(),
            _ => Value::Missing,
        }
    }
}

impl AddTagForm {
    /// Call after `validate`
    pub fn into_new(self) -> NewTag {
        NewTag {
            name: self.name.unwrap_or_default(),
            created_by: self.created_by.unwrap_or_default(),
            state: self.state.unwrap_or(1),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EditTagForm {
    /// From the path
    #[serde(skip)]
    pub id: i64,
    pub name: Option<String>,
    pub modified_by: Option<String>,
    pub state: Option<i64>,
}

impl Validate for EditTagForm {
    const RULES: &'static [Rule] = &[
        Rule::new("id", &[Required, Min(1)]),
        Rule::new("name", &[MaxSize(100)]),
        Rule::new("modified_by", &[Required, MaxSize(100)]),
        Rule::new("state", &[Range(0, 1)]),
    ];

    fn value(&self, field: &str) -> Value<'_> {
        match field {
            "id" => Value::Int(self.id),
            "name" => (&self.name).into(),
            "modified_by" => (&self.modified_by).into(),
            "state" => self.state.into(),
            _ => Value::Missing,
        }
    }
}

impl EditTagForm {
    pub fn into_patch(self) -> (TagId, TagPatch) {
        (
            TagId::new(self.id),
            TagPatch {
                name: self.name,
                modified_by: self.modified_by.unwrap_or_default(),
                state: self.state,
            },
        )
    }
}

// ============================================================================
// Articles
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArticleListQuery {
    pub tag_id: Option<String>,
    pub state: Option<String>,
    pub page: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ArticleListParams {
    pub tag_id: Option<i64>,
    pub state: Option<i64>,
    pub page: Option<i64>,
}

impl ArticleListQuery {
    pub fn parse(self) -> Result<ArticleListParams, Violations> {
        let params = ArticleListParams {
            tag_id: parse_int("tag_id", self.tag_id.as_deref())?,
            state: parse_int("state", self.state.as_deref())?,
            page: parse_int("page", self.page.as_deref())?,
        };
        params.validate()?;
        Ok(params)
    }
}

impl Validate for ArticleListParams {
    const RULES: &'static [Rule] = &[
        Rule::new("tag_id", &[Min(1)]),
        Rule::new("state", &[Range(0, 1)]),
    ];

    fn value(&self, field: &str) -> Value<'_> {
        match field {
            "tag_id" => self.tag_id.into(),
            "state" => self.state.into(),
            _ => Value::Missing,
        }
    }
}

impl ArticleListParams {
    pub fn filter(&self) -> ArticleFilter {
        ArticleFilter {
            tag_id: self.tag_id.map(TagId::new),
            state: self.state,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddArticleForm {
    pub tag_id: Option<i64>,
    pub title: Option<String>,
    pub desc: Option<String>,
    pub content: Option<String>,
    pub created_by: Option<String>,
    pub cover_image_url: Option<String>,
    pub state: Option<i64>,
}

impl Validate for AddArticleForm {
    const RULES: &'static [Rule] = &[
        Rule::new("tag_id", &[Required, Min(1)]),
        Rule::new("title", &[Required, MaxSize(100)]),
        Rule::new("desc", &[Required, MaxSize(255)]),
        Rule::new("content", &[Required, MaxSize(65535)]),
        Rule::new("created_by", &[Required, MaxSize(100)]),
        Rule::new("cover_image_url", &[Required, MaxSize(255)]),
        Rule::new("state", &[Range(0, 1)]),
    ];

    fn value(&self, field: &str) -> Value<'_> {
        match field {
            "tag_id" => self.tag_id.into(),
            "title" => (&self.title).into(),
            "desc" => (&self.desc).into(),
            "content" => (&self.content).into(),
            "created_by" => (&self.created_by).into(),
            "cover_image_url" => (&self.cover_image_url).into(),
            "state" => self.state.into(),
            _ => Value::Missing,
        }
    }
}

impl AddArticleForm {
    /// Call after `validate`
    pub fn into_new(self) -> NewArticle {
        NewArticle {
            tag_id: TagId::new(self.tag_id.unwrap_or_default()),
            title: self.title.unwrap_or_default(),
            desc: self.desc.unwrap_or_default(),
            content: self.content.unwrap_or_default(),
            cover_image_url: self.cover_image_url.unwrap_or_default(),
            created_by: self.created_by.unwrap_or_default(),
            // An omitted state stores a draft
            state: self.state.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EditArticleForm {
    /// From the path
    #[serde(skip)]
    pub id: i64,
    pub tag_id: Option<i64>,
    pub title: Option<String>,
    pub desc: Option<String>,
    pub content: Option<String>,
    pub cover_image_url: Option<String>,
    pub modified_by: Option<String>,
    pub state: Option<i64>,
}

impl Validate for EditArticleForm {
    const RULES: &'static [Rule] = &[
        Rule::new("id", &[Required, Min(1)]),
        Rule::new("tag_id", &[Required, Min(1)]),
        Rule::new("title", &[MaxSize(100)]),
        Rule::new("desc", &[MaxSize(255)]),
        Rule::new("content", &[MaxSize(65535)]),
        Rule::new("cover_image_url", &[MaxSize(255)]),
        Rule::new("modified_by", &[Required, MaxSize(100)]),
        Rule::new("state", &[Range(0, 1)]),
    ];

    fn value(&self, field: &str) -> Value<'_> {
        match field {
            "id" => Value::Int(self.id),
            "tag_id" => self.tag_id.into(),
            "title" => (&self.title).into(),
            "desc" => (&self.desc).into(),
            "content" => (&self.content).into(),
            "cover_image_url" => (&self.cover_image_url).into(),
            "modified_by" => (&self.modified_by).into(),
            "state" => self.state.into(),
            _ => Value::Missing,
        }
    }
}

impl EditArticleForm {
    pub fn into_patch(self) -> (ArticleId, ArticlePatch) {
        (
            ArticleId::new(self.id),
            ArticlePatch {
                tag_id: TagId::new(self.tag_id.unwrap_or_default()),
                title: self.title,
                desc: self.desc,
                content: self.content,
                cover_image_url: self.cover_image_url,
                modified_by: self.modified_by.unwrap_or_default(),
                state: self.state,
            },
        )
    }
}

// ============================================================================
// Upload
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct UploadResponse {
    pub image_url: String,
    pub image_save_url: String,
}

impl From<UploadImageOutput> for UploadResponse {
    fn from(out: UploadImageOutput) -> Self {
        Self {
            image_url: out.image_url,
            image_save_url: out.image_save_url,
        }
    }
}
