//! Domain Entities
//!
//! Stored records carry `created_on`, `modified_on` and `deleted_on` as unix
//! seconds. `deleted_on == 0` means the row is live.

use kernel::id::{ArticleId, TagId};
use serde::Serialize;

/// Which rows a read may see
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scope {
    /// Only rows with `deleted_on = 0`
    #[default]
    Live,
    /// Soft-deleted rows too
    Unscoped,
}

// ============================================================================
// Tag
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tag {
    pub id: TagId,
    pub name: String,
    pub created_by: String,
    pub modified_by: String,
    pub state: i64,
    pub created_on: i64,
    pub modified_on: i64,
    pub deleted_on: i64,
}

impl Tag {
    pub fn is_live(&self) -> bool {
        self.deleted_on == 0
    }
}

/// Fields supplied when adding a tag
#[derive(Debug, Clone)]
pub struct NewTag {
    pub name: String,
    pub created_by: String,
    pub state: i64,
}

/// Partial tag update; `None` leaves the column untouched
#[derive(Debug, Clone, Default)]
pub struct TagPatch {
    pub name: Option<String>,
    pub modified_by: String,
    pub state: Option<i64>,
}

#[derive(Debug, Clone, Default)]
pub struct TagFilter {
    /// Exact name match
    pub name: Option<String>,
    pub state: Option<i64>,
}

// ============================================================================
// Article
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Article {
    pub id: ArticleId,
    pub tag_id: TagId,
    /// The referenced tag, when it is still live
    pub tag: Option<Tag>,
    pub title: String,
    pub desc: String,
    pub content: String,
    pub cover_image_url: String,
    pub created_by: String,
    pub modified_by: String,
    pub state: i64,
    pub created_on: i64,
    pub modified_on: i64,
    pub deleted_on: i64,
}

impl Article {
    pub fn is_live(&self) -> bool {
        self.deleted_on == 0
    }
}

#[derive(Debug, Clone)]
pub struct NewArticle {
    pub tag_id: TagId,
    pub title: String,
    pub desc: String,
    pub content: String,
    pub cover_image_url: String,
    pub created_by: String,
    pub state: i64,
}

/// Partial article update
///
/// `tag_id` and `modified_by` are always written; the rest only when set.
#[derive(Debug, Clone)]
pub struct ArticlePatch {
    pub tag_id: TagId,
    pub title: Option<String>,
    pub desc: Option<String>,
    pub content: Option<String>,
    pub cover_image_url: Option<String>,
    pub modified_by: String,
    pub state: Option<i64>,
}

#[derive(Debug, Clone, Default)]
pub struct ArticleFilter {
    pub tag_id: Option<TagId>,
    pub state: Option<i64>,
}
