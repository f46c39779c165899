//! Storage Lifecycle Hooks
//!
//! Services never hand raw statements to storage. They describe a [`Write`]
//! and [`Hooked`] turns it into a [`Statement`] before execution:
//!
//! - create: unset `created_on`/`modified_on` become now
//! - update: `modified_on` becomes now unless overridden
//! - delete: rewritten to `deleted_on = now` unless unscoped
//! - purge: physical removal of rows with `deleted_on != 0`
//!
//! [`TableWriter`] implementations execute statements verbatim and add no
//! timestamps of their own.

use std::sync::Arc;

use kernel::id::{Id, markers};
use platform::clock::Clock;

use crate::domain::entities::{Article, ArticlePatch, NewArticle, NewTag, Scope, Tag, TagPatch};
use crate::error::{StoreError, StoreResult};

/// A stored record type with the standard lifecycle columns
pub trait Entity: Send + Sync + 'static {
    type Marker: Send + Sync + 'static;
    type New: Send + Sync + 'static;
    type Patch: Send + Sync + 'static;

    /// Table name without prefix
    const TABLE: &'static str;
}

pub type EntityId<E> = Id<<E as Entity>::Marker>;

impl Entity for Tag {
    type Marker = markers::Tag;
    type New = NewTag;
    type Patch = TagPatch;
    const TABLE: &'static str = "tag";
}

impl Entity for Article {
    type Marker = markers::Article;
    type New = NewArticle;
    type Patch = ArticlePatch;
    const TABLE: &'static str = "article";
}

/// A write as requested by a service
pub enum Write<E: Entity> {
    Create {
        fields: E::New,
        created_on: Option<i64>,
        modified_on: Option<i64>,
    },
    Update {
        id: EntityId<E>,
        patch: E::Patch,
        /// Explicit modification time; suppresses the hook
        modified_on: Option<i64>,
    },
    Delete {
        id: EntityId<E>,
        scope: Scope,
    },
    Purge {
        /// Minimum age of a soft delete in seconds; 0 purges all of them
        older_than: i64,
    },
}

/// A write after the hooks ran, ready to execute
pub enum Statement<E: Entity> {
    Insert {
        fields: E::New,
        created_on: i64,
        modified_on: i64,
    },
    Update {
        id: EntityId<E>,
        patch: E::Patch,
        modified_on: i64,
    },
    SoftDelete {
        id: EntityId<E>,
        deleted_on: i64,
    },
    HardDelete {
        id: EntityId<E>,
    },
    Purge {
        /// Only rows with `0 < deleted_on < cutoff`; `None` means any nonzero
        deleted_before: Option<i64>,
    },
}

impl<E: Entity> Statement<E> {
    fn kind(&self) -> &'static str {
        match self {
            Statement::Insert { .. } => "insert",
            Statement::Update { .. } => "update",
            Statement::SoftDelete { .. } => "soft_delete",
            Statement::HardDelete { .. } => "hard_delete",
            Statement::Purge { .. } => "purge",
        }
    }
}

/// Apply the lifecycle hooks at time `now`
pub fn plan<E: Entity>(write: Write<E>, now: i64) -> Statement<E> {
    match write {
        Write::Create {
            fields,
            created_on,
            modified_on,
        } => Statement::Insert {
            fields,
            created_on: created_on.unwrap_or(now),
            modified_on: modified_on.unwrap_or(now),
        },
        Write::Update {
            id,
            patch,
            modified_on,
        } => Statement::Update {
            id,
            patch,
            modified_on: modified_on.unwrap_or(now),
        },
        Write::Delete {
            id,
            scope: Scope::Live,
        } => Statement::SoftDelete { id, deleted_on: now },
        Write::Delete {
            id,
            scope: Scope::Unscoped,
        } => Statement::HardDelete { id },
        Write::Purge { older_than } => Statement::Purge {
            deleted_before: (older_than > 0).then(|| now - older_than),
        },
    }
}

/// Outcome of one executed statement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Applied {
    pub rows_affected: u64,
    /// Set for inserts
    pub last_insert_id: Option<i64>,
}

impl Applied {
    pub fn inserted(id: i64) -> Self {
        Self {
            rows_affected: 1,
            last_insert_id: Some(id),
        }
    }

    pub fn affected(rows: u64) -> Self {
        Self {
            rows_affected: rows,
            last_insert_id: None,
        }
    }
}

/// Raw per-table statement execution
#[trait_variant::make(TableWriter: Send)]
pub trait LocalTableWriter<E: Entity> {
    async fn execute(&self, statement: Statement<E>) -> StoreResult<Applied>;
}

/// Writer decorated with the lifecycle hooks
pub struct Hooked<W> {
    writer: Arc<W>,
    clock: Arc<dyn Clock>,
}

impl<W> Clone for Hooked<W> {
    fn clone(&self) -> Self {
        Self {
            writer: self.writer.clone(),
            clock: self.clock.clone(),
        }
    }
}

impl<W> Hooked<W>
where
    W: Send + Sync + 'static,
{
    pub fn new(writer: Arc<W>, clock: Arc<dyn Clock>) -> Self {
        Self { writer, clock }
    }

    /// Plan and execute one write
    pub async fn apply<E: Entity>(&self, write: Write<E>) -> StoreResult<Applied>
    where
        W: TableWriter<E>,
    {
        let statement = plan(write, self.clock.unix());
        let kind = statement.kind();

        let applied = TableWriter::execute(&*self.writer, statement).await?;
        tracing::debug!(
            table = E::TABLE,
            statement = kind,
            rows = applied.rows_affected,
            "Write committed"
        );
        Ok(applied)
    }

    pub async fn create<E: Entity>(&self, fields: E::New) -> StoreResult<EntityId<E>>
    where
        W: TableWriter<E>,
    {
        let applied = self
            .apply(Write::<E>::Create {
                fields,
                created_on: None,
                modified_on: None,
            })
            .await?;
        applied
            .last_insert_id
            .map(Id::new)
            .ok_or(StoreError::MissingId)
    }

    pub async fn update<E: Entity>(&self, id: EntityId<E>, patch: E::Patch) -> StoreResult<u64>
    where
        W: TableWriter<E>,
    {
        let applied = self
            .apply(Write::<E>::Update {
                id,
                patch,
                modified_on: None,
            })
            .await?;
        Ok(applied.rows_affected)
    }

    /// Delete a row. `Scope::Live` soft-deletes it, `Scope::Unscoped` removes it.
    pub async fn delete<E: Entity>(&self, id: EntityId<E>, scope: Scope) -> StoreResult<u64>
    where
        W: TableWriter<E>,
    {
        let applied = self.apply(Write::<E>::Delete { id, scope }).await?;
        Ok(applied.rows_affected)
    }

    /// Physically remove every soft-deleted row at least `older_than` seconds old
    pub async fn purge<E: Entity>(&self, older_than: i64) -> StoreResult<u64>
    where
        W: TableWriter<E>,
    {
        let applied = self.apply(Write::<E>::Purge { older_than }).await?;
        Ok(applied.rows_affected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::id::TagId;
    use platform::clock::ManualClock;
    use std::sync::Mutex;

    fn new_tag() -> NewTag {
        NewTag {
            name: "rust".into(),
            created_by: "alice".into(),
            state: 1,
        }
    }

    #[test]
    fn test_create_stamps_unset_times() {
        let s = plan::<Tag>(
            Write::Create {
                fields: new_tag(),
                created_on: None,
                modified_on: None,
            },
            100,
        );
        assert!(matches!(
            s,
            Statement::Insert {
                created_on: 100,
                modified_on: 100,
                ..
            }
        ));
    }

    #[test]
    fn test_create_keeps_supplied_times() {
        let s = plan::<Tag>(
            Write::Create {
                fields: new_tag(),
                created_on: Some(5),
                modified_on: None,
            },
            100,
        );
        assert!(matches!(
            s,
            Statement::Insert {
                created_on: 5,
                modified_on: 100,
                ..
            }
        ));
    }

    #[test]
    fn test_update_override() {
        let s = plan::<Tag>(
            Write::Update {
                id: TagId::new(1),
                patch: TagPatch::default(),
                modified_on: Some(42),
            },
            100,
        );
        assert!(matches!(s, Statement::Update { modified_on: 42, .. }));

        let s = plan::<Tag>(
            Write::Update {
                id: TagId::new(1),
                patch: TagPatch::default(),
                modified_on: None,
            },
            100,
        );
        assert!(matches!(s, Statement::Update { modified_on: 100, .. }));
    }

    #[test]
    fn test_delete_is_rewritten_unless_unscoped() {
        let s = plan::<Tag>(
            Write::Delete {
                id: TagId::new(3),
                scope: Scope::Live,
            },
            100,
        );
        assert!(matches!(s, Statement::SoftDelete { deleted_on: 100, .. }));

        let s = plan::<Tag>(
            Write::Delete {
                id: TagId::new(3),
                scope: Scope::Unscoped,
            },
            100,
        );
        assert!(matches!(s, Statement::HardDelete { .. }));
    }

    #[test]
    fn test_purge_cutoff() {
        let s = plan::<Tag>(Write::Purge { older_than: 0 }, 100);
        assert!(matches!(s, Statement::Purge { deleted_before: None }));

        let s = plan::<Tag>(Write::Purge { older_than: 30 }, 100);
        assert!(matches!(s, Statement::Purge { deleted_before: Some(70) }));
    }

    /// Records the kind of every statement it receives
    #[derive(Default)]
    struct Recorder {
        seen: Mutex<Vec<(&'static str, i64)>>,
    }

    impl TableWriter<Tag> for Recorder {
        async fn execute(&self, statement: Statement<Tag>) -> StoreResult<Applied> {
            let entry = match &statement {
                Statement::Insert { created_on, .. } => ("insert", *created_on),
                Statement::Update { modified_on, .. } => ("update", *modified_on),
                Statement::SoftDelete { deleted_on, .. } => ("soft_delete", *deleted_on),
                Statement::HardDelete { .. } => ("hard_delete", 0),
                Statement::Purge { .. } => ("purge", 0),
            };
            self.seen.lock().unwrap().push(entry);
            Ok(match statement {
                Statement::Insert { .. } => Applied::inserted(9),
                _ => Applied::affected(1),
            })
        }
    }

    #[tokio::test]
    async fn test_hooked_uses_clock() {
        let writer = Arc::new(Recorder::default());
        let clock = Arc::new(ManualClock::at_unix(1_000));
        let hooked = Hooked::new(writer.clone(), clock.clone());

        let id = hooked.create::<Tag>(new_tag()).await.unwrap();
        assert_eq!(id, TagId::new(9));

        clock.advance(chrono::Duration::seconds(5));
        hooked.update::<Tag>(id, TagPatch::default()).await.unwrap();
        hooked.delete::<Tag>(id, Scope::Live).await.unwrap();

        let seen = writer.seen.lock().unwrap().clone();
        assert_eq!(
            seen,
            vec![("insert", 1_000), ("update", 1_005), ("soft_delete", 1_005)]
        );
    }
}
