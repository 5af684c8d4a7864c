use serde::{Deserialize, Serialize};
use sqlx::{FromRow, QueryBuilder, Sqlite};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::database::access;
use crate::database::types::{DBool, DUuid};
use crate::database::Database;
use crate::error::Error;

const NOTE_COLUMNS: &str =
    "id, user_id, workspace_id, title, content, is_deleted, created_at, updated_at, deleted_at";

/// A note owned by exactly one user. Soft-deleted rows stay in the table
/// but are invisible to every read path.
#[derive(Debug, Clone, FromRow)]
pub struct Note {
    pub id: DUuid,
    pub user_id: DUuid,
    pub workspace_id: Option<DUuid>,
    pub title: String,
    pub content: String,
    pub is_deleted: DBool,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
    pub deleted_at: Option<OffsetDateTime>,
}

#[derive(Debug, Clone)]
pub struct NoteWithTags {
    pub note: Note,
    pub tags: Vec<String>,
}

/// Partial update applied field-by-field; absent fields are left unchanged.
/// `workspace_id` is tri-state: absent, null (detach from workspace), or a
/// workspace id.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct NotePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(
        default,
        with = "serde_with::rust::double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub workspace_id: Option<Option<Uuid>>,
}

impl NotePatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.workspace_id.is_none()
    }
}

/// Search filters; all present filters compose with AND.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct SearchFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace_id: Option<Uuid>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub start_date: Option<OffsetDateTime>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub end_date: Option<OffsetDateTime>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

/// Quote each whitespace-separated token so FTS5 operators in user input
/// cannot break the MATCH expression; tokens AND-compose.
fn fts_match_expr(raw: &str) -> Option<String> {
    let tokens: Vec<String> = raw
        .split_whitespace()
        .map(|t| format!("\"{}\"", t.replace('"', "\"\"")))
        .collect();
    if tokens.is_empty() {
        None
    } else {
        Some(tokens.join(" "))
    }
}

impl Note {
    /// Create a note, optionally inside one of the owner's workspaces, and
    /// attach any given tags under the owner's vocabulary.
    pub async fn create(
        owner_id: Uuid,
        title: &str,
        content: &str,
        workspace_id: Option<Uuid>,
        tags: &[String],
        db: &Database,
    ) -> Result<NoteWithTags, Error> {
        let title = title.trim();
        if title.is_empty() {
            return Err(Error::invalid("Title is required"));
        }
        let content = content.trim();
        if content.is_empty() {
            return Err(Error::invalid("Content is required"));
        }

        if let Some(workspace_id) = workspace_id {
            if !workspace_owned_by(workspace_id, owner_id, &**db).await? {
                return Err(Error::NotFoundOrDenied);
            }
        }

        let id = DUuid::new();
        let now = OffsetDateTime::now_utc();

        sqlx::query(
            r#"
            INSERT INTO notes (id, user_id, workspace_id, title, content, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(id)
        .bind(DUuid::from(owner_id))
        .bind(workspace_id.map(DUuid::from))
        .bind(title)
        .bind(content)
        .bind(now)
        .bind(now)
        .execute(&**db)
        .await?;

        if !tags.is_empty() {
            super::Tag::attach_to_note(*id, owner_id, tags, db).await?;
        }

        Self::get_with_tags(*id, owner_id, db).await
    }

    /// Visible to the owner and to read/edit share holders; soft-deleted
    /// notes are invisible to everyone.
    pub async fn get_with_tags(
        note_id: Uuid,
        requester_id: Uuid,
        db: &Database,
    ) -> Result<NoteWithTags, Error> {
        let access = access::resolve_access(note_id, requester_id, &**db).await?;
        if !access.can_read() {
            return Err(Error::NotFoundOrDenied);
        }

        let note = Self::fetch(note_id, &**db)
            .await?
            .ok_or(Error::NotFoundOrDenied)?;
        let tags = Self::tag_names(note_id, db).await?;

        Ok(NoteWithTags { note, tags })
    }

    /// Attach tags to a note under the requester's own vocabulary. Requires
    /// edit access on the note.
    pub async fn attach_tags(
        note_id: Uuid,
        requester_id: Uuid,
        names: &[String],
        db: &Database,
    ) -> Result<NoteWithTags, Error> {
        let access = access::resolve_access(note_id, requester_id, &**db).await?;
        if !access.can_edit() {
            return Err(Error::NotFoundOrDenied);
        }

        super::Tag::attach_to_note(note_id, requester_id, names, db).await?;
        Self::get_with_tags(note_id, requester_id, db).await
    }

    /// The owner's own non-deleted notes, most recently updated first.
    /// Shared-with-me notes are listed through the sharing views instead.
    pub async fn list_for_owner(
        owner_id: Uuid,
        page: u32,
        page_size: u32,
        db: &Database,
    ) -> Result<(Vec<NoteWithTags>, i64), Error> {
        let limit = page_size as i64;
        let offset = (page.saturating_sub(1) as i64) * limit;

        let notes = sqlx::query_as::<_, Note>(&format!(
            r#"
            SELECT {NOTE_COLUMNS} FROM notes
            WHERE user_id = ?1 AND is_deleted = 0
            ORDER BY updated_at DESC
            LIMIT ?2 OFFSET ?3
            "#
        ))
        .bind(DUuid::from(owner_id))
        .bind(limit)
        .bind(offset)
        .fetch_all(&**db)
        .await?;

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM notes WHERE user_id = ?1 AND is_deleted = 0",
        )
        .bind(DUuid::from(owner_id))
        .fetch_one(&**db)
        .await?;

        let mut with_tags = Vec::with_capacity(notes.len());
        for note in notes {
            let tags = Self::tag_names(*note.id, db).await?;
            with_tags.push(NoteWithTags { note, tags });
        }

        Ok((with_tags, total))
    }

    /// Apply a patch under edit access. The access check and the write run
    /// in one transaction so a concurrent revoke cannot land in between.
    /// A failed validation touches no fields.
    pub async fn update(
        note_id: Uuid,
        requester_id: Uuid,
        patch: NotePatch,
        db: &Database,
    ) -> Result<NoteWithTags, Error> {
        let mut tx = db.begin().await?;

        let access = access::resolve_access(note_id, requester_id, &mut *tx).await?;
        if !access.can_edit() {
            return Err(Error::NotFoundOrDenied);
        }

        if patch.is_empty() {
            drop(tx);
            return Self::get_with_tags(note_id, requester_id, db).await;
        }

        let title = match patch.title {
            Some(title) => {
                let title = title.trim().to_string();
                if title.is_empty() {
                    return Err(Error::invalid("Title cannot be empty"));
                }
                Some(title)
            }
            None => None,
        };
        let content = match patch.content {
            Some(content) => {
                let content = content.trim().to_string();
                if content.is_empty() {
                    return Err(Error::invalid("Content cannot be empty"));
                }
                Some(content)
            }
            None => None,
        };
        if let Some(Some(workspace_id)) = patch.workspace_id {
            if !workspace_owned_by(workspace_id, requester_id, &mut *tx).await? {
                return Err(Error::NotFoundOrDenied);
            }
        }

        let existing = Self::fetch(note_id, &mut *tx)
            .await?
            .ok_or(Error::NotFoundOrDenied)?;

        let title = title.unwrap_or(existing.title);
        let content = content.unwrap_or(existing.content);
        let workspace_id = match patch.workspace_id {
            Some(workspace_id) => workspace_id.map(DUuid::from),
            None => existing.workspace_id,
        };

        sqlx::query(
            r#"
            UPDATE notes
            SET title = ?1, content = ?2, workspace_id = ?3, updated_at = ?4
            WHERE id = ?5
            "#,
        )
        .bind(&title)
        .bind(&content)
        .bind(workspace_id)
        .bind(OffsetDateTime::now_utc())
        .bind(DUuid::from(note_id))
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Self::get_with_tags(note_id, requester_id, db).await
    }

    /// Owner-only soft delete; edit-share recipients cannot delete.
    pub async fn soft_delete(note_id: Uuid, owner_id: Uuid, db: &Database) -> Result<(), Error> {
        let mut tx = db.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE notes
            SET is_deleted = 1, deleted_at = ?1
            WHERE id = ?2 AND user_id = ?3 AND is_deleted = 0
            "#,
        )
        .bind(OffsetDateTime::now_utc())
        .bind(DUuid::from(note_id))
        .bind(DUuid::from(owner_id))
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFoundOrDenied);
        }

        tx.commit().await?;
        Ok(())
    }

    /// Search the owner's notes. Filters AND-compose: full-text query over
    /// title+content, workspace, inclusive created-date range, and a tag
    /// set the note must carry in full. The count reflects the same filter
    /// set as the page of rows.
    pub async fn search(
        owner_id: Uuid,
        filters: &SearchFilters,
        page: u32,
        page_size: u32,
        db: &Database,
    ) -> Result<(Vec<NoteWithTags>, i64), Error> {
        let limit = page_size as i64;
        let offset = (page.saturating_sub(1) as i64) * limit;

        let mut rows_qb = QueryBuilder::<Sqlite>::new(format!(
            "SELECT {} ",
            NOTE_COLUMNS
                .split(", ")
                .map(|c| format!("n.{c}"))
                .collect::<Vec<_>>()
                .join(", ")
        ));
        push_search_clauses(&mut rows_qb, owner_id, filters);
        rows_qb.push(" ORDER BY n.updated_at DESC LIMIT ");
        rows_qb.push_bind(limit);
        rows_qb.push(" OFFSET ");
        rows_qb.push_bind(offset);

        let notes = rows_qb
            .build_query_as::<Note>()
            .fetch_all(&**db)
            .await?;

        let mut count_qb = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM (SELECT n.id ");
        push_search_clauses(&mut count_qb, owner_id, filters);
        count_qb.push(")");

        let total: i64 = count_qb.build_query_scalar().fetch_one(&**db).await?;

        let mut with_tags = Vec::with_capacity(notes.len());
        for note in notes {
            let tags = Self::tag_names(*note.id, db).await?;
            with_tags.push(NoteWithTags { note, tags });
        }

        Ok((with_tags, total))
    }

    async fn fetch<'e, E>(note_id: Uuid, executor: E) -> Result<Option<Note>, Error>
    where
        E: sqlx::SqliteExecutor<'e>,
    {
        let note = sqlx::query_as::<_, Note>(&format!(
            "SELECT {NOTE_COLUMNS} FROM notes WHERE id = ?1 AND is_deleted = 0"
        ))
        .bind(DUuid::from(note_id))
        .fetch_optional(executor)
        .await?;

        Ok(note)
    }

    async fn tag_names(note_id: Uuid, db: &Database) -> Result<Vec<String>, Error> {
        let names: Vec<String> = sqlx::query_scalar(
            r#"
            SELECT t.name FROM tags t
            INNER JOIN note_tags nt ON nt.tag_id = t.id
            WHERE nt.note_id = ?1
            ORDER BY t.name ASC
            "#,
        )
        .bind(DUuid::from(note_id))
        .fetch_all(&**db)
        .await?;

        Ok(names)
    }
}

async fn workspace_owned_by<'e, E>(
    workspace_id: Uuid,
    owner_id: Uuid,
    executor: E,
) -> Result<bool, Error>
where
    E: sqlx::SqliteExecutor<'e>,
{
    let count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM workspaces WHERE id = ?1 AND user_id = ?2")
            .bind(DUuid::from(workspace_id))
            .bind(DUuid::from(owner_id))
            .fetch_one(executor)
            .await?;

    Ok(count > 0)
}

/// Shared FROM/WHERE assembly for the search row and count queries, so both
/// always see the same filter set.
fn push_search_clauses(qb: &mut QueryBuilder<'_, Sqlite>, owner_id: Uuid, filters: &SearchFilters) {
    qb.push("FROM notes n ");

    let tags: Vec<String> = filters
        .tags
        .iter()
        .map(|t| t.trim().to_lowercase())
        .filter(|t| !t.is_empty())
        .collect();

    if !tags.is_empty() {
        qb.push(
            "INNER JOIN note_tags nt ON nt.note_id = n.id \
             INNER JOIN tags t ON t.id = nt.tag_id ",
        );
    }

    qb.push("WHERE n.user_id = ");
    qb.push_bind(DUuid::from(owner_id));
    qb.push(" AND n.is_deleted = 0");

    if let Some(expr) = filters.query.as_deref().and_then(fts_match_expr) {
        qb.push(" AND n.rowid IN (SELECT rowid FROM notes_fts WHERE notes_fts MATCH ");
        qb.push_bind(expr);
        qb.push(")");
    }

    if let Some(workspace_id) = filters.workspace_id {
        qb.push(" AND n.workspace_id = ");
        qb.push_bind(DUuid::from(workspace_id));
    }

    if let Some(start) = filters.start_date {
        qb.push(" AND n.created_at >= ");
        qb.push_bind(start);
    }
    if let Some(end) = filters.end_date {
        qb.push(" AND n.created_at <= ");
        qb.push_bind(end);
    }

    if !tags.is_empty() {
        let count = tags.len() as i64;
        qb.push(" AND t.name IN (");
        let mut separated = qb.separated(", ");
        for tag in tags {
            separated.push_bind(tag);
        }
        separated.push_unseparated(")");
        // The join duplicates rows per matching tag; group and require every
        // listed tag to be present.
        qb.push(" GROUP BY n.id HAVING COUNT(DISTINCT t.name) = ");
        qb.push_bind(count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fts_match_expr_quotes_tokens() {
        assert_eq!(fts_match_expr("hello world"), Some("\"hello\" \"world\"".into()));
        assert_eq!(fts_match_expr("  "), None);
        // FTS5 operators and quotes are neutralized
        assert_eq!(fts_match_expr("a OR b"), Some("\"a\" \"OR\" \"b\"".into()));
        assert_eq!(fts_match_expr("say \"hi\""), Some("\"say\" \"\"\"hi\"\"\"".into()));
    }

    #[test]
    fn test_patch_workspace_tristate() {
        let absent: NotePatch = serde_json::from_str(r#"{"title":"t"}"#).unwrap();
        assert_eq!(absent.workspace_id, None);

        let cleared: NotePatch = serde_json::from_str(r#"{"workspace_id":null}"#).unwrap();
        assert_eq!(cleared.workspace_id, Some(None));

        let set: NotePatch =
            serde_json::from_str(r#"{"workspace_id":"00000000-0000-0000-0000-000000000001"}"#)
                .unwrap();
        assert!(matches!(set.workspace_id, Some(Some(_))));
    }
}
