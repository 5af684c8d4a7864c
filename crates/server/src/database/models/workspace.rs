use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::database::types::DUuid;
use crate::database::Database;
use crate::error::Error;

/// Per-user note container. Workspaces are never shared.
#[derive(Debug, Clone, FromRow)]
pub struct Workspace {
    pub id: DUuid,
    pub user_id: DUuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// Partial update; absent fields are left untouched. `description` may be
/// explicitly cleared by sending null.
#[derive(Debug, Default, Clone)]
pub struct WorkspacePatch {
    pub name: Option<String>,
    pub description: Option<Option<String>>,
}

impl Workspace {
    pub async fn create(
        owner_id: Uuid,
        name: &str,
        description: Option<&str>,
        db: &Database,
    ) -> Result<Workspace, Error> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::invalid("Workspace name is required"));
        }
        let description = description
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string);

        let id = DUuid::new();
        let now = OffsetDateTime::now_utc();

        sqlx::query(
            r#"
            INSERT INTO workspaces (id, user_id, name, description, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(id)
        .bind(DUuid::from(owner_id))
        .bind(name)
        .bind(description)
        .bind(now)
        .bind(now)
        .execute(&**db)
        .await?;

        Self::get(*id, owner_id, db)
            .await?
            .ok_or(Error::NotFoundOrDenied)
    }

    /// Owner-scoped lookup; another user's workspace is indistinguishable
    /// from a missing one.
    pub async fn get(id: Uuid, owner_id: Uuid, db: &Database) -> Result<Option<Workspace>, Error> {
        let workspace = sqlx::query_as::<_, Workspace>(
            r#"
            SELECT id, user_id, name, description, created_at, updated_at
            FROM workspaces
            WHERE id = ?1 AND user_id = ?2
            "#,
        )
        .bind(DUuid::from(id))
        .bind(DUuid::from(owner_id))
        .fetch_optional(&**db)
        .await?;

        Ok(workspace)
    }

    pub async fn list_for_owner(owner_id: Uuid, db: &Database) -> Result<Vec<Workspace>, Error> {
        let workspaces = sqlx::query_as::<_, Workspace>(
            r#"
            SELECT id, user_id, name, description, created_at, updated_at
            FROM workspaces
            WHERE user_id = ?1
            ORDER BY created_at DESC
            "#,
        )
        .bind(DUuid::from(owner_id))
        .fetch_all(&**db)
        .await?;

        Ok(workspaces)
    }

    /// Apply a patch field-by-field. An empty patch returns the current row
    /// without bumping `updated_at`.
    pub async fn update(
        id: Uuid,
        owner_id: Uuid,
        patch: WorkspacePatch,
        db: &Database,
    ) -> Result<Workspace, Error> {
        let existing = Self::get(id, owner_id, db)
            .await?
            .ok_or(Error::NotFoundOrDenied)?;

        if patch.name.is_none() && patch.description.is_none() {
            return Ok(existing);
        }

        let name = match patch.name {
            Some(name) => {
                let name = name.trim().to_string();
                if name.is_empty() {
                    return Err(Error::invalid("Workspace name cannot be empty"));
                }
                name
            }
            None => existing.name,
        };
        let description = match patch.description {
            Some(description) => description
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty()),
            None => existing.description,
        };

        sqlx::query(
            r#"
            UPDATE workspaces
            SET name = ?1, description = ?2, updated_at = ?3
            WHERE id = ?4 AND user_id = ?5
            "#,
        )
        .bind(&name)
        .bind(&description)
        .bind(OffsetDateTime::now_utc())
        .bind(DUuid::from(id))
        .bind(DUuid::from(owner_id))
        .execute(&**db)
        .await?;

        Self::get(id, owner_id, db)
            .await?
            .ok_or(Error::NotFoundOrDenied)
    }

    /// Delete an empty workspace. Blocks with `Conflict` while non-deleted
    /// notes remain in it; references held by soft-deleted notes are cleared
    /// first so the foreign key cannot dangle.
    pub async fn delete(id: Uuid, owner_id: Uuid, db: &Database) -> Result<(), Error> {
        let mut tx = db.begin().await?;

        let owned: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM workspaces WHERE id = ?1 AND user_id = ?2",
        )
        .bind(DUuid::from(id))
        .bind(DUuid::from(owner_id))
        .fetch_one(&mut *tx)
        .await?;
        if owned == 0 {
            return Err(Error::NotFoundOrDenied);
        }

        let live_notes: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM notes WHERE workspace_id = ?1 AND is_deleted = 0",
        )
        .bind(DUuid::from(id))
        .fetch_one(&mut *tx)
        .await?;
        if live_notes > 0 {
            return Err(Error::conflict("Workspace still contains notes"));
        }

        sqlx::query("UPDATE notes SET workspace_id = NULL WHERE workspace_id = ?1")
            .bind(DUuid::from(id))
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM workspaces WHERE id = ?1 AND user_id = ?2")
            .bind(DUuid::from(id))
            .bind(DUuid::from(owner_id))
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Non-deleted notes in this workspace owned by this user.
    pub async fn note_count(id: Uuid, owner_id: Uuid, db: &Database) -> Result<i64, Error> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM notes
            WHERE workspace_id = ?1 AND user_id = ?2 AND is_deleted = 0
            "#,
        )
        .bind(DUuid::from(id))
        .bind(DUuid::from(owner_id))
        .fetch_one(&**db)
        .await?;

        Ok(count)
    }
}
