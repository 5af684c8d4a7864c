use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::database::access;
use crate::database::types::DUuid;
use crate::database::Database;
use crate::error::Error;

/// Per-user tag vocabulary entry. Names are normalized (trimmed,
/// lower-cased) and unique per owner.
#[derive(Debug, Clone, FromRow)]
pub struct Tag {
    pub id: DUuid,
    pub user_id: DUuid,
    pub name: String,
    pub created_at: OffsetDateTime,
}

fn normalize(name: &str) -> String {
    name.trim().to_lowercase()
}

impl Tag {
    pub async fn list_for_owner(owner_id: Uuid, db: &Database) -> Result<Vec<Tag>, Error> {
        let tags = sqlx::query_as::<_, Tag>(
            r#"
            SELECT id, user_id, name, created_at
            FROM tags
            WHERE user_id = ?1
            ORDER BY name ASC
            "#,
        )
        .bind(DUuid::from(owner_id))
        .fetch_all(&**db)
        .await?;

        Ok(tags)
    }

    pub async fn get(id: Uuid, owner_id: Uuid, db: &Database) -> Result<Option<Tag>, Error> {
        let tag = sqlx::query_as::<_, Tag>(
            r#"
            SELECT id, user_id, name, created_at
            FROM tags
            WHERE id = ?1 AND user_id = ?2
            "#,
        )
        .bind(DUuid::from(id))
        .bind(DUuid::from(owner_id))
        .fetch_optional(&**db)
        .await?;

        Ok(tag)
    }

    /// Idempotent get-or-create under the owner's vocabulary. A second call
    /// with the same (case-insensitive) name returns the existing row.
    pub async fn get_or_create(owner_id: Uuid, name: &str, db: &Database) -> Result<Tag, Error> {
        let name = normalize(name);
        if name.is_empty() {
            return Err(Error::invalid("Tag name is required"));
        }

        if let Some(existing) = Self::find_by_name(owner_id, &name, db).await? {
            return Ok(existing);
        }

        let id = DUuid::new();
        let result = sqlx::query(
            r#"
            INSERT INTO tags (id, user_id, name, created_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(id)
        .bind(DUuid::from(owner_id))
        .bind(&name)
        .bind(OffsetDateTime::now_utc())
        .execute(&**db)
        .await;

        match result {
            Ok(_) => Self::get(*id, owner_id, db)
                .await?
                .ok_or(Error::NotFoundOrDenied),
            // Lost a race with a concurrent insert of the same name.
            Err(e) if Error::is_unique_violation(&e) => Self::find_by_name(owner_id, &name, db)
                .await?
                .ok_or(Error::Upstream(e)),
            Err(e) => Err(Error::Upstream(e)),
        }
    }

    async fn find_by_name(
        owner_id: Uuid,
        normalized: &str,
        db: &Database,
    ) -> Result<Option<Tag>, Error> {
        let tag = sqlx::query_as::<_, Tag>(
            r#"
            SELECT id, user_id, name, created_at
            FROM tags
            WHERE user_id = ?1 AND name = ?2
            "#,
        )
        .bind(DUuid::from(owner_id))
        .bind(normalized)
        .fetch_optional(&**db)
        .await?;

        Ok(tag)
    }

    /// Attach tags to a note under `owner_id`'s vocabulary. Blank names are
    /// skipped and re-attaching an existing tag is a no-op.
    ///
    /// Deliberately not access-checked here: callers own the authorization
    /// context of the note mutation they are running within, and attachment
    /// during note creation always uses the creating owner's id.
    pub async fn attach_to_note(
        note_id: Uuid,
        owner_id: Uuid,
        names: &[String],
        db: &Database,
    ) -> Result<(), Error> {
        for name in names {
            let name = normalize(name);
            if name.is_empty() {
                continue;
            }

            let tag = Self::get_or_create(owner_id, &name, db).await?;

            sqlx::query("INSERT OR IGNORE INTO note_tags (note_id, tag_id) VALUES (?1, ?2)")
                .bind(DUuid::from(note_id))
                .bind(tag.id)
                .execute(&**db)
                .await?;
        }

        Ok(())
    }

    /// Remove a tag from a note. Requires edit access on the note; a missing
    /// tag or link is a no-op, not an error.
    pub async fn detach_from_note(
        note_id: Uuid,
        requester_id: Uuid,
        name: &str,
        db: &Database,
    ) -> Result<(), Error> {
        let mut tx = db.begin().await?;

        let access = access::resolve_access(note_id, requester_id, &mut *tx).await?;
        if !access.can_edit() {
            return Err(Error::NotFoundOrDenied);
        }

        let name = normalize(name);
        sqlx::query(
            r#"
            DELETE FROM note_tags
            WHERE note_id = ?1
              AND tag_id IN (SELECT id FROM tags WHERE user_id = ?2 AND name = ?3)
            "#,
        )
        .bind(DUuid::from(note_id))
        .bind(DUuid::from(requester_id))
        .bind(&name)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Owner-only tag deletion; note-tag links go with it via the foreign
    /// key cascade.
    pub async fn delete(id: Uuid, owner_id: Uuid, db: &Database) -> Result<(), Error> {
        let result = sqlx::query("DELETE FROM tags WHERE id = ?1 AND user_id = ?2")
            .bind(DUuid::from(id))
            .bind(DUuid::from(owner_id))
            .execute(&**db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(Error::NotFoundOrDenied);
        }
        Ok(())
    }

    /// Count of non-deleted notes owned by `owner_id` carrying this tag.
    pub async fn note_count(id: Uuid, owner_id: Uuid, db: &Database) -> Result<i64, Error> {
        if Self::get(id, owner_id, db).await?.is_none() {
            return Err(Error::NotFoundOrDenied);
        }

        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM note_tags nt
            INNER JOIN notes n ON n.id = nt.note_id
            WHERE nt.tag_id = ?1 AND n.user_id = ?2 AND n.is_deleted = 0
            "#,
        )
        .bind(DUuid::from(id))
        .bind(DUuid::from(owner_id))
        .fetch_one(&**db)
        .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  Work  "), "work");
        assert_eq!(normalize("URGENT"), "urgent");
        assert_eq!(normalize("   "), "");
    }
}
