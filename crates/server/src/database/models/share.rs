use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::database::types::{DUuid, Permission};
use crate::database::Database;
use crate::error::Error;

/// A read/edit grant from a note's owner to another user. Unique per
/// (note, grantee); the owner never holds a grant row on their own note.
#[derive(Debug, Clone, FromRow)]
pub struct ShareGrant {
    pub id: DUuid,
    pub note_id: DUuid,
    pub shared_with_user_id: DUuid,
    pub shared_by_user_id: DUuid,
    pub permission: Permission,
    pub created_at: OffsetDateTime,
}

/// Joined view of a grant with the note's content and the counterpart
/// username (granter for shared-with-me, grantee for shared-by-me).
#[derive(Debug, Clone, FromRow)]
pub struct SharedNoteDetails {
    pub id: DUuid,
    pub note_id: DUuid,
    pub shared_with_user_id: DUuid,
    pub shared_by_user_id: DUuid,
    pub permission: Permission,
    pub created_at: OffsetDateTime,
    pub note_title: String,
    pub note_content: String,
    pub counterpart_username: String,
}

impl ShareGrant {
    /// Share a note with another user. Owner-only (an edit-share recipient
    /// cannot re-share); self-shares and unknown grantees are rejected.
    /// Upsert semantics: re-sharing with the same grantee overwrites the
    /// permission in place.
    pub async fn share(
        note_id: Uuid,
        granter_id: Uuid,
        grantee_id: Uuid,
        permission: Permission,
        db: &Database,
    ) -> Result<ShareGrant, Error> {
        if granter_id == grantee_id {
            return Err(Error::invalid("Cannot share a note with yourself"));
        }

        let mut tx = db.begin().await?;

        let owns: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM notes WHERE id = ?1 AND user_id = ?2 AND is_deleted = 0",
        )
        .bind(DUuid::from(note_id))
        .bind(DUuid::from(granter_id))
        .fetch_one(&mut *tx)
        .await?;
        if owns == 0 {
            return Err(Error::NotFoundOrDenied);
        }

        let grantee_exists: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE id = ?1")
            .bind(DUuid::from(grantee_id))
            .fetch_one(&mut *tx)
            .await?;
        if grantee_exists == 0 {
            return Err(Error::NotFoundOrDenied);
        }

        let id = DUuid::new();
        sqlx::query(
            r#"
            INSERT INTO shared_notes
                (id, note_id, shared_with_user_id, shared_by_user_id, permission, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ON CONFLICT (note_id, shared_with_user_id)
            DO UPDATE SET permission = excluded.permission
            "#,
        )
        .bind(id)
        .bind(DUuid::from(note_id))
        .bind(DUuid::from(grantee_id))
        .bind(DUuid::from(granter_id))
        .bind(permission)
        .bind(OffsetDateTime::now_utc())
        .execute(&mut *tx)
        .await?;

        let grant = sqlx::query_as::<_, ShareGrant>(
            r#"
            SELECT id, note_id, shared_with_user_id, shared_by_user_id, permission, created_at
            FROM shared_notes
            WHERE note_id = ?1 AND shared_with_user_id = ?2
            "#,
        )
        .bind(DUuid::from(note_id))
        .bind(DUuid::from(grantee_id))
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(grant)
    }

    /// Owner-only revoke; removing an absent grant is a no-op.
    pub async fn revoke(
        note_id: Uuid,
        owner_id: Uuid,
        grantee_id: Uuid,
        db: &Database,
    ) -> Result<(), Error> {
        let mut tx = db.begin().await?;

        let owns: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM notes WHERE id = ?1 AND user_id = ?2")
                .bind(DUuid::from(note_id))
                .bind(DUuid::from(owner_id))
                .fetch_one(&mut *tx)
                .await?;
        if owns == 0 {
            return Err(Error::NotFoundOrDenied);
        }

        sqlx::query(
            r#"
            DELETE FROM shared_notes
            WHERE note_id = ?1 AND shared_with_user_id = ?2 AND shared_by_user_id = ?3
            "#,
        )
        .bind(DUuid::from(note_id))
        .bind(DUuid::from(grantee_id))
        .bind(DUuid::from(owner_id))
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Grants pointing at the user, joined with note content and the
    /// granter's username; grants on soft-deleted notes are excluded.
    pub async fn list_shared_with_me(
        user_id: Uuid,
        db: &Database,
    ) -> Result<Vec<SharedNoteDetails>, Error> {
        let shares = sqlx::query_as::<_, SharedNoteDetails>(
            r#"
            SELECT
                sn.id, sn.note_id, sn.shared_with_user_id, sn.shared_by_user_id,
                sn.permission, sn.created_at,
                n.title AS note_title,
                n.content AS note_content,
                u.username AS counterpart_username
            FROM shared_notes sn
            INNER JOIN notes n ON n.id = sn.note_id
            INNER JOIN users u ON u.id = sn.shared_by_user_id
            WHERE sn.shared_with_user_id = ?1 AND n.is_deleted = 0
            ORDER BY sn.created_at DESC
            "#,
        )
        .bind(DUuid::from(user_id))
        .fetch_all(&**db)
        .await?;

        Ok(shares)
    }

    /// Grants the user has handed out, joined with note content and the
    /// grantee's username; grants on soft-deleted notes are excluded.
    pub async fn list_shared_by_me(
        user_id: Uuid,
        db: &Database,
    ) -> Result<Vec<SharedNoteDetails>, Error> {
        let shares = sqlx::query_as::<_, SharedNoteDetails>(
            r#"
            SELECT
                sn.id, sn.note_id, sn.shared_with_user_id, sn.shared_by_user_id,
                sn.permission, sn.created_at,
                n.title AS note_title,
                n.content AS note_content,
                u.username AS counterpart_username
            FROM shared_notes sn
            INNER JOIN notes n ON n.id = sn.note_id
            INNER JOIN users u ON u.id = sn.shared_with_user_id
            WHERE sn.shared_by_user_id = ?1 AND n.is_deleted = 0
            ORDER BY sn.created_at DESC
            "#,
        )
        .bind(DUuid::from(user_id))
        .fetch_all(&**db)
        .await?;

        Ok(shares)
    }

    /// Owner-only view of every grantee and permission on one note.
    pub async fn list_for_note(
        note_id: Uuid,
        owner_id: Uuid,
        db: &Database,
    ) -> Result<Vec<SharedNoteDetails>, Error> {
        let owns: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM notes WHERE id = ?1 AND user_id = ?2")
                .bind(DUuid::from(note_id))
                .bind(DUuid::from(owner_id))
                .fetch_one(&**db)
                .await?;
        if owns == 0 {
            return Err(Error::NotFoundOrDenied);
        }

        let shares = sqlx::query_as::<_, SharedNoteDetails>(
            r#"
            SELECT
                sn.id, sn.note_id, sn.shared_with_user_id, sn.shared_by_user_id,
                sn.permission, sn.created_at,
                n.title AS note_title,
                n.content AS note_content,
                u.username AS counterpart_username
            FROM shared_notes sn
            INNER JOIN notes n ON n.id = sn.note_id
            INNER JOIN users u ON u.id = sn.shared_with_user_id
            WHERE sn.note_id = ?1
            ORDER BY sn.created_at DESC
            "#,
        )
        .bind(DUuid::from(note_id))
        .fetch_all(&**db)
        .await?;

        Ok(shares)
    }
}
