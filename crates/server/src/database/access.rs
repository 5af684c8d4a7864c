use sqlx::FromRow;
use uuid::Uuid;

use super::types::{DUuid, Permission};

/// Access level a user holds on a note.
///
/// Derived fresh on every repository operation; never cached across
/// requests. Owners always resolve to `Edit` regardless of share rows.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Access {
    None,
    Read,
    Edit,
}

impl Access {
    pub fn can_read(&self) -> bool {
        !matches!(self, Access::None)
    }

    pub fn can_edit(&self) -> bool {
        matches!(self, Access::Edit)
    }
}

#[derive(Debug, FromRow)]
struct AccessRow {
    owner_id: DUuid,
    permission: Option<Permission>,
}

/// Resolve the requester's access to a note in a single query against
/// current ownership and share rows. A missing or soft-deleted note is
/// indistinguishable from no access.
///
/// Generic over the executor so mutating callers can run the check inside
/// the same transaction as their write.
pub async fn resolve_access<'e, E>(
    note_id: Uuid,
    user_id: Uuid,
    executor: E,
) -> Result<Access, sqlx::Error>
where
    E: sqlx::SqliteExecutor<'e>,
{
    let row = sqlx::query_as::<_, AccessRow>(
        r#"
        SELECT n.user_id AS owner_id, sn.permission AS permission
        FROM notes n
        LEFT JOIN shared_notes sn
            ON sn.note_id = n.id AND sn.shared_with_user_id = ?2
        WHERE n.id = ?1 AND n.is_deleted = 0
        "#,
    )
    .bind(DUuid::from(note_id))
    .bind(DUuid::from(user_id))
    .fetch_optional(executor)
    .await?;

    let access = match row {
        None => Access::None,
        Some(row) if *row.owner_id == user_id => Access::Edit,
        Some(row) => match row.permission {
            Some(Permission::Edit) => Access::Edit,
            Some(Permission::Read) => Access::Read,
            None => Access::None,
        },
    };

    Ok(access)
}
