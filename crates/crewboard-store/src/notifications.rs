use crate::{Store, StoreError};
use crewboard_model::{Notification, NotificationId, UserId};
use rusqlite::{params, OptionalExtension};

impl Store {
    pub fn insert_notification(&self, notification: &Notification) -> Result<(), StoreError> {
        let doc = serde_json::to_string(notification)?;
        self.conn().execute(
            "INSERT INTO notifications (id, recipient, created_at_ms, doc)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                notification.id.as_str(),
                notification.recipient.as_str(),
                notification.created_at.timestamp_millis(),
                doc
            ],
        )?;
        Ok(())
    }

    pub fn fetch_notification(
        &self,
        id: &NotificationId,
    ) -> Result<Option<Notification>, StoreError> {
        let doc: Option<String> = self
            .conn()
            .query_row(
                "SELECT doc FROM notifications WHERE id = ?1",
                params![id.as_str()],
                |row| row.get(0),
            )
            .optional()?;
        match doc {
            Some(doc) => Ok(Some(serde_json::from_str(&doc)?)),
            None => Ok(None),
        }
    }

    pub fn update_notification(&self, notification: &Notification) -> Result<(), StoreError> {
        let doc = serde_json::to_string(notification)?;
        let changed = self.conn().execute(
            "UPDATE notifications SET doc = ?2 WHERE id = ?1",
            params![notification.id.as_str(), doc],
        )?;
        if changed == 0 {
            return Err(StoreError::UnknownId);
        }
        Ok(())
    }

    /// A recipient's notifications, newest-first.
    pub fn list_notifications(&self, recipient: &UserId) -> Result<Vec<Notification>, StoreError> {
        let mut stmt = self.conn().prepare(
            "SELECT doc FROM notifications WHERE recipient = ?1
             ORDER BY created_at_ms DESC, rowid DESC",
        )?;
        let rows = stmt.query_map(params![recipient.as_str()], |row| row.get::<_, String>(0))?;
        let mut notifications = Vec::new();
        for doc in rows {
            notifications.push(serde_json::from_str(&doc?)?);
        }
        Ok(notifications)
    }
}
