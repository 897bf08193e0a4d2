//! Saved post CRUD operations.
//!
//! Upsert is the only write path: replacing a record deletes the old
//! row and inserts a fresh one, so the replacement takes a new position
//! at the end of insertion order. Point lookups by id are deliberately
//! not provided; the collection is small and always processed whole.

use super::connection::LibraryDb;
use crate::Error;
use crate::record::{CapturedPost, SavedPost};
use tokio_rusqlite::params;

impl LibraryDb {
    /// Insert or replace a post by id.
    pub async fn upsert_post(&self, post: &SavedPost) -> Result<(), Error> {
        let post = post.clone();
        self.conn
            .call(move |conn| -> Result<(), Error> {
                let images_json = serde_json::to_string(&post.post.images)
                    .map_err(|e| Error::InvalidInput(format!("failed to serialize images: {e}")))?;
                let tags_json = serde_json::to_string(&post.tags)
                    .map_err(|e| Error::InvalidInput(format!("failed to serialize tags: {e}")))?;

                let tx = conn.transaction()?;
                tx.execute("DELETE FROM saved_posts WHERE id = ?1", params![&post.id])?;
                tx.execute(
                    "INSERT INTO saved_posts (
                        id, actor, text, images_json, timestamp,
                        url, captured_at, tags_json, note, saved_at
                    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
                    params![
                        &post.id,
                        &post.post.actor,
                        &post.post.text,
                        &images_json,
                        &post.post.timestamp,
                        &post.post.url,
                        &post.post.captured_at,
                        &tags_json,
                        &post.note,
                        &post.saved_at,
                    ],
                )?;
                tx.commit()?;
                Ok(())
            })
            .await
            .map_err(Error::from)
    }

    /// Return all posts in insertion order.
    pub async fn load_posts(&self) -> Result<Vec<SavedPost>, Error> {
        self.conn
            .call(|conn| -> Result<Vec<SavedPost>, Error> {
                let mut stmt = conn.prepare(
                    "SELECT id, actor, text, images_json, timestamp,
                            url, captured_at, tags_json, note, saved_at
                     FROM saved_posts ORDER BY seq ASC",
                )?;

                let rows = stmt.query_map([], |row| {
                    Ok(SavedPost {
                        id: row.get(0)?,
                        post: CapturedPost {
                            actor: row.get(1)?,
                            text: row.get(2)?,
                            images: serde_json::from_str(&row.get::<_, String>(3)?).unwrap_or_default(),
                            timestamp: row.get(4)?,
                            url: row.get(5)?,
                            captured_at: row.get(6)?,
                        },
                        tags: serde_json::from_str(&row.get::<_, String>(7)?).unwrap_or_default(),
                        note: row.get(8)?,
                        saved_at: row.get(9)?,
                    })
                })?;

                let mut posts = Vec::new();
                for row in rows {
                    posts.push(row?);
                }
                Ok(posts)
            })
            .await
            .map_err(Error::from)
    }

    /// Number of saved posts.
    pub async fn count_posts(&self) -> Result<usize, Error> {
        self.conn
            .call(|conn| -> Result<usize, Error> {
                let count: i64 = conn
                    .query_row("SELECT COUNT(*) FROM saved_posts", [], |row| row.get(0))
                    .map_err(Error::from)?;
                Ok(count as usize)
            })
            .await
            .map_err(Error::from)
    }

    /// Delete every saved post. Returns the number of deleted records.
    pub async fn clear_posts(&self) -> Result<u64, Error> {
        self.conn
            .call(|conn| -> Result<u64, Error> {
                let count = conn.execute("DELETE FROM saved_posts", [])?;
                Ok(count as u64)
            })
            .await
            .map_err(Error::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_post(id: &str, note: &str) -> SavedPost {
        SavedPost {
            id: id.to_string(),
            post: CapturedPost {
                actor: "Jane Doe".to_string(),
                text: "We launched today!".to_string(),
                images: vec!["https://cdn.example.com/photo1.jpg".to_string()],
                timestamp: "2024-03-01T08:30:00Z".to_string(),
                url: "https://www.example.com/feed/update/1/".to_string(),
                captured_at: chrono::Utc::now().to_rfc3339(),
            },
            tags: vec!["launch".to_string(), "rust".to_string()],
            note: note.to_string(),
            saved_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    #[tokio::test]
    async fn test_upsert_and_load() {
        let db = LibraryDb::open_in_memory().await.unwrap();
        db.upsert_post(&make_post("p1", "first")).await.unwrap();

        let posts = db.load_posts().await.unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].id, "p1");
        assert_eq!(posts[0].post.actor, "Jane Doe");
        assert_eq!(posts[0].tags, vec!["launch", "rust"]);
        assert_eq!(posts[0].post.images.len(), 1);
    }

    #[tokio::test]
    async fn test_upsert_same_id_overwrites() {
        let db = LibraryDb::open_in_memory().await.unwrap();
        db.upsert_post(&make_post("p1", "first")).await.unwrap();
        db.upsert_post(&make_post("p1", "second")).await.unwrap();

        let posts = db.load_posts().await.unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].note, "second");
        assert_eq!(db.count_posts().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_replaced_post_moves_to_end_of_insertion_order() {
        let db = LibraryDb::open_in_memory().await.unwrap();
        db.upsert_post(&make_post("p1", "oldest")).await.unwrap();
        db.upsert_post(&make_post("p2", "middle")).await.unwrap();
        db.upsert_post(&make_post("p1", "replaced")).await.unwrap();

        let ids: Vec<String> = db.load_posts().await.unwrap().into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec!["p2", "p1"]);
    }

    #[tokio::test]
    async fn test_count_and_clear() {
        let db = LibraryDb::open_in_memory().await.unwrap();
        db.upsert_post(&make_post("p1", "")).await.unwrap();
        db.upsert_post(&make_post("p2", "")).await.unwrap();
        assert_eq!(db.count_posts().await.unwrap(), 2);

        let deleted = db.clear_posts().await.unwrap();
        assert_eq!(deleted, 2);
        assert_eq!(db.count_posts().await.unwrap(), 0);
        assert!(db.load_posts().await.unwrap().is_empty());
    }
}
