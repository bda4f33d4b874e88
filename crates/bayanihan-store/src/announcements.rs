//! Mutators for the `announcements` collection.

use chrono::Utc;

use bayanihan_shared::constants::COLLECTION_ANNOUNCEMENTS;
use bayanihan_shared::{DomainError, EntityId};

use crate::database::Database;
use crate::error::{Result, StoreError};
use crate::fanout::FanOut;
use crate::models::{Announcement, Comment};

/// Input of [`Database::create_announcement`].
#[derive(Debug, Clone)]
pub struct NewAnnouncement {
    pub title: Option<String>,
    pub description: String,
    /// Already-encoded data URIs, in attachment order.
    pub images: Vec<String>,
    pub author: String,
    pub author_avatar: String,
}

/// Input of [`Database::add_comment`].
#[derive(Debug, Clone)]
pub struct NewComment {
    pub author: String,
    pub author_avatar: String,
    pub text: String,
}

impl Database {
    /// List the feed, newest post first.
    pub fn list_announcements(&self) -> Result<Vec<Announcement>> {
        self.read_collection(COLLECTION_ANNOUNCEMENTS)
    }

    /// Post an announcement and notify residents.
    pub fn create_announcement(&self, new: NewAnnouncement) -> Result<Announcement> {
        if new.description.trim().is_empty() {
            return Err(DomainError::EmptyField("description").into());
        }

        let id = EntityId::now();
        let post = Announcement {
            id,
            title: new.title.filter(|t| !t.trim().is_empty()),
            description: new.description,
            images: new.images,
            author: new.author,
            author_avatar: new.author_avatar,
            date: id.0,
            comments: Vec::new(),
        };

        let mut all = self.list_announcements()?;
        all.insert(0, post.clone());
        self.write_collection(COLLECTION_ANNOUNCEMENTS, &all)?;

        self.fan_out(FanOut::NewAnnouncement(&post))?;

        tracing::info!(id = %post.id, "announcement posted");
        Ok(post)
    }

    /// Append a comment to a post. Either audience may comment.
    pub fn add_comment(&self, post_id: EntityId, new: NewComment) -> Result<Announcement> {
        if new.text.trim().is_empty() {
            return Err(DomainError::EmptyField("text").into());
        }

        let mut all = self.list_announcements()?;
        let Some(post) = all.iter_mut().find(|p| p.id == post_id) else {
            return Err(StoreError::NotFound {
                collection: COLLECTION_ANNOUNCEMENTS,
                id: post_id,
            });
        };

        post.comments.push(Comment {
            author: new.author,
            author_avatar: new.author_avatar,
            date: Utc::now().timestamp_millis(),
            text: new.text,
        });
        let updated = post.clone();
        self.write_collection(COLLECTION_ANNOUNCEMENTS, &all)?;

        Ok(updated)
    }

    /// Remove a post.
    pub fn delete_announcement(&self, id: EntityId) -> Result<()> {
        let mut all = self.list_announcements()?;
        let before = all.len();
        all.retain(|p| p.id != id);
        if all.len() == before {
            return Err(StoreError::NotFound {
                collection: COLLECTION_ANNOUNCEMENTS,
                id,
            });
        }
        self.write_collection(COLLECTION_ANNOUNCEMENTS, &all)?;

        tracing::info!(%id, "announcement deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use bayanihan_shared::{NotificationKind, Role};

    use super::*;

    fn open_db() -> (tempfile::TempDir, Database) {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::open_at(&dir.path().join("test.db")).unwrap();
        (dir, db)
    }

    fn water_interruption() -> NewAnnouncement {
        NewAnnouncement {
            title: Some("Water interruption".into()),
            description: "No water supply on Saturday morning.".into(),
            images: vec![],
            author: "Community Moderator".into(),
            author_avatar: "data:image/png;base64,AAAA".into(),
        }
    }

    #[test]
    fn create_prepends_and_notifies_residents() {
        let (_dir, db) = open_db();
        let first = db.create_announcement(water_interruption()).unwrap();
        let second = db
            .create_announcement(NewAnnouncement {
                title: None,
                description: "Free anti-rabies vaccination at the hall.".into(),
                images: vec![],
                author: "Community Moderator".into(),
                author_avatar: String::new(),
            })
            .unwrap();

        let feed = db.list_announcements().unwrap();
        assert_eq!(feed[0].id, second.id);
        assert_eq!(feed[1].id, first.id);

        let notifs = db.list_notifications(Role::Resident).unwrap();
        assert_eq!(notifs.len(), 2);
        assert!(notifs
            .iter()
            .all(|n| n.kind == NotificationKind::NewAnnouncement));
        assert_eq!(notifs[0].post_id, Some(second.id));
    }

    #[test]
    fn blank_title_is_stored_as_none() {
        let (_dir, db) = open_db();
        let post = db
            .create_announcement(NewAnnouncement {
                title: Some("   ".into()),
                ..water_interruption()
            })
            .unwrap();
        assert!(post.title.is_none());
    }

    #[test]
    fn create_rejects_blank_description() {
        let (_dir, db) = open_db();
        let err = db
            .create_announcement(NewAnnouncement {
                description: "".into(),
                ..water_interruption()
            })
            .unwrap_err();
        assert!(matches!(
            err,
            StoreError::Domain(DomainError::EmptyField("description"))
        ));
        assert!(db.list_announcements().unwrap().is_empty());
    }

    #[test]
    fn comments_append_in_order() {
        let (_dir, db) = open_db();
        let post = db.create_announcement(water_interruption()).unwrap();

        for text in ["First!", "Thanks for the heads up"] {
            db.add_comment(
                post.id,
                NewComment {
                    author: "Resident User".into(),
                    author_avatar: String::new(),
                    text: text.into(),
                },
            )
            .unwrap();
        }

        let feed = db.list_announcements().unwrap();
        let comments: Vec<&str> = feed[0].comments.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(comments, ["First!", "Thanks for the heads up"]);
    }

    #[test]
    fn comment_on_unknown_post_is_reported() {
        let (_dir, db) = open_db();
        let err = db
            .add_comment(
                EntityId(404),
                NewComment {
                    author: "Resident User".into(),
                    author_avatar: String::new(),
                    text: "hello".into(),
                },
            )
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { .. }));
    }

    #[test]
    fn delete_removes_post() {
        let (_dir, db) = open_db();
        let post = db.create_announcement(water_interruption()).unwrap();
        db.delete_announcement(post.id).unwrap();
        assert!(db.list_announcements().unwrap().is_empty());
    }
}
