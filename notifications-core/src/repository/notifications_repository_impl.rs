use super::{
    dto::{FindOptions, NewNotification, Notification},
    entity::{NotificationCreatedAtFindEntity, NotificationFindEntity, NotificationInsertEntity},
    Error, NotificationsRepository,
};
use axum::async_trait;
use bson::{doc, oid::ObjectId, Bson, DateTime, Document};
use futures_util::TryStreamExt;
use mongodb::{
    error::ErrorKind,
    options::{IndexOptions, ReturnDocument},
    Collection, Database, IndexModel,
};
use std::sync::Arc;
use time::OffsetDateTime;
use uuid::Uuid;

const NOTIFICATIONS: &str = "notifications";
const INDEX_NAME_USER_ID_CREATED_AT: &str = "index_user_id_created_at";

pub struct NotificationsRepositoryImpl {
    database: Database,
}

impl NotificationsRepositoryImpl {
    pub async fn new(database: Database) -> Result<Self, mongodb::error::Error> {
        let collection_names = database.list_collection_names().await?;
        if !collection_names.iter().any(|name| name == NOTIFICATIONS) {
            database.create_collection(NOTIFICATIONS).await?;
            tracing::debug!("created collection {NOTIFICATIONS}");
        }

        let collection = database.collection(NOTIFICATIONS);
        let index_names = collection.list_index_names().await?;

        if !index_names.contains(&INDEX_NAME_USER_ID_CREATED_AT.to_string()) {
            Self::create_user_id_created_at_index(&collection).await?;
            tracing::debug!("created index {NOTIFICATIONS}.{INDEX_NAME_USER_ID_CREATED_AT}");
        }

        Ok(Self { database })
    }

    async fn create_user_id_created_at_index(
        collection: &Collection<Document>,
    ) -> Result<(), mongodb::error::Error> {
        let index = IndexModel::builder()
            .keys(doc! {
                "user_id": 1,
                "created_at": -1,
            })
            .options(
                IndexOptions::builder()
                    .name(INDEX_NAME_USER_ID_CREATED_AT.to_string())
                    .build(),
            )
            .build();

        collection.create_index(index).await?;

        Ok(())
    }

    ///
    /// Resolves creation date of the cursor notification.
    /// Cursor belonging to another user is treated as not existing.
    ///
    async fn find_cursor_created_at(
        &self,
        cursor: ObjectId,
        user_id: bson::Uuid,
    ) -> Result<Option<DateTime>, Error> {
        let entity = self
            .database
            .collection::<NotificationCreatedAtFindEntity>(NOTIFICATIONS)
            .find_one(doc! {
                "_id": cursor,
                "user_id": user_id,
            })
            .projection(doc! {
                "_id": 0,
                "created_at": 1,
            })
            .await?;

        Ok(entity.map(|entity| entity.created_at))
    }
}

#[async_trait]
impl NotificationsRepository for NotificationsRepositoryImpl {
    async fn insert(&self, notification: NewNotification) -> Result<Notification, Error> {
        // Stored dates have millisecond precision,
        // so returned dates must be truncated the same way
        let created_at = DateTime::from(notification.created_at);
        let insert_entity = NotificationInsertEntity {
            user_id: bson::Uuid::from(notification.user_id),
            title: notification.title,
            message: notification.message,
            link: notification.link,
            read_at: None,
            created_at,
            updated_at: created_at,
        };

        let insert_result = self
            .database
            .collection::<NotificationInsertEntity>(NOTIFICATIONS)
            .insert_one(&insert_entity)
            .await?;

        let Bson::ObjectId(id) = insert_result.inserted_id else {
            tracing::error!("invalid type of inserted '_id'");
            return Err(Error::Mongo(
                ErrorKind::Custom(Arc::new("invalid type of inserted '_id'")).into(),
            ));
        };

        Ok(Notification {
            id,
            user_id: notification.user_id,
            title: insert_entity.title,
            message: insert_entity.message,
            link: insert_entity.link,
            read_at: None,
            created_at: created_at.to_time_0_3(),
            updated_at: created_at.to_time_0_3(),
        })
    }

    async fn find_many_by_user(
        &self,
        user_id: Uuid,
        FindOptions {
            cursor,
            limit,
            unread_only,
        }: FindOptions,
    ) -> Result<Vec<Notification>, Error> {
        let user_id = bson::Uuid::from(user_id);

        let mut filter = doc! { "user_id": user_id };
        if unread_only {
            filter.insert("read_at", Bson::Null);
        }
        if let Some(cursor) = cursor {
            match self.find_cursor_created_at(cursor, user_id).await? {
                Some(created_at) => {
                    filter.insert("created_at", doc! { "$lt": created_at });
                }
                None => tracing::debug!(%cursor, "cursor not found, starting from the first page"),
            }
        }

        let notifications = self
            .database
            .collection::<NotificationFindEntity>(NOTIFICATIONS)
            .find(filter)
            .sort(doc! { "created_at": -1, "_id": -1 })
            .limit(i64::from(limit) + 1)
            .await?
            .map_ok(Notification::from)
            .try_collect()
            .await?;

        Ok(notifications)
    }

    async fn count_unread(&self, user_id: Uuid) -> Result<u64, Error> {
        let user_id = bson::Uuid::from(user_id);

        let count = self
            .database
            .collection::<Document>(NOTIFICATIONS)
            .count_documents(doc! {
                "user_id": user_id,
                "read_at": Bson::Null,
            })
            .await?;

        Ok(count)
    }

    async fn find(&self, id: ObjectId) -> Result<Option<Notification>, Error> {
        let notification = self
            .database
            .collection::<NotificationFindEntity>(NOTIFICATIONS)
            .find_one(doc! { "_id": id })
            .await?
            .map(Notification::from);

        Ok(notification)
    }

    async fn update_read_at(
        &self,
        id: ObjectId,
        read_at: OffsetDateTime,
    ) -> Result<Notification, Error> {
        let read_at = DateTime::from(read_at);

        let updated = self
            .database
            .collection::<NotificationFindEntity>(NOTIFICATIONS)
            .find_one_and_update(
                doc! {
                    "_id": id,
                    "read_at": Bson::Null,
                },
                doc! {
                    "$set": {
                        "read_at": read_at,
                        "updated_at": read_at,
                    }
                },
            )
            .return_document(ReturnDocument::After)
            .await?;

        match updated {
            Some(entity) => Ok(entity.into()),
            // read_at is never overwritten, notification
            // may simply have been read before
            None => self.find(id).await?.ok_or(Error::NoDocumentUpdated),
        }
    }

    async fn update_many_read_at(
        &self,
        user_id: Uuid,
        read_at: OffsetDateTime,
    ) -> Result<u64, Error> {
        let user_id = bson::Uuid::from(user_id);
        let read_at = DateTime::from(read_at);

        let update_result = self
            .database
            .collection::<Document>(NOTIFICATIONS)
            .update_many(
                doc! {
                    "user_id": user_id,
                    "read_at": Bson::Null,
                },
                doc! {
                    "$set": {
                        "read_at": read_at,
                        "updated_at": read_at,
                    }
                },
            )
            .await?;

        Ok(update_result.modified_count)
    }

    async fn delete(&self, id: ObjectId) -> Result<(), Error> {
        let delete_result = self
            .database
            .collection::<Document>(NOTIFICATIONS)
            .delete_one(doc! { "_id": id })
            .await?;

        match delete_result.deleted_count == 1 {
            true => Ok(()),
            false => Err(Error::NoDocumentUpdated),
        }
    }
}

///
/// Tests require env variables to be set and database to be running
///
#[cfg(test)]
mod test {
    use super::*;
    use anyhow::Context;
    use mongodb::{options::ClientOptions, Client};
    use std::time::Duration;

    async fn create_test_database() -> anyhow::Result<Database> {
        let _ = dotenvy::dotenv();
        let connection_string = std::env::var("NOTIFICATIONS_CORE_DB_CONNECTION_STRING")
            .context("NOTIFICATIONS_CORE_DB_CONNECTION_STRING not set")?;
        let db_name = format!("test_notifications_{}", Uuid::new_v4());

        let db_client_options = ClientOptions::parse(&connection_string).await?;
        let db_client = Client::with_options(db_client_options)?;
        let db = db_client.database(&db_name);

        Ok(db)
    }

    async fn destroy_test_database(database: Database) {
        let _ = database.drop().await;
        database.client().clone().shutdown().await;
    }

    fn new_notification(user_id: Uuid, title: &str, created_at: OffsetDateTime) -> NewNotification {
        NewNotification {
            user_id,
            title: title.to_string(),
            message: format!("{title} message"),
            link: None,
            created_at,
        }
    }

    #[tokio::test]
    #[ignore = "requires running MongoDB"]
    async fn insert_created_at_truncated_to_millis() -> anyhow::Result<()> {
        let database = create_test_database().await?;
        let repository = NotificationsRepositoryImpl::new(database.clone()).await?;

        let created_at = OffsetDateTime::now_utc();
        let notification = repository
            .insert(new_notification(Uuid::new_v4(), "N1", created_at))
            .await?;

        let found = repository.find(notification.id).await?.unwrap();

        destroy_test_database(database).await;

        assert_eq!(found, notification);
        assert!(created_at - notification.created_at < Duration::from_millis(1));

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires running MongoDB"]
    async fn find_many_by_user_cursor_pages() -> anyhow::Result<()> {
        let database = create_test_database().await?;
        let repository = NotificationsRepositoryImpl::new(database.clone()).await?;

        let user_id = Uuid::new_v4();
        let start = OffsetDateTime::now_utc();
        let mut ids = Vec::new();
        for i in 0..5 {
            let created_at = start + Duration::from_secs(i);
            let notification = repository
                .insert(new_notification(user_id, &format!("N{}", i + 1), created_at))
                .await?;
            ids.push(notification.id);
        }

        let first_page = repository
            .find_many_by_user(
                user_id,
                FindOptions {
                    cursor: None,
                    limit: 2,
                    unread_only: false,
                },
            )
            .await?;
        let second_page = repository
            .find_many_by_user(
                user_id,
                FindOptions {
                    cursor: Some(ids[3]),
                    limit: 2,
                    unread_only: false,
                },
            )
            .await?;

        destroy_test_database(database).await;

        let first_page_ids = first_page.iter().map(|n| n.id).collect::<Vec<_>>();
        assert_eq!(first_page_ids, vec![ids[4], ids[3], ids[2]]);
        let second_page_ids = second_page.iter().map(|n| n.id).collect::<Vec<_>>();
        assert_eq!(second_page_ids, vec![ids[2], ids[1], ids[0]]);

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires running MongoDB"]
    async fn update_read_at_does_not_overwrite() -> anyhow::Result<()> {
        let database = create_test_database().await?;
        let repository = NotificationsRepositoryImpl::new(database.clone()).await?;

        let notification = repository
            .insert(new_notification(
                Uuid::new_v4(),
                "N1",
                OffsetDateTime::now_utc(),
            ))
            .await?;

        let first = repository
            .update_read_at(notification.id, OffsetDateTime::now_utc())
            .await?;
        let second = repository
            .update_read_at(
                notification.id,
                OffsetDateTime::now_utc() + Duration::from_secs(60),
            )
            .await?;
        let unread = repository.count_unread(notification.user_id).await?;

        destroy_test_database(database).await;

        assert!(first.read_at.is_some());
        assert_eq!(first.read_at, second.read_at);
        assert_eq!(unread, 0);

        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires running MongoDB"]
    async fn delete_not_existing() -> anyhow::Result<()> {
        let database = create_test_database().await?;
        let repository = NotificationsRepositoryImpl::new(database.clone()).await?;

        let delete_result = repository.delete(ObjectId::new()).await;

        destroy_test_database(database).await;

        assert!(matches!(delete_result, Err(Error::NoDocumentUpdated)));

        Ok(())
    }
}
