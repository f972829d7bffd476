use crate::error::AppError;
use crate::models::Course;
use futures::TryStreamExt;
use mongodb::{
    bson::{doc, Bson, Document},
    options::{
        FindOneAndDeleteOptions, FindOneAndUpdateOptions, FindOneOptions, FindOptions,
        IndexOptions, ReturnDocument,
    },
    Client as MongoClient, Collection, Database, IndexModel,
};

/// Shared MongoDB handle for the course collection.
///
/// Connected once at startup and cloned into every request; connection
/// pooling is the driver's concern.
#[derive(Clone)]
pub struct CourseDb {
    client: MongoClient,
    db: Database,
}

impl CourseDb {
    pub async fn connect(uri: &str, database: &str) -> Result<Self, AppError> {
        tracing::info!(uri = %uri, "Connecting to MongoDB");
        let client = MongoClient::with_uri_str(uri).await.map_err(|e| {
            tracing::error!("Failed to connect to MongoDB at {}: {}", uri, e);
            AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
        })?;
        let db = client.database(database);
        tracing::info!(database = %database, "Successfully connected to MongoDB database");
        Ok(Self { client, db })
    }

    pub async fn initialize_indexes(&self) -> Result<(), AppError> {
        tracing::info!("Creating MongoDB indexes for course-service");

        // Ids are assigned as max + 1, which is not atomic across
        // concurrent creates; the unique index makes a collision surface
        // as a write error instead of two courses sharing one id.
        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .name("id_idx".to_string())
                    .unique(true)
                    .build(),
            )
            .build();

        self.courses().create_index(id_index, None).await.map_err(|e| {
            tracing::error!("Failed to create id index: {}", e);
            AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
        })?;

        tracing::info!("Successfully created all MongoDB indexes");
        Ok(())
    }

    pub async fn health_check(&self) -> Result<(), AppError> {
        self.client
            .database("admin")
            .run_command(doc! { "ping": 1 }, None)
            .await
            .map_err(|e| {
                tracing::error!("MongoDB health check failed: {}", e);
                AppError::DatabaseError(anyhow::anyhow!(e.to_string()))
            })?;
        Ok(())
    }

    pub fn courses(&self) -> Collection<Course> {
        self.db.collection("courses")
    }

    // The `_id` projection keeps the Mongo-internal object id out of
    // every response body.
    fn without_object_id() -> Document {
        doc! { "_id": 0 }
    }

    /// Fetch every course in natural collection order.
    pub async fn find_all(&self) -> Result<Vec<Course>, AppError> {
        let find_options = FindOptions::builder()
            .projection(Self::without_object_id())
            .build();

        let cursor = self.courses().find(doc! {}, find_options).await.map_err(|e| {
            tracing::error!("Failed to list courses: {}", e);
            AppError::DatabaseError(anyhow::anyhow!("Failed to retrieve courses."))
        })?;

        cursor.try_collect().await.map_err(|e| {
            tracing::error!("Failed to collect courses: {}", e);
            AppError::DatabaseError(anyhow::anyhow!("Failed to retrieve courses."))
        })
    }

    pub async fn find_by_id(&self, id: i64) -> Result<Option<Course>, AppError> {
        let find_options = FindOneOptions::builder()
            .projection(Self::without_object_id())
            .build();

        self.courses()
            .find_one(doc! { "id": id }, find_options)
            .await
            .map_err(|e| {
                tracing::error!(course_id = id, "Failed to find course: {}", e);
                AppError::DatabaseError(anyhow::anyhow!("Failed to retrieve course."))
            })
    }

    /// Next id to assign: one past the current maximum, or 1 when the
    /// collection is empty.
    pub async fn next_course_id(&self) -> Result<i64, AppError> {
        let find_options = FindOneOptions::builder()
            .sort(doc! { "id": -1 })
            .projection(Self::without_object_id())
            .build();

        let last = self
            .courses()
            .find_one(doc! {}, find_options)
            .await
            .map_err(|e| {
                tracing::error!("Failed to read max course id: {}", e);
                AppError::DatabaseError(anyhow::anyhow!("Failed to add course."))
            })?;

        Ok(last.map(|course| course.id + 1).unwrap_or(1))
    }

    pub async fn insert(&self, course: &Course) -> Result<(), AppError> {
        let result = self.courses().insert_one(course, None).await.map_err(|e| {
            tracing::error!(course_id = course.id, "Failed to insert course: {}", e);
            AppError::DatabaseError(anyhow::anyhow!("Failed to add course."))
        })?;

        // An unacknowledged write reports no inserted id.
        if matches!(result.inserted_id, Bson::Null) {
            tracing::error!(course_id = course.id, "Course insert was not acknowledged");
            return Err(AppError::DatabaseError(anyhow::anyhow!(
                "Failed to add course."
            )));
        }

        Ok(())
    }

    /// Merge the supplied fields onto the matching course and return the
    /// post-update document, or `None` when no course matches.
    pub async fn update(&self, id: i64, patch: Document) -> Result<Option<Course>, AppError> {
        let update_options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .projection(Self::without_object_id())
            .build();

        self.courses()
            .find_one_and_update(doc! { "id": id }, doc! { "$set": patch }, update_options)
            .await
            .map_err(|e| {
                tracing::error!(course_id = id, "Failed to update course: {}", e);
                AppError::DatabaseError(anyhow::anyhow!("Failed to update course."))
            })
    }

    /// Remove the matching course and return it as it existed before the
    /// delete, or `None` when no course matches.
    pub async fn delete(&self, id: i64) -> Result<Option<Course>, AppError> {
        let delete_options = FindOneAndDeleteOptions::builder()
            .projection(Self::without_object_id())
            .build();

        self.courses()
            .find_one_and_delete(doc! { "id": id }, delete_options)
            .await
            .map_err(|e| {
                tracing::error!(course_id = id, "Failed to delete course: {}", e);
                AppError::DatabaseError(anyhow::anyhow!("Failed to delete course."))
            })
    }
}
