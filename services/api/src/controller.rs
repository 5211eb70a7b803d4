//! Generic resource controller
//!
//! CRUD behavior shared by every resource, parametrized by a record
//! access capability (`ResourceStore`). Concrete handlers compose
//! this with per-resource authorization and validation before
//! delegating here.

use axum::Json;
use common::error::{StoreError, StoreResult};
use serde::Serialize;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};

/// Model names the record store is configured with
pub const MODELS: &[&str] = &["user", "movie", "session", "sessionSeat", "ticket"];

/// Log (non-fatally) when a repository is constructed for a resource
/// name the store does not know about.
pub fn verify_model(name: &str) {
    if !MODELS.contains(&name) {
        tracing::error!("resource '{name}' does not correspond to a configured model");
    }
}

/// Record access capability a resource exposes to the generic
/// controller. `ListEntity` is the shape of an index row, which may
/// eagerly attach related records.
#[allow(async_fn_in_trait)]
pub trait ResourceStore {
    const NAME: &'static str;

    type Entity: Serialize;
    type ListEntity: Serialize;
    type Create: Send;
    type Update: Send;

    async fn list(&self) -> StoreResult<Vec<Self::ListEntity>>;
    async fn find(&self, id: Uuid) -> StoreResult<Option<Self::Entity>>;
    async fn insert(&self, data: Self::Create) -> StoreResult<Self::Entity>;
    async fn update(&self, id: Uuid, changes: Self::Update) -> StoreResult<Self::Entity>;
    async fn delete(&self, id: Uuid) -> StoreResult<bool>;
}

/// List response shape
#[derive(Debug, Serialize)]
pub struct RecordList<T: Serialize> {
    pub records: Vec<T>,
}

/// Update response shape
#[derive(Debug, Serialize)]
pub struct UpdatedRecord<T: Serialize> {
    pub record: T,
}

/// Delete response shape
#[derive(Debug, Serialize)]
pub struct DeleteMessage {
    pub message: String,
}

/// Return all records of the resource
pub async fn list<S: ResourceStore>(store: &S) -> ApiResult<Json<RecordList<S::ListEntity>>> {
    let records = store.list().await?;
    Ok(Json(RecordList { records }))
}

/// Return one record by id
pub async fn get_by_id<S: ResourceStore>(store: &S, id: Uuid) -> ApiResult<Json<S::Entity>> {
    let record = store
        .find(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("{} not found", S::NAME)))?;

    Ok(Json(record))
}

/// Insert a new record from a validated payload
pub async fn create<S: ResourceStore>(store: &S, data: S::Create) -> ApiResult<Json<S::Entity>> {
    let record = store.insert(data).await?;
    Ok(Json(record))
}

/// Apply a partial update; only supplied fields change
pub async fn update<S: ResourceStore>(
    store: &S,
    id: Uuid,
    changes: S::Update,
) -> ApiResult<Json<UpdatedRecord<S::Entity>>> {
    match store.update(id, changes).await {
        Ok(record) => Ok(Json(UpdatedRecord { record })),
        Err(StoreError::NotFound) => Err(ApiError::NotFound(format!("{} not found", S::NAME))),
        Err(err) => Err(err.into()),
    }
}

/// Delete a record by id
pub async fn remove<S: ResourceStore>(store: &S, id: Uuid) -> ApiResult<Json<DeleteMessage>> {
    match store.delete(id).await {
        Ok(true) => Ok(Json(DeleteMessage {
            message: format!("{} was deleted successfully", S::NAME),
        })),
        Ok(false) => Err(ApiError::NotFound(
            "Record to delete does not exist".to_string(),
        )),
        Err(StoreError::ForeignKeyViolation { .. }) => Err(ApiError::BadRequest(format!(
            "{} id is being referenced in another model",
            S::NAME
        ))),
        Err(err) => Err(err.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Debug, Clone, Serialize, PartialEq)]
    struct Widget {
        id: Uuid,
        label: String,
    }

    /// In-memory store that mimics the record store's failure modes
    struct WidgetStore {
        records: Mutex<HashMap<Uuid, Widget>>,
        referenced: Mutex<Vec<Uuid>>,
    }

    impl WidgetStore {
        fn new() -> Self {
            Self {
                records: Mutex::new(HashMap::new()),
                referenced: Mutex::new(Vec::new()),
            }
        }
    }

    impl ResourceStore for WidgetStore {
        const NAME: &'static str = "widget";

        type Entity = Widget;
        type ListEntity = Widget;
        type Create = String;
        type Update = Option<String>;

        async fn list(&self) -> StoreResult<Vec<Widget>> {
            Ok(self.records.lock().unwrap().values().cloned().collect())
        }

        async fn find(&self, id: Uuid) -> StoreResult<Option<Widget>> {
            Ok(self.records.lock().unwrap().get(&id).cloned())
        }

        async fn insert(&self, label: String) -> StoreResult<Widget> {
            let mut records = self.records.lock().unwrap();
            if records.values().any(|w| w.label == label) {
                return Err(StoreError::UniqueViolation {
                    fields: "label".to_string(),
                });
            }
            let widget = Widget {
                id: Uuid::new_v4(),
                label,
            };
            records.insert(widget.id, widget.clone());
            Ok(widget)
        }

        async fn update(&self, id: Uuid, label: Option<String>) -> StoreResult<Widget> {
            let mut records = self.records.lock().unwrap();
            let widget = records.get_mut(&id).ok_or(StoreError::NotFound)?;
            if let Some(label) = label {
                widget.label = label;
            }
            Ok(widget.clone())
        }

        async fn delete(&self, id: Uuid) -> StoreResult<bool> {
            if self.referenced.lock().unwrap().contains(&id) {
                return Err(StoreError::ForeignKeyViolation {
                    constraint: "widgets_ref_fkey".to_string(),
                });
            }
            Ok(self.records.lock().unwrap().remove(&id).is_some())
        }
    }

    #[tokio::test]
    async fn test_get_by_id_not_found_message() {
        let store = WidgetStore::new();
        let err = get_by_id(&store, Uuid::new_v4()).await.unwrap_err();
        match err {
            ApiError::NotFound(message) => assert_eq!(message, "widget not found"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_create_reports_unique_violation_fields() {
        let store = WidgetStore::new();
        create(&store, "front-left".to_string()).await.unwrap();

        let err = create(&store, "front-left".to_string()).await.unwrap_err();
        match err {
            ApiError::BadRequest(message) => {
                assert_eq!(message, "Unique constraint failed on the field(s): label");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_update_returns_wrapped_record() {
        let store = WidgetStore::new();
        let created = create(&store, "old".to_string()).await.unwrap();

        let Json(updated) = update(&store, created.0.id, Some("new".to_string()))
            .await
            .unwrap();
        assert_eq!(updated.record.label, "new");
    }

    #[tokio::test]
    async fn test_update_missing_record_is_not_found() {
        let store = WidgetStore::new();
        let err = update(&store, Uuid::new_v4(), None).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_remove_blocked_by_reference() {
        let store = WidgetStore::new();
        let created = create(&store, "held".to_string()).await.unwrap();
        store.referenced.lock().unwrap().push(created.0.id);

        let err = remove(&store, created.0.id).await.unwrap_err();
        match err {
            ApiError::BadRequest(message) => {
                assert_eq!(message, "widget id is being referenced in another model");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_remove_success_and_missing() {
        let store = WidgetStore::new();
        let created = create(&store, "gone".to_string()).await.unwrap();

        let Json(message) = remove(&store, created.0.id).await.unwrap();
        assert_eq!(message.message, "widget was deleted successfully");

        let err = remove(&store, created.0.id).await.unwrap_err();
        match err {
            ApiError::NotFound(message) => {
                assert_eq!(message, "Record to delete does not exist");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_repeated_get_is_idempotent() {
        let store = WidgetStore::new();
        let created = create(&store, "stable".to_string()).await.unwrap();

        let Json(first) = get_by_id(&store, created.0.id).await.unwrap();
        let Json(second) = get_by_id(&store, created.0.id).await.unwrap();
        assert_eq!(first, second);
    }
}
