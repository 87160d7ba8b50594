//! In-memory implementation of DataService for development and tests

use crate::core::error::{EntityError, HuskError, StorageError};
use crate::core::record::Record;
use crate::core::service::DataService;
use anyhow::Result;
use async_trait::async_trait;
use indexmap::IndexMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use uuid::Uuid;

/// In-memory record store.
///
/// Keeps insertion order, so listings come back oldest first. Writes are
/// last-write-wins. Cloning shares the underlying map.
#[derive(Clone)]
pub struct InMemoryDataService<T: Record> {
    records: Arc<RwLock<IndexMap<String, T>>>,
}

impl<T: Record> InMemoryDataService<T> {
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(IndexMap::new())),
        }
    }

    /// A store pre-filled with records; records without an id get one
    pub fn with_records(records: impl IntoIterator<Item = T>) -> Self {
        let map = records
            .into_iter()
            .map(|mut record| {
                if record.id().is_empty() {
                    record.set_id(Uuid::new_v4().to_string());
                }
                (record.id().to_string(), record)
            })
            .collect();
        Self {
            records: Arc::new(RwLock::new(map)),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, IndexMap<String, T>>> {
        self.records.read().map_err(|e| {
            HuskError::from(StorageError::LockPoisoned {
                message: e.to_string(),
            })
            .into()
        })
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, IndexMap<String, T>>> {
        self.records.write().map_err(|e| {
            HuskError::from(StorageError::LockPoisoned {
                message: e.to_string(),
            })
            .into()
        })
    }
}

/// First unique field of `record` already taken by a record with another id
fn taken_key<T: Record>(records: &IndexMap<String, T>, record: &T) -> Option<String> {
    T::unique_fields().iter().find_map(|field| {
        let value = record.field_value(field)?;
        let key = value.as_string()?;
        records
            .values()
            .filter(|other| other.id() != record.id())
            .any(|other| {
                other
                    .field_value(field)
                    .as_ref()
                    .and_then(|v| v.as_string())
                    .is_some_and(|text| text == key)
            })
            .then(|| key.to_string())
    })
}

fn already_exists<T: Record>(key: String) -> anyhow::Error {
    HuskError::from(EntityError::AlreadyExists {
        entity_type: T::resource_name_singular().to_string(),
        key,
    })
    .into()
}

impl<T: Record> Default for InMemoryDataService<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Record> DataService<T> for InMemoryDataService<T> {
    async fn create(&self, mut record: T) -> Result<T> {
        if record.id().is_empty() {
            record.set_id(Uuid::new_v4().to_string());
        }

        let mut records = self.write()?;
        if records.contains_key(record.id()) {
            return Err(already_exists::<T>(record.id().to_string()));
        }
        if let Some(key) = taken_key(&records, &record) {
            return Err(already_exists::<T>(key));
        }

        records.insert(record.id().to_string(), record.clone());
        tracing::debug!(entity = T::resource_name_singular(), id = record.id(), "stored");

        Ok(record)
    }

    async fn get(&self, id: &str) -> Result<Option<T>> {
        Ok(self.read()?.get(id).cloned())
    }

    async fn list(&self) -> Result<Vec<T>> {
        Ok(self.read()?.values().cloned().collect())
    }

    async fn update(&self, id: &str, mut record: T) -> Result<T> {
        let mut records = self.write()?;

        if !records.contains_key(id) {
            return Err(HuskError::not_found(T::resource_name_singular(), id).into());
        }

        record.set_id(id.to_string());
        if let Some(key) = taken_key(&records, &record) {
            return Err(already_exists::<T>(key));
        }
        records.insert(id.to_string(), record.clone());

        Ok(record)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.write()?
            .shift_remove(id)
            .map(|_| ())
            .ok_or_else(|| HuskError::not_found(T::resource_name_singular(), id).into())
    }

    async fn search(&self, field: &str, value: &str) -> Result<Vec<T>> {
        Ok(self
            .read()?
            .values()
            .filter(|record| {
                record
                    .field_value(field)
                    .as_ref()
                    .and_then(|v| v.as_string())
                    .is_some_and(|text| text == value)
            })
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::employee::Employee;
    use crate::entities::order::{NewOrder, Order, OrderStatus};
    use chrono::Utc;

    fn order(waste_type: &str) -> Order {
        Order::from_new(
            NewOrder {
                waste_type: waste_type.into(),
                quantity: 2,
                amount: 100.0,
                address: "1 Main St".into(),
                phone_number: "0712345678".into(),
                email: "a@b.lk".into(),
                status: None,
            },
            Utc::now(),
        )
    }

    #[tokio::test]
    async fn test_create_assigns_id() {
        let service = InMemoryDataService::<Order>::new();
        let created = service.create(order("CoconutHusk")).await.unwrap();
        assert!(!created.id.is_empty());
        assert_eq!(service.get(&created.id).await.unwrap(), Some(created));
    }

    #[tokio::test]
    async fn test_list_keeps_insertion_order_after_delete() {
        let service = InMemoryDataService::<Order>::new();
        let a = service.create(order("CoconutHusk")).await.unwrap();
        let b = service.create(order("CoconutShell")).await.unwrap();
        let c = service.create(order("CoconutPith")).await.unwrap();
        service.delete(&b.id).await.unwrap();

        let ids: Vec<String> = service.list().await.unwrap().into_iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![a.id, c.id]);
    }

    #[tokio::test]
    async fn test_duplicate_id_is_already_exists() {
        let service = InMemoryDataService::<Order>::new();
        let created = service.create(order("CoconutHusk")).await.unwrap();
        let err = service.create(created).await.unwrap_err();
        let err = HuskError::from(err);
        assert_eq!(err.error_code(), "ENTITY_ALREADY_EXISTS");
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let service = InMemoryDataService::<Order>::new();
        let err = HuskError::from(service.update("nope", order("CoconutHusk")).await.unwrap_err());
        assert_eq!(err.status_code(), axum::http::StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let service = InMemoryDataService::<Order>::new();
        let err = HuskError::from(service.delete("nope").await.unwrap_err());
        assert_eq!(err.status_code(), axum::http::StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_update_keeps_path_id() {
        let service = InMemoryDataService::<Order>::new();
        let created = service.create(order("CoconutHusk")).await.unwrap();
        let mut changed = order("CoconutFiber");
        changed.status = OrderStatus::Delivered;
        let updated = service.update(&created.id, changed).await.unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.status, OrderStatus::Delivered);
    }

    #[tokio::test]
    async fn test_search_exact_match() {
        let service = InMemoryDataService::with_records(vec![
            order("CoconutHusk"),
            order("CoconutShell"),
        ]);
        let found = service.search("wasteType", "CoconutShell").await.unwrap();
        assert_eq!(found.len(), 1);
        assert!(service.search("wasteType", "coconutshell").await.unwrap().is_empty());
    }

    fn employee(employee_id: &str) -> Employee {
        serde_json::from_value(serde_json::json!({
            "EmployeeName": "Sunil",
            "EmployeeId": employee_id,
            "BasicSalary": 40000
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn test_unique_field_is_enforced_on_create() {
        let service = InMemoryDataService::<Employee>::new();
        service.create(employee("E001")).await.unwrap();
        service.create(employee("E002")).await.unwrap();

        let err = HuskError::from(service.create(employee("E001")).await.unwrap_err());
        assert_eq!(err.error_code(), "ENTITY_ALREADY_EXISTS");
        assert_eq!(service.list().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_unique_field_is_enforced_on_update() {
        let service = InMemoryDataService::<Employee>::new();
        service.create(employee("E001")).await.unwrap();
        let second = service.create(employee("E002")).await.unwrap();

        let err = service.update(&second.id, employee("E001")).await.unwrap_err();
        assert_eq!(HuskError::from(err).error_code(), "ENTITY_ALREADY_EXISTS");
        assert!(service.update(&second.id, employee("E002")).await.is_ok());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_creates_store_one_key_holder() {
        let service = Arc::new(InMemoryDataService::<Employee>::new());
        let tasks: Vec<_> = (0..16)
            .map(|_| {
                let service = Arc::clone(&service);
                tokio::spawn(async move { service.create(employee("E777")).await.is_ok() })
            })
            .collect();

        let mut stored = 0;
        for task in tasks {
            if task.await.unwrap() {
                stored += 1;
            }
        }
        assert_eq!(stored, 1);
        assert_eq!(service.search("EmployeeId", "E777").await.unwrap().len(), 1);
    }

    #[test]
    fn test_clones_share_records() {
        let service = InMemoryDataService::<Order>::new();
        let other = service.clone();
        tokio_test::block_on(async {
            let created = service.create(order("CoconutLeaves")).await.unwrap();
            assert_eq!(other.get(&created.id).await.unwrap(), Some(created));
        });
    }
}
