//! In-memory records behind the stub API.

use jiff::Timestamp;
use payloads::Resource;
use serde_json::{Map, Value, json};
use std::{
    collections::{BTreeMap, HashMap},
    sync::{Mutex, MutexGuard},
};

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASSWORD: &str = "password";

pub type Record = Map<String, Value>;

/// A request as seen by the stub, for asserting on verbs and encodings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: String,
    /// Media type without parameters, e.g. `multipart/form-data`.
    pub content_type: Option<String>,
}

/// A canned failure returned by the next resource request.
#[derive(Debug, Clone)]
pub struct InjectedFailure {
    pub status: u16,
    pub body: Value,
}

#[derive(Default)]
struct StoreInner {
    next_id: u64,
    records: HashMap<Resource, BTreeMap<u64, Record>>,
    requests: Vec<RecordedRequest>,
    failure: Option<InjectedFailure>,
}

#[derive(Default)]
pub struct StubStore {
    inner: Mutex<StoreInner>,
}

/// Columns that can be mass-assigned for each resource.
pub fn fillable(resource: Resource) -> &'static [&'static str] {
    match resource {
        Resource::Attributes => &["name", "value", "description"],
        Resource::Benefits => &["title", "description", "icon"],
        Resource::Books => &["name", "phone", "email", "service", "message"],
        Resource::Faqs => &["question", "answer", "category"],
        Resource::Futures => &["title", "description", "icon", "category"],
        Resource::Projects => {
            &["title", "description", "image", "category", "client", "duration"]
        }
        Resource::Services => &["name", "description", "icon", "features"],
        Resource::Steps => &["title", "description", "order", "icon"],
        Resource::Users => &["name", "email", "password", "role"],
    }
}

impl StubStore {
    /// A store holding only the admin account.
    pub fn seeded() -> Self {
        let store = Self::default();
        let mut admin = Record::new();
        admin.insert("name".into(), json!("Admin"));
        admin.insert("email".into(), json!(ADMIN_EMAIL));
        admin.insert("password".into(), json!(ADMIN_PASSWORD));
        admin.insert("role".into(), json!("admin"));
        store.insert(Resource::Users, admin);
        store
    }

    fn lock(&self) -> MutexGuard<'_, StoreInner> {
        // a panicking test thread must not wedge the other handlers
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn list(&self, resource: Resource) -> Vec<Value> {
        self.lock()
            .records
            .get(&resource)
            .map(|records| records.values().map(public).collect())
            .unwrap_or_default()
    }

    pub fn get(&self, resource: Resource, id: u64) -> Option<Value> {
        self.lock()
            .records
            .get(&resource)
            .and_then(|records| records.get(&id))
            .map(public)
    }

    pub fn insert(&self, resource: Resource, fields: Record) -> Value {
        let mut inner = self.lock();
        inner.next_id += 1;
        let id = inner.next_id;
        let now = Timestamp::now().to_string();

        let mut record = Record::new();
        record.insert("id".into(), json!(id));
        record.extend(fillable_fields(resource, fields));
        record.insert("created_at".into(), json!(now));
        record.insert("updated_at".into(), json!(now));

        let value = public(&record);
        inner.records.entry(resource).or_default().insert(id, record);
        value
    }

    /// Overwrite the given fields; absent fields keep their value.
    pub fn update(
        &self,
        resource: Resource,
        id: u64,
        fields: Record,
    ) -> Option<Value> {
        let mut inner = self.lock();
        let record = inner.records.get_mut(&resource)?.get_mut(&id)?;
        record.extend(fillable_fields(resource, fields));
        record.insert("updated_at".into(), json!(Timestamp::now().to_string()));
        Some(public(record))
    }

    pub fn remove(&self, resource: Resource, id: u64) -> bool {
        self.lock()
            .records
            .get_mut(&resource)
            .is_some_and(|records| records.remove(&id).is_some())
    }

    /// Whether another user already has this email.
    pub fn email_taken(&self, email: &str, except: Option<u64>) -> bool {
        self.lock()
            .records
            .get(&Resource::Users)
            .is_some_and(|users| {
                users.iter().any(|(id, user)| {
                    Some(*id) != except && user.get("email") == Some(&json!(email))
                })
            })
    }

    /// Id of the user with these credentials.
    pub fn authenticate(&self, email: &str, password: &str) -> Option<u64> {
        let inner = self.lock();
        inner.records.get(&Resource::Users)?.iter().find_map(|(id, user)| {
            (user.get("email") == Some(&json!(email))
                && user.get("password") == Some(&json!(password)))
            .then_some(*id)
        })
    }

    pub fn record_request(&self, request: RecordedRequest) {
        self.lock().requests.push(request);
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.lock().requests.clone()
    }

    pub fn clear_requests(&self) {
        self.lock().requests.clear();
    }

    pub fn fail_next(&self, failure: InjectedFailure) {
        self.lock().failure = Some(failure);
    }

    pub fn take_failure(&self) -> Option<InjectedFailure> {
        self.lock().failure.take()
    }
}

fn fillable_fields(resource: Resource, fields: Record) -> Record {
    let allowed = fillable(resource);
    fields
        .into_iter()
        .filter(|(key, _)| allowed.contains(&key.as_str()))
        .collect()
}

/// The record as the API returns it: passwords are hidden.
fn public(record: &Record) -> Value {
    let mut record = record.clone();
    record.remove("password");
    Value::Object(record)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passwords_are_hidden_and_ids_increase() {
        let store = StubStore::seeded();
        let users = store.list(Resource::Users);
        assert_eq!(users.len(), 1);
        assert!(users[0].get("password").is_none());
        assert_eq!(store.authenticate(ADMIN_EMAIL, ADMIN_PASSWORD), Some(1));

        let mut fields = Record::new();
        fields.insert("name".into(), json!("Speed"));
        fields.insert("unknown".into(), json!("dropped"));
        let created = store.insert(Resource::Attributes, fields);
        assert_eq!(created["id"], 2);
        assert!(created.get("unknown").is_none());
    }

    #[test]
    fn remove_is_not_idempotent() {
        let store = StubStore::default();
        let created = store.insert(Resource::Steps, Record::new());
        let id = created["id"].as_u64().unwrap();
        assert!(store.remove(Resource::Steps, id));
        assert!(!store.remove(Resource::Steps, id));
    }
}
