pub mod fixtures;

use std::{
    collections::{BTreeMap, HashMap},
    sync::Arc,
};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::{json, Map, Value};
use tokio::{net::TcpListener, sync::RwLock};

/// One collection of records. `next_id` only ever grows, so an id freed by
/// a delete is never handed out again.
#[derive(Debug, Clone, Default)]
pub struct Collection {
    pub next_id: u64,
    pub records: BTreeMap<u64, Value>,
}

impl Collection {
    pub fn new(records: BTreeMap<u64, Value>) -> Self {
        let next_id = records.keys().next_back().map_or(1, |last| last + 1);
        Self { next_id, records }
    }

    fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

pub type Db = Arc<RwLock<HashMap<String, Collection>>>;

/// Router over a freshly seeded store.
pub fn app() -> Router {
    app_with(Arc::new(RwLock::new(fixtures::seed())))
}

pub fn app_with(db: Db) -> Router {
    Router::new()
        .route("/{resource}", get(list_records).post(create_record))
        .route(
            "/{resource}/{id}",
            get(get_record).put(update_record).delete(delete_record),
        )
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_records(
    State(db): State<Db>,
    Path(resource): Path<String>,
) -> Result<Json<Vec<Value>>, StatusCode> {
    let db = db.read().await;
    let collection = db.get(&resource).ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(collection.records.values().cloned().collect()))
}

async fn create_record(
    State(db): State<Db>,
    Path(resource): Path<String>,
    Json(mut input): Json<Map<String, Value>>,
) -> Result<(StatusCode, Json<Value>), StatusCode> {
    let mut db = db.write().await;
    let collection = db.get_mut(&resource).ok_or(StatusCode::NOT_FOUND)?;
    let id = collection.allocate_id();
    input.insert("id".to_string(), Value::from(id));
    let record = Value::Object(input);
    collection.records.insert(id, record.clone());
    tracing::debug!(%resource, id, "created record");
    Ok((StatusCode::CREATED, Json(record)))
}

async fn get_record(
    State(db): State<Db>,
    Path((resource, id)): Path<(String, u64)>,
) -> Result<Json<Value>, StatusCode> {
    let db = db.read().await;
    db.get(&resource)
        .and_then(|collection| collection.records.get(&id))
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

/// Full replacement; the stored `id` always matches the path.
async fn update_record(
    State(db): State<Db>,
    Path((resource, id)): Path<(String, u64)>,
    Json(mut input): Json<Map<String, Value>>,
) -> Result<Json<Value>, StatusCode> {
    let mut db = db.write().await;
    let record = db
        .get_mut(&resource)
        .and_then(|collection| collection.records.get_mut(&id))
        .ok_or(StatusCode::NOT_FOUND)?;
    input.insert("id".to_string(), Value::from(id));
    *record = Value::Object(input);
    tracing::debug!(%resource, id, "replaced record");
    Ok(Json(record.clone()))
}

/// Answers 200 with an empty object, like the public placeholder API.
async fn delete_record(
    State(db): State<Db>,
    Path((resource, id)): Path<(String, u64)>,
) -> Result<Json<Value>, StatusCode> {
    let mut db = db.write().await;
    db.get_mut(&resource)
        .and_then(|collection| collection.records.remove(&id))
        .map(|_| Json(json!({})))
        .ok_or(StatusCode::NOT_FOUND)
}
