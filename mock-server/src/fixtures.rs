//! Seed records served by the mock backend.
//!
//! Field names and shapes follow the public placeholder API so clients can
//! be exercised against either backend.

use std::collections::{BTreeMap, HashMap};

use serde_json::{json, Value};

use crate::Collection;

pub const RESOURCES: [&str; 6] = ["posts", "comments", "albums", "photos", "todos", "users"];

/// Records per collection.
pub const SEED_COUNT: u64 = 3;

pub fn seed() -> HashMap<String, Collection> {
    RESOURCES
        .iter()
        .map(|&name| {
            let records: BTreeMap<u64, Value> =
                (1..=SEED_COUNT).map(|id| (id, record(name, id))).collect();
            (name.to_string(), Collection::new(records))
        })
        .collect()
}

fn record(resource: &str, id: u64) -> Value {
    match resource {
        "posts" => json!({
            "userId": 1,
            "id": id,
            "title": format!("post {id}"),
            "body": format!("body of post {id}"),
        }),
        "comments" => json!({
            "postId": 1,
            "id": id,
            "name": format!("comment {id}"),
            "email": format!("commenter{id}@example.com"),
            "body": format!("body of comment {id}"),
        }),
        "albums" => json!({
            "userId": 1,
            "id": id,
            "title": format!("album {id}"),
        }),
        "photos" => json!({
            "albumId": 1,
            "id": id,
            "title": format!("photo {id}"),
            "url": format!("https://example.com/photos/{id}.png"),
            "thumbnailUrl": format!("https://example.com/photos/{id}_thumb.png"),
        }),
        "todos" => json!({
            "userId": 1,
            "id": id,
            "title": format!("todo {id}"),
            "completed": id % 2 == 0,
        }),
        _ => json!({
            "id": id,
            "name": format!("user {id}"),
            "username": format!("user{id}"),
            "email": format!("user{id}@example.com"),
        }),
    }
}
