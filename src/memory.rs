//! In-memory stand-ins for the Postgres repositories, used by handler tests.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, HeaderMap, Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use crate::movies::dto::{Movie, MoviePayload};
use crate::movies::repo::MovieRepo;
use crate::users::dto::{User, UserPayload};
use crate::users::repo::UserRepo;

/// Rows keyed by id. Ids start at 1, so 0 never exists.
pub struct MemoryTable<T> {
    inner: Mutex<Table<T>>,
}

struct Table<T> {
    rows: BTreeMap<i32, T>,
    next_id: i32,
}

impl<T: Clone> MemoryTable<T> {
    pub fn seeded(rows: Vec<T>) -> Self {
        let rows: BTreeMap<i32, T> = rows
            .into_iter()
            .enumerate()
            .map(|(i, row)| (i as i32 + 1, row))
            .collect();
        let next_id = rows.len() as i32 + 1;
        Self {
            inner: Mutex::new(Table { rows, next_id }),
        }
    }

    fn all(&self) -> Vec<T> {
        self.inner.lock().unwrap().rows.values().cloned().collect()
    }

    fn get(&self, id: i32) -> Option<T> {
        self.inner.lock().unwrap().rows.get(&id).cloned()
    }

    fn insert_with(&self, make: impl FnOnce(i32) -> T) -> i32 {
        let mut table = self.inner.lock().unwrap();
        let id = table.next_id;
        table.next_id += 1;
        table.rows.insert(id, make(id));
        id
    }

    fn replace(&self, id: i32, row: T) -> u64 {
        let mut table = self.inner.lock().unwrap();
        match table.rows.get_mut(&id) {
            Some(slot) => {
                *slot = row;
                1
            }
            None => 0,
        }
    }

    fn remove(&self, id: i32) -> u64 {
        u64::from(self.inner.lock().unwrap().rows.remove(&id).is_some())
    }
}

#[async_trait]
impl MovieRepo for MemoryTable<Movie> {
    async fn list(&self) -> anyhow::Result<Vec<Movie>> {
        Ok(self.all())
    }

    async fn find(&self, id: i32) -> anyhow::Result<Option<Movie>> {
        Ok(self.get(id))
    }

    async fn insert(&self, movie: &MoviePayload) -> anyhow::Result<i32> {
        Ok(self.insert_with(|id| Movie::from_payload(id, movie.clone())))
    }

    async fn update(&self, id: i32, movie: &MoviePayload) -> anyhow::Result<u64> {
        Ok(self.replace(id, Movie::from_payload(id, movie.clone())))
    }

    async fn delete(&self, id: i32) -> anyhow::Result<u64> {
        Ok(self.remove(id))
    }
}

#[async_trait]
impl UserRepo for MemoryTable<User> {
    async fn list(&self) -> anyhow::Result<Vec<User>> {
        Ok(self.all())
    }

    async fn find(&self, id: i32) -> anyhow::Result<Option<User>> {
        Ok(self.get(id))
    }

    async fn insert(&self, user: &UserPayload) -> anyhow::Result<i32> {
        Ok(self.insert_with(|id| User::from_payload(id, user.clone())))
    }

    async fn update(&self, id: i32, user: &UserPayload) -> anyhow::Result<u64> {
        Ok(self.replace(id, User::from_payload(id, user.clone())))
    }

    async fn delete(&self, id: i32) -> anyhow::Result<u64> {
        Ok(self.remove(id))
    }
}

pub fn seed_movies() -> MemoryTable<Movie> {
    MemoryTable::seeded(vec![
        Movie {
            id: 1,
            title: "Citizen Kane".into(),
            director: "Orson Wells".into(),
            year: "1941".into(),
            color: "0".into(),
            duration: 120,
        },
        Movie {
            id: 2,
            title: "The Godfather".into(),
            director: "Francis Ford Coppola".into(),
            year: "1972".into(),
            color: "1".into(),
            duration: 180,
        },
    ])
}

pub fn seed_users() -> MemoryTable<User> {
    MemoryTable::seeded(vec![
        User {
            id: 1,
            firstname: "John".into(),
            lastname: "Doe".into(),
            email: "john.doe@example.com".into(),
            city: "Paris".into(),
            language: "English".into(),
        },
        User {
            id: 2,
            firstname: "Valeriy".into(),
            lastname: "Appius".into(),
            email: "valeriy.appius@example.com".into(),
            city: "Moscow".into(),
            language: "Russian".into(),
        },
    ])
}

/// Fails every statement, as an unreachable database would.
pub struct Unreachable;

fn unreachable_db<T>() -> anyhow::Result<T> {
    anyhow::bail!("pool timed out while waiting for an open connection")
}

#[async_trait]
impl MovieRepo for Unreachable {
    async fn list(&self) -> anyhow::Result<Vec<Movie>> {
        unreachable_db()
    }
    async fn find(&self, _id: i32) -> anyhow::Result<Option<Movie>> {
        unreachable_db()
    }
    async fn insert(&self, _movie: &MoviePayload) -> anyhow::Result<i32> {
        unreachable_db()
    }
    async fn update(&self, _id: i32, _movie: &MoviePayload) -> anyhow::Result<u64> {
        unreachable_db()
    }
    async fn delete(&self, _id: i32) -> anyhow::Result<u64> {
        unreachable_db()
    }
}

#[async_trait]
impl UserRepo for Unreachable {
    async fn list(&self) -> anyhow::Result<Vec<User>> {
        unreachable_db()
    }
    async fn find(&self, _id: i32) -> anyhow::Result<Option<User>> {
        unreachable_db()
    }
    async fn insert(&self, _user: &UserPayload) -> anyhow::Result<i32> {
        unreachable_db()
    }
    async fn update(&self, _id: i32, _user: &UserPayload) -> anyhow::Result<u64> {
        unreachable_db()
    }
    async fn delete(&self, _id: i32) -> anyhow::Result<u64> {
        unreachable_db()
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    /// Parsed JSON, or `Null` for an empty body.
    pub body: Value,
}

impl TestResponse {
    pub fn content_type(&self) -> &str {
        self.headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
    }
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    send_request(app, req).await
}

pub async fn send_request(app: &Router, req: Request<Body>) -> TestResponse {
    let res = app.clone().oneshot(req).await.unwrap();
    let status = res.status();
    let headers = res.headers().clone();
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };
    TestResponse {
        status,
        headers,
        body,
    }
}
