//! End-to-end: real listener, file-backed store, HTTP client.

use std::sync::Arc;
use std::time::Duration;

use taskboard_core::Task;
use taskboard_server::{ServerConfig, TaskboardServer};
use taskboard_store::{
    ConnectionConfig, SchemaInit, SchemaInitializer, SchemaPolicy, SqliteTaskStore, TaskService,
    TaskStore, connection,
};

struct Running {
    server: TaskboardServer,
    base: String,
    handle: tokio::task::JoinHandle<()>,
    _dir: tempfile::TempDir,
}

async fn start() -> Running {
    let dir = tempfile::tempdir().unwrap();
    let pool = connection::new_file(&dir.path().join("tasks.db"), &ConnectionConfig::default())
        .unwrap();
    let store: Arc<dyn TaskStore> = Arc::new(SqliteTaskStore::new(pool));

    let init = SchemaInitializer::new(Arc::clone(&store));
    let outcome = init.start(SchemaPolicy::FailFast).await.unwrap();
    assert!(matches!(outcome, SchemaInit::Ready));

    let server = TaskboardServer::new(ServerConfig::default(), TaskService::new(store));
    let (addr, handle) = server.listen().await.unwrap();
    Running {
        server,
        base: format!("http://{addr}"),
        handle,
        _dir: dir,
    }
}

async fn stop(running: Running) {
    running.server.shutdown().shutdown();
    tokio::time::timeout(Duration::from_secs(5), running.handle)
        .await
        .unwrap()
        .unwrap();
}

#[tokio::test]
async fn health_over_the_wire() {
    let running = start().await;

    let resp = reqwest::get(format!("{}/health", running.base)).await.unwrap();
    assert_eq!(resp.status(), 200);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body, serde_json::json!({"status": "Server is running"}));

    stop(running).await;
}

#[tokio::test]
async fn create_and_list_over_the_wire() {
    let running = start().await;
    let client = reqwest::Client::new();
    let url = format!("{}/api/tasks", running.base);

    let resp = client
        .post(&url)
        .json(&serde_json::json!({"title": "Buy milk", "description": ""}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);
    let milk: Task = resp.json().await.unwrap();
    assert_eq!(milk.title, "Buy milk");
    assert_eq!(milk.description.as_deref(), Some(""));
    assert!(!milk.completed);

    let resp = client
        .post(&url)
        .json(&serde_json::json!({"title": "Walk dog"}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);
    let dog: Task = resp.json().await.unwrap();
    assert_ne!(dog.id, milk.id);

    let listed: Vec<Task> = client.get(&url).send().await.unwrap().json().await.unwrap();
    assert_eq!(listed, vec![dog, milk]);

    stop(running).await;
}

#[tokio::test]
async fn invalid_create_is_rejected_over_the_wire() {
    let running = start().await;
    let client = reqwest::Client::new();
    let url = format!("{}/api/tasks", running.base);

    let resp = client
        .post(&url)
        .json(&serde_json::json!({"title": "   "}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "title must not be empty");

    let listed: Vec<Task> = client.get(&url).send().await.unwrap().json().await.unwrap();
    assert!(listed.is_empty());

    stop(running).await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_creates_over_the_wire() {
    let running = start().await;
    let client = reqwest::Client::new();
    let url = format!("{}/api/tasks", running.base);

    let requests = (0..20).map(|i| {
        let client = client.clone();
        let url = url.clone();
        async move {
            let resp = client
                .post(&url)
                .json(&serde_json::json!({"title": format!("task {i}")}))
                .send()
                .await
                .unwrap();
            assert_eq!(resp.status(), 201);
            resp.json::<Task>().await.unwrap().id
        }
    });
    let mut ids = futures::future::join_all(requests).await;
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 20);

    stop(running).await;
}
