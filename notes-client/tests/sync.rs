use axum::{
    extract::{Request, State},
    http::Method,
    middleware::{self, Next},
    response::{IntoResponse, Response},
};
use notes_client::{ApiError, NoteDraft, NoteMirror, NotesApi, View};
use notes_server::{repository::MemoryRepository, service::NoteService};
use reqwest::StatusCode;

use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

/// Serves a fresh in-memory notes server and returns its API root.
async fn spawn_server() -> String {
    let router =
        notes_server::router(Arc::new(NoteService::new(Arc::new(MemoryRepository::new()))));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    format!("http://{addr}/api")
}

async fn fail_listing(
    State(failing): State<Arc<AtomicBool>>,
    request: Request,
    next: Next,
) -> Response {
    if failing.load(Ordering::SeqCst) && request.method() == Method::GET {
        return (StatusCode::INTERNAL_SERVER_ERROR, "Error fetching notes").into_response();
    }
    next.run(request).await
}

/// Like `spawn_server`, but `GET /api` answers 500 while `failing` is set.
async fn spawn_flaky_server(failing: Arc<AtomicBool>) -> String {
    let router =
        notes_server::router(Arc::new(NoteService::new(Arc::new(MemoryRepository::new()))))
            .layer(middleware::from_fn_with_state(failing, fail_listing));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    format!("http://{addr}/api")
}

async fn loaded_mirror(base_url: &str) -> NoteMirror {
    let mut mirror = NoteMirror::new(NotesApi::new(base_url).unwrap());
    mirror.load().await;
    mirror
}

async fn add(mirror: &mut NoteMirror, title: &str, content: &str) -> String {
    mirror.open_editor(None);
    mirror
        .save(&NoteDraft::new(title, content))
        .await
        .unwrap()
        .id
}

#[tokio::test]
async fn load_from_empty_server_renders_empty_view() {
    let mirror = loaded_mirror(&spawn_server().await).await;

    assert!(mirror.notes().is_empty());
    assert_eq!(mirror.view(), View::Empty);
}

#[tokio::test]
async fn load_from_unreachable_server_falls_back_to_empty() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let mirror = loaded_mirror(&format!("http://{addr}/api")).await;
    assert!(mirror.notes().is_empty());
}

#[tokio::test]
async fn load_after_server_error_falls_back_to_empty() {
    let failing = Arc::new(AtomicBool::new(false));
    let base = spawn_flaky_server(failing.clone()).await;
    let mut mirror = loaded_mirror(&base).await;
    add(&mut mirror, "one", "1").await;
    add(&mut mirror, "two", "2").await;
    assert_eq!(mirror.notes().len(), 2);

    failing.store(true, Ordering::SeqCst);
    mirror.load().await;
    assert!(mirror.notes().is_empty());
    assert_eq!(mirror.view(), View::Empty);

    let fresh = loaded_mirror(&base).await;
    assert!(fresh.notes().is_empty());
    assert_eq!(fresh.view(), View::Empty);
}

#[tokio::test]
async fn update_of_note_missing_from_mirror_leaves_mirror_alone() {
    let failing = Arc::new(AtomicBool::new(false));
    let base = spawn_flaky_server(failing.clone()).await;
    let mut mirror = loaded_mirror(&base).await;
    let id = add(&mut mirror, "draft", "v1").await;

    mirror.open_editor(Some(&id));
    failing.store(true, Ordering::SeqCst);
    mirror.load().await;
    failing.store(false, Ordering::SeqCst);
    assert!(mirror.notes().is_empty());
    assert_eq!(mirror.editing(), Some(id.as_str()));

    let saved = mirror.save(&NoteDraft::new("final", "v2")).await.unwrap();
    assert_eq!(saved.id, id);
    assert_eq!(saved.title, "final");
    assert!(mirror.notes().is_empty());
    assert!(mirror.editing().is_none());

    mirror.load().await;
    assert_eq!(mirror.notes().len(), 1);
    assert_eq!(mirror.notes()[0].title, "final");
}

#[tokio::test]
async fn load_replaces_previous_contents() {
    let base = spawn_server().await;
    let mut writer = loaded_mirror(&base).await;
    add(&mut writer, "one", "1").await;
    add(&mut writer, "two", "2").await;

    let mut reader = loaded_mirror(&base).await;
    assert_eq!(reader.notes().len(), 2);

    reader.load().await;
    assert_eq!(reader.notes().len(), 2);
}

#[tokio::test]
async fn created_notes_are_prepended_and_trimmed() {
    let mut mirror = loaded_mirror(&spawn_server().await).await;

    mirror.open_editor(None);
    let first = mirror
        .save(&NoteDraft::new(" first ", " one "))
        .await
        .unwrap();
    assert_eq!(first.title, "first");
    assert_eq!(first.content, "one");

    add(&mut mirror, "second", "two").await;

    let titles: Vec<&str> = mirror.notes().iter().map(|n| n.title.as_str()).collect();
    assert_eq!(titles, ["second", "first"]);
    assert!(mirror.editing().is_none());
}

#[tokio::test]
async fn edit_replaces_the_matching_entry_in_place() {
    let base = spawn_server().await;
    let mut mirror = loaded_mirror(&base).await;
    for title in ["a", "b", "c"] {
        add(&mut mirror, title, "body").await;
    }
    let target = mirror.notes()[1].id.clone();

    let draft = mirror.open_editor(Some(&target));
    assert_eq!(mirror.editing(), Some(target.as_str()));
    assert_eq!(draft, NoteDraft::new("b", "body"));

    mirror.save(&NoteDraft::new("b2", "new body")).await.unwrap();

    assert_eq!(mirror.notes().len(), 3);
    assert_eq!(mirror.notes()[1].id, target);
    assert_eq!(mirror.notes()[1].title, "b2");
    assert!(mirror.editing().is_none());

    let reloaded = loaded_mirror(&base).await;
    assert!(
        reloaded
            .notes()
            .iter()
            .any(|n| n.id == target && n.title == "b2" && n.content == "new body")
    );
}

#[tokio::test]
async fn rejected_save_keeps_mirror_and_editor() {
    let mut mirror = loaded_mirror(&spawn_server().await).await;
    let id = add(&mut mirror, "keep", "me").await;
    let before = mirror.notes().to_vec();

    mirror.open_editor(Some(&id));
    let err = mirror
        .save(&NoteDraft::new("   ", "changed"))
        .await
        .unwrap_err();

    match err {
        ApiError::Status { status, message } => {
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(message, "Title is required");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(mirror.notes(), before.as_slice());
    assert_eq!(mirror.editing(), Some(id.as_str()));

    mirror.close_editor();
    assert!(mirror.editing().is_none());

    mirror.open_editor(None);
    assert!(mirror.save(&NoteDraft::new("title", "")).await.is_err());
    assert_eq!(mirror.notes(), before.as_slice());
}

#[tokio::test]
async fn editing_a_note_deleted_elsewhere_fails_without_changes() {
    let base = spawn_server().await;
    let mut mine = loaded_mirror(&base).await;
    let id = add(&mut mine, "shared", "note").await;

    let mut theirs = loaded_mirror(&base).await;
    theirs.delete(&id).await.unwrap();

    mine.open_editor(Some(&id));
    let err = mine.save(&NoteDraft::new("mine", "wins?")).await.unwrap_err();
    assert!(matches!(
        err,
        ApiError::Status {
            status: StatusCode::NOT_FOUND,
            ..
        }
    ));
    assert_eq!(mine.notes().len(), 1);
    assert_eq!(mine.notes()[0].title, "shared");
}

#[tokio::test]
async fn delete_removes_only_after_confirmation() {
    let mut mirror = loaded_mirror(&spawn_server().await).await;
    let keep = add(&mut mirror, "keep", "1").await;
    let drop_id = add(&mut mirror, "drop", "2").await;

    let mut asked = None;
    let deleted = mirror
        .confirm_delete(&drop_id, |note| {
            asked = Some(note.title.clone());
            false
        })
        .await;
    assert!(!deleted);
    assert_eq!(asked.as_deref(), Some("drop"));
    assert_eq!(mirror.notes().len(), 2);

    assert!(mirror.confirm_delete(&drop_id, |_| true).await);
    assert_eq!(mirror.notes().len(), 1);
    assert_eq!(mirror.notes()[0].id, keep);

    assert!(!mirror.confirm_delete(&drop_id, |_| true).await);
}

#[tokio::test]
async fn failed_delete_leaves_mirror_unchanged() {
    let base = spawn_server().await;
    let mut mirror = loaded_mirror(&base).await;
    let id = add(&mut mirror, "gone", "soon").await;

    loaded_mirror(&base).await.delete(&id).await.unwrap();

    let err = mirror.delete(&id).await.unwrap_err();
    assert!(matches!(
        err,
        ApiError::Status {
            status: StatusCode::NOT_FOUND,
            ..
        }
    ));
    assert_eq!(mirror.notes().len(), 1);
}

#[tokio::test]
async fn view_follows_mirror_state() {
    let mut mirror = loaded_mirror(&spawn_server().await).await;
    let id = add(&mut mirror, "visible", "text").await;

    let View::Notes(cards) = mirror.view() else {
        panic!("expected note cards");
    };
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].delete_action(), format!("delete:{id}"));

    mirror.delete(&id).await.unwrap();
    assert_eq!(mirror.view(), View::Empty);
}
