use std::{collections::BTreeMap, sync::Arc, time::Duration};

use axum::{
    body::{self, Body},
    http::{Request, StatusCode, header},
    response::Response,
};
use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase, MockExecResult, Value};
use tower::ServiceExt;

use todo_lists::{
    session::SessionStore,
    state::AppState,
    test_helpers::{test_config, test_router, test_state},
};

type Row = BTreeMap<&'static str, Value>;

fn list_row(id: i32, name: &str) -> Row {
    BTreeMap::from([("id", id.into()), ("name", name.into())])
}

fn todo_row(id: i32, name: &str, completed: bool) -> Row {
    BTreeMap::from([
        ("id", id.into()),
        ("name", name.into()),
        ("completed", completed.into()),
    ])
}

fn no_rows() -> Vec<Row> {
    Vec::new()
}

fn exec_ok() -> MockExecResult {
    MockExecResult {
        last_insert_id: 0,
        rows_affected: 1,
    }
}

fn mock_db(queries: Vec<Vec<Row>>, execs: usize) -> DatabaseConnection {
    MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(queries)
        .append_exec_results((0..execs).map(|_| exec_ok()))
        .into_connection()
}

async fn send(state: &Arc<AppState>, request: Request<Body>) -> Response {
    test_router(state).oneshot(request).await.unwrap()
}

async fn html_response(state: &Arc<AppState>, request: Request<Body>) -> (StatusCode, String) {
    let response = send(state, request).await;
    let status = response.status();
    let body = body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

fn post_form(uri: &str, form: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .unwrap()
}

fn post_xhr(uri: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("x-requested-with", "XMLHttpRequest")
        .body(Body::empty())
        .unwrap()
}

fn location(response: &Response) -> &str {
    response.headers()[header::LOCATION].to_str().unwrap()
}

/// `name=value` part of the session cookie the server issued.
fn session_cookie(response: &Response) -> String {
    let set_cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
    set_cookie.split(';').next().unwrap().to_string()
}

fn logged_sql(state: &Arc<AppState>) -> String {
    format!("{:?}", state.db.clone().into_transaction_log())
}

#[tokio::test]
async fn root_redirects_to_lists() {
    let state = test_state(mock_db(Vec::new(), 0));

    let response = send(&state, get("/", None)).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/lists");
}

#[tokio::test]
async fn lists_page_puts_incomplete_lists_first() {
    let state = test_state(mock_db(
        vec![
            vec![list_row(1, "Archive"), list_row(2, "Groceries")],
            vec![todo_row(1, "Old thing", true)],
            vec![todo_row(2, "Milk", false), todo_row(3, "Eggs", true)],
        ],
        0,
    ));

    let response = send(&state, get("/lists", None)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().contains_key(header::SET_COOKIE));

    let body = body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let html = String::from_utf8(body.to_vec()).unwrap();
    let groceries = html.find("Groceries").expect("incomplete list shown");
    let archive = html.find("Archive").expect("complete list shown");
    assert!(groceries < archive);
    assert!(html.contains(r#"<li class="complete">"#));
    assert!(html.contains("1 / 2"));
}

#[tokio::test]
async fn creating_a_list_flashes_success_once() {
    let state = test_state(mock_db(
        vec![
            no_rows(),
            vec![list_row(1, "Groceries")],
            no_rows(),
            no_rows(),
        ],
        1,
    ));

    let response = send(&state, post_form("/lists", "list_name=++Groceries++")).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/lists");
    let cookie = session_cookie(&response);

    let (status, html) = html_response(&state, get("/lists", Some(&cookie))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("The list has been created."));
    assert!(html.contains("Groceries"));

    let (_, html) = html_response(&state, get("/lists", Some(&cookie))).await;
    assert!(!html.contains("The list has been created."));

    let sql = logged_sql(&state);
    assert!(sql.contains("INSERT INTO lists (name) VALUES ($1)"));
    assert!(sql.contains(r#""Groceries""#));
    assert!(!sql.contains("  Groceries"));
}

#[tokio::test]
async fn duplicate_list_name_is_rejected() {
    let state = test_state(mock_db(vec![vec![list_row(1, "Groceries")], no_rows()], 0));

    let (status, html) = html_response(&state, post_form("/lists", "list_name=Groceries")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("List name must be unique."));
    assert!(html.contains(r#"value="Groceries""#));
    assert!(!logged_sql(&state).contains("INSERT"));
}

#[tokio::test]
async fn overlong_list_name_is_rejected() {
    let state = test_state(mock_db(vec![no_rows()], 0));
    let form = format!("list_name={}", "a".repeat(101));

    let (status, html) = html_response(&state, post_form("/lists", &form)).await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("List name must be between 1 and 100 characters."));
}

#[tokio::test]
async fn missing_list_redirects_with_error() {
    let state = test_state(mock_db(vec![no_rows(), no_rows()], 0));

    let response = send(&state, get("/lists/42", None)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/lists");
    let cookie = session_cookie(&response);

    let (_, html) = html_response(&state, get("/lists", Some(&cookie))).await;
    assert!(html.contains("The specified list was not found."));
}

#[tokio::test]
async fn list_page_shows_todos() {
    let state = test_state(mock_db(
        vec![
            vec![list_row(1, "Groceries")],
            vec![todo_row(7, "Eggs", true), todo_row(8, "Milk", false)],
        ],
        0,
    ));

    let (status, html) = html_response(&state, get("/lists/1", None)).await;

    assert_eq!(status, StatusCode::OK);
    let milk = html.find("Milk").expect("open todo shown");
    let eggs = html.find("Eggs").expect("done todo shown");
    assert!(milk < eggs);
    assert!(html.contains(r#"action="/lists/1/todos/8""#));
}

#[tokio::test]
async fn renaming_to_current_name_is_rejected() {
    let state = test_state(mock_db(
        vec![
            vec![list_row(1, "Groceries")],
            no_rows(),
            vec![list_row(1, "Groceries")],
            no_rows(),
        ],
        0,
    ));

    let (status, html) = html_response(&state, post_form("/lists/1", "list_name=Groceries")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("List name must be unique."));
    assert!(!logged_sql(&state).contains("UPDATE lists"));
}

#[tokio::test]
async fn renaming_to_fresh_name_redirects_to_list() {
    let state = test_state(mock_db(
        vec![
            vec![list_row(1, "Groceries")],
            no_rows(),
            vec![list_row(1, "Groceries")],
            no_rows(),
        ],
        1,
    ));

    let response = send(&state, post_form("/lists/1", "list_name=Market")).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/lists/1");
    let sql = logged_sql(&state);
    assert!(sql.contains("UPDATE lists SET name = $1 WHERE id = $2"));
    assert!(sql.contains(r#""Market""#));
}

#[tokio::test]
async fn deleting_a_list_over_xhr_returns_target_path() {
    let state = test_state(mock_db(Vec::new(), 2));

    let (status, body) = html_response(&state, post_xhr("/lists/3/delete")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "/lists");
    let sql = logged_sql(&state);
    assert!(sql.contains("DELETE FROM todos WHERE list_id = $1"));
    assert!(sql.contains("DELETE FROM lists WHERE id = $1"));
}

#[tokio::test]
async fn deleting_a_list_from_form_redirects() {
    let state = test_state(mock_db(vec![no_rows()], 2));

    let response = send(&state, post_form("/lists/3/delete", "")).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/lists");
    let cookie = session_cookie(&response);

    let (_, html) = html_response(&state, get("/lists", Some(&cookie))).await;
    assert!(html.contains("The list has been deleted."));
}

#[tokio::test]
async fn blank_todo_rerenders_list_with_error() {
    let state = test_state(mock_db(vec![vec![list_row(1, "Groceries")], no_rows()], 0));

    let (status, html) = html_response(&state, post_form("/lists/1/todos", "todo=+++")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("Todo must be between 1 and 100 characters."));
    assert!(!logged_sql(&state).contains("INSERT"));
}

#[tokio::test]
async fn adding_a_todo_redirects_to_list() {
    let state = test_state(mock_db(vec![vec![list_row(1, "Groceries")], no_rows()], 1));

    let response = send(&state, post_form("/lists/1/todos", "todo=Milk")).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/lists/1");
    let sql = logged_sql(&state);
    assert!(sql.contains("INSERT INTO todos (name, list_id) VALUES ($1, $2)"));
    assert!(sql.contains(r#""Milk""#));
}

#[tokio::test]
async fn todo_status_follows_form_value() {
    let state = test_state(mock_db(
        vec![vec![list_row(1, "Groceries")], vec![todo_row(5, "Milk", false)]],
        1,
    ));

    let response = send(&state, post_form("/lists/1/todos/5", "completed=true")).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/lists/1");
    let sql = logged_sql(&state);
    assert!(sql.contains("UPDATE todos SET completed = $1 WHERE list_id = $2 AND id = $3"));
    assert!(sql.contains("Bool(Some(true))"));
}

#[tokio::test]
async fn deleting_a_todo_over_xhr_returns_no_content() {
    let state = test_state(mock_db(
        vec![vec![list_row(1, "Groceries")], vec![todo_row(5, "Milk", false)]],
        1,
    ));

    let response = send(&state, post_xhr("/lists/1/todos/5/delete")).await;

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(logged_sql(&state).contains("DELETE FROM todos WHERE list_id = $1 AND id = $2"));
}

#[tokio::test]
async fn completing_all_todos_of_missing_list_is_refused() {
    let state = test_state(mock_db(vec![no_rows()], 0));

    let response = send(&state, post_form("/lists/9/complete_all", "")).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/lists");
    assert!(!logged_sql(&state).contains("UPDATE"));
}

#[tokio::test]
async fn completing_all_todos_redirects_to_list() {
    let state = test_state(mock_db(vec![vec![list_row(1, "Groceries")], no_rows()], 1));

    let response = send(&state, post_form("/lists/1/complete_all", "")).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/lists/1");
    assert!(logged_sql(&state).contains("UPDATE todos SET completed = true WHERE list_id = $1"));
}

#[tokio::test]
async fn store_failure_renders_server_error() {
    let state = test_state(mock_db(Vec::new(), 0));

    let response = send(&state, get("/lists", None)).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn serves_static_assets() {
    let state = test_state(mock_db(Vec::new(), 0));

    let response = send(&state, get("/stylesheets/application.css", None)).await;

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn abandoned_flash_messages_expire() {
    let creates = 20;
    let config = test_config();
    let sessions = SessionStore::new(
        config.session.cookie_name.clone(),
        Duration::from_millis(200),
    );
    let state = Arc::new(AppState {
        config,
        db: mock_db(vec![no_rows(); creates], creates),
        sessions,
    });

    for n in 0..creates {
        let form = format!("list_name=List+{n}");
        let response = send(&state, post_form("/lists", &form)).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
    }
    assert_eq!(state.sessions.pending_count(), creates);

    tokio::time::sleep(Duration::from_millis(250)).await;

    assert_eq!(state.sessions.pending_count(), 0);
}
