use std::sync::{mpsc, Arc};
use std::thread;
use std::time::{Duration, Instant};

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::response::Response;
use http_body_util::BodyExt;
use tower::ServiceExt;
use word_spider::index::search;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::common::{
    html_page, memory_storage, mock_target, mock_url, ranked_storage, test_router, test_spider,
};

fn post_query(body: &str) -> Request<Body> {
    Request::post("/")
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_text(response: Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn test_form_served_on_root() {
    let app = test_router(ranked_storage());

    let response = app
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_text(response).await;
    assert!(html.contains("<form"));
    assert!(html.contains("name=\"query\""));
}

#[tokio::test]
async fn test_results_ranked_by_summed_counts() {
    let app = test_router(ranked_storage());

    let response = app.oneshot(post_query("query=foo+bar")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    let b = html.find("http://b.test/").expect("b.test missing");
    let a = html.find("http://a.test/").expect("a.test missing");
    assert!(b < a, "b.test (7) should rank above a.test (3)");
    assert!(html.contains("(7)"));
    assert!(html.contains("(3)"));
}

#[tokio::test]
async fn test_query_is_percent_decoded_and_normalized() {
    let app = test_router(ranked_storage());

    let response = app.oneshot(post_query("query=%46OO%21")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains("http://b.test/"));
    assert!(html.contains("http://a.test/"));
}

#[tokio::test]
async fn test_empty_query_rejected() {
    let app = test_router(ranked_storage());

    for body in ["query=", "query=+++", "query=%21%3F", ""] {
        let response = app.clone().oneshot(post_query(body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body {:?}", body);
        assert!(body_text(response)
            .await
            .contains("Query must contain 1-4 words"));
    }
}

#[tokio::test]
async fn test_too_many_words_rejected() {
    let app = test_router(ranked_storage());

    let response = app
        .oneshot(post_query("query=foo+bar+baz+qux+quux"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_four_words_accepted() {
    let app = test_router(ranked_storage());

    let response = app
        .oneshot(post_query("query=foo+bar+baz+qux"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_no_match_is_not_found() {
    let app = test_router(ranked_storage());

    let response = app.oneshot(post_query("query=nothing")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_text(response).await.contains("Not found"));
}

#[tokio::test]
async fn test_user_text_is_escaped() {
    let app = test_router(ranked_storage());

    let response = app
        .oneshot(post_query("query=foo+%3Cscript%3Ealert%3C%2Fscript%3E"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(!html.contains("<script>"));
    assert!(html.contains("&lt;script&gt;"));
}

#[tokio::test]
async fn test_favicon_and_options_have_no_content() {
    let app = test_router(ranked_storage());

    let response = app
        .clone()
        .oneshot(Request::get("/favicon.ico").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_unknown_path_is_not_found() {
    let app = test_router(ranked_storage());

    let response = app
        .oneshot(Request::get("/admin").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_busy_storage_does_not_stall_runtime() {
    let storage = ranked_storage();
    let app = test_router(Arc::clone(&storage));

    let (locked_tx, locked_rx) = mpsc::channel();
    let holder = {
        let storage = Arc::clone(&storage);
        thread::spawn(move || {
            let _guard = storage.lock().unwrap();
            locked_tx.send(()).unwrap();
            thread::sleep(Duration::from_millis(400));
        })
    };
    locked_rx.recv().unwrap();

    let search = async {
        let response = app.oneshot(post_query("query=foo")).await.unwrap();
        (response.status(), Instant::now())
    };
    let tick = async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        Instant::now()
    };

    let ((status, searched_at), ticked_at) = tokio::join!(search, tick);
    holder.join().unwrap();

    assert_eq!(status, StatusCode::OK);
    assert!(ticked_at < searched_at, "search blocked the runtime thread");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_crawled_site_is_searchable() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(html_page(
            "Crabs are crustaceans",
            &[mock_url(&server, "/crabs")],
        )))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/crabs"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(html_page("Crabs crabs CRABS walk sideways", &[])),
        )
        .mount(&server)
        .await;

    let storage = memory_storage();
    let report = test_spider(&storage)
        .start(mock_target(&server, "/"), 2)
        .await;
    assert_eq!(report.processed, 2);

    let ranked = {
        let guard = storage.lock().unwrap();
        search(&*guard, &["crabs".to_string()]).unwrap()
    };
    assert_eq!(ranked[0].page, mock_url(&server, "/crabs"));
    assert_eq!(ranked[0].score, 3);
    assert_eq!(ranked[1].page, mock_url(&server, "/"));
    assert_eq!(ranked[1].score, 1);

    let response = test_router(storage)
        .oneshot(post_query("query=sideways"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response)
        .await
        .contains(&mock_url(&server, "/crabs")));
}
