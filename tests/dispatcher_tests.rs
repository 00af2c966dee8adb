use http::{Method, StatusCode};
use std::io::Read;
use tinyroute::dispatcher::{not_found_body, Dispatcher};
use tinyroute::ids::REQUEST_ID_HEADER;
use tinyroute::server::{ContentType, Request, ResponseError};
use tinyroute::Router;

fn dispatch(router: Router, req: Request) -> tinyroute::server::SentResponse {
    Dispatcher::new(router).dispatch(req)
}

#[test]
fn test_not_found_body_and_status() {
    let res = dispatch(Router::new(), Request::new(Method::GET, "/unregistered"));
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.content_type, Some(ContentType::PlainText));
    assert_eq!(res.body, b"404: Page '/unregistered' not found!");
}

#[test]
fn test_not_found_ignores_query() {
    let res = dispatch(Router::new(), Request::new(Method::GET, "/missing?x=1"));
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.body, not_found_body("/missing").into_bytes());
}

#[test]
fn test_handler_sees_bound_params_and_query() {
    let mut router: Router = Router::new();
    router
        .get("/users/{user_id}/posts/{post_id}", |req, res| {
            let body = format!(
                "{}:{}:{}",
                req.param("user_id").unwrap_or_default(),
                req.param("post_id").unwrap_or_default(),
                req.query().unwrap_or_default()
            );
            Ok(res.send_text(body)?)
        })
        .unwrap();

    let res = dispatch(router, Request::new(Method::GET, "/users/7/posts/abc?draft=true"));
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body, b"7:abc:draft=true");
}

#[test]
fn test_handler_reads_body_and_headers() {
    let mut router: Router = Router::new();
    router
        .put("/notes/{id}", |req, res| {
            let mut text = String::new();
            req.body().read_to_string(&mut text)?;
            let agent = req.header("USER-AGENT").unwrap_or("none");
            Ok(res.send_text(format!("{agent} wrote {text}"))?)
        })
        .unwrap();

    let req = Request::new(Method::PUT, "/notes/1")
        .with_header("User-Agent", "curl")
        .with_body("hi");
    let res = dispatch(router, req);
    assert_eq!(res.body, b"curl wrote hi");
}

#[test]
fn test_handler_error_becomes_500() {
    let mut router: Router = Router::new();
    router
        .get("/fail", |_req, _res| Err(anyhow::anyhow!("database down")))
        .unwrap();
    let res = dispatch(router, Request::new(Method::GET, "/fail"));
    assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(res.content_type, Some(ContentType::Json));
    let body: serde_json::Value = serde_json::from_slice(&res.body).unwrap();
    assert!(body["error"].is_string());
}

#[test]
fn test_handler_panic_becomes_500() {
    let mut router: Router = Router::new();
    router
        .get("/panic", |_req, _res| panic!("handler blew up"))
        .unwrap();
    let dispatcher = Dispatcher::new(router);
    let res = dispatcher.dispatch(Request::new(Method::GET, "/panic"));
    assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);

    // the dispatcher keeps serving after a panic
    let res = dispatcher.dispatch(Request::new(Method::GET, "/other"));
    assert_eq!(res.status, StatusCode::NOT_FOUND);
}

#[test]
fn test_handler_without_response_becomes_500() {
    let mut router: Router = Router::new();
    router.get("/silent", |_req, _res| Ok(())).unwrap();
    let res = dispatch(router, Request::new(Method::GET, "/silent"));
    assert_eq!(res.status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[test]
fn test_sent_response_survives_later_error() {
    let mut router: Router = Router::new();
    router
        .get("/twice", |_req, res| {
            res.send_empty(StatusCode::ACCEPTED)?;
            res.send_text("again")?;
            Ok(())
        })
        .unwrap();
    let res = dispatch(router, Request::new(Method::GET, "/twice"));
    assert_eq!(res.status, StatusCode::ACCEPTED);
    assert!(res.body.is_empty());
}

#[test]
fn test_send_file_from_handler() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("style.css"), "body {}").unwrap();
    let base = dir.path().to_path_buf();

    let mut router: Router = Router::new();
    router
        .get("/assets/{name}", move |req, res| {
            let path = base.join(req.param("name").unwrap_or_default());
            match res.send_file(&path) {
                Err(ResponseError::NotAFile { .. }) => {
                    Ok(res.send_empty(StatusCode::NOT_FOUND)?)
                }
                other => Ok(other?),
            }
        })
        .unwrap();
    let dispatcher = Dispatcher::new(router);

    let res = dispatcher.dispatch(Request::new(Method::GET, "/assets/style.css"));
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.content_type, Some(ContentType::Css));
    assert_eq!(res.body, b"body {}");

    let res = dispatcher.dispatch(Request::new(Method::GET, "/assets/nope.css"));
    assert_eq!(res.status, StatusCode::NOT_FOUND);
}

#[test]
fn test_request_id_taken_from_header() {
    let id = "01ARZ3NDEKTSV4RRFFQ69G5FAV";
    let mut router: Router = Router::new();
    router
        .get("/id", |req, res| Ok(res.send_text(req.request_id().to_string())?))
        .unwrap();
    let dispatcher = Dispatcher::new(router);

    let req = Request::new(Method::GET, "/id").with_header(REQUEST_ID_HEADER, id);
    assert_eq!(dispatcher.dispatch(req).body, id.as_bytes());

    let res = dispatcher.dispatch(Request::new(Method::GET, "/id"));
    assert_eq!(res.body.len(), 26);
}

#[test]
fn test_unsupported_method_is_not_found() {
    let mut router: Router = Router::new();
    router.get("/x", |_req, res| Ok(res.send_text("x")?)).unwrap();
    let res = dispatch(router, Request::new(Method::PATCH, "/x"));
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.body, b"404: Page '/x' not found!");
}
