use super::{RouteError, RouteMethod, Router};
use http::Method;

fn zoo() -> Router<&'static str> {
    let mut router = Router::new();
    router
        .register(RouteMethod::Get, "/", "root_handler")
        .unwrap()
        .register(RouteMethod::Get, "/zoo/animals", "get_animals")
        .unwrap()
        .register(RouteMethod::Post, "/zoo/animals", "create_animal")
        .unwrap()
        .register(RouteMethod::Get, "/zoo/animals/{id}", "get_animal")
        .unwrap()
        .register(RouteMethod::Put, "/zoo/animals/{id}", "update_animal")
        .unwrap()
        .register(RouteMethod::Delete, "/zoo/animals/{animal_id}", "delete_animal")
        .unwrap();
    router
}

#[test]
fn test_root_path() {
    let router = zoo();
    let m = router.resolve(&Method::GET, "/").unwrap();
    assert_eq!(*m.handler, "root_handler");
    assert!(m.path_params.is_empty());
    assert_eq!(*router.resolve(&Method::GET, "").unwrap().handler, "root_handler");
}

#[test]
fn test_methods_have_independent_parameter_names() {
    let router = zoo();
    let put = router.resolve(&Method::PUT, "/zoo/animals/7").unwrap();
    assert_eq!(*put.handler, "update_animal");
    assert_eq!(put.pattern, "/zoo/animals/{id}");
    assert_eq!(put.get_path_param("id"), Some("7"));

    let delete = router.resolve(&Method::DELETE, "/zoo/animals/7").unwrap();
    assert_eq!(*delete.handler, "delete_animal");
    assert_eq!(delete.pattern, "/zoo/animals/{animal_id}");
    assert_eq!(delete.get_path_param("animal_id"), Some("7"));
    assert_eq!(delete.get_path_param("id"), None);
}

#[test]
fn test_unsupported_method_is_not_found() {
    let router = zoo();
    assert!(router.resolve(&Method::PATCH, "/zoo/animals/7").is_none());
    assert!(router.resolve(&Method::HEAD, "/").is_none());
}

#[test]
fn test_duplicate_error_names_method_and_pattern() {
    let mut router = zoo();
    let err = router
        .register(RouteMethod::Post, "zoo/animals/", "again")
        .unwrap_err();
    assert_eq!(
        err,
        RouteError::DuplicateRoute {
            method: RouteMethod::Post,
            pattern: "zoo/animals/".to_string(),
        }
    );
    assert_eq!(
        err.to_string(),
        "duplicate route: POST zoo/animals/ is already registered"
    );
}

#[test]
fn test_conflict_error_message() {
    let mut router = zoo();
    let err = router
        .register(RouteMethod::Get, "/zoo/animals/{slug}/toys", "toys")
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        "conflicting parameter pattern in GET /zoo/animals/{slug}/toys: \
         '{slug}' cannot share a level with existing '{id}'"
    );
}

#[test]
fn test_routes_listing_and_len() {
    let router = zoo();
    assert_eq!(router.len(), 6);
    assert!(!router.is_empty());
    let routes = router.routes();
    assert_eq!(
        routes,
        vec![
            (RouteMethod::Get, "/".to_string()),
            (RouteMethod::Get, "/zoo/animals".to_string()),
            (RouteMethod::Get, "/zoo/animals/{id}".to_string()),
            (RouteMethod::Post, "/zoo/animals".to_string()),
            (RouteMethod::Put, "/zoo/animals/{id}".to_string()),
            (RouteMethod::Delete, "/zoo/animals/{animal_id}".to_string()),
        ]
    );
    assert!(Router::<()>::new().is_empty());
}

#[test]
fn test_route_method_parsing() {
    assert_eq!("GET".parse::<RouteMethod>(), Ok(RouteMethod::Get));
    assert_eq!("DELETE".parse::<RouteMethod>(), Ok(RouteMethod::Delete));
    assert!("get".parse::<RouteMethod>().is_err());
    assert!("PATCH".parse::<RouteMethod>().is_err());
    assert_eq!(RouteMethod::try_from(&Method::PUT), Ok(RouteMethod::Put));
    assert_eq!(RouteMethod::Post.as_method(), Method::POST);
    assert_eq!(RouteMethod::Post.to_string(), "POST");
}

#[test]
fn test_path_params_map() {
    let mut router: Router<u8> = Router::new();
    router
        .register(RouteMethod::Get, "/org/{org}/user/{user}", 1)
        .unwrap();
    let m = router.resolve(&Method::GET, "/org/acme/user/bob").unwrap();
    let map = m.path_params_map();
    assert_eq!(map.len(), 2);
    assert_eq!(map["org"], "acme");
    assert_eq!(map["user"], "bob");
}

#[test]
fn test_repeated_parameter_name_last_write_wins() {
    let mut router: Router<u8> = Router::new();
    router
        .register(RouteMethod::Get, "/org/{id}/user/{id}", 1)
        .unwrap();
    let m = router.resolve(&Method::GET, "/org/1/user/2").unwrap();
    assert_eq!(m.path_params.len(), 2);
    assert_eq!(m.get_path_param("id"), Some("2"));
}
