use criterion::{criterion_group, criterion_main, Criterion};
use http::Method;
use std::hint::black_box;
use tinyroute::dispatcher::Dispatcher;
use tinyroute::router::{RouteMethod, Router};
use tinyroute::server::Request;

fn zoo_routes() -> Vec<(RouteMethod, &'static str, &'static str)> {
    vec![
        (RouteMethod::Get, "/", "root_handler"),
        (RouteMethod::Get, "/zoo/animals", "get_animals"),
        (RouteMethod::Post, "/zoo/animals", "create_animal"),
        (RouteMethod::Get, "/zoo/animals/{id}", "get_animal"),
        (RouteMethod::Put, "/zoo/animals/{id}", "update_animal"),
        (RouteMethod::Delete, "/zoo/animals/{id}", "delete_animal"),
        (RouteMethod::Get, "/zoo/animals/{id}/toys/{toy_id}", "animal_toy"),
        (
            RouteMethod::Get,
            "/zoo/{category}/animals/{id}/habitats/{habitat_id}/sections/{section_id}",
            "habitat_section",
        ),
        (
            RouteMethod::Post,
            "/inventory/{warehouse_id}/feeds/{feed_id}/items/{item_id}/batches/{batch_id}",
            "post_item_batch",
        ),
        (
            RouteMethod::Get,
            "/complex/{a}/{b}/{c}/{d}/{e}/{f}/{g}/{h}/{i}",
            "complex_many_params",
        ),
        (RouteMethod::Get, "/zoo/health", "health_check"),
    ]
}

fn bench_route_throughput(c: &mut Criterion) {
    let mut router = Router::new();
    for (method, pattern, handler) in zoo_routes() {
        router.register(method, pattern, handler).unwrap();
    }
    c.bench_function("route_match", |b| {
        let test_paths = [
            (Method::GET, "/zoo/animals/123"),
            (Method::GET, "/zoo/animals/123/toys/456"),
            (Method::GET, "/zoo/cats/animals/123/habitats/88/sections/5"),
            (Method::POST, "/inventory/1/feeds/2/items/3/batches/4"),
            (Method::GET, "/complex/1/2/3/4/5/6/7/8/9"),
            (Method::GET, "/zoo/unknown"),
        ];
        b.iter(|| {
            for (method, path) in test_paths.iter() {
                let res = router.resolve(method, path);
                black_box(&res);
            }
        })
    });
}

fn bench_dispatch(c: &mut Criterion) {
    let mut router: Router = Router::new();
    router
        .get("/zoo/animals/{id}", |req, res| {
            Ok(res.send_text(req.param("id").unwrap_or_default().to_owned())?)
        })
        .unwrap();
    let dispatcher = Dispatcher::new(router);
    c.bench_function("dispatch_text", |b| {
        b.iter(|| {
            let req = Request::new(Method::GET, black_box("/zoo/animals/42"));
            black_box(dispatcher.dispatch(req));
        })
    });
}

criterion_group!(benches, bench_route_throughput, bench_dispatch);
criterion_main!(benches);
