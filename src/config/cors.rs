use actix_cors::Cors;

pub fn configure_cors() -> Cors {
    Cors::default()
        .allowed_origin("https://agostonicholas.github.io")
        .allowed_origin("http://127.0.0.1:3000")
        .allowed_methods(vec!["GET", "POST"])
        .allowed_headers(vec![actix_web::http::header::CONTENT_TYPE])
        .max_age(3600) // Cache preflight responses for 1 hour
}
