use actix_web::{web, App, HttpServer};
use dotenv::dotenv;
use games_backend::config::cors::configure_cors;
use games_backend::config::database::{connect_store, get_server_address};
use games_backend::config::routes::configure_routes;
use games_backend::constants::GUEST_USERNAME;
use games_backend::services::score_service;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init();

    let address = get_server_address();
    let state = connect_store().await;

    // Pre-create the shared guest account so the first anonymous submission
    // does not have to.
    if let Err(err) = score_service::resolve_player(state.users.as_ref(), GUEST_USERNAME).await {
        panic!("Failed to seed guest account: {:?}", err);
    }

    log::info!("Server is running on {}", address);

    HttpServer::new(move || {
        App::new()
            .wrap(configure_cors())
            .app_data(web::Data::new(state.clone()))
            .configure(configure_routes)
    })
    .bind(address)?
    .run()
    .await
}
