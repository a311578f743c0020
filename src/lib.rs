#[cfg(feature = "server")]
use actix_cors::Cors;
#[cfg(feature = "server")]
use actix_web::{App, HttpServer, middleware, web};

#[cfg(feature = "server")]
use crate::models::config::ServerConfig;
#[cfg(feature = "server")]
use crate::repository::DieselRepository;

#[cfg(feature = "server")]
pub mod crypto;
#[cfg(feature = "data")]
pub mod db;
#[cfg(feature = "data")]
pub mod domain;
#[cfg(feature = "server")]
pub mod dto;
#[cfg(feature = "data")]
pub mod models;
#[cfg(feature = "data")]
pub mod pagination;
#[cfg(feature = "server")]
pub mod portal;
#[cfg(feature = "data")]
pub mod repository;
#[cfg(feature = "data")]
pub mod schema;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "server")]
pub mod services;

/// Builds and runs the Actix-Web HTTP server using the provided configuration.
#[cfg(feature = "server")]
pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
    let pool = db::establish_connection_pool(&server_config.database_url).map_err(|e| {
        std::io::Error::other(format!("Failed to establish database connection: {e}"))
    })?;

    let repo = DieselRepository::new(pool);

    let bind_address = (server_config.address.clone(), server_config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .service(
                web::scope("/api")
                    .service(
                        web::scope("/auth")
                            .service(routes::auth::register)
                            .service(routes::auth::login)
                            .service(routes::auth::me),
                    )
                    .service(
                        web::scope("/users")
                            .service(routes::users::list_users)
                            .service(routes::users::create_user)
                            .service(routes::users::get_user)
                            .service(routes::users::update_user)
                            .service(routes::users::delete_user),
                    )
                    .service(
                        web::scope("/leads")
                            .service(routes::leads::list_leads)
                            .service(routes::leads::create_lead)
                            .service(routes::leads::list_lead_events)
                            .service(routes::leads::create_lead_event)
                            .service(routes::leads::convert_lead)
                            .service(routes::leads::get_lead)
                            .service(routes::leads::update_lead)
                            .service(routes::leads::delete_lead),
                    )
                    .service(
                        web::scope("/contacts")
                            .service(routes::contacts::list_contacts)
                            .service(routes::contacts::create_contact)
                            .service(routes::contacts::get_contact)
                            .service(routes::contacts::update_contact)
                            .service(routes::contacts::delete_contact),
                    )
                    .service(
                        web::scope("/accounts")
                            .service(routes::accounts::list_accounts)
                            .service(routes::accounts::create_account)
                            .service(routes::accounts::get_account)
                            .service(routes::accounts::update_account)
                            .service(routes::accounts::delete_account),
                    )
                    .service(
                        web::scope("/transactions")
                            .service(routes::transactions::list_transactions)
                            .service(routes::transactions::create_transaction)
                            .service(routes::transactions::get_transaction)
                            .service(routes::transactions::update_transaction),
                    )
                    .service(
                        web::scope("/custom-fields")
                            .service(routes::custom_fields::list_fields)
                            .service(routes::custom_fields::create_field)
                            .service(routes::custom_fields::update_field)
                            .service(routes::custom_fields::deactivate_field),
                    )
                    .service(
                        web::scope("/mac")
                            .service(routes::mac_search::search)
                            .service(routes::mac_search::search_result)
                            .service(routes::mac_search::history)
                            .service(routes::mac_search::list_portals)
                            .service(routes::mac_search::save_credentials),
                    ),
            )
            .app_data(web::Data::new(repo.clone()))
            .app_data(web::Data::new(server_config.clone()))
    })
    .bind(bind_address)?
    .run()
    .await
}
