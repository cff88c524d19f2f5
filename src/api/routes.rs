use actix_web::{guard, web};

use super::{auth, bookings, health, services, users};
use crate::middleware::{OwnershipGuard, SessionAuth};
use crate::utils::ApiError;

/// Registers every endpoint. Expects `web::Data` for `dyn DocumentStore`,
/// `TokenCodec`, `CookiePolicy` and `DocumentPolicy` on the app.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        ApiError::bad_request(format!("Invalid JSON body: {}", err)).into()
    }))
    .app_data(web::QueryConfig::default().error_handler(|err, _req| {
        ApiError::bad_request(format!("Invalid query string: {}", err)).into()
    }))
    .route("/", web::get().to(health::index))
    .route("/health", web::get().to(health::health_check))
    // Auth
    .route("/login", web::post().to(auth::login))
    .route("/logout", web::post().to(auth::logout))
    // Services
    .route("/services", web::get().to(services::list_services))
    .route("/services/marquee", web::get().to(services::list_marquee))
    .route("/services/detail/{id}", web::get().to(services::get_service))
    .route("/services/put/{id}", web::put().to(services::put_service))
    .route("/services/delete/{id}", web::delete().to(services::delete_service))
    .route("/manage-services/{uid}", web::get().to(services::manage_services))
    .route("/add-service", web::post().to(services::add_service))
    // Bookings: the per-user listings need a session owned by {uid}
    .service(
        web::resource("/booked-services/{uid}")
            .wrap(OwnershipGuard)
            .wrap(SessionAuth)
            .route(web::get().to(bookings::booked_services)),
    )
    .service(
        web::resource("/services-todo/{uid}")
            .guard(guard::Get())
            .wrap(OwnershipGuard)
            .wrap(SessionAuth)
            .route(web::get().to(bookings::services_todo)),
    )
    .route("/services-todo/{id}", web::patch().to(bookings::update_booking))
    .route("/book-service", web::post().to(bookings::book_service))
    // Users
    .route("/users", web::post().to(users::create_user));
}
