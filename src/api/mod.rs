pub mod auth;
pub mod bookings;
pub mod health;
pub mod routes;
pub mod services;
pub mod swagger;
pub mod users;
