pub mod admin_routes;
pub mod car_routes;
pub mod driver_routes;
pub mod health_routes;
pub mod term_routes;
