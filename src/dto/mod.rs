pub mod api_response;
pub mod auth_dto;
pub mod car_dto;
pub mod driver_dto;
pub mod term_dto;
pub mod upload_dto;
