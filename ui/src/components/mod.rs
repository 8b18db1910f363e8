pub mod dashboard;
pub mod schema_requests;
