pub mod console_config_handler;
pub mod health_handler;
pub mod ui_handler;
