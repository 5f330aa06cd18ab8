pub mod api_utils;
pub mod config;
pub mod confirm;
pub mod date_utils;
pub mod http;
pub mod list_utils;
pub mod listener;
pub mod notify;
pub mod services;
pub mod sse;
