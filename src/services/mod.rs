pub mod db_init;
pub mod sequence;

pub mod market_data;
pub mod finnhub;
pub mod notifier;
pub mod sendgrid;
pub mod subscription_store;
pub mod trend;

pub mod alert_scan;
pub mod alert_monitor;

pub mod user_service;
pub mod subscription_service;
