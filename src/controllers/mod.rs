pub mod home_controller;
pub mod tasks_controller;
pub mod users_controller;
pub mod subscriptions_controller;
