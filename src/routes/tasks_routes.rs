use axum::{Router, routing::post};
use crate::{AppState, controllers::tasks_controller};

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    router.route("/tasks/alert-scan", post(tasks_controller::post_alert_scan))
}
