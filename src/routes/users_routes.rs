use axum::{Router, routing::{get, post}};
use crate::{AppState, controllers::{subscriptions_controller, users_controller}};

pub fn add_routes(router: Router<AppState>) -> Router<AppState> {
    router
        .route("/users", post(users_controller::post_user))
        .route(
            "/users/:id/subscriptions",
            get(users_controller::get_user_subscriptions)
                .post(users_controller::post_user_subscription),
        )
        .route(
            "/subscriptions/:id/enabled",
            post(subscriptions_controller::post_subscription_enabled),
        )
}
