use axum::{routing::get, Router};
use registry::AppRegistry;

use crate::handler::role::get_current_role;

pub fn build_role_routers() -> Router<AppRegistry> {
    Router::new().route("/role", get(get_current_role))
}
