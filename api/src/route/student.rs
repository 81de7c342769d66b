use axum::{routing::get, Router};
use registry::AppRegistry;

use crate::handler::student::show_student_list;

pub fn build_student_routers() -> Router<AppRegistry> {
    Router::new().route("/students", get(show_student_list))
}
