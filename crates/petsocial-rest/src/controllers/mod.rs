//! REST API controllers.

pub mod admin_controller;
pub mod health_controller;
pub mod lookup_controller;
