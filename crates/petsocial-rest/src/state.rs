//! Application state for Axum handlers.

use petsocial_core::HealthCheck;
use petsocial_service::{AdminService, LookupService};
use shaku::{HasComponent, Module};
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub lookup_service: Arc<dyn LookupService>,
    pub admin_service: Arc<dyn AdminService>,
    pub health_checks: Arc<Vec<Arc<dyn HealthCheck>>>,
}

impl AppState {
    /// Creates a new application state.
    pub fn new(
        lookup_service: Arc<dyn LookupService>,
        admin_service: Arc<dyn AdminService>,
        health_checks: Vec<Arc<dyn HealthCheck>>,
    ) -> Self {
        Self {
            lookup_service,
            admin_service,
            health_checks: Arc::new(health_checks),
        }
    }

    /// Resolves the services from a Shaku module.
    pub fn from_module<M>(module: &M, health_checks: Vec<Arc<dyn HealthCheck>>) -> Self
    where
        M: Module + HasComponent<dyn LookupService> + HasComponent<dyn AdminService>,
    {
        let lookup_service: Arc<dyn LookupService> = module.resolve();
        let admin_service: Arc<dyn AdminService> = module.resolve();
        Self::new(lookup_service, admin_service, health_checks)
    }
}
