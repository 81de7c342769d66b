use std::{collections::HashSet, sync::Arc};

use adapter::{
    database::ConnectionPool,
    repository::{
        auth::AuthRepositoryImpl, book::BookRepositoryImpl, health::HealthCheckRepositoryImpl,
        roster::RosterRepositoryImpl,
    },
};
use kernel::{
    model::{auth::Identity, role::Role},
    notifier::Notifier,
    repository::{auth::AuthRepository, health::HealthCheckRepository, roster::RosterRepository},
    service::book::BookService,
};
use shared::config::AppConfig;

#[derive(Clone)]
pub struct AppRegistry {
    health_check_repository: Arc<dyn HealthCheckRepository>,
    auth_repository: Arc<dyn AuthRepository>,
    roster_repository: Arc<dyn RosterRepository>,
    book_service: Arc<BookService>,
    admins: Arc<HashSet<String>>,
}

impl AppRegistry {
    pub fn new(
        pool: ConnectionPool,
        roster_pool: ConnectionPool,
        notifier: Arc<dyn Notifier>,
        app_config: AppConfig,
    ) -> Self {
        let health_check_repository = Arc::new(HealthCheckRepositoryImpl::new(pool.clone()));
        let auth_repository = Arc::new(AuthRepositoryImpl::new(pool.clone()));
        let roster_repository: Arc<dyn RosterRepository> =
            Arc::new(RosterRepositoryImpl::new(roster_pool));
        let book_repository = Arc::new(BookRepositoryImpl::new(pool));
        let book_service = Arc::new(BookService::new(
            book_repository,
            roster_repository.clone(),
            notifier,
        ));
        Self::with_components(
            health_check_repository,
            auth_repository,
            roster_repository,
            book_service,
            app_config.auth.admins,
        )
    }

    // 具象のアダプタを介さずに組み立てる。ルーティングのテストでモックを差し込むのに使う
    pub fn with_components(
        health_check_repository: Arc<dyn HealthCheckRepository>,
        auth_repository: Arc<dyn AuthRepository>,
        roster_repository: Arc<dyn RosterRepository>,
        book_service: Arc<BookService>,
        admins: HashSet<String>,
    ) -> Self {
        Self {
            health_check_repository,
            auth_repository,
            roster_repository,
            book_service,
            admins: Arc::new(admins),
        }
    }

    pub fn health_check_repository(&self) -> Arc<dyn HealthCheckRepository> {
        self.health_check_repository.clone()
    }

    pub fn auth_repository(&self) -> Arc<dyn AuthRepository> {
        self.auth_repository.clone()
    }

    pub fn roster_repository(&self) -> Arc<dyn RosterRepository> {
        self.roster_repository.clone()
    }

    pub fn book_service(&self) -> Arc<BookService> {
        self.book_service.clone()
    }

    pub fn resolve_role(&self, identity: &Identity) -> Role {
        Role::resolve(identity, &self.admins)
    }
}
