//! Application bootstrap service
//!
//! Determines the environment to operate against and initializes the model,
//! or asks the user for an environment when none can be determined.

use std::sync::Arc;

use crate::dialog::EnvironmentSelector;
use crate::error::{CoreError, CoreResult};
use crate::traits::strip_fragment;
use crate::types::{BootstrapContext, BootstrapOutcome, Session, Severity};
use crate::utils::route::HashRoute;

use super::ServiceContext;

/// Prefix of the window title.
pub const TITLE_PREFIX: &str = "JIT Groups";

/// Application bootstrap service
pub struct BootstrapService {
    ctx: Arc<ServiceContext>,
    selector: EnvironmentSelector,
}

impl BootstrapService {
    /// Create a bootstrap service for one page load
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        let selector = ctx.environment_selector();
        Self { ctx, selector }
    }

    pub fn selector(&self) -> &EnvironmentSelector {
        &self.selector
    }

    /// Determine environment and resource for this page load.
    ///
    /// First match wins:
    /// 1. forced reselection (`#reload`) → unresolved
    /// 2. `#!/environments/<name>[/...]` → that environment and resource;
    ///    any other `#!` route → unresolved
    /// 3. remembered environment → that environment, `/environments/<name>`
    /// 4. unresolved
    pub async fn resolve_context(&self) -> BootstrapContext {
        let hash = self.ctx.navigator.hash();

        match HashRoute::parse(hash.as_deref()) {
            HashRoute::ForceReselect => {
                log::info!("Environment reselection requested");
                BootstrapContext::unresolved()
            }
            HashRoute::Environment { name, resource } => {
                log::debug!("Environment {name} taken from location");
                BootstrapContext::for_route(name, resource)
            }
            HashRoute::UnknownRoute => {
                log::debug!("Route {hash:?} names no environment");
                BootstrapContext::unresolved()
            }
            HashRoute::Unrouted => match self.ctx.settings.environment().await {
                Ok(Some(name)) if !name.is_empty() => {
                    log::debug!("Environment {name} taken from settings");
                    BootstrapContext::for_persisted(name)
                }
                Ok(_) => BootstrapContext::unresolved(),
                Err(e) => {
                    log::warn!("Failed to read environment setting: {e}");
                    BootstrapContext::unresolved()
                }
            },
        }
    }

    /// Resolve the environment and initialize the model against it.
    ///
    /// Without an environment, the environment dialog is shown instead; a
    /// selection is persisted and triggers a full reload, a rejection is
    /// shown as a recoverable error. A failed model initialization is
    /// returned to the caller.
    pub async fn load_model(&self) -> CoreResult<BootstrapOutcome> {
        self.ctx.banner().clear();

        let context = self.resolve_context().await;

        let Some(environment) = context.environment else {
            return Ok(match self.select_environment().await {
                Ok(environment) => BootstrapOutcome::Reloading { environment },
                Err(e) => {
                    self.ctx.banner().show_error(&e, Severity::Recoverable);
                    BootstrapOutcome::Unresolved
                }
            });
        };

        let header = &self.ctx.surfaces.header;
        header.set_environment(&environment);
        header.set_title(&format!("{TITLE_PREFIX}: {environment}"));

        log::info!(
            "Initializing model for environment {environment}, resource {:?}",
            context.resource
        );
        let model_context = self
            .ctx
            .model
            .initialize(&environment, context.resource.as_deref())
            .await?;

        header.set_signed_in_user(&model_context.subject.email);
        header.set_application_version(&model_context.application.version);

        Ok(BootstrapOutcome::Ready(Session {
            environment,
            resource: context.resource,
            context: model_context,
        }))
    }

    /// Run the bootstrap and surface a failed model initialization as a
    /// fatal error with a reload action.
    pub async fn start(&self) -> CoreResult<BootstrapOutcome> {
        match self.load_model().await {
            Ok(outcome) => Ok(outcome),
            Err(e) => {
                self.ctx.banner().show_error(&e, Severity::Fatal);
                Err(e)
            }
        }
    }

    /// Prompt the user to select an environment, remember it and reload.
    ///
    /// The reload drops the current fragment so that the next bootstrap
    /// starts from the remembered environment.
    pub async fn select_environment(&self) -> CoreResult<String> {
        let environment = self.selector.select().await?;

        self.ctx.settings.set_environment(&environment).await?;
        log::info!("Environment {environment} selected");

        let href = self.ctx.navigator.href();
        self.ctx.navigator.navigate(strip_fragment(&href));

        Ok(environment)
    }

    /// The header's environment switch: like [`select_environment`](Self::select_environment),
    /// but a dismissed dialog is not an error.
    pub async fn change_environment(&self) -> Option<String> {
        match self.select_environment().await {
            Ok(environment) => Some(environment),
            Err(CoreError::Cancelled) => None,
            Err(e) => {
                self.ctx.banner().show_error(&e, Severity::Recoverable);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ModelError;
    use crate::test_utils::{create_test_context, MockModelClient};
    use crate::traits::ACTION_ACCEPT;
    use crate::types::{Environment, ModelContext, RELOAD_TARGET};

    fn environments() -> MockModelClient {
        MockModelClient::with_environments(vec![
            Environment::new("prod-1", "Production"),
            Environment::new("dev", "Development"),
        ])
    }

    // ---- resolve_context ----

    #[tokio::test]
    async fn route_wins_without_consulting_settings() {
        let t = create_test_context(
            environments(),
            "https://console.example/#!/environments/prod-1/groups",
            Some("dev"),
        );
        let service = BootstrapService::new(t.ctx.clone());

        let context = service.resolve_context().await;

        assert_eq!(context.environment.as_deref(), Some("prod-1"));
        assert_eq!(
            context.resource.as_deref(),
            Some("/environments/prod-1/groups")
        );
        assert_eq!(t.settings.read_count(), 0);
    }

    #[tokio::test]
    async fn persisted_environment_without_fragment() {
        let t = create_test_context(environments(), "https://console.example/", Some("dev"));
        let service = BootstrapService::new(t.ctx.clone());

        let context = service.resolve_context().await;

        assert_eq!(context, BootstrapContext::for_persisted("dev"));
        assert_eq!(context.resource.as_deref(), Some("/environments/dev"));
    }

    #[tokio::test]
    async fn reload_marker_ignores_settings() {
        let t = create_test_context(environments(), "https://console.example/#reload", Some("dev"));
        let service = BootstrapService::new(t.ctx.clone());

        assert_eq!(service.resolve_context().await, BootstrapContext::unresolved());
        assert_eq!(t.settings.read_count(), 0);
    }

    #[tokio::test]
    async fn route_without_environment_ignores_settings() {
        let t = create_test_context(environments(), "https://console.example/#!/about", Some("dev"));
        let service = BootstrapService::new(t.ctx.clone());

        assert_eq!(service.resolve_context().await, BootstrapContext::unresolved());
        assert_eq!(t.settings.read_count(), 0);
    }

    #[tokio::test]
    async fn non_route_fragment_falls_back_to_settings() {
        let t = create_test_context(environments(), "https://console.example/#top", Some("dev"));
        let service = BootstrapService::new(t.ctx.clone());

        assert_eq!(
            service.resolve_context().await,
            BootstrapContext::for_persisted("dev")
        );
    }

    #[tokio::test]
    async fn failing_settings_read_is_unresolved() {
        let t = create_test_context(environments(), "https://console.example/", Some("dev"));
        t.settings.fail_reads("disk unavailable");
        let service = BootstrapService::new(t.ctx.clone());

        assert_eq!(service.resolve_context().await, BootstrapContext::unresolved());
    }

    // ---- load_model ----

    #[tokio::test]
    async fn resolved_environment_initializes_model() {
        let t = create_test_context(
            environments(),
            "https://console.example/#!/environments/prod-1/groups",
            None,
        );
        t.model.set_context(ModelContext::new("alice@example.com", "2.0.1"));
        let service = BootstrapService::new(t.ctx.clone());

        let outcome = service.load_model().await.unwrap();

        let BootstrapOutcome::Ready(session) = outcome else {
            unreachable!("expected a ready session, got {outcome:?}");
        };
        assert_eq!(session.environment, "prod-1");
        assert_eq!(
            t.model.initialized_with(),
            vec![(
                "prod-1".to_string(),
                Some("/environments/prod-1/groups".to_string())
            )]
        );
        assert_eq!(t.header.environment().as_deref(), Some("prod-1"));
        assert_eq!(t.header.title().as_deref(), Some("JIT Groups: prod-1"));
        assert_eq!(t.header.user().as_deref(), Some("alice@example.com"));
        assert_eq!(t.header.version().as_deref(), Some("2.0.1"));
        assert_eq!(t.modal.open_count(), 0);
    }

    #[tokio::test]
    async fn unresolved_environment_selects_persists_and_reloads() {
        let t = create_test_context(environments(), "https://console.example/app#reload", None);
        let service = Arc::new(BootstrapService::new(t.ctx.clone()));

        let task = {
            let service = Arc::clone(&service);
            tokio::spawn(async move { service.load_model().await })
        };
        t.list.wait_for_listener().await;
        t.list.select(1);

        let outcome = task.await.unwrap().unwrap();

        assert_eq!(
            outcome,
            BootstrapOutcome::Reloading {
                environment: "dev".to_string()
            }
        );
        assert_eq!(t.settings.stored().as_deref(), Some("dev"));
        assert_eq!(
            t.navigator.navigations(),
            vec!["https://console.example/app".to_string()]
        );
        assert_eq!(t.modal.closed_actions(), vec![ACTION_ACCEPT.to_string()]);
        assert!(t.model.initialized_with().is_empty());
    }

    #[tokio::test]
    async fn empty_listing_is_recoverable_banner_without_reload() {
        let t = create_test_context(
            MockModelClient::with_environments(Vec::new()),
            "https://console.example/",
            None,
        );
        let service = BootstrapService::new(t.ctx.clone());

        let outcome = service.load_model().await.unwrap();

        assert_eq!(outcome, BootstrapOutcome::Unresolved);
        assert!(t.list.rows().is_empty());
        assert!(t.navigator.navigations().is_empty());
        assert_eq!(t.settings.stored(), None);
        let message = t.banner.current().unwrap();
        assert!(!message.is_fatal());
        assert_eq!(message.text, CoreError::EmptyScope.to_string());
    }

    #[tokio::test]
    async fn dismissed_selection_during_bootstrap_is_shown() {
        let t = create_test_context(environments(), "https://console.example/", None);
        let service = Arc::new(BootstrapService::new(t.ctx.clone()));

        let task = {
            let service = Arc::clone(&service);
            tokio::spawn(async move { service.load_model().await })
        };
        t.list.wait_for_listener().await;
        t.modal.dismiss("close");

        assert_eq!(task.await.unwrap().unwrap(), BootstrapOutcome::Unresolved);
        assert!(t.banner.is_visible());
        assert!(t.navigator.navigations().is_empty());
    }

    #[tokio::test]
    async fn failed_settings_write_does_not_reload() {
        let t = create_test_context(environments(), "https://console.example/", None);
        t.settings.fail_writes("read-only");
        let service = Arc::new(BootstrapService::new(t.ctx.clone()));

        let task = {
            let service = Arc::clone(&service);
            tokio::spawn(async move { service.load_model().await })
        };
        t.list.wait_for_listener().await;
        t.list.select(0);

        assert_eq!(task.await.unwrap().unwrap(), BootstrapOutcome::Unresolved);
        assert!(t.navigator.navigations().is_empty());
        assert!(t.banner.current().unwrap().text.contains("read-only"));
    }

    // ---- start ----

    #[tokio::test(start_paused = true)]
    async fn failed_initialization_is_fatal() {
        let t = create_test_context(environments(), "https://console.example/", Some("dev"));
        t.model.fail_initialize(ModelError::from_response(
            503,
            "Service Unavailable",
            Some("trace-1".to_string()),
            "",
        ));
        let service = BootstrapService::new(t.ctx.clone());

        let result = service.start().await;

        assert!(matches!(result, Err(CoreError::Model(ref e)) if e.http_status == 503));

        tokio::time::sleep(std::time::Duration::from_secs(11)).await;

        assert!(t.banner.is_visible());
        let message = t.banner.current().unwrap();
        assert!(message.is_fatal());
        assert!(message.details.unwrap().contains("HTTP 503"));
        assert_eq!(message.reload_target.as_deref(), Some(RELOAD_TARGET));
        assert!(t.header.user().is_none());

        t.ctx.banner().reload();
        assert_eq!(t.navigator.navigations(), vec![RELOAD_TARGET.to_string()]);
    }

    #[tokio::test]
    async fn successful_start_clears_banner() {
        let t = create_test_context(environments(), "https://console.example/", Some("dev"));
        let service = BootstrapService::new(t.ctx.clone());

        let outcome = service.start().await.unwrap();

        assert!(matches!(outcome, BootstrapOutcome::Ready(ref s) if s.environment == "dev"));
        assert!(!t.banner.is_visible());
        assert!(t.banner.hide_count() >= 1);
    }

    // ---- change_environment ----

    #[tokio::test]
    async fn change_environment_swallows_cancellation() {
        let t = create_test_context(environments(), "https://console.example/#!/environments/dev", None);
        let service = Arc::new(BootstrapService::new(t.ctx.clone()));

        let task = {
            let service = Arc::clone(&service);
            tokio::spawn(async move { service.change_environment().await })
        };
        t.list.wait_for_listener().await;
        t.modal.dismiss("close");

        assert_eq!(task.await.unwrap(), None);
        assert!(t.banner.current().is_none());
    }

    #[tokio::test]
    async fn change_environment_shows_listing_failure() {
        let t = create_test_context(environments(), "https://console.example/", None);
        t.model.fail_list_environments(ModelError::from_response(403, "Forbidden", None, ""));
        let service = BootstrapService::new(t.ctx.clone());

        assert_eq!(service.change_environment().await, None);

        let message = t.banner.current().unwrap();
        assert!(!message.is_fatal());
        assert_eq!(message.details.as_deref(), Some("HTTP 403: Forbidden"));
    }
}
