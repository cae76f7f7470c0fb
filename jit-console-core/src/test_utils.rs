//! Test helpers
//!
//! Mock implementations of the host traits and a factory for a fully mocked
//! service context.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::dialog::ClosedSignal;
use crate::error::{CoreError, CoreResult, ModelError};
use crate::services::{ServiceContext, Surfaces};
use crate::traits::{
    BannerSurface, HeaderSurface, ListSurface, ModalSurface, ModelClient, Navigator,
    SelectionListener, SettingsStore,
};
use crate::types::{BannerMessage, Environment, EnvironmentList, ListItem, ModelContext};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

// ===== MockModelClient =====

pub struct MockModelClient {
    environments: Mutex<EnvironmentList>,
    list_error: Mutex<Option<ModelError>>,
    init_error: Mutex<Option<ModelError>>,
    context: Mutex<ModelContext>,
    initialized: Mutex<Vec<(String, Option<String>)>>,
}

impl MockModelClient {
    pub fn new() -> Self {
        Self {
            environments: Mutex::new(EnvironmentList::default()),
            list_error: Mutex::new(None),
            init_error: Mutex::new(None),
            context: Mutex::new(ModelContext::new("user@example.com", "1.0.0")),
            initialized: Mutex::new(Vec::new()),
        }
    }

    pub fn with_environments(environments: Vec<Environment>) -> Self {
        let model = Self::new();
        model.set_environments(EnvironmentList { environments });
        model
    }

    pub fn set_environments(&self, list: EnvironmentList) {
        *lock(&self.environments) = list;
    }

    pub fn set_context(&self, context: ModelContext) {
        *lock(&self.context) = context;
    }

    pub fn fail_list_environments(&self, error: ModelError) {
        *lock(&self.list_error) = Some(error);
    }

    pub fn fail_initialize(&self, error: ModelError) {
        *lock(&self.init_error) = Some(error);
    }

    /// Arguments of every `initialize` call so far
    pub fn initialized_with(&self) -> Vec<(String, Option<String>)> {
        lock(&self.initialized).clone()
    }
}

#[async_trait]
impl ModelClient for MockModelClient {
    async fn list_environments(&self) -> CoreResult<EnvironmentList> {
        if let Some(error) = lock(&self.list_error).clone() {
            return Err(error.into());
        }
        Ok(lock(&self.environments).clone())
    }

    async fn initialize(
        &self,
        environment: &str,
        resource: Option<&str>,
    ) -> CoreResult<ModelContext> {
        lock(&self.initialized).push((environment.to_string(), resource.map(str::to_string)));
        if let Some(error) = lock(&self.init_error).clone() {
            return Err(error.into());
        }
        Ok(lock(&self.context).clone())
    }
}

// ===== MockSettingsStore =====

#[derive(Default)]
pub struct MockSettingsStore {
    environment: Mutex<Option<String>>,
    reads: Mutex<usize>,
    read_error: Mutex<Option<String>>,
    write_error: Mutex<Option<String>>,
}

impl MockSettingsStore {
    pub fn new(environment: Option<&str>) -> Self {
        Self {
            environment: Mutex::new(environment.map(str::to_string)),
            ..Self::default()
        }
    }

    pub fn read_count(&self) -> usize {
        *lock(&self.reads)
    }

    pub fn stored(&self) -> Option<String> {
        lock(&self.environment).clone()
    }

    pub fn fail_reads(&self, message: &str) {
        *lock(&self.read_error) = Some(message.to_string());
    }

    pub fn fail_writes(&self, message: &str) {
        *lock(&self.write_error) = Some(message.to_string());
    }
}

#[async_trait]
impl SettingsStore for MockSettingsStore {
    async fn environment(&self) -> CoreResult<Option<String>> {
        *lock(&self.reads) += 1;
        if let Some(message) = lock(&self.read_error).clone() {
            return Err(CoreError::StorageError(message));
        }
        Ok(self.stored())
    }

    async fn set_environment(&self, name: &str) -> CoreResult<()> {
        if let Some(message) = lock(&self.write_error).clone() {
            return Err(CoreError::StorageError(message));
        }
        *lock(&self.environment) = Some(name.to_string());
        Ok(())
    }
}

// ===== MockNavigator =====

pub struct MockNavigator {
    href: String,
    navigations: Mutex<Vec<String>>,
}

impl MockNavigator {
    pub fn new(href: &str) -> Self {
        Self {
            href: href.to_string(),
            navigations: Mutex::new(Vec::new()),
        }
    }

    pub fn navigations(&self) -> Vec<String> {
        lock(&self.navigations).clone()
    }
}

impl Navigator for MockNavigator {
    fn href(&self) -> String {
        self.href.clone()
    }

    fn navigate(&self, target: &str) {
        lock(&self.navigations).push(target.to_string());
    }
}

// ===== MockModalSurface =====

/// Modal that closes synchronously: `close` emits the closed signal of the
/// current show cycle right away.
#[derive(Default)]
pub struct MockModalSurface {
    signal: Mutex<Option<ClosedSignal>>,
    opens: Mutex<usize>,
    closed: Mutex<Vec<String>>,
}

impl MockModalSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn open_count(&self) -> usize {
        *lock(&self.opens)
    }

    /// Actions passed to `close`
    pub fn closed_actions(&self) -> Vec<String> {
        lock(&self.closed).clone()
    }

    pub fn last_signal(&self) -> Option<ClosedSignal> {
        lock(&self.signal).clone()
    }

    /// The user closes the modal (e.g. the close button or Escape).
    pub fn dismiss(&self, action: &str) {
        if let Some(signal) = self.last_signal() {
            signal.emit(action);
        }
    }
}

impl ModalSurface for MockModalSurface {
    fn open(&self, on_closed: ClosedSignal) {
        *lock(&self.opens) += 1;
        *lock(&self.signal) = Some(on_closed);
    }

    fn close(&self, action: &str) {
        lock(&self.closed).push(action.to_string());
        self.dismiss(action);
    }
}

// ===== MockListSurface =====

#[derive(Default)]
pub struct MockListSurface {
    rows: Mutex<Vec<ListItem>>,
    listener: Mutex<Option<Arc<dyn SelectionListener>>>,
    clears: Mutex<usize>,
}

impl MockListSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> Vec<ListItem> {
        lock(&self.rows).clone()
    }

    pub fn clear_count(&self) -> usize {
        *lock(&self.clears)
    }

    pub fn has_listener(&self) -> bool {
        lock(&self.listener).is_some()
    }

    pub fn listener(&self) -> Option<Arc<dyn SelectionListener>> {
        lock(&self.listener).clone()
    }

    /// The user clicks row `index`.
    pub fn select(&self, index: usize) {
        if let Some(listener) = self.listener() {
            listener.on_select(index);
        }
    }

    /// Yield until a selection listener is registered.
    pub async fn wait_for_listener(&self) {
        while !self.has_listener() {
            tokio::task::yield_now().await;
        }
    }
}

impl ListSurface for MockListSurface {
    fn clear_rows(&self) {
        *lock(&self.clears) += 1;
        lock(&self.rows).clear();
    }

    fn add_row(&self, item: ListItem) {
        lock(&self.rows).push(item);
    }

    fn listen(&self, listener: Arc<dyn SelectionListener>) {
        *lock(&self.listener) = Some(listener);
    }

    fn unlisten(&self) {
        *lock(&self.listener) = None;
    }
}

// ===== MockBannerSurface =====

#[derive(Default)]
pub struct MockBannerSurface {
    current: Mutex<Option<BannerMessage>>,
    hides: Mutex<usize>,
}

impl MockBannerSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self) -> bool {
        lock(&self.current).is_some()
    }

    /// The message currently shown
    pub fn current(&self) -> Option<BannerMessage> {
        lock(&self.current).clone()
    }

    pub fn hide_count(&self) -> usize {
        *lock(&self.hides)
    }
}

impl BannerSurface for MockBannerSurface {
    fn show(&self, message: &BannerMessage) {
        *lock(&self.current) = Some(message.clone());
    }

    fn hide(&self) {
        *lock(&self.hides) += 1;
        *lock(&self.current) = None;
    }
}

// ===== MockHeaderSurface =====

#[derive(Default)]
pub struct MockHeaderSurface {
    environment: Mutex<Option<String>>,
    title: Mutex<Option<String>>,
    user: Mutex<Option<String>>,
    version: Mutex<Option<String>>,
}

impl MockHeaderSurface {
    pub fn environment(&self) -> Option<String> {
        lock(&self.environment).clone()
    }

    pub fn title(&self) -> Option<String> {
        lock(&self.title).clone()
    }

    pub fn user(&self) -> Option<String> {
        lock(&self.user).clone()
    }

    pub fn version(&self) -> Option<String> {
        lock(&self.version).clone()
    }
}

impl HeaderSurface for MockHeaderSurface {
    fn set_environment(&self, name: &str) {
        *lock(&self.environment) = Some(name.to_string());
    }

    fn set_title(&self, title: &str) {
        *lock(&self.title) = Some(title.to_string());
    }

    fn set_signed_in_user(&self, email: &str) {
        *lock(&self.user) = Some(email.to_string());
    }

    fn set_application_version(&self, version: &str) {
        *lock(&self.version) = Some(version.to_string());
    }
}

// ===== Test context =====

/// A service context wired to mocks, with handles to every mock.
pub struct TestContext {
    pub ctx: Arc<ServiceContext>,
    pub model: Arc<MockModelClient>,
    pub settings: Arc<MockSettingsStore>,
    pub navigator: Arc<MockNavigator>,
    pub modal: Arc<MockModalSurface>,
    pub list: Arc<MockListSurface>,
    pub banner: Arc<MockBannerSurface>,
    pub header: Arc<MockHeaderSurface>,
}

/// Create a test context for a page load at `href` with an optional
/// remembered environment.
pub fn create_test_context(
    model: MockModelClient,
    href: &str,
    environment: Option<&str>,
) -> TestContext {
    let model = Arc::new(model);
    let settings = Arc::new(MockSettingsStore::new(environment));
    let navigator = Arc::new(MockNavigator::new(href));
    let modal = Arc::new(MockModalSurface::new());
    let list = Arc::new(MockListSurface::new());
    let banner = Arc::new(MockBannerSurface::new());
    let header = Arc::new(MockHeaderSurface::default());

    let ctx = Arc::new(ServiceContext::new(
        model.clone(),
        settings.clone(),
        navigator.clone(),
        Surfaces {
            modal: modal.clone(),
            list: list.clone(),
            banner: banner.clone(),
            header: header.clone(),
        },
    ));

    TestContext {
        ctx,
        model,
        settings,
        navigator,
        modal,
        list,
        banner,
        header,
    }
}
