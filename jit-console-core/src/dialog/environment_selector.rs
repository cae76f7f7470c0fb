//! Dialog for selecting an environment

use std::sync::{Arc, Mutex, PoisonError};

use crate::error::{CoreError, CoreResult};
use crate::traits::{ListSurface, ModalSurface, ModelClient, SelectionListener, ACTION_ACCEPT};
use crate::types::{Environment, ListItem};

use super::controller::{DialogController, DialogOutcome};

/// Lists the available environments and lets the user pick one.
///
/// The outcome resolves with the name of the selected environment.
pub struct EnvironmentSelector {
    model: Arc<dyn ModelClient>,
    list: Arc<dyn ListSurface>,
    controller: DialogController<String>,
}

impl EnvironmentSelector {
    pub fn new(
        model: Arc<dyn ModelClient>,
        modal: Arc<dyn ModalSurface>,
        list: Arc<dyn ListSurface>,
    ) -> Self {
        Self {
            model,
            list,
            controller: DialogController::new(modal),
        }
    }

    pub fn controller(&self) -> &DialogController<String> {
        &self.controller
    }

    /// Fetch the environments of the model, then open the dialog with one
    /// row per environment.
    ///
    /// Fails without opening the modal if a previous outcome is still
    /// pending (`DialogBusy`), if the listing fails, or if it contains no
    /// environments (`EmptyScope`). The list surface is only touched while
    /// no other show cycle is pending.
    pub async fn show(&self) -> CoreResult<DialogOutcome<String>> {
        if self.controller.is_pending() {
            return Err(CoreError::DialogBusy);
        }

        self.list.unlisten();
        self.list.clear_rows();

        let environments = self.model.list_environments().await?.environments;
        if environments.is_empty() {
            return Err(CoreError::EmptyScope);
        }

        // Another show cycle may have opened while the listing was in flight.
        let outcome = self.controller.show()?;

        for environment in &environments {
            self.list.add_row(
                ListItem::new(environment.name.as_str())
                    .with_secondary(environment.description.as_str())
                    .with_href(format!(
                        "#!/environments/{}",
                        urlencoding::encode(&environment.name)
                    )),
            );
        }

        self.list.listen(Arc::new(SelectionHandler {
            environments: Mutex::new(Some(environments)),
            list: Arc::clone(&self.list),
            controller: self.controller.clone(),
        }));

        Ok(outcome)
    }

    /// Show the dialog and wait for the user's choice.
    pub async fn select(&self) -> CoreResult<String> {
        self.show().await?.await
    }
}

/// One-shot listener: the first valid selection settles the dialog.
struct SelectionHandler {
    environments: Mutex<Option<Vec<Environment>>>,
    list: Arc<dyn ListSurface>,
    controller: DialogController<String>,
}

impl SelectionListener for SelectionHandler {
    fn on_select(&self, index: usize) {
        let name = {
            let mut environments = self
                .environments
                .lock()
                .unwrap_or_else(PoisonError::into_inner);

            let Some(name) = environments
                .as_ref()
                .and_then(|envs| envs.get(index))
                .map(|env| env.name.clone())
            else {
                return;
            };
            environments.take();
            name
        };

        self.list.unlisten();
        self.controller.set_result(name);
        self.controller.close_with(ACTION_ACCEPT);
    }
}
