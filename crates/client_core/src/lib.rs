use std::{sync::Arc, time::Duration};

use shared::domain::MessageKind;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

pub mod api;
pub mod config;
pub mod error;
pub mod render;
pub mod status;
pub mod surface;

pub use api::{ActivityApi, HttpActivityApi};
pub use config::Settings;
pub use error::{ApiCallError, SettingsError};
pub use status::StatusPresenter;
pub use surface::{Element, MessageBanner, PageSurface, SignupForm};

const SIGNUP_REJECTED_FALLBACK: &str = "An error occurred";
const SIGNUP_FAILED_TEXT: &str = "Failed to sign up. Please try again.";
const UNREGISTER_REJECTED_FALLBACK: &str = "Failed to unregister participant.";
const UNREGISTER_FAILED_TEXT: &str = "Failed to unregister participant. Please try again.";

/// Drives the activity page: one fetch-and-render path and two write handlers.
///
/// Every write is followed by a full reload; the surface is never patched
/// locally. Concurrent writes are not sequenced, so the last reload to
/// complete decides what is shown.
pub struct PageController {
    api: Arc<dyn ActivityApi>,
    surface: Mutex<PageSurface>,
    status: StatusPresenter,
}

impl PageController {
    pub fn new(api: Arc<dyn ActivityApi>) -> Arc<Self> {
        Self::with_hide_after(api, status::DEFAULT_HIDE_AFTER)
    }

    pub fn with_hide_after(api: Arc<dyn ActivityApi>, hide_after: Duration) -> Arc<Self> {
        Arc::new(Self {
            api,
            surface: Mutex::new(PageSurface::new()),
            status: StatusPresenter::new(hide_after),
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Arc<Self>, ApiCallError> {
        let api = HttpActivityApi::from_settings(settings)?;
        Ok(Self::with_hide_after(
            Arc::new(api),
            settings.message_hide_after(),
        ))
    }

    pub fn status(&self) -> &StatusPresenter {
        &self.status
    }

    pub async fn surface(&self) -> PageSurface {
        self.surface.lock().await.clone()
    }

    pub async fn banner(&self) -> MessageBanner {
        self.status.banner().await
    }

    pub async fn render_html(&self) -> String {
        let banner = self.status.banner().await;
        self.surface.lock().await.to_html(&banner)
    }

    /// Fetches the catalog and rebuilds the list and option set from scratch.
    /// Failures end up on the page, never with the caller.
    pub async fn load_activities(&self) {
        match self.api.list_activities().await {
            Ok(catalog) => {
                let cards = catalog
                    .iter()
                    .map(|(name, details)| render::render_activity_card(name, details))
                    .collect();
                let options = std::iter::once(render::placeholder_option())
                    .chain(catalog.names().map(render::activity_option))
                    .collect();
                let count = catalog.len();

                self.surface.lock().await.replace_activities(
                    cards,
                    options,
                    catalog.into_activities(),
                );
                info!(activities = count, "activities: list rendered");
            }
            Err(err) => {
                error!(error = %err, "activities: error fetching activities");
                self.surface
                    .lock()
                    .await
                    .show_load_failure(render::load_failure_notice());
            }
        }
    }

    /// Stands in for typing into the email input and picking an option.
    pub async fn fill_signup_form(&self, email: impl Into<String>, activity: impl Into<String>) {
        let mut surface = self.surface.lock().await;
        surface.form.email = email.into();
        surface.form.activity = activity.into();
    }

    pub async fn submit_signup(&self) {
        let (email, activity) = {
            let surface = self.surface.lock().await;
            (surface.form.email.clone(), surface.form.activity.clone())
        };

        match self.api.signup(&activity, &email).await {
            Ok(body) => {
                info!(%activity, %email, "activities: signup accepted");
                self.status
                    .show_message(body.message, MessageKind::Success)
                    .await;
                self.surface.lock().await.form.reset();
                self.load_activities().await;
            }
            Err(err) if err.is_rejection() => {
                warn!(%activity, %email, error = %err, "activities: signup rejected");
                let text = err.detail().unwrap_or(SIGNUP_REJECTED_FALLBACK).to_string();
                self.status.show_message(text, MessageKind::Error).await;
            }
            Err(err) => {
                error!(%activity, %email, error = %err, "activities: error signing up");
                self.status
                    .show_message(SIGNUP_FAILED_TEXT, MessageKind::Error)
                    .await;
            }
        }
    }

    /// Click entry point for the whole list area. Only remove controls are
    /// acted on; returns whether the click was dispatched.
    pub async fn handle_list_click(&self, target: &Element) -> bool {
        if !target.has_class(render::REMOVE_CONTROL_CLASS) {
            return false;
        }
        let (Some(activity), Some(email)) = (target.data("activity"), target.data("email")) else {
            warn!("activities: remove control without activity/email data");
            return false;
        };

        self.unregister_participant(activity, email).await;
        true
    }

    pub async fn unregister_participant(&self, activity: &str, email: &str) {
        match self.api.unregister(activity, email).await {
            Ok(body) => {
                info!(%activity, %email, "activities: participant removed");
                self.status
                    .show_message(body.message, MessageKind::Success)
                    .await;
                self.load_activities().await;
            }
            Err(err) if err.is_rejection() => {
                warn!(%activity, %email, error = %err, "activities: unregister rejected");
                let text = err
                    .detail()
                    .unwrap_or(UNREGISTER_REJECTED_FALLBACK)
                    .to_string();
                self.status.show_message(text, MessageKind::Error).await;
            }
            Err(err) => {
                error!(
                    %activity,
                    %email,
                    error = %err,
                    "activities: error unregistering participant"
                );
                self.status
                    .show_message(UNREGISTER_FAILED_TEXT, MessageKind::Error)
                    .await;
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
