use std::{sync::Arc, time::Duration};

use shared::domain::MessageKind;
use tokio::{sync::Mutex, task::JoinHandle};

use crate::surface::MessageBanner;

pub const DEFAULT_HIDE_AFTER: Duration = Duration::from_secs(5);

struct BannerSlot {
    banner: MessageBanner,
    /// Bumped on every `show_message`; a timer only hides the message it was armed for.
    generation: u64,
}

/// Owns the status banner and its single auto-hide timer.
pub struct StatusPresenter {
    slot: Arc<Mutex<BannerSlot>>,
    timer: Mutex<Option<JoinHandle<()>>>,
    hide_after: Duration,
}

impl StatusPresenter {
    pub fn new(hide_after: Duration) -> Self {
        Self {
            slot: Arc::new(Mutex::new(BannerSlot {
                banner: MessageBanner::default(),
                generation: 0,
            })),
            timer: Mutex::new(None),
            hide_after,
        }
    }

    /// Shows `text` and re-arms the hide timer, superseding any previous message.
    pub async fn show_message(&self, text: impl Into<String>, kind: MessageKind) {
        // Held until the new task is armed, so bump order matches arming order.
        let mut timer = self.timer.lock().await;
        let generation = {
            let mut slot = self.slot.lock().await;
            slot.generation += 1;
            slot.banner.text = text.into();
            slot.banner.kind = Some(kind);
            slot.banner.hidden = false;
            slot.generation
        };

        if let Some(pending) = timer.take() {
            pending.abort();
        }

        let slot = Arc::clone(&self.slot);
        let hide_after = self.hide_after;
        *timer = Some(tokio::spawn(async move {
            tokio::time::sleep(hide_after).await;
            let mut slot = slot.lock().await;
            if slot.generation == generation {
                slot.banner.hidden = true;
            }
        }));
    }

    pub async fn banner(&self) -> MessageBanner {
        self.slot.lock().await.banner.clone()
    }

    pub async fn is_timer_armed(&self) -> bool {
        self.timer
            .lock()
            .await
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl Default for StatusPresenter {
    fn default() -> Self {
        Self::new(DEFAULT_HIDE_AFTER)
    }
}

impl Drop for StatusPresenter {
    fn drop(&mut self) {
        if let Some(pending) = self.timer.get_mut().take() {
            pending.abort();
        }
    }
}
