use super::ResourceService;
use crate::model::LanguageSelection;
use futures::stream::{self, BoxStream, StreamExt};
use tokio::sync::watch;

/// Holds the selected display language and broadcasts changes.
///
/// Backed by a watch channel, so a slow subscriber only ever sees the latest
/// selection.
pub struct LanguageSelector {
    tx: watch::Sender<String>,
    default_message: String,
}

impl LanguageSelector {
    pub fn new(initial: &str, default_message: &str) -> Self {
        let (tx, _rx) = watch::channel(initial.to_string());
        Self {
            tx,
            default_message: default_message.to_string(),
        }
    }

    pub fn select(&self, language: &str) {
        tracing::debug!("Language selected: {}", language);
        self.tx.send_replace(language.to_string());
    }

    pub fn current(&self) -> String {
        self.tx.borrow().clone()
    }
}

impl ResourceService for LanguageSelector {
    fn language_selected(&self) -> BoxStream<'static, LanguageSelection> {
        let rx = self.tx.subscribe();
        stream::unfold((rx, true), |(mut rx, first)| async move {
            if !first {
                rx.changed().await.ok()?;
            }
            let value = rx.borrow_and_update().clone();
            Some((LanguageSelection { value }, (rx, false)))
        })
        .boxed()
    }

    fn default_coming_soon_message(&self) -> String {
        self.default_message.clone()
    }
}
