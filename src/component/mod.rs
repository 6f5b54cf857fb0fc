use crate::decorate::{
    item_selection, node_selection, DecoratedNode, DecoratedTree, DecorationContext, ListItem,
    MessageResolver, ParentMessageFallback,
};
use crate::model::{
    CollectionTreeNodes, CollectionTreeOptions, ComingSoonDetails, ContentStatusEntry,
    SelectionEvent,
};
use crate::services::Services;
use crate::tree::{ContentTree, NodeId};
use futures::StreamExt;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

/// Host-driven inputs. Replaced wholesale on every change notification.
#[derive(Debug, Clone, Default)]
pub struct TreeInputs {
    pub nodes: Option<CollectionTreeNodes>,
    pub options: CollectionTreeOptions,
    pub content_status: Option<Vec<ContentStatusEntry>>,
}

#[derive(Debug)]
enum LifecycleEvent {
    ComingSoonResolved(ComingSoonDetails),
    LanguageSelected(String),
}

/// Collection tree browser state.
///
/// Async sources run as spawned tasks and report back over a channel; the
/// results are applied only when the host calls [`process_pending`] or
/// [`next_event`], so all state changes happen on the host's task.
///
/// [`process_pending`]: CollectionTreeComponent::process_pending
/// [`next_event`]: CollectionTreeComponent::next_event
pub struct CollectionTreeComponent {
    services: Services,
    inputs: TreeInputs,
    parent_fallback: ParentMessageFallback,
    selected_language: Option<String>,
    coming_soon: Option<ComingSoonDetails>,
    decorated: Option<DecoratedTree>,
    cancel: CancellationToken,
    events_tx: mpsc::UnboundedSender<LifecycleEvent>,
    events_rx: mpsc::UnboundedReceiver<LifecycleEvent>,
    selection_tx: mpsc::UnboundedSender<SelectionEvent>,
    started: bool,
    rebuilds: u64,
}

impl CollectionTreeComponent {
    pub fn new(
        services: Services,
        inputs: TreeInputs,
        parent_fallback: ParentMessageFallback,
    ) -> (Self, mpsc::UnboundedReceiver<SelectionEvent>) {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let (selection_tx, selection_rx) = mpsc::unbounded_channel();

        let component = Self {
            services,
            inputs,
            parent_fallback,
            selected_language: None,
            coming_soon: None,
            decorated: None,
            cancel: CancellationToken::new(),
            events_tx,
            events_rx,
            selection_tx,
            started: false,
            rebuilds: 0,
        };
        (component, selection_rx)
    }

    /// Subscribes to the coming-soon setting and the language stream.
    /// Must be called from within a tokio runtime.
    pub fn start(&mut self) {
        if self.started || self.cancel.is_cancelled() {
            return;
        }
        self.started = true;

        let root_org_id = self.services.resolve_root_org_id();
        tracing::info!("Starting collection tree for root org {:?}", root_org_id);

        self.spawn_coming_soon_fetch(root_org_id);
        self.spawn_language_subscription();
    }

    fn spawn_coming_soon_fetch(&self, root_org_id: Option<String>) {
        let org = self.services.org.clone();
        let tx = self.events_tx.clone();
        let cancel = self.cancel.clone();

        tokio::spawn(async move {
            let setting = tokio::select! {
                biased;
                _ = cancel.cancelled() => return,
                result = org.coming_soon_message() => result,
            };

            let blob = match setting {
                Ok(setting) => match setting.value {
                    Some(blob) => blob,
                    None => {
                        tracing::debug!("Coming soon setting has no value");
                        return;
                    }
                },
                Err(e) => {
                    tracing::warn!("Failed to fetch coming soon setting: {}", e);
                    return;
                }
            };

            let Some(root_org_id) = root_org_id else {
                tracing::debug!("No root org id, skipping org coming soon message");
                return;
            };

            match ComingSoonDetails::find_for_org(&blob, &root_org_id) {
                Ok(Some(details)) => {
                    let _ = tx.send(LifecycleEvent::ComingSoonResolved(details));
                }
                Ok(None) => {
                    tracing::debug!("No coming soon message configured for {}", root_org_id);
                }
                Err(e) => tracing::warn!("Malformed coming soon setting: {}", e),
            }
        });
    }

    fn spawn_language_subscription(&self) {
        let mut languages = self.services.resources.language_selected();
        let tx = self.events_tx.clone();
        let cancel = self.cancel.clone();

        tokio::spawn(async move {
            loop {
                let next = tokio::select! {
                    biased;
                    _ = cancel.cancelled() => break,
                    next = languages.next() => next,
                };
                let Some(selection) = next else { break };
                if tx.send(LifecycleEvent::LanguageSelected(selection.value)).is_err() {
                    break;
                }
            }
            tracing::debug!("Language subscription ended");
        });
    }

    /// Applies every queued event without waiting. Returns how many were applied.
    pub fn process_pending(&mut self) -> usize {
        let mut applied = 0;
        while !self.cancel.is_cancelled() {
            match self.events_rx.try_recv() {
                Ok(event) => {
                    self.apply(event);
                    applied += 1;
                }
                Err(_) => break,
            }
        }
        applied
    }

    /// Waits for the next event and applies it. Returns `false` once torn down.
    pub async fn next_event(&mut self) -> bool {
        let event = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => None,
            event = self.events_rx.recv() => event,
        };
        match event {
            Some(event) if !self.cancel.is_cancelled() => {
                self.apply(event);
                true
            }
            _ => false,
        }
    }

    fn apply(&mut self, event: LifecycleEvent) {
        match event {
            LifecycleEvent::ComingSoonResolved(details) => {
                tracing::info!("Coming soon message resolved for {}", details.root_org_id);
                self.coming_soon = Some(details);
            }
            LifecycleEvent::LanguageSelected(language) => {
                tracing::debug!("Rebuilding tree for language {}", language);
                self.selected_language = Some(language);
            }
        }
        self.rebuild();
    }

    /// Input change notification. Rebuilds only once the org message is known;
    /// until then the next language emission or the fetch result rebuilds.
    pub fn update_inputs(&mut self, inputs: TreeInputs) {
        self.inputs = inputs;
        if self.cancel.is_cancelled() {
            return;
        }
        if self.coming_soon.is_some() {
            self.rebuild();
        } else {
            tracing::debug!("Inputs changed before coming soon message resolved, deferring");
        }
    }

    fn rebuild(&mut self) {
        self.rebuilds += 1;

        let Some(nodes) = &self.inputs.nodes else {
            tracing::debug!("No nodes to decorate");
            self.decorated = None;
            return;
        };

        let default_message = self.services.resources.default_coming_soon_message();
        let ctx = DecorationContext {
            options: &self.inputs.options,
            content_status: self.inputs.content_status.as_deref(),
            messages: MessageResolver {
                language: self.selected_language.as_deref(),
                org_details: self.coming_soon.as_ref(),
                default_message: &default_message,
                parent_fallback: self.parent_fallback,
            },
        };

        let tree = ContentTree::parse(&nodes.data);
        let decorated = DecoratedTree::build(tree, &ctx);
        tracing::debug!(
            "Decorated {} nodes ({} top level)",
            decorated.nodes().len(),
            decorated.root_children().len()
        );
        self.decorated = Some(decorated);
    }

    /// Tree-node activation. Folders only expand or collapse.
    pub fn on_node_click(&self, node: &DecoratedNode) -> bool {
        self.emit(node_selection(node))
    }

    /// List-item activation, identified by the item's underlying record id.
    pub fn on_item_select(&self, item: &ListItem) -> bool {
        self.emit(item_selection(item))
    }

    fn emit(&self, event: Option<SelectionEvent>) -> bool {
        match event {
            Some(event) => {
                tracing::info!("Content selected: {} ({})", event.id, event.title);
                self.selection_tx.send(event).is_ok()
            }
            None => false,
        }
    }

    /// Cancels both subscriptions. Safe to call more than once.
    pub fn teardown(&mut self) {
        if self.cancel.is_cancelled() {
            return;
        }
        tracing::info!("Tearing down collection tree");
        self.cancel.cancel();
        // Drop anything the tasks queued before they observed cancellation
        while self.events_rx.try_recv().is_ok() {}
    }

    pub fn is_torn_down(&self) -> bool {
        self.cancel.is_cancelled()
    }

    pub fn decorated(&self) -> Option<&DecoratedTree> {
        self.decorated.as_ref()
    }

    pub fn root_children(&self) -> &[NodeId] {
        self.decorated
            .as_ref()
            .map(|d| d.root_children())
            .unwrap_or(&[])
    }

    pub fn inputs(&self) -> &TreeInputs {
        &self.inputs
    }

    pub fn selected_language(&self) -> Option<&str> {
        self.selected_language.as_deref()
    }

    pub fn coming_soon(&self) -> Option<&ComingSoonDetails> {
        self.coming_soon.as_ref()
    }

    pub fn rebuild_count(&self) -> u64 {
        self.rebuilds
    }
}

impl Drop for CollectionTreeComponent {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
