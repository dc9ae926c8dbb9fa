//! The theme state controller.
//!
//! [`ThemeService`] owns the current variant and runs the reaction that keeps
//! the document and the preference store in agreement with it: on every
//! transition it writes the derived inline style, writes the variant class,
//! and then persists the variant best-effort. Subscribers receive a
//! [`ThemeChangedEvent`] after the reaction completes.

use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, info, warn};

use super::document::DocumentRoot;
use super::events::ThemeChangedEvent;
use super::logic;
use super::store::PreferenceStore;
use super::types::{AppliedThemeState, ThemeVariant};

struct ServiceState {
    variant: ThemeVariant,
    applied: AppliedThemeState,
    store: Arc<dyn PreferenceStore>,
    document: Arc<dyn DocumentRoot>,
}

/// The theme state controller.
///
/// Cloning is cheap; all clones share one state and one event channel.
#[derive(Clone)]
pub struct ThemeService {
    internal: Arc<Mutex<ServiceState>>,
    event_sender: broadcast::Sender<ThemeChangedEvent>,
}

impl ThemeService {
    /// Creates the service, resolves the initial variant from the store, and
    /// runs the first reaction.
    ///
    /// A missing, unreadable, or unrecognized persisted value resolves to
    /// [`ThemeVariant::Light`]; initialization itself never fails.
    pub async fn new(
        store: Arc<dyn PreferenceStore>,
        document: Arc<dyn DocumentRoot>,
        broadcast_capacity: usize,
    ) -> Self {
        let variant = Self::read_initial_variant(store.as_ref()).await;
        let (event_sender, _) = broadcast::channel(broadcast_capacity);

        let mut state = ServiceState {
            variant,
            applied: logic::applied_state(variant),
            store,
            document,
        };
        Self::run_reaction(&mut state).await;
        info!("Theme service initialized with variant '{}'", variant);

        Self {
            internal: Arc::new(Mutex::new(state)),
            event_sender,
        }
    }

    async fn read_initial_variant(store: &dyn PreferenceStore) -> ThemeVariant {
        match store.load().await {
            Ok(Some(value)) => match ThemeVariant::from_str(&value) {
                Ok(variant) => variant,
                Err(_) => {
                    warn!(
                        "Ignoring unrecognized persisted theme variant '{}'",
                        value
                    );
                    ThemeVariant::default()
                }
            },
            Ok(None) => ThemeVariant::default(),
            Err(e) => {
                warn!("Failed to load persisted theme variant: {}", e);
                ThemeVariant::default()
            }
        }
    }

    /// Applies `state.variant` to the document, persists it, and refreshes
    /// the applied snapshot. Persistence failure is logged and absorbed.
    async fn run_reaction(state: &mut ServiceState) {
        let applied = logic::applied_state(state.variant);
        state.document.set_style_attribute(&applied.style);
        state.document.set_class_attribute(state.variant.as_str());
        if let Err(e) = state.store.save(state.variant.as_str()).await {
            warn!("Failed to persist theme variant: {}", e);
        }
        state.applied = applied;
        debug!("Applied theme variant '{}'", state.variant);
    }

    /// Advances to the next variant, runs the reaction, and notifies
    /// subscribers. Returns the new variant.
    pub async fn rotate(&self) -> ThemeVariant {
        let mut state = self.internal.lock().await;
        state.variant = state.variant.rotate();
        Self::run_reaction(&mut state).await;
        info!("Theme rotated to '{}'", state.variant);

        if self.event_sender.receiver_count() > 0 {
            let event = ThemeChangedEvent::new(state.applied.clone());
            if let Err(e) = self.event_sender.send(event) {
                warn!("Failed to broadcast theme change event: {}", e);
            }
        }
        state.variant
    }

    /// The current variant.
    pub async fn current_variant(&self) -> ThemeVariant {
        self.internal.lock().await.variant
    }

    /// A snapshot of the currently applied theme.
    pub async fn current_state(&self) -> AppliedThemeState {
        self.internal.lock().await.applied.clone()
    }

    /// Subscribes to theme change events. Only transitions after the
    /// subscription are delivered; read [`current_state`](Self::current_state)
    /// for the present theme.
    pub fn subscribe(&self) -> broadcast::Receiver<ThemeChangedEvent> {
        self.event_sender.subscribe()
    }

    /// A cloneable handle for consumers that should not see the full service.
    pub fn handle(&self) -> ThemeHandle {
        ThemeHandle {
            service: self.clone(),
        }
    }
}

/// A narrow consumer-facing handle onto a [`ThemeService`].
#[derive(Clone)]
pub struct ThemeHandle {
    service: ThemeService,
}

impl ThemeHandle {
    pub async fn current_variant(&self) -> ThemeVariant {
        self.service.current_variant().await
    }

    pub async fn current_state(&self) -> AppliedThemeState {
        self.service.current_state().await
    }

    pub async fn rotate(&self) -> ThemeVariant {
        self.service.rotate().await
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ThemeChangedEvent> {
        self.service.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theming::document::RecordingDocument;
    use crate::theming::store::MemoryPreferenceStore;

    async fn service_with(
        store: MemoryPreferenceStore,
    ) -> (ThemeService, Arc<MemoryPreferenceStore>, Arc<RecordingDocument>) {
        verso_core::logging::init_minimal_logging();
        let store = Arc::new(store);
        let document = Arc::new(RecordingDocument::new());
        let service = ThemeService::new(store.clone(), document.clone(), 16).await;
        (service, store, document)
    }

    #[tokio::test]
    async fn initializes_from_persisted_dark() {
        let (service, _, document) = service_with(MemoryPreferenceStore::with_value("dark")).await;
        assert_eq!(service.current_variant().await, ThemeVariant::Dark);
        assert_eq!(document.class(), "dark");
        assert_eq!(document.style(), logic::inline_style(ThemeVariant::Dark));
    }

    #[tokio::test]
    async fn unrecognized_persisted_value_falls_back_to_light() {
        let (service, store, document) =
            service_with(MemoryPreferenceStore::with_value("purple")).await;
        assert_eq!(service.current_variant().await, ThemeVariant::Light);
        assert_eq!(document.class(), "light");
        // The fallback is re-persisted by the initial reaction.
        assert_eq!(store.stored(), Some("light".to_string()));
    }

    #[tokio::test]
    async fn empty_store_resolves_to_light() {
        let (service, _, document) = service_with(MemoryPreferenceStore::new()).await;
        assert_eq!(service.current_variant().await, ThemeVariant::Light);
        assert_eq!(document.style(), logic::inline_style(ThemeVariant::Light));
    }

    #[tokio::test]
    async fn failing_store_read_resolves_to_light() {
        let (service, _, document) =
            service_with(MemoryPreferenceStore::with_value("dark").fail_reads()).await;
        assert_eq!(service.current_variant().await, ThemeVariant::Light);
        assert_eq!(document.class(), "light");
    }

    #[tokio::test]
    async fn rotate_flips_variant_document_and_store() {
        let (service, store, document) = service_with(MemoryPreferenceStore::new()).await;

        assert_eq!(service.rotate().await, ThemeVariant::Dark);
        assert_eq!(document.class(), "dark");
        assert_eq!(document.style(), logic::inline_style(ThemeVariant::Dark));
        assert_eq!(store.stored(), Some("dark".to_string()));

        assert_eq!(service.rotate().await, ThemeVariant::Light);
        assert_eq!(document.class(), "light");
        assert_eq!(document.style(), logic::inline_style(ThemeVariant::Light));
        assert_eq!(store.stored(), Some("light".to_string()));
    }

    #[tokio::test]
    async fn write_failure_does_not_block_the_transition() {
        let (service, store, document) =
            service_with(MemoryPreferenceStore::new().fail_writes()).await;

        assert_eq!(service.rotate().await, ThemeVariant::Dark);
        assert_eq!(service.current_variant().await, ThemeVariant::Dark);
        assert_eq!(document.class(), "dark");
        assert_eq!(store.stored(), None);
    }

    #[tokio::test]
    async fn subscribers_receive_transitions_in_order() {
        let (service, _, _) = service_with(MemoryPreferenceStore::new()).await;
        let mut events = service.subscribe();

        service.rotate().await;
        service.rotate().await;

        let first = events.recv().await.unwrap();
        assert_eq!(first.new_state.variant, ThemeVariant::Dark);
        assert_eq!(first.new_state.style, logic::inline_style(ThemeVariant::Dark));

        let second = events.recv().await.unwrap();
        assert_eq!(second.new_state.variant, ThemeVariant::Light);
    }

    #[tokio::test]
    async fn handle_shares_state_with_the_service() {
        let (service, _, document) = service_with(MemoryPreferenceStore::new()).await;
        let handle = service.handle();

        handle.rotate().await;
        assert_eq!(service.current_variant().await, ThemeVariant::Dark);
        assert_eq!(
            handle.current_state().await.colors.background.to_string(),
            "hsl(195, 60%, 4%)"
        );
        assert_eq!(document.class(), "dark");
    }

    #[tokio::test]
    async fn applied_snapshot_tracks_the_document() {
        let (service, _, document) = service_with(MemoryPreferenceStore::new()).await;
        service.rotate().await;
        let state = service.current_state().await;
        assert_eq!(state.style, document.style());
        assert_eq!(state.variant.as_str(), document.class());
    }
}
