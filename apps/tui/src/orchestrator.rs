//! Decides when a tab needs data and runs the fetchers in the background.

use crate::backend::FarmBackend;
use crate::cache::{FetchTicket, TabCache};
use crate::fetch::{fallback_domain, fetch_domain, FetchContext};
use crate::models::DomainData;
use crate::{DataDomain, Tab};
use std::sync::Arc;
use tokio::sync::mpsc;

type Completion = (FetchTicket, DomainData);

/// Owns the [`TabCache`] and the channel fetch tasks report back on.
///
/// Lives on the event loop; spawned tasks only ever touch their own clone of
/// the backend and the sending half of the channel.
pub struct Orchestrator {
    backend: Arc<dyn FarmBackend>,
    cache: TabCache,
    context: FetchContext,
    tx: mpsc::UnboundedSender<Completion>,
    rx: mpsc::UnboundedReceiver<Completion>,
}

impl Orchestrator {
    pub fn new(backend: Arc<dyn FarmBackend>, context: FetchContext) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            backend,
            cache: TabCache::new(),
            context,
            tx,
            rx,
        }
    }

    pub fn backend(&self) -> Arc<dyn FarmBackend> {
        Arc::clone(&self.backend)
    }

    pub const fn cache(&self) -> &TabCache {
        &self.cache
    }

    pub const fn context(&self) -> &FetchContext {
        &self.context
    }

    /// Swaps in a new farmer context. A different location or crop
    /// invalidates everything cached so far.
    pub fn set_context(&mut self, context: FetchContext) {
        if context.location.trim() != self.context.location.trim() || context.crop != self.context.crop {
            self.cache.reset();
        }
        self.context = context;
    }

    pub fn reset(&mut self) {
        self.cache.reset();
    }

    /// Starts the fetch backing `tab` if its slot is idle.
    /// Returns true when a fetch was issued.
    pub fn select_tab(&mut self, tab: Tab) -> bool {
        tab.domain().is_some_and(|domain| self.request(domain))
    }

    pub fn request(&mut self, domain: DataDomain) -> bool {
        let Some(ticket) = self.cache.begin(domain, &self.context.location) else {
            return false;
        };

        tracing::info!(%domain, generation = ticket.generation, location = %ticket.location, "fetching");

        let backend = Arc::clone(&self.backend);
        let context = self.context.clone();
        let tx = self.tx.clone();

        tokio::spawn(async move {
            let domain = ticket.domain;
            let fetch_context = context.clone();
            let fetch = tokio::spawn(async move {
                fetch_domain(backend.as_ref(), domain, &fetch_context).await
            });
            // A dead fetch still has to settle its slot.
            let data = match fetch.await {
                Ok(data) => data,
                Err(error) => {
                    tracing::error!(%domain, %error, "fetch task failed, using placeholder data");
                    fallback_domain(domain, &context)
                }
            };
            // The receiver only goes away with the orchestrator itself.
            let _ = tx.send((ticket, data));
        });

        true
    }

    /// Applies every finished fetch without waiting. Returns how many landed
    /// in the cache.
    pub fn drain(&mut self) -> usize {
        let mut applied = 0;
        while let Ok((ticket, data)) = self.rx.try_recv() {
            if self.apply(&ticket, data) {
                applied += 1;
            }
        }
        applied
    }

    /// Waits for the next finished fetch and applies it. Returns the domain
    /// and whether it was stored, or `None` if nothing is in flight.
    pub async fn next_completion(&mut self) -> Option<(DataDomain, bool)> {
        if !self.cache.any_pending() {
            return None;
        }
        let (ticket, data) = self.rx.recv().await?;
        let stored = self.apply(&ticket, data);
        Some((ticket.domain, stored))
    }

    fn apply(&mut self, ticket: &FetchTicket, data: DomainData) -> bool {
        let source = data.source();
        let stored = self.cache.complete(ticket, data);
        if stored {
            tracing::info!(domain = %ticket.domain, ?source, "fetch stored");
        }
        stored
    }
}
