//! In-memory per-domain cache for one dashboard session.
//!
//! Every slot is `Idle`, `Pending` or `Ready`. A fetch may only start from
//! `Idle`, so a domain never has two requests in flight. Each reset bumps the
//! generation, and completions carrying an older generation are dropped.

use crate::models::DomainData;
use crate::DataDomain;
use std::collections::HashMap;

pub type Generation = u64;

/// Permission to run one fetch, handed out by [`TabCache::begin`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub domain: DataDomain,
    pub generation: Generation,
    pub location: String,
}

#[derive(Debug, Clone, PartialEq)]
enum Slot {
    Idle,
    Pending { generation: Generation },
    Ready(DomainData),
}

/// What a tab renders for its domain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SlotView<'a> {
    Idle,
    Loading,
    Ready(&'a DomainData),
}

impl<'a> SlotView<'a> {
    pub const fn data(self) -> Option<&'a DomainData> {
        match self {
            Self::Ready(data) => Some(data),
            Self::Idle | Self::Loading => None,
        }
    }

    pub const fn is_loading(self) -> bool {
        matches!(self, Self::Loading)
    }
}

#[derive(Debug, Default)]
pub struct TabCache {
    slots: HashMap<DataDomain, Slot>,
    generation: Generation,
    location: Option<String>,
}

impl TabCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn generation(&self) -> Generation {
        self.generation
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    /// Clears every slot and invalidates in-flight fetches.
    pub fn reset(&mut self) {
        self.slots.clear();
        self.generation += 1;
        self.location = None;
        tracing::debug!(generation = self.generation, "tab cache reset");
    }

    /// Resets when the cache was filled for a different location.
    /// Returns true if a reset happened.
    pub fn observe_location(&mut self, location: &str) -> bool {
        let location = location.trim();
        match self.location.as_deref() {
            Some(current) if current == location => false,
            None => {
                self.location = Some(location.to_string());
                false
            }
            Some(previous) => {
                tracing::info!(%previous, %location, "location changed, dropping cached data");
                self.reset();
                self.location = Some(location.to_string());
                true
            }
        }
    }

    /// Marks `domain` pending and returns a ticket, or `None` when the slot
    /// is already pending or populated.
    pub fn begin(&mut self, domain: DataDomain, location: &str) -> Option<FetchTicket> {
        self.observe_location(location);

        match self.slots.get(&domain) {
            Some(Slot::Pending { .. } | Slot::Ready(_)) => return None,
            Some(Slot::Idle) | None => {}
        }

        self.slots.insert(
            domain,
            Slot::Pending {
                generation: self.generation,
            },
        );

        Some(FetchTicket {
            domain,
            generation: self.generation,
            location: location.trim().to_string(),
        })
    }

    /// Stores a finished fetch. Returns false, dropping `data`, when the
    /// ticket belongs to an older generation or the slot is no longer
    /// pending for it.
    pub fn complete(&mut self, ticket: &FetchTicket, data: DomainData) -> bool {
        if ticket.generation != self.generation {
            tracing::debug!(
                domain = %ticket.domain,
                ticket = ticket.generation,
                current = self.generation,
                "discarding stale fetch"
            );
            return false;
        }

        if data.domain() != ticket.domain {
            tracing::warn!(domain = %ticket.domain, got = %data.domain(), "fetch result for wrong domain");
            return false;
        }

        match self.slots.get(&ticket.domain) {
            Some(Slot::Pending { generation }) if *generation == ticket.generation => {
                self.slots.insert(ticket.domain, Slot::Ready(data));
                true
            }
            _ => false,
        }
    }

    pub fn view(&self, domain: DataDomain) -> SlotView<'_> {
        match self.slots.get(&domain) {
            Some(Slot::Ready(data)) => SlotView::Ready(data),
            Some(Slot::Pending { .. }) => SlotView::Loading,
            Some(Slot::Idle) | None => SlotView::Idle,
        }
    }

    pub fn get(&self, domain: DataDomain) -> Option<&DomainData> {
        self.view(domain).data()
    }

    pub fn is_pending(&self, domain: DataDomain) -> bool {
        self.view(domain).is_loading()
    }

    pub fn any_pending(&self) -> bool {
        self.slots
            .values()
            .any(|slot| matches!(slot, Slot::Pending { .. }))
    }
}
