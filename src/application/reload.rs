//! Ordering of asynchronous data reloads.
//!
//! Every reload takes a ticket with a monotonically increasing sequence number.
//! A response is applied only if it is newer than the last one applied, so a
//! slow reply to a superseded request can never overwrite fresher data.

use crate::application::ports::{ChartWidget, QueryStore, SelectorHandles, SeriesData, SeriesQuery, SeriesSource};
use crate::application::shared_viewport::SharedViewport;
use crate::domain::errors::{ZoomError, ZoomResult};
use crate::domain::events::Transition;
use crate::log_debug;
use crate::domain::logging::LogComponent;

/// Handle for one outstanding reload
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReloadTicket(u64);

impl ReloadTicket {
    pub fn seq(&self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Default)]
pub struct ReloadSequencer {
    issued: u64,
    accepted: u64,
}

impl ReloadSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&mut self) -> ReloadTicket {
        self.issued += 1;
        ReloadTicket(self.issued)
    }

    /// Settle a response; anything not newer than the last settled one is stale
    pub fn accept(&mut self, ticket: ReloadTicket) -> ZoomResult<()> {
        if ticket.0 <= self.accepted {
            return Err(ZoomError::StaleResponse { seq: ticket.0, accepted: self.accepted });
        }
        self.accepted = ticket.0;
        Ok(())
    }

    pub fn is_stale(&self, ticket: ReloadTicket) -> bool {
        ticket.0 <= self.accepted
    }

    /// No request newer than the last settled one is outstanding
    pub fn is_idle(&self) -> bool {
        self.accepted == self.issued
    }
}

/// Fetch a series and feed its extremes to the controller.
///
/// No borrow of the controller is held across the fetch, so gestures that arrive
/// meanwhile reach the controller and are queued behind the reload.
/// `on_data` runs just before the new extremes are applied, and only for
/// responses that are not stale; it is where the page hands the payload to its chart widget.
pub async fn reload_series<W, Q, S, D, F>(
    viewport: &SharedViewport<W, Q, S>,
    source: &D,
    query: &SeriesQuery,
    on_data: F,
) -> Transition
where
    W: ChartWidget,
    Q: QueryStore,
    S: SelectorHandles,
    D: SeriesSource + ?Sized,
    F: FnOnce(&SeriesData),
{
    let Some(ticket) = viewport.update(|c| c.begin_reload()) else {
        return Transition::Ignored;
    };
    log_debug!(
        LogComponent::Application("Reload"),
        "📡 Reload #{} for {} (bin={}, axis={})",
        ticket.seq(),
        query.chart,
        query.bin,
        query.axis
    );

    match source.fetch(query).await {
        Ok(series) => {
            if !viewport.read(|c| c.is_stale(ticket)).unwrap_or(false) {
                on_data(&series);
            }
            viewport
                .update(|c| c.complete_reload(ticket, series.extremes))
                .unwrap_or(Transition::Ignored)
        }
        Err(e) => {
            viewport.update(|c| c.fail_reload(ticket, &e.to_string()));
            Transition::Ignored
        }
    }
}
