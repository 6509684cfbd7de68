//! List views kept current from the backend.

use erp_listing::{ListView, Record, RequestSequencer, Ticket};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::client::PortalClient;
use crate::error::Result;

/// What happened to a completed fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The response replaced the view's records
    Applied { ticket: Ticket, count: usize },
    /// A newer fetch was issued first; the response was dropped
    Superseded { ticket: Ticket },
}

/// A [`ListView`] fed by one list endpoint.
pub struct ListFeed<R> {
    client: Arc<PortalClient>,
    endpoint: String,
    view: Arc<RwLock<ListView<R>>>,
    sequencer: RequestSequencer,
}

impl<R> ListFeed<R>
where
    R: Record + DeserializeOwned + Send + Sync + 'static,
{
    pub fn new(client: Arc<PortalClient>, endpoint: impl Into<String>, view: ListView<R>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            view: Arc::new(RwLock::new(view)),
            sequencer: RequestSequencer::new(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Shared handle to the view.
    pub fn view(&self) -> Arc<RwLock<ListView<R>>> {
        Arc::clone(&self.view)
    }

    /// Fetch the list and apply it if no newer fetch has been issued since.
    ///
    /// On error the view keeps its previous records; the error is returned
    /// for a transient alert. Errors from superseded fetches are dropped.
    pub async fn refresh(&self, params: &[(&str, &str)]) -> Result<RefreshOutcome> {
        let ticket = self.sequencer.issue();
        let fetched = self.client.fetch_records::<R>(&self.endpoint, params).await;

        // Checked under the write lock so an older response can never land
        // after a newer one.
        let mut view = self.view.write().await;
        if !self.sequencer.is_current(ticket) {
            debug!(
                endpoint = %self.endpoint,
                ticket = ticket.value(),
                "Dropping superseded response"
            );
            return Ok(RefreshOutcome::Superseded { ticket });
        }

        match fetched {
            Ok(records) => {
                let count = records.len();
                view.replace_records(records);
                debug!(
                    endpoint = %self.endpoint,
                    ticket = ticket.value(),
                    count,
                    "Applied list response"
                );
                Ok(RefreshOutcome::Applied { ticket, count })
            }
            Err(e) => {
                warn!(
                    endpoint = %self.endpoint,
                    error = %e,
                    "List refresh failed; keeping previous records"
                );
                Err(e)
            }
        }
    }

    /// Drop every in-flight fetch, e.g. when the page unmounts.
    pub fn cancel_pending(&self) {
        self.sequencer.invalidate();
    }
}
