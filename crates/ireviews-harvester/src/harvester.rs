//! Harvest orchestration: validation, country sequencing, and delivery.
//!
//! Countries are harvested strictly one after another, in the order the
//! caller listed them. Running them concurrently would multiply the load on a
//! rate-limited service and make the output order depend on response timing.
//!
//! Two delivery modes share one code path:
//!
//! - [`Harvester::harvest`] resolves to the complete [`HarvestResult`] or an
//!   error, never a partial result.
//! - [`Harvester::stream`] yields each [`Review`] as it is normalized,
//!   followed by exactly one terminal [`HarvestEvent::End`] or
//!   [`HarvestEvent::Error`].

use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use futures::Stream;
use ireviews_core::{HarvestParameters, HarvestResult, HarvesterConfig, Review};
use tokio::sync::mpsc;

use crate::client::FeedClient;
use crate::error::HarvestError;
use crate::rate_limit::RequestPacer;

/// Reviews buffered between the harvest task and a slow stream consumer.
const STREAM_BUFFER: usize = 256;

/// One signal observed by a streaming consumer.
#[derive(Debug)]
pub enum HarvestEvent {
    /// A normalized review, in discovery order.
    Review(Review),
    /// Terminal: the harvest completed.
    End(HarvestResult),
    /// Terminal: the harvest failed. No `End` follows.
    Error(HarvestError),
}

impl HarvestEvent {
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, HarvestEvent::Review(_))
    }
}

/// Entry point for harvesting reviews.
///
/// Holds only read-only state, so one `Harvester` can serve any number of
/// independent harvests; each call gets its own parameters and pacing.
#[derive(Debug, Clone)]
pub struct Harvester {
    client: Arc<FeedClient>,
}

impl Harvester {
    /// # Errors
    ///
    /// Propagates [`FeedClient::new`] failures.
    pub fn new(config: &HarvesterConfig) -> Result<Self, HarvestError> {
        Ok(Self::from_client(FeedClient::new(config)?))
    }

    #[must_use]
    pub fn from_client(client: FeedClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }

    /// Harvests all requested countries and returns the aggregated result.
    ///
    /// # Errors
    ///
    /// - [`HarvestError::InvalidParameters`] before any request is made.
    /// - Any fatal fetch, parse, or normalization error; earlier countries'
    ///   results are discarded.
    pub async fn harvest(&self, params: HarvestParameters) -> Result<HarvestResult, HarvestError> {
        self.run(params, &Emitter::silent()).await
    }

    /// Starts a harvest on a background task and returns its event stream.
    ///
    /// Dropping the stream stops the harvest before its next page request.
    /// Must be called from within a Tokio runtime.
    #[must_use]
    pub fn stream(&self, params: HarvestParameters) -> HarvestStream {
        let (tx, rx) = mpsc::channel(STREAM_BUFFER);
        let harvester = self.clone();

        tokio::spawn(async move {
            let terminal = match harvester.run(params, &Emitter::new(&tx)).await {
                Ok(result) => HarvestEvent::End(result),
                Err(err) => HarvestEvent::Error(err),
            };
            if tx.send(terminal).await.is_err() {
                tracing::debug!("harvest stream dropped before terminal event");
            }
        });

        HarvestStream {
            rx,
            finished: false,
        }
    }

    async fn run(
        &self,
        params: HarvestParameters,
        emitter: &Emitter<'_>,
    ) -> Result<HarvestResult, HarvestError> {
        let params = params.into_validated()?;
        tracing::info!(
            store_id = %params.store_id,
            countries = params.countries_code.len(),
            format = %params.format,
            delay_ms = params.delay_ms,
            "starting review harvest"
        );

        let mut pacer = RequestPacer::new(params.delay_ms);
        let mut result = HarvestResult::default();

        for country_code in &params.countries_code {
            let country = self
                .client
                .harvest_country(
                    &params.store_id,
                    country_code,
                    params.format,
                    &mut pacer,
                    emitter,
                )
                .await?;
            result.push(country);
        }

        tracing::info!(
            store_id = %params.store_id,
            reviews = result.total_reviews(),
            "review harvest finished"
        );
        Ok(result)
    }
}

/// Forwards normalized reviews to a stream consumer, or nowhere in batch mode.
pub(crate) struct Emitter<'a> {
    tx: Option<&'a mpsc::Sender<HarvestEvent>>,
}

impl<'a> Emitter<'a> {
    fn new(tx: &'a mpsc::Sender<HarvestEvent>) -> Self {
        Self { tx: Some(tx) }
    }

    fn silent() -> Self {
        Self { tx: None }
    }

    /// Fails fast when a stream consumer has gone away, so no further page is
    /// fetched on its behalf.
    ///
    /// # Errors
    ///
    /// Returns [`HarvestError::StreamClosed`] once the consumer has gone away.
    pub(crate) fn ensure_open(&self) -> Result<(), HarvestError> {
        match self.tx {
            Some(tx) if tx.is_closed() => Err(HarvestError::StreamClosed),
            _ => Ok(()),
        }
    }

    /// # Errors
    ///
    /// Returns [`HarvestError::StreamClosed`] once the consumer has gone away.
    pub(crate) async fn emit(&self, review: &Review) -> Result<(), HarvestError> {
        let Some(tx) = self.tx else {
            return Ok(());
        };
        tx.send(HarvestEvent::Review(review.clone()))
            .await
            .map_err(|_| HarvestError::StreamClosed)
    }
}

/// Live sequence of [`HarvestEvent`]s for one harvest.
///
/// Yields zero or more [`HarvestEvent::Review`]s, then exactly one terminal
/// event, then `None` forever.
#[derive(Debug)]
pub struct HarvestStream {
    rx: mpsc::Receiver<HarvestEvent>,
    finished: bool,
}

impl HarvestStream {
    /// Waits for the next event. Returns `None` after the terminal event.
    pub async fn next_event(&mut self) -> Option<HarvestEvent> {
        if self.finished {
            return None;
        }
        let event = self.rx.recv().await;
        self.observe(event.as_ref());
        event
    }

    /// Drains the stream, discarding individual reviews, and returns the
    /// terminal outcome.
    ///
    /// # Errors
    ///
    /// Returns the harvest's error, or [`HarvestError::StreamClosed`] if the
    /// harvest task ended without a terminal event.
    pub async fn finish(mut self) -> Result<HarvestResult, HarvestError> {
        while let Some(event) = self.next_event().await {
            match event {
                HarvestEvent::Review(_) => {}
                HarvestEvent::End(result) => return Ok(result),
                HarvestEvent::Error(err) => return Err(err),
            }
        }
        Err(HarvestError::StreamClosed)
    }

    fn observe(&mut self, event: Option<&HarvestEvent>) {
        match event {
            Some(event) if !event.is_terminal() => {}
            _ => {
                self.finished = true;
                self.rx.close();
            }
        }
    }
}

impl Stream for HarvestStream {
    type Item = HarvestEvent;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        if self.finished {
            return Poll::Ready(None);
        }
        let poll = self.rx.poll_recv(cx);
        if let Poll::Ready(event) = &poll {
            self.observe(event.as_ref());
        }
        poll
    }
}
