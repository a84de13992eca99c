//! Backend API: the [`EventsApi`] trait and its reqwest implementation.

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::session::Session;
use eventboard_core::domain::{EventId, EventRecord, Location, MarkToggled};
use eventboard_core::marks::MarkKind;
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::future::Future;
use std::pin::Pin;

/// Boxed future returned by every [`EventsApi`] call.
pub type ApiFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, ClientError>> + Send + 'a>>;

/// Calls the event page makes against the backend.
///
/// Object-safe so the page environment can hold an `Arc<dyn EventsApi>` and
/// tests can swap in a mock.
pub trait EventsApi: Send + Sync {
    /// `GET /locations`
    fn locations(&self) -> ApiFuture<'_, Vec<Location>>;

    /// `GET /events`
    fn events(&self) -> ApiFuture<'_, Vec<EventRecord>>;

    /// `GET /likes/events` or `GET /bookings/events`
    fn marked_events<'a>(
        &'a self,
        kind: MarkKind,
        session: &'a Session,
    ) -> ApiFuture<'a, Vec<EventRecord>>;

    /// `POST /likes/:eventId` or `POST /bookings/:eventId`
    fn toggle_mark<'a>(
        &'a self,
        kind: MarkKind,
        event_id: &'a EventId,
        session: &'a Session,
    ) -> ApiFuture<'a, MarkToggled>;
}

/// Error body the backend sends with non-2xx responses.
#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// reqwest-backed [`EventsApi`].
#[derive(Clone, Debug)]
pub struct HttpEventsApi {
    client: Client,
    base_url: String,
}

impl HttpEventsApi {
    /// Build a client for the configured backend.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] if the HTTP client cannot be built.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ClientError::Config(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Base URL requests are sent to
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// `<base>/<collection>/<event id>` with the id as one percent-encoded segment.
    fn mark_url(&self, kind: MarkKind, event_id: &EventId) -> Result<Url, ClientError> {
        let mut url = Url::parse(&self.base_url).map_err(|e| ClientError::Config(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|()| ClientError::Config(format!("{} cannot be a base URL", self.base_url)))?
            .pop_if_empty()
            .push(kind.collection())
            .push(event_id.as_str());
        Ok(url)
    }

    async fn fetch<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ClientError> {
        let response = request.send().await?;
        let response = Self::check_status(response).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ClientError::Decode(e.to_string()))
    }

    async fn check_status(response: Response) -> Result<Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .map(|parsed| parsed.message)
            .unwrap_or(body);

        tracing::debug!(status = status.as_u16(), message = %message, "Backend returned an error");
        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

impl EventsApi for HttpEventsApi {
    fn locations(&self) -> ApiFuture<'_, Vec<Location>> {
        Box::pin(Self::fetch(self.client.get(self.url("/locations"))))
    }

    fn events(&self) -> ApiFuture<'_, Vec<EventRecord>> {
        Box::pin(Self::fetch(self.client.get(self.url("/events"))))
    }

    fn marked_events<'a>(
        &'a self,
        kind: MarkKind,
        session: &'a Session,
    ) -> ApiFuture<'a, Vec<EventRecord>> {
        let request = self
            .client
            .get(self.url(&format!("/{}/events", kind.collection())))
            .header(reqwest::header::AUTHORIZATION, session.authorization());
        Box::pin(Self::fetch(request))
    }

    fn toggle_mark<'a>(
        &'a self,
        kind: MarkKind,
        event_id: &'a EventId,
        session: &'a Session,
    ) -> ApiFuture<'a, MarkToggled> {
        Box::pin(async move {
            let url = self.mark_url(kind, event_id)?;
            let request = self
                .client
                .post(url)
                .header(reqwest::header::AUTHORIZATION, session.authorization());
            Self::fetch(request).await
        })
    }
}
