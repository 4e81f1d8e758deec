use std::fmt;
use std::sync::{Arc, Weak};
use std::time::Duration;

use http::Method;
use serde::Serialize;

use crate::auth::Credentials;
use crate::codec::{self, Page};
use crate::command::Command;
use crate::endpoint::{Endpoint, DEFAULT_API_VERSION};
use crate::entity::Entity;
use crate::error::{Error, Result};
use crate::filter::{ApiFilter, Params};
use crate::outcome::{ApiFailure, WriteOutcome};
use crate::request::Request;
use crate::response::Response;
use crate::retry::{RetryPolicy, Sleeper, ThreadSleeper, DEFAULT_FALLBACK_DELAY, DEFAULT_MAX_ATTEMPTS};
use crate::timeout::TimeoutConfig;
use crate::transport::{HttpTransport, Transport};

/// Client for one TestRail instance
///
/// Every method blocks until its round trip (and any 429 back-off) is over.
/// Cloning is cheap: clones share the same immutable configuration, and
/// entities handed out keep a weak reference to it.
///
/// # Examples
///
/// ```no_run
/// use testrail_client::TestRailService;
///
/// let service = TestRailService::builder()
///     .client_id("acme")
///     .username("qa@acme.com")
///     .password("api-key")
///     .build()?;
///
/// if let Some(project) = service.get_project_by_name("Checkout")? {
///     for run in project.runs()? {
///         println!("{:?}: {:?}", run.id, run.name);
///     }
/// }
/// # Ok::<(), testrail_client::Error>(())
/// ```
#[derive(Clone)]
pub struct TestRailService {
    inner: Arc<ServiceInner>,
}

struct ServiceInner {
    endpoint: Endpoint,
    credentials: Credentials,
    transport: Arc<dyn Transport>,
    sleeper: Arc<dyn Sleeper>,
    retry_policy: RetryPolicy,
}

/// A completed round trip and the URL it went to
struct Exchange {
    url: String,
    response: Response,
}

impl TestRailService {
    /// Create a new service builder
    pub fn builder() -> TestRailServiceBuilder {
        TestRailServiceBuilder::new()
    }

    /// Service for a TestRail-hosted instance (`https://{client_id}.testrail.com/`)
    pub fn new(
        client_id: &str,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self> {
        Self::builder()
            .client_id(client_id)
            .username(username)
            .password(password)
            .build()
    }

    /// Service for a self-hosted instance
    pub fn with_base_url(
        base_url: &str,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self> {
        Self::builder()
            .base_url(base_url)
            .username(username)
            .password(password)
            .build()
    }

    /// Configure from `TESTRAIL_URL` (or `TESTRAIL_CLIENT_ID`),
    /// `TESTRAIL_USERNAME` and `TESTRAIL_PASSWORD`
    pub fn from_env() -> Result<Self> {
        let credentials = Credentials::from_env().ok_or_else(|| {
            Error::config("TESTRAIL_USERNAME and TESTRAIL_PASSWORD must be set")
        })?;

        let builder = match (std::env::var("TESTRAIL_URL"), std::env::var("TESTRAIL_CLIENT_ID")) {
            (Ok(url), _) => Self::builder().base_url(url),
            (Err(_), Ok(client_id)) => Self::builder().client_id(client_id),
            _ => {
                return Err(Error::config(
                    "TESTRAIL_URL or TESTRAIL_CLIENT_ID must be set",
                ))
            }
        };

        builder.credentials(credentials).build()
    }

    /// Get the endpoint
    pub fn endpoint(&self) -> &Endpoint {
        &self.inner.endpoint
    }

    /// Get the retry policy applied to POSTs
    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.inner.retry_policy
    }

    /// Non-owning handle to this service, as stored in entities
    pub fn handle(&self) -> ServiceRef {
        ServiceRef(Arc::downgrade(&self.inner))
    }

    /// Full URL for a command and its parameters
    pub fn build_url(&self, command: Command, params: &Params) -> String {
        self.inner.endpoint.build_url(command, &params.to_string())
    }

    /// Check that the configured credentials are accepted
    ///
    /// TestRail has no ping endpoint; this lists projects and looks at the
    /// status only.
    pub fn verify_credentials(&self) -> Result<bool> {
        let exchange = self.send(Command::GetProjects, &Params::new(), None)?;
        Ok(exchange.response.is_ok())
    }

    /// One authenticated round trip
    ///
    /// `get_*` commands are sent as GET, everything else as POST through the
    /// retry policy.
    fn send(&self, command: Command, params: &Params, body: Option<Vec<u8>>) -> Result<Exchange> {
        let inner = &self.inner;
        let url = self.build_url(command, params);
        let method = if command.is_write() { Method::POST } else { Method::GET };
        tracing::debug!(%method, url = %url, "TestRail request");

        let mut request = Request::new(method, url.clone()).authorized(&inner.credentials)?;
        if let Some(body) = body {
            request = request.body(body);
        }

        let response = if command.is_write() {
            inner
                .retry_policy
                .execute(inner.sleeper.as_ref(), || inner.transport.post(&request))?
        } else {
            inner.transport.send(&request)?
        };

        tracing::debug!(status = response.status().as_u16(), url = %url, "TestRail response");
        Ok(Exchange { url, response })
    }

    /// GET that must answer 200
    fn fetch(&self, command: Command, params: &Params) -> Result<Response> {
        let Exchange { url, response } = self.send(command, params, None)?;
        if !response.is_ok() {
            let message = codec::decode_error(response.bytes());
            return Err(Error::api(url, response.status(), message));
        }
        Ok(response)
    }

    /// GET a single entity; an empty body is `None`
    pub(crate) fn get_one<T: Entity>(&self, command: Command, params: Params) -> Result<Option<T>> {
        let response = self.fetch(command, &params)?;
        let mut entity: Option<T> = codec::decode(response.bytes())?;
        if let Some(entity) = entity.as_mut() {
            entity.attach(self.handle());
        }
        Ok(entity)
    }

    /// GET a list of entities, in server order
    ///
    /// Paginated answers are followed through `_links.next` and concatenated,
    /// unless the caller capped the list with an explicit `limit`.
    pub(crate) fn get_list<T: Entity>(&self, command: Command, params: Params) -> Result<Vec<T>> {
        let follow = params.get(ApiFilter::Limit).is_none();
        let mut params = params;
        let mut entities: Vec<T> = Vec::new();
        loop {
            let response = self.fetch(command, &params)?;
            let page: Page<T> = codec::decode_page(response.bytes(), command.list_key())?;
            let received = page.items.len();
            entities.extend(page.items);

            let next = match page.next {
                Some(link) if follow && received > 0 => params.next_page(&link),
                _ => None,
            };
            match next {
                Some(next) => {
                    tracing::debug!(%command, params = %next, "TestRail next page");
                    params = next;
                }
                None => break,
            }
        }
        let handle = self.handle();
        for entity in &mut entities {
            entity.attach(handle.clone());
        }
        Ok(entities)
    }

    /// POST an add/update body and decode the entity TestRail answers with
    pub(crate) fn post_for<B, T>(&self, command: Command, params: Params, body: &B) -> Result<WriteOutcome<T>>
    where
        B: Serialize + ?Sized,
        T: Entity,
    {
        let body = codec::encode(body)?;
        let Exchange { url, response } = self.send(command, &params, Some(body))?;

        if !response.is_ok() {
            let message = codec::decode_error(response.bytes());
            tracing::error!(
                status = response.status().as_u16(),
                url = %url,
                error = %message,
                "TestRail refused {}",
                command
            );
            return Ok(WriteOutcome::Failure(ApiFailure {
                status: response.status(),
                message,
            }));
        }

        match codec::decode::<T>(response.bytes())? {
            Some(mut entity) => {
                entity.attach(self.handle());
                Ok(WriteOutcome::Success(entity))
            }
            None => Err(Error::api(url, response.status(), "empty response to a write")),
        }
    }

    /// POST where anything but 200 is an error naming the resource
    pub(crate) fn post_or_fail<B>(
        &self,
        command: Command,
        params: Params,
        body: Option<&B>,
        action: &str,
        id: i64,
    ) -> Result<Response>
    where
        B: Serialize + ?Sized,
    {
        let body = body.map(codec::encode).transpose()?;
        let Exchange { url, response } = self.send(command, &params, body)?;

        if !response.is_ok() {
            tracing::error!(
                status = response.status().as_u16(),
                url = %url,
                error = %codec::decode_error(response.bytes()),
                "{} failed for [{}]",
                action,
                id
            );
            return Err(Error::rejected(action, id, response.status(), response.reason()));
        }
        Ok(response)
    }

    /// Bodyless `{command}/{id}` POST, used by every delete
    pub(crate) fn post_id(&self, command: Command, id: i64, action: &str) -> Result<()> {
        self.post_or_fail::<()>(command, Params::id(id), None, action, id)?;
        Ok(())
    }
}

impl fmt::Debug for TestRailService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestRailService")
            .field("endpoint", &self.inner.endpoint)
            .field("credentials", &self.inner.credentials)
            .field("transport", &self.inner.transport.name())
            .field("retry_policy", &self.inner.retry_policy)
            .finish()
    }
}

/// Weak back-reference from an entity to the service that produced it
///
/// Holding one does not keep the service alive.
#[derive(Clone)]
pub struct ServiceRef(Weak<ServiceInner>);

impl ServiceRef {
    /// The service, if it still exists
    pub fn upgrade(&self) -> Option<TestRailService> {
        self.0.upgrade().map(|inner| TestRailService { inner })
    }

    /// Whether this points at `service` (or one of its clones)
    pub fn is_bound_to(&self, service: &TestRailService) -> bool {
        std::ptr::eq(self.0.as_ptr(), Arc::as_ptr(&service.inner))
    }
}

impl PartialEq for ServiceRef {
    fn eq(&self, other: &Self) -> bool {
        Weak::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for ServiceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = if self.0.strong_count() > 0 { "live" } else { "dropped" };
        f.debug_tuple("ServiceRef").field(&state).finish()
    }
}

/// Builder for [`TestRailService`]
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use testrail_client::TestRailService;
///
/// let service = TestRailService::builder()
///     .base_url("https://testrail.internal.example/")
///     .username("ci@example.com")
///     .password("api-key")
///     .timeout(Duration::from_secs(60))
///     .max_attempts(3)
///     .build()
///     .unwrap();
/// assert_eq!(service.retry_policy().max_attempts(), 3);
/// ```
pub struct TestRailServiceBuilder {
    client_id: Option<String>,
    base_url: Option<String>,
    username: Option<String>,
    password: String,
    api_version: String,
    timeout_config: TimeoutConfig,
    max_attempts: usize,
    fallback_delay: Duration,
    transport: Option<Arc<dyn Transport>>,
    sleeper: Option<Arc<dyn Sleeper>>,
}

impl TestRailServiceBuilder {
    /// Create a new service builder
    pub fn new() -> Self {
        Self {
            client_id: None,
            base_url: None,
            username: None,
            password: String::new(),
            api_version: DEFAULT_API_VERSION.to_string(),
            timeout_config: TimeoutConfig::default(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            fallback_delay: DEFAULT_FALLBACK_DELAY,
            transport: None,
            sleeper: None,
        }
    }

    /// Account id of a TestRail-hosted instance
    pub fn client_id(mut self, client_id: impl Into<String>) -> Self {
        self.client_id = Some(client_id.into());
        self
    }

    /// Base URL of a self-hosted instance; takes precedence over `client_id`
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Set the username (usually an email address)
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Set the password or API key
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = password.into();
        self
    }

    /// Set username and password at once
    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.username = Some(credentials.username().to_string());
        self.password = credentials.password().to_string();
        self
    }

    /// Address a different API version segment
    pub fn api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = api_version.into();
        self
    }

    /// Set the overall timeout of a round trip
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout_config = self.timeout_config.timeout(timeout);
        self
    }

    /// Set the connection timeout
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_config = self.timeout_config.connect_timeout(timeout);
        self
    }

    /// Replace the whole timeout configuration
    pub fn timeout_config(mut self, config: TimeoutConfig) -> Self {
        self.timeout_config = config;
        self
    }

    /// Attempts made for a POST answered with 429 (at least one)
    pub fn max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Delay used when a 429 carries no usable `Retry-After`
    pub fn retry_fallback_delay(mut self, delay: Duration) -> Self {
        self.fallback_delay = delay;
        self
    }

    /// Use a custom transport; timeouts set on this builder do not apply to it
    pub fn transport<T: Transport + 'static>(mut self, transport: T) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    /// Use a custom sleeper for retry back-off
    pub fn sleeper<S: Sleeper + 'static>(mut self, sleeper: S) -> Self {
        self.sleeper = Some(Arc::new(sleeper));
        self
    }

    /// Build the service
    pub fn build(self) -> Result<TestRailService> {
        let endpoint = match (self.base_url, self.client_id) {
            (Some(base_url), _) => Endpoint::parse(&base_url)?,
            (None, Some(client_id)) => Endpoint::hosted(&client_id)?,
            (None, None) => {
                return Err(Error::config("either a base URL or a client id is required"))
            }
        }
        .with_api_version(self.api_version);

        let username = self
            .username
            .filter(|username| !username.is_empty())
            .ok_or_else(|| Error::config("a username is required"))?;

        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(HttpTransport::new(self.timeout_config)),
        };
        let sleeper = match self.sleeper {
            Some(sleeper) => sleeper,
            None => Arc::new(ThreadSleeper),
        };

        Ok(TestRailService {
            inner: Arc::new(ServiceInner {
                endpoint,
                credentials: Credentials::new(username, self.password),
                transport,
                sleeper,
                retry_policy: RetryPolicy::new(self.max_attempts).fallback_delay(self.fallback_delay),
            }),
        })
    }
}

impl Default for TestRailServiceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// In-memory transport and sleeper shared by unit tests
#[cfg(test)]
pub(crate) mod mock {
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use http::StatusCode;

    use super::TestRailService;
    use crate::error::{Error, Result};
    use crate::request::Request;
    use crate::response::Response;
    use crate::retry::Sleeper;
    use crate::transport::Transport;

    /// Answers from a queue and remembers every request
    #[derive(Default)]
    pub(crate) struct MockTransport {
        responses: Mutex<VecDeque<Response>>,
        requests: Mutex<Vec<Request>>,
    }

    impl MockTransport {
        pub(crate) fn push(&self, status: u16, body: &str) {
            let status = StatusCode::from_u16(status).unwrap();
            self.push_response(Response::with_body(status, body));
        }

        pub(crate) fn push_response(&self, response: Response) {
            self.responses.lock().unwrap().push_back(response);
        }

        pub(crate) fn requests(&self) -> Vec<Request> {
            self.requests.lock().unwrap().clone()
        }

        pub(crate) fn urls(&self) -> Vec<String> {
            self.requests().iter().map(|r| r.url().to_string()).collect()
        }

        fn answer(&self, request: &Request) -> Result<Response> {
            self.requests.lock().unwrap().push(request.clone());
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .ok_or_else(|| Error::connection(request.url(), "no response queued"))
        }
    }

    impl Transport for MockTransport {
        fn get(&self, request: &Request) -> Result<Response> {
            self.answer(request)
        }

        fn post(&self, request: &Request) -> Result<Response> {
            self.answer(request)
        }

        fn name(&self) -> &str {
            "mock"
        }
    }

    #[derive(Default)]
    pub(crate) struct RecordingSleeper {
        slept: Mutex<Vec<Duration>>,
    }

    impl RecordingSleeper {
        pub(crate) fn slept(&self) -> Vec<Duration> {
            self.slept.lock().unwrap().clone()
        }
    }

    impl Sleeper for RecordingSleeper {
        fn sleep(&self, duration: Duration) {
            self.slept.lock().unwrap().push(duration);
        }
    }

    pub(crate) fn service() -> (TestRailService, Arc<MockTransport>, Arc<RecordingSleeper>) {
        let transport = Arc::new(MockTransport::default());
        let sleeper = Arc::new(RecordingSleeper::default());
        let service = TestRailService::builder()
            .client_id("acme")
            .username("qa@acme.com")
            .password("secret")
            .transport(transport.clone())
            .sleeper(sleeper.clone())
            .build()
            .unwrap();
        (service, transport, sleeper)
    }
}
