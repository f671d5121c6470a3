// Mock collaborators for testing

use async_trait::async_trait;
use lambda_app_core::{Authorizer, BoxError, InvocationContext, ResponseEnvelope, ResponseHook};
use lambda_app_log::{AppLogger, Level};
use lambda_app_validation::{
    CompiledSchema, JsonSchemaValidator, Result as SchemaResult, Schema, SchemaValidator,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

type Entries = Arc<Mutex<Vec<(Level, String)>>>;

/// Logger that keeps every entry in memory.
#[derive(Clone, Default)]
pub struct RecordingLogger {
    entries: Entries,
}

impl RecordingLogger {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    fn record(&self, level: Level, message: &str) {
        self.entries
            .lock()
            .unwrap()
            .push((level, message.to_string()));
    }

    /// All recorded entries, in order.
    pub fn entries(&self) -> Vec<(Level, String)> {
        self.entries.lock().unwrap().clone()
    }

    /// Messages recorded at `level`.
    pub fn messages(&self, level: Level) -> Vec<String> {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }

    /// Check if a message containing `needle` was logged at `level`.
    pub fn contains(&self, level: Level, needle: &str) -> bool {
        self.messages(level).iter().any(|m| m.contains(needle))
    }

    /// Number of recorded entries.
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    /// Check if nothing was logged.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Forget all entries.
    pub fn clear(&self) {
        self.entries.lock().unwrap().clear();
    }
}

impl AppLogger for RecordingLogger {
    fn info(&self, message: &str) {
        self.record(Level::Info, message);
    }

    fn warn(&self, message: &str) {
        self.record(Level::Warn, message);
    }

    fn error(&self, message: &str) {
        self.record(Level::Error, message);
    }

    fn debug(&self, message: &str) {
        self.record(Level::Debug, message);
    }
}

/// Authorization hook with a canned outcome and a call counter.
#[derive(Clone)]
pub struct MockAuthorizer<I> {
    outcome: Result<I, String>,
    calls: Arc<AtomicUsize>,
}

impl<I> MockAuthorizer<I> {
    /// Accept every request with `identity`.
    pub fn allow(identity: I) -> Self {
        Self {
            outcome: Ok(identity),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Reject every request with `message`.
    pub fn reject(message: impl Into<String>) -> Self {
        Self {
            outcome: Err(message.into()),
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of times the hook ran.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Check if the hook ran at all.
    pub fn was_called(&self) -> bool {
        self.call_count() > 0
    }
}

#[async_trait]
impl<E, I> Authorizer<E, I> for MockAuthorizer<I>
where
    E: Sync,
    I: Clone + Send + Sync,
{
    async fn authorize(&self, _event: &E, _context: &InvocationContext) -> Result<I, BoxError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcome.clone().map_err(BoxError::from)
    }
}

/// Schema validator that counts calls before delegating to the built-in engine.
#[derive(Clone, Default)]
pub struct SpyValidator {
    inner: JsonSchemaValidator,
    calls: Arc<AtomicUsize>,
}

impl SpyValidator {
    /// Wrap the built-in engine.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of schemas compiled.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SchemaValidator for SpyValidator {
    async fn compile(&self, schema: &Schema) -> SchemaResult<Arc<dyn CompiledSchema>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.compile(schema).await
    }
}

/// Captures every envelope passed to the `on_response` hook.
#[derive(Clone, Default)]
pub struct ResponseRecorder {
    responses: Arc<Mutex<Vec<ResponseEnvelope>>>,
    failure: Option<String>,
}

impl ResponseRecorder {
    /// Recorder whose hook always succeeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorder whose hook records the envelope and then fails with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::default()
        }
    }

    /// A hook to install with `InvocationOptions::on_response`.
    pub fn hook(&self) -> impl Fn(&ResponseEnvelope) -> Result<(), BoxError> + Send + Sync + 'static {
        let responses = self.responses.clone();
        let failure = self.failure.clone();
        move |envelope: &ResponseEnvelope| {
            responses.lock().unwrap().push(envelope.clone());
            match &failure {
                Some(message) => Err(message.clone().into()),
                None => Ok(()),
            }
        }
    }

    /// The same hook, boxed for direct assignment to an options field.
    pub fn shared_hook(&self) -> ResponseHook {
        Arc::new(self.hook())
    }

    /// All captured envelopes.
    pub fn responses(&self) -> Vec<ResponseEnvelope> {
        self.responses.lock().unwrap().clone()
    }

    /// Number of hook calls.
    pub fn call_count(&self) -> usize {
        self.responses.lock().unwrap().len()
    }

    /// The last captured envelope.
    pub fn last(&self) -> Option<ResponseEnvelope> {
        self.responses.lock().unwrap().last().cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lambda_app_core::HttpStatus;
    use serde_json::json;

    #[test]
    fn test_recording_logger() {
        let logger = RecordingLogger::new();
        logger.info("started");
        logger.warn("missing header");
        logger.log(Level::Error, "boom");

        assert_eq!(logger.len(), 3);
        assert!(logger.contains(Level::Warn, "header"));
        assert_eq!(logger.messages(Level::Error), vec!["boom".to_string()]);

        logger.clear();
        assert!(logger.is_empty());
    }

    #[tokio::test]
    async fn test_mock_authorizer() {
        let context = InvocationContext::new("abc");

        let allow = MockAuthorizer::allow(json!({"id": 1}));
        let identity = Authorizer::<(), _>::authorize(&allow, &(), &context).await.unwrap();
        assert_eq!(identity, json!({"id": 1}));
        assert_eq!(allow.call_count(), 1);

        let reject = MockAuthorizer::<serde_json::Value>::reject("invalid user");
        let err = Authorizer::<(), _>::authorize(&reject, &(), &context)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "invalid user");
        assert!(reject.was_called());
    }

    #[tokio::test]
    async fn test_spy_validator() {
        let spy = SpyValidator::new();
        let schema = Schema::new(json!({"type": "string"}));
        let violations = spy.validate(&schema, &json!(1)).await.unwrap();
        assert_eq!(violations.len(), 1);
        assert_eq!(spy.call_count(), 1);
    }

    #[test]
    fn test_response_recorder() {
        let recorder = ResponseRecorder::failing("sink down");
        let hook = recorder.hook();
        let envelope = ResponseEnvelope {
            status_code: HttpStatus::Ok,
            body: "{}".to_string(),
            headers: lambda_app_core::ResponseHeaders::json("*"),
        };

        let err = hook(&envelope).unwrap_err();
        assert_eq!(err.to_string(), "sink down");
        assert_eq!(recorder.call_count(), 1);
        assert_eq!(recorder.last().unwrap().status_code, HttpStatus::Ok);
    }
}
