//! One document generation round trip: read the form, validate it, submit
//! the payload, render the analysis and tell the user how it went.

use chrono::{DateTime, Utc};
use log::{error, info, warn};
use std::collections::BTreeMap;
use std::time::Duration;

use crate::api::client::DocumentApi;
use crate::api::types::{AnalysisResponse, RequestPayload};
use crate::error::Result;
use crate::form::{self, FormInput, FormSource};
use crate::notify::{Notification, Notifier, DEFAULT_DISMISS_AFTER, SUCCESS_MESSAGE};
use crate::render::{self, Region, RenderContext, Surface};

/// What started the submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    ButtonClick,
    FormSubmit,
}

impl Trigger {
    /// Value sent as `metadata.source`
    pub fn source(&self) -> &'static str {
        match self {
            Self::ButtonClick => "button_click",
            Self::FormSubmit => "form_submit",
        }
    }
}

type Clock = Box<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Request/response cycle of the document form.
///
/// Every entry point goes through [`DocumentRequestFlow::handle`]. There is
/// no in-flight guard: a second trigger issues a second request and its
/// result overwrites the same regions.
pub struct DocumentRequestFlow<F, A, S, N> {
    form: F,
    api: A,
    surface: S,
    notifier: N,
    clock: Clock,
    dismiss_after: Duration,
}

impl<F, A, S, N> DocumentRequestFlow<F, A, S, N>
where
    F: FormSource,
    A: DocumentApi,
    S: Surface,
    N: Notifier,
{
    pub fn new(form: F, api: A, surface: S, notifier: N) -> Self {
        Self {
            form,
            api,
            surface,
            notifier,
            clock: Box::new(Utc::now),
            dismiss_after: DEFAULT_DISMISS_AFTER,
        }
    }

    /// Replace the timestamp source used for `metadata.created_at`
    pub fn with_clock(mut self, clock: impl Fn() -> DateTime<Utc> + Send + Sync + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn with_notification_duration(mut self, dismiss_after: Duration) -> Self {
        self.dismiss_after = dismiss_after;
        self
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn into_parts(self) -> (F, A, S, N) {
        (self.form, self.api, self.surface, self.notifier)
    }

    pub fn validate(&self, input: FormInput) -> Result<FormInput> {
        form::validate(input)
    }

    pub fn collect_template_data(&self, template_name: &str) -> BTreeMap<String, String> {
        form::collect_template_data(&self.form, template_name)
    }

    pub fn build_payload(&self, input: &FormInput, trigger: Trigger) -> RequestPayload {
        RequestPayload::from_input(input, trigger.source(), (self.clock)())
    }

    pub async fn submit(&self, payload: &RequestPayload) -> Result<AnalysisResponse> {
        self.api.generate(payload).await
    }

    /// Show a response against the form it answers. Never fails.
    pub fn render(&mut self, response: &AnalysisResponse, input: &FormInput) {
        let context = RenderContext {
            category: input.category.clone(),
            description: input.description.clone(),
        };
        render::render_analysis(&mut self.surface, response, &context);
    }

    /// Run one full submission
    pub async fn handle(&mut self, trigger: Trigger) -> Result<AnalysisResponse> {
        let input = match self.validate(form::read_form(&self.form)) {
            Ok(input) => input,
            Err(e) => {
                warn!("Form validation failed: {}", e);
                self.raise(Notification::error(e.toast_message()));
                return Err(e);
            }
        };

        let payload = self.build_payload(&input, trigger);
        self.set_visible(Region::Loading, true);
        let result = self.submit(&payload).await;
        self.set_visible(Region::Loading, false);

        match result {
            Ok(response) => {
                info!(
                    "Document request succeeded (id: {})",
                    response.document_id().unwrap_or("-")
                );
                self.render(&response, &input);
                self.raise(Notification::success(SUCCESS_MESSAGE));
                Ok(response)
            }
            Err(e) => {
                error!("Document request failed: {}", e);
                self.set_visible(Region::Result, false);
                self.raise(Notification::error(e.toast_message()));
                Err(e)
            }
        }
    }

    fn set_visible(&mut self, region: Region, visible: bool) {
        if let Err(e) = self.surface.set_visible(region, visible) {
            warn!("Could not toggle {:?}: {}", region, e);
        }
    }

    fn raise(&mut self, notification: Notification) {
        self.notifier
            .notify(notification.with_dismiss_after(self.dismiss_after));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::client::DownloadedDocument;
    use crate::error::HukukError;
    use crate::form::{FieldElement, FieldKind, StaticForm, CATEGORY_FIELD, DESCRIPTION_FIELD, TEMPLATE_FIELD};
    use crate::notify::{NotificationKind, ToastBoard};
    use crate::render::{Entry, MemorySurface};
    use async_trait::async_trait;
    use chrono::TimeZone;
    use std::sync::Mutex;

    /// Backend double that records payloads and replays a canned outcome
    struct FakeApi {
        calls: Mutex<Vec<RequestPayload>>,
        reply: fn() -> Result<AnalysisResponse>,
    }

    impl FakeApi {
        fn replying(reply: fn() -> Result<AnalysisResponse>) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                reply,
            }
        }

        fn calls(&self) -> Vec<RequestPayload> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl DocumentApi for FakeApi {
        async fn generate(&self, payload: &RequestPayload) -> Result<AnalysisResponse> {
            self.calls.lock().unwrap().push(payload.clone());
            (self.reply)()
        }

        async fn download(&self, _document_id: &str) -> Result<DownloadedDocument> {
            Err(HukukError::InvalidInput("not supported".to_string()))
        }

        fn base_url(&self) -> &str {
            "fake://"
        }
    }

    fn form() -> StaticForm {
        StaticForm::new()
            .with_value(TEMPLATE_FIELD, "dilekce")
            .with_value(CATEGORY_FIELD, "borçlar_hukuku")
            .with_value(DESCRIPTION_FIELD, "Test olay")
            .with_field("dilekceFields", FieldElement::new("davaci_dilekce", "Ali", FieldKind::Input))
    }

    fn ok_reply() -> Result<AnalysisResponse> {
        Ok(serde_json::from_value(serde_json::json!({
            "id": "123",
            "analysis": {"relevant_laws": [], "relevant_decisions": [], "recommendations": "Öneri yok"}
        }))
        .unwrap())
    }

    fn server_error() -> Result<AnalysisResponse> {
        Err(HukukError::http(500, None))
    }

    fn flow(
        form: StaticForm,
        reply: fn() -> Result<AnalysisResponse>,
    ) -> DocumentRequestFlow<StaticForm, FakeApi, MemorySurface, ToastBoard> {
        DocumentRequestFlow::new(form, FakeApi::replying(reply), MemorySurface::new(), ToastBoard::new())
            .with_clock(|| Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap())
    }

    #[tokio::test]
    async fn test_missing_field_sends_nothing() {
        let mut flow = flow(form().with_value(DESCRIPTION_FIELD, ""), ok_reply);
        let result = flow.handle(Trigger::ButtonClick).await;

        assert!(matches!(result, Err(HukukError::MissingField(ref f)) if f == "description"));
        let (_, api, surface, toasts) = flow.into_parts();
        assert!(api.calls().is_empty());
        assert!(!surface.is_visible(Region::Result));
        assert_eq!(toasts.all().len(), 1);
        assert_eq!(toasts.all()[0].kind, NotificationKind::Error);
    }

    #[tokio::test]
    async fn test_success_round_trip() {
        let mut flow = flow(form(), ok_reply);
        flow.handle(Trigger::FormSubmit).await.unwrap();

        assert_eq!(flow.surface().download_href(), Some("/documents/123/download"));
        assert!(!flow.surface().is_visible(Region::Loading));
        assert_eq!(flow.notifier().all()[0].kind, NotificationKind::Success);
        assert_eq!(flow.notifier().all()[0].dismiss_after, Duration::from_secs(5));

        let (_, api, _, _) = flow.into_parts();
        let calls = api.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].metadata.source, "form_submit");
        assert_eq!(calls[0].metadata.created_at, "2024-01-02T03:04:05.000Z");
        assert_eq!(calls[0].template_data["davaci"], "Ali");
    }

    #[tokio::test]
    async fn test_http_error_hides_result() {
        let mut flow = flow(form(), server_error);
        let result = flow.handle(Trigger::ButtonClick).await;

        assert!(matches!(result, Err(HukukError::Http { status: 500, .. })));
        assert!(!flow.surface().is_visible(Region::Result));
        let toast = &flow.notifier().all()[0];
        assert_eq!(toast.kind, NotificationKind::Error);
        assert!(toast.message.contains("500"));
    }

    #[tokio::test]
    async fn test_second_trigger_overwrites_regions() {
        let mut flow = flow(form(), ok_reply);
        flow.handle(Trigger::ButtonClick).await.unwrap();
        flow.handle(Trigger::ButtonClick).await.unwrap();

        assert_eq!(flow.surface().entries(Region::Laws).len(), 1);
        assert!(matches!(flow.surface().entries(Region::Laws)[0], Entry::Placeholder { .. }));
        assert_eq!(flow.notifier().all().len(), 2);
    }

    #[test]
    fn test_collect_template_data_through_flow() {
        let flow = flow(form(), ok_reply);
        let data = flow.collect_template_data("dilekce");
        assert_eq!(data.get("davaci").map(String::as_str), Some("Ali"));
    }
}
