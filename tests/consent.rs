use async_trait::async_trait;
use jpia_chat::ChatError;
use jpia_chat::api::ConsentBackend;
use jpia_chat::consent::{
    CONSENT_FAILED, CONSENT_UPDATED, ConsentPanel, DELETE_DONE, DELETE_FAILED, DELETE_PROMPT,
    EXPORT_DONE, EXPORT_FAILED, EXPORT_FILENAME,
};
use jpia_chat::dom::VirtualDom;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;
use std::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    Read,
    Set(bool),
    Export,
    Delete,
}

/// Records calls; `healthy == false` makes every call fail.
struct FakeConsentServer {
    healthy: bool,
    stored: Option<bool>,
    calls: Mutex<Vec<Call>>,
}

impl FakeConsentServer {
    fn new(healthy: bool, stored: Option<bool>) -> Arc<Self> {
        Arc::new(Self {
            healthy,
            stored,
            calls: Mutex::default(),
        })
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) -> Result<(), ChatError> {
        self.calls.lock().unwrap().push(call);
        if self.healthy {
            Ok(())
        } else {
            Err(ChatError::Api("HTTP 500".to_string()))
        }
    }
}

#[async_trait]
impl ConsentBackend for FakeConsentServer {
    async fn consent(&self) -> Result<Option<bool>, ChatError> {
        self.record(Call::Read)?;
        Ok(self.stored)
    }

    async fn set_consent(&self, consent: bool) -> Result<serde_json::Value, ChatError> {
        self.record(Call::Set(consent))?;
        Ok(json!({ "consent": consent }))
    }

    async fn export_data(&self) -> Result<Vec<u8>, ChatError> {
        self.record(Call::Export)?;
        Ok(br#"{"conversations":[]}"#.to_vec())
    }

    async fn delete_data(&self) -> Result<(), ChatError> {
        self.record(Call::Delete)
    }
}

fn downloads(dom: &VirtualDom) -> Vec<(String, Vec<u8>)> {
    dom.privacy
        .as_ref()
        .map(|panel| panel.downloads.clone())
        .unwrap_or_default()
}

fn set_confirm(dom: &mut VirtualDom, answer: bool) {
    if let Some(panel) = dom.privacy.as_mut() {
        panel.confirm_answer = answer;
    }
}

#[tokio::test]
async fn initialize_reflects_the_stored_flag() {
    let server = FakeConsentServer::new(true, Some(true));
    let panel = ConsentPanel::new(Arc::clone(&server));
    let mut dom = VirtualDom::new();

    panel.initialize(&mut dom).await;

    assert_eq!(dom.privacy.as_ref().map(|p| p.consent_checked), Some(true));
    assert_eq!(server.calls(), vec![Call::Read]);
}

#[tokio::test]
async fn initialize_ignores_failures() {
    let server = FakeConsentServer::new(false, Some(true));
    let panel = ConsentPanel::new(Arc::clone(&server));
    let mut dom = VirtualDom::new();

    panel.initialize(&mut dom).await;

    assert_eq!(dom.privacy.as_ref().map(|p| p.consent_checked), Some(false));
    assert_eq!(dom.feedback(), Some(""));
}

#[tokio::test]
async fn setting_consent_reports_the_outcome() {
    let server = FakeConsentServer::new(true, None);
    let panel = ConsentPanel::new(Arc::clone(&server));
    let mut dom = VirtualDom::new();

    let data = panel.set_consent(&mut dom, false).await;

    assert_eq!(data, Some(json!({ "consent": false })));
    assert_eq!(dom.feedback(), Some(CONSENT_UPDATED));
    assert_eq!(server.calls(), vec![Call::Set(false)]);

    let failing = ConsentPanel::new(FakeConsentServer::new(false, None));
    assert_eq!(failing.set_consent(&mut dom, true).await, None);
    assert_eq!(dom.feedback(), Some(CONSENT_FAILED));
}

#[tokio::test]
async fn export_saves_the_download() {
    let panel = ConsentPanel::new(FakeConsentServer::new(true, None));
    let mut dom = VirtualDom::new();

    panel.export_data(&mut dom).await;

    assert_eq!(dom.feedback(), Some(EXPORT_DONE));
    assert_eq!(
        downloads(&dom),
        vec![(EXPORT_FILENAME.to_string(), br#"{"conversations":[]}"#.to_vec())]
    );
}

#[tokio::test]
async fn export_failure_saves_nothing() {
    let panel = ConsentPanel::new(FakeConsentServer::new(false, None));
    let mut dom = VirtualDom::new();

    panel.export_data(&mut dom).await;

    assert_eq!(dom.feedback(), Some(EXPORT_FAILED));
    assert!(downloads(&dom).is_empty());
}

#[tokio::test]
async fn export_without_a_download_target_fails() {
    let panel = ConsentPanel::new(FakeConsentServer::new(true, None));
    let mut dom = VirtualDom::new();
    dom.privacy = None;

    panel.export_data(&mut dom).await;

    assert_eq!(dom.feedback(), None);
}

#[tokio::test]
async fn refused_delete_sends_nothing() {
    let server = FakeConsentServer::new(true, None);
    let panel = ConsentPanel::new(Arc::clone(&server));
    let mut dom = VirtualDom::new();
    set_confirm(&mut dom, false);

    panel.delete_data(&mut dom).await;

    assert!(server.calls().is_empty());
    assert_eq!(dom.feedback(), Some(""));
    assert_eq!(
        dom.privacy.as_ref().map(|p| p.prompts.clone()),
        Some(vec![DELETE_PROMPT.to_string()])
    );
}

#[tokio::test]
async fn confirmed_delete_reports_the_outcome() {
    let server = FakeConsentServer::new(true, None);
    let panel = ConsentPanel::new(Arc::clone(&server));
    let mut dom = VirtualDom::new();
    set_confirm(&mut dom, true);

    panel.delete_data(&mut dom).await;
    assert_eq!(server.calls(), vec![Call::Delete]);
    assert_eq!(dom.feedback(), Some(DELETE_DONE));

    let failing = ConsentPanel::new(FakeConsentServer::new(false, None));
    failing.delete_data(&mut dom).await;
    assert_eq!(dom.feedback(), Some(DELETE_FAILED));
}
