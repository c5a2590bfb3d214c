//! User-data panel: consent flag, export download and destructive delete.
//!
//! Every operation reports through the feedback region and swallows its
//! error after logging it.

use crate::api::ConsentBackend;
use crate::core::error::ChatError;
use tracing::{error, info};

pub const EXPORT_FILENAME: &str = "jp_ia_user_data_export.json";
pub const DELETE_PROMPT: &str =
    "¿Estás seguro? Esta acción anonimizará o eliminará tus datos y no se puede revertir fácilmente.";

pub const CONSENT_UPDATED: &str = "Consentimiento actualizado.";
pub const CONSENT_FAILED: &str = "Error al actualizar consentimiento. Revisa la consola.";
pub const EXPORT_STARTED: &str = "Preparando exportación...";
pub const EXPORT_DONE: &str = "Exportación descargada.";
pub const EXPORT_FAILED: &str = "Error al exportar datos.";
pub const DELETE_STARTED: &str = "Eliminando datos...";
pub const DELETE_DONE: &str = "Tus datos han sido eliminados o anonimizados.";
pub const DELETE_FAILED: &str = "Error al eliminar datos.";

/// Elements of the privacy panel. Missing elements make the calls no-ops.
pub trait ConsentView {
    fn set_feedback(&mut self, message: &str);
    fn set_consent_checked(&mut self, checked: bool);
    /// Blocking yes/no question. Must return `false` when no one can answer.
    fn confirm(&mut self, prompt: &str) -> bool;
    fn save_download(&mut self, filename: &str, bytes: &[u8]) -> Result<(), ChatError>;
}

pub struct ConsentPanel<B> {
    backend: B,
}

impl<B: ConsentBackend> ConsentPanel<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Reads the stored flag into the checkbox. Failures leave the checkbox alone.
    pub async fn initialize(&self, view: &mut impl ConsentView) {
        match self.backend.consent().await {
            Ok(Some(consent)) => view.set_consent_checked(consent),
            Ok(None) => {}
            Err(e) => info!("Consent state unavailable: {}", e),
        }
    }

    pub async fn set_consent(
        &self,
        view: &mut impl ConsentView,
        consent: bool,
    ) -> Option<serde_json::Value> {
        match self.backend.set_consent(consent).await {
            Ok(data) => {
                view.set_feedback(CONSENT_UPDATED);
                Some(data)
            }
            Err(e) => {
                error!("Error setting consent: {}", e);
                view.set_feedback(CONSENT_FAILED);
                None
            }
        }
    }

    pub async fn export_data(&self, view: &mut impl ConsentView) {
        view.set_feedback(EXPORT_STARTED);
        let result = match self.backend.export_data().await {
            Ok(bytes) => view.save_download(EXPORT_FILENAME, &bytes),
            Err(e) => Err(e),
        };
        match result {
            Ok(()) => view.set_feedback(EXPORT_DONE),
            Err(e) => {
                error!("Export error: {}", e);
                view.set_feedback(EXPORT_FAILED);
            }
        }
    }

    /// Asks first; a refusal issues no request and leaves the feedback untouched.
    pub async fn delete_data(&self, view: &mut impl ConsentView) {
        if !view.confirm(DELETE_PROMPT) {
            return;
        }
        view.set_feedback(DELETE_STARTED);
        match self.backend.delete_data().await {
            Ok(()) => view.set_feedback(DELETE_DONE),
            Err(e) => {
                error!("Delete error: {}", e);
                view.set_feedback(DELETE_FAILED);
            }
        }
    }
}
