use serde::{Deserialize, Serialize};
use strum::{EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

/// Conversational mode sent to the backend and reflected in the header.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Specialist {
    #[default]
    General,
    Procedimientos,
    Tecnico,
    Edificabilidad,
    Zonificacion,
    Ambiental,
    Permisos,
    Aspectos,
    Historico,
}

/// Static header metadata for a specialist. Never escaped when rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpecialistInfo {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub icon: &'static str,
}

impl Specialist {
    /// Looks up a specialist by id. Unknown ids resolve to `General` without complaint.
    pub fn resolve(id: &str) -> Self {
        id.trim().parse().unwrap_or_default()
    }

    pub fn id(&self) -> &'static str {
        self.into()
    }

    pub fn all() -> impl Iterator<Item = Specialist> {
        Specialist::iter()
    }

    pub fn info(&self) -> SpecialistInfo {
        let (title, subtitle, icon) = match self {
            Specialist::General => (
                "Chat General",
                "Análisis completo de todos los Reglamentos de Planificación",
                "fas fa-comments",
            ),
            Specialist::Procedimientos => (
                "Procedimientos",
                "Trámites administrativos y más",
                "fas fa-clipboard-list",
            ),
            Specialist::Tecnico => (
                "Técnico Gráfico",
                "Planos, mapas y documentos técnicos",
                "fas fa-drafting-compass",
            ),
            Specialist::Edificabilidad => (
                "Edificabilidad",
                "Construcción y densidad urbana",
                "fas fa-building",
            ),
            Specialist::Zonificacion => (
                "Zonificación",
                "Clasificación de uso de suelo",
                "fas fa-map-marked-alt",
            ),
            Specialist::Ambiental => (
                "Ambiental",
                "Impacto ambiental y mitigación",
                "fas fa-leaf",
            ),
            Specialist::Permisos => (
                "Permisos y licencias",
                "Autorizaciones y licencias",
                "fas fa-file-signature",
            ),
            Specialist::Aspectos => (
                "Aspectos ambientales",
                "Normativas ambientales",
                "fas fa-balance-scale",
            ),
            Specialist::Historico => (
                "Histórico",
                "Conservación histórica y cultural",
                "fas fa-landmark",
            ),
        };
        SpecialistInfo {
            title,
            subtitle,
            icon,
        }
    }
}

impl std::fmt::Display for Specialist {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}
