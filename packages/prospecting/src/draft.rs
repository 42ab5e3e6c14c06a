//! Template-based draft composition.
//!
//! Composes outreach drafts from static per-campaign template tables,
//! localized by the lead's inferred region. Missing lead fields become
//! visible placeholders so a reviewer cannot miss them. Drafts are
//! never sent from here.

use async_trait::async_trait;
use rand::seq::SliceRandom;

use crate::campaigns::Campaign;
use crate::error::{DraftError, DraftResult};
use crate::extract;
use crate::traits::composer::DraftComposer;
use crate::types::{Language, Lead, MessageDraft};

/// One subject/body template. Placeholders: `{name}`, `{company}`,
/// `{job_title}`.
struct Template {
    subject: &'static str,
    body: &'static str,
}

/// Composes drafts by filling a randomly-picked template variant.
#[derive(Default)]
pub struct TemplateComposer;

impl TemplateComposer {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DraftComposer for TemplateComposer {
    async fn compose(&self, lead: &Lead) -> DraftResult<MessageDraft> {
        let language = extract::detect_language(lead.region.as_deref());
        let variants = templates_for(lead.campaign, language).ok_or_else(|| {
            DraftError::NoTemplate {
                campaign: lead.campaign.to_string(),
                language: language.to_string(),
            }
        })?;

        let template = variants
            .choose(&mut rand::thread_rng())
            .ok_or_else(|| DraftError::NoTemplate {
                campaign: lead.campaign.to_string(),
                language: language.to_string(),
            })?;

        let name = lead.first_name.as_deref().or(lead.full_name.as_deref());
        Ok(MessageDraft {
            subject: fill(template.subject, name, lead.organization.as_deref(), lead.job_title.as_deref()),
            body: fill(template.body, name, lead.organization.as_deref(), lead.job_title.as_deref()),
            language,
        })
    }
}

fn fill(template: &str, name: Option<&str>, company: Option<&str>, job_title: Option<&str>) -> String {
    template
        .replace("{name}", name.unwrap_or("[NOMBRE]"))
        .replace("{company}", company.unwrap_or("[EMPRESA]"))
        .replace("{job_title}", job_title.unwrap_or("[CARGO]"))
}

/// Template lookup; Portuguese falls back to English until pt variants
/// are written.
fn templates_for(campaign: Campaign, language: Language) -> Option<&'static [Template]> {
    let variants: &'static [Template] = match (campaign, language) {
        (Campaign::DirectB2b, Language::Es) => &DIRECT_B2B_ES,
        (Campaign::DirectB2b, _) => &DIRECT_B2B_EN,
        (Campaign::Pharma, Language::Es) => &PHARMA_ES,
        (Campaign::Pharma, _) => &PHARMA_EN,
        (Campaign::Influencer, Language::Es) => &INFLUENCER_ES,
        (Campaign::Influencer, _) => &INFLUENCER_EN,
        (Campaign::Events, Language::Es) => &EVENTS_ES,
        (Campaign::Events, _) => &EVENTS_EN,
    };
    if variants.is_empty() {
        None
    } else {
        Some(variants)
    }
}

static DIRECT_B2B_EN: [Template; 2] = [
    Template {
        subject: "AI-assisted pathology for {company}",
        body: "Hi {name},\n\nI came across your work as {job_title} at {company}. We help pathology teams cut slide review time with AI pre-screening for breast cancer biomarkers (HER2, Ki-67, ER/PR).\n\nWould a short call next week make sense to see whether this fits your lab's workflow?\n\nBest regards,\nDigpatho Team",
    },
    Template {
        subject: "Faster biomarker quantification at {company}",
        body: "Hi {name},\n\nLabs like {company} are using AI to standardize HER2 and Ki-67 scoring and reduce inter-observer variability. I'd love to show you a 15-minute demo on your own cases.\n\nWould you be open to a brief conversation?\n\nBest regards,\nDigpatho Team",
    },
];

static DIRECT_B2B_ES: [Template; 2] = [
    Template {
        subject: "Patología asistida por IA para {company}",
        body: "Hola {name}:\n\nVi su trabajo como {job_title} en {company}. Ayudamos a equipos de patología a reducir el tiempo de revisión de láminas con pre-análisis por IA de biomarcadores de cáncer de mama (HER2, Ki-67, RE/RP).\n\n¿Tendría 15 minutos la próxima semana para evaluar si encaja en el flujo de su laboratorio?\n\nSaludos cordiales,\nEquipo Digpatho",
    },
    Template {
        subject: "Cuantificación de biomarcadores más rápida en {company}",
        body: "Hola {name}:\n\nLaboratorios como {company} están usando IA para estandarizar la puntuación de HER2 y Ki-67 y reducir la variabilidad entre observadores. Me encantaría mostrarle una demo con sus propios casos.\n\n¿Le interesaría una breve conversación?\n\nSaludos cordiales,\nEquipo Digpatho",
    },
];

static PHARMA_EN: [Template; 1] = [Template {
    subject: "Digital pathology support for CDx programs",
    body: "Hi {name},\n\nGiven your role as {job_title} at {company}, I wanted to reach out about our AI platform for biomarker quantification in breast cancer. Teams running companion diagnostic and clinical trial programs use it to standardize scoring across trial sites.\n\nWould you be open to a short exploratory call?\n\nBest regards,\nDigpatho Team",
}];

static PHARMA_ES: [Template; 1] = [Template {
    subject: "Patología digital para programas de CDx",
    body: "Hola {name}:\n\nPor su rol como {job_title} en {company}, quería contactarle sobre nuestra plataforma de IA para cuantificación de biomarcadores en cáncer de mama. Equipos de diagnóstico acompañante y ensayos clínicos la usan para estandarizar la puntuación entre centros.\n\n¿Le interesaría una breve llamada exploratoria?\n\nSaludos cordiales,\nEquipo Digpatho",
}];

static INFLUENCER_EN: [Template; 1] = [Template {
    subject: "Your digital pathology coverage",
    body: "Hi {name},\n\nI've been following your work on digital pathology and AI in diagnostics. We're building AI tools for breast cancer biomarker quantification and would love to share what we're seeing in LatAm and Africa deployments — happy to provide data or a demo if it's useful for your audience.\n\nWould you be interested in a conversation?\n\nBest regards,\nDigpatho Team",
}];

static INFLUENCER_ES: [Template; 1] = [Template {
    subject: "Su cobertura sobre patología digital",
    body: "Hola {name}:\n\nSigo su trabajo sobre patología digital e IA en diagnóstico. Estamos construyendo herramientas de IA para cuantificación de biomarcadores de cáncer de mama y nos encantaría compartir lo que vemos en despliegues en Latinoamérica y África. Con gusto aportamos datos o una demo si le sirve a su audiencia.\n\n¿Le interesaría conversar?\n\nSaludos cordiales,\nEquipo Digpatho",
}];

static EVENTS_EN: [Template; 1] = [Template {
    subject: "Speaking opportunity: AI in pathology",
    body: "Hi {name},\n\nI saw you're involved in organizing pathology events. We work on AI-assisted biomarker quantification for breast cancer and have real-world deployment results from LatAm and Africa that could make a strong session. Would you be open to discussing a talk or panel contribution?\n\nBest regards,\nDigpatho Team",
}];

static EVENTS_ES: [Template; 1] = [Template {
    subject: "Propuesta de charla: IA en patología",
    body: "Hola {name}:\n\nVi que participa en la organización de eventos de patología. Trabajamos en cuantificación de biomarcadores asistida por IA para cáncer de mama, con resultados de despliegues reales en Latinoamérica y África que podrían dar para una buena sesión. ¿Le interesaría conversar sobre una charla o panel?\n\nSaludos cordiales,\nEquipo Digpatho",
}];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LeadStatus;
    use chrono::Utc;
    use uuid::Uuid;

    fn lead(region: Option<&str>) -> Lead {
        let now = Utc::now();
        Lead {
            id: Uuid::new_v4(),
            full_name: Some("Jane Doe".to_string()),
            first_name: Some("Jane".to_string()),
            last_name: Some("Doe".to_string()),
            job_title: Some("Lab Director".to_string()),
            organization: Some("Hospital X".to_string()),
            email: None,
            profile_url: "https://www.linkedin.com/in/jane-doe".to_string(),
            campaign: Campaign::DirectB2b,
            source_query: None,
            region: region.map(str::to_string),
            status: LeadStatus::New,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn fills_placeholders_from_lead_fields() {
        let draft = TemplateComposer::new().compose(&lead(None)).await.unwrap();
        assert_eq!(draft.language, Language::En);
        assert!(draft.body.contains("Jane"));
        assert!(draft.subject.contains("Hospital X") || draft.body.contains("Hospital X"));
        assert!(!draft.body.contains("{name}"));
        assert!(!draft.body.contains("{company}"));
    }

    #[tokio::test]
    async fn missing_fields_become_visible_placeholders() {
        let mut lead = lead(None);
        lead.first_name = None;
        lead.full_name = None;
        lead.organization = None;
        let draft = TemplateComposer::new().compose(&lead).await.unwrap();
        assert!(draft.body.contains("[NOMBRE]"));
        assert!(draft.subject.contains("[EMPRESA]") || draft.body.contains("[EMPRESA]"));
    }

    #[tokio::test]
    async fn spanish_region_selects_spanish_template() {
        let draft = TemplateComposer::new()
            .compose(&lead(Some("Argentina")))
            .await
            .unwrap();
        assert_eq!(draft.language, Language::Es);
        assert!(draft.body.contains("Hola"));
    }

    #[tokio::test]
    async fn portuguese_falls_back_to_english_templates() {
        let draft = TemplateComposer::new()
            .compose(&lead(Some("Brazil")))
            .await
            .unwrap();
        // Language is preserved for the record even when the template
        // text falls back.
        assert_eq!(draft.language, Language::Pt);
        assert!(draft.body.contains("Hi "));
    }

    #[tokio::test]
    async fn every_campaign_and_language_has_a_template() {
        for campaign in Campaign::all() {
            for language in [Language::En, Language::Es, Language::Pt] {
                assert!(
                    templates_for(campaign, language).is_some(),
                    "missing template for {campaign} ({language})"
                );
            }
        }
    }
}
