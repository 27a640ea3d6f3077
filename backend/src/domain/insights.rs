//! AI insight assistant: prompt assembly, demo mode, and stale-response
//! handling.
//!
//! The service degrades rather than fails: without a configured model it
//! serves canned demo copy, and a model error maps to a fixed fallback
//! message instead of an error response.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use tracing::warn;

use super::ports::InsightModel;
use super::qr_code::QrCode;
use super::scan::Scan;

/// Served when no model is configured and weekly insights are requested.
pub const DEMO_INSIGHTS_HTML: &str = "<h2>Insights de IA (Modo de Demonstração)</h2><ul><li><strong>Aumento de Scans</strong>: Houve um aumento de 15% nos scans durante a semana, principalmente no QR Code 'Website Principal'.</li><li><strong>Perfil de Usuário</strong>: A maioria dos usuários utiliza dispositivos móveis (80%) com sistema operacional Android (65%).</li><li><strong>Recomendação</strong>: Considere otimizar a página de destino para dispositivos Android e criar uma campanha de marketing direcionada para São Paulo, que representa 40% dos scans.</li></ul>";

/// Served instead of an error when the weekly-insight model call fails.
pub const INSIGHTS_FALLBACK: &str =
    "Ocorreu um erro ao gerar os insights. Tente novamente mais tarde.";

/// Served instead of an error when a question's model call fails.
pub const QUESTION_FALLBACK: &str =
    "Não foi possível processar sua pergunta. Tente novamente.";

/// A generated answer plus whether it was superseded while in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsightAnswer {
    pub html: String,
    /// True when a newer request started before this one finished. Stale
    /// answers must not replace the latest rendered panel.
    pub stale: bool,
}

/// Build the CSV transcript both prompts share.
///
/// QR-code names are resolved through the current collection; scans whose
/// code has since been deleted carry `N/A`.
pub fn scan_transcript(scans: &[Scan], qr_codes: &[QrCode]) -> String {
    let mut csv = String::from("timestamp,city,device,os,browser,qr_name\n");
    for scan in scans {
        let name = qr_codes
            .iter()
            .find(|code| code.id == scan.qr_id)
            .map_or("N/A", |code| code.name.as_str());
        csv.push_str(&format!(
            "{},{},{},{},{},{}\n",
            scan.timestamp.to_rfc3339(),
            scan.city,
            scan.device,
            scan.os,
            scan.browser,
            name
        ));
    }
    csv
}

fn weekly_prompt(scans: &[Scan], qr_codes: &[QrCode]) -> String {
    format!(
        "Analisando os seguintes dados de escaneamento de QR Code no formato CSV:\n\
         {}\n\n\
         Atue como um analista de marketing especialista. Forneça um resumo dos \
         insights da última semana e duas recomendações acionáveis.\n\
         - O que subiu ou caiu em termos de volume de scans?\n\
         - Qual o perfil de dispositivo/OS mais comum?\n\
         - Há alguma concentração geográfica notável?\n\
         - Quais são as recomendações para otimizar a campanha com base nesses dados?\n\n\
         Formate a resposta em HTML. Use tags como <h3> para títulos, <p> para \
         parágrafos, <ul> e <li> para listas.",
        scan_transcript(scans, qr_codes)
    )
}

fn question_prompt(question: &str, scans: &[Scan], qr_codes: &[QrCode]) -> String {
    format!(
        "Com base nos seguintes dados de escaneamento de QR Code (CSV):\n\
         {}\n\n\
         Responda à seguinte pergunta do usuário: \"{question}\"\n\n\
         Seja conciso e direto. Se a resposta envolver uma lista ou ranking, use \
         uma tabela em HTML (com tags <table>, <tr>, <th>, <td>).",
        scan_transcript(scans, qr_codes)
    )
}

/// Serves insight requests, discarding answers a newer request supersedes.
pub struct InsightService {
    model: Option<Arc<dyn InsightModel>>,
    generation: AtomicU64,
    latest: Mutex<Option<String>>,
}

impl InsightService {
    /// A service backed by a real model.
    pub fn new(model: Arc<dyn InsightModel>) -> Self {
        Self {
            model: Some(model),
            generation: AtomicU64::new(0),
            latest: Mutex::new(None),
        }
    }

    /// A service with no model: every answer is demo copy.
    pub fn demo() -> Self {
        Self {
            model: None,
            generation: AtomicU64::new(0),
            latest: Mutex::new(None),
        }
    }

    /// The most recently published (non-stale) answer, if any.
    pub fn latest(&self) -> Option<String> {
        self.latest.lock().ok().and_then(|guard| guard.clone())
    }

    /// Generate the weekly insight summary.
    pub async fn weekly_insights(&self, scans: &[Scan], qr_codes: &[QrCode]) -> InsightAnswer {
        let token = self.begin();
        let html = match &self.model {
            None => DEMO_INSIGHTS_HTML.to_string(),
            Some(model) => match model.generate(&weekly_prompt(scans, qr_codes)).await {
                Ok(html) => html,
                Err(error) => {
                    warn!(%error, "weekly insight generation failed");
                    INSIGHTS_FALLBACK.to_string()
                }
            },
        };
        self.settle(token, html)
    }

    /// Answer a free-form question about the scan data.
    pub async fn answer(
        &self,
        question: &str,
        scans: &[Scan],
        qr_codes: &[QrCode],
    ) -> InsightAnswer {
        let token = self.begin();
        let html = match &self.model {
            None => demo_answer(question),
            Some(model) => match model.generate(&question_prompt(question, scans, qr_codes)).await
            {
                Ok(html) => html,
                Err(error) => {
                    warn!(%error, "insight question failed");
                    QUESTION_FALLBACK.to_string()
                }
            },
        };
        self.settle(token, html)
    }

    fn begin(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Publish the answer only while its token is still current, so a slow
    /// response cannot overwrite a newer one.
    fn settle(&self, token: u64, html: String) -> InsightAnswer {
        let stale = self.generation.load(Ordering::SeqCst) != token;
        if !stale {
            if let Ok(mut guard) = self.latest.lock() {
                *guard = Some(html.clone());
            }
        }
        InsightAnswer { html, stale }
    }
}

fn demo_answer(question: &str) -> String {
    format!(
        "<p><strong>Resposta para:</strong> \"{question}\" (Modo de Demonstração)</p>\
         <table><thead><tr><th>QR Code</th><th>Cidade</th><th>Scans</th></tr></thead>\
         <tbody><tr><td>Website Principal</td><td>São Paulo</td><td>512</td></tr>\
         <tr><td>Cardápio Digital</td><td>Rio de Janeiro</td><td>345</td></tr></tbody></table>"
    )
}

impl std::fmt::Debug for InsightService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InsightService")
            .field("model", &self.model.as_ref().map(|_| "configured"))
            .field("generation", &self.generation)
            .finish()
    }
}
