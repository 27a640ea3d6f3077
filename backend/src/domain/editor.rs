//! Four-step QR-code creation and editing wizard.
//!
//! The wizard is a pure state machine: it owns a draft and a current step,
//! and only ever hands the draft back to the caller on [`QrCodeEditor::finish`].
//! Persisting the result is the workspace's job.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use super::campaign::CampaignId;
use super::qr_code::{QrCode, QrCodeId, QrCodeType, QrDesign};

/// Name given to a freshly started draft.
pub const DEFAULT_DRAFT_NAME: &str = "Novo QR Code";

/// Destination pre-filled into a freshly started draft.
pub const DEFAULT_DRAFT_DESTINATION: &str = "https://";

/// Wizard steps in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum EditorStep {
    TypeSelection,
    Destination,
    Design,
    Tracking,
}

impl EditorStep {
    const ORDER: [Self; 4] = [
        Self::TypeSelection,
        Self::Destination,
        Self::Design,
        Self::Tracking,
    ];

    /// 1-based position shown in the step indicator.
    pub fn number(self) -> u8 {
        match self {
            Self::TypeSelection => 1,
            Self::Destination => 2,
            Self::Design => 3,
            Self::Tracking => 4,
        }
    }

    fn next(self) -> Option<Self> {
        let at = Self::ORDER.iter().position(|step| *step == self)?;
        Self::ORDER.get(at + 1).copied()
    }

    fn previous(self) -> Option<Self> {
        let at = Self::ORDER.iter().position(|step| *step == self)?;
        at.checked_sub(1).and_then(|p| Self::ORDER.get(p)).copied()
    }
}

/// Mutable working copy of a QR code's editable fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct QrCodeDraft {
    pub name: String,
    #[serde(rename = "type")]
    pub qr_type: QrCodeType,
    pub destination_url: String,
    pub dynamic: bool,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Campaign the code should belong to after saving, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub campaign_id: Option<CampaignId>,
    pub active: bool,
    #[serde(default)]
    pub design: QrDesign,
}

impl Default for QrCodeDraft {
    fn default() -> Self {
        Self {
            name: DEFAULT_DRAFT_NAME.to_string(),
            qr_type: QrCodeType::Url,
            destination_url: DEFAULT_DRAFT_DESTINATION.to_string(),
            dynamic: true,
            tags: Vec::new(),
            campaign_id: None,
            active: true,
            design: QrDesign::default(),
        }
    }
}

impl QrCodeDraft {
    /// Start a draft from an existing code's current field values.
    ///
    /// Membership is resolved by the caller; the entity itself does not
    /// carry a campaign reference.
    pub fn from_qr_code(code: &QrCode, campaign_id: Option<CampaignId>) -> Self {
        Self {
            name: code.name.clone(),
            qr_type: code.qr_type,
            destination_url: code.destination_url.clone(),
            dynamic: code.dynamic,
            tags: code.tags.clone(),
            campaign_id,
            active: code.active,
            design: code.design.clone(),
        }
    }
}

/// Why a destination URL was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DestinationUrlError {
    #[error("A URL de destino é obrigatória.")]
    Required,
    #[error("Por favor, insira uma URL válida.")]
    InvalidFormat,
}

/// Validate the destination field of a draft.
///
/// The placeholder `https://` counts as invalid rather than absent: it
/// parses but carries no host.
pub fn validate_destination_url(raw: &str) -> Result<(), DestinationUrlError> {
    if raw.trim().is_empty() {
        return Err(DestinationUrlError::Required);
    }
    match url::Url::parse(raw) {
        Ok(parsed) if parsed.host_str().is_some() => Ok(()),
        _ => Err(DestinationUrlError::InvalidFormat),
    }
}

/// Why the wizard refused to finish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EditorError {
    #[error(transparent)]
    Destination(#[from] DestinationUrlError),
}

/// The wizard itself: a draft plus a current step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrCodeEditor {
    target: Option<QrCodeId>,
    draft: QrCodeDraft,
    step: EditorStep,
}

impl QrCodeEditor {
    /// Begin creating a new code with a default draft.
    pub fn create() -> Self {
        Self {
            target: None,
            draft: QrCodeDraft::default(),
            step: EditorStep::TypeSelection,
        }
    }

    /// Begin editing an existing code, seeded from its current values.
    pub fn edit(code: &QrCode, campaign_id: Option<CampaignId>) -> Self {
        Self {
            target: Some(code.id),
            draft: QrCodeDraft::from_qr_code(code, campaign_id),
            step: EditorStep::TypeSelection,
        }
    }

    /// Construct a wizard already on the final step with a caller-supplied
    /// draft, as when the submitted form arrives in one request.
    pub fn review(target: Option<QrCodeId>, draft: QrCodeDraft) -> Self {
        Self {
            target,
            draft,
            step: EditorStep::Tracking,
        }
    }

    pub fn step(&self) -> EditorStep {
        self.step
    }

    pub fn draft(&self) -> &QrCodeDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut QrCodeDraft {
        &mut self.draft
    }

    pub fn target(&self) -> Option<QrCodeId> {
        self.target
    }

    /// Move forward one step; the destination step gates on a valid URL.
    ///
    /// On the final step this is a no-op.
    pub fn advance(&mut self) -> Result<(), DestinationUrlError> {
        if self.step == EditorStep::Destination {
            validate_destination_url(&self.draft.destination_url)?;
        }
        if let Some(next) = self.step.next() {
            self.step = next;
        }
        Ok(())
    }

    /// Move back one step; a no-op on the first step.
    pub fn retreat(&mut self) {
        if let Some(previous) = self.step.previous() {
            self.step = previous;
        }
    }

    /// Validate and surrender the draft for persistence.
    pub fn finish(self) -> Result<(Option<QrCodeId>, QrCodeDraft), EditorError> {
        validate_destination_url(&self.draft.destination_url)?;
        Ok((self.target, self.draft))
    }

    /// Whether a live preview should render for the current draft.
    ///
    /// Suppressed while the destination is still invalid, so the preview
    /// never encodes a placeholder.
    pub fn preview_destination(&self) -> Option<&str> {
        validate_destination_url(&self.draft.destination_url)
            .ok()
            .map(|()| self.draft.destination_url.as_str())
    }
}
