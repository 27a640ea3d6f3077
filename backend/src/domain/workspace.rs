//! Single-owner application state and its mutation operations.
//!
//! The workspace exclusively owns every collection; handlers reach it
//! through a lock and never hold entity references across calls. Failed
//! operations leave the state untouched.

use std::sync::Arc;

use mockable::Clock;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use super::campaign::{Campaign, CampaignId};
use super::demo_data;
use super::editor::QrCodeDraft;
use super::qr_code::{QrCode, QrCodeId};
use super::scan::{
    SCAN_BROWSERS, SCAN_CITIES, SCAN_COUNTRY, SCAN_DEVICES, SCAN_OSES, Scan, ScanId,
};
use super::user::User;

const SHORT_URL_BASE: &str = "https://qrsns.io/";
const SHORT_CODE_LEN: usize = 8;
const SHORT_CODE_CHARSET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Top-level view the client is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum Page {
    Dashboard,
    QrCodes,
    Editor,
    CodeAnalytics,
    Campaigns,
    Insights,
    Settings,
}

/// Failure of a workspace operation. State is unchanged on every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum WorkspaceError {
    #[error("QR code {id} not found")]
    QrCodeNotFound { id: QrCodeId },
    #[error("campaign {id} not found")]
    CampaignNotFound { id: CampaignId },
    #[error("campaign name must not be empty")]
    EmptyCampaignName,
}

/// The whole single-user application state.
pub struct Workspace {
    user: User,
    qr_codes: Vec<QrCode>,
    /// Most recent first.
    scans: Vec<Scan>,
    campaigns: Vec<Campaign>,
    page: Page,
    editing: Option<QrCodeId>,
    selected: Option<QrCodeId>,
    clock: Arc<dyn Clock>,
    rng: SmallRng,
}

impl Workspace {
    /// An empty workspace for the given user.
    pub fn new(user: User, clock: Arc<dyn Clock>, seed: u64) -> Self {
        Self {
            user,
            qr_codes: Vec::new(),
            scans: Vec::new(),
            campaigns: Vec::new(),
            page: Page::Dashboard,
            editing: None,
            selected: None,
            clock,
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// The seeded demo workspace: pro user, one QR code in one campaign,
    /// fifty historical scans.
    pub fn demo(clock: Arc<dyn Clock>, seed: u64) -> Self {
        let user = demo_data::pro_user();
        let mut rng = SmallRng::seed_from_u64(seed);
        let now = clock.utc();
        Self {
            qr_codes: vec![demo_data::seed_qr_code(user.id)],
            scans: demo_data::seed_scans(now, &mut rng),
            campaigns: vec![demo_data::seed_campaign(user.id)],
            user,
            page: Page::Dashboard,
            editing: None,
            selected: None,
            clock,
            rng,
        }
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn qr_codes(&self) -> &[QrCode] {
        &self.qr_codes
    }

    pub fn scans(&self) -> &[Scan] {
        &self.scans
    }

    pub fn campaigns(&self) -> &[Campaign] {
        &self.campaigns
    }

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn editing(&self) -> Option<QrCodeId> {
        self.editing
    }

    pub fn selected(&self) -> Option<QrCodeId> {
        self.selected
    }

    /// Current time from the injected clock.
    pub fn now(&self) -> chrono::DateTime<chrono::Utc> {
        self.clock.utc()
    }

    /// Look up a QR code by id.
    pub fn qr_code(&self, id: QrCodeId) -> Option<&QrCode> {
        self.qr_codes.iter().find(|code| code.id == id)
    }

    /// The campaign a QR code belongs to, if any.
    pub fn campaign_of(&self, id: QrCodeId) -> Option<&Campaign> {
        self.campaigns.iter().find(|campaign| campaign.contains(id))
    }

    /// Persist a finished draft.
    ///
    /// With a target id the draft is merged onto the existing record; an
    /// unknown target is an error before anything mutates. Without one a
    /// fresh record is synthesized and the user's active counter bumped.
    /// Campaign membership is reconciled so the code appears in at most the
    /// draft's campaign. Ends by resetting editing state and navigating to
    /// the list view.
    pub fn save_qr_code(
        &mut self,
        target: Option<QrCodeId>,
        draft: QrCodeDraft,
    ) -> Result<QrCode, WorkspaceError> {
        if let Some(campaign_id) = draft.campaign_id {
            if !self.campaigns.iter().any(|c| c.id == campaign_id) {
                return Err(WorkspaceError::CampaignNotFound { id: campaign_id });
            }
        }

        let saved = match target {
            Some(id) => {
                let code = self
                    .qr_codes
                    .iter_mut()
                    .find(|code| code.id == id)
                    .ok_or(WorkspaceError::QrCodeNotFound { id })?;
                code.name = draft.name;
                code.qr_type = draft.qr_type;
                code.destination_url = draft.destination_url;
                code.dynamic = draft.dynamic;
                code.tags = draft.tags;
                code.active = draft.active;
                code.design = draft.design;
                code.clone()
            }
            None => {
                let code = QrCode {
                    id: QrCodeId::random(),
                    user_id: self.user.id,
                    name: draft.name,
                    qr_type: draft.qr_type,
                    short_url: self.mint_short_url(),
                    destination_url: draft.destination_url,
                    dynamic: draft.dynamic,
                    tags: draft.tags,
                    active: draft.active,
                    created_at: self.clock.utc(),
                    scan_count: 0,
                    design: draft.design,
                };
                self.qr_codes.push(code.clone());
                self.user.qr_codes_active += 1;
                code
            }
        };

        for campaign in &mut self.campaigns {
            campaign.qr_code_ids.retain(|member| *member != saved.id);
        }
        if let Some(campaign_id) = draft.campaign_id {
            if let Some(campaign) = self.campaigns.iter_mut().find(|c| c.id == campaign_id) {
                campaign.qr_code_ids.push(saved.id);
            }
        }

        self.editing = None;
        self.page = Page::QrCodes;
        Ok(saved)
    }

    /// Remove a QR code, its campaign membership, and one unit of the
    /// user's active counter. Its scans remain for historical aggregates.
    pub fn delete_qr_code(&mut self, id: QrCodeId) -> Result<(), WorkspaceError> {
        let at = self
            .qr_codes
            .iter()
            .position(|code| code.id == id)
            .ok_or(WorkspaceError::QrCodeNotFound { id })?;
        self.qr_codes.remove(at);
        self.user.qr_codes_active = self.user.qr_codes_active.saturating_sub(1);
        for campaign in &mut self.campaigns {
            campaign.qr_code_ids.retain(|member| *member != id);
        }
        if self.selected == Some(id) {
            self.selected = None;
        }
        Ok(())
    }

    /// Record one simulated resolution of a QR code.
    ///
    /// Dimensions are drawn uniformly from the fixed catalogs; the new
    /// scan is prepended so the collection stays newest-first.
    pub fn simulate_scan(&mut self, id: QrCodeId) -> Result<Scan, WorkspaceError> {
        let code = self
            .qr_codes
            .iter_mut()
            .find(|code| code.id == id)
            .ok_or(WorkspaceError::QrCodeNotFound { id })?;
        code.scan_count += 1;

        let scan = Scan {
            id: ScanId::random(),
            qr_id: id,
            timestamp: self.clock.utc(),
            country: SCAN_COUNTRY.to_string(),
            city: draw(&mut self.rng, &SCAN_CITIES),
            device: draw(&mut self.rng, &SCAN_DEVICES),
            os: draw(&mut self.rng, &SCAN_OSES),
            browser: draw(&mut self.rng, &SCAN_BROWSERS),
        };
        self.scans.insert(0, scan.clone());
        Ok(scan)
    }

    /// Create an empty campaign with the given name.
    pub fn create_campaign(&mut self, name: &str) -> Result<Campaign, WorkspaceError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(WorkspaceError::EmptyCampaignName);
        }
        let campaign = Campaign {
            id: CampaignId::random(),
            user_id: self.user.id,
            name: trimmed.to_string(),
            qr_code_ids: Vec::new(),
        };
        self.campaigns.push(campaign.clone());
        Ok(campaign)
    }

    /// Toggle between the two fixed demo identities and land on the
    /// dashboard.
    pub fn switch_plan(&mut self) -> &User {
        self.user = if self.user.has_ai_access() {
            demo_data::free_user()
        } else {
            demo_data::pro_user()
        };
        self.navigate(Page::Dashboard);
        &self.user
    }

    /// Move to a page, dropping navigation state the page does not use.
    pub fn navigate(&mut self, page: Page) {
        self.page = page;
        if page != Page::Editor {
            self.editing = None;
        }
        if page != Page::CodeAnalytics {
            self.selected = None;
        }
    }

    /// Open the editor on a fresh draft.
    pub fn begin_create(&mut self) {
        self.editing = None;
        self.page = Page::Editor;
    }

    /// Open the editor on an existing code.
    pub fn begin_edit(&mut self, id: QrCodeId) -> Result<(), WorkspaceError> {
        if self.qr_code(id).is_none() {
            return Err(WorkspaceError::QrCodeNotFound { id });
        }
        self.editing = Some(id);
        self.page = Page::Editor;
        Ok(())
    }

    /// Open the per-code analytics view.
    pub fn select_for_analytics(&mut self, id: QrCodeId) -> Result<(), WorkspaceError> {
        if self.qr_code(id).is_none() {
            return Err(WorkspaceError::QrCodeNotFound { id });
        }
        self.selected = Some(id);
        self.page = Page::CodeAnalytics;
        Ok(())
    }

    fn mint_short_url(&mut self) -> String {
        let code: String = (0..SHORT_CODE_LEN)
            .map(|_| {
                let at = self.rng.gen_range(0..SHORT_CODE_CHARSET.len());
                SHORT_CODE_CHARSET[at] as char
            })
            .collect();
        format!("{SHORT_URL_BASE}{code}")
    }
}

fn draw(rng: &mut SmallRng, catalog: &[&str]) -> String {
    catalog[rng.gen_range(0..catalog.len())].to_string()
}

impl std::fmt::Debug for Workspace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Workspace")
            .field("user", &self.user)
            .field("qr_codes", &self.qr_codes.len())
            .field("scans", &self.scans.len())
            .field("campaigns", &self.campaigns.len())
            .field("page", &self.page)
            .finish_non_exhaustive()
    }
}
