// Scoped session: signing in yields a `Session` that must be signed out.
// If it is dropped first (an early return on any error path) the token is
// invalidated on the way out so it does not linger until server expiry.

use crate::api::TableauClient;
use crate::error::MoveError;
use crate::resolve::SiteContent;
use crate::wire::{Credentials, ProjectPage, SiteAuth, Workbook};
use tracing::{debug, info, warn};

pub struct Session<'a> {
    client: &'a TableauClient,
    auth: SiteAuth,
    active: bool,
}

impl<'a> Session<'a> {
    /// Sign in and take ownership of the returned token.
    pub fn sign_in(client: &'a TableauClient, credentials: &Credentials<'_>) -> Result<Self, MoveError> {
        let auth = client.sign_in(credentials)?;
        info!(site_id = %auth.site_id, user = credentials.name, "signed in");
        Ok(Session { client, auth, active: true })
    }

    pub fn site_id(&self) -> &str {
        &self.auth.site_id
    }

    /// Reassign a workbook to another project on this session's site.
    pub fn move_workbook(&self, workbook_id: &str, project_id: &str) -> Result<(), MoveError> {
        self.client.move_workbook(&self.auth, workbook_id, project_id)
    }

    /// Invalidate the token. The session is spent even if the server
    /// rejects the request, so the drop guard will not try again.
    pub fn sign_out(mut self) -> Result<(), MoveError> {
        self.active = false;
        self.client.sign_out(&self.auth.token)?;
        info!("signed out");
        Ok(())
    }
}

impl SiteContent for Session<'_> {
    fn project_page(&self, page_number: u32, page_size: u32) -> Result<ProjectPage, MoveError> {
        self.client.project_page(&self.auth, page_number, page_size)
    }

    fn workbooks(&self) -> Result<Vec<Workbook>, MoveError> {
        self.client.workbooks(&self.auth)
    }
}

impl Drop for Session<'_> {
    fn drop(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        debug!("session dropped before sign-out, invalidating token");
        if let Err(err) = self.client.sign_out(&self.auth.token) {
            warn!(error = %err, "failed to invalidate authentication token");
        }
    }
}
