// API client module: a small blocking HTTP client for the handful of
// Tableau Server REST endpoints this tool needs. Each call checks the exact
// success status the endpoint documents and hands the body to `wire`.

use crate::error::MoveError;
use crate::wire::{self, Credentials, ProjectPage, SiteAuth, Workbook};
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use tracing::debug;

/// REST API version every URL is built against.
pub const API_VERSION: &str = "2.3";

/// Header carrying the token returned by sign-in.
pub const AUTH_HEADER: &str = "x-tableau-auth";

/// Blocking client bound to one server. Holds no session state; the token
/// and site id are passed in through `SiteAuth` on every call.
#[derive(Clone)]
pub struct TableauClient {
    client: Client,
    base_url: String,
}

impl TableauClient {
    /// Build a client for `server` (scheme and host, optionally a path
    /// prefix). A trailing slash is ignored.
    pub fn new(server: &str) -> Result<Self, MoveError> {
        let client = Client::builder().build()?;
        let base_url = format!("{}/api/{}", server.trim_end_matches('/'), API_VERSION);
        Ok(TableauClient { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POST the credentials to `auth/signin`. Expects 200.
    pub fn sign_in(&self, credentials: &Credentials<'_>) -> Result<SiteAuth, MoveError> {
        let url = format!("{}/auth/signin", self.base_url);
        let req = self
            .client
            .post(&url)
            .header(CONTENT_TYPE, "application/xml")
            .body(wire::sign_in_body(credentials));
        let text = send(req, "POST", &url, StatusCode::OK)?;
        wire::parse_sign_in(&text)
    }

    /// POST to `auth/signout`, invalidating `token`. Expects 204.
    pub fn sign_out(&self, token: &str) -> Result<(), MoveError> {
        let url = format!("{}/auth/signout", self.base_url);
        let req = self.client.post(&url).header(AUTH_HEADER, token);
        send(req, "POST", &url, StatusCode::NO_CONTENT)?;
        Ok(())
    }

    /// GET one page of the site's projects. Pages are numbered from 1.
    pub fn project_page(
        &self,
        auth: &SiteAuth,
        page_number: u32,
        page_size: u32,
    ) -> Result<ProjectPage, MoveError> {
        let url = format!(
            "{}/sites/{}/projects?pageSize={}&pageNumber={}",
            self.base_url, auth.site_id, page_size, page_number
        );
        let req = self.client.get(&url).header(AUTH_HEADER, &auth.token);
        let text = send(req, "GET", &url, StatusCode::OK)?;
        wire::parse_project_page(&text)
    }

    /// GET the site's workbook listing. Only the first page the server
    /// returns is read.
    pub fn workbooks(&self, auth: &SiteAuth) -> Result<Vec<Workbook>, MoveError> {
        let url = format!("{}/sites/{}/workbooks", self.base_url, auth.site_id);
        let req = self.client.get(&url).header(AUTH_HEADER, &auth.token);
        let text = send(req, "GET", &url, StatusCode::OK)?;
        wire::parse_workbooks(&text)
    }

    /// PUT a new project id onto the workbook. Expects 200; the response
    /// body is not inspected.
    pub fn move_workbook(
        &self,
        auth: &SiteAuth,
        workbook_id: &str,
        project_id: &str,
    ) -> Result<(), MoveError> {
        let url = format!(
            "{}/sites/{}/workbooks/{}",
            self.base_url, auth.site_id, workbook_id
        );
        let req = self
            .client
            .put(&url)
            .header(AUTH_HEADER, &auth.token)
            .header(CONTENT_TYPE, "application/xml")
            .body(wire::move_workbook_body(project_id));
        send(req, "PUT", &url, StatusCode::OK)?;
        Ok(())
    }
}

/// Send the request and return the body text when the status matches
/// `expected`; any other status becomes `MoveError::Http` carrying the body.
fn send(
    req: RequestBuilder,
    method: &str,
    url: &str,
    expected: StatusCode,
) -> Result<String, MoveError> {
    debug!(method, url, expected = expected.as_u16(), "sending request");
    let res: Response = req.send()?;
    let status = res.status();
    if status != expected {
        debug!(method, url, status = status.as_u16(), "unexpected status");
        let body = res.text().unwrap_or_else(|_| "".into());
        return Err(MoveError::Http { status, body });
    }
    Ok(res.text()?)
}
