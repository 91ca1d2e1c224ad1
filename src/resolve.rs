// Name → id lookups. Projects are read page by page until the whole site
// has been accumulated; workbooks come from a single listing call.

use crate::error::MoveError;
use crate::wire::{Project, ProjectPage, Workbook};
use tracing::{debug, info};

/// Page size used for project listings unless overridden.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Read access to a site's content. `Session` implements this against the
/// live server; tests use an in-memory site.
pub trait SiteContent {
    fn project_page(&self, page_number: u32, page_size: u32) -> Result<ProjectPage, MoveError>;
    fn workbooks(&self) -> Result<Vec<Workbook>, MoveError>;
}

/// Number of pages needed to cover `total` items.
pub fn page_count(total: u32, page_size: u32) -> u32 {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(page_size)
}

/// Fetch every project on the site, then return the id of the first one
/// whose name equals `name` exactly.
pub fn find_project_id<S: SiteContent + ?Sized>(
    site: &S,
    name: &str,
    page_size: u32,
) -> Result<String, MoveError> {
    let first = site.project_page(1, page_size)?;
    let last_page = page_count(first.total_available, page_size);
    debug!(total = first.total_available, pages = last_page, "listing projects");

    let mut projects: Vec<Project> = first.projects;
    for page_number in 2..=last_page {
        let page = site.project_page(page_number, page_size)?;
        projects.extend(page.projects);
    }

    let id = projects
        .into_iter()
        .find(|p| p.name == name)
        .map(|p| p.id)
        .ok_or_else(|| MoveError::ProjectNotFound { name: name.to_string() })?;
    info!(project = name, project_id = %id, "resolved destination project");
    Ok(id)
}

/// Find the workbook called `name` in the site's workbook listing. The
/// returned value carries the project it currently lives in.
pub fn find_workbook<S: SiteContent + ?Sized>(site: &S, name: &str) -> Result<Workbook, MoveError> {
    let workbook = site
        .workbooks()?
        .into_iter()
        .find(|w| w.name == name)
        .ok_or_else(|| MoveError::WorkbookNotFound { name: name.to_string() })?;
    info!(
        workbook = name,
        workbook_id = %workbook.id,
        project_id = %workbook.project_id,
        "resolved workbook"
    );
    Ok(workbook)
}
