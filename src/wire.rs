// Wire format: the XML bodies sent to the REST API and the parsers for the
// responses it returns. Everything lives in a single namespace.

use crate::error::MoveError;
use roxmltree::{Document, Node};
use xml::escape::escape_str_attribute;

pub const TABLEAU_NS: &str = "http://tableau.com/api";

/// Values sent to the sign-in endpoint. An empty `site` selects the
/// server's default site.
#[derive(Clone, Copy)]
pub struct Credentials<'a> {
    pub name: &'a str,
    pub password: &'a str,
    pub site: &'a str,
}

/// What sign-in hands back: the token for `x-tableau-auth` and the id of
/// the site it resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteAuth {
    pub token: String,
    pub site_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub id: String,
    pub name: String,
}

/// One page of the project listing plus the site-wide project count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectPage {
    pub total_available: u32,
    pub projects: Vec<Project>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workbook {
    pub id: String,
    pub name: String,
    /// Project that currently contains the workbook.
    pub project_id: String,
}

pub fn sign_in_body(credentials: &Credentials<'_>) -> String {
    format!(
        r#"<tsRequest><credentials name="{}" password="{}"><site contentUrl="{}" /></credentials></tsRequest>"#,
        escape_str_attribute(credentials.name),
        escape_str_attribute(credentials.password),
        escape_str_attribute(credentials.site),
    )
}

pub fn move_workbook_body(project_id: &str) -> String {
    format!(
        r#"<tsRequest><workbook><project id="{}" /></workbook></tsRequest>"#,
        escape_str_attribute(project_id)
    )
}

pub fn parse_sign_in(text: &str) -> Result<SiteAuth, MoveError> {
    let doc = Document::parse(text)?;
    let credentials = doc
        .root_element()
        .children()
        .find(|n| is_element(n, "credentials"))
        .ok_or_else(|| missing("credentials element"))?;
    let token = required_attr(credentials, "token", "credentials token")?;
    let site = first_descendant(credentials, "site").ok_or_else(|| missing("site element"))?;
    let site_id = required_attr(site, "id", "site id")?;
    Ok(SiteAuth { token, site_id })
}

pub fn parse_project_page(text: &str) -> Result<ProjectPage, MoveError> {
    let doc = Document::parse(text)?;
    let root = doc.root_element();

    let pagination = first_descendant(root, "pagination")
        .ok_or_else(|| missing("pagination element"))?;
    let total_available = pagination
        .attribute("totalAvailable")
        .and_then(|v| v.trim().parse::<u32>().ok())
        .ok_or_else(|| missing("numeric pagination totalAvailable"))?;

    let projects = root
        .descendants()
        .filter(|n| is_element(n, "project"))
        .map(|n| -> Result<Project, MoveError> {
            Ok(Project {
                id: required_attr(n, "id", "project id")?,
                name: required_attr(n, "name", "project name")?,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ProjectPage { total_available, projects })
}

pub fn parse_workbooks(text: &str) -> Result<Vec<Workbook>, MoveError> {
    let doc = Document::parse(text)?;
    doc.root_element()
        .descendants()
        .filter(|n| is_element(n, "workbook"))
        .map(|n| -> Result<Workbook, MoveError> {
            let project = first_descendant(n, "project")
                .ok_or_else(|| missing("workbook project element"))?;
            Ok(Workbook {
                id: required_attr(n, "id", "workbook id")?,
                name: required_attr(n, "name", "workbook name")?,
                project_id: required_attr(project, "id", "workbook project id")?,
            })
        })
        .collect()
}

fn is_element(node: &Node<'_, '_>, name: &str) -> bool {
    node.is_element() && node.has_tag_name((TABLEAU_NS, name))
}

fn first_descendant<'a, 'input>(node: Node<'a, 'input>, name: &str) -> Option<Node<'a, 'input>> {
    node.descendants().skip(1).find(|n| is_element(n, name))
}

fn required_attr(node: Node<'_, '_>, attr: &str, what: &str) -> Result<String, MoveError> {
    node.attribute(attr)
        .map(ToOwned::to_owned)
        .ok_or_else(|| missing(what))
}

fn missing(what: &str) -> MoveError {
    MoveError::MalformedResponse(what.to_string())
}
