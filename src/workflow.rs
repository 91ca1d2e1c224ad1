// The relocation pipeline: sign in, resolve the destination project,
// resolve the workbook, move it, sign out. Strictly linear; the first
// failure ends the run and the session guard signs out on the way out.

use crate::api::TableauClient;
use crate::config::MoveRequest;
use crate::error::MoveError;
use crate::resolve;
use crate::session::Session;
use std::fmt;

/// Numbered stages reported to the caller before each one runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    SigningIn { username: String },
    FindingProject { project: String },
    FindingWorkbook { workbook: String },
    Moving { project: String },
    SigningOut,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::SigningIn { username } => write!(f, "1. Signing in as {username}"),
            Step::FindingProject { project } => write!(f, "2. Finding project id of '{project}'"),
            Step::FindingWorkbook { workbook } => write!(f, "3. Finding workbook id of '{workbook}'"),
            Step::Moving { project } => write!(f, "4. Moving workbook to '{project}'"),
            Step::SigningOut => {
                write!(f, "5. Signing out and invalidating the authentication token")
            }
        }
    }
}

/// Ids involved in a completed move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relocation {
    pub workbook_id: String,
    pub from_project_id: String,
    pub to_project_id: String,
}

pub fn relocate(
    client: &TableauClient,
    request: &MoveRequest,
    mut on_step: impl FnMut(&Step),
) -> Result<Relocation, MoveError> {
    on_step(&Step::SigningIn { username: request.username.clone() });
    let session = Session::sign_in(client, &request.credentials())?;

    on_step(&Step::FindingProject { project: request.project.clone() });
    let to_project_id = resolve::find_project_id(&session, &request.project, request.page_size)?;

    on_step(&Step::FindingWorkbook { workbook: request.workbook.clone() });
    let workbook = resolve::find_workbook(&session, &request.workbook)?;

    if workbook.project_id == to_project_id {
        return Err(MoveError::AlreadyInProject { project_id: to_project_id });
    }

    on_step(&Step::Moving { project: request.project.clone() });
    session.move_workbook(&workbook.id, &to_project_id)?;

    on_step(&Step::SigningOut);
    session.sign_out()?;

    Ok(Relocation {
        workbook_id: workbook.id,
        from_project_id: workbook.project_id,
        to_project_id,
    })
}
