// Error taxonomy for the relocation pipeline. Every network, parsing and
// lookup step returns `MoveError`; the UI layer decides how each kind is
// printed and the binary maps all of them to exit status 1.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MoveError {
    /// The server answered with a status other than the one the endpoint
    /// documents as success. `body` is the raw response text.
    #[error("{}", encode_for_display(.body))]
    Http { status: StatusCode, body: String },

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid XML in server response: {0}")]
    Xml(#[from] roxmltree::Error),

    #[error("server response is missing {0}")]
    MalformedResponse(String),

    #[error("Project named '{name}' was not found on server")]
    ProjectNotFound { name: String },

    #[error("Workbook named '{name}' not found.")]
    WorkbookNotFound { name: String },

    #[error("Workbook already in destination project")]
    AlreadyInProject { project_id: String },
}

impl MoveError {
    /// Lookup misses and the no-op case are reported as indented notes
    /// under the current step rather than as raw server output.
    pub fn is_step_note(&self) -> bool {
        matches!(
            self,
            MoveError::ProjectNotFound { .. }
                | MoveError::WorkbookNotFound { .. }
                | MoveError::AlreadyInProject { .. }
        )
    }
}

/// Escape every non-ASCII character so server text renders safely on any
/// terminal: `\xNN` below U+0100, `\uNNNN` below U+10000, `\UNNNNNNNN` above.
pub fn encode_for_display(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        let code = ch as u32;
        match code {
            0..=0x7f => out.push(ch),
            0x80..=0xff => out.push_str(&format!("\\x{:02x}", code)),
            0x100..=0xffff => out.push_str(&format!("\\u{:04x}", code)),
            _ => out.push_str(&format!("\\U{:08x}", code)),
        }
    }
    out
}
