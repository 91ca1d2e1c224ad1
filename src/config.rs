// Configuration: command-line arguments plus whatever still has to be
// asked for interactively, assembled into a single `MoveRequest` before any
// network call is made.

use crate::resolve::DEFAULT_PAGE_SIZE;
use crate::wire::Credentials;
use anyhow::Result;
use clap::error::ErrorKind;
use clap::Parser;
use std::fmt;

/// Printed (with exit status 1) when the positionals are missing or extra.
pub const USAGE: &str = "2 arguments needed (server, username)";

/// Whether a parse failure is about the positionals (missing or extra),
/// which is reported with `USAGE` rather than clap's own message.
pub fn is_usage_error(kind: ErrorKind) -> bool {
    matches!(
        kind,
        ErrorKind::MissingRequiredArgument | ErrorKind::UnknownArgument
    )
}

/// Environment variable that, when set, replaces the password prompt.
pub const PASSWORD_ENV: &str = "TABLEAU_PASSWORD";

#[derive(Parser, Debug, Clone)]
#[command(name = "tableau-move-workbook", version)]
#[command(about = "Move a workbook to another project on a Tableau Server site")]
pub struct Args {
    /// Server URL, e.g. https://tableau.example.com
    pub server: String,

    /// User to sign in as
    pub username: String,

    /// Site content URL to sign in to; empty selects the default site
    #[arg(long, env = "TABLEAU_SITE", default_value = "", value_name = "CONTENT_URL")]
    pub site: String,

    /// Workbook to move (prompted for when omitted)
    #[arg(long, value_name = "NAME")]
    pub workbook: Option<String>,

    /// Destination project (prompted for when omitted)
    #[arg(long, value_name = "NAME")]
    pub project: Option<String>,

    /// Projects requested per page while searching for the destination
    #[arg(
        long,
        default_value_t = DEFAULT_PAGE_SIZE,
        value_parser = clap::value_parser!(u32).range(1..=1000)
    )]
    pub page_size: u32,

    /// Log HTTP requests and resolved ids to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

/// Source of values the arguments did not supply.
pub trait Prompter {
    fn text(&mut self, prompt: &str) -> Result<String>;
    /// Same as `text` but the input must not be echoed.
    fn secret(&mut self, prompt: &str) -> Result<String>;
    /// Show a line of output between prompts.
    fn note(&mut self, line: &str);
}

/// Summary line shown once the names are known, before the password.
pub fn banner(workbook: &str, project: &str, username: &str) -> String {
    format!("\n*Moving '{workbook}' workbook to '{project}' project as {username}*")
}

/// Everything one relocation needs.
#[derive(Clone)]
pub struct MoveRequest {
    pub server: String,
    pub username: String,
    pub password: String,
    pub site: String,
    pub workbook: String,
    pub project: String,
    pub page_size: u32,
}

impl MoveRequest {
    /// Fill the request from `args`, then the environment (`password`
    /// lookup), then `prompter` for anything still missing. Prompts are
    /// issued in order: workbook, destination project, banner, password.
    pub fn gather(
        args: Args,
        password_env: Option<String>,
        prompter: &mut dyn Prompter,
    ) -> Result<Self> {
        let workbook = match args.workbook {
            Some(name) => name,
            None => prompter.text("Name of workbook to move")?,
        };
        let project = match args.project {
            Some(name) => name,
            None => prompter.text("Destination project")?,
        };
        prompter.note(&banner(&workbook, &project, &args.username));
        let password = match password_env {
            Some(p) => p,
            None => prompter.secret("Password")?,
        };

        Ok(MoveRequest {
            server: args.server.trim_end_matches('/').to_string(),
            username: args.username,
            password,
            site: args.site,
            workbook,
            project,
            page_size: args.page_size,
        })
    }

    pub fn credentials(&self) -> Credentials<'_> {
        Credentials {
            name: &self.username,
            password: &self.password,
            site: &self.site,
        }
    }
}

impl fmt::Debug for MoveRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MoveRequest")
            .field("server", &self.server)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("site", &self.site)
            .field("workbook", &self.workbook)
            .field("project", &self.project)
            .field("page_size", &self.page_size)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    /// Answers prompts from a fixed script and records what was asked.
    #[derive(Default)]
    struct Scripted {
        answers: VecDeque<String>,
        asked: Vec<String>,
    }

    impl Scripted {
        fn new(answers: &[&str]) -> Self {
            Scripted {
                answers: answers.iter().map(|s| s.to_string()).collect(),
                asked: Vec::new(),
            }
        }

        fn next(&mut self, prompt: &str) -> Result<String> {
            self.asked.push(prompt.to_string());
            self.answers
                .pop_front()
                .ok_or_else(|| anyhow::anyhow!("no scripted answer for {prompt}"))
        }
    }

    impl Prompter for Scripted {
        fn text(&mut self, prompt: &str) -> Result<String> {
            self.next(prompt)
        }

        fn secret(&mut self, prompt: &str) -> Result<String> {
            self.next(&format!("secret:{prompt}"))
        }

        fn note(&mut self, line: &str) {
            self.asked.push(format!("note:{}", line.trim_start()));
        }
    }

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["tableau-move-workbook", "https://tableau.example.com/", "admin"];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn exactly_two_positionals() {
        assert!(Args::try_parse_from(["prog", "https://srv"]).is_err());
        assert!(Args::try_parse_from(["prog", "https://srv", "admin", "extra"]).is_err());
        let parsed = Args::try_parse_from(["prog", "https://srv", "admin"]).unwrap();
        assert_eq!(parsed.page_size, 100);
        assert_eq!(parsed.workbook, None);
    }

    #[test]
    fn only_positional_errors_get_the_usage_line() {
        let kind = |argv: &[&str]| Args::try_parse_from(argv).unwrap_err().kind();
        assert!(is_usage_error(kind(&["prog"])));
        assert!(is_usage_error(kind(&["prog", "https://srv"])));
        assert!(is_usage_error(kind(&["prog", "https://srv", "admin", "extra"])));
        assert!(!is_usage_error(kind(&["prog", "s", "u", "--page-size", "0"])));
        assert!(!is_usage_error(kind(&["prog", "s", "u", "--page-size", "many"])));
    }

    #[test]
    fn page_size_is_bounded() {
        assert!(Args::try_parse_from(["prog", "s", "u", "--page-size", "0"]).is_err());
        assert!(Args::try_parse_from(["prog", "s", "u", "--page-size", "1001"]).is_err());
        let parsed = Args::try_parse_from(["prog", "s", "u", "--page-size", "250"]).unwrap();
        assert_eq!(parsed.page_size, 250);
    }

    #[test]
    fn prompts_for_everything_missing_in_order() {
        let mut prompter = Scripted::new(&["Sales", "Published", "hunter2"]);
        let req = MoveRequest::gather(args(&[]), None, &mut prompter).unwrap();

        assert_eq!(
            prompter.asked,
            vec![
                "Name of workbook to move",
                "Destination project",
                "note:*Moving 'Sales' workbook to 'Published' project as admin*",
                "secret:Password",
            ]
        );
        assert_eq!(req.server, "https://tableau.example.com");
        assert_eq!(req.username, "admin");
        assert_eq!(req.workbook, "Sales");
        assert_eq!(req.project, "Published");
        assert_eq!(req.password, "hunter2");
        assert_eq!(req.page_size, 100);
    }

    #[test]
    fn flags_and_env_skip_prompts() {
        let mut prompter = Scripted::new(&[]);
        let req = MoveRequest::gather(
            args(&["--workbook", "Sales", "--project", "Published", "--site", "marketing"]),
            Some("from-env".into()),
            &mut prompter,
        )
        .unwrap();

        assert_eq!(
            prompter.asked,
            vec!["note:*Moving 'Sales' workbook to 'Published' project as admin*"]
        );
        assert_eq!(req.password, "from-env");
        let creds = req.credentials();
        assert_eq!(creds.site, "marketing");
        assert_eq!(creds.name, "admin");
    }

    #[test]
    fn debug_output_hides_password() {
        let mut prompter = Scripted::new(&["Sales", "Published", "hunter2"]);
        let req = MoveRequest::gather(args(&[]), None, &mut prompter).unwrap();
        let shown = format!("{req:?}");
        assert!(!shown.contains("hunter2"));
        assert!(shown.contains("<redacted>"));
    }
}
