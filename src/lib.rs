// Library root
// -----------
// This crate exposes the pieces the CLI is built from, so the relocation
// flow can be driven from tests without a terminal.
//
// Module responsibilities:
// - `config`: command-line arguments and assembly of a `MoveRequest`.
// - `api`: blocking HTTP calls to the Tableau Server REST endpoints.
// - `wire`: XML request bodies and response parsing.
// - `session`: sign-in with guaranteed sign-out.
// - `resolve`: project (paginated) and workbook lookups by name.
// - `workflow`: the linear sign-in → resolve → move → sign-out pipeline.
// - `error`: error kinds and console-safe escaping of server text.
// - `logging`: tracing subscriber setup.
// - `ui`: prompts, step banners and failure reporting.
pub mod api;
pub mod config;
pub mod error;
pub mod logging;
pub mod resolve;
pub mod session;
pub mod ui;
pub mod wire;
pub mod workflow;
