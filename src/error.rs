use std::path::PathBuf;

use editor::pdf::ProjectError;
use editor::persist::PersistError;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("state directory {} unavailable: {source}", path.display())]
    StateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("persist failed: {0}")]
    Persist(#[from] PersistError),
    #[error("PDF projection failed: {0}")]
    Project(#[from] ProjectError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("background task failed: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("no element with id {0}")]
    UnknownElement(Uuid),
    #[error("element {0} is not a text element")]
    NotText(Uuid),
    #[error("element {0} is not an image")]
    NotImage(Uuid),
    #[error("unknown form field `{0}`")]
    UnknownField(String),
    #[error("changing theme with elements on the page needs --reset or --keep")]
    ThemeNeedsChoice,
    #[error("an export is already running")]
    ExportPending,
    #[error("nothing is selected")]
    NothingSelected,
    #[error("{0}")]
    Alert(String),
    #[error("invalid command: {0}")]
    InvalidCommand(String),
}
