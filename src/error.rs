use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed markup: {0}")]
    Markup(String),

    #[error("Node not found: {0}")]
    NodeNotFound(u64),

    #[error("No element with id {0:?}")]
    TargetNotFound(String),

    #[error("Invalid custom element name: {0:?}")]
    InvalidElementName(String),

    #[error("Custom element already defined: {0}")]
    AlreadyDefined(String),

    #[error("Hierarchy request error: {0}")]
    HierarchyRequest(String),
}

impl From<quick_xml::events::attributes::AttrError> for Error {
    fn from(e: quick_xml::events::attributes::AttrError) -> Self {
        Error::Xml(e.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
