use std::path::PathBuf;

use caseprov_rdf::QueryError;

#[derive(Debug, thiserror::Error)]
pub enum ProvDotError {
    #[error(transparent)]
    Query(#[from] QueryError),

    /// A query column that must hold IRIs or blank nodes bound a literal.
    #[error("?{var} must bind an identifier, found literal `{value}`")]
    NonIdentifier { var: String, value: String },

    /// The caller-supplied terminal query returned something other than an IRI.
    #[error("terminal query must return IRIs; ?{var} bound `{value}`")]
    TerminalQuery { var: String, value: String },

    #[error("reading terminal query {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ProvDotError>;
