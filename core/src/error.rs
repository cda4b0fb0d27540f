use std::path::PathBuf;

use thiserror::Error;

/// Feiltaksonomi for hele kjernen.
///
/// Fatale feil (manglende fil, manglende dato-kolonne, ukjent formel, tom
/// header i destinasjonen) avbryter kjøringen. `UnparseableDate` brukes
/// per rad og fører bare til at raden hoppes over.
#[derive(Debug, Error)]
pub enum LogError {
    #[error("fant ikke inputfil: {}", .0.display())]
    InputMissing(PathBuf),

    #[error("IO-feil for {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV-feil i {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("mangler påkrevde kolonner {missing:?} (fant: {found:?})")]
    MissingColumns {
        missing: Vec<String>,
        found: Vec<String>,
    },

    #[error("{} mangler header (forventet {expected})", path.display())]
    MissingHeader { path: PathBuf, expected: String },

    #[error("ukjent 1RM-formel: '{0}' (bruk epley eller brzycki)")]
    UnknownFormula(String),

    #[error("ukjent datoformat: '{0}'")]
    UnparseableDate(String),

    #[error("fant ingen økter for øvelsen '{name}'. Eksempler fra fila: {suggestions:?}")]
    ExerciseNotFound {
        name: String,
        suggestions: Vec<String>,
    },

    #[error("for lite data til PR-statistikk: ingen øvelse har minst {min_sessions} økter (prøv lavere min_sessions)")]
    NotEnoughSessions { min_sessions: usize },

    #[error("for få dager til å estimere vedlikehold: {available} (trenger minst 2)")]
    NotEnoughDays { available: usize },

    #[error("ugyldig konfigurasjon ved '{path}': {message}")]
    Config { path: String, message: String },
}

impl LogError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        LogError::Io {
            path: path.into(),
            source,
        }
    }

    pub fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        LogError::Csv {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, LogError>;
