use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    #[error(
        "Region '{region}' reports {total} total requests but {ok} successful responses; error count would be negative."
    )]
    NegativeErrorCount { region: String, total: u64, ok: u64 },
}
