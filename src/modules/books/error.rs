use bookshelf_http::error::AppError;
use thiserror::Error;

/// Which write a validation failure belongs to; selects the message prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Create,
    Update,
}

impl Action {
    fn failure_prefix(self) -> &'static str {
        match self {
            Action::Create => "Gagal menambahkan buku",
            Action::Update => "Gagal memperbarui buku",
        }
    }
}

/// Failures of the book store. `Display` is the user-facing message.
#[derive(Debug, Error)]
pub enum BookError {
    #[error("{}. Mohon isi nama buku", .0.failure_prefix())]
    MissingName(Action),

    #[error("{}. readPage tidak boleh lebih besar dari pageCount", .0.failure_prefix())]
    ReadPageExceedsPageCount(Action),

    #[error("Buku tidak ditemukan")]
    NotFound,

    #[error("Gagal memperbarui buku. Id tidak ditemukan")]
    UpdateTargetMissing,

    #[error("Buku gagal dihapus. Id tidak ditemukan")]
    DeleteTargetMissing,

    /// The appended record was not the only one carrying its id
    #[error("Buku gagal ditambahkan")]
    InsertNotVisible,

    #[error("failed to format timestamp")]
    Timestamp(#[from] time::error::Format),
}

impl From<BookError> for AppError {
    fn from(err: BookError) -> Self {
        match err {
            BookError::MissingName(_) | BookError::ReadPageExceedsPageCount(_) => {
                AppError::validation(err.to_string())
            }
            BookError::NotFound
            | BookError::UpdateTargetMissing
            | BookError::DeleteTargetMissing => AppError::not_found(err.to_string()),
            BookError::InsertNotVisible => AppError::internal(err.to_string()),
            BookError::Timestamp(_) => AppError::Unexpected(anyhow::Error::new(err)),
        }
    }
}
