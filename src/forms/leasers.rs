use actix_multipart::form::{MultipartForm, tempfile::TempFile};
use serde::Deserialize;
use validator::Validate;

#[derive(Deserialize, Validate)]
/// Form data for adding a leaser to the catalog.
pub struct AddLeaserForm {
    /// Leaser display name, required.
    #[validate(length(min = 1))]
    pub name: String,
}

/// Coefficient table upload: a `duration_months,coefficient` CSV replacing
/// the leaser's whole table.
#[derive(MultipartForm)]
pub struct UploadCoefficientsForm {
    #[multipart(limit = "1MB")]
    pub csv: TempFile,
}

impl UploadCoefficientsForm {
    /// Reopens the spooled upload from the start for parsing.
    pub fn open(&self) -> std::io::Result<std::fs::File> {
        self.csv.file.reopen()
    }
}
