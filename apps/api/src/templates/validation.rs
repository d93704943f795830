use base64::{engine::general_purpose::STANDARD, Engine};

use crate::models::template::AiResumeTemplate;
use crate::validation::{check, FieldError, Rule, ValidationErrors};

pub const PDF_DATA_URI_PREFIX: &str = "data:application/pdf;base64,";

/// Upper bound on the stored data URI, in characters.
pub const MAX_PDF_DATA_URI_CHARS: usize = 900_000;

const PDF_MAGIC: &[u8] = b"%PDF";

/// Returns the base64 payload of a PDF data URI, or a message describing the
/// first problem found.
pub fn pdf_payload(data_uri: &str) -> Result<&str, &'static str> {
    if data_uri.len() > MAX_PDF_DATA_URI_CHARS {
        return Err("PDF is too large; keep it under roughly 650 KB");
    }
    let payload = data_uri
        .strip_prefix(PDF_DATA_URI_PREFIX)
        .ok_or("PDF must be a data:application/pdf;base64 URI")?;
    let bytes = STANDARD
        .decode(payload)
        .map_err(|_| "PDF data is not valid base64")?;
    if !bytes.starts_with(PDF_MAGIC) {
        return Err("Attached file is not a PDF");
    }
    Ok(payload)
}

pub fn validate_template(template: &AiResumeTemplate) -> Result<(), ValidationErrors> {
    let mut errors = check([Rule::Required {
        path: "name".into(),
        value: &template.name,
        message: "Template name is required",
    }]);

    if !template.pdf_data.is_empty() {
        if let Err(message) = pdf_payload(&template.pdf_data) {
            errors.push(FieldError::new("pdfData", message));
        }
    }
    errors.into_result()
}

#[cfg(test)]
pub(crate) fn pdf_data_uri(body: &[u8]) -> String {
    format!("{PDF_DATA_URI_PREFIX}{}", STANDARD.encode(body))
}
