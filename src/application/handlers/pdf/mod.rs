//! Paid certificate export.

mod generate_pdf;

pub use generate_pdf::{
    GeneratePdfCommand, GeneratePdfHandler, GeneratePdfResult, DEFAULT_PDF_CREDIT_COST,
};
