pub mod operation_result;
pub mod status_document;
