//! Hand-authored tool definitions.
//!
//! These tools call the Graph transport with fixed request shapes instead of
//! going through the catalog adapter. Each tool is defined in its own file.

pub mod common;
pub mod create_empty_file;
pub mod excel_access;
pub mod upload_content;

pub use create_empty_file::{CreateEmptyFileParams, CreateEmptyFileTool};
pub use excel_access::{ExcelAccessParams, ExcelAccessTool};
pub use upload_content::{UploadContentParams, UploadContentTool};
