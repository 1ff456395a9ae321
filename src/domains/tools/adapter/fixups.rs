//! Endpoint-specific request fixups.
//!
//! Some Graph resources need transport behavior that method and path alone do
//! not reveal. Each fixup is a predicate plus a transform over an already
//! synthesized request; endpoints matching no predicate pass through untouched.

use tracing::debug;

use crate::domains::catalog::EndpointDescriptor;
use crate::domains::graph::workbook_key;

use super::synthesizer::SynthesizedRequest;

/// Tool-name marker for spreadsheet endpoints.
const WORKBOOK_TOOL_MARKER: &str = "excel";
/// Path fragment of the workbook sub-resource.
const WORKBOOK_PATH_MARKER: &str = "/workbook";
/// Prefix addressing a drive item by path.
const DRIVE_ROOT_MARKER: &str = "/drive/root:";
/// Response description the catalog uses for binary downloads.
const MEDIA_CONTENT_HINT: &str = "media content";
/// Path suffix of drive item content streams.
const CONTENT_STREAM_SUFFIX: &str = "/content";

/// A predicate and the transform it guards.
pub struct Fixup {
    pub name: &'static str,
    pub applies: fn(&EndpointDescriptor, &SynthesizedRequest) -> bool,
    pub apply: fn(&EndpointDescriptor, &mut SynthesizedRequest),
}

/// All fixups, in application order.
pub const FIXUPS: &[Fixup] = &[
    Fixup {
        name: "workbook-session",
        applies: is_workbook_request,
        apply: attach_workbook_path,
    },
    Fixup {
        name: "raw-media",
        applies: is_media_request,
        apply: request_raw_response,
    },
];

/// Run every applicable fixup against `request`.
pub fn apply_fixups(descriptor: &EndpointDescriptor, request: &mut SynthesizedRequest) {
    for fixup in FIXUPS {
        if (fixup.applies)(descriptor, request) {
            debug!("Applying {} fixup to {}", fixup.name, descriptor.name);
            (fixup.apply)(descriptor, request);
        }
    }
}

/// Spreadsheet tool targeting the workbook sub-resource.
pub fn is_workbook_request(descriptor: &EndpointDescriptor, request: &SynthesizedRequest) -> bool {
    descriptor
        .name
        .to_ascii_lowercase()
        .contains(WORKBOOK_TOOL_MARKER)
        && request.path.contains(WORKBOOK_PATH_MARKER)
}

fn attach_workbook_path(_descriptor: &EndpointDescriptor, request: &mut SynthesizedRequest) {
    request.hints.workbook_path = extract_workbook_path(&request.path);
}

/// File path between the drive-root marker and the next colon, percent-decoded.
///
/// `/me/drive/root:/Reports%2FQ1.xlsx:/workbook/worksheets` yields `/Reports/Q1.xlsx`.
pub fn extract_workbook_path(path: &str) -> Option<String> {
    let start = path.find(DRIVE_ROOT_MARKER)? + DRIVE_ROOT_MARKER.len();
    let rest = &path[start..];
    let end = rest.find(':')?;
    let raw = &rest[..end];
    if raw.is_empty() {
        return None;
    }
    Some(workbook_key(raw))
}

/// Endpoint documented as returning media, or a content-stream path.
pub fn is_media_request(descriptor: &EndpointDescriptor, request: &SynthesizedRequest) -> bool {
    descriptor
        .error_hints
        .iter()
        .any(|hint| hint.to_ascii_lowercase().contains(MEDIA_CONTENT_HINT))
        || request.path.ends_with(CONTENT_STREAM_SUFFIX)
}

fn request_raw_response(_descriptor: &EndpointDescriptor, request: &mut SynthesizedRequest) {
    request.hints.raw_response = true;
}
