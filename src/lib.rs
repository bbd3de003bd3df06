/*!
# Roster Filter

A small web service that turns a misaligned student-roster CSV export into a
clean four-column "Student / Grade / Photo Release / Parent Pickup" download.

## Overview

School-management exports arrive with their data shifted out from under their
headers: student names under "Mobile Phone", grades under "Gender", and so
on. The service accepts one such export per request, decodes it through an
encoding fallback chain, remaps the four interesting columns through an
explicit named mapping, and returns either a filtered CSV or a two-sheet
XLSX workbook (filtered view plus the untouched original for
cross-reference).

## Architecture

The service is a single axum application with one processing endpoint. Each
request is independent: the upload lives only for the duration of the
request, and the rendered artifact is staged through a temp file that is
removed before the response completes.

Pipeline per request: Received → Decoded → Extracted → Rendered → Returned.
Any fault collapses into a `ProcessError`, rendered as a JSON error body.

## Modules

- **encoding**: encoding fallback chain (utf-8-sig, utf-8, latin-1, lossy)
- **columns**: the named column mapping — header rules with positional fallback
- **roster**: parsed upload and four-column extraction
- **render**: CSV and two-sheet XLSX artifact rendering, temp-file spooling
- **error**: error taxonomy and HTTP mapping
- **app**: routing, handlers and the server loop

## REST API Endpoints

- `GET /health` - Liveness check
- `POST /process-csv` - Multipart upload (`file` field), returns the download
- `GET /` - Static upload page
*/

pub mod app;
pub mod columns;
pub mod encoding;
pub mod error;
pub mod render;
pub mod roster;

/// Re-export everything from these modules to make it easier to use
pub use columns::*;
pub use encoding::*;
pub use error::*;
pub use render::*;
pub use roster::*;
