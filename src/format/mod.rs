// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Logichart-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Logichart and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.


//! Portable document formats.
//!
//! `.lcp` project documents are JSON records whose edges embed full snapshots of their endpoint
//! nodes. Loading resolves those snapshots back to the canonical nodes by id.

pub mod document;

pub use document::{
    export_file, from_document, import_file, parse_document_str, to_document, to_json_string,
    DanglingReferenceWarning, Document, EdgeEnd, EdgeJson, ExportError, ImportFormatError,
    LoadReport, LoadWarning, NodeJson, TextJson, DOCUMENT_VERSION, PROJECT_FILE_EXTENSION,
};
