//! Knowledge base tools.
//!
//! Every tool is a thin pass-through to one backend endpoint:
//!
//! | Tool | Backend request |
//! |------|-----------------|
//! | `create_document` | `POST /documents/` (JSON body) |
//! | `search_documents` | `POST /documents/search/` (JSON body) |
//! | `get_document` | `GET /documents/{document_id}` |
//! | `list_documents` | `GET /documents/?skip=&limit=&tag=&category=` |
//! | `get_stats` | `GET /documents/stats/overview` |
//! | `delete_document` | `DELETE /documents/{document_id}` |
//!
//! Arguments are checked against the tool's [`Schema`] before anything is
//! sent. The backend's JSON body is returned as text whatever its status.

pub mod registry;
pub mod result;
pub mod schema;
pub mod translate;

pub use registry::{document_tools, Route, ToolDefinition, ToolRegistry, ToolSpec};
pub use result::{ToolCallResult, ToolContent};
pub use schema::{FieldSpec, FieldType, Schema};
