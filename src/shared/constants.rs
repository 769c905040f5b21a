/// Default page number for list endpoints
pub const DEFAULT_PAGE: i64 = 1;

/// Default page size for list endpoints
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Largest page a client may request
pub const MAX_PAGE_SIZE: i64 = 1000;

/// Content type of exported workbooks
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Multipart field carrying the spreadsheet on import
pub const IMPORT_FIELD: &str = "file_import";

/// Sheet name written on export
pub const EXPORT_SHEET: &str = "Sheet1";

// =============================================================================
// RESPONSE MESSAGES
// =============================================================================

pub const MSG_GET_OK: &str = "Get data successfully";
pub const MSG_INSERT_OK: &str = "Insert data successful";
pub const MSG_IMPORT_OK: &str = "Data import was successful";
pub const MSG_UPDATE_OK: &str = "Data update successful";
pub const MSG_DELETE_OK: &str = "Data deletion successful";
pub const MSG_RESTORE_OK: &str = "Data restore successful";
pub const MSG_DUPLICATE: &str = "Data already exists";
pub const MSG_ROUTE_NOT_FOUND: &str = "The requested route does not exist.";
