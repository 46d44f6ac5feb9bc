// ==========================================
// VDC 运营看板 - 导入层
// ==========================================
// 职责: 表格字节 → 工作簿 → 领域实体 → 预览快照
// 支持: Excel (.xlsx), CSV
// ==========================================

// 模块声明
pub mod error;
pub mod field_resolver;
pub mod file_parser;
pub mod normalizer;
pub mod parsers;
pub mod pipeline;
pub mod sheet_locator;

// 重导出核心类型
pub use error::{ImportError, ImportResult};
pub use field_resolver::{resolve, resolve_with_tier, FieldMatch, MatchTier};
pub use file_parser::{CsvDecoder, UniversalDecoder, WorkbookDecoder, XlsxDecoder};
pub use normalizer::{parse_currency, parse_date, parse_integer, parse_text};
pub use parsers::{FieldBinding, ParseOutcome};
pub use pipeline::{
    EntityKind, ImportDiagnostics, ImportPreview, ImportWarning, SheetDiagnostics,
    WorkbookImporter,
};
pub use sheet_locator::{locate, locate_with_tier, SheetMatch};
