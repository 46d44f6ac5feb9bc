// ==========================================
// VDC 运营看板 - 表格解码器
// ==========================================
// 职责: 文件字节 → 工作簿（工作表名 → 有序行记录）
// 支持: Excel (.xlsx) / CSV (.csv)
// 说明: 解码是导入流程中唯一的异步挂起点
// ==========================================

use crate::domain::raw::{CellValue, RawRow, Sheet, Workbook};
use crate::importer::error::{ImportError, ImportResult};
use async_trait::async_trait;
use calamine::{Data, Reader, Xlsx};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::io::Cursor;
use tracing::{debug, instrument};

/// 空表头占位名
pub const EMPTY_HEADER: &str = "__EMPTY";

// ==========================================
// WorkbookDecoder Trait
// ==========================================
// 实现者: XlsxDecoder, CsvDecoder, UniversalDecoder
#[async_trait]
pub trait WorkbookDecoder: Send + Sync {
    /// 解码文件字节
    ///
    /// # 返回
    /// - Ok(Workbook): 工作表按文件内顺序排列，每表首行为表头
    /// - Err: 文件损坏/格式不支持（整批失败）
    async fn decode(&self, bytes: &[u8]) -> ImportResult<Workbook>;
}

// ==========================================
// 表头消歧: 重复列名追加位置后缀（Type, Type_1, Type_2 ...）
// ==========================================
pub fn disambiguate_headers(raw: &[String]) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    raw.iter()
        .map(|h| {
            let base = if h.trim().is_empty() {
                EMPTY_HEADER.to_string()
            } else {
                h.trim().to_string()
            };
            let count = seen.entry(base.clone()).or_insert(0);
            let name = if *count == 0 {
                base.clone()
            } else {
                format!("{}_{}", base, count)
            };
            *count += 1;
            name
        })
        .collect()
}

// ==========================================
// Excel 解码器
// ==========================================
pub struct XlsxDecoder;

#[async_trait]
impl WorkbookDecoder for XlsxDecoder {
    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    async fn decode(&self, bytes: &[u8]) -> ImportResult<Workbook> {
        let owned = bytes.to_vec();
        tokio::task::spawn_blocking(move || decode_xlsx(owned))
            .await
            .map_err(|e| ImportError::InternalError(format!("解码任务中断: {}", e)))?
    }
}

/// 同步解码 .xlsx 字节
pub fn decode_xlsx(bytes: Vec<u8>) -> ImportResult<Workbook> {
    let mut workbook: Xlsx<_> = Xlsx::new(Cursor::new(bytes))?;

    let sheet_names = workbook.sheet_names();
    if sheet_names.is_empty() {
        return Err(ImportError::EmptyWorkbook("Excel 文件无工作表".to_string()));
    }

    let mut result = Workbook::new();
    for sheet_name in sheet_names {
        let range = workbook.worksheet_range(&sheet_name)?;

        let mut rows = range.rows();
        let headers = match rows.next() {
            Some(header_row) => disambiguate_headers(
                &header_row.iter().map(|c| c.to_string()).collect::<Vec<_>>(),
            ),
            None => {
                // 空工作表保留表名，便于定位与告警
                result.sheets.push(Sheet::new(sheet_name, Vec::new()));
                continue;
            }
        };

        let mut records = Vec::new();
        for data_row in rows {
            let mut row = RawRow::new();
            for (col_idx, cell) in data_row.iter().enumerate() {
                if let Some(header) = headers.get(col_idx) {
                    row.insert(header.clone(), cell_value(cell));
                }
            }

            // 跳过完全空白的行
            if row.is_blank() {
                continue;
            }
            records.push(row);
        }

        debug!(sheet = %sheet_name, rows = records.len(), "工作表解码完成");
        result.sheets.push(Sheet::new(sheet_name, records));
    }

    Ok(result)
}

// calamine 单元格 → CellValue（日期保留为序列号，交给规范化函数）
fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::text(s.clone()),
        Data::Float(n) => CellValue::Number(*n),
        Data::Int(n) => CellValue::Number(*n as f64),
        Data::Bool(b) => CellValue::Text(if *b { "TRUE" } else { "FALSE" }.to_string()),
        Data::DateTime(dt) => CellValue::Number(dt.as_f64()),
        Data::DateTimeIso(s) => CellValue::text(s.clone()),
        Data::DurationIso(s) => CellValue::text(s.clone()),
        Data::Error(_) => CellValue::Empty,
    }
}

// ==========================================
// CSV 解码器（单表，表名由调用方指定）
// ==========================================
pub struct CsvDecoder {
    sheet_name: String,
}

impl CsvDecoder {
    pub fn new(sheet_name: impl Into<String>) -> Self {
        Self {
            sheet_name: sheet_name.into(),
        }
    }
}

#[async_trait]
impl WorkbookDecoder for CsvDecoder {
    async fn decode(&self, bytes: &[u8]) -> ImportResult<Workbook> {
        decode_csv(bytes, &self.sheet_name)
    }
}

/// 同步解码 CSV 字节
pub fn decode_csv(bytes: &[u8], sheet_name: &str) -> ImportResult<Workbook> {
    let text = std::str::from_utf8(bytes)
        .map_err(|e| ImportError::CsvParseError(format!("非 UTF-8 编码: {}", e)))?;
    let text = text.trim_start_matches('\u{feff}');

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true) // 允许行长度不一致
        .from_reader(text.as_bytes());

    let raw_headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();
    if raw_headers.iter().all(|h| h.trim().is_empty()) {
        return Err(ImportError::EmptyWorkbook("CSV 文件无表头".to_string()));
    }
    let headers = disambiguate_headers(&raw_headers);

    let mut records = Vec::new();
    for result in reader.records() {
        let record = result?;
        let mut row = RawRow::new();
        for (col_idx, value) in record.iter().enumerate() {
            if let Some(header) = headers.get(col_idx) {
                row.insert(header.clone(), CellValue::text(value.trim()));
            }
        }

        if row.is_blank() {
            continue;
        }
        records.push(row);
    }

    Ok(Workbook::new().with_sheet(sheet_name, records))
}

// ==========================================
// 通用解码器（按文件签名自动选择）
// ==========================================
pub struct UniversalDecoder {
    csv_sheet_name: String,
}

impl UniversalDecoder {
    /// csv_sheet_name: CSV 文件解码后的表名（用于表定位）
    pub fn new(csv_sheet_name: impl Into<String>) -> Self {
        Self {
            csv_sheet_name: csv_sheet_name.into(),
        }
    }
}

impl Default for UniversalDecoder {
    fn default() -> Self {
        Self::new("Orders_Tracking")
    }
}

/// ZIP 容器签名（.xlsx）
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";
/// OLE2 容器签名（旧版 .xls）
const OLE_MAGIC: &[u8] = &[0xD0, 0xCF, 0x11, 0xE0];

#[async_trait]
impl WorkbookDecoder for UniversalDecoder {
    async fn decode(&self, bytes: &[u8]) -> ImportResult<Workbook> {
        if bytes.is_empty() {
            return Err(ImportError::EmptyWorkbook("文件无内容".to_string()));
        }
        if bytes.starts_with(ZIP_MAGIC) {
            return XlsxDecoder.decode(bytes).await;
        }
        if bytes.starts_with(OLE_MAGIC) {
            return Err(ImportError::UnsupportedFormat("xls".to_string()));
        }
        decode_csv(bytes, &self.csv_sheet_name)
    }
}
