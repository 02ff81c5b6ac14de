pub mod csv_export;
pub mod erp_reader;
pub mod invoice_reader;
pub mod xlsx_report;

pub use csv_export::{export_to_csv, write_sheet_csv};
pub use erp_reader::{decode_text, parse_erp_csv, read_erp_file};
pub use invoice_reader::{read_invoice_file, read_invoice_xlsx_bytes};
pub use xlsx_report::{write_report, write_report_to_buffer, REPORT_FILE_NAME, XLSX_CONTENT_TYPE};
