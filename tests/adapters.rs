use calamine::{open_workbook_from_rs, Data, Reader, Xlsx};
use invoice_erp_recon::adapter::{
    decode_text, export_to_csv, parse_erp_csv, read_erp_file, read_invoice_file,
    read_invoice_xlsx_bytes, write_report, write_report_to_buffer,
};
use invoice_erp_recon::config::ErpSourceConfig;
use invoice_erp_recon::service::ReportSheet;
use invoice_erp_recon::{reconcile, AdapterError, Cell, ReconcileError, Table};
use rust_xlsxwriter::Workbook;
use std::io::Cursor;

const ERP_CSV: &str = "Codean;Codpro;Nompro;Valuni\n\
123;W1;Widget ERP;4.50\n\
456; G1 ;Gadget ERP;2\n\
777;;Sin SKU;1\n";

fn invoice_xlsx() -> Vec<u8> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    let headers = ["Codigo de barras", "Nombre producto", "Cantidad", "Precio unitario"];
    for (c, h) in headers.iter().enumerate() {
        sheet.write_string(0, c as u16, *h).unwrap();
    }
    sheet.write_number(1, 0, 123).unwrap();
    sheet.write_string(1, 1, "Widget").unwrap();
    sheet.write_number(1, 2, 10).unwrap();
    sheet.write_number(1, 3, 5.0).unwrap();

    sheet.write_string(2, 0, "456").unwrap();
    sheet.write_string(2, 1, "Gadget").unwrap();
    sheet.write_number(2, 2, 3).unwrap();
    sheet.write_number(2, 3, 2.0).unwrap();

    sheet.write_string(4, 0, "888").unwrap();
    sheet.write_string(4, 1, "Nuevo").unwrap();
    sheet.write_number(4, 2, 1).unwrap();
    sheet.write_number(4, 3, 9.5).unwrap();
    workbook.save_to_buffer().unwrap()
}

#[test]
fn invoice_reader_maps_cells_and_skips_blank_rows() {
    let table = read_invoice_xlsx_bytes(&invoice_xlsx()).unwrap();
    assert_eq!(table.headers[0], "Codigo de barras");
    assert_eq!(table.len(), 3);
    assert_eq!(table.cell(0, 0).to_text(), "123");
    assert_eq!(table.cell(0, 1), &Cell::text("Widget"));
    assert_eq!(table.cell(2, 0).to_text(), "888");
}

#[test]
fn invoice_reader_from_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("factura.xlsx");
    std::fs::write(&path, invoice_xlsx()).unwrap();

    let table = read_invoice_file(&path).unwrap();
    assert_eq!(table.len(), 3);
}

#[test]
fn invoice_reader_rejects_non_excel_bytes() {
    let err = read_invoice_xlsx_bytes(b"not a workbook").unwrap_err();
    assert!(matches!(err, AdapterError::Excel(_)));
}

#[test]
fn erp_reader_keeps_raw_text() {
    let table = parse_erp_csv(ERP_CSV.as_bytes(), &ErpSourceConfig::default()).unwrap();
    assert_eq!(table.headers, vec!["Codean", "Codpro", "Nompro", "Valuni"]);
    assert_eq!(table.len(), 3);
    assert_eq!(table.cell(1, 1), &Cell::text(" G1 "));
    assert_eq!(table.cell(2, 1), &Cell::Empty);
}

#[test]
fn erp_reader_rejects_non_ascii_delimiter() {
    let source = ErpSourceConfig {
        delimiter: '§',
        ..ErpSourceConfig::default()
    };
    let err = parse_erp_csv(ERP_CSV.as_bytes(), &source).unwrap_err();
    assert!(matches!(err, AdapterError::InvalidDelimiter('§')));

    let tabbed = ErpSourceConfig {
        delimiter: '\t',
        ..ErpSourceConfig::default()
    };
    let table = parse_erp_csv(b"Codean\tCodpro\tNompro\tValuni\n123\tW1\tWidget\t4.50\n", &tabbed).unwrap();
    assert_eq!(table.cell(0, 1), &Cell::text("W1"));
}

#[test]
fn erp_reader_decodes_latin1() {
    let mut bytes = b"Codean;Codpro;Nompro;Valuni\n123;W1;Caf".to_vec();
    bytes.push(0xE9); // 'é' en latin1
    bytes.extend_from_slice(b";4.50\n");

    let table = parse_erp_csv(&bytes, &ErpSourceConfig::default()).unwrap();
    assert_eq!(table.cell(0, 2).to_text(), "Café");
}

#[test]
fn decode_prefers_utf8_and_strips_bom() {
    let text = decode_text("\u{feff}Codean;Café".as_bytes(), "latin1").unwrap();
    assert_eq!(text, "Codean;Café");

    let err = decode_text(&[0xff, 0xfe, 0x00], "no-such-encoding").unwrap_err();
    assert!(matches!(err, AdapterError::UnknownEncoding(_)));
}

#[test]
fn scientific_notation_survives_the_reader() {
    let csv = "Codean;Codpro;Nompro;Valuni\n9,42022E+12;W1;Widget;4.5\n";
    let erp = parse_erp_csv(csv.as_bytes(), &ErpSourceConfig::default()).unwrap();
    let invoice = read_invoice_xlsx_bytes(&invoice_xlsx()).unwrap();

    let err = reconcile(&invoice, &erp).unwrap_err();
    assert!(matches!(err, ReconcileError::EncodingCorruption { .. }));
}

#[test]
fn files_to_three_sheet_report() {
    let dir = tempfile::tempdir().unwrap();
    let erp_path = dir.path().join("tbc.csv");
    std::fs::write(&erp_path, ERP_CSV).unwrap();

    let invoice = read_invoice_xlsx_bytes(&invoice_xlsx()).unwrap();
    let erp = read_erp_file(&erp_path, &ErpSourceConfig::default()).unwrap();
    let result = reconcile(&invoice, &erp).unwrap();
    assert_eq!(result.stats.price_changes, 1);
    assert_eq!(result.stats.new_products, 1);
    assert_eq!(result.stats.unchanged, 1);

    let bytes = write_report_to_buffer(&result).unwrap();
    let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes)).unwrap();
    assert_eq!(
        workbook.sheet_names(),
        vec!["Cambios de Precio", "Productos Nuevos", "Resumen Completo"]
    );

    let changes = workbook.worksheet_range("Cambios de Precio").unwrap();
    let header: Vec<String> = changes.rows().next().unwrap().iter().map(|c| c.to_string()).collect();
    assert_eq!(header, ReportSheet::PriceChanges.headers());
    assert_eq!(changes.get_size(), (2, 7));
    assert_eq!(changes.get((1, 0)), Some(&Data::String("123".into())));
    assert_eq!(changes.get((1, 5)), Some(&Data::Float(0.5)));

    let summary = workbook.worksheet_range("Resumen Completo").unwrap();
    assert_eq!(summary.get_size(), (4, 8));
    assert_eq!(summary.get((3, 7)), Some(&Data::String("Nuevo".into())));

    let out = dir.path().join("Reporte.xlsx");
    write_report(&result, &out).unwrap();
    assert!(out.metadata().unwrap().len() > 0);
}

#[test]
fn csv_export_writes_header_and_rows() {
    let invoice = read_invoice_xlsx_bytes(&invoice_xlsx()).unwrap();
    let erp = parse_erp_csv(ERP_CSV.as_bytes(), &ErpSourceConfig::default()).unwrap();
    let result = reconcile(&invoice, &erp).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nuevos.csv");
    export_to_csv(&result, ReportSheet::NewProducts, &path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "Codigo de barras,Nombre producto,Cantidad,Precio unitario");
    assert_eq!(lines[1], "888,Nuevo,1,9.5");
    assert_eq!(lines.len(), 2);
}

#[test]
fn report_numbers_keep_their_decimal_value() {
    let mut invoice = Table::new(
        ["Codigo de barras", "Nombre producto", "Cantidad", "Precio unitario"]
            .iter()
            .map(|s| s.to_string())
            .collect(),
    );
    invoice.push_row(vec![Cell::text("100"), Cell::text("Tornillo"), Cell::Int(1), Cell::text("0.3")]);
    invoice.push_row(vec![Cell::text("200"), Cell::text("Tuerca"), Cell::Int(1), Cell::text("1.2")]);
    let erp = parse_erp_csv(
        "Codean;Codpro;Nompro;Valuni\n200;T1;Tuerca ERP;0.9\n".as_bytes(),
        &ErpSourceConfig::default(),
    )
    .unwrap();
    let result = reconcile(&invoice, &erp).unwrap();

    let bytes = write_report_to_buffer(&result).unwrap();
    let mut workbook: Xlsx<_> = open_workbook_from_rs(Cursor::new(bytes)).unwrap();

    let new_products = workbook.worksheet_range("Productos Nuevos").unwrap();
    assert_eq!(new_products.get((1, 3)), Some(&Data::Float(0.3)));

    let changes = workbook.worksheet_range("Cambios de Precio").unwrap();
    assert_eq!(changes.get((1, 5)), Some(&Data::Float(0.3)));
}
