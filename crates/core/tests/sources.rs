use rust_xlsxwriter::Workbook;
use sheetsum_core::{CsvRowSource, SummaryError, SummaryGenerator, ValueCoercer, XlsxRowSource};
use std::io::Write;
use tempfile::tempdir;

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(ToString::to_string).collect()
}

// ===== XLSX end-to-end =====

#[test]
fn test_xlsx_summary_end_to_end() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("report.xlsx");

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    // Title row above the header; the scan must skip past it
    worksheet.write_string(0, 0, "Quarterly report").unwrap();
    worksheet.write_string(1, 0, "amount").unwrap();
    worksheet.write_string(1, 1, "tax").unwrap();
    worksheet.write_number(2, 0, 10.0).unwrap();
    worksheet.write_number(2, 1, 1.25).unwrap();
    worksheet.write_number(3, 0, 20.0).unwrap();
    worksheet.write_number(3, 1, 2.5).unwrap();
    // A malformed row that must be skipped whole
    worksheet.write_string(4, 0, "pending").unwrap();
    worksheet.write_number(4, 1, 99.0).unwrap();
    workbook.save(&path).unwrap();

    let source = XlsxRowSource::open(&path).unwrap();
    let summary = SummaryGenerator::default()
        .generate(&source, &names(&["amount", "tax"]))
        .unwrap();

    assert_eq!(summary[0].column, "amount");
    assert_eq!(summary[0].sum, "30");
    assert_eq!(summary[0].avg, "15");
    assert_eq!(summary[1].column, "tax");
    assert_eq!(summary[1].sum, "3.75");
    assert_eq!(summary[1].avg, "1.875");
}

#[test]
fn test_xlsx_currency_cells() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("prices.xlsx");

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.write_string(0, 0, "price").unwrap();
    worksheet.write_string(1, 0, "$10").unwrap();
    worksheet.write_string(2, 0, "20$").unwrap();
    workbook.save(&path).unwrap();

    let source = XlsxRowSource::open(&path).unwrap();
    let generator = SummaryGenerator::new(ValueCoercer::new(["$"]));
    let summary = generator.generate(&source, &names(&["price"])).unwrap();

    assert_eq!(summary[0].sum, "30");
    assert_eq!(summary[0].avg, "15");
}

#[test]
fn test_xlsx_header_not_found() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("empty.xlsx");

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.write_string(0, 0, "something").unwrap();
    workbook.save(&path).unwrap();

    let source = XlsxRowSource::open(&path).unwrap();
    let err = SummaryGenerator::default()
        .generate(&source, &names(&["amount"]))
        .unwrap_err();

    assert!(matches!(err, SummaryError::HeaderNotFound));
}

#[test]
fn test_xlsx_unreadable_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.xlsx");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(b"not a workbook").unwrap();

    let err = XlsxRowSource::open(&path).unwrap_err();
    assert_eq!(err.to_string(), "Cannot read file");
}

// ===== CSV end-to-end =====

#[test]
fn test_csv_summary_end_to_end() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("report.csv");
    std::fs::write(&path, "amount,tax\n10,1.5\n20,2.5\npending,99\n").unwrap();

    let source = CsvRowSource::open(&path).unwrap();
    let summary = SummaryGenerator::default()
        .generate(&source, &names(&["amount", "tax"]))
        .unwrap();

    assert_eq!(summary[0].sum, "30");
    assert_eq!(summary[1].sum, "4.0");
}

#[test]
fn test_csv_blank_cells_drop_rows() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("gaps.csv");
    std::fs::write(&path, "a,b\n1,\n,2\n3,4\n").unwrap();

    let source = CsvRowSource::open(&path).unwrap();
    let summary = SummaryGenerator::default()
        .generate(&source, &names(&["a", "b"]))
        .unwrap();

    assert_eq!(summary[0].sum, "3");
    assert_eq!(summary[1].sum, "4");
}
