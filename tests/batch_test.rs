//! End-to-end tests over generated PDF files.

use std::fs;
use std::path::Path;

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use tempfile::TempDir;

use pdfoutline::batch::{discover_inputs, BatchEvent, BatchOptions};
use pdfoutline::{
    run_batch, DocumentOutline, Error, HeadingLevel, JsonFormat, LayoutOptions, OutlineExtractor,
};

/// A line of text: content, font size, baseline.
type Line<'a> = (&'a str, f32, f32);

/// Page contents; `None` writes a page whose content stream is unreadable.
type PageContent<'a> = Option<Vec<Line<'a>>>;

fn write_pdf(path: &Path, pages: &[PageContent]) {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for page in pages {
        let contents: Object = match page {
            Some(lines) => {
                let mut operations = Vec::new();
                for (text, size, y) in lines {
                    operations.push(Operation::new("BT", vec![]));
                    operations.push(Operation::new("Tf", vec!["F1".into(), (*size).into()]));
                    operations.push(Operation::new("Td", vec![72.into(), (*y).into()]));
                    operations.push(Operation::new("Tj", vec![Object::string_literal(*text)]));
                    operations.push(Operation::new("ET", vec![]));
                }
                let content = Content { operations };
                let stream = Stream::new(dictionary! {}, content.encode().unwrap());
                doc.add_object(stream).into()
            }
            None => Object::Integer(7),
        };
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => contents,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.save(path).unwrap();
}

fn annual_report_pages() -> Vec<PageContent<'static>> {
    vec![
        Some(vec![
            ("Annual Report", 24.0, 760.0),
            ("Overview", 24.0, 720.0),
            ("Page 1", 10.0, 40.0),
        ]),
        Some(vec![
            ("1. Introduction", 18.0, 760.0),
            ("This is body text that runs long enough to matter here.", 11.0, 730.0),
        ]),
    ]
}

fn read_outline(path: &Path) -> DocumentOutline {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn test_extract_generated_pdf() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("report.pdf");
    write_pdf(&path, &annual_report_pages());

    let outline = pdfoutline::extract_outline(&path).unwrap();

    assert_eq!(outline.title, "Annual Report Overview");
    let entries: Vec<_> = outline
        .outline
        .iter()
        .map(|h| (h.level, h.text.as_str(), h.page))
        .collect();
    assert_eq!(
        entries,
        vec![
            (HeadingLevel::H1, "Annual Report", 0),
            (HeadingLevel::H1, "Overview", 0),
            (HeadingLevel::H1, "1. Introduction", 1),
        ]
    );
}

#[test]
fn test_extract_bytes_matches_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("report.pdf");
    write_pdf(&path, &annual_report_pages());

    let from_file = pdfoutline::extract_outline(&path).unwrap();
    let from_bytes = pdfoutline::extract_outline_bytes(&fs::read(&path).unwrap()).unwrap();
    assert_eq!(from_file, from_bytes);
}

#[test]
fn test_unreadable_page_strict_and_lenient() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("damaged.pdf");
    write_pdf(
        &path,
        &[
            Some(vec![("Field Manual", 22.0, 760.0)]),
            None,
            Some(vec![("2. Operations", 18.0, 760.0)]),
        ],
    );

    let strict = OutlineExtractor::new()
        .with_layout_options(LayoutOptions::new())
        .extract_file(&path);
    assert!(matches!(strict, Err(Error::TextExtract { page: 1, .. })));

    let lenient = OutlineExtractor::new().lenient().extract_file(&path).unwrap();
    let last = lenient.outline.last().unwrap();
    assert_eq!(last.text, "2. Operations");
    assert_eq!(last.page, 2);
}

#[test]
fn test_blank_document() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("blank.pdf");
    write_pdf(&path, &[Some(vec![])]);

    let outline = pdfoutline::extract_outline(&path).unwrap();
    assert_eq!(outline, DocumentOutline::default());
}

#[test]
fn test_batch_writes_one_json_per_pdf() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    let out_dir = output.path().join("outlines");

    write_pdf(&input.path().join("report.pdf"), &annual_report_pages());
    write_pdf(
        &input.path().join("memo.PDF"),
        &[Some(vec![("Staff Memo", 20.0, 760.0)])],
    );
    fs::write(input.path().join("junk.pdf"), b"this is not a pdf").unwrap();
    fs::write(input.path().join("notes.txt"), b"ignored").unwrap();

    assert_eq!(discover_inputs(input.path()).unwrap().len(), 3);

    let (tx, rx) = crossbeam_channel::unbounded();
    let report = run_batch(input.path(), &out_dir, &BatchOptions::default(), Some(&tx)).unwrap();
    drop(tx);

    assert_eq!(report.total(), 3);
    assert_eq!(report.processed.len(), 2);
    assert_eq!(report.failed.len(), 1);
    assert!(report.failed[0].input.ends_with("junk.pdf"));

    // Input order: junk, memo, report
    assert!(report.processed[0].output.ends_with("memo.json"));
    assert!(report.processed[1].output.ends_with("report.json"));
    assert_eq!(report.processed[1].headings, 3);

    let report_outline = read_outline(&out_dir.join("report.json"));
    assert_eq!(report_outline.title, "Annual Report Overview");
    assert_eq!(report_outline.outline.len(), 3);

    let memo_outline = read_outline(&out_dir.join("memo.json"));
    assert_eq!(memo_outline.title, "");
    assert_eq!(memo_outline.outline[0].text, "Staff Memo");

    assert!(!out_dir.join("junk.json").exists());
    assert!(!out_dir.join("notes.json").exists());

    let events: Vec<_> = rx.iter().collect();
    assert_eq!(events.len(), 4);
    assert!(matches!(events[0], BatchEvent::Started { total: 3 }));
    let failures = events
        .iter()
        .filter(|e| matches!(e, BatchEvent::Failed(_)))
        .count();
    assert_eq!(failures, 1);
}

#[test]
fn test_batch_same_stem_writes_first_input_only() {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();

    write_pdf(
        &input.path().join("a.PDF"),
        &[Some(vec![("Upper Case Edition", 20.0, 760.0)])],
    );
    write_pdf(
        &input.path().join("a.pdf"),
        &[Some(vec![("Lower Case Edition", 20.0, 760.0)])],
    );

    let (tx, rx) = crossbeam_channel::unbounded();
    let report = run_batch(input.path(), output.path(), &BatchOptions::default(), Some(&tx)).unwrap();
    drop(tx);

    assert_eq!(report.total(), 2);
    assert_eq!(report.processed.len(), 1);
    assert!(report.processed[0].input.ends_with("a.PDF"));
    assert_eq!(report.failed.len(), 1);
    assert!(report.failed[0].input.ends_with("a.pdf"));

    let written = read_outline(&output.path().join("a.json"));
    assert_eq!(written.outline[0].text, "Upper Case Edition");
    assert_eq!(fs::read_dir(output.path()).unwrap().count(), 1);

    let failures = rx
        .iter()
        .filter(|e| matches!(e, BatchEvent::Failed(_)))
        .count();
    assert_eq!(failures, 1);
}

#[test]
fn test_sequential_batch_matches_parallel() {
    let input = TempDir::new().unwrap();
    let parallel_out = TempDir::new().unwrap();
    let sequential_out = TempDir::new().unwrap();

    for i in 0..4 {
        write_pdf(
            &input.path().join(format!("doc{}.pdf", i)),
            &[
                Some(vec![("Cover Title Sheet", 26.0, 760.0)]),
                Some(vec![("1. Background", 18.0, 760.0), ("1.1 History", 15.0, 700.0)]),
            ],
        );
    }

    let options = BatchOptions::new().with_json_format(JsonFormat::Compact);
    let parallel = run_batch(input.path(), parallel_out.path(), &options, None).unwrap();
    let sequential =
        run_batch(input.path(), sequential_out.path(), &options.clone().sequential(), None).unwrap();

    assert_eq!(parallel.processed.len(), 4);
    assert_eq!(sequential.processed.len(), 4);
    for i in 0..4 {
        let name = format!("doc{}.json", i);
        let a = fs::read_to_string(parallel_out.path().join(&name)).unwrap();
        let b = fs::read_to_string(sequential_out.path().join(&name)).unwrap();
        assert_eq!(a, b);
        assert!(!a.contains('\n'));
    }
}
