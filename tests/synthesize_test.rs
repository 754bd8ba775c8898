//! Integration tests for end-to-end synthesis.

use plainpdf::layout::wrap_text;
use plainpdf::{
    extract_lines, inspect, synthesize, synthesize_with_options, write_file, Error,
    LayoutOptions, Metadata, SynthesizeOptions, Synthesizer, TextEncoding, WriteOptions,
};

fn find_all(haystack: &[u8], needle: &[u8]) -> Vec<usize> {
    haystack
        .windows(needle.len())
        .enumerate()
        .filter(|(_, w)| *w == needle)
        .map(|(i, _)| i)
        .collect()
}

fn numbered_lines(n: usize) -> String {
    (1..=n)
        .map(|i| format!("line {:03}", i))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Parse the xref table directly and return the offset of objects 1..=N.
fn xref_offsets(pdf: &[u8]) -> Vec<usize> {
    let startxref = *find_all(pdf, b"startxref\n").last().unwrap();
    let tail = std::str::from_utf8(&pdf[startxref + b"startxref\n".len()..]).unwrap();
    let xref_at: usize = tail.lines().next().unwrap().parse().unwrap();

    let table = std::str::from_utf8(&pdf[xref_at..startxref]).unwrap();
    let mut lines = table.lines();
    assert_eq!(lines.next(), Some("xref"));
    let count: usize = lines
        .next()
        .unwrap()
        .split_whitespace()
        .nth(1)
        .unwrap()
        .parse()
        .unwrap();
    lines
        .take(count)
        .skip(1)
        .map(|entry| entry[..10].parse().unwrap())
        .collect()
}

#[test]
fn test_empty_text_is_one_blank_page() {
    let pdf = synthesize("").unwrap();
    let report = inspect(&pdf).unwrap();

    assert_eq!(report.page_count, 1);
    assert_eq!(report.object_count, 5);
    assert_eq!(extract_lines(&pdf).unwrap(), vec![vec![" ".to_string()]]);
}

#[test]
fn test_55_lines_fit_one_page() {
    let pdf = synthesize(&numbered_lines(55)).unwrap();
    assert_eq!(inspect(&pdf).unwrap().page_count, 1);
}

#[test]
fn test_56_lines_spill_one_line() {
    let pdf = synthesize(&numbered_lines(56)).unwrap();
    let pages = extract_lines(&pdf).unwrap();

    assert_eq!(inspect(&pdf).unwrap().page_count, 2);
    assert_eq!(pages[0].len(), 55);
    assert_eq!(pages[1], vec!["line 056".to_string()]);
}

#[test]
fn test_page_count_matches_wrapped_lines() {
    let samples = [
        "short".to_string(),
        "x".repeat(230),
        format!("{}\n\n{}", "a".repeat(500), numbered_lines(120)),
        "\n".repeat(200),
    ];

    for text in &samples {
        let wrapped = wrap_text(text, 110).len();
        let expected = wrapped.div_ceil(55).max(1) as u32;
        let pdf = synthesize(text).unwrap();
        assert_eq!(inspect(&pdf).unwrap().page_count, expected, "text len {}", text.len());
    }
}

#[test]
fn test_xref_offsets_point_at_object_markers() {
    let text = "Résumé → naïve café\n日本語のテキスト\n(parens) and \\backslash\\\n".repeat(40);
    let pdf = synthesize(&text).unwrap();

    let offsets = xref_offsets(&pdf);
    assert!(!offsets.is_empty());
    for (index, offset) in offsets.iter().enumerate() {
        let marker = format!("{} 0 obj", index + 1);
        assert!(
            pdf[*offset..].starts_with(marker.as_bytes()),
            "object {} offset {} is wrong",
            index + 1,
            offset
        );
    }
}

#[test]
fn test_stream_length_counts_bytes() {
    let pdf = synthesize("ü€漢").unwrap();
    let text = String::from_utf8_lossy(&pdf);

    let content = "BT\n/F1 8 Tf\n13 TL\n40 750 Td\n(ü€漢) Tj\nET";
    assert!(text.contains(&format!(
        "<< /Length {} >>\nstream\n{}\nendstream",
        content.len(),
        content
    )));
    assert_ne!(content.len(), content.chars().count());
}

#[test]
fn test_escape_round_trip_through_document() {
    let text = "f(x) = (a + b)\nC:\\temp\\(draft)\n\\\\server\\share)(";
    let pdf = synthesize(text).unwrap();
    let pages = extract_lines(&pdf).unwrap();

    assert_eq!(pages.len(), 1);
    assert_eq!(pages[0], wrap_text(text, 110));
}

#[test]
fn test_long_line_wraps_into_segments() {
    let line: String = ('a'..='z').cycle().take(230).collect();
    let pdf = synthesize(&line).unwrap();
    let pages = extract_lines(&pdf).unwrap();

    let lengths: Vec<usize> = pages[0].iter().map(|l| l.chars().count()).collect();
    assert_eq!(lengths, vec![110, 110, 10]);
    assert_eq!(pages[0].concat(), line);
}

#[test]
fn test_blank_lines_keep_their_slot() {
    let pdf = synthesize("top\n\n   \nbottom").unwrap();
    let pages = extract_lines(&pdf).unwrap();
    assert_eq!(pages[0], vec!["top", " ", " ", "bottom"]);
}

#[test]
fn test_deterministic_output() {
    let text = numbered_lines(300);
    assert_eq!(synthesize(&text).unwrap(), synthesize(&text).unwrap());

    let options = SynthesizeOptions::new()
        .with_write_options(WriteOptions::new().with_compression(true));
    assert_eq!(
        synthesize_with_options(&text, &options).unwrap(),
        synthesize_with_options(&text, &options).unwrap()
    );
}

#[test]
fn test_page_tree_lists_pages_in_order() {
    let pdf = synthesize(&numbered_lines(56 + 55)).unwrap();
    let text = String::from_utf8_lossy(&pdf);
    assert!(text.contains("/Kids [5 0 R 7 0 R 9 0 R] /Count 3"));
    assert_eq!(find_all(&pdf, b"/Type /Page ").len(), 3);
}

#[test]
fn test_compressed_document() {
    let text = numbered_lines(80);
    let pdf = Synthesizer::new().compressed().synthesize(&text).unwrap();
    let report = inspect(&pdf).unwrap();

    assert!(report.compressed);
    assert_eq!(report.page_count, 2);
    assert_eq!(extract_lines(&pdf).unwrap().concat(), wrap_text(&text, 110));
    assert!(pdf.len() < synthesize(&text).unwrap().len());
}

#[test]
fn test_metadata_adds_info_dictionary() {
    let metadata = Metadata {
        title: Some("Curriculum Vitae".to_string()),
        author: Some("Jane Doe".to_string()),
        ..Default::default()
    };
    let pdf = Synthesizer::new()
        .with_metadata(metadata)
        .synthesize("body")
        .unwrap();
    let report = inspect(&pdf).unwrap();

    assert_eq!(report.info, Some(6));
    assert_eq!(report.object_count, 6);
    let text = String::from_utf8_lossy(&pdf);
    assert!(text.contains("/Title (Curriculum Vitae)"));
    assert!(text.contains("/Info 6 0 R"));
}

#[test]
fn test_win_ansi_encoding() {
    let pdf = Synthesizer::new()
        .with_encoding(TextEncoding::WinAnsi)
        .synthesize("café")
        .unwrap();

    assert!(inspect(&pdf).is_ok());
    assert!(find_all(&pdf, b"(caf\xE9) Tj").len() == 1);
    assert_eq!(find_all(&pdf, b"/Encoding /WinAnsiEncoding").len(), 1);
}

#[test]
fn test_win_ansi_failure_aborts_whole_document() {
    let text = format!("{}\n한국어", numbered_lines(60));
    let result = Synthesizer::new()
        .with_encoding(TextEncoding::WinAnsi)
        .synthesize(&text);
    assert!(matches!(result, Err(Error::Encoding(_))));
}

#[test]
fn test_custom_layout() {
    let options = SynthesizeOptions::new().with_layout(
        LayoutOptions::new()
            .with_column_width(10)
            .with_lines_per_page(3),
    );
    let pdf = synthesize_with_options(&"z".repeat(95), &options).unwrap();
    assert_eq!(inspect(&pdf).unwrap().page_count, 4);
}

#[test]
fn test_readable_by_independent_parser() {
    let text = numbered_lines(130);
    for compress in [false, true] {
        let options = SynthesizeOptions::new()
            .with_write_options(WriteOptions::new().with_compression(compress));
        let pdf = synthesize_with_options(&text, &options).unwrap();

        let doc = lopdf::Document::load_mem(&pdf).unwrap();
        assert_eq!(doc.get_pages().len(), 3);
    }
}

#[test]
fn test_write_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.pdf");

    write_file(&path, "saved", &SynthesizeOptions::default()).unwrap();
    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(bytes, synthesize("saved").unwrap());
}

#[test]
fn test_write_file_failure_is_write_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("out.pdf");

    let err = write_file(&path, "lost", &SynthesizeOptions::default()).unwrap_err();
    assert!(err.is_write_failure());
    assert!(!path.exists());
}

#[cfg(feature = "async")]
#[test]
fn test_write_file_async() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("async.pdf");
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap();

    runtime
        .block_on(plainpdf::write_file_async(
            &path,
            "async",
            &SynthesizeOptions::default(),
        ))
        .unwrap();
    assert_eq!(std::fs::read(&path).unwrap(), synthesize("async").unwrap());
}
