/*!
 * End-to-end tests for the conversion pipeline
 */

use aozora2mdx::app_config::Config;
use aozora2mdx::app_controller::Controller;
use aozora2mdx::file_utils::FileManager;

use crate::common;

/// Test that reconverting a source with its own output as prior document
/// reproduces that output exactly
#[test]
fn test_convert_html_withOwnOutputAsPrior_shouldBeIdempotent() {
    let controller = Controller::new_for_test().unwrap();
    let html = common::aozora_page("　吾輩は猫である。名前はまだ無い。");

    let first = controller.convert_html(&html, None).unwrap();
    let second = controller
        .convert_html(&html, Some(first.document.as_str()))
        .unwrap();

    assert_eq!(first.document, second.document);
}

/// Test that the frontmatter block carries the scraped fields
#[test]
fn test_convert_html_withBibliographicHeader_shouldEmitFrontmatter() {
    let controller = Controller::new_for_test().unwrap();
    let html = common::aozora_page("　本文。");

    let conversion = controller.convert_html(&html, None).unwrap();

    assert!(conversion
        .document
        .starts_with("---\ntitle: \"吾輩は猫である\"\nauthor: \"夏目漱石\"\n---\n\n"));
}

/// Test that hand-curated readings in the prior output are applied to the
/// fresh conversion and survive further reconversions
#[test]
fn test_convert_html_withCuratedPrior_shouldPreserveReadings() {
    let controller = Controller::new_for_test().unwrap();
    let html = common::minimal_page("猫と犬");

    let first = controller.convert_html(&html, None).unwrap();
    assert_eq!(
        first.document,
        format!(
            "{}と{}",
            common::placeholder_ruby("猫"),
            common::placeholder_ruby("犬")
        )
    );

    // A human fills in the two required readings
    let curated = first
        .document
        .replacen("{{required_ruby}}", "ねこ", 1)
        .replacen("{{required_ruby}}", "いぬ", 1);

    let second = controller.convert_html(&html, Some(curated.as_str())).unwrap();
    assert_eq!(second.document, curated);
    assert_eq!(second.store.remaining(), 0);

    let third = controller
        .convert_html(&html, Some(second.document.as_str()))
        .unwrap();
    assert_eq!(third.document, second.document);
}

/// Test that annotations present in the source itself pass through and are
/// not re-wrapped
#[test]
fn test_convert_html_withAnnotatedSource_shouldNotRewrap() {
    let controller = Controller::new_for_test().unwrap();
    let html = common::minimal_page("<ruby>猫<rt>ねこ</rt></ruby>である。");

    let conversion = controller.convert_html(&html, None).unwrap();

    assert_eq!(conversion.document, format!("{}である。", common::ruby("猫", "ねこ")));
}

/// Test that strict mode fails when the store does not cover the text
#[test]
fn test_convert_html_withStrictModeAndEmptyStore_shouldFail() {
    let mut config = Config::default();
    config.annotation.strict = true;
    let controller = Controller::with_config(config).unwrap();
    let html = common::minimal_page("漢字");

    assert!(controller.convert_html(&html, None).is_err());
}

/// Test that leading media-reference paragraphs of the prior output are
/// re-inserted when the compatibility shim is enabled
#[test]
fn test_convert_html_withPreservePriorMedia_shouldReinsertLeadingMedia() {
    let mut config = Config::default();
    config.annotation.preserve_prior_media = true;
    let controller = Controller::with_config(config).unwrap();
    let html = common::minimal_page("本文。");

    let prior = "![表紙](cover.png)\n\n古い本文。";
    let conversion = controller.convert_html(&html, Some(prior)).unwrap();

    assert!(conversion.document.starts_with("![表紙](cover.png)\n\n"));
}

/// Test the file workflow: convert, curate the output, reconvert, and the
/// curated reading survives on disk
#[test]
fn test_run_withCuratedOutputOnDisk_shouldPreserveReadings() {
    let controller = Controller::new_for_test().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("book.html");
    let output_dir = dir.path().join("out");
    FileManager::write_to_file(&input, &common::minimal_page("猫")).unwrap();

    controller
        .run(input.clone(), output_dir.clone(), false)
        .unwrap();
    let output_path = output_dir.join("book.mdx");
    let first = FileManager::read_to_string(&output_path).unwrap();
    assert_eq!(first, common::placeholder_ruby("猫"));

    // Curate the reading, then reconvert without --fresh
    FileManager::write_to_file(&output_path, &common::ruby("猫", "ねこ")).unwrap();
    controller
        .run(input.clone(), output_dir.clone(), false)
        .unwrap();
    let second = FileManager::read_to_string(&output_path).unwrap();
    assert_eq!(second, common::ruby("猫", "ねこ"));

    // A fresh run discards the curated reading again
    controller.run(input, output_dir, true).unwrap();
    let third = FileManager::read_to_string(&output_path).unwrap();
    assert_eq!(third, common::placeholder_ruby("猫"));
}

/// Test folder mode over a small library
#[test]
fn test_run_folder_withTwoSourceFiles_shouldConvertBoth() {
    let controller = Controller::new_for_test().unwrap();
    let dir = tempfile::tempdir().unwrap();
    let input_dir = dir.path().join("library");
    let output_dir = dir.path().join("out");
    FileManager::write_to_file(input_dir.join("a.html"), &common::minimal_page("一")).unwrap();
    FileManager::write_to_file(input_dir.join("b.htm"), &common::minimal_page("二")).unwrap();

    controller
        .run_folder(input_dir, output_dir.clone(), false)
        .unwrap();

    assert!(FileManager::file_exists(output_dir.join("a.mdx")));
    assert!(FileManager::file_exists(output_dir.join("b.mdx")));
}
