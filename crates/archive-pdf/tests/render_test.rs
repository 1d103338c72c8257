//! Rendering through a stand-in `pdftoppm` script, so these run without
//! poppler installed.
#![cfg(unix)]

mod common;

use archive_core::{ArchiveError, ArchiveOptions, ArchiveReader, PageContent};
use archive_pdf::render::DEFAULT_DPI;
use archive_pdf::{ArchivePdf, PageRenderer, PdfArchive};

use common::*;

#[test]
fn test_render_arguments() {
    let (dir, path) = sample_pdf();
    let (script, png) = stand_in_renderer(dir.path());
    let renderer = PageRenderer::locate(script.to_str().unwrap(), DEFAULT_DPI).unwrap();
    assert_eq!(renderer.dpi(), 300);
    let pdf = ArchivePdf::open(&path).unwrap();

    let content = pdf.extract(&renderer, 1, "png", false).unwrap();
    assert_eq!(content, PageContent::Raw(png));

    let args = recorded_args(dir.path());
    assert_eq!(
        &args[..8],
        ["-png", "-r", "300", "-f", "2", "-l", "2", "-singlefile"]
    );
    assert_eq!(args[8], path.display().to_string());
}

#[test]
fn test_cover_base64_written_as_image() {
    let (dir, path) = sample_pdf();
    let (script, _) = stand_in_renderer(dir.path());
    let renderer = PageRenderer::locate(script.to_str().unwrap(), DEFAULT_DPI).unwrap();
    let pdf = ArchivePdf::open(&path).unwrap();

    let content = pdf.cover(&renderer, "jpg", true).unwrap();
    assert!(content.is_base64());

    let file = dir.path().join("out").join("cover.jpg");
    content.write_to(&file).unwrap();
    let bytes = std::fs::read(&file).unwrap();
    assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
    let decoded = image::load_from_memory(&bytes).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (4, 4));
}

#[test]
fn test_pages_listed_without_renderer() {
    let (_dir, path) = sample_pdf();
    let options = ArchiveOptions {
        renderer_binary: "no-such-renderer-5b7a".into(),
        ..ArchiveOptions::default()
    };

    let archive = PdfArchive::open(&path, &options).unwrap();
    assert_eq!(archive.count(), PAGES);
    let first = archive.find("page-001.jpg").unwrap();
    assert!(matches!(
        archive.content(first),
        Err(ArchiveError::ExtensionMissing(_))
    ));
}

#[test]
fn test_pages_extracted_with_stand_in() {
    let (dir, path) = sample_pdf();
    let (script, _) = stand_in_renderer(dir.path());
    let options = ArchiveOptions {
        renderer_binary: script.display().to_string(),
        image_format: "png".into(),
        ..ArchiveOptions::default()
    };

    let archive = PdfArchive::open(&path, &options).unwrap();
    let output = dir.path().join(archive.basename());
    let paths = archive.extract_all(&output).unwrap();

    assert_eq!(paths.len(), PAGES);
    assert!(paths[2].ends_with("page-003.png"));
    let page = image::open(&paths[2]).unwrap();
    assert_eq!(page.width(), 4);
    assert_eq!(&recorded_args(dir.path())[3..7], ["-f", "3", "-l", "3"]);
}
