// Every test binary uses a different subset of these helpers
#![allow(unused)]

use std::path::{Path, PathBuf};

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

use archive_pdf::PageRenderer;

pub const PAGES: usize = 3;

/// Write a small text PDF with a filled-in Info dictionary.
pub fn write_sample_pdf(path: &Path, page_count: usize) {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids: Vec<Object> = Vec::new();
    for i in 0..page_count {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 24.into()]),
                Operation::new("Td", vec![72.into(), 700.into()]),
                Operation::new(
                    "Tj",
                    vec![Object::string_literal(format!("Page {}", i + 1))],
                ),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        });
        kids.push(page_id.into());
    }

    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => page_count as i64,
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let info_id = doc.add_object(dictionary! {
        "Title" => Object::string_literal("The Sample Chronicles"),
        "Author" => Object::string_literal("Jane Doe"),
        "Subject" => Object::string_literal("Fixtures"),
        "Keywords" => Object::string_literal("comics, fantasy; adventure"),
        "Creator" => Object::string_literal("archive-rs tests"),
        "Producer" => Object::string_literal("lopdf"),
        "CreationDate" => Object::string_literal("D:20230301120000+02'00'"),
        "ModDate" => Object::string_literal("D:20240115103045Z"),
        "Series" => Object::string_literal("Samples"),
    });
    doc.trailer.set("Info", info_id);

    doc.save(path).unwrap();
}

/// A sample PDF inside a fresh temp dir.
pub fn sample_pdf() -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("sample.pdf");
    write_sample_pdf(&path, PAGES);
    (dir, path)
}

/// The renderer, or `None` when poppler is not installed.
pub fn renderer() -> Option<PageRenderer> {
    match PageRenderer::locate("pdftoppm", 72) {
        Ok(renderer) => Some(renderer),
        Err(e) => {
            eprintln!("skipping: {}", e);
            None
        }
    }
}

/// A shell script that acts like `pdftoppm`: it records its arguments in
/// `args.txt` and copies a red 4x4 PNG to `<prefix>.png`. Returns the script
/// path and the PNG it hands out.
#[cfg(unix)]
pub fn stand_in_renderer(dir: &Path) -> (PathBuf, Vec<u8>) {
    use std::io::Cursor;
    use std::os::unix::fs::PermissionsExt;

    let img = image::RgbaImage::from_pixel(4, 4, image::Rgba([200, 30, 30, 255]));
    let mut png = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
        .unwrap();
    std::fs::write(dir.join("page.png"), &png).unwrap();

    let script = dir.join("pdftoppm");
    std::fs::write(
        &script,
        "#!/bin/sh\n\
         [ \"$1\" = \"-v\" ] && exit 0\n\
         here=$(dirname \"$0\")\n\
         echo \"$@\" > \"$here/args.txt\"\n\
         for last; do :; done\n\
         cp \"$here/page.png\" \"$last.png\"\n",
    )
    .unwrap();
    std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();
    (script, png)
}

/// Arguments of the last stand-in renderer call.
pub fn recorded_args(dir: &Path) -> Vec<String> {
    std::fs::read_to_string(dir.join("args.txt"))
        .unwrap()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}
