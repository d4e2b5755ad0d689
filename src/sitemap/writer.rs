// src/sitemap/writer.rs
// =============================================================================
// Serializes PageRecords into a sitemap.xml document.
//
// Output shape (2-space indentation):
//
//   <?xml version="1.0" encoding="UTF-8"?>
//   <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//     <url>
//       <loc>https://example.com/</loc>
//       <lastmod>2024-01-15</lastmod>
//       <priority>1.0</priority>
//       <changefreq>daily</changefreq>
//     </url>
//   </urlset>
//
// When any record carries images, the root also declares the image namespace
// and each <url> lists its images after <changefreq>.
//
// The document is built fully in memory and then written with a single
// fs::write, which replaces any existing file.
// =============================================================================

use std::fs;
use std::path::Path;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::error::EmitError;
use crate::record::PageRecord;

pub const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";
pub const IMAGE_NS: &str = "http://www.google.com/schemas/sitemap-image/1.1";

/// Writes `records` to `destination` as a sitemap, replacing any existing file
pub fn emit(records: &[PageRecord], destination: &Path) -> Result<(), EmitError> {
    let document = render(records)?;

    fs::write(destination, document).map_err(|source| EmitError::Write {
        path: destination.to_path_buf(),
        source,
    })?;

    log::info!(
        "Wrote {} URL(s) to {}",
        records.len(),
        destination.display()
    );
    Ok(())
}

/// Builds the sitemap document as UTF-8 bytes
pub fn render(records: &[PageRecord]) -> Result<Vec<u8>, EmitError> {
    let include_images = records.iter().any(|record| !record.images.is_empty());
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    write_event(
        &mut writer,
        Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)),
    )?;

    let mut root = BytesStart::new("urlset");
    root.push_attribute(("xmlns", SITEMAP_NS));
    if include_images {
        root.push_attribute(("xmlns:image", IMAGE_NS));
    }
    write_event(&mut writer, Event::Start(root))?;

    for record in records {
        write_event(&mut writer, Event::Start(BytesStart::new("url")))?;

        // Field order matters: loc, lastmod, priority, changefreq
        write_text_element(&mut writer, "loc", &record.location)?;
        write_text_element(&mut writer, "lastmod", &record.last_modified_str())?;
        write_text_element(&mut writer, "priority", record.priority.as_str())?;
        write_text_element(&mut writer, "changefreq", record.change_frequency.as_str())?;

        if include_images {
            for image in &record.images {
                write_event(&mut writer, Event::Start(BytesStart::new("image:image")))?;
                write_text_element(&mut writer, "image:loc", image)?;
                write_event(&mut writer, Event::End(BytesEnd::new("image:image")))?;
            }
        }

        write_event(&mut writer, Event::End(BytesEnd::new("url")))?;
    }

    write_event(&mut writer, Event::End(BytesEnd::new("urlset")))?;

    let mut document = writer.into_inner();
    document.push(b'\n');
    Ok(document)
}

// Writes <name>text</name>, escaping the text
fn write_text_element(
    writer: &mut Writer<Vec<u8>>,
    name: &str,
    text: &str,
) -> Result<(), EmitError> {
    write_event(writer, Event::Start(BytesStart::new(name)))?;
    write_event(writer, Event::Text(BytesText::new(text)))?;
    write_event(writer, Event::End(BytesEnd::new(name)))
}

fn write_event(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> Result<(), EmitError> {
    writer
        .write_event(event)
        .map_err(|e| EmitError::Serialize(e.to_string()))
}
