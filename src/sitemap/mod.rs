// src/sitemap/mod.rs
// Sitemap output. See writer.rs for the document format.

mod writer;

pub use writer::emit;
