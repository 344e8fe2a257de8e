// src/mime.rs

use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

fn gif_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"image/gif").expect("static pattern is valid"))
}

/// Returns true when the reported MIME type names a GIF image.
///
/// The match is unanchored, so parameters after the type are accepted.
/// Only the reported type is looked at, never the file content.
pub fn is_gif_type(mime_type: &str) -> bool {
    gif_pattern().is_match(mime_type)
}

/// Guesses the reported MIME type of a file from its extension.
///
/// Returns an empty string when the extension is missing or unknown.
pub fn guess_mime_type(path: &Path) -> &'static str {
    let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
        return "";
    };
    match ext.to_ascii_lowercase().as_str() {
        "gif" => "image/gif",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "svg" => "image/svg+xml",
        "txt" => "text/plain",
        "html" | "htm" => "text/html",
        "json" => "application/json",
        _ => "",
    }
}
