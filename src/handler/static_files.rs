//! Static file serving module
//!
//! Maps request paths onto the build directory and serves what it finds:
//! regular files with their logical content type and compression header,
//! directories through their index file or an HTML listing.

use crate::config::AppState;
use crate::handler::router::RequestContext;
use crate::http::{self, ContentEncoding, ContentTypes};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};
use std::io;
use std::path::{Component, Path, PathBuf};
use tokio::fs;

/// Characters escaped in listing links
const HREF: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'\'')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// File selected to answer a request
#[derive(Debug, PartialEq, Eq)]
pub struct ResolvedAsset<'a> {
    pub path: PathBuf,
    /// Set when the file is stored pre-compressed
    pub encoding: Option<ContentEncoding>,
    /// Type of the logical file, compression suffix removed
    pub content_type: &'a str,
}

impl<'a> ResolvedAsset<'a> {
    pub fn new(path: PathBuf, content_types: &'a ContentTypes) -> Self {
        let encoding = ContentEncoding::detect(&path);
        let content_type = content_types.content_type_for(&path);
        Self {
            path,
            encoding,
            content_type,
        }
    }
}

/// Translate a URL path into a filesystem path under `root`
///
/// The path is percent-decoded and split on `/`. Empty and `.` segments are
/// dropped, `..` removes the previous segment but never climbs above
/// `root`, and segments that would not be a single plain path component
/// are discarded.
pub fn translate_path(root: &Path, url_path: &str) -> PathBuf {
    let decoded = percent_decode_str(url_path).decode_utf8_lossy();

    let mut segments: Vec<&str> = Vec::new();
    for segment in decoded.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            s if is_plain_segment(s) => segments.push(s),
            _ => {}
        }
    }

    let mut path = root.to_path_buf();
    path.extend(segments);
    path
}

fn is_plain_segment(segment: &str) -> bool {
    if segment.contains(['\\', '\0']) {
        return false;
    }
    let mut components = Path::new(segment).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

/// Serve a request path from the build directory
pub async fn serve(ctx: &RequestContext<'_>, state: &AppState) -> Response<Full<Bytes>> {
    let candidate = translate_path(&state.config.server.root, ctx.path);
    let trailing_slash = percent_decode_str(ctx.path)
        .decode_utf8_lossy()
        .ends_with('/');

    let canonical = match resolve_within_root(&candidate, state).await {
        Ok(Some(p)) => p,
        Ok(None) => {
            logger::log_warning(&format!("Path traversal attempt blocked: {}", ctx.path));
            return http::build_404_response();
        }
        Err(e) => return lookup_error_response(&e),
    };

    let metadata = match fs::metadata(&canonical).await {
        Ok(m) => m,
        Err(e) => return lookup_error_response(&e),
    };

    if metadata.is_dir() {
        return serve_directory(ctx, state, &candidate, trailing_slash).await;
    }

    // A file cannot be addressed as a directory
    if trailing_slash {
        return http::build_404_response();
    }

    serve_file(ctx, ResolvedAsset::new(candidate, &state.content_types)).await
}

/// Canonicalize `path`, yielding `None` when a symlink leads outside the root
async fn resolve_within_root(path: &Path, state: &AppState) -> io::Result<Option<PathBuf>> {
    let canonical = fs::canonicalize(path).await?;
    Ok(canonical.starts_with(&state.root).then_some(canonical))
}

/// Serve a directory: redirect to the slash form, then index file, then listing
async fn serve_directory(
    ctx: &RequestContext<'_>,
    state: &AppState,
    dir: &Path,
    trailing_slash: bool,
) -> Response<Full<Bytes>> {
    if !trailing_slash {
        // A leading "//" would make the Location protocol-relative
        let path = ctx.path.trim_start_matches('/');
        let target = match ctx.query {
            Some(q) => format!("/{path}/?{q}"),
            None => format!("/{path}/"),
        };
        return http::build_redirect_response(&target);
    }

    for index_file in &state.config.files.index_files {
        let index_path = dir.join(index_file);
        let canonical = match resolve_within_root(&index_path, state).await {
            Ok(Some(p)) => p,
            Ok(None) => {
                logger::log_warning(&format!(
                    "Index file outside root skipped: {}{index_file}",
                    ctx.path
                ));
                continue;
            }
            Err(_) => continue,
        };
        if fs::metadata(&canonical).await.is_ok_and(|m| m.is_file()) {
            return serve_file(ctx, ResolvedAsset::new(index_path, &state.content_types)).await;
        }
    }

    if !state.config.files.directory_listing {
        return http::build_404_response();
    }

    match render_listing(dir, ctx.path).await {
        Ok(html) => http::build_html_response(html, ctx.is_head),
        Err(e) => {
            logger::log_error(&format!(
                "Failed to list directory '{}': {e}",
                dir.display()
            ));
            io_error_response(&e)
        }
    }
}

/// Read a file and build its response
async fn serve_file(ctx: &RequestContext<'_>, asset: ResolvedAsset<'_>) -> Response<Full<Bytes>> {
    match fs::read(&asset.path).await {
        Ok(content) => http::build_file_response(
            Bytes::from(content),
            asset.content_type,
            asset.encoding,
            ctx.is_head,
        ),
        Err(e) => {
            logger::log_error(&format!(
                "Failed to read file '{}': {e}",
                asset.path.display()
            ));
            io_error_response(&e)
        }
    }
}

/// Response for a failed path lookup; missing files are not worth logging
fn lookup_error_response(error: &io::Error) -> Response<Full<Bytes>> {
    match error.kind() {
        io::ErrorKind::PermissionDenied => http::build_403_response(),
        _ => http::build_404_response(),
    }
}

fn io_error_response(error: &io::Error) -> Response<Full<Bytes>> {
    match error.kind() {
        io::ErrorKind::NotFound => http::build_404_response(),
        io::ErrorKind::PermissionDenied => http::build_403_response(),
        _ => http::build_500_response(),
    }
}

/// Render an HTML listing of `dir`, entries sorted case-insensitively
async fn render_listing(dir: &Path, url_path: &str) -> io::Result<String> {
    let mut entries = fs::read_dir(dir).await?;
    let mut names = Vec::new();
    while let Some(entry) = entries.next_entry().await? {
        let mut name = entry.file_name().to_string_lossy().into_owned();
        if entry.file_type().await?.is_dir() {
            name.push('/');
        }
        names.push(name);
    }
    names.sort_by_key(|name| name.to_lowercase());

    let display_path = escape_html(&percent_decode_str(url_path).decode_utf8_lossy());
    let mut html = format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n\
         <title>Directory listing for {display_path}</title>\n</head>\n<body>\n\
         <h1>Directory listing for {display_path}</h1>\n<hr>\n<ul>\n"
    );
    for name in &names {
        html.push_str(&format!(
            "<li><a href=\"{}\">{}</a></li>\n",
            utf8_percent_encode(name, HREF),
            escape_html(name)
        ));
    }
    html.push_str("</ul>\n<hr>\n</body>\n</html>\n");
    Ok(html)
}

fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            c => out.push(c),
        }
    }
    out
}
