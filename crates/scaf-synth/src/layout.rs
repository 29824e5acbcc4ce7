//! Idempotent navigation merge into the shared admin layout.
//!
//! An entity's menu entry is identified by its anchor,
//! `<a href="{{ route('<segment>.index') }}" class="nav-link">`. Merging an
//! entity whose anchor is already present returns the layout untouched, so
//! `merge(merge(l, e), e) == merge(l, e)`.

use std::sync::LazyLock;

use regex::Regex;
use scaf_config::LayoutConfig;

use crate::SynthError;

const SIDEBAR_OPEN: &str = "<ul class=\"nav nav-pills nav-sidebar flex-column\"";

static UL_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<ul[\s>]|</ul\s*>").expect("ul tag pattern is valid")
});

/// Menu entry for one entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavEntry {
    pub route_segment: String,
    pub label: String,
    pub icon: String,
}

impl NavEntry {
    #[must_use]
    pub fn new(entity: &str, route_segment: &str, config: &LayoutConfig) -> Self {
        Self {
            route_segment: route_segment.to_string(),
            label: format!("{entity} Management"),
            icon: config.entry_icon.clone(),
        }
    }

    /// The text whose presence marks the entry as merged.
    #[must_use]
    pub fn anchor(&self) -> String {
        format!(
            "<a href=\"{{{{ route('{}.index') }}}}\" class=\"nav-link\">",
            self.route_segment
        )
    }

    fn render(&self, indent: &str) -> String {
        format!(
            "{indent}<li class=\"nav-item\">
{indent}    {anchor}
{indent}        <i class=\"{icon}\"></i>
{indent}        <p>{label}</p>
{indent}    </a>
{indent}</li>
",
            anchor = self.anchor(),
            icon = self.icon,
            label = self.label,
        )
    }
}

/// Merge `entry` into `layout`, or build a fresh layout when there is none.
///
/// # Errors
///
/// [`SynthError::SidebarNotFound`] when an existing layout lacks the
/// sidebar menu and does not already contain the entry.
pub fn merge(
    layout: Option<&str>,
    entry: &NavEntry,
    config: &LayoutConfig,
) -> Result<String, SynthError> {
    let Some(content) = layout else {
        return Ok(default_layout(entry, config));
    };

    if content.contains(&entry.anchor()) {
        return Ok(content.to_string());
    }

    let close = sidebar_close(content).ok_or(SynthError::SidebarNotFound)?;
    let mut merged = String::with_capacity(content.len() + 256);
    merged.push_str(&content[..close]);
    // Entry goes on its own lines, ahead of whatever indentation preceded </ul>.
    let line_start = content[..close].rfind('\n').map_or(0, |i| i + 1);
    let before_close = &content[line_start..close];
    if before_close.trim().is_empty() {
        merged.truncate(line_start);
        merged.push_str(&entry.render(&format!("{before_close}    ")));
        merged.push_str(before_close);
    } else {
        merged.push('\n');
        merged.push_str(&entry.render("    "));
    }
    merged.push_str(&content[close..]);
    Ok(merged)
}

/// Byte offset of the `</ul>` that closes the sidebar menu, skipping nested
/// lists.
fn sidebar_close(content: &str) -> Option<usize> {
    let start = content.find(SIDEBAR_OPEN)?;
    let body = start + content[start..].find('>')? + 1;

    let mut depth = 1usize;
    for tag in UL_TAG.find_iter(&content[body..]) {
        if tag.as_str().starts_with("</") {
            depth -= 1;
            if depth == 0 {
                return Some(body + tag.start());
            }
        } else {
            depth += 1;
        }
    }
    None
}

/// Complete AdminLTE page containing the Dashboard entry and `entry`.
#[must_use]
pub fn default_layout(entry: &NavEntry, config: &LayoutConfig) -> String {
    let entries = entry.render("                        ");
    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>@yield("title", "{title}")</title>
    <link rel="stylesheet" href="https://cdnjs.cloudflare.com/ajax/libs/font-awesome/5.15.4/css/all.min.css">
    <link rel="stylesheet" href="https://cdnjs.cloudflare.com/ajax/libs/admin-lte/3.2.0/css/adminlte.min.css">
    @yield("styles")
</head>
<body class="hold-transition sidebar-mini">
    <div class="wrapper">
        <nav class="main-header navbar navbar-expand navbar-white navbar-light">
            <ul class="navbar-nav">
                <li class="nav-item">
                    <a class="nav-link" data-widget="pushmenu" href="#" role="button"><i class="fas fa-bars"></i></a>
                </li>
            </ul>
            <ul class="navbar-nav ml-auto">
                <li class="nav-item">
                    <a class="nav-link" data-widget="fullscreen" href="#" role="button">
                        <i class="fas fa-expand-arrows-alt"></i>
                    </a>
                </li>
            </ul>
        </nav>
        <aside class="main-sidebar sidebar-dark-primary elevation-4">
            <a href="/" class="brand-link">
                <img src="https://cdnjs.cloudflare.com/ajax/libs/admin-lte/3.2.0/img/AdminLTELogo.png" alt="Logo" class="brand-image img-circle elevation-3" style="opacity: .8">
                <span class="brand-text font-weight-light">{brand}</span>
            </a>
            <div class="sidebar">
                <nav class="mt-2">
                    {SIDEBAR_OPEN} data-widget="treeview" role="menu">
                        <li class="nav-item">
                            <a href="#" class="nav-link">
                                <i class="nav-icon fas fa-tachometer-alt"></i>
                                <p>Dashboard</p>
                            </a>
                        </li>
{entries}                    </ul>
                </nav>
            </div>
        </aside>
        <div class="content-wrapper">
            <section class="content-header">
                <div class="container-fluid">
                    <div class="row mb-2">
                        <div class="col-sm-6">
                            <h1>@yield("page_title", "Page Title")</h1>
                        </div>
                    </div>
                </div>
            </section>
            <section class="content">
                <div class="container-fluid">
                    @if(session('success'))
                        <div class="alert alert-success">{{{{ session('success') }}}}</div>
                    @endif
                    @yield("content")
                </div>
            </section>
        </div>
        <footer class="main-footer">
            <div class="float-right d-none d-sm-inline">
                {footer}
            </div>
            <strong>&copy; {brand}</strong> All rights reserved.
        </footer>
    </div>
    <script src="https://cdnjs.cloudflare.com/ajax/libs/jquery/3.6.0/jquery.min.js"></script>
    <script src="https://cdnjs.cloudflare.com/ajax/libs/admin-lte/3.2.0/js/adminlte.min.js"></script>
    @yield("scripts")
</body>
</html>
"##,
        title = config.title,
        brand = config.brand,
        footer = config.footer,
    )
}
