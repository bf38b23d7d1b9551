//! Info.plist descriptor

use docset_core::DocsetConfig;
use std::path::PathBuf;

use crate::connection::IndexerError;

/// Landing page inside the documentation root
pub const INDEX_FILE_PATH: &str = "index.html";

fn escape_xml(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

/// Render the property list for `config`
pub fn render_plist(config: &DocsetConfig) -> String {
    let name = escape_xml(config.short_name());
    let version = escape_xml(&config.version);
    let fallback_url = escape_xml(&format!("file://{}/", config.documents_dir().display()));

    format!(
        "<?xml version='1.0' encoding='UTF-8'?>
<!DOCTYPE plist PUBLIC '-//Apple//DTD PLIST 1.0//EN' 'http://www.apple.com/DTDs/PropertyList-1.0.dtd'>
<plist version='1.0'>
<dict>
    <key>CFBundleIdentifier</key>
    <string>{name}</string>
    <key>CFBundleName</key>
    <string>{name}</string>
    <key>CFBundleShortVersionString</key>
    <string>{version}</string>
    <key>DocSetPlatformFamily</key>
    <string>{name}</string>
    <key>isDashDocset</key>
    <true/>
    <key>isJavaScriptEnabled</key>
    <true/>
    <key>dashIndexFilePath</key>
    <string>{INDEX_FILE_PATH}</string>
    <key>DashDocSetFallbackURL</key>
    <string>{fallback_url}</string>
</dict>
</plist>"
    )
}

/// Write `Contents/Info.plist`, creating `Contents/` if needed
pub fn write_plist(config: &DocsetConfig) -> Result<PathBuf, IndexerError> {
    let path = config.plist_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, render_plist(config))?;
    tracing::info!(target: "plist", "Wrote {}", path.display());
    Ok(path)
}
