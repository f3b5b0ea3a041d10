//! HTML rendering for the dashboard
//!
//! `render_index` builds the full page, which then pulls `/tiles?count=N`.
//! `render_tiles` builds the fragment swapped into the grid. Every interpolated
//! value goes through [`escape_html`].

use crate::models::{IndexView, TileRecord};
use time::format_description::well_known::Rfc3339;

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

pub fn render_index(view: IndexView) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Instance Dashboard</title>
<style>
  body {{ font-family: sans-serif; margin: 2rem; background: #f5f6fa; }}
  #tiles {{ display: grid; grid-template-columns: repeat(auto-fill, minmax(260px, 1fr)); gap: 1rem; }}
  .tile {{ background: #fff; border-radius: 6px; padding: 1rem; box-shadow: 0 1px 3px rgba(0,0,0,.1); }}
  .tile h3 {{ margin-top: 0; }}
</style>
</head>
<body>
<h1>Instance Dashboard</h1>
<form id="controls">
  <label>Tiles <input id="count" name="count" type="number" min="1" max="20" value="{count}"></label>
  <button type="submit">Refresh</button>
</form>
<div id="tiles"></div>
<script>
  async function loadTiles() {{
    const count = document.getElementById("count").value;
    const resp = await fetch("/tiles?count=" + encodeURIComponent(count));
    document.getElementById("tiles").innerHTML = await resp.text();
  }}
  document.getElementById("controls").addEventListener("submit", (e) => {{ e.preventDefault(); loadTiles(); }});
  loadTiles();
</script>
</body>
</html>
"#,
        count = view.count
    )
}

pub fn render_tiles(tiles: &[TileRecord]) -> String {
    let mut out = String::new();
    for tile in tiles {
        let s = &tile.snapshot;
        let timestamp = s.timestamp.format(&Rfc3339).unwrap_or_default();
        out.push_str(&format!(
            r#"<div class="tile" style="border-left: 6px solid {color};">
    <h3 style="color: {label_color};">Instance #{position}</h3>
    <div>Version: {version}</div>
    <div>Hostname: <span style="color: {label_color};">{hostname}</span></div>
    <div>Uptime: {uptime}</div>
    <div>Runtime: {runtime}</div>
    <div>Timestamp: {timestamp}</div>
</div>
"#,
            color = escape_html(&tile.color),
            label_color = escape_html(&tile.label_color),
            position = tile.position,
            version = escape_html(&s.version),
            hostname = escape_html(&s.hostname),
            uptime = escape_html(&s.uptime_display),
            runtime = escape_html(&s.runtime_version),
            timestamp = escape_html(&timestamp),
        ));
    }
    out
}
