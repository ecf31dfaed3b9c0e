//! SVG rendering of a style result: the framework background with the
//! plotted point, plus a score indicator for each axis.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use handlebars::Handlebars;
use serde::Serialize;

use super::plot::{DEFAULT_PLOT_SIZE, axis_position, plot_point};
use crate::framework::{Framework, accent_color};
use crate::marker::StyleResult;

const STYLE_MATRIX_TEMPLATE: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="{{width}}" height="{{height}}" viewBox="0 0 {{width}} {{height}}">
  <defs>
    <radialGradient id="glow">
      <stop offset="0" stop-color="{{accent}}" stop-opacity="0.5"/>
      <stop offset="1" stop-color="{{accent}}" stop-opacity="0"/>
    </radialGradient>
  </defs>
  <rect x="0.5" y="0.5" width="{{frame_width}}" height="{{frame_height}}" rx="8" fill="#111827" stroke="#648cc8" stroke-opacity="0.12"/>
  <text x="16" y="28" font-family="Inter, system-ui, sans-serif" font-size="10" letter-spacing="2" fill="#a0b4dc" fill-opacity="0.5">{{framework_label}}</text>
  <text x="{{badge_x}}" y="28" font-family="'Crimson Pro', Georgia, serif" font-size="13" font-weight="500" fill="{{accent}}">{{style}}</text>
  <g transform="translate(16, 44)">
{{#if background}}
    <image href="{{{background}}}" x="0" y="0" width="{{size}}" height="{{size}}"/>
{{/if}}
    <circle cx="{{point_x}}" cy="{{point_y}}" r="24" fill="url(#glow)"/>
    <circle cx="{{point_x}}" cy="{{point_y}}" r="6" fill="{{accent}}"/>
    <circle cx="{{point_x}}" cy="{{point_y}}" r="10" fill="none" stroke="{{accent}}" stroke-opacity="0.5" stroke-width="1.5"/>
  </g>
  <g transform="translate({{panel_x}}, 44)" font-family="Inter, system-ui, sans-serif">
{{#each axes}}
    <g transform="translate(0, {{offset}})">
      <text x="0" y="10" font-size="10" letter-spacing="1" fill="#a0b4dc" fill-opacity="0.5">{{label}}</text>
      <text x="0" y="26" font-size="10" fill="#a0b4dc" fill-opacity="0.4">{{left}}</text>
      <text x="{{../panel_width}}" y="26" font-size="10" text-anchor="end" fill="#a0b4dc" fill-opacity="0.4">{{right}}</text>
      <rect x="0" y="34" width="{{../panel_width}}" height="4" rx="2" fill="#648cc8" fill-opacity="0.08"/>
      <rect x="{{../panel_center}}" y="34" width="1" height="4" fill="#a0b4dc" fill-opacity="0.2"/>
      <circle cx="{{marker_x}}" cy="36" r="5" fill="{{../accent}}"/>
    </g>
{{/each}}
{{#if summary}}
    <text x="0" y="{{summary_y}}" font-family="'Crimson Pro', Georgia, serif" font-size="13" font-style="italic" fill="#b4c3dc" fill-opacity="0.7">{{summary}}</text>
{{/if}}
  </g>
</svg>
"##;

const PANEL_WIDTH: f64 = 220.0;
const AXIS_SPACING: f64 = 56.0;

#[derive(Serialize)]
struct AxisContext {
    label: String,
    left: String,
    right: String,
    offset: String,
    marker_x: String,
}

#[derive(Serialize)]
struct MatrixContext {
    width: String,
    height: String,
    frame_width: String,
    frame_height: String,
    size: String,
    accent: &'static str,
    framework_label: String,
    style: String,
    badge_x: String,
    background: Option<String>,
    point_x: String,
    point_y: String,
    panel_x: String,
    panel_width: String,
    panel_center: String,
    axes: Vec<AxisContext>,
    summary: String,
    summary_y: String,
}

/// A chip in the assessed styles bar
#[derive(Clone, Serialize, Debug, PartialEq)]
pub struct StyleChip {
    pub style: String,
    pub framework: String,
    pub color: &'static str,
}

/// Summarize every style assessed so far, in the order they were
/// reported.
pub fn assessed_summary(styles: &[StyleResult]) -> Vec<StyleChip> {
    styles
        .iter()
        .map(|s| StyleChip {
            style: s.style.clone(),
            framework: s.framework.clone(),
            color: accent_color(&s.framework, &s.style),
        })
        .collect()
}

fn px(value: f64) -> String {
    format!("{:.2}", value)
}

fn mime_type(path: &Path) -> &'static str {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("svg") => "image/svg+xml",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

fn templates<'a>() -> Handlebars<'a> {
    let mut registry = Handlebars::new();
    registry.set_strict_mode(true);
    registry
        .register_template_string("StyleMatrix", STYLE_MATRIX_TEMPLATE)
        .expect("Failed to register template");
    registry
}

/// Renders style results to SVG. Background images are read from
/// `static_dir` and cached by source path for the life of the
/// instance, so rendering many results of one framework reads its
/// background once.
pub struct StyleMatrix {
    static_dir: PathBuf,
    size: f64,
    backgrounds: HashMap<String, Arc<String>>,
    registry: Handlebars<'static>,
}

impl StyleMatrix {
    pub fn new(static_dir: impl Into<PathBuf>) -> Self {
        Self {
            static_dir: static_dir.into(),
            size: DEFAULT_PLOT_SIZE,
            backgrounds: HashMap::new(),
            registry: templates(),
        }
    }

    pub fn with_size(mut self, size: f64) -> Self {
        self.size = size;
        self
    }

    pub fn cached_backgrounds(&self) -> usize {
        self.backgrounds.len()
    }

    /// Load a background as a data URI. Failures are logged and not
    /// cached so a later render can try again.
    async fn background(&mut self, src: &str) -> Option<Arc<String>> {
        if let Some(uri) = self.backgrounds.get(src) {
            return Some(Arc::clone(uri));
        }

        let path = self.static_dir.join(src.trim_start_matches('/'));
        match tokio::fs::read(&path).await {
            Ok(bytes) => {
                let uri = Arc::new(format!(
                    "data:{};base64,{}",
                    mime_type(&path),
                    STANDARD.encode(bytes)
                ));
                tracing::debug!("Loaded background {}", path.display());
                self.backgrounds.insert(src.to_string(), Arc::clone(&uri));
                Some(uri)
            }
            Err(e) => {
                tracing::warn!("Failed to load background {}: {}", path.display(), e);
                None
            }
        }
    }

    pub async fn render(&mut self, result: &StyleResult) -> Result<String> {
        let framework = Framework::lookup_or_default(&result.framework);
        let accent = accent_color(&result.framework, &result.style);
        let background = self.background(framework.background()).await;

        let size = self.size;
        let point = plot_point(result, size);
        let panel_x = 16.0 + size + 24.0;
        let width = panel_x + PANEL_WIDTH + 16.0;
        let height = 44.0 + size + 16.0;

        // Unknown frameworks still draw on the thinking background but
        // keep their own name in the header
        let framework_label = match result.framework.parse::<Framework>() {
            Ok(fw) => fw.display_label().to_string(),
            Err(_) => result.framework.clone(),
        };

        let axes = [
            (&result.dim1_label, &result.dim1_left, &result.dim1_right, result.dim1_score),
            (&result.dim2_label, &result.dim2_left, &result.dim2_right, result.dim2_score),
        ]
        .into_iter()
        .enumerate()
        .map(|(i, (label, left, right, score))| AxisContext {
            label: label.to_uppercase(),
            left: left.clone(),
            right: right.clone(),
            offset: px(i as f64 * AXIS_SPACING),
            marker_x: px(axis_position(score) / 100.0 * PANEL_WIDTH),
        })
        .collect();

        let context = MatrixContext {
            width: px(width),
            height: px(height),
            frame_width: px(width - 1.0),
            frame_height: px(height - 1.0),
            size: px(size),
            accent,
            framework_label: framework_label.to_uppercase(),
            style: result.style.clone(),
            badge_x: px(panel_x),
            background: background.map(|uri| uri.to_string()),
            point_x: px(point.x),
            point_y: px(point.y),
            panel_x: px(panel_x),
            panel_width: px(PANEL_WIDTH),
            panel_center: px(PANEL_WIDTH / 2.0),
            axes,
            summary: result.summary.clone(),
            summary_y: px(2.0 * AXIS_SPACING + 12.0),
        };

        let svg = self.registry.render("StyleMatrix", &context)?;
        Ok(svg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_background(dir: &Path, name: &str, bytes: &[u8]) {
        let images = dir.join("images");
        std::fs::create_dir_all(&images).unwrap();
        std::fs::write(images.join(name), bytes).unwrap();
    }

    #[tokio::test]
    async fn test_renders_point_and_axes() {
        let dir = tempfile::tempdir().unwrap();
        let mut matrix = StyleMatrix::new(dir.path());
        let result = StyleResult::new(
            Framework::Thinking,
            -6,
            4,
            "Incremental",
            "You lean reasoned & open.",
        );

        let svg = matrix.render(&result).await.unwrap();

        // 140 - 0.6 * (140 * 10/12) and 140 - 0.4 * (140 * 10/12)
        assert!(svg.contains(r##"cx="70.00" cy="93.33" r="6" fill="#9f60b5""##));
        assert!(svg.contains("KINETIC THINKING STYLE"));
        assert!(svg.contains(">Incremental<"));
        assert!(svg.contains(">UNCERTAINTY<"));
        assert!(svg.contains(">Openness<"));
        // dim1 at 20% and dim2 at 70% of the panel
        assert!(svg.contains(r#"<circle cx="44.00" cy="36""#));
        assert!(svg.contains(r#"<circle cx="154.00" cy="36""#));
        assert!(svg.contains("You lean reasoned &amp; open."));
        // No background file in the static dir
        assert!(!svg.contains("<image"));
    }

    #[tokio::test]
    async fn test_background_is_cached_per_source() {
        let dir = tempfile::tempdir().unwrap();
        write_background(dir.path(), "managing-background.png", b"not really a png");
        let mut matrix = StyleMatrix::new(dir.path());
        let result = StyleResult::new(Framework::Managing, 2, 2, "Venturing", "");

        let first = matrix.render(&result).await.unwrap();
        assert!(first.contains(r#"<image href="data:image/png;base64,"#));
        assert_eq!(matrix.cached_backgrounds(), 1);

        // Served from the cache once loaded
        std::fs::remove_file(dir.path().join("images/managing-background.png")).unwrap();
        let second = matrix.render(&result).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(matrix.cached_backgrounds(), 1);
    }

    #[tokio::test]
    async fn test_unknown_framework_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        write_background(dir.path(), "thinking-background.png", b"png");
        let mut matrix = StyleMatrix::new(dir.path());
        let mut result = StyleResult::new(Framework::Thinking, 0, 0, "Whatever", "");
        result.framework = "feeling".to_string();

        let svg = matrix.render(&result).await.unwrap();
        assert!(svg.contains("<image"));
        assert!(svg.contains(">FEELING<"));
        // Unknown style uses the default accent
        assert!(svg.contains(r##"fill="#ff6f20""##));
    }

    #[test]
    fn test_assessed_summary() {
        let styles = vec![
            StyleResult::new(Framework::Thinking, 1, 1, "Breakaway", ""),
            StyleResult::new(Framework::Leading, -1, -1, "Troubleshooter", ""),
        ];
        let chips = assessed_summary(&styles);

        assert_eq!(
            chips,
            vec![
                StyleChip {
                    style: "Breakaway".to_string(),
                    framework: "thinking".to_string(),
                    color: "#009ddb",
                },
                StyleChip {
                    style: "Troubleshooter".to_string(),
                    framework: "leading".to_string(),
                    color: "#ff6f20",
                },
            ]
        );
    }
}
