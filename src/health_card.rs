//! Digital health card: QR symbol rendering and the printable card page.
//!
//! The QR encoder is the `qrcode` crate; this module only decides the
//! payload, size, margin and palette, and packages the results as SVG for
//! display and a PNG data URL for download.

use std::fmt::Write;
use std::io::Cursor;

use base64::Engine;
use image::{ImageFormat, Rgba, RgbaImage};
use qrcode::{Color, QrCode};
use serde::{Deserialize, Serialize};

use crate::error::PortalError;
use crate::models::Worker;

/// Rendering options for the QR symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QrOptions {
    /// Target edge length in pixels for the on-screen symbol.
    pub size: u32,
    /// Quiet zone width in modules.
    pub margin: u32,
    pub dark: String,
    pub light: String,
}

impl Default for QrOptions {
    fn default() -> Self {
        Self {
            size: 200,
            margin: 2,
            dark: "#0A85C2".into(),
            light: "#FFFFFF".into(),
        }
    }
}

/// Rendered QR symbol in both display and download form.
#[derive(Debug, Clone, Serialize)]
pub struct RenderedQr {
    pub payload: String,
    pub svg: String,
    /// `data:image/png;base64,...` at twice the display size.
    pub png_data_url: String,
}

/// Parse `#RRGGBB` into an opaque RGBA pixel.
pub fn parse_hex_color(hex: &str) -> Result<Rgba<u8>, PortalError> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(PortalError::Qr(format!("invalid color {hex:?}")));
    }
    let channel = |i: usize| {
        u8::from_str_radix(&digits[i..i + 2], 16)
            .map_err(|e| PortalError::Qr(format!("invalid color {hex:?}: {e}")))
    };
    Ok(Rgba([channel(0)?, channel(2)?, channel(4)?, 255]))
}

fn encode(payload: &str) -> Result<QrCode, PortalError> {
    QrCode::new(payload.as_bytes()).map_err(|e| PortalError::Qr(e.to_string()))
}

/// Render the symbol as SVG markup.
///
/// One user unit per module; the viewBox spans the symbol plus `margin`
/// light modules on every side. The pixel size is `size` rounded down to
/// whole modules.
pub fn render_svg(payload: &str, options: &QrOptions) -> Result<String, PortalError> {
    parse_hex_color(&options.dark)?;
    parse_hex_color(&options.light)?;
    let code = encode(payload)?;

    let width = code.width() as u32;
    let span = width + 2 * options.margin;
    let edge = span * (options.size / span).max(1);

    let mut path = String::new();
    for (i, color) in code.to_colors().iter().enumerate() {
        if *color == Color::Dark {
            let i = i as u32;
            let x = i % width + options.margin;
            let y = i / width + options.margin;
            let _ = write!(path, "M{x} {y}h1v1h-1z");
        }
    }

    Ok(format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" version="1.1" width="{edge}" height="{edge}" viewBox="0 0 {span} {span}" shape-rendering="crispEdges"><rect width="{span}" height="{span}" fill="{light}"/><path fill="{dark}" d="{path}"/></svg>"#,
        light = options.light,
        dark = options.dark,
    ))
}

/// Render the symbol as a PNG at `edge` pixels (rounded down to whole modules).
pub fn render_png(payload: &str, edge: u32, options: &QrOptions) -> Result<Vec<u8>, PortalError> {
    let dark = parse_hex_color(&options.dark)?;
    let light = parse_hex_color(&options.light)?;
    let code = encode(payload)?;

    let width = code.width() as u32;
    let span = width + 2 * options.margin;
    let module_px = (edge / span).max(1);
    let image_px = span * module_px;
    let colors = code.to_colors();

    let image = RgbaImage::from_fn(image_px, image_px, |x, y| {
        let col = (x / module_px).checked_sub(options.margin);
        let row = (y / module_px).checked_sub(options.margin);
        match (col, row) {
            (Some(c), Some(r)) if c < width && r < width => {
                match colors[(r * width + c) as usize] {
                    Color::Dark => dark,
                    Color::Light => light,
                }
            }
            _ => light,
        }
    });

    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(|e| PortalError::Qr(format!("PNG encoding failed: {e}")))?;
    Ok(bytes)
}

/// Render both forms of the symbol for `payload`.
pub fn render_qr(payload: &str, options: &QrOptions) -> Result<RenderedQr, PortalError> {
    let svg = render_svg(payload, options)?;
    let png = render_png(payload, options.size * 2, options)?;
    let encoded = base64::engine::general_purpose::STANDARD.encode(png);

    Ok(RenderedQr {
        payload: payload.to_string(),
        svg,
        png_data_url: format!("data:image/png;base64,{encoded}"),
    })
}

/// Filename offered when the card is downloaded.
pub fn download_filename(user_id: &str) -> String {
    let id = if user_id.is_empty() { "qr" } else { user_id };
    format!("health-card-{id}.png")
}

// ═══════════════════════════════════════════════════════════
// Health card
// ═══════════════════════════════════════════════════════════

/// Everything the card screen shows for a registered worker.
#[derive(Debug, Clone, Serialize)]
pub struct HealthCard {
    pub user_id: String,
    pub name: String,
    pub age: String,
    pub gender: String,
    pub origin_state: Option<String>,
    pub occupation: Option<String>,
    pub contact: String,
    pub emergency_contact_name: Option<String>,
    pub emergency_contact: Option<String>,
    pub has_emergency_contact: bool,
    pub download_filename: String,
    pub qr: RenderedQr,
}

impl HealthCard {
    /// Build the card; the QR payload is the worker's identifier.
    pub fn for_worker(worker: &Worker, options: &QrOptions) -> Result<Self, PortalError> {
        Ok(Self {
            user_id: worker.user_id.clone(),
            name: worker.name.clone(),
            age: worker.age.clone(),
            gender: worker.gender.clone(),
            origin_state: worker.origin_state.clone(),
            occupation: worker.occupation.clone(),
            contact: worker.contact.clone(),
            emergency_contact_name: worker.emergency_contact_name.clone(),
            emergency_contact: worker.emergency_contact.clone(),
            has_emergency_contact: worker.has_emergency_contact(),
            download_filename: download_filename(&worker.user_id),
            qr: render_qr(&worker.user_id, options)?,
        })
    }

    /// Printable HTML page for the card.
    pub fn to_html(&self) -> String {
        let row = |label: &str, value: Option<&str>| {
            format!(
                "<div class=\"row\"><span class=\"label\">{}</span><span>{}</span></div>",
                escape_html(label),
                escape_html(value.unwrap_or("-")),
            )
        };

        let mut details = String::new();
        details.push_str(&row("Name", Some(&self.name)));
        details.push_str(&row("Age", Some(&self.age)));
        details.push_str(&row("Gender", Some(&self.gender)));
        details.push_str(&row("Origin State", self.origin_state.as_deref()));
        details.push_str(&row("Occupation", self.occupation.as_deref()));
        details.push_str(&row("Contact", Some(&self.contact)));

        let emergency = if self.has_emergency_contact {
            format!(
                "<section class=\"emergency\"><h3>Emergency Contact</h3>{}{}</section>",
                row("Name", self.emergency_contact_name.as_deref()),
                row("Phone", self.emergency_contact.as_deref()),
            )
        } else {
            String::new()
        };

        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Digital Health Card - {id}</title>
<style>
body {{ font-family: sans-serif; max-width: 640px; margin: 2rem auto; }}
header {{ background: #0A85C2; color: #fff; padding: 1rem; text-align: center; }}
.row {{ display: flex; justify-content: space-between; padding: .25rem 0; }}
.label {{ color: #666; }}
.qr {{ text-align: center; margin: 1rem 0; }}
</style>
</head>
<body>
<header><h1>Digital Health Card</h1><p>Kerala Health Record System</p></header>
<p><strong>ID: {id}</strong></p>
{details}
<div class="qr">{svg}<p>Show this QR code to healthcare providers</p></div>
<p><a download="{file}" href="{png}">Download Health Card</a></p>
{emergency}
</body>
</html>"#,
            id = escape_html(&self.user_id),
            details = details,
            svg = self.qr.svg,
            file = escape_html(&self.download_filename),
            png = self.qr.png_data_url,
            emergency = emergency,
        )
    }
}

pub(crate) fn escape_html(input: &str) -> String {
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

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn test_worker() -> Worker {
        Worker {
            user_id: "USR123456789".into(),
            name: "Ramesh <Kumar>".into(),
            age: "32".into(),
            gender: "Male".into(),
            contact: "+91 9876543210".into(),
            origin_state: Some("Bihar".into()),
            occupation: None,
            address: None,
            emergency_contact_name: Some("Sita".into()),
            emergency_contact: None,
            created_at: Utc::now(),
            qr_code_file: "qr-code-USR123456789.png".into(),
        }
    }

    #[test]
    fn default_options_match_card_palette() {
        let options = QrOptions::default();
        assert_eq!(options.size, 200);
        assert_eq!(options.margin, 2);
        assert_eq!(parse_hex_color(&options.dark).unwrap(), Rgba([0x0A, 0x85, 0xC2, 255]));
        assert_eq!(parse_hex_color(&options.light).unwrap(), Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn bad_color_is_rejected() {
        assert!(parse_hex_color("#12345").is_err());
        assert!(parse_hex_color("#GGGGGG").is_err());
        let options = QrOptions {
            dark: "blue".into(),
            ..QrOptions::default()
        };
        assert!(matches!(render_svg("x", &options), Err(PortalError::Qr(_))));
    }

    #[test]
    fn svg_uses_configured_colors() {
        let svg = render_svg("USR123456789", &QrOptions::default()).unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains("fill=\"#0A85C2\""));
        assert!(svg.contains("fill=\"#FFFFFF\""));
    }

    #[test]
    fn svg_viewbox_spans_symbol_plus_margin() {
        let payload = "USR987654321";
        let width = QrCode::new(payload.as_bytes()).unwrap().width() as u32;
        for margin in 0..=4 {
            let options = QrOptions {
                size: 0,
                margin,
                ..QrOptions::default()
            };
            let span = width + 2 * margin;
            let svg = render_svg(payload, &options).unwrap();
            assert!(
                svg.contains(&format!("viewBox=\"0 0 {span} {span}\"")),
                "margin {margin}: {svg}"
            );
            assert!(svg.contains(&format!("width=\"{span}\" height=\"{span}\"")));
        }
    }

    #[test]
    fn svg_first_dark_module_sits_inside_margin() {
        // The finder pattern puts a dark module at the symbol's top-left corner.
        let options = QrOptions::default();
        let svg = render_svg("USR123456789", &options).unwrap();
        assert!(svg.contains(&format!("d=\"M{m} {m}h1v1h-1z", m = options.margin)));
    }

    #[test]
    fn svg_pixel_size_rounds_to_whole_modules() {
        let payload = "USR123456789";
        let options = QrOptions::default();
        let width = QrCode::new(payload.as_bytes()).unwrap().width() as u32;
        let span = width + 2 * options.margin;
        let edge = span * (options.size / span);
        let svg = render_svg(payload, &options).unwrap();
        assert!(svg.contains(&format!("width=\"{edge}\" height=\"{edge}\"")));
    }

    fn decode_png(png: &[u8]) -> String {
        let luma = image::load_from_memory(png).unwrap().to_luma8();
        let mut prepared = rqrr::PreparedImage::prepare_from_greyscale(
            luma.width() as usize,
            luma.height() as usize,
            |x, y| luma.get_pixel(x as u32, y as u32).0[0],
        );
        let grids = prepared.detect_grids();
        assert_eq!(grids.len(), 1, "expected exactly one QR symbol");
        let (_meta, content) = grids[0].decode().unwrap();
        content
    }

    #[test]
    fn png_decodes_back_to_payload() {
        for payload in ["USR123456789", "USR987654321", "DOC000001042"] {
            let png = render_png(payload, 400, &QrOptions::default()).unwrap();
            assert_eq!(decode_png(&png), payload);
        }
    }

    #[test]
    fn data_url_png_decodes_back_to_payload() {
        let rendered = render_qr("USR987654321", &QrOptions::default()).unwrap();
        let encoded = rendered
            .png_data_url
            .strip_prefix("data:image/png;base64,")
            .unwrap();
        let png = base64::engine::general_purpose::STANDARD.decode(encoded).unwrap();
        assert_eq!(decode_png(&png), "USR987654321");
    }

    #[test]
    fn png_with_wide_margin_still_decodes() {
        let options = QrOptions {
            margin: 4,
            ..QrOptions::default()
        };
        let png = render_png("USR555000111", 300, &options).unwrap();
        assert_eq!(decode_png(&png), "USR555000111");
    }

    #[test]
    fn png_reads_back_to_the_same_modules() {
        let payload = "USR987654321";
        let options = QrOptions::default();
        let png = render_png(payload, 400, &options).unwrap();

        let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
        let code = QrCode::new(payload.as_bytes()).unwrap();
        let width = code.width() as u32;
        let span = width + 2 * options.margin;
        let module_px = 400 / span;
        assert_eq!(decoded.width(), span * module_px);

        let dark = parse_hex_color(&options.dark).unwrap();
        let colors = code.to_colors();
        for r in 0..width {
            for c in 0..width {
                let x = (options.margin + c) * module_px + module_px / 2;
                let y = (options.margin + r) * module_px + module_px / 2;
                let is_dark = *decoded.get_pixel(x, y) == dark;
                assert_eq!(is_dark, colors[(r * width + c) as usize] == Color::Dark);
            }
        }
    }

    #[test]
    fn png_margin_is_light() {
        let options = QrOptions::default();
        let png = render_png("margin", 200, &options).unwrap();
        let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
        assert_eq!(*decoded.get_pixel(0, 0), Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn data_url_is_base64_png() {
        let rendered = render_qr("USR123456789", &QrOptions::default()).unwrap();
        let encoded = rendered
            .png_data_url
            .strip_prefix("data:image/png;base64,")
            .unwrap();
        let bytes = base64::engine::general_purpose::STANDARD.decode(encoded).unwrap();
        assert_eq!(&bytes[..4], &[0x89, b'P', b'N', b'G']);
    }

    #[test]
    fn empty_payload_still_renders() {
        assert!(render_qr("", &QrOptions::default()).is_ok());
        assert_eq!(download_filename(""), "health-card-qr.png");
    }

    #[test]
    fn card_html_escapes_and_embeds_qr() {
        let card = HealthCard::for_worker(&test_worker(), &QrOptions::default()).unwrap();
        assert_eq!(card.download_filename, "health-card-USR123456789.png");
        assert_eq!(card.qr.payload, "USR123456789");

        let html = card.to_html();
        assert!(html.contains("Ramesh &lt;Kumar&gt;"));
        assert!(!html.contains("Ramesh <Kumar>"));
        assert!(html.contains("<svg"));
        assert!(html.contains("Emergency Contact"));
    }
}
