//! Static snapshots of the colored map: standalone SVG everywhere, PNG on native.

use std::borrow::Cow;
use std::fmt::Write as _;
use std::path::PathBuf;

use super::activation::ActivationDataset;
use super::outline::BodyOutline;
use super::ramp::color_for;

const SILHOUETTE_FILL: &str = "#eef0f4";
const SILHOUETTE_STROKE: &str = "#9aa1ad";
const BACKGROUND: &str = "#ffffff";

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("snapshot SVG could not be parsed: {0}")]
    Svg(String),
    #[error("cannot allocate a {width}x{height} pixmap")]
    Pixmap { width: u32, height: u32 },
    #[error("PNG encoding failed: {0}")]
    Encode(String),
    #[error("writing snapshot failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("unable to determine export directory")]
    NoDataDir,
    #[error("snapshot export is not available on this platform")]
    Unsupported,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotFormat {
    Svg,
    Png,
}

impl SnapshotFormat {
    pub fn extension(self) -> &'static str {
        match self {
            SnapshotFormat::Svg => "svg",
            SnapshotFormat::Png => "png",
        }
    }
}

/// Width and height from a `min-x min-y width height` view box.
fn view_box_size(view_box: &str) -> (f64, f64) {
    let parts: Vec<f64> = view_box
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|part| !part.is_empty())
        .filter_map(|part| part.parse().ok())
        .collect();
    match parts.as_slice() {
        [_, _, width, height] if *width > 0.0 && *height > 0.0 => (*width, *height),
        _ => (400.0, 300.0),
    }
}

/// Standalone SVG document with every region painted from `dataset`.
pub fn render_svg(outline: &BodyOutline, dataset: &ActivationDataset) -> String {
    let (width, height) = view_box_size(&outline.view_box);
    let max = dataset.max();

    let mut svg = String::new();
    let _ = writeln!(
        svg,
        "<svg xmlns='http://www.w3.org/2000/svg' width='{width}' height='{height}' viewBox='{}'>",
        escape_attr(&outline.view_box)
    );
    let _ = writeln!(
        svg,
        "  <rect x='0' y='0' width='100%' height='100%' fill='{BACKGROUND}'/>"
    );
    for d in &outline.silhouette {
        let _ = writeln!(
            svg,
            "  <path d='{}' fill='{SILHOUETTE_FILL}' stroke='{SILHOUETTE_STROKE}' stroke-width='1'/>",
            escape_attr(d)
        );
    }
    for shape in &outline.shapes {
        let fill = color_for(dataset.get(shape.region), max).clamped();
        let _ = writeln!(
            svg,
            "  <path class='{}' d='{}' fill='rgb({}, {}, {})' fill-opacity='{}'/>",
            shape.region.key(),
            escape_attr(&shape.d),
            fill.r,
            fill.g,
            fill.b,
            fill.alpha
        );
    }
    svg.push_str("</svg>\n");
    svg
}

/// Escape outline text for a single-quoted XML attribute.
fn escape_attr(raw: &str) -> Cow<'_, str> {
    if !raw.contains(['&', '<', '>', '\'', '"']) {
        return Cow::Borrowed(raw);
    }
    let mut escaped = String::with_capacity(raw.len() + 8);
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '\'' => escaped.push_str("&apos;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    Cow::Owned(escaped)
}

/// Rasterize `svg` at `scale` and encode it as straight-alpha RGBA PNG.
#[cfg(not(target_arch = "wasm32"))]
pub fn rasterize_png(svg: &str, scale: f32) -> Result<Vec<u8>, SnapshotError> {
    let tree = usvg::Tree::from_str(svg, &usvg::Options::default())
        .map_err(|err| SnapshotError::Svg(err.to_string()))?;
    let size = tree.size();
    let width = (size.width() * scale).ceil().max(1.0) as u32;
    let height = (size.height() * scale).ceil().max(1.0) as u32;

    let mut pixmap =
        tiny_skia::Pixmap::new(width, height).ok_or(SnapshotError::Pixmap { width, height })?;
    resvg::render(
        &tree,
        tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );

    let mut rgba = Vec::with_capacity((width * height * 4) as usize);
    for pixel in pixmap.pixels() {
        let color = pixel.demultiply();
        rgba.extend_from_slice(&[color.red(), color.green(), color.blue(), color.alpha()]);
    }

    let mut buffer = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut buffer, width, height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        encoder
            .write_header()
            .and_then(|mut writer| writer.write_image_data(&rgba))
            .map_err(|err| SnapshotError::Encode(err.to_string()))?;
    }
    Ok(buffer)
}

fn timestamp_slug() -> String {
    use time::{macros::format_description, OffsetDateTime};

    OffsetDateTime::now_utc()
        .format(&format_description!(
            "[year][month][day]_[hour][minute][second]"
        ))
        .unwrap_or_else(|_| "snapshot".into())
}

pub fn snapshot_filename(format: SnapshotFormat) -> String {
    format!("musclemap-{}.{}", timestamp_slug(), format.extension())
}

#[cfg(not(target_arch = "wasm32"))]
fn export_dir() -> Result<PathBuf, SnapshotError> {
    let dirs = directories::ProjectDirs::from("com", "MuscleMap", "MuscleMap")
        .ok_or(SnapshotError::NoDataDir)?;
    Ok(dirs.data_dir().join("snapshots"))
}

/// Render and write a snapshot into the platform data directory.
#[cfg(not(target_arch = "wasm32"))]
pub fn save_snapshot(
    format: SnapshotFormat,
    outline: &BodyOutline,
    dataset: &ActivationDataset,
) -> Result<PathBuf, SnapshotError> {
    let svg = render_svg(outline, dataset);
    let bytes = match format {
        SnapshotFormat::Svg => svg.into_bytes(),
        SnapshotFormat::Png => rasterize_png(&svg, 2.0)?,
    };

    let dir = export_dir()?;
    std::fs::create_dir_all(&dir)?;
    let path = dir.join(snapshot_filename(format));
    std::fs::write(&path, bytes)?;
    tracing::info!(path = %path.display(), ?format, "saved activation snapshot");
    Ok(path)
}

#[cfg(target_arch = "wasm32")]
pub fn save_snapshot(
    _format: SnapshotFormat,
    _outline: &BodyOutline,
    _dataset: &ActivationDataset,
) -> Result<PathBuf, SnapshotError> {
    Err(SnapshotError::Unsupported)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::region::RegionId;

    fn outline() -> BodyOutline {
        BodyOutline::from_json(
            r#"{"view_box":"0 0 40 20","silhouette":["M0 0h40v20h-40z"],"shapes":[
                {"region":"chest","d":"M2 2h10v10h-10z"},
                {"region":"abs","d":"M20 2h10v10h-10z"}
            ]}"#,
        )
        .unwrap()
    }

    #[test]
    fn svg_paints_every_shape() {
        let dataset = ActivationDataset::new([(RegionId::Chest, 100.0)], 100.0);
        let svg = render_svg(&outline(), &dataset);

        assert!(svg.starts_with("<svg xmlns='http://www.w3.org/2000/svg' width='40' height='20'"));
        assert!(svg.contains("class='chest' d='M2 2h10v10h-10z' fill='rgb(139, 0, 0)' fill-opacity='0.8'"));
        assert!(svg.contains("class='abs' d='M20 2h10v10h-10z' fill='rgb(171, 171, 171)'"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn outline_text_cannot_break_out_of_attributes() {
        let outline = BodyOutline::from_json(
            r#"{"view_box":"0 0 40 20' onload='x","shapes":[
                {"region":"chest","d":"M2 2h10' fill='url(#x)"}
            ]}"#,
        )
        .unwrap();
        let svg = render_svg(&outline, &ActivationDataset::empty());

        assert!(svg.contains("viewBox='0 0 40 20&apos; onload=&apos;x'"));
        assert!(svg.contains("d='M2 2h10&apos; fill=&apos;url(#x)' fill='rgb(171, 171, 171)'"));
        assert!(!svg.contains("onload='"));
    }

    #[test]
    fn malformed_view_box_falls_back() {
        assert_eq!(view_box_size("0 0 800 600"), (800.0, 600.0));
        assert_eq!(view_box_size("0,0,10,5"), (10.0, 5.0));
        assert_eq!(view_box_size("nonsense"), (400.0, 300.0));
        assert_eq!(view_box_size("0 0 -1 5"), (400.0, 300.0));
    }

    #[test]
    fn filenames_carry_extension() {
        let name = snapshot_filename(SnapshotFormat::Png);
        assert!(name.starts_with("musclemap-"));
        assert!(name.ends_with(".png"));
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn png_has_signature_and_dimensions() {
        let svg = render_svg(&outline(), &ActivationDataset::empty());
        let png = rasterize_png(&svg, 2.0).expect("rasterizes");

        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
        let width = u32::from_be_bytes([png[16], png[17], png[18], png[19]]);
        let height = u32::from_be_bytes([png[20], png[21], png[22], png[23]]);
        assert_eq!((width, height), (80, 40));
    }
}
