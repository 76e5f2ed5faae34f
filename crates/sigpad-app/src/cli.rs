//! Command line replay of a captured signature.

use kurbo::Size;
use sigpad_core::{
    Container, SignatureError, StrokeList, Surface, WidgetConfig, parse_coordinate_string,
};
use sigpad_render::RasterSignature;
use std::io::{Read, Write};
use std::path::PathBuf;
use thiserror::Error;

pub const USAGE: &str = "\
Usage: sigpad [OPTIONS] [COORDS]

Replays a coordinate string (x,y,x,y:x,y,...) into a signature and exports it.
COORDS is read from stdin when omitted.

Options:
  --size WxH         result image size (default 320x160)
  --container WxH    display container size (default: the result size)
  --config FILE      widget configuration as JSON
  --out FILE         write the result PNG to FILE
  -h, --help         show this help";

/// Application errors.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Usage(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),
    #[error(transparent)]
    Signature(#[from] SignatureError),
}

/// Parsed command line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliOptions {
    pub size: Option<(u32, u32)>,
    pub container: Option<Size>,
    pub config: Option<PathBuf>,
    pub out: Option<PathBuf>,
    pub coords: Option<String>,
    pub help: bool,
}

/// Parse arguments (without the program name).
pub fn parse_args(args: &[String]) -> Result<CliOptions, AppError> {
    let mut options = CliOptions::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-h" | "--help" => options.help = true,
            "--size" => {
                let (w, h) = parse_dimensions(next_value(&mut iter, arg)?)?;
                options.size = Some((w as u32, h as u32));
            }
            "--container" => {
                let (w, h) = parse_dimensions(next_value(&mut iter, arg)?)?;
                options.container = Some(Size::new(w, h));
            }
            "--config" => options.config = Some(PathBuf::from(next_value(&mut iter, arg)?)),
            "--out" => options.out = Some(PathBuf::from(next_value(&mut iter, arg)?)),
            flag if flag.starts_with("--") => {
                return Err(AppError::Usage(format!("Unknown option {}", flag)));
            }
            coords => {
                if options.coords.is_some() {
                    return Err(AppError::Usage("Only one coordinate string allowed".to_string()));
                }
                options.coords = Some(coords.to_string());
            }
        }
    }

    Ok(options)
}

fn next_value<'a>(
    iter: &mut std::slice::Iter<'a, String>,
    flag: &str,
) -> Result<&'a str, AppError> {
    iter.next()
        .map(String::as_str)
        .ok_or_else(|| AppError::Usage(format!("{} needs a value", flag)))
}

/// Parse `WxH` into positive dimensions.
fn parse_dimensions(s: &str) -> Result<(f64, f64), AppError> {
    let invalid = || AppError::Usage(format!("Invalid size '{}', expected WxH", s));
    let (w, h) = s.split_once(['x', 'X']).ok_or_else(invalid)?;
    let w: u32 = w.trim().parse().map_err(|_| invalid())?;
    let h: u32 = h.trim().parse().map_err(|_| invalid())?;
    if w == 0 || h == 0 {
        return Err(invalid());
    }
    Ok((w as f64, h as f64))
}

/// What a run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub strokes: usize,
    pub coord_string: String,
    pub data_url_len: usize,
}

/// Replay the coordinates and write the exports.
///
/// `input` is only read when no coordinate string was given on the command
/// line. The report goes to `out`.
pub fn run(
    options: &CliOptions,
    mut input: impl Read,
    mut out: impl Write,
) -> Result<RunSummary, AppError> {
    let mut config = match &options.config {
        Some(path) => WidgetConfig::from_json(&std::fs::read_to_string(path)?)?,
        None => WidgetConfig::default(),
    };
    if let Some((w, h)) = options.size {
        config.result_width = w;
        config.result_height = h;
    }
    let (result_width, result_height) = config.result_size();

    let coords = match &options.coords {
        Some(coords) => coords.clone(),
        None => {
            let mut buffer = String::new();
            input.read_to_string(&mut buffer)?;
            buffer
        }
    };
    let seed = StrokeList::from(&parse_coordinate_string(&coords)?[..]);

    let container = options
        .container
        .unwrap_or_else(|| Size::new(result_width as f64, result_height as f64));

    let mut widget = RasterSignature::new(config);
    widget.init(
        Container::new(container.width, container.height),
        result_width,
        result_height,
        &seed,
    )?;

    let data_url = widget.export_image()?;
    if let Some(path) = &options.out {
        let png = widget
            .result_surface()
            .ok_or_else(|| AppError::Usage("Signature has no result surface".to_string()))?
            .encode_png()
            .map_err(SignatureError::from)?;
        std::fs::write(path, png)?;
        log::info!("Wrote {}", path.display());
    }

    let summary = RunSummary {
        strokes: widget.strokes().len(),
        coord_string: widget.export_coordinate_string(),
        data_url_len: data_url.len(),
    };

    writeln!(out, "strokes: {}", summary.strokes)?;
    writeln!(out, "coordString: {}", summary.coord_string)?;
    writeln!(out, "coordData: {}", widget.export_coordinates_json()?)?;
    writeln!(out, "dataUrl: {} bytes", summary.data_url_len)?;

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_args() {
        let options = parse_args(&args(&[
            "--size", "400x200", "--container", "800X600", "--out", "sig.png", "1,2,3,4",
        ]))
        .unwrap();

        assert_eq!(options.size, Some((400, 200)));
        assert_eq!(options.container, Some(Size::new(800.0, 600.0)));
        assert_eq!(options.out, Some(PathBuf::from("sig.png")));
        assert_eq!(options.coords.as_deref(), Some("1,2,3,4"));
    }

    #[test]
    fn test_parse_args_errors() {
        assert!(matches!(parse_args(&args(&["--size"])), Err(AppError::Usage(_))));
        assert!(matches!(parse_args(&args(&["--size", "0x5"])), Err(AppError::Usage(_))));
        assert!(matches!(parse_args(&args(&["--bogus"])), Err(AppError::Usage(_))));
        assert!(matches!(parse_args(&args(&["1,2", "3,4"])), Err(AppError::Usage(_))));
    }

    #[test]
    fn test_run_reports_coordinates() {
        let options = parse_args(&args(&["--container", "640x320", "10,10,20,20:5,5"])).unwrap();
        let mut out = Vec::new();

        let summary = run(&options, std::io::empty(), &mut out).unwrap();

        assert_eq!(summary.strokes, 2);
        assert_eq!(summary.coord_string, "10,10,20,20:5,5");
        let report = String::from_utf8(out).unwrap();
        assert!(report.contains("coordData: [[[10,10],[20,20]],[[5,5]]]"));
    }

    #[test]
    fn test_run_reads_stdin() {
        let options = CliOptions::default();
        let summary = run(&options, "1,2,3,4\n".as_bytes(), std::io::sink()).unwrap();
        assert_eq!(summary.coord_string, "1,2,3,4");
    }

    #[test]
    fn test_run_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("signature.png");
        let options = CliOptions {
            size: Some((200, 100)),
            out: Some(path.clone()),
            coords: Some("10,50,190,50".to_string()),
            ..Default::default()
        };

        run(&options, std::io::empty(), std::io::sink()).unwrap();

        let image = image::open(&path).unwrap().to_rgba8();
        assert_eq!(image.dimensions(), (200, 100));
        assert_eq!(image.get_pixel(100, 50).0, [0, 0, 0, 255]);
    }

    #[test]
    fn test_run_with_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"result_width": 100, "result_height": 50}"#).unwrap();
        let options = CliOptions {
            config: Some(path),
            coords: Some(String::new()),
            ..Default::default()
        };

        let summary = run(&options, std::io::empty(), std::io::sink()).unwrap();
        assert_eq!(summary.strokes, 0);
        assert_eq!(summary.coord_string, "");
    }

    #[test]
    fn test_run_rejects_bad_coordinates() {
        let options = CliOptions {
            coords: Some("1,2,3".to_string()),
            ..Default::default()
        };
        let result = run(&options, std::io::empty(), std::io::sink());
        assert!(matches!(result, Err(AppError::Signature(SignatureError::InvalidCoordinates(_)))));
    }
}
