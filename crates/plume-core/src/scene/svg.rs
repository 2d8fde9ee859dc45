//! SVG subset import and export for clipboard interchange.
//!
//! Only what the editor itself produces needs to survive a round trip:
//! `<path>` elements with `M`/`L`/`Z` data and stroke/fill/stroke-width
//! attributes. Import is forgiving about curves (`C` keeps the endpoint)
//! and relative commands, strict about everything else.

use super::{Path, PathStyle};
use crate::color::Color;
use kurbo::Point;
use std::fmt::Write as _;
use thiserror::Error;

/// Error importing SVG text.
#[derive(Debug, Error)]
pub enum SvgError {
    #[error("no path elements found")]
    NoPaths,
    #[error("bad path data: {0}")]
    BadPathData(String),
    #[error("bad attribute value: {0}")]
    BadAttribute(String),
}

/// Serialize paths as a standalone SVG document.
pub fn export<'a, I>(paths: I) -> String
where
    I: IntoIterator<Item = &'a Path>,
{
    let mut out = String::from(r#"<svg xmlns="http://www.w3.org/2000/svg">"#);
    for path in paths {
        let mut data = String::new();
        for (i, seg) in path.segments.iter().enumerate() {
            let cmd = if i == 0 { 'M' } else { 'L' };
            let _ = write!(data, "{}{} {} ", cmd, num(seg.point.x), num(seg.point.y));
        }
        if path.closed {
            data.push('Z');
        }
        let _ = write!(
            out,
            r#"<path d="{}" stroke="{}" stroke-width="{}" fill="{}"/>"#,
            data.trim_end(),
            paint(path.style.stroke),
            num(path.style.stroke_width),
            paint(path.style.fill),
        );
    }
    out.push_str("</svg>");
    out
}

/// Parse SVG text into paths. Fails without side effects; callers add
/// the result to the scene themselves.
pub fn import(text: &str) -> Result<Vec<Path>, SvgError> {
    let mut paths = Vec::new();
    let mut rest = text;
    while let Some(start) = rest.find("<path") {
        let element = &rest[start..];
        let end = element
            .find('>')
            .ok_or_else(|| SvgError::BadPathData("unterminated element".to_string()))?;
        paths.push(parse_element(&element[..end])?);
        rest = &element[end..];
    }
    if paths.is_empty() {
        return Err(SvgError::NoPaths);
    }
    Ok(paths)
}

fn parse_element(element: &str) -> Result<Path, SvgError> {
    let data = attribute(element, "d")
        .ok_or_else(|| SvgError::BadPathData("missing d attribute".to_string()))?;
    let (points, closed) = parse_path_data(data)?;

    // SVG defaults: black fill, no stroke.
    let stroke = match attribute(element, "stroke") {
        Some(value) => parse_paint(value)?,
        None => Color::TRANSPARENT,
    };
    let fill = match attribute(element, "fill") {
        Some(value) => parse_paint(value)?,
        None => Color::BLACK,
    };
    let stroke_width = match attribute(element, "stroke-width") {
        Some(value) => value
            .parse::<f64>()
            .map_err(|_| SvgError::BadAttribute(value.to_string()))?,
        None => 1.0,
    };

    let mut path = Path::new(
        points,
        PathStyle {
            stroke,
            fill,
            stroke_width,
        },
    );
    path.closed = closed;
    Ok(path)
}

/// Value of `name="..."` within an element, if present.
fn attribute<'a>(element: &'a str, name: &str) -> Option<&'a str> {
    let needle = format!(" {name}=\"");
    let start = element.find(&needle)? + needle.len();
    let rest = &element[start..];
    let end = rest.find('"')?;
    Some(&rest[..end])
}

fn parse_paint(value: &str) -> Result<Color, SvgError> {
    if value == "none" {
        return Ok(Color::TRANSPARENT);
    }
    value
        .parse()
        .map_err(|_| SvgError::BadAttribute(value.to_string()))
}

fn paint(color: Color) -> String {
    if color.is_visible() {
        color.to_hex()
    } else {
        "none".to_string()
    }
}

enum Token {
    Cmd(char),
    Num(f64),
}

fn tokenize(data: &str) -> Result<Vec<Token>, SvgError> {
    let mut tokens = Vec::new();
    let mut chars = data.char_indices().peekable();
    while let Some(&(i, c)) = chars.peek() {
        if c.is_whitespace() || c == ',' {
            chars.next();
        } else if c.is_ascii_alphabetic() {
            tokens.push(Token::Cmd(c));
            chars.next();
        } else {
            let start = i;
            let mut end = i;
            while let Some(&(j, c)) = chars.peek() {
                if c.is_ascii_digit() || c == '.' || ((c == '-' || c == '+') && j == start) {
                    end = j + c.len_utf8();
                    chars.next();
                } else {
                    break;
                }
            }
            let num = data[start..end]
                .parse::<f64>()
                .map_err(|_| SvgError::BadPathData(data[start..end].to_string()))?;
            tokens.push(Token::Num(num));
        }
    }
    Ok(tokens)
}

/// Interpret path data, keeping only on-path endpoints.
fn parse_path_data(data: &str) -> Result<(Vec<Point>, bool), SvgError> {
    let tokens = tokenize(data)?;
    let mut points: Vec<Point> = Vec::new();
    let mut closed = false;
    let mut cmd = ' ';
    let mut i = 0;

    let bad = |what: &str| SvgError::BadPathData(what.to_string());

    while i < tokens.len() {
        if let Token::Cmd(c) = tokens[i] {
            cmd = c;
            i += 1;
            if matches!(cmd, 'Z' | 'z') {
                closed = true;
                continue;
            }
        }
        let relative = cmd.is_ascii_lowercase();
        let current = points.last().copied().unwrap_or(Point::ZERO);
        // Each command consumes its coordinates from the token stream;
        // repeated coordinate groups repeat the command (M repeats as L).
        let mut take = |i: &mut usize| -> Result<f64, SvgError> {
            match tokens.get(*i) {
                Some(Token::Num(n)) => {
                    *i += 1;
                    Ok(*n)
                }
                _ => Err(bad("expected number")),
            }
        };
        match cmd.to_ascii_uppercase() {
            'M' | 'L' => {
                let x = take(&mut i)?;
                let y = take(&mut i)?;
                let p = if relative {
                    Point::new(current.x + x, current.y + y)
                } else {
                    Point::new(x, y)
                };
                points.push(p);
                if cmd == 'M' {
                    cmd = 'L';
                } else if cmd == 'm' {
                    cmd = 'l';
                }
            }
            'H' => {
                let x = take(&mut i)?;
                let x = if relative { current.x + x } else { x };
                points.push(Point::new(x, current.y));
            }
            'V' => {
                let y = take(&mut i)?;
                let y = if relative { current.y + y } else { y };
                points.push(Point::new(current.x, y));
            }
            'C' => {
                // Drop the control points, keep where the curve lands.
                let _ = take(&mut i)?;
                let _ = take(&mut i)?;
                let _ = take(&mut i)?;
                let _ = take(&mut i)?;
                let x = take(&mut i)?;
                let y = take(&mut i)?;
                let p = if relative {
                    Point::new(current.x + x, current.y + y)
                } else {
                    Point::new(x, y)
                };
                points.push(p);
            }
            other => return Err(bad(&format!("unsupported command {other:?}"))),
        }
    }

    if points.is_empty() {
        return Err(bad("empty path data"));
    }
    Ok((points, closed))
}

/// Compact number formatting: enough precision for pixel coordinates,
/// no trailing zeros.
fn num(value: f64) -> String {
    let mut s = format!("{value:.5}");
    while s.ends_with('0') {
        s.pop();
    }
    if s.ends_with('.') {
        s.pop();
    }
    s
}
