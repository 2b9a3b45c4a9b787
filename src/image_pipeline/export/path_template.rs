//! Output path templates with an optional printf-style frame number.
//!
//! Supported: literal text, `%%`, and at most one integer conversion
//! (`%d`, `%i`, `%u`) with an optional `0` flag and field width, e.g.
//! `cam-%03d.png`. A template without a conversion names the same file for
//! every frame.

use std::fmt;
use std::iter::Peekable;
use std::path::PathBuf;
use std::str::Chars;

use crate::image_pipeline::common::error::{CaptureError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Placeholder {
    zero_pad: bool,
    width: usize,
}

impl Placeholder {
    fn render(&self, value: u64) -> String {
        if self.zero_pad {
            format!("{value:0width$}", width = self.width)
        } else {
            format!("{value:width$}", width = self.width)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTemplate {
    source: String,
    prefix: String,
    placeholder: Option<Placeholder>,
    suffix: String,
}

impl PathTemplate {
    pub fn parse(template: &str) -> Result<Self> {
        if template.is_empty() {
            return Err(CaptureError::InvalidPathTemplate(
                "template is empty".to_owned(),
            ));
        }

        let mut prefix = String::new();
        let mut suffix = String::new();
        let mut placeholder = None;
        let mut chars = template.chars().peekable();

        while let Some(c) = chars.next() {
            let segment = if placeholder.is_some() {
                &mut suffix
            } else {
                &mut prefix
            };

            if c != '%' {
                segment.push(c);
                continue;
            }

            if chars.peek() == Some(&'%') {
                chars.next();
                segment.push('%');
                continue;
            }

            let parsed = parse_conversion(&mut chars, template)?;
            if placeholder.is_some() {
                return Err(CaptureError::InvalidPathTemplate(format!(
                    "{template}: more than one frame number placeholder"
                )));
            }
            placeholder = Some(parsed);
        }

        Ok(Self {
            source: template.to_owned(),
            prefix,
            placeholder,
            suffix,
        })
    }

    /// Whether successive frames get distinct paths.
    pub fn is_numbered(&self) -> bool {
        self.placeholder.is_some()
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn render(&self, frame_number: u64) -> PathBuf {
        let mut path = self.prefix.clone();
        if let Some(placeholder) = &self.placeholder {
            path.push_str(&placeholder.render(frame_number));
        }
        path.push_str(&self.suffix);
        PathBuf::from(path)
    }
}

impl fmt::Display for PathTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

fn parse_conversion(chars: &mut Peekable<Chars<'_>>, template: &str) -> Result<Placeholder> {
    let zero_pad = chars.next_if_eq(&'0').is_some();

    let mut width = 0usize;
    while let Some(digit) = chars.peek().and_then(|c| c.to_digit(10)) {
        chars.next();
        width = width
            .checked_mul(10)
            .and_then(|w| w.checked_add(digit as usize))
            .ok_or_else(|| {
                CaptureError::InvalidPathTemplate(format!("{template}: field width too large"))
            })?;
    }

    match chars.next() {
        Some('d' | 'i' | 'u') => Ok(Placeholder { zero_pad, width }),
        Some(other) => Err(CaptureError::InvalidPathTemplate(format!(
            "{template}: unsupported conversion '%{other}'"
        ))),
        None => Err(CaptureError::InvalidPathTemplate(format!(
            "{template}: dangling '%'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_path_is_fixed() {
        let template = PathTemplate::parse("cam.jpg").unwrap();
        assert!(!template.is_numbered());
        assert_eq!(template.render(0), PathBuf::from("cam.jpg"));
        assert_eq!(template.render(41), PathBuf::from("cam.jpg"));
    }

    #[test]
    fn test_zero_padded_placeholder() {
        let template = PathTemplate::parse("cam-%03d.jpg").unwrap();
        assert!(template.is_numbered());
        assert_eq!(template.render(0), PathBuf::from("cam-000.jpg"));
        assert_eq!(template.render(7), PathBuf::from("cam-007.jpg"));
        assert_eq!(template.render(1234), PathBuf::from("cam-1234.jpg"));
    }

    #[test]
    fn test_plain_and_space_padded_placeholders() {
        assert_eq!(
            PathTemplate::parse("/tmp/f%d.png").unwrap().render(12),
            PathBuf::from("/tmp/f12.png")
        );
        assert_eq!(
            PathTemplate::parse("f%4u.png").unwrap().render(5),
            PathBuf::from("f   5.png")
        );
        assert_eq!(
            PathTemplate::parse("%i").unwrap().render(3),
            PathBuf::from("3")
        );
    }

    #[test]
    fn test_literal_percent() {
        let template = PathTemplate::parse("100%%-%02d.png").unwrap();
        assert_eq!(template.render(4), PathBuf::from("100%-04.png"));

        let fixed = PathTemplate::parse("50%%.png").unwrap();
        assert!(!fixed.is_numbered());
        assert_eq!(fixed.render(9), PathBuf::from("50%.png"));
    }

    #[test]
    fn test_rejects_bad_templates() {
        for bad in ["", "cam-%d-%d.png", "cam-%s.png", "cam-%", "cam-%05"] {
            assert!(
                matches!(
                    PathTemplate::parse(bad),
                    Err(CaptureError::InvalidPathTemplate(_))
                ),
                "{bad:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_display_keeps_source() {
        let template = PathTemplate::parse("out/%05d.tiff").unwrap();
        assert_eq!(template.to_string(), "out/%05d.tiff");
        assert_eq!(template.as_str(), "out/%05d.tiff");
    }
}
