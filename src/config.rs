use std::path::{Path, PathBuf};

use crate::Field;

pub const DEFAULT_OUTPUT: &str = "shared_lock_comparison_no_baseline.png";
pub const DEFAULT_ANNOTATION: &str = "With vector parallelism";
pub const DEFAULT_SIZE: (u32, u32) = (1024, 768);

/// A results file and the legend entry of its line.
#[derive(Debug, Clone, PartialEq)]
pub struct Source {
    pub path: PathBuf,
    pub label: String,
}

impl Source {
    pub fn new<P: Into<PathBuf>, L: Into<String>>(path: P, label: L) -> Source {
        Source {
            path: path.into(),
            label: label.into(),
        }
    }

    /// `PATH=LABEL`, or just `PATH` to use the file stem as label.
    pub fn from_arg(arg: &str) -> Source {
        match arg.rsplit_once('=') {
            Some((path, label)) if !path.is_empty() && !label.is_empty() => {
                Source::new(path, label)
            }
            _ => Source::new(arg, stem(Path::new(arg))),
        }
    }
}

fn stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Everything one comparison run needs.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub sources: Vec<Source>,
    pub x_axis: Field,
    pub y_axis: Field,
    /// Fields that must hold the same value in every trial of every series.
    pub consistent: Vec<Field>,
    /// Free text placed in the plot title.
    pub annotation: String,
    pub output: PathBuf,
    pub size: (u32, u32),
}

impl Default for Config {
    fn default() -> Config {
        Config {
            sources: Vec::new(),
            x_axis: Field::Threads,
            y_axis: Field::Time,
            consistent: vec![Field::KeyMax, Field::Iters],
            annotation: String::from(DEFAULT_ANNOTATION),
            output: PathBuf::from(DEFAULT_OUTPUT),
            size: DEFAULT_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_with_label() {
        let s = Source::from_arg("runs/fivepercentbalavx.txt=Before shared lock");
        assert_eq!(s.path, PathBuf::from("runs/fivepercentbalavx.txt"));
        assert_eq!(s.label, "Before shared lock");
    }

    #[test]
    fn source_label_defaults_to_stem() {
        let s = Source::from_arg("runs/serial_baseline.txt");
        assert_eq!(s.label, "serial_baseline");
        let s = Source::from_arg("serial_baseline.txt=");
        assert_eq!(s.path, PathBuf::from("serial_baseline.txt="));
        assert_eq!(s.label, "serial_baseline");
    }

    #[test]
    fn defaults() {
        let c = Config::default();
        assert!(c.sources.is_empty());
        assert_eq!((c.x_axis, c.y_axis), (Field::Threads, Field::Time));
        assert_eq!(c.consistent, vec![Field::KeyMax, Field::Iters]);
        assert_eq!(c.output, PathBuf::from(DEFAULT_OUTPUT));
    }
}
