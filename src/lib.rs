use log::{debug, info};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
pub mod chart;
pub mod config;
pub mod consistency;
pub mod error;
pub mod plot;

pub use config::{Config, Source};
pub use consistency::{check_consistency, Dataset};
pub use error::{Error, LineError, Result};

pub const VERSION: Option<&'static str> = option_env!("CARGO_PKG_VERSION");

pub const COMMENT_MARKER: char = '#';
pub const FIELD_SEPARATOR: char = ',';
pub const FIELDS_PER_LINE: usize = 5;

/// One benchmark measurement, one line of a results file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Trial {
    pub threads: i64,
    pub key_max: i64,
    pub iters: i64,
    pub time: i64,
    pub time_serial: i64,
}

impl FromStr for Trial {
    type Err = LineError;

    /// Parses `threads,key_max,iters,time,time_serial`,
    /// ignoring whitespace around each value.
    fn from_str(line: &str) -> std::result::Result<Trial, LineError> {
        let tokens: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
        if tokens.len() != FIELDS_PER_LINE {
            return Err(LineError::FieldCount(tokens.len()));
        }
        let mut values = [0i64; FIELDS_PER_LINE];
        for ((v, token), &field) in values.iter_mut().zip(tokens.iter()).zip(Field::ALL.iter()) {
            let token = token.trim();
            *v = token.parse().map_err(|source| LineError::ParseInt {
                field,
                value: token.to_string(),
                source,
            })?;
        }
        Ok(Trial {
            threads: values[0],
            key_max: values[1],
            iters: values[2],
            time: values[3],
            time_serial: values[4],
        })
    }
}

/// The columns of a trial that can be plotted or checked for consistency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Threads,
    KeyMax,
    Iters,
    Time,
    TimeSerial,
}

impl Field {
    /// In file column order.
    pub const ALL: [Field; FIELDS_PER_LINE] = [
        Field::Threads,
        Field::KeyMax,
        Field::Iters,
        Field::Time,
        Field::TimeSerial,
    ];

    pub const NAMES: [&'static str; FIELDS_PER_LINE] =
        ["threads", "key_max", "iters", "time", "time_serial"];

    pub fn name(self) -> &'static str {
        Field::NAMES[self as usize]
    }

    pub fn value(self, trial: &Trial) -> i64 {
        match self {
            Field::Threads => trial.threads,
            Field::KeyMax => trial.key_max,
            Field::Iters => trial.iters,
            Field::Time => trial.time,
            Field::TimeSerial => trial.time_serial,
        }
    }
}

impl FromStr for Field {
    type Err = Error;

    fn from_str(s: &str) -> Result<Field> {
        Field::ALL
            .iter()
            .copied()
            .find(|f| f.name() == s.trim())
            .ok_or_else(|| Error::InvalidField(s.to_string()))
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// The trials read from one results file, in file order, with their legend label.
#[derive(Debug, Clone, PartialEq)]
pub struct TrialSeries {
    pub label: String,
    pub path: PathBuf,
    pub trials: Vec<Trial>,
}

impl TrialSeries {
    /// Init a TrialSeries from a results file.
    /// The first line is a header and is dropped without looking at it,
    /// blank lines and `#` comments are skipped,
    /// any other line must parse as a trial or the whole file is rejected.
    pub fn from_file(path: &Path, label: &str) -> Result<TrialSeries> {
        let text = fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let series = TrialSeries::parse(&text, path, label)?;
        debug!("{} trials in {}", series.trials.len(), path.display());
        Ok(series)
    }

    /// Same rules as `from_file`, for text already in memory.
    pub fn parse(text: &str, path: &Path, label: &str) -> Result<TrialSeries> {
        let mut trials = Vec::new();
        for (i, l) in text.lines().enumerate().skip(1) {
            if let Some(trial) = parse_line(l).map_err(|e| e.at(path, i + 1))? {
                trials.push(trial);
            }
        }
        Ok(TrialSeries {
            label: label.to_string(),
            path: path.to_path_buf(),
            trials,
        })
    }

    pub fn len(&self) -> usize {
        self.trials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trials.is_empty()
    }

    /// Values of one field, in trial order.
    pub fn column(&self, field: Field) -> Vec<i64> {
        self.trials.iter().map(|t| field.value(t)).collect()
    }

    /// The x and y sequences for plotting, same length as the series.
    pub fn extract(&self, x: Field, y: Field) -> (Vec<i64>, Vec<i64>) {
        (self.column(x), self.column(y))
    }
}

/// `None` for empty and comment lines.
/// A line holding only whitespace is not empty and fails to parse.
fn parse_line(line: &str) -> std::result::Result<Option<Trial>, LineError> {
    let line = line.strip_suffix('\r').unwrap_or(line);
    if line.is_empty() || line.starts_with(COMMENT_MARKER) {
        return Ok(None);
    }
    line.parse().map(Some)
}

/// Reads every source in order; the first unreadable or malformed file stops the run.
pub fn load_sources(sources: &[Source]) -> Result<Vec<TrialSeries>> {
    sources
        .iter()
        .map(|s| {
            info!("read trials for '{}' from {}", s.label, s.path.display());
            TrialSeries::from_file(&s.path, &s.label)
        })
        .collect()
}

/// Load, check and plot; returns the path of the written image.
/// Nothing is written unless every source loads and passes the consistency check.
pub fn run(config: &Config) -> Result<PathBuf> {
    let series = load_sources(&config.sources)?;
    let dataset = check_consistency(series, &config.consistent)?;
    chart::render(&dataset, config)?;
    info!("plot saved to {}", config.output.display());
    Ok(config.output.clone())
}

pub fn min_and_max<T: std::cmp::PartialOrd + Copy>(s: &[T]) -> Option<(T, T)> {
    let mut self_iter = s.iter();
    let (mut min, mut max) = match self_iter.next() {
        Some(v) => (*v, *v),
        None => return None,
    };
    for es in self_iter {
        if *es > max {
            max = *es
        }
        if *es < min {
            min = *es
        }
    }
    Some((min, max))
}

#[cfg(test)]
mod tests {
    use super::*;

    const RESULTS: &str = "threads,key_max,iters,time(ms),time_serial(ms)
1,100,5,812,790
# rerun after lock change
2,100,5,431,790

4,100,5,240,791
8,100,5,166,789
";

    #[test]
    fn parse_trial_line() {
        let t: Trial = "4,100,5,240,791".parse().unwrap();
        assert_eq!(
            t,
            Trial {
                threads: 4,
                key_max: 100,
                iters: 5,
                time: 240,
                time_serial: 791
            }
        );
        let t: Trial = " 4, 100 ,5,240,791\r".parse().unwrap();
        assert_eq!(t.time_serial, 791);
    }

    #[test]
    fn four_values_is_an_error() {
        assert_eq!("1,100,5,812".parse::<Trial>(), Err(LineError::FieldCount(4)));
        assert_eq!(
            "1,100,5,812,790,3".parse::<Trial>(),
            Err(LineError::FieldCount(6))
        );
    }

    #[test]
    fn non_integer_names_the_field() {
        match "1,100,five,812,790".parse::<Trial>() {
            Err(LineError::ParseInt { field, value, .. }) => {
                assert_eq!(field, Field::Iters);
                assert_eq!(value, "five");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn skips_header_comments_and_blank_lines() {
        let s = TrialSeries::parse(RESULTS, Path::new("a.txt"), "a").unwrap();
        assert_eq!(s.len(), 4);
        assert_eq!(s.column(Field::Threads), vec![1, 2, 4, 8]);
        assert!(s.trials.iter().all(|t| t.key_max == 100 && t.iters == 5));
    }

    #[test]
    fn header_is_never_parsed() {
        let s = TrialSeries::parse("1,2,3,4,5\n6,7,8,9,10\n", Path::new("a"), "a").unwrap();
        assert_eq!(s.len(), 1);
        assert_eq!(s.trials[0].threads, 6);
        let s = TrialSeries::parse("", Path::new("a"), "a").unwrap();
        assert!(s.is_empty());
    }

    #[test]
    fn bad_line_reports_path_and_line() {
        let text = "header\n1,100,5,812,790\n\n2,100,5,431\n";
        match TrialSeries::parse(text, Path::new("r.txt"), "r") {
            Err(Error::FieldCount { path, line, found }) => {
                assert_eq!(path, PathBuf::from("r.txt"));
                assert_eq!(line, 4);
                assert_eq!(found, 4);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn whitespace_only_line_is_not_blank() {
        for text in &["h\n   \n1,100,5,812,790\n", "h\n   \t\n1,100,5,812,790\n"] {
            match TrialSeries::parse(text, Path::new("w.txt"), "w") {
                Err(Error::FieldCount { line, found, .. }) => {
                    assert_eq!(line, 2);
                    assert_eq!(found, 1);
                }
                other => panic!("unexpected {:?}", other),
            }
        }
        let s = TrialSeries::parse("h\r\n\r\n1,100,5,812,790\r\n\r", Path::new("w"), "w").unwrap();
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn extract_keeps_file_order() {
        let text = "h\n8,1,1,50,0\n1,1,1,400,0\n4,1,1,90,0\n";
        let s = TrialSeries::parse(text, Path::new("a"), "a").unwrap();
        let (x, y) = s.extract(Field::Threads, Field::Time);
        assert_eq!(x, vec![8, 1, 4]);
        assert_eq!(y, vec![50, 400, 90]);
    }

    #[test]
    fn field_names_round_trip() {
        for (f, n) in Field::ALL.iter().zip(Field::NAMES.iter()) {
            assert_eq!(f.name(), *n);
            assert_eq!(f.to_string(), *n);
            assert_eq!(n.parse::<Field>().unwrap(), *f);
        }
        assert!(matches!(
            "keymax".parse::<Field>(),
            Err(Error::InvalidField(_))
        ));
    }

    #[test]
    fn min_and_max_of_slice() {
        assert_eq!(min_and_max(&[3, -1, 7, 2]), Some((-1, 7)));
        assert_eq!(min_and_max::<f64>(&[]), None);
    }
}
