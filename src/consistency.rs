use log::debug;

use crate::{Error, Field, Result, Trial, TrialSeries};

/// Series that passed `check_consistency`; the only thing the chart accepts.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    series: Vec<TrialSeries>,
}

impl Dataset {
    pub fn series(&self) -> &[TrialSeries] {
        &self.series
    }

    /// The trial the plot title takes its starting values from.
    pub fn first_trial(&self) -> Result<&Trial> {
        match self.series.first() {
            Some(s) => s.trials.first().ok_or_else(|| Error::NoTrials {
                label: s.label.clone(),
            }),
            None => Err(Error::NoTrials {
                label: String::new(),
            }),
        }
    }
}

/// First seen value of each checked field, in the order the fields were first seen.
#[derive(Debug, Default)]
pub struct Expected {
    values: Vec<(Field, i64)>,
}

impl Expected {
    /// Records `value` the first time `field` is seen,
    /// afterwards returns the recorded value if `value` differs from it.
    pub fn observe(&mut self, field: Field, value: i64) -> Option<i64> {
        match self.values.iter().find(|(f, _)| *f == field) {
            Some(&(_, expected)) if expected != value => Some(expected),
            Some(_) => None,
            None => {
                self.values.push((field, value));
                None
            }
        }
    }

    pub fn get(&self, field: Field) -> Option<i64> {
        self.values
            .iter()
            .find(|(f, _)| *f == field)
            .map(|&(_, v)| v)
    }
}

/// Every trial of every series must agree on each of `fields`
/// with the first trial that carried it.
pub fn check_consistency(series: Vec<TrialSeries>, fields: &[Field]) -> Result<Dataset> {
    let mut expected = Expected::default();
    for s in series.iter() {
        for (i, trial) in s.trials.iter().enumerate() {
            for &field in fields {
                let found = field.value(trial);
                if let Some(want) = expected.observe(field, found) {
                    return Err(Error::Inconsistent {
                        field,
                        expected: want,
                        found,
                        label: s.label.clone(),
                        trial: i + 1,
                    });
                }
            }
        }
    }
    for &field in fields {
        if let Some(v) = expected.get(field) {
            debug!("{} = {} across all series", field, v);
        }
    }
    Ok(Dataset { series })
}
