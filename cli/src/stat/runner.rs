use std::{fmt, io};

use anyhow::{Context, Error};

use sstats_core::{
    input::{
        replicate::{reader::DynReader, Replicate},
        ReadStatus,
    },
    stat::{is_sentinel, SATURATED},
};

use super::{Statistic, Value};

#[derive(Clone, Debug, PartialEq)]
pub struct StatisticWithOptions {
    statistic: Statistic,
    precision: usize,
}

impl StatisticWithOptions {
    pub fn new(statistic: Statistic, precision: usize) -> Self {
        Self {
            statistic,
            precision,
        }
    }
}

pub struct Runner<W> {
    writer: W,
    reader: DynReader,
    statistics: Vec<StatisticWithOptions>,
    header: bool,
    delimiter: char,
    warnings: Warnings,
}

impl<W> Runner<W>
where
    W: io::Write,
{
    pub fn new(
        writer: W,
        reader: DynReader,
        statistics: Vec<StatisticWithOptions>,
        header: bool,
        delimiter: char,
    ) -> Self {
        let warnings = Warnings::new(statistics.len());

        Self {
            writer,
            reader,
            statistics,
            header,
            delimiter,
            warnings,
        }
    }

    pub fn run(&mut self) -> Result<(), Error> {
        if self.header {
            self.write_header()?;
        }

        let mut replicates = 0;
        loop {
            match self.reader.read_replicate() {
                ReadStatus::Read(replicate) => {
                    replicates += 1;

                    log::debug!(
                        "Read replicate {replicates} with {} samples and {} sites.",
                        replicate.matrix.samples(),
                        replicate.matrix.sites()
                    );

                    self.write_statistics(&replicate, replicates)?;
                }
                ReadStatus::Error(e) => {
                    return Err(e)
                        .with_context(|| format!("failed to read replicate {}", replicates + 1))
                }
                ReadStatus::Done => break,
            }
        }

        self.writer.flush()?;

        self.warnings.summarize(&self.statistics);
        log::info!("Processed {replicates} replicates.");

        Ok(())
    }

    fn write_header(&mut self) -> Result<(), Error> {
        let header_names = self
            .statistics
            .iter()
            .map(|s| s.statistic.header_name())
            .collect::<Vec<_>>();

        self.write_with_delimiter(header_names)
    }

    fn write_statistics(&mut self, replicate: &Replicate, number: usize) -> Result<(), Error> {
        let summary = replicate.summary();

        let mut formatted = Vec::with_capacity(self.statistics.len());
        for (i, s) in self.statistics.iter().enumerate() {
            let value = s.statistic.calculate(replicate, &summary).with_context(|| {
                format!("failed to calculate '{}' for replicate {number}", s.statistic)
            })?;

            if let Value::Real(x) = value {
                if is_sentinel(x) {
                    self.warnings.warn_once(i, s.statistic, number, x);
                }
            }

            formatted.push(value.format(s.precision));
        }

        self.write_with_delimiter(formatted)
    }

    fn write_with_delimiter<I>(&mut self, items: I) -> Result<(), Error>
    where
        I: IntoIterator,
        I::Item: fmt::Display,
    {
        for (i, x) in items.into_iter().enumerate() {
            if i > 0 {
                write!(self.writer, "{}", self.delimiter)?;
            }
            write!(self.writer, "{x}")?;
        }
        writeln!(self.writer)?;

        Ok(())
    }
}

/// Counts of sentinel values written, one per statistic.
#[derive(Debug)]
struct Warnings {
    counts: Vec<usize>,
}

impl Warnings {
    fn new(statistics: usize) -> Self {
        Self {
            counts: vec![0; statistics],
        }
    }

    fn warn_once(&mut self, index: usize, statistic: Statistic, replicate: usize, value: f64) {
        if self.counts[index] == 0 {
            let reason = reason(value);

            log::warn!(
                "Statistic '{statistic}' is {reason} for replicate {replicate}, writing {value}. \
                This warning will be shown only once, with a summary at the end."
            );
        }

        self.counts[index] += 1;
    }

    fn summarize(&self, statistics: &[StatisticWithOptions]) {
        for (count, s) in self.counts.iter().zip(statistics) {
            if *count > 0 {
                let statistic = s.statistic;

                log::warn!("Wrote {count} sentinel values for statistic '{statistic}'.");
            }
        }
    }
}

fn reason(value: f64) -> &'static str {
    if value == SATURATED {
        "saturated"
    } else {
        "undefined"
    }
}
