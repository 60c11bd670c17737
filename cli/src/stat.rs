use std::{fmt, io, path::PathBuf};

use anyhow::Error;

use clap::{CommandFactory, Parser, ValueEnum};
use sstats_core::{
    input::{
        replicate::reader::{Builder, Format},
        Replicate,
    },
    stat::{StatisticError, UNDEFINED},
    Alphabet, Input, Summary,
};

mod runner;
use runner::{Runner, StatisticWithOptions};

/// Calculate summary statistics for simulated replicates.
///
/// Each replicate in the input is summarised on a separate line of output.
#[derive(Debug, Parser)]
#[clap(name = crate::NAME, about)]
pub struct Stat {
    /// Input file.
    ///
    /// The input can be provided here or read from stdin. Input may be the output of `ms`, with
    /// binary samples, or sequential PHYLIP as written by `seq-gen`, with nucleotide samples.
    /// The input may be gzip-compressed.
    #[clap(value_parser, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Delimiter between statistics.
    #[clap(short = 'd', long, default_value_t = ',', value_name = "CHAR")]
    pub delimiter: char,

    /// Input format.
    ///
    /// By default, the format is detected from the start of the input.
    #[clap(long, value_enum, value_name = "FORMAT")]
    pub format: Option<InputFormat>,

    /// Include a header with the names of statistics.
    #[clap(short = 'H', long)]
    pub header: bool,

    /// Precision to use when printing statistics.
    ///
    /// If a single value is provided, this will be used for all statistics. If more than one
    /// statistic is calculated, the same number of precision specifiers may be provided, and they
    /// will be applied in the same order. Use comma to separate precision specifiers. Statistics
    /// that are counts are always printed as integers.
    #[clap(
        short = 'p',
        long,
        default_value = "6",
        use_value_delimiter = true,
        value_name = "INT,..."
    )]
    pub precision: Vec<usize>,

    /// Statistics to calculate.
    ///
    /// More than one statistic can be output. Use comma to separate statistics. By default,
    /// π, S, Tajima's D, θ_H, and Fay and Wu's H are calculated for binary input, and π, S, and
    /// Tajima's D for nucleotide input.
    ///
    /// Statistics that are undefined for a replicate are written as -10000, and Fu's Fs is
    /// written as 10000 when the probability of observing fewer haplotypes vanishes.
    #[clap(
        short = 's',
        long,
        value_enum,
        use_value_delimiter = true,
        value_name = "STAT,..."
    )]
    pub statistics: Option<Vec<Statistic>>,
}

#[derive(ValueEnum, Clone, Copy, Debug, Eq, PartialEq)]
pub enum InputFormat {
    /// Output of Hudson's ms.
    Ms,
    /// Sequential PHYLIP, as output by seq-gen.
    Phylip,
}

impl From<InputFormat> for Format {
    fn from(format: InputFormat) -> Self {
        match format {
            InputFormat::Ms => Format::Ms,
            InputFormat::Phylip => Format::Phylip,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, Eq, PartialEq)]
pub enum Statistic {
    /// Average number of pairwise differences, Tajima's estimator of θ.
    Pi,
    /// Number of segregating sites.
    S,
    /// Tajima's D statistic. See Tajima (1989).
    DTajima,
    /// Fay and Wu's estimator θ_H. Binary input only. See Fay and Wu (2000).
    ThetaH,
    /// Fay and Wu's H statistic, π - θ_H. Binary input only. See Fay and Wu (2000).
    HFayWu,
    /// Watterson's estimator of θ. Use π for Tajima's estimator.
    Theta,
    /// Number of distinct haplotypes.
    Haplotypes,
    /// Number of haplotypes found in a single sample.
    Singletons,
    /// Haplotype homozygosity, the sum of squared haplotype frequencies.
    Homozygosity,
    /// Number of sites where a single sample carries a unique symbol.
    SingletonSites,
    /// Mean number of samples per distinct haplotype.
    HaplotypeFrequency,
    /// Number of samples carrying the most common haplotype.
    MaxHaplotype,
    /// Ramos-Onsins and Rozas' R₂ statistic. See Ramos-Onsins and Rozas (2002).
    R2,
    /// Fu's Fs statistic. See Fu (1997).
    Fs,
    /// Probability of the segregating sites given θ, as reported by `ms -s S -t θ`.
    Prob,
}

impl Statistic {
    pub fn defaults(alphabet: Alphabet) -> &'static [Statistic] {
        match alphabet {
            Alphabet::Binary => &[
                Statistic::Pi,
                Statistic::S,
                Statistic::DTajima,
                Statistic::ThetaH,
                Statistic::HFayWu,
            ],
            Alphabet::Nucleotide => &[Statistic::Pi, Statistic::S, Statistic::DTajima],
        }
    }

    pub fn calculate(
        self,
        replicate: &Replicate,
        summary: &Summary,
    ) -> Result<Value, StatisticError> {
        Ok(match self {
            Statistic::Pi => Value::Real(summary.pi()),
            Statistic::S => Value::Count(summary.segregating_sites()),
            Statistic::DTajima => Value::Real(summary.d_tajima()),
            Statistic::ThetaH => Value::Real(summary.theta_h()?),
            Statistic::HFayWu => Value::Real(summary.h_fay_wu()?),
            Statistic::Theta => Value::Real(summary.theta_watterson()),
            Statistic::Haplotypes => Value::Count(summary.haplotype_count()),
            Statistic::Singletons => Value::Count(summary.singleton_haplotypes()),
            Statistic::Homozygosity => Value::Real(summary.homozygosity()),
            Statistic::SingletonSites => Value::Count(summary.singleton_sites()),
            Statistic::HaplotypeFrequency => Value::Real(summary.mean_haplotype_count()),
            Statistic::MaxHaplotype => Value::Count(summary.max_haplotype_count()),
            Statistic::R2 => Value::Real(summary.r2()),
            Statistic::Fs => Value::Real(summary.fs()),
            Statistic::Prob => Value::Real(replicate.prob.unwrap_or(UNDEFINED)),
        })
    }

    pub fn header_name(&self) -> &'static str {
        match self {
            Statistic::Pi => "pi",
            Statistic::S => "segregating_sites",
            Statistic::DTajima => "d_tajima",
            Statistic::ThetaH => "theta_h",
            Statistic::HFayWu => "h_fay_wu",
            Statistic::Theta => "theta",
            Statistic::Haplotypes => "haplotypes",
            Statistic::Singletons => "singletons",
            Statistic::Homozygosity => "homozygosity",
            Statistic::SingletonSites => "singleton_sites",
            Statistic::HaplotypeFrequency => "haplotype_frequency",
            Statistic::MaxHaplotype => "max_haplotype",
            Statistic::R2 => "r2",
            Statistic::Fs => "fs",
            Statistic::Prob => "prob",
        }
    }
}

impl fmt::Display for Statistic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.header_name())
    }
}

/// The value of a statistic for a single replicate.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Value {
    Count(usize),
    Real(f64),
}

impl Value {
    pub fn format(&self, precision: usize) -> String {
        match self {
            Value::Count(count) => count.to_string(),
            Value::Real(value) => format!("{value:.precision$}"),
        }
    }
}

impl Stat {
    fn statistics_with_options(
        &self,
        alphabet: Alphabet,
    ) -> Result<Vec<StatisticWithOptions>, clap::Error> {
        let statistics = match &self.statistics {
            Some(statistics) => &statistics[..],
            None => Statistic::defaults(alphabet),
        };

        match (&self.precision[..], statistics) {
            (&[precision], statistics) => Ok(statistics
                .iter()
                .map(|&s| StatisticWithOptions::new(s, precision))
                .collect()),
            (precisions, statistics) if precisions.len() == statistics.len() => Ok(statistics
                .iter()
                .zip(precisions.iter())
                .map(|(&s, &p)| StatisticWithOptions::new(s, p))
                .collect()),
            (precisions, statistics) => Err(Stat::command().error(
                clap::error::ErrorKind::ValueValidation,
                format!(
                    "number of precision specifiers must equal one \
                        or the number of statistics \
                        (found {} precision specifiers and {} statistics)",
                    precisions.len(),
                    statistics.len()
                ),
            )),
        }
    }

    pub fn run(self) -> Result<(), Error> {
        let mut builder = Builder::default().set_input(Input::new(self.input.clone())?);
        if let Some(format) = self.format {
            builder = builder.set_format(format.into());
        }
        let reader = builder.build()?;

        let statistics = self.statistics_with_options(reader.alphabet())?;

        let writer = io::BufWriter::new(io::stdout().lock());
        let mut runner = Runner::new(writer, reader, statistics, self.header, self.delimiter);
        runner.run()
    }
}
