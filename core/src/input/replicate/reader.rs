//! Replicate readers.

use std::{fmt, io, str::FromStr};

use nom::{character::complete::digit1, combinator::map_res, IResult};

use crate::{input::ReadStatus, Alphabet};

use super::Replicate;

pub mod builder;
pub use builder::{Builder, Format};

pub mod ms;

pub mod phylip;

/// A type-erased replicate reader.
pub type DynReader = Box<dyn Reader>;

/// A reader of replicates.
pub trait Reader {
    /// Returns the alphabet of the replicates.
    fn alphabet(&self) -> Alphabet;

    /// Reads the next replicate.
    fn read_replicate(&mut self) -> ReadStatus<Replicate>;
}

/// A line-oriented reader keeping track of line numbers.
struct Lines<R> {
    inner: R,
    buf: String,
    number: usize,
}

impl<R> Lines<R>
where
    R: io::BufRead,
{
    fn new(inner: R) -> Self {
        Self {
            inner,
            buf: String::new(),
            number: 0,
        }
    }

    fn fill(&mut self) -> io::Result<usize> {
        self.buf.clear();
        let bytes = self.inner.read_line(&mut self.buf)?;

        if bytes > 0 {
            self.number += 1;
        }

        Ok(bytes)
    }

    fn current(&self) -> (usize, &str) {
        (self.number, self.buf.trim_end_matches(['\n', '\r']))
    }

    /// Reads the next line with its number, or `None` at the end of input.
    fn next_line(&mut self) -> io::Result<Option<(usize, &str)>> {
        if self.fill()? == 0 {
            Ok(None)
        } else {
            Ok(Some(self.current()))
        }
    }

    /// Reads the next line that is not entirely whitespace.
    fn next_nonblank_line(&mut self) -> io::Result<Option<(usize, &str)>> {
        loop {
            if self.fill()? == 0 {
                return Ok(None);
            }

            if !self.buf.trim().is_empty() {
                return Ok(Some(self.current()));
            }
        }
    }
}

fn invalid_data<M>(line: usize, msg: M) -> io::Error
where
    M: fmt::Display,
{
    io::Error::new(io::ErrorKind::InvalidData, format!("line {line}: {msg}"))
}

fn unexpected_end() -> io::Error {
    io::Error::new(
        io::ErrorKind::UnexpectedEof,
        "input ended in the middle of a replicate",
    )
}

fn count(s: &str) -> IResult<&str, usize> {
    map_res(digit1, usize::from_str)(s)
}

fn parse_line<'a, T, F>(mut parser: F, line: &'a str, number: usize, what: &str) -> io::Result<T>
where
    F: FnMut(&'a str) -> IResult<&'a str, T>,
{
    parser(line)
        .map(|(_, parsed)| parsed)
        .map_err(|_| invalid_data(number, format!("failed to parse {what} from '{line}'")))
}
