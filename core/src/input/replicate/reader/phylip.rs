//! Reader for sequential PHYLIP output, as written by `seq-gen`.
//!
//! Each replicate starts with a header `NSAM NSITES`, followed by NSAM lines `ID SEQUENCE`.
//! Samples are identified by an integer ID between 1 and NSAM, and are placed in the matrix
//! according to their ID, regardless of the order in which they appear.

use std::io;

use nom::{
    bytes::complete::take_till1,
    character::complete::{i64 as signed, space0, space1},
    sequence::{preceded, tuple},
    IResult,
};

use crate::{
    input::{replicate::Replicate, ReadStatus},
    Alphabet, Matrix,
};

use super::{count, invalid_data, parse_line, unexpected_end, Lines};

fn header(s: &str) -> IResult<&str, (i64, i64)> {
    let (s, (_, samples, _, sites)) = tuple((space0, signed, space1, signed))(s)?;

    Ok((s, (samples, sites)))
}

fn sequence(s: &str) -> IResult<&str, (usize, &str)> {
    let (s, id) = preceded(space0, count)(s)?;
    let (s, sequence) = preceded(space1, take_till1(char::is_whitespace))(s)?;

    Ok((s, (id, sequence)))
}

/// A PHYLIP reader.
pub struct Reader<R> {
    lines: Lines<R>,
}

impl<R> Reader<R>
where
    R: io::BufRead,
{
    /// Creates a new reader.
    pub fn new(inner: R) -> Self {
        Self {
            lines: Lines::new(inner),
        }
    }

    fn read_header(&mut self) -> io::Result<Option<(usize, usize)>> {
        let (number, line) = match self.lines.next_nonblank_line()? {
            Some(numbered) => numbered,
            None => return Ok(None),
        };

        let (samples, sites) = parse_line(header, line, number, "PHYLIP header")?;

        if samples <= 0 || sites <= 0 {
            return Err(invalid_data(
                number,
                format!("expected positive numbers of samples and sites, found {samples} and {sites}"),
            ));
        }

        Ok(Some((samples as usize, sites as usize)))
    }

    fn read(&mut self) -> io::Result<Option<Replicate>> {
        let (samples, sites) = match self.read_header()? {
            Some(dimensions) => dimensions,
            None => return Ok(None),
        };

        let mut rows: Vec<Option<Vec<u8>>> = vec![None; samples];

        for _ in 0..samples {
            let (number, line) = self
                .lines
                .next_nonblank_line()?
                .ok_or_else(unexpected_end)?;

            let (id, sequence) = parse_line(self::sequence, line, number, "sample")?;

            if !(1..=samples).contains(&id) {
                return Err(invalid_data(
                    number,
                    format!("sample ID {id} outside of range 1 to {samples}"),
                ));
            }

            if sequence.len() != sites {
                return Err(invalid_data(
                    number,
                    format!("expected {sites} sites for sample {id}, found {}", sequence.len()),
                ));
            }

            let row = &mut rows[id - 1];
            if row.is_some() {
                return Err(invalid_data(number, format!("duplicate sample ID {id}")));
            }
            *row = Some(sequence.as_bytes().to_vec());
        }

        let rows = rows
            .into_iter()
            .enumerate()
            .map(|(i, row)| {
                row.ok_or_else(|| {
                    io::Error::new(
                        io::ErrorKind::InvalidData,
                        format!("missing sample ID {}", i + 1),
                    )
                })
            })
            .collect::<io::Result<Vec<_>>>()?;

        let matrix = Matrix::from_rows(rows)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        matrix
            .check_alphabet(Alphabet::Nucleotide)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        Ok(Some(Replicate::new(matrix, Alphabet::Nucleotide)))
    }
}

impl<R> super::Reader for Reader<R>
where
    R: io::BufRead,
{
    fn alphabet(&self) -> Alphabet {
        Alphabet::Nucleotide
    }

    fn read_replicate(&mut self) -> ReadStatus<Replicate> {
        ReadStatus::from(self.read())
    }
}
