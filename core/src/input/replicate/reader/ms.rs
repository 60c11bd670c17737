//! Reader for the output of Hudson's `ms`.
//!
//! The output starts with the command line, `<program> NSAM NREPS ...`, followed by a line with
//! the random seeds. Each replicate then starts with a line `//`, and contains a line
//! `segsites: S`, possibly preceded by a line `prob: P` when `ms` was run with both `-s` and `-t`.
//! If S is positive, a line `positions: ...` and NSAM rows of `0` and `1` follow. Any other lines,
//! such as trees, are skipped. Reading stops after NREPS replicates.

use std::io;

use nom::{
    bytes::complete::{tag, take_till1},
    character::complete::{space0, space1},
    number::complete::double,
    sequence::{preceded, tuple},
    IResult,
};

use crate::{
    input::{replicate::Replicate, ReadStatus},
    Alphabet, Matrix,
};

use super::{count, invalid_data, parse_line, unexpected_end, Lines};

fn header(s: &str) -> IResult<&str, (usize, usize)> {
    let (s, _) = tuple((space0, take_till1(char::is_whitespace), space1))(s)?;
    let (s, (samples, _, replicates)) = tuple((count, space1, count))(s)?;

    Ok((s, (samples, replicates)))
}

fn segregating_sites(s: &str) -> IResult<&str, usize> {
    preceded(tuple((space0, tag("segsites:"), space0)), count)(s)
}

fn probability(s: &str) -> IResult<&str, f64> {
    preceded(tuple((space0, tag("prob:"), space0)), double)(s)
}

/// An `ms` reader.
pub struct Reader<R> {
    lines: Lines<R>,
    samples: usize,
    replicates: usize,
    read: usize,
}

impl<R> Reader<R>
where
    R: io::BufRead,
{
    /// Creates a new reader, reading the header.
    pub fn new(inner: R) -> io::Result<Self> {
        let mut lines = Lines::new(inner);

        let (samples, replicates) = match lines.next_nonblank_line()? {
            Some((number, line)) => parse_line(header, line, number, "ms command line")?,
            None => {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    "missing ms command line",
                ))
            }
        };

        if samples == 0 {
            return Err(invalid_data(lines.number, "ms command line has no samples"));
        }

        // Seeds
        let _ = lines.next_line()?;

        Ok(Self {
            lines,
            samples,
            replicates,
            read: 0,
        })
    }

    /// Returns the number of samples per replicate.
    pub fn samples(&self) -> usize {
        self.samples
    }

    /// Returns the number of replicates given on the command line.
    pub fn replicates(&self) -> usize {
        self.replicates
    }

    fn read_segregating_sites(&mut self) -> io::Result<Option<(usize, Option<f64>)>> {
        let mut started = false;
        let mut prob = None;

        loop {
            match self.lines.next_line()? {
                Some((number, line)) => {
                    let line = line.trim_start();

                    if line.starts_with("//") {
                        started = true;
                    } else if line.starts_with("prob:") {
                        prob = Some(parse_line(probability, line, number, "probability")?);
                    } else if line.starts_with("segsites:") {
                        let segregating_sites =
                            parse_line(segregating_sites, line, number, "segregating sites")?;

                        return Ok(Some((segregating_sites, prob)));
                    }
                }
                None if started => return Err(unexpected_end()),
                None => return Ok(None),
            }
        }
    }

    fn read_matrix(&mut self, segregating_sites: usize) -> io::Result<Matrix> {
        match self.lines.next_nonblank_line()? {
            Some((_, line)) if line.trim_start().starts_with("positions:") => (),
            Some((number, line)) => {
                return Err(invalid_data(
                    number,
                    format!("expected positions, found '{line}'"),
                ))
            }
            None => return Err(unexpected_end()),
        }

        let mut rows = Vec::with_capacity(self.samples);
        for _ in 0..self.samples {
            let (number, line) = self
                .lines
                .next_nonblank_line()?
                .ok_or_else(unexpected_end)?;

            let row = line.trim();
            if row.len() != segregating_sites {
                return Err(invalid_data(
                    number,
                    format!(
                        "expected {segregating_sites} sites in sample, found {}",
                        row.len()
                    ),
                ));
            }

            rows.push(row.as_bytes().to_vec());
        }

        let matrix = Matrix::from_rows(rows)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        matrix
            .check_alphabet(Alphabet::Binary)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        Ok(matrix)
    }

    fn read(&mut self) -> io::Result<Option<Replicate>> {
        if self.read == self.replicates {
            return Ok(None);
        }

        let (segregating_sites, prob) = match self.read_segregating_sites()? {
            Some(parsed) => parsed,
            None => return Ok(None),
        };

        let matrix = if segregating_sites == 0 {
            Matrix::without_sites(self.samples)
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?
        } else {
            self.read_matrix(segregating_sites)?
        };

        self.read += 1;

        let replicate = Replicate::new(matrix, Alphabet::Binary);
        Ok(Some(match prob {
            Some(prob) => replicate.with_prob(prob),
            None => replicate,
        }))
    }
}

impl<R> super::Reader for Reader<R>
where
    R: io::BufRead,
{
    fn alphabet(&self) -> Alphabet {
        Alphabet::Binary
    }

    fn read_replicate(&mut self) -> ReadStatus<Replicate> {
        ReadStatus::from(self.read())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::input::replicate::Reader as _;

    const MS: &[u8] = b"\
ms 4 3 -s 3
30242 24599 2546

//
segsites: 3
positions: 0.1010 0.4525 0.8731
010
100
011
010

//
prob: 0.0131
segsites: 0

//
segsites: 2
positions: 0.2 0.7
00
00
11
01
";

    fn read_all(src: &'static [u8]) -> io::Result<Vec<Replicate>> {
        let mut reader = Reader::new(src)?;
        let mut replicates = Vec::new();

        loop {
            match reader.read_replicate() {
                ReadStatus::Read(replicate) => replicates.push(replicate),
                ReadStatus::Error(e) => return Err(e),
                ReadStatus::Done => break Ok(replicates),
            }
        }
    }

    #[test]
    fn test_header() {
        assert_eq!(header("ms 6 1000 -t 5.0"), Ok((" -t 5.0", (6, 1000))));
        assert_eq!(header("  ./ms 2 1"), Ok(("", (2, 1))));
        assert!(header("ms six 1000").is_err());
    }

    #[test]
    fn test_segregating_sites() {
        assert_eq!(segregating_sites("segsites: 12"), Ok(("", 12)));
        assert_eq!(segregating_sites("segsites:0"), Ok(("", 0)));
        assert!(segregating_sites("segsites: ?").is_err());
    }

    #[test]
    fn test_probability() {
        assert_eq!(probability("prob: 0.0131"), Ok(("", 0.0131)));
        assert_eq!(probability("prob:1e-05"), Ok(("", 1e-5)));
        assert!(probability("prob: ?").is_err());
    }

    #[test]
    fn test_read_replicates() -> io::Result<()> {
        let reader = Reader::new(MS)?;
        assert_eq!(reader.samples(), 4);
        assert_eq!(reader.replicates(), 3);

        let replicates = read_all(MS)?;
        assert_eq!(replicates.len(), 3);

        assert_eq!(
            replicates[0].matrix,
            Matrix::from_rows(["010", "100", "011", "010"]).unwrap()
        );
        assert_eq!(replicates[0].alphabet, Alphabet::Binary);
        assert_eq!(replicates[0].prob, None);

        assert_eq!(replicates[1].matrix, Matrix::without_sites(4).unwrap());
        assert_eq!(replicates[1].prob, Some(0.0131));
        assert_eq!(replicates[2].prob, None);

        assert_eq!(
            replicates[2].matrix,
            Matrix::from_rows(["00", "00", "11", "01"]).unwrap()
        );

        Ok(())
    }

    #[test]
    fn test_read_without_replicates() -> io::Result<()> {
        assert!(read_all(b"ms 4 0\n1 2 3\n")?.is_empty());
        Ok(())
    }

    #[test]
    fn test_read_stops_after_replicates_on_command_line() -> io::Result<()> {
        let src = b"ms 2 1\n1 2 3\n\n//\nsegsites: 1\npositions: 0.5\n0\n1\n\n//\nsegsites: 0\n";
        let replicates = read_all(src)?;

        assert_eq!(replicates.len(), 1);
        assert_eq!(replicates[0].matrix, Matrix::from_rows(["0", "1"]).unwrap());

        Ok(())
    }

    #[test]
    fn test_invalid_probability() {
        let result = read_all(b"ms 2 1\n1 2 3\n\n//\nprob: high\nsegsites: 0\n");
        assert_eq!(result.err().map(|e| e.kind()), Some(io::ErrorKind::InvalidData));
    }

    #[test]
    fn test_missing_command_line() {
        let result = Reader::new(&b""[..]);
        assert_eq!(result.err().map(|e| e.kind()), Some(io::ErrorKind::InvalidData));
    }

    #[test]
    fn test_no_samples() {
        let result = Reader::new(&b"ms 0 10\n1 2 3\n"[..]);
        assert_eq!(result.err().map(|e| e.kind()), Some(io::ErrorKind::InvalidData));
    }

    #[test]
    fn test_truncated_replicate() {
        let result = read_all(b"ms 2 1\n1 2 3\n\n//\nsegsites: 2\npositions: 0.1 0.2\n01\n");
        assert_eq!(result.err().map(|e| e.kind()), Some(io::ErrorKind::UnexpectedEof));
    }

    #[test]
    fn test_wrong_row_length() {
        let result = read_all(b"ms 2 1\n1 2 3\n\n//\nsegsites: 2\npositions: 0.1 0.2\n01\n011\n");
        assert_eq!(result.err().map(|e| e.kind()), Some(io::ErrorKind::InvalidData));
    }

    #[test]
    fn test_invalid_symbol() {
        let result = read_all(b"ms 2 1\n1 2 3\n\n//\nsegsites: 2\npositions: 0.1 0.2\n01\n0A\n");
        assert_eq!(result.err().map(|e| e.kind()), Some(io::ErrorKind::InvalidData));
    }

    #[test]
    fn test_missing_positions() {
        let result = read_all(b"ms 2 1\n1 2 3\n\n//\nsegsites: 2\n01\n00\n");
        assert_eq!(result.err().map(|e| e.kind()), Some(io::ErrorKind::InvalidData));
    }
}
