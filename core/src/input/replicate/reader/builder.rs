//! Construction of replicate readers with detection of compression and format.

use std::io;

use flate2::bufread::MultiGzDecoder;

use crate::{input, Alphabet, Input};

/// A builder of replicate readers.
///
/// Unless set explicitly, the compression method and the format are detected from the start of
/// the input.
#[derive(Debug, Default)]
pub struct Builder {
    input: Option<Input>,
    format: Option<Format>,
    compression_method: Option<Option<CompressionMethod>>,
}

impl Builder {
    /// Builds a reader from the input, or from stdin if no input was set.
    pub fn build(self) -> io::Result<super::DynReader> {
        match self.input.as_ref().unwrap_or(&Input::Stdin).open()? {
            input::Reader::File(reader) => self.build_from_reader(reader),
            input::Reader::Stdin(reader) => self.build_from_reader(reader),
        }
    }

    fn build_from_reader<R>(self, mut reader: R) -> io::Result<super::DynReader>
    where
        R: 'static + io::BufRead,
    {
        let compression_method = match self.compression_method {
            Some(compression_method) => compression_method,
            None => CompressionMethod::detect(&mut reader)?,
        };

        let format = match self.format {
            Some(format) => format,
            None => Format::detect(&mut reader, compression_method)?,
        };

        let reader: super::DynReader = match compression_method {
            Some(CompressionMethod::Gzip) => {
                let reader = io::BufReader::new(MultiGzDecoder::new(reader));

                match format {
                    Format::Ms => super::ms::Reader::new(reader).map(Box::new)?,
                    Format::Phylip => Box::new(super::phylip::Reader::new(reader)),
                }
            }
            None => match format {
                Format::Ms => super::ms::Reader::new(reader).map(Box::new)?,
                Format::Phylip => Box::new(super::phylip::Reader::new(reader)),
            },
        };

        Ok(reader)
    }

    /// Sets the compression method, where `None` means uncompressed.
    pub fn set_compression_method(mut self, compression_method: Option<CompressionMethod>) -> Self {
        self.compression_method = Some(compression_method);
        self
    }

    /// Sets the format.
    pub fn set_format(mut self, format: Format) -> Self {
        self.format = Some(format);
        self
    }

    /// Sets the input.
    pub fn set_input(mut self, input: Input) -> Self {
        self.input = Some(input);
        self
    }
}

/// An input format.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Format {
    /// Output of `ms`, with binary samples.
    Ms,
    /// Sequential PHYLIP, as written by `seq-gen`, with nucleotide samples.
    Phylip,
}

impl Format {
    /// Returns the alphabet of replicates in the format.
    pub fn alphabet(&self) -> Alphabet {
        match self {
            Format::Ms => Alphabet::Binary,
            Format::Phylip => Alphabet::Nucleotide,
        }
    }

    fn detect<R>(
        reader: &mut R,
        compression_method: Option<CompressionMethod>,
    ) -> io::Result<Format>
    where
        R: io::BufRead,
    {
        let src = reader.fill_buf()?;

        match compression_method {
            Some(CompressionMethod::Gzip) => Self::detect_from_start(MultiGzDecoder::new(src)),
            None => Self::detect_from_start(src),
        }
    }

    /// PHYLIP starts with the number of samples, while `ms` starts with the program name.
    fn detect_from_start<R>(start: R) -> io::Result<Format>
    where
        R: io::Read,
    {
        for byte in start.bytes() {
            let byte = byte?;

            if !byte.is_ascii_whitespace() {
                return Ok(if byte.is_ascii_digit() {
                    Format::Phylip
                } else {
                    Format::Ms
                });
            }
        }

        Ok(Format::Ms)
    }
}

/// A compression method.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CompressionMethod {
    /// Gzip, possibly with multiple members.
    Gzip,
}

impl CompressionMethod {
    fn detect<R>(reader: &mut R) -> io::Result<Option<Self>>
    where
        R: io::BufRead,
    {
        const GZIP_MAGIC_NUMBER: [u8; 2] = [0x1f, 0x8b];

        let src = reader.fill_buf()?;

        if let Some(buf) = src.get(..GZIP_MAGIC_NUMBER.len()) {
            if buf == GZIP_MAGIC_NUMBER {
                return Ok(Some(CompressionMethod::Gzip));
            }
        }

        Ok(None)
    }
}
