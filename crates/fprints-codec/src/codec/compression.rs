//! zlib and gzip stream handling

use super::error::{DecodeError, DecodeResult};
use flate2::read::{GzDecoder, ZlibEncoder};
use flate2::{Compression, Decompress, FlushDecompress, Status};
use std::io::{self, Read};

/// Maximum allowed decompression size (64 MiB)
///
/// Security: Limits decompression output to prevent denial of service via
/// compression bombs. The largest shared blueprint books inflate to a few
/// megabytes of JSON.
pub const MAX_DECOMPRESSION_SIZE: usize = 64 * 1024 * 1024;

/// Compress data as a zlib stream at the given level (0-9)
pub fn compress(data: &[u8], level: u32) -> io::Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(data, Compression::new(level));
    let mut compressed = Vec::new();
    encoder.read_to_end(&mut compressed)?;
    Ok(compressed)
}

/// Inflate a complete zlib stream
///
/// The stream must reach its end marker and pass the Adler-32 check, and no
/// bytes may follow it. A stream cut short fails with
/// [`DecodeError::Truncated`] rather than yielding a prefix of the data.
pub fn decompress(data: &[u8]) -> DecodeResult<Vec<u8>> {
    let mut inflater = Decompress::new(true);
    let mut output = Vec::with_capacity(data.len().saturating_mul(4).min(MAX_DECOMPRESSION_SIZE));

    loop {
        if output.len() == output.capacity() {
            if output.len() >= MAX_DECOMPRESSION_SIZE {
                return Err(DecodeError::TooLarge {
                    limit: MAX_DECOMPRESSION_SIZE,
                });
            }
            let additional = output
                .capacity()
                .max(8192)
                .min(MAX_DECOMPRESSION_SIZE - output.len());
            output.reserve_exact(additional);
        }

        let consumed = inflater.total_in() as usize;
        let produced = inflater.total_out();
        let status = inflater
            .decompress_vec(&data[consumed..], &mut output, FlushDecompress::None)
            .map_err(|e| DecodeError::Decompression(e.to_string()))?;

        match status {
            Status::StreamEnd => break,
            Status::Ok | Status::BufError => {
                let stalled =
                    inflater.total_in() as usize == consumed && inflater.total_out() == produced;
                if stalled && output.len() < output.capacity() {
                    return Err(DecodeError::Truncated {
                        consumed: inflater.total_in() as usize,
                    });
                }
            }
        }
    }

    let consumed = inflater.total_in() as usize;
    if consumed < data.len() {
        return Err(DecodeError::TrailingData {
            trailing: data.len() - consumed,
        });
    }

    Ok(output)
}

/// Inflate a gzip stream, as used by 0.14 exchange strings
pub fn decompress_gzip(data: &[u8]) -> DecodeResult<Vec<u8>> {
    let mut decoder = GzDecoder::new(data);
    let mut decompressed = Vec::new();

    // Read in chunks to enforce size limit
    let mut buffer = [0u8; 8192];
    loop {
        let bytes_read = decoder
            .read(&mut buffer)
            .map_err(|e| DecodeError::Decompression(format!("gzip: {e}")))?;

        if bytes_read == 0 {
            break;
        }

        if decompressed.len() + bytes_read > MAX_DECOMPRESSION_SIZE {
            return Err(DecodeError::TooLarge {
                limit: MAX_DECOMPRESSION_SIZE,
            });
        }

        decompressed.extend_from_slice(&buffer[..bytes_read]);
    }

    Ok(decompressed)
}
