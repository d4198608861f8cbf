//! Incremental UTF-8 decoding for chunked response bodies.
//!
//! Transport chunks do not respect character boundaries, so a multi-byte
//! character may arrive split across two reads. [`Utf8StreamDecoder`] keeps
//! the incomplete tail of each chunk and prepends it to the next one.
//! Invalid byte sequences are replaced with U+FFFD and decoding continues.

const REPLACEMENT: char = char::REPLACEMENT_CHARACTER;

#[derive(Debug, Default)]
pub struct Utf8StreamDecoder {
    pending: Vec<u8>,
}

impl Utf8StreamDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode one chunk, returning all text that is complete so far.
    ///
    /// Bytes belonging to a character that is still incomplete at the end of
    /// `chunk` are carried over to the next call.
    pub fn decode(&mut self, chunk: &[u8]) -> String {
        self.pending.extend_from_slice(chunk);

        let mut out = String::with_capacity(self.pending.len());
        let mut start = 0;

        loop {
            match std::str::from_utf8(&self.pending[start..]) {
                Ok(valid) => {
                    out.push_str(valid);
                    start = self.pending.len();
                    break;
                }
                Err(err) => {
                    let valid_end = start + err.valid_up_to();
                    if let Ok(valid) = std::str::from_utf8(&self.pending[start..valid_end]) {
                        out.push_str(valid);
                    }
                    match err.error_len() {
                        Some(invalid_len) => {
                            out.push(REPLACEMENT);
                            start = valid_end + invalid_len;
                        }
                        None => {
                            // Truncated sequence at the end; wait for more bytes.
                            start = valid_end;
                            break;
                        }
                    }
                }
            }
        }

        self.pending.drain(..start);
        out
    }

    /// Flush the decoder at end of stream.
    ///
    /// A dangling partial sequence can never complete, so it becomes a single
    /// replacement character.
    pub fn finish(&mut self) -> String {
        if self.pending.is_empty() {
            return String::new();
        }
        self.pending.clear();
        REPLACEMENT.to_string()
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }
}
