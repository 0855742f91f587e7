//! The 7-bit continuation integer encoding used throughout the Topaz
//! page-stream format for sizes, indices, arguments, and opcodes.
//!
//! Values are encoded most-significant-group first; every non-terminal
//! byte has its high bit set, and the terminal byte has it clear. A
//! leading `0xFF` byte is a sign flag meaning "negate the value that
//! follows" -- it isn't part of the magnitude itself.

/// Cursor over a borrowed byte slice with one-byte lookahead.
///
/// Topaz inputs are small and fully buffered before parsing starts, so
/// this holds a plain slice rather than an `io::Read` stream; `peek` is
/// just an index read instead of an actual seek.
pub struct Reader<'a> {
    buffer: &'a [u8],
    pub(crate) position: usize,
}

impl<'a> Reader<'a> {
    pub fn new(buffer: &'a [u8]) -> Reader<'a> {
        Reader {
            buffer,
            position: 0,
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// Returns the next byte without consuming it, or `None` at EOF.
    pub fn peek(&self) -> Option<u8> {
        self.buffer.get(self.position).copied()
    }

    /// Reads and consumes a single raw byte.
    pub fn read_byte(&mut self) -> Option<u8> {
        let b = self.peek()?;
        self.position += 1;
        Some(b)
    }

    /// Reads `n` raw bytes, returning `None` if that many aren't left.
    pub fn read_bytes(&mut self, n: usize) -> Option<&'a [u8]> {
        if self.buffer.len() < self.position + n {
            None
        } else {
            let slice = &self.buffer[self.position..self.position + n];
            self.position += n;
            Some(slice)
        }
    }

    pub fn at_eof(&self) -> bool {
        self.position >= self.buffer.len()
    }

    /// Returns up to `n` bytes ahead of the cursor without consuming
    /// them; shorter than `n` at EOF.
    pub fn peek_n(&self, n: usize) -> &'a [u8] {
        let end = (self.position + n).min(self.buffer.len());
        &self.buffer[self.position..end]
    }
}

/// Decodes one VarInt from `reader`.
///
/// Returns `Ok(None)` if EOF is reached before any byte is read (i.e.
/// the stream simply ended, rather than being truncated mid-value).
pub fn decode_varint(reader: &mut Reader<'_>) -> Option<i64> {
    let mut negate = false;
    let mut data = reader.read_byte()?;

    if data == 0xFF {
        negate = true;
        data = reader.read_byte()?;
    }

    let value = if data & 0x80 == 0 {
        data as i64
    } else {
        let mut value = (data & 0x7F) as i64;
        loop {
            let next = reader.read_byte()?;
            value = (value << 7) | (next & 0x7F) as i64;
            if next & 0x80 == 0 {
                break;
            }
        }
        value
    };

    Some(if negate { -value } else { value })
}

/// Encodes `n` into the same 7-bit continuation format `decode_varint`
/// reads, including the negative-number and `0xFF`-disambiguation rules.
pub fn encode_varint(n: i64) -> Vec<u8> {
    let negative = n < 0;
    let mut number: i64 = if negative { -n + 1 } else { n };

    let mut bytes = Vec::new();
    let mut flag: u8 = 0;
    loop {
        let mut byte = (number & 0x7F) as u8;
        number >>= 7;
        byte |= flag;
        bytes.push(byte);
        flag = 0x80;
        if number == 0 {
            if byte == 0xFF && !negative {
                bytes.push(0x80);
            }
            break;
        }
    }

    if negative {
        bytes.push(0xFF);
    }

    bytes.reverse();
    bytes
}

/// Encodes a length-prefixed string: `encode_varint(len) ++ bytes`.
pub fn length_prefixed_string(s: &[u8]) -> Vec<u8> {
    let mut out = encode_varint(s.len() as i64);
    out.extend_from_slice(s);
    out
}
