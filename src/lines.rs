use alloc::string::String;
use core::slice;

use tinyvec::TinyVec;

// Most device lines fit inline; longer ones spill to the heap.
const LINE_INLINE: usize = 64;
type LineBuf = TinyVec<[u8; LINE_INLINE]>;

/// Reassembles newline-terminated lines from arbitrarily sized byte chunks.
///
/// Each byte is one character (Latin-1), so a stray non-ASCII byte never makes a
/// line undecodable. The terminator is stripped. An empty line is still a line.
#[derive(Default, Clone)]
pub struct LineAssembler {
    buf: LineBuf,
}

impl LineAssembler {
    pub fn new() -> Self {
        Self {
            buf: LineBuf::new(),
        }
    }

    pub fn process_byte(&mut self, b: u8) -> Option<String> {
        if b == b'\n' {
            let line = self.buf.iter().copied().map(char::from).collect();
            self.buf.clear();
            Some(line)
        } else {
            self.buf.push(b);
            None
        }
    }

    /// Lines completed by `chunk`, in arrival order.
    ///
    /// The iterator is lazy: bytes are consumed as lines are pulled. Dropping it
    /// early discards the unread rest of `chunk` but keeps whatever was already
    /// buffered.
    pub fn feed<'a>(&'a mut self, chunk: &'a [u8]) -> Lines<'a> {
        Lines {
            assembler: self,
            bytes: chunk.iter(),
        }
    }

    /// Number of buffered bytes still waiting for a terminator.
    pub fn pending(&self) -> usize {
        self.buf.len()
    }

    pub fn clear(&mut self) {
        self.buf.clear();
    }
}

pub struct Lines<'a> {
    assembler: &'a mut LineAssembler,
    bytes: slice::Iter<'a, u8>,
}

impl Iterator for Lines<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        for &b in self.bytes.by_ref() {
            if let Some(line) = self.assembler.process_byte(b) {
                return Some(line);
            }
        }
        None
    }
}
