//! Binary stream primitives for save data
//!
//! Integers are big-endian; a bool is a single byte (0 or 1).

use bytes::{Buf, BufMut, Bytes, BytesMut};
use thiserror::Error;

/// Errors while decoding a stream
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StreamError {
    #[error("unexpected end of stream: needed {needed} bytes, {remaining} left")]
    UnexpectedEof { needed: usize, remaining: usize },

    #[error("invalid color set {0:#x}")]
    InvalidColors(u32),

    #[error("invalid condition value {0:#x}")]
    InvalidCondition(u32),

    #[error("invalid bool byte {0}")]
    InvalidBool(u8),
}

/// Append-only binary writer
#[derive(Debug, Default)]
pub struct StreamWriter {
    buf: BytesMut,
}

impl StreamWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put_u32(&mut self, value: u32) -> &mut Self {
        self.buf.put_u32(value);
        self
    }

    pub fn put_bool(&mut self, value: bool) -> &mut Self {
        self.buf.put_u8(u8::from(value));
        self
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn finish(self) -> Bytes {
        self.buf.freeze()
    }
}

/// Binary reader over a byte buffer
#[derive(Debug)]
pub struct StreamReader<B> {
    buf: B,
}

impl<B: Buf> StreamReader<B> {
    pub fn new(buf: B) -> Self {
        Self { buf }
    }

    fn ensure(&self, needed: usize) -> Result<(), StreamError> {
        let remaining = self.buf.remaining();
        if remaining < needed {
            return Err(StreamError::UnexpectedEof { needed, remaining });
        }
        Ok(())
    }

    pub fn get_u32(&mut self) -> Result<u32, StreamError> {
        self.ensure(4)?;
        Ok(self.buf.get_u32())
    }

    pub fn get_bool(&mut self) -> Result<bool, StreamError> {
        self.ensure(1)?;
        match self.buf.get_u8() {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(StreamError::InvalidBool(other)),
        }
    }

    pub fn remaining(&self) -> usize {
        self.buf.remaining()
    }
}
