//! Унифицированные трэйты чтения/записи на основе std::io::{BufRead, Write}.

use crate::error::Result;
use std::io::{BufRead, Write};

pub trait ReadFormat {
    type Output;

    fn read<R: BufRead>(r: R) -> Result<Self::Output>;
}

pub trait WriteFormat {
    type Input: ?Sized;

    fn write<W: Write>(w: W, value: &Self::Input) -> Result<()>;
}
