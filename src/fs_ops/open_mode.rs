//! fopen-style access modes.
//!
//! | mode | read | write | create | truncate | other          |
//! |------|------|-------|--------|----------|----------------|
//! | r    | yes  |       |        |          |                |
//! | w    |      | yes   | yes    | yes      |                |
//! | a    |      | yes   | yes    |          | append         |
//! | x    |      | yes   | new    |          | fails if exists|
//! | c    |      | yes   | yes    |          |                |
//!
//! A trailing `+` adds the missing direction. `b` and `t` flags are accepted and ignored.

use std::fmt;
use std::fs::OpenOptions;
use std::str::FromStr;

use crate::errors::FsError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Read,
    Write,
    Append,
    CreateNew,
    Create,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenMode {
    access: Access,
    update: bool,
}

impl OpenMode {
    pub const READ: OpenMode = OpenMode::new(Access::Read, false);
    pub const WRITE: OpenMode = OpenMode::new(Access::Write, false);
    pub const APPEND: OpenMode = OpenMode::new(Access::Append, false);

    pub const fn new(access: Access, update: bool) -> Self {
        Self { access, update }
    }

    pub fn access(&self) -> Access {
        self.access
    }

    /// True for the `+` variants.
    pub fn is_update(&self) -> bool {
        self.update
    }

    pub fn readable(&self) -> bool {
        self.update || self.access == Access::Read
    }

    pub fn writable(&self) -> bool {
        self.update || self.access != Access::Read
    }

    pub(crate) fn to_options(self) -> OpenOptions {
        let mut opts = OpenOptions::new();
        opts.read(self.readable());
        match self.access {
            Access::Read => {
                opts.write(self.update);
            }
            Access::Write => {
                opts.write(true).create(true).truncate(true);
            }
            Access::Append => {
                opts.append(true).create(true);
            }
            Access::CreateNew => {
                opts.write(true).create_new(true);
            }
            Access::Create => {
                opts.write(true).create(true);
            }
        }
        opts
    }
}

impl FromStr for OpenMode {
    type Err = FsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || FsError::InvalidMode(s.to_string());
        let mut chars = s.chars().filter(|c| *c != 'b' && *c != 't');
        let access = match chars.next() {
            Some('r') => Access::Read,
            Some('w') => Access::Write,
            Some('a') => Access::Append,
            Some('x') => Access::CreateNew,
            Some('c') => Access::Create,
            _ => return Err(invalid()),
        };
        let update = match (chars.next(), chars.next()) {
            (None, _) => false,
            (Some('+'), None) => true,
            _ => return Err(invalid()),
        };
        Ok(OpenMode::new(access, update))
    }
}

impl fmt::Display for OpenMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self.access {
            Access::Read => 'r',
            Access::Write => 'w',
            Access::Append => 'a',
            Access::CreateNew => 'x',
            Access::Create => 'c',
        };
        if self.update {
            write!(f, "{c}+")
        } else {
            write!(f, "{c}")
        }
    }
}
