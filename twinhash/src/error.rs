// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Error types for twinhash operations

use std::fmt;

/// ErrorKind is all kinds of Error of twinhash.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// A key equal to the table's deleted-key sentinel was used as a live key.
    ReservedKeyUsed,
    /// The input stream ended before a complete table was read.
    TruncatedInput,
    /// The input stream carries a value that cannot be decoded.
    MalformedData,
    /// An argument is out of the supported range.
    InvalidArgument,
    /// The underlying stream failed for a reason other than running out of data.
    StreamFailed,
}

impl ErrorKind {
    /// Convert this error kind instance into static str.
    pub const fn into_static(self) -> &'static str {
        match self {
            ErrorKind::ReservedKeyUsed => "ReservedKeyUsed",
            ErrorKind::TruncatedInput => "TruncatedInput",
            ErrorKind::MalformedData => "MalformedData",
            ErrorKind::InvalidArgument => "InvalidArgument",
            ErrorKind::StreamFailed => "StreamFailed",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.into_static())
    }
}

/// Error is the error struct returned by all twinhash functions.
pub struct Error {
    kind: ErrorKind,
    message: String,
    context: Vec<(&'static str, String)>,
    source: Option<anyhow::Error>,
}

impl Error {
    /// Create a new Error with error kind and message.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            context: Vec::default(),
            source: None,
        }
    }

    /// Add more context in error.
    pub fn with_context(mut self, key: &'static str, value: impl ToString) -> Self {
        self.context.push((key, value.to_string()));
        self
    }

    /// Set source for error.
    ///
    /// # Panics
    ///
    /// Panics if the source has been set.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::error::Error as _;
    /// use twinhash::error::{Error, ErrorKind};
    ///
    /// let mut error = Error::new(ErrorKind::StreamFailed, "failed to read table");
    /// assert!(error.source().is_none());
    /// error = error.set_source(std::io::Error::new(std::io::ErrorKind::Other, "IO error"));
    /// assert!(error.source().is_some());
    /// ```
    pub fn set_source(mut self, src: impl Into<anyhow::Error>) -> Self {
        assert!(self.source.is_none(), "the source error has been set");
        self.source = Some(src.into());
        self
    }

    /// Return error's kind.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Return error's message.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }
}

// Shorthand constructors used across the crate.
impl Error {
    pub(crate) fn reserved_key(key: &str) -> Self {
        Self::new(
            ErrorKind::ReservedKeyUsed,
            "key equals the table's deleted-key sentinel",
        )
        .with_context("key", format!("{key:?}"))
    }

    pub(crate) fn truncated(tag: &'static str) -> Self {
        Self::new(
            ErrorKind::TruncatedInput,
            format!("stream ended while reading {tag}"),
        )
    }

    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MalformedData, message)
    }

    /// Classify an I/O failure raised while reading `tag`.
    pub(crate) fn from_read(tag: &'static str, err: std::io::Error) -> Self {
        if err.kind() == std::io::ErrorKind::UnexpectedEof {
            Self::truncated(tag)
        } else {
            Self::new(ErrorKind::StreamFailed, format!("failed to read {tag}")).set_source(err)
        }
    }

    pub(crate) fn from_write(tag: &'static str, err: std::io::Error) -> Self {
        Self::new(ErrorKind::StreamFailed, format!("failed to write {tag}")).set_source(err)
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // If alternate has been specified, we will print like Debug.
        if f.alternate() {
            let mut de = f.debug_struct("Error");
            de.field("kind", &self.kind);
            de.field("message", &self.message);
            de.field("context", &self.context);
            de.field("source", &self.source);
            return de.finish();
        }

        write!(f, "{}", self.kind)?;
        if !self.message.is_empty() {
            write!(f, " => {}", self.message)?;
        }
        writeln!(f)?;

        if !self.context.is_empty() {
            writeln!(f)?;
            writeln!(f, "Context:")?;
            for (k, v) in self.context.iter() {
                writeln!(f, "   {k}: {v}")?;
            }
        }

        if let Some(source) = &self.source {
            writeln!(f)?;
            writeln!(f, "Source:")?;
            writeln!(f, "   {source:#}")?;
        }

        Ok(())
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;

        if !self.context.is_empty() {
            write!(f, ", context: {{ ")?;
            write!(
                f,
                "{}",
                self.context
                    .iter()
                    .map(|(k, v)| format!("{k}: {v}"))
                    .collect::<Vec<_>>()
                    .join(", ")
            )?;
            write!(f, " }}")?;
        }

        if !self.message.is_empty() {
            write!(f, " => {}", self.message)?;
        }

        if let Some(source) = &self.source {
            write!(f, ", source: {source}")?;
        }

        Ok(())
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source.as_ref().map(|v| v.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn test_eof_maps_to_truncated_input() {
        let err = Error::from_read(
            "count",
            std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "eof"),
        );
        assert_eq!(err.kind(), ErrorKind::TruncatedInput);
        assert!(err.message().contains("count"));
        assert!(err.source().is_none());
    }

    #[test]
    fn test_other_io_failure_keeps_source() {
        let err = Error::from_read(
            "key",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.kind(), ErrorKind::StreamFailed);
        assert!(err.source().is_some());
    }

    #[test]
    fn test_display_includes_context() {
        let err = Error::reserved_key("");
        let text = err.to_string();
        assert!(text.starts_with("ReservedKeyUsed"));
        assert!(text.contains("key: \"\""));
    }
}
