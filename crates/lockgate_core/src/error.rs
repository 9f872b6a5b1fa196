use std::borrow::Cow;
use std::fmt;
use thiserror::Error;

use crate::gate::SourceId;

/// Convenient result alias for lockgate_core.
pub type Result<T> = std::result::Result<T, CoreError>;

/// How loudly an error is reported by [`crate::logging::log_core_error`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd)]
pub enum Severity {
    /// Redundant gate traffic: the request is tolerated but suspicious.
    Warn,
    /// Configuration that cannot be used.
    Error,
}

/// Where an error came from.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Domain {
    Gate,
    Config,
    Other,
}

/// Stable error "kind" for matching/branching.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ErrorKind {
    InvalidArgument,
    /// A source asked for a lock it already holds.
    RedundantLock,
    /// A source released a lock it never held.
    NotHeld,
    Other,
}

/// Structured context attached to an error.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Payload {
    None,

    /// Offending configuration key and its raw value.
    Context {
        key: &'static str,
        value: Cow<'static, str>,
    },

    /// The offending source and how many sources held a lock.
    Source { source: SourceId, holders: usize },
}

/// The one error type that crosses module boundaries in lockgate_core.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
#[error("{severity:?}: {message}")]
pub struct CoreError {
    pub domain: Domain,
    pub kind: ErrorKind,
    pub severity: Severity,
    pub message: Cow<'static, str>,
    pub payload: Payload,
}

impl CoreError {
    #[inline]
    pub fn warn() -> ErrB {
        ErrB::new(Severity::Warn)
    }

    #[inline]
    pub fn error() -> ErrB {
        ErrB::new(Severity::Error)
    }

    /// A source asked for a lock it already holds.
    pub fn redundant_lock(source: SourceId, holders: usize) -> Self {
        CoreError::warn()
            .domain(Domain::Gate)
            .kind(ErrorKind::RedundantLock)
            .msgf(format_args!("source `{source}` already holds the lock"))
            .payload(Payload::Source { source, holders })
            .build()
    }

    /// A source released a lock it does not hold.
    pub fn not_held(source: SourceId, holders: usize) -> Self {
        CoreError::warn()
            .domain(Domain::Gate)
            .kind(ErrorKind::NotHeld)
            .msgf(format_args!("source `{source}` does not hold the lock"))
            .payload(Payload::Source { source, holders })
            .build()
    }

    /// A configuration value could not be parsed.
    pub fn invalid_config(key: &'static str, value: impl Into<Cow<'static, str>>) -> Self {
        CoreError::error()
            .domain(Domain::Config)
            .kind(ErrorKind::InvalidArgument)
            .msgf(format_args!("invalid value for {key}"))
            .payload(Payload::Context {
                key,
                value: value.into(),
            })
            .build()
    }
}

/// Chained builder for [`CoreError`]; unset fields stay `Other` / `None`.
#[derive(Debug, Clone)]
pub struct ErrB {
    domain: Domain,
    kind: ErrorKind,
    severity: Severity,
    message: Cow<'static, str>,
    payload: Payload,
}

impl ErrB {
    #[inline]
    fn new(severity: Severity) -> Self {
        Self {
            domain: Domain::Other,
            kind: ErrorKind::Other,
            severity,
            message: Cow::Borrowed(""),
            payload: Payload::None,
        }
    }

    #[inline]
    pub fn domain(mut self, d: Domain) -> Self {
        self.domain = d;
        self
    }

    #[inline]
    pub fn kind(mut self, k: ErrorKind) -> Self {
        self.kind = k;
        self
    }

    #[inline]
    pub fn msgf(mut self, args: fmt::Arguments<'_>) -> Self {
        self.message = Cow::Owned(args.to_string());
        self
    }

    #[inline]
    pub fn payload(mut self, p: Payload) -> Self {
        self.payload = p;
        self
    }

    #[inline]
    pub fn build(self) -> CoreError {
        CoreError {
            domain: self.domain,
            kind: self.kind,
            severity: self.severity,
            message: self.message,
            payload: self.payload,
        }
    }
}
