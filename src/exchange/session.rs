//! Last-request-wins bookkeeping for asynchronous quoting.

use core::fmt;

use tracing::debug;

use super::ExchangeResult;

/// Identifies one quote computation within a [`QuoteSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct QuoteTicket(u64);

impl QuoteTicket {
    /// Returns the ticket's sequence number.
    #[must_use]
    pub const fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for QuoteTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Hands out increasing tickets and keeps only the result of the latest.
///
/// A caller that recomputes on every keystroke or snapshot update takes a
/// ticket before each computation and offers the result back with it.
/// Results arriving for a superseded ticket are discarded, so the displayed
/// quote always belongs to the latest inputs.
///
/// # Examples
///
/// ```
/// use exchange_quote::exchange::{ExchangeResult, QuoteSession};
///
/// let mut session = QuoteSession::new();
/// let slow = session.begin();
/// let fast = session.begin();
///
/// assert!(session.complete(fast, ExchangeResult::empty()));
/// assert!(!session.complete(slow, ExchangeResult::loading()));
/// assert_eq!(session.latest(), Some(&ExchangeResult::empty()));
/// ```
#[derive(Debug, Clone, Default)]
pub struct QuoteSession {
    issued: u64,
    accepted: Option<(QuoteTicket, ExchangeResult)>,
}

impl QuoteSession {
    /// Creates a session with no tickets issued.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Issues the next ticket, superseding every earlier one.
    pub fn begin(&mut self) -> QuoteTicket {
        self.issued += 1;
        QuoteTicket(self.issued)
    }

    /// Returns `true` if `ticket` is the latest issued.
    #[must_use]
    pub const fn is_current(&self, ticket: QuoteTicket) -> bool {
        ticket.0 == self.issued
    }

    /// Offers the result computed under `ticket`.
    ///
    /// Returns `true` if it was accepted as the latest result.
    pub fn complete(&mut self, ticket: QuoteTicket, result: ExchangeResult) -> bool {
        if !self.is_current(ticket) {
            debug!(%ticket, latest = self.issued, "discarded superseded quote");
            return false;
        }
        self.accepted = Some((ticket, result));
        true
    }

    /// Returns the latest accepted result.
    #[must_use]
    pub fn latest(&self) -> Option<&ExchangeResult> {
        self.accepted.as_ref().map(|(_, result)| result)
    }

    /// Returns the ticket of the latest accepted result.
    #[must_use]
    pub fn latest_ticket(&self) -> Option<QuoteTicket> {
        self.accepted.as_ref().map(|(ticket, _)| *ticket)
    }
}
