//! Step narration fetched from the explanation service.
//!
//! Each request is tagged with a [`Ticket`]. Only the newest ticket may
//! deliver text, so a slow answer for a step the user already moved past
//! is dropped instead of overwriting the current explanation.

mod client;

pub use client::NarrationClient;

/// Identifies one narration request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

/// Hands out tickets and remembers which one is current.
#[derive(Debug, Default)]
pub struct RequestLedger {
	latest: u64,
}

impl RequestLedger {
	/// Ledger with no outstanding tickets.
	pub fn new() -> Self {
		Self::default()
	}

	/// Issues a ticket that supersedes every earlier one.
	pub fn issue(&mut self) -> Ticket {
		self.latest += 1;
		Ticket(self.latest)
	}

	/// Whether `ticket` is the newest one issued and not cancelled.
	pub fn is_current(&self, ticket: Ticket) -> bool {
		ticket.0 == self.latest
	}

	/// Invalidates every outstanding ticket without issuing a new one.
	pub fn cancel_all(&mut self) {
		self.latest += 1;
	}
}
