// SPDX-FileCopyrightText: 2026 Zapcast Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Dispatch orchestration for the operator console.
//!
//! Three cooperating pieces sit on top of the campaign gateway:
//!
//! * [`ActiveDispatchGuard`] answers the account-wide "is any dispatch
//!   already running?" question, failing closed on gateway errors.
//! * [`DispatchController`] drives one campaign's order through the
//!   no-order / open / closed state machine, enforcing preconditions
//!   before every start and reconciling with the gateway after every
//!   mutation.
//! * [`ParametersStore`] reads and writes the account's send-rate
//!   tunables.
//!
//! [`SessionView`] carries the cached connection snapshot the controller
//! consults for the link-status precondition.

pub mod controller;
pub mod guard;
pub mod params;
pub mod session;

pub use controller::{DispatchController, DispatchState};
pub use guard::ActiveDispatchGuard;
pub use params::ParametersStore;
pub use session::SessionView;
