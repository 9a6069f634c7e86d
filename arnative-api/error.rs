/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

/// Errors that can be produced while interpreting native records.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Error {
    /// The record's version field does not match the layout this build
    /// understands. The rest of the record was not interpreted.
    UnsupportedVersion {
        kind: &'static str,
        expected: i32,
        found: i32,
    },
    /// The buffer is too small to hold a record of this kind.
    Truncated {
        kind: &'static str,
        expected: usize,
        found: usize,
    },
    /// A mock runtime connection could not be established.
    CommunicationError,
}
