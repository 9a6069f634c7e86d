/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! This crate implements backends for the `arnative-api` native-handle
//! records.

#[cfg(feature = "headless")]
pub mod headless;
