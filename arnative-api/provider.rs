/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

/// Traits to be implemented by native AR backends
use crate::NativePlane;
use crate::NativeReferencePoint;
use crate::NativeSession;

#[cfg(feature = "ipc")]
use serde::{Deserialize, Serialize};

/// Identifies a plane tracked by the native runtime.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "ipc", derive(Serialize, Deserialize))]
pub struct PlaneId(pub u32);

/// Identifies a reference point placed in the native runtime.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "ipc", derive(Serialize, Deserialize))]
pub struct ReferencePointId(pub u32);

/// A trait for retrieving native pointer records from an AR backend.
///
/// Each accessor snapshots the entity's current handle into a fresh record.
/// The snapshot does not extend the handle's validity; how long the handle
/// stays meaningful is the runtime's business.
pub trait NativePointerApi: 'static + Send {
    /// The record for the running session, if there is one.
    fn session_native_ptr(&self) -> Option<NativeSession>;

    /// The record for a tracked plane.
    fn plane_native_ptr(&self, plane: PlaneId) -> Option<NativePlane>;

    /// The record for a reference point.
    fn reference_point_native_ptr(&self, point: ReferencePointId)
        -> Option<NativeReferencePoint>;
}
