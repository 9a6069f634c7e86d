/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use crate::Error;
use crate::NativeHandle;
use crate::NativePointerApi;
use crate::PlaneId;
use crate::Receiver;
use crate::ReferencePointId;
use crate::Sender;

#[cfg(feature = "ipc")]
use serde::{Deserialize, Serialize};

/// A trait for connecting simulated AR runtimes
pub trait MockRuntimeApi: 'static {
    fn simulate_runtime_connection(
        &mut self,
        init: MockRuntimeInit,
        receiver: Receiver<MockRuntimeMsg>,
    ) -> Result<Box<dyn NativePointerApi>, Error>;
}

/// Initial state for a simulated runtime.
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "ipc", derive(Serialize, Deserialize))]
pub struct MockRuntimeInit {
    pub session_handle: Option<NativeHandle>,
    pub planes: Vec<(PlaneId, NativeHandle)>,
    pub reference_points: Vec<(ReferencePointId, NativeHandle)>,
}

/// Messages for driving a simulated runtime.
#[derive(Debug)]
#[cfg_attr(feature = "ipc", derive(Serialize, Deserialize))]
pub enum MockRuntimeMsg {
    SetSessionHandle(Option<NativeHandle>),
    AddPlane(PlaneId, NativeHandle),
    RemovePlane(PlaneId),
    AddReferencePoint(ReferencePointId, NativeHandle),
    RemoveReferencePoint(ReferencePointId),
    Disconnect(Sender<()>),
}
