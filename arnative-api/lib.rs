/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! This crate defines the versioned native-handle records that AR backends
//! hand out to embedding code. Backends are implemented by the `arnative`
//! crate.

mod descriptor;
mod error;
mod handle;
mod mock;
mod provider;

pub use descriptor::peek_version;
pub use descriptor::DescriptorKind;
pub use descriptor::NativeDescriptor;
pub use descriptor::NativePlane;
pub use descriptor::NativeReferencePoint;
pub use descriptor::NativeSession;
pub use descriptor::Plane;
pub use descriptor::ReferencePoint;
pub use descriptor::Session;
pub use descriptor::NATIVE_PLANE_VERSION;
pub use descriptor::NATIVE_REFERENCE_POINT_VERSION;
pub use descriptor::NATIVE_SESSION_VERSION;

pub use error::Error;

pub use handle::NativeHandle;

pub use mock::MockRuntimeApi;
pub use mock::MockRuntimeInit;
pub use mock::MockRuntimeMsg;

pub use provider::NativePointerApi;
pub use provider::PlaneId;
pub use provider::ReferencePointId;

#[cfg(feature = "ipc")]
pub use ipc_channel::ipc::IpcSender as Sender;

#[cfg(feature = "ipc")]
pub use ipc_channel::ipc::IpcReceiver as Receiver;

#[cfg(feature = "ipc")]
pub use ipc_channel::ipc::channel;

#[cfg(not(feature = "ipc"))]
pub use std::sync::mpsc::{Receiver, Sender};

#[cfg(not(feature = "ipc"))]
pub fn channel<T>() -> Result<(Sender<T>, Receiver<T>), ()> {
    Ok(std::sync::mpsc::channel())
}
