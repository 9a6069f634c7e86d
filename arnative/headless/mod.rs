/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! A headless runtime for exercising the native-record contract without AR
//! hardware. Entity handles live behind a shared table which a message loop
//! updates, and every accessor snapshots the current handle into a fresh
//! record, the same shape a platform backend has.

use arnative_api::Error;
use arnative_api::MockRuntimeApi;
use arnative_api::MockRuntimeInit;
use arnative_api::MockRuntimeMsg;
use arnative_api::NativeHandle;
use arnative_api::NativePlane;
use arnative_api::NativePointerApi;
use arnative_api::NativeReferencePoint;
use arnative_api::NativeSession;
use arnative_api::PlaneId;
use arnative_api::Receiver;
use arnative_api::ReferencePointId;

use log::warn;

use std::sync::{Arc, Mutex};
use std::thread;

pub struct HeadlessMockRuntime {}

struct HeadlessRuntime {
    data: Arc<Mutex<HeadlessRuntimeData>>,
}

struct HeadlessRuntimeData {
    session_handle: Option<NativeHandle>,
    planes: Vec<(PlaneId, NativeHandle)>,
    reference_points: Vec<(ReferencePointId, NativeHandle)>,
    disconnected: bool,
}

impl MockRuntimeApi for HeadlessMockRuntime {
    fn simulate_runtime_connection(
        &mut self,
        init: MockRuntimeInit,
        receiver: Receiver<MockRuntimeMsg>,
    ) -> Result<Box<dyn NativePointerApi>, Error> {
        let data = HeadlessRuntimeData {
            session_handle: init.session_handle,
            planes: init.planes,
            reference_points: init.reference_points,
            disconnected: false,
        };
        let data = Arc::new(Mutex::new(data));
        let data_ = data.clone();

        thread::spawn(move || {
            run_loop(receiver, data_);
        });
        Ok(Box::new(HeadlessRuntime { data }))
    }
}

fn run_loop(receiver: Receiver<MockRuntimeMsg>, data: Arc<Mutex<HeadlessRuntimeData>>) {
    while let Ok(msg) = receiver.recv() {
        if !data.lock().expect("Mutex poisoned").handle_msg(msg) {
            break;
        }
    }
}

impl NativePointerApi for HeadlessRuntime {
    fn session_native_ptr(&self) -> Option<NativeSession> {
        let data = self.data.lock().unwrap();
        if data.disconnected {
            return None;
        }
        data.session_handle.map(NativeSession::new)
    }

    fn plane_native_ptr(&self, plane: PlaneId) -> Option<NativePlane> {
        let data = self.data.lock().unwrap();
        if data.disconnected {
            return None;
        }
        let entry = data.planes.iter().find(|&&(id, _)| id == plane);
        if entry.is_none() {
            warn!("native pointer requested for untracked plane {:?}", plane);
        }
        entry.map(|&(_, handle)| NativePlane::new(handle))
    }

    fn reference_point_native_ptr(
        &self,
        point: ReferencePointId,
    ) -> Option<NativeReferencePoint> {
        let data = self.data.lock().unwrap();
        if data.disconnected {
            return None;
        }
        let entry = data.reference_points.iter().find(|&&(id, _)| id == point);
        if entry.is_none() {
            warn!(
                "native pointer requested for unknown reference point {:?}",
                point
            );
        }
        entry.map(|&(_, handle)| NativeReferencePoint::new(handle))
    }
}

impl HeadlessMockRuntime {
    pub fn new() -> HeadlessMockRuntime {
        HeadlessMockRuntime {}
    }
}

impl HeadlessRuntimeData {
    fn handle_msg(&mut self, msg: MockRuntimeMsg) -> bool {
        match msg {
            MockRuntimeMsg::SetSessionHandle(handle) => {
                self.session_handle = handle;
            }
            MockRuntimeMsg::AddPlane(id, handle) => {
                if let Some(entry) = self.planes.iter_mut().find(|&&mut (i, _)| i == id) {
                    entry.1 = handle;
                } else {
                    self.planes.push((id, handle));
                }
            }
            MockRuntimeMsg::RemovePlane(id) => {
                self.planes.retain(|&(i, _)| i != id);
            }
            MockRuntimeMsg::AddReferencePoint(id, handle) => {
                if let Some(entry) = self
                    .reference_points
                    .iter_mut()
                    .find(|&&mut (i, _)| i == id)
                {
                    entry.1 = handle;
                } else {
                    self.reference_points.push((id, handle));
                }
            }
            MockRuntimeMsg::RemoveReferencePoint(id) => {
                self.reference_points.retain(|&(i, _)| i != id);
            }
            MockRuntimeMsg::Disconnect(s) => {
                self.disconnected = true;
                // notify the client that we're done disconnecting
                let _ = s.send(());
                return false;
            }
        }
        true
    }
}
