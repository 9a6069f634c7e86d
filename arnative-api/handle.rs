/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use std::ffi::c_void;
use std::fmt;

#[cfg(feature = "ipc")]
use serde::{Deserialize, Serialize};

/// An opaque handle to an object owned by the platform AR runtime.
///
/// The handle is an external identity only. Holding one does not keep the
/// underlying object alive, and nothing in this crate ever dereferences it.
/// How long the object it names stays valid is governed entirely by the
/// native runtime.
#[repr(transparent)]
#[derive(Clone, Copy, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "ipc", derive(Serialize, Deserialize))]
pub struct NativeHandle(usize);

impl NativeHandle {
    pub const NULL: NativeHandle = NativeHandle(0);

    /// Tags a raw pointer received from the native runtime.
    pub fn from_raw(ptr: *const c_void) -> NativeHandle {
        NativeHandle(ptr as usize)
    }

    /// The handle as a raw pointer, for passing back across the native
    /// boundary. Must not be dereferenced.
    pub fn as_raw(self) -> *const c_void {
        self.0 as *const c_void
    }

    pub const fn from_bits(bits: usize) -> NativeHandle {
        NativeHandle(bits)
    }

    pub const fn to_bits(self) -> usize {
        self.0
    }

    pub const fn is_null(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Debug for NativeHandle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "NativeHandle({:#x})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_handle() {
        assert!(NativeHandle::NULL.is_null());
        assert_eq!(NativeHandle::NULL.to_bits(), 0);
        assert!(!NativeHandle::from_bits(0x1000).is_null());
    }

    #[test]
    fn raw_pointer_round_trip() {
        let value = 42u32;
        let ptr = &value as *const u32 as *const c_void;
        let handle = NativeHandle::from_raw(ptr);
        assert!(!handle.is_null());
        assert_eq!(handle.as_raw(), ptr);
        assert_eq!(handle, NativeHandle::from_bits(ptr as usize));
    }

    #[test]
    fn debug_prints_hex() {
        let handle = NativeHandle::from_bits(0xab);
        assert_eq!(format!("{:?}", handle), "NativeHandle(0xab)");
    }
}
