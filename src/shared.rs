//! Serialized access to one display from several contexts.
//!
//! Text, brightness and icon updates may come from unrelated callers. Each
//! operation here takes the lock, updates the display state and performs its
//! bus writes before releasing it, so a read-modify-write of the icon bank can
//! never interleave with another one.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex;
use heapless::{String, Vec};
use num_traits::ToPrimitive;

use crate::constants::{ICON_MAX_BRIGHTNESS, MAX_DIGITS, MAX_ICONS, MAX_ICON_NAME_LEN};
use crate::transport::Transport;
use crate::{Error, FD6551};

pub struct SharedDisplay<M, T> {
    inner: Mutex<M, RefCell<FD6551<T>>>,
}

impl<M, T, E> SharedDisplay<M, T>
where
    M: RawMutex,
    T: Transport<Error = E>,
{
    pub fn new(display: FD6551<T>) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(display)),
        }
    }

    pub fn into_inner(self) -> FD6551<T> {
        self.inner.into_inner().into_inner()
    }

    /// Runs `f` with exclusive access to the display. Do not call back into
    /// this `SharedDisplay` from inside `f`.
    pub fn lock<R>(&self, f: impl FnOnce(&mut FD6551<T>) -> R) -> R {
        self.inner.lock(|display| f(&mut display.borrow_mut()))
    }

    pub fn probe(&self) -> Result<(), Error<E>> {
        self.lock(|display| display.probe())
    }

    pub fn teardown(&self) -> Result<(), Error<E>> {
        self.lock(|display| display.teardown())
    }

    pub fn power_on(&self) -> Result<(), Error<E>> {
        self.lock(|display| display.power_on())
    }

    pub fn power_off(&self) -> Result<(), Error<E>> {
        self.lock(|display| display.power_off())
    }

    pub fn set_brightness<L: ToPrimitive>(&self, level: L) -> Result<(), Error<E>> {
        self.lock(|display| display.set_brightness(level))
    }

    pub fn store_brightness(&self, input: &str) -> Result<u8, Error<E>> {
        self.lock(|display| display.store_brightness(input))
    }

    pub fn set_text(&self, chars: &[u8]) -> Result<(), Error<E>> {
        self.lock(|display| display.set_text(chars))
    }

    pub fn set_icon(&self, name: &str, on: bool) -> Result<(), Error<E>> {
        self.lock(|display| display.set_icon(name, on))
    }

    pub fn text(&self) -> Vec<u8, MAX_DIGITS> {
        self.lock(|display| display.text().iter().copied().collect())
    }

    pub fn brightness(&self) -> u8 {
        self.lock(|display| display.brightness())
    }

    pub fn max_brightness(&self) -> u8 {
        self.lock(|display| display.max_brightness())
    }

    pub fn icon_bitmask(&self) -> u8 {
        self.lock(|display| display.icon_bitmask())
    }

    /// One handle per configured icon, or none when the chip has no icon bank.
    pub fn indicators(&self) -> Vec<Indicator<'_, M, T>, MAX_ICONS> {
        self.lock(|display| {
            if !display.config().uses_icon_bank() {
                return Vec::new();
            }
            display
                .config()
                .icons
                .iter()
                .map(|icon| Indicator {
                    display: self,
                    name: icon.name.clone(),
                    bit: icon.bit,
                })
                .collect()
        })
    }

    pub fn indicator(&self, name: &str) -> Option<Indicator<'_, M, T>> {
        self.indicators()
            .into_iter()
            .find(|indicator| indicator.name() == name)
    }
}

/// An on/off indicator backed by one icon bank bit.
pub struct Indicator<'a, M, T> {
    display: &'a SharedDisplay<M, T>,
    name: String<MAX_ICON_NAME_LEN>,
    bit: u8,
}

impl<'a, M, T, E> Indicator<'a, M, T>
where
    M: RawMutex,
    T: Transport<Error = E>,
{
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn bit(&self) -> u8 {
        self.bit
    }

    pub fn max_brightness(&self) -> u8 {
        ICON_MAX_BRIGHTNESS
    }

    /// Icons are binary, so this reads back either `0` or `max_brightness()`.
    pub fn brightness(&self) -> u8 {
        if self.display.icon_bitmask() & (1 << self.bit) != 0 {
            ICON_MAX_BRIGHTNESS
        } else {
            0
        }
    }

    pub fn set_brightness(&self, brightness: u8) -> Result<(), Error<E>> {
        self.display.set_icon(&self.name, brightness > 0)
    }
}
