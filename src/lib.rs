//! Driver for the FD6551 family of seven-segment LED controllers (FD6551,
//! FD650, TM1650).
//!
//! These chips expose every sub-device on its own bus address: a status
//! register for power and brightness, an optional icon bank register, and one
//! register per digit. [`FD6551`] owns those addresses for one display and keeps
//! the state needed for incremental updates; wrap it in a [`SharedDisplay`]
//! when several contexts drive the same display.

#![cfg_attr(not(test), no_std)]

mod constants;

pub mod chip;
pub mod config;
pub mod ledger;
pub mod segment;
pub mod shared;
pub mod state;
pub mod surface;
pub mod transport;

pub use chip::{AddressPlan, ChipProfile, Variant};
pub use config::{ConfigSource, DeviceConfig, IconMapping};
pub use constants::*;
pub use shared::{Indicator, SharedDisplay};
pub use state::DisplayState;
pub use transport::{I2cTransport, Transport};

use heapless::Vec;
use ledger::{Ledger, Role};
use num_traits::ToPrimitive;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Power {
    Off,
    On,
}

pub struct FD6551<T> {
    pub transport: T,
    config: DeviceConfig,
    plan: Option<AddressPlan>,
    ledger: Ledger,
    state: DisplayState,
    power: Power,
}

impl<T, E> FD6551<T>
where
    T: Transport<Error = E>,
{
    /// Creates the driver without touching the bus.
    pub fn new(transport: T, config: DeviceConfig) -> Self {
        let state = DisplayState::new(config.profile());
        Self {
            transport,
            config,
            plan: None,
            ledger: Ledger::new(),
            state,
            power: Power::Off,
        }
    }

    pub fn destroy(self) -> T {
        self.transport
    }

    /// Claims and blanks every address the display uses, leaving it powered off.
    ///
    /// Addresses are claimed status first, then the icon bank (only when icons
    /// are configured), then digits in bus order. If any step fails, everything
    /// claimed so far is reset and released before the error is returned.
    pub fn initialize(&mut self) -> Result<(), Error<E>> {
        if self.plan.is_some() {
            return Ok(());
        }

        self.config.validate()?;
        let plan = AddressPlan::derive(self.profile(), self.config.digits_reversed)?;

        self.state = DisplayState::new(self.profile());
        self.power = Power::Off;

        if let Err(err) = self.bring_up(&plan) {
            #[cfg(feature = "defmt")]
            defmt::warn!("bring-up failed, releasing claimed addresses");
            let rollback = self.release_all();
            return Err(err.with_rollback(rollback));
        }

        self.plan = Some(plan);
        Ok(())
    }

    /// [`initialize`](Self::initialize) then [`power_on`](Self::power_on).
    pub fn probe(&mut self) -> Result<(), Error<E>> {
        self.initialize()?;
        if let Err(err) = self.power_on() {
            self.plan = None;
            let rollback = self.release_all();
            return Err(err.with_rollback(rollback));
        }
        Ok(())
    }

    /// Turns the display off, blanks the icon bank and digits, and releases
    /// every claimed address. Safe to call repeatedly or after a failed
    /// initialization.
    pub fn teardown(&mut self) -> Result<(), Error<E>> {
        self.plan = None;
        self.release_all().into_result()
    }

    pub fn power_on(&mut self) -> Result<(), Error<E>> {
        self.plan()?;
        if self.state.brightness == 0 {
            self.state.brightness = self.profile().brightness_levels;
        }
        self.power = Power::On;
        self.write_status()
    }

    pub fn power_off(&mut self) -> Result<(), Error<E>> {
        self.plan()?;
        self.state.brightness = 0;
        self.power = Power::Off;
        self.write_status()
    }

    /// Sets brightness, clamped into `0..=max_brightness()`. Text and icons are
    /// left alone; `0` blanks the display without changing [`power`](Self::power).
    pub fn set_brightness<L>(&mut self, level: L) -> Result<(), Error<E>>
    where
        L: ToPrimitive,
    {
        self.plan()?;
        self.state.brightness = state::clamp_brightness(level, self.profile())?;
        self.write_status()
    }

    /// Parses a textual brightness value and applies it, returning the stored level.
    pub fn store_brightness(&mut self, input: &str) -> Result<u8, Error<E>> {
        let level = surface::parse_brightness(input)?;
        self.set_brightness(level)?;
        Ok(self.state.brightness)
    }

    /// Writes one character per digit, left to right.
    ///
    /// Extra characters are dropped and missing ones show as blanks. Every
    /// digit is written even if an earlier one fails; all failures are
    /// reported together.
    pub fn set_text(&mut self, chars: &[u8]) -> Result<(), Error<E>> {
        let profile = self.profile();
        let plan = self.plan.as_ref().ok_or(Error::NotInitialized)?;

        self.state.store_text(chars, profile);
        let segments = self.state.digit_bytes(profile);

        let mut failures = WriteFailures::new();
        for (&address, &value) in plan.digits().iter().zip(segments.iter()) {
            if let Err(error) = self.transport.write(address, value) {
                #[cfg(feature = "defmt")]
                defmt::error!("could not write digit at {=u8:#x}", address);
                failures.push(address, error);
            }
        }
        failures.into_result()
    }

    pub fn display_str(&mut self, string: &str) -> Result<(), Error<E>> {
        self.set_text(string.as_bytes())
    }

    /// Turns a configured icon on or off, preserving every other icon.
    pub fn set_icon(&mut self, name: &str, on: bool) -> Result<(), Error<E>> {
        self.plan()?;
        let address = self
            .ledger
            .address_of(Role::IconBank)
            .ok_or(ValidationError::UnknownIcon)?;
        let bit = self
            .config
            .icon_bit(name)
            .ok_or(ValidationError::UnknownIcon)?;

        let value = self.state.set_icon_bit(bit, on)?;

        #[cfg(feature = "defmt")]
        defmt::debug!("set icon bit {=u8}, on: {=bool}, value: {=u8:#x}", bit, on, value);

        self.write(address, value)
    }

    /// LED-class style setter: any non-zero intensity turns the icon on.
    pub fn set_icon_brightness(&mut self, name: &str, intensity: u8) -> Result<(), Error<E>> {
        self.set_icon(name, intensity > 0)
    }

    pub fn text(&self) -> &[u8] {
        self.state.text()
    }

    pub fn brightness(&self) -> u8 {
        self.state.brightness
    }

    pub fn max_brightness(&self) -> u8 {
        self.profile().brightness_levels
    }

    pub fn icon_bitmask(&self) -> u8 {
        self.state.icon_bitmask
    }

    /// Power label as last set by [`power_on`](Self::power_on) or
    /// [`power_off`](Self::power_off). [`set_brightness`](Self::set_brightness)
    /// never moves it, even when a non-zero level lights a display labelled `Off`.
    pub fn power(&self) -> Power {
        self.power
    }

    pub fn is_on(&self) -> bool {
        self.power == Power::On
    }

    pub fn is_initialized(&self) -> bool {
        self.plan.is_some()
    }

    pub fn state(&self) -> &DisplayState {
        &self.state
    }

    pub fn config(&self) -> &DeviceConfig {
        &self.config
    }

    pub fn profile(&self) -> &'static ChipProfile {
        self.config.profile()
    }

    pub fn addresses(&self) -> Option<&AddressPlan> {
        self.plan.as_ref()
    }

    fn plan(&self) -> Result<&AddressPlan, Error<E>> {
        self.plan.as_ref().ok_or(Error::NotInitialized)
    }

    fn bring_up(&mut self, plan: &AddressPlan) -> Result<(), Error<E>> {
        self.claim(Role::Status, plan.status, status::DISPLAY_OFF)?;

        if let Some(icon) = plan.icon.filter(|_| self.config.uses_icon_bank()) {
            self.claim(Role::IconBank, icon, BLANK)?;
        }

        #[cfg(feature = "defmt")]
        {
            if plan.icon.is_none() && !self.config.icons.is_empty() {
                defmt::debug!("chip has no icon bank, ignoring configured icons");
            }
        }

        let digits = plan.digits();
        let count = digits.len();
        for raw in 0..count {
            let slot = if self.config.digits_reversed {
                count - 1 - raw
            } else {
                raw
            };
            self.claim(Role::Digit(slot as u8), digits[slot], BLANK)?;
        }
        Ok(())
    }

    fn claim(&mut self, role: Role, address: u8, reset: u8) -> Result<(), Error<E>> {
        self.transport
            .claim(address)
            .map_err(|error| Error::transport(address, error))?;
        self.ledger.record(role, address);

        #[cfg(feature = "defmt")]
        defmt::debug!("claimed {} at {=u8:#x}", role, address);

        self.write(address, reset)
    }

    fn release_all(&mut self) -> WriteFailures<E> {
        let mut failures = WriteFailures::new();

        self.state.brightness = 0;
        self.power = Power::Off;

        let claims = self.ledger.take();
        if let Some(claim) = claims.iter().find(|claim| claim.role == Role::Status) {
            if let Err(error) = self.transport.write(claim.address, status::DISPLAY_OFF) {
                failures.push(claim.address, error);
            }
        }
        for claim in claims.iter().rev() {
            if claim.role != Role::Status {
                if let Err(error) = self.transport.write(claim.address, BLANK) {
                    failures.push(claim.address, error);
                }
            }
            self.transport.release(claim.address);
        }

        failures
    }

    fn write_status(&mut self) -> Result<(), Error<E>> {
        let address = self.plan()?.status;
        let value = self.state.status_byte(self.profile());

        #[cfg(feature = "defmt")]
        defmt::debug!("set status reg value: {=u8:#x}", value);

        self.write(address, value)
    }

    fn write(&mut self, address: u8, value: u8) -> Result<(), Error<E>> {
        self.transport
            .write(address, value)
            .map_err(|error| Error::transport(address, error))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    MissingSource,
    UnsupportedVariant,
    InvalidDigitCount(u8),
    InvalidBrightnessLevels(u8),
    AddressOutOfRange(u8),
    AddressConflict(u8),
    TooManyIcons,
    InvalidIconBit(u8),
    DuplicateIconBit(u8),
    DuplicateIconName,
    InvalidIconName,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ValidationError {
    UnknownIcon,
    InvalidIconBit(u8),
    InvalidValue,
}

/// A bus write that failed, and where.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TransportError<E> {
    pub address: u8,
    pub error: E,
}

/// Every failed write of one operation, in the order they were attempted.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WriteFailures<E> {
    failures: Vec<TransportError<E>, MAX_WRITE_FAILURES>,
}

impl<E> WriteFailures<E> {
    fn new() -> Self {
        Self {
            failures: Vec::new(),
        }
    }

    // one failed write plus one rollback write per owned address at most
    fn push(&mut self, address: u8, error: E) {
        let _ = self.failures.push(TransportError { address, error });
    }

    fn append(&mut self, other: WriteFailures<E>) {
        for failure in other.failures {
            self.push(failure.address, failure.error);
        }
    }

    fn into_result(self) -> Result<(), Error<E>> {
        if self.failures.is_empty() {
            Ok(())
        } else {
            Err(Error::Transport(self))
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &TransportError<E>> {
        self.failures.iter()
    }

    pub fn len(&self) -> usize {
        self.failures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn first(&self) -> Option<&TransportError<E>> {
        self.failures.first()
    }

    pub fn addresses(&self) -> impl Iterator<Item = u8> + '_ {
        self.failures.iter().map(|failure| failure.address)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    Config(ConfigError),
    Validation(ValidationError),
    Transport(WriteFailures<E>),
    NotInitialized,
}

impl<E> Error<E> {
    fn transport(address: u8, error: E) -> Self {
        let mut failures = WriteFailures::new();
        failures.push(address, error);
        Error::Transport(failures)
    }

    /// Folds failures hit while rolling back into the error that caused the
    /// rollback. A non-transport error is replaced when rollback writes failed.
    fn with_rollback(self, rollback: WriteFailures<E>) -> Self {
        match self {
            Error::Transport(mut failures) => {
                failures.append(rollback);
                Error::Transport(failures)
            }
            other if rollback.is_empty() => other,
            _ => Error::Transport(rollback),
        }
    }
}

impl<E> From<ConfigError> for Error<E> {
    fn from(error: ConfigError) -> Self {
        Error::Config(error)
    }
}

impl<E> From<ValidationError> for Error<E> {
    fn from(error: ValidationError) -> Self {
        Error::Validation(error)
    }
}
