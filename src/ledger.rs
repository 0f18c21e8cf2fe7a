//! Record of the bus addresses a device instance has claimed, so teardown and
//! failed bring-up touch exactly those and nothing else.

use heapless::Vec;

use crate::constants::MAX_ADDRESSES;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Role {
    Status,
    IconBank,
    /// Logical slot of the digit.
    Digit(u8),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Claim {
    pub role: Role,
    pub address: u8,
}

#[derive(Clone, Debug, Default)]
pub struct Ledger {
    claims: Vec<Claim, MAX_ADDRESSES>,
}

impl Ledger {
    pub const fn new() -> Self {
        Self { claims: Vec::new() }
    }

    /// Returns `false` when the ledger is full or the address is already held.
    pub fn record(&mut self, role: Role, address: u8) -> bool {
        if self.contains(address) {
            return false;
        }
        self.claims.push(Claim { role, address }).is_ok()
    }

    pub fn contains(&self, address: u8) -> bool {
        self.claims.iter().any(|claim| claim.address == address)
    }

    pub fn address_of(&self, role: Role) -> Option<u8> {
        self.claims
            .iter()
            .find(|claim| claim.role == role)
            .map(|claim| claim.address)
    }

    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Claim> {
        self.claims.iter()
    }

    /// Empties the ledger, returning claims oldest first.
    pub fn take(&mut self) -> Vec<Claim, MAX_ADDRESSES> {
        core::mem::take(&mut self.claims)
    }
}
