#![allow(dead_code)]

use fd6551::Transport;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Op {
    Claim(u8),
    Write(u8, u8),
    Release(u8),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BusFault(pub u8);

/// Records every bus operation; claims and writes can be made to fail per address.
#[derive(Default)]
pub struct RecordingBus {
    pub ops: Vec<Op>,
    pub failing_claims: Vec<u8>,
    pub failing_writes: Vec<u8>,
}

impl RecordingBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_claim(address: u8) -> Self {
        Self {
            failing_claims: vec![address],
            ..Self::default()
        }
    }

    pub fn failing_writes(addresses: &[u8]) -> Self {
        Self {
            failing_writes: addresses.to_vec(),
            ..Self::default()
        }
    }

    pub fn writes(&self) -> Vec<(u8, u8)> {
        self.ops
            .iter()
            .filter_map(|op| match *op {
                Op::Write(address, value) => Some((address, value)),
                _ => None,
            })
            .collect()
    }

    pub fn writes_to(&self, address: u8) -> Vec<u8> {
        self.writes()
            .into_iter()
            .filter(|&(a, _)| a == address)
            .map(|(_, value)| value)
            .collect()
    }

    pub fn touched(&self) -> Vec<u8> {
        let mut addresses: Vec<u8> = self
            .ops
            .iter()
            .map(|op| match *op {
                Op::Claim(a) | Op::Write(a, _) | Op::Release(a) => a,
            })
            .collect();
        addresses.sort_unstable();
        addresses.dedup();
        addresses
    }

    pub fn clear(&mut self) {
        self.ops.clear();
    }
}

impl Transport for RecordingBus {
    type Error = BusFault;

    fn claim(&mut self, address: u8) -> Result<(), BusFault> {
        if self.failing_claims.contains(&address) {
            return Err(BusFault(address));
        }
        self.ops.push(Op::Claim(address));
        Ok(())
    }

    fn release(&mut self, address: u8) {
        self.ops.push(Op::Release(address));
    }

    fn write(&mut self, address: u8, value: u8) -> Result<(), BusFault> {
        self.ops.push(Op::Write(address, value));
        if self.failing_writes.contains(&address) {
            return Err(BusFault(address));
        }
        Ok(())
    }
}
