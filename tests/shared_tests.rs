extern crate fd6551;

mod common;

use std::thread;

use common::{Op, RecordingBus};
use embassy_sync::blocking_mutex::raw::{CriticalSectionRawMutex, NoopRawMutex};
use fd6551::{DeviceConfig, Error, SharedDisplay, ValidationError, Variant, FD6551};

const ICONS: u8 = 0x33;

fn icon_config() -> DeviceConfig {
    ["play", "pause", "usb", "lan", "wifi", "colon", "alarm", "hd"]
        .iter()
        .enumerate()
        .try_fold(DeviceConfig::new(Variant::Fd6551), |config, (bit, name)| {
            config.with_icon(name, bit as u8)
        })
        .unwrap()
}

#[test]
fn concurrent_icon_updates_never_lose_bits() {
    let display: SharedDisplay<CriticalSectionRawMutex, _> =
        SharedDisplay::new(FD6551::new(RecordingBus::new(), icon_config()));
    display.probe().unwrap();

    let indicators = display.indicators();
    assert_eq!(indicators.len(), 8);

    thread::scope(|scope| {
        for indicator in &indicators {
            scope.spawn(move || {
                for round in 0..50u8 {
                    indicator.set_brightness(round % 2).unwrap();
                }
                indicator.set_brightness(255).unwrap();
            });
        }
        scope.spawn(|| {
            for round in 0..50u8 {
                display.set_text(&[b'0' + round % 10; 4]).unwrap();
                display.set_brightness(round % 9).unwrap();
            }
        });
    });

    assert!(indicators.iter().all(|indicator| indicator.brightness() == 255));
    assert_eq!(display.icon_bitmask(), 0xFF);

    drop(indicators);
    let display = display.into_inner();
    assert_eq!(display.transport.writes_to(ICONS).last(), Some(&0xFF));
}

#[test]
fn indicator_reads_back_binary_brightness() {
    let display: SharedDisplay<NoopRawMutex, _> =
        SharedDisplay::new(FD6551::new(RecordingBus::new(), icon_config()));
    display.probe().unwrap();

    let usb = display.indicator("usb").unwrap();
    assert_eq!(usb.bit(), 2);
    assert_eq!(usb.max_brightness(), 255);
    assert_eq!(usb.brightness(), 0);

    usb.set_brightness(1).unwrap();
    assert_eq!(usb.brightness(), 255);
    assert_eq!(display.icon_bitmask(), 0x04);

    usb.set_brightness(0).unwrap();
    assert_eq!(usb.brightness(), 0);
    assert!(display.indicator("bluetooth").is_none());
}

#[test]
fn no_indicators_without_icon_bank() {
    let config = DeviceConfig::new(Variant::Fd650).with_icon("wifi", 3).unwrap();
    let display: SharedDisplay<NoopRawMutex, _> =
        SharedDisplay::new(FD6551::new(RecordingBus::new(), config));
    display.probe().unwrap();

    assert!(display.indicators().is_empty());
    assert_eq!(
        display.set_icon("wifi", true),
        Err(Error::Validation(ValidationError::UnknownIcon))
    );
}

#[test]
fn control_surface_round_trip() {
    let display: SharedDisplay<NoopRawMutex, _> = SharedDisplay::new(FD6551::new(
        RecordingBus::new(),
        DeviceConfig::new(Variant::Tm1650),
    ));
    display.probe().unwrap();

    display.set_text(b"12:3").unwrap();
    assert_eq!(display.text().as_slice(), b"12:3");

    assert_eq!(display.store_brightness("4\n"), Ok(4));
    assert_eq!(display.brightness(), 4);
    assert_eq!(display.max_brightness(), 8);

    display.power_off().unwrap();
    assert_eq!(display.brightness(), 0);
    assert_eq!(display.max_brightness(), 8);

    display.teardown().unwrap();
    let display = display.into_inner();
    assert_eq!(display.transport.ops.last(), Some(&Op::Release(0x24)));
}
