use std::cell::Cell;

use super::{expect_parked, MockCore};
use crate::rt::halt::halt_on;
use crate::rt::init::{initialize, start, BootGuard, Environment, LoadImage, Region};
use crate::rt::ExitStatus;

fn region(buf: &mut [u8], start: usize, end: usize) -> Region {
    let base = buf.as_mut_ptr();
    unsafe { Region::new(base.add(start), base.add(end)) }
}

#[test]
fn bss_is_zeroed_exactly_over_its_range() {
    let mut memory = vec![0xAAu8; 64];
    let env = Environment {
        bss: region(&mut memory, 8, 40),
        data: None,
    };
    let bss = env.bss;
    let status = unsafe {
        initialize(&env, || {
            let seen = std::slice::from_raw_parts(bss.start(), bss.len());
            assert!(seen.iter().all(|&b| b == 0));
            7
        })
    };
    assert_eq!(status, 7);
    assert!(memory[..8].iter().all(|&b| b == 0xAA));
    assert!(memory[8..40].iter().all(|&b| b == 0));
    assert!(memory[40..].iter().all(|&b| b == 0xAA));
}

#[test]
fn empty_bss_is_left_alone() {
    let mut memory = vec![0x55u8; 16];
    let env = Environment {
        bss: region(&mut memory, 4, 4),
        data: None,
    };
    assert_eq!(unsafe { initialize(&env, || 0) }, 0);
    assert!(memory.iter().all(|&b| b == 0x55));
}

#[test]
fn data_is_copied_before_entry() {
    let image: Vec<u8> = (1..=16).collect();
    let mut memory = vec![0u8; 32];
    let env = Environment {
        bss: region(&mut memory, 16, 32),
        data: Some(LoadImage {
            source: image.as_ptr(),
            target: region(&mut memory, 0, 16),
        }),
    };
    let target = env.data.unwrap().target;
    unsafe {
        initialize(&env, || {
            assert_eq!(std::slice::from_raw_parts(target.start(), 16), &image[..]);
            0
        });
    }
    assert_eq!(&memory[..16], &image[..]);
}

#[test]
fn data_linked_in_place_is_not_rewritten() {
    let mut memory = vec![0x11u8; 16];
    let target = region(&mut memory, 0, 16);
    let image = LoadImage {
        source: target.start(),
        target,
    };
    assert!(image.in_place());
    let env = Environment {
        bss: region(&mut memory, 16, 16),
        data: Some(image),
    };
    unsafe { initialize(&env, || 0) };
    assert!(memory.iter().all(|&b| b == 0x11));
}

#[test]
fn entry_runs_once_then_the_core_parks() {
    let mut memory = vec![0xFFu8; 8];
    let env = Environment {
        bss: region(&mut memory, 0, 8),
        data: None,
    };
    let guard = BootGuard::new();
    let calls = Cell::new(0);
    let core = MockCore::new(3);

    expect_parked(|| unsafe {
        start(&core, &guard, &env, || {
            calls.set(calls.get() + 1);
            // Written after the fill; must survive until the core stops.
            *env.bss.start() = 0x42;
            0
        })
    });
    assert_eq!(calls.get(), 1);
    assert_eq!(core.idles(), 3);
    assert_eq!(memory[0], 0x42);
}

#[test]
fn second_entry_parks_without_reinitializing() {
    let mut memory = vec![0u8; 8];
    let env = Environment {
        bss: region(&mut memory, 0, 8),
        data: None,
    };
    let guard = BootGuard::new();
    assert!(guard.enter());

    unsafe { *env.bss.start() = 0x42 };
    expect_parked(|| unsafe {
        start(&MockCore::new(1), &guard, &env, || -> i32 {
            panic!("entry ran twice")
        })
    });
    assert_eq!(memory[0], 0x42);
}

#[test]
fn rom_loaded_data_boots_with_garbage_guard() {
    // Power-on RAM: the guard word and the `.data` target hold leftovers, `.bss` too.
    let mut memory = vec![0xA5A5_A5A5u32; 16];
    let base = memory.as_mut_ptr() as *mut u8;
    let guard = unsafe { &*(base as *const BootGuard) };
    let image: Vec<u8> = (1..=16).collect();
    let env = unsafe {
        Environment {
            bss: Region::new(base.add(48), base.add(64)),
            data: Some(LoadImage {
                source: image.as_ptr(),
                target: Region::new(base.add(16), base.add(32)),
            }),
        }
    };
    let calls = Cell::new(0);

    expect_parked(|| unsafe {
        start(&MockCore::new(1), guard, &env, || {
            calls.set(calls.get() + 1);
            0
        })
    });
    assert_eq!(calls.get(), 1);
    let bytes = unsafe { std::slice::from_raw_parts(base, 64) };
    assert_eq!(&bytes[16..32], &image[..]);
    assert!(bytes[48..64].iter().all(|&b| b == 0));

    // Jumping back to the reset entry must not run the program again.
    expect_parked(|| unsafe {
        start(&MockCore::new(1), guard, &env, || -> i32 { panic!("entry ran twice") })
    });
    assert_eq!(calls.get(), 1);
}

#[test]
fn guard_opens_once() {
    let guard = BootGuard::default();
    assert!(guard.enter());
    assert!(!guard.enter());
    assert!(!guard.enter());
}

#[test]
fn halt_never_returns_whatever_the_code() {
    for code in [0, 1, -1, i32::MAX] {
        let core = MockCore::new(5);
        expect_parked(|| halt_on(&core, code));
        assert_eq!(core.idles(), 5);
    }
}

#[test]
fn entry_statuses() {
    assert_eq!(().status(), 0);
    assert_eq!(3i32.status(), 3);
}
