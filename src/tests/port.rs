use super::{Access, RecordingRegister};
use crate::driver::port::{
    transfer_in, transfer_out, ByteRegister, DevicePort, MmioRegister, PortError, WriteMode,
    HOST_PORT_ADDR,
};
use crate::driver::CharDevice;

const LENGTHS: [usize; 4] = [0, 1, 16, 4096];

fn pattern(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i * 7 + 3) as u8).collect()
}

#[test]
fn transfer_out_writes_each_byte_in_order() {
    for len in LENGTHS {
        let port = DevicePort::new(RecordingRegister::default(), WriteMode::Store);
        let buf = pattern(len + 5);
        transfer_out(&port, &buf, len).unwrap();
        assert_eq!(port.register().stored(), &buf[..len]);
        assert_eq!(port.register().accesses().len(), len);
    }
}

#[test]
fn transfer_in_reads_each_byte_in_order() {
    for len in LENGTHS {
        let input = pattern(len);
        let port = DevicePort::new(RecordingRegister::with_input(&input), WriteMode::Store);
        let mut buf = vec![0xEEu8; len + 3];
        transfer_in(&port, &mut buf, len).unwrap();
        assert_eq!(&buf[..len], &input[..]);
        assert!(buf[len..].iter().all(|&b| b == 0xEE));
        let accesses = port.register().accesses();
        assert_eq!(accesses.len(), len);
        assert!(accesses.iter().all(|a| matches!(a, Access::Load(_))));
    }
}

#[test]
fn short_buffers_are_rejected_before_any_access() {
    let port = DevicePort::new(RecordingRegister::with_input(&[1, 2, 3]), WriteMode::Store);
    let mut buf = [0u8; 2];
    assert_eq!(
        transfer_in(&port, &mut buf, 3),
        Err(PortError::ShortBuffer {
            length: 3,
            capacity: 2
        })
    );
    assert_eq!(
        transfer_out(&port, &buf, 5),
        Err(PortError::ShortBuffer {
            length: 5,
            capacity: 2
        })
    );
    assert!(port.register().accesses().is_empty());
    assert_eq!(buf, [0, 0]);
}

#[test]
fn store_mode_never_reads() {
    let port = DevicePort::new(RecordingRegister::default(), WriteMode::default());
    port.register().set_latch(0x40);
    port.put_char(0x01);
    assert_eq!(port.register().accesses(), [Access::Store(0x01)]);
}

#[test]
fn merge_mode_ors_into_the_register() {
    let port = DevicePort::new(RecordingRegister::default(), WriteMode::Merge);
    port.register().set_latch(0x40);
    port.put_char(0x01);
    assert_eq!(
        port.register().accesses(),
        [Access::Load(0x40), Access::Store(0x41)]
    );
}

#[test]
fn mmio_register_uses_its_address() {
    let mut cell = Box::new(0u8);
    let register = unsafe { MmioRegister::new(&mut *cell as *mut u8 as usize) };
    register.store(0x9C);
    assert_eq!(register.load(), 0x9C);
    assert_eq!(*cell, 0x9C);
}

#[cfg(target_pointer_width = "64")]
#[test]
fn host_port_is_uart0() {
    assert_eq!(HOST_PORT_ADDR, 0x1_FFF0_0000);
}
