use super::port::{transfer_in, transfer_out, PortError};
use super::CharDevice;

/// Raw model I/O with the host: stimulus bytes in, prediction bytes out, no framing.
pub struct HostLink<'a, D: ?Sized> {
    device: &'a D,
    input_shift: i8,
}

impl<'a, D: CharDevice + ?Sized> HostLink<'a, D> {
    /// `input_shift` is added to every stimulus byte to match the model's input zero point.
    pub fn new(device: &'a D, input_shift: i8) -> Self {
        Self {
            device,
            input_shift,
        }
    }

    pub fn read_stimulus(&self, input: &mut [i8]) -> Result<(), PortError> {
        log::debug!("reading {} stimulus bytes", input.len());
        let len = input.len();
        transfer_in(self.device, as_bytes_mut(input), len)?;
        for value in input.iter_mut() {
            *value = value.wrapping_add(self.input_shift);
        }
        Ok(())
    }

    pub fn write_prediction(&self, output: &[i8]) -> Result<(), PortError> {
        log::debug!("writing {} prediction bytes", output.len());
        transfer_out(self.device, as_bytes(output), output.len())
    }
}

fn as_bytes(values: &[i8]) -> &[u8] {
    unsafe { core::slice::from_raw_parts(values.as_ptr() as *const u8, values.len()) }
}

fn as_bytes_mut(values: &mut [i8]) -> &mut [u8] {
    unsafe { core::slice::from_raw_parts_mut(values.as_mut_ptr() as *mut u8, values.len()) }
}
