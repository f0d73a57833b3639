//! Keyword spotting on the accelerator: read a spectrogram from the host, classify it, send the
//! scores back, forever.

#![no_std]
#![no_main]

use core::ffi::c_void;

use hpc_rt::collab::{execute, Accelerator, Dla, TvmgenDefault};
use hpc_rt::cores::console::init_logging;
use hpc_rt::cores::workspace::Workspace;
use hpc_rt::driver::host_link::HostLink;
use hpc_rt::driver::port::{DevicePort, MmioRegister, WriteMode, HOST_PORT_ADDR};
use hpc_rt::platform::heap::HeapBacking;
use hpc_rt::platform::{self, abort, PlatformConfig};
use log::LevelFilter;

const HEIGHT: usize = 10;
const WIDTH: usize = 49;
const CHANNELS: usize = 1;
const INPUT_SIZE: usize = HEIGHT * WIDTH * CHANNELS;
const OUTPUT_SIZE: usize = 12;
// Input zero point of the quantized model.
const INPUT_SHIFT: i8 = -83;

// Scratch memory the compiled graph asks for.
const WORKSPACE_SIZE: usize = 21312;

static HOST_PORT: DevicePort<MmioRegister> =
    DevicePort::new(unsafe { MmioRegister::new(HOST_PORT_ADDR) }, WriteMode::Store);

static WORKSPACE: Workspace<WORKSPACE_SIZE> = Workspace::new();

#[repr(C)]
struct Inputs {
    input: *mut c_void,
}

#[repr(C)]
struct Outputs {
    output: *mut c_void,
}

fn init() {
    // The host link shares the port, so only fatal messages are printed.
    let _ = init_logging(&HOST_PORT, LevelFilter::Error);

    let Some(workspace) = WORKSPACE.claim() else {
        abort(1)
    };
    let config = PlatformConfig {
        heap: HeapBacking::Arena(workspace),
        ..PlatformConfig::default()
    };
    if let Err(err) = platform::install(config) {
        abort(err.code())
    }
    Dla.init();
}

fn kws() {
    init();

    let link = HostLink::new(&HOST_PORT, INPUT_SHIFT);
    let mut input = [0i8; INPUT_SIZE];
    let mut output = [0i8; OUTPUT_SIZE];
    loop {
        if let Err(err) = link.read_stimulus(&mut input) {
            log::error!("{}", err);
            abort(1)
        }

        let mut inputs = Inputs {
            input: input.as_mut_ptr().cast(),
        };
        let mut outputs = Outputs {
            output: output.as_mut_ptr().cast(),
        };
        let result = unsafe {
            execute(
                &TvmgenDefault,
                (&mut inputs as *mut Inputs).cast(),
                (&mut outputs as *mut Outputs).cast(),
            )
        };
        if let Err(err) = result {
            abort(err.code())
        }

        if let Err(err) = link.write_prediction(&output) {
            log::error!("{}", err);
            abort(1)
        }
    }
}

hpc_rt::entry!(kws);
