//! Driver for the Panasonic AN32183A LED matrix driver, an 81-dot (9x9)
//! constant-current PWM controller on a two-wire bus.
//!
//! The driver is stateless: it binds one bus address and one exclusive NRST
//! line, and the chip itself is the source of truth for all configuration.
//! Several chips can share one bus at distinct [`DeviceAddress`]es, one driver
//! instance per chip. Access is synchronous and strictly ordered; callers
//! using the bus from more than one thread must serialize around it
//! themselves.
//!
//! A register read on a wedged or absent device blocks for as long as the
//! underlying bus implementation does — there is no timeout in this driver.

#![cfg_attr(not(test), no_std)]

mod configuration;
pub mod interface;
pub mod register;

pub use configuration::{Config, Options, MAX_LUMINANCE};
use configuration::{mtxon_pack, mtxon_unpack};
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use interface::RegisterAccess;
use register::{BitFlags, Register, NUM_DOTS, NUM_ENABLE_REGS};

/// Error enum for the AN32183A driver
#[derive(Debug)]
pub enum Error<IfE, PinE> {
    /// An interface related error has occured
    Interface(IfE),

    /// Driving the NRST line failed
    ResetPin(PinE),
}

/// Time to wait after releasing NRST before the first bus transaction
/// (datasheet p14 requires >4ms).
pub const T_RESET_SETTLE_US: u32 = 5_000;

/// Bus clock rate validated with this chip. Higher rates have been seen
/// working but are not guaranteed reliable.
pub const I2C_CLOCK_HZ: u32 = 100_000;

/// Device address selected by the ADDR strap pin (datasheet p40).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceAddress {
    /// ADDR tied to GND
    Low,
    /// ADDR tied to VDD
    High,
    /// ADDR tied to SCL
    Scl,
    /// ADDR tied to SDA
    Sda,
}

impl DeviceAddress {
    /// The 7-bit bus address.
    pub const fn address(self) -> u8 {
        match self {
            DeviceAddress::Low => 0b1011100,
            DeviceAddress::High => 0b1011101,
            DeviceAddress::Scl => 0b1011110,
            DeviceAddress::Sda => 0b1011111,
        }
    }
}

/// Generic driver for one AN32183A.
///
/// `I` is the register interface (address-scoped), `RST` the output pin wired
/// to the chip's NRST input. The NRST line must not be shared with another
/// driver instance.
pub struct An32183a<I, RST> {
    interface: I,
    nrst: RST,
}

impl<I2C, RST> An32183a<interface::I2cInterface<I2C>, RST>
where
    I2C: embedded_hal::i2c::I2c,
{
    /// Create a new AN32183A driver on `i2c` for the chip strapped to
    /// `address`, with `nrst` wired to the chip's NRST input.
    ///
    /// The chip is untouched until [`begin()`](Self::begin) is called.
    pub fn new_with_i2c(i2c: I2C, address: DeviceAddress, nrst: RST) -> Self {
        An32183a::new(interface::I2cInterface::new(i2c, address.address()), nrst)
    }
}

impl<I, RST> An32183a<I, RST> {
    /// Create a new driver instance from a register interface and reset pin.
    pub fn new(interface: I, nrst: RST) -> Self {
        Self { interface, nrst }
    }

    /// Destroys the driver and releases the interface and the reset pin.
    pub fn release(self) -> (I, RST) {
        (self.interface, self.nrst)
    }
}

impl<I, RST> An32183a<I, RST>
where
    I: RegisterAccess,
    RST: OutputPin,
{
    /// Total number of LED dots driven by the chip.
    pub const NUM_DOTS: usize = NUM_DOTS;

    /// Brings the chip from power-on (or any) state into operating mode.
    ///
    /// Releases NRST, waits the settle time, issues a full reset and then
    /// configures oscillator, options, matrix enable and maximum luminance,
    /// in that order (the matrix needs a running clock source before it is
    /// switched on). Finally all PWM channels are enabled so the duty
    /// registers drive the outputs.
    ///
    /// A bus failure aborts the sequence and leaves the chip partially
    /// configured; call `begin()` again to retry from the top. May be invoked
    /// any number of times.
    pub fn begin<D: DelayNs>(
        &mut self,
        config: &Config,
        delay: &mut D,
    ) -> Result<(), Error<I::Error, RST::Error>> {
        self.nrst.set_high().map_err(Error::ResetPin)?;
        delay.delay_us(T_RESET_SETTLE_US);

        self.reset(true, true)?;

        self.write_register(Register::POWERCNT, config.powercnt_reg_value())?;
        self.write_register(Register::OPTION, config.option_reg_value())?;
        // after a full reset the other MTXON bits are at known defaults, so
        // the register can be written whole
        self.write_register(Register::MTXON, config.mtxon_reg_value())?;

        self.set_pwm_enabled(true)?;

        Ok(())
    }

    /// Resets the chip through the RST register.
    ///
    /// A full reset (`full`) restores every register to its power-on default
    /// and must be followed by reconfiguration; a RAM reset (`ram`) clears
    /// only the duty and luminance runs.
    pub fn reset(&mut self, full: bool, ram: bool) -> Result<(), Error<I::Error, RST::Error>> {
        let value = full.then_some(BitFlags::RST_SRST).unwrap_or(0)
            | ram.then_some(BitFlags::RST_RAMRST).unwrap_or(0);

        self.write_register(Register::RST, value)
    }

    /// Selects the internal oscillator (`true`) or an external clock as the
    /// matrix clock source.
    pub fn set_oscillator(&mut self, internal: bool) -> Result<(), Error<I::Error, RST::Error>> {
        self.write_register(
            Register::POWERCNT,
            internal.then_some(BitFlags::POWERCNT_OSCEN).unwrap_or(0),
        )
    }

    /// Writes the OPTION register.
    pub fn set_options(&mut self, options: Options) -> Result<(), Error<I::Error, RST::Error>> {
        self.write_register(Register::OPTION, options.register_value())
    }

    /// Sets the maximum luminance (peak LED current) level, 0..=7 in 7.5mA
    /// steps up to 60mA. Out-of-range levels are clamped to 7.
    ///
    /// Read-modify-write, the matrix enable bit is preserved.
    pub fn set_max_luminance(&mut self, level: u8) -> Result<(), Error<I::Error, RST::Error>> {
        let (enabled, _) = mtxon_unpack(self.read_register(Register::MTXON)?);

        self.write_register(Register::MTXON, mtxon_pack(enabled, level))
    }

    /// Switches matrix scanning on or off.
    ///
    /// Read-modify-write, the maximum luminance field is preserved.
    pub fn set_matrix_enabled(&mut self, enabled: bool) -> Result<(), Error<I::Error, RST::Error>> {
        let (_, level) = mtxon_unpack(self.read_register(Register::MTXON)?);

        self.write_register(Register::MTXON, mtxon_pack(enabled, level))
    }

    /// Enables or disables PWM control for all 81 dots.
    pub fn set_pwm_enabled(&mut self, enabled: bool) -> Result<(), Error<I::Error, RST::Error>> {
        let mut buffer = [0u8; NUM_ENABLE_REGS];
        if enabled {
            buffer[..NUM_ENABLE_REGS - 1].fill(0xFF);
            // PWMEN11 controls a single LED
            buffer[NUM_ENABLE_REGS - 1] = 0x01;
        }

        self.write_registers(Register::PWMEN_START, &buffer)
    }

    /// Sets the PWM duty of a single dot. `dot` must be below
    /// [`NUM_DOTS`](Self::NUM_DOTS).
    pub fn set_pixel_duty(&mut self, dot: u8, duty: u8) -> Result<(), Error<I::Error, RST::Error>> {
        assert!((dot as usize) < NUM_DOTS);

        self.write_register(Register::duty(dot), duty)
    }

    /// Sets the PWM duty of `values.len()` dots in one auto-increment
    /// transaction, starting from dot `start`.
    pub fn set_duty(&mut self, start: u8, values: &[u8]) -> Result<(), Error<I::Error, RST::Error>> {
        assert!(start as usize + values.len() <= NUM_DOTS);
        assert!(!values.is_empty());

        self.write_registers(Register::duty(start), values)
    }

    /// Sets every dot to the same PWM duty.
    ///
    /// `set_all_pixel_duty(0xFF)` doubles as the wiring check: every LED on a
    /// correctly addressed and wired chip lights at full duty.
    pub fn set_all_pixel_duty(&mut self, duty: u8) -> Result<(), Error<I::Error, RST::Error>> {
        self.write_registers(Register::DUTY_START, &[duty; NUM_DOTS])
    }

    /// Sets the luminance/fade control register of a single dot.
    pub fn set_pixel_luminance(
        &mut self,
        dot: u8,
        value: u8,
    ) -> Result<(), Error<I::Error, RST::Error>> {
        assert!((dot as usize) < NUM_DOTS);

        self.write_register(Register::luminance(dot), value)
    }

    /// Sets the luminance/fade control register of every dot.
    pub fn set_all_pixel_luminance(&mut self, value: u8) -> Result<(), Error<I::Error, RST::Error>> {
        self.write_registers(Register::LUMINANCE_START, &[value; NUM_DOTS])
    }

    /// Sets the fade in/out step time. Values above the 3-bit field are
    /// clamped.
    pub fn set_fade_time(&mut self, slptime: u8) -> Result<(), Error<I::Error, RST::Error>> {
        self.write_register(Register::SLPTIME, slptime.min(BitFlags::SLPTIME_MASK))
    }

    /// Puts the X lines selected by `mask` (bits 0..=9 for X1..X10) into
    /// constant-current mode.
    pub fn set_constant_current_x(&mut self, mask: u16) -> Result<(), Error<I::Error, RST::Error>> {
        let values = [(mask & 0x3F) as u8, ((mask >> 6) & 0x0F) as u8];

        self.write_registers(Register::CONSTX6_1, &values)
    }

    /// Puts the Y lines selected by `mask` (bits 0..=8 for Y1..Y9) into
    /// constant-current mode.
    pub fn set_constant_current_y(&mut self, mask: u16) -> Result<(), Error<I::Error, RST::Error>> {
        let values = [(mask & 0x3F) as u8, ((mask >> 6) & 0x07) as u8];

        self.write_registers(Register::CONSTY6_1, &values)
    }

    /// Raw diagnostic read of any register.
    pub fn register(&mut self, register: u8) -> Result<u8, Error<I::Error, RST::Error>> {
        self.read_register(register)
    }

    fn read_register(&mut self, register: u8) -> Result<u8, Error<I::Error, RST::Error>> {
        self.interface
            .read_register(register)
            .map_err(Error::Interface)
    }

    fn write_register(
        &mut self,
        register: u8,
        value: u8,
    ) -> Result<(), Error<I::Error, RST::Error>> {
        self.interface
            .write_register(register, value)
            .map_err(Error::Interface)
    }

    fn write_registers(
        &mut self,
        start_register: u8,
        values: &[u8],
    ) -> Result<(), Error<I::Error, RST::Error>> {
        self.interface
            .write_registers(start_register, values)
            .map_err(Error::Interface)
    }
}
