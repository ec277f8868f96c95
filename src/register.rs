/// AN32183A registers
///
/// Register table: datasheet p15, addressing scheme p40.
pub struct Register;
#[allow(dead_code)]
impl Register {
    /// RAM reset / soft reset
    pub const RST: u8 = 0x01;
    /// Internal oscillator control
    pub const POWERCNT: u8 = 0x02;
    /// Ghost image prevention, melody input, clock output, clock source
    pub const OPTION: u8 = 0x04;
    /// Matrix enable and maximum LED current
    pub const MTXON: u8 = 0x05;

    /// PWM enable, PWMEN1..PWMEN11 (0x06-0x10). PWMEN11 covers a single LED.
    pub const PWMEN_START: u8 = 0x06;
    pub const fn pwmen(index: u8) -> u8 {
        Self::PWMEN_START + index
    }

    /// Melody enable, MLDEN1..MLDEN11 (0x11-0x1B)
    pub const MLDEN_START: u8 = 0x11;
    pub const fn mlden(index: u8) -> u8 {
        Self::MLDEN_START + index
    }

    pub const MLDMODE1: u8 = 0x2A;
    /// Voltage threshold
    pub const THOLD: u8 = 0x2B;

    /// Constant current mode, lines X1-X6
    pub const CONSTX6_1: u8 = 0x2C;
    /// Constant current mode, lines X7-X10
    pub const CONSTX10_7: u8 = 0x2D;
    /// Constant current mode, lines Y1-Y6
    pub const CONSTY6_1: u8 = 0x2E;
    /// Constant current mode, lines Y7-Y9
    pub const CONSTY9_7: u8 = 0x2F;
    /// Constant current mask, lines Y1-Y6
    pub const MASKY6_1: u8 = 0x30;
    /// Constant current mask, lines Y7-Y9
    pub const MASKY9_7: u8 = 0x31;

    /// Fade in/out timing
    pub const SLPTIME: u8 = 0x32;
    pub const MLDCOM: u8 = 0x33;
    pub const SCANSET: u8 = 0x36;

    // Order of the per-dot runs: A1..A9, B1..B9, ..., I1..I9, one register
    // per dot, the chip auto-increments through the whole run.

    /// PWM duty, DTA1..DTI9 (0x40-0x90, 81 registers)
    pub const DUTY_START: u8 = 0x40;
    pub const fn duty(dot: u8) -> u8 {
        Self::DUTY_START + dot
    }

    /// Per-dot luminance and fade control, LEDA1..LEDI9 (0x91-0xE1, 81 registers)
    pub const LUMINANCE_START: u8 = 0x91;
    pub const fn luminance(dot: u8) -> u8 {
        Self::LUMINANCE_START + dot
    }
}

/// Number of LED dots in the 9x9 matrix.
pub const NUM_DOTS: usize = 81;

/// Number of PWM enable / melody enable registers.
pub const NUM_ENABLE_REGS: usize = 11;

/// Bitflags for registers
pub struct BitFlags;
#[allow(dead_code)]
impl BitFlags {
    /// Soft reset, clears every register to its power-on default
    pub const RST_SRST: u8 = 1 << 0;
    /// RAM reset, clears only the duty and luminance runs
    pub const RST_RAMRST: u8 = 1 << 1;

    pub const POWERCNT_OSCEN: u8 = 1 << 0;

    pub const OPTION_EXTCLK: u8 = 1 << 0;
    pub const OPTION_CLKOUT: u8 = 1 << 1;
    pub const OPTION_MLDEN: u8 = 1 << 2;
    pub const OPTION_GHOST_PREVENTION: u8 = 1 << 3;

    pub const MTXON_MTXON: u8 = 1 << 0;
    pub const MTXON_IMAX_SHIFT: u8 = 1;
    pub const MTXON_IMAX_MASK: u8 = 0b1111;

    pub const SLPTIME_MASK: u8 = 0b111;
}

/// Documented power-on-reset value of `register`.
///
/// Everything resets to zero except MTXON (maximum current preset, matrix
/// off), MLDCOM and SCANSET.
pub const fn por_default(register: u8) -> u8 {
    match register {
        Register::MTXON => 0x1E,
        Register::MLDCOM => 0x03,
        Register::SCANSET => 0x08,
        _ => 0x00,
    }
}
