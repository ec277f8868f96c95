use crate::register::BitFlags;

/// Highest selectable luminance level (60mA peak current).
pub const MAX_LUMINANCE: u8 = 7;

/// OPTION register settings.
///
/// The OPTION register is fully owned by this field group, so it is always
/// written whole, never read-modify-written.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Options {
    /// Ghost image prevention
    pub ghost_prevention: bool,
    /// External melody input
    pub melody_mode: bool,
    /// Internal clock output on the CLKIO pin
    pub clock_output: bool,
    /// Clock the matrix from an external synchronous clock
    pub external_clock: bool,
}

impl Options {
    pub(crate) fn register_value(&self) -> u8 {
        self.ghost_prevention
            .then_some(BitFlags::OPTION_GHOST_PREVENTION)
            .unwrap_or(0)
            | self
                .melody_mode
                .then_some(BitFlags::OPTION_MLDEN)
                .unwrap_or(0)
            | self
                .clock_output
                .then_some(BitFlags::OPTION_CLKOUT)
                .unwrap_or(0)
            | self
                .external_clock
                .then_some(BitFlags::OPTION_EXTCLK)
                .unwrap_or(0)
    }

    /// Decodes a raw OPTION register value, for use with diagnostic reads.
    pub fn from_register_value(value: u8) -> Self {
        Options {
            ghost_prevention: value & BitFlags::OPTION_GHOST_PREVENTION > 0,
            melody_mode: value & BitFlags::OPTION_MLDEN > 0,
            clock_output: value & BitFlags::OPTION_CLKOUT > 0,
            external_clock: value & BitFlags::OPTION_EXTCLK > 0,
        }
    }
}

/// Packs the MTXON register from its two fields.
///
/// Luminance levels 0..=7 select the peak LED current in 7.5mA steps, 7.5mA
/// (level 0) up to 60mA (level 7), mapped onto the odd values of the 4-bit
/// IMAX field. Out-of-range levels are clamped to the maximum.
pub(crate) const fn mtxon_pack(matrix_enabled: bool, level: u8) -> u8 {
    (imax_field(level) << BitFlags::MTXON_IMAX_SHIFT)
        | if matrix_enabled { BitFlags::MTXON_MTXON } else { 0 }
}

/// Unpacks the MTXON register into (matrix enabled, luminance level).
pub(crate) const fn mtxon_unpack(value: u8) -> (bool, u8) {
    let imax = (value >> BitFlags::MTXON_IMAX_SHIFT) & BitFlags::MTXON_IMAX_MASK;

    (value & BitFlags::MTXON_MTXON > 0, imax >> 1)
}

const fn imax_field(level: u8) -> u8 {
    let level = if level > MAX_LUMINANCE {
        MAX_LUMINANCE
    } else {
        level
    };

    (level << 1) | 1
}

/// Operating configuration applied by [`An32183a::begin()`](crate::An32183a::begin).
#[derive(Debug, Clone)]
pub struct Config {
    pub(crate) internal_oscillator: bool,
    pub(crate) options: Options,
    pub(crate) max_luminance: u8,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            internal_oscillator: true,
            options: Options::default(),
            max_luminance: MAX_LUMINANCE,
        }
    }
}

macro_rules! builder_property {
    ($field:ident, $field_type:path, $doc:literal) => {
        #[doc = $doc]
        pub fn $field(mut self, $field: $field_type) -> Self {
            self.$field = $field;
            self
        }
    };
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    builder_property!(
        internal_oscillator,
        bool,
        "Run the matrix from the internal oscillator instead of an external clock"
    );
    builder_property!(options, Options, "OPTION register settings");
    builder_property!(
        max_luminance,
        u8,
        "Maximum luminance level (0..=7, out-of-range values are clamped)"
    );

    pub(crate) fn powercnt_reg_value(&self) -> u8 {
        self.internal_oscillator
            .then_some(BitFlags::POWERCNT_OSCEN)
            .unwrap_or(0)
    }

    pub(crate) fn option_reg_value(&self) -> u8 {
        self.options.register_value()
    }

    pub(crate) fn mtxon_reg_value(&self) -> u8 {
        mtxon_pack(true, self.max_luminance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_ghost_prevention_only() {
        let options = Options {
            ghost_prevention: true,
            ..Default::default()
        };

        assert_eq!(options.register_value(), 0b00001000);
    }

    #[test]
    fn test_options_bit_layout() {
        let options = Options {
            ghost_prevention: false,
            melody_mode: true,
            clock_output: false,
            external_clock: true,
        };

        assert_eq!(options.register_value(), 0b00000101);
    }

    #[test]
    fn test_options_round_trip() {
        for value in 0..=0b1111 {
            let options = Options::from_register_value(value);
            assert_eq!(options.register_value(), value);
        }
    }

    #[test]
    fn test_mtxon_pack() {
        // level 7 = 60mA, IMAX field 0b1111
        assert_eq!(mtxon_pack(true, 7), 0b00011111);
        assert_eq!(mtxon_pack(false, 7), 0b00011110);
        assert_eq!(mtxon_pack(true, 0), 0b00000011);
    }

    #[test]
    fn test_mtxon_pack_clamps() {
        assert_eq!(mtxon_pack(true, 200), mtxon_pack(true, MAX_LUMINANCE));
    }

    #[test]
    fn test_mtxon_round_trip() {
        for level in 0..=MAX_LUMINANCE {
            for enabled in [false, true] {
                assert_eq!(mtxon_unpack(mtxon_pack(enabled, level)), (enabled, level));
            }
        }
    }

    #[test]
    fn test_mtxon_unpack_por_default() {
        // 0x1E: matrix off, maximum current preset
        assert_eq!(mtxon_unpack(0x1E), (false, MAX_LUMINANCE));
    }

    #[test]
    fn test_config_builder() {
        let config = Config::new()
            .internal_oscillator(false)
            .max_luminance(3)
            .options(Options {
                clock_output: true,
                ..Default::default()
            });

        assert_eq!(config.internal_oscillator, false);
        assert_eq!(config.max_luminance, 3);
        assert_eq!(config.powercnt_reg_value(), 0x00);
        assert_eq!(config.option_reg_value(), 0b00000010);
        assert_eq!(config.mtxon_reg_value(), 0b00001111);
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();

        assert_eq!(config.powercnt_reg_value(), 0x01);
        assert_eq!(config.option_reg_value(), 0x00);
        assert_eq!(config.mtxon_reg_value(), 0b00011111);
    }
}
