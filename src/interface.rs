use embedded_hal::i2c;

/// Trait for giving read and write access to registers.
///
/// All access is synchronous and blocking; a transport that never delivers a
/// byte blocks its caller indefinitely. Implementations with bounded-wait
/// semantics can be substituted here without touching the driver.
pub trait RegisterAccess {
    type Error;

    /// Reads from multiple registers, starting from `start_register` and
    /// incrementing the register by one for every element in `data`.
    fn read_registers(&mut self, start_register: u8, data: &mut [u8]) -> Result<(), Self::Error>;

    /// Writes to multiple registers in a single transaction, starting from
    /// `start_register` and incrementing the register by one for every element
    /// in `data`. The run must stay within the chip's auto-increment range;
    /// exceeding it is a caller error.
    fn write_registers(&mut self, start_register: u8, data: &[u8]) -> Result<(), Self::Error>;

    /// Reads a single value from `register`.
    fn read_register(&mut self, register: u8) -> Result<u8, Self::Error> {
        let mut buffer: [u8; 1] = [0; 1];
        self.read_registers(register, &mut buffer)?;

        Ok(buffer[0])
    }

    /// Writes a single value to `register`.
    fn write_register(&mut self, register: u8, value: u8) -> Result<(), Self::Error> {
        self.write_registers(register, &[value])
    }
}

pub struct I2cInterface<I2C> {
    pub(crate) i2c: I2C,
    pub(crate) address: u8,
}

impl<I2C> I2cInterface<I2C> {
    /// Creates a new interface on `i2c` for the 7-bit device `address`.
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }
}

impl<I2C: i2c::I2c> I2cInterface<I2C> {
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C, IE> RegisterAccess for I2cInterface<I2C>
where
    I2C: i2c::I2c<Error = IE>,
{
    type Error = IE;

    fn read_registers(&mut self, start_register: u8, data: &mut [u8]) -> Result<(), Self::Error> {
        let header = [start_register];
        let mut operations = [i2c::Operation::Write(&header), i2c::Operation::Read(data)];

        self.i2c.transaction(self.address, &mut operations)?;

        Ok(())
    }

    fn write_registers(&mut self, start_register: u8, data: &[u8]) -> Result<(), Self::Error> {
        let header = [start_register];
        let mut operations = [i2c::Operation::Write(&header), i2c::Operation::Write(data)];

        self.i2c.transaction(self.address, &mut operations)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};

    const ADDRESS: u8 = 0b1011100;

    #[test]
    fn test_i2c_read_register() {
        const REGISTER: u8 = 0x05;
        const VALUE: u8 = 0x1E;

        let i2c = I2cMock::new(&[
            I2cTransaction::transaction_start(ADDRESS),
            I2cTransaction::write(ADDRESS, vec![REGISTER]),
            I2cTransaction::read(ADDRESS, vec![VALUE]),
            I2cTransaction::transaction_end(ADDRESS),
        ]);

        let mut i2c_if = I2cInterface::new(i2c, ADDRESS);

        let value = i2c_if.read_register(REGISTER).unwrap();
        assert_eq!(value, VALUE);

        i2c_if.release().done();
    }

    #[test]
    fn test_i2c_write_register() {
        const REGISTER: u8 = 0x02;
        const VALUE: u8 = 0x01;

        let i2c = I2cMock::new(&[
            I2cTransaction::transaction_start(ADDRESS),
            I2cTransaction::write(ADDRESS, vec![REGISTER]),
            I2cTransaction::write(ADDRESS, vec![VALUE]),
            I2cTransaction::transaction_end(ADDRESS),
        ]);

        let mut i2c_if = I2cInterface::new(i2c, ADDRESS);

        i2c_if.write_register(REGISTER, VALUE).unwrap();

        i2c_if.release().done();
    }

    #[test]
    fn test_i2c_write_register_run() {
        const REGISTER: u8 = 0x40;

        let i2c = I2cMock::new(&[
            I2cTransaction::transaction_start(ADDRESS),
            I2cTransaction::write(ADDRESS, vec![REGISTER]),
            I2cTransaction::write(ADDRESS, vec![0xAA, 0xBB, 0xCC]),
            I2cTransaction::transaction_end(ADDRESS),
        ]);

        let mut i2c_if = I2cInterface::new(i2c, ADDRESS);

        i2c_if.write_registers(REGISTER, &[0xAA, 0xBB, 0xCC]).unwrap();

        i2c_if.release().done();
    }
}
