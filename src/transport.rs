use embedded_hal::i2c::I2c;

/// Bus access for a single device instance.
///
/// Every sub-device of the chip sits on its own address and takes exactly one
/// byte per write. `claim` and `release` let a host reserve those addresses
/// (for example as ancillary bus clients); by default they do nothing.
pub trait Transport {
    type Error;

    fn claim(&mut self, address: u8) -> Result<(), Self::Error> {
        let _ = address;
        Ok(())
    }

    fn release(&mut self, address: u8) {
        let _ = address;
    }

    fn write(&mut self, address: u8, value: u8) -> Result<(), Self::Error>;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    type Error = T::Error;

    fn claim(&mut self, address: u8) -> Result<(), Self::Error> {
        T::claim(self, address)
    }

    fn release(&mut self, address: u8) {
        T::release(self, address)
    }

    fn write(&mut self, address: u8, value: u8) -> Result<(), Self::Error> {
        T::write(self, address, value)
    }
}

/// [`Transport`] over an `embedded-hal` I2C bus, one "send byte" per write.
pub struct I2cTransport<I2C> {
    pub i2c: I2C,
}

impl<I2C, E> I2cTransport<I2C>
where
    I2C: I2c<Error = E>,
{
    pub fn new(i2c: I2C) -> Self {
        Self { i2c }
    }

    pub fn destroy(self) -> I2C {
        self.i2c
    }
}

impl<I2C, E> Transport for I2cTransport<I2C>
where
    I2C: I2c<Error = E>,
{
    type Error = E;

    fn write(&mut self, address: u8, value: u8) -> Result<(), E> {
        self.i2c.write(address, &[value])
    }
}
