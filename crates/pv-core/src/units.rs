// pv-core/src/units.rs

use uom::si::f64::{
    Area as UomArea, ElectricCurrent as UomElectricCurrent,
    ElectricPotential as UomElectricPotential, Length as UomLength,
};

// Public canonical unit types (SI, f64)
pub type Area = UomArea;
pub type Current = UomElectricCurrent;
pub type Length = UomLength;
pub type Voltage = UomElectricPotential;

#[inline]
pub fn m(v: f64) -> Length {
    use uom::si::length::meter;
    Length::new::<meter>(v)
}

#[inline]
pub fn mm2(v: f64) -> Area {
    use uom::si::area::square_millimeter;
    Area::new::<square_millimeter>(v)
}

#[inline]
pub fn amps(v: f64) -> Current {
    use uom::si::electric_current::ampere;
    Current::new::<ampere>(v)
}

#[inline]
pub fn volts(v: f64) -> Voltage {
    use uom::si::electric_potential::volt;
    Voltage::new::<volt>(v)
}

#[inline]
pub fn in_m(v: Length) -> f64 {
    use uom::si::length::meter;
    v.get::<meter>()
}

#[inline]
pub fn in_mm2(v: Area) -> f64 {
    use uom::si::area::square_millimeter;
    v.get::<square_millimeter>()
}

#[inline]
pub fn in_amps(v: Current) -> f64 {
    use uom::si::electric_current::ampere;
    v.get::<ampere>()
}

#[inline]
pub fn in_volts(v: Voltage) -> f64 {
    use uom::si::electric_potential::volt;
    v.get::<volt>()
}

pub mod constants {
    /// Copper resistivity used for DC cable sizing, in Ω·mm²/m.
    pub const COPPER_RESISTIVITY_OHM_MM2_PER_M: f64 = 0.023;
}
