/// Offset between the Celsius and Kelvin scales.
pub const KELVIN_OFFSET: f64 = 273.15;

pub fn to_fahrenheit(celsius: f64) -> f64 {
    celsius * 1.8 + 32.0
}

pub fn to_kelvin(celsius: f64) -> f64 {
    celsius + KELVIN_OFFSET
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn celsius_to_fahrenheit() {
        assert_eq!(to_fahrenheit(0.0), 32.0);
        assert_eq!(to_fahrenheit(100.0), 212.0);
        assert_eq!(to_fahrenheit(-50.0), -58.0);
    }

    #[test]
    fn celsius_to_kelvin() {
        assert_eq!(to_kelvin(0.0), 273.15);
        assert_eq!(to_kelvin(100.0), 373.15);
        assert_eq!(to_kelvin(-273.15), 0.0);
    }
}
