use crate::config;
use crate::types::Pose;

// A light- or food-detecting sensor mounted on a robot's rim.
//
// Readings follow an inverse exponential of the distance to each source,
// accumulate across sources within a tick, and saturate at the maximum.
// The owning robot zeroes the reading at the start of every tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sensor {
    pub position: Pose,
    pub reading: f64,
    pub base: f64,          // Falloff base, larger means faster decay with distance
    pub source_radius: f64, // Radius of the entity class this sensor detects
}

impl Sensor {
    pub fn new(source_radius: f64, base: f64) -> Self {
        Sensor {
            position: Pose::default(),
            reading: 0.0,
            base,
            source_radius,
        }
    }

    /// A sensor tuned to light entities. The falloff base is adjustable
    /// through the behavior sensitivity surface.
    pub fn light() -> Self {
        Sensor::new(config::LIGHT_RADIUS, config::DEFAULT_LIGHT_SENSITIVITY)
    }

    /// A sensor tuned to food entities. Food sensing always uses the
    /// default falloff base.
    pub fn food() -> Self {
        Sensor::new(config::FOOD_RADIUS, config::DEFAULT_LIGHT_SENSITIVITY)
    }

    /// Accumulates the contribution of one source at `target` into the
    /// current reading. Saturation applies after each accumulation, so the
    /// stored reading never exceeds the maximum even mid-tick.
    pub fn calculate_reading(&mut self, target: &Pose) {
        let dx = self.position.x - target.x;
        let dy = self.position.y - target.y;
        let distance = (dx * dx + dy * dy).sqrt() - self.source_radius;
        self.reading += config::SENSOR_NUMERATOR / self.base.powf(distance);
        if self.reading > config::SENSOR_READING_MAX {
            self.reading = config::SENSOR_READING_MAX;
        }
    }

    /// Clears the accumulated reading for a fresh tick.
    pub fn zero_reading(&mut self) {
        self.reading = 0.0;
    }
}
